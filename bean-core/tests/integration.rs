//! Integration Tests — end-to-end turns through the public API.
//!
//! Resolution → application → detection, across the bundled tables, custom
//! in-memory tables and the save store.

use bean_core::config::PersistenceConfig;
use bean_core::machine::{self, HEAL_ON_FAILURE, HEAL_ON_SUCCESS};
use bean_core::persistence::SaveStore;
use bean_core::source::{EmbeddedSource, InMemorySource};
use bean_core::{
    Bean, BeanEngine, BeanError, BeanEvent, Emotion, Personality, RecordingSink, Turn,
};

const HEADER: &str = "action,action_message,success_message,failure_message,success_rate,success_changes,failure_changes\n";

/// A table whose single action changes nothing and always succeeds.
fn quiet_engine(source_id: &str) -> BeanEngine<InMemorySource> {
    let table = format!("{HEADER}idle,{{name}} sits still.,{{name}} is calm.,never,1.0,,\n");
    BeanEngine::new(InMemorySource::new().with_table(source_id, table), Some(5))
}

// ---------------------------------------------------------------------------
// Scenario A: trust collapse raises exactly one event
// ---------------------------------------------------------------------------

#[test]
fn trust_collapse_runs_away_and_nothing_else() {
    let mut bean = Bean::new("Pip", Personality::Kind).with_emotion(Emotion::Trust, 5);
    let mut sink = RecordingSink::default();

    let event = machine::detect_base_event(&mut bean, &mut sink);

    assert_eq!(event, Some(BeanEvent::RanAway));
    assert_eq!(sink.event_kinds(), vec![BeanEvent::RanAway]);
    assert!(!sink.saw(BeanEvent::Depressed));
    let snap = bean.snapshot();
    assert_eq!(snap.emotions[&Emotion::Happy], 40);
    assert_eq!(snap.energy, 85);
}

// ---------------------------------------------------------------------------
// Scenario B: an incapacitated Bean only accepts healing
// ---------------------------------------------------------------------------

#[test]
fn incapacitated_bean_only_heals() {
    let mut engine = BeanEngine::with_embedded_data(Some(17));
    let mut bean = Bean::new("Pip", Personality::Lazy).with_energy(0);
    let before = bean.snapshot();
    let mut sink = RecordingSink::default();

    for action in ["eat", "rest", "play", "goOut", "work"] {
        let turn = engine.perform_action(&mut bean, action, &mut sink).expect("resolves");
        assert_eq!(turn, Turn::Incapacitated, "{action}");
    }
    assert_eq!(bean.snapshot(), before);
    assert!(sink.messages.is_empty());
    assert!(sink.events.is_empty());

    let turn = engine.perform_action(&mut bean, "heal", &mut sink).expect("heal");
    assert!(turn.is_applied());
    assert_eq!(bean.actions_count(), 1);
    assert!(bean.recently_healed());
    assert!(bean.energy() > 0);
}

#[test]
fn heal_restores_fixed_amounts() {
    let always = format!("{HEADER}heal,{{name}} rests in bed.,ok,meh,1.0,,\n");
    let never = format!("{HEADER}heal,{{name}} rests in bed.,ok,meh,0.0,,\n");

    for (table, expected) in [(always, HEAL_ON_SUCCESS), (never, HEAL_ON_FAILURE)] {
        let source = InMemorySource::new().with_table("kind.csv", table);
        let mut engine = BeanEngine::new(source, Some(1));
        let mut bean = Bean::new("Pip", Personality::Kind).with_energy(0);
        let mut sink = RecordingSink::default();

        engine.perform_action(&mut bean, "heal", &mut sink).expect("heal");
        assert_eq!(bean.energy(), expected);
        assert!(sink.messages[0].contains(&format!("recovered {expected}")));
    }
}

// ---------------------------------------------------------------------------
// Scenario C: unknown action keys are data errors
// ---------------------------------------------------------------------------

#[test]
fn unknown_action_is_rejected_without_side_effects() {
    let mut engine = BeanEngine::with_embedded_data(Some(3));
    let mut bean = engine.create_bean("Pip", Personality::Snappy);
    let before = bean.snapshot();
    let mut sink = RecordingSink::default();

    let err = engine
        .perform_action(&mut bean, "fly", &mut sink)
        .expect_err("unknown action");

    assert!(matches!(
        err,
        BeanError::ActionNotFound { ref source_id, ref action } if source_id == "snappy.csv" && action == "fly"
    ));
    assert!(err.is_data_error());
    assert_eq!(bean.snapshot(), before);
    assert!(sink.messages.is_empty());
}

// ---------------------------------------------------------------------------
// Scenario D: growth on the tenth quiet action
// ---------------------------------------------------------------------------

#[test]
fn ten_quiet_actions_grow_once() {
    let mut engine = quiet_engine("kind.csv");
    let mut bean = engine.create_bean("Pip", Personality::Kind);
    let mut sink = RecordingSink::default();

    let mut growth_turns = Vec::new();
    for turn_no in 1..=10 {
        let turn = engine.perform_action(&mut bean, "idle", &mut sink).expect("idle");
        if turn.event() == Some(BeanEvent::Growth) {
            growth_turns.push(turn_no);
        }
    }

    assert_eq!(growth_turns, vec![10]);
    assert_eq!(sink.event_kinds(), vec![BeanEvent::Growth]);
    assert_eq!(bean.actions_count(), 10);
}

#[test]
fn every_action_in_every_bundled_table_resolves() {
    let mut engine = BeanEngine::with_embedded_data(Some(99));
    let mut sink = RecordingSink::default();
    for personality in Personality::ALL {
        let mut bean = engine.create_bean("Pip", personality);
        for action in ["eat", "rest", "play", "heal", "goOut", "work"] {
            engine.perform_action(&mut bean, action, &mut sink).expect(action);
            if bean.is_incapacitated() {
                engine.perform_action(&mut bean, "heal", &mut sink).expect("heal");
            }
        }
        assert!(engine.catalog().is_cached(personality.source_id()));
    }
    assert_eq!(EmbeddedSource::IDS.len(), 3);
}

#[test]
fn long_random_play_keeps_stats_in_range() {
    let mut engine = BeanEngine::with_embedded_data(Some(2024));
    let mut sink = RecordingSink::default();
    let actions = ["eat", "rest", "play", "heal", "goOut", "work"];

    for personality in Personality::ALL {
        let mut bean = engine.create_bean("Pip", personality);
        for i in 0..300 {
            let action = actions[i % actions.len()];
            engine.perform_action(&mut bean, action, &mut sink).expect("action");
            let snap = bean.snapshot();
            assert!((0..=100).contains(&snap.energy));
            assert!(snap.emotions.values().all(|v| (0..=100).contains(v)));
        }
    }
}

#[test]
fn data_directory_source_matches_bundled_tables() {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
    let mut engine = BeanEngine::new(bean_core::source::CsvDirectorySource::new(dir), Some(8));
    let mut bean = engine.create_bean("Pip", Personality::Kind);
    let mut sink = RecordingSink::default();
    assert!(engine.perform_action(&mut bean, "play", &mut sink).is_ok());
}

// ---------------------------------------------------------------------------
// Persistence round trip mid-game
// ---------------------------------------------------------------------------

#[test]
fn save_and_resume_mid_game() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bean_save.db");
    let config = PersistenceConfig::default();

    let mut engine = BeanEngine::with_embedded_data(Some(11));
    let mut bean = engine.create_bean("Pip", Personality::Kind);
    let mut sink = RecordingSink::default();
    for action in ["eat", "play", "work"] {
        engine.perform_action(&mut bean, action, &mut sink).expect("action");
    }

    {
        let store = SaveStore::open(&path, &config).expect("open");
        store.save("default", &bean).expect("save");
    }

    let store = SaveStore::open(&path, &config).expect("reopen");
    let mut restored: Bean = store.load("default").expect("load").expect("Some");
    assert_eq!(restored, bean);

    engine.perform_action(&mut restored, "rest", &mut sink).expect("rest");
    assert_eq!(restored.actions_count(), 4);
    assert_eq!(restored.last_action(), "rest");
}
