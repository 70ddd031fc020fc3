//! Bean Benchmark Suite
//!
//! Turn-level costs:
//!   catalog_resolve_cached ....... one roll from a warm catalog
//!   full_turn_kind ............... resolve + apply + both detection passes
//!   base_detection_pass .......... base condition table on an average Bean
//!   farm_day_five_turns .......... a whole day through the farm session

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};

use bean_core::config::SessionConfig;
use bean_core::machine;
use bean_core::{Bean, BeanEngine, Emotion, Personality, RecordingSink};
use bean_farm::{Command, FarmSession, Farmer};

const ACTIONS: [&str; 5] = ["eat", "rest", "play", "goOut", "work"];

fn bench_catalog_resolve(c: &mut Criterion) {
    let mut engine = BeanEngine::with_embedded_data(Some(11));
    let bean = engine.create_bean("Bench", Personality::Kind);
    engine.resolve(&bean, "eat").expect("warm cache");

    c.bench_function("catalog_resolve_cached", |b| {
        b.iter(|| {
            let outcome = engine.resolve(black_box(&bean), black_box("eat")).expect("resolve");
            black_box(outcome);
        });
    });
}

fn bench_full_turn(c: &mut Criterion) {
    let mut engine = BeanEngine::with_embedded_data(Some(12));
    let template = engine.create_bean("Bench", Personality::Kind);
    let mut i = 0usize;

    c.bench_function("full_turn_kind", |b| {
        b.iter_batched(
            || (template.clone(), RecordingSink::default()),
            |(mut bean, mut sink)| {
                i = (i + 1) % ACTIONS.len();
                let turn = engine
                    .perform_action(&mut bean, ACTIONS[i], &mut sink)
                    .expect("turn");
                black_box((turn, bean));
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_base_detection(c: &mut Criterion) {
    let template = Bean::new("Bench", Personality::Snappy)
        .with_emotion(Emotion::Hunger, 70)
        .with_emotion(Emotion::Stress, 60)
        .with_actions_count(7);

    c.bench_function("base_detection_pass", |b| {
        b.iter_batched(
            || (template.clone(), RecordingSink::default()),
            |(mut bean, mut sink)| {
                let event = machine::detect_base_event(&mut bean, &mut sink);
                black_box((event, bean));
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_farm_day(c: &mut Criterion) {
    let mut engine = BeanEngine::with_embedded_data(Some(13));
    let bean = engine.create_bean("Bench", Personality::Lazy);
    let template = FarmSession::new(Farmer::new("Bench", bean), SessionConfig::default());

    c.bench_function("farm_day_five_turns", |b| {
        b.iter_batched(
            || (template.clone(), RecordingSink::default()),
            |(mut session, mut sink)| {
                for command in [Command::Feed, Command::Play, Command::Work, Command::Rest, Command::GoOut] {
                    session.act(&mut engine, command, &mut sink).expect("act");
                }
                black_box(session.day());
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_catalog_resolve,
    bench_full_turn,
    bench_base_detection,
    bench_farm_day,
);
criterion_main!(benches);
