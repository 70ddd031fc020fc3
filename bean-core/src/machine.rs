//! The turn state machine — gate, apply, detect.
//!
//! ```text
//!   outcome ──► gate ──► book turn ──► deltas ──► heal ──► narrate ──► detect
//!                │                                                     │
//!                └─► Incapacitated (no change)         base table, then overlay
//! ```
//!
//! The base detector is an ordered table. The first matching row applies its
//! effects, raises its event and ends the pass; all stats are clamped
//! afterwards whether or not anything matched.

use tracing::{debug, warn};

use crate::bean::Bean;
use crate::delta::EmotionDeltas;
use crate::emotion::Emotion;
use crate::event::{BeanEvent, EventSink, Narrator};
use crate::outcome::ActionOutcome;

/// Action key that bypasses the incapacitation gate.
pub const HEAL_ACTION: &str = "heal";
/// Energy restored by a successful heal.
pub const HEAL_ON_SUCCESS: i32 = 50;
/// Energy restored by a failed heal.
pub const HEAL_ON_FAILURE: i32 = 30;

/// Result of applying one outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    /// The outcome was applied.
    Applied {
        /// Success flag of the applied outcome.
        success: bool,
        /// Base event raised by the detector, if any.
        event: Option<BeanEvent>,
    },
    /// Energy was zero and the action was not a heal; nothing changed.
    Incapacitated,
}

impl Turn {
    /// Whether the outcome was applied.
    #[must_use]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    /// Base event raised during the turn.
    #[must_use]
    pub fn event(self) -> Option<BeanEvent> {
        match self {
            Self::Applied { event, .. } => event,
            Self::Incapacitated => None,
        }
    }
}

/// One stat change used by the detector tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Shift an emotion.
    Emotion(Emotion, i32),
    /// Shift energy.
    Energy(i32),
}

impl Effect {
    /// Apply, returning the depletion event if energy would go below zero.
    #[must_use]
    pub(crate) fn apply(self, bean: &mut Bean) -> Option<BeanEvent> {
        match self {
            Self::Emotion(emotion, delta) => {
                bean.adjust_emotion(emotion, delta);
                None
            }
            Self::Energy(delta) => bean.change_energy(delta),
        }
    }

    /// Apply with silent clamping.
    pub(crate) fn apply_silently(self, bean: &mut Bean) {
        match self {
            Self::Emotion(emotion, delta) => {
                bean.adjust_emotion(emotion, delta);
            }
            Self::Energy(delta) => bean.nudge_energy(delta),
        }
    }
}

// ---------------------------------------------------------------------------
// Base special-condition table
// ---------------------------------------------------------------------------

struct Condition {
    event: BeanEvent,
    holds: fn(&Bean) -> bool,
    effects: &'static [Effect],
}

fn trust_collapsed(bean: &Bean) -> bool {
    bean.emotion(Emotion::Trust) <= 10
}

fn despairing(bean: &Bean) -> bool {
    bean.emotion(Emotion::Happy) <= 0 || bean.emotion(Emotion::Sad) >= 100
}

fn terrified(bean: &Bean) -> bool {
    bean.emotion(Emotion::Fear) >= 100
}

fn furious(bean: &Bean) -> bool {
    bean.emotion(Emotion::Anger) >= 90
}

fn restless_after_rest(bean: &Bean) -> bool {
    bean.last_action().eq_ignore_ascii_case("rest") && bean.emotion(Emotion::Stress) >= 80
}

fn trust_full(bean: &Bean) -> bool {
    bean.emotion(Emotion::Trust) >= 100
}

fn mood_drained(bean: &Bean) -> bool {
    bean.emotions().average() <= 20.0
}

fn growth_due(bean: &Bean) -> bool {
    is_every_nth_action(bean, 10)
}

fn unhealed_and_weak(bean: &Bean) -> bool {
    bean.energy() < 20 && !bean.recently_healed()
}

/// True when the action count is a positive multiple of `n`.
pub(crate) fn is_every_nth_action(bean: &Bean, n: u32) -> bool {
    bean.actions_count() > 0 && bean.actions_count() % n == 0
}

const BASE_CONDITIONS: [Condition; 9] = [
    Condition {
        event: BeanEvent::RanAway,
        holds: trust_collapsed,
        effects: &[Effect::Emotion(Emotion::Happy, -10), Effect::Energy(-15)],
    },
    Condition {
        event: BeanEvent::Depressed,
        holds: despairing,
        effects: &[Effect::Emotion(Emotion::Motivation, -10)],
    },
    Condition {
        event: BeanEvent::Nauseous,
        holds: terrified,
        effects: &[Effect::Emotion(Emotion::Hunger, -15)],
    },
    Condition {
        event: BeanEvent::Angry,
        holds: furious,
        effects: &[Effect::Energy(-10)],
    },
    Condition {
        event: BeanEvent::Insomnia,
        holds: restless_after_rest,
        effects: &[Effect::Emotion(Emotion::Stress, 5)],
    },
    Condition {
        event: BeanEvent::Loveful,
        holds: trust_full,
        effects: &[Effect::Emotion(Emotion::Happy, 10)],
    },
    Condition {
        event: BeanEvent::Exhausted,
        holds: mood_drained,
        effects: &[Effect::Emotion(Emotion::Motivation, -5)],
    },
    Condition {
        event: BeanEvent::Growth,
        holds: growth_due,
        effects: &[Effect::Energy(5), Effect::Emotion(Emotion::Motivation, 5)],
    },
    Condition {
        event: BeanEvent::Sick,
        holds: unhealed_and_weak,
        effects: &[Effect::Emotion(Emotion::Stress, 10)],
    },
];

/// Run the base detector: at most one event, then clamp everything.
///
/// An energy effect that runs the Bean dry stops the row: the remaining
/// effects are skipped and `EnergyDepleted` replaces the row's own event.
pub fn detect_base_event<S: EventSink + ?Sized>(bean: &mut Bean, sink: &mut S) -> Option<BeanEvent> {
    let mut fired = None;
    if let Some(condition) = BASE_CONDITIONS.iter().find(|c| (c.holds)(&*bean)) {
        let event = condition
            .effects
            .iter()
            .find_map(|effect| effect.apply(bean))
            .unwrap_or(condition.event);
        debug!(bean = %bean.name(), event = %event, "Special condition fired");
        sink.on_event(event, &event.describe(bean.name()));
        fired = Some(event);
    }
    bean.clamp_stats();
    fired
}

/// Base detector followed by the Bean's personality overlay.
pub fn check_special_conditions(bean: &mut Bean, sink: &mut dyn Narrator) -> Option<BeanEvent> {
    let event = detect_base_event(bean, sink);
    bean.personality().overlay().apply_overlay(bean, sink);
    event
}

/// Apply rolled deltas through the clamped adjust, outside of any turn.
pub fn apply_deltas(bean: &mut Bean, deltas: &EmotionDeltas) {
    for (emotion, delta) in deltas {
        bean.adjust_emotion(*emotion, *delta);
    }
}

/// Apply one resolved outcome to the Bean.
///
/// `action_key` is the key the outcome was resolved for; it drives the gate,
/// heal handling and `last_action`.
pub fn apply_outcome(
    bean: &mut Bean,
    outcome: &ActionOutcome,
    action_key: &str,
    sink: &mut dyn Narrator,
) -> Turn {
    let is_heal = action_key.eq_ignore_ascii_case(HEAL_ACTION);
    if bean.is_incapacitated() && !is_heal {
        warn!(bean = %bean.name(), action = %action_key, "Bean is incapacitated; action ignored");
        return Turn::Incapacitated;
    }

    bean.record_action(action_key);
    apply_deltas(bean, outcome.deltas());

    if is_heal {
        let recovery = if outcome.is_success() {
            HEAL_ON_SUCCESS
        } else {
            HEAL_ON_FAILURE
        };
        match bean.change_energy(recovery) {
            Some(depleted) => sink.on_event(depleted, &depleted.describe(bean.name())),
            None => sink.on_message(&format!("{} recovered {recovery} energy!", bean.name())),
        }
        bean.set_recently_healed(true);
    } else {
        bean.set_recently_healed(false);
    }

    sink.on_message(&outcome.render());

    let event = check_special_conditions(bean, sink);
    Turn::Applied {
        success: outcome.is_success(),
        event,
    }
}
