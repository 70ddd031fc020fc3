//! Narrative events and the sinks that receive them.
//!
//! Events are state transitions worth telling the player about, not
//! failures. The state machine hands every event and every rendered message
//! to a [`Narrator`], which is any type implementing both [`EventSink`] and
//! [`MessageSink`].

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A notable transition raised by the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BeanEvent {
    /// Trust collapsed and the Bean left.
    RanAway,
    /// Happiness bottomed out or sadness maxed out.
    Depressed,
    /// Fear maxed out.
    Nauseous,
    /// Anger reached 90.
    Angry,
    /// Too stressed to sleep after resting.
    Insomnia,
    /// Trust maxed out.
    Loveful,
    /// Average mood fell to 20 or below.
    Exhausted,
    /// Every tenth action.
    Growth,
    /// Energy is low and the Bean has not been healed.
    Sick,
    /// An energy change would have gone below zero.
    EnergyDepleted {
        /// The unclamped value the change would have produced.
        attempted: i32,
    },
}

impl BeanEvent {
    /// Short name, stable across releases.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::RanAway => "ran_away",
            Self::Depressed => "depressed",
            Self::Nauseous => "nauseous",
            Self::Angry => "angry",
            Self::Insomnia => "insomnia",
            Self::Loveful => "loveful",
            Self::Exhausted => "exhausted",
            Self::Growth => "growth",
            Self::Sick => "sick",
            Self::EnergyDepleted { .. } => "energy_depleted",
        }
    }

    /// Player-facing sentence for a Bean called `bean_name`.
    #[must_use]
    pub fn describe(self, bean_name: &str) -> String {
        match self {
            Self::RanAway => format!("{bean_name} lost all trust and ran away from home..."),
            Self::Depressed => format!("{bean_name} is so depressed... a change of mood is needed."),
            Self::Nauseous => format!("{bean_name} feels nauseous from fear..."),
            Self::Angry => format!("{bean_name} is absolutely furious!"),
            Self::Insomnia => format!("{bean_name} couldn't sleep from stress."),
            Self::Loveful => format!("{bean_name} is full of love!"),
            Self::Exhausted => format!("{bean_name} is completely drained."),
            Self::Growth => format!("{bean_name} grew a little taller!"),
            Self::Sick => format!("{bean_name}'s health is getting worse."),
            Self::EnergyDepleted { attempted } => {
                format!("{bean_name}'s energy has run out ({attempted}).")
            }
        }
    }
}

impl fmt::Display for BeanEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Receives narrative events.
pub trait EventSink {
    /// Called once per event, with its rendered message.
    fn on_event(&mut self, event: BeanEvent, message: &str);
}

/// Receives plain text: rendered outcomes, heal notices, personality lines.
pub trait MessageSink {
    /// Called once per message.
    fn on_message(&mut self, text: &str);
}

/// Both sinks at once. Blanket-implemented for every type that is both.
pub trait Narrator: EventSink + MessageSink {}

impl<T: EventSink + MessageSink + ?Sized> Narrator for T {}

/// Keeps everything it receives, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingSink {
    /// Events with their messages.
    pub events: Vec<(BeanEvent, String)>,
    /// Plain messages.
    pub messages: Vec<String>,
}

impl RecordingSink {
    /// Just the events, without their messages.
    #[must_use]
    pub fn event_kinds(&self) -> Vec<BeanEvent> {
        self.events.iter().map(|(e, _)| *e).collect()
    }

    /// Whether `event` was received at least once.
    #[must_use]
    pub fn saw(&self, event: BeanEvent) -> bool {
        self.events.iter().any(|(e, _)| *e == event)
    }

    /// Drop everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
        self.messages.clear();
    }
}

impl EventSink for RecordingSink {
    fn on_event(&mut self, event: BeanEvent, message: &str) {
        self.events.push((event, message.to_string()));
    }
}

impl MessageSink for RecordingSink {
    fn on_message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }
}

/// Forwards events (`warn!`) and messages (`info!`) to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn on_event(&mut self, event: BeanEvent, message: &str) {
        warn!(event = %event, "{message}");
    }
}

impl MessageSink for TracingSink {
    fn on_message(&mut self, text: &str) {
        info!("{text}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn narrate(n: &mut dyn Narrator) {
        n.on_message("hello");
        n.on_event(BeanEvent::Growth, &BeanEvent::Growth.describe("Pip"));
    }

    #[test]
    fn recording_sink_keeps_order() {
        let mut sink = RecordingSink::default();
        narrate(&mut sink);
        assert_eq!(sink.messages, vec!["hello".to_string()]);
        assert_eq!(sink.event_kinds(), vec![BeanEvent::Growth]);
        assert_eq!(sink.events[0].1, "Pip grew a little taller!");
        assert!(sink.saw(BeanEvent::Growth));
        assert!(!sink.saw(BeanEvent::Sick));

        sink.clear();
        assert!(sink.events.is_empty() && sink.messages.is_empty());
    }

    #[test]
    fn depleted_message_carries_attempted_value() {
        let text = BeanEvent::EnergyDepleted { attempted: -7 }.describe("Pip");
        assert!(text.contains("(-7)"));
        assert_eq!(BeanEvent::EnergyDepleted { attempted: -7 }.to_string(), "energy_depleted");
    }

    #[test]
    fn tracing_sink_accepts_everything() {
        narrate(&mut TracingSink);
    }
}
