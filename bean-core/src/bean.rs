//! The Bean itself — identity, energy, emotions and turn bookkeeping.
//!
//! Fields are private. Outside the crate a Bean is read through getters or a
//! [`BeanSnapshot`]; only the state machine and personality overlays mutate it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::emotion::{Emotion, EmotionState, MAX_LEVEL, clamp_level};
use crate::event::BeanEvent;
use crate::personality::Personality;

/// Unique identifier for a Bean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BeanId(pub Uuid);

impl BeanId {
    /// Generate a new random Bean ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BeanId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BeanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A virtual pet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bean {
    id: BeanId,
    name: String,
    personality: Personality,
    energy: i32,
    emotions: EmotionState,
    actions_count: u32,
    #[serde(default)]
    last_action: String,
    #[serde(default)]
    recently_healed: bool,
}

impl Bean {
    /// Fresh Bean: full energy, every emotion at 50, no history.
    pub fn new(name: impl Into<String>, personality: Personality) -> Self {
        Self {
            id: BeanId::new(),
            name: name.into(),
            personality,
            energy: MAX_LEVEL,
            emotions: EmotionState::new(),
            actions_count: 0,
            last_action: String::new(),
            recently_healed: false,
        }
    }

    /// Replace the starting energy (clamped).
    #[must_use]
    pub fn with_energy(mut self, energy: i32) -> Self {
        self.energy = clamp_level(energy);
        self
    }

    /// Replace one starting emotion level (clamped).
    #[must_use]
    pub fn with_emotion(mut self, emotion: Emotion, level: i32) -> Self {
        let current = self.emotions.get(emotion);
        self.emotions.adjust(emotion, level.saturating_sub(current));
        self
    }

    /// Replace the action counter.
    #[must_use]
    pub fn with_actions_count(mut self, count: u32) -> Self {
        self.actions_count = count;
        self
    }

    /// Replace the last applied action key.
    #[must_use]
    pub fn with_last_action(mut self, action: impl Into<String>) -> Self {
        self.last_action = action.into();
        self
    }

    /// Replace the recently-healed flag.
    #[must_use]
    pub fn with_recently_healed(mut self, healed: bool) -> Self {
        self.recently_healed = healed;
        self
    }

    /// Persistence key.
    #[must_use]
    pub fn id(&self) -> BeanId {
        self.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fixed personality.
    #[must_use]
    pub fn personality(&self) -> Personality {
        self.personality
    }

    /// Current energy in `[0, 100]`.
    #[must_use]
    pub fn energy(&self) -> i32 {
        self.energy
    }

    /// Current emotion levels.
    #[must_use]
    pub fn emotions(&self) -> &EmotionState {
        &self.emotions
    }

    /// Shorthand for `emotions().get(emotion)`.
    #[must_use]
    pub fn emotion(&self, emotion: Emotion) -> i32 {
        self.emotions.get(emotion)
    }

    /// Number of applied actions.
    #[must_use]
    pub fn actions_count(&self) -> u32 {
        self.actions_count
    }

    /// Key of the most recently applied action, empty before the first one.
    #[must_use]
    pub fn last_action(&self) -> &str {
        &self.last_action
    }

    /// Whether the last applied action was a heal.
    #[must_use]
    pub fn recently_healed(&self) -> bool {
        self.recently_healed
    }

    /// Whether energy is zero, so that only healing is accepted.
    #[must_use]
    pub fn is_incapacitated(&self) -> bool {
        self.energy == 0
    }

    /// Copy of the observable state.
    #[must_use]
    pub fn snapshot(&self) -> BeanSnapshot {
        BeanSnapshot {
            name: self.name.clone(),
            personality: self.personality,
            energy: self.energy,
            emotions: self.emotions.snapshot(),
            actions_count: self.actions_count,
            last_action: self.last_action.clone(),
            recently_healed: self.recently_healed,
        }
    }

    // -- crate-internal mutation --------------------------------------------

    pub(crate) fn adjust_emotion(&mut self, emotion: Emotion, delta: i32) -> i32 {
        self.emotions.adjust(emotion, delta)
    }

    /// Clamped energy change. Going below zero clamps to zero and returns
    /// the depletion event for the caller to report.
    #[must_use]
    pub(crate) fn change_energy(&mut self, delta: i32) -> Option<BeanEvent> {
        let attempted = self.energy.saturating_add(delta);
        self.energy = clamp_level(attempted);
        (attempted < 0).then_some(BeanEvent::EnergyDepleted { attempted })
    }

    /// Clamped energy change without any notification.
    pub(crate) fn nudge_energy(&mut self, delta: i32) {
        self.energy = clamp_level(self.energy.saturating_add(delta));
    }

    pub(crate) fn record_action(&mut self, action: &str) {
        self.actions_count = self.actions_count.saturating_add(1);
        action.clone_into(&mut self.last_action);
    }

    pub(crate) fn set_recently_healed(&mut self, healed: bool) {
        self.recently_healed = healed;
    }

    pub(crate) fn clamp_stats(&mut self) {
        self.energy = clamp_level(self.energy);
        self.emotions.clamp_all();
    }
}

/// Read-only copy of a Bean's observable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeanSnapshot {
    /// Display name.
    pub name: String,
    /// Personality.
    pub personality: Personality,
    /// Energy in `[0, 100]`.
    pub energy: i32,
    /// All eight emotion levels.
    pub emotions: BTreeMap<Emotion, i32>,
    /// Number of applied actions.
    pub actions_count: u32,
    /// Most recently applied action key.
    pub last_action: String,
    /// Whether the last applied action was a heal.
    pub recently_healed: bool,
}
