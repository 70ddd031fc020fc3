//! Emotion axes and the clamped [`EmotionState`] container.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lowest value any stat can take.
pub const MIN_LEVEL: i32 = 0;
/// Highest value any stat can take.
pub const MAX_LEVEL: i32 = 100;
/// Starting level for every emotion.
pub const DEFAULT_LEVEL: i32 = 50;

/// Clamp a raw stat value into `[MIN_LEVEL, MAX_LEVEL]`.
#[must_use]
pub fn clamp_level(value: i32) -> i32 {
    value.clamp(MIN_LEVEL, MAX_LEVEL)
}

/// One of the eight fixed mood axes of a Bean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Emotion {
    /// Joy and contentment.
    Happy,
    /// Sorrow.
    Sad,
    /// Irritation and rage.
    Anger,
    /// How hungry the Bean is.
    Hunger,
    /// Tension.
    Stress,
    /// Trust toward the farmer.
    Trust,
    /// Will to act.
    Motivation,
    /// Fright.
    Fear,
}

impl Emotion {
    /// Number of emotion axes.
    pub const COUNT: usize = 8;

    /// All axes in declaration order.
    pub const ALL: [Emotion; Self::COUNT] = [
        Self::Happy,
        Self::Sad,
        Self::Anger,
        Self::Hunger,
        Self::Stress,
        Self::Trust,
        Self::Motivation,
        Self::Fear,
    ];

    /// The upper-case name used in action data (`HAPPY`, `TRUST`, ...).
    #[must_use]
    pub fn data_name(self) -> &'static str {
        match self {
            Self::Happy => "HAPPY",
            Self::Sad => "SAD",
            Self::Anger => "ANGER",
            Self::Hunger => "HUNGER",
            Self::Stress => "STRESS",
            Self::Trust => "TRUST",
            Self::Motivation => "MOTIVATION",
            Self::Fear => "FEAR",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Happy => "Happy",
            Self::Sad => "Sad",
            Self::Anger => "Anger",
            Self::Hunger => "Hunger",
            Self::Stress => "Stress",
            Self::Trust => "Trust",
            Self::Motivation => "Motivation",
            Self::Fear => "Fear",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string does not name an emotion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown emotion name: {0:?}")]
pub struct UnknownEmotion(pub String);

impl FromStr for Emotion {
    type Err = UnknownEmotion;

    /// Parses the data name exactly (`"HAPPY"`), ignoring surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|e| e.data_name() == name)
            .ok_or_else(|| UnknownEmotion(name.to_string()))
    }
}

/// Levels for every [`Emotion`], each kept within `[0, 100]`.
///
/// All eight keys are always present. Serialized as a map keyed by data
/// name; missing keys deserialize to the default level and out-of-range
/// values are clamped on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Emotion, i32>", into = "BTreeMap<Emotion, i32>")]
pub struct EmotionState {
    levels: [i32; Emotion::COUNT],
}

impl EmotionState {
    /// Every emotion at [`DEFAULT_LEVEL`].
    #[must_use]
    pub fn new() -> Self {
        Self::uniform(DEFAULT_LEVEL)
    }

    /// Every emotion at `level` (clamped).
    #[must_use]
    pub fn uniform(level: i32) -> Self {
        Self {
            levels: [clamp_level(level); Emotion::COUNT],
        }
    }

    /// Current level of one emotion.
    #[must_use]
    pub fn get(&self, emotion: Emotion) -> i32 {
        self.levels[emotion.index()]
    }

    /// Shift one emotion by `delta`, clamping to `[0, 100]`. Returns the new level.
    pub fn adjust(&mut self, emotion: Emotion, delta: i32) -> i32 {
        let slot = &mut self.levels[emotion.index()];
        *slot = clamp_level(slot.saturating_add(delta));
        *slot
    }

    /// Copy of all eight levels.
    #[must_use]
    pub fn snapshot(&self) -> BTreeMap<Emotion, i32> {
        self.iter().collect()
    }

    /// Iterate `(emotion, level)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Emotion, i32)> + '_ {
        Emotion::ALL.into_iter().map(|e| (e, self.get(e)))
    }

    /// Arithmetic mean of the eight levels.
    #[must_use]
    pub fn average(&self) -> f64 {
        f64::from(self.total()) / Emotion::COUNT as f64
    }

    /// Integer mean of the eight levels, truncated.
    #[must_use]
    pub fn average_truncated(&self) -> i32 {
        // Eight values of at most 100 each; the cast cannot truncate.
        #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
        let count = Emotion::COUNT as i32;
        self.total() / count
    }

    /// Pull every level back into range.
    pub fn clamp_all(&mut self) {
        for level in &mut self.levels {
            *level = clamp_level(*level);
        }
    }

    fn total(&self) -> i32 {
        self.levels.iter().sum()
    }
}

impl Default for EmotionState {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BTreeMap<Emotion, i32>> for EmotionState {
    fn from(map: BTreeMap<Emotion, i32>) -> Self {
        let mut state = Self::new();
        for (emotion, level) in map {
            state.levels[emotion.index()] = clamp_level(level);
        }
        state
    }
}

impl From<EmotionState> for BTreeMap<Emotion, i32> {
    fn from(state: EmotionState) -> Self {
        state.snapshot()
    }
}
