//! Personality variants and their overlays on the special-condition pass.
//!
//! After the base detector has run, the Bean's overlay applies a fixed trait
//! delta and then walks its own list of flavor checks. Unlike the base table,
//! every flavor check is evaluated; one matching does not stop the next.
//! Overlays never raise [`crate::BeanEvent`]s, they only talk and nudge
//! stats. Energy changes here clamp silently.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bean::Bean;
use crate::emotion::Emotion;
use crate::error::BeanError;
use crate::event::Narrator;
use crate::machine::{Effect, is_every_nth_action};

/// Which personality a Bean was born with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Personality {
    /// Gentle and quick to recover.
    Kind,
    /// Slow, and mostly wants to lie down.
    Lazy,
    /// Short-tempered.
    Snappy,
}

impl Personality {
    /// Every variant.
    pub const ALL: [Personality; 3] = [Self::Kind, Self::Lazy, Self::Snappy];

    /// Action data source for this personality.
    #[must_use]
    pub fn source_id(self) -> &'static str {
        match self {
            Self::Kind => "kind.csv",
            Self::Lazy => "lazy.csv",
            Self::Snappy => "snappy.csv",
        }
    }

    /// Display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Kind => "Kind Bean",
            Self::Lazy => "Lazy Bean",
            Self::Snappy => "Snappy Bean",
        }
    }

    /// The overlay run after the base detector.
    #[must_use]
    pub fn overlay(self) -> &'static dyn PersonalityOverlay {
        match self {
            Self::Kind => &KindOverlay,
            Self::Lazy => &LazyOverlay,
            Self::Snappy => &SnappyOverlay,
        }
    }
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Personality {
    type Err = BeanError;

    /// Accepts `kind`, `lazy` or `snappy` in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|p| format!("{p:?}").eq_ignore_ascii_case(name))
            .ok_or_else(|| BeanError::UnknownPersonality(name.to_string()))
    }
}

/// One flavor rule of an overlay.
#[derive(Debug, Clone, Copy)]
pub struct FlavorCheck {
    /// Condition over the current state.
    pub holds: fn(&Bean) -> bool,
    /// Line spoken when the check matches. `{name}` is the Bean's name.
    pub line: Option<&'static str>,
    /// Stat changes, applied silently in order.
    pub effects: &'static [Effect],
}

/// Behavior layered on top of the base detector.
pub trait PersonalityOverlay: Send + Sync {
    /// Deltas applied unconditionally after every base pass.
    fn trait_effects(&self) -> &'static [Effect];

    /// Ordered flavor checks.
    fn flavor_checks(&self) -> &'static [FlavorCheck];

    /// Trait effects, then every flavor check, then clamp.
    fn apply_overlay(&self, bean: &mut Bean, sink: &mut dyn Narrator) {
        for effect in self.trait_effects() {
            effect.apply_silently(bean);
        }
        for check in self.flavor_checks() {
            if !(check.holds)(bean) {
                continue;
            }
            if let Some(line) = check.line {
                sink.on_message(&line.replace("{name}", bean.name()));
            }
            for effect in check.effects {
                effect.apply_silently(bean);
            }
        }
        debug!(bean = %bean.name(), personality = ?bean.personality(), "Overlay applied");
        bean.clamp_stats();
    }
}

// ---------------------------------------------------------------------------
// Shared predicates
// ---------------------------------------------------------------------------

fn low_mood(bean: &Bean) -> bool {
    bean.emotions().average_truncated() <= 25
}

fn extreme_sadness(bean: &Bean) -> bool {
    bean.emotion(Emotion::Happy) <= 10 || bean.emotion(Emotion::Sad) >= 90
}

fn weak_and_unhealed(bean: &Bean) -> bool {
    bean.energy() < 25 && !bean.recently_healed()
}

fn low_trust(bean: &Bean) -> bool {
    bean.emotion(Emotion::Trust) <= 10
}

fn full_trust(bean: &Bean) -> bool {
    bean.emotion(Emotion::Trust) >= 100
}

fn every_tenth(bean: &Bean) -> bool {
    is_every_nth_action(bean, 10)
}

fn every_fifth(bean: &Bean) -> bool {
    is_every_nth_action(bean, 5)
}

// ---------------------------------------------------------------------------
// Kind
// ---------------------------------------------------------------------------

/// Overlay for [`Personality::Kind`].
#[derive(Debug, Clone, Copy, Default)]
pub struct KindOverlay;

const KIND_TRAIT: &[Effect] = &[
    Effect::Emotion(Emotion::Stress, -2),
    Effect::Emotion(Emotion::Happy, 2),
];

const KIND_CHECKS: &[FlavorCheck] = &[
    FlavorCheck {
        holds: low_mood,
        line: Some("{name}: It's hard... but I'll try again!"),
        effects: &[
            Effect::Emotion(Emotion::Motivation, 5),
            Effect::Emotion(Emotion::Happy, 3),
        ],
    },
    FlavorCheck {
        holds: extreme_sadness,
        line: Some("{name}: I feel a little better, thanks to everyone."),
        effects: &[
            Effect::Emotion(Emotion::Sad, -10),
            Effect::Emotion(Emotion::Happy, 10),
            Effect::Emotion(Emotion::Trust, 5),
        ],
    },
    FlavorCheck {
        holds: weak_and_unhealed,
        line: Some("{name}: I'm fine! I'll be better in no time!"),
        effects: &[
            Effect::Emotion(Emotion::Motivation, 5),
            Effect::Emotion(Emotion::Stress, -5),
            Effect::Energy(3),
        ],
    },
    FlavorCheck {
        holds: low_trust,
        line: Some("{name}: What did I do wrong...? I want to earn your trust back."),
        effects: &[
            Effect::Emotion(Emotion::Trust, 10),
            Effect::Emotion(Emotion::Happy, 5),
        ],
    },
    FlavorCheck {
        holds: full_trust,
        line: Some("{name}: I'm so happy! Everyone is precious to me!"),
        effects: &[
            Effect::Emotion(Emotion::Happy, 10),
            Effect::Emotion(Emotion::Motivation, 5),
        ],
    },
    FlavorCheck {
        holds: every_tenth,
        line: Some("{name}: I feel like I've grown a little!"),
        effects: &[
            Effect::Energy(5),
            Effect::Emotion(Emotion::Motivation, 5),
            Effect::Emotion(Emotion::Happy, 5),
        ],
    },
    FlavorCheck {
        holds: every_fifth,
        line: None,
        effects: &[Effect::Emotion(Emotion::Stress, -3)],
    },
];

impl PersonalityOverlay for KindOverlay {
    fn trait_effects(&self) -> &'static [Effect] {
        KIND_TRAIT
    }

    fn flavor_checks(&self) -> &'static [FlavorCheck] {
        KIND_CHECKS
    }
}

// ---------------------------------------------------------------------------
// Lazy
// ---------------------------------------------------------------------------

/// Overlay for [`Personality::Lazy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LazyOverlay;

const LAZY_TRAIT: &[Effect] = &[
    Effect::Emotion(Emotion::Motivation, -2),
    Effect::Emotion(Emotion::Stress, 1),
];

const LAZY_CHECKS: &[FlavorCheck] = &[
    FlavorCheck {
        holds: low_mood,
        line: Some("{name}: Too much bother... I don't want to do anything."),
        effects: &[Effect::Emotion(Emotion::Motivation, -5), Effect::Energy(-5)],
    },
    FlavorCheck {
        holds: extreme_sadness,
        line: Some("{name}: No strength left in me... so gloomy..."),
        effects: &[
            Effect::Emotion(Emotion::Sad, 5),
            Effect::Emotion(Emotion::Happy, -5),
        ],
    },
    FlavorCheck {
        holds: weak_and_unhealed,
        line: Some("{name} is so sick that even breathing feels like a chore..."),
        effects: &[Effect::Emotion(Emotion::Stress, 10), Effect::Energy(-5)],
    },
    FlavorCheck {
        holds: low_trust,
        line: Some("{name}: Whatever. I'm just going to lie down."),
        effects: &[],
    },
    FlavorCheck {
        holds: full_trust,
        line: Some("{name}: I feel loved... but moving is too much effort."),
        effects: &[Effect::Emotion(Emotion::Happy, 3)],
    },
    FlavorCheck {
        holds: every_tenth,
        line: Some("{name}: I do things at my own pace..."),
        effects: &[Effect::Energy(2), Effect::Emotion(Emotion::Motivation, 2)],
    },
];

impl PersonalityOverlay for LazyOverlay {
    fn trait_effects(&self) -> &'static [Effect] {
        LAZY_TRAIT
    }

    fn flavor_checks(&self) -> &'static [FlavorCheck] {
        LAZY_CHECKS
    }
}

// ---------------------------------------------------------------------------
// Snappy
// ---------------------------------------------------------------------------

/// Overlay for [`Personality::Snappy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SnappyOverlay;

fn grudging_trust(bean: &Bean) -> bool {
    bean.emotion(Emotion::Trust) >= 90
}

fn boiling_over(bean: &Bean) -> bool {
    bean.emotion(Emotion::Anger) >= 90
}

fn calm(bean: &Bean) -> bool {
    bean.emotion(Emotion::Stress) <= 15
}

const SNAPPY_TRAIT: &[Effect] = &[
    Effect::Emotion(Emotion::Stress, 2),
    Effect::Emotion(Emotion::Anger, 1),
];

const SNAPPY_CHECKS: &[FlavorCheck] = &[
    FlavorCheck {
        holds: low_mood,
        line: Some("{name}: ...Ugh, everything's a hassle. Don't touch me."),
        effects: &[
            Effect::Emotion(Emotion::Motivation, -5),
            Effect::Emotion(Emotion::Stress, 5),
            Effect::Emotion(Emotion::Anger, 10),
            Effect::Energy(-5),
        ],
    },
    FlavorCheck {
        holds: extreme_sadness,
        line: Some("{name}: ...Can you just leave me alone?"),
        effects: &[
            Effect::Emotion(Emotion::Anger, 15),
            Effect::Emotion(Emotion::Stress, 10),
            Effect::Emotion(Emotion::Trust, -10),
        ],
    },
    FlavorCheck {
        holds: weak_and_unhealed,
        line: Some("{name}: Ugh... my body's annoying and my mood is a mess!"),
        effects: &[
            Effect::Emotion(Emotion::Stress, 10),
            Effect::Emotion(Emotion::Happy, -5),
            Effect::Emotion(Emotion::Motivation, -5),
            Effect::Energy(-5),
        ],
    },
    FlavorCheck {
        holds: low_trust,
        line: Some("{name}: Don't expect too much from me. Not before I really lose it."),
        effects: &[
            Effect::Emotion(Emotion::Trust, -5),
            Effect::Emotion(Emotion::Stress, 10),
            Effect::Emotion(Emotion::Anger, 10),
        ],
    },
    FlavorCheck {
        holds: grudging_trust,
        line: Some("{name}: ...Hmph. I don't hate you. Not that I'm grateful or anything."),
        effects: &[
            Effect::Emotion(Emotion::Happy, 5),
            Effect::Emotion(Emotion::Motivation, 3),
            Effect::Emotion(Emotion::Anger, -5),
        ],
    },
    FlavorCheck {
        holds: boiling_over,
        line: Some("{name} exploded! The air around turns menacing..."),
        effects: &[
            Effect::Emotion(Emotion::Stress, 10),
            Effect::Emotion(Emotion::Happy, -15),
            Effect::Energy(-10),
        ],
    },
    FlavorCheck {
        holds: calm,
        line: Some("{name}: ...Well, I'm doing alright for now."),
        effects: &[
            Effect::Emotion(Emotion::Motivation, 5),
            Effect::Emotion(Emotion::Happy, 3),
        ],
    },
    FlavorCheck {
        holds: every_tenth,
        line: Some("{name}: ...Hah, I've calmed down a bit."),
        effects: &[
            Effect::Emotion(Emotion::Stress, -10),
            Effect::Emotion(Emotion::Anger, -10),
            Effect::Emotion(Emotion::Happy, 5),
        ],
    },
    FlavorCheck {
        holds: every_fifth,
        line: None,
        effects: &[Effect::Emotion(Emotion::Anger, -3)],
    },
];

impl PersonalityOverlay for SnappyOverlay {
    fn trait_effects(&self) -> &'static [Effect] {
        SNAPPY_TRAIT
    }

    fn flavor_checks(&self) -> &'static [FlavorCheck] {
        SNAPPY_CHECKS
    }
}
