//! Emotion delta specs — the `HAPPY:+3~+5|SAD:-2` mini-language.
//!
//! ```text
//! SPEC  := TOKEN ("|" TOKEN)*
//! TOKEN := EMOTIONNAME ":" RANGE
//! RANGE := ["+"|"-"] INT ["~" ["+"|"-"] INT]
//! ```
//!
//! Each token rolls independently: a uniform integer in `[lo, hi]`, or
//! exactly `lo` when no `~hi` is given. Malformed tokens are skipped with a
//! warning and never fail the whole spec.

use std::collections::BTreeMap;

use rand::Rng;
use thiserror::Error;
use tracing::warn;

use crate::emotion::{Emotion, UnknownEmotion};

/// Rolled per-emotion deltas. Only affected emotions are present.
pub type EmotionDeltas = BTreeMap<Emotion, i32>;

/// Inclusive integer range a delta is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeltaRange {
    /// Lower bound.
    pub lo: i32,
    /// Upper bound (`>= lo`).
    pub hi: i32,
}

impl DeltaRange {
    /// Build a range, swapping reversed bounds.
    #[must_use]
    pub fn new(a: i32, b: i32) -> Self {
        Self {
            lo: a.min(b),
            hi: a.max(b),
        }
    }

    /// Draw one value from the range.
    pub fn roll<R: Rng + ?Sized>(self, rng: &mut R) -> i32 {
        if self.lo == self.hi {
            self.lo
        } else {
            rng.gen_range(self.lo..=self.hi)
        }
    }
}

/// One parsed `EMOTION:RANGE` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeltaToken {
    /// Target emotion.
    pub emotion: Emotion,
    /// Range to draw from.
    pub range: DeltaRange,
}

/// Why a single token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeltaTokenError {
    /// No `:` between emotion name and range.
    #[error("missing ':' separator")]
    MissingSeparator,
    /// The emotion name is not one of the eight axes.
    #[error(transparent)]
    UnknownEmotion(#[from] UnknownEmotion),
    /// The range part is not an integer or `lo~hi` pair.
    #[error("invalid range {0:?}")]
    InvalidRange(String),
}

/// Parse one `EMOTION:RANGE` token.
///
/// # Errors
/// Returns a [`DeltaTokenError`] describing the first problem found.
pub fn parse_token(token: &str) -> Result<DeltaToken, DeltaTokenError> {
    let (name, range) = token
        .split_once(':')
        .ok_or(DeltaTokenError::MissingSeparator)?;
    let emotion: Emotion = name.parse()?;
    let range = parse_range(range)?;
    Ok(DeltaToken { emotion, range })
}

fn parse_range(text: &str) -> Result<DeltaRange, DeltaTokenError> {
    let cleaned = text.replace('+', "");
    let invalid = || DeltaTokenError::InvalidRange(text.trim().to_string());
    let mut bounds = cleaned.split('~');

    let lo: i32 = bounds
        .next()
        .and_then(|b| b.trim().parse().ok())
        .ok_or_else(invalid)?;
    let hi: i32 = match bounds.next() {
        Some(b) => b.trim().parse().map_err(|_| invalid())?,
        None => lo,
    };
    if bounds.next().is_some() {
        return Err(invalid());
    }
    Ok(DeltaRange::new(lo, hi))
}

/// A parsed delta spec, ready to be rolled any number of times.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeltaSpec {
    tokens: Vec<DeltaToken>,
}

impl DeltaSpec {
    /// Parse a full spec. Blank specs are empty; bad tokens are logged and dropped.
    #[must_use]
    pub fn parse(spec: &str) -> Self {
        let tokens = spec
            .split('|')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .filter_map(|t| match parse_token(t) {
                Ok(token) => Some(token),
                Err(err) => {
                    warn!(token = %t, error = %err, "Skipping malformed delta token");
                    None
                }
            })
            .collect();
        Self { tokens }
    }

    /// Parsed tokens in spec order.
    #[must_use]
    pub fn tokens(&self) -> &[DeltaToken] {
        &self.tokens
    }

    /// Whether the spec affects no emotion at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Draw a concrete value for every token. A later token for the same
    /// emotion overrides an earlier one.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> EmotionDeltas {
        self.tokens
            .iter()
            .map(|t| (t.emotion, t.range.roll(rng)))
            .collect()
    }
}

/// Parse and roll a spec in one step.
pub fn roll_spec<R: Rng + ?Sized>(spec: &str, rng: &mut R) -> EmotionDeltas {
    DeltaSpec::parse(spec).roll(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn parses_fixed_and_ranged_tokens() {
        let t = parse_token("HAPPY:+3~+5").expect("token");
        assert_eq!(t.emotion, Emotion::Happy);
        assert_eq!(t.range, DeltaRange { lo: 3, hi: 5 });

        let t = parse_token("SAD:-2").expect("token");
        assert_eq!(t.range, DeltaRange { lo: -2, hi: -2 });

        let t = parse_token(" FEAR : -4 ~ +1 ").expect("token");
        assert_eq!(t.emotion, Emotion::Fear);
        assert_eq!(t.range, DeltaRange { lo: -4, hi: 1 });
    }

    #[test]
    fn reversed_bounds_are_swapped() {
        let t = parse_token("STRESS:-1~-6").expect("token");
        assert_eq!(t.range, DeltaRange { lo: -6, hi: -1 });
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert_eq!(parse_token("HAPPY"), Err(DeltaTokenError::MissingSeparator));
        assert!(matches!(
            parse_token("JOY:+2"),
            Err(DeltaTokenError::UnknownEmotion(_))
        ));
        assert!(matches!(
            parse_token("HAPPY:lots"),
            Err(DeltaTokenError::InvalidRange(_))
        ));
        assert!(matches!(
            parse_token("HAPPY:1~2~3"),
            Err(DeltaTokenError::InvalidRange(_))
        ));
    }

    #[test]
    fn spec_skips_bad_tokens_and_keeps_good_ones() {
        let spec = DeltaSpec::parse("HAPPY:+3|JOY:+9|SAD:-2||TRUST:oops");
        let emotions: Vec<Emotion> = spec.tokens().iter().map(|t| t.emotion).collect();
        assert_eq!(emotions, vec![Emotion::Happy, Emotion::Sad]);
    }

    #[test]
    fn blank_spec_rolls_nothing() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(DeltaSpec::parse("   ").is_empty());
        assert!(roll_spec("", &mut rng).is_empty());
    }

    #[test]
    fn rolled_values_stay_in_range_for_many_seeds() {
        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let deltas = roll_spec("HAPPY:+3~+5|SAD:-2", &mut rng);
            let happy = deltas[&Emotion::Happy];
            assert!((3..=5).contains(&happy), "seed {seed}: happy {happy}");
            assert_eq!(deltas[&Emotion::Sad], -2);
            assert_eq!(deltas.len(), 2);
        }
    }

    #[test]
    fn later_token_overrides_earlier() {
        let mut rng = StdRng::seed_from_u64(3);
        let deltas = roll_spec("HUNGER:-5|HUNGER:+2", &mut rng);
        assert_eq!(deltas[&Emotion::Hunger], 2);
    }
}
