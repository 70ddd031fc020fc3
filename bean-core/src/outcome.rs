//! The concrete, already-rolled result of one action.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::delta::EmotionDeltas;

/// Immutable result of resolving one action definition for one Bean.
///
/// Produced fresh by [`crate::ActionCatalog::resolve`] and discarded once
/// the state machine has applied it.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    subject: String,
    description: String,
    message: String,
    deltas: EmotionDeltas,
    success: bool,
    created_at: DateTime<Utc>,
}

impl ActionOutcome {
    /// Assemble an outcome stamped with the current wall-clock time.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        description: impl Into<String>,
        message: impl Into<String>,
        deltas: EmotionDeltas,
        success: bool,
    ) -> Self {
        Self {
            subject: subject.into(),
            description: description.into(),
            message: message.into(),
            deltas,
            success,
            created_at: Utc::now(),
        }
    }

    /// Name of the Bean the outcome was rendered for.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Rendered action description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Rendered success or failure message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Emotion deltas to apply.
    #[must_use]
    pub fn deltas(&self) -> &EmotionDeltas {
        &self.deltas
    }

    /// Whether the success draw came up.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// When the outcome was produced. Informational only.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Non-zero deltas as `Happy +3, Sad -2`.
    #[must_use]
    pub fn delta_summary(&self) -> String {
        self.deltas
            .iter()
            .filter(|(_, d)| **d != 0)
            .map(|(e, d)| format!("{e} {d:+}"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Multi-line text handed to the message sink.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "[{}]", self.created_at.format("%Y-%m-%d %H:%M"));
        let _ = writeln!(out, "{}", self.description);
        out.push_str(&self.message);
        let summary = self.delta_summary();
        if !summary.is_empty() {
            out.push('\n');
            out.push_str(&summary);
        }
        out
    }
}
