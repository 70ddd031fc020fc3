//! # Bean Core
//!
//! Turn-based state machine for a single virtual pet — a *Bean*.
//!
//! A Bean carries an energy level and eight clamped emotion axes. Every
//! player action goes through three stages:
//!
//! - **Resolution** — an [`ActionCatalog`] picks one data-driven
//!   [`ActionDefinition`] for the action key and rolls it into an
//!   [`ActionOutcome`] (success draw, rendered message, emotion deltas).
//! - **Application** — the [`machine`] gates incapacitated Beans, applies the
//!   outcome and books the heal/energy/counter state.
//! - **Detection** — the base special-condition table fires at most one
//!   [`BeanEvent`], then the Bean's [`Personality`] overlay layers its own
//!   trait effects and flavor checks on top.
//!
//! Every stat stays within `[0, 100]` once a public operation returns.
//!
//! ```
//! use bean_core::{BeanEngine, Personality, RecordingSink};
//!
//! let mut engine = BeanEngine::with_embedded_data(Some(7));
//! let mut bean = engine.create_bean("Pip", Personality::Kind);
//! let mut sink = RecordingSink::default();
//!
//! engine.perform_action(&mut bean, "eat", &mut sink)?;
//! assert_eq!(bean.snapshot().actions_count, 1);
//! # Ok::<(), bean_core::BeanError>(())
//! ```

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bean;
pub mod catalog;
pub mod config;
pub mod delta;
pub mod emotion;
pub mod engine;
pub mod error;
pub mod event;
pub mod machine;
pub mod outcome;
pub mod persistence;
pub mod personality;
pub mod source;

pub use bean::{Bean, BeanId, BeanSnapshot};
pub use catalog::ActionCatalog;
pub use config::BeanConfig;
pub use emotion::{Emotion, EmotionState};
pub use engine::BeanEngine;
pub use error::BeanError;
pub use event::{BeanEvent, EventSink, MessageSink, Narrator, RecordingSink, TracingSink};
pub use machine::{Effect, Turn};
pub use outcome::ActionOutcome;
pub use personality::Personality;
pub use source::{ActionDefinition, ActionSource};
