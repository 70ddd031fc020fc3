//! # bean-farm — Console Farm Game for Bean Core
//!
//! Wraps a [`bean_core::Bean`] in a small game: a farmer issues one of six
//! commands per turn, days end after a configurable number of turns, and the
//! whole game can be saved to and resumed from a SQLite slot.
//!
//! ## Modules
//!
//! - `command` — player commands and menu parsing
//! - `farmer` — the player and their Bean
//! - `session` — day/turn clock and end-of-day upkeep
//! - `save` — save-game shape and slot helpers
//! - `status` — status screen

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod command;
pub mod farmer;
pub mod save;
pub mod session;
pub mod status;

pub use command::{Command, MenuChoice, UnknownChoice, menu_text};
pub use farmer::Farmer;
pub use save::{DEFAULT_SLOT, SaveGame};
pub use session::{FarmSession, TurnReport};
pub use status::StatusReport;
