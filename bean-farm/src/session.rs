//! A running game: one farmer, one Bean, and the day/turn clock.

use bean_core::config::SessionConfig;
use bean_core::error::Result;
use bean_core::machine;
use bean_core::{ActionSource, BeanEngine, Narrator, Turn};
use tracing::{debug, info};

use crate::command::Command;
use crate::farmer::Farmer;
use crate::save::SaveGame;
use crate::status::StatusReport;

/// What one call to [`FarmSession::act`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnReport {
    /// The engine's verdict on the command.
    pub turn: Turn,
    /// Whether this turn closed the day.
    pub day_ended: bool,
}

/// Game clock plus the farmer it belongs to.
#[derive(Debug, Clone)]
pub struct FarmSession {
    farmer: Farmer,
    day: u32,
    turn_count: u32,
    config: SessionConfig,
}

impl FarmSession {
    /// Start a fresh game on day 1.
    pub fn new(farmer: Farmer, config: SessionConfig) -> Self {
        Self {
            farmer,
            day: 1,
            turn_count: 0,
            config,
        }
    }

    /// Pick up a saved game.
    pub fn resume(save: SaveGame, config: SessionConfig) -> Self {
        info!(farmer = %save.farmer_name, day = save.day, turns = save.turn_count, "Resuming game");
        Self {
            farmer: Farmer::new(save.farmer_name, save.bean),
            day: save.day.max(1),
            turn_count: save.turn_count,
            config,
        }
    }

    /// The farmer and their Bean.
    #[must_use]
    pub fn farmer(&self) -> &Farmer {
        &self.farmer
    }

    /// Current day, starting at 1.
    #[must_use]
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Turns taken since the game started.
    #[must_use]
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Turns in a day; never zero.
    #[must_use]
    pub fn turns_per_day(&self) -> u32 {
        self.config.turns_per_day.max(1)
    }

    /// 1-based turn within the current day.
    #[must_use]
    pub fn turn_of_day(&self) -> u32 {
        self.turn_count % self.turns_per_day() + 1
    }

    /// Spend one turn on `command`. A failed lookup costs no turn.
    ///
    /// # Errors
    /// Propagates the engine's data errors.
    pub fn act<S: ActionSource>(
        &mut self,
        engine: &mut BeanEngine<S>,
        command: Command,
        sink: &mut dyn Narrator,
    ) -> Result<TurnReport> {
        let turn = self.farmer.issue(command, engine, sink)?;
        self.turn_count += 1;
        let day_ended = self.turn_count % self.turns_per_day() == 0;
        if day_ended {
            self.end_day(sink);
        }
        debug!(day = self.day, turn = self.turn_count, ?turn, day_ended, "Turn taken");
        Ok(TurnReport { turn, day_ended })
    }

    /// Close the day: the Bean sleeps and wakes up a little hungrier.
    pub fn end_day(&mut self, sink: &mut dyn Narrator) {
        let name = self.farmer.bean().name().to_string();
        sink.on_message(&format!("Day {} is over. {name} falls asleep...", self.day));
        machine::apply_deltas(self.farmer.bean_mut(), &self.config.end_of_day);
        self.day += 1;
        sink.on_message(&format!("Day {} begins. {name} wakes up.", self.day));
        info!(day = self.day, bean = %name, "New day");
    }

    /// Snapshot for the save file.
    #[must_use]
    pub fn to_save(&self) -> SaveGame {
        SaveGame {
            farmer_name: self.farmer.name().to_string(),
            bean: self.farmer.bean().clone(),
            day: self.day,
            turn_count: self.turn_count,
        }
    }

    /// Status screen for the current state.
    #[must_use]
    pub fn status(&self) -> StatusReport {
        StatusReport {
            farmer_name: self.farmer.name().to_string(),
            bean: self.farmer.bean().snapshot(),
            day: self.day,
            turn_of_day: self.turn_of_day(),
            turns_per_day: self.turns_per_day(),
        }
    }
}
