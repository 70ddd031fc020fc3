//! The farmer: a name and the Bean they look after.

use bean_core::error::Result;
use bean_core::{ActionSource, Bean, BeanEngine, Narrator, Turn};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::command::Command;

/// A player and their Bean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farmer {
    name: String,
    bean: Bean,
}

impl Farmer {
    /// New farmer looking after `bean`.
    pub fn new(name: impl Into<String>, bean: Bean) -> Self {
        Self {
            name: name.into(),
            bean,
        }
    }

    /// Farmer's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The Bean.
    #[must_use]
    pub fn bean(&self) -> &Bean {
        &self.bean
    }

    pub(crate) fn bean_mut(&mut self) -> &mut Bean {
        &mut self.bean
    }

    /// Issue one command through the engine.
    ///
    /// # Errors
    /// Propagates the engine's data errors; the Bean is unchanged on error.
    pub fn issue<S: ActionSource>(
        &mut self,
        command: Command,
        engine: &mut BeanEngine<S>,
        sink: &mut dyn Narrator,
    ) -> Result<Turn> {
        info!(farmer = %self.name, bean = %self.bean.name(), command = %command, "Command issued");
        engine.perform_action(&mut self.bean, command.action_key(), sink)
    }

    /// Feed the Bean.
    ///
    /// # Errors
    /// See [`Farmer::issue`].
    pub fn feed<S: ActionSource>(&mut self, engine: &mut BeanEngine<S>, sink: &mut dyn Narrator) -> Result<Turn> {
        self.issue(Command::Feed, engine, sink)
    }

    /// Let the Bean rest.
    ///
    /// # Errors
    /// See [`Farmer::issue`].
    pub fn rest<S: ActionSource>(&mut self, engine: &mut BeanEngine<S>, sink: &mut dyn Narrator) -> Result<Turn> {
        self.issue(Command::Rest, engine, sink)
    }

    /// Play with the Bean.
    ///
    /// # Errors
    /// See [`Farmer::issue`].
    pub fn play<S: ActionSource>(&mut self, engine: &mut BeanEngine<S>, sink: &mut dyn Narrator) -> Result<Turn> {
        self.issue(Command::Play, engine, sink)
    }

    /// Treat the Bean.
    ///
    /// # Errors
    /// See [`Farmer::issue`].
    pub fn heal<S: ActionSource>(&mut self, engine: &mut BeanEngine<S>, sink: &mut dyn Narrator) -> Result<Turn> {
        self.issue(Command::Heal, engine, sink)
    }

    /// Take the Bean outside.
    ///
    /// # Errors
    /// See [`Farmer::issue`].
    pub fn go_out<S: ActionSource>(&mut self, engine: &mut BeanEngine<S>, sink: &mut dyn Narrator) -> Result<Turn> {
        self.issue(Command::GoOut, engine, sink)
    }

    /// Put the Bean to work.
    ///
    /// # Errors
    /// See [`Farmer::issue`].
    pub fn work<S: ActionSource>(&mut self, engine: &mut BeanEngine<S>, sink: &mut dyn Narrator) -> Result<Turn> {
        self.issue(Command::Work, engine, sink)
    }
}
