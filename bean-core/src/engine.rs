//! [`BeanEngine`] — the entry point that ties catalog, RNG and state machine together.

use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::bean::Bean;
use crate::catalog::ActionCatalog;
use crate::config::{BeanConfig, DataSourceKind};
use crate::error::Result;
use crate::event::Narrator;
use crate::machine::{self, Turn};
use crate::outcome::ActionOutcome;
use crate::personality::Personality;
use crate::source::{ActionSource, CsvDirectorySource, EmbeddedSource};

/// Resolves and applies actions for any number of Beans.
///
/// The engine owns the catalog (and with it the table cache) and the only
/// random number generator in the system. Seed it for reproducible runs.
#[derive(Debug)]
pub struct BeanEngine<S> {
    catalog: ActionCatalog<S>,
    rng: StdRng,
}

impl<S: ActionSource> BeanEngine<S> {
    /// Engine over `source`. `None` seeds from OS entropy.
    pub fn new(source: S, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            catalog: ActionCatalog::new(source),
            rng,
        }
    }

    /// Create a fresh Bean.
    pub fn create_bean(&self, name: impl Into<String>, personality: Personality) -> Bean {
        let bean = Bean::new(name, personality);
        info!(bean = %bean.name(), id = %bean.id(), personality = ?personality, "Bean created");
        bean
    }

    /// Resolve `action_key` for the Bean without touching it.
    ///
    /// # Errors
    /// Propagates the catalog's data errors.
    pub fn resolve(&mut self, bean: &Bean, action_key: &str) -> Result<ActionOutcome> {
        self.catalog.resolve(
            bean.personality().source_id(),
            action_key,
            bean.name(),
            &mut self.rng,
        )
    }

    /// Resolve and apply one action.
    ///
    /// Resolution happens first; if it fails, the Bean is left exactly as it
    /// was. An incapacitated Bean still consumes a resolution but returns
    /// [`Turn::Incapacitated`] without changing.
    ///
    /// # Errors
    /// Returns [`crate::BeanError::SourceLoad`] or
    /// [`crate::BeanError::ActionNotFound`].
    pub fn perform_action(
        &mut self,
        bean: &mut Bean,
        action_key: &str,
        sink: &mut dyn Narrator,
    ) -> Result<Turn> {
        let outcome = self.resolve(bean, action_key)?;
        let turn = machine::apply_outcome(bean, &outcome, action_key, sink);
        debug!(
            bean = %bean.name(),
            action = %action_key,
            turn = ?turn,
            energy = bean.energy(),
            "Action performed"
        );
        Ok(turn)
    }

    /// The catalog, for inspection.
    pub fn catalog(&self) -> &ActionCatalog<S> {
        &self.catalog
    }
}

impl BeanEngine<EmbeddedSource> {
    /// Engine over the bundled tables.
    #[must_use]
    pub fn with_embedded_data(seed: Option<u64>) -> Self {
        Self::new(EmbeddedSource, seed)
    }
}

impl BeanEngine<Box<dyn ActionSource>> {
    /// Engine whose source and seed come from configuration.
    ///
    /// A relative data directory is resolved against `base_dir`.
    #[must_use]
    pub fn from_config(config: &BeanConfig, base_dir: &Path) -> Self {
        let source: Box<dyn ActionSource> = match config.data.source {
            DataSourceKind::Embedded => Box::new(EmbeddedSource),
            DataSourceKind::Directory => {
                Box::new(CsvDirectorySource::new(base_dir.join(&config.data.directory)))
            }
        };
        Self::new(source, config.engine.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BeanError;
    use crate::event::RecordingSink;
    use crate::source::InMemorySource;

    const TABLE: &str = "\
action,action_message,success_message,failure_message,success_rate,success_changes,failure_changes
eat,{name} eats.,{name} is full.,{name} refuses.,1.0,HUNGER:-10,
heal,{name} takes medicine.,{name} feels better.,{name} gags.,1.0,,
";

    fn engine() -> BeanEngine<InMemorySource> {
        BeanEngine::new(InMemorySource::new().with_table("kind.csv", TABLE), Some(1))
    }

    #[test]
    fn perform_action_applies_resolved_outcome() {
        let mut engine = engine();
        let mut bean = engine.create_bean("Pip", Personality::Kind);
        let mut sink = RecordingSink::default();

        let turn = engine.perform_action(&mut bean, "eat", &mut sink).expect("eat");
        assert_eq!(turn, Turn::Applied { success: true, event: None });
        assert_eq!(bean.actions_count(), 1);
        assert_eq!(bean.emotion(crate::Emotion::Hunger), 40);
        assert!(sink.messages[0].contains("Pip eats."));
    }

    #[test]
    fn data_error_leaves_bean_untouched() {
        let mut engine = engine();
        let mut bean = engine.create_bean("Pip", Personality::Kind);
        let before = bean.clone();
        let mut sink = RecordingSink::default();

        let err = engine
            .perform_action(&mut bean, "dance", &mut sink)
            .expect_err("unknown action");
        assert!(matches!(err, BeanError::ActionNotFound { .. }));
        assert_eq!(bean, before);
        assert!(sink.messages.is_empty());

        // Lazy Beans read lazy.csv, which this source does not have.
        let mut lazy = engine.create_bean("Lo", Personality::Lazy);
        let err = engine
            .perform_action(&mut lazy, "eat", &mut sink)
            .expect_err("missing table");
        assert!(matches!(err, BeanError::SourceLoad { .. }));
    }

    #[test]
    fn same_seed_same_story() {
        let run = || {
            let mut engine = BeanEngine::with_embedded_data(Some(42));
            let mut bean = engine.create_bean("Pip", Personality::Snappy);
            let mut sink = RecordingSink::default();
            for action in ["eat", "play", "work", "goOut", "rest", "heal"] {
                engine.perform_action(&mut bean, action, &mut sink).expect("action");
            }
            bean.snapshot()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn from_config_reads_directory_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::create_dir(dir.path().join("tables")).expect("mkdir");
        std::fs::write(dir.path().join("tables/kind.csv"), TABLE).expect("write");

        let config = BeanConfig::from_toml(
            "[engine]\nseed = 3\n[data]\nsource = \"directory\"\ndirectory = \"tables\"\n",
        )
        .expect("config");
        let mut engine = BeanEngine::from_config(&config, dir.path());
        let mut bean = engine.create_bean("Pip", Personality::Kind);
        let mut sink = RecordingSink::default();
        assert!(engine.perform_action(&mut bean, "heal", &mut sink).is_ok());
        assert!(engine.catalog().is_cached("kind.csv"));
    }
}
