//! Action catalog — cached action tables and outcome resolution.
//!
//! Resolution pipeline for one `(source_id, action)` pair:
//!
//! 1. Load the source's rows, or reuse the cached copy
//! 2. Keep the rows whose action key matches exactly
//! 3. Pick one of them uniformly at random
//! 4. Render `{name}` into the three templates
//! 5. Draw success against the row's success rate
//! 6. Roll the matching delta spec into concrete per-emotion deltas

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::delta::DeltaSpec;
use crate::error::{BeanError, Result};
use crate::outcome::ActionOutcome;
use crate::source::{ActionDefinition, ActionSource};

/// Placeholder substituted with the Bean's name in every template.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Loads action tables through an [`ActionSource`] and caches them per id.
///
/// Each table is fetched at most once for the lifetime of the catalog and is
/// read-only afterwards. A table that fails to load is not cached.
pub struct ActionCatalog<S> {
    source: S,
    cache: RwLock<HashMap<String, Arc<[ActionDefinition]>>>,
}

impl<S: std::fmt::Debug> std::fmt::Debug for ActionCatalog<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionCatalog")
            .field("source", &self.source)
            .field("cached", &self.cache.read().keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<S: ActionSource> ActionCatalog<S> {
    /// Create a catalog with an empty cache.
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// The underlying source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Whether the table for `source_id` has already been loaded.
    pub fn is_cached(&self, source_id: &str) -> bool {
        self.cache.read().contains_key(source_id)
    }

    /// All rows of a source, loading them on first access.
    ///
    /// # Errors
    /// Returns [`BeanError::SourceLoad`] if the source cannot be loaded.
    pub fn definitions(&self, source_id: &str) -> Result<Arc<[ActionDefinition]>> {
        if let Some(rows) = self.cache.read().get(source_id) {
            return Ok(Arc::clone(rows));
        }

        let mut cache = self.cache.write();
        if let Some(rows) = cache.get(source_id) {
            return Ok(Arc::clone(rows));
        }
        let rows: Arc<[ActionDefinition]> = self.source.load(source_id)?.into();
        info!(source = %source_id, rows = rows.len(), "Action table loaded");
        cache.insert(source_id.to_string(), Arc::clone(&rows));
        Ok(rows)
    }

    /// Resolve `action` from `source_id` into a concrete outcome for `subject`.
    ///
    /// # Errors
    /// Returns [`BeanError::SourceLoad`] if the table cannot be loaded, or
    /// [`BeanError::ActionNotFound`] if no row carries the action key.
    pub fn resolve<R: Rng + ?Sized>(
        &self,
        source_id: &str,
        action: &str,
        subject: &str,
        rng: &mut R,
    ) -> Result<ActionOutcome> {
        let rows = self.definitions(source_id)?;
        let matches: Vec<&ActionDefinition> =
            rows.iter().filter(|row| row.action == action).collect();

        let Some(pick) = matches.choose(rng) else {
            return Err(BeanError::ActionNotFound {
                source_id: source_id.to_string(),
                action: action.to_string(),
            });
        };

        let outcome = build_outcome(pick, subject, rng);
        debug!(
            source = %source_id,
            action = %action,
            variants = matches.len(),
            success = outcome.is_success(),
            "Action resolved"
        );
        Ok(outcome)
    }
}

/// Render and roll one definition into an outcome.
pub fn build_outcome<R: Rng + ?Sized>(
    definition: &ActionDefinition,
    subject: &str,
    rng: &mut R,
) -> ActionOutcome {
    let description = render_template(&definition.action_message, subject);
    let on_success = render_template(&definition.success_message, subject);
    let on_failure = render_template(&definition.failure_message, subject);

    let success = rng.gen_range(0.0..1.0) < definition.success_rate;
    let (message, spec) = if success {
        (on_success, &definition.success_changes)
    } else {
        (on_failure, &definition.failure_changes)
    };
    let deltas = DeltaSpec::parse(spec).roll(rng);

    ActionOutcome::new(subject, description, message, deltas, success)
}

/// Replace every `{name}` in `template`.
#[must_use]
pub fn render_template(template: &str, name: &str) -> String {
    template.replace(NAME_PLACEHOLDER, name)
}
