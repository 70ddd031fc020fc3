//! Tabular action data — rows, the [`ActionSource`] seam, and the bundled sources.
//!
//! Every source speaks the same seven-column CSV layout, with a header row:
//!
//! ```text
//! action,action_message,success_message,failure_message,success_rate,success_changes,failure_changes
//! eat,{name} nibbles a leaf.,{name} loved it!,{name} spat it out.,0.8,HAPPY:+3~+5|HUNGER:-15,SAD:+2
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{BeanError, Result};

/// Number of columns every action row must carry.
pub const COLUMN_COUNT: usize = 7;

/// One row of action data.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionDefinition {
    /// Action key (`eat`, `rest`, `play`, `heal`, `goOut`, `work`).
    pub action: String,
    /// Description template; `{name}` is replaced with the Bean's name.
    pub action_message: String,
    /// Message template shown on success.
    pub success_message: String,
    /// Message template shown on failure.
    pub failure_message: String,
    /// Probability of success in `[0, 1]`.
    pub success_rate: f64,
    /// Delta spec applied on success.
    pub success_changes: String,
    /// Delta spec applied on failure.
    pub failure_changes: String,
}

/// Supplies raw action rows for a source id.
///
/// The catalog calls [`ActionSource::load`] at most once per id and caches
/// the result.
pub trait ActionSource {
    /// Load every row of the source named `source_id`.
    ///
    /// # Errors
    /// Returns [`BeanError::SourceLoad`] if the source is missing, unreadable
    /// or contains a malformed row.
    fn load(&self, source_id: &str) -> Result<Vec<ActionDefinition>>;
}

impl<S: ActionSource + ?Sized> ActionSource for Box<S> {
    fn load(&self, source_id: &str) -> Result<Vec<ActionDefinition>> {
        (**self).load(source_id)
    }
}

/// Parse CSV action data, skipping the header row and blank lines.
///
/// # Errors
/// Returns [`BeanError::SourceLoad`] on I/O or CSV syntax errors, rows with
/// fewer than [`COLUMN_COUNT`] columns, or an unparsable success rate.
pub fn parse_csv<R: Read>(source_id: &str, reader: R) -> Result<Vec<ActionDefinition>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| BeanError::source_load(source_id, e))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        let row = index + 1;
        if record.len() < COLUMN_COUNT {
            return Err(BeanError::source_load(
                source_id,
                format!(
                    "row {row}: expected {COLUMN_COUNT} columns, found {}",
                    record.len()
                ),
            ));
        }

        let rate_text = &record[4];
        let success_rate: f64 = rate_text.parse().map_err(|_| {
            BeanError::source_load(source_id, format!("row {row}: invalid success rate {rate_text:?}"))
        })?;
        if !(0.0..=1.0).contains(&success_rate) {
            return Err(BeanError::source_load(
                source_id,
                format!("row {row}: success rate {success_rate} outside [0, 1]"),
            ));
        }

        rows.push(ActionDefinition {
            action: record[0].to_string(),
            action_message: record[1].to_string(),
            success_message: record[2].to_string(),
            failure_message: record[3].to_string(),
            success_rate,
            success_changes: record[5].to_string(),
            failure_changes: record[6].to_string(),
        });
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Directory of CSV files
// ---------------------------------------------------------------------------

/// Reads `<root>/<source_id>` from disk.
#[derive(Debug, Clone)]
pub struct CsvDirectorySource {
    root: PathBuf,
}

impl CsvDirectorySource {
    /// Source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory the files are read from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ActionSource for CsvDirectorySource {
    fn load(&self, source_id: &str) -> Result<Vec<ActionDefinition>> {
        let path = self.root.join(source_id);
        let file = File::open(&path).map_err(|e| BeanError::source_load(source_id, e))?;
        parse_csv(source_id, file)
    }
}

// ---------------------------------------------------------------------------
// Bundled data
// ---------------------------------------------------------------------------

const KIND_CSV: &str = include_str!("../data/kind.csv");
const LAZY_CSV: &str = include_str!("../data/lazy.csv");
const SNAPPY_CSV: &str = include_str!("../data/snappy.csv");

/// The three personality tables compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl EmbeddedSource {
    /// Ids served by this source.
    pub const IDS: [&'static str; 3] = ["kind.csv", "lazy.csv", "snappy.csv"];

    fn text(source_id: &str) -> Option<&'static str> {
        match source_id {
            "kind.csv" => Some(KIND_CSV),
            "lazy.csv" => Some(LAZY_CSV),
            "snappy.csv" => Some(SNAPPY_CSV),
            _ => None,
        }
    }
}

impl ActionSource for EmbeddedSource {
    fn load(&self, source_id: &str) -> Result<Vec<ActionDefinition>> {
        let text = Self::text(source_id).ok_or_else(|| {
            BeanError::source_load(source_id, format!("no embedded table named {source_id:?}"))
        })?;
        parse_csv(source_id, text.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// In-memory tables
// ---------------------------------------------------------------------------

/// CSV text keyed by source id, held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    tables: HashMap<String, String>,
}

impl InMemorySource {
    /// Empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a table.
    #[must_use]
    pub fn with_table(mut self, source_id: impl Into<String>, csv_text: impl Into<String>) -> Self {
        self.tables.insert(source_id.into(), csv_text.into());
        self
    }
}

impl ActionSource for InMemorySource {
    fn load(&self, source_id: &str) -> Result<Vec<ActionDefinition>> {
        let text = self.tables.get(source_id).ok_or_else(|| {
            BeanError::source_load(source_id, format!("no table named {source_id:?}"))
        })?;
        parse_csv(source_id, text.as_bytes())
    }
}
