// Explorer table construction and lookup

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use super::record::ExplorerRecord;
use crate::error::{Result, ServerError};

/// How request surnames are compared against table keys
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Byte-for-byte comparison
    #[default]
    Exact,
    /// Trimmed, lowercased comparison
    CaseInsensitive,
}

impl MatchMode {
    fn normalize(self, surname: &str) -> String {
        match self {
            Self::Exact => surname.to_string(),
            Self::CaseInsensitive => surname.trim().to_lowercase(),
        }
    }
}

/// One `[[explorer]]` entry of a dataset file
#[derive(Debug, Deserialize)]
struct DatasetEntry {
    name: String,
    surname: String,
    #[serde(default)]
    dates: String,
    #[serde(default)]
    aliases: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct DatasetFile {
    #[serde(rename = "explorer", default)]
    explorers: Vec<DatasetEntry>,
}

/// Read-only surname → explorer mapping
#[derive(Debug, Clone)]
pub struct ExplorerTable {
    records: Vec<ExplorerRecord>,
    index: HashMap<String, usize>,
    mode: MatchMode,
}

impl ExplorerTable {
    /// The famous Italian explorers served when no dataset file is configured
    pub fn builtin(mode: MatchMode) -> Self {
        let entries = [
            (ExplorerRecord::new("Marco", "Polo", "1254 - 1324"), vec![]),
            (ExplorerRecord::new("Cristoforo", "Colombo", "1451 - 1506"), vec![]),
            (ExplorerRecord::new("Amerigo", "Vespucci", "1454 - 1512"), vec![]),
            (
                ExplorerRecord::new("Giovanni", "da Verrazzano", "1485 - 1528"),
                vec!["Verrazzano".to_string()],
            ),
        ];
        // Static entries have unique, non-empty keys
        Self::from_entries(entries, mode).unwrap_or_else(|_| Self::empty(mode))
    }

    fn empty(mode: MatchMode) -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
            mode,
        }
    }

    /// Build a table from records without aliases
    pub fn from_records(
        records: impl IntoIterator<Item = ExplorerRecord>,
        mode: MatchMode,
    ) -> Result<Self> {
        Self::from_entries(records.into_iter().map(|r| (r, Vec::new())), mode)
    }

    /// Build a table from records and their alias surnames.
    ///
    /// Fails on an empty surname or when two keys collide after
    /// normalization.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (ExplorerRecord, Vec<String>)>,
        mode: MatchMode,
    ) -> Result<Self> {
        let mut table = Self::empty(mode);

        for (record, aliases) in entries {
            let slot = table.records.len();
            let keys = std::iter::once(record.surname.clone()).chain(aliases);
            for key in keys {
                table.insert_key(&key, slot)?;
            }
            table.records.push(record);
        }

        Ok(table)
    }

    fn insert_key(&mut self, surname: &str, slot: usize) -> Result<()> {
        let key = self.mode.normalize(surname);
        if key.trim().is_empty() {
            return Err(ServerError::InvalidDataset {
                message: "explorer surname must not be empty".to_string(),
            });
        }
        if self.index.insert(key, slot).is_some() {
            return Err(ServerError::InvalidDataset {
                message: format!("duplicate explorer surname '{surname}'"),
            });
        }
        Ok(())
    }

    /// Parse a TOML dataset of `[[explorer]]` tables
    pub fn from_toml_str(content: &str, origin: &str, mode: MatchMode) -> Result<Self> {
        let file: DatasetFile = toml::from_str(content).map_err(|source| ServerError::DatasetParse {
            path: origin.to_string(),
            source,
        })?;

        Self::from_entries(
            file.explorers.into_iter().map(|entry| {
                (
                    ExplorerRecord::new(entry.name, entry.surname, entry.dates),
                    entry.aliases,
                )
            }),
            mode,
        )
    }

    /// Load a dataset file from disk
    pub fn load(path: impl AsRef<Path>, mode: MatchMode) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content, &path.display().to_string(), mode)
    }

    pub fn lookup(&self, surname: &str) -> Option<&ExplorerRecord> {
        self.index
            .get(&self.mode.normalize(surname))
            .and_then(|&slot| self.records.get(slot))
    }

    /// Lookup that never misses: unknown surnames yield the fallback record
    pub fn resolve(&self, surname: &str) -> ExplorerRecord {
        self.lookup(surname)
            .cloned()
            .unwrap_or_else(|| ExplorerRecord::fallback(surname))
    }

    pub const fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
