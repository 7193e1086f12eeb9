// Application state module
// Read-only state shared by every connection

use std::sync::Arc;

use super::types::Config;
use crate::error::Result;
use crate::explorers::ExplorerTable;

/// Application state
pub struct AppState {
    pub config: Config,
    pub explorers: Arc<ExplorerTable>,
}

impl AppState {
    pub fn new(config: Config, explorers: ExplorerTable) -> Self {
        Self {
            config,
            explorers: Arc::new(explorers),
        }
    }

    /// Build state from configuration, loading the dataset file if one is set
    pub fn from_config(config: Config) -> Result<Self> {
        let mode = config.dataset.match_mode;
        let explorers = match config.dataset.path.as_deref() {
            Some(path) => ExplorerTable::load(path, mode)?,
            None => ExplorerTable::builtin(mode),
        };
        Ok(Self::new(config, explorers))
    }
}
