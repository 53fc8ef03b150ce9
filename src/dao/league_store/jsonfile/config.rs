use std::env;
use std::path::PathBuf;

/// Default directory holding the JSON collection files.
const DEFAULT_DATA_DIR: &str = "data";
/// Environment variable that overrides [`DEFAULT_DATA_DIR`].
const DATA_DIR_ENV: &str = "FUTBOL_TRACKER_DATA_DIR";

/// Runtime configuration for the file-backed JSON store.
#[derive(Debug, Clone)]
pub struct JsonFileConfig {
    /// Directory where one JSON file per collection is kept.
    pub data_dir: PathBuf,
}

impl JsonFileConfig {
    /// Construct a configuration pointing at an explicit directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Build a configuration from the environment, falling back to the
    /// default data directory.
    pub fn from_env() -> Self {
        let data_dir = env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .filter(|path| !path.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        Self { data_dir }
    }
}
