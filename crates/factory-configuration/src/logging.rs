use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

/// Where the JSON log file goes and the filter used when `FACTORY_LOG_LEVEL`
/// is not set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingToml
{
    pub log_dir: PathBuf,
    pub file_name: String,
    pub level: String,
}

impl Default for LoggingToml
{
    fn default() -> Self
    {
        Self {
            log_dir: PathBuf::from("./logs"),
            file_name: "factory.developer.log".to_string(),
            level: "info".to_string(),
        }
    }
}
