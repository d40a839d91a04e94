use std::path::PathBuf;

use crate::domain::{AppConfig, DomainError};

/// Port for the application settings file.
pub trait ConfigStore: Send + Sync {
    /// Read the settings, writing a default file first if none exists.
    fn load(&self) -> Result<AppConfig, DomainError>;

    /// Overwrite the settings file.
    fn save(&self, config: &AppConfig) -> Result<(), DomainError>;

    /// Location of `config.toml`.
    fn config_path(&self) -> PathBuf;

    /// Directory for rotated log files.
    fn logs_dir(&self) -> PathBuf;
}
