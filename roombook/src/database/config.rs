//! Database configuration and path resolution.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Config;
use crate::error::{Error, Result};

/// Environment variable naming the data directory.
pub const DATA_DIR_ENV: &str = "ROOMBOOK_DATA_DIR";

/// File name of the booking database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "roombook.db";

/// Configuration for database connections.
///
/// # Examples
///
/// ```
/// use roombook::database::DatabaseConfig;
/// use std::time::Duration;
///
/// let config = DatabaseConfig::new("/tmp/roombook.db")
///     .with_busy_timeout(Duration::from_millis(10000));
/// assert!(config.auto_create);
/// ```
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the database file.
    pub path: PathBuf,
    /// How long a unit of work waits for a competing writer.
    pub busy_timeout: Duration,
    /// Whether to automatically create the database if it doesn't exist.
    pub auto_create: bool,
    /// Whether to open the database in read-only mode.
    pub read_only: bool,
}

impl DatabaseConfig {
    /// Creates a new database configuration with default settings.
    ///
    /// Default settings:
    /// - `busy_timeout`: 5000ms
    /// - `auto_create`: true
    /// - `read_only`: false
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            busy_timeout: Duration::from_millis(5000),
            auto_create: true,
            read_only: false,
        }
    }

    /// Creates a configuration whose busy timeout follows
    /// `maximum_lock_wait_seconds`.
    #[must_use]
    pub fn from_config(path: impl AsRef<Path>, config: &Config) -> Self {
        Self::new(path).with_busy_timeout(config.lock_wait())
    }

    /// Sets the busy timeout duration.
    ///
    /// A unit of work that cannot start within this time fails with
    /// [`Error::StorageContention`].
    #[must_use]
    pub fn with_busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    /// Configures the database to be opened in read-only mode.
    ///
    /// When read-only is enabled, `auto_create` is automatically disabled.
    #[must_use]
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self.auto_create = false;
        self
    }
}

/// Returns the default data directory, `~/.roombook`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    let home = home::home_dir().ok_or_else(|| Error::Validation {
        field: "home_directory".into(),
        message: "Cannot determine home directory".into(),
    })?;
    Ok(home.join(".roombook"))
}

/// Resolves the data directory.
///
/// The resolution order is:
/// 1. `explicit`, typically from `--data-dir`
/// 2. `$ROOMBOOK_DATA_DIR`
/// 3. `~/.roombook`
///
/// # Errors
///
/// Returns an error if the home directory is needed but cannot be
/// determined.
pub fn resolve_data_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => default_data_dir(),
    }
}

/// Resolves the database file path inside the resolved data directory.
///
/// # Errors
///
/// Returns an error if the data directory cannot be resolved.
///
/// # Examples
///
/// ```
/// use roombook::database::resolve_database_path;
/// use std::path::Path;
///
/// let path = resolve_database_path(Some(Path::new("/srv/rooms"))).unwrap();
/// assert_eq!(path, Path::new("/srv/rooms/roombook.db"));
/// ```
pub fn resolve_database_path(explicit: Option<&Path>) -> Result<PathBuf> {
    Ok(resolve_data_dir(explicit)?.join(DATABASE_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_config_new() {
        let config = DatabaseConfig::new("/tmp/test.db");
        assert_eq!(config.path, PathBuf::from("/tmp/test.db"));
        assert_eq!(config.busy_timeout, Duration::from_millis(5000));
        assert!(config.auto_create);
        assert!(!config.read_only);
    }

    #[test]
    fn test_config_from_config_uses_lock_wait() {
        let app = Config {
            maximum_lock_wait_seconds: Some(2),
            ..Default::default()
        };
        let config = DatabaseConfig::from_config("/tmp/test.db", &app);
        assert_eq!(config.busy_timeout, Duration::from_secs(2));
    }

    #[test]
    fn test_config_read_only() {
        let config = DatabaseConfig::new("/tmp/test.db").read_only();
        assert!(config.read_only);
        assert!(!config.auto_create);
    }

    #[test]
    #[serial]
    fn test_resolve_data_dir_precedence() {
        std::env::set_var(DATA_DIR_ENV, "/from/env");
        assert_eq!(
            resolve_data_dir(Some(Path::new("/explicit"))).unwrap(),
            PathBuf::from("/explicit")
        );
        assert_eq!(resolve_data_dir(None).unwrap(), PathBuf::from("/from/env"));
        assert_eq!(
            resolve_database_path(None).unwrap(),
            PathBuf::from("/from/env/roombook.db")
        );

        std::env::remove_var(DATA_DIR_ENV);
        if home::home_dir().is_some() {
            assert!(resolve_data_dir(None).unwrap().ends_with(".roombook"));
        }
    }
}
