//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/wordsnap/config.toml)
//! 3. Environment variables (WORDSNAP_* prefix)
//!
//! Environment variables take precedence over config file values. The
//! store itself is in-memory only; the config file is tooling (seed
//! toggle, startup filter, log path), not data persistence.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix
const ENV_PREFIX: &str = "WORDSNAP";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Whether to seed the store with demo collections and words
    #[serde(default = "default_demo_data")]
    pub demo_data: bool,

    /// Collection id to start filtered to (defaults to "all")
    #[serde(default)]
    pub start_collection: Option<String>,

    /// Log file path, used when WORDSNAP_LOG is set
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            demo_data: default_demo_data(),
            start_collection: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (WORDSNAP_DEMO_DATA, WORDSNAP_START_COLLECTION)
    /// 2. Config file (~/.config/wordsnap/config.toml or WORDSNAP_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // WORDSNAP_DEMO_DATA
        if let Ok(val) = std::env::var(format!("{}_DEMO_DATA", ENV_PREFIX)) {
            self.demo_data = val.eq_ignore_ascii_case("true") || val == "1";
        }

        // WORDSNAP_START_COLLECTION
        if let Ok(val) = std::env::var(format!("{}_START_COLLECTION", ENV_PREFIX)) {
            self.start_collection = if val.is_empty() { None } else { Some(val) };
        }

        // WORDSNAP_LOG_FILE
        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }
    }

    /// Get the config file path
    ///
    /// Can be overridden with WORDSNAP_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wordsnap")
            .join("config.toml")
    }
}

fn default_demo_data() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap();
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            // Clear all the vars
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &[
        "WORDSNAP_DEMO_DATA",
        "WORDSNAP_START_COLLECTION",
        "WORDSNAP_LOG_FILE",
    ];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.demo_data);
        assert!(config.start_collection.is_none());
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_env_override_demo_data() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        assert!(config.demo_data);

        env::set_var("WORDSNAP_DEMO_DATA", "false");
        config.apply_env_overrides();
        assert!(!config.demo_data);

        env::set_var("WORDSNAP_DEMO_DATA", "1");
        config.apply_env_overrides();
        assert!(config.demo_data);
    }

    #[test]
    fn test_env_override_start_collection() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();
        env::set_var("WORDSNAP_START_COLLECTION", "tech");
        config.apply_env_overrides();
        assert_eq!(config.start_collection, Some("tech".to_string()));

        // Empty string clears it
        env::set_var("WORDSNAP_START_COLLECTION", "");
        config.apply_env_overrides();
        assert!(config.start_collection.is_none());
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            demo_data = false
            start_collection = "fav"
            log_file = "/tmp/wordsnap.log"
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert!(!config.demo_data);
        assert_eq!(config.start_collection, Some("fav".to_string()));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/wordsnap.log")));
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        // Should return defaults when file doesn't exist
        assert!(config.demo_data);
        assert!(config.start_collection.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "demo_data = false\n").unwrap();

        let config = Config::load_from_path(&path).unwrap();
        assert!(!config.demo_data);
    }

    #[test]
    fn test_load_from_invalid_file_errors() {
        let _guard = EnvGuard::new(ENV_VARS);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "demo_data = \"not a bool\"\n").unwrap();

        assert!(Config::load_from_path(&path).is_err());
    }
}
