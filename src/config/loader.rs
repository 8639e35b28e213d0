use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use super::{validate_config, Config};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),

    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Find config file in order of priority:
/// 1. Explicit --config flag path
/// 2. ./sysadm.toml (current directory)
/// 3. ~/.config/sysadm/sysadm.toml
/// 4. ~/.sysadm.toml
pub fn find_config_file(explicit_path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Ok(Some(path.to_path_buf()));
        }
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let cwd_config = PathBuf::from("./sysadm.toml");
    if cwd_config.exists() {
        return Ok(Some(cwd_config));
    }

    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("sysadm/sysadm.toml");
        if config_path.exists() {
            return Ok(Some(config_path));
        }
    }

    if let Some(home_dir) = dirs::home_dir() {
        let home_config = home_dir.join(".sysadm.toml");
        if home_config.exists() {
            return Ok(Some(home_config));
        }
    }

    Ok(None)
}

/// Load and parse config file
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load config with automatic discovery. A console must come up without any
/// config file, so an empty discovery chain yields the defaults rather than
/// an error; an explicit path that does not exist is still fatal.
pub fn load_config_auto(explicit_path: Option<&Path>) -> Result<Config> {
    let found = find_config_file(explicit_path).context("config discovery failed")?;

    let config = match found {
        Some(path) => {
            let config =
                load_config(&path).with_context(|| format!("loading {}", path.display()))?;
            log::debug!("Loaded config from {}", path.display());
            config
        }
        None => {
            log::debug!("No config file found, using defaults");
            Config::default()
        }
    };

    validate_config(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_full_config() {
        let toml = r#"
            [settings]
            log_dir = "/tmp/sysadm-logs"
            elevation_prefix = ["doas"]
            exit_on_missing_tool = true

            [proxy]
            http = "http://proxy:8080"
            no_proxy = "localhost"
        "#;
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sysadm.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(toml.as_bytes()).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.settings.log_dir, PathBuf::from("/tmp/sysadm-logs"));
        assert_eq!(config.settings.elevation_prefix, vec!["doas".to_string()]);
        assert!(config.settings.exit_on_missing_tool);
        let proxy = config.proxy.unwrap();
        assert_eq!(proxy.http.as_deref(), Some("http://proxy:8080"));
        assert_eq!(proxy.https, None);
    }

    #[test]
    fn empty_file_falls_back_to_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sysadm.toml");
        fs::write(&path, "").unwrap();

        let config = load_config(&path).unwrap();
        assert!(!config.settings.exit_on_missing_tool);
        assert!(config.proxy.is_none());
        if cfg!(windows) {
            assert!(config.settings.elevation_prefix.is_empty());
        } else {
            assert_eq!(config.settings.elevation_prefix, vec!["sudo".to_string()]);
        }
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        let err = find_config_file(Some(Path::new("/no/such/sysadm.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("sysadm.toml");
        fs::write(&path, "[settings\nlog_dir = ").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
