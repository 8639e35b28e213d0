use anyhow::Result;

use super::Config;

/// Validate config for correctness
pub fn validate_config(config: &Config) -> Result<()> {
    // An elevation prefix with blank tokens would produce argv like
    // ["", "ufw", "enable"] and fail in confusing ways at spawn time.
    if config
        .settings
        .elevation_prefix
        .iter()
        .any(|token| token.trim().is_empty())
    {
        anyhow::bail!("settings.elevation_prefix must not contain empty tokens");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn blank_prefix_token_is_rejected() {
        let config = Config {
            settings: Settings {
                elevation_prefix: vec!["sudo".to_string(), "  ".to_string()],
                ..Settings::default()
            },
            proxy: None,
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn empty_prefix_is_valid() {
        let config = Config {
            settings: Settings {
                elevation_prefix: vec![],
                ..Settings::default()
            },
            proxy: None,
        };
        assert!(validate_config(&config).is_ok());
    }
}
