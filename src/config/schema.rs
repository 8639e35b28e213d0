use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub settings: Settings,

    #[serde(default)]
    pub proxy: Option<ProxyConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Directory for the day-stamped audit log files.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Privilege-elevation wrapper prepended to commands that need root
    /// rights when the session itself is unprivileged. Empty on Windows,
    /// where elevation is ambient rather than per-command.
    #[serde(default = "default_elevation_prefix")]
    pub elevation_prefix: Vec<String>,

    /// Terminate the session when an operation's executable is missing.
    /// The default keeps a missing tool a per-operation failure.
    #[serde(default)]
    pub exit_on_missing_tool: bool,
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("sysadm").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

fn default_elevation_prefix() -> Vec<String> {
    if cfg!(windows) {
        vec![]
    } else {
        vec!["sudo".to_string()]
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            elevation_prefix: default_elevation_prefix(),
            exit_on_missing_tool: false,
        }
    }
}

/// Optional session proxy defaults applied at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyConfig {
    #[serde(default)]
    pub http: Option<String>,

    #[serde(default)]
    pub https: Option<String>,

    #[serde(default)]
    pub no_proxy: Option<String>,
}
