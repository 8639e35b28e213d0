use std::env;

use crate::config::ProxyConfig;
use crate::exec::CommandRequest;

const ENV_VARS: [&str; 6] = [
    "HTTP_PROXY",
    "http_proxy",
    "HTTPS_PROXY",
    "https_proxy",
    "NO_PROXY",
    "no_proxy",
];

/// Session-scoped proxy settings over the standard environment variables.
///
/// Changes apply to this process's environment block only and are not
/// persistent; a documented limitation of the console, not a defect.
/// Instead of scattering `env::set_var` through the menus, the mutation is
/// funneled through this one type, and `apply_scoped` hands back a guard
/// that restores the previous environment on drop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub no_proxy: Option<String>,
}

impl ProxySettings {
    pub fn new(http: Option<String>, https: Option<String>, no_proxy: Option<String>) -> Self {
        Self {
            http,
            https,
            no_proxy,
        }
    }

    pub fn from_config(cfg: &ProxyConfig) -> Self {
        Self {
            http: cfg.http.clone(),
            https: cfg.https.clone(),
            no_proxy: cfg.no_proxy.clone(),
        }
    }

    /// Read the current session proxy state, accepting either variable case.
    pub fn current() -> Self {
        let read = |upper: &str, lower: &str| env::var(upper).or_else(|_| env::var(lower)).ok();
        Self {
            http: read("HTTP_PROXY", "http_proxy"),
            https: read("HTTPS_PROXY", "https_proxy"),
            no_proxy: read("NO_PROXY", "no_proxy"),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.http.is_none() && self.https.is_none() && self.no_proxy.is_none()
    }

    /// Write these settings into the process environment. Unset fields
    /// clear both variable cases so stale lowercase values cannot linger.
    pub fn apply(&self) {
        let write = |upper: &str, lower: &str, value: &Option<String>| match value {
            Some(v) => {
                env::set_var(upper, v);
                env::set_var(lower, v);
            }
            None => {
                env::remove_var(upper);
                env::remove_var(lower);
            }
        };
        write("HTTP_PROXY", "http_proxy", &self.http);
        write("HTTPS_PROXY", "https_proxy", &self.https);
        write("NO_PROXY", "no_proxy", &self.no_proxy);
    }

    /// Remove every proxy variable from the session.
    pub fn clear() {
        for var in ENV_VARS {
            env::remove_var(var);
        }
    }

    /// Apply and return a guard that restores the prior environment when
    /// dropped.
    pub fn apply_scoped(&self) -> ScopedProxy {
        let saved = ENV_VARS.map(|var| (var, env::var(var).ok()));
        self.apply();
        ScopedProxy { saved }
    }
}

pub struct ScopedProxy {
    saved: [(&'static str, Option<String>); 6],
}

impl Drop for ScopedProxy {
    fn drop(&mut self) {
        for (var, value) in &self.saved {
            match value {
                Some(v) => env::set_var(var, v),
                None => env::remove_var(var),
            }
        }
    }
}

/// Requests for the Windows per-user Internet Settings proxy. Registry
/// writes go through `reg` with the address as its own argv token, so a
/// hostile address cannot break out into a script.
pub fn windows_proxy_enable_requests(address: &str) -> Vec<CommandRequest> {
    const KEY: &str = r"HKCU\Software\Microsoft\Windows\CurrentVersion\Internet Settings";
    vec![
        CommandRequest::new([
            "reg", "add", KEY, "/v", "ProxyEnable", "/t", "REG_DWORD", "/d", "1", "/f",
        ]),
        CommandRequest::new([
            "reg",
            "add",
            KEY,
            "/v",
            "ProxyServer",
            "/t",
            "REG_SZ",
            "/d",
            address,
            "/f",
        ]),
    ]
}

pub fn windows_proxy_disable_requests() -> Vec<CommandRequest> {
    const KEY: &str = r"HKCU\Software\Microsoft\Windows\CurrentVersion\Internet Settings";
    vec![
        CommandRequest::new([
            "reg", "add", KEY, "/v", "ProxyEnable", "/t", "REG_DWORD", "/d", "0", "/f",
        ]),
        CommandRequest::new(["reg", "delete", KEY, "/v", "ProxyServer", "/f"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Process environment is global; serialize the tests that touch it.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn apply_and_current_round_trip() {
        let _guard = ENV_LOCK.lock().unwrap();
        ProxySettings::clear();

        let settings = ProxySettings::new(
            Some("http://proxy:8080".to_string()),
            Some("http://proxy:8080".to_string()),
            Some("localhost,127.0.0.1".to_string()),
        );
        settings.apply();
        assert_eq!(ProxySettings::current(), settings);

        ProxySettings::clear();
        assert!(ProxySettings::current().is_empty());
    }

    #[test]
    fn scoped_apply_restores_previous_environment() {
        let _guard = ENV_LOCK.lock().unwrap();
        ProxySettings::clear();
        env::set_var("HTTP_PROXY", "http://before:3128");

        {
            let scoped = ProxySettings::new(Some("http://during:8080".to_string()), None, None)
                .apply_scoped();
            assert_eq!(env::var("HTTP_PROXY").unwrap(), "http://during:8080");
            drop(scoped);
        }

        assert_eq!(env::var("HTTP_PROXY").unwrap(), "http://before:3128");
        ProxySettings::clear();
    }

    #[test]
    fn registry_address_stays_a_single_token() {
        let hostile = "proxy:8080\" ; Remove-Item -Recurse";
        let requests = windows_proxy_enable_requests(hostile);
        let server_req = &requests[1];
        assert!(server_req.tokens().contains(&hostile.to_string()));
    }
}
