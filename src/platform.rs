use std::fmt;

use crate::exec::{CommandRequest, Runner};

/// Operating-system family the console is running on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Linux,
    Windows,
    Unknown,
}

impl OsFamily {
    pub fn detect() -> Self {
        if cfg!(target_os = "linux") {
            Self::Linux
        } else if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Linux => "Linux",
            Self::Windows => "Windows",
            Self::Unknown => "Unknown",
        };
        write!(f, "{}", name)
    }
}

/// Whether the current principal already has administrator/root rights.
#[cfg(unix)]
pub fn is_privileged() -> bool {
    // Effective UID, so a setuid or sudo-launched session counts.
    unsafe { libc::geteuid() == 0 }
}

/// On Windows `net session` succeeds only from an elevated prompt.
#[cfg(windows)]
pub fn is_privileged() -> bool {
    std::process::Command::new("net")
        .args(["session"])
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Concrete backend implementing the firewall capability on this host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirewallTag {
    Ufw,
    Firewalld,
    Netsh,
    None,
}

impl fmt::Display for FirewallTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ufw => "ufw",
            Self::Firewalld => "firewalld",
            Self::Netsh => "netsh",
            Self::None => "none",
        };
        write!(f, "{}", name)
    }
}

/// Seam for asking whether a managing service is active, so resolution
/// policy is testable without systemctl.
pub trait ServiceProbe {
    fn is_active(&self, service: &str) -> bool;
}

/// Probes service state through `systemctl is-active`. A missing systemctl
/// reads as not-active, which lets resolution fall through to the next
/// candidate.
pub struct SystemctlProbe<'a> {
    runner: &'a Runner,
}

impl<'a> SystemctlProbe<'a> {
    pub fn new(runner: &'a Runner) -> Self {
        Self { runner }
    }
}

impl ServiceProbe for SystemctlProbe<'_> {
    fn is_active(&self, service: &str) -> bool {
        if !crate::exec::command_exists("systemctl") {
            return false;
        }
        let result = self
            .runner
            .execute(&CommandRequest::new(["systemctl", "is-active", service]));
        result.succeeded() && result.stdout.contains("active")
    }
}

/// Resolve which firewall backend is active right now.
///
/// Linux probes ufw first, then firewalld; the first service reporting
/// active wins. The order is policy, not installation detection: a host
/// with both installed but only firewalld running resolves to firewalld.
/// Windows is always netsh. Every call re-probes, because this very console can
/// start and stop the probed services, so caching would go stale.
pub fn resolve_firewall(os: OsFamily, probe: &dyn ServiceProbe) -> FirewallTag {
    match os {
        OsFamily::Windows => FirewallTag::Netsh,
        OsFamily::Linux => {
            if probe.is_active("ufw") {
                FirewallTag::Ufw
            } else if probe.is_active("firewalld") {
                FirewallTag::Firewalld
            } else {
                FirewallTag::None
            }
        }
        OsFamily::Unknown => FirewallTag::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProbe {
        active: Vec<&'static str>,
    }

    impl ServiceProbe for FixedProbe {
        fn is_active(&self, service: &str) -> bool {
            self.active.contains(&service)
        }
    }

    #[test]
    fn windows_is_always_netsh() {
        let probe = FixedProbe { active: vec![] };
        assert_eq!(
            resolve_firewall(OsFamily::Windows, &probe),
            FirewallTag::Netsh
        );
    }

    #[test]
    fn primary_wins_when_both_active() {
        let probe = FixedProbe {
            active: vec!["ufw", "firewalld"],
        };
        for _ in 0..3 {
            assert_eq!(resolve_firewall(OsFamily::Linux, &probe), FirewallTag::Ufw);
        }
    }

    #[test]
    fn secondary_resolves_when_only_it_is_active() {
        let probe = FixedProbe {
            active: vec!["firewalld"],
        };
        assert_eq!(
            resolve_firewall(OsFamily::Linux, &probe),
            FirewallTag::Firewalld
        );
    }

    #[test]
    fn neither_active_resolves_to_none() {
        let probe = FixedProbe { active: vec![] };
        assert_eq!(resolve_firewall(OsFamily::Linux, &probe), FirewallTag::None);
    }

    #[test]
    fn resolution_is_idempotent_on_unchanged_state() {
        let probe = FixedProbe {
            active: vec!["ufw"],
        };
        let first = resolve_firewall(OsFamily::Linux, &probe);
        let second = resolve_firewall(OsFamily::Linux, &probe);
        assert_eq!(first, second);
    }
}
