use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

/// Append-only audit trail: one file per calendar day under the configured
/// log directory, lines of the form `[timestamp] [module] [action] details`.
///
/// The file is opened, appended, and closed per write; no handle is held
/// across commands. A failed write degrades to a warning; auditing never
/// blocks an operation.
#[derive(Debug, Clone)]
pub struct Audit {
    dir: PathBuf,
}

impl Audit {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn record(&self, module: &str, action: &str, details: &str) {
        if let Err(e) = self.try_record(module, action, details) {
            log::warn!("audit write failed: {}", e);
        }
    }

    fn try_record(&self, module: &str, action: &str, details: &str) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;

        let now = Local::now();
        let path = self
            .dir
            .join(format!("{}_sysadm.log", now.format("%Y-%m-%d")));

        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(
            file,
            "[{}] [{}] [{}] {}",
            now.format("%Y-%m-%d %H:%M:%S"),
            module,
            action,
            details
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_day_stamped_file_on_first_write() {
        let tmp = tempfile::tempdir().unwrap();
        let audit = Audit::new(tmp.path().join("logs"));

        audit.record("Firewall", "Enable", "ufw enabled");

        let expected = tmp.path().join("logs").join(format!(
            "{}_sysadm.log",
            Local::now().format("%Y-%m-%d")
        ));
        assert!(expected.exists());
    }

    #[test]
    fn line_carries_module_action_and_details() {
        let tmp = tempfile::tempdir().unwrap();
        let audit = Audit::new(tmp.path());

        audit.record("Users", "Create User", "user 'alice' created");
        audit.record("Users", "Delete User", "user 'bob' removed");

        let path = tmp.path().join(format!(
            "{}_sysadm.log",
            Local::now().format("%Y-%m-%d")
        ));
        let content = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].contains("] [Users] [Create User] user 'alice' created"));
        assert!(lines[1].contains("] [Users] [Delete User] user 'bob' removed"));
    }
}
