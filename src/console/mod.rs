pub mod disk;
pub mod firewall;
pub mod network;
pub mod process;
pub mod proxy;
pub mod resources;
pub mod users;

use std::io::{self, Write};

use colored::Colorize;
use inquire::{Confirm, Password, Text};

use crate::audit::Audit;
use crate::config::Config;
use crate::exec::{CommandRequest, Outcome, Runner};
use crate::platform::{self, OsFamily};

/// Everything one interactive session needs: the detected OS, the runner,
/// and the audit trail. Passed down to every menu.
pub struct Session {
    pub os: OsFamily,
    pub runner: Runner,
    pub audit: Audit,
    exit_on_missing_tool: bool,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        let privileged = platform::is_privileged();
        Self {
            os: OsFamily::detect(),
            runner: Runner::new(config.settings.elevation_prefix.clone(), privileged),
            audit: Audit::new(config.settings.log_dir.clone()),
            exit_on_missing_tool: config.settings.exit_on_missing_tool,
        }
    }

    /// Run a batch strictly: stop at the first failure. Prints captured
    /// output, prints and audits failures, audits success once the whole
    /// batch went through.
    pub fn run_reported(&self, module: &str, action: &str, requests: &[CommandRequest]) -> bool {
        for request in requests {
            let result = self.runner.execute(request);
            match result.outcome {
                Outcome::Success => {
                    if !result.stdout.trim().is_empty() {
                        println!("{}", result.stdout);
                    }
                }
                _ => {
                    self.report_failure(module, action, &result);
                    return false;
                }
            }
        }
        self.audit.record(module, action, "completed");
        true
    }

    /// Run a batch leniently: a non-zero exit is a warning, not a stop.
    /// Teardown steps like `ip addr flush` or `ip route del default` fail
    /// legitimately on a clean host. Missing executables and spawn faults
    /// still abort.
    pub fn run_tolerant(&self, module: &str, action: &str, requests: &[CommandRequest]) -> bool {
        for request in requests {
            let result = self.runner.execute(request);
            match result.outcome {
                Outcome::Success => {
                    if !result.stdout.trim().is_empty() {
                        println!("{}", result.stdout);
                    }
                }
                Outcome::NonZeroExit => {
                    println!(
                        "{}",
                        format!("  (ignored) {} exited non-zero", result.program).yellow()
                    );
                    if !result.stderr.trim().is_empty() {
                        println!("{}", result.stderr.trim().yellow());
                    }
                }
                Outcome::NotFound | Outcome::ExecutionError => {
                    self.report_failure(module, action, &result);
                    return false;
                }
            }
        }
        self.audit.record(module, action, "completed");
        true
    }

    fn report_failure(&self, module: &str, action: &str, result: &crate::exec::CommandResult) {
        let program = result.program.as_str();
        match result.outcome {
            Outcome::NotFound => {
                println!(
                    "{}",
                    format!("✗ command '{}' not found on this system", program).red()
                );
                self.audit
                    .record(module, action, &format!("failed: '{}' not found", program));
                if self.exit_on_missing_tool {
                    println!("{}", "exit_on_missing_tool is set; terminating.".red());
                    std::process::exit(1);
                }
            }
            Outcome::ExecutionError => {
                println!("{}", format!("✗ failed to run '{}'", program).red());
                if !result.stderr.trim().is_empty() {
                    println!("{}", result.stderr.trim().red());
                }
                self.audit
                    .record(module, action, &format!("failed: {}", result.stderr.trim()));
            }
            Outcome::NonZeroExit => {
                println!(
                    "{}",
                    format!(
                        "✗ '{}' exited with status {}",
                        program,
                        result
                            .exit_code
                            .map(|c| c.to_string())
                            .unwrap_or_else(|| "?".to_string())
                    )
                    .red()
                );
                if !result.stderr.trim().is_empty() {
                    println!("{}", result.stderr.trim().red());
                }
                self.audit.record(
                    module,
                    action,
                    &format!("failed: exit {:?}", result.exit_code),
                );
            }
            Outcome::Success => {}
        }
    }
}

pub fn clear_screen() {
    // ANSI clear + home; avoids shelling out for cosmetics.
    print!("\x1B[2J\x1B[1;1H");
    let _ = io::stdout().flush();
}

pub fn header(title: &str) {
    println!("{}", "=".repeat(title.len() + 6).bright_blue());
    println!("{}", format!("   {}   ", title).bright_blue().bold());
    println!("{}", "=".repeat(title.len() + 6).bright_blue());
    println!();
}

/// Numeric menu prompt. Returns the trimmed line; empty on EOF.
pub fn read_choice() -> String {
    print!("Your choice: ");
    let _ = io::stdout().flush();
    let mut line = String::new();
    if io::stdin().read_line(&mut line).is_err() {
        return String::new();
    }
    line.trim().to_string()
}

pub fn invalid_choice() {
    println!("{}", "Invalid option, please try again.".red());
}

pub fn pause() {
    print!("\nPress Enter to continue...");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().read_line(&mut line);
}

/// Prompt for one required value; `None` means the user cancelled (Esc)
/// or submitted nothing, and the operation returns to its menu.
pub fn ask(label: &str) -> Option<String> {
    match Text::new(label).prompt() {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

/// Prompt for an optional value; empty input is `None`, cancel is `None`.
pub fn ask_optional(label: &str) -> Option<String> {
    match Text::new(label).with_default("").prompt() {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => None,
    }
}

pub fn ask_password(label: &str) -> Option<String> {
    match Password::new(label).without_confirmation().prompt() {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

pub fn confirm(label: &str) -> bool {
    Confirm::new(label)
        .with_default(false)
        .prompt()
        .unwrap_or(false)
}

/// Top-level menu loop.
pub fn run(session: &Session) {
    loop {
        clear_screen();
        header(&format!("System & Network Administration ({})", session.os));
        println!("1. Users and Groups");
        println!("2. Network");
        println!("3. Firewall");
        println!("4. Proxy");
        println!("5. System Resources");
        println!("6. Processes");
        println!("7. Disks and Partitions");
        println!("0. Exit");
        println!();

        match read_choice().as_str() {
            "1" => users::menu(session),
            "2" => network::menu(session),
            "3" => firewall::menu(session),
            "4" => proxy::menu(session),
            "5" => resources::menu(session),
            "6" => process::menu(session),
            "7" => disk::menu(session),
            "0" | "" => {
                println!("Leaving the console...");
                break;
            }
            _ => {
                invalid_choice();
                pause();
            }
        }
    }
}
