use std::io::Write;
use std::process::{Command, Stdio};

/// Classified result of attempting to run an external command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Program ran and exited 0.
    Success,
    /// Program ran and reported failure.
    NonZeroExit,
    /// Executable missing from the search path.
    NotFound,
    /// Spawn or I/O fault; message is in `stderr`.
    ExecutionError,
}

/// One external command to execute: program plus arguments as discrete
/// argv elements. Tokens that originate from user input are never joined
/// into a shell string.
#[derive(Debug, Clone)]
pub struct CommandRequest {
    tokens: Vec<String>,
    elevate: bool,
    capture: bool,
    stdin: Option<Vec<u8>>,
}

impl CommandRequest {
    pub fn new<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tokens: tokens.into_iter().map(Into::into).collect(),
            elevate: false,
            capture: true,
            stdin: None,
        }
    }

    /// Run a *constant* shell pipeline (`sh -c` / `cmd /C`). Only for fixed
    /// strings like `ps aux --sort=-%cpu | head`; never pass user input here.
    pub fn shell(line: &str) -> Self {
        let tokens = if cfg!(windows) {
            vec!["cmd".to_string(), "/C".to_string(), line.to_string()]
        } else {
            vec!["sh".to_string(), "-c".to_string(), line.to_string()]
        };
        Self {
            tokens,
            elevate: false,
            capture: true,
            stdin: None,
        }
    }

    /// Request the configured elevation prefix when not already privileged.
    pub fn elevated(mut self) -> Self {
        self.elevate = true;
        self
    }

    /// Let the child inherit stdout/stderr instead of capturing them.
    pub fn streamed(mut self) -> Self {
        self.capture = false;
        self
    }

    /// Bytes written to the child's stdin, which is then closed before the
    /// output is read. Used for non-interactive secret delivery (`chpasswd`)
    /// and file contents piped through `tee`.
    pub fn with_stdin(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(payload.into());
        self
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn wants_elevation(&self) -> bool {
        self.elevate
    }

    pub fn captures(&self) -> bool {
        self.capture
    }

    pub fn stdin_payload(&self) -> Option<&[u8]> {
        self.stdin.as_deref()
    }
}

/// Immutable result of one executed command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub program: String,
    /// Child's exit code; `None` when the child never ran or was killed by
    /// a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub outcome: Outcome,
}

impl CommandResult {
    fn not_found(program: &str) -> Self {
        Self {
            program: program.to_string(),
            exit_code: None,
            stdout: String::new(),
            stderr: format!("command '{}' not found", program),
            outcome: Outcome::NotFound,
        }
    }

    fn execution_error(program: &str, message: String) -> Self {
        Self {
            program: program.to_string(),
            exit_code: None,
            stdout: String::new(),
            stderr: message,
            outcome: Outcome::ExecutionError,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

/// Executes external commands and classifies every failure mode into a
/// [`CommandResult`]. Never panics and never returns an error: the contract
/// the half-dozen ad-hoc helpers this replaces could not agree on.
#[derive(Debug, Clone)]
pub struct Runner {
    elevation_prefix: Vec<String>,
    privileged: bool,
}

impl Runner {
    pub fn new(elevation_prefix: Vec<String>, privileged: bool) -> Self {
        Self {
            elevation_prefix,
            privileged,
        }
    }

    /// Execute one command, blocking until the child exits.
    pub fn execute(&self, request: &CommandRequest) -> CommandResult {
        let argv = self.effective_argv(request);

        let Some((program, args)) = argv.split_first() else {
            return CommandResult::execution_error("", "empty command".to_string());
        };

        log::debug!("Executing: {}", argv.join(" "));

        let mut cmd = Command::new(program);
        cmd.args(args);

        if request.captures() {
            cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        } else {
            cmd.stdout(Stdio::inherit()).stderr(Stdio::inherit());
        }

        if request.stdin_payload().is_some() {
            cmd.stdin(Stdio::piped());
        } else {
            cmd.stdin(Stdio::inherit());
        }

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return CommandResult::not_found(program);
            }
            Err(e) => {
                return CommandResult::execution_error(
                    program,
                    format!("failed to spawn '{}': {}", program, e),
                );
            }
        };

        // Write the payload and close the pipe before reading output, so
        // programs like chpasswd see EOF and act on what they read.
        if let Some(payload) = request.stdin_payload() {
            let Some(mut stdin) = child.stdin.take() else {
                let _ = child.kill();
                let _ = child.wait();
                return CommandResult::execution_error(
                    program,
                    format!("stdin pipe unavailable for '{}'", program),
                );
            };
            if let Err(e) = stdin.write_all(payload) {
                let _ = child.kill();
                let _ = child.wait();
                return CommandResult::execution_error(
                    program,
                    format!("failed to write stdin for '{}': {}", program, e),
                );
            }
        }

        let output = match child.wait_with_output() {
            Ok(output) => output,
            Err(e) => {
                return CommandResult::execution_error(
                    program,
                    format!("failed to wait for '{}': {}", program, e),
                );
            }
        };

        let outcome = if output.status.success() {
            Outcome::Success
        } else {
            Outcome::NonZeroExit
        };

        CommandResult {
            program: program.to_string(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            outcome,
        }
    }

    /// Prefix the elevation wrapper when the request asks for it and the
    /// current principal is not already privileged. The prefix comes from
    /// configuration, never from call sites.
    fn effective_argv(&self, request: &CommandRequest) -> Vec<String> {
        if request.wants_elevation() && !self.privileged && !self.elevation_prefix.is_empty() {
            let mut argv =
                Vec::with_capacity(self.elevation_prefix.len() + request.tokens().len());
            argv.extend(self.elevation_prefix.iter().cloned());
            argv.extend(request.tokens().iter().cloned());
            argv
        } else {
            request.tokens().to_vec()
        }
    }
}

/// Check if a command exists in PATH
pub fn command_exists(command: &str) -> bool {
    which::which(command).is_ok()
}

// No timeout or forced termination: each call blocks until the child exits,
// matching the strictly sequential menu flow. A bounded wait would slot in
// around `wait_with_output` if one is ever needed.

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(tokens: &[&str]) -> CommandRequest {
        CommandRequest::new(tokens.iter().copied())
    }

    #[test]
    fn missing_executable_is_not_found() {
        let runner = Runner::new(vec![], true);
        let result = runner.execute(&plain(&["/no/such/binary"]));
        assert_eq!(result.outcome, Outcome::NotFound);
        assert_eq!(result.exit_code, None);
    }

    #[test]
    fn empty_request_is_execution_error() {
        let runner = Runner::new(vec![], true);
        let result = runner.execute(&CommandRequest::new(Vec::<String>::new()));
        assert_eq!(result.outcome, Outcome::ExecutionError);
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_is_success() {
        let runner = Runner::new(vec![], true);
        let result = runner.execute(&plain(&["true"]));
        assert_eq!(result.outcome, Outcome::Success);
        assert_eq!(result.exit_code, Some(0));
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_reports_exact_code() {
        let runner = Runner::new(vec![], true);
        let result = runner.execute(&plain(&["false"]));
        assert_eq!(result.outcome, Outcome::NonZeroExit);
        assert_eq!(result.exit_code, Some(1));
    }

    #[cfg(unix)]
    #[test]
    fn captures_stdout() {
        let runner = Runner::new(vec![], true);
        let result = runner.execute(&plain(&["echo", "hello"]));
        assert!(result.succeeded());
        assert_eq!(result.stdout, "hello\n");
    }

    #[cfg(unix)]
    #[test]
    fn stdin_payload_round_trips() {
        let runner = Runner::new(vec![], true);
        let request = plain(&["cat"]).with_stdin("alice:S3cret\n".as_bytes().to_vec());
        let result = runner.execute(&request);
        assert!(result.succeeded());
        assert_eq!(result.stdout, "alice:S3cret\n");
    }

    #[cfg(unix)]
    #[test]
    fn streamed_request_inherits_output() {
        let runner = Runner::new(vec![], true);
        let result = runner.execute(&plain(&["true"]).streamed());
        assert!(result.succeeded());
        assert_eq!(result.stdout, "");
        assert_eq!(result.stderr, "");
    }

    #[cfg(unix)]
    #[test]
    fn shell_request_runs_constant_pipeline() {
        let runner = Runner::new(vec![], true);
        let result = runner.execute(&CommandRequest::shell("echo one | tr a-z A-Z"));
        assert!(result.succeeded());
        assert_eq!(result.stdout, "ONE\n");
    }

    #[cfg(unix)]
    #[test]
    fn elevation_prefix_prepended_for_unprivileged_runner() {
        // `env` as a stand-in elevation wrapper: it just execs its argv.
        let runner = Runner::new(vec!["env".to_string()], false);
        let result = runner.execute(&plain(&["echo", "up"]).elevated());
        assert!(result.succeeded());
        assert_eq!(result.stdout, "up\n");
    }

    #[test]
    fn privileged_runner_skips_prefix() {
        let runner = Runner::new(vec!["definitely-not-a-command".to_string()], true);
        let request = plain(&["some-program"]).elevated();
        let argv = runner.effective_argv(&request);
        assert_eq!(argv, vec!["some-program".to_string()]);
    }

    #[test]
    fn unelevated_request_skips_prefix() {
        let runner = Runner::new(vec!["sudo".to_string()], false);
        let argv = runner.effective_argv(&plain(&["ufw", "status"]));
        assert_eq!(argv[0], "ufw");
    }

    #[test]
    fn empty_prefix_is_a_noop() {
        let runner = Runner::new(vec![], false);
        let argv = runner.effective_argv(&plain(&["ufw", "enable"]).elevated());
        assert_eq!(argv[0], "ufw");
    }

    #[test]
    fn user_input_stays_a_single_token() {
        let hostile = "80; rm -rf /";
        let request = CommandRequest::new(["ufw", "allow", hostile]);
        assert_eq!(request.tokens().len(), 3);
        assert_eq!(request.tokens()[2], hostile);
    }
}
