use std::fmt;
use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, warn};
use nix::sys::signal::{Signal, killpg};
use nix::unistd::Pid;

/// How often a child is polled while a launch timeout is running.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Result of running one command line to completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Normal exit with the program's status code.
    Completed(i32),
    /// Killed by a signal or otherwise ended without an exit code.
    Abnormal { signal: Option<i32> },
    /// The shell could not be started.
    SpawnFailed(String),
    /// Ran past the configured timeout and was killed.
    TimedOut,
}

impl From<ExitStatus> for ExitOutcome {
    fn from(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => ExitOutcome::Completed(code),
            None => ExitOutcome::Abnormal {
                signal: status.signal(),
            },
        }
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitOutcome::Completed(code) => write!(f, "Process completed with status {}", code),
            ExitOutcome::Abnormal { signal: Some(sig) } => {
                write!(f, "Process terminated abnormally (signal {})", sig)
            }
            ExitOutcome::Abnormal { signal: None } => write!(f, "Process terminated abnormally"),
            ExitOutcome::SpawnFailed(reason) => write!(f, "Failed to execute process: {}", reason),
            ExitOutcome::TimedOut => write!(f, "Process timed out and was killed"),
        }
    }
}

/// Runs operator command lines through a shell in the foreground.
///
/// The text is handed to `<shell> -c` untouched, so pipes, redirection and
/// globbing work exactly as typed. The child shares our terminal and the call
/// blocks until it exits.
#[derive(Debug, Clone)]
pub struct Launcher {
    shell: PathBuf,
    timeout: Option<Duration>,
}

impl Default for Launcher {
    fn default() -> Self {
        Launcher::new("/bin/sh", None)
    }
}

impl Launcher {
    pub fn new(shell: impl Into<PathBuf>, timeout: Option<Duration>) -> Self {
        Launcher {
            shell: shell.into(),
            timeout,
        }
    }

    /// Create a process with shell execution and wait for it
    pub fn launch(&self, command_line: &str) -> ExitOutcome {
        let mut cmd = Command::new(&self.shell);
        cmd.arg("-c").arg(command_line);
        if self.timeout.is_some() {
            // Own group so a timeout can take down pipelines and background
            // jobs, not just the shell. Untimed launches stay in the
            // terminal's foreground group.
            cmd.process_group(0);
        }

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!("Failed to spawn {:?}: {}", self.shell, e);
                return ExitOutcome::SpawnFailed(e.to_string());
            }
        };
        debug!("Launched PID {} for {:?}", child.id(), command_line);

        let outcome = match self.timeout {
            None => wait_blocking(child),
            Some(limit) => wait_with_timeout(child, limit),
        };
        info!("{:?} finished: {:?}", command_line, outcome);
        outcome
    }
}

fn wait_blocking(mut child: Child) -> ExitOutcome {
    match child.wait() {
        Ok(status) => status.into(),
        Err(e) => {
            warn!("Waiting on PID {} failed: {}", child.id(), e);
            ExitOutcome::Abnormal { signal: None }
        }
    }
}

fn wait_with_timeout(mut child: Child, limit: Duration) -> ExitOutcome {
    let deadline = Instant::now() + limit;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return status.into(),
            Ok(None) if Instant::now() >= deadline => {
                kill_group(&mut child);
                // Reap so the child does not linger as a zombie.
                if let Err(e) = child.wait() {
                    warn!("Reaping timed out PID {} failed: {}", child.id(), e);
                }
                return ExitOutcome::TimedOut;
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => {
                warn!("Waiting on PID {} failed: {}", child.id(), e);
                return ExitOutcome::Abnormal { signal: None };
            }
        }
    }
}

// The child leads its own process group (see `Launcher::launch`).
fn kill_group(child: &mut Child) {
    let group = libc::pid_t::try_from(child.id()).map(Pid::from_raw);
    match group {
        Ok(group) => {
            if let Err(e) = killpg(group, Signal::SIGKILL) {
                warn!("Failed to kill process group {}: {}", group, e);
            }
        }
        Err(_) => {
            if let Err(e) = child.kill() {
                warn!("Failed to kill timed out PID {}: {}", child.id(), e);
            }
        }
    }
}
