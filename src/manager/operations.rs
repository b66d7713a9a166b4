use std::fmt;

use log::{debug, warn};
use nix::errno::Errno;
use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;

use crate::error::{ProcessError, Result};

/// Graceful or forced termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignalKind {
    #[default]
    Terminate,
    Kill,
}

impl SignalKind {
    /// Reads operator input. Anything that does not name SIGKILL means SIGTERM.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_uppercase().as_str() {
            "SIGKILL" | "KILL" | "9" => SignalKind::Kill,
            _ => SignalKind::Terminate,
        }
    }

    pub fn signal(self) -> Signal {
        match self {
            SignalKind::Terminate => Signal::SIGTERM,
            SignalKind::Kill => Signal::SIGKILL,
        }
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.signal().as_str())
    }
}

//Sends SIGTERM or SIGKILL. Returns once the kernel accepts the signal; the
//target may still be running.
pub fn terminate_process(pid: u32, kind: SignalKind) -> Result<()> {
    let signal = kind.signal();
    let nix_pid = to_nix_pid(pid).map_err(|source| ProcessError::DeliveryError {
        pid,
        signal: signal.as_str(),
        source,
    })?;

    debug!("Sending {} to PID {}", signal.as_str(), pid);
    signal::kill(nix_pid, signal).map_err(|source| {
        warn!("Failed to send {} to PID {}: {}", signal.as_str(), pid, source);
        ProcessError::DeliveryError {
            pid,
            signal: signal.as_str(),
            source,
        }
    })
}

// kill(2) treats 0 and negative pids as process groups; never go there.
fn to_nix_pid(pid: u32) -> std::result::Result<Pid, Errno> {
    match libc::pid_t::try_from(pid) {
        Ok(raw) if raw > 0 => Ok(Pid::from_raw(raw)),
        _ => Err(Errno::ESRCH),
    }
}
