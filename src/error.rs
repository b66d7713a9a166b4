use thiserror::Error;

/// Errors that can occur while inspecting or controlling processes.
///
/// Launch problems are not errors here: a spawned command always produces an
/// [`ExitOutcome`](crate::manager::creation::ExitOutcome).
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Process {0} not found")]
    NotFound(u32),
    #[error("Failed to send {signal} to PID {pid}: {source}")]
    DeliveryError {
        pid: u32,
        signal: &'static str,
        #[source]
        source: nix::Error,
    },
    #[error("Maximum tracking limit reached ({0} processes)")]
    CapacityExceeded(usize),
    #[error("Invalid input: {0:?}")]
    MalformedInput(String),
    #[error("Failed to read process list: {0}")]
    Enumeration(String),
}

impl From<procfs::ProcError> for ProcessError {
    fn from(err: procfs::ProcError) -> Self {
        ProcessError::Enumeration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ProcessError>;
