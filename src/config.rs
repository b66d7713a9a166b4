use std::path::PathBuf;
use std::time::Duration;

/// Default watchlist size.
pub const DEFAULT_TRACK_CAPACITY: usize = 1024;

/// Runtime settings for the manager. There is no config file; `main` uses
/// [`Config::default`] and tests build their own.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the process metadata tree, normally `/proc`.
    pub proc_root: PathBuf,
    /// Shell used to interpret launched command lines.
    pub shell: PathBuf,
    pub track_capacity: usize,
    /// Kill a launched child that runs longer than this. `None` waits forever.
    pub launch_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proc_root: PathBuf::from("/proc"),
            shell: PathBuf::from("/bin/sh"),
            track_capacity: DEFAULT_TRACK_CAPACITY,
            launch_timeout: None,
        }
    }
}

impl Config {
    pub fn with_proc_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.proc_root = root.into();
        self
    }

    pub fn with_track_capacity(mut self, capacity: usize) -> Self {
        self.track_capacity = capacity;
        self
    }
}
