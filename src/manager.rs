use crate::config::Config;
use crate::error::Result;
use crate::process::{ProcSource, ProcessRecord};

pub mod creation;
pub mod monitoring;
pub mod operations;
pub mod tracking;

use creation::{ExitOutcome, Launcher};
use monitoring::LoadReport;
use operations::SignalKind;
use tracking::{TrackedProcess, TrackedView, Tracker};

//Owns everything the menu acts on. One instance lives for the whole session;
//the tracking list goes away with it.
#[derive(Debug)]
pub struct Manager {
    source: ProcSource,
    launcher: Launcher,
    tracker: Tracker,
}

impl Manager {
    pub fn new(config: Config) -> Self {
        Manager {
            source: ProcSource::new(config.proc_root),
            launcher: Launcher::new(config.shell, config.launch_timeout),
            tracker: Tracker::new(config.track_capacity),
        }
    }

    pub fn source(&self) -> &ProcSource {
        &self.source
    }

    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    pub fn processes(&self) -> Result<Vec<ProcessRecord>> {
        self.source.list_processes()
    }

    pub fn details(&self, pid: u32) -> Result<ProcessRecord> {
        self.source.lookup(pid)
    }

    pub fn terminate(&self, pid: u32, kind: SignalKind) -> Result<()> {
        operations::terminate_process(pid, kind)
    }

    pub fn launch(&self, command_line: &str) -> ExitOutcome {
        self.launcher.launch(command_line)
    }

    pub fn track(&mut self, pid: u32) -> Result<&TrackedProcess> {
        self.tracker.track(&self.source, pid)
    }

    pub fn tracked(&self) -> Vec<TrackedView> {
        self.tracker.views(&self.source)
    }

    pub fn load(&self) -> LoadReport {
        monitoring::report_load(self.source.root())
    }
}
