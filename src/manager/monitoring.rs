use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::warn;
use procfs::{FromRead, LoadAverage};

/// Number of leading `/proc/meminfo` lines shown (MemTotal, MemFree, MemAvailable).
pub const MEMINFO_LINES: usize = 3;

/// 1, 5 and 15 minute run-queue averages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadAverages {
    pub one: f32,
    pub five: f32,
    pub fifteen: f32,
}

impl From<LoadAverage> for LoadAverages {
    fn from(load: LoadAverage) -> Self {
        LoadAverages {
            one: load.one,
            five: load.five,
            fifteen: load.fifteen,
        }
    }
}

/// Aggregate system figures. A section is `None` when its source could not be
/// read and is left out of the display.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub averages: Option<LoadAverages>,
    /// Leading meminfo lines, verbatim.
    pub memory: Option<Vec<String>>,
}

// Reads loadavg and meminfo under the given procfs root.
pub fn report_load(proc_root: &Path) -> LoadReport {
    let averages = match LoadAverage::from_file(proc_root.join("loadavg")) {
        Ok(load) => Some(load.into()),
        Err(e) => {
            warn!("Load averages unavailable: {}", e);
            None
        }
    };

    let memory = match File::open(proc_root.join("meminfo")) {
        Ok(file) => Some(
            BufReader::new(file)
                .lines()
                .map_while(|line| line.ok())
                .take(MEMINFO_LINES)
                .collect(),
        ),
        Err(e) => {
            warn!("Memory summary unavailable: {}", e);
            None
        }
    };

    LoadReport { averages, memory }
}
