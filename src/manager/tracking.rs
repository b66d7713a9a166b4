use std::time::Instant;

use log::info;

use crate::error::{ProcessError, Result};
use crate::process::ProcSource;

#[derive(Debug, Clone)]
pub struct TrackedProcess {
    pub process_id: u32,
    pub name: String,
    /// State when tracking began.
    pub state: char,
    started: Instant,
}

impl TrackedProcess {
    pub fn elapsed_secs_at(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.started).as_secs()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedStatus {
    Running(char),
    Ended,
}

/// One row of the tracked-process display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedView {
    pub process_id: u32,
    pub name: String,
    pub elapsed_secs: u64,
    pub status: TrackedStatus,
}

//Append-only watchlist. Running/ended is re-read from /proc on every view.
#[derive(Debug)]
pub struct Tracker {
    entries: Vec<TrackedProcess>,
    capacity: usize,
}

impl Tracker {
    pub fn new(capacity: usize) -> Self {
        Tracker {
            entries: Vec::new(),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TrackedProcess] {
        &self.entries
    }

    /// Starts tracking `pid`. Fails without changing anything when the list is
    /// full or the pid does not resolve.
    pub fn track(&mut self, source: &ProcSource, pid: u32) -> Result<&TrackedProcess> {
        if self.entries.len() >= self.capacity {
            return Err(ProcessError::CapacityExceeded(self.capacity));
        }

        let record = source.lookup(pid)?;
        info!("Now tracking process {} ({})", pid, record.name);
        self.entries.push(TrackedProcess {
            process_id: pid,
            name: record.name,
            state: record.state,
            started: Instant::now(),
        });

        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn views(&self, source: &ProcSource) -> Vec<TrackedView> {
        self.views_at(source, Instant::now())
    }

    pub fn views_at(&self, source: &ProcSource, now: Instant) -> Vec<TrackedView> {
        self.entries
            .iter()
            .map(|entry| TrackedView {
                process_id: entry.process_id,
                name: entry.name.clone(),
                elapsed_secs: entry.elapsed_secs_at(now),
                status: match source.liveness(entry.process_id) {
                    Some(state) => TrackedStatus::Running(state),
                    None => TrackedStatus::Ended,
                },
            })
            .collect()
    }
}
