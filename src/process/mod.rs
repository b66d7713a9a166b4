use std::path::{Path, PathBuf};

use log::debug;
use procfs::FromRead;
use procfs::process::{Process as ProcfsProcess, all_processes_with_root};

use crate::error::{ProcessError, Result};
use crate::user::User;

pub mod status;

use status::StatusFields;

/// State reported when the status block carries no `State:` line.
pub const UNKNOWN_STATE: char = '?';

// Main Process Data Structure

/// Snapshot of a single process, built per query and thrown away after display.
#[derive(Debug, Clone)]
pub struct ProcessRecord {
    pub process_id: u32,
    pub parent_id: u32,
    pub name: String,
    pub state: char,
    pub user: User,
    pub vm_size_kb: u64,
    pub vm_rss_kb: u64,
    pub threads: u32,
    /// Raw invocation, arguments joined by spaces. Empty when unreadable.
    pub command_line: String,
}

impl ProcessRecord {
    fn from_status(pid: u32, fields: StatusFields, command_line: String) -> Self {
        ProcessRecord {
            process_id: pid,
            parent_id: fields.ppid,
            name: fields.name,
            state: fields.state.unwrap_or(UNKNOWN_STATE),
            user: User::lookup(fields.uid),
            vm_size_kb: fields.vm_size_kb,
            vm_rss_kb: fields.vm_rss_kb,
            threads: fields.threads,
            command_line,
        }
    }

    /// Zombies and dead tasks still have a status file but are not running.
    pub fn is_live(&self) -> bool {
        !matches!(self.state, 'Z' | 'X')
    }
}

/// Reads process metadata from a procfs tree, `/proc` unless told otherwise.
#[derive(Debug, Clone)]
pub struct ProcSource {
    root: PathBuf,
}

impl Default for ProcSource {
    fn default() -> Self {
        ProcSource::new("/proc")
    }
}

impl ProcSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        ProcSource { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn process_dir(&self, pid: u32) -> PathBuf {
        self.root.join(pid.to_string())
    }

    /// Every numeric entry under the root, ascending.
    pub fn list_pids(&self) -> Result<Vec<u32>> {
        let mut pids: Vec<u32> = all_processes_with_root(&self.root)?
            .filter_map(|p| p.ok()) //Skip listing errors
            .filter_map(|p| u32::try_from(p.pid).ok())
            .collect();
        pids.sort_unstable();
        Ok(pids)
    }

    /// Looks up one process. Any unreadable status file counts as `NotFound`:
    /// the process is gone or hidden from us.
    pub fn lookup(&self, pid: u32) -> Result<ProcessRecord> {
        let dir = self.process_dir(pid);
        let fields = StatusFields::from_file(dir.join("status")).map_err(|e| {
            debug!("No status for PID {}: {}", pid, e);
            ProcessError::NotFound(pid)
        })?;

        let command_line = read_command_line(dir);
        Ok(ProcessRecord::from_status(pid, fields, command_line))
    }

    /// Snapshot of every process. Processes that vanish between listing and
    /// reading are skipped.
    pub fn list_processes(&self) -> Result<Vec<ProcessRecord>> {
        let records = self
            .list_pids()?
            .into_iter()
            .filter_map(|pid| match self.lookup(pid) {
                Ok(record) => Some(record),
                Err(_) => {
                    debug!("PID {} vanished before it could be read", pid);
                    None
                }
            })
            .collect();
        Ok(records)
    }

    /// Current state character if `pid` still names a running process.
    pub fn liveness(&self, pid: u32) -> Option<char> {
        self.lookup(pid)
            .ok()
            .filter(ProcessRecord::is_live)
            .map(|record| record.state)
    }
}

fn read_command_line(dir: PathBuf) -> String {
    ProcfsProcess::new_with_root(dir)
        .and_then(|p| p.cmdline())
        .map(|args| args.join(" "))
        .unwrap_or_default()
}

/// Hand-built procfs trees for tests.
#[cfg(test)]
pub(crate) mod fixtures {
    use std::fs;
    use std::path::Path;

    use tempfile::TempDir;

    pub struct FakeProc {
        pub dir: TempDir,
    }

    impl FakeProc {
        pub fn new() -> Self {
            FakeProc {
                dir: tempfile::tempdir().unwrap(),
            }
        }

        pub fn root(&self) -> &Path {
            self.dir.path()
        }

        /// Adds `<root>/<pid>/status` with the given name and state.
        pub fn add(&self, pid: u32, name: &str, state: char) {
            let status = format!(
                "Name:\t{name}\nState:\t{state} (fake)\nPid:\t{pid}\nPPid:\t1\n\
                 Uid:\t0\t0\t0\t0\nVmSize:\t    2048 kB\nVmRSS:\t     512 kB\nThreads:\t3\n"
            );
            self.add_raw(pid, &status);
        }

        pub fn add_raw(&self, pid: u32, status: &str) {
            let dir = self.root().join(pid.to_string());
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("status"), status).unwrap();
        }

        pub fn set_cmdline(&self, pid: u32, args: &[&str]) {
            let mut raw = args.join("\0");
            raw.push('\0');
            fs::write(self.root().join(pid.to_string()).join("cmdline"), raw).unwrap();
        }

        pub fn remove(&self, pid: u32) {
            fs::remove_dir_all(self.root().join(pid.to_string())).unwrap();
        }

        pub fn write(&self, file: &str, contents: &str) {
            fs::write(self.root().join(file), contents).unwrap();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::FakeProc;
    use super::*;

    #[test]
    fn lookup_reads_fake_tree() {
        let fake = FakeProc::new();
        fake.add(4242, "worker", 'S');
        fake.set_cmdline(4242, &["/usr/bin/worker", "--jobs", "4"]);

        let record = ProcSource::new(fake.root()).lookup(4242).unwrap();
        assert_eq!(record.process_id, 4242);
        assert_eq!(record.parent_id, 1);
        assert_eq!(record.name, "worker");
        assert_eq!(record.state, 'S');
        assert_eq!(record.user.name, "root");
        assert_eq!(record.vm_size_kb, 2048);
        assert_eq!(record.vm_rss_kb, 512);
        assert_eq!(record.threads, 3);
        assert_eq!(record.command_line, "/usr/bin/worker --jobs 4");
    }

    #[test]
    fn missing_cmdline_is_empty() {
        let fake = FakeProc::new();
        fake.add(7, "kworker", 'I');
        let record = ProcSource::new(fake.root()).lookup(7).unwrap();
        assert_eq!(record.command_line, "");
    }

    #[test]
    fn absent_pid_is_not_found() {
        let fake = FakeProc::new();
        let err = ProcSource::new(fake.root()).lookup(99).unwrap_err();
        assert!(matches!(err, ProcessError::NotFound(99)));
    }

    #[test]
    fn sparse_status_still_produces_record() {
        let fake = FakeProc::new();
        fake.add_raw(12, "Name:\tbare\n");
        let record = ProcSource::new(fake.root()).lookup(12).unwrap();
        assert_eq!(record.state, UNKNOWN_STATE);
        assert_eq!(record.user.name, crate::user::UNKNOWN_USER);
    }

    #[test]
    fn listing_skips_non_numeric_and_broken_entries() {
        let fake = FakeProc::new();
        fake.add(30, "c", 'R');
        fake.add(4, "a", 'S');
        std::fs::create_dir(fake.root().join("self_like")).unwrap();
        // A pid directory without a status file vanished mid-listing.
        std::fs::create_dir(fake.root().join("17")).unwrap();

        let source = ProcSource::new(fake.root());
        let names: Vec<_> = source
            .list_processes()
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn zombies_are_not_live() {
        let fake = FakeProc::new();
        fake.add(5, "defunct", 'Z');
        fake.add(6, "busy", 'R');
        let source = ProcSource::new(fake.root());
        assert_eq!(source.liveness(5), None);
        assert_eq!(source.liveness(6), Some('R'));
        assert_eq!(source.liveness(8), None);
    }

    #[test]
    fn real_proc_knows_this_process() {
        let source = ProcSource::default();
        let me = std::process::id();
        assert!(source.list_pids().unwrap().contains(&me));

        let record = source.lookup(me).unwrap();
        assert_eq!(record.process_id, me);
        assert!(!record.name.is_empty());
        assert!(record.threads >= 1);
        assert!(source.liveness(me).is_some());
    }
}
