use std::io::Read;

use procfs::{FromRead, ProcError};

//Fields read from /proc/<pid>/status. Unknown keys are skipped and a
//missing or garbled value leaves its field at the default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusFields {
    pub name: String,
    pub state: Option<char>,
    pub pid: u32,
    pub ppid: u32,
    /// Real uid (first column of the `Uid:` line).
    pub uid: Option<u32>,
    pub vm_size_kb: u64,
    pub vm_rss_kb: u64,
    pub threads: u32,
}

impl StatusFields {
    pub fn parse(text: &str) -> Self {
        let mut fields = StatusFields::default();
        for line in text.lines() {
            fields.apply_line(line);
        }
        fields
    }

    fn apply_line(&mut self, line: &str) {
        let Some((key, value)) = line.split_once(':') else {
            return;
        };
        let value = value.trim();

        match key {
            "Name" => self.name = value.to_string(),
            "State" => self.state = value.chars().next(),
            "Pid" => self.pid = first_number(value).unwrap_or(0),
            "PPid" => self.ppid = first_number(value).unwrap_or(0),
            "Uid" => self.uid = first_number(value),
            "VmSize" => self.vm_size_kb = first_number(value).unwrap_or(0),
            "VmRSS" => self.vm_rss_kb = first_number(value).unwrap_or(0),
            "Threads" => self.threads = first_number(value).unwrap_or(0),
            _ => {}
        }
    }
}

// "1000\t1000\t1000\t1000" -> 1000, "  2048 kB" -> 2048
fn first_number<T: std::str::FromStr>(value: &str) -> Option<T> {
    value.split_whitespace().next()?.parse().ok()
}

impl FromRead for StatusFields {
    fn from_read<R: Read>(mut r: R) -> Result<Self, ProcError> {
        let mut raw = Vec::new();
        r.read_to_end(&mut raw)?;
        // Process names are arbitrary bytes; never fail on them.
        Ok(StatusFields::parse(&String::from_utf8_lossy(&raw)))
    }
}
