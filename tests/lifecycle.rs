//! Full track / observe / kill cycle against the live /proc.

use std::process::{Child, Command};
use std::thread;
use std::time::{Duration, Instant};

use procwatch::manager::operations::SignalKind;
use procwatch::manager::tracking::TrackedStatus;
use procwatch::{Config, Manager, ProcessError};

fn spawn_sleeper() -> Child {
    Command::new("sleep").arg("60").spawn().expect("spawn sleep")
}

fn wait_until_gone(manager: &Manager, pid: u32) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if manager.source().liveness(pid).is_none() {
            return true;
        }
        thread::sleep(Duration::from_millis(20));
    }
    false
}

#[test]
fn tracked_sleeper_runs_then_ends() {
    let mut manager = Manager::new(Config::default());
    let mut child = spawn_sleeper();
    let pid = child.id();

    let entry = manager.track(pid).unwrap();
    assert_eq!(entry.process_id, pid);
    assert_eq!(entry.name, "sleep");

    let first = manager.tracked();
    assert_eq!(first.len(), 1);
    assert!(matches!(first[0].status, TrackedStatus::Running(_)));
    assert!(first[0].elapsed_secs <= 1);

    thread::sleep(Duration::from_millis(1100));
    let second = manager.tracked();
    assert!(matches!(second[0].status, TrackedStatus::Running(_)));
    assert!(second[0].elapsed_secs > first[0].elapsed_secs);

    manager.terminate(pid, SignalKind::Terminate).unwrap();
    // Reap it; an unreaped child lingers as a zombie.
    child.wait().unwrap();
    assert!(wait_until_gone(&manager, pid));

    let last = manager.tracked();
    assert_eq!(last[0].status, TrackedStatus::Ended);
    assert_eq!(last[0].name, "sleep");
    assert_eq!(manager.tracker().len(), 1);
}

#[test]
fn killed_process_stops_being_live() {
    let manager = Manager::new(Config::default());
    let mut child = spawn_sleeper();
    let pid = child.id();

    assert!(manager.source().liveness(pid).is_some());
    manager.terminate(pid, SignalKind::Kill).unwrap();
    // A killed but unreaped child is a zombie, which already counts as not live.
    assert!(wait_until_gone(&manager, pid));
    child.wait().unwrap();
    assert!(matches!(manager.details(pid), Err(ProcessError::NotFound(_))));
}

#[test]
fn details_of_missing_pid_fail() {
    let manager = Manager::new(Config::default());
    assert!(matches!(
        manager.details(999_999_999),
        Err(ProcessError::NotFound(999_999_999))
    ));
    let mut manager = manager;
    assert!(manager.track(999_999_999).is_err());
    assert!(manager.tracker().is_empty());
}

#[test]
fn listing_includes_this_process() {
    let manager = Manager::new(Config::default());
    let me = std::process::id();
    let processes = manager.processes().unwrap();
    assert!(processes.iter().any(|p| p.process_id == me));
}
