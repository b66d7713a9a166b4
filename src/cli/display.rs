use std::io::{self, Write};

use colored::Colorize;

use crate::manager::creation::ExitOutcome;
use crate::manager::monitoring::LoadReport;
use crate::manager::tracking::{TrackedStatus, TrackedView};
use crate::process::ProcessRecord;

const RULE: &str = "----------------------------------------";

pub fn banner<W: Write>(out: &mut W) -> io::Result<()> {
    let text = "\
╔═══════════════════════════════════════════╗
║          procwatch process manager        ║
╠═══════════════════════════════════════════╣
║    System Monitoring & Control Center     ║
╚═══════════════════════════════════════════╝";
    writeln!(out, "{}", text.cyan())
}

pub fn menu<W: Write>(out: &mut W) -> io::Result<()> {
    let items = [
        "List Active Processes",
        "Terminate Process",
        "Monitor System Load",
        "Get Process Details",
        "Start New Process",
        "Track New Process",
        "Show Tracked Processes",
    ];

    writeln!(out)?;
    writeln!(out, "{}", "╔═══════════════════════════════════════════╗".blue())?;
    writeln!(out, "{}", "║               MENU OPTIONS                ║".blue())?;
    writeln!(out, "{}", "╠═══════════════════════════════════════════╣".blue())?;
    for (i, item) in items.iter().enumerate() {
        writeln!(out, "{} {:<38}{}", format!("║ {}.", i + 1).blue(), item.cyan(), "║".blue())?;
    }
    writeln!(out, "{} {:<38}{}", "║ 8.".blue(), "Exit".red(), "║".blue())?;
    writeln!(out, "{}", "╚═══════════════════════════════════════════╝".blue())?;
    prompt(out, "Enter your choice: ")
}

pub fn prompt<W: Write>(out: &mut W, text: &str) -> io::Result<()> {
    write!(out, "{}", text.green())?;
    out.flush()
}

pub fn error<W: Write>(out: &mut W, message: impl std::fmt::Display) -> io::Result<()> {
    writeln!(out, "{}", message.to_string().red())
}

pub fn success<W: Write>(out: &mut W, message: impl std::fmt::Display) -> io::Result<()> {
    writeln!(out, "{}", message.to_string().green())
}

pub fn notice<W: Write>(out: &mut W, message: impl std::fmt::Display) -> io::Result<()> {
    writeln!(out, "{}", message.to_string().yellow())
}

pub fn process_table<W: Write>(out: &mut W, processes: &[ProcessRecord]) -> io::Result<()> {
    writeln!(out, "\n{}", "ACTIVE PROCESSES:".green())?;
    writeln!(out, "{:<8} {:<15} {:<12} {:<8}", "PID", "USER", "STATE", "COMMAND")?;
    writeln!(out, "{}", RULE)?;
    for p in processes {
        writeln!(
            out,
            "{:<8} {:<15} {:<12} {:<8}",
            p.process_id, p.user.name, p.state, p.name
        )?;
    }
    writeln!(out, "{} processes", processes.len())
}

pub fn process_details<W: Write>(out: &mut W, p: &ProcessRecord) -> io::Result<()> {
    writeln!(out, "\n{}", format!("Process Details for PID {}:", p.process_id).yellow())?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Name:    {}", p.name)?;
    writeln!(out, "State:   {}", p.state)?;
    writeln!(out, "Pid:     {}", p.process_id)?;
    writeln!(out, "PPid:    {}", p.parent_id)?;
    writeln!(out, "User:    {}", p.user.name)?;
    writeln!(out, "VmSize:  {} kB", p.vm_size_kb)?;
    writeln!(out, "VmRSS:   {} kB", p.vm_rss_kb)?;
    writeln!(out, "Threads: {}", p.threads)?;
    if !p.command_line.is_empty() {
        writeln!(out, "Command: {}", p.command_line)?;
    }
    Ok(())
}

pub fn load_report<W: Write>(out: &mut W, report: &LoadReport) -> io::Result<()> {
    writeln!(out, "\n{}", "SYSTEM LOAD ANALYSIS:".magenta())?;
    if let Some(load) = &report.averages {
        writeln!(
            out,
            "Load Averages: {:.2} (1m), {:.2} (5m), {:.2} (15m)",
            load.one, load.five, load.fifteen
        )?;
    }
    if let Some(lines) = &report.memory {
        writeln!(out, "\nMemory Information:")?;
        for line in lines {
            writeln!(out, "{}", line)?;
        }
    }
    Ok(())
}

pub fn launch_outcome<W: Write>(out: &mut W, outcome: &ExitOutcome) -> io::Result<()> {
    match outcome {
        ExitOutcome::Completed(_) => success(out, outcome),
        _ => error(out, outcome),
    }
}

pub fn tracked_table<W: Write>(out: &mut W, views: &[TrackedView]) -> io::Result<()> {
    if views.is_empty() {
        return notice(out, "No processes being tracked");
    }

    writeln!(out, "\n{}", "TRACKED PROCESSES:".green())?;
    writeln!(out, "{:<8} {:<15} {:<10} {:<15}", "PID", "NAME", "STATE", "RUNTIME(s)")?;
    writeln!(out, "------------------------------------------------")?;
    for view in views {
        match view.status {
            TrackedStatus::Running(state) => writeln!(
                out,
                "{:<8} {:<15} {:<10} {:<15}",
                view.process_id, view.name, state, view.elapsed_secs
            )?,
            TrackedStatus::Ended => writeln!(
                out,
                "{:<8} {:<15} {:<10} {:<15}",
                view.process_id, view.name, "ENDED", "-"
            )?,
        }
    }
    Ok(())
}
