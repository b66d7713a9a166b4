use std::io::{self, BufRead, Write};

use log::debug;

use crate::cli::display;
use crate::error::ProcessError;
use crate::manager::Manager;
use crate::manager::operations::SignalKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ListProcesses,
    Terminate,
    SystemLoad,
    Details,
    Launch,
    Track,
    ShowTracked,
    Exit,
}

impl MenuChoice {
    pub fn from_number(n: i64) -> Option<Self> {
        let choice = match n {
            1 => MenuChoice::ListProcesses,
            2 => MenuChoice::Terminate,
            3 => MenuChoice::SystemLoad,
            4 => MenuChoice::Details,
            5 => MenuChoice::Launch,
            6 => MenuChoice::Track,
            7 => MenuChoice::ShowTracked,
            8 => MenuChoice::Exit,
            _ => return None,
        };
        Some(choice)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuState {
    AwaitingChoice,
    Dispatching(MenuChoice),
    Terminal,
}

/// Parses a pid typed at a prompt. Zero and non-numbers are rejected.
pub fn parse_pid(input: &str) -> Result<u32, ProcessError> {
    match input.trim().parse::<u32>() {
        Ok(pid) if pid > 0 => Ok(pid),
        _ => Err(ProcessError::MalformedInput(input.trim().to_string())),
    }
}

/// The interactive loop. Reads one choice at a time, runs it to completion,
/// and prints the result before asking again. Errors are reported and never
/// end the session; only choice 8 or end of input does.
pub struct Menu<R, W> {
    manager: Manager,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(manager: Manager, input: R, out: W) -> Self {
        Menu {
            manager,
            input,
            out,
        }
    }

    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn run(&mut self) -> io::Result<()> {
        display::banner(&mut self.out)?;

        let mut state = MenuState::AwaitingChoice;
        loop {
            state = match state {
                MenuState::AwaitingChoice => self.await_choice()?,
                MenuState::Dispatching(MenuChoice::Exit) => MenuState::Terminal,
                MenuState::Dispatching(choice) => {
                    self.dispatch(choice)?;
                    MenuState::AwaitingChoice
                }
                MenuState::Terminal => {
                    display::error(&mut self.out, "Exiting Process Manager.")?;
                    return self.out.flush();
                }
            };
        }
    }

    fn await_choice(&mut self) -> io::Result<MenuState> {
        display::menu(&mut self.out)?;
        let Some(line) = self.read_line()? else {
            return Ok(MenuState::Terminal);
        };

        let next = match line.trim().parse::<i64>() {
            Err(_) => {
                display::error(&mut self.out, "Invalid input. Please enter a number.")?;
                MenuState::AwaitingChoice
            }
            Ok(n) => match MenuChoice::from_number(n) {
                Some(choice) => MenuState::Dispatching(choice),
                None => {
                    display::error(&mut self.out, "Invalid choice. Please try again.")?;
                    MenuState::AwaitingChoice
                }
            },
        };
        Ok(next)
    }

    fn dispatch(&mut self, choice: MenuChoice) -> io::Result<()> {
        debug!("Dispatching {:?}", choice);
        match choice {
            MenuChoice::ListProcesses => match self.manager.processes() {
                Ok(processes) => display::process_table(&mut self.out, &processes),
                Err(e) => display::error(&mut self.out, e),
            },
            MenuChoice::Terminate => self.terminate(),
            MenuChoice::SystemLoad => display::load_report(&mut self.out, &self.manager.load()),
            MenuChoice::Details => {
                let Some(pid) = self.prompt_pid("Enter PID for details: ")? else {
                    return Ok(());
                };
                match self.manager.details(pid) {
                    Ok(record) => display::process_details(&mut self.out, &record),
                    Err(e) => display::error(&mut self.out, e),
                }
            }
            MenuChoice::Launch => self.launch(),
            MenuChoice::Track => {
                let Some(pid) = self.prompt_pid("Enter PID to track: ")? else {
                    return Ok(());
                };
                match self.manager.track(pid) {
                    Ok(entry) => {
                        let message = format!("Now tracking process {} ({})", pid, entry.name);
                        display::success(&mut self.out, message)
                    }
                    Err(e) => display::error(&mut self.out, e),
                }
            }
            MenuChoice::ShowTracked => display::tracked_table(&mut self.out, &self.manager.tracked()),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn terminate(&mut self) -> io::Result<()> {
        let Some(pid) = self.prompt_pid("Enter PID to terminate: ")? else {
            return Ok(());
        };
        display::prompt(&mut self.out, "Enter signal (SIGTERM/SIGKILL): ")?;
        let Some(signal_text) = self.read_line()? else {
            return display::notice(&mut self.out, format!("No signal sent to process {}", pid));
        };
        let kind = SignalKind::parse(&signal_text);

        match self.manager.terminate(pid, kind) {
            Ok(()) => display::success(&mut self.out, format!("Sent {} to process {}", kind, pid)),
            Err(e) => display::error(&mut self.out, e),
        }
    }

    fn launch(&mut self) -> io::Result<()> {
        display::prompt(&mut self.out, "Enter command to execute: ")?;
        let command_line = self.read_line()?.unwrap_or_default();
        if command_line.trim().is_empty() {
            return display::error(&mut self.out, ProcessError::MalformedInput(command_line));
        }

        // The child writes straight to the terminal; get our prompt out first.
        self.out.flush()?;
        let outcome = self.manager.launch(&command_line);
        display::launch_outcome(&mut self.out, &outcome)
    }

    /// `Ok(None)` when the input was not a usable pid; the error is already shown.
    fn prompt_pid(&mut self, text: &str) -> io::Result<Option<u32>> {
        display::prompt(&mut self.out, text)?;
        let line = self.read_line()?.unwrap_or_default();
        match parse_pid(&line) {
            Ok(pid) => Ok(Some(pid)),
            Err(e) => {
                display::error(&mut self.out, e)?;
                Ok(None)
            }
        }
    }

    // None at end of input. Bytes that are not UTF-8 come through as
    // replacement characters and fail parsing like any other junk.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        let mut line = String::from_utf8_lossy(&raw).into_owned();
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}
