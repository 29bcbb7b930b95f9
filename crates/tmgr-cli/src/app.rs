//! The interactive command loop.
//!
//! Every pass clears the screen, lists sessions, prints the table and any
//! pending message, then waits for one line of input and acts on it.

use std::io::Write;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Stylize;
use crossterm::terminal::{Clear, ClearType};
use tmgr_tmux::{SessionActions, SessionRecord, SessionSource, TmuxError};
use tracing::{debug, info};

use crate::config::TableConfig;
use crate::error::Result;
use crate::input::{InputEvent, LineInput};
use crate::layout;
use crate::table::{sort_sessions, TableRenderer};

/// Help information for a command.
pub struct CommandHelp {
    /// What the operator types.
    pub usage: &'static str,
    /// Brief one-line description.
    pub brief: &'static str,
}

/// Static help entries for all commands.
static COMMAND_HELP: &[CommandHelp] = &[
    CommandHelp {
        usage: "<n>",
        brief: "attach session n",
    },
    CommandHelp {
        usage: "c <name>",
        brief: "create session",
    },
    CommandHelp {
        usage: "u",
        brief: "update screen",
    },
    CommandHelp {
        usage: "q",
        brief: "quit",
    },
];

/// Commands understood at the prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Attach to the session at this index (the raw digits as typed)
    Attach(String),
    /// Quit
    Quit,
    /// Create a session with this name
    Create(String),
    /// Redraw only
    Update,
    /// Show the command summary
    Help,
    /// Anything else
    Unknown(String),
}

impl Command {
    /// Parses a line of input into a command.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        if !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) {
            Command::Attach(input.to_string())
        } else if input == "q" {
            Command::Quit
        } else if input.starts_with('c') {
            // "c name": the name starts after the command letter and separator
            Command::Create(input.chars().skip(2).collect())
        } else if input == "u" {
            Command::Update
        } else if input == "?" {
            Command::Help
        } else {
            Command::Unknown(input.to_string())
        }
    }
}

/// A message shown once, under the table, on the next redraw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Something the operator asked for could not be done.
    Error(String),
    /// Informational text.
    Info(String),
}

/// State that survives between loop iterations.
#[derive(Debug, Default)]
pub struct UiState {
    pending: Option<Notice>,
}

impl UiState {
    /// Queue an error for the next redraw.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.pending = Some(Notice::Error(message.into()));
    }

    /// Queue an informational message for the next redraw.
    pub fn set_info(&mut self, message: impl Into<String>) {
        self.pending = Some(Notice::Info(message.into()));
    }

    /// Take the pending message, leaving none behind.
    pub fn take(&mut self) -> Option<Notice> {
        self.pending.take()
    }
}

/// Where the loop is between steps.
#[derive(Debug, Clone, PartialEq)]
enum LoopState {
    Idle,
    Rendering,
    AwaitingInput,
    Dispatching(String),
    Quit,
}

/// Prompt shown under the table.
pub fn prompt(session_count: usize) -> String {
    if session_count == 0 {
        "Attach [cqu?]: ".to_string()
    } else {
        format!("Attach [cqu? 0-{}]: ", session_count - 1)
    }
}

fn help_text() -> String {
    COMMAND_HELP
        .iter()
        .map(|h| format!("{}: {}", h.usage, h.brief))
        .collect::<Vec<_>>()
        .join("  ")
}

/// The interactive session manager loop.
pub struct CommandLoop<'a, S, A, I, W> {
    source: &'a S,
    actions: &'a A,
    input: I,
    out: W,
    config: TableConfig,
    renderer: TableRenderer,
    ui: UiState,
    /// Sessions in the order shown by the last redraw.
    sessions: Vec<SessionRecord>,
}

impl<'a, S, A, I, W> CommandLoop<'a, S, A, I, W>
where
    S: SessionSource,
    A: SessionActions,
    I: LineInput,
    W: Write,
{
    /// Creates a new command loop.
    pub fn new(config: TableConfig, source: &'a S, actions: &'a A, input: I, out: W) -> Self {
        Self {
            source,
            actions,
            input,
            out,
            config,
            renderer: TableRenderer::new(config),
            ui: UiState::default(),
            sessions: Vec::new(),
        }
    }

    /// Runs until the operator quits or a fatal error occurs.
    pub fn run(&mut self) -> Result<()> {
        let mut state = LoopState::Idle;

        loop {
            state = match state {
                LoopState::Idle | LoopState::Rendering => {
                    self.redraw()?;
                    LoopState::AwaitingInput
                }
                LoopState::AwaitingInput => match self.input.read_line(&prompt(self.sessions.len()))? {
                    InputEvent::Line(line) => LoopState::Dispatching(line),
                    InputEvent::Resize => LoopState::Rendering,
                    InputEvent::Eof => LoopState::Quit,
                },
                LoopState::Dispatching(line) => self.dispatch(&line)?,
                LoopState::Quit => {
                    debug!("leaving command loop");
                    return Ok(());
                }
            };
        }
    }

    /// Consume the loop, returning its output sink.
    pub fn into_output(self) -> W {
        self.out
    }

    /// Clear the screen and draw the table and pending message.
    fn redraw(&mut self) -> Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;

        let mut sessions = self.source.list_sessions()?;
        sort_sessions(&mut sessions);

        if !sessions.is_empty() {
            let plan = layout::compute(self.input.terminal_columns(), &self.config);
            for line in self.renderer.render(&plan, &sessions)? {
                writeln!(self.out, "{}", line)?;
            }
        }
        self.sessions = sessions;

        match self.ui.take() {
            Some(Notice::Error(message)) => writeln!(self.out, "{} {}", "Error:".red(), message)?,
            Some(Notice::Info(message)) => writeln!(self.out, "{}", message)?,
            None => writeln!(self.out)?,
        }

        self.out.flush()?;
        Ok(())
    }

    fn dispatch(&mut self, line: &str) -> Result<LoopState> {
        let command = Command::parse(line);
        debug!(?command, "dispatching command");

        match command {
            Command::Attach(digits) => {
                let target = digits.parse::<usize>().ok().and_then(|i| self.sessions.get(i));
                match target {
                    Some(session) => {
                        info!(id = %session.id, name = %session.name, "attaching");
                        self.actions.attach(&session.id)?;
                    }
                    None => self.ui.set_error("Invalid index"),
                }
            }
            Command::Quit => return Ok(LoopState::Quit),
            Command::Create(name) => match self.actions.create_session(&name) {
                Ok(()) => info!(name = %name, "created session"),
                Err(TmuxError::InvalidSessionName(reason)) => {
                    debug!(name = %name, reason = %reason, "tmux rejected session name");
                    self.ui.set_error("Invalid tmux session name");
                }
                Err(e) => return Err(e.into()),
            },
            Command::Update => {}
            Command::Help => self.ui.set_info(help_text()),
            Command::Unknown(input) => {
                self.ui.set_error(format!("command \"{}\" not recognized", input));
            }
        }

        Ok(LoopState::Rendering)
    }
}
