//! Line input from the operator's terminal.
//!
//! Reads are driven by crossterm's event stream, which carries both key
//! presses and terminal resizes. A resize ends the read early so the caller
//! can redraw; whatever was typed so far is kept and shown again with the
//! next prompt.

use std::io::{self, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use tracing::{debug, warn};

/// Width assumed when the terminal size cannot be queried.
const FALLBACK_COLUMNS: usize = 80;

/// Outcome of waiting for a line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The operator entered a line (without the newline).
    Line(String),
    /// The terminal was resized before the line was finished.
    Resize,
    /// Input is closed (Ctrl-D on an empty line, or Ctrl-C).
    Eof,
}

/// Source of operator input for the command loop.
pub trait LineInput {
    /// Show `prompt` and block until a line, a resize or end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent>;

    /// Current terminal width in characters.
    fn terminal_columns(&self) -> usize;
}

/// What a single key press does to the line being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyAction {
    Ignore,
    Echo(char),
    Erase(usize),
    Finish(InputEvent),
}

/// Line editor on the real terminal.
#[derive(Debug, Default)]
pub struct TerminalInput {
    buffer: String,
}

impl TerminalInput {
    /// Create a new TerminalInput.
    pub fn new() -> Self {
        Self::default()
    }

    /// Edit one line, pulling events from `next_event` and echoing to `out`.
    ///
    /// The prompt is written together with any text left over from a read
    /// that a resize interrupted.
    fn edit_line<E, W>(&mut self, prompt: &str, mut next_event: E, out: &mut W) -> io::Result<InputEvent>
    where
        E: FnMut() -> io::Result<Event>,
        W: Write,
    {
        write!(out, "{}{}", prompt, self.buffer)?;
        out.flush()?;

        loop {
            match next_event()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => match self.apply_key(key) {
                    KeyAction::Ignore => {}
                    KeyAction::Echo(c) => write!(out, "{}", c)?,
                    KeyAction::Erase(n) => write!(out, "{}", "\x08 \x08".repeat(n))?,
                    KeyAction::Finish(input) => {
                        write!(out, "\r\n")?;
                        out.flush()?;
                        return Ok(input);
                    }
                },
                Event::Resize(columns, rows) => {
                    debug!(columns, rows, "terminal resized");
                    return Ok(InputEvent::Resize);
                }
                _ => {}
            }
            out.flush()?;
        }
    }

    fn apply_key(&mut self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => {
                    self.buffer.clear();
                    KeyAction::Finish(InputEvent::Eof)
                }
                KeyCode::Char('d') if self.buffer.is_empty() => KeyAction::Finish(InputEvent::Eof),
                KeyCode::Char('u') => {
                    let erased = self.buffer.chars().count();
                    self.buffer.clear();
                    KeyAction::Erase(erased)
                }
                _ => KeyAction::Ignore,
            };
        }

        match key.code {
            KeyCode::Enter => KeyAction::Finish(InputEvent::Line(std::mem::take(&mut self.buffer))),
            KeyCode::Char(c) => {
                self.buffer.push(c);
                KeyAction::Echo(c)
            }
            KeyCode::Backspace => match self.buffer.pop() {
                Some(_) => KeyAction::Erase(1),
                None => KeyAction::Ignore,
            },
            _ => KeyAction::Ignore,
        }
    }
}

/// Keeps the terminal in raw mode for as long as it is alive.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            warn!(error = %e, "failed to leave raw mode");
        }
    }
}

impl LineInput for TerminalInput {
    fn read_line(&mut self, prompt: &str) -> io::Result<InputEvent> {
        let _raw = RawModeGuard::enable()?;
        self.edit_line(prompt, event::read, &mut io::stdout())
    }

    fn terminal_columns(&self) -> usize {
        match terminal::size() {
            Ok((columns, _)) => usize::from(columns),
            Err(e) => {
                warn!(error = %e, "could not query terminal size");
                FALLBACK_COLUMNS
            }
        }
    }
}
