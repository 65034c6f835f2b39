//! Menu-driven shell over the note service.
//!
//! # Responsibility
//! - Render the menu, read raw lines, and forward them to `NoteService`.
//! - Format listings and single-note bodies.
//!
//! # Invariants
//! - Invalid menu choices are reported and the menu is shown again.
//! - Unknown or unparsable ids are reported as not found; they never abort
//!   the session.
//! - Store failures abort the session and surface to the caller.
//! - End of input ends the session like choosing `Exit`.

use log::info;
use notekeep_core::{parse_note_id, Clock, NoteId, NoteRepository, NoteService, NoteServiceError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};

const SEPARATOR_WIDTH: usize = 30;
const BACK_TO_MENU: &str = "0";

#[derive(Debug)]
pub enum ShellError {
    /// Console read/write failure.
    Io(io::Error),
    /// Note store failure other than not-found.
    Service(NoteServiceError),
}

impl Display for ShellError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "console I/O failed: {err}"),
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ShellError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Service(err) => Some(err),
        }
    }
}

impl From<io::Error> for ShellError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<NoteServiceError> for ShellError {
    fn from(value: NoteServiceError) -> Self {
        Self::Service(value)
    }
}

pub type ShellResult<T> = Result<T, ShellError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Create,
    Read,
    Edit,
    Delete,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Create),
            "2" => Some(Self::Read),
            "3" => Some(Self::Edit),
            "4" => Some(Self::Delete),
            "5" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Whether the session keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Shell<N: NoteRepository, C: Clock, R: BufRead, W: Write> {
    service: NoteService<N, C>,
    input: R,
    output: W,
}

impl<N: NoteRepository, C: Clock, R: BufRead, W: Write> Shell<N, C, R, W> {
    pub fn new(service: NoteService<N, C>, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    #[cfg(test)]
    fn into_parts(self) -> (NoteService<N, C>, W) {
        (self.service, self.output)
    }

    /// Runs the menu loop until `Exit` or end of input.
    pub fn run(&mut self) -> ShellResult<()> {
        info!("event=session_start module=cli status=ok");
        loop {
            self.print_menu()?;
            let Some(raw) = self.prompt("Enter your choice: ")? else {
                break;
            };

            let flow = match MenuChoice::parse(&raw) {
                Some(MenuChoice::Create) => self.create_note()?,
                Some(MenuChoice::Read) => self.read_notes()?,
                Some(MenuChoice::Edit) => self.edit_note()?,
                Some(MenuChoice::Delete) => self.delete_note()?,
                Some(MenuChoice::Exit) => Flow::Quit,
                None => {
                    writeln!(self.output, "Invalid choice. Please try again.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
        }
        info!("event=session_end module=cli status=ok");
        Ok(())
    }

    fn print_menu(&mut self) -> ShellResult<()> {
        writeln!(self.output, "1. Create note")?;
        writeln!(self.output, "2. Read notes")?;
        writeln!(self.output, "3. Edit note")?;
        writeln!(self.output, "4. Delete note")?;
        writeln!(self.output, "5. Exit")?;
        Ok(())
    }

    fn create_note(&mut self) -> ShellResult<Flow> {
        let Some(title) = self.prompt("Enter note title: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(body) = self.prompt("Enter note text: ")? else {
            return Ok(Flow::Quit);
        };
        self.service.create(title, body)?;
        Ok(Flow::Continue)
    }

    fn read_notes(&mut self) -> ShellResult<Flow> {
        for note in self.service.list_sorted()? {
            writeln!(self.output, "ID: {}", note.id)?;
            writeln!(self.output, "Title: {}", note.title)?;
            writeln!(self.output, "Time: {}", note.timestamp)?;
            writeln!(self.output, "{}", "=".repeat(SEPARATOR_WIDTH))?;
        }

        let Some(raw_id) = self.prompt("Enter note ID to view its text (or '0' to go back): ")?
        else {
            return Ok(Flow::Quit);
        };
        if raw_id.trim() == BACK_TO_MENU {
            return Ok(Flow::Continue);
        }

        let note = match read_note_id(&raw_id) {
            Some(id) => self.service.find(id)?,
            None => None,
        };
        match note {
            Some(note) => writeln!(self.output, "Text: {}", note.body)?,
            None => writeln!(self.output, "Note not found.")?,
        }
        Ok(Flow::Continue)
    }

    fn edit_note(&mut self) -> ShellResult<Flow> {
        let Some(raw_id) = self.prompt("Enter the ID of the note to edit: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(title) = self.prompt("Enter new title: ")? else {
            return Ok(Flow::Quit);
        };
        let Some(body) = self.prompt("Enter new text: ")? else {
            return Ok(Flow::Quit);
        };

        let edited = match read_note_id(&raw_id) {
            Some(id) => match self.service.edit(id, title, body) {
                Ok(_) => true,
                Err(NoteServiceError::NoteNotFound(_)) => false,
                Err(err) => return Err(err.into()),
            },
            None => false,
        };
        if edited {
            writeln!(self.output, "Note edited successfully.")?;
        } else {
            writeln!(self.output, "Note not found.")?;
        }
        Ok(Flow::Continue)
    }

    fn delete_note(&mut self) -> ShellResult<Flow> {
        let Some(raw_id) = self.prompt("Enter the ID of the note to delete: ")? else {
            return Ok(Flow::Quit);
        };
        // The nil id never survives a load, so an unparsable id still rewrites
        // the store unchanged.
        let id = read_note_id(&raw_id).unwrap_or_else(NoteId::nil);
        self.service.delete(id)?;
        writeln!(self.output, "Note deleted successfully.")?;
        Ok(Flow::Continue)
    }

    /// Prints `label` and reads one line without its terminator.
    ///
    /// Returns `None` at end of input.
    fn prompt(&mut self, label: &str) -> ShellResult<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

/// Ids are matched in their stored text form; anything else is unknown.
fn read_note_id(raw: &str) -> Option<NoteId> {
    parse_note_id(raw.trim()).ok()
}
