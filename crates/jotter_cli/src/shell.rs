//! Line-oriented shell mapping commands onto session actions.

use crate::render;
use jotter_core::{Clock, KeyValueStore, NoteId, Session, SessionError};
use log::debug;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};
use uuid::Uuid;

/// Command that could not be applied.
#[derive(Debug)]
enum ShellError {
    /// `select` argument matched neither a list position nor a note id.
    UnknownTarget(String),
    Session(SessionError),
}

impl Display for ShellError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownTarget(target) => write!(f, "no note at `{target}`"),
            Self::Session(err) => write!(f, "{err}"),
        }
    }
}

impl From<SessionError> for ShellError {
    fn from(value: SessionError) -> Self {
        Self::Session(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    List,
    Add,
    Select(String),
    Edit,
    Delete,
    Title(String),
    Content(String),
    Save,
    Cancel,
    Help,
    Quit,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Add => "add",
            Self::Select(_) => "select",
            Self::Edit => "edit",
            Self::Delete => "delete",
            Self::Title(_) => "title",
            Self::Content(_) => "content",
            Self::Save => "save",
            Self::Cancel => "cancel",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }
}

/// Reads commands until `quit` or end of input, rendering after each one.
pub fn run<S: KeyValueStore, C: Clock>(
    session: &mut Session<S, C>,
    input: impl BufRead,
    mut output: impl Write,
) -> io::Result<()> {
    render::frame(session, &mut output)?;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(output, "? {message}")?;
                continue;
            }
        };
        debug!("event=shell_command module=cli command={}", command.name());

        match command {
            Command::Quit => break,
            Command::Help => {
                render::help(&mut output)?;
                continue;
            }
            other => {
                if let Err(err) = apply(session, other) {
                    // Validation messages are shown through the alert.
                    if !matches!(err, ShellError::Session(SessionError::Validation(_))) {
                        writeln!(output, "? {err}")?;
                    }
                }
            }
        }

        session.tick();
        writeln!(output)?;
        render::frame(session, &mut output)?;
    }
    output.flush()
}

fn apply<S: KeyValueStore, C: Clock>(
    session: &mut Session<S, C>,
    command: Command,
) -> Result<(), ShellError> {
    match command {
        Command::List | Command::Help | Command::Quit => Ok(()),
        Command::Add => {
            session.add_note();
            Ok(())
        }
        Command::Select(target) => {
            let id = resolve_target(session, &target)
                .ok_or_else(|| ShellError::UnknownTarget(target.clone()))?;
            Ok(session.select_note(id)?)
        }
        Command::Edit => Ok(session.edit_note()?),
        Command::Delete => Ok(session.delete_note().map(|_| ())?),
        Command::Title(text) => Ok(session.change_title(text)?),
        Command::Content(text) => Ok(session.change_content(text.replace("\\n", "\n"))?),
        Command::Save => Ok(session.save_note().map(|_| ())?),
        Command::Cancel => {
            session.cancel();
            Ok(())
        }
    }
}

/// Resolves a 1-based list position or a note id.
fn resolve_target<S: KeyValueStore, C: Clock>(
    session: &Session<S, C>,
    target: &str,
) -> Option<NoteId> {
    if let Ok(position) = target.parse::<usize>() {
        return position
            .checked_sub(1)
            .and_then(|index| session.notes().get(index))
            .map(|note| note.id);
    }
    Uuid::parse_str(target).ok()
}

fn parse_command(line: &str) -> Result<Command, String> {
    let trimmed = line.trim_start();
    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed.trim_end(), ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "list" | "ls" => Ok(Command::List),
        "add" | "new" => Ok(Command::Add),
        "select" | "open" => {
            let target = rest.trim();
            if target.is_empty() {
                Err("usage: select <n|id>".to_string())
            } else {
                Ok(Command::Select(target.to_string()))
            }
        }
        "edit" => Ok(Command::Edit),
        "delete" | "rm" => Ok(Command::Delete),
        "title" => Ok(Command::Title(rest.to_string())),
        "content" => Ok(Command::Content(rest.to_string())),
        "save" => Ok(Command::Save),
        "cancel" => Ok(Command::Cancel),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("unknown command `{other}`; try `help`")),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_command, run, Command};
    use jotter_core::{MemoryKeyValueStore, NotePersistence, Session};
    use std::io::Cursor;

    fn run_script(script: &str) -> (String, Session<MemoryKeyValueStore>) {
        let mut session = Session::open(NotePersistence::new(MemoryKeyValueStore::new()));
        let mut output = Vec::new();
        run(&mut session, Cursor::new(script.to_string()), &mut output).unwrap();
        (String::from_utf8(output).unwrap(), session)
    }

    #[test]
    fn parse_keeps_text_arguments_verbatim() {
        assert_eq!(
            parse_command("title  Hello world ").unwrap(),
            Command::Title(" Hello world ".to_string())
        );
        assert_eq!(parse_command("SAVE").unwrap(), Command::Save);
        assert_eq!(parse_command("title").unwrap(), Command::Title(String::new()));
        assert!(parse_command("select").is_err());
        assert!(parse_command("frobnicate").is_err());
    }

    #[test]
    fn script_creates_and_selects_note() {
        let (output, session) = run_script("add\ntitle A\ncontent x\\ny\nsave\nquit\n");
        assert_eq!(session.notes().len(), 1);
        assert_eq!(session.notes()[0].content, "x\ny");
        assert!(output.contains("There are no notes!"));
        assert!(output.contains("> 1. A"));
    }

    #[test]
    fn invalid_save_shows_alert_messages() {
        let (output, session) = run_script("add\nsave\n");
        assert!(session.notes().is_empty());
        assert!(output.contains("! Title is required."));
        assert!(output.contains("! Content is required."));
    }

    #[test]
    fn select_by_position_and_delete() {
        let script = "add\ntitle A\ncontent x\nsave\n\
                      add\ntitle B\ncontent y\nsave\n\
                      select 1\ndelete\nselect 9\n";
        let (output, session) = run_script(script);
        let titles: Vec<_> = session.notes().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["B"]);
        assert!(output.contains("Please, choose a note"));
        assert!(output.contains("? no note at `9`"));
        assert!(!output.contains("no note is selected"));
    }

    #[test]
    fn select_unknown_id_reports_missing_note() {
        let (output, _session) = run_script("select 00000000-0000-4000-8000-000000000000
");
        assert!(output.contains("? note not found: 00000000-0000-4000-8000-000000000000"));

        let (output, _session) = run_script("select first
");
        assert!(output.contains("? no note at `first`"));
    }
}
