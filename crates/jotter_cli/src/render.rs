//! Plain-text rendering of session views.

use jotter_core::{Clock, KeyValueStore, PreviewView, Session};
use std::io::{self, Write};

pub fn frame<S: KeyValueStore, C: Clock>(
    session: &Session<S, C>,
    out: &mut impl Write,
) -> io::Result<()> {
    writeln!(out, "== Notes ==")?;
    let items = session.list_items();
    if items.is_empty() {
        writeln!(out, "  (empty)")?;
    }
    for (index, item) in items.iter().enumerate() {
        let marker = if item.active { '>' } else { ' ' };
        writeln!(out, "{marker} {}. {}", index + 1, item.title)?;
    }

    writeln!(out)?;
    match session.preview() {
        PreviewView::Message(message) => writeln!(out, "{message}")?,
        PreviewView::Note(note) => {
            writeln!(out, "# {}", note.title)?;
            writeln!(out, "{}", note.content)?;
            writeln!(out, "[edit] [delete]")?;
        }
        PreviewView::Form(form) => {
            writeln!(out, "-- {} --", form.heading)?;
            writeln!(out, "Title:   {}", form.title)?;
            writeln!(out, "Content: {}", form.content)?;
            writeln!(out, "[{}] [cancel]", form.submit_label.to_lowercase())?;
        }
    }

    if let Some(alert) = session.alert() {
        writeln!(out)?;
        for message in alert.messages() {
            writeln!(out, "! {message}")?;
        }
    }
    Ok(())
}

pub fn help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "commands:")?;
    writeln!(out, "  list                  show the note list and preview")?;
    writeln!(out, "  add                   open an empty note form")?;
    writeln!(out, "  select <n|id>         view note n (1-based) or by id")?;
    writeln!(out, "  edit                  edit the selected note")?;
    writeln!(out, "  delete                delete the selected note")?;
    writeln!(out, "  title <text>          set the draft title")?;
    writeln!(out, "  content <text>        set the draft content (\\n for newline)")?;
    writeln!(out, "  save                  save the open form")?;
    writeln!(out, "  cancel                close the form without saving")?;
    writeln!(out, "  quit                  leave")
}
