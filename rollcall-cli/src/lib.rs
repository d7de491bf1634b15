//! Line-oriented host for the people picker.
//!
//! Stands in for a token control: each stdin line becomes a picker event.

use anyhow::{bail, Context, Result};
use rollcall_picker::{InMemoryDirectory, PickerHandle, PickerSnapshot, TextChangeReason};
use rollcall_types::{Person, PersonId};
use std::fmt::Write as _;
use std::path::Path;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// The user typed this text into the query box.
    Type(String),
    /// Commit the suggested person with this id as a token.
    Pick(PersonId),
    /// Delete the picked person with this id.
    Unpick(PersonId),
    /// Clear the query box from code.
    Clear,
    /// Exit.
    Quit,
}

/// Parses a stdin line.
///
/// Lines starting with `:` are commands (`:pick <id>`, `:unpick <id>`,
/// `:clear`, `:quit`). A leading `\` types the rest of the line verbatim, so
/// `\:x` queries for ":x". Anything else is typed text, including an empty
/// line.
pub fn parse_input(line: &str) -> Result<Input> {
    let line = line.trim_end_matches(['\r', '\n']);
    if let Some(text) = line.strip_prefix('\\') {
        return Ok(Input::Type(text.to_string()));
    }
    let Some(command) = line.strip_prefix(':') else {
        return Ok(Input::Type(line.to_string()));
    };

    let (name, arg) = command.split_once(' ').unwrap_or((command, ""));
    let input = match name {
        "pick" | "p" => Input::Pick(PersonId::parse(arg).context("missing id after ':pick'")?),
        "unpick" | "u" => {
            Input::Unpick(PersonId::parse(arg).context("missing id after ':unpick'")?)
        }
        "clear" => Input::Clear,
        "quit" | "q" => Input::Quit,
        other => bail!("unknown command ':{}'", other),
    };
    Ok(input)
}

/// Loads a JSON array of people into an in-memory directory.
pub fn load_directory(path: &Path, page_size: usize) -> Result<InMemoryDirectory> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read directory file {}", path.display()))?;
    let directory = InMemoryDirectory::from_json(&json)
        .with_context(|| format!("Failed to parse directory file {}", path.display()))?;
    Ok(directory.with_page_size(page_size))
}

/// Forwards one input to the picker. Returns false when the host should exit.
pub async fn apply_input(picker: &PickerHandle, input: Input) -> Result<bool> {
    match input {
        Input::Type(text) => {
            picker
                .query_text_changed(text, TextChangeReason::UserInput)
                .await?
        }
        Input::Pick(id) => match find(&picker.suggested_people(), &id) {
            Some(person) => {
                picker.token_item_added(person).await?;
                // A token control empties its query box after a commit.
                picker
                    .query_text_changed("", TextChangeReason::ProgrammaticChange)
                    .await?;
            }
            None => tracing::warn!("{} is not among the current suggestions", id),
        },
        Input::Unpick(id) => match find(&picker.picked_people(), &id) {
            Some(person) => picker.token_item_removed(person).await?,
            None => tracing::warn!("{} is not picked", id),
        },
        Input::Clear => {
            picker
                .query_text_changed("", TextChangeReason::ProgrammaticChange)
                .await?
        }
        Input::Quit => return Ok(false),
    }
    Ok(true)
}

fn find(people: &[Person], id: &PersonId) -> Option<Person> {
    people.iter().find(|p| &p.id == id).cloned()
}

/// Renders a snapshot as plain text.
pub fn render(snapshot: &PickerSnapshot) -> String {
    let mut out = String::new();
    let status = if snapshot.searching { " (searching)" } else { "" };
    let _ = writeln!(out, "suggestions{status}:");
    if snapshot.suggested_people.is_empty() {
        out.push_str("  (none)\n");
    }
    for person in &snapshot.suggested_people {
        let _ = write!(out, "  [{}] {}", person.id, person.display_name);
        if let Some(email) = &person.email {
            let _ = write!(out, " <{email}>");
        }
        out.push('\n');
    }
    let picked: Vec<&str> = snapshot
        .picked_people
        .iter()
        .map(|p| p.display_name.as_str())
        .collect();
    let _ = writeln!(out, "picked: [{}]", picked.join(", "));
    out
}
