//! External editor integration for stash.
//!
//! A file round-trip contract: write the current value to a temp file,
//! hand the path to the user's editor, re-read the file, and persist
//! only when the content actually changed.

use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;

use tempfile::Builder;

use crate::error::{StashError, StashResult};
use crate::models::Attr;
use crate::store::Store;

const DEFAULT_EDITOR: &str = "vi";
const SENSIBLE_EDITOR: &str = "/usr/bin/sensible-editor";

/// Pick the editor program: explicit override first, then $EDITOR,
/// then sensible-editor where present, then vi.
fn editor_program(editor_override: Option<&str>) -> String {
    if let Some(editor) = editor_override {
        return editor.to_string();
    }
    if let Ok(editor) = env::var("EDITOR") {
        if !editor.is_empty() {
            return editor;
        }
    }
    if Path::new(SENSIBLE_EDITOR).exists() {
        SENSIBLE_EDITOR.to_string()
    } else {
        DEFAULT_EDITOR.to_string()
    }
}

/// Run the editor on the given path, blocking until it exits.
pub fn open_editor(path: &Path, editor_override: Option<&str>) -> StashResult<()> {
    let program = editor_program(editor_override);
    let status = Command::new(&program)
        .arg(path)
        .status()
        .map_err(|e| StashError::Editor(format!("failed to launch {}: {}", program, e)))?;

    if !status.success() {
        return Err(StashError::Editor(format!(
            "{} exited with {}, file not saved",
            program, status
        )));
    }
    Ok(())
}

/// Edit a record's value in the external editor.
///
/// Returns the number of rows updated: 1 when the edited content
/// differs from the original, 0 when the editor left it unchanged.
pub fn edit_value(
    store: &Store,
    attr: &Attr,
    editor_override: Option<&str>,
) -> StashResult<usize> {
    let current = attr.display_value();

    let file = Builder::new().prefix("stash-edit-").tempfile()?;
    fs::write(file.path(), &current)?;

    open_editor(file.path(), editor_override)?;

    let edited = fs::read_to_string(file.path())?;
    if edited == current {
        return Ok(0);
    }

    let updated = store.update_value(attr.id, &edited)?;
    tracing::info!(id = attr.id, "value updated from editor");
    Ok(updated)
}
