/// An editor-level action triggered from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorAction {
    /// Restore the previous history snapshot.
    Undo,
    /// Reapply the most recently undone snapshot.
    Redo,
    /// Delete the current selection.
    DeleteSelection,
    /// Clear the current selection.
    ClearSelection,
}

/// A key press with its modifier state, as reported by the host shell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyChord<'a> {
    /// Key name: a character key ("z") or a named key ("Delete",
    /// "Backspace", "Escape").
    pub key: &'a str,
    /// Control modifier held.
    pub ctrl: bool,
    /// Command modifier held (macOS).
    pub meta: bool,
    /// Shift modifier held.
    pub shift: bool,
}

/// Map a key chord to an editor action.
///
/// All bindings are suppressed while a text-input field has focus, so typing
/// never triggers destructive edits.
pub fn action_for_key(chord: KeyChord<'_>, text_input_focused: bool) -> Option<EditorAction> {
    if text_input_focused {
        return None;
    }

    let primary = chord.ctrl || chord.meta;
    match chord.key {
        "z" | "Z" if primary && chord.shift => Some(EditorAction::Redo),
        "z" | "Z" if primary => Some(EditorAction::Undo),
        "Delete" | "Backspace" => Some(EditorAction::DeleteSelection),
        "Escape" => Some(EditorAction::ClearSelection),
        _ => None,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/input.rs"]
mod tests;
