use crate::editing::selection::Selection;

/// What applying a command hands back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Patch {
    /// Where the cursor should land after the edit.
    pub new_selection: Selection,
    /// Document version after the edit, for change detection.
    pub version: u64,
}
