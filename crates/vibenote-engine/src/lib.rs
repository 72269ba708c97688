//! Core engine for VibeNote: text statistics, cursor-relative splice
//! operations, find/replace, bounded version history, and attachment
//! bookkeeping for a markdown note.
//!
//! UI shells stay host-side. They hold the visible text field and cursor,
//! route every mutation through [`EditingSession`], and render whatever the
//! returned [`Patch`] tells them.

pub mod editing;
pub mod metrics;
pub mod storage;

// Re-export key types for easier usage
pub use editing::{
    attachments::*, commands::*, history::*, patch::*, search::*, selection::*, session::*,
};
pub use metrics::*;
pub use storage::*;
