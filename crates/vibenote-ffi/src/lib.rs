//! UniFFI bindings for embedding the VibeNote engine in host shells.
//!
//! Exposes the editing session behind a thread-safe handle so Kotlin/Swift
//! frontends can drive every editing operation without touching Rust types
//! directly.

use std::sync::{Mutex, MutexGuard};

use vibenote_engine::{
    Attachment, DirStore, EditingSession, MarkdownStyle, MatchSpan, Patch, SearchQuery, Selection,
    TextStats,
};

uniffi::setup_scaffolding!();

// ============ Errors ============

/// Errors that can cross the FFI boundary
/// Note: Field is named `reason` not `message` to avoid conflict with Throwable.message in Kotlin
#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum FfiError {
    #[error("Storage error: {reason}")]
    StorageError { reason: String },
    #[error("Import error: {reason}")]
    ImportError { reason: String },
}

// ============ Session Handle ============

/// A handle to a live editing session.
///
/// Wraps the engine's EditingSession behind a mutex so multi-threaded host
/// runtimes serialize access; the engine itself is single-threaded in design.
#[derive(uniffi::Object)]
pub struct SessionHandle {
    inner: Mutex<EditingSession>,
}

impl SessionHandle {
    fn session(&self) -> MutexGuard<'_, EditingSession> {
        // Recover from poisoned mutex (another thread panicked while holding lock)
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[uniffi::export]
impl SessionHandle {
    /// Create a session with no persistence behind it.
    #[uniffi::constructor]
    pub fn in_memory() -> Self {
        Self {
            inner: Mutex::new(EditingSession::in_memory()),
        }
    }

    /// Create a session persisted under `storage_dir`, resuming any note
    /// already stored there.
    #[uniffi::constructor]
    pub fn open(storage_dir: String) -> Result<Self, FfiError> {
        let store = DirStore::open(storage_dir).map_err(|e| FfiError::StorageError {
            reason: e.to_string(),
        })?;
        Ok(Self {
            inner: Mutex::new(EditingSession::open(Box::new(store))),
        })
    }

    /// Current document text.
    pub fn text(&self) -> String {
        self.session().text().to_string()
    }

    /// Document version, bumped on every mutation.
    pub fn version(&self) -> u64 {
        self.session().version()
    }

    /// Word/character/reading-time statistics for the current text.
    pub fn stats(&self) -> TextStatsDto {
        TextStatsDto::from_engine(self.session().stats())
    }

    /// Replace the whole document (free typing).
    pub fn set_text(&self, text: String) -> PatchDto {
        PatchDto::from_engine(self.session().set_text(text))
    }

    /// Splice `text` in at the given selection, replacing any selected range.
    pub fn insert_at_cursor(&self, start: u64, end: u64, text: String) -> PatchDto {
        let selection = selection_from(start, end);
        PatchDto::from_engine(self.session().insert_at_cursor(selection, text))
    }

    /// Wrap the selection with an arbitrary prefix/suffix pair.
    pub fn wrap_selection(&self, start: u64, end: u64, before: String, after: String) -> PatchDto {
        let selection = selection_from(start, end);
        PatchDto::from_engine(self.session().wrap_selection(selection, before, after))
    }

    /// Wrap the selection with a toolbar style's affixes.
    pub fn apply_style(&self, start: u64, end: u64, style: StyleDto) -> PatchDto {
        let selection = selection_from(start, end);
        PatchDto::from_engine(self.session().apply_style(selection, style.to_engine()))
    }

    /// First match of the pattern, or null.
    pub fn find(
        &self,
        pattern: String,
        case_sensitive: bool,
        use_regex: bool,
    ) -> Option<MatchSpanDto> {
        let query = query_from(pattern, case_sensitive, use_regex);
        self.session().find(&query).map(MatchSpanDto::from_engine)
    }

    /// Replace every match of the pattern with `replacement`.
    pub fn replace_matches(
        &self,
        pattern: String,
        replacement: String,
        case_sensitive: bool,
        use_regex: bool,
    ) -> PatchDto {
        let query = query_from(pattern, case_sensitive, use_regex);
        PatchDto::from_engine(self.session().replace_matches(query, replacement))
    }

    /// Register an attached file and get back its markdown reference.
    pub fn attach_file(&self, filename: String, mime_type: String, data: Vec<u8>) -> AttachmentDto {
        AttachmentDto::from_engine(self.session().attach_file(&filename, &mime_type, &data))
    }

    /// Attach a file and splice its markdown reference in at the selection.
    pub fn insert_file(
        &self,
        start: u64,
        end: u64,
        filename: String,
        mime_type: String,
        data: Vec<u8>,
    ) -> PatchDto {
        let selection = selection_from(start, end);
        PatchDto::from_engine(
            self.session()
                .insert_file(selection, &filename, &mime_type, &data),
        )
    }

    /// Data URI behind an image placeholder token, if known.
    pub fn image_source(&self, token: String) -> Option<String> {
        self.session().image_source(&token).map(str::to_string)
    }

    /// Past document snapshots, oldest first.
    pub fn history_snapshots(&self) -> Vec<String> {
        self.session().history().iter().map(str::to_string).collect()
    }

    /// Restore the document to history snapshot `index` (oldest first).
    /// Null when the index is out of range.
    pub fn restore_version(&self, index: u64) -> Option<PatchDto> {
        self.session()
            .restore_version(index as usize)
            .map(PatchDto::from_engine)
    }

    /// The note's exact UTF-8 bytes, for download as `note.md`.
    pub fn export_bytes(&self) -> Vec<u8> {
        self.session().export_bytes()
    }

    /// Replace the document with an uploaded file's text.
    pub fn import_bytes(&self, data: Vec<u8>) -> Result<PatchDto, FfiError> {
        self.session()
            .import_bytes(&data)
            .map(PatchDto::from_engine)
            .map_err(|e| FfiError::ImportError {
                reason: e.to_string(),
            })
    }
}

fn selection_from(start: u64, end: u64) -> Selection {
    Selection::new(start as usize, end as usize)
}

fn query_from(pattern: String, case_sensitive: bool, use_regex: bool) -> SearchQuery {
    if use_regex {
        SearchQuery::regex(pattern, case_sensitive)
    } else {
        SearchQuery::literal(pattern, case_sensitive)
    }
}

// ============ DTOs ============

/// Selection and version to adopt after a mutation.
#[derive(uniffi::Record)]
pub struct PatchDto {
    pub selection_start: u64,
    pub selection_end: u64,
    pub version: u64,
}

impl PatchDto {
    fn from_engine(patch: Patch) -> Self {
        Self {
            selection_start: patch.new_selection.start as u64,
            selection_end: patch.new_selection.end as u64,
            version: patch.version,
        }
    }
}

/// The counter widget's three numbers.
#[derive(uniffi::Record)]
pub struct TextStatsDto {
    pub words: u64,
    pub characters: u64,
    pub reading_minutes: u64,
}

impl TextStatsDto {
    fn from_engine(stats: TextStats) -> Self {
        Self {
            words: stats.words as u64,
            characters: stats.characters as u64,
            reading_minutes: stats.reading_minutes as u64,
        }
    }
}

/// Byte span of a search match.
#[derive(uniffi::Record)]
pub struct MatchSpanDto {
    pub start: u64,
    pub end: u64,
}

impl MatchSpanDto {
    fn from_engine(span: MatchSpan) -> Self {
        Self {
            start: span.start as u64,
            end: span.end as u64,
        }
    }
}

/// An attached file's markdown reference plus where its payload lives:
/// `image_token` for images, `blob_reference` for everything else.
#[derive(uniffi::Record)]
pub struct AttachmentDto {
    pub markdown: String,
    pub image_token: Option<String>,
    pub blob_reference: Option<String>,
}

impl AttachmentDto {
    fn from_engine(attachment: Attachment) -> Self {
        match attachment {
            Attachment::Image { token, markdown } => Self {
                markdown,
                image_token: Some(token),
                blob_reference: None,
            },
            Attachment::Link { reference, markdown } => Self {
                markdown,
                image_token: None,
                blob_reference: Some(reference),
            },
        }
    }
}

/// Formatting toolbar styles.
#[derive(uniffi::Enum)]
pub enum StyleDto {
    Bold,
    Italic,
    InlineCode,
    CodeBlock,
    Link,
}

impl StyleDto {
    fn to_engine(&self) -> MarkdownStyle {
        match self {
            StyleDto::Bold => MarkdownStyle::Bold,
            StyleDto::Italic => MarkdownStyle::Italic,
            StyleDto::InlineCode => MarkdownStyle::InlineCode,
            StyleDto::CodeBlock => MarkdownStyle::CodeBlock,
            StyleDto::Link => MarkdownStyle::Link,
        }
    }
}

// ============ Standalone Functions ============

/// Statistics for arbitrary text, for hosts that only need the counter
/// widget and hold no session.
#[uniffi::export]
pub fn text_stats(text: String) -> TextStatsDto {
    TextStatsDto::from_engine(TextStats::of(&text))
}
