//! The live editing session: document state, history, attachments, and
//! persistence wiring.

use thiserror::Error;

use crate::editing::attachments::{Attachment, AttachmentStore};
use crate::editing::commands::{Cmd, MarkdownStyle, compile_command};
use crate::editing::history::HistoryLog;
use crate::editing::patch::Patch;
use crate::editing::search::{self, MatchSpan, SearchQuery};
use crate::editing::selection::Selection;
use crate::metrics::TextStats;
use crate::storage::{DOCUMENT_KEY, HISTORY_KEY, KeyValueStore, MemoryStore};

/// File name hosts should offer when downloading the note.
pub const EXPORT_FILE_NAME: &str = "note.md";
/// MIME type of the exported note.
pub const EXPORT_MIME_TYPE: &str = "text/markdown";

/// Document seeded into a session whose store holds no note yet.
pub const WELCOME_NOTE: &str = r#"# Welcome to VibeNote

## A magical markdown editor

Start typing your notes here...

### Features:
- **Real-time preview** as you type
- *Word count* and character count
- Code syntax highlighting
- GitHub Flavored Markdown support

```javascript
// Example code block
function hello() {
  console.log("Hello, world!");
}
```

> Inspiration is the key to creativity
"#;

/// Error from [`EditingSession::import_bytes`].
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Imported file is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

/// A live editing session over one markdown note.
///
/// Owns the document text, the bounded [`HistoryLog`], and the
/// [`AttachmentStore`], and writes text plus history through the store after
/// every mutation. All text mutations flow through [`EditingSession::apply`];
/// reads never mutate.
pub struct EditingSession {
    document: String,
    /// Last selection handed to the host. A convenience only; the host owns
    /// the real cursor and passes it into each splice.
    selection: Selection,
    version: u64,
    history: HistoryLog,
    attachments: AttachmentStore,
    store: Box<dyn KeyValueStore>,
}

impl EditingSession {
    /// Open a session over `store`, resuming the persisted document and
    /// history when present and seeding [`WELCOME_NOTE`] otherwise.
    /// Unreadable persisted state is logged and discarded, never surfaced.
    pub fn open(store: Box<dyn KeyValueStore>) -> Self {
        let document = match store.get(DOCUMENT_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => WELCOME_NOTE.to_string(),
            Err(e) => {
                log::warn!("Failed to read persisted document: {e}");
                WELCOME_NOTE.to_string()
            }
        };
        let history = match store.get(HISTORY_KEY) {
            Ok(Some(json)) => HistoryLog::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Discarding unreadable history: {e}");
                HistoryLog::new()
            }),
            Ok(None) => HistoryLog::new(),
            Err(e) => {
                log::warn!("Failed to read persisted history: {e}");
                HistoryLog::new()
            }
        };
        Self::assemble(document, history, store)
    }

    /// Session with no persistence behind it.
    pub fn in_memory() -> Self {
        Self::open(Box::new(MemoryStore::new()))
    }

    /// Session seeded with `text` instead of persisted or welcome content.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::assemble(text.into(), HistoryLog::new(), Box::new(MemoryStore::new()))
    }

    fn assemble(document: String, history: HistoryLog, store: Box<dyn KeyValueStore>) -> Self {
        let mut session = Self {
            selection: Selection::caret(document.len()),
            document,
            version: 0,
            history,
            attachments: AttachmentStore::new(),
            store,
        };
        // The opening text is restorable even before the first edit.
        session.history.push(&session.document);
        session
    }

    /// Current document text.
    pub fn text(&self) -> &str {
        &self.document
    }

    /// Last selection returned to the host.
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Record the host's cursor, clamped into the document.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection.clamp_to(&self.document);
    }

    /// Document version, bumped once per applied command or restore.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn attachments(&self) -> &AttachmentStore {
        &self.attachments
    }

    /// Live statistics for the current text.
    pub fn stats(&self) -> TextStats {
        TextStats::of(&self.document)
    }

    /// Apply an edit command: splice, append the result to history if it
    /// differs from the newest entry, persist, and return the selection and
    /// version the host should adopt.
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        let (new_text, new_selection) = compile_command(&self.document, &cmd);
        self.document = new_text;
        self.selection = new_selection;
        self.version += 1;
        self.history.push(&self.document);
        self.persist();
        Patch {
            new_selection,
            version: self.version,
        }
    }

    /// Replace the whole document (free typing).
    pub fn set_text(&mut self, text: impl Into<String>) -> Patch {
        self.apply(Cmd::SetText { text: text.into() })
    }

    /// Splice `text` in at `selection`, replacing any selected range.
    pub fn insert_at_cursor(&mut self, selection: Selection, text: impl Into<String>) -> Patch {
        self.apply(Cmd::InsertAtCursor {
            selection,
            text: text.into(),
        })
    }

    /// Wrap `selection` with a prefix/suffix pair.
    pub fn wrap_selection(
        &mut self,
        selection: Selection,
        before: impl Into<String>,
        after: impl Into<String>,
    ) -> Patch {
        self.apply(Cmd::WrapSelection {
            selection,
            before: before.into(),
            after: after.into(),
        })
    }

    /// Wrap `selection` with a toolbar style's affixes.
    pub fn apply_style(&mut self, selection: Selection, style: MarkdownStyle) -> Patch {
        self.apply(style.to_cmd(selection))
    }

    /// Replace every match of `query` with `replacement`.
    pub fn replace_matches(
        &mut self,
        query: SearchQuery,
        replacement: impl Into<String>,
    ) -> Patch {
        self.apply(Cmd::ReplaceMatches {
            query,
            replacement: replacement.into(),
        })
    }

    /// First match of `query`, or `None`. Never mutates the document.
    pub fn find(&self, query: &SearchQuery) -> Option<MatchSpan> {
        search::find(&self.document, query)
    }

    /// Restore the document to history snapshot `index` (oldest first).
    ///
    /// Restoring is not itself logged; the log grows again only once the
    /// restored text diverges through a later edit. An out-of-range index is
    /// a no-op returning `None`.
    pub fn restore_version(&mut self, index: usize) -> Option<Patch> {
        let snapshot = self.history.get(index)?.to_string();
        self.document = snapshot;
        self.selection = Selection::caret(self.document.len());
        self.version += 1;
        self.persist();
        Some(Patch {
            new_selection: self.selection,
            version: self.version,
        })
    }

    /// Register an attached file and get back the markdown reference for it.
    ///
    /// Images land in the image map under an `uploaded-image-N` token; other
    /// files get a transient `blob:` reference that dies with the session.
    pub fn attach_file(&mut self, filename: &str, mime_type: &str, bytes: &[u8]) -> Attachment {
        self.attachments.attach(filename, mime_type, bytes)
    }

    /// Attach a file and splice its markdown reference in at `selection`.
    ///
    /// The splice targets the document as it is now, not as it was when the
    /// host started reading the file: last caret wins.
    pub fn insert_file(
        &mut self,
        selection: Selection,
        filename: &str,
        mime_type: &str,
        bytes: &[u8],
    ) -> Patch {
        let attachment = self.attach_file(filename, mime_type, bytes);
        let text = attachment.markdown().to_string();
        self.apply(Cmd::InsertAtCursor { selection, text })
    }

    /// Data URI behind an image placeholder token, if the token is known.
    pub fn image_source(&self, token: &str) -> Option<&str> {
        self.attachments.image_source(token)
    }

    /// The note's exact UTF-8 bytes, for download as [`EXPORT_FILE_NAME`].
    pub fn export_bytes(&self) -> Vec<u8> {
        self.document.clone().into_bytes()
    }

    /// Replace the document with an uploaded file's text. Bytes that aren't
    /// valid UTF-8 are the one import error surfaced to the caller.
    pub fn import_bytes(&mut self, bytes: &[u8]) -> Result<Patch, ImportError> {
        let text = std::str::from_utf8(bytes)?;
        Ok(self.set_text(text))
    }

    /// Write document and history through the store. A failing store never
    /// blocks the in-memory edit; the next mutation rewrites both keys.
    fn persist(&mut self) {
        if let Err(e) = self.store.set(DOCUMENT_KEY, &self.document) {
            log::warn!("Failed to persist document: {e}");
        }
        match self.history.to_json() {
            Ok(json) => {
                if let Err(e) = self.store.set(HISTORY_KEY, &json) {
                    log::warn!("Failed to persist history: {e}");
                }
            }
            Err(e) => log::warn!("Failed to serialize history: {e}"),
        }
    }
}
