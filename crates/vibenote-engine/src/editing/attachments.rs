use std::collections::HashMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use uuid::Uuid;

/// Prefix of minted image placeholder tokens.
const IMAGE_TOKEN_PREFIX: &str = "uploaded-image-";

/// What attaching a file produced: markdown to splice into the document plus
/// where the payload ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    /// An image, registered in the image map under a placeholder token.
    Image { token: String, markdown: String },
    /// Any other file, behind a transient `blob:` reference.
    Link { reference: String, markdown: String },
}

impl Attachment {
    /// The markdown reference to insert at the cursor.
    pub fn markdown(&self) -> &str {
        match self {
            Attachment::Image { markdown, .. } => markdown,
            Attachment::Link { markdown, .. } => markdown,
        }
    }
}

/// Session-lifetime store for attached files.
///
/// Image payloads are data URIs keyed by `uploaded-image-N` tokens; the
/// document embeds only the token, so a token with no entry (say, text
/// pasted from another session) renders as a broken image, not a fault.
/// Entries are never removed. Non-image payloads live behind `blob:`
/// references that die with the session.
#[derive(Debug)]
pub struct AttachmentStore {
    images: HashMap<String, String>,
    blobs: HashMap<String, Vec<u8>>,
    next_image_id: u64,
}

impl AttachmentStore {
    pub fn new() -> Self {
        Self {
            images: HashMap::new(),
            blobs: HashMap::new(),
            next_image_id: 1,
        }
    }

    /// Register a file and mint the markdown reference for it.
    ///
    /// Image MIME types embed as `![filename](uploaded-image-N)` with the
    /// payload stored as a data URI; everything else becomes
    /// `[filename](blob:...)`.
    pub fn attach(&mut self, filename: &str, mime_type: &str, bytes: &[u8]) -> Attachment {
        if mime_type.starts_with("image/") {
            let token = format!("{IMAGE_TOKEN_PREFIX}{}", self.next_image_id);
            self.next_image_id += 1;
            let data_uri = format!("data:{mime_type};base64,{}", STANDARD.encode(bytes));
            self.images.insert(token.clone(), data_uri);
            let markdown = format!("![{filename}]({token})");
            Attachment::Image { token, markdown }
        } else {
            let reference = format!("blob:{}", Uuid::new_v4());
            self.blobs.insert(reference.clone(), bytes.to_vec());
            let markdown = format!("[{filename}]({reference})");
            Attachment::Link { reference, markdown }
        }
    }

    /// Data URI behind an image token, if the token is known.
    pub fn image_source(&self, token: &str) -> Option<&str> {
        self.images.get(token).map(String::as_str)
    }

    /// Payload behind a transient blob reference.
    pub fn blob_bytes(&self, reference: &str) -> Option<&[u8]> {
        self.blobs.get(reference).map(Vec::as_slice)
    }

    /// Number of registered images.
    pub fn image_count(&self) -> usize {
        self.images.len()
    }
}

impl Default for AttachmentStore {
    fn default() -> Self {
        Self::new()
    }
}
