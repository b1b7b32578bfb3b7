use bytes::Bytes;

pub const PDF_MIME: &str = "application/pdf";
pub const TEXT_MIME: &str = "text/plain";
const FALLBACK_MIME: &str = "application/octet-stream";

/// MIME types the form accepts. Anything else is rejected before upload.
pub const ACCEPTED_MIME_TYPES: &[&str] = &[PDF_MIME, TEXT_MIME];

/// Value of the file input's `accept` attribute.
pub const ACCEPTED_EXTENSIONS: &str = ".pdf,.txt";

/// A file chosen by the user, as received from the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub mime_type: String,
    pub content: Bytes,
}

impl SelectedFile {
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        content: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            content: content.into(),
        }
    }

    /// Builds a file whose type is guessed from its extension.
    /// Used when the upload part carries no content type.
    pub fn with_guessed_type(file_name: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_from_extension(&file_name);
        Self::new(file_name, mime_type, content)
    }

    pub fn is_accepted(&self) -> bool {
        is_accepted_mime(&self.mime_type)
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }
}

/// Strips parameters (`; charset=...`) and normalizes case.
pub fn mime_essence(mime: &str) -> String {
    mime.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

pub fn is_accepted_mime(mime: &str) -> bool {
    let essence = mime_essence(mime);
    ACCEPTED_MIME_TYPES.contains(&essence.as_str())
}

pub fn mime_from_extension(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "pdf" => PDF_MIME,
        "txt" => TEXT_MIME,
        _ => FALLBACK_MIME,
    }
}
