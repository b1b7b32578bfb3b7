use axum::extract::Multipart;
use tracing::debug;

use crate::analysis_client::FILE_FIELD;
use crate::errors::AppError;
use crate::form::{SelectedFile, UploadForm};
use crate::state::AppState;

/// Pulls the first `file` part out of a form submission.
///
/// An empty part with no file name is what browsers send for an empty file
/// input, so it maps to `None`. A part without a content type gets one
/// guessed from its extension.
pub async fn read_upload(multipart: &mut Multipart) -> Result<Option<SelectedFile>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let content = field.bytes().await?;

        if file_name.is_empty() && content.is_empty() {
            return Ok(None);
        }

        let file = match content_type {
            Some(mime_type) => SelectedFile::new(file_name, mime_type, content),
            None => SelectedFile::with_guessed_type(file_name, content),
        };
        return Ok(Some(file));
    }
    Ok(None)
}

/// Runs one select-then-analyze cycle on a fresh form.
///
/// A rejected selection stops there so its message is not replaced by
/// "Please upload a file.".
pub async fn submit(state: &AppState, candidate: Option<SelectedFile>) -> UploadForm {
    let mut form = UploadForm::new(state.analysis.clone());
    form.select_file(candidate);
    if form.error().is_none() {
        if let Err(e) = form.analyze().await {
            debug!("Form submission ended with: {e}");
        }
    }
    form
}
