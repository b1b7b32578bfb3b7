use askama::Template;
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    response::Html,
};

use crate::errors::AppError;
use crate::form::{file::ACCEPTED_EXTENSIONS, UploadForm};
use crate::routes::upload::{read_upload, submit};
use crate::state::AppState;

/// The upload page. Re-rendered after every submission.
#[derive(Template)]
#[template(path = "upload.html")]
pub struct UploadPage {
    pub accept: &'static str,
    pub error: String,
    pub keywords: Vec<String>,
}

impl UploadPage {
    pub fn empty() -> Self {
        Self {
            accept: ACCEPTED_EXTENSIONS,
            error: String::new(),
            keywords: Vec::new(),
        }
    }

    pub fn for_form(form: &UploadForm) -> Self {
        Self {
            accept: ACCEPTED_EXTENSIONS,
            error: form.error_message(),
            keywords: form.keywords().to_vec(),
        }
    }
}

/// GET /
pub async fn handle_page() -> Result<Html<String>, AppError> {
    Ok(Html(UploadPage::empty().render()?))
}

/// POST /
/// Form outcomes are always rendered into the page with a 200.
pub async fn handle_page_submit(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Html<String>, AppError> {
    let mut multipart = multipart?;
    let candidate = read_upload(&mut multipart).await?;
    let form = submit(&state, candidate).await;
    Ok(Html(UploadPage::for_form(&form).render()?))
}
