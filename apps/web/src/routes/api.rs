use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::form::{FormError, FormView};
use crate::routes::upload::{read_upload, submit};
use crate::state::AppState;

/// POST /api/v1/analyze
/// Same flow as the page, answered with the form snapshot as JSON.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<FormView>), AppError> {
    let mut multipart = multipart?;
    let candidate = read_upload(&mut multipart).await?;
    let form = submit(&state, candidate).await;
    let status = match form.error() {
        None => StatusCode::OK,
        Some(FormError::NoFileSelected) => StatusCode::BAD_REQUEST,
        Some(FormError::InvalidFileType) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        Some(FormError::AnalysisRequestFailed) => StatusCode::BAD_GATEWAY,
    };
    Ok((status, Json(FormView::from(&form))))
}
