use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::form::state::{FormStatus, UploadForm};

/// Serializable snapshot of an [`UploadForm`], shared by the page and the JSON API.
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub status: FormStatus,
    pub file_name: Option<String>,
    pub keywords: Vec<String>,
    pub error: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&UploadForm> for FormView {
    fn from(form: &UploadForm) -> Self {
        Self {
            status: form.status(),
            file_name: form.selected_file().map(|f| f.file_name.clone()),
            keywords: form.keywords().to_vec(),
            error: form.error().map(|e| e.to_string()),
            completed_at: form.completed_at(),
        }
    }
}
