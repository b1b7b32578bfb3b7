//! UploadForm — the state machine behind the upload page.
//!
//! Owns the selected file, the extracted keywords and the error message.
//! `Idle → FileSelected → Analyzing → Succeeded | Failed`; any new selection
//! or analyze call re-enters the cycle.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis_client::AnalysisService;
use crate::form::file::SelectedFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormStatus {
    Idle,
    FileSelected,
    Analyzing,
    Succeeded,
    Failed,
}

/// User-facing errors. The display strings are what the page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Invalid file type. Please upload a PDF or TXT file.")]
    InvalidFileType,

    #[error("Please upload a file.")]
    NoFileSelected,

    #[error("Failed to analyze the resume. Please try again later.")]
    AnalysisRequestFailed,
}

pub struct UploadForm {
    service: Arc<dyn AnalysisService>,
    selected_file: Option<SelectedFile>,
    keywords: Vec<String>,
    error: Option<FormError>,
    status: FormStatus,
    completed_at: Option<DateTime<Utc>>,
}

impl UploadForm {
    pub fn new(service: Arc<dyn AnalysisService>) -> Self {
        Self {
            service,
            selected_file: None,
            keywords: Vec::new(),
            error: None,
            status: FormStatus::Idle,
            completed_at: None,
        }
    }

    /// Replaces the selected file. Purely local, never touches the network.
    ///
    /// `None` models an empty file input: the error is cleared and nothing
    /// is selected. Keywords from an earlier analysis are left alone.
    pub fn select_file(&mut self, candidate: Option<SelectedFile>) {
        match candidate {
            Some(file) if !file.is_accepted() => {
                info!(
                    "Rejected {} with unsupported type {}",
                    file.file_name, file.mime_type
                );
                self.error = Some(FormError::InvalidFileType);
                self.selected_file = None;
                self.status = FormStatus::Idle;
            }
            candidate => {
                self.error = None;
                self.status = if candidate.is_some() {
                    FormStatus::FileSelected
                } else {
                    FormStatus::Idle
                };
                self.selected_file = candidate;
            }
        }
    }

    /// Uploads the selected file and records the outcome.
    ///
    /// Exactly one request is issued per call. The exclusive borrow keeps a
    /// second request from starting on the same form while one is in flight.
    pub async fn analyze(&mut self) -> Result<&[String], FormError> {
        let Some(file) = &self.selected_file else {
            self.error = Some(FormError::NoFileSelected);
            return Err(FormError::NoFileSelected);
        };

        self.error = None;
        self.keywords.clear();
        self.status = FormStatus::Analyzing;

        let request_id = Uuid::new_v4();
        info!(
            %request_id,
            file = %file.file_name,
            bytes = file.size(),
            "Submitting resume for analysis"
        );

        let outcome = self.service.analyze(file).await;
        self.completed_at = Some(Utc::now());

        match outcome {
            Ok(keywords) => {
                info!(%request_id, count = keywords.len(), "Resume analysis succeeded");
                self.keywords = keywords;
                self.status = FormStatus::Succeeded;
                Ok(&self.keywords)
            }
            Err(e) => {
                // The cause stays in the logs; the user only sees the generic message.
                warn!(%request_id, "Resume analysis failed: {e}");
                self.error = Some(FormError::AnalysisRequestFailed);
                self.status = FormStatus::Failed;
                Err(FormError::AnalysisRequestFailed)
            }
        }
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn error(&self) -> Option<FormError> {
        self.error
    }

    /// The error as shown on the page; empty when there is none.
    pub fn error_message(&self) -> String {
        self.error.map(|e| e.to_string()).unwrap_or_default()
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis_client::stub::StubAnalysisService;

    fn form_with(stub: &Arc<StubAnalysisService>) -> UploadForm {
        UploadForm::new(stub.clone())
    }

    fn pdf() -> SelectedFile {
        SelectedFile::new("resume.pdf", "application/pdf", b"%PDF-1.4".to_vec())
    }

    fn txt() -> SelectedFile {
        SelectedFile::new("resume.txt", "text/plain", b"Python, SQL".to_vec())
    }

    fn png() -> SelectedFile {
        SelectedFile::new("photo.png", "image/png", vec![0x89, 0x50])
    }

    #[test]
    fn test_new_form_is_idle() {
        let stub = Arc::new(StubAnalysisService::returning(&[]));
        let form = form_with(&stub);
        assert_eq!(form.status(), FormStatus::Idle);
        assert!(form.selected_file().is_none());
        assert!(form.keywords().is_empty());
        assert_eq!(form.error_message(), "");
    }

    #[test]
    fn test_invalid_type_sets_error_and_clears_file() {
        let stub = Arc::new(StubAnalysisService::returning(&[]));
        let mut form = form_with(&stub);
        form.select_file(Some(pdf()));
        form.select_file(Some(png()));

        assert_eq!(form.error(), Some(FormError::InvalidFileType));
        assert_eq!(
            form.error_message(),
            "Invalid file type. Please upload a PDF or TXT file."
        );
        assert!(form.selected_file().is_none());
        assert_eq!(form.status(), FormStatus::Idle);
        assert_eq!(stub.calls(), 0);
    }

    #[test]
    fn test_valid_types_clear_error_and_select() {
        let stub = Arc::new(StubAnalysisService::returning(&[]));
        for file in [pdf(), txt()] {
            let mut form = form_with(&stub);
            form.select_file(Some(png()));
            form.select_file(Some(file.clone()));

            assert_eq!(form.error(), None);
            assert_eq!(form.selected_file(), Some(&file));
            assert_eq!(form.status(), FormStatus::FileSelected);
        }
        assert_eq!(stub.calls(), 0);
    }

    #[test]
    fn test_empty_selection_clears_error_and_file() {
        let stub = Arc::new(StubAnalysisService::returning(&[]));
        let mut form = form_with(&stub);
        form.select_file(Some(png()));
        form.select_file(None);

        assert_eq!(form.error(), None);
        assert!(form.selected_file().is_none());
        assert_eq!(form.status(), FormStatus::Idle);
    }

    #[test]
    fn test_select_file_is_idempotent() {
        let stub = Arc::new(StubAnalysisService::returning(&[]));
        let mut once = form_with(&stub);
        once.select_file(Some(pdf()));

        let mut twice = form_with(&stub);
        twice.select_file(Some(pdf()));
        twice.select_file(Some(pdf()));

        assert_eq!(once.selected_file(), twice.selected_file());
        assert_eq!(once.error(), twice.error());
        assert_eq!(once.status(), twice.status());
    }

    #[tokio::test]
    async fn test_analyze_without_file_does_not_call_service() {
        let stub = Arc::new(StubAnalysisService::returning(&["Python"]));
        let mut form = form_with(&stub);

        let result = form.analyze().await;

        assert_eq!(result.unwrap_err(), FormError::NoFileSelected);
        assert_eq!(form.error_message(), "Please upload a file.");
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_analyze_after_rejected_file_does_not_call_service() {
        let stub = Arc::new(StubAnalysisService::returning(&["Python"]));
        let mut form = form_with(&stub);
        form.select_file(Some(png()));

        assert_eq!(form.analyze().await.unwrap_err(), FormError::NoFileSelected);
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_analyze_success_populates_keywords() {
        let stub = Arc::new(StubAnalysisService::returning(&["Python", "SQL"]));
        let mut form = form_with(&stub);
        form.select_file(Some(pdf()));

        let keywords = form.analyze().await.unwrap().to_vec();

        assert_eq!(keywords, vec!["Python", "SQL"]);
        assert_eq!(form.keywords(), ["Python", "SQL"]);
        assert_eq!(form.error_message(), "");
        assert_eq!(form.status(), FormStatus::Succeeded);
        assert!(form.completed_at().is_some());
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_analyze_success_with_no_keywords_is_not_an_error() {
        let stub = Arc::new(StubAnalysisService::returning(&[]));
        let mut form = form_with(&stub);
        form.select_file(Some(txt()));

        assert!(form.analyze().await.unwrap().is_empty());
        assert_eq!(form.error(), None);
        assert_eq!(form.status(), FormStatus::Succeeded);
    }

    #[tokio::test]
    async fn test_analyze_failure_sets_generic_error() {
        let stub = Arc::new(StubAnalysisService::failing());
        let mut form = form_with(&stub);
        form.select_file(Some(pdf()));

        let result = form.analyze().await;

        assert_eq!(result.unwrap_err(), FormError::AnalysisRequestFailed);
        assert_eq!(
            form.error_message(),
            "Failed to analyze the resume. Please try again later."
        );
        assert!(form.keywords().is_empty());
        assert_eq!(form.status(), FormStatus::Failed);
        assert_eq!(stub.calls(), 1);
    }

    #[tokio::test]
    async fn test_failure_clears_previous_keywords() {
        let ok = Arc::new(StubAnalysisService::returning(&["Rust"]));
        let mut form = form_with(&ok);
        form.select_file(Some(pdf()));
        form.analyze().await.unwrap();
        assert_eq!(form.keywords(), ["Rust"]);

        form.service = Arc::new(StubAnalysisService::failing()) as Arc<dyn AnalysisService>;
        form.analyze().await.unwrap_err();

        assert!(form.keywords().is_empty());
        assert_eq!(form.error(), Some(FormError::AnalysisRequestFailed));
    }

    #[tokio::test]
    async fn test_success_clears_previous_error() {
        let failing = Arc::new(StubAnalysisService::failing());
        let mut form = form_with(&failing);
        form.select_file(Some(pdf()));
        form.analyze().await.unwrap_err();

        form.service = Arc::new(StubAnalysisService::returning(&["Go"])) as Arc<dyn AnalysisService>;
        form.analyze().await.unwrap();

        assert_eq!(form.error(), None);
        assert_eq!(form.keywords(), ["Go"]);
    }

    #[tokio::test]
    async fn test_each_analyze_issues_one_request() {
        let stub = Arc::new(StubAnalysisService::returning(&["Python"]));
        let mut form = form_with(&stub);
        form.select_file(Some(pdf()));

        form.analyze().await.unwrap();
        form.analyze().await.unwrap();

        assert_eq!(stub.calls(), 2);
    }
}
