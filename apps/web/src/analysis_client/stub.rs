use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{AnalysisError, AnalysisService};
use crate::form::file::SelectedFile;

/// In-memory analysis service for tests. Counts invocations.
pub struct StubAnalysisService {
    keywords: Option<Vec<String>>,
    calls: AtomicUsize,
}

impl StubAnalysisService {
    pub fn returning(keywords: &[&str]) -> Self {
        Self {
            keywords: Some(keywords.iter().map(|k| k.to_string()).collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            keywords: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisService for StubAnalysisService {
    async fn analyze(&self, _file: &SelectedFile) -> Result<Vec<String>, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.keywords.clone().ok_or(AnalysisError::Status {
            status: 503,
            message: "stubbed failure".to_string(),
        })
    }
}
