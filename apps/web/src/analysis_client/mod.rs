/// Analysis Service client — the single point of contact with the keyword
/// extraction backend.
///
/// The backend contract: `POST <endpoint>` with a `multipart/form-data` body
/// holding one part named `file`; a 2xx response carries
/// `{ "keywords": string[] }` where the field may be absent.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client, Url,
};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::form::file::{mime_essence, SelectedFile};

#[cfg(test)]
pub mod stub;

/// Multipart field name the backend reads the upload from.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Analysis service returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed analysis response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Successful response body. Only `keywords` is read; other fields
/// (e.g. `message`) are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

impl AnalyzeResponse {
    pub fn into_keywords(self) -> Vec<String> {
        self.keywords.unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    error: String,
}

/// Anything able to turn an uploaded file into keywords.
///
/// Carried in `AppState` as `Arc<dyn AnalysisService>` so tests can swap in
/// a stub without touching the form or the handlers.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    async fn analyze(&self, file: &SelectedFile) -> Result<Vec<String>, AnalysisError>;
}

/// HTTP implementation of [`AnalysisService`].
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    client: Client,
    endpoint: Url,
}

impl AnalysisClient {
    /// `timeout = None` leaves requests unbounded.
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self, AnalysisError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AnalysisService for AnalysisClient {
    async fn analyze(&self, file: &SelectedFile) -> Result<Vec<String>, AnalysisError> {
        let part = Part::bytes(file.content.to_vec())
            .file_name(file.file_name.clone())
            .mime_str(&mime_essence(&file.mime_type))?;
        let form = Form::new().part(FILE_FIELD, part);

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ServiceError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(AnalysisError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: AnalyzeResponse = serde_json::from_str(&body)?;
        let keywords = parsed.into_keywords();
        debug!(
            "Analysis service returned {} keywords for {}",
            keywords.len(),
            file.file_name
        );
        Ok(keywords)
    }
}
