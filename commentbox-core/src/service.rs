//! Remote comment service client
//!
//! The service speaks plain JSON over HTTP:
//!
//! ```text
//! GET  {base_url}/comments   -> [ {name, message, ...}, ... ]
//! POST {base_url}/comments   {name, message} -> {name, message, ...}
//! ```
//!
//! Failures come back as a non-2xx status with an optional
//! `{"message": "..."}` body.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::ServiceConfig;
use crate::model::{Comment, NewComment};

#[derive(Error, Debug)]
pub enum ServiceError {
    /// Connection, TLS or body read failure
    #[error("failed to reach comment service: {0}")]
    Transport(#[source] reqwest::Error),

    /// Non-2xx response, with the service's own message when it sent one
    #[error("comment service returned {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Status { status: u16, message: Option<String> },

    /// 2xx response whose body was not the expected JSON
    #[error("invalid response from comment service: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Message the service itself provided, if any
    pub fn service_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

#[async_trait]
pub trait CommentService: Send + Sync {
    /// Every comment, in the order the service keeps them
    async fn list(&self) -> Result<Vec<Comment>, ServiceError>;

    /// Store a comment and return the service's copy of it
    async fn create(&self, comment: &NewComment) -> Result<Comment, ServiceError>;
}

#[derive(Deserialize, Debug, Default)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// [`CommentService`] over HTTP with reqwest
#[derive(Debug, Clone)]
pub struct HttpCommentService {
    client: Client,
    base_url: String,
}

impl HttpCommentService {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ServiceError> {
        Self::from_config(&ServiceConfig {
            endpoint: base_url.into(),
            ..ServiceConfig::default()
        })
    }

    pub fn from_config(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .danger_accept_invalid_certs(config.insecure)
            .build()
            .map_err(ServiceError::Transport)?;
        Ok(Self::with_client(client, &config.endpoint))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn comments_url(&self) -> String {
        format!("{}/comments", self.base_url)
    }
}

#[async_trait]
impl CommentService for HttpCommentService {
    async fn list(&self) -> Result<Vec<Comment>, ServiceError> {
        let url = self.comments_url();
        debug!(%url, "fetching comments");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(ServiceError::Transport)?;
        handle_response(response).await
    }

    async fn create(&self, comment: &NewComment) -> Result<Comment, ServiceError> {
        let url = self.comments_url();
        debug!(%url, name = comment.name(), "posting comment");

        let response = self
            .client
            .post(&url)
            .json(comment)
            .send()
            .await
            .map_err(ServiceError::Transport)?;
        handle_response(response).await
    }
}

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ServiceError> {
    let status = response.status();
    let body = response.text().await.map_err(ServiceError::Transport)?;

    if status.is_success() {
        return serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()));
    }

    let parsed: ErrorBody = serde_json::from_str(&body).unwrap_or_default();
    let message = parsed
        .message
        .or(parsed.error)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty());

    Err(ServiceError::Status {
        status: status.as_u16(),
        message,
    })
}
