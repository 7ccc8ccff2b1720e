//! HTTP profile directory client
//!
//! Upserts a profile-seed record keyed by user id on first sign-in and
//! refreshes its last-seen timestamp on later ones. The journal never
//! reads from this collaborator; it persists only to the local store.

use crate::collab::{CollaboratorError, ProfileDirectory, UserHandle};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Configuration for the directory client
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Base URL of the remote document store facade
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8091".to_string(),
            request_timeout_ms: 5_000,
        }
    }
}

/// Acknowledgement of a recorded sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInReceipt {
    pub user_id: String,
    /// Whether this sign-in created the seed record
    pub created: bool,
    pub last_seen: DateTime<Utc>,
}

/// Directory access over HTTP
pub struct HttpDirectory {
    client: Client,
    config: DirectoryConfig,
}

#[derive(Serialize)]
struct SignInRequest<'a> {
    display_name: &'a str,
    email: &'a str,
    photo_url: Option<&'a str>,
    last_seen: DateTime<Utc>,
}

impl HttpDirectory {
    pub fn new(config: DirectoryConfig) -> Result<Self, CollaboratorError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl ProfileDirectory for HttpDirectory {
    async fn record_sign_in(&self, user: &UserHandle) -> Result<SignInReceipt, CollaboratorError> {
        let url = format!("{}/v1/users/{}", self.config.base_url, user.id);

        let body = SignInRequest {
            display_name: &user.display_name,
            email: &user.email,
            photo_url: user.photo_url.as_deref(),
            last_seen: Utc::now(),
        };

        let response = self
            .client
            .put(&url)
            .json(&body)
            .send()
            .await
            .map_err(CollaboratorError::from_reqwest)?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(CollaboratorError::Rejected(format!(
                "{}: {}",
                status, detail
            )));
        }

        response
            .json()
            .await
            .map_err(CollaboratorError::from_reqwest)
    }
}
