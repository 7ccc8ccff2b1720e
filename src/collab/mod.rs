//! External collaborators
//!
//! The engine observes its long-running collaborators only through
//! completed inputs or explicit absence; nothing here can corrupt or block
//! local log operations. Each collaborator is a trait seam with an HTTP
//! implementation:
//!
//! - [`MealEstimator`]: AI calorie estimation over a string-encoded image
//! - [`IdentityProvider`]: the nullable current user
//! - [`ProfileDirectory`]: remote profile-seed upsert on sign-in

mod directory;
mod estimator;

pub use directory::{DirectoryConfig, HttpDirectory, SignInReceipt};
pub use estimator::{EstimatorConfig, HttpEstimator};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A finished estimation result.
///
/// `is_food_item == false` is still a valid result: the journal logs it
/// with the calorie value forced to 0 while preserving the detected label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealEstimate {
    pub food_item: String,
    pub is_food_item: bool,
    pub calorie_estimate: f64,
    /// Estimator confidence in [0, 1]
    pub confidence: f64,
}

/// The current user as supplied by the identity collaborator
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserHandle {
    pub id: String,
    pub display_name: String,
    pub email: String,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Estimates calories from a finished image payload
#[async_trait]
pub trait MealEstimator: Send + Sync {
    /// Estimate the meal in a string-encoded (data-URI or base64) image.
    async fn estimate(&self, image_data: &str) -> Result<MealEstimate, CollaboratorError>;
}

/// Supplies the nullable current user.
///
/// The engine performs no sign-in/out itself; it only reacts to presence
/// or absence.
pub trait IdentityProvider: Send + Sync {
    fn current_user(&self) -> Option<UserHandle>;
}

/// A fixed identity, for configuration-driven and test setups
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    user: Option<UserHandle>,
}

impl StaticIdentity {
    pub fn signed_in(user: UserHandle) -> Self {
        Self { user: Some(user) }
    }

    pub fn signed_out() -> Self {
        Self { user: None }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Option<UserHandle> {
        self.user.clone()
    }
}

/// Records sign-ins against the remote document store
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    /// Upsert the profile-seed record for this user and refresh its
    /// last-seen timestamp.
    async fn record_sign_in(&self, user: &UserHandle) -> Result<SignInReceipt, CollaboratorError>;
}

/// Errors from any external collaborator.
///
/// These surface as transient notices; the user may retry the triggering
/// action.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// The collaborator did not answer in time
    #[error("The service did not respond in time")]
    Timeout,

    /// The collaborator is unreachable
    #[error("The service is unavailable")]
    Unavailable,

    /// The collaborator answered with an error
    #[error("The service rejected the request: {0}")]
    Rejected(String),

    /// Transport-level failure
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
}

impl CollaboratorError {
    /// Classify a reqwest failure into the taxonomy above.
    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CollaboratorError::Timeout
        } else if err.is_connect() {
            CollaboratorError::Unavailable
        } else {
            CollaboratorError::Request(err)
        }
    }
}
