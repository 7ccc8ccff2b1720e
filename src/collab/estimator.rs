//! HTTP meal estimator client

use crate::collab::{CollaboratorError, MealEstimate, MealEstimator};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Configuration for the estimation service client
#[derive(Debug, Clone)]
pub struct EstimatorConfig {
    /// Base URL of the estimation service
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".to_string(),
            request_timeout_ms: 15_000,
        }
    }
}

/// Calorie estimation over HTTP
pub struct HttpEstimator {
    client: Client,
    config: EstimatorConfig,
}

#[derive(Serialize)]
struct EstimateRequest<'a> {
    image: &'a str,
}

#[derive(Deserialize)]
struct EstimateResponse {
    food_item: String,
    is_food_item: bool,
    calorie_estimate: f64,
    confidence: f64,
}

impl HttpEstimator {
    pub fn new(config: EstimatorConfig) -> Result<Self, CollaboratorError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// Check if the estimation service is reachable.
    pub async fn health_check(&self) -> Result<(), CollaboratorError> {
        let url = format!("{}/health", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(CollaboratorError::from_reqwest)?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(CollaboratorError::Unavailable)
        }
    }
}

#[async_trait]
impl MealEstimator for HttpEstimator {
    async fn estimate(&self, image_data: &str) -> Result<MealEstimate, CollaboratorError> {
        let url = format!("{}/v1/estimate", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .json(&EstimateRequest { image: image_data })
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

        let body: EstimateResponse = response
            .json()
            .await
            .map_err(CollaboratorError::from_reqwest)?;

        Ok(MealEstimate {
            food_item: body.food_item,
            is_food_item: body.is_food_item,
            calorie_estimate: body.calorie_estimate,
            confidence: body.confidence,
        })
    }
}
