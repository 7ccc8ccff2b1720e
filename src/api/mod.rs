//! Nutrilog REST API
//!
//! HTTP API layer, built with Axum.
//!
//! # Endpoints
//!
//! ## Calorie log
//! - `GET /api/v1/entries` - List entries
//! - `POST /api/v1/entries` - Log an entry
//! - `PATCH /api/v1/entries/:id` - Edit an entry
//! - `DELETE /api/v1/entries/:id` - Delete an entry
//! - `POST /api/v1/estimates` - Estimate an image and log the result
//!
//! ## Water log
//! - `POST /api/v1/water` - Add a water entry
//! - `GET /api/v1/water/:date` - Day summary
//! - `DELETE /api/v1/water/:date` - Reset the day
//! - `DELETE /api/v1/water/:date/:id` - Delete one entry
//!
//! ## Profile & settings
//! - `GET/PATCH/DELETE /api/v1/profile` - Profile with derived metrics
//! - `GET/PUT /api/v1/settings` - Notification settings
//!
//! ## Views & export
//! - `GET /api/v1/log/daily` - Daily view (newest first)
//! - `GET /api/v1/log/monthly` - Monthly view with sort criteria
//! - `GET /api/v1/log/calendar` - Calendar marks
//! - `GET /api/v1/export` - CSV/JSON export
//!
//! ## Session & storage
//! - `GET /api/v1/session` - The nullable current user
//! - `POST /api/v1/session` - Record a sign-in
//! - `GET /api/v1/storage/status` - Storage banner
//! - `DELETE /api/v1/storage/error` - Dismiss the banner
//!
//! ## Health
//! - `GET /health/live`, `GET /health/ready`, `GET /health`

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Calorie log
        .route(
            "/entries",
            get(routes::entries::list_entries).post(routes::entries::create_entry),
        )
        .route(
            "/entries/:id",
            patch(routes::entries::edit_entry).delete(routes::entries::delete_entry),
        )
        .route("/estimates", post(routes::estimate::estimate_and_log))
        // Water log
        .route("/water", post(routes::water::add_water))
        .route(
            "/water/:date",
            get(routes::water::water_day).delete(routes::water::reset_water_day),
        )
        .route("/water/:date/:id", delete(routes::water::delete_water))
        // Profile
        .route(
            "/profile",
            get(routes::profile::get_profile)
                .patch(routes::profile::edit_profile)
                .delete(routes::profile::reset_profile),
        )
        // Settings
        .route(
            "/settings",
            put(routes::settings::update_settings).get(routes::settings::get_settings),
        )
        // Views
        .route("/log/daily", get(routes::views::daily_view))
        .route("/log/monthly", get(routes::views::monthly_view))
        .route("/log/calendar", get(routes::views::calendar_marks))
        // Export
        .route("/export", get(routes::export::export_entries))
        // Session
        .route(
            "/session",
            get(routes::session::current_session).post(routes::session::record_sign_in),
        )
        // Storage banner
        .route("/storage/status", get(routes::storage::storage_status))
        .route("/storage/error", delete(routes::storage::dismiss_storage_error));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // Configure properly in production
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ApiError::Internal(format!("Bind error: {}", e)))?;

    tracing::info!("Nutrilog API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Nutrilog API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::Journal;
    use crate::notify::{LogNotifier, ReminderScheduler};
    use crate::store::{KeyedStore, StoreConfig};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::FixedOffset;
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    fn create_test_app() -> (Router, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = Arc::new(KeyedStore::open(StoreConfig::new(dir.path())).unwrap());
        let journal = Arc::new(Journal::new(store, FixedOffset::east_opt(0).unwrap()));
        let scheduler = Arc::new(ReminderScheduler::new(Arc::new(LogNotifier)));

        let state = AppState::new(journal, scheduler, ApiConfig::default());
        (build_router(state), dir)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (app, _dir) = create_test_app();

        for uri in ["/health/live", "/health/ready", "/health"] {
            let response = app.clone().oneshot(get_request(uri)).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_create_and_list_entries() {
        let (app, _dir) = create_test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/entries",
                r#"{"food_item": "ramen", "calories": 540,
                    "timestamp": "2026-03-14T19:00:00Z", "meal_type": "dinner"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let created = body_json(response).await;
        assert_eq!(created["food_item"], "ramen");
        assert!(created["advisory"].as_str().unwrap().contains("balanced"));

        let response = app.oneshot(get_request("/api/v1/entries")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed = body_json(response).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_entry_rejects_empty_food_item() {
        let (app, _dir) = create_test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/entries",
                r#"{"food_item": "  ", "calories": 100}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_edit_entry_flow() {
        let (app, _dir) = create_test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/entries",
                r#"{"food_item": "stew", "calories": 800}"#,
            ))
            .await
            .unwrap();
        let created = body_json(response).await;
        let id = created["id"].as_str().unwrap().to_string();

        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                &format!("/api/v1/entries/{}", id),
                r#"{"edits": [{"field": "calories", "value": "150"}]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let edited = body_json(response).await;
        assert_eq!(edited["calorie_estimate"], 150.0);
        assert!(edited["advisory"].as_str().unwrap().contains("light"));

        // Invalid edit is a 400 and leaves the record unchanged.
        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                &format!("/api/v1/entries/{}", id),
                r#"{"edits": [{"field": "calories", "value": "loads"}]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app.oneshot(get_request("/api/v1/entries")).await.unwrap();
        let listed = body_json(response).await;
        assert_eq!(listed[0]["calorie_estimate"], 150.0);
    }

    #[tokio::test]
    async fn test_delete_entry_404_on_unknown_id() {
        let (app, _dir) = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/v1/entries/00000000-0000-4000-8000-000000000000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_water_day_flow() {
        let (app, _dir) = create_test_app();

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(json_request(
                    "POST",
                    "/api/v1/water",
                    r#"{"amount_ml": 250, "timestamp": "2026-03-14T09:00:00Z"}"#,
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app
            .clone()
            .oneshot(get_request("/api/v1/water/2026-03-14"))
            .await
            .unwrap();
        let day = body_json(response).await;
        assert_eq!(day["total_ml"], 500.0);
        assert_eq!(day["target_ml"], 2000.0);
        assert_eq!(day["progress"], 0.25);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/v1/water/2026-03-14")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let reset = body_json(response).await;
        assert_eq!(reset["removed"], 2);
    }

    #[tokio::test]
    async fn test_water_rejects_non_positive_amount() {
        let (app, _dir) = create_test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/water",
                r#"{"amount_ml": -100}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_profile_and_metrics() {
        let (app, _dir) = create_test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                "/api/v1/profile",
                r#"{"edits": [
                    {"field": "age", "value": "30"},
                    {"field": "gender", "value": "female"},
                    {"field": "height_cm", "value": "165"},
                    {"field": "weight_kg", "value": "60"},
                    {"field": "activity_level", "value": "moderate"}
                ]}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["metrics"]["recommended_water_ml"], 2100.0);
        let bmr = body["metrics"]["bmr"].as_f64().unwrap();
        assert!((bmr - 1383.683).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_settings_put_validates_and_commits() {
        let (app, _dir) = create_test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/v1/settings",
                r#"{"enabled": false, "frequency_minutes": 0,
                    "start_time": "09:00", "end_time": "21:00"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/v1/settings",
                r#"{"enabled": false, "frequency_minutes": 45,
                    "start_time": "8:30", "end_time": "22:00"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["start_time"], "08:30");
    }

    #[tokio::test]
    async fn test_monthly_view_validates_month() {
        let (app, _dir) = create_test_app();

        let response = app
            .clone()
            .oneshot(get_request("/api/v1/log/monthly?year=2026&month=13"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(get_request(
                "/api/v1/log/monthly?year=2026&month=3&sort=calories-desc",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_estimates_unavailable_without_estimator() {
        let (app, _dir) = create_test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/estimates",
                r#"{"image": "data:image/jpeg;base64,abcd"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_session_null_without_identity() {
        let (app, _dir) = create_test_app();

        let response = app.oneshot(get_request("/api/v1/session")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["user"].is_null());
    }

    #[tokio::test]
    async fn test_session_reflects_signed_in_identity() {
        use crate::collab::{StaticIdentity, UserHandle};

        let dir = tempdir().unwrap();
        let store = Arc::new(KeyedStore::open(StoreConfig::new(dir.path())).unwrap());
        let journal = Arc::new(Journal::new(store, FixedOffset::east_opt(0).unwrap()));
        let scheduler = Arc::new(ReminderScheduler::new(Arc::new(LogNotifier)));

        let user = UserHandle {
            id: "u-42".to_string(),
            display_name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            photo_url: None,
        };
        let state = AppState::new(journal, scheduler, ApiConfig::default())
            .with_identity(Arc::new(StaticIdentity::signed_in(user)));
        let app = build_router(state);

        let response = app.oneshot(get_request("/api/v1/session")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["user"]["id"], "u-42");
    }

    #[tokio::test]
    async fn test_sign_in_unavailable_without_directory() {
        let (app, _dir) = create_test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/v1/session",
                r#"{"id": "u-1", "display_name": "Sam", "email": "sam@example.com"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_storage_status_starts_clean() {
        let (app, _dir) = create_test_app();

        let response = app
            .clone()
            .oneshot(get_request("/api/v1/storage/status"))
            .await
            .unwrap();
        let body = body_json(response).await;
        assert!(body["error"].is_null());

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/api/v1/storage/error")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_export_csv() {
        let (app, _dir) = create_test_app();

        app.clone()
            .oneshot(json_request(
                "POST",
                "/api/v1/entries",
                r#"{"food_item": "bento box", "calories": 520,
                    "timestamp": "2026-03-14T12:00:00Z"}"#,
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(get_request(
                "/api/v1/export?start=2026-03-01&end=2026-04-01&format=csv",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("id,timestamp,food_item"));
        assert!(text.contains("bento box"));
    }
}
