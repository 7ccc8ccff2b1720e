//! # Nutrilog
//!
//! Local-first food and water logging engine: validated meal records,
//! derived health metrics, and daily/monthly views behind a REST API.
//!
//! ## Features
//!
//! - **Validated records**: typed edit commands with per-field validation
//! - **Durable local state**: keyed JSON documents with checksums and quota
//! - **Derived metrics**: BMR, daily calories, BMI, and water targets
//! - **Advisory comments**: a deterministic rule table, frozen at write time
//! - **Views**: daily/monthly log views, water day totals, calendar marks
//!
//! ## Modules
//!
//! - [`store`]: persistent keyed document store
//! - [`model`]: records, enumerations, and edit commands
//! - [`journal`]: the coordinating engine behind every mutation
//! - [`metrics`]: derived health metrics
//! - [`advice`]: the advisory comment rule table
//! - [`query`]: daily/monthly views and aggregation
//! - [`collab`]: external collaborator seams (estimator, identity, directory)
//! - [`notify`]: the reminder scheduler
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nutrilog::journal::Journal;
//! use nutrilog::model::CalorieLogEntry;
//! use nutrilog::store::{KeyedStore, StoreConfig};
//! use chrono::{FixedOffset, Utc};
//! use std::sync::Arc;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Open the store and the journal
//!     let store = Arc::new(KeyedStore::open(StoreConfig::default())?);
//!     let journal = Journal::new(store, FixedOffset::east_opt(0).unwrap());
//!
//!     // Log a meal
//!     let entry = journal.log_entry(CalorieLogEntry::new("ramen", 540.0, Utc::now()))?;
//!     println!("{}", entry.advisory);
//!
//!     // Today's log, newest first
//!     let today = Utc::now().date_naive();
//!     let view = journal.daily_view(today);
//!     println!("{} entries today", view.len());
//!
//!     Ok(())
//! }
//! ```

pub mod advice;
pub mod api;
pub mod collab;
pub mod config;
pub mod journal;
pub mod metrics;
pub mod model;
pub mod notify;
pub mod query;
pub mod store;

// Re-export top-level types for convenience
pub use store::{KeyedStore, StoreConfig, StoreError, StoreResult};

pub use model::{
    ActivityLevel, CalorieLogEntry, EntryEdit, Gender, MealType, NotificationSettings,
    ProfileEdit, SettingsUpdate, UserProfile, ValidationError, WaterLog, WaterLogEntry,
    MAX_LOG_ENTRIES, MAX_WATER_ENTRIES_PER_DAY,
};

pub use journal::{Journal, JournalError, JournalResult, WaterDaySummary};

pub use metrics::{DerivedMetrics, MetricsCache, DEFAULT_WATER_TARGET_ML};

pub use query::{CalendarMarks, SortOrder};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use collab::{
    CollaboratorError, DirectoryConfig, EstimatorConfig, HttpDirectory, HttpEstimator,
    IdentityProvider, MealEstimate, MealEstimator, ProfileDirectory, SignInReceipt,
    StaticIdentity, UserHandle,
};

pub use notify::{LogNotifier, Notifier, ReminderScheduler};

pub use config::{Config, ConfigError, LoggingConfig};
