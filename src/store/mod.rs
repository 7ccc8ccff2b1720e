//! Persistent keyed store
//!
//! One JSON document per named key, persisted synchronously on every
//! successful write. The store is the single shared-mutable boundary of the
//! engine: `set` holds its lock across read-latest, update, serialize, and
//! persist, so same-process callers cannot lose updates.
//!
//! Failures never throw across the write boundary silently: every store
//! error is returned to the caller *and* retained as readable state
//! ([`KeyedStore::last_error`]) until dismissed, so a frontend can render a
//! persistent banner while the in-memory state stays authoritative.

mod error;
mod keyed;

pub use error::{StoreError, StoreResult};
pub use keyed::{KeyedStore, StoreConfig};

/// Store key for the calorie log (ordered list of entries).
pub const CALORIE_LOG_KEY: &str = "calorie_log";

/// Store key for the water log (day-key to ordered list of entries).
pub const WATER_LOG_KEY: &str = "water_log";

/// Store key for the user profile (single record).
pub const PROFILE_KEY: &str = "user_profile";

/// Store key for the notification settings (single record).
pub const SETTINGS_KEY: &str = "notification_settings";
