//! Reminder scheduler
//!
//! An explicitly owned scheduler resource: [`ReminderScheduler::apply`]
//! stops whatever task the previous settings spawned before starting a new
//! one, so repeated reconfiguration never leaks timers. Delivery itself is
//! out of scope; the scheduler only invokes a [`Notifier`] inside the
//! configured daily window.

use crate::model::NotificationSettings;
use async_trait::async_trait;
use chrono::{Local, NaiveTime};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::task::JoinHandle;

/// Receives reminder messages when the scheduler fires
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str);
}

/// Default notifier: writes reminders to the log
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, message: &str) {
        tracing::info!(reminder = %message, "Reminder fired");
    }
}

/// Owns the reminder task for the current notification settings
pub struct ReminderScheduler {
    notifier: Arc<dyn Notifier>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ReminderScheduler {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self {
            notifier,
            task: Mutex::new(None),
        }
    }

    /// Reconfigure from validated settings: the previous task (if any) is
    /// stopped first; a new one starts only when reminders are enabled.
    pub fn apply(&self, settings: &NotificationSettings) {
        self.stop();

        if !settings.enabled {
            tracing::debug!("Reminders disabled");
            return;
        }

        let (start, end) = settings.window();
        let period_secs = u64::from(settings.frequency_minutes.max(1)) * 60;
        let notifier = Arc::clone(&self.notifier);

        tracing::info!(
            every_minutes = settings.frequency_minutes,
            window_start = %settings.start_time,
            window_end = %settings.end_time,
            "Reminder schedule applied"
        );

        let handle = tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_secs(period_secs));
            // The first tick completes immediately; swallow it so the
            // first reminder fires one full period after reconfiguration.
            interval.tick().await;

            loop {
                interval.tick().await;
                let now = Local::now().time();
                if in_window(now, start, end) {
                    notifier.notify("Time for a glass of water").await;
                }
            }
        });

        *self.task.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);
    }

    /// Stop the reminder task, if one is running.
    pub fn stop(&self) {
        if let Some(handle) = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            handle.abort();
        }
    }

    /// Whether a reminder task is currently running.
    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|h| !h.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for ReminderScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Whether `now` falls inside the reminder window. A start later than the
/// end means the window crosses midnight.
pub fn in_window(now: NaiveTime, start: NaiveTime, end: NaiveTime) -> bool {
    if start <= end {
        now >= start && now <= end
    } else {
        now >= start || now <= end
    }
}
