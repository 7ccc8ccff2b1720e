//! Nutrilog demo
//!
//! Seeds a day of meals and water into a local journal, then prints the
//! resulting views and derived metrics.

use chrono::{Duration, FixedOffset, Utc};
use nutrilog::journal::Journal;
use nutrilog::model::{CalorieLogEntry, MealType, ProfileEdit};
use nutrilog::query::SortOrder;
use nutrilog::store::{KeyedStore, StoreConfig};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "nutrilog=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Nutrilog journal demo v{}", env!("CARGO_PKG_VERSION"));

    let config = StoreConfig::default();
    tracing::info!("Data directory: {:?}", config.data_dir);

    let store = Arc::new(KeyedStore::open(config)?);
    let journal = Arc::new(Journal::new(store, FixedOffset::east_opt(0).unwrap()));

    seed_profile(&journal)?;
    demo_log(&journal)?;
    demo_views(&journal);

    tracing::info!("Demo complete");
    Ok(())
}

fn seed_profile(journal: &Journal) -> nutrilog::JournalResult<()> {
    journal.edit_profile(&[
        ProfileEdit::Age("30".to_string()),
        ProfileEdit::Gender("female".to_string()),
        ProfileEdit::HeightCm("165".to_string()),
        ProfileEdit::WeightKg("60".to_string()),
        ProfileEdit::ActivityLevel("moderate".to_string()),
    ])?;

    let metrics = journal.derived_metrics();
    tracing::info!(
        bmr = ?metrics.bmr.map(|v| v.round()),
        daily_calories = ?metrics.daily_calories.map(|v| v.round()),
        bmi = ?metrics.bmi.map(|v| (v * 100.0).round() / 100.0),
        water_target_ml = ?metrics.recommended_water_ml,
        "Derived metrics"
    );

    Ok(())
}

fn demo_log(journal: &Journal) -> nutrilog::JournalResult<()> {
    tracing::info!("Logging demo meals and water...");

    let now = Utc::now();
    let meals = [
        ("overnight oats with berries", 340.0, MealType::Breakfast, 12),
        ("chicken caesar wrap", 520.0, MealType::Lunch, 7),
        ("dark chocolate square", 95.0, MealType::Snack, 4),
        ("salmon with roast vegetables", 640.0, MealType::Dinner, 1),
    ];

    for (food, calories, meal_type, hours_ago) in meals {
        let entry = journal.log_entry(
            CalorieLogEntry::new(food, calories, now - Duration::hours(hours_ago))
                .meal_type(meal_type),
        )?;
        tracing::info!(food = %entry.food_item, advisory = %entry.advisory, "Logged");
    }

    for (amount, hours_ago) in [(330.0, 10), (250.0, 6), (500.0, 2)] {
        journal.add_water(amount, Some(now - Duration::hours(hours_ago)))?;
    }

    Ok(())
}

fn demo_views(journal: &Journal) {
    let today = Utc::now().date_naive();

    let daily = journal.daily_view(today);
    tracing::info!("Today's log ({} entries, newest first):", daily.len());
    for entry in &daily {
        tracing::info!(
            "  {} - {} ({:.0} kcal)",
            entry.timestamp.format("%H:%M"),
            entry.food_item,
            entry.calorie_estimate
        );
    }

    let water = journal.water_day(today);
    tracing::info!(
        "Water: {:.0} / {:.0} mL ({:.0}%)",
        water.total_ml,
        water.target_ml,
        water.progress * 100.0
    );

    let month = journal.monthly_view(
        chrono::Datelike::year(&today),
        chrono::Datelike::month(&today),
        SortOrder::CaloriesDesc,
    );
    if let Some(heaviest) = month.first() {
        tracing::info!(
            "Heaviest meal this month: {} ({:.0} kcal)",
            heaviest.food_item,
            heaviest.calorie_estimate
        );
    }
}
