//! Nutrilog CLI
//!
//! Command-line interface for Nutrilog operations:
//! - Log meals and water
//! - View daily/monthly summaries
//! - Edit the profile
//! - Export data

use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nutrilog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Food and water journal with calorie estimates")]
#[command(
    long_about = "Nutrilog is a local-first food and water journal.\nLog meals, track water intake, and follow your derived health metrics."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8083", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log a meal
    Log {
        /// Food label
        food_item: String,
        /// Calories
        calories: f64,
        /// Meal type (breakfast, lunch, dinner, snack)
        #[arg(short, long)]
        meal: Option<String>,
        /// Timestamp (default: now). Supports: "now", "yesterday", ISO 8601
        #[arg(short, long)]
        time: Option<String>,
        /// Location
        #[arg(short, long)]
        location: Option<String>,
        /// Cost
        #[arg(short, long)]
        cost: Option<f64>,
    },

    /// Log a glass of water
    Water {
        /// Amount in milliliters
        amount_ml: f64,
        /// Timestamp (default: now)
        #[arg(short, long)]
        time: Option<String>,
    },

    /// Show one day's log and water summary
    Day {
        /// Date (YYYY-MM-DD, default: today)
        date: Option<String>,
    },

    /// Show a month's log
    Month {
        /// Year (default: current)
        #[arg(short, long)]
        year: Option<i32>,
        /// Month 1-12 (default: current)
        #[arg(short, long)]
        month: Option<u32>,
        /// Sort: time-asc, time-desc, calories-asc, calories-desc
        #[arg(short, long, default_value = "time-desc")]
        sort: String,
    },

    /// Show or edit the profile
    Profile {
        /// Field edits in field=value form (age, gender, height_cm,
        /// weight_kg, activity_level); empty value clears a field
        #[arg(long = "set")]
        set: Vec<String>,
        /// Reset the profile to defaults
        #[arg(long)]
        reset: bool,
    },

    /// Show system status
    Status,

    /// Export entries
    Export {
        /// Start bound (ISO 8601, YYYY-MM-DD, or now-30d)
        #[arg(long, default_value = "now-30d")]
        start: String,
        /// End bound
        #[arg(long, default_value = "now")]
        end: String,
        /// Format: csv or json
        #[arg(long, default_value = "csv")]
        export_format: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Log {
            food_item,
            calories,
            meal,
            time,
            location,
            cost,
        } => {
            let timestamp = parse_cli_time(time.as_deref())?;

            let body = serde_json::json!({
                "food_item": food_item,
                "calories": calories,
                "timestamp": timestamp,
                "meal_type": meal,
                "location": location,
                "cost": cost,
            });

            let response = client
                .post(format!("{}/api/v1/entries", cli.api_url))
                .json(&body)
                .send()
                .await?;

            if response.status().is_success() {
                let entry: serde_json::Value = response.json().await?;
                println!(
                    "Logged {} ({:.0} kcal)",
                    entry["food_item"].as_str().unwrap_or("-"),
                    entry["calorie_estimate"].as_f64().unwrap_or(0.0)
                );
                if let Some(advisory) = entry["advisory"].as_str() {
                    println!("  {}", advisory);
                }
            } else {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Failed ({}): {}", status, text);
                std::process::exit(1);
            }
        }

        Commands::Water { amount_ml, time } => {
            let timestamp = parse_cli_time(time.as_deref())?;

            let body = serde_json::json!({
                "amount_ml": amount_ml,
                "timestamp": timestamp,
            });

            let response = client
                .post(format!("{}/api/v1/water", cli.api_url))
                .json(&body)
                .send()
                .await?;

            if response.status().is_success() {
                println!("Logged {:.0} mL of water", amount_ml);
            } else {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Failed ({}): {}", status, text);
                std::process::exit(1);
            }
        }

        Commands::Day { date } => {
            let date = date.unwrap_or_else(|| Utc::now().format("%Y-%m-%d").to_string());

            let entries: serde_json::Value = client
                .get(format!("{}/api/v1/log/daily?date={}", cli.api_url, date))
                .send()
                .await?
                .json()
                .await?;

            let water: serde_json::Value = client
                .get(format!("{}/api/v1/water/{}", cli.api_url, date))
                .send()
                .await?
                .json()
                .await?;

            if cli.format == "json" {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "entries": entries,
                        "water": water,
                    }))?
                );
            } else {
                print_day(&date, &entries, &water);
            }
        }

        Commands::Month { year, month, sort } => {
            let now = Utc::now();
            let year = year.unwrap_or(chrono::Datelike::year(&now));
            let month = month.unwrap_or(chrono::Datelike::month(&now));

            let response = client
                .get(format!(
                    "{}/api/v1/log/monthly?year={}&month={}&sort={}",
                    cli.api_url, year, month, sort
                ))
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Query failed ({}): {}", status, text);
                std::process::exit(1);
            }

            let entries: serde_json::Value = response.json().await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print_entries(&entries);
            }
        }

        Commands::Profile { set, reset } => {
            if reset {
                let response = client
                    .delete(format!("{}/api/v1/profile", cli.api_url))
                    .send()
                    .await?;
                if !response.status().is_success() {
                    let status = response.status();
                    let text = response.text().await.unwrap_or_default();
                    eprintln!("Failed ({}): {}", status, text);
                    std::process::exit(1);
                }
                println!("Profile reset");
                return Ok(());
            }

            if !set.is_empty() {
                let mut edits = Vec::new();
                for pair in &set {
                    let Some((field, value)) = pair.split_once('=') else {
                        eprintln!("Invalid edit '{}'; use field=value", pair);
                        std::process::exit(1);
                    };
                    edits.push(serde_json::json!({ "field": field, "value": value }));
                }

                let response = client
                    .patch(format!("{}/api/v1/profile", cli.api_url))
                    .json(&serde_json::json!({ "edits": edits }))
                    .send()
                    .await?;

                if !response.status().is_success() {
                    let status = response.status();
                    let text = response.text().await.unwrap_or_default();
                    eprintln!("Failed ({}): {}", status, text);
                    std::process::exit(1);
                }
            }

            let profile: serde_json::Value = client
                .get(format!("{}/api/v1/profile", cli.api_url))
                .send()
                .await?
                .json()
                .await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&profile)?);
            } else {
                print_profile(&profile);
            }
        }

        Commands::Status => {
            let response = client.get(format!("{}/health", cli.api_url)).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!("Nutrilog v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "API Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    println!("Store: {}", health["store"].as_str().unwrap_or("unknown"));

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to Nutrilog API at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the Nutrilog API server is running:");
                    eprintln!("  cargo run --bin nutrilog-api");
                    std::process::exit(1);
                }
            }
        }

        Commands::Export {
            start,
            end,
            export_format,
            output,
        } => {
            let url = format!(
                "{}/api/v1/export?start={}&end={}&format={}",
                cli.api_url, start, end, export_format
            );

            let response = client.get(&url).send().await?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Export failed ({}): {}", status, text);
                std::process::exit(1);
            }

            let data = response.text().await?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &data)?;
                    println!("Exported to {:?}", path);
                }
                None => {
                    print!("{}", data);
                }
            }
        }

        Commands::Config { output } => {
            let config = nutrilog::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Parse a CLI timestamp option into an RFC 3339 string, or None for "now".
fn parse_cli_time(time: Option<&str>) -> anyhow::Result<Option<String>> {
    match time {
        None | Some("now") => Ok(None),
        Some("yesterday") => Ok(Some((Utc::now() - Duration::days(1)).to_rfc3339())),
        Some(s) => {
            if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
                Ok(Some(dt.to_rfc3339()))
            } else if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                Ok(Some(
                    date.and_hms_opt(12, 0, 0)
                        .unwrap_or_default()
                        .and_utc()
                        .to_rfc3339(),
                ))
            } else {
                eprintln!("Invalid timestamp format: {}", s);
                std::process::exit(1);
            }
        }
    }
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

fn print_entries(entries: &serde_json::Value) {
    let rows = match entries.as_array() {
        Some(r) if !r.is_empty() => r,
        _ => {
            println!("No entries");
            return;
        }
    };

    println!("{:<17} {:<30} {:>8}  {:<10}", "Time", "Food", "kcal", "Meal");
    println!("{}", "-".repeat(70));

    for row in rows {
        let ts = row["timestamp"].as_str().unwrap_or("-");
        let time = ts.get(..16).unwrap_or(ts).replace('T', " ");
        println!(
            "{:<17} {:<30} {:>8.0}  {:<10}",
            time,
            row["food_item"].as_str().unwrap_or("-"),
            row["calorie_estimate"].as_f64().unwrap_or(0.0),
            row["meal_type"].as_str().unwrap_or("-"),
        );
    }
}

fn print_day(date: &str, entries: &serde_json::Value, water: &serde_json::Value) {
    println!("Log for {}", date);
    println!();
    print_entries(entries);
    println!();

    let total = water["total_ml"].as_f64().unwrap_or(0.0);
    let target = water["target_ml"].as_f64().unwrap_or(0.0);
    let progress = water["progress"].as_f64().unwrap_or(0.0);
    println!(
        "Water: {:.0} / {:.0} mL ({:.0}%)",
        total,
        target,
        progress * 100.0
    );
}

fn print_profile(profile: &serde_json::Value) {
    println!("Profile:");
    for field in ["age", "gender", "height_cm", "weight_kg", "activity_level"] {
        let value = &profile["profile"][field];
        let shown = if value.is_null() {
            "-".to_string()
        } else {
            value.to_string().trim_matches('"').to_string()
        };
        println!("  {:<15} {}", field, shown);
    }

    println!();
    println!("Derived metrics:");
    for (field, label) in [
        ("bmr", "BMR (kcal)"),
        ("daily_calories", "Daily calories"),
        ("bmi", "BMI"),
        ("recommended_water_ml", "Water target (mL)"),
    ] {
        let value = &profile["metrics"][field];
        let shown = value
            .as_f64()
            .map(|v| format!("{:.1}", v))
            .unwrap_or_else(|| "-".to_string());
        println!("  {:<18} {}", label, shown);
    }
}
