//! steady - daily wellness check-in tracker
//!
//! Record daily check-ins and plans, then review streaks, trends, and
//! insights derived from your own history.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use steady_core::analytics::{streak_info, weekly_summary, StreakInfo, WeeklySummary};
use steady_core::types::{CheckinRecord, MetricKey, PlanRecord};
use steady_core::{Config, Database};

#[derive(Parser, Debug)]
#[command(name = "steady")]
#[command(about = "Daily wellness check-ins, streaks, and trends")]
#[command(version)]
struct Args {
    /// User whose records to read and write
    #[arg(long, global = true, default_value = "default")]
    user: String,

    /// Override the database path
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a daily check-in
    Checkin {
        /// Check-in date (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Metric score, e.g. --metric mood=7 (repeatable)
        #[arg(long = "metric", value_parser = parse_metric, required = true)]
        metrics: Vec<(MetricKey, f64)>,
    },

    /// Record a day's plan tally
    Plan {
        /// Plan date (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Actions completed
        #[arg(long)]
        completed: u32,

        /// Actions planned
        #[arg(long)]
        total: u32,
    },

    /// Show the weekly summary: trends, completion rate, insights
    Summary {
        /// Weeks of history to analyze (default: from config)
        #[arg(long)]
        weeks: Option<u32>,

        /// Reference date to anchor the window (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Export format (md = markdown, json = JSON)
        #[arg(long)]
        export: Option<String>,
    },

    /// Show streak counters and milestones
    Streak {
        /// Reference date (default: today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Export format (json = JSON)
        #[arg(long)]
        export: Option<String>,
    },
}

/// Parse a `key=value` metric argument into a scored metric.
fn parse_metric(s: &str) -> Result<(MetricKey, f64), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    let key: MetricKey = key.parse()?;
    let value: f64 = value
        .parse()
        .map_err(|_| format!("invalid score for {}: '{}'", key, value))?;
    if !(0.0..=10.0).contains(&value) {
        return Err(format!("{} score must be between 0 and 10", key));
    }
    Ok((key, value))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration and database
    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = steady_core::logging::init(&config.logging).ok();

    let db_path = args.db.clone().unwrap_or_else(Config::database_path);
    let db = Database::open(&db_path).context("failed to open database")?;
    db.migrate().context("failed to run database migrations")?;
    tracing::debug!(db = %db_path.display(), user = %args.user, "Database ready");

    let today = Local::now().date_naive();

    match args.command {
        Command::Checkin { date, metrics } => {
            let record = CheckinRecord {
                date: date.unwrap_or(today),
                metrics: metrics.into_iter().collect(),
            };
            db.insert_checkin(&args.user, &record)
                .context("failed to record check-in")?;
            println!("Recorded check-in for {}.", record.date);

            // A fresh check-in is the natural moment to show the streak.
            let info = streak_info(&db, &args.user, today)?;
            print_streak_line(&info);
        }
        Command::Plan {
            date,
            completed,
            total,
        } => {
            let record = PlanRecord {
                date: date.unwrap_or(today),
                completed_count: completed,
                total_count: total,
            };
            db.insert_plan(&args.user, &record)
                .context("failed to record plan")?;
            println!(
                "Recorded plan for {}: {} of {} done.",
                record.date, completed, total
            );
        }
        Command::Summary {
            weeks,
            date,
            export,
        } => {
            let weeks = weeks.unwrap_or(config.summary.weeks_back);
            let reference = date.unwrap_or(today);
            let summary = weekly_summary(&db, &args.user, reference, weeks)
                .context("failed to assemble weekly summary")?;

            match export.as_deref() {
                Some("json") => println!("{}", serde_json::to_string_pretty(&summary)?),
                Some("md") => print_summary_markdown(&summary),
                Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
                None => print_summary_terminal(&summary),
            }
        }
        Command::Streak { date, export } => {
            let reference = date.unwrap_or(today);
            let info = streak_info(&db, &args.user, reference)
                .context("failed to assemble streak info")?;

            match export.as_deref() {
                Some("json") => println!("{}", serde_json::to_string_pretty(&info)?),
                Some(other) => anyhow::bail!("Unknown export format: {}. Use 'json'", other),
                None => print_streak_terminal(&info),
            }
        }
    }

    Ok(())
}

// ============================================
// Terminal output
// ============================================

fn print_summary_terminal(summary: &WeeklySummary) {
    println!();
    println!(
        "WEEKLY SUMMARY  {} to {}",
        summary.period_start, summary.period_end
    );
    println!();

    if summary.checkin_count == 0 {
        println!("  No check-ins found for this period.");
        println!();
        return;
    }

    println!("TRENDS");
    for key in MetricKey::ALL {
        if let Some(result) = summary.trends.get(&key) {
            println!(
                "   {:<8} avg {:>4.1}  {}",
                key.display_name(),
                result.average,
                result.trend
            );
        }
    }
    println!();

    println!("PLANS");
    println!("   Completion rate: {}%", summary.completion_rate);
    println!();

    println!("INSIGHTS");
    for insight in &summary.insights {
        println!("   - {}", insight);
    }
    println!();
}

fn print_streak_terminal(info: &StreakInfo) {
    println!();
    println!("STREAKS");
    println!(
        "   Current:  {} day{}",
        info.streaks.current_streak,
        plural(info.streaks.current_streak)
    );
    println!(
        "   Longest:  {} day{}",
        info.streaks.longest_streak,
        plural(info.streaks.longest_streak)
    );
    println!("   Total check-ins: {}", info.streaks.total_checkins);
    println!(
        "   This week: {}% consistent",
        info.streaks.weekly_consistency_pct
    );
    if let Some(milestone) = info.milestone {
        println!("   Milestone reached: {} days", milestone);
    }
    if let Some(next) = info.next_milestone {
        println!(
            "   Next milestone: {} days ({} to go)",
            next,
            next - info.streaks.current_streak
        );
    }
    println!();
}

fn print_streak_line(info: &StreakInfo) {
    match info.next_milestone {
        Some(next) if info.streaks.current_streak > 0 => println!(
            "Streak: {} day{}. Next milestone: {} days.",
            info.streaks.current_streak,
            plural(info.streaks.current_streak),
            next
        ),
        _ => println!(
            "Streak: {} day{}.",
            info.streaks.current_streak,
            plural(info.streaks.current_streak)
        ),
    }
}

fn print_summary_markdown(summary: &WeeklySummary) {
    println!(
        "# Weekly Summary: {} to {}",
        summary.period_start, summary.period_end
    );
    println!();

    if summary.checkin_count == 0 {
        println!("*No check-ins found for this period.*");
        return;
    }

    println!("## Trends");
    println!();
    println!("| Metric | Average | Trend |");
    println!("|--------|---------|-------|");
    for key in MetricKey::ALL {
        if let Some(result) = summary.trends.get(&key) {
            println!(
                "| {} | {:.1} | {} |",
                key.display_name(),
                result.average,
                result.trend
            );
        }
    }
    println!();

    println!("## Plans");
    println!();
    println!("- **Completion rate:** {}%", summary.completion_rate);
    println!();

    println!("## Insights");
    println!();
    for insight in &summary.insights {
        println!("- {}", insight);
    }
}

fn plural(n: u32) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
