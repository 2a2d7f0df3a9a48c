//! Bedtime estimation command.

use std::path::PathBuf;

use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::Args;
use serde::Serialize;

use betterrest_core::error::Result;
use betterrest_core::form::{BEDTIME_HEADLINE, COFFEE_HEADLINE, SLEEP_HEADLINE, WAKE_HEADLINE};
use betterrest_core::storage::parse_wake_time;
use betterrest_core::{BedtimeEstimator, Config, EstimateSource, SleepForm};

use super::select_model;

#[derive(Args)]
pub struct EstimateArgs {
    /// Wake-up time (HH:MM); defaults to the configured wake time
    #[arg(long)]
    wake: Option<String>,
    /// Desired hours of sleep (4-12, half-hour steps)
    #[arg(long)]
    sleep: Option<f64>,
    /// Daily cups of coffee (1-20)
    #[arg(long)]
    coffee: Option<u32>,
    /// Day the wake-up time falls on (YYYY-MM-DD); defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Sleep model artifact to use instead of the configured one
    #[arg(long)]
    model: Option<PathBuf>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct EstimateOutput {
    wake_up: NaiveDateTime,
    sleep_hours: f64,
    coffee_cups: u32,
    bedtime: NaiveDateTime,
    source: EstimateSource,
    predicted_sleep_secs: Option<f64>,
}

pub fn run(args: EstimateArgs) -> Result<()> {
    let config = Config::load_or_default();

    let wake = match args.wake.as_deref() {
        Some(value) => parse_wake_time(value)?,
        None => config.wake_time(),
    };
    let day = args.date.unwrap_or_else(|| Local::now().date_naive());
    let form = SleepForm::with_values(
        day,
        wake,
        args.sleep.unwrap_or_else(|| config.sleep_hours()),
        args.coffee.unwrap_or_else(|| config.coffee_cups()),
    );

    let estimator = BedtimeEstimator::new(select_model(args.model, &config));
    let estimate = estimator.estimate_detailed(&form.request());

    if args.json {
        let output = EstimateOutput {
            wake_up: form.wake_up(),
            sleep_hours: form.sleep_hours(),
            coffee_cups: form.coffee_cups(),
            bedtime: estimate.bedtime,
            source: estimate.source,
            predicted_sleep_secs: estimate.predicted_sleep_secs,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let time_format = if config.display.clock_24h {
        "%H:%M"
    } else {
        "%-I:%M %p"
    };

    println!("{WAKE_HEADLINE}");
    println!("  {}", form.wake_up().format(time_format));
    println!("{SLEEP_HEADLINE}");
    println!("  {}", form.sleep_label());
    println!("{COFFEE_HEADLINE}");
    println!("  {}", form.coffee_label());
    println!();
    println!("{BEDTIME_HEADLINE}");
    println!("  {}", estimate.bedtime.format(time_format));

    Ok(())
}
