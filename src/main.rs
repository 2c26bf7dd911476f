//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `muslimkit` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All network and API functionality is implemented in the library crate.

use std::io::{self, Write};
use std::process;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;

use muslimkit::config::{Cli, Command, ScheduleArgs};
use muslimkit::domain::{fetch_cities, fetch_prayer_times, filter_cities, DailySchedule, Period};
use muslimkit::initialization::init_logger_with;
use muslimkit::HttpClient;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("muslimkit error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    let settings = cli.client_settings();
    settings.validate().context("Invalid client settings")?;
    let client = HttpClient::new(settings).context("Failed to set up HTTP client")?;

    match cli.command {
        Command::Cities { search } => print_cities(&client, search.as_deref()),
        Command::Schedule(args) => print_schedule(&client, &args),
        Command::Get {
            path,
            host,
            include_headers,
        } => print_raw(&client, &host, &path, include_headers),
    }
}

fn print_cities(client: &HttpClient, search: Option<&str>) -> Result<()> {
    let cities = fetch_cities(client).context("Failed to fetch city list")?;
    let shown = match search {
        Some(needle) => filter_cities(&cities, needle),
        None => cities.iter().collect(),
    };

    let mut out = io::stdout().lock();
    for city in &shown {
        writeln!(out, "{}\t{}", city.id, city.name)?;
    }
    if shown.is_empty() {
        eprintln!("No matching cities");
    }
    Ok(())
}

fn print_schedule(client: &HttpClient, args: &ScheduleArgs) -> Result<()> {
    let today = Local::now().date_naive();
    let current = Period::from_date(today);
    let period = Period::new(
        args.year.unwrap_or(current.year()),
        args.month.unwrap_or(current.month()),
    )?;

    let times = fetch_prayer_times(client, &args.city_id, period).with_context(|| {
        format!(
            "Failed to fetch prayer times for city {} ({}-{:02})",
            args.city_id,
            period.year(),
            period.month()
        )
    })?;

    let mut out = io::stdout().lock();
    writeln!(out, "{}, {}", times.location, times.region)?;
    writeln!(
        out,
        "{:<10}  {:>5}  {:>5}  {:>5}  {:>5}  {:>5}  {:>5}",
        "date", "fajr", "dhuha", "dhuhr", "asr", "magh.", "isha"
    )?;

    if args.today {
        let day = times
            .for_date(today)
            .with_context(|| format!("No entry for {today} in the fetched schedule"))?;
        write_day(&mut out, day)?;
    } else {
        for day in &times.schedule {
            write_day(&mut out, day)?;
        }
    }
    Ok(())
}

fn write_day(out: &mut impl Write, day: &DailySchedule) -> io::Result<()> {
    writeln!(
        out,
        "{:<10}  {:>5}  {:>5}  {:>5}  {:>5}  {:>5}  {:>5}",
        day.iso_date, day.fajr, day.dhuha, day.dhuhr, day.asr, day.maghrib, day.isha
    )
}

fn print_raw(client: &HttpClient, host: &str, path: &str, include_headers: bool) -> Result<()> {
    let response = client
        .get(host, path)
        .with_context(|| format!("GET https://{host}{path} failed"))?;

    let mut out = io::stdout().lock();
    if include_headers {
        out.write_all(response.header_text().as_bytes())?;
        out.write_all(b"\r\n\r\n")?;
    }
    out.write_all(response.body())?;
    out.flush()?;

    if !response.is_success() {
        eprintln!("HTTP status {}", response.status_code());
    }
    Ok(())
}
