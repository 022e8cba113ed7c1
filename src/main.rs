//! CLI entry point for the bikeshare explorer.
//!
//! Runs an interactive session (prompt for city, month and day, print the
//! statistics, page through raw rows, optionally restart) or, with
//! `--json`, prints a single report and exits.

mod prompt;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use bikeshare::analyzers::demographics::user_stats;
use bikeshare::analyzers::duration::duration_stats;
use bikeshare::analyzers::report::Report;
use bikeshare::analyzers::stations::station_stats;
use bikeshare::analyzers::time::time_stats;
use bikeshare::city::{City, CitySources};
use bikeshare::dataset::CityDataset;
use bikeshare::filter::{DayFilter, MonthFilter, filter};
use bikeshare::loader;
use bikeshare::output::{
    duration_lines, render_records, report_json, station_lines, time_lines, user_lines,
};
use bikeshare::paginator::RawDataPaginator;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::prompt::Prompt;

const SEPARATOR_WIDTH: usize = 40;

#[derive(Parser)]
#[command(name = "bikeshare")]
#[command(about = "Explore US bikeshare trip data", long_about = None)]
struct Cli {
    /// City to analyze (chicago, new york city, washington); prompted if omitted
    #[arg(long)]
    city: Option<City>,

    /// Month filter (all, january .. june); prompted if omitted
    #[arg(long)]
    month: Option<MonthFilter>,

    /// Day filter (all, monday .. sunday); prompted if omitted
    #[arg(long)]
    day: Option<DayFilter>,

    /// Directory holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, env = "BIKESHARE_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// JSON file mapping city names to CSV paths
    #[arg(long, value_name = "FILE")]
    sources: Option<PathBuf>,

    /// Print one JSON report and exit instead of running interactively
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Skip the raw data prompt
    #[arg(long, default_value_t = false)]
    no_raw: bool,
}

/// City and filters chosen for one round of analysis.
struct Selection {
    city: City,
    month: MonthFilter,
    day: DayFilter,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/bikeshare.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bikeshare.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    // stderr stays quiet by default so it does not interleave with prompts
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive(LevelFilter::WARN.into()));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive(LevelFilter::DEBUG.into()));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let sources = match &cli.sources {
        Some(path) => CitySources::from_json_file(path, &cli.data_dir)
            .with_context(|| format!("loading city map {}", path.display()))?,
        None => CitySources::new(&cli.data_dir),
    };
    for (city, path) in sources.iter() {
        debug!(city = %city, path = %path.display(), "City source");
    }

    if cli.json {
        run_report(&sources, &cli)
    } else {
        run_interactive(&sources, &cli)
    }
}

/// Non-interactive mode: one filtered report as JSON on stdout.
fn run_report(sources: &CitySources, cli: &Cli) -> Result<()> {
    let city = cli.city.context("--json requires --city")?;
    let month = cli.month.unwrap_or_default();
    let day = cli.day.unwrap_or_default();

    let dataset = load_selection(sources, city, month, day)?;
    let report = Report::build(&dataset, month, day)
        .with_context(|| format!("no {city} trips match month={month} day={day}"))?;

    println!("{}", report_json(&report)?);
    Ok(())
}

fn run_interactive(sources: &CitySources, cli: &Cli) -> Result<()> {
    let mut prompt = Prompt::new()?;
    let mut preset = Some((cli.city, cli.month, cli.day));

    loop {
        let (city, month, day) = preset.take().unwrap_or_default();
        let Some(selection) = get_filters(&mut prompt, city, month, day)? else {
            println!("\nExiting program.");
            return Ok(());
        };

        let dataset = load_selection(sources, selection.city, selection.month, selection.day)?;

        if dataset.is_empty() {
            println!("No matching records for the selected filters.");
            println!("{}", "-".repeat(SEPARATOR_WIDTH));
        } else {
            print_statistics(&dataset)?;
            if !cli.no_raw {
                display_raw_data(&mut prompt, &dataset)?;
            }
        }

        if !prompt.confirm("\nWould you like to restart? Enter yes or no.\n")? {
            break;
        }
    }

    Ok(())
}

/// Fills in any filter not given on the command line by prompting.
///
/// Returns `None` if the user aborts with Ctrl-C or Ctrl-D.
fn get_filters(
    prompt: &mut Prompt,
    city: Option<City>,
    month: Option<MonthFilter>,
    day: Option<DayFilter>,
) -> Result<Option<Selection>> {
    println!("Hello! Let's explore some US bikeshare data!");

    let city = match city {
        Some(c) => c,
        None => match prompt.choose::<City>(
            "Enter city to explore (chicago, new york city, washington): ",
            |a| format!("{a} is not a valid entry.  Please select a city from the list."),
        )? {
            Some(c) => c,
            None => return Ok(None),
        },
    };

    let month = match month {
        Some(m) => m,
        None => match prompt.choose::<MonthFilter>(
            "Enter month to explore (all, january, february, ... , june): ",
            |a| {
                format!(
                    "{a} is not a valid entry.  Please select 'all' or a month between January and June."
                )
            },
        )? {
            Some(m) => m,
            None => return Ok(None),
        },
    };

    let day = match day {
        Some(d) => d,
        None => match prompt.choose::<DayFilter>(
            "Enter day (all, monday, tuesday, ... sunday): ",
            |a| {
                format!(
                    "{a} is not a valid entry.  Please select 'all' or a day between Monday and Sunday."
                )
            },
        )? {
            Some(d) => d,
            None => return Ok(None),
        },
    };

    println!("{}", "-".repeat(SEPARATOR_WIDTH));
    Ok(Some(Selection { city, month, day }))
}

fn load_selection(
    sources: &CitySources,
    city: City,
    month: MonthFilter,
    day: DayFilter,
) -> Result<CityDataset> {
    let dataset = loader::load(sources, city)
        .with_context(|| format!("loading trip data for {city}"))?;
    let filtered = filter(&dataset, month, day);

    info!(
        city = %city,
        month = %month,
        day = %day,
        total = dataset.len(),
        matched = filtered.len(),
        "Selection loaded"
    );

    Ok(filtered)
}

fn print_statistics(dataset: &CityDataset) -> Result<()> {
    section("Calculating The Most Frequent Times of Travel...", || {
        Ok(time_lines(&time_stats(dataset)?))
    })?;
    section("Calculating The Most Popular Stations and Trip...", || {
        Ok(station_lines(&station_stats(dataset)?))
    })?;
    section("Calculating Trip Duration...", || {
        Ok(duration_lines(&duration_stats(dataset)?))
    })?;
    section("Calculating User Stats...", || Ok(user_lines(&user_stats(dataset))))?;
    Ok(())
}

/// Prints a titled block of lines followed by how long it took.
fn section(title: &str, compute: impl FnOnce() -> Result<Vec<String>>) -> Result<()> {
    println!("\n{title}\n");
    let start = Instant::now();

    for line in compute()? {
        println!("{line}");
    }

    println!("\nThis took {} seconds.", start.elapsed().as_secs_f64());
    println!("{}", "-".repeat(SEPARATOR_WIDTH));
    Ok(())
}

fn display_raw_data(prompt: &mut Prompt, dataset: &CityDataset) -> Result<()> {
    let mut pager = RawDataPaginator::new(dataset);

    while prompt.confirm("Would you like to view the raw data? (yes or no): ")? {
        let page = pager.next_page();
        if page.is_empty() {
            println!("No more raw data to display.");
            break;
        }
        println!("{}", render_records(page, dataset.schema()));
    }

    Ok(())
}
