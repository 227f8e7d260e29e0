use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use holidaykit::configuration::Configuration;
use holidaykit::holiday::holidayengine::HolidayEngine;
use holidaykit::holiday::holidayid::HolidayId;

/// A single day, or a whole year to list.
#[derive(Clone, Debug, PartialEq, Eq)]
enum When {
    Day(NaiveDate),
    Year(i32)
}

fn parse_when(s: &str) -> Result<When, String> {
    if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
        return s.parse().map(When::Year).map_err(|e| format!("invalid year '{}': {}", s, e));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(When::Day)
        .map_err(|e| format!("expected YYYY-MM-DD or YYYY, got '{}': {}", s, e))
}

/// Holiday lookup command line arguments.
#[derive(Parser, Debug)]
#[command(name = "holidaykit")]
#[command(about = "Tell whether a date is a holiday in a region, and which one")]
struct Args {
    /// Holiday configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Region name from the configuration
    region: String,

    /// Date as YYYY-MM-DD, or a year as YYYY to list its holidays (default: today)
    #[arg(value_name = "WHEN", value_parser = parse_when)]
    when: Option<When>,

    /// Locale of holiday names, e.g. fr or en_GB
    locale: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool
}

fn print_holiday(engine: &HolidayEngine, date: NaiveDate, id: &HolidayId, locale: Option<&str>) {
    println!("{}\t{}\t{}", date, id, engine.holiday_name(id, locale));
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = Configuration::from_reader(&args.config)?;
    let engine = config.engine(&args.region)?;
    let locale = args.locale.as_deref();

    match args.when.clone() {
        Some(When::Year(year)) => {
            for (id, date) in engine.calendar().holiday_dates(year) {
                print_holiday(&engine, date, &id, locale);
            }
        },
        Some(When::Day(date)) => print_day(&engine, date, locale),
        None => print_day(&engine, Local::now().date_naive(), locale)
    }
    Ok(())
}

fn print_day(engine: &HolidayEngine, date: NaiveDate, locale: Option<&str>) {
    match engine.get_holiday_id(&date) {
        Some(id) => print_holiday(engine, date, &id, locale),
        None => println!("{}\tnot a holiday", date)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "holiday lookup failed");
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_day_or_year() {
        assert_eq!(parse_when("2024"), Ok(When::Year(2024)));
        assert_eq!(parse_when("2024-07-14"), Ok(When::Day(NaiveDate::from_ymd_opt(2024, 7, 14).unwrap())));
        assert!(parse_when("14/07/2024").is_err());
        assert!(parse_when("24").is_err());
    }

    #[test]
    fn positional_arguments() {
        let args = Args::try_parse_from(["holidaykit", "data/config.json", "fr", "2024", "fr_FR"]).unwrap();
        assert_eq!(args.config, PathBuf::from("data/config.json"));
        assert_eq!(args.region, "fr");
        assert_eq!(args.when, Some(When::Year(2024)));
        assert_eq!(args.locale.as_deref(), Some("fr_FR"));
        assert!(!args.verbose);

        let args = Args::try_parse_from(["holidaykit", "-v", "data/config.json", "us"]).unwrap();
        assert_eq!(args.when, None);
        assert!(args.verbose);
    }

    #[test]
    fn rejects_missing_region_and_bad_dates() {
        assert!(Args::try_parse_from(["holidaykit", "data/config.json"]).is_err());
        assert!(Args::try_parse_from(["holidaykit", "data/config.json", "fr", "July"]).is_err());
    }
}
