//! `overlap` CLI -- record who is available when, and find the dates that work
//! for everyone.
//!
//! ## Usage
//!
//! ```sh
//! # Declare availability (stored in ./overlap.json unless --store/OVERLAP_STORE)
//! overlap add --person alice --start 2024-06-01 --end 2024-06-10
//! overlap add --person alice --start 2024-06-05 --end 2024-06-05 --unavailable
//! overlap add --person bob --start 2024-06-03 --end 2024-06-12
//!
//! # Replace someone's whole set with individually picked days
//! overlap set --person carol 2024-06-03 2024-06-04 2024-06-08
//!
//! # When is everyone free?
//! overlap common
//! overlap common --json
//!
//! # Aggregate an exported record list instead of the store
//! overlap common -i records.json
//! cat records.json | overlap common -i -
//!
//! # Per-day headcount view
//! overlap presence
//!
//! # Inspect and prune
//! overlap list
//! overlap delete <ID>
//! ```

mod file_store;

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use overlap_engine::date::{format_calendar_date, parse_calendar_date};
use overlap_engine::record::parse_records_json;
use overlap_engine::{
    compute_common_availability, expand, order_records, replace_availability, AggregateOptions,
    AvailabilityRecord, CommonAvailability, NewAvailability, PersonId, ProcessingOrder, RecordId,
    RecordStore,
};
use tracing_subscriber::EnvFilter;

use crate::file_store::JsonFileStore;

#[derive(Parser)]
#[command(
    name = "overlap",
    version,
    about = "Find the dates when everyone in a group is available"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path of the JSON record store
    #[arg(long, global = true, env = "OVERLAP_STORE", default_value = "overlap.json")]
    store: PathBuf,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Declare a date range as available (or unavailable)
    Add {
        /// Person declaring the range
        #[arg(long)]
        person: String,
        /// First day, YYYY-MM-DD
        #[arg(long)]
        start: String,
        /// Last day (inclusive), YYYY-MM-DD
        #[arg(long)]
        end: String,
        /// Mark the range as explicitly unavailable
        #[arg(long)]
        unavailable: bool,
    },
    /// List stored records, newest first
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Delete a record by id
    Delete {
        /// Record id as shown by `list`
        id: String,
    },
    /// Replace a person's availability with the given days
    Set {
        /// Person whose set is replaced
        #[arg(long)]
        person: String,
        /// Days the person is available, YYYY-MM-DD (none clears the set)
        dates: Vec<String>,
    },
    /// Show the date ranges when everyone is available
    Common {
        /// Read records from a JSON file ("-" for stdin) instead of the store
        #[arg(short, long)]
        input: Option<String>,
        /// Order in which overlapping records are applied
        #[arg(long, value_enum, default_value_t = OrderArg::Created)]
        order: OrderArg,
        /// Comma-separated roster to intersect (defaults to everyone with a record)
        #[arg(long)]
        roster: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Show who is available on each covered day
    Presence {
        /// Read records from a JSON file ("-" for stdin) instead of the store
        #[arg(short, long)]
        input: Option<String>,
        /// Order in which overlapping records are applied
        #[arg(long, value_enum, default_value_t = OrderArg::Created)]
        order: OrderArg,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    /// Oldest record first: the newest record wins
    Created,
    /// Input order: the last listed record wins
    Supplied,
}

impl From<OrderArg> for ProcessingOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::Created => ProcessingOrder::CreatedAscending,
            OrderArg::Supplied => ProcessingOrder::AsSupplied,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Add {
            person,
            start,
            end,
            unavailable,
        } => {
            let start = parse_date_arg("--start", &start)?;
            let end = parse_date_arg("--end", &end)?;
            let new = if unavailable {
                NewAvailability::unavailable(person, start, end)
            } else {
                NewAvailability::available(person, start, end)
            };

            let mut store = open_store(&cli.store)?;
            let record = store.create(new).context("Failed to add availability")?;
            println!("{}", record.id());
        }
        Commands::List { json } => {
            let records = open_store(&cli.store)?
                .list_availabilities()
                .context("Failed to list availability")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&records)?);
            } else {
                print_records(&records);
            }
        }
        Commands::Delete { id } => {
            let mut store = open_store(&cli.store)?;
            store
                .delete(&RecordId::new(id))
                .context("Failed to delete availability")?;
        }
        Commands::Set { person, dates } => {
            let days = dates
                .iter()
                .map(|d| parse_date_arg("date", d))
                .collect::<Result<Vec<_>>>()?;

            let mut store = open_store(&cli.store)?;
            let created = replace_availability(&mut store, &PersonId::new(person), days)
                .context("Failed to replace availability")?;
            for record in &created {
                println!(
                    "{}\t{}\t{}",
                    record.id(),
                    format_calendar_date(record.start_date()),
                    format_calendar_date(record.end_date())
                );
            }
        }
        Commands::Common {
            input,
            order,
            roster,
            json,
        } => {
            let records = load_records(&cli.store, input.as_deref())?;
            let options = AggregateOptions {
                order: order.into(),
                roster: roster.as_deref().map(parse_roster),
            };
            let result = compute_common_availability(&records, &options);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_common(&result);
            }
        }
        Commands::Presence { input, order, json } => {
            let records = load_records(&cli.store, input.as_deref())?;
            let presence = expand(&order_records(&records, order.into()));
            if json {
                println!("{}", serde_json::to_string_pretty(&presence)?);
            } else {
                for (day, people) in presence.iter() {
                    let names: Vec<&str> = people.iter().map(PersonId::as_str).collect();
                    println!(
                        "{}\t{}\t{}",
                        format_calendar_date(day),
                        people.len(),
                        names.join(", ")
                    );
                }
            }
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays parseable.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_store(path: &Path) -> Result<JsonFileStore> {
    JsonFileStore::open(path)
        .with_context(|| format!("Failed to open record store: {}", path.display()))
}

fn parse_date_arg(name: &str, value: &str) -> Result<NaiveDate> {
    match parse_calendar_date(value) {
        Some(date) => Ok(date),
        None => anyhow::bail!("Invalid {}: '{}'. Expected YYYY-MM-DD", name, value),
    }
}

/// `"alice, bob,,carol"` → `[alice, bob, carol]`
fn parse_roster(raw: &str) -> Vec<PersonId> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(PersonId::new)
        .collect()
}

/// Records from `input` (a path, or `-` for stdin) or else from the store.
fn load_records(store: &Path, input: Option<&str>) -> Result<Vec<AvailabilityRecord>> {
    let json = match input {
        None => {
            return open_store(store)?
                .list_availabilities()
                .context("Failed to list availability");
        }
        Some("-") => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            buf
        }
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path))?,
    };
    parse_records_json(&json).context("Failed to parse availability records")
}

fn print_records(records: &[AvailabilityRecord]) {
    if records.is_empty() {
        println!("No availability recorded yet.");
        return;
    }
    for record in records {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            record.id(),
            record.person_id(),
            format_calendar_date(record.start_date()),
            format_calendar_date(record.end_date()),
            if record.is_available() {
                "available"
            } else {
                "unavailable"
            }
        );
    }
}

fn print_common(result: &CommonAvailability) {
    if result.participants.is_empty() {
        println!("No availability recorded yet.");
        return;
    }

    let names: Vec<&str> = result.participants.iter().map(PersonId::as_str).collect();
    let noun = if names.len() == 1 { "person" } else { "people" };
    println!("Participants ({} {}): {}", names.len(), noun, names.join(", "));

    if result.ranges.is_empty() {
        println!("No common dates found.");
        return;
    }

    println!("Everyone is available:");
    for range in &result.ranges {
        let days = range.len_days();
        println!(
            "  {} to {} ({} {})",
            format_calendar_date(range.start_date),
            format_calendar_date(range.end_date),
            days,
            if days == 1 { "day" } else { "days" }
        );
    }
}
