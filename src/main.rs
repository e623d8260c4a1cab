use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use moodlog::{
    CalendarCell, Config, CsvStore, HistoryFilter, HttpClassifier, MonthGrid, MoodEntry,
    MoodError, MoodResult, MoodTracker, StoreOp, UserId, TIMESTAMP_FORMAT, UNKNOWN_EMOJI,
    WEEKDAYS,
};

#[derive(Debug, Parser)]
#[command(name = "moodlog", version, about = "Predict and visualize daily moods")]
struct Cli {
    /// User identity the history belongs to
    #[arg(long, env = "MOODLOG_USER")]
    user: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Classify a text entry and append it to the history
    Log { text: String },
    /// Show past entries, newest first
    History {
        /// Earliest date to include (inclusive)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Latest date to include (inclusive)
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Case-insensitive text search
        #[arg(long)]
        search: Option<String>,
    },
    /// Show every entry recorded on one date
    Detail { date: NaiveDate },
    /// Render the month calendar
    Calendar {
        year: i32,
        month: u32,
        #[arg(long)]
        json: bool,
    },
    /// Weekly per-mood entry counts
    Trend {
        #[arg(long)]
        json: bool,
    },
    /// Per-mood counts and percentages over the whole history
    Totals {
        #[arg(long)]
        json: bool,
    },
    /// Dump the raw history exactly as stored
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Irrecoverably delete the whole history
    Reset {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "moodlog=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(MoodError::Classification(message)) => {
            eprintln!("{}  {}", UNKNOWN_EMOJI, message);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> MoodResult<()> {
    let config = Config::from_env();
    let user = UserId::new(&cli.user)?;
    let store = CsvStore::new(&config.data_dir);
    let classifier = HttpClassifier::new(
        config.classifier_url.clone(),
        Duration::from_secs(config.classifier_timeout_secs),
    )?;
    let tracker = MoodTracker::new(store, classifier);

    match cli.command {
        Command::Log { text } => {
            let entry = tracker.log(&user, &text)?;
            println!("{}  {}", entry.emoji, entry.mood);
            println!("{}", entry.mood.motivation());
        }
        Command::History { from, to, search } => {
            let filter = HistoryFilter { from, to, search };
            let entries = tracker.history(&user, &filter)?;
            if entries.is_empty() {
                println!("No history yet. Log an entry first.");
            } else {
                for entry in entries.iter().rev() {
                    print_entry(entry);
                }
            }
        }
        Command::Detail { date } => {
            let entries = tracker.day_detail(&user, date)?;
            if entries.is_empty() {
                println!("No entries on {}.", date);
            } else {
                for entry in &entries {
                    print_entry(entry);
                }
            }
        }
        Command::Calendar { year, month, json } => {
            let grid = tracker.calendar(&user, year, month)?;
            if json {
                print_json(&grid);
            } else {
                print_grid(&grid);
            }
        }
        Command::Trend { json } => {
            let weeks = tracker.weekly_trend(&user)?;
            if json {
                print_json(&weeks);
            } else if weeks.is_empty() {
                println!("No history yet.");
            } else {
                for (week, counts) in &weeks {
                    let parts: Vec<String> = counts
                        .iter()
                        .map(|(mood, count)| format!("{} {}", mood, count))
                        .collect();
                    println!("week of {}: {}", week, parts.join(", "));
                }
            }
        }
        Command::Totals { json } => {
            let shares = tracker.totals(&user)?;
            if json {
                print_json(&shares);
            } else if shares.is_empty() {
                println!("No history yet.");
            } else {
                for share in &shares {
                    println!(
                        "{:<8} {:>5}  {:>6.2}%",
                        share.mood.to_string(),
                        share.count,
                        share.percent
                    );
                }
            }
        }
        Command::Export { output } => {
            let contents = tracker.export(&user)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, contents)
                        .map_err(|e| MoodError::storage(StoreOp::Export, e))?;
                    println!("History written to {}", path.display());
                }
                None => print!("{}", contents),
            }
        }
        Command::Reset { yes } => {
            if !yes {
                return Err(MoodError::Validation(
                    "Refusing to delete the history without --yes".into(),
                ));
            }
            tracker.reset(&user)?;
            println!("History reset for {}.", user);
        }
    }

    Ok(())
}

fn print_entry(entry: &MoodEntry) {
    println!(
        "{}  {}  {:<8} {:+.1}  {}",
        entry.timestamp.format(TIMESTAMP_FORMAT),
        entry.emoji,
        entry.mood.to_string(),
        entry.score,
        entry.text
    );
}

fn print_json<T: serde::Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).expect("JSON serialization failed")
    );
}

fn print_grid(grid: &MonthGrid) {
    println!("Mood calendar {}-{:02}", grid.year, grid.month);
    for name in WEEKDAYS {
        print!("{:>8}", name);
    }
    println!();
    for row in &grid.cells {
        for cell in row {
            match cell {
                CalendarCell::Empty => print!("{:>8}", "·"),
                CalendarCell::Day { day, summary: None } => print!("{:>8}", day),
                CalendarCell::Day {
                    day,
                    summary: Some(data),
                } => print!("{:>5} {}", day, data.emoji),
            }
        }
        println!();
    }

    let mut tooltips = false;
    for cell in grid.cells.iter().flatten() {
        if let CalendarCell::Day {
            summary: Some(data), ..
        } = cell
        {
            if !tooltips {
                println!();
                tooltips = true;
            }
            println!("  {}", data.tooltip);
        }
    }
}
