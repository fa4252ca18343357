//! timegrid CLI - Timetable grid to weekly schedule

#[cfg(feature = "cli")]
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use std::io::{self, Read};
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};
#[cfg(feature = "cli")]
use timegrid::{
    core::time::parse_hhmm,
    diagnostics::{check_grid, format_diagnostics},
    ingest::{grid_from_json_any, load_grid},
    parse_timetable_with_diagnostics,
    utils::logging::{init_logging, LoggingConfig},
    Grid, ParseOptions, Resources, ScheduleError, ScheduleResult, TimetableDocument,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "timegrid")]
#[command(version)]
#[command(about = "Turn an extracted timetable table into a weekly schedule", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Commands,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors and do not print diagnostics
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Parse a grid (.json or .csv; JSON from stdin if omitted) into a schedule
    Parse {
        /// Input file path
        input: Option<PathBuf>,

        /// Output file path (writes to stdout if not provided)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Parser options file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Start time (HH:MM) for subjects with no time anywhere in the table
        #[arg(long, value_parser = parse_start)]
        default_start: Option<chrono::NaiveTime>,

        /// Rows below a subject searched for its time
        #[arg(long)]
        lookahead: Option<usize>,

        /// Column holding one time slot per row, or "none"
        #[arg(long, value_parser = parse_time_column)]
        time_column: Option<TimeColumnArg>,

        /// Use English day tokens (Mo, Tu, We, Th, Fr)
        #[arg(long)]
        english: bool,

        /// Split cells that list several subjects with their own times
        #[arg(long)]
        split_cells: bool,
    },

    /// Report cells and lessons the parser dropped
    Check {
        /// Input file path
        input: Option<PathBuf>,

        /// Parser options file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,
    },

    /// Attach websites and applications to every lesson of a subject in a saved document
    Resources {
        /// Timetable document (JSON)
        document: PathBuf,

        /// Subject to update
        #[arg(short, long)]
        subject: String,

        /// Website to open (repeatable)
        #[arg(long = "website")]
        websites: Vec<String>,

        /// Application to start (repeatable)
        #[arg(long = "app")]
        applications: Vec<String>,
    },

    /// Show version and feature info
    Info,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// One block per weekday
    Text,
    /// The schedule as a JSON object
    Json,
    /// A timetable document with timestamp and resources
    Document,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy)]
struct TimeColumnArg(Option<usize>);

#[cfg(feature = "cli")]
fn parse_time_column(arg: &str) -> Result<TimeColumnArg, String> {
    if arg.eq_ignore_ascii_case("none") {
        return Ok(TimeColumnArg(None));
    }
    arg.parse::<usize>()
        .map(|column| TimeColumnArg(Some(column)))
        .map_err(|_| format!("expected a column index or \"none\", got '{}'", arg))
}

#[cfg(feature = "cli")]
fn parse_start(arg: &str) -> Result<chrono::NaiveTime, String> {
    parse_hhmm(arg).ok_or_else(|| format!("expected HH:MM, got '{}'", arg))
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&LoggingConfig::from_verbosity(cli.verbose, cli.quiet)) {
        eprintln!("Warning: {}", e);
    }

    match run(cli.command, cli.quiet) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "cli")]
fn run(command: Commands, quiet: bool) -> ScheduleResult<i32> {
    match command {
        Commands::Parse {
            input,
            output,
            format,
            config,
            default_start,
            lookahead,
            time_column,
            english,
            split_cells,
        } => {
            let mut options = load_options(config.as_deref(), english)?;
            if let Some(start) = default_start {
                options = options.with_default_start(start);
            }
            if let Some(rows) = lookahead {
                options = options.with_lookahead_rows(rows);
            }
            if let Some(TimeColumnArg(column)) = time_column {
                options = options.with_time_column(column);
            }
            if split_cells {
                options = options.with_split_multi_lesson_cells(true);
            }

            let grid = read_grid(input.as_deref())?;
            let parsed = parse_timetable_with_diagnostics(&grid, &options)?;

            if !quiet && parsed.has_warnings() {
                eprintln!(
                    "⚠ {} (run `timegrid check` for details)",
                    parsed.diagnostics.summary()
                );
            }

            let rendered = match format {
                Format::Text => parsed.schedule.to_string(),
                Format::Json => serde_json::to_string_pretty(&parsed.schedule)?,
                Format::Document => TimetableDocument::new(&parsed.schedule).to_json_pretty()?,
            };

            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    eprintln!(
                        "✓ {} lessons written to: {}",
                        parsed.schedule.total_lessons(),
                        path.display()
                    );
                }
                None => println!("{}", rendered.trim_end()),
            }
            Ok(0)
        }

        Commands::Check {
            input,
            config,
            no_color,
        } => {
            let options = load_options(config.as_deref(), false)?;
            let grid = read_grid(input.as_deref())?;
            let result = check_grid(&grid, &options);
            println!("{}", format_diagnostics(&result, !no_color));

            // Exit with error code if the table could not be parsed
            Ok(if result.has_errors() { 1 } else { 0 })
        }

        Commands::Resources {
            document,
            subject,
            websites,
            applications,
        } => {
            let mut doc = TimetableDocument::load(&document)?;
            let updated = doc.attach_resources(
                &subject,
                Resources {
                    websites,
                    applications,
                },
            );
            if updated == 0 {
                return Err(ScheduleError::document(format!(
                    "no lesson with subject '{}' (subjects: {})",
                    subject,
                    doc.subjects().join(", ")
                )));
            }
            doc.save(&document)?;
            eprintln!("✓ Updated {} lessons of '{}'", updated, subject);
            Ok(0)
        }

        Commands::Info => {
            println!("timegrid - Timetable grid to weekly schedule");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Features:");
            println!("  ✓ Weekday columns from header tokens (German and English presets)");
            println!("  ✓ Times from the cell, the row's time column or the rows below");
            println!("  ✓ Duplicate and overlap resolution per subject");
            println!("  ✓ Diagnostics for dropped cells");
            println!("  ✓ JSON documents with per-subject resources");
            println!();
            println!("Input formats:");
            println!("  - JSON: array of rows, or array of tables (first is used)");
            println!("  - CSV: one table, row 0 is the header");
            println!();
            Ok(0)
        }
    }
}

#[cfg(feature = "cli")]
fn load_options(config: Option<&Path>, english: bool) -> ScheduleResult<ParseOptions> {
    let mut options = match config {
        Some(path) => ParseOptions::from_toml_file(path)?,
        None => ParseOptions::default(),
    };
    if english {
        if options.has_custom_day_tokens() {
            return Err(ScheduleError::config(
                "--english would replace the [day_tokens] table from the config file",
            ));
        }
        options.day_tokens = ParseOptions::english().day_tokens;
    }
    Ok(options)
}

#[cfg(feature = "cli")]
fn read_grid(input: Option<&Path>) -> ScheduleResult<Grid> {
    match input {
        Some(path) if path != Path::new("-") => load_grid(path),
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            grid_from_json_any(&buffer)
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_file(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", text).unwrap();
        file
    }

    #[test]
    fn test_english_flag_switches_presets() {
        let options = load_options(None, true).unwrap();
        assert_eq!(options.day_tokens, ParseOptions::english().day_tokens);

        let file = config_file("lookahead_rows = 5\n");
        let options = load_options(Some(file.path()), true).unwrap();
        assert_eq!(options.lookahead_rows, 5);
        assert_eq!(options.day_tokens, ParseOptions::english().day_tokens);
    }

    #[test]
    fn test_english_flag_rejects_custom_tokens() {
        let file = config_file("[day_tokens]\nLun = \"Monday\"\n");
        assert!(matches!(
            load_options(Some(file.path()), true),
            Err(ScheduleError::InvalidConfig { .. })
        ));

        let options = load_options(Some(file.path()), false).unwrap();
        assert_eq!(options.day_tokens.get("Lun"), Some(&timegrid::Weekday::Monday));
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install timegrid --features cli");
    eprintln!("  timegrid parse [OPTIONS] [INPUT]");
}
