use clap::{Arg, ArgAction, ArgMatches, Command};
use owo_colors::OwoColorize;
use std::io::{IsTerminal, Read};
use std::path::{Path, PathBuf};
use swimlog::formatting::{render_summary, Identity, Terminal};
use swimlog::journal::Journal;
use swimlog::language::{IntensitySystem, WorkoutSummary};
use swimlog::parsing::{self, Options};
use swimlog::service;
use tracing::{debug, Level};

mod editor;
mod problem;

#[derive(Eq, Debug, PartialEq)]
enum Output {
    Text,
    Json,
}

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let intensity = Arg::new("intensity")
        .short('i')
        .long("intensity")
        .default_value("polar")
        .help("Which colour words count as intensities: \"polar\" or \"international\".");

    let pool = Arg::new("pool")
        .short('p')
        .long("pool")
        .default_value("scm")
        .help("Pool type, used only to label distances. Pools in yards (scy) are shown in yd, everything else in m.");

    let output = Arg::new("output")
        .short('o')
        .long("output")
        .value_parser(["text", "json"])
        .default_value("text")
        .help("Whether to print a report for people or the summary as JSON.");

    let raw = Arg::new("raw-control-chars")
        .short('R')
        .long("raw-control-chars")
        .action(ArgAction::SetTrue)
        .help("Emit ANSI escape codes for colour even if output is redirected to a pipe or file.");

    let journal = Arg::new("journal")
        .short('j')
        .long("journal")
        .env("SWIMLOG_JOURNAL")
        .default_value("journal")
        .help("Directory holding recorded workouts, one JSON file per day.");

    let matches = Command::new("swimlog")
        .version(VERSION)
        .propagate_version(true)
        .author("Andrew Cowie")
        .about("A logbook for swim workouts.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Log progress to stderr. Repeat for more detail."),
        )
        .subcommand(
            Command::new("summarize")
                .about("Total up the distance swum in the given workout")
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Fail if a group of sets is opened but never closed, rather than leaving it out of the totals."),
                )
                .arg(intensity.clone())
                .arg(pool.clone())
                .arg(output.clone())
                .arg(raw.clone())
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the workout you want summarized. Use '-' to read from standard input."),
                ),
        )
        .subcommand(
            Command::new("record")
                .about("Summarize the given workout and keep it in the journal")
                .arg(intensity.clone())
                .arg(journal.clone())
                .arg(
                    Arg::new("date")
                        .required(true)
                        .help("The day the workout was swum, as YYYY-MM-DD."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the workout. Use '-' to read from standard input."),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("Show the workout recorded for a day")
                .arg(journal.clone())
                .arg(pool.clone())
                .arg(output.clone())
                .arg(raw.clone())
                .arg(
                    Arg::new("date")
                        .required(true)
                        .help("The day to show, as YYYY-MM-DD."),
                ),
        )
        .subcommand(
            Command::new("history")
                .about("List the days that have a recorded workout")
                .arg(journal.clone())
                .arg(pool.clone()),
        )
        .subcommand(
            Command::new("serve")
                .about("Answer JSON summary requests, one per line, on standard input"),
        )
        .subcommand(
            Command::new("language")
                .about("Language Server Protocol integration for editors")
                .arg(intensity.clone())
                .arg(pool.clone()),
        )
        .get_matches();

    let level = match matches.get_count("verbose") {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match matches.subcommand() {
        Some(("summarize", submatches)) => summarize(submatches),
        Some(("record", submatches)) => record(submatches),
        Some(("show", submatches)) => show(submatches),
        Some(("history", submatches)) => history(submatches),
        Some(("serve", _)) => {
            let stdin = std::io::stdin().lock();
            let stdout = std::io::stdout().lock();
            if let Err(error) = service::serve(stdin, stdout) {
                eprintln!("{}: {}", "error".bright_red(), error);
                std::process::exit(1);
            }
        }
        Some(("language", submatches)) => {
            let vocabulary = vocabulary_or_exit(submatches);
            let pool_type = string(submatches, "pool");
            editor::run_language_server(vocabulary, &pool_type);
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: swimlog [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn string(submatches: &ArgMatches, name: &str) -> String {
    submatches
        .get_one::<String>(name)
        .cloned()
        .unwrap_or_default()
}

fn output_of(submatches: &ArgMatches) -> Output {
    match submatches
        .get_one::<String>("output")
        .map(String::as_str)
    {
        Some("json") => Output::Json,
        _ => Output::Text,
    }
}

fn vocabulary_or_exit(submatches: &ArgMatches) -> IntensitySystem {
    let name = string(submatches, "intensity");
    match Options::new(&name) {
        Ok(options) => options.vocabulary,
        Err(error) => {
            eprintln!(
                "{}",
                problem::full_parsing_error(&error, Path::new("-"), "")
            );
            std::process::exit(1);
        }
    }
}

/// Read the workout from the named file, or from stdin if the name is "-".
fn read_or_exit(filename: &Path) -> String {
    if filename.to_str() == Some("-") {
        let mut content = String::new();
        if let Err(error) = std::io::stdin().read_to_string(&mut content) {
            eprintln!("{}: reading standard input: {}", "error".bright_red(), error);
            std::process::exit(1);
        }
        return content;
    }

    match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error));
            std::process::exit(1);
        }
    }
}

fn print_summary(summary: &WorkoutSummary, submatches: &ArgMatches) {
    let result = match output_of(submatches) {
        Output::Json => serde_json::to_string_pretty(summary)
            .map(|json| json + "\n")
            .map_err(|error| error.to_string()),
        Output::Text => {
            let pool_type = string(submatches, "pool");
            let colour = submatches.get_flag("raw-control-chars") || std::io::stdout().is_terminal();

            let rendered = if colour {
                render_summary(&Terminal, summary, &pool_type)
            } else {
                render_summary(&Identity, summary, &pool_type)
            };
            rendered.map_err(|error| error.to_string())
        }
    };

    match result {
        Ok(text) => print!("{}", text),
        Err(error) => {
            eprintln!("{}: {}", "error".bright_red(), error);
            std::process::exit(1);
        }
    }
}

fn summarize(submatches: &ArgMatches) {
    let filename = PathBuf::from(string(submatches, "filename"));
    debug!(?filename);

    let mut options = Options {
        vocabulary: vocabulary_or_exit(submatches),
        ..Options::default()
    };
    if submatches.get_flag("strict") {
        options = options.strict();
    }

    let content = read_or_exit(&filename);

    match parsing::parse(&content, &options) {
        Ok(summary) => print_summary(&summary, submatches),
        Err(error) => {
            eprintln!(
                "{}",
                problem::full_parsing_error(&error, &filename, &content)
            );
            std::process::exit(1);
        }
    }
}

fn record(submatches: &ArgMatches) {
    let date = string(submatches, "date");
    let filename = PathBuf::from(string(submatches, "filename"));
    let journal = Journal::new(string(submatches, "journal"));

    let options = Options {
        vocabulary: vocabulary_or_exit(submatches),
        ..Options::default()
    };

    let content = read_or_exit(&filename);

    let summary = match parsing::parse(&content, &options) {
        Ok(summary) => summary,
        Err(error) => {
            eprintln!(
                "{}",
                problem::concise_parsing_error(&error, &filename, &content)
            );
            std::process::exit(1);
        }
    };

    match journal.record(&date, &content, &summary) {
        Ok(entry) => {
            println!(
                "{} {}",
                entry.date,
                entry
                    .summary
                    .total_distance
            );
        }
        Err(error) => {
            eprintln!("{}", problem::concise_journal_error(&error));
            std::process::exit(1);
        }
    }
}

fn show(submatches: &ArgMatches) {
    let date = string(submatches, "date");
    let journal = Journal::new(string(submatches, "journal"));

    match journal.load(&date) {
        Ok(Some(entry)) => {
            if output_of(submatches) == Output::Text {
                println!("{}", entry.text.trim_end());
                println!();
            }
            print_summary(&entry.summary, submatches);
        }
        Ok(None) => {
            eprintln!(
                "{}: nothing recorded for {} in {}",
                "error".bright_red(),
                date,
                journal
                    .directory()
                    .display()
            );
            std::process::exit(1);
        }
        Err(error) => {
            eprintln!("{}", problem::concise_journal_error(&error));
            std::process::exit(1);
        }
    }
}

fn history(submatches: &ArgMatches) {
    let journal = Journal::new(string(submatches, "journal"));
    let unit = swimlog::formatting::units(&string(submatches, "pool"));

    let dates = match journal.dates() {
        Ok(dates) => dates,
        Err(error) => {
            eprintln!("{}", problem::concise_journal_error(&error));
            std::process::exit(1);
        }
    };

    for date in dates {
        match journal.load(&date) {
            Ok(Some(entry)) => {
                println!(
                    "{}  {:>7} {}",
                    entry.date,
                    entry
                        .summary
                        .total_distance,
                    unit
                );
            }
            Ok(None) => {}
            Err(error) => {
                eprintln!("{}", problem::concise_journal_error(&error));
            }
        }
    }
}
