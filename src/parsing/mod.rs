//! Reading free-form swim workouts into a summary of distances

use std::path::Path;
use tracing::debug;

use crate::language::{LoadingError, WorkoutSummary};

mod classify;
mod group;
mod parser;

pub use classify::{detect_intensity, detect_stroke, detect_stroke_type};
pub use group::parse_group;
pub use parser::{parse_plain_line, Options, Parser, ParsingError, Strictness};

/// Read a file and return an owned String. Ownership passes back to the
/// caller so that the text outlives the parser reading it.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}

/// Summarize workout text using the given options.
pub fn parse(content: &str, options: &Options) -> Result<WorkoutSummary, ParsingError> {
    let mut input = Parser::new(*options);
    input.initialize(content);

    let result = input.parse_from_start();

    match &result {
        Ok(summary) => {
            debug!(
                "Read {} in {} intensit{}",
                summary.total_distance,
                summary
                    .intensity_distances
                    .len(),
                if summary
                    .intensity_distances
                    .len()
                    == 1
                {
                    "y"
                } else {
                    "ies"
                }
            );
        }
        Err(error) => {
            debug!("error: {}", error);
        }
    }

    result
}

/// Summarize workout text, naming the intensity vocabulary as a string. Only
/// "polar" and "international" are accepted; anything else is rejected before
/// the text is looked at.
pub fn parse_workout_text(content: &str, vocabulary: &str) -> Result<WorkoutSummary, ParsingError> {
    let options = Options::new(vocabulary)?;
    parse(content, &options)
}
