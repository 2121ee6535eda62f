//! Request/response boundary around the workout parser.
//!
//! Requests arrive as JSON objects of the form
//!
//! ```text
//! { "workout": "4x100 free", "poolType": "scm", "intensitySystem": "polar" }
//! ```
//!
//! and are answered with either the summary or a message saying why one
//! could not be produced. The pool type is carried along for display but
//! plays no part in parsing.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::language::WorkoutSummary;
use crate::parsing::{self, Options, ParsingError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    pub workout: String,
    #[serde(default)]
    pub pool_type: String,
    pub intensity_system: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<WorkoutSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn success(summary: WorkoutSummary) -> Response {
        Response {
            ok: true,
            summary: Some(summary),
            error: None,
        }
    }

    pub fn failure(error: impl ToString) -> Response {
        Response {
            ok: false,
            summary: None,
            error: Some(error.to_string()),
        }
    }
}

impl From<Result<WorkoutSummary, String>> for Response {
    fn from(result: Result<WorkoutSummary, String>) -> Response {
        match result {
            Ok(summary) => Response::success(summary),
            Err(error) => Response::failure(error),
        }
    }
}

/// Validate an untyped request. Missing fields, or fields that are not
/// strings, are invalid input.
pub fn read_request(value: Value) -> Result<Request, ParsingError> {
    serde_json::from_value(value).map_err(|error| ParsingError::InvalidInput(error.to_string()))
}

pub fn summarize(request: &Request) -> Result<WorkoutSummary, ParsingError> {
    let options = Options::new(&request.intensity_system)?;
    parsing::parse(&request.workout, &options)
}

/// Answer one request, reducing any failure to the message that will be
/// shown to the person who wrote the workout.
pub fn handle(value: Value) -> Result<WorkoutSummary, String> {
    let request = read_request(value).map_err(|error| error.to_string())?;

    debug!(
        "Summarizing {} bytes ({}, pool {:?})",
        request
            .workout
            .len(),
        request.intensity_system,
        request.pool_type
    );

    summarize(&request).map_err(|error| error.to_string())
}

/// Answer one line of input, which must hold a JSON request.
pub fn respond(line: &str) -> Response {
    match serde_json::from_str::<Value>(line) {
        Ok(value) => Response::from(handle(value)),
        Err(error) => {
            warn!("Malformed request: {}", error);
            Response::failure(ParsingError::InvalidInput(error.to_string()))
        }
    }
}

/// Serve requests, one JSON object per line, until the input is exhausted.
/// Each request gets exactly one line of JSON in response.
pub fn serve<R, W>(reader: R, mut writer: W) -> std::io::Result<()>
where
    R: BufRead,
    W: Write,
{
    info!("Serving workout summaries");

    let mut count = 0usize;

    for line in reader.lines() {
        let line = line?;
        if line
            .trim()
            .is_empty()
        {
            continue;
        }

        let response = respond(&line);
        if let Some(error) = &response.error {
            debug!("Request failed: {}", error);
        }

        serde_json::to_writer(&mut writer, &response)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        count += 1;
    }

    info!(
        "Answered {} request{}",
        count,
        if count == 1 { "" } else { "s" }
    );
    Ok(())
}
