use std::fmt;

use tracing::debug;

use crate::language::*;
use crate::parsing::classify::{detect_intensity, detect_stroke, detect_stroke_type};
use crate::parsing::group::{is_closing, is_opening, parse_group};
use crate::regex::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsingError {
    InvalidInput(String),
    UnterminatedGroup(usize),
}

impl ParsingError {
    /// Byte offset into the workout text the error refers to. Problems with
    /// the request itself rather than the text are reported at the start.
    pub fn offset(&self) -> usize {
        match self {
            ParsingError::InvalidInput(_) => 0,
            ParsingError::UnterminatedGroup(offset) => *offset,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ParsingError::InvalidInput(reason) => format!("invalid input: {}", reason),
            ParsingError::UnterminatedGroup(_) => "group opened but never closed".to_string(),
        }
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for ParsingError {}

/// What to do when the text ends while a bracket group is still open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Drop the unfinished group and carry on with what was read.
    #[default]
    Lenient,
    /// Fail with [`ParsingError::UnterminatedGroup`].
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub vocabulary: IntensitySystem,
    pub strictness: Strictness,
}

impl Options {
    /// Options for the named intensity vocabulary, which must be exactly
    /// "polar" or "international".
    pub fn new(vocabulary: &str) -> Result<Options, ParsingError> {
        match IntensitySystem::from_name(vocabulary) {
            Some(vocabulary) => Ok(Options {
                vocabulary,
                strictness: Strictness::Lenient,
            }),
            None => Err(ParsingError::InvalidInput(format!(
                "intensity system must be \"polar\" or \"international\", not \"{}\"",
                vocabulary
            ))),
        }
    }

    pub fn strict(self) -> Options {
        Options {
            strictness: Strictness::Strict,
            ..self
        }
    }
}

#[derive(Debug)]
enum State<'i> {
    Idle,
    CollectingBracket {
        opened: usize,
        multiplier: u64,
        buffer: Vec<&'i str>,
    },
}

/// Walks workout text one line at a time. A repetition count on a line of
/// its own is held until the next group or line consumes it; a group may
/// span several lines, in which case they are buffered until the closing
/// bracket arrives.
#[derive(Debug)]
pub struct Parser<'i> {
    source: &'i str,
    offset: usize,
    options: Options,
    pending: u64,
    state: State<'i>,
    summary: WorkoutSummary,
}

impl<'i> Parser<'i> {
    pub fn new(options: Options) -> Parser<'i> {
        Parser {
            source: "",
            offset: 0,
            options,
            pending: 1,
            state: State::Idle,
            summary: WorkoutSummary::new(),
        }
    }

    pub fn initialize(&mut self, content: &'i str) {
        self.source = content;
        self.offset = 0;
        self.pending = 1;
        self.state = State::Idle;
        self.summary = WorkoutSummary::new();
    }

    fn advance(&mut self, width: usize) {
        self.source = &self.source[width..];
        self.offset += width;
    }

    fn is_finished(&self) -> bool {
        self.source
            .is_empty()
    }

    /// The repetition count that will be applied to whatever comes next.
    pub fn pending_multiplier(&self) -> u64 {
        self.pending
    }

    pub fn is_collecting(&self) -> bool {
        matches!(self.state, State::CollectingBracket { .. })
    }

    pub fn summary(&self) -> &WorkoutSummary {
        &self.summary
    }

    pub fn parse_from_start(&mut self) -> Result<WorkoutSummary, ParsingError> {
        while !self.is_finished() {
            let (offset, line) = self.take_line();
            self.read_line(offset, line);
        }

        self.finish()
    }

    /// consume up to and including the next newline (or end)
    fn take_line(&mut self) -> (usize, &'i str) {
        let width = match self
            .source
            .find('\n')
        {
            Some(i) => i + 1,
            None => self
                .source
                .len(),
        };

        let offset = self.offset;
        let line = &self.source[..width];
        self.advance(width);

        (offset, line)
    }

    /// Feed one line of text, found at the given byte offset, through the
    /// state machine.
    pub fn read_line(&mut self, offset: usize, raw: &'i str) {
        let line = raw.trim();
        if line.is_empty() {
            return;
        }
        let offset = offset + (raw.len() - raw.trim_start().len());

        match self.state {
            State::Idle => {
                if let Some(count) = bare_multiplier(line) {
                    self.pending = count;
                } else if let Some(i) = line.find(is_opening) {
                    let multiplier = leading_multiplier(line).unwrap_or(self.pending);
                    self.pending = 1;

                    self.state = State::CollectingBracket {
                        opened: offset + i,
                        multiplier,
                        buffer: Vec::new(),
                    };

                    // brackets are all single byte characters
                    self.collect(&line[i + 1..]);
                } else {
                    let segment = parse_plain_line(line, self.options.vocabulary);
                    self.summary
                        .record(&segment, self.pending);
                    self.pending = 1;
                }
            }
            State::CollectingBracket { .. } => {
                self.collect(line);
            }
        }
    }

    fn collect(&mut self, fragment: &'i str) {
        let State::CollectingBracket {
            multiplier, buffer, ..
        } = &mut self.state
        else {
            return;
        };

        match fragment.find(is_closing) {
            Some(i) => {
                buffer.push(&fragment[..i]);

                let multiplier = *multiplier;
                let group = parse_group(&buffer.join("\n"));
                debug!(
                    "Group of {} segment{} x {}",
                    group
                        .segments
                        .len(),
                    if group
                        .segments
                        .len()
                        == 1
                    {
                        ""
                    } else {
                        "s"
                    },
                    multiplier
                );

                for segment in &group.segments {
                    self.summary
                        .record(segment, multiplier);
                }
                self.state = State::Idle;
            }
            None => {
                buffer.push(fragment);
            }
        }
    }

    /// End of input. Any group still open is either discarded or reported,
    /// depending on the strictness in effect.
    pub fn finish(&mut self) -> Result<WorkoutSummary, ParsingError> {
        let state = std::mem::replace(&mut self.state, State::Idle);
        self.pending = 1;

        if let State::CollectingBracket { opened, buffer, .. } = state {
            match self
                .options
                .strictness
            {
                Strictness::Strict => return Err(ParsingError::UnterminatedGroup(opened)),
                Strictness::Lenient => {
                    debug!(
                        "Discarding unterminated group at offset {} ({} lines)",
                        opened,
                        buffer.len()
                    );
                }
            }
        }

        Ok(std::mem::take(&mut self.summary))
    }
}

/// Read an ordinary line: every `4x100` style repetition and every bare
/// number in it is distance, and all of it goes to the one stroke named
/// somewhere on the line.
pub fn parse_plain_line(line: &str, vocabulary: IntensitySystem) -> ParsedSegment {
    let re = regex!(r"[\s+]+");

    let distance = re
        .split(line)
        .filter(|token| !token.is_empty())
        .filter_map(token_distance)
        .fold(0u64, |sum, distance| sum.saturating_add(distance));

    ParsedSegment {
        distance,
        stroke: detect_stroke(line),
        stroke_type: detect_stroke_type(line),
        intensity: detect_intensity(line, vocabulary),
    }
}

fn token_distance(token: &str) -> Option<u64> {
    let re = regex!(r"^([0-9]+)[xX×*]([0-9]+)$");

    if let Some(cap) = re.captures(token) {
        let reps: u64 = cap
            .get(1)?
            .as_str()
            .parse()
            .ok()?;
        let distance: u64 = cap
            .get(2)?
            .as_str()
            .parse()
            .ok()?;
        return Some(reps.saturating_mul(distance));
    }

    let re = regex!(r"^[0-9]+$");
    if re.is_match(token) {
        return token
            .parse()
            .ok();
    }

    None
}

/// A line consisting of nothing but a repetition count, such as `3x`.
fn bare_multiplier(line: &str) -> Option<u64> {
    let re = regex!(r"^([0-9]+)\s*[xX×*]$");

    re.captures(line)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

/// The repetition count a group line starts with, as in `4x(...)`.
fn leading_multiplier(line: &str) -> Option<u64> {
    let re = regex!(r"^([0-9]+)\s*[xX×*]");

    re.captures(line)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}
