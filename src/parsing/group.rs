//! Reading the body of a bracket group such as the `100 fly + 100 free` in
//! `4x(100 fly + 100 free)`.

use crate::language::*;
use crate::parsing::classify::{detect_stroke, detect_stroke_type};
use crate::regex::*;

pub(crate) fn is_opening(c: char) -> bool {
    matches!(c, '(' | '[' | '{')
}

pub(crate) fn is_closing(c: char) -> bool {
    matches!(c, ')' | ']' | '}')
}

fn is_bracket(c: char) -> bool {
    is_opening(c) || is_closing(c)
}

/// Parse the text between one pair of brackets. All three bracket styles are
/// equivalent and groups do not nest: any bracket characters left inside the
/// text are discarded before reading it.
///
/// Each line is split on `+` into segments, and each segment contributes the
/// number it starts with. Segments that don't start with a number are
/// skipped.
pub fn parse_group(raw: &str) -> Group {
    let stripped: String = raw
        .chars()
        .filter(|c| !is_bracket(*c))
        .collect();

    let mut group = Group::default();

    let re = regex!(r"\s*\+\s*");

    for line in stripped.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        for segment in re.split(line) {
            let segment = segment.trim();

            let distance = match leading_number(segment) {
                Some(distance) if distance > 0 => distance,
                _ => continue,
            };

            group.distance = group
                .distance
                .saturating_add(distance);
            group
                .segments
                .push(ParsedSegment {
                    distance,
                    stroke: detect_stroke(segment),
                    stroke_type: detect_stroke_type(segment),
                    intensity: None,
                });
        }
    }

    group
}

/// The run of digits a segment starts with. Anything after it, including a
/// repetition marker, is not considered.
fn leading_number(segment: &str) -> Option<u64> {
    let re = regex!(r"^[0-9]+");

    re.find(segment)?
        .as_str()
        .parse()
        .ok()
}
