//! Keyword classifiers for fragments of workout text.
//!
//! These all work by case-insensitive substring search over an ordered list
//! of rules with the first matching rule winning. None of them can fail; text
//! that matches nothing gets the default category (or no intensity at all).

use crate::language::*;
use crate::regex::*;

const STROKE_RULES: [(&[&str], Stroke); 6] = [
    (&["fr", "free"], Stroke::Freestyle),
    (&["bk", "back"], Stroke::Backstroke),
    (&["br", "breast"], Stroke::Breaststroke),
    (&["fl", "fly", "butterfly"], Stroke::Butterfly),
    (&["im", "medley"], Stroke::Im),
    (&["ch", "choice"], Stroke::Choice),
];

const STROKE_TYPE_RULES: [(&[&str], StrokeType); 3] = [
    (&["drill", "dr"], StrokeType::Drill),
    (&["kick", "k"], StrokeType::Kick),
    (&["scull"], StrokeType::Scull),
];

/// Which stroke a fragment is describing. Anything unrecognized is assumed to
/// be freestyle.
pub fn detect_stroke(fragment: &str) -> Stroke {
    let lower = fragment.to_lowercase();

    STROKE_RULES
        .iter()
        .find(|(needles, _)| {
            needles
                .iter()
                .any(|needle| lower.contains(needle))
        })
        .map(|(_, stroke)| *stroke)
        .unwrap_or(Stroke::Freestyle)
}

pub fn detect_stroke_type(fragment: &str) -> StrokeType {
    let lower = fragment.to_lowercase();

    STROKE_TYPE_RULES
        .iter()
        .find(|(needles, _)| {
            needles
                .iter()
                .any(|needle| lower.contains(needle))
        })
        .map(|(_, kind)| *kind)
        .unwrap_or(StrokeType::Normal)
}

/// Find the effort level a fragment declares, if any. Heart rates are
/// checked before any keyword so that a heart rate always wins over a
/// colour appearing in the same fragment.
pub fn detect_intensity(fragment: &str, vocabulary: IntensitySystem) -> Option<IntensityTag> {
    let lower = fragment.to_lowercase();

    if let Some(value) = heart_rate(&lower, 3, &HEART_RATES) {
        return Some(IntensityTag::HeartRate(value));
    }

    if let Some(value) = heart_rate(&lower, 2, &HEART_RATES_BY_10) {
        return Some(IntensityTag::HeartRateBy10(value));
    }

    if let Some(word) = first_contained(&lower, &STANDARD_EFFORTS) {
        return Some(IntensityTag::Standard(word));
    }

    let word = first_contained(&lower, vocabulary.colours())?;
    match vocabulary {
        IntensitySystem::Polar => Some(IntensityTag::PolarZone(word)),
        IntensitySystem::International => Some(IntensityTag::International(word)),
    }
}

/// Look at the first `hr` followed by digits. It is a heart rate of this
/// family only if the run is exactly `width` digits long and its value is
/// one of the allowed ones; later occurrences on the line are not consulted.
fn heart_rate(lower: &str, width: usize, allowed: &[u16]) -> Option<u16> {
    let re = regex!(r"hr([0-9]+)");

    let digits = re
        .captures(lower)?
        .get(1)?
        .as_str();
    if digits.len() != width {
        return None;
    }

    let value = digits
        .parse::<u16>()
        .ok()?;
    allowed
        .contains(&value)
        .then_some(value)
}

fn first_contained(lower: &str, words: &[&'static str]) -> Option<&'static str> {
    words
        .iter()
        .copied()
        .find(|word| lower.contains(word))
}
