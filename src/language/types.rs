//! Types describing a swim workout once it has been read

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The six stroke categories distance is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stroke {
    Freestyle,
    Backstroke,
    Breaststroke,
    Butterfly,
    Im,
    Choice,
}

impl Stroke {
    pub const ALL: [Stroke; 6] = [
        Stroke::Freestyle,
        Stroke::Backstroke,
        Stroke::Breaststroke,
        Stroke::Butterfly,
        Stroke::Im,
        Stroke::Choice,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stroke::Freestyle => "freestyle",
            Stroke::Backstroke => "backstroke",
            Stroke::Breaststroke => "breaststroke",
            Stroke::Butterfly => "butterfly",
            Stroke::Im => "im",
            Stroke::Choice => "choice",
        }
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Modifier describing how a stroke is being swum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeType {
    Drill,
    Kick,
    Scull,
    Normal,
}

impl StrokeType {
    pub const ALL: [StrokeType; 4] = [
        StrokeType::Drill,
        StrokeType::Kick,
        StrokeType::Scull,
        StrokeType::Normal,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StrokeType::Drill => "drill",
            StrokeType::Kick => "kick",
            StrokeType::Scull => "scull",
            StrokeType::Normal => "normal",
        }
    }
}

impl fmt::Display for StrokeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which family of colour words is recognized as an intensity. Both families
/// share the word "red", so only one can be active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensitySystem {
    #[default]
    Polar,
    International,
}

impl IntensitySystem {
    /// Look up a vocabulary by the literal name callers pass in. Only the
    /// exact lowercase names are accepted.
    pub fn from_name(name: &str) -> Option<IntensitySystem> {
        match name {
            "polar" => Some(IntensitySystem::Polar),
            "international" => Some(IntensitySystem::International),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            IntensitySystem::Polar => "polar",
            IntensitySystem::International => "international",
        }
    }

    /// Colour keywords in the order they are checked.
    pub fn colours(&self) -> &'static [&'static str] {
        match self {
            IntensitySystem::Polar => &POLAR_ZONES,
            IntensitySystem::International => &INTERNATIONAL_COLOURS,
        }
    }
}

pub const HEART_RATES: [u16; 9] = [150, 155, 160, 165, 170, 175, 180, 185, 190];

pub const HEART_RATES_BY_10: [u16; 7] = [24, 25, 26, 27, 28, 29, 30];

pub const STANDARD_EFFORTS: [&str; 4] = ["easy", "moderate", "strong", "fast"];

pub const POLAR_ZONES: [&str; 5] = ["grey", "blue", "green", "orange", "red"];

pub const INTERNATIONAL_COLOURS: [&str; 7] =
    ["yellow", "white", "pink", "red", "blue", "brown", "purple"];

/// An effort level recognized in a fragment of workout text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntensityTag {
    HeartRate(u16),
    HeartRateBy10(u16),
    Standard(&'static str),
    PolarZone(&'static str),
    International(&'static str),
}

impl IntensityTag {
    /// The key this intensity is accumulated under in a summary.
    pub fn key(&self) -> String {
        match self {
            IntensityTag::HeartRate(value) => format!("HR{}", value),
            IntensityTag::HeartRateBy10(value) => format!("HR{}0", value),
            IntensityTag::Standard(word) => word.to_string(),
            IntensityTag::PolarZone(word) => word.to_string(),
            IntensityTag::International(word) => word.to_string(),
        }
    }
}

/// A resolved piece of distance, as produced from one plain line or one
/// segment of a bracket group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSegment {
    pub distance: u64,
    pub stroke: Stroke,
    pub stroke_type: StrokeType,
    pub intensity: Option<IntensityTag>,
}

/// The contents of one bracket group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    pub distance: u64,
    pub segments: Vec<ParsedSegment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeDistances {
    pub freestyle: u64,
    pub backstroke: u64,
    pub breaststroke: u64,
    pub butterfly: u64,
    pub im: u64,
    pub choice: u64,
}

impl StrokeDistances {
    pub fn get(&self, stroke: Stroke) -> u64 {
        match stroke {
            Stroke::Freestyle => self.freestyle,
            Stroke::Backstroke => self.backstroke,
            Stroke::Breaststroke => self.breaststroke,
            Stroke::Butterfly => self.butterfly,
            Stroke::Im => self.im,
            Stroke::Choice => self.choice,
        }
    }

    fn slot(&mut self, stroke: Stroke) -> &mut u64 {
        match stroke {
            Stroke::Freestyle => &mut self.freestyle,
            Stroke::Backstroke => &mut self.backstroke,
            Stroke::Breaststroke => &mut self.breaststroke,
            Stroke::Butterfly => &mut self.butterfly,
            Stroke::Im => &mut self.im,
            Stroke::Choice => &mut self.choice,
        }
    }

    pub fn add(&mut self, stroke: Stroke, distance: u64) {
        let slot = self.slot(stroke);
        *slot = slot.saturating_add(distance);
    }

    pub fn total(&self) -> u64 {
        Stroke::ALL
            .iter()
            .fold(0u64, |sum, stroke| sum.saturating_add(self.get(*stroke)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeTypeDistances {
    pub drill: u64,
    pub kick: u64,
    pub scull: u64,
    pub normal: u64,
}

impl StrokeTypeDistances {
    pub fn get(&self, stroke_type: StrokeType) -> u64 {
        match stroke_type {
            StrokeType::Drill => self.drill,
            StrokeType::Kick => self.kick,
            StrokeType::Scull => self.scull,
            StrokeType::Normal => self.normal,
        }
    }

    pub fn add(&mut self, stroke_type: StrokeType, distance: u64) {
        let slot = match stroke_type {
            StrokeType::Drill => &mut self.drill,
            StrokeType::Kick => &mut self.kick,
            StrokeType::Scull => &mut self.scull,
            StrokeType::Normal => &mut self.normal,
        };
        *slot = slot.saturating_add(distance);
    }

    pub fn total(&self) -> u64 {
        StrokeType::ALL
            .iter()
            .fold(0u64, |sum, kind| sum.saturating_add(self.get(*kind)))
    }
}

/// Aggregate distances for a whole workout. Every distance recorded is
/// attributed to exactly one stroke and one stroke type, but only to an
/// intensity if one was present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSummary {
    pub total_distance: u64,
    pub stroke_distances: StrokeDistances,
    pub intensity_distances: BTreeMap<String, u64>,
    #[serde(default)]
    pub stroke_type_distances: StrokeTypeDistances,
}

impl WorkoutSummary {
    pub fn new() -> WorkoutSummary {
        WorkoutSummary::default()
    }

    /// Add a segment's distance, scaled by the repetition count in force.
    /// The intensity, if any, is credited with the same scaled distance.
    pub fn record(&mut self, segment: &ParsedSegment, multiplier: u64) {
        let distance = segment
            .distance
            .saturating_mul(multiplier);

        self.total_distance = self
            .total_distance
            .saturating_add(distance);
        self.stroke_distances
            .add(segment.stroke, distance);
        self.stroke_type_distances
            .add(segment.stroke_type, distance);

        if let Some(tag) = &segment.intensity {
            let entry = self
                .intensity_distances
                .entry(tag.key())
                .or_insert(0);
            *entry = entry.saturating_add(distance);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_distance == 0 && self.intensity_distances.is_empty()
    }
}
