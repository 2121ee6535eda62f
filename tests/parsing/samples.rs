use std::fs;
use std::path::{Path, PathBuf};

use swimlog::language::WorkoutSummary;
use swimlog::parsing::{self, Options};

fn workouts(dir: &Path) -> Vec<PathBuf> {
    let entries = fs::read_dir(dir).expect("Failed to read samples directory");

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.expect("Failed to read directory entry");
        let path = entry.path();

        if path
            .extension()
            .and_then(|s| s.to_str())
            == Some("swim")
        {
            files.push(path);
        }
    }
    files.sort();
    files
}

fn summarize(file: &Path) -> WorkoutSummary {
    let content = parsing::load(file)
        .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));
    let options = Options::default().strict();

    parsing::parse(&content, &options)
        .unwrap_or_else(|e| panic!("File {:?} failed to parse: {:?}", file, e))
}

#[test]
fn ensure_samples_parse() {
    let dir = Path::new("tests/samples/");

    assert!(dir.exists(), "samples directory missing");

    let files = workouts(dir);
    assert!(!files.is_empty(), "No .swim files found in samples directory");

    let mut failures = Vec::new();

    for file in &files {
        let content = parsing::load(&file)
            .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

        match parsing::parse(&content, &Options::default().strict()) {
            Ok(_) => {}
            Err(e) => {
                println!("File {:?} failed to parse: {:?}", file, e);
                failures.push(file.clone());
            }
        }
    }

    if !failures.is_empty() {
        panic!(
            "Sample files should parse successfully, but {} files failed",
            failures.len()
        );
    }
}

#[test]
fn ensure_samples_balance() {
    for file in workouts(Path::new("tests/samples/")) {
        let summary = summarize(&file);

        assert_eq!(
            summary
                .stroke_distances
                .total(),
            summary.total_distance,
            "strokes of {:?}",
            file
        );
        assert_eq!(
            summary
                .stroke_type_distances
                .total(),
            summary.total_distance,
            "stroke types of {:?}",
            file
        );

        let tagged: u64 = summary
            .intensity_distances
            .values()
            .sum();
        assert!(tagged <= summary.total_distance, "intensities of {:?}", file);
    }
}

#[test]
fn sample_totals() {
    let expected = [
        ("tests/samples/distance.swim", 3800),
        ("tests/samples/drills.swim", 1350),
        ("tests/samples/empty.swim", 0),
        ("tests/samples/sprint.swim", 1800),
    ];

    for (file, total) in expected {
        let summary = summarize(Path::new(file));
        assert_eq!(summary.total_distance, total, "{}", file);
    }
}

#[test]
fn distance_sample_strokes() {
    let summary = summarize(Path::new("tests/samples/distance.swim"));

    assert_eq!(
        summary
            .stroke_distances
            .freestyle,
        3000
    );
    assert_eq!(
        summary
            .stroke_distances
            .backstroke,
        400
    );
    assert_eq!(
        summary
            .stroke_distances
            .breaststroke,
        400
    );
    assert_eq!(
        summary
            .intensity_distances
            .get("HR270"),
        Some(&1000)
    );
    assert_eq!(
        summary
            .intensity_distances
            .get("green"),
        Some(&400)
    );
}
