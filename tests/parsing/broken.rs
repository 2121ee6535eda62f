use std::fs;
use std::path::Path;

use swimlog::parsing::{self, Options, ParsingError};

#[test]
fn ensure_fail() {
    let dir = Path::new("tests/broken/");

    assert!(dir.exists(), "broken directory missing");

    let entries = fs::read_dir(dir).expect("Failed to read broken directory");

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

    assert!(!files.is_empty(), "No .swim files found in broken directory");

    let mut unexpected_successes = Vec::new();

    for file in &files {
        let content = parsing::load(&file)
            .unwrap_or_else(|e| panic!("Failed to load file {:?}: {:?}", file, e));

        match parsing::parse(&content, &Options::default().strict()) {
            Ok(_) => {
                println!("File {:?} unexpectedly parsed successfully", file);
                unexpected_successes.push(file.clone());
            }
            Err(ParsingError::UnterminatedGroup(offset)) => {
                assert!(
                    content[offset..].starts_with(['(', '[', '{']),
                    "File {:?} reported offset {} which is not an opening bracket",
                    file,
                    offset
                );
            }
            Err(_) => {}
        }

        // the same text is accepted when not being strict
        assert!(
            parsing::parse(&content, &Options::default()).is_ok(),
            "File {:?} should parse leniently",
            file
        );
    }

    if !unexpected_successes.is_empty() {
        panic!(
            "Broken files should not to parse successfully, but {} files passed",
            unexpected_successes.len()
        );
    }
}

#[test]
fn lenient_drops_unclosed_group() {
    let content = parsing::load(Path::new("tests/broken/unclosed-late.swim")).unwrap();

    let summary = parsing::parse(&content, &Options::default()).unwrap();
    assert_eq!(summary.total_distance, 700);
}
