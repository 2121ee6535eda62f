#[cfg(test)]
mod verify {
    use swimlog::language::*;
    use swimlog::parsing::{self, parse_workout_text, Options, Parser, ParsingError};

    fn trim(s: &str) -> &str {
        s.strip_prefix('\n')
            .unwrap_or(s)
    }

    fn polar(content: &str) -> WorkoutSummary {
        parse_workout_text(content, "polar").unwrap()
    }

    fn assert_balanced(summary: &WorkoutSummary) {
        assert_eq!(
            summary
                .stroke_distances
                .total(),
            summary.total_distance
        );
        assert_eq!(
            summary
                .stroke_type_distances
                .total(),
            summary.total_distance
        );
    }

    #[test]
    fn repetition_on_plain_line() {
        let summary = polar("4x100 free");

        assert_eq!(summary.total_distance, 400);
        assert_eq!(
            summary
                .stroke_distances
                .freestyle,
            400
        );
        assert!(summary
            .intensity_distances
            .is_empty());
        assert_balanced(&summary);
    }

    #[test]
    fn repetition_of_group() {
        let summary = polar("4x(100 fly + 100 free)");

        assert_eq!(summary.total_distance, 800);
        assert_eq!(
            summary
                .stroke_distances
                .butterfly,
            400
        );
        assert_eq!(
            summary
                .stroke_distances
                .freestyle,
            400
        );
        assert_balanced(&summary);
    }

    #[test]
    fn group_across_lines() {
        let summary = polar(trim(
            r#"
2x(
100 back
100 breast
)
            "#,
        ));

        assert_eq!(summary.total_distance, 400);
        assert_eq!(
            summary
                .stroke_distances
                .backstroke,
            200
        );
        assert_eq!(
            summary
                .stroke_distances
                .breaststroke,
            200
        );
        assert_balanced(&summary);
    }

    #[test]
    fn heart_rate_precedence() {
        let summary = polar("200 free hr165");

        assert_eq!(
            summary
                .intensity_distances
                .get("HR165"),
            Some(&200)
        );
        assert_eq!(
            summary
                .intensity_distances
                .len(),
            1
        );
        for zone in POLAR_ZONES {
            assert!(!summary
                .intensity_distances
                .contains_key(zone));
        }
    }

    #[test]
    fn standalone_multiplier_then_group() {
        let summary = polar("3x\n(50 fly)");

        assert_eq!(summary.total_distance, 150);
        assert_eq!(
            summary
                .stroke_distances
                .butterfly,
            150
        );
    }

    #[test]
    fn standalone_multiplier_then_line() {
        let summary = polar("2x\n100 back easy\n100 free");

        assert_eq!(summary.total_distance, 300);
        assert_eq!(
            summary
                .stroke_distances
                .backstroke,
            200
        );
        // the multiplier only applies to the line right after it
        assert_eq!(
            summary
                .stroke_distances
                .freestyle,
            100
        );
        assert_eq!(
            summary
                .intensity_distances
                .get("easy"),
            Some(&200)
        );
    }

    #[test]
    fn empty_input() {
        for content in ["", "   ", "\n\n", " \t \n  \r\n"] {
            let summary = polar(content);

            assert_eq!(summary, WorkoutSummary::default());
            assert_eq!(summary.total_distance, 0);
            for stroke in Stroke::ALL {
                assert_eq!(
                    summary
                        .stroke_distances
                        .get(stroke),
                    0
                );
            }
            assert!(summary
                .intensity_distances
                .is_empty());
        }
    }

    #[test]
    fn invalid_vocabulary() {
        let result = parse_workout_text("100 free", "metric");
        assert!(matches!(result, Err(ParsingError::InvalidInput(_))));

        let result = parse_workout_text("", "");
        assert!(matches!(result, Err(ParsingError::InvalidInput(_))));

        let result = parse_workout_text("100 free", "POLAR");
        assert!(matches!(result, Err(ParsingError::InvalidInput(_))));
    }

    #[test]
    fn vocabulary_isolation() {
        let content = "100 free yellow\n100 back orange";

        let summary = parse_workout_text(content, "polar").unwrap();
        assert!(!summary
            .intensity_distances
            .contains_key("yellow"));
        assert_eq!(
            summary
                .intensity_distances
                .get("orange"),
            Some(&100)
        );

        let summary = parse_workout_text(content, "international").unwrap();
        assert_eq!(
            summary
                .intensity_distances
                .get("yellow"),
            Some(&100)
        );
        assert!(!summary
            .intensity_distances
            .contains_key("orange"));
    }

    #[test]
    fn heart_rate_by_ten_key() {
        let summary = polar("4x50 free hr27");

        assert_eq!(
            summary
                .intensity_distances
                .get("HR270"),
            Some(&200)
        );
    }

    #[test]
    fn intensity_not_counted_for_untagged_lines() {
        let summary = polar("200 free easy\n400 back\n100 fly fast");

        assert_eq!(summary.total_distance, 700);
        let tagged: u64 = summary
            .intensity_distances
            .values()
            .sum();
        assert_eq!(tagged, 300);
        assert_balanced(&summary);
    }

    #[test]
    fn intensity_key_created_without_distance() {
        let summary = polar("Main set easy");

        assert_eq!(summary.total_distance, 0);
        assert_eq!(
            summary
                .intensity_distances
                .get("easy"),
            Some(&0)
        );
    }

    #[test]
    fn groups_carry_no_intensity() {
        let summary = polar("2x(100 free + 100 back) easy");

        assert_eq!(summary.total_distance, 400);
        assert!(summary
            .intensity_distances
            .is_empty());
    }

    #[test]
    fn bracket_styles_equivalent() {
        for content in [
            "3x(100 im + 50 choice)",
            "3x[100 im + 50 choice]",
            "3x{100 im + 50 choice}",
            "3x(100 im + 50 choice]",
        ] {
            let summary = polar(content);
            assert_eq!(summary.total_distance, 450, "{}", content);
            assert_eq!(
                summary
                    .stroke_distances
                    .im,
                300
            );
            assert_eq!(
                summary
                    .stroke_distances
                    .choice,
                150
            );
        }
    }

    #[test]
    fn multiplier_symbols() {
        for content in ["4x100 fly", "4X100 fly", "4×100 fly", "4*100 fly"] {
            assert_eq!(polar(content).total_distance, 400, "{}", content);
        }
        for content in ["2x\n100 fly", "2×\n100 fly", "2*\n100 fly", "2 x\n100 fly"] {
            assert_eq!(polar(content).total_distance, 200, "{}", content);
        }
    }

    #[test]
    fn group_line_multiplier_wins_over_pending() {
        let summary = polar("5x\n2x(50 back)\n50 free");

        assert_eq!(
            summary
                .stroke_distances
                .backstroke,
            100
        );
        assert_eq!(
            summary
                .stroke_distances
                .freestyle,
            50
        );
    }

    #[test]
    fn plus_separated_plain_line() {
        let summary = polar("200 fly + 100 + 2x50");

        assert_eq!(summary.total_distance, 400);
        assert_eq!(
            summary
                .stroke_distances
                .butterfly,
            400
        );
    }

    #[test]
    fn stroke_types_summed() {
        let summary = polar(trim(
            r#"
4x50 drill
200 kick
4x(25 scull + 25 free)
100 free
            "#,
        ));

        assert_eq!(summary.total_distance, 700);
        assert_eq!(
            summary
                .stroke_type_distances
                .drill,
            200
        );
        assert_eq!(
            summary
                .stroke_type_distances
                .kick,
            200
        );
        assert_eq!(
            summary
                .stroke_type_distances
                .scull,
            100
        );
        assert_eq!(
            summary
                .stroke_type_distances
                .normal,
            200
        );
        assert_balanced(&summary);
    }

    #[test]
    fn unterminated_group_lenient() {
        let summary = polar("100 free\n4x(\n100 fly\n100 back");

        assert_eq!(summary.total_distance, 100);
        assert_eq!(
            summary
                .stroke_distances
                .butterfly,
            0
        );
    }

    #[test]
    fn unterminated_group_strict() {
        let content = "100 free\n4x(\n100 fly\n100 back";
        let options = Options::new("polar")
            .unwrap()
            .strict();

        let result = parsing::parse(content, &options);
        assert_eq!(result, Err(ParsingError::UnterminatedGroup(11)));
    }

    #[test]
    fn text_after_group_close_ignored() {
        let summary = polar("(100 free) 200 back");

        assert_eq!(summary.total_distance, 100);
        assert_eq!(
            summary
                .stroke_distances
                .backstroke,
            0
        );
    }

    #[test]
    fn nested_brackets_flattened() {
        let summary = polar("2x(100 free + (50 back))");

        // the first closing bracket ends the group
        assert_eq!(summary.total_distance, 300);
        assert_eq!(
            summary
                .stroke_distances
                .backstroke,
            100
        );
    }

    #[test]
    fn incremental_parsing() {
        let mut input = Parser::new(Options::default());
        input.initialize("");

        input.read_line(0, "3x");
        assert_eq!(input.pending_multiplier(), 3);

        input.read_line(3, "[");
        assert!(input.is_collecting());
        assert_eq!(input.pending_multiplier(), 1);

        input.read_line(5, "100 free");
        input.read_line(14, "]");
        assert!(!input.is_collecting());

        let summary = input
            .finish()
            .unwrap();
        assert_eq!(summary.total_distance, 300);
    }

    #[test]
    fn realistic_workout() {
        let summary = parse_workout_text(
            trim(
                r#"
Warm up
400 free easy
4x50 kick moderate

Main
3x
(
100 fly strong
100 back
)
8x50 free hr170

Cool down
200 choice easy
            "#,
            ),
            "polar",
        )
        .unwrap();

        assert_eq!(summary.total_distance, 1800);
        assert_eq!(
            summary
                .stroke_distances
                .freestyle,
            1000
        );
        assert_eq!(
            summary
                .stroke_distances
                .butterfly,
            300
        );
        assert_eq!(
            summary
                .stroke_distances
                .backstroke,
            300
        );
        assert_eq!(
            summary
                .stroke_distances
                .choice,
            200
        );
        assert_eq!(
            summary
                .intensity_distances
                .get("easy"),
            Some(&600)
        );
        assert_eq!(
            summary
                .intensity_distances
                .get("moderate"),
            Some(&200)
        );
        assert_eq!(
            summary
                .intensity_distances
                .get("HR170"),
            Some(&400)
        );
        assert!(!summary
            .intensity_distances
            .contains_key("strong"));
        assert_balanced(&summary);
    }
}
