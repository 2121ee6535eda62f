use swimlog::parsing::ParsingError;

/// Generate problem and detail messages for parsing errors
pub fn generate_error_message(error: &ParsingError) -> (String, String) {
    match error {
        ParsingError::InvalidInput(reason) => (
            "Invalid input".to_string(),
            format!(
                r#"
The workout could not be read because {}.

The intensity system must be one of "polar" or "international".
                "#,
                reason
            )
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::UnterminatedGroup(_) => (
            "Unterminated group".to_string(),
            r#"
A group of sets opened with '(', '[', or '{' must be closed with a matching
')', ']', or '}' before the end of the workout, for example:

    3x(
    100 free
    50 kick
    )

Without the closing bracket none of the group's distance can be counted.
            "#
            .trim_ascii()
            .to_string(),
        ),
    }
}
