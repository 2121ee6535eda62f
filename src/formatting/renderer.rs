use owo_colors::OwoColorize;

use super::{Render, Syntax};

/// Embellish fragments with ANSI escapes for display in a terminal.
pub struct Terminal;

impl Render for Terminal {
    fn style(&self, syntax: Syntax, content: &str) -> String {
        match syntax {
            Syntax::Neutral => content.to_string(),
            Syntax::Title => content // #000000 bold
                .bright_white()
                .bold()
                .to_string(),
            Syntax::Heading => content // #3465a4 (blue) bold
                .color(owo_colors::Rgb(52, 101, 164))
                .bold()
                .to_string(),
            Syntax::Total => content // #cc0000 (red) bold
                .color(owo_colors::Rgb(204, 0, 0))
                .bold()
                .to_string(),
            Syntax::Stroke => content // #8f5902 (brown)
                .color(owo_colors::Rgb(143, 89, 2))
                .to_string(),
            Syntax::StrokeType => content // #729fcf (light blue)
                .color(owo_colors::Rgb(114, 159, 207))
                .to_string(),
            Syntax::Intensity => content // #4e9a06 (green)
                .color(owo_colors::Rgb(78, 154, 6))
                .to_string(),
            Syntax::Distance => content // #ad7fa8 (purple) bold
                .color(owo_colors::Rgb(173, 127, 168))
                .bold()
                .to_string(),
            Syntax::Unit => content // #999999 (grey)
                .color(owo_colors::Rgb(153, 153, 153))
                .to_string(),
        }
    }
}

/// Apply markup to a sequence of (Syntax, content) fragments and combine them
/// into one String.
pub fn render_fragments(renderer: &impl Render, fragments: &[(Syntax, String)]) -> String {
    let mut output = String::new();

    for (syntax, content) in fragments {
        let rendered = renderer.style(*syntax, content);
        output.push_str(&rendered);
    }

    output
}
