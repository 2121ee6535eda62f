//! Human readable report of a workout summary

use serde::Serialize;
use tinytemplate::{format_unescaped, TinyTemplate};

use crate::language::*;

use super::{render_fragments, Render, Syntax};

static TEMPLATE: &str = r#"{title}

{total}
{{ if has_strokes }}
{strokes_heading}
{{ for line in strokes }}{line}
{{ endfor }}{{ endif }}{{ if has_types }}
{types_heading}
{{ for line in types }}{line}
{{ endfor }}{{ endif }}{{ if has_intensities }}
{intensities_heading}
{{ for line in intensities }}{line}
{{ endfor }}{{ endif }}"#;

#[derive(Serialize)]
struct Context {
    title: String,
    total: String,
    has_strokes: bool,
    strokes_heading: String,
    strokes: Vec<String>,
    has_types: bool,
    types_heading: String,
    types: Vec<String>,
    has_intensities: bool,
    intensities_heading: String,
    intensities: Vec<String>,
}

/// The unit distances are labelled with. Pool types that mention yards are
/// measured in yards, everything else in metres. Nothing is converted.
pub fn units(pool_type: &str) -> &'static str {
    let pool_type = pool_type.to_lowercase();

    if pool_type == "scy" || pool_type.contains("yd") || pool_type.contains("yard") {
        "yd"
    } else {
        "m"
    }
}

/// Render a summary as a plain text report, styling each piece with the
/// given renderer. Strokes and stroke types with no distance are left out.
pub fn render_summary(
    renderer: &impl Render,
    summary: &WorkoutSummary,
    pool_type: &str,
) -> Result<String, tinytemplate::error::Error> {
    let unit = units(pool_type);

    let strokes: Vec<String> = Stroke::ALL
        .iter()
        .map(|stroke| (stroke.name(), summary.stroke_distances.get(*stroke)))
        .filter(|(_, distance)| *distance > 0)
        .map(|(name, distance)| row(renderer, Syntax::Stroke, name, distance, unit))
        .collect();

    let types: Vec<String> = StrokeType::ALL
        .iter()
        .map(|kind| (kind.name(), summary.stroke_type_distances.get(*kind)))
        .filter(|(_, distance)| *distance > 0)
        .map(|(name, distance)| row(renderer, Syntax::StrokeType, name, distance, unit))
        .collect();

    // only worth showing if something other than plain swimming was done
    let has_types = summary
        .stroke_type_distances
        .normal
        < summary.total_distance;

    let intensities: Vec<String> = summary
        .intensity_distances
        .iter()
        .map(|(key, distance)| row(renderer, Syntax::Intensity, key, *distance, unit))
        .collect();

    let total = render_fragments(
        renderer,
        &[
            (Syntax::Total, format!("{:<15}", "Total")),
            (
                Syntax::Distance,
                format!("{:>7}", summary.total_distance),
            ),
            (Syntax::Neutral, " ".to_string()),
            (Syntax::Unit, unit.to_string()),
        ],
    );

    let context = Context {
        title: renderer.style(Syntax::Title, "Workout summary"),
        total,
        has_strokes: !strokes.is_empty(),
        strokes_heading: renderer.style(Syntax::Heading, "Strokes"),
        strokes,
        has_types,
        types_heading: renderer.style(Syntax::Heading, "Stroke types"),
        types,
        has_intensities: !intensities.is_empty(),
        intensities_heading: renderer.style(Syntax::Heading, "Intensities"),
        intensities,
    };

    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&format_unescaped);
    tt.add_template("summary", TEMPLATE)?;

    let mut output = tt.render("summary", &context)?;
    while output.ends_with('\n') {
        output.pop();
    }
    output.push('\n');

    Ok(output)
}

fn row(renderer: &impl Render, syntax: Syntax, label: &str, distance: u64, unit: &str) -> String {
    render_fragments(
        renderer,
        &[
            (Syntax::Neutral, "  ".to_string()),
            (syntax, format!("{:<13}", label)),
            (Syntax::Distance, format!("{:>7}", distance)),
            (Syntax::Neutral, " ".to_string()),
            (Syntax::Unit, unit.to_string()),
        ],
    )
}
