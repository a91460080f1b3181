// SVG serialization of a composed scene
use std::fmt::Write as _;

use crate::domain::scene::{Primitive, Scene, TextPlacement};

/// Serialize a scene into an SVG document. A rotated scene reports its
/// canvas size swapped and wraps the primitives in a single rotate group;
/// the primitive coordinates themselves are untouched.
pub fn write_svg(scene: &Scene) -> String {
    let (canvas_width, canvas_height) = if scene.rotated {
        (scene.height, scene.width)
    } else {
        (scene.width, scene.height)
    };

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg width=\"{canvas_width}\" height=\"{canvas_height}\" xmlns=\"http://www.w3.org/2000/svg\">"
    );
    if scene.rotated {
        let _ = write!(svg, "<g transform=\"translate(0, {}) rotate(-90)\">", scene.width);
    } else {
        svg.push_str("<g>");
    }
    for primitive in &scene.primitives {
        write_primitive(&mut svg, primitive);
    }
    svg.push_str("</g></svg>");
    svg
}

fn write_primitive(svg: &mut String, primitive: &Primitive) {
    match primitive {
        Primitive::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => {
            let _ = write!(
                svg,
                "<rect x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" fill=\"{}\"/>",
                fill.as_str()
            );
        }
        Primitive::Line { x1, y1, x2, y2, stroke } => {
            let _ = write!(
                svg,
                "<line x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\" stroke=\"{}\"/>",
                stroke.as_str()
            );
        }
        Primitive::Text {
            content,
            placement,
            font_size,
            fill,
        } => {
            let _ = write!(svg, "<text x=\"0\" y=\"0\"");
            if let Some(size) = font_size {
                let _ = write!(svg, " font-size=\"{size}\"");
            }
            let _ = write!(
                svg,
                " fill=\"{}\" transform=\"{}\">{}</text>",
                fill.as_str(),
                transform_of(placement),
                escape_text(content)
            );
        }
        Primitive::Polyline {
            points,
            stroke,
            stroke_width,
        } => {
            let joined = points
                .iter()
                .map(|(x, y)| format!("{x:.2},{y:.2}"))
                .collect::<Vec<_>>()
                .join(" ");
            let _ = write!(
                svg,
                "<polyline points=\"{joined}\" stroke=\"{}\" fill=\"none\" stroke-width=\"{stroke_width}\"/>",
                stroke.as_str()
            );
        }
    }
}

fn transform_of(placement: &TextPlacement) -> String {
    let (tx, ty) = placement.translate;
    let mut transform = format!("translate({tx}, {ty}) scale({})", placement.scale);
    if let Some(degrees) = placement.rotate_degrees {
        let _ = write!(transform, " rotate({degrees})");
    }
    transform
}

fn escape_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}
