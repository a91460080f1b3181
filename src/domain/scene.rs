// Renderable scene - ordered draw primitives in absolute pixel coordinates

/// The chart palette is deliberately tiny: e-ink panels render exactly
/// these three tones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
    Grey,
}

impl Color {
    pub fn as_str(self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::White => "white",
            Color::Grey => "grey",
        }
    }
}

/// Captions are drawn at the origin and then translated, scaled and
/// optionally rotated into place.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPlacement {
    pub translate: (f64, f64),
    pub scale: f64,
    pub rotate_degrees: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Color,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Color,
    },
    Text {
        content: String,
        placement: TextPlacement,
        font_size: Option<u32>,
        fill: Color,
    },
    Polyline {
        points: Vec<(f64, f64)>,
        stroke: Color,
        stroke_width: u32,
    },
}

/// One composed chart. `width`/`height` are the logical layout dimensions;
/// when `rotated` is set the serializer wraps the primitives in a single
/// rotate/translate group and reports the canvas size swapped.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub width: u32,
    pub height: u32,
    pub rotated: bool,
    pub primitives: Vec<Primitive>,
}
