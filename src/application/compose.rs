// Scene composition - background, highlight band, axes, captions, polylines
use crate::application::style::{RenderStyle, ResolvedInversion};
use crate::domain::region::{AffineMap, Region};
use crate::domain::scene::{Color, Primitive, Scene, TextPlacement};
use crate::domain::snapshot::Series;

/// Build the ordered primitive list for one chart. `series` holds the
/// already scaled channels that survived filtering, `map` the shared
/// data-to-pixel transform, and `threshold_px` the mapped pixel position of
/// the highlight threshold. Layout math uses the logical width/height; the
/// rotation flag only marks the scene for the serializer.
pub fn compose_scene(
    style: &RenderStyle,
    inversion: ResolvedInversion,
    draw: Region,
    series: &[Series],
    map: &AffineMap,
    threshold_px: f64,
    filtered_channel: Option<&str>,
) -> Scene {
    let width = f64::from(style.width);
    let height = f64::from(style.height);
    let padding = f64::from(style.padding);
    let foreground = inversion.foreground();

    let mut primitives = Vec::with_capacity(series.len() + 7);

    primitives.push(Primitive::Rect {
        x: 0.0,
        y: 0.0,
        width,
        height,
        fill: inversion.background(),
    });

    // Threshold pixel clamped into the drawing rect so the band stays a
    // valid non-negative rectangle for thresholds outside the data range.
    let band_y = threshold_px.clamp(draw.min_y, draw.max_y);
    if inversion.invert_highlight {
        // Shade the half below the threshold instead. Polyline y values
        // are flipped into screen coordinates, hence height - band_y.
        primitives.push(Primitive::Rect {
            x: draw.min_x,
            y: height - band_y,
            width: draw.width(),
            height: band_y - draw.min_y,
            fill: Color::Grey,
        });
    } else {
        primitives.push(Primitive::Rect {
            x: draw.min_x,
            y: draw.min_y,
            width: draw.width(),
            height: draw.max_y - band_y,
            fill: Color::Grey,
        });
    }

    let title = match filtered_channel {
        Some(name) => format!("Power consumption ({name})"),
        None => "Power consumption".to_string(),
    };
    primitives.push(Primitive::Text {
        content: title,
        placement: TextPlacement {
            translate: (width / 2.0 - 200.0, padding / 2.0 + 10.0),
            scale: 2.0,
            rotate_degrees: None,
        },
        font_size: None,
        fill: foreground,
    });

    // X axis along the bottom padding edge
    primitives.push(Primitive::Line {
        x1: padding,
        y1: height - padding,
        x2: width - padding,
        y2: height - padding,
        stroke: foreground,
    });
    primitives.push(Primitive::Text {
        content: format!("Time (Previous {} hours)", style.window_hours),
        placement: TextPlacement {
            translate: (width / 2.0 - 120.0, height - padding / 2.0 + 10.0),
            scale: 2.0,
            rotate_degrees: None,
        },
        font_size: None,
        fill: foreground,
    });

    // Y axis along the left padding edge, caption rotated to read upward
    primitives.push(Primitive::Line {
        x1: padding,
        y1: padding,
        x2: padding,
        y2: height - padding,
        stroke: foreground,
    });
    primitives.push(Primitive::Text {
        content: style.scale.axis_caption(style.highlight_watts),
        placement: TextPlacement {
            translate: (padding / 2.0 + 10.0, height / 2.0 + 100.0),
            scale: 2.0,
            rotate_degrees: Some(-90.0),
        },
        font_size: Some(12),
        fill: foreground,
    });

    for channel in series {
        let points = channel
            .samples
            .iter()
            .map(|sample| {
                let (x, y) = map.map(sample.x, sample.y);
                (x, height - y)
            })
            .collect();
        primitives.push(Primitive::Polyline {
            points,
            stroke: foreground,
            stroke_width: 2,
        });
    }

    Scene {
        width: style.width,
        height: style.height,
        rotated: style.rotate,
        primitives,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::snapshot::Sample;

    fn fixture() -> (RenderStyle, Region, Vec<Series>, AffineMap) {
        let style = RenderStyle {
            rotate: false,
            ..RenderStyle::default()
        };
        let draw = Region::new(50.0, 50.0, 1398.0, 1022.0);
        let series = vec![Series::new(
            "A".to_string(),
            vec![Sample::new(0.0, 10.0), Sample::new(2.0, 400.0)],
        )];
        let extent = Region::new(0.0, 10.0, 2.0, 400.0);
        let map = AffineMap::between(&extent, &draw).unwrap();
        (style, draw, series, map)
    }

    fn pinned(invert: bool, invert_highlight: bool) -> ResolvedInversion {
        ResolvedInversion {
            invert,
            invert_highlight,
        }
    }

    fn band_rect(scene: &Scene) -> (f64, f64, f64, f64) {
        match &scene.primitives[1] {
            Primitive::Rect {
                x,
                y,
                width,
                height,
                fill: Color::Grey,
            } => (*x, *y, *width, *height),
            other => panic!("expected the grey band rect, got {other:?}"),
        }
    }

    #[test]
    fn test_band_sides_flip_with_invert_highlight() {
        let (style, draw, series, map) = fixture();
        let threshold_px = map.map_y(300.0);

        let above = compose_scene(&style, pinned(false, false), draw, &series, &map, threshold_px, None);
        let below = compose_scene(&style, pinned(false, true), draw, &series, &map, threshold_px, None);

        let (_, above_y, _, above_h) = band_rect(&above);
        let (_, below_y, _, below_h) = band_rect(&below);

        // Values above the threshold sit at the top of the flipped canvas.
        assert_eq!(above_y, draw.min_y);
        assert_eq!(above_h, draw.max_y - threshold_px);
        // The flipped band covers the complementary strip at the bottom.
        assert_eq!(below_y, 1072.0 - threshold_px);
        assert_eq!(below_h, threshold_px - draw.min_y);
    }

    #[test]
    fn test_invert_changes_colors_but_not_geometry() {
        let (style, draw, series, map) = fixture();
        let threshold_px = map.map_y(300.0);

        let plain = compose_scene(&style, pinned(false, false), draw, &series, &map, threshold_px, None);
        let inverted = compose_scene(&style, pinned(true, false), draw, &series, &map, threshold_px, None);

        assert_eq!(plain.primitives.len(), inverted.primitives.len());
        for (a, b) in plain.primitives.iter().zip(&inverted.primitives) {
            match (a, b) {
                (
                    Primitive::Polyline { points: pa, .. },
                    Primitive::Polyline { points: pb, .. },
                ) => assert_eq!(pa, pb),
                (
                    Primitive::Line { x1, y1, x2, y2, .. },
                    Primitive::Line { x1: bx1, y1: by1, x2: bx2, y2: by2, .. },
                ) => assert_eq!((x1, y1, x2, y2), (bx1, by1, bx2, by2)),
                (
                    Primitive::Rect { x, y, width, height, .. },
                    Primitive::Rect { x: bx, y: by, width: bw, height: bh, .. },
                ) => assert_eq!((x, y, width, height), (bx, by, bw, bh)),
                (
                    Primitive::Text { content, placement, .. },
                    Primitive::Text { content: bc, placement: bp, .. },
                ) => {
                    assert_eq!(content, bc);
                    assert_eq!(placement, bp);
                }
                other => panic!("primitive kinds diverged: {other:?}"),
            }
        }
        match (&plain.primitives[0], &inverted.primitives[0]) {
            (Primitive::Rect { fill: a, .. }, Primitive::Rect { fill: b, .. }) => {
                assert_eq!(*a, Color::White);
                assert_eq!(*b, Color::Black);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_band_is_clamped_to_the_drawing_rect() {
        let (style, draw, series, map) = fixture();
        // Threshold far above every sample maps past the top of the rect.
        let threshold_px = map.map_y(10_000.0);
        assert!(threshold_px > draw.max_y);

        let scene = compose_scene(&style, pinned(false, false), draw, &series, &map, threshold_px, None);
        let (_, _, _, band_h) = band_rect(&scene);
        assert_eq!(band_h, 0.0);
    }

    #[test]
    fn test_title_names_the_filtered_channel() {
        let (style, draw, series, map) = fixture();
        let threshold_px = map.map_y(300.0);

        let aggregate = compose_scene(&style, pinned(false, false), draw, &series, &map, threshold_px, None);
        let filtered = compose_scene(&style, pinned(false, false), draw, &series, &map, threshold_px, Some("A"));

        let title_of = |scene: &Scene| match &scene.primitives[2] {
            Primitive::Text { content, .. } => content.clone(),
            other => panic!("expected the title text, got {other:?}"),
        };
        assert_eq!(title_of(&aggregate), "Power consumption");
        assert_eq!(title_of(&filtered), "Power consumption (A)");
    }
}
