// Render pipeline - validated snapshot in, serialized SVG chart out
use rand::Rng;

use crate::application::compose::compose_scene;
use crate::application::style::{ExtentStrategy, HighlightBasis, RenderStyle};
use crate::domain::errors::RenderError;
use crate::domain::region::{AffineMap, Region};
use crate::domain::scale::ValueScale;
use crate::domain::snapshot::{Sample, Series, Snapshot};
use crate::infrastructure::svg_writer;

/// Recoverable conditions observed during a render. These never fail the
/// call; they are reported alongside the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderWarning {
    UnknownChannel { requested: String },
}

#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub svg: String,
    pub warnings: Vec<RenderWarning>,
}

/// Render one chart. Pure in its inputs: the same snapshot, style and
/// pinned inversion flags always produce byte-identical documents. `rng`
/// is consulted only for inversion flags the style leaves open. Fatal
/// errors propagate unchanged; no partial document is ever returned.
pub fn render<R: Rng + ?Sized>(
    snapshot: &Snapshot,
    style: &RenderStyle,
    rng: &mut R,
) -> Result<RenderOutput, RenderError> {
    let mut warnings = Vec::new();

    // The one lenient edge case: a filter naming a channel the snapshot
    // does not carry falls back to the aggregate view.
    let filter = match style.channel_filter.as_deref() {
        Some(name) if !snapshot.contains_channel(name) => {
            tracing::warn!("ignoring filter for unknown channel {name:?}");
            warnings.push(RenderWarning::UnknownChannel {
                requested: name.to_string(),
            });
            None
        }
        other => other,
    };

    let inversion = style.resolve_inversion(rng);

    let scaled = scale_series(snapshot.series(), style.scale)?;
    let scaled_threshold = style.scale.apply(style.highlight_watts)?;

    let visible: Vec<Series> = match filter {
        Some(name) => scaled.iter().filter(|s| s.name == name).cloned().collect(),
        None => scaled.clone(),
    };

    let extent_series: &[Series] = match style.extent_strategy {
        ExtentStrategy::NormalizeThenFilter => &scaled,
        ExtentStrategy::FilterThenNormalize => &visible,
    };
    let extent = Region::extent_of(extent_series)?;
    let draw = drawing_rect(style);
    let map = AffineMap::between(&extent, &draw)?;

    let threshold_px = match (style.highlight_basis, style.extent_strategy, filter) {
        (HighlightBasis::FullData, ExtentStrategy::FilterThenNormalize, Some(_)) => {
            let full_extent = Region::extent_of(&scaled)?;
            AffineMap::between(&full_extent, &draw)?.map_y(scaled_threshold)
        }
        _ => map.map_y(scaled_threshold),
    };

    let scene = compose_scene(style, inversion, draw, &visible, &map, threshold_px, filter);
    Ok(RenderOutput {
        svg: svg_writer::write_svg(&scene),
        warnings,
    })
}

fn drawing_rect(style: &RenderStyle) -> Region {
    let padding = f64::from(style.padding);
    Region::new(
        padding,
        padding,
        f64::from(style.width) - padding,
        f64::from(style.height) - padding,
    )
}

fn scale_series(series: &[Series], scale: ValueScale) -> Result<Vec<Series>, RenderError> {
    series
        .iter()
        .map(|s| {
            let samples = s
                .samples
                .iter()
                .map(|sample| Ok(Sample::new(sample.x, scale.apply(sample.y)?)))
                .collect::<Result<Vec<_>, RenderError>>()?;
            Ok(Series::new(s.name.clone(), samples))
        })
        .collect()
}
