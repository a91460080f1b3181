// Data extents and the data-to-pixel affine mapping
use crate::domain::errors::RenderError;
use crate::domain::snapshot::Series;

/// A bounding rectangle, either a data extent or a pixel drawing rect.
/// Invariant: max >= min on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Region {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Tightest region enclosing every sample of every series.
    pub fn extent_of(series: &[Series]) -> Result<Self, RenderError> {
        let mut samples = series.iter().flat_map(|s| s.samples.iter());
        let first = samples.next().ok_or(RenderError::EmptyData)?;
        let mut extent = Region::new(first.x, first.y, first.x, first.y);
        for sample in samples {
            extent.min_x = extent.min_x.min(sample.x);
            extent.max_x = extent.max_x.max(sample.x);
            extent.min_y = extent.min_y.min(sample.y);
            extent.max_y = extent.max_y.max(sample.y);
        }
        Ok(extent)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }
}

/// Per-axis independent linear map taking `source` corners onto `target`
/// corners. One map is shared by every point of every series in a render
/// call, which keeps all channels comparable on one canvas.
#[derive(Debug, Clone, Copy)]
pub struct AffineMap {
    x: AxisMap,
    y: AxisMap,
}

#[derive(Debug, Clone, Copy)]
struct AxisMap {
    src_min: f64,
    src_span: f64,
    dst_min: f64,
    dst_max: f64,
}

impl AxisMap {
    fn between(
        axis: &'static str,
        src_min: f64,
        src_max: f64,
        dst_min: f64,
        dst_max: f64,
    ) -> Result<Self, RenderError> {
        let src_span = src_max - src_min;
        if src_span <= 0.0 {
            return Err(RenderError::DegenerateRegion {
                axis,
                min: src_min,
                max: src_max,
            });
        }
        if dst_max - dst_min <= 0.0 {
            return Err(RenderError::DegenerateRegion {
                axis,
                min: dst_min,
                max: dst_max,
            });
        }
        Ok(Self {
            src_min,
            src_span,
            dst_min,
            dst_max,
        })
    }

    // Interpolation keeps the endpoints exact: source.min lands on
    // target.min and source.max on target.max, bit for bit.
    fn apply(&self, value: f64) -> f64 {
        let t = (value - self.src_min) / self.src_span;
        self.dst_min * (1.0 - t) + self.dst_max * t
    }
}

impl AffineMap {
    pub fn between(source: &Region, target: &Region) -> Result<Self, RenderError> {
        Ok(Self {
            x: AxisMap::between("x", source.min_x, source.max_x, target.min_x, target.max_x)?,
            y: AxisMap::between("y", source.min_y, source.max_y, target.min_y, target.max_y)?,
        })
    }

    pub fn map_x(&self, x: f64) -> f64 {
        self.x.apply(x)
    }

    pub fn map_y(&self, y: f64) -> f64 {
        self.y.apply(y)
    }

    pub fn map(&self, x: f64, y: f64) -> (f64, f64) {
        (self.map_x(x), self.map_y(y))
    }
}
