// Render style configuration for one chart render
use rand::Rng;

use crate::domain::scale::ValueScale;
use crate::domain::scene::Color;

/// Which dataset the extent (and so the normalisation) is computed from
/// when a channel filter is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtentStrategy {
    /// Extent over the full snapshot, filter applied after mapping.
    /// Per-channel views stay visually comparable with the aggregate view.
    #[default]
    NormalizeThenFilter,
    /// Extent over the filtered subset only, so a single channel spans the
    /// full vertical range.
    FilterThenNormalize,
}

/// Which extent the highlight threshold is mapped through when
/// `FilterThenNormalize` is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightBasis {
    /// The same extent the polylines were normalised with.
    #[default]
    ActiveExtent,
    /// Always the full unfiltered extent, keeping the band at the same
    /// height across per-channel views.
    FullData,
}

/// Rendering parameters for one chart. Built once, never mutated by the
/// pipeline. `invert`/`invert_highlight` left as `None` are decided by the
/// random source injected into the render call.
#[derive(Debug, Clone)]
pub struct RenderStyle {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    pub highlight_watts: f64,
    pub invert: Option<bool>,
    pub invert_highlight: Option<bool>,
    pub channel_filter: Option<String>,
    pub extent_strategy: ExtentStrategy,
    pub highlight_basis: HighlightBasis,
    pub rotate: bool,
    pub scale: ValueScale,
    pub window_hours: u32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            width: 1448,
            height: 1072,
            padding: 50,
            highlight_watts: 1000.0,
            invert: None,
            invert_highlight: None,
            channel_filter: None,
            extent_strategy: ExtentStrategy::default(),
            highlight_basis: HighlightBasis::default(),
            rotate: true,
            scale: ValueScale::Linear,
            window_hours: 24,
        }
    }
}

impl RenderStyle {
    /// Pin both inversion choices, drawing from `rng` only where the
    /// caller left the choice open.
    pub fn resolve_inversion<R: Rng + ?Sized>(&self, rng: &mut R) -> ResolvedInversion {
        ResolvedInversion {
            invert: self.invert.unwrap_or_else(|| rng.random_bool(0.5)),
            invert_highlight: self
                .invert_highlight
                .unwrap_or_else(|| rng.random_bool(0.5)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedInversion {
    pub invert: bool,
    pub invert_highlight: bool,
}

impl ResolvedInversion {
    pub fn background(self) -> Color {
        if self.invert { Color::Black } else { Color::White }
    }

    pub fn foreground(self) -> Color {
        if self.invert { Color::White } else { Color::Black }
    }
}
