use serde::Deserialize;

use crate::application::style::{ExtentStrategy, HighlightBasis, RenderStyle};
use crate::domain::scale::ValueScale;

#[derive(Debug, Deserialize, Clone)]
pub struct DeviceConfig {
    pub iotawatt: IotawattSettings,
    pub panel: PanelSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IotawattSettings {
    pub host: String,
    #[serde(default = "default_window_hours")]
    pub window_hours: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PanelSettings {
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    #[serde(default = "default_panel_width")]
    pub width: u32,
    #[serde(default = "default_dwell_secs")]
    pub dwell_secs: u64,
    #[serde(default = "default_rsvg_convert")]
    pub rsvg_convert: String,
}

/// Chart settings as written in `config/render.toml`. Everything is
/// optional; missing fields fall back to the style defaults, and the two
/// inversion flags stay unset so the renderer flips a coin per image.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RenderSettings {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub padding: Option<u32>,
    pub highlight_watts: Option<f64>,
    pub invert: Option<bool>,
    pub invert_highlight: Option<bool>,
    pub logarithmic: Option<bool>,
    pub rotate: Option<bool>,
    pub filter_before_normalize: Option<bool>,
    pub highlight_from_full_data: Option<bool>,
}

impl RenderSettings {
    pub fn into_style(self, window_hours: u32) -> RenderStyle {
        let defaults = RenderStyle::default();
        RenderStyle {
            width: self.width.unwrap_or(defaults.width),
            height: self.height.unwrap_or(defaults.height),
            padding: self.padding.unwrap_or(defaults.padding),
            highlight_watts: self.highlight_watts.unwrap_or(defaults.highlight_watts),
            invert: self.invert,
            invert_highlight: self.invert_highlight,
            channel_filter: None,
            extent_strategy: if self.filter_before_normalize.unwrap_or(false) {
                ExtentStrategy::FilterThenNormalize
            } else {
                ExtentStrategy::NormalizeThenFilter
            },
            highlight_basis: if self.highlight_from_full_data.unwrap_or(false) {
                HighlightBasis::FullData
            } else {
                HighlightBasis::ActiveExtent
            },
            rotate: self.rotate.unwrap_or(defaults.rotate),
            scale: if self.logarithmic.unwrap_or(false) {
                ValueScale::Logarithmic
            } else {
                ValueScale::Linear
            },
            window_hours,
        }
    }
}

fn default_window_hours() -> u32 {
    24
}

fn default_output_dir() -> String {
    "/tmp/iotawatt".to_string()
}

fn default_panel_width() -> u32 {
    1072
}

fn default_dwell_secs() -> u64 {
    15
}

fn default_rsvg_convert() -> String {
    "rsvg-convert".to_string()
}

pub fn load_device_config() -> anyhow::Result<DeviceConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/device"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_render_settings() -> anyhow::Result<RenderSettings> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/render"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
