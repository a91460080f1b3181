// Display cycle service - Use case for one fetch-render-display pass
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::application::power_source::PowerDataSource;
use crate::application::render::render;
use crate::application::style::RenderStyle;
use crate::domain::snapshot::Snapshot;
use crate::infrastructure::display::EinkDisplay;
use crate::infrastructure::rasterizer::SvgRasterizer;

pub struct DisplayCycleService {
    source: Arc<dyn PowerDataSource>,
    style: RenderStyle,
    rasterizer: SvgRasterizer,
    display: EinkDisplay,
    output_dir: PathBuf,
    dwell: Duration,
}

impl DisplayCycleService {
    pub fn new(
        source: Arc<dyn PowerDataSource>,
        style: RenderStyle,
        rasterizer: SvgRasterizer,
        display: EinkDisplay,
        output_dir: PathBuf,
        dwell_secs: u64,
    ) -> Self {
        Self {
            source,
            style,
            rasterizer,
            display,
            output_dir,
            dwell: Duration::from_secs(dwell_secs),
        }
    }

    /// One pass: fetch a snapshot, render the aggregate chart plus one
    /// chart per channel, rasterize them all, then rotate the images on
    /// the panel.
    pub async fn run_once(&self) -> Result<()> {
        let snapshot = self.source.fetch_snapshot().await?;
        let channels: Vec<String> = snapshot.channel_names().map(str::to_string).collect();
        tracing::debug!("fetched {} channels", channels.len());

        // Scratch directory is rebuilt every cycle; only the latest fetch
        // is ever kept.
        let _ = tokio::fs::remove_dir_all(&self.output_dir).await;
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .with_context(|| format!("failed to create {}", self.output_dir.display()))?;

        self.produce_image(&snapshot, None).await?;
        for channel in &channels {
            self.produce_image(&snapshot, Some(channel)).await?;
        }

        self.cycle_images(&channels).await
    }

    async fn produce_image(&self, snapshot: &Snapshot, channel: Option<&str>) -> Result<PathBuf> {
        let name = variant_name(channel);
        let mut style = self.style.clone();
        style.channel_filter = channel.map(str::to_string);

        let output = render(snapshot, &style, &mut rand::rng())
            .with_context(|| format!("failed to render {name}"))?;
        for warning in &output.warnings {
            tracing::warn!("render warning for {name}: {warning:?}");
        }

        let svg_path = self.output_dir.join(format!("{name}.svg"));
        let png_path = self.output_dir.join(format!("{name}.png"));
        tokio::fs::write(&svg_path, &output.svg)
            .await
            .with_context(|| format!("failed to write {}", svg_path.display()))?;
        self.rasterizer.rasterize(&svg_path, &png_path).await?;
        Ok(png_path)
    }

    /// Alternate the aggregate chart with each per-channel chart, holding
    /// every image for the configured dwell.
    async fn cycle_images(&self, channels: &[String]) -> Result<()> {
        let all_png = self.output_dir.join("all.png");
        for channel in channels {
            let channel_png = self.output_dir.join(format!("source_{channel}.png"));
            self.display.show_image(&all_png).await?;
            tokio::time::sleep(self.dwell).await;
            self.display.show_image(&channel_png).await?;
            tokio::time::sleep(self.dwell).await;
        }
        Ok(())
    }
}

fn variant_name(channel: Option<&str>) -> String {
    match channel {
        Some(name) => format!("source_{name}"),
        None => "all".to_string(),
    }
}
