// SVG to PNG conversion via the external rsvg-convert binary
use std::path::Path;

use anyhow::{Context, Result};
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct SvgRasterizer {
    binary: String,
}

impl SvgRasterizer {
    pub fn new(binary: String) -> Self {
        Self { binary }
    }

    pub async fn rasterize(&self, svg: &Path, png: &Path) -> Result<()> {
        let output = Command::new(&self.binary)
            .arg("-o")
            .arg(png)
            .arg(svg)
            .output()
            .await
            .with_context(|| format!("failed to run {}", self.binary))?;

        if !output.status.success() {
            anyhow::bail!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                String::from_utf8_lossy(&output.stderr)
            );
        }
        Ok(())
    }
}
