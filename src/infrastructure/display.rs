// E-ink panel control via fbink, lipc and the sysfs backlight
use std::path::Path;

use anyhow::{Context, Result};
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct EinkDisplay {
    panel_width: u32,
}

impl EinkDisplay {
    pub fn new(panel_width: u32) -> Self {
        Self { panel_width }
    }

    /// Take over the panel: keep the screensaver away, ignore touch input
    /// and turn the frontlight off.
    pub async fn acquire(&self) -> Result<()> {
        self.set_prop("com.lab126.powerd", "preventScreenSaver", "1")
            .await?;
        self.set_prop("com.lab126.deviced", "enable_touch", "0")
            .await?;
        self.set_brightness(0).await;
        Ok(())
    }

    /// Hand the panel back. Each restore step is attempted even if an
    /// earlier one fails; failures are logged.
    pub async fn release(&self) {
        if let Err(e) = self
            .set_prop("com.lab126.powerd", "preventScreenSaver", "0")
            .await
        {
            tracing::error!("failed to re-enable screensaver: {e:#}");
        }
        if let Err(e) = self
            .set_prop("com.lab126.deviced", "enable_touch", "1")
            .await
        {
            tracing::error!("failed to re-enable touch: {e:#}");
        }
        self.set_brightness(255).await;
    }

    pub async fn show_image(&self, png: &Path) -> Result<()> {
        tracing::debug!("displaying {}", png.display());
        let spec = format!(
            "file={},w={},halign=center,valign=center",
            png.display(),
            self.panel_width
        );
        self.run_fbink(&["-c", "-g", &spec]).await
    }

    /// Paint an error report line by line so failures are visible on the
    /// device itself.
    pub async fn show_error(&self, message: &str) {
        if let Err(e) = self.run_fbink(&["-c"]).await {
            tracing::error!("failed to clear panel: {e:#}");
            return;
        }
        for (index, line) in message.lines().enumerate() {
            let row = (index + 1).to_string();
            if let Err(e) = self.run_fbink(&["-x", "1", "-y", &row, line]).await {
                tracing::error!("failed to draw error line: {e:#}");
                return;
            }
        }
    }

    async fn run_fbink(&self, args: &[&str]) -> Result<()> {
        let status = Command::new("fbink")
            .args(args)
            .status()
            .await
            .context("failed to run fbink")?;
        if !status.success() {
            anyhow::bail!("fbink exited with {status}");
        }
        Ok(())
    }

    async fn set_prop(&self, service: &str, prop: &str, value: &str) -> Result<()> {
        let status = Command::new("/usr/bin/lipc-set-prop")
            .arg(service)
            .arg(prop)
            .arg(value)
            .status()
            .await
            .context("failed to run lipc-set-prop")?;
        if !status.success() {
            anyhow::bail!("lipc-set-prop {service} {prop} exited with {status}");
        }
        Ok(())
    }

    async fn set_brightness(&self, level: u32) {
        let Ok(mut entries) = tokio::fs::read_dir("/sys/class/backlight").await else {
            tracing::debug!("no backlight control available");
            return;
        };
        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path().join("brightness");
            match tokio::fs::write(&path, level.to_string()).await {
                Ok(()) => tracing::debug!("set {} to {level}", path.display()),
                Err(e) => tracing::warn!("failed to write {}: {e}", path.display()),
            }
        }
    }
}
