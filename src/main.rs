// Main entry point - Dependency injection and the display loop
mod domain;
mod application;
mod infrastructure;

use std::sync::Arc;

use crate::application::cycle_service::DisplayCycleService;
use crate::infrastructure::config::{load_device_config, load_render_settings};
use crate::infrastructure::display::EinkDisplay;
use crate::infrastructure::iotawatt_client::IotawattClient;
use crate::infrastructure::rasterizer::SvgRasterizer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let device = load_device_config()?;
    let style = load_render_settings()?.into_style(device.iotawatt.window_hours);

    // Create adapters (infrastructure layer)
    let source = Arc::new(IotawattClient::new(
        device.iotawatt.host.clone(),
        device.iotawatt.window_hours,
    ));
    let display = EinkDisplay::new(device.panel.width);
    let rasterizer = SvgRasterizer::new(device.panel.rsvg_convert.clone());

    // Create the cycle service (application layer)
    let cycle = DisplayCycleService::new(
        source,
        style,
        rasterizer,
        display.clone(),
        device.panel.output_dir.clone().into(),
        device.panel.dwell_secs,
    );

    // Any argument stops after a single pass (useful from cron or by hand)
    let run_once = std::env::args().nth(1).is_some();

    display.acquire().await?;
    println!("Starting power-dashboard cycle against {}", device.iotawatt.host);

    let result = run_cycles(&cycle, run_once).await;
    if let Err(e) = &result {
        tracing::error!("cycle failed: {e:#}");
        // Put the failure on the panel before handing the device back
        display.show_error(&format!("{e:#}")).await;
    }
    display.release().await;

    result
}

async fn run_cycles(cycle: &DisplayCycleService, run_once: bool) -> anyhow::Result<()> {
    loop {
        cycle.run_once().await?;
        if run_once {
            return Ok(());
        }
    }
}
