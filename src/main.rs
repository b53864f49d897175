//! canvas-input demo
//!
//! Replays an input script through one widget and prints the render
//! snapshot after every event that asked for a repaint.
//!
//! Usage: `canvas-input [--config PATH] SCRIPT...`

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use canvas_input::prelude::*;
use canvas_input::script;

/// Application name
const APP_NAME: &str = "canvas-input";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_file(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("{} v{} starting...", APP_NAME, canvas_input::core::VERSION);

    let (config_path, script_text) = parse_args(std::env::args().skip(1))?;
    let config = match config_path {
        Some(path) => InputConfig::load_from(&path).await?,
        None => load_default_config().await,
    };

    let bus = EventBus::new();
    let frame = Frame::new(20.0, 20.0, 240.0, 32.0);
    let metrics = MeasureCache::new(MonospaceMeasurer::default(), config.font.clone());
    let mut widget = InputWidget::attach(&bus, config, frame, metrics)?;

    let events = script::parse(&script_text, (frame.x, frame.y))?;
    info!("Replaying {} events", events.len());

    // Keyboard input needs focus; a click or auto_focus provides it.
    if !widget.controller().is_focused() {
        bus.emit(InputEvent::Focus(true));
        widget.pump();
    }

    for event in events {
        bus.emit(event);
        widget.pump();
        if let Some(snapshot) = widget.take_frame() {
            println!("{}", serde_json::to_string(&snapshot)?);
        }
    }

    info!(
        "Final value {:?} (width cache: {} hits, {} misses)",
        widget.controller().text(),
        widget.metrics().hits(),
        widget.metrics().misses()
    );

    widget.detach(&bus);
    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<(Option<PathBuf>, String)> {
    let mut config = None;
    let mut script = Vec::new();

    while let Some(arg) = args.next() {
        if arg == "--config" {
            let path = args.next().context("--config needs a path")?;
            config = Some(PathBuf::from(path));
        } else {
            script.push(arg);
        }
    }

    Ok((config, script.join(" ")))
}

/// Per-user config file, falling back to defaults if it cannot be read
async fn load_default_config() -> InputConfig {
    match InputConfig::load().await {
        Ok(config) => config,
        Err(err) => {
            warn!("{}", err.user_message());
            InputConfig::default()
        }
    }
}
