//! Piecewise Demo — headless walkthrough of the opacity editor bridge.
//!
//! Wires a headless widget, an in-memory image selection and a channel-backed
//! state service together, simulates a startup sequence and a drag gesture,
//! and logs every state-change event as JSON.
//!
//! Logging honours `RUST_LOG` (default `info`).

mod config;
mod gesture;

use std::sync::Arc;

use parking_lot::RwLock;
use piecewise_core::{ActorContext, Capability, ControlPoint, DataRange, ImagesContext, StateEvent};
use piecewise_editor::{DispatchError, EditorError, HeadlessWidget, PiecewiseEditor};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use crate::config::{DemoConfig, DemoConfigError};

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] DemoConfigError),
    #[error(transparent)]
    Editor(#[from] EditorError),
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    #[error("state logger task failed: {0}")]
    Logger(#[from] tokio::task::JoinError),
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), DemoError> {
    let config = DemoConfig::from_env()?;
    let images = Arc::new(RwLock::new(demo_images()));
    let (tx, rx) = mpsc::unbounded_channel();
    let logger = tokio::spawn(log_state_events(rx));

    let editor = PiecewiseEditor::new(
        HeadlessWidget::default(),
        images.clone(),
        Arc::new(tx),
        &config.editor,
    )?;

    let ramp = vec![
        ControlPoint::new(0.1, 0.0),
        ControlPoint::new(0.4, 0.3),
        ControlPoint::new(0.9, 1.0),
    ];

    // The piecewise-function state is created after the editor mounts.
    let outcome = editor.set_points(ramp.clone())?;
    tracing::info!(?outcome, "initial points before state is ready");

    images.write().piecewise_functions_ready = true;
    let outcome = editor.set_points(ramp)?;
    tracing::info!(?outcome, "initial points");

    tracing::info!(
        steps = config.drag_steps,
        "dragging middle point, expecting one coalesced dispatch"
    );
    gesture::drag_point(
        &editor,
        1,
        ControlPoint::new(0.6, 0.8),
        config.drag_steps,
        config.step_interval,
    )
    .await;
    tokio::time::sleep(config.editor.update_delay * 2).await;

    let range = editor.opacity_range(None);
    tracing::info!("opacity spans [{}, {}], zooming to it", range.min(), range.max());
    editor.set_range_zoom(range);

    // A bound-less component maps onto the fallback range.
    images.write().select_component(1);
    let nodes = editor.opacity_nodes(None);
    tracing::info!(?nodes, "nodes for component 1 (no recorded bounds)");

    if let Capability::Unsupported(unsupported) = editor.gaussians() {
        tracing::info!("legacy API answered: {unsupported}");
    }

    // Dropping the editor closes the channel and ends the logger.
    drop(editor);
    logger.await?;
    Ok(())
}

fn demo_images() -> ImagesContext {
    let mut images = ImagesContext::default();
    images.select_image(
        "head-ct",
        ActorContext::default().with_component_range(0, DataRange::new(-1024.0, 3071.0)),
    );
    images
}

async fn log_state_events(mut rx: mpsc::UnboundedReceiver<StateEvent>) {
    let mut count = 0usize;
    while let Some(event) = rx.recv().await {
        count += 1;
        match event.to_json() {
            Ok(json) => tracing::info!(target: "state", "{json}"),
            Err(e) => tracing::error!("failed to serialize {}: {e}", event.type_name()),
        }
    }
    tracing::info!("state service closed after {count} event(s)");
}
