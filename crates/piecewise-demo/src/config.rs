//! Configuration for the demo.

use std::time::Duration;

use piecewise_editor::{ConfigError, EditorConfig};

/// Default number of pointer moves in the simulated drag.
const DEFAULT_DRAG_STEPS: usize = 12;
/// Default interval between pointer moves.
const DEFAULT_STEP_INTERVAL: Duration = Duration::from_millis(40);

const DRAG_STEPS_VAR: &str = "PIECEWISE_DEMO_DRAG_STEPS";
const STEP_MS_VAR: &str = "PIECEWISE_DEMO_STEP_MS";

/// Errors loading [`DemoConfig`].
#[derive(Debug, thiserror::Error)]
pub enum DemoConfigError {
    #[error(transparent)]
    Editor(#[from] ConfigError),
    #[error("{var} must be a positive integer, got {value:?}")]
    InvalidSteps { var: &'static str, value: String },
    #[error("{var} must be an integer number of milliseconds, got {value:?}")]
    InvalidInterval { var: &'static str, value: String },
}

/// Runtime configuration for the demo walkthrough.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub editor: EditorConfig,
    /// Pointer moves in the simulated drag gesture.
    pub drag_steps: usize,
    /// Time between pointer moves; keep below the update delay to coalesce.
    pub step_interval: Duration,
}

impl DemoConfig {
    pub fn from_env() -> Result<Self, DemoConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, DemoConfigError> {
        let mut config = Self {
            editor: EditorConfig::from_lookup(&lookup)?,
            drag_steps: DEFAULT_DRAG_STEPS,
            step_interval: DEFAULT_STEP_INTERVAL,
        };
        if let Some(value) = lookup(DRAG_STEPS_VAR) {
            let steps = value.trim().parse::<usize>().ok().filter(|&steps| steps > 0);
            config.drag_steps = steps.ok_or(DemoConfigError::InvalidSteps {
                var: DRAG_STEPS_VAR,
                value,
            })?;
        }
        if let Some(value) = lookup(STEP_MS_VAR) {
            config.step_interval = value
                .trim()
                .parse()
                .map(Duration::from_millis)
                .map_err(|_| DemoConfigError::InvalidInterval {
                    var: STEP_MS_VAR,
                    value: value.clone(),
                })?;
        }
        Ok(config)
    }
}
