//! Piecewise Editor — bridges an interactive opacity editor widget to an
//! application's state service.
//!
//! Defines the [`TransferFunctionWidget`] and [`StateService`] seams, the
//! debounced [`ChangeDispatcher`] between them, and the [`PiecewiseEditor`]
//! facade the rest of the application talks to.

pub mod config;
pub mod debounce;
pub mod dispatcher;
pub mod error;
pub mod facade;
pub mod headless;
pub mod service;
pub mod widget;

pub use config::EditorConfig;
pub use dispatcher::{ChangeDispatcher, FlushOutcome};
pub use error::{ConfigError, DispatchError, EditorError};
pub use facade::PiecewiseEditor;
pub use headless::{ColorStop, HeadlessWidget};
pub use service::{OutboundStateEvents, StateService};
pub use widget::{TransferFunctionWidget, UpdateListener};
