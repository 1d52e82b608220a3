//! Read-only view of the application's image selection.
//!
//! The editor never owns selection state. It asks a [`SelectionContext`] for
//! a snapshot each time it needs one, so the application can keep mutating
//! the underlying state between edits.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::range::{DataRange, FALLBACK_DATA_RANGE};

/// Snapshot of what the editor is currently editing.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// Selected image name.
    pub name: String,
    /// Selected component of that image.
    pub component: usize,
    /// Recorded intensity bounds of the component, if any.
    pub data_range: Option<DataRange>,
}

impl Selection {
    /// Recorded bounds, or `fallback` when none are recorded.
    pub fn data_range_or(&self, fallback: DataRange) -> DataRange {
        self.data_range.unwrap_or(fallback)
    }
}

/// Readiness and selection taken from the same application state.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextSnapshot {
    pub ready: bool,
    pub selection: Option<Selection>,
}

/// Accessor for the selection state owned by the surrounding application.
pub trait SelectionContext: Send + Sync {
    /// Current selection, or `None` when no image is selected.
    fn selection(&self) -> Option<Selection>;

    /// Whether the downstream piecewise-function state has been initialized.
    fn piecewise_functions_ready(&self) -> bool;

    /// Readiness and selection read together.
    ///
    /// Implementations behind a lock must read both under one guard.
    fn snapshot(&self) -> ContextSnapshot {
        ContextSnapshot {
            ready: self.piecewise_functions_ready(),
            selection: self.selection(),
        }
    }
}

impl<T: SelectionContext> SelectionContext for RwLock<T> {
    fn selection(&self) -> Option<Selection> {
        self.read().selection()
    }

    fn piecewise_functions_ready(&self) -> bool {
        self.read().piecewise_functions_ready()
    }

    fn snapshot(&self) -> ContextSnapshot {
        self.read().snapshot()
    }
}

/// Per-image rendering state relevant to opacity editing.
#[derive(Debug, Clone, Default)]
pub struct ActorContext {
    pub selected_component: usize,
    /// Intensity bounds keyed by component index.
    pub color_range_bounds: HashMap<usize, DataRange>,
}

impl ActorContext {
    pub fn with_component_range(mut self, component: usize, range: DataRange) -> Self {
        self.color_range_bounds.insert(component, range);
        self
    }
}

/// In-memory image state implementing [`SelectionContext`].
///
/// Share it as `Arc<RwLock<ImagesContext>>`: the application writes through
/// the lock, the editor reads snapshots through the same `Arc`.
#[derive(Debug, Clone, Default)]
pub struct ImagesContext {
    pub selected_name: Option<String>,
    pub actor_contexts: HashMap<String, ActorContext>,
    /// Set once the piecewise-function state has been created.
    pub piecewise_functions_ready: bool,
}

impl ImagesContext {
    /// Register `actor` under `name` and select it.
    pub fn select_image(&mut self, name: impl Into<String>, actor: ActorContext) {
        let name = name.into();
        self.actor_contexts.insert(name.clone(), actor);
        self.selected_name = Some(name);
    }

    /// Change the selected component of the selected image.
    ///
    /// Returns `false` if no image is selected.
    pub fn select_component(&mut self, component: usize) -> bool {
        let Some(actor) = self
            .selected_name
            .as_ref()
            .and_then(|name| self.actor_contexts.get_mut(name))
        else {
            return false;
        };
        actor.selected_component = component;
        true
    }

    /// Data range of the selected component, or [`FALLBACK_DATA_RANGE`].
    pub fn data_range(&self) -> DataRange {
        self.selection()
            .map_or(FALLBACK_DATA_RANGE, |s| s.data_range_or(FALLBACK_DATA_RANGE))
    }
}

impl SelectionContext for ImagesContext {
    fn selection(&self) -> Option<Selection> {
        let name = self.selected_name.as_ref()?;
        let actor = self.actor_contexts.get(name)?;
        let component = actor.selected_component;
        Some(Selection {
            name: name.clone(),
            component,
            data_range: actor.color_range_bounds.get(&component).copied(),
        })
    }

    fn piecewise_functions_ready(&self) -> bool {
        self.piecewise_functions_ready
    }
}
