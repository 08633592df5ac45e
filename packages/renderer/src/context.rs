use crate::actions::ActionDispatcher;
use crate::data::DataModel;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use streamui_protocol::Element;

/// Default limit on nesting before a subtree is replaced by an error node
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Decides per element whether it is rendered at all
pub trait Visibility: Send + Sync {
    fn is_visible(&self, element: &Element, data: &DataModel) -> bool;
}

/// Renders everything
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysVisible;

impl Visibility for AlwaysVisible {
    fn is_visible(&self, _element: &Element, _data: &DataModel) -> bool {
        true
    }
}

impl<F> Visibility for F
where
    F: Fn(&Element, &DataModel) -> bool + Send + Sync,
{
    fn is_visible(&self, element: &Element, data: &DataModel) -> bool {
        self(element, data)
    }
}

/// Providers threaded through one render pass
#[derive(Clone)]
pub struct RenderContext {
    actions: ActionDispatcher,
    data: DataModel,
    visibility: Arc<dyn Visibility>,
    max_depth: usize,
    now: DateTime<Utc>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self {
            actions: ActionDispatcher::new(),
            data: DataModel::default(),
            visibility: Arc::new(AlwaysVisible),
            max_depth: DEFAULT_MAX_DEPTH,
            now: Utc::now(),
        }
    }

    pub fn with_actions(mut self, actions: ActionDispatcher) -> Self {
        self.actions = actions;
        self
    }

    pub fn with_data(mut self, data: impl Into<DataModel>) -> Self {
        self.data = data.into();
        self
    }

    pub fn with_visibility(mut self, visibility: impl Visibility + 'static) -> Self {
        self.visibility = Arc::new(visibility);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    /// Pin the clock time-dependent components render against
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn actions(&self) -> &ActionDispatcher {
        &self.actions
    }

    pub fn data(&self) -> &DataModel {
        &self.data
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn is_visible(&self, element: &Element) -> bool {
        self.visibility.is_visible(element, &self.data)
    }

    pub fn dispatch(&self, action: &str, payload: Option<&Value>) -> bool {
        self.actions.execute(action, payload)
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("actions", &self.actions)
            .field("data", &self.data)
            .field("max_depth", &self.max_depth)
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}
