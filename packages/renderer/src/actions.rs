use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Callback bound to an action name
pub type ActionHandler = Arc<dyn Fn(Option<&Value>) + Send + Sync>;

/// Maps action names to handlers supplied by the embedding application
#[derive(Clone, Default)]
pub struct ActionDispatcher {
    handlers: HashMap<String, ActionHandler>,
}

impl ActionDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handler<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Option<&Value>) + Send + Sync + 'static,
    {
        self.handlers.insert(name.into(), Arc::new(handler));
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Run the handler for `name`. Unknown names do nothing.
    /// Returns whether a handler ran.
    pub fn execute(&self, name: &str, payload: Option<&Value>) -> bool {
        match self.handlers.get(name) {
            Some(handler) => {
                debug!(action = %name, "Executing action");
                handler(payload);
                true
            }
            None => {
                debug!(action = %name, "No handler for action");
                false
            }
        }
    }
}

impl fmt::Debug for ActionDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.names().collect();
        names.sort_unstable();
        f.debug_struct("ActionDispatcher").field("handlers", &names).finish()
    }
}
