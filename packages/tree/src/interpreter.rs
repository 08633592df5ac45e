//! Patch interpreter.
//!
//! Applies protocol lines to the [`TreeStore`] strictly in arrival order.
//! A bad line never aborts the stream: it is recorded as a [`Diagnostic`]
//! and the store is left exactly as it was.

use crate::diagnostics::Diagnostic;
use crate::store::{Snapshot, TreeStore};
use std::sync::Arc;
use streamui_catalog::Catalog;
use streamui_protocol::{Element, Operation};
use tracing::{debug, warn};

/// What a single line did to the store
#[derive(Debug, Clone, PartialEq)]
pub enum ApplyOutcome {
    /// Root pointer moved to this key
    RootSet(String),
    /// New element admitted
    ElementInserted(String),
    /// Existing element wholly replaced
    ElementReplaced(String),
    /// Valid operation that left the store identical
    Unchanged,
    /// Empty or whitespace-only line
    Blank,
    /// Line dropped; see the diagnostic
    Rejected(Diagnostic),
}

impl ApplyOutcome {
    /// Whether the store version advanced
    pub fn changed(&self) -> bool {
        matches!(
            self,
            ApplyOutcome::RootSet(_) | ApplyOutcome::ElementInserted(_) | ApplyOutcome::ElementReplaced(_)
        )
    }
}

/// Sequential line interpreter owning one tree store
#[derive(Debug)]
pub struct Interpreter {
    catalog: Arc<Catalog>,
    store: TreeStore,
    diagnostics: Vec<Diagnostic>,
    /// Lines seen so far, blanks included
    line: usize,
}

impl Interpreter {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            store: TreeStore::new(),
            diagnostics: Vec::new(),
            line: 0,
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Apply one protocol line
    pub fn apply(&mut self, line: &str) -> ApplyOutcome {
        self.line += 1;

        if line.trim().is_empty() {
            return ApplyOutcome::Blank;
        }

        match Operation::parse(line) {
            Ok(operation) => self.apply_operation(operation),
            Err(err) => self.reject(Diagnostic::from_decode(self.line, &err)),
        }
    }

    /// Apply an already decoded operation. Counts as one line.
    pub fn apply_decoded(&mut self, operation: Operation) -> ApplyOutcome {
        self.line += 1;
        self.apply_operation(operation)
    }

    /// Apply lines one by one; returns how many changed the store
    pub fn apply_all<I, S>(&mut self, lines: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .filter(|line| self.apply(line.as_ref()).changed())
            .count()
    }

    fn apply_operation(&mut self, operation: Operation) -> ApplyOutcome {
        match operation {
            Operation::SetRoot { key } => {
                if self.store.set_root(key.clone()) {
                    debug!(line = self.line, root = %key, "Root set");
                    ApplyOutcome::RootSet(key)
                } else {
                    ApplyOutcome::Unchanged
                }
            }
            Operation::AddElement { key, element } => {
                let props = match self.catalog.validate(&element.component_type, &element.props) {
                    Ok(props) => props,
                    Err(err) => return self.reject(Diagnostic::from_schema(self.line, &key, &err)),
                };

                let children = if self.catalog.has_children(&element.component_type) {
                    element.children
                } else {
                    if !element.children.is_empty() {
                        debug!(
                            line = self.line,
                            key = %key,
                            component_type = %element.component_type,
                            "Dropping children of leaf element"
                        );
                    }
                    Vec::new()
                };

                let admitted = Element {
                    key: key.clone(),
                    component_type: element.component_type,
                    props,
                    children,
                };

                match self.store.insert(admitted) {
                    None => {
                        debug!(line = self.line, key = %key, "Element inserted");
                        ApplyOutcome::ElementInserted(key)
                    }
                    Some(true) => {
                        debug!(line = self.line, key = %key, "Element replaced");
                        ApplyOutcome::ElementReplaced(key)
                    }
                    Some(false) => ApplyOutcome::Unchanged,
                }
            }
        }
    }

    fn reject(&mut self, diagnostic: Diagnostic) -> ApplyOutcome {
        warn!(
            line = diagnostic.line,
            kind = %diagnostic.kind,
            key = diagnostic.key.as_deref().unwrap_or(""),
            "{}",
            diagnostic.message
        );
        self.diagnostics.push(diagnostic.clone());
        ApplyOutcome::Rejected(diagnostic)
    }

    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Number of lines applied since creation or the last reset
    pub fn lines_applied(&self) -> usize {
        self.line
    }

    /// Start over for a new session
    pub fn reset(&mut self) {
        self.store.reset();
        self.diagnostics.clear();
        self.line = 0;
    }
}
