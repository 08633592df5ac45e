//! Flat, key-indexed element arena plus the root pointer.
//!
//! Children are stored as keys, never as links, so a reference may point at
//! an element that has not arrived yet (or never will) without any special
//! handling here. Readers take a [`Snapshot`]: the element map sits behind
//! an `Arc` and is copied on write, so a snapshot never observes a later
//! mutation.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::Arc;
use streamui_protocol::{Element, Operation};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Invalid tree document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Immutable view of the store at one version
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    root: Option<String>,
    elements: Arc<HashMap<String, Arc<Element>>>,
    version: u64,
}

impl Snapshot {
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    pub fn element(&self, key: &str) -> Option<&Element> {
        self.elements.get(key).map(Arc::as_ref)
    }

    /// The root element, if the root pointer is set and resolves
    pub fn resolve_root(&self) -> Option<&Element> {
        self.root().and_then(|key| self.element(key))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.elements.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none() && self.elements.is_empty()
    }

    /// Increases with every observable change of the store
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.values().map(Arc::as_ref)
    }

    /// Keys referenced by the root pointer or a children list that do not
    /// resolve (yet), sorted
    pub fn dangling(&self) -> Vec<String> {
        let mut missing = BTreeSet::new();
        if let Some(root) = self.root() {
            if !self.contains(root) {
                missing.insert(root.to_string());
            }
        }
        for element in self.elements() {
            for child in &element.children {
                if !self.contains(child) {
                    missing.insert(child.clone());
                }
            }
        }
        missing.into_iter().collect()
    }

    /// Build a snapshot straight from a pre-built tree, bypassing the
    /// interpreter. Used for static demo trees.
    pub fn from_tree(tree: UiTree) -> Self {
        let elements = tree
            .elements
            .into_values()
            .map(|element| (element.key.clone(), Arc::new(element)))
            .collect();
        Self {
            root: tree.root,
            elements: Arc::new(elements),
            version: 1,
        }
    }

    pub fn from_tree_json(source: &str) -> Result<Self, TreeError> {
        Ok(Self::from_tree(UiTree::from_json(source)?))
    }

    /// Owned copy in the `{root, elements}` document shape
    pub fn to_tree(&self) -> UiTree {
        UiTree {
            root: self.root.clone(),
            elements: self
                .elements
                .iter()
                .map(|(key, element)| (key.clone(), element.as_ref().clone()))
                .collect(),
        }
    }
}

impl PartialEq for Snapshot {
    /// Compares content only; two stores that reached the same state
    /// through different histories are equal.
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.elements == other.elements
    }
}

impl Serialize for Snapshot {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct View<'a> {
            root: Option<&'a str>,
            elements: BTreeMap<&'a str, &'a Element>,
        }

        View {
            root: self.root(),
            elements: self
                .elements
                .iter()
                .map(|(key, element)| (key.as_str(), element.as_ref()))
                .collect(),
        }
        .serialize(serializer)
    }
}

/// Serialisable UI tree document (`{"root": ..., "elements": {...}}`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiTree {
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub elements: BTreeMap<String, Element>,
}

impl UiTree {
    pub fn from_json(source: &str) -> Result<Self, TreeError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Operations rebuilding this tree, parents before children.
    ///
    /// Elements reachable from the root come first in breadth-first order;
    /// unreachable ones follow in key order.
    pub fn to_operations(&self) -> Vec<Operation> {
        let mut operations = Vec::with_capacity(self.elements.len() + 1);
        let mut seen = HashSet::new();

        if let Some(root) = &self.root {
            operations.push(Operation::set_root(root.clone()));

            let mut queue = VecDeque::from([root.as_str()]);
            while let Some(key) = queue.pop_front() {
                let Some(element) = self.elements.get(key) else {
                    continue;
                };
                if !seen.insert(key) {
                    continue;
                }
                operations.push(Operation::add(element));
                queue.extend(element.children.iter().map(String::as_str));
            }
        }

        for (key, element) in &self.elements {
            if !seen.contains(key.as_str()) {
                operations.push(Operation::add(element));
            }
        }

        operations
    }
}

/// The single-writer element store. Mutation is reserved to the
/// interpreter; everyone else reads through [`TreeStore::snapshot`].
#[derive(Debug, Default)]
pub struct TreeStore {
    current: Snapshot,
}

impl TreeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&str> {
        self.current.root()
    }

    pub fn element(&self, key: &str) -> Option<&Element> {
        self.current.element(key)
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.current.version
    }

    /// Cheap immutable view; shares element storage with the store
    pub fn snapshot(&self) -> Snapshot {
        self.current.clone()
    }

    /// Point the root at `key`. Returns whether anything changed.
    pub(crate) fn set_root(&mut self, key: String) -> bool {
        if self.current.root.as_deref() == Some(key.as_str()) {
            return false;
        }
        self.current.root = Some(key);
        self.current.version += 1;
        true
    }

    /// Insert or wholly replace an element. Returns the previous element
    /// state: `None` when new, `Some(true)` when replaced with different
    /// content, `Some(false)` when identical.
    pub(crate) fn insert(&mut self, element: Element) -> Option<bool> {
        if let Some(existing) = self.current.elements.get(&element.key) {
            if existing.as_ref() == &element {
                return Some(false);
            }
        }

        let previous = Arc::make_mut(&mut self.current.elements)
            .insert(element.key.clone(), Arc::new(element));
        self.current.version += 1;
        previous.map(|_| true)
    }

    /// Drop everything. The version keeps increasing so watchers notice.
    pub(crate) fn reset(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let version = self.current.version + 1;
        self.current = Snapshot {
            version,
            ..Snapshot::default()
        };
    }
}
