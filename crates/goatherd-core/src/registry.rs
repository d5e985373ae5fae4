//! Per-run registry of analyzed actions.

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::{Serialize, Serializer};

use crate::{Action, FunctionRef};

/// Mapping from a function to its action, in registration order.
///
/// Built once per generation run and handed to the emitter; nothing is kept
/// in process-wide state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionRegistry {
    actions: IndexMap<FunctionRef, Action>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an action unless its function is already registered.
    ///
    /// Returns `false` when an action for the same function exists; the
    /// existing entry is kept.
    pub fn register(&mut self, action: Action) -> bool {
        match self.actions.entry(action.function.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(action);
                true
            }
        }
    }

    pub fn contains(&self, function: &FunctionRef) -> bool {
        self.actions.contains_key(function)
    }

    pub fn get(&self, function: &FunctionRef) -> Option<&Action> {
        self.actions.get(function)
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }
}

impl<'a> IntoIterator for &'a ActionRegistry {
    type Item = &'a Action;
    type IntoIter = indexmap::map::Values<'a, FunctionRef, Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.actions.values()
    }
}

impl Serialize for ActionRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.actions.values())
    }
}

/// The analyzed package whose companion file is generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageInfo {
    /// Package clause name (`main`).
    pub name: String,
    /// Import path (`example.com/app`).
    pub path: String,
}

/// Everything an emitter needs to produce the companion file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generation {
    pub package: PackageInfo,
    pub actions: ActionRegistry,
}
