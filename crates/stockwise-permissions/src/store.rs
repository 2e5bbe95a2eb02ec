//! Per-user permission documents.
//!
//! A [`PermissionStore`] maps submodule id to a map of action id to `bool`.
//! The store is sparse: a missing submodule or a missing action reads as
//! denied. Persisted stores are untrusted JSON and are decoded with
//! [`PermissionStore::from_value`], which never fails and never grants more
//! than the document literally says.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::structure::PermissionStructure;

/// Action id -> granted.
pub type ActionGrants = BTreeMap<String, bool>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionStore(BTreeMap<String, ActionGrants>);

/// Two stores are equal when they grant exactly the same actions; a missing
/// key and an explicit `false` compare equal.
///
/// Equality does not look at which denied entries are present. For a user
/// with legacy module access that still matters: any entry for a submodule,
/// even an all-`false` one, shadows the legacy list for that submodule.
impl PartialEq for PermissionStore {
    fn eq(&self, other: &Self) -> bool {
        self.granted().eq(other.granted())
    }
}

impl Eq for PermissionStore {}

impl PermissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every registered submodule and action present and `false`. This is
    /// what a newly provisioned manager starts with.
    pub fn all_denied(structure: &PermissionStructure) -> Self {
        let mut store = Self::new();
        for submodule in structure.submodules() {
            let grants = submodule
                .actions
                .iter()
                .map(|a| (a.id.clone(), false))
                .collect();
            store.0.insert(submodule.id.clone(), grants);
        }
        store
    }

    /// Decodes a persisted document without trusting its shape.
    ///
    /// - a non-object root is an empty store
    /// - a submodule whose value is not an object is kept as an empty entry,
    ///   so it denies everything rather than falling back to legacy access
    /// - any leaf other than JSON `true` reads as `false`
    pub fn from_value(value: &Value) -> Self {
        let Some(root) = value.as_object() else {
            return Self::new();
        };

        let entries = root
            .iter()
            .map(|(submodule, actions)| {
                let grants = actions
                    .as_object()
                    .map(|obj| {
                        obj.iter()
                            .map(|(action, granted)| {
                                (action.clone(), matches!(granted, Value::Bool(true)))
                            })
                            .collect()
                    })
                    .unwrap_or_default();
                (submodule.clone(), grants)
            })
            .collect();

        Self(entries)
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(&self.0).unwrap_or(Value::Object(Default::default()))
    }

    /// The entry for a submodule, if the store has one at all.
    pub fn entry(&self, submodule: &str) -> Option<&ActionGrants> {
        self.0.get(submodule)
    }

    pub fn contains_submodule(&self, submodule: &str) -> bool {
        self.0.contains_key(submodule)
    }

    /// `true` only when the action is explicitly granted.
    pub fn is_granted(&self, submodule: &str, action: &str) -> bool {
        self.entry(submodule)
            .and_then(|grants| grants.get(action))
            .copied()
            .unwrap_or(false)
    }

    pub fn set(&mut self, submodule: &str, action: &str, granted: bool) {
        self.0
            .entry(submodule.to_string())
            .or_default()
            .insert(action.to_string(), granted);
    }

    /// Sets every listed action of a submodule, creating the entry if absent.
    pub fn set_all<S: AsRef<str>>(&mut self, submodule: &str, actions: &[S], granted: bool) {
        let grants = self.0.entry(submodule.to_string()).or_default();
        for action in actions {
            grants.insert(action.as_ref().to_string(), granted);
        }
    }

    /// Shapes the store to the registry: unknown submodules and actions are
    /// dropped and every registered action is backfilled to `false`.
    pub fn normalized(&self, structure: &PermissionStructure) -> Self {
        let mut store = Self::new();
        for submodule in structure.submodules() {
            let grants = submodule
                .actions
                .iter()
                .map(|a| (a.id.clone(), self.is_granted(&submodule.id, &a.id)))
                .collect();
            store.0.insert(submodule.id.clone(), grants);
        }
        store
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ActionGrants)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every `(submodule, action)` pair set to `true`, in key order.
    pub fn granted(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.0.iter().flat_map(|(submodule, grants)| {
            grants
                .iter()
                .filter(|(_, granted)| **granted)
                .map(move |(action, _)| (submodule.as_str(), action.as_str()))
        })
    }

    /// Number of explicitly granted actions across all submodules.
    pub fn granted_count(&self) -> usize {
        self.0
            .values()
            .map(|grants| grants.values().filter(|g| **g).count())
            .sum()
    }
}

impl From<BTreeMap<String, ActionGrants>> for PermissionStore {
    fn from(entries: BTreeMap<String, ActionGrants>) -> Self {
        Self(entries)
    }
}

impl<S: Into<String>, A: Into<String>> FromIterator<(S, Vec<(A, bool)>)> for PermissionStore {
    fn from_iter<I: IntoIterator<Item = (S, Vec<(A, bool)>)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(submodule, grants)| {
                    (
                        submodule.into(),
                        grants.into_iter().map(|(a, g)| (a.into(), g)).collect(),
                    )
                })
                .collect(),
        )
    }
}
