//! The permission structure registry.
//!
//! A [`PermissionStructure`] is the single catalog of sections, submodules and
//! the actions each submodule allows. It is built once at startup (either the
//! built-in catalog or a JSON file) and shared read-only afterwards.
//!
//! Submodule ids are unique across *all* sections, because permission stores
//! are keyed by submodule id alone. Construction rejects any structure that
//! breaks this.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{PermissionError, Result};

/// A single operation within a submodule (`view`, `edit`, `create-po`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: String,
    pub label: String,
}

impl Action {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// A permissionable feature unit, e.g. "Item Master".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submodule {
    pub id: String,
    pub display_name: String,
    /// Allowed actions, in display order.
    pub actions: Vec<Action>,
}

impl Submodule {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, actions: Vec<Action>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            actions,
        }
    }

    pub fn action_ids(&self) -> Vec<&str> {
        self.actions.iter().map(|a| a.id.as_str()).collect()
    }

    /// Whether `action` is declared for this submodule.
    pub fn allows(&self, action: &str) -> bool {
        self.actions.iter().any(|a| a.id == action)
    }
}

/// A top-level grouping such as "Packing Materials".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub display_name: String,
    pub submodules: Vec<Submodule>,
}

impl Section {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, submodules: Vec<Submodule>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            submodules,
        }
    }

    pub fn submodule_ids(&self) -> Vec<&str> {
        self.submodules.iter().map(|s| s.id.as_str()).collect()
    }
}

/// Wire form of a structure before validation.
#[derive(Debug, Clone, Deserialize)]
struct StructureDefinition {
    version: u32,
    sections: Vec<Section>,
}

impl TryFrom<StructureDefinition> for PermissionStructure {
    type Error = PermissionError;

    fn try_from(def: StructureDefinition) -> Result<Self> {
        PermissionStructure::new(def.version, def.sections)
    }
}

/// Immutable, validated catalog of sections, submodules and actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StructureDefinition")]
pub struct PermissionStructure {
    version: u32,
    sections: Vec<Section>,
    /// submodule id -> (section index, submodule index)
    #[serde(skip)]
    index: HashMap<String, (usize, usize)>,
}

impl PermissionStructure {
    /// Builds a registry, validating ids and uniqueness.
    ///
    /// # Errors
    ///
    /// Returns [`PermissionError::InvalidStructure`] when there are no
    /// sections, a section has no submodules, an id is blank, a section id
    /// repeats, a submodule id repeats anywhere in the structure, or an
    /// action id repeats within its submodule.
    pub fn new(version: u32, sections: Vec<Section>) -> Result<Self> {
        if sections.is_empty() {
            return Err(invalid("structure declares no sections"));
        }

        let mut section_ids = HashSet::new();
        let mut index: HashMap<String, (usize, usize)> = HashMap::new();

        for (si, section) in sections.iter().enumerate() {
            if section.id.trim().is_empty() {
                return Err(invalid("section id must not be empty"));
            }
            if !section_ids.insert(section.id.as_str()) {
                return Err(invalid(format!("duplicate section id '{}'", section.id)));
            }
            if section.submodules.is_empty() {
                return Err(invalid(format!(
                    "section '{}' declares no submodules",
                    section.id
                )));
            }

            for (mi, submodule) in section.submodules.iter().enumerate() {
                if submodule.id.trim().is_empty() {
                    return Err(invalid(format!(
                        "section '{}' has a submodule with an empty id",
                        section.id
                    )));
                }
                if let Some(&(other, _)) = index.get(&submodule.id) {
                    return Err(invalid(format!(
                        "submodule id '{}' is declared in both '{}' and '{}'",
                        submodule.id, sections[other].id, section.id
                    )));
                }

                let mut action_ids = HashSet::new();
                for action in &submodule.actions {
                    if action.id.trim().is_empty() {
                        return Err(invalid(format!(
                            "submodule '{}' has an action with an empty id",
                            submodule.id
                        )));
                    }
                    if !action_ids.insert(action.id.as_str()) {
                        return Err(invalid(format!(
                            "duplicate action '{}' in submodule '{}'",
                            action.id, submodule.id
                        )));
                    }
                }

                index.insert(submodule.id.clone(), (si, mi));
            }
        }

        Ok(Self {
            version,
            sections,
            index,
        })
    }

    /// Parses and validates a JSON structure document.
    pub fn from_json(json: &str) -> Result<Self> {
        let def: StructureDefinition =
            serde_json::from_str(json).map_err(|e| invalid(e.to_string()))?;
        Self::new(def.version, def.sections)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Sections in declaration order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section(&self, section_id: &str) -> Result<&Section> {
        self.sections
            .iter()
            .find(|s| s.id == section_id)
            .ok_or_else(|| PermissionError::UnknownSection(section_id.to_string()))
    }

    /// Submodules of a section, in declaration order.
    pub fn submodules_of(&self, section_id: &str) -> Result<&[Submodule]> {
        self.section(section_id).map(|s| s.submodules.as_slice())
    }

    pub fn submodule(&self, submodule_id: &str) -> Result<&Submodule> {
        self.index
            .get(submodule_id)
            .map(|&(si, mi)| &self.sections[si].submodules[mi])
            .ok_or_else(|| PermissionError::UnknownSubmodule(submodule_id.to_string()))
    }

    /// Allowed action ids of a submodule, in declaration order.
    pub fn actions_of(&self, submodule_id: &str) -> Result<Vec<&str>> {
        self.submodule(submodule_id).map(Submodule::action_ids)
    }

    pub fn contains_submodule(&self, submodule_id: &str) -> bool {
        self.index.contains_key(submodule_id)
    }

    /// Every submodule across every section, in declaration order.
    pub fn submodules(&self) -> impl Iterator<Item = &Submodule> {
        self.sections.iter().flat_map(|s| s.submodules.iter())
    }

    /// Every submodule id. Ids are unique, so this is a set in display order.
    pub fn all_submodule_ids(&self) -> Vec<&str> {
        self.submodules().map(|s| s.id.as_str()).collect()
    }
}

fn invalid(msg: impl Into<String>) -> PermissionError {
    PermissionError::InvalidStructure(msg.into())
}
