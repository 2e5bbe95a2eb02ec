//! Permission registry and draft-editor DTOs.
//!
//! The types live in `stockwise-models` so the CLI can share them.

pub use stockwise_models::permissions::{
    DraftToggleRequest, DraftToggleResponse, SectionSelection, SelectionSummary,
    SubmoduleSelection,
};
pub use stockwise_permissions::{Action, PermissionStructure, Section, Submodule};
