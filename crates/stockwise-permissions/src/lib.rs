//! # Stockwise Permissions
//!
//! Granular permission engine for the Stockwise back office.
//!
//! Access is modelled as a tree: **sections** group **submodules**, and each
//! submodule declares the **actions** that can be granted on it. A user's
//! grants live in a sparse [`PermissionStore`] keyed by submodule id then
//! action id. Admins bypass every check; managers without a granular entry
//! for a submodule fall back to the legacy flat module list.
//!
//! - [`structure`]: the registry of sections, submodules and actions
//! - [`catalog`]: the compiled-in registry
//! - [`store`]: per-user permission documents
//! - [`evaluate`]: `has_permission`, `is_module_visible` and friends
//! - [`selection`]: all/some-selected aggregates and checkbox state
//! - [`mutate`]: copy-on-write toggles at action, submodule, section and global scope
//! - [`clone`]: wholesale copy of another user's store
//! - [`legacy`]: compatibility with the flat module list
//!
//! Nothing here performs I/O.
//!
//! # Example
//!
//! ```
//! use stockwise_permissions::{builtin_structure, has_permission, toggle_section, PermissionStore, UserAccess};
//!
//! let structure = builtin_structure();
//! let draft = toggle_section(&PermissionStore::new(), &structure, "packing").unwrap();
//! let manager = UserAccess::manager(draft);
//!
//! assert!(has_permission(&manager, "view-materials", "delete"));
//! assert!(!has_permission(&manager, "grn-entries", "view"));
//! ```

pub mod access;
pub mod catalog;
pub mod clone;
pub mod error;
pub mod evaluate;
pub mod legacy;
pub mod mutate;
pub mod selection;
pub mod store;
pub mod structure;

pub use access::{Role, UserAccess};
pub use catalog::builtin_structure;
pub use clone::clone_permissions;
pub use error::{PermissionError, Result};
pub use evaluate::{
    ModuleQuery, has_any_permission_in_module, has_module_access, has_permission,
    has_section_access, is_module_visible,
};
pub use legacy::upgrade_legacy_access;
pub use mutate::{Toggle, toggle_action, toggle_all, toggle_section, toggle_submodule};
pub use selection::{
    SelectionState, all_actions_selected, all_modules_selected, all_submodules_selected,
    section_state, some_actions_selected, some_modules_selected, some_submodules_selected,
    structure_state, submodule_state,
};
pub use store::{ActionGrants, PermissionStore};
pub use structure::{Action, PermissionStructure, Section, Submodule};
