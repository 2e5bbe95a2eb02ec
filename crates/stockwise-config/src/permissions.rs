//! Source of the permission structure.
//!
//! The structure is loaded once at startup. Without `PERMISSION_STRUCTURE_PATH`
//! the compiled-in catalog is used; with it, the JSON file at that path must
//! validate or startup fails.

use std::fs;
use std::path::{Path, PathBuf};

use stockwise_permissions::{PermissionError, PermissionStructure, builtin_structure};

use crate::env_var;

#[derive(Clone, Debug, Default)]
pub struct PermissionsConfig {
    pub structure_path: Option<PathBuf>,
}

impl PermissionsConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(env_var)
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            structure_path: lookup("PERMISSION_STRUCTURE_PATH")
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn load_structure(&self) -> Result<PermissionStructure, PermissionError> {
        match &self.structure_path {
            Some(path) => load_structure_file(path),
            None => {
                tracing::info!("Using built-in permission structure");
                Ok(builtin_structure())
            }
        }
    }
}

/// Reads and validates a JSON structure document.
pub fn load_structure_file(path: &Path) -> Result<PermissionStructure, PermissionError> {
    let json = fs::read_to_string(path).map_err(|e| {
        PermissionError::InvalidStructure(format!("cannot read {}: {}", path.display(), e))
    })?;
    let structure = PermissionStructure::from_json(&json)?;
    tracing::info!(
        path = %path.display(),
        version = structure.version(),
        sections = structure.sections().len(),
        "Loaded permission structure"
    );
    Ok(structure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("stockwise-{}-{}.json", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_blank_path_means_builtin() {
        let config = PermissionsConfig::from_lookup(|_| Some("   ".into()));
        assert!(config.structure_path.is_none());
        assert_eq!(config.load_structure().unwrap(), builtin_structure());
    }

    #[test]
    fn test_loads_file() {
        let doc = json!({
            "version": 7,
            "sections": [{
                "id": "warehouse",
                "display_name": "Warehouse",
                "submodules": [{
                    "id": "bins",
                    "display_name": "Bins",
                    "actions": [{ "id": "view", "label": "View" }]
                }]
            }]
        });
        let path = write_temp("valid", &doc.to_string());
        let config = PermissionsConfig {
            structure_path: Some(path.clone()),
        };

        let structure = config.load_structure().unwrap();
        assert_eq!(structure.version(), 7);
        assert_eq!(structure.actions_of("bins").unwrap(), vec!["view"]);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_rejects_duplicate_submodules_in_file() {
        let sub = json!({ "id": "bins", "display_name": "Bins", "actions": [] });
        let doc = json!({
            "version": 1,
            "sections": [
                { "id": "a", "display_name": "A", "submodules": [sub.clone()] },
                { "id": "b", "display_name": "B", "submodules": [sub] }
            ]
        });
        let path = write_temp("duplicate", &doc.to_string());

        let err = load_structure_file(&path).unwrap_err();
        assert!(matches!(err, PermissionError::InvalidStructure(_)));
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file() {
        let err = load_structure_file(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("cannot read"));
    }
}
