//! Built-in permission catalog for the back office.
//!
//! Section and submodule order here is the order the permission editor
//! renders, so keep it stable.

use crate::structure::{Action, PermissionStructure, Section, Submodule};

/// Version of the built-in catalog. Bump when sections, submodules or
/// actions change.
pub const BUILTIN_STRUCTURE_VERSION: u32 = 1;

// Section ids
pub const PACKING: &str = "packing";
pub const PRODUCTS: &str = "products";
pub const GRN: &str = "grn";
pub const ADMINISTRATION: &str = "administration";

// Submodule ids
pub const VIEW_MATERIALS: &str = "view-materials";
pub const MATERIAL_STOCK: &str = "material-stock";
pub const PURCHASE_ORDERS: &str = "purchase-orders";
pub const PRODUCT_MAPPINGS: &str = "product-mappings";
pub const FINISHED_STOCK: &str = "finished-stock";
pub const GRN_ENTRIES: &str = "grn-entries";
pub const GRN_REPORTS: &str = "grn-reports";
pub const MANAGERS: &str = "managers";

// Action ids
pub const VIEW: &str = "view";
pub const ADD: &str = "add";
pub const EDIT: &str = "edit";
pub const DELETE: &str = "delete";
pub const VIEW_REPORT: &str = "view-report";
pub const RECORD_USAGE: &str = "record-usage";
pub const CREATE_PO: &str = "create-po";
pub const IMPORT: &str = "import";
pub const APPROVE: &str = "approve";
pub const EXPORT: &str = "export";
pub const MANAGE_PERMISSIONS: &str = "manage-permissions";

fn label(action: &str) -> &'static str {
    match action {
        VIEW => "View",
        ADD => "Add",
        EDIT => "Edit",
        DELETE => "Delete",
        VIEW_REPORT => "View Report",
        RECORD_USAGE => "Record Usage",
        CREATE_PO => "Create PO",
        IMPORT => "Import",
        APPROVE => "Approve",
        EXPORT => "Export",
        MANAGE_PERMISSIONS => "Manage Permissions",
        _ => "Other",
    }
}

fn submodule(id: &str, display_name: &str, actions: &[&str]) -> Submodule {
    Submodule::new(
        id,
        display_name,
        actions.iter().map(|a| Action::new(*a, label(a))).collect(),
    )
}

/// The compiled-in structure.
///
/// # Panics
///
/// Panics if the catalog above breaks a registry invariant. This is covered
/// by the tests below and cannot happen at runtime.
pub fn builtin_structure() -> PermissionStructure {
    PermissionStructure::new(
        BUILTIN_STRUCTURE_VERSION,
        vec![
            Section::new(
                PACKING,
                "Packing Materials",
                vec![
                    submodule(
                        VIEW_MATERIALS,
                        "Item Master",
                        &[VIEW, EDIT, ADD, DELETE, VIEW_REPORT],
                    ),
                    submodule(
                        MATERIAL_STOCK,
                        "Stock Levels",
                        &[VIEW, EDIT, RECORD_USAGE, VIEW_REPORT],
                    ),
                    submodule(
                        PURCHASE_ORDERS,
                        "Purchase Orders",
                        &[VIEW, CREATE_PO, EDIT, DELETE],
                    ),
                ],
            ),
            Section::new(
                PRODUCTS,
                "Products",
                vec![
                    submodule(
                        PRODUCT_MAPPINGS,
                        "Product Mappings",
                        &[VIEW, ADD, EDIT, DELETE, IMPORT],
                    ),
                    submodule(FINISHED_STOCK, "Finished Goods Stock", &[VIEW, EDIT, VIEW_REPORT]),
                ],
            ),
            Section::new(
                GRN,
                "Goods Received",
                vec![
                    submodule(GRN_ENTRIES, "GRN Entries", &[VIEW, ADD, EDIT, DELETE, APPROVE]),
                    submodule(GRN_REPORTS, "GRN Reports", &[VIEW, EXPORT]),
                ],
            ),
            Section::new(
                ADMINISTRATION,
                "Administration",
                vec![submodule(
                    MANAGERS,
                    "Managers",
                    &[VIEW, ADD, EDIT, DELETE, MANAGE_PERMISSIONS],
                )],
            ),
        ],
    )
    .expect("built-in permission structure is valid")
}
