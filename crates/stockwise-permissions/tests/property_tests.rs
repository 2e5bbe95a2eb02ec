//! Property-based tests for the permission engine
//!
//! These tests verify invariants that must hold for all inputs:
//! - Admins are always allowed, empty stores always deny
//! - Toggling an action twice gives back an equal store, sparse or normalized
//! - Bulk toggles never leave a partial selection behind
//! - Decoding untrusted JSON never panics and never invents grants
//!
//! Run with: cargo test -p stockwise-permissions --test property_tests

use std::collections::BTreeMap;

use proptest::prelude::*;
use serde_json::Value;
use stockwise_permissions::{
    ActionGrants, PermissionStore, PermissionStructure, UserAccess, all_actions_selected,
    all_modules_selected, builtin_structure, has_permission, is_module_visible, some_actions_selected,
    some_modules_selected, toggle_action, toggle_all, toggle_section, toggle_submodule,
};

fn registered_pairs(structure: &PermissionStructure) -> Vec<(String, String)> {
    structure
        .submodules()
        .flat_map(|s| s.actions.iter().map(move |a| (s.id.clone(), a.id.clone())))
        .collect()
}

/// A normalized store with an arbitrary grant pattern.
fn normalized_store() -> impl Strategy<Value = PermissionStore> {
    let pairs = registered_pairs(&builtin_structure());
    prop::collection::vec(any::<bool>(), pairs.len()).prop_map(move |bits| {
        let mut store = PermissionStore::all_denied(&builtin_structure());
        for ((submodule, action), granted) in pairs.iter().zip(bits) {
            store.set(submodule, action, granted);
        }
        store
    })
}

/// A sparse store: some registered pairs, some ids the registry does not
/// know, and some empty entries.
fn sparse_store() -> impl Strategy<Value = PermissionStore> {
    let pairs = registered_pairs(&builtin_structure());
    let known = prop::collection::vec((0..pairs.len(), any::<bool>()), 0..12);
    let unknown = prop::collection::vec(("[a-z]{1,8}", "[a-z]{1,8}", any::<bool>()), 0..4);
    let empty_entries = prop::collection::vec("[a-z-]{1,12}", 0..3);

    (known, unknown, empty_entries).prop_map(move |(known, unknown, empty_entries)| {
        let mut entries: BTreeMap<String, ActionGrants> = BTreeMap::new();
        for id in empty_entries {
            entries.entry(id).or_default();
        }
        for (idx, granted) in known {
            let (submodule, action) = &pairs[idx];
            entries
                .entry(submodule.clone())
                .or_default()
                .insert(action.clone(), granted);
        }
        for (submodule, action, granted) in unknown {
            entries.entry(submodule).or_default().insert(action, granted);
        }
        PermissionStore::from(entries)
    })
}

/// Any store the engine may be handed.
fn any_store() -> impl Strategy<Value = PermissionStore> {
    prop_oneof![normalized_store(), sparse_store()]
}

/// A registered pair or an arbitrary one.
fn toggle_target() -> impl Strategy<Value = (String, String)> {
    let pairs = registered_pairs(&builtin_structure());
    prop_oneof![
        (0..pairs.len()).prop_map(move |idx| pairs[idx].clone()),
        ("[a-z-]{1,12}", "[a-z-]{1,8}"),
    ]
}

/// Index into the registered (submodule, action) pairs.
fn pair_index() -> impl Strategy<Value = usize> {
    let len = registered_pairs(&builtin_structure()).len();
    0..len
}

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z-]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z-]{1,16}", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn count_true_leaves(value: &Value) -> usize {
    match value {
        Value::Object(root) => root
            .values()
            .filter_map(Value::as_object)
            .map(|actions| actions.values().filter(|v| **v == Value::Bool(true)).count())
            .sum(),
        _ => 0,
    }
}

mod evaluation {
    use super::*;

    proptest! {
        /// Invariant: admins are allowed everything, whatever their store says
        #[test]
        fn admin_override(store in normalized_store(), sub in "[a-z-]{1,20}", action in "[a-z-]{1,12}") {
            let admin = UserAccess { permissions: Some(store), ..UserAccess::admin() };
            prop_assert!(has_permission(&admin, &sub, &action));
            prop_assert!(is_module_visible(&admin, &sub));
        }

        /// Invariant: an empty store grants nothing
        #[test]
        fn default_deny(sub in "[a-z-]{1,20}", action in "[a-z-]{1,12}") {
            let manager = UserAccess::manager(PermissionStore::new());
            prop_assert!(!has_permission(&manager, &sub, &action));
            prop_assert!(!is_module_visible(&manager, &sub));
        }

        /// Invariant: has_permission agrees with the store for every registered pair
        #[test]
        fn granular_lookup_matches_store(store in normalized_store(), idx in pair_index()) {
            let (sub, action) = registered_pairs(&builtin_structure())[idx].clone();
            let manager = UserAccess::manager(store.clone());
            prop_assert_eq!(has_permission(&manager, &sub, &action), store.is_granted(&sub, &action));
        }

        /// Invariant: decoding arbitrary JSON never grants more than its literal `true` leaves
        #[test]
        fn from_value_never_invents_grants(value in json_value()) {
            let store = PermissionStore::from_value(&value);
            prop_assert!(store.granted_count() <= count_true_leaves(&value));

            let normalized = store.normalized(&builtin_structure());
            prop_assert_eq!(normalized.len(), builtin_structure().all_submodule_ids().len());
        }
    }
}

mod mutation {
    use super::*;

    proptest! {
        /// Invariant: toggling the same action twice gives back an equal store
        #[test]
        fn double_toggle_is_identity(store in any_store(), (sub, action) in toggle_target()) {
            let once = toggle_action(&store, &sub, &action);
            prop_assert_ne!(&once, &store);
            let twice = toggle_action(&once, &sub, &action);
            prop_assert_eq!(&twice, &store);

            // without a legacy list, evaluation cannot tell the two apart
            let before = UserAccess::manager(store);
            let after = UserAccess::manager(twice);
            for (s, a) in registered_pairs(&builtin_structure()) {
                prop_assert_eq!(has_permission(&before, &s, &a), has_permission(&after, &s, &a));
            }
            prop_assert_eq!(has_permission(&before, &sub, &action), has_permission(&after, &sub, &action));
        }

        /// Invariant: a double toggle on a normalized store is structurally exact
        #[test]
        fn double_toggle_keeps_normalized_shape(store in normalized_store(), idx in pair_index()) {
            let (sub, action) = registered_pairs(&builtin_structure())[idx].clone();
            let twice = toggle_action(&toggle_action(&store, &sub, &action), &sub, &action);
            prop_assert_eq!(twice.to_value(), store.to_value());
        }

        /// Invariant: a submodule toggle leaves it either fully selected or fully cleared
        #[test]
        fn submodule_toggle_is_all_or_nothing(store in normalized_store(), idx in pair_index()) {
            let structure = builtin_structure();
            let (sub, _) = registered_pairs(&structure)[idx].clone();
            let actions = structure.actions_of(&sub).unwrap();

            let was_all = all_actions_selected(&store, &sub, &actions);
            let next = toggle_submodule(&store, &sub, &actions);

            if was_all {
                prop_assert!(!some_actions_selected(&next, &sub, &actions));
            } else {
                prop_assert!(all_actions_selected(&next, &sub, &actions));
            }
        }

        /// Invariant: a section toggle never touches other sections
        #[test]
        fn section_toggle_is_scoped(store in normalized_store(), section_idx in 0usize..4) {
            let structure = builtin_structure();
            let section = &structure.sections()[section_idx];
            let next = toggle_section(&store, &structure, &section.id).unwrap();

            for other in structure.sections().iter().filter(|s| s.id != section.id) {
                for sub in &other.submodules {
                    prop_assert_eq!(next.entry(&sub.id), store.entry(&sub.id));
                }
            }
        }

        /// Invariant: a global toggle ends at all or nothing
        #[test]
        fn global_toggle_is_all_or_nothing(store in normalized_store()) {
            let structure = builtin_structure();
            let next = toggle_all(&store, &structure);
            prop_assert!(
                all_modules_selected(&next, &structure) || !some_modules_selected(&next, &structure)
            );
        }
    }
}
