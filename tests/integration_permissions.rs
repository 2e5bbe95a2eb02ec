mod common;

use axum::http::StatusCode;
use common::{TestApp, admin, grants, manager, token_for};
use serde_json::json;

#[tokio::test]
async fn test_structure_requires_token() {
    let app = TestApp::new(vec![]);
    let (status, body) = app
        .request("GET", "/api/permissions/structure", None, None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Missing authorization header");
}

#[tokio::test]
async fn test_structure_lists_builtin_catalog_in_order() {
    let user = manager("viewer@example.com", grants(&[]));
    let token = token_for(&user);
    let app = TestApp::new(vec![user]);

    let (status, body) = app
        .request("GET", "/api/permissions/structure", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], 1);
    let section_ids: Vec<&str> = body["sections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(section_ids, vec!["packing", "products", "grn", "administration"]);
    assert_eq!(body["sections"][0]["submodules"][2]["actions"][1]["id"], "create-po");
}

#[tokio::test]
async fn test_token_for_deleted_user_is_rejected() {
    let ghost = manager("ghost@example.com", grants(&[]));
    let token = token_for(&ghost);
    let app = TestApp::new(vec![]);

    let (status, body) = app
        .request("GET", "/api/permissions/structure", Some(&token), None)
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "User no longer exists");
}

#[tokio::test]
async fn test_draft_toggle_section_selects_whole_section() {
    let user = admin("admin@example.com");
    let token = token_for(&user);
    let app = TestApp::new(vec![user]);

    let (status, body) = app
        .request(
            "POST",
            "/api/permissions/draft/toggle",
            Some(&token),
            Some(json!({ "toggle": { "scope": "section", "section": "grn" } })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["draft"]["grn-entries"]["approve"], true);
    assert_eq!(body["draft"]["grn-reports"]["export"], true);
    assert!(body["draft"].get("material-stock").is_none());

    let grn = body["selection"]["sections"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["section"] == "grn")
        .unwrap();
    assert_eq!(grn["state"], "checked");
    assert_eq!(body["selection"]["overall"], "indeterminate");
}

#[tokio::test]
async fn test_draft_toggle_completes_partially_selected_submodule() {
    let user = admin("admin@example.com");
    let token = token_for(&user);
    let app = TestApp::new(vec![user]);

    let (status, body) = app
        .request(
            "POST",
            "/api/permissions/draft/toggle",
            Some(&token),
            Some(json!({
                "draft": { "grn-entries": { "view": true, "add": false } },
                "toggle": { "scope": "submodule", "submodule": "grn-entries" }
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    for action in ["view", "add", "edit", "delete", "approve"] {
        assert_eq!(body["draft"]["grn-entries"][action], true, "{action}");
    }
}

#[tokio::test]
async fn test_draft_toggle_unknown_action_is_bad_request() {
    let user = admin("admin@example.com");
    let token = token_for(&user);
    let app = TestApp::new(vec![user]);

    let (status, body) = app
        .request(
            "POST",
            "/api/permissions/draft/toggle",
            Some(&token),
            Some(json!({
                "toggle": { "scope": "action", "submodule": "grn-reports", "action": "approve" }
            })),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("approve"));
}

#[tokio::test]
async fn test_draft_toggle_requires_manage_permissions() {
    let user = manager("viewer@example.com", grants(&[("managers", "view")]));
    let token = token_for(&user);
    let app = TestApp::new(vec![user]);

    let (status, _) = app
        .request(
            "POST",
            "/api/permissions/draft/toggle",
            Some(&token),
            Some(json!({ "toggle": { "scope": "all" } })),
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}
