//! Admin category management.

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use rental_entity::user::UserRole;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_category_crud() {
    let Some(app) = TestApp::new().await else { return };
    let admin = app.admin().await;
    let tag = Uuid::new_v4().simple().to_string()[..8].to_string();
    let parent_name = format!("Electronics {tag}");
    let child_name = format!("Cameras {tag}");

    let parent = app
        .request(
            "POST",
            "/api/admin/categories",
            Some(json!({ "name": parent_name, "slug": format!("electronics-{tag}") })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(parent.status, StatusCode::CREATED, "{:?}", parent.body);

    let child = app
        .request(
            "POST",
            "/api/admin/categories",
            Some(json!({
                "name": child_name,
                "slug": format!("cameras-{tag}"),
                "parentCategoryName": parent_name,
            })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(child.status, StatusCode::CREATED);
    assert_eq!(child.body["data"]["parentName"], parent_name.as_str());

    let fetched = app
        .request(
            "GET",
            &format!("/api/admin/categories/cameras-{tag}"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["data"]["name"], child_name.as_str());

    let search = app
        .request(
            "GET",
            &format!("/api/admin/categories/search?name=CAMERAS%20{tag}"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(search.body["data"], json!([child_name]));

    let in_use = app
        .request(
            "DELETE",
            &format!("/api/admin/categories/electronics-{tag}"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(in_use.status, StatusCode::CONFLICT);
    assert_eq!(in_use.reason(), Some("CategoryInUse"));

    let renamed = app
        .request(
            "PUT",
            &format!("/api/admin/categories/cameras-{tag}"),
            Some(json!({ "name": format!("Film cameras {tag}"), "slug": format!("film-{tag}") })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert!(renamed.body["data"]["parentName"].is_null());

    for slug in [format!("film-{tag}"), format!("electronics-{tag}")] {
        let deleted = app
            .request(
                "DELETE",
                &format!("/api/admin/categories/{slug}"),
                None,
                Some(&admin.token),
            )
            .await;
        assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    }

    let gone = app
        .request(
            "GET",
            &format!("/api/admin/categories/film-{tag}"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_category_errors() {
    let Some(app) = TestApp::new().await else { return };
    let admin = app.admin().await;
    let member = app.create_user(UserRole::User, false).await;
    let existing = app.create_category("Music", None).await;

    let duplicate = app
        .request(
            "POST",
            "/api/admin/categories",
            Some(json!({ "name": existing, "slug": Uuid::new_v4().simple().to_string() })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.reason(), Some("DuplicateCategoryName"));

    let orphan = app
        .request(
            "POST",
            "/api/admin/categories",
            Some(json!({
                "name": format!("Orphan {}", Uuid::new_v4()),
                "slug": Uuid::new_v4().simple().to_string(),
                "parentCategoryName": "No such parent",
            })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(orphan.status, StatusCode::NOT_FOUND);
    assert_eq!(orphan.reason(), Some("InvalidParentCategoryName"));

    let bad_slug = app
        .request(
            "POST",
            "/api/admin/categories",
            Some(json!({ "name": "Bad slug", "slug": "Not A Slug" })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(bad_slug.status, StatusCode::BAD_REQUEST);

    let forbidden = app
        .request("GET", "/api/admin/categories", None, Some(&member.token))
        .await;
    assert_eq!(forbidden.status, StatusCode::FORBIDDEN);

    let listed = app
        .request("GET", "/api/admin/categories?per-page=5", None, Some(&admin.token))
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    assert!(listed.body["data"]["count"].as_i64().unwrap_or(0) >= 1);
    assert!(listed.body["data"]["items"].as_array().map(Vec::len).unwrap_or(0) <= 5);
}
