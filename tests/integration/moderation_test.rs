//! Admin moderation: publish, comment, remove and bans.

use axum::http::StatusCode;
use serde_json::json;

use rental_entity::user::UserRole;

use crate::helpers::{TestApp, key_of};

#[tokio::test]
async fn test_publish_makes_listing_public() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.paid_user().await;
    let admin = app.admin().await;
    let category = app.create_category("Garden", None).await;
    let id = app.create_listing(&owner, &category, "Lawn mower").await;
    let public_path = format!("/api/advertisements/{id}");

    let hidden = app.request("GET", &public_path, None, None).await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    for _ in 0..2 {
        let published = app
            .request(
                "POST",
                &format!("/api/admin/advertisements/{id}/publish"),
                None,
                Some(&admin.token),
            )
            .await;
        assert_eq!(published.status, StatusCode::NO_CONTENT);
    }

    let first = app.request("GET", &public_path, None, None).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.body["data"]["title"], "Lawn mower");
    assert!(first.body["data"].get("adminComment").is_none());
    assert!(first.body["data"].get("phoneNumber").is_none());

    let second = app.request("GET", &public_path, None, None).await;
    let views = |body: &serde_json::Value| body["data"]["views"].as_i64().unwrap_or(-1);
    assert_eq!(views(&second.body), views(&first.body) + 1);
}

#[tokio::test]
async fn test_moderation_requires_admin() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.paid_user().await;
    let category = app.create_category("Garden", None).await;
    let id = app.create_listing(&owner, &category, "Hedge trimmer").await;

    let response = app
        .request(
            "POST",
            &format!("/api/admin/advertisements/{id}/publish"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request("GET", "/api/admin/advertisements", None, Some(&owner.token))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_comment_unpublishes() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.paid_user().await;
    let admin = app.admin().await;
    let category = app.create_category("Garden", None).await;
    let id = app
        .published_listing(&owner, &admin, &category, "Leaf blower")
        .await;
    let comment_path = format!("/api/admin/advertisements/{id}/comment");

    let blank = app
        .request("POST", &comment_path, Some(json!({ "comment": "   " })), Some(&admin.token))
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank.reason(), Some("EmptyComment"));

    let commented = app
        .request(
            "POST",
            &comment_path,
            Some(json!({ "comment": "Price looks wrong" })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(commented.status, StatusCode::NO_CONTENT);

    let public = app
        .request("GET", &format!("/api/advertisements/{id}"), None, None)
        .await;
    assert_eq!(public.status, StatusCode::NOT_FOUND);

    let mine = app
        .request("GET", "/api/my/advertisements", None, Some(&owner.token))
        .await;
    let entry = mine.body["data"]
        .as_array()
        .and_then(|items| items.iter().find(|item| item["id"] == id.as_str()))
        .cloned()
        .expect("listing in owner list");
    assert_eq!(entry["adminComment"], "Price looks wrong");
    assert_eq!(entry["published"], false);

    let unpublished = app
        .request(
            "POST",
            &format!("/api/admin/advertisements/{id}/unpublish"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(unpublished.status, StatusCode::NO_CONTENT);

    let admin_view = app
        .request(
            "GET",
            &format!("/api/admin/advertisements/{id}"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(admin_view.body["data"]["state"], "needs_revision");
    assert_eq!(admin_view.body["data"]["adminComment"], "Price looks wrong");
}

#[tokio::test]
async fn test_deleted_listing_cannot_be_moderated() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.paid_user().await;
    let admin = app.admin().await;
    let category = app.create_category("Garden", None).await;
    let id = app.create_listing(&owner, &category, "Wheelbarrow").await;

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/my/advertisements/{id}"),
            None,
            Some(&owner.token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let publish = app
        .request(
            "POST",
            &format!("/api/admin/advertisements/{id}/publish"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(publish.status, StatusCode::CONFLICT);
    assert_eq!(publish.reason(), Some("AdvertisementDeleted"));

    let comment = app
        .request(
            "POST",
            &format!("/api/admin/advertisements/{id}/comment"),
            Some(json!({ "comment": "Too late" })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(comment.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_admin_remove_deletes_rows_and_blobs() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.paid_user().await;
    let admin = app.admin().await;
    let category = app.create_category("Garden", None).await;
    let id = app.create_listing(&owner, &category, "Chainsaw").await;
    let admin_path = format!("/api/admin/advertisements/{id}");

    let detail = app.request("GET", &admin_path, None, Some(&admin.token)).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert!(detail.body["data"]["phoneNumber"].is_string());
    let keys: Vec<String> = detail.body["data"]["imageUrls"]
        .as_array()
        .expect("imageUrls")
        .iter()
        .map(key_of)
        .collect();
    assert!(keys.iter().all(|key| app.blob_exists(key)));

    let removed = app.request("DELETE", &admin_path, None, Some(&admin.token)).await;
    assert_eq!(removed.status, StatusCode::NO_CONTENT);
    assert!(keys.iter().all(|key| !app.blob_exists(key)));

    let images: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM advertisement_images WHERE advertisement_id = $1::uuid",
    )
    .bind(&id)
    .fetch_one(&app.db_pool)
    .await
    .expect("count query");
    assert_eq!(images, 0);

    let again = app.request("DELETE", &admin_path, None, Some(&admin.token)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_ban_hides_listings() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.paid_user().await;
    let admin = app.admin().await;
    let category = app.create_category("Garden", None).await;
    let id = app
        .published_listing(&owner, &admin, &category, "Pressure washer")
        .await;
    let public_path = format!("/api/advertisements/{id}");

    let banned = app
        .request(
            "POST",
            &format!("/api/admin/users/{}/ban", owner.id),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(banned.status, StatusCode::NO_CONTENT);
    let hidden = app.request("GET", &public_path, None, None).await;
    assert_eq!(hidden.status, StatusCode::NOT_FOUND);

    let unbanned = app
        .request(
            "POST",
            &format!("/api/admin/users/{}/unban", owner.id),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(unbanned.status, StatusCode::NO_CONTENT);
    let visible = app.request("GET", &public_path, None, None).await;
    assert_eq!(visible.status, StatusCode::OK);
}

#[tokio::test]
async fn test_ban_rules() {
    let Some(app) = TestApp::new().await else { return };
    let admin = app.admin().await;
    let member = app.create_user(UserRole::User, false).await;

    let self_ban = app
        .request(
            "POST",
            &format!("/api/admin/users/{}/ban", admin.id),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(self_ban.status, StatusCode::BAD_REQUEST);

    let unknown = app
        .request(
            "POST",
            &format!("/api/admin/users/{}/ban", uuid::Uuid::new_v4()),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
    assert_eq!(unknown.reason(), Some("UserNotFound"));

    let by_member = app
        .request(
            "POST",
            &format!("/api/admin/users/{}/ban", admin.id),
            None,
            Some(&member.token),
        )
        .await;
    assert_eq!(by_member.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_malformed_comment_body_uses_error_envelope() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.paid_user().await;
    let admin = app.admin().await;
    let category = app.create_category("Garden", None).await;
    let id = app.create_listing(&owner, &category, "Hedge trimmer").await;
    let comment_path = format!("/api/admin/advertisements/{id}/comment");

    let malformed = app
        .raw_json("POST", &comment_path, "{\"comment\": ", Some(&admin.token))
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.body["success"], false);
    assert_eq!(malformed.body["error"]["code"], "VALIDATION");

    let wrong_shape = app
        .raw_json("POST", &comment_path, "{\"note\": \"hi\"}", Some(&admin.token))
        .await;
    assert_eq!(wrong_shape.status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_shape.body["success"], false);

    let category_path = "/api/admin/categories";
    let bad_category = app
        .raw_json("POST", category_path, "not json", Some(&admin.token))
        .await;
    assert_eq!(bad_category.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_category.body["error"]["code"], "VALIDATION");
}
