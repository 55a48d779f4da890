//! Listing submission, resubmission and owner deletion.

use axum::http::StatusCode;
use serde_json::json;

use rental_entity::user::UserRole;

use crate::helpers::{FilePart, TestApp, TestUser, key_of};

async fn listing_count(app: &TestApp, title: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM advertisements WHERE title = $1")
        .bind(title)
        .fetch_one(&app.db_pool)
        .await
        .expect("count query")
}

#[tokio::test]
async fn test_create_requires_subscription_fee() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.create_user(UserRole::User, false).await;
    let category = app.create_category("Tools", None).await;

    let fields = TestApp::listing_fields(&category, &[]);
    let response = app
        .multipart(
            "POST",
            "/api/advertisements",
            &fields,
            &[FilePart::image("a.png")],
            Some(&user.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(response.reason(), Some("PaymentRequired"));
}

#[tokio::test]
async fn test_create_requires_authentication() {
    let Some(app) = TestApp::new().await else { return };
    let category = app.create_category("Tools", None).await;
    let fields = TestApp::listing_fields(&category, &[]);

    let response = app
        .multipart(
            "POST",
            "/api/advertisements",
            &fields,
            &[FilePart::image("a.png")],
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_fee_pays_for_exactly_one_listing() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.create_user(UserRole::User, false).await;
    let category = app.create_category("Tools", None).await;

    let paid = app
        .request("POST", "/api/payments/subscription-fee", None, Some(&user.token))
        .await;
    assert_eq!(paid.status, StatusCode::NO_CONTENT);

    let again = app
        .request("POST", "/api/payments/subscription-fee", None, Some(&user.token))
        .await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert_eq!(again.reason(), Some("AlreadyPaid"));

    let fields = TestApp::listing_fields(&category, &[]);
    let created = app
        .multipart(
            "POST",
            "/api/advertisements",
            &fields,
            &[FilePart::image("a.png")],
            Some(&user.token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
    assert_eq!(created.body["data"]["title"], "Cordless drill");
    assert_eq!(created.body["data"]["place"], "Shiraz");
    assert!(created.body["data"]["id"].is_string());

    let second = app
        .multipart(
            "POST",
            "/api/advertisements",
            &fields,
            &[FilePart::image("a.png")],
            Some(&user.token),
        )
        .await;
    assert_eq!(second.status, StatusCode::PAYMENT_REQUIRED);
}

#[tokio::test]
async fn test_rejected_create_keeps_fee() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.paid_user().await;
    let category = app.create_category("Tools", None).await;

    let week_without_days = TestApp::listing_fields(&category, &[("weekPrice", "90")]);
    let response = app
        .multipart(
            "POST",
            "/api/advertisements",
            &week_without_days,
            &[FilePart::image("a.png")],
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.reason(), Some("InsufficientDaysForWeekRate"));

    let unknown_category = TestApp::listing_fields("No such category", &[]);
    let response = app
        .multipart(
            "POST",
            "/api/advertisements",
            &unknown_category,
            &[FilePart::image("a.png")],
            Some(&user.token),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.reason(), Some("UnknownCategory"));

    let no_images = TestApp::listing_fields(&category, &[]);
    let response = app
        .multipart("POST", "/api/advertisements", &no_images, &[], Some(&user.token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.reason(), Some("NoImages"));

    app.create_listing(&user, &category, "Still paid").await;
}

#[tokio::test]
async fn test_duplicate_day_rolls_back() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.paid_user().await;
    let category = app.create_category("Tools", None).await;
    let title = format!("Duplicate day {}", user.id);

    let fields = TestApp::listing_fields(
        &category,
        &[("title", title.as_str()), ("days", "2030-06-01,2030-06-01")],
    );
    let response = app
        .multipart(
            "POST",
            "/api/advertisements",
            &fields,
            &[FilePart::image("a.png")],
            Some(&user.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.reason(), Some("DuplicateCalendarDay"));
    assert_eq!(listing_count(&app, &title).await, 0);

    let fee: bool = sqlx::query_scalar("SELECT has_subscription_fee FROM users WHERE id = $1")
        .bind(user.id)
        .fetch_one(&app.db_pool)
        .await
        .expect("fee query");
    assert!(fee);
}

#[tokio::test]
async fn test_create_uploads_media() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.paid_user().await;
    let category = app.create_category("Tools", None).await;
    let id = app.create_listing(&user, &category, "With media").await;

    let detail = app
        .request("GET", &format!("/api/my/advertisements/{id}"), None, Some(&user.token))
        .await;
    assert_eq!(detail.status, StatusCode::OK);

    let urls = detail.body["data"]["imageUrls"].as_array().expect("imageUrls");
    assert_eq!(urls.len(), 2);
    for url in urls {
        assert!(app.blob_exists(&key_of(url)));
    }
    assert_eq!(detail.body["data"]["state"], "draft");
    assert_eq!(detail.body["data"]["days"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_update_only_after_admin_comment() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.paid_user().await;
    let admin = app.admin().await;
    let category = app.create_category("Tools", None).await;
    let id = app.create_listing(&owner, &category, "Needs work").await;
    let path = format!("/api/my/advertisements/{id}");

    let fields = TestApp::listing_fields(&category, &[("title", "Reworked")]);
    let premature = app
        .multipart("PUT", &path, &fields, &[FilePart::image("new.png")], Some(&owner.token))
        .await;
    assert_eq!(premature.status, StatusCode::CONFLICT);
    assert_eq!(premature.reason(), Some("NotEligibleForUpdate"));

    let commented = app
        .request(
            "POST",
            &format!("/api/admin/advertisements/{id}/comment"),
            Some(json!({ "comment": "Please add a photo of the charger" })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(commented.status, StatusCode::NO_CONTENT);

    let before = app.request("GET", &path, None, Some(&owner.token)).await;
    assert_eq!(before.body["data"]["state"], "needs_revision");
    let urls = before.body["data"]["imageUrls"].as_array().expect("imageUrls").clone();
    let kept = key_of(&urls[0]);
    let dropped = key_of(&urls[1]);

    let fields = TestApp::listing_fields(
        &category,
        &[("title", "Reworked"), ("previousImages", urls[0].as_str().unwrap_or_default())],
    );
    let updated = app
        .multipart("PUT", &path, &fields, &[FilePart::image("charger.png")], Some(&owner.token))
        .await;
    assert_eq!(updated.status, StatusCode::NO_CONTENT, "{:?}", updated.body);

    let after = app.request("GET", &path, None, Some(&owner.token)).await;
    assert_eq!(after.body["data"]["title"], "Reworked");
    assert_eq!(after.body["data"]["state"], "draft");
    assert!(after.body["data"].get("adminComment").is_none());

    let keys: Vec<String> = after.body["data"]["imageUrls"]
        .as_array()
        .expect("imageUrls")
        .iter()
        .map(key_of)
        .collect();
    assert_eq!(keys.len(), 2);
    assert!(keys.contains(&kept));
    assert!(!keys.contains(&dropped));
    assert!(!app.blob_exists(&dropped));
    assert!(app.blob_exists(&kept));

    let again = app
        .multipart("PUT", &path, &fields, &[], Some(&owner.token))
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_owner_delete() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.paid_user().await;
    let stranger = app.create_user(UserRole::User, false).await;
    let admin = app.admin().await;
    let category = app.create_category("Tools", None).await;
    let id = app
        .published_listing(&owner, &admin, &category, "Short lived")
        .await;
    let path = format!("/api/my/advertisements/{id}");

    let denied = app.request("DELETE", &path, None, Some(&stranger.token)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);
    assert_eq!(denied.reason(), Some("NotOwner"));

    let deleted = app.request("DELETE", &path, None, Some(&owner.token)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let public = app
        .request("GET", &format!("/api/advertisements/{id}"), None, None)
        .await;
    assert_eq!(public.status, StatusCode::NOT_FOUND);

    let admin_view = app
        .request(
            "GET",
            &format!("/api/admin/advertisements/{id}"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(admin_view.status, StatusCode::OK);
    assert_eq!(admin_view.body["data"]["state"], "deleted");

    let twice = app.request("DELETE", &path, None, Some(&owner.token)).await;
    assert_eq!(twice.status, StatusCode::FORBIDDEN);
}

async fn has_fee(app: &TestApp, user: &TestUser) -> bool {
    sqlx::query_scalar("SELECT has_subscription_fee FROM users WHERE id = $1")
        .bind(user.id)
        .fetch_one(&app.db_pool)
        .await
        .expect("fee query")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_creates_consume_fee_once() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.paid_user().await;
    let category = app.create_category("Tools", None).await;
    let fields = TestApp::listing_fields(&category, &[]);
    let images = [FilePart::image("a.png")];
    let create = || {
        app.multipart("POST", "/api/advertisements", &fields, &images, Some(&user.token))
    };

    let (a, b, c, d) = tokio::join!(create(), create(), create(), create());
    let statuses = [a.status, b.status, c.status, d.status];

    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let refused = statuses
        .iter()
        .filter(|s| **s == StatusCode::PAYMENT_REQUIRED)
        .count();
    assert_eq!(created, 1, "{statuses:?}");
    assert_eq!(refused, 3, "{statuses:?}");

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM advertisements WHERE user_id = $1")
        .bind(user.id)
        .fetch_one(&app.db_pool)
        .await
        .expect("count query");
    assert_eq!(rows, 1);
    assert!(!has_fee(&app, &user).await);
}

#[tokio::test]
async fn test_upload_failure_after_commit() {
    let Some(app) = TestApp::new().await else { return };
    let user = app.paid_user().await;
    let category = app.create_category("Tools", None).await;
    let title = format!("Unlucky upload {}", user.id);
    let fields = TestApp::listing_fields(&category, &[("title", &title)]);

    app.storage.fail_uploads();
    let response = app
        .multipart(
            "POST",
            "/api/advertisements",
            &fields,
            &[FilePart::image("a.png"), FilePart::image("b.png")],
            Some(&user.token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.reason(), Some("UploadFailed"));
    assert_eq!(response.body["success"], false);

    assert_eq!(listing_count(&app, &title).await, 1);
    let images: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM advertisement_images i
         JOIN advertisements a ON a.id = i.advertisement_id
         WHERE a.title = $1",
    )
    .bind(&title)
    .fetch_one(&app.db_pool)
    .await
    .expect("image count");
    assert_eq!(images, 2);
    let days: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM calendar_entries c
         JOIN advertisements a ON a.id = c.advertisement_id
         WHERE a.title = $1",
    )
    .bind(&title)
    .fetch_one(&app.db_pool)
    .await
    .expect("day count");
    assert_eq!(days, 2);
    assert!(!has_fee(&app, &user).await);
}

#[tokio::test]
async fn test_published_listing_with_comment_can_be_updated() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.paid_user().await;
    let admin = app.admin().await;
    let category = app.create_category("Tools", None).await;
    let id = app.create_listing(&owner, &category, "Commented then published").await;

    let commented = app
        .request(
            "POST",
            &format!("/api/admin/advertisements/{id}/comment"),
            Some(json!({ "comment": "Mention the battery capacity" })),
            Some(&admin.token),
        )
        .await;
    assert_eq!(commented.status, StatusCode::NO_CONTENT);
    let published = app
        .request(
            "POST",
            &format!("/api/admin/advertisements/{id}/publish"),
            None,
            Some(&admin.token),
        )
        .await;
    assert_eq!(published.status, StatusCode::NO_CONTENT);

    let path = format!("/api/my/advertisements/{id}");
    let fields = TestApp::listing_fields(&category, &[("title", "With capacity")]);
    let updated = app
        .multipart("PUT", &path, &fields, &[FilePart::image("c.png")], Some(&owner.token))
        .await;
    assert_eq!(updated.status, StatusCode::NO_CONTENT, "{:?}", updated.body);

    let after = app.request("GET", &path, None, Some(&owner.token)).await;
    assert_eq!(after.body["data"]["title"], "With capacity");
    assert_eq!(after.body["data"]["state"], "draft");
}

#[tokio::test]
async fn test_failed_update_upload_still_drops_detached_images() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.paid_user().await;
    let admin = app.admin().await;
    let category = app.create_category("Tools", None).await;
    let id = app.create_listing(&owner, &category, "Flaky resubmit").await;
    app.request(
        "POST",
        &format!("/api/admin/advertisements/{id}/comment"),
        Some(json!({ "comment": "Replace the blurry photo" })),
        Some(&admin.token),
    )
    .await;

    let path = format!("/api/my/advertisements/{id}");
    let before = app.request("GET", &path, None, Some(&owner.token)).await;
    let urls = before.body["data"]["imageUrls"].as_array().expect("imageUrls").clone();
    let kept = key_of(&urls[0]);
    let dropped = key_of(&urls[1]);
    assert!(app.blob_exists(&dropped));

    app.storage.fail_uploads();
    let fields = TestApp::listing_fields(
        &category,
        &[("previousImages", urls[0].as_str().unwrap_or_default())],
    );
    let response = app
        .multipart("PUT", &path, &fields, &[FilePart::image("sharp.png")], Some(&owner.token))
        .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
    assert_eq!(response.reason(), Some("UploadFailed"));
    assert!(!app.blob_exists(&dropped));
    assert!(app.blob_exists(&kept));
}
