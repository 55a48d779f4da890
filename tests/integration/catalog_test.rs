//! Public catalog filters, paging and highlight lists.

use axum::http::StatusCode;
use uuid::Uuid;

use crate::helpers::{FilePart, TestApp};

fn titles(body: &serde_json::Value) -> Vec<String> {
    body["data"]["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item["title"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn test_text_filter_and_visibility() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.paid_user().await;
    let other = app.paid_user().await;
    let admin = app.admin().await;
    let category = app.create_category("Camping", None).await;
    let token = Uuid::new_v4().simple().to_string();

    let visible_title = format!("Tent {token}");
    app.published_listing(&owner, &admin, &category, &visible_title)
        .await;
    app.create_listing(&other, &category, &format!("Draft tent {token}"))
        .await;

    let response = app
        .request(
            "GET",
            &format!("/api/advertisements?textIcontains={}", token.to_uppercase()),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["count"], 1);
    assert_eq!(titles(&response.body), vec![visible_title]);

    let item = &response.body["data"]["items"][0];
    assert!(item["image"].as_str().is_some_and(|url| url.contains("/media/")));
    assert_eq!(item["categoryName"], category.as_str());
}

#[tokio::test]
async fn test_price_range_and_place() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.paid_user().await;
    let second = app.paid_user().await;
    let admin = app.admin().await;
    let category = app.create_category("Camping", None).await;
    let token = Uuid::new_v4().simple().to_string();

    let cheap = format!("Stove {token}");
    let pricey = format!("Kayak {token}");
    app.published_listing(&owner, &admin, &category, &cheap).await;

    let fields = TestApp::listing_fields(
        &category,
        &[("title", pricey.as_str()), ("dayPrice", "120"), ("place", "Tabriz")],
    );
    let created = app
        .multipart(
            "POST",
            "/api/advertisements",
            &fields,
            &[FilePart::image("kayak.png")],
            Some(&second.token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
    let id = created.body["data"]["id"].as_str().unwrap_or_default().to_string();
    app.request(
        "POST",
        &format!("/api/admin/advertisements/{id}/publish"),
        None,
        Some(&admin.token),
    )
    .await;

    let in_range = app
        .request(
            "GET",
            &format!("/api/advertisements?textIcontains={token}&dayPriceRange=100,150"),
            None,
            None,
        )
        .await;
    assert_eq!(titles(&in_range.body), vec![pricey.clone()]);

    let by_place = app
        .request(
            "GET",
            &format!("/api/advertisements?textIcontains={token}&placeIcontains=shir"),
            None,
            None,
        )
        .await;
    assert_eq!(titles(&by_place.body), vec![cheap]);

    let malformed = app
        .request("GET", "/api/advertisements?dayPriceRange=cheap", None, None)
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.reason(), Some("InvalidPriceRange"));
}

#[tokio::test]
async fn test_category_filter_includes_direct_children() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.paid_user().await;
    let second = app.paid_user().await;
    let third = app.paid_user().await;
    let admin = app.admin().await;
    let parent = app.create_category("Vehicles", None).await;
    let child = app.create_category("Trailers", Some(&parent)).await;
    let grandchild = app.create_category("Boat trailers", Some(&child)).await;
    let token = Uuid::new_v4().simple().to_string();

    app.published_listing(&owner, &admin, &parent, &format!("Van {token}"))
        .await;
    app.published_listing(&second, &admin, &child, &format!("Trailer {token}"))
        .await;
    app.published_listing(&third, &admin, &grandchild, &format!("Boat trailer {token}"))
        .await;

    let response = app
        .request(
            "GET",
            &format!(
                "/api/advertisements?textIcontains={token}&categoryName={}",
                parent.replace(' ', "%20")
            ),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["count"], 2);
    let found = titles(&response.body);
    assert!(found.contains(&format!("Van {token}")));
    assert!(found.contains(&format!("Trailer {token}")));
}

#[tokio::test]
async fn test_paging_newest_first() {
    let Some(app) = TestApp::new().await else { return };
    let admin = app.admin().await;
    let category = app.create_category("Camping", None).await;
    let token = Uuid::new_v4().simple().to_string();

    for n in 0..3 {
        let owner = app.paid_user().await;
        app.published_listing(&owner, &admin, &category, &format!("Lamp {n} {token}"))
            .await;
    }

    let page = |n: u32| format!("/api/advertisements?textIcontains={token}&page={n}&per-page=2");
    let first = app.request("GET", &page(1), None, None).await;
    assert_eq!(first.body["data"]["count"], 3);
    assert_eq!(
        titles(&first.body),
        vec![format!("Lamp 2 {token}"), format!("Lamp 1 {token}")]
    );

    let second = app.request("GET", &page(2), None, None).await;
    assert_eq!(titles(&second.body), vec![format!("Lamp 0 {token}")]);
}

#[tokio::test]
async fn test_highlight_lists() {
    let Some(app) = TestApp::new().await else { return };
    let owner = app.paid_user().await;
    let admin = app.admin().await;
    let category = app.create_category("Camping", None).await;
    app.published_listing(&owner, &admin, &category, "Headlamp")
        .await;

    for path in ["/api/advertisements/most-viewed", "/api/advertisements/recent"] {
        let response = app.request("GET", path, None, None).await;
        assert_eq!(response.status, StatusCode::OK, "{path}");
        let items = response.body["data"].as_array().expect("list");
        assert!(!items.is_empty());
        assert!(items.len() <= app.config.catalog.highlight_limit as usize);
    }
}

#[tokio::test]
async fn test_health() {
    let Some(app) = TestApp::new().await else { return };
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["database"], "connected");
    assert_eq!(response.body["data"]["cache"], "available");
}
