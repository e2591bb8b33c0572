//! View pipeline API integration tests.

mod common;

use axum::http::StatusCode;
use serde_json::json;
use std::time::Duration;

use common::TestFixture;

async fn seed(fixture: &TestFixture) {
    let records = [
        ("Ubuntu 24.04", "software", "linux, iso", Some("5.8 GB")),
        ("Big Buck Bunny", "video", "animation", Some("700 MB")),
        ("Sintel", "video", "linux demo", None),
    ];
    for (name, category, tags, size) in records {
        let mut body = json!({
            "name": name,
            "magnet": format!("magnet:?xt=urn:btih:{}", name),
            "category": category,
            "tags": tags
        });
        if let Some(size) = size {
            body["size"] = json!(size);
        }
        let response = fixture.post("/api/v1/torrents", body).await;
        assert_eq!(response.status, StatusCode::CREATED);
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

#[tokio::test]
async fn test_view_reflects_category_filter() {
    let fixture = TestFixture::new().await;
    seed(&fixture).await;

    let response = fixture
        .put("/api/v1/view/category", json!({ "category": "video" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["category"], "video");

    let view = fixture.get("/api/v1/view").await;
    assert_eq!(view.body["total"], 3);
    assert_eq!(view.body["filtered"], 2);
    assert!(view.body["last_refreshed"].is_string());
}

#[tokio::test]
async fn test_view_search_is_debounced() {
    let fixture = TestFixture::new().await;
    seed(&fixture).await;

    // Populate the display list through an immediate control change.
    fixture
        .put("/api/v1/view/sort", json!({ "sort": "newest" }))
        .await;
    assert_eq!(fixture.get("/api/v1/view").await.body["filtered"], 3);

    let response = fixture
        .put("/api/v1/view/search", json!({ "text": "ubuntu" }))
        .await;
    assert_eq!(response.status, StatusCode::ACCEPTED);

    // Inside the quiescence window the published list is unchanged.
    assert_eq!(fixture.get("/api/v1/view").await.body["filtered"], 3);

    tokio::time::sleep(Duration::from_millis(450)).await;

    let view = fixture.get("/api/v1/view").await;
    assert_eq!(view.body["filtered"], 1);
    assert_eq!(view.body["entries"][0]["name"], "Ubuntu 24.04");
}

#[tokio::test]
async fn test_view_sort_by_size() {
    let fixture = TestFixture::new().await;
    seed(&fixture).await;

    let response = fixture
        .put("/api/v1/view/sort", json!({ "sort": "size" }))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["sort"], "size");

    let view = fixture.get("/api/v1/view").await;
    let names: Vec<&str> = view.body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ubuntu 24.04", "Big Buck Bunny", "Sintel"]);
}

#[tokio::test]
async fn test_view_entries_carry_display_defaults() {
    let fixture = TestFixture::new().await;
    seed(&fixture).await;

    fixture
        .put("/api/v1/view/category", json!({ "category": null }))
        .await;

    let view = fixture.get("/api/v1/view").await;
    let sintel = view.body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["name"] == "Sintel")
        .unwrap();
    assert_eq!(sintel["size"], "Unknown");
    assert_eq!(sintel["uploader"], "Anonymous");
    assert_eq!(sintel["tags"], json!(["linux demo"]));
}

#[tokio::test]
async fn test_view_invalid_sort_mode_rejected() {
    let fixture = TestFixture::new().await;

    let response = fixture
        .put("/api/v1/view/sort", json!({ "sort": "sideways" }))
        .await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
}
