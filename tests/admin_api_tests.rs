// SPDX-License-Identifier: MIT

//! Admin console record tests: role gating and news/live/venue CRUD.

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

mod common;

use common::{bare_request, body_json, json_request};

#[tokio::test]
async fn test_admin_routes_require_auth() {
    let (app, _) = common::create_test_app().await;

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/api/admin/news")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_reject_non_admin() {
    let (app, state) = common::create_test_app().await;

    // A plain user, and a user with no profile row at all.
    state.db.upsert_profile("user-1", "user").await.unwrap();

    for user in ["user-1", "no-profile-user"] {
        let response = app
            .clone()
            .oneshot(bare_request("GET", "/api/admin/news", user))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn test_news_draft_publish_flow() {
    let (app, state) = common::create_test_app().await;
    state.db.upsert_profile("admin-1", "admin").await.unwrap();

    // Create a draft
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/news",
            "admin-1",
            json!({
                "slug": "hello-world",
                "title_ja": "サイトリニューアルのお知らせ",
                "title_en": "Website Renewal",
                "body_ja": "公式サイトをリニューアルしました。",
                "category": "info",
                "status": "draft"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = body_json(response).await;
    assert_eq!(created["success"], true);
    let id = created["id"].as_str().unwrap().to_string();

    // Drafts are hidden from the public listing
    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .uri("/api/news")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert!(body["news"].as_array().unwrap().is_empty());

    // ...but present in the admin listing
    let response = app
        .clone()
        .oneshot(bare_request("GET", "/api/admin/news", "admin-1"))
        .await
        .unwrap();
    let listing = body_json(response).await;
    assert_eq!(listing.as_array().unwrap().len(), 1);

    // Publish it
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/admin/news/{}", id),
            "admin-1",
            json!({
                "slug": "hello-world",
                "title_ja": "サイトリニューアルのお知らせ",
                "title_en": "Website Renewal",
                "body_ja": "公式サイトをリニューアルしました。",
                "category": "info",
                "status": "published",
                "published_at": "2026-08-01T00:00:00Z"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Now visible publicly
    let response = app
        .oneshot(
            axum::http::Request::builder()
                .uri("/api/news")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    let news = body["news"].as_array().unwrap();
    assert_eq!(news.len(), 1);
    assert_eq!(news[0]["slug"], "hello-world");
    assert_eq!(news[0]["title_en"], "Website Renewal");
}

#[tokio::test]
async fn test_news_validation_rejects_blank_fields() {
    let (app, state) = common::create_test_app().await;
    state.db.upsert_profile("admin-1", "admin").await.unwrap();

    let cases = [
        json!({"slug": "", "title_ja": "タイトル"}),
        json!({"slug": "ok-slug", "title_ja": "  "}),
        json!({"slug": "ok-slug", "title_ja": "タイトル", "status": "archived"}),
    ];

    for body in cases {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/admin/news", "admin-1", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_news_delete_and_missing_id() {
    let (app, state) = common::create_test_app().await;
    state.db.upsert_profile("admin-1", "admin").await.unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/news",
            "admin-1",
            json!({"slug": "to-delete", "title_ja": "削除予定"}),
        ))
        .await
        .unwrap();
    let id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(bare_request(
            "DELETE",
            &format!("/api/admin/news/{}", id),
            "admin-1",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Second delete: the row is gone
    let response = app
        .oneshot(bare_request(
            "DELETE",
            &format!("/api/admin/news/{}", id),
            "admin-1",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_live_with_venue_appears_in_public_listing() {
    let (app, state) = common::create_test_app().await;
    state.db.upsert_profile("admin-1", "admin").await.unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/venues",
            "admin-1",
            json!({
                "name_ja": "渋谷 WWW",
                "name_en": "Shibuya WWW",
                "address_ja": "東京都渋谷区宇田川町13-17"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let venue_id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/lives",
            "admin-1",
            json!({
                "title_ja": "Crazy Night Vol.1",
                "date": "2026-04-01T10:00:00Z",
                "open_time": "18:00",
                "start_time": "19:00",
                "price_ja": "¥3,500",
                "venue_id": venue_id,
                "status": "published"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            axum::http::Request::builder()
                .uri("/api/lives")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    let lives = body["lives"].as_array().unwrap();
    assert_eq!(lives.len(), 1);
    assert_eq!(lives[0]["title_ja"], "Crazy Night Vol.1");
    assert_eq!(lives[0]["venue_name_ja"], "渋谷 WWW");
    assert_eq!(lives[0]["venue_name_en"], "Shibuya WWW");
}

#[tokio::test]
async fn test_live_delete_removes_from_listings() {
    let (app, state) = common::create_test_app().await;
    state.db.upsert_profile("admin-1", "admin").await.unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/lives",
            "admin-1",
            json!({"title_ja": "Crazy Night Vol.2", "status": "published"}),
        ))
        .await
        .unwrap();
    let id = body_json(response).await["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(bare_request(
            "DELETE",
            &format!("/api/admin/lives/{}", id),
            "admin-1",
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            axum::http::Request::builder()
                .uri("/api/lives")
                .body(axum::body::Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert!(body["lives"].as_array().unwrap().is_empty());

    let response = app
        .oneshot(bare_request("GET", "/api/admin/lives", "admin-1"))
        .await
        .unwrap();
    let listing = body_json(response).await;
    assert!(listing.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_missing_live_is_not_found() {
    let (app, state) = common::create_test_app().await;
    state.db.upsert_profile("admin-1", "admin").await.unwrap();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/admin/lives/00000000-0000-0000-0000-000000000000",
            "admin-1",
            json!({"title_ja": "どこにもない"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
