
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

fn contact_body() -> Value {
    json!({
        "name": "Ada",
        "email": "Ada@Example.COM",
        "message": "I would love to chat about your bot."
    })
}

#[actix_rt::test]
async fn seeded_bot_is_public() {
    let app = TestApp::spawn().await;

    let (status, bot) = app.get_json("/api/bot").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(bot["name"], "Amazing Bot");
    assert_eq!(bot["features"].as_array().unwrap().len(), 6);
}

#[actix_rt::test]
async fn bot_upsert_keeps_single_record_and_lists_when_omitted() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;
    let (_, before) = app.get_json("/api/bot").await;

    let response = app
        .client
        .put(app.url("/api/bot"))
        .bearer_auth(&token)
        .json(&json!({
            "name": "Better Bot",
            "tagline": "Now with more answers",
            "description": "Rewritten from scratch.",
            "githubRepo": "https://github.com/example/better-bot",
            "demoUrl": "https://bot.example.com"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, after) = app.get_json("/api/bot").await;
    assert_eq!(after["id"], before["id"]);
    assert_eq!(after["name"], "Better Bot");
    assert_eq!(after["demoUrl"], "https://bot.example.com");
    assert_eq!(after["features"], before["features"]);
}

#[actix_rt::test]
async fn contact_submission_lands_in_inbox_as_new() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let response = app
        .client
        .post(app.url("/api/contact"))
        .json(&contact_body())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["status"], "new");
    assert_eq!(created["email"], "ada@example.com");

    let inbox: Value = app
        .client
        .get(app.url("/api/contact"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(inbox.as_array().unwrap().len(), 1);
    assert_eq!(inbox[0]["id"], created["id"]);
}

#[actix_rt::test]
async fn short_contact_message_is_rejected() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(app.url("/api/contact"))
        .json(&json!({"name": "Ada", "email": "ada@example.com", "message": "hi"}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["details"][0]["field"], "message");
}

#[actix_rt::test]
async fn admin_can_mark_message_read() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let created: Value = app
        .client
        .post(app.url("/api/contact"))
        .json(&contact_body())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let response = app
        .client
        .patch(app.url(&format!("/api/contact/{}", created["id"].as_str().unwrap())))
        .bearer_auth(&token)
        .json(&json!({"status": "read"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["status"], "read");

    let response = app
        .client
        .patch(app.url(&format!("/api/contact/{}", created["id"].as_str().unwrap())))
        .bearer_auth(&token)
        .json(&json!({"status": "archived"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn contact_form_is_rate_limited_per_client() {
    let app = TestApp::spawn_with_contact_limit(2).await;

    for _ in 0..2 {
        let response = app
            .client
            .post(app.url("/api/contact"))
            .json(&contact_body())
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .client
        .post(app.url("/api/contact"))
        .json(&contact_body())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(response.headers().contains_key("retry-after"));
}

#[actix_rt::test]
async fn rejected_submissions_do_not_spend_the_rate_limit() {
    let app = TestApp::spawn_with_contact_limit(2).await;

    for _ in 0..5 {
        let response = app
            .client
            .post(app.url("/api/contact"))
            .json(&json!({"name": "Ada", "email": "ada@example.com", "message": "hi"}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    for _ in 0..2 {
        let response = app
            .client
            .post(app.url("/api/contact"))
            .json(&contact_body())
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}

#[actix_rt::test]
async fn overlong_contact_name_is_a_validation_error() {
    let app = TestApp::spawn().await;

    let mut body = contact_body();
    body["name"] = json!("a".repeat(101));
    let response = app
        .client
        .post(app.url("/api/contact"))
        .json(&body)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["details"][0]["field"], "name");
}
