
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;

#[actix_rt::test]
async fn create_project_derives_slug_and_is_readable_by_slug() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let response = app.create_project(&token, sample_project("My Cool Site!")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    assert_eq!(created["slug"], "my-cool-site");
    assert_eq!(created["stack"], json!(["Rust", "actix-web"]));
    assert!(created["liveUrl"].is_null());

    let (status, fetched) = app.get_json("/api/projects/my-cool-site").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], created["id"]);
}

#[actix_rt::test]
async fn duplicate_title_conflicts() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let first = app.create_project(&token, sample_project("Foo Bar")).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let second = app.create_project(&token, sample_project("foo   bar!")).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let (_, projects) = app.get_json("/api/projects").await;
    assert_eq!(projects.as_array().unwrap().len(), 1);
}

#[actix_rt::test]
async fn invalid_project_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let mut body = sample_project("Broken Links");
    body["githubUrl"] = json!("ftp://example.com/repo");
    let response = app.create_project(&token, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.create_project(&token, sample_project("   ")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.create_project(&token, sample_project("!!!")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (_, projects) = app.get_json("/api/projects").await;
    assert!(projects.as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn list_is_newest_first_and_filters_featured() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    app.create_project(&token, sample_project("Older")).await;
    let mut featured = sample_project("Newer");
    featured["featured"] = json!(true);
    app.create_project(&token, featured).await;

    let (_, all) = app.get_json("/api/projects").await;
    let titles: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Newer", "Older"]);

    let (_, only_featured) = app.get_json("/api/projects?featured=true").await;
    let only_featured = only_featured.as_array().unwrap();
    assert_eq!(only_featured.len(), 1);
    assert_eq!(only_featured[0]["title"], "Newer");
}

#[actix_rt::test]
async fn edit_renames_slug_and_clears_links() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let created: Value = app
        .create_project(&token, sample_project("First Name"))
        .await
        .json()
        .await
        .unwrap();
    let id = created["id"].as_str().unwrap();

    let response = app
        .client
        .put(app.url(&format!("/api/projects/{}", id)))
        .bearer_auth(&token)
        .json(&json!({"title": "Second Name", "githubUrl": null}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let edited: Value = response.json().await.unwrap();
    assert_eq!(edited["slug"], "second-name");
    assert!(edited["githubUrl"].is_null());
    assert_eq!(edited["description"], created["description"]);
    assert_eq!(edited["createdAt"], created["createdAt"]);

    let (status, _) = app.get_json("/api/projects/first-name").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn delete_then_missing() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let created: Value = app
        .create_project(&token, sample_project("Short Lived"))
        .await
        .json()
        .await
        .unwrap();
    let path = format!("/api/projects/{}", created["id"].as_str().unwrap());

    let response = app.client.delete(app.url(&path)).bearer_auth(&token).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.client.delete(app.url(&path)).bearer_auth(&token).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .client
        .delete(app.url("/api/projects/not-a-uuid"))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn long_non_ascii_title_gets_a_bounded_slug() {
    let app = TestApp::spawn().await;
    let token = app.login_admin().await;

    let response = app.create_project(&token, sample_project(&"漢".repeat(160))).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = response.json().await.unwrap();
    let slug = created["slug"].as_str().unwrap();
    assert!(!slug.is_empty() && slug.len() <= 200, "slug is {} bytes", slug.len());

    let (status, _) = app.get_json(&format!("/api/projects/{}", slug)).await;
    assert_eq!(status, StatusCode::OK);
}
