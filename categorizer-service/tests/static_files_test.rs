mod common;

use common::TestApp;
use std::fs;
use tempfile::TempDir;

const INDEX_HTML: &str = "<!doctype html><title>Statement Categorizer</title>";

fn static_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("index.html"), INDEX_HTML).unwrap();
    fs::create_dir(dir.path().join("assets")).unwrap();
    fs::write(dir.path().join("assets").join("app.js"), "console.log('ok');").unwrap();
    dir
}

async fn spawn_with_static(dir: &TempDir) -> TestApp {
    let root = dir.path().to_path_buf();
    TestApp::spawn_with(move |settings| {
        settings.upstream.base_url = "http://127.0.0.1:9".to_string();
        settings.server.static_root = root;
    })
    .await
}

#[tokio::test]
async fn root_serves_index_html() {
    let dir = static_dir();
    let app = spawn_with_static(&dir).await;

    let response = app.get("/").await;

    assert_eq!(response.status().as_u16(), 200);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    assert_eq!(response.text().await.unwrap(), INDEX_HTML);
}

#[tokio::test]
async fn nested_asset_is_served() {
    let dir = static_dir();
    let app = spawn_with_static(&dir).await;

    let response = app.get("/assets/app.js").await;

    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.text().await.unwrap(), "console.log('ok');");
}

#[tokio::test]
async fn missing_file_is_404() {
    let dir = static_dir();
    let app = spawn_with_static(&dir).await;

    let response = app.get("/nope.css").await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn path_traversal_does_not_escape_root() {
    let dir = static_dir();
    let app = spawn_with_static(&dir).await;

    let response = app.get("/../Cargo.toml").await;

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn cors_preflight_allows_any_origin_by_default() {
    let dir = static_dir();
    let app = spawn_with_static(&dir).await;

    let response = app
        .client
        .request(
            reqwest::Method::OPTIONS,
            format!("{}/api/analyze", app.address),
        )
        .header("origin", "https://app.example")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["access-control-allow-origin"],
        "*"
    );
}

async fn spawn_with_bundled_front_end() -> TestApp {
    TestApp::spawn_with(|settings| {
        settings.upstream.base_url = "http://127.0.0.1:9".to_string();
        settings.server.static_root = concat!(env!("CARGO_MANIFEST_DIR"), "/static").into();
    })
    .await
}

#[tokio::test]
async fn bundled_default_chart_of_accounts_is_served() {
    let app = spawn_with_bundled_front_end().await;

    let response = app.get("/chart_of_accounts.txt").await;

    assert_eq!(response.status().as_u16(), 200);
    let chart = response.text().await.unwrap();
    let accounts: Vec<&str> = chart.lines().filter(|line| !line.trim().is_empty()).collect();
    assert_eq!(accounts.len(), 28);
    assert_eq!(accounts[0], "Distribution - Deanna: Equity, Partner Distributions");
    assert!(accounts.contains(&"Bank Fees: Expenses, Other Business Expenses"));
    assert!(accounts.contains(&"Uncategorized Expense: Expenses, Other Miscellaneous Service Cost"));
    assert!(accounts.iter().all(|line| line.contains(": ")));
}

#[tokio::test]
async fn bundled_page_loads_script_and_chart() {
    let app = spawn_with_bundled_front_end().await;

    let index = app.get("/").await.text().await.unwrap();
    assert!(index.contains(r#"<script src="/app.js"></script>"#));
    assert!(index.contains(r#"id="chartInput""#));
    assert!(index.contains(r#"id="exportCsvBtn""#));

    let script = app.get("/app.js").await;
    assert_eq!(script.status().as_u16(), 200);
    let script = script.text().await.unwrap();
    assert!(script.contains("'/chart_of_accounts.txt'"));
    assert!(script.contains("chartOfAccounts: $('chartInput').value"));

    assert_eq!(app.get("/styles.css").await.status().as_u16(), 200);
}
