mod common;

use common::*;

#[tokio::test]
async fn health_returns_no_content() {
    let (base, _store) = spawn_memory_relay("http://127.0.0.1:1", None).await;
    let resp = reqwest::get(format!("{}/health", base)).await.unwrap();

    assert_eq!(resp.status(), 204);
    assert!(resp.bytes().await.unwrap().is_empty());
}

#[tokio::test]
async fn responses_carry_security_headers() {
    let (base, _store) = spawn_memory_relay("http://127.0.0.1:1", None).await;
    let resp = reqwest::get(format!("{}/health", base)).await.unwrap();
    let headers = resp.headers();

    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "SAMEORIGIN");
    assert_eq!(headers["x-dns-prefetch-control"], "off");
    assert_eq!(headers["x-download-options"], "noopen");
    assert_eq!(headers["x-xss-protection"], "0");
    assert!(
        headers["strict-transport-security"]
            .to_str()
            .unwrap()
            .starts_with("max-age=")
    );
}

#[tokio::test]
async fn error_responses_are_json() {
    let (base, _store) = spawn_memory_relay("http://127.0.0.1:1", None).await;
    let resp = reqwest::Client::new()
        .post(format!("{}/push", base))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
    assert!(content_type.contains("application/json"));
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let (base, _store) = spawn_memory_relay("http://127.0.0.1:1", None).await;
    let resp = reqwest::get(format!("{}/subscribe", base)).await.unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn health_rejects_post() {
    let (base, _store) = spawn_memory_relay("http://127.0.0.1:1", None).await;
    let resp = reqwest::Client::new()
        .post(format!("{}/health", base))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 405);
}
