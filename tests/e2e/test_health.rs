use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_greet_on_root(ctx: &TestContext) {
    let client = ctx.spawn_app("", &[]).await;

    let response = client.get("/").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.text(), "hello world!");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ok_for_health_check(ctx: &TestContext) {
    let client = ctx.spawn_app("", &[]).await;

    let response = client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(response.text(), "OK");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ready_status(ctx: &TestContext) {
    let client = ctx.spawn_app("", &[]).await;

    let response = client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::OK);
    let body = response.body.as_ref().unwrap();
    assert_eq!(body.get("status").and_then(|v| v.as_str()), Some("ready"));
    assert_eq!(
        body.get("settings").and_then(|v| v.as_str()),
        Some("available")
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_not_ready_when_store_is_down(ctx: &TestContext) {
    let client = ctx.spawn_app_without_store().await;

    let response = client.get("/health/ready").await.unwrap();

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body = response.body.as_ref().unwrap();
    assert_eq!(
        body.get("status").and_then(|v| v.as_str()),
        Some("not_ready")
    );

    // Liveness does not depend on the store
    client
        .get("/health")
        .await
        .unwrap()
        .assert_status(StatusCode::OK);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_health_responses(ctx: &TestContext) {
    let client = ctx.spawn_app("", &[]).await;

    let response = client.get("/health").await.unwrap();
    response.assert_header_exists("x-request-id");

    let response = client
        .get_with_headers("/health/ready", &[("x-request-id", "probe-42")])
        .await
        .unwrap();
    assert_eq!(
        response.header("x-request-id").map(String::as_str),
        Some("probe-42")
    );
}
