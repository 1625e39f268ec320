use crate::e2e::helpers;

use chrono::DateTime;
use helpers::TestContext;
use hyper::StatusCode;
use pretty_assertions::assert_eq;
use test_context::test_context;

fn guids(channel: &rss::Channel) -> Vec<String> {
    channel
        .items()
        .iter()
        .filter_map(|item| item.guid().map(|g| g.value().to_string()))
        .collect()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_rss_with_content_type(ctx: &TestContext) {
    let client = ctx.spawn_app("", &["/sources/kobe"]).await;

    let response = client.get("/feed").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert_eq!(
        response.header("content-type").map(String::as_str),
        Some("application/rss+xml; charset=utf-8")
    );
    response.assert_header_exists("x-request-id");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_entries_and_report_failed_source(ctx: &TestContext) {
    let client = ctx
        .spawn_app("", &["/sources/kobe", "/sources/broken"])
        .await;

    let response = client.get("/feed").await.unwrap();
    response.assert_status(StatusCode::OK);
    let channel = response.channel();

    // Newest first
    assert_eq!(guids(&channel), vec!["kobe-2", "kobe-1"]);

    let description = channel.description();
    assert_eq!(description.lines().count(), 1);
    assert!(
        description.contains(&ctx.upstream.url("/sources/broken")),
        "description was: {}",
        description
    );
    assert!(!description.contains("/sources/kobe"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_report_unparsable_source(ctx: &TestContext) {
    let client = ctx.spawn_app("", &["/sources/kobe", "/sources/html"]).await;

    let channel = client.get("/feed").await.unwrap().channel();

    assert_eq!(channel.items().len(), 2);
    assert!(channel
        .description()
        .contains(&ctx.upstream.url("/sources/html")));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_date_undated_entries_from_the_feed(ctx: &TestContext) {
    let client = ctx.spawn_app("", &["/sources/undated"]).await;

    let channel = client.get("/feed").await.unwrap().channel();

    assert_eq!(channel.items().len(), 1);
    let item = &channel.items()[0];
    let published = DateTime::parse_from_rfc2822(item.pub_date().unwrap()).unwrap();
    assert_eq!(
        published,
        DateTime::parse_from_rfc2822("Thu, 03 Oct 2024 09:30:00 +0000").unwrap()
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_url_as_id_when_source_has_none(ctx: &TestContext) {
    let client = ctx.spawn_app("", &["/sources/undated"]).await;

    let channel = client.get("/feed").await.unwrap().channel();

    let item = &channel.items()[0];
    assert_eq!(
        item.guid().map(|g| g.value()),
        Some("https://wakayama.example/posts/7")
    );
    assert_eq!(item.title(), Some("Tachiuo at night - Wakayama"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_use_url_as_id_for_atom_entries_without_id(ctx: &TestContext) {
    let client = ctx.spawn_app("", &["/sources/atom"]).await;

    let channel = client.get("/feed").await.unwrap().channel();

    assert_eq!(guids(&channel), vec!["https://shiga.example/posts/3"]);
    assert_eq!(channel.items()[0].title(), Some("Bass at dawn - Shiga Lake"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_empty_feed_when_nothing_matches(ctx: &TestContext) {
    let client = ctx
        .spawn_app("^will never match$", &["/sources/kobe", "/sources/undated"])
        .await;

    let response = client.get("/feed").await.unwrap();
    response.assert_status(StatusCode::OK);
    let channel = response.channel();

    assert!(channel.items().is_empty());
    assert_eq!(channel.description(), "no error");
    assert_eq!(channel.title(), "^will never match$ - turifo");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_filter_on_title_and_content(ctx: &TestContext) {
    let client = ctx
        .spawn_app("saba|tachiuo", &["/sources/kobe", "/sources/undated"])
        .await;

    let channel = client.get("/feed").await.unwrap().channel();

    assert_eq!(
        guids(&channel),
        vec!["https://wakayama.example/posts/7", "kobe-2"]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_prepend_preview_image_from_article_page(ctx: &TestContext) {
    let client = ctx.spawn_app("", &["/sources/plain"]).await;

    let channel = client.get("/feed").await.unwrap().channel();

    let content = channel.items()[0].description().unwrap();
    let expected_prefix = format!(
        "<img src=\"{}\">",
        ctx.upstream.url("/images/preview.jpg")
    );
    assert!(
        content.starts_with(&expected_prefix),
        "content was: {}",
        content
    );
    assert!(content.ends_with("<p>three kisu</p>"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_leave_entries_with_images_untouched(ctx: &TestContext) {
    let client = ctx.spawn_app("", &["/sources/kobe"]).await;

    let channel = client.get("/feed").await.unwrap().channel();

    let contents: Vec<&str> = channel
        .items()
        .iter()
        .filter_map(|item| item.description())
        .collect();
    assert_eq!(
        contents,
        vec![
            "<img src=\"https://kobe.example/2.jpg\">five saba",
            "<img src=\"https://kobe.example/1.jpg\">twenty aji",
        ]
    );
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_link_channel_to_the_requested_address(ctx: &TestContext) {
    let client = ctx.spawn_app("", &[]).await;

    let response = client
        .get_with_headers(
            "/feed",
            &[("host", "feeds.turifo.example"), ("x-forwarded-proto", "https")],
        )
        .await
        .unwrap();

    let channel = response.channel();
    assert_eq!(channel.link(), "https://feeds.turifo.example/feed");
    assert!(channel.items().is_empty());
    assert_eq!(channel.description(), "no error");
}
