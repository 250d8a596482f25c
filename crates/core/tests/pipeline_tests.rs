//! Pipeline integration tests against a mock upstream
use distill_core::*;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn get_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../../tests/fixtures/{}", name)).unwrap()
}

async fn serve(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

fn request_for(server: &MockServer, route: &str) -> ExtractionRequest {
    ExtractionRequest::from_param(Some(&format!("{}{}", server.uri(), route))).unwrap()
}

#[tokio::test]
async fn test_extracts_article() {
    let server = MockServer::start().await;
    serve(&server, "/posts/iterators", ResponseTemplate::new(200).set_body_raw(get_fixture("article.html"), "text/html")).await;

    let data = Pipeline::new().unwrap().run(&request_for(&server, "/posts/iterators")).await.unwrap();

    assert!(data.title.contains("Working With Iterators"));
    assert!(data.markdown.contains("Iterators are one of the most useful abstractions"));
    assert!(data.markdown.contains("Chaining adapters"));
    assert!(data.markdown.contains("```"));
    assert!(!data.markdown.contains("Sponsored"));
    assert!(!data.markdown.contains("All rights reserved"));
    assert_eq!(data.site_name.as_deref(), Some("Field Notes"));
    assert!(data.length > 0);
}

#[tokio::test]
async fn test_sends_fixed_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .and(header("user-agent", DEFAULT_USER_AGENT))
        .and(|req: &Request| {
            req.headers.get("accept").and_then(|v| v.to_str().ok()) == Some(ACCEPT_HTML)
        })
        .respond_with(ResponseTemplate::new(200).set_body_raw(get_fixture("article.html"), "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let result = Pipeline::new().unwrap().run(&request_for(&server, "/page")).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_upstream_not_found() {
    let server = MockServer::start().await;
    serve(&server, "/missing", ResponseTemplate::new(404).set_body_string("<h1>Not Found</h1>")).await;

    let err = Pipeline::new().unwrap().run(&request_for(&server, "/missing")).await.unwrap_err();

    assert_eq!(err.status_code().as_u16(), 502);
    assert_eq!(err.to_string(), "Failed to fetch URL: HTTP 404");
}

#[tokio::test]
async fn test_upstream_server_error() {
    let server = MockServer::start().await;
    serve(&server, "/broken", ResponseTemplate::new(503)).await;

    let err = Pipeline::new().unwrap().run(&request_for(&server, "/broken")).await.unwrap_err();
    assert_eq!(err.to_string(), "Failed to fetch URL: HTTP 503");
}

#[tokio::test]
async fn test_empty_body() {
    let server = MockServer::start().await;
    serve(&server, "/empty", ResponseTemplate::new(200)).await;

    let err = Pipeline::new().unwrap().run(&request_for(&server, "/empty")).await.unwrap_err();

    assert_eq!(err.status_code().as_u16(), 502);
    assert_eq!(err.to_string(), "Empty HTML response from target URL");
}

#[tokio::test]
async fn test_whitespace_body() {
    let server = MockServer::start().await;
    serve(&server, "/blank", ResponseTemplate::new(200).set_body_string("  \n\t \n")).await;

    let err = Pipeline::new().unwrap().run(&request_for(&server, "/blank")).await.unwrap_err();
    assert!(matches!(err, DistillError::EmptyBody));
}

#[tokio::test]
async fn test_page_without_article() {
    let server = MockServer::start().await;
    serve(&server, "/bare", ResponseTemplate::new(200).set_body_raw(get_fixture("empty_body.html"), "text/html")).await;

    let err = Pipeline::new().unwrap().run(&request_for(&server, "/bare")).await.unwrap_err();

    assert_eq!(err.status_code().as_u16(), 422);
    assert_eq!(err.to_string(), "Could not extract article content from the page");
}

#[tokio::test]
async fn test_follows_redirects() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/old",
        ResponseTemplate::new(301).insert_header("location", format!("{}/new", server.uri()).as_str()),
    )
    .await;
    serve(&server, "/new", ResponseTemplate::new(200).set_body_raw(get_fixture("article.html"), "text/html")).await;

    let data = Pipeline::new().unwrap().run(&request_for(&server, "/old")).await.unwrap();
    assert!(data.markdown.contains("Iterators are one of the most useful abstractions"));
}

#[tokio::test]
async fn test_transport_failure_is_internal() {
    let request = ExtractionRequest::from_param(Some("http://127.0.0.1:1/unreachable")).unwrap();

    let err = Pipeline::new().unwrap().run(&request).await.unwrap_err();

    assert!(matches!(err, DistillError::Http(_)));
    assert_eq!(err.status_code().as_u16(), 500);
    assert!(err.to_string().starts_with("Internal error: "));
}

#[tokio::test]
async fn test_repeated_runs_are_identical() {
    let server = MockServer::start().await;
    serve(&server, "/stable", ResponseTemplate::new(200).set_body_raw(get_fixture("article.html"), "text/html")).await;

    let pipeline = Pipeline::new().unwrap();
    let request = request_for(&server, "/stable");
    let first = pipeline.run(&request).await.unwrap();
    let second = pipeline.run(&request).await.unwrap();

    assert_eq!(first.markdown, second.markdown);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_setext_and_indented_options() {
    let server = MockServer::start().await;
    serve(&server, "/styled", ResponseTemplate::new(200).set_body_raw(get_fixture("article.html"), "text/html")).await;

    let options = MarkdownOptions { heading_style: HeadingStyle::Setext, code_block_style: CodeBlockStyle::Indented };
    let pipeline = Pipeline::new().unwrap().markdown_options(options);
    let data = pipeline.run(&request_for(&server, "/styled")).await.unwrap();

    assert!(!data.markdown.contains("```"));
    assert!(data.markdown.contains("filter(|n| n % 2 == 0)"));
}
