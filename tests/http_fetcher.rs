use mockito::Server;
use page_extract::config::DEFAULT_USER_AGENT;
use page_extract::{
    ExtractError, ExtractorConfig, FetchResponse, Fetcher, HeaderProfile, HttpFetcher,
    PageExtractor,
};

fn listing(items: &[&str], next: Option<&str>) -> String {
    let items = items
        .iter()
        .map(|i| format!(r#"<li class="item">{}</li>"#, i))
        .collect::<String>();
    let next = next
        .map(|href| format!(r#"<a class="next" href="{}">Next</a>"#, href))
        .unwrap_or_default();
    format!("<html><body><ul>{}</ul>{}</body></html>", items, next)
}

#[tokio::test]
async fn test_sends_default_header_profile() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/p1")
        .match_header("user-agent", DEFAULT_USER_AGENT)
        .match_header("connection", "keep-alive")
        .match_header("referer", "https://www.google.com")
        .with_status(200)
        .with_body("<p>ok</p>")
        .create_async()
        .await;

    let fetcher = HttpFetcher::new(&HeaderProfile::default(), None).unwrap();
    let response: FetchResponse = fetcher
        .fetch(&format!("{}/p1", server.url()))
        .await
        .unwrap();

    assert!(response.is_success());
    assert_eq!(response.body, b"<p>ok</p>");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_custom_header_profile() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/p1")
        .match_header("user-agent", "probe/1.0")
        .match_header("x-token", "abc")
        .with_status(200)
        .with_body("<p>ok</p>")
        .create_async()
        .await;

    let mut config = ExtractorConfig::new(&format!("{}/p1", server.url()));
    config.headers.user_agent = "probe/1.0".to_string();
    config.headers.extra.insert("X-Token".to_string(), "abc".to_string());

    let extractor = PageExtractor::from_config(&config).unwrap();
    assert_eq!(extractor.fetch_one_text("p").await.unwrap(), "ok");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_success_status_is_a_response_not_an_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/gone")
        .with_status(404)
        .with_body("missing")
        .create_async()
        .await;

    let fetcher = HttpFetcher::new(&HeaderProfile::default(), None).unwrap();
    let response = fetcher
        .fetch(&format!("{}/gone", server.url()))
        .await
        .unwrap();
    assert_eq!(response.status, 404);
    assert!(!response.is_success());
}

#[tokio::test]
async fn test_transport_failure() {
    let fetcher = HttpFetcher::new(&HeaderProfile::default(), None).unwrap();
    let err = fetcher.fetch("http://127.0.0.1:1/").await.unwrap_err();
    assert!(matches!(err, ExtractError::Transport { .. }));
}

#[tokio::test]
async fn test_paginates_over_http() {
    let mut server = Server::new_async().await;
    let base = server.url();
    server
        .mock("GET", "/p1")
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(listing(&["a", "b"], Some(&format!("{}/p2", base))))
        .create_async()
        .await;
    server
        .mock("GET", "/p2")
        .with_status(200)
        .with_body(listing(&["c"], None))
        .create_async()
        .await;

    let extractor = PageExtractor::new(&format!("{}/p1", base)).unwrap();

    let nodes = extractor
        .fetch_all(".item", Some(".next"), None)
        .await
        .unwrap();
    let texts = nodes.iter().map(|n| n.text()).collect::<Vec<_>>();
    assert_eq!(texts, vec!["a", "b", "c"]);

    let single_page = extractor.fetch_all(".item", None, None).await.unwrap();
    assert_eq!(single_page.len(), 2);

    let all_text = extractor
        .fetch_all_text(".item", ".next", Some("href"))
        .await
        .unwrap();
    assert_eq!(all_text, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn test_failed_page_discards_results() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/p1")
        .with_status(200)
        .with_body(listing(&["a", "b"], Some("/p2")))
        .create_async()
        .await;
    server
        .mock("GET", "/p2")
        .with_status(500)
        .create_async()
        .await;

    let extractor = PageExtractor::new(&format!("{}/p1", server.url())).unwrap();
    let err = extractor
        .fetch_all_text(".item", ".next", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ExtractError::FetchFailed { status: 500, .. }));
}

#[tokio::test]
async fn test_relative_links_resolve_against_redirect_target() {
    let mut server = Server::new_async().await;
    let base = server.url();
    server
        .mock("GET", "/start")
        .with_status(302)
        .with_header("location", &format!("{}/list/p1", base))
        .create_async()
        .await;
    server
        .mock("GET", "/list/p1")
        .with_status(200)
        .with_body(listing(&["a"], Some("p2")))
        .create_async()
        .await;
    let second = server
        .mock("GET", "/list/p2")
        .with_status(200)
        .with_body(listing(&["b"], None))
        .create_async()
        .await;

    let extractor = PageExtractor::new(&format!("{}/start", base)).unwrap();
    let texts = extractor
        .fetch_all_text(".item", ".next", None)
        .await
        .unwrap();

    assert_eq!(texts, vec!["a", "b"]);
    second.assert_async().await;
}

#[tokio::test]
async fn test_configured_encoding() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/kr")
        .with_status(200)
        // "<p>안녕</p>" in EUC-KR
        .with_body(b"<p>\xbe\xc8\xb3\xe7</p>".to_vec())
        .create_async()
        .await;

    let url = format!("{}/kr", server.url());
    let mut extractor = PageExtractor::new(&url).unwrap();
    assert!(matches!(
        extractor.fetch_one_text("p").await,
        Err(ExtractError::Decode { .. })
    ));

    extractor.update_encoding("euc-kr");
    assert_eq!(extractor.fetch_one_text("p").await.unwrap(), "안녕");

    let extractor = PageExtractor::with_encoding(&url, "euc-kr").unwrap();
    assert_eq!(extractor.fetch_one_text("p").await.unwrap(), "안녕");
}

#[tokio::test]
async fn test_independent_extractors_run_in_parallel() {
    let mut server = Server::new_async().await;
    for (path, item) in [("/x", "from x"), ("/y", "from y")] {
        server
            .mock("GET", path)
            .with_status(200)
            .with_body(listing(&[item], None))
            .create_async()
            .await;
    }

    let handles = ["/x", "/y"].map(|path| {
        let extractor = PageExtractor::new(&format!("{}{}", server.url(), path)).unwrap();
        tokio::spawn(async move { extractor.fetch_all_text(".item", ".next", None).await })
    });

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap().unwrap());
    }
    assert_eq!(results, vec![vec!["from x"], vec!["from y"]]);
}
