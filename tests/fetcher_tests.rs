use link_cards::{
    default_headers, CardService, Fetcher, FetcherConfig, PageFetcher, PreviewError,
    DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, UNAVAILABLE_DESCRIPTION,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Default fetcher settings, minus any proxy picked up from the environment.
fn local_fetcher() -> Fetcher {
    let client = reqwest::Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .timeout(DEFAULT_TIMEOUT)
        .default_headers(default_headers())
        .no_proxy()
        .build()
        .unwrap();
    Fetcher::with_client(client)
}

fn response(status: &str, headers: &[(&str, &str)], body: &str) -> String {
    let mut out = format!("HTTP/1.1 {status}\r\n");
    for (name, value) in headers {
        out.push_str(&format!("{name}: {value}\r\n"));
    }
    out.push_str(&format!(
        "Content-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    ));
    out
}

/// Serves canned responses keyed by request path on a loopback port.
/// Each request's raw head is appended to the returned log.
async fn serve(
    routes: HashMap<&'static str, String>,
) -> (String, Arc<tokio::sync::Mutex<Vec<String>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let routes = Arc::new(routes);
    let log = Arc::new(tokio::sync::Mutex::new(Vec::new()));
    let seen = log.clone();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                return;
            };
            let routes = routes.clone();
            let seen = seen.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 8192];
                let n = socket.read(&mut buf).await.unwrap_or(0);
                let head = String::from_utf8_lossy(&buf[..n]).to_string();
                let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();
                seen.lock().await.push(head);

                let reply = routes
                    .get(path.as_str())
                    .cloned()
                    .unwrap_or_else(|| response("404 Not Found", &[], "missing"));
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    (base, log)
}

#[tokio::test]
async fn test_fetch_success_sends_browser_headers() {
    let page = r#"<html><head><meta property="og:title" content="Local"></head></html>"#;
    let (base, log) = serve(HashMap::from([("/page", response("200 OK", &[], page))])).await;

    let fetched = local_fetcher()
        .fetch_page(&format!("{base}/page"))
        .await
        .unwrap();

    assert_eq!(fetched.url, format!("{base}/page"));
    assert!(fetched.html.contains("Local"));

    let head = log.lock().await[0].to_lowercase();
    assert!(head.starts_with("get /page "));
    assert!(head.contains("user-agent: mozilla/5.0"));
    assert!(head.contains("accept-language: en-us,en;q=0.9"));
    assert!(head.contains("cache-control: no-cache"));
    assert!(head.contains("pragma: no-cache"));
}

#[tokio::test]
async fn test_fetch_404_is_client_error() {
    let (base, _) = serve(HashMap::new()).await;

    let result = local_fetcher().fetch_page(&format!("{base}/nope")).await;

    match result {
        Err(PreviewError::ClientError { status, .. }) => assert_eq!(status, 404),
        other => panic!("Expected ClientError, got: {:?}", other.map(|p| p.url)),
    }
}

#[tokio::test]
async fn test_fetch_500_is_server_error() {
    let (base, _) = serve(HashMap::from([(
        "/boom",
        response("500 Internal Server Error", &[], "boom"),
    )]))
    .await;

    let result = local_fetcher().fetch_page(&format!("{base}/boom")).await;

    assert!(matches!(
        result,
        Err(PreviewError::ServerError { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = local_fetcher().fetch_page(&format!("http://{addr}/")).await;

    match result {
        Err(PreviewError::ConnectionError(_)) | Err(PreviewError::FetchError(_)) => {}
        other => panic!("Expected ConnectionError, got: {:?}", other.map(|p| p.url)),
    }
}

#[tokio::test]
async fn test_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let client = reqwest::Client::builder()
        .timeout(Duration::from_millis(200))
        .no_proxy()
        .build()
        .unwrap();
    let fetcher = Fetcher::with_client(client);

    let result = fetcher.fetch_page(&format!("http://{addr}/slow")).await;

    match result {
        Err(PreviewError::TimeoutError(_)) | Err(PreviewError::FetchError(_)) => {}
        other => panic!("Expected TimeoutError, got: {:?}", other.map(|p| p.url)),
    }
}

#[tokio::test]
async fn test_redirected_image_resolves_against_final_url() {
    let page = r#"<html><head>
        <meta property="og:title" content="Moved">
        <meta property="og:image" content="cover.png">
    </head></html>"#;
    let (base, _) = serve(HashMap::from([
        (
            "/old",
            response("301 Moved Permanently", &[("Location", "/new/post")], ""),
        ),
        ("/new/post", response("200 OK", &[], page)),
    ]))
    .await;

    let service = CardService::with_fetcher(local_fetcher());
    let (_, cards) = service.render_cards(&format!("{base}/old")).await;

    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].url, format!("{base}/old"));
    assert_eq!(cards[0].title, "Moved");
    assert_eq!(cards[0].image, format!("{base}/new/cover.png"));
}

#[tokio::test]
async fn test_http_error_degrades_to_sentinel() {
    let (base, _) = serve(HashMap::new()).await;

    let (_, cards) = CardService::with_fetcher(local_fetcher())
        .render_cards(&format!("{base}/missing"))
        .await;

    assert_eq!(cards[0].description, UNAVAILABLE_DESCRIPTION);
    assert_eq!(cards[0].title, format!("{base}/missing"));
    assert!(cards[0].site_name.starts_with("127.0.0.1:"));
}

#[test]
fn test_custom_config_builds() {
    let fetcher = Fetcher::new_with_config(FetcherConfig {
        timeout: Duration::from_secs(3),
        redirect_policy: Some(reqwest::redirect::Policy::none()),
        ..Default::default()
    });
    assert!(fetcher.is_ok());
}
