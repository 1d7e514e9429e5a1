//! Runs the real client against a loopback server with canned responses.

use ghcard_fetch::{ClientSettings, GitHubApi, GitHubClient, HttpError, USER_AGENT};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serves one response and returns the raw request text.
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        String::from_utf8_lossy(&request).to_string()
    });

    (base, handle)
}

fn client_for(base: &str) -> GitHubClient {
    let settings = ClientSettings::default()
        .with_base_url(base)
        .with_timeout(Duration::from_secs(5));
    GitHubClient::with_settings(&settings).unwrap()
}

#[tokio::test]
async fn test_user_lookup_success() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"login": "octocat", "name": null, "public_repos": 1}"#,
    )
    .await;

    let user = client_for(&base).user("octocat").await.unwrap();
    let request = server.await.unwrap();

    assert_eq!(user.login, "octocat");
    assert_eq!(user.public_repos, Some(1));
    assert!(request.starts_with("GET /users/octocat HTTP/1.1"));
    assert!(
        request.to_lowercase().contains(&format!("user-agent: {}", USER_AGENT.to_lowercase())),
        "missing user agent in {request}"
    );
}

#[tokio::test]
async fn test_repos_page_query() {
    let (base, server) = serve_once("200 OK", r#"[{"name": "a", "stargazers_count": 5}]"#).await;

    let page = client_for(&base).repos_page("octocat", 2, 100).await.unwrap();
    let request = server.await.unwrap();

    assert_eq!(page.len(), 1);
    assert_eq!(page[0].stargazers_count, 5);
    assert!(request.starts_with("GET /users/octocat/repos?page=2&per_page=100 HTTP/1.1"));
}

#[tokio::test]
async fn test_not_found_carries_status() {
    let (base, _server) = serve_once(
        "404 Not Found",
        r#"{"message": "Not Found", "documentation_url": "https://docs.github.com"}"#,
    )
    .await;

    let err = client_for(&base).user("no-such-user").await.unwrap_err();

    assert_eq!(
        err,
        HttpError::Status {
            status: 404,
            message: "Not Found".to_string(),
        }
    );
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_rate_limit_surfaces_status() {
    let (base, _server) = serve_once(
        "403 Forbidden",
        r#"{"message": "API rate limit exceeded for 127.0.0.1."}"#,
    )
    .await;

    let err = client_for(&base).fetch_json("/users/octocat").await.unwrap_err();
    assert_eq!(err.status(), Some(403));
}

#[tokio::test]
async fn test_invalid_body_is_parse_error() {
    let (base, _server) = serve_once("200 OK", "<html>definitely not json</html>").await;

    let err = client_for(&base).fetch_json("/users/octocat").await.unwrap_err();
    assert!(matches!(err, HttpError::Parse(_)), "got {err:?}");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let err = client_for(&base).fetch_json("/users/octocat").await.unwrap_err();
    assert!(matches!(err, HttpError::Transport(_)), "got {err:?}");
    assert_eq!(err.status(), None);
}
