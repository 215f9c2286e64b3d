//! Shared fixtures for integration tests

#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use beacon::config::StocksConfig;
use beacon::handlers::StaticFiles;
use beacon::http::connection::Connection;
use beacon::http::mime::MimeClassifier;
use beacon::proxy::QuoteProxy;
use beacon::routing::Router;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0xff, 0x10];
pub const INDEX_HTML: &str = "<!DOCTYPE html><html><body>Beacon</body></html>";

/// A temporary static tree:
///
/// ```text
/// <tmp>/secret.txt            (outside every root)
/// <tmp>/www/index.html
/// <tmp>/www/logo.png
/// <tmp>/www/css/site.css
/// <tmp>/www/docs/             (directory)
/// <tmp>/www/static/fallback.txt
/// ```
pub struct Site {
    pub dir: TempDir,
}

impl Site {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let www = dir.path().join("www");
        std::fs::create_dir_all(www.join("css")).unwrap();
        std::fs::create_dir_all(www.join("docs")).unwrap();
        std::fs::create_dir_all(www.join("static")).unwrap();

        std::fs::write(dir.path().join("secret.txt"), "top secret").unwrap();
        std::fs::write(www.join("index.html"), INDEX_HTML).unwrap();
        std::fs::write(www.join("logo.png"), PNG_BYTES).unwrap();
        std::fs::write(www.join("css/site.css"), "body { margin: 0; }").unwrap();
        std::fs::write(www.join("static/fallback.txt"), "fallback").unwrap();

        Self { dir }
    }

    pub fn www(&self) -> PathBuf {
        self.dir.path().join("www")
    }

    /// A missing root first, then the real one, to exercise ordered lookup.
    pub fn roots(&self) -> Vec<PathBuf> {
        vec![self.dir.path().join("missing"), self.www()]
    }

    pub fn static_files(&self) -> StaticFiles {
        StaticFiles::new(self.roots(), MimeClassifier::default())
    }
}

pub fn stocks_config(base_url: &str) -> StocksConfig {
    StocksConfig {
        base_url: base_url.to_string(),
        api_key: "test-key".to_string(),
        ..StocksConfig::default()
    }
}

pub fn quote_proxy(base_url: &str, timeout: Duration) -> QuoteProxy {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .no_proxy()
        .build()
        .unwrap();
    QuoteProxy::with_client(client, stocks_config(base_url))
}

pub fn router(site: &Site, base_url: &str) -> Router {
    Router::new(
        quote_proxy(base_url, Duration::from_secs(5)),
        site.static_files(),
    )
}

/// Serves one canned response and hands back the request line it received.
pub async fn spawn_upstream(status: u16, reason: &str, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let reply = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason,
        body.len(),
        body
    );

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let head = read_head(&mut socket).await;
        socket.write_all(reply.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        head.lines().next().unwrap_or_default().to_string()
    });

    (format!("http://{}/query", addr), handle)
}

/// Accepts one connection and never answers it.
pub async fn spawn_silent_upstream() -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let _ = read_head(&mut socket).await;
        tokio::time::sleep(Duration::from_secs(30)).await;
    });

    (format!("http://{}/query", addr), handle)
}

/// A URL nothing is listening on.
pub async fn closed_upstream() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/query", addr)
}

async fn read_head(socket: &mut tokio::net::TcpStream) -> String {
    let mut head = Vec::new();
    let mut buf = [0u8; 1024];
    loop {
        let n = socket.read(&mut buf).await.unwrap();
        if n == 0 {
            break;
        }
        head.extend_from_slice(&buf[..n]);
        if head.windows(4).any(|w| w == b"\r\n\r\n") {
            break;
        }
    }
    String::from_utf8_lossy(&head).to_string()
}

/// Runs one connection over an in-memory pipe and returns the raw bytes written back.
pub async fn exchange(router: &Router, input: &[u8]) -> Vec<u8> {
    let (mut client, server) = tokio::io::duplex(64 * 1024);
    if input.is_empty() {
        client.shutdown().await.unwrap();
    } else {
        client.write_all(input).await.unwrap();
    }

    let mut conn = Connection::new(server, router);
    conn.run().await.unwrap();

    let mut out = Vec::new();
    client.read_to_end(&mut out).await.unwrap();
    out
}

pub struct RawResponse {
    pub status_line: String,
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

pub fn parse_response(raw: &[u8]) -> RawResponse {
    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no header terminator");
    let head = std::str::from_utf8(&raw[..split]).unwrap();
    let body = raw[split + 4..].to_vec();

    let mut lines = head.split("\r\n");
    let status_line = lines.next().unwrap().to_string();
    let status = status_line
        .split(' ')
        .nth(1)
        .and_then(|c| c.parse().ok())
        .unwrap();

    let headers = lines
        .filter_map(|l| l.split_once(": "))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    RawResponse {
        status_line,
        status,
        headers,
        body,
    }
}
