//! Shared utilities for integration testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use session_relay::config::RelayConfig;
use session_relay::http::HttpServer;
use session_relay::lifecycle::Shutdown;

/// What a programmable backend sees of a request.
#[derive(Debug, Clone, Default)]
pub struct SeenRequest {
    pub target: String,
    pub cookie: Option<String>,
}

/// A canned backend reply.
pub struct Reply {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub set_cookies: Vec<String>,
    pub body: String,
}

impl Reply {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            headers: Vec::new(),
            set_cookies: Vec::new(),
            body: body.to_string(),
        }
    }

    pub fn with_cookies(mut self, cookies: &[&str]) -> Self {
        self.set_cookies = cookies.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

/// A running relay bound on an ephemeral loopback port.
pub struct TestRelay {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestRelay {
    pub fn url(&self) -> String {
        format!("http://{}/", self.addr)
    }
}

impl Drop for TestRelay {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a relay named `service_name` whose session ids use `host`.
pub async fn start_relay(service_name: &str, host: &str) -> TestRelay {
    let mut config = RelayConfig::default();
    config.service.name = service_name.to_string();
    config.service.bind_host = "127.0.0.1".to_string();
    config.downstream.timeout_secs = 5;
    config.downstream.system_proxy = false;

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config, host).unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestRelay { addr, shutdown }
}

/// Start a programmable backend answering every request with `f(request)`.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(SeenRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Reply> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut buf = Vec::new();
                        let mut chunk = [0u8; 1024];
                        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                            match socket.read(&mut chunk).await {
                                Ok(0) | Err(_) => return,
                                Ok(n) => buf.extend_from_slice(&chunk[..n]),
                            }
                        }

                        let reply = f(parse_head(&String::from_utf8_lossy(&buf))).await;
                        let status_text = match reply.status {
                            200 => "200 OK".to_string(),
                            302 => "302 Found".to_string(),
                            404 => "404 Not Found".to_string(),
                            500 => "500 Internal Server Error".to_string(),
                            503 => "503 Service Unavailable".to_string(),
                            status => format!("{} Status", status),
                        };

                        let mut response = format!(
                            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n",
                            status_text,
                            reply.body.len()
                        );
                        for (name, value) in &reply.headers {
                            response.push_str(&format!("{}: {}\r\n", name, value));
                        }
                        for cookie in &reply.set_cookies {
                            response.push_str(&format!("Set-Cookie: {}\r\n", cookie));
                        }
                        response.push_str("\r\n");
                        response.push_str(&reply.body);

                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

fn parse_head(head: &str) -> SeenRequest {
    let mut lines = head.split("\r\n");
    let target = lines
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or_default()
        .to_string();

    let cookie = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("cookie"))
        .map(|(_, value)| value.trim().to_string());

    SeenRequest { target, cookie }
}

/// HTTP client that never pools or proxies.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// All `Set-Cookie` values of a response.
pub fn set_cookies(res: &reqwest::Response) -> Vec<String> {
    res.headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}
