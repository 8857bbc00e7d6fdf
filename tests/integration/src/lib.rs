//! Integration tests for the RustyAWS client crates.
//!
//! Instead of a real AWS endpoint, each test starts a [`MockPeer`]: a raw TCP
//! listener on `127.0.0.1` that reads one HTTP request per connection and then
//! either answers it or hangs up, following a per-connection script.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use anyhow::{Context, Result, bail};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::debug;

static INIT: Once = Once::new();

/// Initialize tracing (once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// What the peer does with the request read on one connection.
#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    /// Answer with this status code and body, then close.
    Respond(u16, &'static str),
    /// Close the connection without writing a single byte.
    HangUp,
}

/// A request as seen by the peer.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// Request line and headers.
    pub head: String,
    /// Request body.
    pub body: Vec<u8>,
}

impl CapturedRequest {
    /// The request line, e.g. `POST / HTTP/1.1`.
    #[must_use]
    pub fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }

    /// Look up a header value, ignoring the case of its name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.lines().skip(1).find_map(|line| {
            let (n, v) = line.split_once(':')?;
            n.trim().eq_ignore_ascii_case(name).then(|| v.trim())
        })
    }
}

/// A scripted HTTP peer.
#[derive(Debug)]
pub struct MockPeer {
    host: String,
    connections: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl MockPeer {
    /// Start a peer. Connection `n` follows `script[n]`; the last entry repeats.
    pub async fn start(script: Vec<Behavior>) -> Result<Self> {
        init_tracing();

        if script.is_empty() {
            bail!("mock peer needs at least one behavior");
        }

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("binding mock peer")?;
        let host = listener.local_addr()?.to_string();
        let connections = Arc::new(AtomicUsize::new(0));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let conn_count = Arc::clone(&connections);
        let captured = Arc::clone(&requests);
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let n = conn_count.fetch_add(1, Ordering::SeqCst);
                let behavior = script[n.min(script.len() - 1)];
                let captured = Arc::clone(&captured);
                tokio::spawn(async move {
                    if let Err(e) = serve(stream, behavior, captured).await {
                        debug!(error = %e, "mock peer connection failed");
                    }
                });
            }
        });

        Ok(Self {
            host,
            connections,
            requests,
        })
    }

    /// `ip:port` the peer listens on.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Number of connections accepted so far.
    #[must_use]
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }

    /// Requests read so far, in arrival order.
    #[must_use]
    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }
}

/// A `host:port` on which nothing is listening.
pub async fn unreachable_host() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let host = listener.local_addr()?.to_string();
    drop(listener);
    Ok(host)
}

async fn serve(
    mut stream: TcpStream,
    behavior: Behavior,
    captured: Arc<Mutex<Vec<CapturedRequest>>>,
) -> Result<()> {
    let request = read_request(&mut stream).await?;
    if let Ok(mut requests) = captured.lock() {
        requests.push(request);
    }

    if let Behavior::Respond(status, body) = behavior {
        let response = format!(
            "HTTP/1.1 {status} Mock\r\n\
             Content-Type: text/xml\r\n\
             Content-Length: {}\r\n\
             Connection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await?;
    }

    stream.shutdown().await?;
    Ok(())
}

/// Read one full request, so that closing the socket sends a clean FIN.
async fn read_request(stream: &mut TcpStream) -> Result<CapturedRequest> {
    let mut buf = Vec::new();
    let mut chunk = [0_u8; 4096];

    let head_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            bail!("connection closed before request head");
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let mut request = CapturedRequest {
        head: String::from_utf8_lossy(&buf[..head_end]).into_owned(),
        body: buf[head_end + 4..].to_vec(),
    };
    let content_length: usize = request
        .header("content-length")
        .map(str::parse)
        .transpose()?
        .unwrap_or(0);

    while request.body.len() < content_length {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            bail!("connection closed before request body");
        }
        request.body.extend_from_slice(&chunk[..n]);
    }

    Ok(request)
}

/// Decode a form-encoded body into its key/value pairs.
#[must_use]
pub fn decode_form(body: &[u8]) -> Vec<(String, String)> {
    let decode = |s: &str| {
        percent_encoding::percent_decode_str(s)
            .decode_utf8_lossy()
            .into_owned()
    };

    String::from_utf8_lossy(body)
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (decode(k), decode(v))
        })
        .collect()
}

mod test_transport;
