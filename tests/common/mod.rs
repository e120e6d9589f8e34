//! Shared utilities for integration tests.
//!
//! Provides a one-shot Gopher server bound to a random local port and
//! logging setup for debugging test runs.

#![allow(dead_code)]

// ============================================================================
// Imports
// ============================================================================

use std::net::SocketAddr;
use std::time::Duration;

use gopher_client::GopherClient;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Constants
// ============================================================================

/// Reference menu: one link, one info line, terminator and blank line.
pub const REFERENCE_MENU: &[u8] = b"1Menu One\tseltype\thost1\t70\r\ni-- info --\t\t\t\r\n.\r\n\r\n";

/// Normalized form of [`REFERENCE_MENU`].
pub const REFERENCE_TEXT: &str = "cmd[1Menu One]:#gopher get host1:70seltype\nl: -- info --";

// ============================================================================
// MockServer
// ============================================================================

/// A Gopher server that answers exactly one request.
///
/// The server records the request line, writes the canned reply in the
/// given pieces and closes the connection.
pub struct MockServer {
    /// Bound address.
    addr: SocketAddr,
    /// Accept task, yields the raw request line.
    handle: JoinHandle<String>,
}

impl MockServer {
    /// Binds to `127.0.0.1:0` and serves `reply` as one write.
    pub async fn serve(reply: &[u8]) -> Self {
        Self::serve_chunks(vec![reply.to_vec()]).await
    }

    /// Binds to `127.0.0.1:0` and serves `pieces` as separate writes.
    pub async fn serve_chunks(pieces: Vec<Vec<u8>>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");

        let handle = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept");
            let (read, mut write) = stream.into_split();

            let mut line = String::new();
            BufReader::new(read)
                .read_line(&mut line)
                .await
                .expect("read request line");

            for piece in pieces {
                write.write_all(&piece).await.expect("write reply");
                write.flush().await.expect("flush");
                tokio::time::sleep(Duration::from_millis(5)).await;
            }

            write.shutdown().await.ok();
            line
        });

        Self { addr, handle }
    }

    /// Returns the bound port.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Returns a URI on this server.
    pub fn uri(&self, path: &str) -> String {
        format!("gopher://127.0.0.1:{}{path}", self.port())
    }

    /// Waits for the request and returns the line the client sent.
    pub async fn request_line(self) -> String {
        self.handle.await.expect("server task")
    }
}

// ============================================================================
// Functions
// ============================================================================

/// Returns a port with nothing listening on it.
pub async fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    listener.local_addr().expect("local addr").port()
}

/// Builds a client whose defaults point at the local server.
pub fn client_for(port: u16) -> GopherClient {
    GopherClient::builder()
        .default_host("127.0.0.1")
        .default_port(port)
        .search_uri(format!("gopher://127.0.0.1:{port}/7/v2/vs"))
        .timeout(Duration::from_secs(5))
        .build()
        .expect("valid config")
}

/// Initialize tracing for a test run; repeated calls are ignored.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("gopher_client=warn")),
        )
        .with_target(false)
        .with_test_writer()
        .try_init();
}
