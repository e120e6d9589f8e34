//! TCP connection for a single Gopher request.
//!
//! The whole connect/send/receive sequence is one async operation, so a
//! deadline can wrap it uniformly.
//!
//! # Sequence
//!
//! 1. Connect to `host:port`
//! 2. Record the peer address in the session
//! 3. Write the request line once
//! 4. Append every received chunk to the session until the server closes

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use parking_lot::Mutex;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::protocol::Request;
use crate::session::SessionState;

// ============================================================================
// Constants
// ============================================================================

/// Default read buffer size.
pub const DEFAULT_READ_BUFFER_SIZE: usize = 8192;

/// Default deadline for a whole request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ============================================================================
// Connection
// ============================================================================

/// Connection manager for one request at a time.
///
/// Holds no socket between requests; each call to [`Connection::request`]
/// opens, drives and drops its own stream.
#[derive(Debug, Clone)]
pub struct Connection {
    /// Deadline for the full round trip; `None` waits forever.
    timeout: Option<Duration>,
    /// Bytes read per socket read.
    read_buffer_size: usize,
}

impl Default for Connection {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
        }
    }
}

impl Connection {
    /// Creates a connection manager with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request deadline (`None` disables it).
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the read buffer size (minimum 1).
    #[inline]
    #[must_use]
    pub fn with_read_buffer_size(mut self, size: usize) -> Self {
        self.read_buffer_size = size.max(1);
        self
    }

    /// Returns the configured deadline.
    #[inline]
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Runs one request, streaming the reply into `session`.
    ///
    /// Completes when the server closes the connection and returns the
    /// number of bytes received. `query` is the caller's original input,
    /// carried into errors.
    ///
    /// # Errors
    ///
    /// - [`Error::Connection`] on any socket failure
    /// - [`Error::Timeout`] if the deadline passes first
    /// - [`Error::InvalidState`] if `session` has no active request
    pub async fn request(
        &self,
        request: &Request,
        query: &str,
        session: &Mutex<SessionState>,
    ) -> Result<usize> {
        let exchange = self.exchange(request, query, session);

        match self.timeout {
            Some(limit) => timeout(limit, exchange).await.map_err(|_| {
                Error::timeout(query, u64::try_from(limit.as_millis()).unwrap_or(u64::MAX))
            })?,
            None => exchange.await,
        }
    }

    /// Connect, send, and read until end of stream.
    async fn exchange(
        &self,
        request: &Request,
        query: &str,
        session: &Mutex<SessionState>,
    ) -> Result<usize> {
        let (host, port) = request.target();
        debug!(host, port, "Connecting");

        let mut stream = TcpStream::connect((host, port))
            .await
            .map_err(|e| Error::connection(query, e))?;

        let peer = stream
            .peer_addr()
            .map_err(|e| Error::connection(query, e))?;
        session.lock().record_peer(peer.ip())?;

        let line = request.to_line();
        stream
            .write_all(line.as_bytes())
            .await
            .map_err(|e| Error::connection(query, e))?;

        trace!(%peer, selector = %request.selector, "Request line sent");

        let mut buffer = vec![0u8; self.read_buffer_size];
        let mut total = 0usize;

        loop {
            let read = stream
                .read(&mut buffer)
                .await
                .map_err(|e| Error::connection(query, e))?;

            if read == 0 {
                break;
            }

            session.lock().append_chunk(&buffer[..read])?;
            total += read;

            trace!(bytes = read, total, "Chunk received");
        }

        debug!(%peer, total, "Stream closed by server");

        Ok(total)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::net::{IpAddr, Ipv4Addr};

    use tokio::io::AsyncBufReadExt;
    use tokio::io::BufReader;
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use crate::uri::UriComponents;

    /// Serves one connection: reads the request line, writes `reply`, closes.
    async fn serve_once(reply: &'static [u8]) -> (u16, JoinHandle<String>) {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("bind should succeed");
        let port = listener.local_addr().expect("local addr").port();

        let handle = tokio::spawn(async move {
            let (stream, _) = listener.accept().await.expect("accept");
            let mut reader = BufReader::new(stream);
            let mut line = String::new();
            reader.read_line(&mut line).await.expect("read line");

            let mut stream = reader.into_inner();
            stream.write_all(reply).await.expect("write reply");
            stream.shutdown().await.ok();
            line
        });

        (port, handle)
    }

    fn active_session(port: u16) -> Mutex<SessionState> {
        let mut state = SessionState::new();
        state
            .begin(&UriComponents::new("127.0.0.1", port))
            .expect("begin");
        Mutex::new(state)
    }

    #[test]
    fn test_defaults() {
        let connection = Connection::new();
        assert_eq!(connection.timeout(), Some(DEFAULT_REQUEST_TIMEOUT));
        assert_eq!(connection.read_buffer_size, DEFAULT_READ_BUFFER_SIZE);
        assert_eq!(Connection::new().with_read_buffer_size(0).read_buffer_size, 1);
    }

    #[tokio::test]
    async fn test_request_collects_reply() {
        let (port, server) = serve_once(b"iHello\t\t\t\r\n.\r\n").await;
        let session = active_session(port);
        let request = Request::new("127.0.0.1", port, "/menu");

        let total = Connection::new()
            .request(&request, "gopher://127.0.0.1/1/menu", &session)
            .await
            .expect("request should succeed");

        assert_eq!(total, 14);
        assert_eq!(server.await.expect("server task"), "/menu\r\n");

        let state = session.lock();
        assert_eq!(state.ipaddr(), Some(IpAddr::V4(Ipv4Addr::LOCALHOST)));
        assert_eq!(state.data().concat(), b"iHello\t\t\t\r\n.\r\n".to_vec());
        assert!(state.stop().is_none());
    }

    #[tokio::test]
    async fn test_request_sends_query() {
        let (port, server) = serve_once(b"").await;
        let session = active_session(port);
        let request = Request::new("127.0.0.1", port, "/v2/vs").with_query("frogs");

        let total = Connection::new()
            .with_read_buffer_size(2)
            .request(&request, "q", &session)
            .await
            .expect("request should succeed");

        assert_eq!(total, 0);
        assert_eq!(server.await.expect("server task"), "/v2/vs\tfrogs\r\n");
    }

    #[tokio::test]
    async fn test_small_buffer_keeps_order() {
        let (port, _server) = serve_once(b"abcdefg").await;
        let session = active_session(port);
        let request = Request::new("127.0.0.1", port, "");

        Connection::new()
            .with_read_buffer_size(3)
            .request(&request, "q", &session)
            .await
            .expect("request should succeed");

        assert_eq!(session.lock().data().concat(), b"abcdefg".to_vec());
    }

    #[tokio::test]
    async fn test_refused_is_connection_error() {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("bind should succeed");
        let port = listener.local_addr().expect("local addr").port();
        drop(listener);

        let session = active_session(port);
        let request = Request::new("127.0.0.1", port, "");

        let err = Connection::new()
            .request(&request, "gopher://127.0.0.1/", &session)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Connection { .. }));
        assert_eq!(err.query(), Some("gopher://127.0.0.1/"));
        assert!(session.lock().is_active());
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0))
            .await
            .expect("bind should succeed");
        let port = listener.local_addr().expect("local addr").port();

        let _server = tokio::spawn(async move {
            let (_stream, _) = listener.accept().await.expect("accept");
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let session = active_session(port);
        let request = Request::new("127.0.0.1", port, "");

        let err = Connection::new()
            .with_timeout(Some(Duration::from_millis(100)))
            .request(&request, "slow", &session)
            .await
            .unwrap_err();

        assert!(err.is_timeout());
        assert_eq!(err.query(), Some("slow"));
    }

    #[tokio::test]
    async fn test_idle_session_is_rejected() {
        let (port, _server) = serve_once(b"data").await;
        let session = Mutex::new(SessionState::new());
        let request = Request::new("127.0.0.1", port, "");

        let err = Connection::new()
            .request(&request, "q", &session)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::InvalidState { .. }));
    }
}
