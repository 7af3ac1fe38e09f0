//! HTTP transport seam.
//!
//! Downloads go through the [`Transport`] trait so the installer can be
//! driven by an in-memory fake. [`HttpTransport`] is the reqwest-backed
//! implementation used in production.

use crate::InstallError;
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use std::time::Duration;

/// A response body delivered chunk by chunk.
pub type ByteStream = BoxStream<'static, std::io::Result<Bytes>>;

/// Issues GET requests and hands back the body as a stream.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Start a GET request for `url`.
    ///
    /// Resolves once response headers are in. Connection failures and
    /// non-success statuses are reported here; failures while reading the
    /// body surface as errors inside the returned stream.
    async fn get(&self, url: &str) -> Result<ByteStream, InstallError>;
}

/// reqwest-backed transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport that gives up when connecting, or any single read,
    /// takes longer than `timeout`.
    ///
    /// There is no limit on the whole transfer, so a large archive over a
    /// slow link completes as long as bytes keep arriving.
    pub fn new(timeout: Duration) -> Result<Self, InstallError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(timeout)
            .read_timeout(timeout)
            .build()
            .map_err(|e| InstallError::Network {
                url: String::new(),
                message: format!("failed to create HTTP client: {}", e),
                fix: "Check the system TLS configuration".to_string(),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<ByteStream, InstallError> {
        tracing::debug!(url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| InstallError::network(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(InstallError::network(url, format!("HTTP {}", status)));
        }

        Ok(response
            .bytes_stream()
            .map_err(std::io::Error::other)
            .boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one response whose body bytes arrive `gap` apart.
    async fn trickle_server(body: &'static [u8], gap: Duration) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            socket.set_nodelay(true).unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await.unwrap();
            let head = format!(
                "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            for byte in body {
                tokio::time::sleep(gap).await;
                if socket.write_all(&[*byte]).await.is_err() {
                    return;
                }
            }
            let _ = socket.shutdown().await;
        });
        addr
    }

    async fn read_all(body: ByteStream) -> std::io::Result<Vec<u8>> {
        let chunks: Vec<Bytes> = body.try_collect().await?;
        Ok(chunks.iter().flat_map(|c| c.iter().copied()).collect())
    }

    #[test]
    fn test_http_transport_builds() {
        assert!(HttpTransport::new(Duration::from_secs(1)).is_ok());
    }

    #[tokio::test]
    async fn test_http_transport_connection_refused() {
        let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
        // Port 9 (discard) is essentially never listening on localhost.
        let result = transport.get("http://127.0.0.1:9/node.tar.gz").await;
        assert!(matches!(result, Err(InstallError::Network { .. })));
    }

    #[tokio::test]
    async fn test_slow_body_outlasting_timeout_completes() {
        // Six 100ms gaps add up past the 400ms timeout; no single read does.
        let addr = trickle_server(b"abcdef", Duration::from_millis(100)).await;
        let transport = HttpTransport::new(Duration::from_millis(400)).unwrap();

        let body = transport
            .get(&format!("http://{}/node.tar.gz", addr))
            .await
            .unwrap();

        assert_eq!(read_all(body).await.unwrap(), b"abcdef");
    }

    #[tokio::test]
    async fn test_stalled_body_times_out() {
        let addr = trickle_server(b"ab", Duration::from_secs(5)).await;
        let transport = HttpTransport::new(Duration::from_millis(200)).unwrap();

        let body = transport
            .get(&format!("http://{}/node.tar.gz", addr))
            .await
            .unwrap();

        assert!(read_all(body).await.is_err());
    }
}
