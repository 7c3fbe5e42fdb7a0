//! HTTP client for the published RIPTE series

use super::{FallbackReason, ResolvedIndex, DEFAULT_REFERENCE_INDEX};
use log::{debug, info, warn};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Series endpoint of the statistics service
pub const DEFAULT_INDEX_URL: &str = "https://api.estadisticasbcra.com/ripte";

/// Failure classes of a single lookup
#[derive(Debug, Error)]
pub enum IndexFetchError {
    #[error("no API token configured")]
    NotConfigured,

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("service returned HTTP {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed response: {0}")]
    Malformed(String),
}

impl IndexFetchError {
    pub fn reason(&self) -> FallbackReason {
        match self {
            IndexFetchError::NotConfigured => FallbackReason::NotConfigured,
            IndexFetchError::Timeout(_) => FallbackReason::Timeout,
            IndexFetchError::Status(code) => FallbackReason::Status { code: *code },
            IndexFetchError::Network(_) => FallbackReason::Network,
            IndexFetchError::Malformed(_) => FallbackReason::Malformed,
        }
    }
}

/// Lookup settings
#[derive(Debug, Clone)]
pub struct IndexConfig {
    pub url: String,
    /// Bearer token issued by the statistics service
    pub token: Option<String>,
    pub timeout: Duration,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_INDEX_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Observation {
    #[serde(alias = "v")]
    valor: Value,
}

/// Extract the latest index value from a series body.
///
/// The body is a JSON array ordered oldest first; the last element's `valor`
/// (or `v`) is taken, as a number or a numeric string.
pub fn parse_latest(body: &[u8]) -> Result<f64, IndexFetchError> {
    let series: Vec<Observation> =
        serde_json::from_slice(body).map_err(|e| IndexFetchError::Malformed(e.to_string()))?;

    let last = series
        .last()
        .ok_or_else(|| IndexFetchError::Malformed("empty series".to_string()))?;

    let value = match &last.valor {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| IndexFetchError::Malformed(format!("non-numeric value {}", last.valor)))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(IndexFetchError::Malformed(format!("index must be positive, got {}", value)));
    }
    Ok(value)
}

/// Reference index provider backed by the statistics service
pub struct RipteClient {
    client: Client,
    config: IndexConfig,
}

impl RipteClient {
    pub fn new(config: IndexConfig) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("srt_calculator/", env!("CARGO_PKG_VERSION")))
                .timeout(config.timeout)
                .build()
                .unwrap_or_else(|e| {
                    warn!("Falling back to a default HTTP client ({}); timeout applied per request", e);
                    Client::default()
                }),
            config,
        }
    }

    /// Fetch the latest published value, reporting exactly what went wrong
    pub async fn fetch_latest(&self) -> Result<f64, IndexFetchError> {
        let token = self.config.token.as_deref().ok_or(IndexFetchError::NotConfigured)?;

        debug!("Fetching reference index from {}", self.config.url);
        let response = self
            .client
            .get(&self.config.url)
            .header(reqwest::header::AUTHORIZATION, format!("BEARER {}", token))
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IndexFetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| self.classify(e))?;
        parse_latest(&body)
    }

    /// Latest value, or the default with the reason it was needed
    pub async fn resolve(&self) -> ResolvedIndex {
        match self.fetch_latest().await {
            Ok(value) => {
                info!("Reference index {} fetched from {}", value, self.config.url);
                ResolvedIndex::live(value)
            }
            Err(err) => {
                match &err {
                    IndexFetchError::NotConfigured => {
                        warn!("No index token configured, using default index {}", DEFAULT_REFERENCE_INDEX)
                    }
                    IndexFetchError::Timeout(after) => {
                        warn!("Reference index lookup timed out after {:?}, using default", after)
                    }
                    IndexFetchError::Status(code) => {
                        warn!("Reference index service answered HTTP {}, using default", code)
                    }
                    IndexFetchError::Network(detail) => {
                        warn!("Reference index service unreachable ({}), using default", detail)
                    }
                    IndexFetchError::Malformed(detail) => {
                        warn!("Reference index response unusable ({}), using default", detail)
                    }
                }
                ResolvedIndex::fallback(err.reason())
            }
        }
    }

    fn classify(&self, err: reqwest::Error) -> IndexFetchError {
        if err.is_timeout() {
            IndexFetchError::Timeout(self.config.timeout)
        } else if err.is_decode() {
            IndexFetchError::Malformed(err.to_string())
        } else {
            IndexFetchError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::IndexSource;

    #[test]
    fn test_parse_latest_takes_last() {
        let body = br#"[{"fecha":"2025-05-01","valor":150000.5},{"fecha":"2025-06-01","valor":152345.25}]"#;
        assert_eq!(parse_latest(body).unwrap(), 152_345.25);
    }

    #[test]
    fn test_parse_latest_short_keys_and_strings() {
        assert_eq!(parse_latest(br#"[{"d":"2025-06-01","v":"1.75"}]"#).unwrap(), 1.75);
    }

    #[test]
    fn test_parse_latest_malformed() {
        let bodies: [&[u8]; 8] = [
            b"[]",
            b"{}",
            b"not json",
            br#"[{"valor":null}]"#,
            br#"[{"valor":"abc"}]"#,
            br#"[{"valor":0}]"#,
            br#"[{"valor":-3.5}]"#,
            br#"[{"other":1}]"#,
        ];
        for body in bodies {
            let err = parse_latest(body).unwrap_err();
            assert_eq!(err.reason(), FallbackReason::Malformed, "body {:?}", String::from_utf8_lossy(body));
        }
    }

    #[test]
    fn test_error_reasons() {
        assert_eq!(IndexFetchError::Status(500).reason(), FallbackReason::Status { code: 500 });
        assert_eq!(IndexFetchError::Timeout(Duration::from_secs(1)).reason(), FallbackReason::Timeout);
        assert_eq!(IndexFetchError::Network("refused".into()).reason(), FallbackReason::Network);
    }

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client_for(url: String, timeout: Duration) -> RipteClient {
        RipteClient::new(IndexConfig {
            url,
            token: Some("test-token".to_string()),
            timeout,
        })
    }

    /// Serve one connection: read the request, answer with `response`, close
    async fn serve_once(response: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            if let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{}/ripte", addr)
    }

    fn http_response(status_line: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        )
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let url = serve_once(http_response("500 Internal Server Error", "")).await;
        let client = client_for(url, Duration::from_secs(5));

        assert!(matches!(client.fetch_latest().await, Err(IndexFetchError::Status(500))));
    }

    #[tokio::test]
    async fn test_unauthorized_falls_back_with_status() {
        let url = serve_once(http_response("401 Unauthorized", "")).await;
        let resolved = client_for(url, Duration::from_secs(5)).resolve().await;

        assert_eq!(resolved.value, DEFAULT_REFERENCE_INDEX);
        assert_eq!(resolved.source, IndexSource::Fallback(FallbackReason::Status { code: 401 }));
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/ripte", listener.local_addr().unwrap());
        let held = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        });

        let client = client_for(url, Duration::from_millis(200));
        let err = client.fetch_latest().await.unwrap_err();
        assert!(matches!(err, IndexFetchError::Timeout(_)), "got {:?}", err);
        assert_eq!(err.reason(), FallbackReason::Timeout);
        held.abort();
    }

    #[tokio::test]
    async fn test_refused_connection_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/ripte", listener.local_addr().unwrap());
        drop(listener);

        let resolved = client_for(url, Duration::from_secs(5)).resolve().await;
        assert_eq!(resolved.source, IndexSource::Fallback(FallbackReason::Network));
        assert_eq!(resolved.value, DEFAULT_REFERENCE_INDEX);
    }

    #[tokio::test]
    async fn test_unusable_body_is_malformed() {
        let url = serve_once(http_response("200 OK", "<html>maintenance</html>")).await;
        let err = client_for(url, Duration::from_secs(5)).fetch_latest().await.unwrap_err();
        assert!(matches!(err, IndexFetchError::Malformed(_)), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_live_series() {
        let body = r#"[{"fecha":"2025-05-01","valor":2.25},{"fecha":"2025-06-01","valor":2.5}]"#;
        let url = serve_once(http_response("200 OK", body)).await;
        let resolved = client_for(url, Duration::from_secs(5)).resolve().await;

        assert_eq!(resolved, ResolvedIndex::live(2.5));
        assert!(resolved.fallback_note().is_none());
    }

    #[tokio::test]
    async fn test_resolve_without_token_falls_back() {
        let client = RipteClient::new(IndexConfig::default());
        assert!(matches!(client.fetch_latest().await, Err(IndexFetchError::NotConfigured)));

        let resolved = client.resolve().await;
        assert_eq!(resolved.value, DEFAULT_REFERENCE_INDEX);
        assert_eq!(resolved.source, IndexSource::Fallback(FallbackReason::NotConfigured));
    }
}
