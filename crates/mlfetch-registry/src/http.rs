//! HTTP backend abstraction for the MLflow REST API.
//!
//! The client is generic over this trait so tests can swap in a fake.
//! The production implementation uses reqwest. No request is retried.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::config::Credentials;
use crate::error::{MlflowError, MlflowResult};
use crate::models::{ApiErrorBody, MlflowConfig};

// ============================================================================
// HTTP Backend Trait
// ============================================================================

/// Trait for HTTP backends used by the MLflow client.
///
/// This is an implementation detail - external code should use the
/// `RegistryClientPort` trait.
#[async_trait]
pub trait HttpBackend: Send + Sync {
    /// Issue a bounded GET and return the status, whatever it is.
    async fn probe(&self, url: &Url) -> MlflowResult<u16>;

    /// Fetch JSON from a URL and deserialize it.
    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> MlflowResult<T>;

    /// Stream the body at `url` into `dest`, returning the bytes written.
    ///
    /// `dest`'s parent directory must exist. On error the file may be left
    /// partially written; callers clean up.
    async fn download_to_file(&self, url: &Url, dest: &Path) -> MlflowResult<u64>;
}

// ============================================================================
// Reqwest Backend
// ============================================================================

/// Production HTTP backend using reqwest.
pub struct ReqwestBackend {
    client: reqwest::Client,
    probe_timeout: Duration,
    credentials: Option<Credentials>,
}

impl ReqwestBackend {
    /// Create a new reqwest backend with the given configuration.
    pub fn new(config: &MlflowConfig) -> MlflowResult<Self> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            probe_timeout: config.probe_timeout,
            credentials: config.credentials.clone(),
        })
    }

    /// Build a request with optional authentication.
    fn build_request(&self, url: &Url) -> reqwest::RequestBuilder {
        let request = self.client.get(url.as_str());
        match &self.credentials {
            Some(Credentials::Bearer(token)) => request.bearer_auth(token),
            Some(Credentials::Basic { username, password }) => {
                request.basic_auth(username, password.as_ref())
            }
            None => request,
        }
    }

    /// Send a GET and turn non-success statuses into `ApiRequestFailed`.
    async fn send_checked(&self, url: &Url) -> MlflowResult<reqwest::Response> {
        let response = self.build_request(url).send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(api_error(url, response).await)
        }
    }
}

/// Build an `ApiRequestFailed` from a failed response, reading MLflow's
/// `{error_code, message}` body when there is one.
async fn api_error(url: &Url, response: reqwest::Response) -> MlflowError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let (error_code, message) = match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(parsed) => (parsed.error_code, parsed.message),
        Err(_) if body.trim().is_empty() => (None, None),
        Err(_) => (None, Some(body.trim().chars().take(200).collect())),
    };
    MlflowError::ApiRequestFailed {
        status,
        url: url.to_string(),
        error_code,
        message,
    }
}

#[async_trait]
impl HttpBackend for ReqwestBackend {
    async fn probe(&self, url: &Url) -> MlflowResult<u16> {
        let response = self
            .build_request(url)
            .timeout(self.probe_timeout)
            .send()
            .await
            .map_err(|e| MlflowError::Unreachable {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(response.status().as_u16())
    }

    async fn get_json<T: DeserializeOwned + Send>(&self, url: &Url) -> MlflowResult<T> {
        let response = self.send_checked(url).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn download_to_file(&self, url: &Url, dest: &Path) -> MlflowResult<u64> {
        let response = self.send_checked(url).await?;
        let io_err = |source| MlflowError::Io {
            path: dest.to_path_buf(),
            source,
        };

        let mut file = tokio::fs::File::create(dest).await.map_err(io_err)?;
        let mut written: u64 = 0;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await.map_err(io_err)?;
            written += chunk.len() as u64;
        }
        file.flush().await.map_err(io_err)?;

        Ok(written)
    }
}

// ============================================================================
// Fake Backend for Testing
// ============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reqwest_backend_creation() {
        let config = MlflowConfig::default();
        let backend = ReqwestBackend::new(&config).unwrap();
        assert_eq!(backend.probe_timeout, Duration::from_secs(30));
        assert!(backend.credentials.is_none());
    }

    #[test]
    fn test_reqwest_backend_with_credentials() {
        let config = MlflowConfig {
            credentials: Some(Credentials::Bearer("test_token".to_string())),
            request_timeout: Some(Duration::from_secs(5)),
            ..Default::default()
        };
        let backend = ReqwestBackend::new(&config).unwrap();
        assert_eq!(
            backend.credentials,
            Some(Credentials::Bearer("test_token".to_string()))
        );
    }

    mod reqwest_backend_tests {
        use super::*;
        use tempfile::tempdir;
        use tokio::io::AsyncReadExt;
        use tokio::net::{TcpListener, TcpStream};
        use tokio::sync::oneshot;

        fn http_response(status: &str, content_length: usize, body: &[u8]) -> Vec<u8> {
            let mut response = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {content_length}\r\nConnection: close\r\n\r\n"
            )
            .into_bytes();
            response.extend_from_slice(body);
            response
        }

        async fn read_request(socket: &mut TcpStream) -> String {
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            String::from_utf8_lossy(&request).into_owned()
        }

        /// Answer a single request on a loopback port with `response`.
        async fn serve_once(response: Vec<u8>) -> (Url, oneshot::Receiver<String>) {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let (tx, rx) = oneshot::channel();
            tokio::spawn(async move {
                let (mut socket, _) = listener.accept().await.unwrap();
                let request = read_request(&mut socket).await;
                let _ = tx.send(request);
                let _ = socket.write_all(&response).await;
                let _ = socket.shutdown().await;
            });
            (Url::parse(&format!("http://{addr}/")).unwrap(), rx)
        }

        fn backend() -> ReqwestBackend {
            ReqwestBackend::new(&MlflowConfig::default()).unwrap()
        }

        #[tokio::test]
        async fn test_any_status_counts_as_reachable() {
            let (url, _) = serve_once(http_response("500 Internal Server Error", 0, b"")).await;
            assert_eq!(backend().probe(&url).await.unwrap(), 500);
        }

        #[tokio::test]
        async fn test_credentials_are_sent() {
            let config = MlflowConfig {
                credentials: Some(Credentials::Bearer("secret".to_string())),
                ..Default::default()
            };
            let backend = ReqwestBackend::new(&config).unwrap();
            let (url, request) = serve_once(http_response("200 OK", 0, b"")).await;

            assert_eq!(backend.probe(&url).await.unwrap(), 200);
            let request = request.await.unwrap().to_ascii_lowercase();
            assert!(request.contains("authorization: bearer secret"));
        }

        #[tokio::test]
        async fn test_closed_port_is_unreachable() {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            drop(listener);
            let url = Url::parse(&format!("http://{addr}/")).unwrap();

            assert!(matches!(
                backend().probe(&url).await,
                Err(MlflowError::Unreachable { .. })
            ));
        }

        #[tokio::test]
        async fn test_silent_server_times_out() {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            tokio::spawn(async move {
                let (_socket, _) = listener.accept().await.unwrap();
                tokio::time::sleep(Duration::from_secs(5)).await;
            });
            let config = MlflowConfig {
                probe_timeout: Duration::from_millis(100),
                ..Default::default()
            };
            let backend = ReqwestBackend::new(&config).unwrap();
            let url = Url::parse(&format!("http://{addr}/")).unwrap();

            let err = backend.probe(&url).await.unwrap_err();
            assert!(matches!(err, MlflowError::Unreachable { ref url, .. } if url.starts_with("http://127.0.0.1")));
        }

        #[tokio::test]
        async fn test_get_json_parses_body() {
            let body = br#"{"model_versions": []}"#;
            let (url, _) = serve_once(http_response("200 OK", body.len(), body)).await;

            let value: serde_json::Value = backend().get_json(&url).await.unwrap();
            assert!(value["model_versions"].as_array().unwrap().is_empty());
        }

        #[tokio::test]
        async fn test_get_json_reads_error_body() {
            let body = br#"{"error_code": "RESOURCE_DOES_NOT_EXIST", "message": "Registered Model with name=Missing not found"}"#;
            let (url, _) = serve_once(http_response("404 Not Found", body.len(), body)).await;

            let err = backend()
                .get_json::<serde_json::Value>(&url)
                .await
                .unwrap_err();
            assert!(err.is_not_found());
            let MlflowError::ApiRequestFailed {
                status,
                error_code,
                message,
                ..
            } = err
            else {
                panic!("expected an API error");
            };
            assert_eq!(status, 404);
            assert_eq!(error_code.as_deref(), Some("RESOURCE_DOES_NOT_EXIST"));
            assert_eq!(
                message.as_deref(),
                Some("Registered Model with name=Missing not found")
            );
        }

        #[tokio::test]
        async fn test_get_json_keeps_plain_error_text() {
            let body = b"Bad Gateway\n";
            let (url, _) = serve_once(http_response("502 Bad Gateway", body.len(), body)).await;

            let err = backend()
                .get_json::<serde_json::Value>(&url)
                .await
                .unwrap_err();
            assert!(matches!(
                err,
                MlflowError::ApiRequestFailed { status: 502, error_code: None, message: Some(ref m), .. } if m == "Bad Gateway"
            ));
        }

        #[tokio::test]
        async fn test_download_streams_to_file() {
            let body = vec![7u8; 64 * 1024];
            let (url, _) = serve_once(http_response("200 OK", body.len(), &body)).await;
            let tmp = tempdir().unwrap();
            let dest = tmp.path().join("weights.bin");

            let written = backend().download_to_file(&url, &dest).await.unwrap();

            assert_eq!(written, body.len() as u64);
            assert_eq!(std::fs::read(&dest).unwrap(), body);
        }

        #[tokio::test]
        async fn test_download_fails_on_truncated_body() {
            let (url, _) = serve_once(http_response("200 OK", 100, b"0123456789")).await;
            let tmp = tempdir().unwrap();
            let dest = tmp.path().join("weights.bin");

            let err = backend().download_to_file(&url, &dest).await.unwrap_err();
            assert!(matches!(err, MlflowError::Network(_)));
        }

        #[tokio::test]
        async fn test_download_error_status_writes_nothing() {
            let (url, _) = serve_once(http_response("403 Forbidden", 0, b"")).await;
            let tmp = tempdir().unwrap();
            let dest = tmp.path().join("weights.bin");

            let err = backend().download_to_file(&url, &dest).await.unwrap_err();
            assert!(matches!(err, MlflowError::ApiRequestFailed { status: 403, .. }));
            assert!(!dest.exists());
        }
    }

    mod fake_backend_tests {
        use super::super::testing::*;
        use super::*;
        use serde_json::json;

        #[test]
        fn test_route_key_decodes_query() {
            let url = Url::parse("http://h/api/x?name=Test%20model&stages=Staging").unwrap();
            assert_eq!(route_key(&url), "/api/x?name=Test model&stages=Staging");
        }

        #[tokio::test]
        async fn test_fake_backend_returns_canned_json() {
            let backend = FakeBackend::new().with_json("/api/x", json!({"ok": true}));
            let url = Url::parse("http://h/api/x").unwrap();

            let value: serde_json::Value = backend.get_json(&url).await.unwrap();
            assert_eq!(value["ok"], true);
            assert_eq!(backend.requests(), vec!["/api/x".to_string()]);
        }

        #[tokio::test]
        async fn test_fake_backend_returns_404_for_unknown_route() {
            let backend = FakeBackend::new();
            let url = Url::parse("http://h/unknown").unwrap();

            let result: MlflowResult<serde_json::Value> = backend.get_json(&url).await;
            assert!(matches!(result, Err(ref e) if e.is_not_found()));
        }

        #[tokio::test]
        async fn test_fake_backend_unreachable_probe() {
            let backend = FakeBackend::new().unreachable();
            let url = Url::parse("http://h/").unwrap();
            assert!(matches!(
                backend.probe(&url).await,
                Err(MlflowError::Unreachable { .. })
            ));
        }
    }
}
