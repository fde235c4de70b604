use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::models::{decode_rate_points, ApiError, RatePoint};

/// Anything that can resolve a concrete rates URL into rate points
#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch_rates(&self, url: &str) -> Result<Vec<RatePoint>, ApiError>;
}

/// HTTP client for the interbank rates endpoint
pub struct RatesClient {
    http_client: HttpClient,
}

impl RatesClient {
    /// Create a new client
    ///
    /// With `timeout` unset no timeout is configured and the transport default applies.
    pub fn new(timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = HttpClient::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| ApiError::RequestError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http_client })
    }

    /// Create a client around a preconfigured reqwest client
    pub fn with_http_client(http_client: HttpClient) -> Self {
        Self { http_client }
    }

    /// Map a non-2xx response into an error, keeping the body for the logs
    async fn handle_error_response(
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> ApiError {
        let status_code = status.as_u16();
        let body_text = response.text().await.unwrap_or_default();

        if status.is_server_error() {
            warn!("Rates server error {}: {}", status_code, body_text);
        }

        ApiError::HttpError(status_code, body_text)
    }

    /// GET a fully substituted rates URL
    ///
    /// # Returns
    /// * `Ok(Vec<RatePoint>)` - Points in the order the server sent them
    /// * `Err(ApiError)` - Transport, status, or decode failure
    pub async fn get_rates(&self, url: &str) -> Result<Vec<RatePoint>, ApiError> {
        let response = self.http_client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Self::handle_error_response(status, response).await);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::RequestError(format!("Failed to read response body: {}", e)))?;

        let points = decode_rate_points(&body)?;
        debug!("Decoded {} rate points from {}", points.len(), url);
        Ok(points)
    }
}

#[async_trait]
impl RateSource for RatesClient {
    async fn fetch_rates(&self, url: &str) -> Result<Vec<RatePoint>, ApiError> {
        self.get_rates(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn local_client() -> RatesClient {
        let http_client = HttpClient::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        RatesClient::with_http_client(http_client)
    }

    /// Serve one canned HTTP response and hand back the request line
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }

            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();

            let request = String::from_utf8_lossy(&request).to_string();
            request.lines().next().unwrap_or_default().to_string()
        });

        (format!("http://{}", addr), handle)
    }

    #[tokio::test]
    async fn test_get_rates_decodes_array() {
        let (base, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"[{"date":"03-03-2024","rate":1.5},{"date":"03-04-2024","rate":1.6}]"#,
        )
        .await;

        let client = local_client();
        let url = format!("{}/rates/?from=03-03-2024&to=03-10-2024", base);
        let points = client.get_rates(&url).await.unwrap();

        assert_eq!(
            points,
            vec![
                RatePoint { date: "03-03-2024".to_string(), rate: 1.5 },
                RatePoint { date: "03-04-2024".to_string(), rate: 1.6 },
            ]
        );

        let request_line = server.await.unwrap();
        assert_eq!(request_line, "GET /rates/?from=03-03-2024&to=03-10-2024 HTTP/1.1");
    }

    #[tokio::test]
    async fn test_get_rates_non_success_status() {
        let (base, server) = serve_once("HTTP/1.1 503 Service Unavailable", "down").await;

        let client = local_client();
        let result = client.get_rates(&format!("{}/rates", base)).await;

        match result {
            Err(ApiError::HttpError(status, body)) => {
                assert_eq!(status, 503);
                assert_eq!(body, "down");
            }
            other => panic!("expected HTTP error, got {:?}", other),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_get_rates_typed_decode_failure() {
        let (base, server) = serve_once("HTTP/1.1 200 OK", r#"[{"rate":1.5}]"#).await;

        let client = local_client();
        let result = client.get_rates(&format!("{}/rates", base)).await;

        assert!(matches!(result, Err(ApiError::DecodeError { index: 0, .. })));
        server.await.unwrap();
    }

    #[test]
    fn test_new_without_timeout() {
        assert!(RatesClient::new(None).is_ok());
    }

    #[tokio::test]
    async fn test_get_rates_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = local_client();
        let result = client.get_rates(&format!("http://{}/rates", addr)).await;

        assert!(matches!(result, Err(ApiError::RequestError(_))));
    }
}
