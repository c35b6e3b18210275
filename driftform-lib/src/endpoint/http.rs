//! Submission to a real backend over HTTP

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::SubmitEndpoint;
use super::SubmitResponse;
use crate::error::SubmitError;
use crate::model::FormValues;

/// A [`SubmitEndpoint`] that POSTs the form values as JSON.
///
/// Successful (2xx) and client-error (4xx) responses are expected to carry a
/// verdict body. Any other status is a transport failure.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use driftform_lib::endpoint::HttpEndpoint;
/// use url::Url;
///
/// let url = Url::parse("http://localhost:8080/transfers/validate").unwrap();
/// let endpoint = HttpEndpoint::new(url).with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct HttpEndpoint {
    url: Url,
    http_client: Client,
    timeout: Option<Duration>,
}

impl HttpEndpoint {
    /// Creates an endpoint posting to `url`.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            http_client: Client::new(),
            timeout: None,
        }
    }

    /// Sets a per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Uses a preconfigured HTTP client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.http_client = client;
        self
    }

    /// Returns the target URL.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl SubmitEndpoint for HttpEndpoint {
    async fn submit(&self, values: &FormValues) -> Result<SubmitResponse, SubmitError> {
        let mut request = self.http_client.post(self.url.clone()).json(values);

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() || status.is_client_error() {
            serde_json::from_str(&body).map_err(|e| SubmitError::parse(e.to_string()))
        } else {
            Err(SubmitError::Http {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::AsyncReadExt;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    use super::*;
    use crate::error::ServerFieldError;

    fn local(url: Url) -> HttpEndpoint {
        HttpEndpoint::new(url).with_client(Client::builder().no_proxy().build().unwrap())
    }

    /// Serves a single canned HTTP response and returns the request body.
    async fn serve_once(
        status_line: &'static str,
        body: &'static str,
    ) -> (Url, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = Url::parse(&format!("http://{}/submit", listener.local_addr().unwrap())).unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 1024];
            let request_body = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                buf.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&buf).to_string();
                if let Some((head, rest)) = text.split_once("\r\n\r\n") {
                    let length = head
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if rest.len() >= length {
                        break rest.to_string();
                    }
                }
                if n == 0 {
                    break String::new();
                }
            };

            let response = format!(
                "{status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request_body
        });

        (url, handle)
    }

    #[tokio::test]
    async fn test_posts_values_and_reads_verdict() {
        let (url, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"success": true, "message": "accepted"}"#,
        )
        .await;

        let response = local(url)
            .submit(&FormValues::new("a@ok.com", "100"))
            .await
            .unwrap();
        assert_eq!(response, SubmitResponse::accepted("accepted"));

        let sent: serde_json::Value = serde_json::from_str(&server.await.unwrap()).unwrap();
        assert_eq!(sent, serde_json::json!({"email": "a@ok.com", "amount": "100"}));
    }

    #[tokio::test]
    async fn test_client_error_status_carries_verdict() {
        let (url, _server) = serve_once(
            "HTTP/1.1 422 Unprocessable Entity",
            r#"{"success": false, "errors": [{"field": "amount", "message": "too much"}]}"#,
        )
        .await;

        let response = local(url)
            .submit(&FormValues::new("a@ok.com", "100"))
            .await
            .unwrap();
        assert_eq!(
            response,
            SubmitResponse::rejected([ServerFieldError::new("amount", "too much")])
        );
    }

    #[tokio::test]
    async fn test_server_error_status_is_transport_failure() {
        let (url, _server) = serve_once("HTTP/1.1 503 Service Unavailable", "{}").await;

        let result = local(url)
            .submit(&FormValues::new("a@ok.com", "100"))
            .await;
        let err = result.unwrap_err();
        assert_eq!(err.status_code(), Some(503));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_garbage_body_is_parse_error() {
        let (url, _server) = serve_once("HTTP/1.1 200 OK", r#"{"nope": 1}"#).await;

        let result = local(url)
            .submit(&FormValues::new("a@ok.com", "100"))
            .await;
        assert!(matches!(result, Err(SubmitError::Parse(_))));
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{addr}/submit")).unwrap();
        let result = local(url)
            .submit(&FormValues::new("a@ok.com", "100"))
            .await;
        assert!(matches!(result, Err(SubmitError::Network(_))));
    }
}
