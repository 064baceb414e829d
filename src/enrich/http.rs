//! HTTP access to the ARS3D portal

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::time::sleep;

use super::{MetadataError, MetadataSource};
use crate::config::PortalSettings;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Fetches portal documents over HTTP, pausing after every request
pub struct HttpMetadataSource {
    http: Client,
    url_template: String,
    politeness_delay: Duration,
}

impl HttpMetadataSource {
    pub fn new(settings: &PortalSettings) -> Result<Self, MetadataError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| MetadataError::Transport {
                object_id: String::new(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            url_template: settings.metadata_url_template.clone(),
            politeness_delay: settings.politeness_delay(),
        })
    }

    /// Document URL, with every `{id}` replaced by the encoded identifier
    pub fn url_for(&self, object_id: &str) -> String {
        self.url_template
            .replace("{id}", &urlencoding::encode(object_id))
    }
}

#[async_trait(?Send)]
impl MetadataSource for HttpMetadataSource {
    async fn fetch(&self, object_id: &str) -> Result<String, MetadataError> {
        let url = self.url_for(object_id);
        tracing::info!("Fetching portal metadata {}", url);

        let result = self.http.get(&url).send().await;
        sleep(self.politeness_delay).await;

        let response = result.map_err(|e| MetadataError::Transport {
            object_id: object_id.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::Status {
                object_id: object_id.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| MetadataError::Transport {
            object_id: object_id.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn response(status: &str, body: &str) -> String {
        format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        )
    }

    /// Answers one connection per canned response; yields the request lines seen.
    async fn portal_stub(responses: Vec<String>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let mut requests = Vec::new();
            for canned in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut received = Vec::new();
                let mut buf = [0u8; 1024];
                while !received.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    received.extend_from_slice(&buf[..n]);
                }
                let text = String::from_utf8_lossy(&received);
                requests.push(text.lines().next().unwrap_or_default().to_string());
                socket.write_all(canned.as_bytes()).await.unwrap();
                let _ = socket.shutdown().await;
            }
            requests
        });

        (format!("http://{}/ars3do/{{id}}.json", address), handle)
    }

    #[tokio::test]
    async fn test_fetch_reports_status_and_returns_body() {
        let (template, server) = portal_stub(vec![
            response("404 Not Found", ""),
            response("200 OK", r#"{"projects":[]}"#),
        ])
        .await;
        let settings = PortalSettings {
            metadata_url_template: template,
            politeness_delay_ms: 50,
            ..PortalSettings::default()
        };
        let source = HttpMetadataSource::new(&settings).unwrap();

        let started = Instant::now();
        match source.fetch("missing").await {
            Err(MetadataError::Status { object_id, status }) => {
                assert_eq!(object_id, "missing");
                assert_eq!(status, 404);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(started.elapsed() >= Duration::from_millis(50));

        let started = Instant::now();
        let body = source.fetch("A1").await.unwrap();
        assert_eq!(body, r#"{"projects":[]}"#);
        assert!(started.elapsed() >= Duration::from_millis(50));

        let requests = server.await.unwrap();
        assert_eq!(
            requests,
            vec![
                "GET /ars3do/missing.json HTTP/1.1".to_string(),
                "GET /ars3do/A1.json HTTP/1.1".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn test_unreachable_portal_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let settings = PortalSettings {
            metadata_url_template: format!("http://{}/{{id}}.json", address),
            politeness_delay_ms: 0,
            ..PortalSettings::default()
        };
        let source = HttpMetadataSource::new(&settings).unwrap();
        assert!(matches!(
            source.fetch("A1").await,
            Err(MetadataError::Transport { .. })
        ));
    }

    #[test]
    fn test_url_template_substitutes_every_occurrence() {
        let source = HttpMetadataSource::new(&PortalSettings::default()).unwrap();
        assert_eq!(
            source.url_for("abc-1"),
            "http://143.93.113.149/mntModels/rgzm/ars3do/abc-1/abc-1.json"
        );
        assert_eq!(
            source.url_for("a b"),
            "http://143.93.113.149/mntModels/rgzm/ars3do/a%20b/a%20b.json"
        );
    }
}
