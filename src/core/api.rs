//! Client for the project generator API.
//!
//! Every transport problem (connection, timeout, non-success status, broken
//! body) surfaces as [`WizardError::DownloadFailed`]; the cause is only logged.

use crate::core::config::Config;
use crate::core::extension::{self, QExtension};
use crate::core::state::ProjectGenState;
use crate::error::{Result, WizardError};
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("quarkus-wizard/", env!("CARGO_PKG_VERSION"));

pub struct QuarkusApi {
    client: reqwest::Client,
    api_url: String,
    catalog_timeout: Duration,
}

impl QuarkusApi {
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(
            &config.api_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn with_base_url(api_url: &str, catalog_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                tracing::debug!("Failed to create HTTP client: {e}");
                WizardError::DownloadFailed
            })?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            catalog_timeout,
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Fetch the extension catalog, without duplicates, sorted by name.
    pub async fn fetch_catalog(&self) -> Result<Vec<QExtension>> {
        let url = format!("{}/extensions", self.api_url);
        tracing::info!("Fetching extension catalog from {url}");

        let body = self
            .get(&url, Some(self.catalog_timeout))
            .await?
            .text()
            .await
            .map_err(transport_error)?;

        let extensions = extension::parse_catalog(&body)?;
        tracing::debug!("Catalog contains {} extensions", extensions.len());
        Ok(extensions)
    }

    /// Download URL for the project described by `state`.
    ///
    /// Extensions become repeated `e` parameters in selection order.
    pub fn download_url(&self, state: &ProjectGenState) -> Result<Url> {
        let mut url = Url::parse(&format!("{}/download", self.api_url))
            .map_err(|e| WizardError::config_error(format!("invalid API URL '{}': {e}", self.api_url)))?;

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("g", &state.group_id)
                .append_pair("a", &state.artifact_id)
                .append_pair("v", &state.project_version)
                .append_pair(
                    "c",
                    &format!("{}.{}", state.package_name, state.resource_name),
                );
            for extension in &state.state.extensions {
                query.append_pair("e", &extension.coordinates());
            }
        }

        Ok(url)
    }

    /// Download the generated project archive.
    pub async fn fetch_archive(&self, state: &ProjectGenState) -> Result<Vec<u8>> {
        let url = self.download_url(state)?;
        tracing::info!("Downloading project from {url}");

        let bytes = self
            .get(url.as_str(), None)
            .await?
            .bytes()
            .await
            .map_err(transport_error)?;

        tracing::debug!("Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }

    async fn get(&self, url: &str, timeout: Option<Duration>) -> Result<reqwest::Response> {
        let mut request = self.client.get(url);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }

        request
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(transport_error)
    }
}

fn transport_error(error: reqwest::Error) -> WizardError {
    tracing::debug!("Request failed: {error}");
    WizardError::DownloadFailed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::extension::QExtension;
    use pretty_assertions::assert_eq;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned response and hand back the request line that was received.
    async fn serve_once(status: &'static str, body: Vec<u8>) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
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

            let header = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            socket.write_all(header.as_bytes()).await.unwrap();
            socket.write_all(&body).await.unwrap();
            socket.shutdown().await.ok();

            String::from_utf8_lossy(&received)
                .lines()
                .next()
                .unwrap_or_default()
                .to_string()
        });

        (format!("http://{addr}/api"), handle)
    }

    fn api(base: &str) -> QuarkusApi {
        QuarkusApi::with_base_url(base, Duration::from_secs(5)).unwrap()
    }

    fn sample_state() -> ProjectGenState {
        let mut state = ProjectGenState::new(7);
        state.group_id = "org.acme".to_string();
        state.artifact_id = "demo".to_string();
        state.project_version = "1.0.0-SNAPSHOT".to_string();
        state.package_name = "org.acme".to_string();
        state.resource_name = "GreetingResource".to_string();
        for artifact in ["quarkus-resteasy", "quarkus-arc"] {
            state.state.extensions.push(QExtension {
                name: artifact.to_string(),
                group_id: "io.quarkus".to_string(),
                artifact_id: artifact.to_string(),
                ..Default::default()
            });
        }
        state
    }

    #[test]
    fn test_download_url_repeats_extension_key() {
        let url = api("https://code.quarkus.io/api/")
            .download_url(&sample_state())
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://code.quarkus.io/api/download?g=org.acme&a=demo&v=1.0.0-SNAPSHOT\
             &c=org.acme.GreetingResource&e=io.quarkus%3Aquarkus-resteasy&e=io.quarkus%3Aquarkus-arc"
        );

        let extensions: Vec<String> = url
            .query_pairs()
            .filter(|(k, _)| k == "e")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(
            extensions,
            vec!["io.quarkus:quarkus-resteasy", "io.quarkus:quarkus-arc"]
        );
    }

    #[test]
    fn test_download_url_without_extensions() {
        let mut state = sample_state();
        state.state.extensions.clear();
        let url = api("http://localhost/api").download_url(&state).unwrap();
        assert!(url.query_pairs().all(|(k, _)| k != "e"));
    }

    #[tokio::test]
    async fn test_fetch_catalog_dedupes_and_sorts() {
        let body = br#"[
            {"id": "io.quarkus:a", "name": "Zeta"},
            {"id": "io.quarkus:b", "name": "Alpha"},
            {"id": "io.quarkus:a", "name": "Duplicate"}
        ]"#
        .to_vec();
        let (base, server) = serve_once("200 OK", body).await;

        let catalog = api(&base).fetch_catalog().await.unwrap();
        let names: Vec<_> = catalog.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /api/extensions "));
    }

    #[tokio::test]
    async fn test_fetch_archive_returns_bytes() {
        let (base, server) = serve_once("200 OK", vec![0x50, 0x4b, 0x05, 0x06]).await;

        let bytes = api(&base).fetch_archive(&sample_state()).await.unwrap();
        assert_eq!(bytes, vec![0x50, 0x4b, 0x05, 0x06]);

        let request_line = server.await.unwrap();
        assert!(request_line.starts_with("GET /api/download?g=org.acme&a=demo"));
    }

    #[tokio::test]
    async fn test_error_status_is_download_failure() {
        let (base, _server) = serve_once("500 Internal Server Error", b"boom".to_vec()).await;

        let result = api(&base).fetch_archive(&sample_state()).await;
        assert!(matches!(result, Err(WizardError::DownloadFailed)));
    }

    #[tokio::test]
    async fn test_silent_catalog_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        // Accept and keep the connection open without ever answering
        let _server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
            drop(socket);
        });

        let client =
            QuarkusApi::with_base_url(&format!("http://{addr}/api"), Duration::from_millis(200))
                .unwrap();
        let result = tokio::time::timeout(Duration::from_secs(5), client.fetch_catalog())
            .await
            .expect("catalog request was not bounded by its timeout");

        assert!(matches!(result, Err(WizardError::DownloadFailed)));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_download_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = api(&format!("http://{addr}/api"));
        let catalog = client.fetch_catalog().await;
        let archive = client.fetch_archive(&sample_state()).await;

        for result in [catalog.map(|_| ()), archive.map(|_| ())] {
            match result {
                Err(e) => {
                    assert!(matches!(e, WizardError::DownloadFailed));
                    assert!(!e.is_navigation());
                    assert_eq!(e.to_string(), "Unable to download Quarkus project.");
                }
                Ok(()) => panic!("expected a download failure"),
            }
        }
    }
}
