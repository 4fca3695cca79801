//! AnthropicSubmitter: sends a request document to the Anthropic Messages
//! API (`/v1/messages`) and returns the generated plan text.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is only exposed
//! when building the request headers.

use std::path::PathBuf;
use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretString};

use deckorator_core::submission::{api_prompt, media_type};
use deckorator_types::config::SubmissionConfig;
use deckorator_types::error::SubmissionError;

use super::types::{ContentBlock, ImageSource, Message, MessagesRequest, MessagesResponse};

/// Client for one-shot plan generation requests.
///
/// Does not derive `Debug`, so the client state never ends up in logs.
pub struct AnthropicSubmitter {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicSubmitter {
    /// The Anthropic API version header value.
    const API_VERSION: &'static str = "2023-06-01";

    pub fn new(api_key: SecretString, config: &SubmissionConfig) -> Result<Self, SubmissionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SubmissionError::Http(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// One user message: the document text followed by the photos.
    pub fn build_request(&self, document: &str, photos: Vec<ImageSource>) -> MessagesRequest {
        let mut content = vec![ContentBlock::Text {
            text: api_prompt(document),
        }];
        content.extend(photos.into_iter().map(|source| ContentBlock::Image { source }));

        MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user".to_string(),
                content,
            }],
        }
    }

    pub async fn submit(&self, request: &MessagesRequest) -> Result<String, SubmissionError> {
        let response = self
            .client
            .post(self.url("/v1/messages"))
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", Self::API_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| SubmissionError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), body));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| SubmissionError::Deserialization(e.to_string()))?;
        let text = parsed.text();
        if text.trim().is_empty() {
            return Err(SubmissionError::EmptyResponse);
        }
        tracing::debug!(chars = text.len(), "received plan text");
        Ok(text)
    }
}

fn status_error(status: u16, body: String) -> SubmissionError {
    match status {
        401 => SubmissionError::AuthenticationFailed,
        429 => SubmissionError::RateLimited,
        _ => SubmissionError::Api { status, body },
    }
}

/// Read and base64-encode up to `limit` photos. Unreadable files and
/// unknown image types are skipped with a warning.
pub async fn load_photo_attachments(paths: &[PathBuf], limit: usize) -> Vec<ImageSource> {
    let mut attachments = Vec::new();
    for path in paths.iter().take(limit) {
        let Some(media_type) = media_type(path) else {
            tracing::warn!("Skipping {}: unsupported image type", path.display());
            continue;
        };
        match tokio::fs::read(path).await {
            Ok(bytes) => attachments.push(ImageSource::base64(media_type, STANDARD.encode(bytes))),
            Err(err) => tracing::warn!("Couldn't read {}: {err}", path.display()),
        }
    }
    attachments
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn submitter(base_url: &str) -> AnthropicSubmitter {
        let config = SubmissionConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            ..SubmissionConfig::default()
        };
        let mut submitter =
            AnthropicSubmitter::new(SecretString::from("sk-test".to_string()), &config).unwrap();
        // The canned server is local; keep any proxy from the environment out of the way.
        submitter.client = reqwest::Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        submitter
    }

    /// Serve a single canned HTTP response and hand back the raw request.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&raw);
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if raw.len() >= end + 4 + length {
                        break;
                    }
                }
            }
            let response = format!(
                "{status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&raw).into_owned()
        });
        (base_url, handle)
    }

    #[test]
    fn build_request_puts_text_before_photos() {
        let submitter = submitter("https://api.anthropic.com/");
        let request = submitter.build_request(
            "<deck_plan_request/>",
            vec![ImageSource::base64("image/jpeg", "AAAA".to_string())],
        );
        assert_eq!(request.model, "claude-sonnet-4-20250514");
        assert_eq!(request.max_tokens, 4000);
        let content = &request.messages[0].content;
        assert_eq!(content.len(), 2);
        assert!(matches!(&content[0], ContentBlock::Text { text } if text.ends_with("<deck_plan_request/>")));
        assert!(matches!(&content[1], ContentBlock::Image { .. }));
        assert_eq!(submitter.url("/v1/messages"), "https://api.anthropic.com/v1/messages");
    }

    #[test]
    fn status_codes_map_to_errors() {
        assert!(matches!(status_error(401, String::new()), SubmissionError::AuthenticationFailed));
        assert!(matches!(status_error(429, String::new()), SubmissionError::RateLimited));
        assert!(matches!(
            status_error(500, "boom".to_string()),
            SubmissionError::Api { status: 500, body } if body == "boom"
        ));
    }

    #[tokio::test]
    async fn submit_returns_response_text() {
        let (base_url, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"content":[{"type":"text","text":"Dig 6 footings."}]}"#,
        )
        .await;
        let submitter = submitter(&base_url);
        let request = submitter.build_request("<deck_plan_request/>", Vec::new());

        let text = submitter.submit(&request).await.unwrap();
        assert_eq!(text, "Dig 6 footings.");

        let raw = server.await.unwrap().to_lowercase();
        assert!(raw.starts_with("post /v1/messages"));
        assert!(raw.contains("x-api-key: sk-test"));
        assert!(raw.contains("anthropic-version: 2023-06-01"));
    }

    #[tokio::test]
    async fn submit_maps_unauthorized() {
        let (base_url, server) =
            serve_once("HTTP/1.1 401 Unauthorized", r#"{"error":"invalid x-api-key"}"#).await;
        let submitter = submitter(&base_url);
        let request = submitter.build_request("<deck_plan_request/>", Vec::new());

        let err = submitter.submit(&request).await.unwrap_err();
        assert!(matches!(err, SubmissionError::AuthenticationFailed));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn load_photo_attachments_respects_limit_and_skips_unreadable() {
        let dir = tempdir().unwrap();
        let mut paths = Vec::new();
        for name in ["a.jpg", "b.png", "c.gif"] {
            let path = dir.path().join(name);
            tokio::fs::write(&path, b"img").await.unwrap();
            paths.push(path);
        }
        paths.insert(0, dir.path().join("missing.jpg"));

        let attachments = load_photo_attachments(&paths, 3).await;
        assert_eq!(attachments.len(), 2);
        assert_eq!(attachments[0].media_type, "image/jpeg");
        assert_eq!(attachments[0].data, STANDARD.encode(b"img"));
        assert_eq!(attachments[1].media_type, "image/png");
    }
}
