//! Google Gemini `generateContent` client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::AdviceProvider;
use crate::config::AdviceConfig;
use crate::{HeatHealthError, Result};

const PROVIDER: &str = "advice";

pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl GenerateResponse {
    /// Text of the first part of the first candidate
    fn into_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .next()?
            .text
    }
}

impl GeminiClient {
    pub fn new(client: Client, config: &AdviceConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| HeatHealthError::config("advice.api_key is not set"))?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        )
    }
}

#[async_trait]
impl AdviceProvider for GeminiClient {
    #[instrument(skip_all)]
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.url())
            .json(&request)
            .send()
            .await
            .map_err(|e| HeatHealthError::transport(PROVIDER, e))?;

        let status = response.status();
        debug!("Advice provider ({}) answered {}", self.model, status);

        if !status.is_success() {
            let message = response
                .json::<ErrorEnvelope>()
                .await
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| format!("advice API answered with status {status}"));
            return Err(HeatHealthError::unavailable(
                PROVIDER,
                Some(status.as_u16()),
                message,
            ));
        }

        let body: GenerateResponse = response.json().await.map_err(|e| {
            HeatHealthError::malformed(
                PROVIDER,
                format!("Failed to parse advice response: {}", e.without_url()),
            )
        })?;

        body.into_text()
            .ok_or_else(|| HeatHealthError::malformed(PROVIDER, "No candidate text in response"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GeminiClient {
        let config = AdviceConfig {
            api_key: Some("test_gemini_key".to_string()),
            base_url: server.uri(),
            model: "gemini-2.5-flash".to_string(),
        };
        GeminiClient::new(Client::new(), &config).unwrap()
    }

    #[tokio::test]
    async fn test_complete_returns_first_candidate_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
            .and(query_param("key", "test_gemini_key"))
            .and(body_json(json!({"contents": [{"parts": [{"text": "hello"}]}]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [
                    {"content": {"parts": [{"text": "1. Drink water"}], "role": "model"}},
                    {"content": {"parts": [{"text": "ignored"}]}}
                ]
            })))
            .mount(&server)
            .await;

        let text = client_for(&server).complete("hello").await.unwrap();
        assert_eq!(text, "1. Drink water");
    }

    #[tokio::test]
    async fn test_error_status_keeps_provider_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}
            })))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("hello").await.unwrap_err();
        match err {
            HeatHealthError::ProviderUnavailable {
                status, message, ..
            } => {
                assert_eq!(status, Some(403));
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_candidates_is_malformed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("hello").await.unwrap_err();
        assert!(matches!(err, HeatHealthError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_undecodable_body_omits_api_key() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).complete("hello").await.unwrap_err();
        assert!(matches!(err, HeatHealthError::MalformedResponse { .. }));
        assert!(!err.to_string().contains("test_gemini_key"), "{err}");
    }
}
