use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::TextGenerator;
use crate::config::GeminiConfig;
use crate::http_client::{HttpAuth, HttpClient, HttpRequest, ReqwestHttpClient};
use crate::provider::SourceError;

/// Gemini `generateContent` adapter.
#[derive(Clone)]
pub struct GeminiAdapter {
    http_client: Arc<dyn HttpClient>,
    config: GeminiConfig,
}

impl GeminiAdapter {
    pub fn new(config: GeminiConfig) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::default()), config)
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: GeminiConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn generate_content(&self, prompt: &str) -> Result<String, SourceError> {
        if self.config.api_key.is_empty() {
            return Err(SourceError::text_generation("gemini api key is not configured"));
        }

        let body = serde_json::to_string(&GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_owned(),
                }],
            }],
        })
        .map_err(|error| SourceError::text_generation(error.to_string()))?;

        let auth = HttpAuth::Header {
            name: String::from("x-goog-api-key"),
            value: self.config.api_key.expose().to_owned(),
        };
        let request = HttpRequest::post(self.endpoint())
            .with_auth(&auth)
            .with_json_body(body)
            .with_timeout_ms(self.config.timeout_ms);

        debug!(model = %self.config.model, "gemini request");

        let response = self.http_client.execute(request).await.map_err(|error| {
            if error.timed_out() {
                SourceError::text_generation(format!(
                    "gemini request timed out after {} ms",
                    self.config.timeout_ms
                ))
            } else {
                SourceError::text_generation(format!(
                    "gemini transport error: {}",
                    error.message()
                ))
            }
        })?;

        let parsed = serde_json::from_str::<GenerateContentResponse>(&response.body);

        if !response.is_success() {
            let detail = parsed
                .ok()
                .and_then(|body| body.error)
                .map(|error| error.message)
                .unwrap_or_else(|| format!("status {}", response.status));
            return Err(SourceError::text_generation(format!(
                "gemini returned error: {detail}"
            )));
        }

        let parsed = parsed.map_err(|error| {
            SourceError::text_generation(format!("failed to parse gemini response: {error}"))
        })?;

        if let Some(error) = parsed.error {
            return Err(SourceError::text_generation(format!(
                "gemini returned error: {}",
                error.message
            )));
        }

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(SourceError::text_generation("gemini returned no text"));
        }

        Ok(text)
    }
}

impl TextGenerator for GeminiAdapter {
    fn generate<'a>(
        &'a self,
        prompt: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<String, SourceError>> + Send + 'a>> {
        Box::pin(async move { self.generate_content(prompt).await })
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    #[serde(default)]
    message: String,
}
