//! OpenAI-compatible embedding provider.
//!
//! Talks to any server exposing `POST {base_url}/embeddings`: Ollama under
//! `/v1/`, llama.cpp server, vLLM, or a hosted API with a bearer key.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use wikilite_core::config::EmbeddingConfig;
use wikilite_core::errors::{EmbeddingError, WikiliteResult};
use wikilite_core::traits::IEmbeddingProvider;

/// HTTP embedding provider for OpenAI-compatible endpoints.
///
/// Every call drives its own current-thread tokio runtime, which panics when
/// entered from inside another runtime. Async callers go through
/// `tokio::task::spawn_blocking`.
pub struct OpenAiCompatProvider {
    base_url: String,
    model: String,
    api_key: String,
    dimensions: usize,
    batch_size: usize,
    timeout: Duration,
    available: AtomicBool,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Deserialize)]
struct EmbeddingDatum {
    embedding: Vec<f32>,
    #[serde(default)]
    index: usize,
}

impl OpenAiCompatProvider {
    /// Create a provider from configuration. No request is made until the
    /// first embed call or an explicit health check.
    pub fn new(config: &EmbeddingConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            dimensions: config.dimensions,
            batch_size: config.batch_size.max(1),
            timeout: Duration::from_secs(config.timeout_secs),
            available: AtomicBool::new(true),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn runtime() -> WikiliteResult<tokio::runtime::Runtime> {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                EmbeddingError::InferenceFailed {
                    reason: format!("runtime error: {e}"),
                }
                .into()
            })
    }

    fn client(&self) -> WikiliteResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                EmbeddingError::InferenceFailed {
                    reason: format!("HTTP client error: {e}"),
                }
                .into()
            })
    }

    /// Check `GET {base_url}/models` and record the outcome.
    pub fn health_check(&self) -> bool {
        let url = self.endpoint("models");
        let (Ok(rt), Ok(client)) = (Self::runtime(), self.client()) else {
            return false;
        };

        let request = self.authorized(client.get(&url));
        let ok = match rt.block_on(request.send()) {
            Ok(resp) if resp.status().is_success() => {
                debug!(model = %self.model, "embedding endpoint health check passed");
                true
            }
            Ok(resp) => {
                warn!(status = %resp.status(), "embedding endpoint health check failed");
                false
            }
            Err(e) => {
                warn!(error = %e, "embedding endpoint unreachable");
                false
            }
        };
        self.available.store(ok, Ordering::Relaxed);
        ok
    }

    fn request_embeddings(&self, texts: &[String]) -> WikiliteResult<Vec<Vec<f32>>> {
        if !self.available.load(Ordering::Relaxed) {
            return Err(EmbeddingError::ProviderUnavailable {
                provider: self.model.clone(),
            }
            .into());
        }
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = self.endpoint("embeddings");
        let rt = Self::runtime()?;
        let client = self.client()?;
        let body = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        let response: EmbeddingResponse = rt.block_on(async {
            let request = self.authorized(client.post(&url).json(&body));
            let response = request.send().await.map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("HTTP error: {e}"),
            })?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                return Err(EmbeddingError::InferenceFailed {
                    reason: format!("{url} returned {status}: {text}"),
                });
            }

            response
                .json::<EmbeddingResponse>()
                .await
                .map_err(|e| EmbeddingError::InferenceFailed {
                    reason: format!("JSON parse error: {e}"),
                })
        })?;

        let embeddings = self.validate_response(response, texts.len())?;
        debug!(count = embeddings.len(), model = %self.model, "embedded batch");
        Ok(embeddings)
    }

    /// Attach the bearer key, if one is configured.
    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if self.api_key.is_empty() {
            request
        } else {
            request.bearer_auth(&self.api_key)
        }
    }

    /// Reorder by `index`, then check the count and every dimension.
    fn validate_response(
        &self,
        response: EmbeddingResponse,
        requested: usize,
    ) -> WikiliteResult<Vec<Vec<f32>>> {
        let embeddings = order_by_index(response.data);
        if embeddings.len() != requested {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!(
                    "requested {} embeddings, received {}",
                    requested,
                    embeddings.len()
                ),
            }
            .into());
        }
        for embedding in &embeddings {
            crate::codec::validate_dimensions(embedding, self.dimensions)?;
        }
        Ok(embeddings)
    }
}

/// Responses may list items out of order; `index` is authoritative.
fn order_by_index(mut data: Vec<EmbeddingDatum>) -> Vec<Vec<f32>> {
    data.sort_by_key(|d| d.index);
    data.into_iter().map(|d| d.embedding).collect()
}

impl IEmbeddingProvider for OpenAiCompatProvider {
    fn embed(&self, text: &str) -> WikiliteResult<Vec<f32>> {
        let results = self.request_embeddings(&[text.to_string()])?;
        results.into_iter().next().ok_or_else(|| {
            EmbeddingError::InferenceFailed {
                reason: "empty embedding response".to_string(),
            }
            .into()
        })
    }

    /// Requests are split into `batch_size` groups; order is preserved.
    fn embed_batch(&self, texts: &[String]) -> WikiliteResult<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for group in texts.chunks(self.batch_size) {
            embeddings.extend(self.request_embeddings(group)?);
        }
        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        &self.model
    }

    fn is_available(&self) -> bool {
        self.available.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikilite_core::errors::WikiliteError;

    #[test]
    fn endpoint_strips_trailing_slash() {
        let provider = OpenAiCompatProvider::new(&EmbeddingConfig::default());
        assert_eq!(
            provider.endpoint("embeddings"),
            "http://localhost:11434/v1/embeddings"
        );
    }

    #[test]
    fn response_items_are_reordered_by_index() {
        let json = r#"{"data":[
            {"embedding":[2.0],"index":1},
            {"embedding":[1.0],"index":0}
        ]}"#;
        let resp: EmbeddingResponse = serde_json::from_str(json).unwrap();
        assert_eq!(order_by_index(resp.data), vec![vec![1.0], vec![2.0]]);
    }

    fn provider_with(dimensions: usize, api_key: &str) -> OpenAiCompatProvider {
        OpenAiCompatProvider::new(&EmbeddingConfig {
            dimensions,
            api_key: api_key.to_string(),
            ..Default::default()
        })
    }

    fn response(json: &str) -> EmbeddingResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn valid_response_is_ordered_and_accepted() {
        let provider = provider_with(2, "");
        let resp = response(
            r#"{"data":[{"embedding":[3.0,4.0],"index":1},{"embedding":[1.0,2.0],"index":0}]}"#,
        );
        let embeddings = provider.validate_response(resp, 2).unwrap();
        assert_eq!(embeddings, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn short_response_is_inference_error() {
        let provider = provider_with(2, "");
        let resp = response(r#"{"data":[{"embedding":[1.0,2.0],"index":0}]}"#);
        let err = provider.validate_response(resp, 2).unwrap_err();
        assert!(matches!(
            err,
            WikiliteError::Embedding(EmbeddingError::InferenceFailed { .. })
        ));
    }

    #[test]
    fn wrong_dimensions_are_rejected() {
        let provider = provider_with(3, "");
        let resp = response(r#"{"data":[{"embedding":[1.0,2.0],"index":0}]}"#);
        let err = provider.validate_response(resp, 1).unwrap_err();
        assert!(matches!(
            err,
            WikiliteError::Embedding(EmbeddingError::DimensionMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn bearer_header_only_with_api_key() {
        let client = reqwest::Client::new();
        let url = "http://localhost:11434/v1/embeddings";

        let keyed = provider_with(2, "secret");
        let request = keyed.authorized(client.post(url)).build().unwrap();
        assert_eq!(
            request.headers()[reqwest::header::AUTHORIZATION],
            "Bearer secret"
        );

        let open = provider_with(2, "");
        let request = open.authorized(client.post(url)).build().unwrap();
        assert!(request.headers().get(reqwest::header::AUTHORIZATION).is_none());
    }

    #[test]
    fn failed_health_check_marks_provider_unavailable() {
        let provider = OpenAiCompatProvider::new(&EmbeddingConfig {
            base_url: "http://127.0.0.1:9/v1".to_string(),
            timeout_secs: 1,
            ..Default::default()
        });
        assert!(provider.is_available());
        assert!(!provider.health_check());
        assert!(!provider.is_available());

        let err = provider.embed("anything").unwrap_err();
        assert!(matches!(
            err,
            WikiliteError::Embedding(EmbeddingError::ProviderUnavailable { .. })
        ));
    }

    #[test]
    fn empty_batch_makes_no_request() {
        let config = EmbeddingConfig {
            base_url: "http://127.0.0.1:9/v1".to_string(),
            ..Default::default()
        };
        let provider = OpenAiCompatProvider::new(&config);
        assert!(provider.embed_batch(&[]).unwrap().is_empty());
    }

    #[test]
    fn unreachable_server_is_inference_error() {
        let config = EmbeddingConfig {
            base_url: "http://127.0.0.1:9/v1".to_string(),
            timeout_secs: 1,
            ..Default::default()
        };
        let provider = OpenAiCompatProvider::new(&config);
        assert!(provider.embed("anything").is_err());
    }
}
