use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use super::prompt::{build_prompt, parse_response};
use super::{OutfitSuggester, OutfitSuggestion, SuggestionError, SuggestionRequest};
use crate::config::RemoteModelConfig;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Suggester backed by a generateContent-style text generation endpoint.
///
/// A single request is made per call with the configured timeout. The API key travels in a
/// header, never in the URL. Failures are reported to the caller with no retry.
pub struct RemoteSuggester {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl RemoteSuggester {
    pub fn new(config: &RemoteModelConfig) -> Result<Self, SuggestionError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl OutfitSuggester for RemoteSuggester {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn suggest(
        &self,
        request: &SuggestionRequest<'_>,
    ) -> Result<Vec<OutfitSuggestion>, SuggestionError> {
        if request.items.is_empty() {
            return Err(SuggestionError::Unavailable(
                "no wardrobe items to send".to_string(),
            ));
        }

        let body = json!({
            "contents": [{ "parts": [{ "text": build_prompt(request) }] }],
            "generationConfig": { "temperature": 0.7 },
        });

        let response = self
            .client
            .post(self.url())
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&body)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SuggestionError::Status(status.as_u16()));
        }

        let payload: Value = response.json().await.map_err(transport)?;
        let text = candidate_text(&payload).ok_or_else(|| {
            SuggestionError::Malformed("response has no candidate text".to_string())
        })?;
        debug!(model = %self.model, chars = text.len(), "received generated outfits");

        parse_response(&text, request.items)
    }
}

// Error text must never carry the request URL.
fn transport(err: reqwest::Error) -> SuggestionError {
    SuggestionError::Transport(err.without_url())
}

fn candidate_text(payload: &Value) -> Option<String> {
    let parts = payload
        .get("candidates")?
        .get(0)?
        .get("content")?
        .get("parts")?
        .as_array()?;

    let text: String = parts
        .iter()
        .filter_map(|part| part.get("text").and_then(Value::as_str))
        .collect();

    (!text.trim().is_empty()).then_some(text)
}
