//! Generative assistant for visitors and the admin console.
//!
//! The assistant never fails a request: provider errors, a missing API key
//! or an empty answer all degrade to a fixed message.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tvk_common::config::AssistantConfig;
use tvk_common::{AppError, AppResult};
use url::Url;

/// Shown when the assistant cannot answer a visitor.
pub const ASK_FALLBACK: &str =
    "I am currently unable to process your request. Please try again later. Jai Hind!";

/// Shown when the model returns no text for a visitor question.
pub const EMPTY_ANSWER: &str = "I am currently unable to process your request.";

/// Used when no suggestion reply could be drafted.
pub const DRAFT_FALLBACK: &str =
    "Thank you for your valuable contribution to the TVK Vision. Our team will review this shortly.";

/// Used when the model returns no text for a suggestion reply.
pub const EMPTY_DRAFT: &str = "Thank you for your valuable suggestion. We will review it shortly.";

const ASSISTANT_INSTRUCTION: &str = "You are the Official TVK (Tamizhaga Vettri Kazhagam) AI Assistant. \
TVK is a new political party in Tamil Nadu, India, founded by Vijay. \
The party's core principles are Equality, Secularism, Social Justice, and Progress. \
Always emphasize the slogan 'Pirappokkum Ella Uyirkkum' (All are equal by birth). \
Use search to provide real-time updates on party news, Tamil Nadu current affairs, and membership stats if requested. \
Your tone: Professional, patriotic, and respectful.";

const DRAFTER_INSTRUCTION: &str = "You are the AI Communications Officer for the TVK party. \
Your style is professional, inclusive, and forward-thinking.";

/// External knowledge the model may consult.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Grounding {
    None,
    Search,
    Maps { latitude: f64, longitude: f64 },
}

/// One call to a generative model.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system_instruction: Option<String>,
    pub grounding: Grounding,
}

/// A cited source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLink {
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Model output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Generation {
    pub text: Option<String>,
    pub links: Vec<SourceLink>,
}

/// Reply shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantReply {
    pub text: String,
    pub links: Vec<SourceLink>,
    /// Whether the answer drew on live search results.
    pub grounded: bool,
}

impl AssistantReply {
    fn fallback() -> Self {
        Self {
            text: ASK_FALLBACK.to_string(),
            links: Vec::new(),
            grounded: false,
        }
    }
}

/// Generative model provider.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Run one generation.
    async fn generate(&self, request: GenerationRequest) -> AppResult<Generation>;
}

/// Client for the Gemini `generateContent` REST API.
#[derive(Clone)]
pub struct GeminiClient {
    http_client: reqwest::Client,
    endpoint: Url,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client from configuration.
    pub fn from_config(config: &AssistantConfig, api_key: String) -> AppResult<Self> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| AppError::Config(format!("Invalid assistant endpoint: {e}")))?;
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            endpoint,
            model: config.model.clone(),
            api_key,
        })
    }

    fn request_url(&self) -> AppResult<Url> {
        self.endpoint
            .join(&format!("models/{}:generateContent", self.model))
            .map_err(|e| AppError::Config(format!("Invalid assistant model path: {e}")))
    }

    fn request_body(request: &GenerationRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "contents": [
                {"role": "user", "parts": [{"text": request.prompt}]}
            ],
        });

        if let Some(instruction) = &request.system_instruction {
            body["systemInstruction"] = serde_json::json!({"parts": [{"text": instruction}]});
        }

        match request.grounding {
            Grounding::None => {}
            Grounding::Search => {
                body["tools"] = serde_json::json!([{"google_search": {}}]);
            }
            Grounding::Maps {
                latitude,
                longitude,
            } => {
                body["tools"] = serde_json::json!([{"google_maps": {}}]);
                body["toolConfig"] = serde_json::json!({
                    "retrievalConfig": {
                        "latLng": {"latitude": latitude, "longitude": longitude}
                    }
                });
            }
        }

        body
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    grounding_metadata: Option<GeminiGrounding>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiGrounding {
    #[serde(default)]
    grounding_chunks: Vec<GeminiChunk>,
}

#[derive(Debug, Deserialize)]
struct GeminiChunk {
    web: Option<GeminiSource>,
    maps: Option<GeminiSource>,
}

#[derive(Debug, Deserialize)]
struct GeminiSource {
    uri: Option<String>,
    title: Option<String>,
}

impl From<GeminiResponse> for Generation {
    fn from(response: GeminiResponse) -> Self {
        let Some(candidate) = response.candidates.into_iter().next() else {
            return Self::default();
        };

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        let links = candidate
            .grounding_metadata
            .map(|g| g.grounding_chunks)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|chunk| chunk.web.or(chunk.maps))
            .filter_map(|source| {
                source.uri.map(|uri| SourceLink {
                    uri,
                    title: source.title,
                })
            })
            .collect();

        Self {
            text: (!text.trim().is_empty()).then_some(text),
            links,
        }
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(&self, request: GenerationRequest) -> AppResult<Generation> {
        let url = self.request_url()?;
        let body = Self::request_body(&request);

        let response = self
            .http_client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Gemini request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Gemini API error: {status} - {body}"
            )));
        }

        let parsed: GeminiResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse Gemini response: {e}"))
        })?;

        Ok(parsed.into())
    }
}

/// Assistant service.
#[derive(Clone, Default)]
pub struct AssistantService {
    client: Option<Arc<dyn GenerativeClient>>,
}

impl AssistantService {
    /// Create an assistant backed by `client`.
    #[must_use]
    pub fn new(client: Arc<dyn GenerativeClient>) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// An assistant that always answers with the fallback message.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Build the assistant from configuration. Disabled when turned off or
    /// when no API key is configured.
    pub fn from_config(config: &AssistantConfig) -> AppResult<Self> {
        if !config.enabled {
            tracing::info!("Assistant disabled");
            return Ok(Self::disabled());
        }
        let Some(api_key) = config.api_key.clone().filter(|k| !k.is_empty()) else {
            tracing::warn!("Assistant enabled without an API key, using fallback replies");
            return Ok(Self::disabled());
        };

        let client = GeminiClient::from_config(config, api_key)?;
        tracing::info!(model = %config.model, "Assistant enabled");
        Ok(Self::new(Arc::new(client)))
    }

    /// Whether a model is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// Answer a visitor question, citing search results when available.
    pub async fn ask(&self, prompt: &str) -> AssistantReply {
        let prompt = prompt.trim();
        let Some(client) = &self.client else {
            return AssistantReply::fallback();
        };
        if prompt.is_empty() {
            return AssistantReply::fallback();
        }

        let request = GenerationRequest {
            prompt: prompt.to_string(),
            system_instruction: Some(ASSISTANT_INSTRUCTION.to_string()),
            grounding: Grounding::Search,
        };

        match client.generate(request).await {
            Ok(generation) => AssistantReply {
                grounded: !generation.links.is_empty(),
                text: generation.text.unwrap_or_else(|| EMPTY_ANSWER.to_string()),
                links: generation.links,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Assistant request failed");
                AssistantReply::fallback()
            }
        }
    }

    /// Draft a leadership reply to a member's manifesto suggestion.
    pub async fn draft_suggestion_response(&self, suggestion: &str) -> String {
        let Some(client) = &self.client else {
            return DRAFT_FALLBACK.to_string();
        };

        let prompt = format!(
            "User Suggestion: \"{suggestion}\"\n\
             Draft a professional and encouraging response from the TVK leadership.\n\
             The response should:\n\
             1. Thank the user for their contribution.\n\
             2. Briefly explain how this suggestion aligns with TVK's vision of social justice, progress, or equality.\n\
             3. Assure them it will be reviewed by the policy committee.\n\
             Keep it concise (max 3 sentences)."
        );
        let request = GenerationRequest {
            prompt,
            system_instruction: Some(DRAFTER_INSTRUCTION.to_string()),
            grounding: Grounding::None,
        };

        match client.generate(request).await {
            Ok(generation) => generation.text.unwrap_or_else(|| EMPTY_DRAFT.to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "Suggestion draft failed");
                DRAFT_FALLBACK.to_string()
            }
        }
    }

    /// Find party offices and venues near a location. `None` when the
    /// lookup is unavailable or fails.
    pub async fn nearby_offices(&self, latitude: f64, longitude: f64) -> Option<AssistantReply> {
        let client = self.client.as_ref()?;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return None;
        }

        let request = GenerationRequest {
            prompt: format!(
                "Find the official TVK (Tamizhaga Vettri Kazhagam) party offices or major landmark venues near these coordinates: {latitude}, {longitude}"
            ),
            system_instruction: None,
            grounding: Grounding::Maps {
                latitude,
                longitude,
            },
        };

        match client.generate(request).await {
            Ok(generation) => Some(AssistantReply {
                grounded: !generation.links.is_empty(),
                text: generation.text.unwrap_or_else(|| EMPTY_ANSWER.to_string()),
                links: generation.links,
            }),
            Err(e) => {
                tracing::warn!(error = %e, "Nearby office lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::Mutex;

    /// Returns a canned result and remembers the last request.
    struct FakeClient {
        result: Mutex<Option<AppResult<Generation>>>,
        last: Mutex<Option<GenerationRequest>>,
    }

    impl FakeClient {
        fn new(result: AppResult<Generation>) -> Arc<Self> {
            Arc::new(Self {
                result: Mutex::new(Some(result)),
                last: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl GenerativeClient for FakeClient {
        async fn generate(&self, request: GenerationRequest) -> AppResult<Generation> {
            *self.last.lock().await = Some(request);
            self.result
                .lock()
                .await
                .take()
                .unwrap_or_else(|| Ok(Generation::default()))
        }
    }

    fn link() -> SourceLink {
        SourceLink {
            uri: "https://example.org/news".to_string(),
            title: Some("Party news".to_string()),
        }
    }

    #[tokio::test]
    async fn test_ask_returns_text_and_links() {
        let client = FakeClient::new(Ok(Generation {
            text: Some("The conference is on Sunday.".to_string()),
            links: vec![link()],
        }));
        let assistant = AssistantService::new(client.clone());

        let reply = assistant.ask("When is the conference?").await;

        assert_eq!(reply.text, "The conference is on Sunday.");
        assert_eq!(reply.links, vec![link()]);
        assert!(reply.grounded);

        let request = client.last.lock().await.clone().unwrap();
        assert_eq!(request.grounding, Grounding::Search);
        assert!(request.system_instruction.unwrap().contains("Pirappokkum"));
    }

    #[tokio::test]
    async fn test_ask_degrades_on_failure() {
        let client = FakeClient::new(Err(AppError::ExternalService("timeout".to_string())));
        let assistant = AssistantService::new(client);

        let reply = assistant.ask("Hello").await;

        assert_eq!(reply, AssistantReply::fallback());
    }

    #[tokio::test]
    async fn test_ask_without_text_uses_short_message() {
        let assistant = AssistantService::new(FakeClient::new(Ok(Generation::default())));

        let reply = assistant.ask("Hello").await;

        assert_eq!(reply.text, EMPTY_ANSWER);
        assert!(!reply.grounded);
    }

    #[tokio::test]
    async fn test_disabled_assistant_falls_back() {
        let assistant = AssistantService::from_config(&AssistantConfig::default()).unwrap();

        assert!(!assistant.is_enabled());
        assert_eq!(assistant.ask("Hello").await.text, ASK_FALLBACK);
        assert_eq!(
            assistant.draft_suggestion_response("More parks").await,
            DRAFT_FALLBACK
        );
        assert!(assistant.nearby_offices(13.08, 80.27).await.is_none());
    }

    #[tokio::test]
    async fn test_draft_quotes_suggestion() {
        let client = FakeClient::new(Ok(Generation {
            text: Some("Thank you for the idea.".to_string()),
            links: Vec::new(),
        }));
        let assistant = AssistantService::new(client.clone());

        let draft = assistant.draft_suggestion_response("More parks").await;

        assert_eq!(draft, "Thank you for the idea.");
        let request = client.last.lock().await.clone().unwrap();
        assert!(request.prompt.contains("\"More parks\""));
        assert_eq!(request.grounding, Grounding::None);
    }

    #[test]
    fn test_gemini_response_extracts_text_and_sources() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "Hello "}, {"text": "Chennai"}]},
                "groundingMetadata": {"groundingChunks": [
                    {"web": {"uri": "https://a.example", "title": "A"}},
                    {"maps": {"uri": "https://maps.example/b"}},
                    {"web": {"title": "no uri"}}
                ]}
            }]
        });
        let response: GeminiResponse = serde_json::from_value(raw).unwrap();

        let generation = Generation::from(response);

        assert_eq!(generation.text.as_deref(), Some("Hello Chennai"));
        assert_eq!(generation.links.len(), 2);
        assert_eq!(generation.links[1].uri, "https://maps.example/b");
    }

    #[test]
    fn test_gemini_request_body_for_maps() {
        let body = GeminiClient::request_body(&GenerationRequest {
            prompt: "offices".to_string(),
            system_instruction: None,
            grounding: Grounding::Maps {
                latitude: 13.0,
                longitude: 80.0,
            },
        });

        assert_eq!(body["tools"][0], serde_json::json!({"google_maps": {}}));
        assert_eq!(body["toolConfig"]["retrievalConfig"]["latLng"]["latitude"], 13.0);
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn test_gemini_request_url() {
        let client = GeminiClient::from_config(&AssistantConfig::default(), "key".to_string())
            .unwrap();
        assert_eq!(
            client.request_url().unwrap().as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
