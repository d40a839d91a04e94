use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::config::AdvisorConfig;
use crate::domain::{fallback_advice, AdviceIntent, ApiKey, Destination, DomainError};
use crate::ports::{Advisor, AdvisorStatus, HttpClient};

/// Settings for the chat completions backend.
#[derive(Debug, Clone)]
pub struct AdvisorSettings {
    pub model: String,
    pub base_url: String,
    pub itinerary_max_tokens: u32,
    pub budget_tips_max_tokens: u32,
    pub temperature: f32,
    pub validate_on_startup: bool,
}

impl From<&AdvisorConfig> for AdvisorSettings {
    fn from(config: &AdvisorConfig) -> Self {
        Self {
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            itinerary_max_tokens: config.itinerary_max_tokens,
            budget_tips_max_tokens: config.budget_tips_max_tokens,
            temperature: config.temperature,
            validate_on_startup: config.validate_on_startup,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Advisor backed by an OpenAI-compatible chat completions API.
///
/// Without a usable key every call answers with the offline template.
pub struct OpenAiAdvisor<H: HttpClient> {
    http: H,
    settings: AdvisorSettings,
    api_key: Option<ApiKey>,
    status: AdvisorStatus,
}

impl<H: HttpClient> OpenAiAdvisor<H> {
    /// Build an advisor that never contacts the API.
    pub fn offline(http: H, settings: AdvisorSettings) -> Self {
        Self::disabled(http, settings, AdvisorStatus::Offline)
    }

    fn disabled(http: H, settings: AdvisorSettings, status: AdvisorStatus) -> Self {
        Self {
            http,
            settings,
            api_key: None,
            status,
        }
    }

    /// Build an advisor from a resolved credential.
    ///
    /// A missing credential or a key rejected by the startup check leaves the
    /// advisor in template mode. Other check failures keep the key.
    pub async fn connect(
        http: H,
        settings: AdvisorSettings,
        credential: Result<ApiKey, DomainError>,
    ) -> Self {
        let api_key = match credential {
            Ok(key) => key,
            Err(e) => {
                warn!(error = %e, "AI features disabled");
                return Self::disabled(http, settings, AdvisorStatus::MissingKey);
            }
        };

        let mut advisor = Self::disabled(http, settings, AdvisorStatus::KeyRejected);

        if advisor.settings.validate_on_startup {
            match advisor.check_key(&api_key).await {
                Ok(()) => info!(model = %advisor.settings.model, "OpenAI API key validated"),
                Err(DomainError::AdvisoryAuth) => {
                    warn!("OpenAI API key rejected, AI features disabled");
                    return advisor;
                }
                Err(e) => warn!(error = %e, "Could not validate OpenAI API key"),
            }
        }

        advisor.api_key = Some(api_key);
        advisor.status = AdvisorStatus::Ready;
        advisor
    }

    async fn check_key(&self, api_key: &ApiKey) -> Result<(), DomainError> {
        self.chat(api_key, vec![ChatMessage::new("user", "Hello")], 5)
            .await
            .map(|_| ())
    }

    async fn chat(
        &self,
        api_key: &ApiKey,
        messages: Vec<ChatMessage>,
        max_tokens: u32,
    ) -> Result<String, DomainError> {
        let request = ChatRequest {
            model: &self.settings.model,
            messages,
            max_tokens,
            temperature: self.settings.temperature,
        };

        debug!(model = %self.settings.model, max_tokens, "Sending chat completion request");

        let url = format!("{}/chat/completions", self.settings.base_url);
        let response: ChatResponse = self
            .http
            .post_json(&url, api_key, &request)
            .await
            .map_err(classify_error)?;

        response
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| DomainError::HttpRequest("No choices in OpenAI response".to_string()))
    }

    fn messages_for(&self, destination: &Destination, intent: AdviceIntent) -> (Vec<ChatMessage>, u32) {
        let activities = destination.activities().join(", ");
        match intent {
            AdviceIntent::Itinerary => {
                let prompt = format!(
                    "Create a detailed daily travel itinerary for {}, {}\n\
                     from {} to {}.\n\
                     Budget: ${:.2} USD.\n\
                     Preferred Activities: {}.\n\n\
                     Please provide:\n\
                     1. Day-by-day schedule\n\
                     2. Estimated costs for major activities\n\
                     3. Restaurant recommendations\n\
                     4. Transportation tips\n\
                     5. Must-see attractions\n\n\
                     Format the response in a clear, organized manner.",
                    destination.city(),
                    destination.country(),
                    destination.start_date(),
                    destination.end_date(),
                    destination.budget(),
                    activities,
                );
                (
                    vec![
                        ChatMessage::new("system", "You are a helpful travel planning assistant."),
                        ChatMessage::new("user", prompt),
                    ],
                    self.settings.itinerary_max_tokens,
                )
            }
            AdviceIntent::BudgetTips => {
                let prompt = format!(
                    "Provide money-saving tips and budget advice for traveling to {}, {}.\n\
                     Budget: ${:.2} USD.\n\
                     Activities: {}.\n\n\
                     Include:\n\
                     1. Budget-friendly accommodation options\n\
                     2. Cheap local food recommendations\n\
                     3. Free or low-cost activities\n\
                     4. Transportation savings\n\
                     5. General money-saving tips for this destination\n\n\
                     Keep it practical and specific to this location.",
                    destination.city(),
                    destination.country(),
                    destination.budget(),
                    activities,
                );
                (
                    vec![
                        ChatMessage::new("system", "You are a budget travel expert."),
                        ChatMessage::new("user", prompt),
                    ],
                    self.settings.budget_tips_max_tokens,
                )
            }
        }
    }
}

/// Map API status codes onto advisory errors.
fn classify_error(err: DomainError) -> DomainError {
    match err {
        DomainError::HttpStatus { status: 401, .. } => DomainError::AdvisoryAuth,
        DomainError::HttpStatus { status: 429, .. } => DomainError::AdvisoryRateLimited,
        other => other,
    }
}

#[async_trait]
impl<H: HttpClient> Advisor for OpenAiAdvisor<H> {
    fn status(&self) -> AdvisorStatus {
        self.status
    }

    async fn generate(
        &self,
        destination: &Destination,
        intent: AdviceIntent,
    ) -> Result<String, DomainError> {
        let Some(api_key) = &self.api_key else {
            debug!(intent = %intent, "AI unavailable, using offline template");
            return Ok(fallback_advice(destination, intent));
        };

        let (messages, max_tokens) = self.messages_for(destination, intent);
        let text = self.chat(api_key, messages, max_tokens).await?;
        info!(intent = %intent, city = destination.city(), "Advice generated");
        Ok(text)
    }
}
