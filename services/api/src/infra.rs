use async_trait::async_trait;
use interview_feedback::config::AppConfig;
use interview_feedback::error::AppError;
use interview_feedback::workflows::feedback::{
    DisabledClient, FeedbackService, GeminiClient, InterviewPromptBuilder, TextGenerationClient,
    TextGenerationError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Text-generation client chosen from configuration at startup.
pub(crate) enum ConfiguredClient {
    Gemini(GeminiClient),
    Disabled(DisabledClient),
}

impl ConfiguredClient {
    pub(crate) fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        if !config.text_generation.is_enabled() {
            info!("GEMINI_API_KEY not set; feedback will use computed values only");
            return Ok(Self::Disabled(DisabledClient));
        }

        let client = GeminiClient::new(&config.text_generation)?;
        info!(endpoint = client.endpoint(), "text generation enabled");
        Ok(Self::Gemini(client))
    }
}

#[async_trait]
impl TextGenerationClient for ConfiguredClient {
    async fn generate_content(&self, prompt: &str) -> Result<String, TextGenerationError> {
        match self {
            Self::Gemini(client) => client.generate_content(prompt).await,
            Self::Disabled(client) => client.generate_content(prompt).await,
        }
    }
}

pub(crate) type AppFeedbackService = FeedbackService<ConfiguredClient, InterviewPromptBuilder>;

pub(crate) fn build_feedback_service(
    config: &AppConfig,
) -> Result<Arc<AppFeedbackService>, AppError> {
    let client = ConfiguredClient::from_config(config)?;
    Ok(Arc::new(FeedbackService::new(
        Arc::new(client),
        Arc::new(InterviewPromptBuilder),
        config.feedback.clone(),
    )))
}
