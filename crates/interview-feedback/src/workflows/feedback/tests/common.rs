use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::workflows::feedback::client::{TextGenerationClient, TextGenerationError};
use crate::workflows::feedback::domain::{
    Answer, Evaluation, FeedbackRequest, Interview, InterviewId, QuestionId, User, UserId,
};
use crate::workflows::feedback::prompt::InterviewPromptBuilder;
use crate::workflows::feedback::service::{FeedbackConfig, FeedbackService};

pub(super) fn interview() -> Interview {
    Interview {
        id: InterviewId("int-42".to_string()),
        user_id: UserId("user-7".to_string()),
        title: Some("Backend screen".to_string()),
        job_role: Some("Backend Engineer".to_string()),
    }
}

pub(super) fn user() -> User {
    User {
        id: UserId("user-7".to_string()),
        name: Some("Sam".to_string()),
    }
}

pub(super) fn answer(question: &str, evaluation: Option<Evaluation>) -> Answer {
    Answer {
        question_id: QuestionId(question.to_string()),
        question: Some(format!("Prompt for {question}")),
        response: Some(format!("Response to {question}")),
        evaluation,
    }
}

pub(super) fn evaluation(
    score: i64,
    strengths: &[&str],
    weaknesses: &[&str],
    suggestions: &[&str],
) -> Evaluation {
    let owned = |items: &[&str]| -> Option<Vec<String>> {
        Some(items.iter().map(|item| item.to_string()).collect())
    };
    Evaluation {
        score: Some(score),
        strengths: owned(strengths),
        weaknesses: owned(weaknesses),
        suggestions: owned(suggestions),
    }
}

/// Three evaluated answers, enough to take the assisted path.
pub(super) fn three_answers() -> Vec<Answer> {
    vec![
        answer(
            "q-1",
            Some(evaluation(9, &["Clear structure"], &[], &["Mention trade-offs"])),
        ),
        answer(
            "q-2",
            Some(evaluation(6, &["Calm delivery"], &["Light on detail"], &[])),
        ),
        answer("q-3", Some(evaluation(3, &[], &["Missed edge cases"], &[]))),
    ]
}

pub(super) fn request(answers: Vec<Answer>) -> FeedbackRequest {
    FeedbackRequest {
        interview: interview(),
        answers,
        user: user(),
    }
}

pub(super) fn service_with<C>(client: C) -> Arc<FeedbackService<C, InterviewPromptBuilder>>
where
    C: TextGenerationClient + 'static,
{
    Arc::new(FeedbackService::new(
        Arc::new(client),
        Arc::new(InterviewPromptBuilder),
        FeedbackConfig::default(),
    ))
}

/// Replies with a canned text and records every prompt it receives.
#[derive(Default)]
pub(super) struct ScriptedClient {
    reply: String,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub(super) fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn prompts(&self) -> Vec<String> {
        self.prompts.lock().expect("prompt mutex poisoned").clone()
    }
}

#[async_trait]
impl TextGenerationClient for ScriptedClient {
    async fn generate_content(&self, prompt: &str) -> Result<String, TextGenerationError> {
        self.prompts
            .lock()
            .expect("prompt mutex poisoned")
            .push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Fails every call after counting it.
#[derive(Default)]
pub(super) struct FailingClient {
    calls: AtomicUsize,
}

impl FailingClient {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerationClient for FailingClient {
    async fn generate_content(&self, _prompt: &str) -> Result<String, TextGenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(TextGenerationError::Service {
            status: 503,
            body: "upstream unavailable".to_string(),
        })
    }
}
