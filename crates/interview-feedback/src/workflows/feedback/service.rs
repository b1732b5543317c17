use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::client::{TextGenerationClient, TextGenerationError};
use super::comments::question_feedback;
use super::domain::{
    clamp_score, Answer, Evaluation, Feedback, FeedbackCategory, FeedbackRequest, Interview,
    InterviewId, QuestionFeedback, User, UserId,
};
use super::parser::{parse_response, ParsedFeedback};
use super::points::{collect_points, dedup_points};
use super::prompt::{PromptBuilder, PromptContext};
use super::report::compose_detailed_feedback;
use super::scoring::aggregate_score;

pub const DEGRADED_DETAILED_FEEDBACK: &str = "Detailed feedback could not be generated at this time. \
Please review the feedback provided for each individual question.";

/// Controls when the text-generation service is consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Smallest answer count that warrants a text-generation call.
    pub assisted_min_answers: usize,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            assisted_min_answers: 3,
        }
    }
}

/// Route taken to produce a feedback record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackPath {
    Computed,
    Assisted,
    Degraded,
}

impl FeedbackPath {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Computed => "computed",
            Self::Assisted => "assisted",
            Self::Degraded => "degraded",
        }
    }
}

/// Error raised on the assisted path; never escapes [`FeedbackService::generate`].
#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error(transparent)]
    TextGeneration(#[from] TextGenerationError),
}

/// Values computed from the evaluations alone; the baseline every path starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedFeedback {
    pub overall_score: i64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    pub detailed_feedback: String,
}

impl ComputedFeedback {
    pub fn from_answers(answers: &[Answer]) -> Self {
        let evaluations: Vec<Evaluation> = answers
            .iter()
            .filter_map(|answer| answer.evaluation.clone())
            .collect();

        Self {
            overall_score: aggregate_score(&evaluations),
            strengths: collect_points(&evaluations, FeedbackCategory::Strengths),
            weaknesses: collect_points(&evaluations, FeedbackCategory::Weaknesses),
            suggestions: collect_points(&evaluations, FeedbackCategory::Suggestions),
            detailed_feedback: compose_detailed_feedback(&evaluations),
        }
    }

    fn points(&self, category: FeedbackCategory) -> &[String] {
        match category {
            FeedbackCategory::Strengths => &self.strengths,
            FeedbackCategory::Weaknesses => &self.weaknesses,
            FeedbackCategory::Suggestions => &self.suggestions,
        }
    }
}

/// Service composing the prompt builder, text-generation client, and computed fallbacks.
pub struct FeedbackService<C, P> {
    client: Arc<C>,
    prompts: Arc<P>,
    config: FeedbackConfig,
}

impl<C, P> FeedbackService<C, P>
where
    C: TextGenerationClient + 'static,
    P: PromptBuilder + 'static,
{
    pub fn new(client: Arc<C>, prompts: Arc<P>, config: FeedbackConfig) -> Self {
        Self {
            client,
            prompts,
            config,
        }
    }

    pub fn config(&self) -> &FeedbackConfig {
        &self.config
    }

    /// Build the feedback record for a completed interview. Always yields a complete record.
    pub async fn generate(&self, interview: Interview, answers: Vec<Answer>, user: User) -> Feedback {
        self.generate_with_path(FeedbackRequest {
            interview,
            answers,
            user,
        })
        .await
        .0
    }

    pub async fn generate_with_path(&self, request: FeedbackRequest) -> (Feedback, FeedbackPath) {
        let FeedbackRequest {
            interview,
            answers,
            user,
        } = request;

        let computed = ComputedFeedback::from_answers(&answers);
        let skeleton = FeedbackSkeleton::new(&interview, &user, &answers);

        if answers.len() < self.config.assisted_min_answers {
            debug!(
                interview_id = %interview.id,
                answers = answers.len(),
                "answer count below assisted threshold; using computed feedback"
            );
            return (skeleton.computed(computed), FeedbackPath::Computed);
        }

        match self.assisted(&interview, &answers).await {
            Ok(parsed) => {
                info!(interview_id = %interview.id, "assisted feedback generated");
                (skeleton.merged(parsed, computed), FeedbackPath::Assisted)
            }
            Err(err) => {
                warn!(
                    interview_id = %interview.id,
                    error = %err,
                    "assisted feedback failed; falling back to computed feedback"
                );
                (skeleton.degraded(computed), FeedbackPath::Degraded)
            }
        }
    }

    async fn assisted(
        &self,
        interview: &Interview,
        answers: &[Answer],
    ) -> Result<ParsedFeedback, FeedbackError> {
        let prompt = self
            .prompts
            .build_feedback_prompt(&PromptContext::new(interview, answers));
        let reply = self.client.generate_content(&prompt).await?;
        Ok(parse_response(&reply))
    }
}

/// Fields shared by every path: identifiers and per-question comments.
struct FeedbackSkeleton {
    interview_id: InterviewId,
    user_id: UserId,
    question_feedback: Vec<QuestionFeedback>,
}

impl FeedbackSkeleton {
    fn new(interview: &Interview, user: &User, answers: &[Answer]) -> Self {
        Self {
            interview_id: interview.id.clone(),
            user_id: user.id.clone(),
            question_feedback: question_feedback(answers),
        }
    }

    fn computed(self, computed: ComputedFeedback) -> Feedback {
        let score = computed.overall_score;
        Feedback {
            interview_id: self.interview_id,
            user_id: self.user_id,
            overall_score: score,
            technical_score: score,
            communication_score: score,
            strengths: computed.strengths,
            weaknesses: computed.weaknesses,
            suggestions: computed.suggestions,
            detailed_feedback: computed.detailed_feedback,
            question_feedback: self.question_feedback,
        }
    }

    fn degraded(self, computed: ComputedFeedback) -> Feedback {
        Feedback {
            detailed_feedback: DEGRADED_DETAILED_FEEDBACK.to_string(),
            ..self.computed(computed)
        }
    }

    /// Generated values win field by field when usable; computed values fill the gaps.
    fn merged(self, parsed: ParsedFeedback, computed: ComputedFeedback) -> Feedback {
        let fallback_score = computed.overall_score;
        let score = |value: Option<i64>| {
            value
                .filter(|score| *score == clamp_score(*score))
                .unwrap_or(fallback_score)
        };
        let points = |category: FeedbackCategory| {
            let generated = dedup_points(parsed.points(category));
            if generated.is_empty() {
                computed.points(category).to_vec()
            } else {
                generated
            }
        };

        Feedback {
            interview_id: self.interview_id,
            user_id: self.user_id,
            overall_score: score(parsed.overall_score),
            technical_score: score(parsed.technical_score),
            communication_score: score(parsed.communication_score),
            strengths: points(FeedbackCategory::Strengths),
            weaknesses: points(FeedbackCategory::Weaknesses),
            suggestions: points(FeedbackCategory::Suggestions),
            detailed_feedback: parsed
                .detailed_feedback
                .clone()
                .unwrap_or_else(|| computed.detailed_feedback.clone()),
            question_feedback: self.question_feedback,
        }
    }
}
