//! Interview feedback synthesis.
//!
//! Per-question evaluations are aggregated into a [`Feedback`] record. Larger interviews are
//! additionally sent to a text-generation service whose reply is parsed and merged over the
//! computed values; any failure on that path degrades to the computed record.

pub mod client;
pub mod comments;
pub mod domain;
pub mod parser;
pub mod points;
pub mod prompt;
pub mod report;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use client::{DisabledClient, GeminiClient, TextGenerationClient, TextGenerationError};
pub use comments::{comment_for, question_feedback};
pub use domain::{
    Answer, Evaluation, Feedback, FeedbackCategory, FeedbackRequest, Interview, InterviewId,
    QuestionFeedback, QuestionId, User, UserId,
};
pub use parser::{parse_heuristically, parse_response, try_parse_structured, ParsedFeedback};
pub use points::{collect_points, PointSet, MAX_POINTS};
pub use prompt::{InterviewPromptBuilder, PromptBuilder, PromptContext};
pub use report::compose_detailed_feedback;
pub use router::{feedback_router, FeedbackPayload, FEEDBACK_PATH_HEADER};
pub use scoring::{aggregate_score, describe_score, ScoreBand, NEUTRAL_SCORE};
pub use service::{
    ComputedFeedback, FeedbackConfig, FeedbackError, FeedbackPath, FeedbackService,
    DEGRADED_DETAILED_FEEDBACK,
};
