use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::Deserialize;

use super::client::TextGenerationClient;
use super::domain::{Answer, FeedbackRequest, Interview, InterviewId, User};
use super::prompt::PromptBuilder;
use super::service::FeedbackService;

/// Response header naming the route that produced the record.
pub const FEEDBACK_PATH_HEADER: &str = "x-feedback-path";

/// Body accepted by the feedback endpoint; the interview id comes from the URL.
#[derive(Debug, Deserialize)]
pub struct FeedbackPayload {
    #[serde(default)]
    pub interview: Option<Interview>,
    #[serde(default)]
    pub answers: Vec<Answer>,
    pub user: User,
}

impl FeedbackPayload {
    pub fn into_request(self, interview_id: InterviewId) -> FeedbackRequest {
        let interview = match self.interview {
            Some(interview) => Interview {
                id: interview_id,
                ..interview
            },
            None => Interview {
                id: interview_id,
                user_id: self.user.id.clone(),
                ..Interview::default()
            },
        };

        FeedbackRequest {
            interview,
            answers: self.answers,
            user: self.user,
        }
    }
}

/// Router builder exposing the feedback generation endpoint.
pub fn feedback_router<C, P>(service: Arc<FeedbackService<C, P>>) -> Router
where
    C: TextGenerationClient + 'static,
    P: PromptBuilder + 'static,
{
    Router::new()
        .route(
            "/api/v1/interviews/:interview_id/feedback",
            post(generate_handler::<C, P>),
        )
        .with_state(service)
}

pub(crate) async fn generate_handler<C, P>(
    State(service): State<Arc<FeedbackService<C, P>>>,
    Path(interview_id): Path<String>,
    axum::Json(payload): axum::Json<FeedbackPayload>,
) -> Response
where
    C: TextGenerationClient + 'static,
    P: PromptBuilder + 'static,
{
    let request = payload.into_request(InterviewId(interview_id));
    let (feedback, path) = service.generate_with_path(request).await;

    (
        StatusCode::OK,
        [(FEEDBACK_PATH_HEADER, path.label())],
        axum::Json(feedback),
    )
        .into_response()
}
