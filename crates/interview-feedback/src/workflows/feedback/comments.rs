use super::domain::{clamp_score, Answer, Evaluation, FeedbackCategory, QuestionFeedback};

pub const MISSING_EVALUATION_COMMENT: &str = "No evaluation available.";

/// One-line remark for a single evaluation; only the first strength or weakness is quoted.
pub fn comment_for(evaluation: Option<&Evaluation>) -> String {
    let Some(evaluation) = evaluation else {
        return MISSING_EVALUATION_COMMENT.to_string();
    };

    let score = evaluation.score_or_default();
    let strength = evaluation.first_point(FeedbackCategory::Strengths);
    let weakness = evaluation.first_point(FeedbackCategory::Weaknesses);

    if score >= 8 {
        format!("Excellent answer. {}", strength.unwrap_or("Good job!"))
    } else if score >= 6 {
        format!(
            "Good answer. {} Consider: {}",
            strength.unwrap_or(""),
            weakness.unwrap_or("providing more details.")
        )
    } else if score >= 4 {
        format!(
            "Average answer. {}",
            weakness.unwrap_or("Could be improved with more specific examples.")
        )
    } else {
        format!(
            "Needs improvement. {}",
            weakness.unwrap_or("Consider reviewing this topic further.")
        )
    }
}

/// Per-question entries in answer order.
pub fn question_feedback(answers: &[Answer]) -> Vec<QuestionFeedback> {
    answers
        .iter()
        .map(|answer| QuestionFeedback {
            question_id: answer.question_id.clone(),
            score: answer
                .evaluation
                .as_ref()
                .map(|evaluation| clamp_score(evaluation.score_or_default()))
                .unwrap_or(0),
            comments: comment_for(answer.evaluation.as_ref()),
        })
        .collect()
}
