use super::domain::{Answer, FeedbackCategory, Interview};
use std::fmt::Write;

pub const DEFAULT_JOB_ROLE: &str = "Software Developer";

/// Inputs available when phrasing the feedback request.
#[derive(Debug, Clone, Copy)]
pub struct PromptContext<'a> {
    pub interview: &'a Interview,
    pub answers: &'a [Answer],
    pub job_role: &'a str,
}

impl<'a> PromptContext<'a> {
    pub fn new(interview: &'a Interview, answers: &'a [Answer]) -> Self {
        let job_role = interview
            .job_role
            .as_deref()
            .filter(|role| !role.trim().is_empty())
            .unwrap_or(DEFAULT_JOB_ROLE);

        Self {
            interview,
            answers,
            job_role,
        }
    }
}

/// Produces the opaque prompt forwarded to the text-generation client.
pub trait PromptBuilder: Send + Sync {
    fn build_feedback_prompt(&self, context: &PromptContext<'_>) -> String;
}

/// Default prompt asking for a JSON object the response parser understands.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterviewPromptBuilder;

impl PromptBuilder for InterviewPromptBuilder {
    fn build_feedback_prompt(&self, context: &PromptContext<'_>) -> String {
        let mut prompt = String::new();

        let _ = writeln!(
            prompt,
            "You are an experienced interviewer reviewing a completed interview for a {} position.",
            context.job_role
        );
        if let Some(title) = context.interview.title.as_deref() {
            let _ = writeln!(prompt, "Interview: {title}");
        }
        prompt.push('\n');

        for (index, answer) in context.answers.iter().enumerate() {
            let _ = writeln!(
                prompt,
                "Question {}: {}",
                index + 1,
                answer.question.as_deref().unwrap_or("(question text unavailable)")
            );
            let _ = writeln!(
                prompt,
                "Answer: {}",
                answer.response.as_deref().unwrap_or("(no answer recorded)")
            );

            match &answer.evaluation {
                Some(evaluation) => {
                    if let Some(score) = evaluation.score {
                        let _ = writeln!(prompt, "Score: {score}/10");
                    }
                    for category in FeedbackCategory::ordered() {
                        let Some(points) = evaluation.points(category) else {
                            continue;
                        };
                        if !points.is_empty() {
                            let heading = category.heading();
                            let _ = writeln!(prompt, "{heading}: {}", points.join("; "));
                        }
                    }
                }
                None => {
                    let _ = writeln!(prompt, "Evaluation: not available");
                }
            }
            prompt.push('\n');
        }

        prompt.push_str(
            "Respond with a single JSON object and nothing else, using exactly these fields:\n\
             {\n  \"overallScore\": integer 0-10,\n  \"technicalScore\": integer 0-10,\n  \
             \"communicationScore\": integer 0-10,\n  \"strengths\": [string],\n  \
             \"weaknesses\": [string],\n  \"suggestions\": [string],\n  \
             \"detailedFeedback\": string\n}\n\
             List at most 5 items per array.",
        );

        prompt
    }
}
