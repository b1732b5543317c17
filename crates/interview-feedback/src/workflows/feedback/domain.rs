use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// Score assumed for an evaluation that carries no score of its own.
pub const DEFAULT_EVALUATION_SCORE: i64 = 5;
/// Upper bound for every score surfaced in a [`Feedback`] record.
pub const MAX_SCORE: i64 = 10;

/// Identifier wrapper for completed interviews.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterviewId(pub String);

/// Identifier wrapper for interview owners.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

/// Identifier wrapper for the question an answer responds to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionId(pub String);

impl fmt::Display for InterviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Grading produced upstream for a single answer.
///
/// Every field is optional on the wire. Malformed values (a score that is not numeric, a
/// remark list that is not an array) are read as absent rather than rejecting the payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(
        default,
        deserialize_with = "lenient_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub score: Option<i64>,
    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub strengths: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub weaknesses: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "lenient_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub suggestions: Option<Vec<String>>,
}

impl Evaluation {
    pub fn with_score(score: i64) -> Self {
        Self {
            score: Some(score),
            ..Self::default()
        }
    }

    /// Remarks stored under the selected category, if the list is present.
    pub fn points(&self, category: FeedbackCategory) -> Option<&[String]> {
        match category {
            FeedbackCategory::Strengths => self.strengths.as_deref(),
            FeedbackCategory::Weaknesses => self.weaknesses.as_deref(),
            FeedbackCategory::Suggestions => self.suggestions.as_deref(),
        }
    }

    pub(crate) fn first_point(&self, category: FeedbackCategory) -> Option<&str> {
        self.points(category)
            .and_then(|points| points.first())
            .map(String::as_str)
    }

    pub(crate) fn score_or_default(&self) -> i64 {
        self.score.unwrap_or(DEFAULT_EVALUATION_SCORE)
    }
}

/// Candidate answer to one interview question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: QuestionId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<Evaluation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: InterviewId,
    #[serde(default)]
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Snapshot handed to the feedback pipeline when an interview completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub interview: Interview,
    #[serde(default)]
    pub answers: Vec<Answer>,
    pub user: User,
}

/// Per-question entry of the final report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionFeedback {
    pub question_id: QuestionId,
    pub score: i64,
    pub comments: String,
}

/// Structured performance review for a completed interview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub interview_id: InterviewId,
    pub user_id: UserId,
    pub overall_score: i64,
    pub technical_score: i64,
    pub communication_score: i64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    pub detailed_feedback: String,
    pub question_feedback: Vec<QuestionFeedback>,
}

/// Selector over the three remark lists an evaluation carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackCategory {
    Strengths,
    Weaknesses,
    Suggestions,
}

impl FeedbackCategory {
    pub const fn ordered() -> [Self; 3] {
        [Self::Strengths, Self::Weaknesses, Self::Suggestions]
    }

    /// Section heading used in the narrative report.
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Strengths => "Strengths",
            Self::Weaknesses => "Areas for Improvement",
            Self::Suggestions => "Suggestions",
        }
    }
}

pub(crate) fn clamp_score(score: i64) -> i64 {
    score.clamp(0, MAX_SCORE)
}

/// Reads a JSON number or numeric string as a whole number, rounding fractional values.
///
/// Values that do not fit in an `i64` after rounding are read as absent.
pub(crate) fn coerce_integer(value: &Value) -> Option<i64> {
    // 2^63, the first magnitude past i64::MAX.
    const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

    let number = match value {
        Value::Number(number) => match number.as_i64() {
            Some(integer) => return Some(integer),
            None => number.as_f64()?,
        },
        Value::String(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return None;
            }
            trimmed.parse::<f64>().ok()?
        }
        _ => return None,
    };

    let rounded = number.round();
    if !rounded.is_finite() || rounded < -I64_BOUND || rounded >= I64_BOUND {
        return None;
    }

    Some(rounded as i64)
}

/// Accepts only JSON arrays; string entries are kept, anything else is skipped.
pub(crate) fn coerce_string_list(value: &Value) -> Option<Vec<String>> {
    value.as_array().map(|items| {
        items
            .iter()
            .filter_map(|item| item.as_str())
            .map(str::to_string)
            .collect()
    })
}

fn lenient_score<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_integer(&value))
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_string_list(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn evaluation_reads_malformed_fields_as_absent() {
        let evaluation: Evaluation = serde_json::from_value(json!({
            "score": "eight",
            "strengths": "not-a-list",
            "weaknesses": ["Too brief", 4, null],
        }))
        .expect("lenient evaluation parses");

        assert_eq!(evaluation.score, None);
        assert_eq!(evaluation.strengths, None);
        assert_eq!(evaluation.weaknesses, Some(vec!["Too brief".to_string()]));
        assert_eq!(evaluation.suggestions, None);
    }

    #[test]
    fn evaluation_coerces_numeric_strings_and_floats() {
        let from_string: Evaluation =
            serde_json::from_value(json!({ "score": " 7 " })).expect("parses");
        let from_float: Evaluation =
            serde_json::from_value(json!({ "score": 6.5 })).expect("parses");

        assert_eq!(from_string.score, Some(7));
        assert_eq!(from_float.score, Some(7));
    }

    #[test]
    fn evaluation_rejects_scores_outside_integer_range() {
        let huge: Evaluation = serde_json::from_str(r#"{"score": 1e300}"#).expect("parses");
        let tiny: Evaluation = serde_json::from_str(r#"{"score": -1e300}"#).expect("parses");
        let long_digits: Evaluation =
            serde_json::from_value(json!({ "score": "9".repeat(400) })).expect("parses");
        let max: Evaluation =
            serde_json::from_value(json!({ "score": i64::MAX })).expect("parses");

        assert_eq!(huge.score, None);
        assert_eq!(tiny.score, None);
        assert_eq!(long_digits.score, None);
        assert_eq!(max.score, Some(i64::MAX));
    }

    #[test]
    fn answer_uses_camel_case_on_the_wire() {
        let answer: Answer = serde_json::from_value(json!({
            "questionId": "q-1",
            "evaluation": { "score": 9 }
        }))
        .expect("answer parses");

        assert_eq!(answer.question_id, QuestionId("q-1".to_string()));
        assert_eq!(answer.evaluation, Some(Evaluation::with_score(9)));
    }
}
