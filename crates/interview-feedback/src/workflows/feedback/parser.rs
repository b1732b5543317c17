//! Converts the free-form reply of the text-generation service into a partial feedback record.
//!
//! Parsing runs in two explicit stages. [`try_parse_structured`] accepts replies that are JSON,
//! either bare or as the body of a Markdown code fence. Only when neither parses does
//! [`parse_heuristically`] scan the text line by line for score lines and section headers.

use super::domain::{coerce_integer, coerce_string_list, FeedbackCategory, MAX_SCORE};
use serde_json::{Map, Value};

/// Values recovered from a generated reply. Absent scores stay `None`; absent lists stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFeedback {
    pub overall_score: Option<i64>,
    pub technical_score: Option<i64>,
    pub communication_score: Option<i64>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
    pub detailed_feedback: Option<String>,
}

impl ParsedFeedback {
    pub fn points(&self, category: FeedbackCategory) -> &[String] {
        match category {
            FeedbackCategory::Strengths => &self.strengths,
            FeedbackCategory::Weaknesses => &self.weaknesses,
            FeedbackCategory::Suggestions => &self.suggestions,
        }
    }

    fn points_mut(&mut self, category: FeedbackCategory) -> &mut Vec<String> {
        match category {
            FeedbackCategory::Strengths => &mut self.strengths,
            FeedbackCategory::Weaknesses => &mut self.weaknesses,
            FeedbackCategory::Suggestions => &mut self.suggestions,
        }
    }

    fn score_mut(&mut self, field: ScoreField) -> &mut Option<i64> {
        match field {
            ScoreField::Overall => &mut self.overall_score,
            ScoreField::Technical => &mut self.technical_score,
            ScoreField::Communication => &mut self.communication_score,
        }
    }
}

pub fn parse_response(raw: &str) -> ParsedFeedback {
    try_parse_structured(raw).unwrap_or_else(|| parse_heuristically(raw))
}

/// Reads the reply as JSON, returning `None` only when it does not parse at all.
///
/// Fields are taken one by one: scores must coerce to a number, lists must be arrays. Scores
/// are not range checked here. JSON that is not an object carries no fields.
pub fn try_parse_structured(raw: &str) -> Option<ParsedFeedback> {
    let value = structured_candidates(raw)
        .into_iter()
        .find_map(|candidate| serde_json::from_str::<Value>(candidate).ok())?;

    let Value::Object(object) = value else {
        return Some(ParsedFeedback::default());
    };

    let score = |camel: &str, snake: &str| field(&object, camel, snake).and_then(coerce_integer);
    let list = |camel: &str, snake: &str| {
        field(&object, camel, snake)
            .and_then(coerce_string_list)
            .unwrap_or_default()
    };

    Some(ParsedFeedback {
        overall_score: score("overallScore", "overall_score"),
        technical_score: score("technicalScore", "technical_score"),
        communication_score: score("communicationScore", "communication_score"),
        strengths: list("strengths", "strengths"),
        weaknesses: list("weaknesses", "weaknesses"),
        suggestions: list("suggestions", "suggestions"),
        detailed_feedback: field(&object, "detailedFeedback", "detailed_feedback")
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
            .map(str::to_string),
    })
}

/// Line-oriented fallback for replies that are not structured.
///
/// Score lines are kept only when the value is within `0..=10`. Lines under a section header
/// become points; lines outside any section feed the detailed narrative.
pub fn parse_heuristically(raw: &str) -> ParsedFeedback {
    let mut parsed = ParsedFeedback::default();
    let mut section = Section::Narrative;
    let mut narrative = Vec::new();

    for line in raw.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }

        if let Some((field, rest)) = ScoreField::match_line(line) {
            let score = leading_integer(rest).filter(|score| (0..=MAX_SCORE).contains(score));
            if let Some(score) = score {
                *parsed.score_mut(field) = Some(score);
            }
            continue;
        }

        if let Some(next) = Section::from_header(line) {
            section = next;
            continue;
        }

        match section {
            Section::Narrative => narrative.push(line),
            Section::Points(category) => {
                let point = strip_bullet(line);
                if !point.is_empty() {
                    parsed.points_mut(category).push(point.to_string());
                }
            }
        }
    }

    if !narrative.is_empty() {
        parsed.detailed_feedback = Some(narrative.join("\n"));
    }

    parsed
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScoreField {
    Overall,
    Technical,
    Communication,
}

impl ScoreField {
    const fn prefix(self) -> &'static str {
        match self {
            Self::Overall => "Overall Score:",
            Self::Technical => "Technical Score:",
            Self::Communication => "Communication Score:",
        }
    }

    fn match_line(line: &str) -> Option<(Self, &str)> {
        [Self::Overall, Self::Technical, Self::Communication]
            .into_iter()
            .find_map(|field| line.strip_prefix(field.prefix()).map(|rest| (field, rest)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Narrative,
    Points(FeedbackCategory),
}

impl Section {
    fn from_header(line: &str) -> Option<Self> {
        let lower = line.to_lowercase();
        if lower.contains("strengths:") {
            Some(Self::Points(FeedbackCategory::Strengths))
        } else if lower.contains("weaknesses:") || lower.contains("areas for improvement:") {
            Some(Self::Points(FeedbackCategory::Weaknesses))
        } else if lower.contains("suggestions:") {
            Some(Self::Points(FeedbackCategory::Suggestions))
        } else if lower.contains("detailed feedback:") || lower.starts_with("summary:") {
            Some(Self::Narrative)
        } else {
            None
        }
    }
}

fn field<'a>(object: &'a Map<String, Value>, camel: &str, snake: &str) -> Option<&'a Value> {
    object.get(camel).or_else(|| object.get(snake))
}

fn structured_candidates(raw: &str) -> Vec<&str> {
    let trimmed = raw.trim();
    let mut candidates = vec![trimmed];

    if let Some(body) = fenced_body(trimmed) {
        candidates.push(body);
    }

    candidates
}

fn fenced_body(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after_fence = &text[start + 3..];
    let body_start = after_fence.find('\n')?;
    let body = &after_fence[body_start + 1..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

/// Integer prefix of `text`, e.g. `7` for `" 7/10"`.
fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let end = text
        .char_indices()
        .find(|&(index, ch)| !(ch.is_ascii_digit() || (index == 0 && (ch == '-' || ch == '+'))))
        .map(|(index, _)| index)
        .unwrap_or(text.len());
    text[..end].parse().ok()
}

fn strip_bullet(line: &str) -> &str {
    line.strip_prefix(['-', '*', '•'])
        .map(str::trim_start)
        .unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_numeric_strings_are_coerced() {
        let parsed = parse_response(r#"{"overallScore": "7", "strengths": "not-a-list"}"#);

        assert_eq!(parsed.overall_score, Some(7));
        assert!(parsed.strengths.is_empty());
        assert_eq!(parsed.technical_score, None);
        assert_eq!(parsed.communication_score, None);
        assert!(parsed.weaknesses.is_empty());
        assert!(parsed.suggestions.is_empty());
        assert_eq!(parsed.detailed_feedback, None);
    }

    #[test]
    fn structured_scores_are_not_range_checked() {
        let parsed = try_parse_structured(r#"{"overallScore": 15, "technicalScore": "high"}"#)
            .expect("object parses");

        assert_eq!(parsed.overall_score, Some(15));
        assert_eq!(parsed.technical_score, None);
    }

    #[test]
    fn structured_reply_inside_markdown_fence() {
        let raw = "Here is the review:\n```json\n{\n  \"overallScore\": 8,\n  \"technical_score\": 7,\n  \"strengths\": [\"Depth\", 3],\n  \"detailedFeedback\": \"Solid.\"\n}\n```";

        let parsed = try_parse_structured(raw).expect("fenced object parses");

        assert_eq!(parsed.overall_score, Some(8));
        assert_eq!(parsed.technical_score, Some(7));
        assert_eq!(parsed.strengths, vec!["Depth"]);
        assert_eq!(parsed.detailed_feedback.as_deref(), Some("Solid."));
    }

    #[test]
    fn non_object_json_yields_no_fields() {
        assert_eq!(
            try_parse_structured("[1, 2, 3]"),
            Some(ParsedFeedback::default())
        );
        assert_eq!(parse_response("42"), ParsedFeedback::default());
        assert_eq!(parse_response("\"Great interview\""), ParsedFeedback::default());
        assert!(try_parse_structured("Overall Score: 7").is_none());
    }

    #[test]
    fn prose_with_braces_uses_heuristic_stage() {
        let raw = "Overall Score: 7\nThe candidate explained {x: 1} maps clearly.";

        assert!(try_parse_structured(raw).is_none());

        let parsed = parse_response(raw);
        assert_eq!(parsed.overall_score, Some(7));
        assert_eq!(
            parsed.detailed_feedback.as_deref(),
            Some("The candidate explained {x: 1} maps clearly.")
        );
    }

    #[test]
    fn heuristic_rejects_out_of_range_scores() {
        let parsed = parse_response(
            "Overall Score: 11\nStrengths:\n- Great clarity\nWeaknesses:\n- Needs depth",
        );

        assert_eq!(parsed.overall_score, None);
        assert_eq!(parsed.strengths, vec!["Great clarity"]);
        assert_eq!(parsed.weaknesses, vec!["Needs depth"]);
        assert!(parsed.suggestions.is_empty());
    }

    #[test]
    fn heuristic_reads_scores_sections_and_narrative() {
        let raw = "The candidate communicated well.\n\
                   Overall Score: 7/10\n\
                   Technical Score: 6\n\
                   Communication Score: -1\n\
                   \n\
                   Areas for Improvement:\n\
                   * Edge cases\n\
                   Suggestions:\n\
                   • Practice mock interviews\n\
                   Detailed Feedback:\n\
                   Keep refining examples.";

        let parsed = parse_heuristically(raw);

        assert_eq!(parsed.overall_score, Some(7));
        assert_eq!(parsed.technical_score, Some(6));
        assert_eq!(parsed.communication_score, None);
        assert_eq!(parsed.weaknesses, vec!["Edge cases"]);
        assert_eq!(parsed.suggestions, vec!["Practice mock interviews"]);
        assert_eq!(
            parsed.detailed_feedback.as_deref(),
            Some("The candidate communicated well.\nKeep refining examples.")
        );
    }

    #[test]
    fn heuristic_leaves_everything_unset_for_empty_text() {
        assert_eq!(parse_heuristically("  \n\n "), ParsedFeedback::default());
    }

    #[test]
    fn leading_integer_follows_prefix_semantics() {
        assert_eq!(leading_integer(" 8/10"), Some(8));
        assert_eq!(leading_integer("7.9"), Some(7));
        assert_eq!(leading_integer("-"), None);
        assert_eq!(leading_integer("ten"), None);
    }
}
