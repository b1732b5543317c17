use super::domain::{Evaluation, FeedbackCategory};
use super::points::collect_points;
use super::scoring::{aggregate_score, describe_score};
use std::fmt::Write;

/// Multi-section narrative built from the aggregated evaluations.
///
/// Opens with the overall band, then lists strengths, areas for improvement and suggestions.
/// Sections without points are left out.
pub fn compose_detailed_feedback(evaluations: &[Evaluation]) -> String {
    let score = aggregate_score(evaluations);
    let mut report = String::new();

    let _ = writeln!(
        report,
        "Overall Interview Performance: {}",
        describe_score(score)
    );
    report.push('\n');

    for category in FeedbackCategory::ordered() {
        let points = collect_points(evaluations, category);
        if points.is_empty() {
            continue;
        }

        let _ = writeln!(report, "{}:", category.heading());
        for point in &points {
            let _ = writeln!(report, "- {point}");
        }
        report.push('\n');
    }

    report.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_populated_sections_only() {
        let evaluations = vec![
            Evaluation {
                score: Some(9),
                strengths: Some(vec!["Clear reasoning".to_string()]),
                weaknesses: None,
                suggestions: Some(vec!["Practice system design".to_string()]),
            },
            Evaluation {
                score: Some(7),
                strengths: Some(vec![
                    "Clear reasoning".to_string(),
                    "Good pacing".to_string(),
                ]),
                weaknesses: Some(Vec::new()),
                suggestions: None,
            },
        ];

        let report = compose_detailed_feedback(&evaluations);

        assert_eq!(
            report,
            "Overall Interview Performance: Excellent\n\n\
             Strengths:\n- Clear reasoning\n- Good pacing\n\n\
             Suggestions:\n- Practice system design"
        );
        assert!(!report.contains("Areas for Improvement"));
    }

    #[test]
    fn weaknesses_use_improvement_heading() {
        let evaluations = vec![Evaluation {
            score: Some(3),
            weaknesses: Some(vec!["Missed edge cases".to_string()]),
            ..Evaluation::default()
        }];

        let report = compose_detailed_feedback(&evaluations);

        assert!(report.starts_with("Overall Interview Performance: Needs Improvement"));
        assert!(report.contains("Areas for Improvement:\n- Missed edge cases"));
    }

    #[test]
    fn empty_input_reports_neutral_band() {
        assert_eq!(
            compose_detailed_feedback(&[]),
            "Overall Interview Performance: Satisfactory"
        );
    }

    #[test]
    fn output_is_stable_across_calls() {
        let evaluations = vec![Evaluation {
            score: Some(6),
            strengths: Some(vec!["Calm".to_string()]),
            weaknesses: Some(vec!["Brief".to_string()]),
            suggestions: Some(vec!["Add metrics".to_string()]),
        }];

        assert_eq!(
            compose_detailed_feedback(&evaluations),
            compose_detailed_feedback(&evaluations)
        );
    }
}
