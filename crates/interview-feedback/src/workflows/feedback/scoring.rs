use super::domain::{clamp_score, Evaluation};
use serde::{Deserialize, Serialize};

/// Score reported when there is nothing to average.
pub const NEUTRAL_SCORE: i64 = 5;

/// Rounded mean of the evaluation scores, counting a missing score as zero.
///
/// An empty slice yields [`NEUTRAL_SCORE`]. Halves round up and the result is kept in `0..=10`.
pub fn aggregate_score<'a, I>(evaluations: I) -> i64
where
    I: IntoIterator<Item = &'a Evaluation>,
{
    // Widened so extreme upstream scores cannot overflow the sum.
    let (total, count) = evaluations
        .into_iter()
        .fold((0_i128, 0_u32), |(total, count), evaluation| {
            (
                total + i128::from(evaluation.score.unwrap_or(0)),
                count.saturating_add(1),
            )
        });

    if count == 0 {
        return NEUTRAL_SCORE;
    }

    let mean = total as f64 / f64::from(count);
    clamp_score((mean + 0.5).floor() as i64)
}

/// Qualitative label for a numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Outstanding,
    Excellent,
    VeryGood,
    Good,
    Satisfactory,
    Fair,
    NeedsImprovement,
    Unsatisfactory,
}

impl ScoreBand {
    pub const fn from_score(score: i64) -> Self {
        if score >= 9 {
            Self::Outstanding
        } else if score >= 8 {
            Self::Excellent
        } else if score >= 7 {
            Self::VeryGood
        } else if score >= 6 {
            Self::Good
        } else if score >= 5 {
            Self::Satisfactory
        } else if score >= 4 {
            Self::Fair
        } else if score >= 3 {
            Self::NeedsImprovement
        } else {
            Self::Unsatisfactory
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Outstanding => "Outstanding",
            Self::Excellent => "Excellent",
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::Satisfactory => "Satisfactory",
            Self::Fair => "Fair",
            Self::NeedsImprovement => "Needs Improvement",
            Self::Unsatisfactory => "Unsatisfactory",
        }
    }
}

pub fn describe_score(score: i64) -> &'static str {
    ScoreBand::from_score(score).label()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(scores: &[Option<i64>]) -> Vec<Evaluation> {
        scores
            .iter()
            .map(|score| Evaluation {
                score: *score,
                ..Evaluation::default()
            })
            .collect()
    }

    #[test]
    fn empty_input_is_neutral() {
        assert_eq!(aggregate_score(&Vec::<Evaluation>::new()), 5);
    }

    #[test]
    fn mean_rounds_half_up() {
        assert_eq!(aggregate_score(&scored(&[Some(9), Some(7)])), 8);
        assert_eq!(aggregate_score(&scored(&[Some(7), Some(8)])), 8);
        assert_eq!(aggregate_score(&scored(&[Some(6), Some(6), Some(7)])), 6);
    }

    #[test]
    fn extreme_scores_do_not_overflow() {
        assert_eq!(aggregate_score(&scored(&[Some(i64::MAX), Some(i64::MAX)])), 10);
        assert_eq!(aggregate_score(&scored(&[Some(i64::MIN), Some(i64::MIN)])), 0);
        assert_eq!(aggregate_score(&scored(&[Some(i64::MAX), Some(i64::MIN)])), 0);
    }

    #[test]
    fn missing_scores_count_as_zero() {
        assert_eq!(aggregate_score(&scored(&[Some(10), None])), 5);
        assert_eq!(aggregate_score(&scored(&[None, None, Some(3)])), 1);
    }

    #[test]
    fn out_of_range_inputs_stay_within_bounds() {
        assert_eq!(aggregate_score(&scored(&[Some(40), Some(12)])), 10);
        assert_eq!(aggregate_score(&scored(&[Some(-8)])), 0);
    }

    #[test]
    fn bands_follow_descending_thresholds() {
        assert_eq!(describe_score(10), "Outstanding");
        assert_eq!(describe_score(9), "Outstanding");
        assert_eq!(describe_score(8), "Excellent");
        assert_eq!(describe_score(7), "Very Good");
        assert_eq!(describe_score(6), "Good");
        assert_eq!(describe_score(5), "Satisfactory");
        assert_eq!(describe_score(4), "Fair");
        assert_eq!(describe_score(3), "Needs Improvement");
        assert_eq!(describe_score(2), "Unsatisfactory");
        assert_eq!(describe_score(0), "Unsatisfactory");
    }
}
