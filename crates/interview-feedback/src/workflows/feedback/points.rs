use super::domain::{Evaluation, FeedbackCategory};
use indexmap::IndexSet;

/// Maximum number of remarks kept per category.
pub const MAX_POINTS: usize = 5;

/// Insertion-ordered set of remarks capped at [`MAX_POINTS`] entries.
///
/// The first occurrence of a remark fixes its position; later duplicates are dropped.
#[derive(Debug, Clone, Default)]
pub struct PointSet {
    points: IndexSet<String>,
}

impl PointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a remark verbatim, ignoring anything past capacity.
    pub fn insert(&mut self, point: &str) {
        if self.is_full() {
            return;
        }
        if !self.points.contains(point) {
            self.points.insert(point.to_string());
        }
    }

    pub fn extend<'a, I>(&mut self, points: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for point in points {
            if self.is_full() {
                break;
            }
            self.insert(point);
        }
    }

    pub fn is_full(&self) -> bool {
        self.points.len() >= MAX_POINTS
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.points.into_iter().collect()
    }
}

/// Gathers the selected remarks across evaluations in first-seen order.
pub fn collect_points<'a, I>(evaluations: I, category: FeedbackCategory) -> Vec<String>
where
    I: IntoIterator<Item = &'a Evaluation>,
{
    let mut set = PointSet::new();
    for evaluation in evaluations {
        if set.is_full() {
            break;
        }
        if let Some(points) = evaluation.points(category) {
            set.extend(points);
        }
    }
    set.into_vec()
}

/// Normalizes an externally supplied list to the same shape as computed points.
///
/// Blank entries are not usable remarks and are dropped before deduplication.
pub(crate) fn dedup_points(points: &[String]) -> Vec<String> {
    let mut set = PointSet::new();
    set.extend(points.iter().filter(|point| !point.trim().is_empty()));
    set.into_vec()
}
