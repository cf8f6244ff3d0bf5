//! Normalized string similarity for fuzzy parent matching.

use similar::{Algorithm, DiffTag, capture_diff_slices};

/// Score two strings from 0 to 100, ignoring case.
///
/// The score is `200 * m / (len(a) + len(b))` where `m` is the number of
/// characters in the longest common subsequence, so one insertion or deletion
/// costs one character and a substitution costs two. Two empty strings score
/// 100.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }

    let matched: usize = capture_diff_slices(Algorithm::Myers, &a, &b)
        .iter()
        .map(similar::DiffOp::as_tag_tuple)
        .filter(|(tag, _, _)| *tag == DiffTag::Equal)
        .map(|(_, old, _)| old.len())
        .sum();

    200.0 * matched as f64 / total as f64
}
