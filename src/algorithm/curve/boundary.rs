//! Epidermal/dermal boundary detection
//!
//! Both detectors work on the first derivative of the normalized curve. They
//! are independent tools; callers choose one explicitly.

use serde::{Deserialize, Serialize};

use super::derivative::forward_difference;

/// Boundary detection heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoundaryMethod {
    /// First negative to non-negative transition of the derivative
    SignChange,
    /// Largest forward difference of the derivative inside a window
    MaxSecondDifference,
}

/// First index `i > start` with `d[i - 1] < 0 <= d[i]`, searched below `limit`
///
/// `None` when no transition occurs before the limit.
#[must_use]
pub fn sign_change(derivative: &[f64], start: usize, limit: usize) -> Option<usize> {
    let end = derivative.len().min(limit);
    ((start + 1)..end).find(|&i| derivative[i - 1] < 0.0 && derivative[i] >= 0.0)
}

/// Index of the largest `d[i + 1] - d[i]` with `i` in `head..len - tail - 1`
///
/// The result is an absolute curve index. Ties resolve to the first index;
/// `None` when the margins leave no interior window.
#[must_use]
pub fn max_second_difference(derivative: &[f64], head: usize, tail: usize) -> Option<usize> {
    let end = derivative.len().checked_sub(tail)?;
    if end < head + 2 {
        return None;
    }

    forward_difference(&derivative[head..end])
        .into_iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (offset, step)| match best {
            Some((_, value)) if step <= value => best,
            _ => Some((offset, step)),
        })
        .map(|(offset, _)| head + offset)
}
