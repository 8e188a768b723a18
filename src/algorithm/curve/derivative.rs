//! Numerical differentiation of sampled curves

use itertools::Itertools;

/// First derivative by central difference, endpoints left at zero
///
/// `d[n] = (y[n+1] - y[n-1]) / (x[n+1] - x[n-1])`. Where the two depths
/// coincide the derivative is zero.
#[must_use]
pub fn central_difference(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len().min(y.len());
    let mut derivative = vec![0.0; n];

    for i in 1..n.saturating_sub(1) {
        let dx = x[i + 1] - x[i - 1];
        if dx != 0.0 {
            derivative[i] = (y[i + 1] - y[i - 1]) / dx;
        }
    }

    derivative
}

/// `out[i] = values[i + 1] - values[i]`
#[must_use]
pub fn forward_difference(values: &[f64]) -> Vec<f64> {
    values
        .iter()
        .tuple_windows()
        .map(|(a, b)| b - a)
        .collect()
}

/// Trapezoidal integral of `y` over `x`
#[must_use]
pub fn trapezoid(x: &[f64], y: &[f64]) -> f64 {
    x.iter()
        .zip(y)
        .tuple_windows()
        .map(|((x0, y0), (x1, y1))| (x1 - x0) * (y0 + y1) / 2.0)
        .sum()
}
