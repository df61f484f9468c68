//! Elementwise activation functions.
//!
//! Each function works on a single `f64`; [`activate`] lifts any of them over
//! an array of arbitrary dimension.

use ndarray::{Array, Dimension};

/// +1 for positive input, -1 for negative input, 0 for (signed) zero.
///
/// Unlike [`f64::signum`], zero maps to zero. NaN is passed through.
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        // 0.0, -0.0 or NaN
        x * 0.0
    }
}

pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Identity activation.
pub fn constant<T>(x: T) -> T {
    x
}

pub fn activate<F, D>(activation: F, x: &Array<f64, D>) -> Array<f64, D>
where
    F: Fn(f64) -> f64,
    D: Dimension,
{
    x.mapv(activation)
}
