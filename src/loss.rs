use ndarray::ArrayView1;

use crate::error::Error;

fn ensure_same_length(y_hat: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<(), Error> {
    if y_hat.len() == y.len() {
        Ok(())
    } else {
        Err(Error::LengthMismatch {
            predictions: y_hat.len(),
            targets: y.len(),
        })
    }
}

// NaN is outside as well.
fn is_open_unit_interval(value: f64) -> bool {
    value > 0.0 && value < 1.0
}

/// Half the sum of squared residuals: `0.5 * sum((y_hat - y)^2)`.
pub fn mse(y_hat: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64, Error> {
    ensure_same_length(y_hat, y)?;

    let squared_error: f64 = y_hat
        .iter()
        .zip(y.iter())
        .map(|(predicted, target)| (predicted - target).powi(2))
        .sum();

    Ok(0.5 * squared_error)
}

/// `-sum(y * ln(y_hat) + (1 - y) * ln(1 - y_hat))`.
///
/// Every prediction must lie strictly between 0 and 1; the first one that
/// doesn't is reported as [`Error::ProbabilityOutOfRange`].
pub fn binary_cross_entropy(y_hat: ArrayView1<f64>, y: ArrayView1<f64>) -> Result<f64, Error> {
    ensure_same_length(y_hat, y)?;

    if let Some((index, &value)) = y_hat
        .iter()
        .enumerate()
        .find(|(_, &probability)| !is_open_unit_interval(probability))
    {
        return Err(Error::ProbabilityOutOfRange { index, value });
    }

    let log_likelihood: f64 = y_hat
        .iter()
        .zip(y.iter())
        .map(|(&probability, &target)| {
            target * probability.ln() + (1.0 - target) * (1.0 - probability).ln()
        })
        .sum();

    Ok(-log_likelihood)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn mse_is_zero_for_identical_inputs() {
        let y = array![0.0, 1.0, 2.5, -3.0];

        assert!(mse(y.view(), y.view()).unwrap().abs() < 1e-12);
    }

    #[test]
    fn mse_is_positive_when_inputs_differ() {
        let y_hat = array![0.0, 1.0, 2.0];
        let y = array![0.0, 1.0, 4.0];

        assert!((mse(y_hat.view(), y.view()).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn mse_is_symmetric() {
        let a = array![0.3, -1.2, 4.0];
        let b = array![1.0, 0.5, 3.5];

        let forward = mse(a.view(), b.view()).unwrap();
        let backward = mse(b.view(), a.view()).unwrap();
        assert!((forward - backward).abs() < 1e-12);
    }

    #[test]
    fn mse_rejects_mismatched_lengths() {
        let y_hat = array![0.0, 1.0];
        let y = array![0.0, 1.0, 1.0];

        assert!(matches!(
            mse(y_hat.view(), y.view()),
            Err(Error::LengthMismatch {
                predictions: 2,
                targets: 3
            })
        ));
    }

    #[test]
    fn cross_entropy_matches_formula() {
        let y_hat = array![0.9, 0.2];
        let y = array![1.0, 0.0];
        let expected = -(0.9_f64.ln() + 0.8_f64.ln());

        let loss = binary_cross_entropy(y_hat.view(), y.view()).unwrap();
        assert!((loss - expected).abs() < 1e-12);
    }

    #[test]
    fn cross_entropy_decreases_toward_true_label() {
        let y = array![1.0];
        let mut previous = f64::INFINITY;

        for probability in [0.01, 0.1, 0.3, 0.5, 0.7, 0.9, 0.99] {
            let loss = binary_cross_entropy(array![probability].view(), y.view()).unwrap();

            assert!(loss < previous);
            previous = loss;
        }
    }

    #[test]
    fn cross_entropy_diverges_at_wrong_extreme() {
        let y = array![0.0];
        let near = binary_cross_entropy(array![1.0 - 1e-6].view(), y.view()).unwrap();
        let nearer = binary_cross_entropy(array![1.0 - 1e-12].view(), y.view()).unwrap();

        assert!(near > 13.0);
        assert!(nearer > 27.0);
    }

    #[test]
    fn cross_entropy_rejects_saturated_probabilities() {
        let y = array![0.0, 1.0, 1.0];

        assert!(matches!(
            binary_cross_entropy(array![0.5, 1.0, 0.5].view(), y.view()),
            Err(Error::ProbabilityOutOfRange { index: 1, .. })
        ));
        assert!(matches!(
            binary_cross_entropy(array![0.0, 0.5, 0.5].view(), y.view()),
            Err(Error::ProbabilityOutOfRange { index: 0, .. })
        ));
        assert!(binary_cross_entropy(array![0.5, 0.5, f64::NAN].view(), y.view()).is_err());
    }

    #[test]
    fn cross_entropy_rejects_mismatched_lengths() {
        let y_hat = array![0.5];
        let y = array![0.0, 1.0];

        assert!(matches!(
            binary_cross_entropy(y_hat.view(), y.view()),
            Err(Error::LengthMismatch { .. })
        ));
    }
}
