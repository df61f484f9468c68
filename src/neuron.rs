use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::error::Error;

pub const DEFAULT_LEARNING_RATE: f64 = 0.1;
pub const DEFAULT_EPOCHS: usize = 100;

/// Anything that maps a feature matrix to one output per sample.
pub trait Predictor {
    fn predict(&self, features: ArrayView2<f64>) -> Result<Array1<f64>, Error>;
}

/// A linear score followed by an activation, trained by full-batch gradient
/// descent.
///
/// The activation and loss are fixed at construction. The loss is only
/// recorded; the update always backpropagates `y_hat - y`, which is the exact
/// gradient for the sigmoid + cross-entropy and identity + squared-error
/// pairings and an approximation for anything else.
pub struct SingleNeuron<A, L> {
    weights: Array1<f64>,
    bias: f64,
    activation: A,
    loss: L,
    errors: Vec<f64>,
}

impl<A, L> SingleNeuron<A, L>
where
    A: Fn(f64) -> f64,
    L: Fn(ArrayView1<f64>, ArrayView1<f64>) -> Result<f64, Error>,
{
    /// The weight vector stays empty until the first [`train`](Self::train)
    /// call fixes the feature count; until then it acts as all zeros.
    pub fn new(activation: A, loss: L) -> Self {
        Self {
            weights: Array1::zeros(0),
            bias: 0.0,
            activation,
            loss,
            errors: Vec::new(),
        }
    }

    pub fn weights(&self) -> ArrayView1<f64> {
        self.weights.view()
    }

    pub fn bias(&self) -> f64 {
        self.bias
    }

    /// Loss recorded before each epoch's update, oldest first.
    pub fn errors(&self) -> &[f64] {
        &self.errors
    }

    pub fn predict(&self, features: ArrayView2<f64>) -> Result<Array1<f64>, Error> {
        let scores = if self.weights.is_empty() {
            Array1::from_elem(features.nrows(), self.bias)
        } else {
            self.check_feature_count(features.ncols())?;
            features.dot(&self.weights) + self.bias
        };

        Ok(scores.mapv(&self.activation))
    }

    /// Runs exactly `epochs` full-batch updates, appending one loss value per
    /// epoch. A second call keeps going from the current weights.
    pub fn train(
        &mut self,
        features: ArrayView2<f64>,
        labels: ArrayView1<f64>,
        learning_rate: f64,
        epochs: usize,
    ) -> Result<(), Error> {
        if features.nrows() != labels.len() {
            return Err(Error::SampleCountMismatch {
                samples: features.nrows(),
                labels: labels.len(),
            });
        }
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(Error::InvalidLearningRate(learning_rate));
        }

        if self.weights.is_empty() {
            self.weights = Array1::zeros(features.ncols());
        } else {
            self.check_feature_count(features.ncols())?;
        }

        self.errors.reserve(epochs);
        for _ in 0..epochs {
            let loss = self.step(features, labels, learning_rate)?;
            self.errors.push(loss);
        }

        Ok(())
    }

    fn step(
        &mut self,
        features: ArrayView2<f64>,
        labels: ArrayView1<f64>,
        learning_rate: f64,
    ) -> Result<f64, Error> {
        let predictions = self.predict(features)?;
        let loss = (self.loss)(predictions.view(), labels)?;

        let residuals = &predictions - &labels;
        let weights_gradient = features.t().dot(&residuals);
        let bias_gradient = residuals.sum();

        self.weights = &self.weights - learning_rate * weights_gradient;
        self.bias -= learning_rate * bias_gradient;

        Ok(loss)
    }

    fn check_feature_count(&self, actual: usize) -> Result<(), Error> {
        if actual == self.weights.len() {
            Ok(())
        } else {
            Err(Error::FeatureCountMismatch {
                expected: self.weights.len(),
                actual,
            })
        }
    }
}

impl<A, L> Predictor for SingleNeuron<A, L>
where
    A: Fn(f64) -> f64,
    L: Fn(ArrayView1<f64>, ArrayView1<f64>) -> Result<f64, Error>,
{
    fn predict(&self, features: ArrayView2<f64>) -> Result<Array1<f64>, Error> {
        SingleNeuron::predict(self, features)
    }
}
