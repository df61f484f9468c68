use std::path::Path;

use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::activation::sigmoid;
use crate::error::Error;
use crate::loss::binary_cross_entropy;
use crate::neuron::{Predictor, SingleNeuron};
use crate::plot;

pub type ActivationFn = fn(f64) -> f64;
pub type LossFn = fn(ArrayView1<f64>, ArrayView1<f64>) -> Result<f64, Error>;
pub type LogisticNeuron = SingleNeuron<ActivationFn, LossFn>;

const DECISION_THRESHOLD: f64 = 0.5;

/// Binary classifier over 0/1 labels backed by one sigmoid neuron trained on
/// cross-entropy.
pub struct LogisticRegression {
    neuron: LogisticNeuron,
    /// Per-epoch training loss, copied from the neuron after each `train`.
    pub errors: Vec<f64>,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LogisticRegression {
    pub fn new() -> Self {
        Self {
            neuron: SingleNeuron::new(sigmoid as ActivationFn, binary_cross_entropy as LossFn),
            errors: Vec::new(),
        }
    }

    pub fn neuron(&self) -> &LogisticNeuron {
        &self.neuron
    }

    pub fn train(
        &mut self,
        features: ArrayView2<f64>,
        labels: ArrayView1<f64>,
        learning_rate: f64,
        epochs: usize,
    ) -> Result<(), Error> {
        self.neuron.train(features, labels, learning_rate, epochs)?;
        self.errors = self.neuron.errors().to_vec();

        Ok(())
    }

    /// Probability of class 1 for every sample.
    pub fn predict(&self, features: ArrayView2<f64>) -> Result<Array1<f64>, Error> {
        self.neuron.predict(features)
    }

    pub fn classify(&self, features: ArrayView2<f64>) -> Result<Array1<f64>, Error> {
        let probabilities = self.predict(features)?;

        Ok(probabilities.mapv(|probability| {
            if probability >= DECISION_THRESHOLD {
                1.0
            } else {
                0.0
            }
        }))
    }

    /// Fraction of samples whose thresholded prediction matches the label.
    pub fn accuracy(
        &self,
        features: ArrayView2<f64>,
        labels: ArrayView1<f64>,
    ) -> Result<f64, Error> {
        let classes = self.classify(features)?;
        if classes.len() != labels.len() {
            return Err(Error::SampleCountMismatch {
                samples: classes.len(),
                labels: labels.len(),
            });
        }
        if labels.is_empty() {
            return Err(Error::EmptyDataset);
        }

        let correct_predictions = classes
            .iter()
            .zip(labels.iter())
            .filter(|(&predicted, &label)| (predicted - label).abs() < f64::EPSILON)
            .count();

        Ok(correct_predictions as f64 / labels.len() as f64)
    }

    pub fn plot_decision_boundary(
        &self,
        features: ArrayView2<f64>,
        labels: ArrayView1<f64>,
        resolution: f64,
        path: &Path,
    ) -> Result<(), Error> {
        plot::plot_decision_boundary(&self.neuron, features, labels, resolution, path)
    }
}

impl Predictor for LogisticRegression {
    fn predict(&self, features: ArrayView2<f64>) -> Result<Array1<f64>, Error> {
        LogisticRegression::predict(self, features)
    }
}
