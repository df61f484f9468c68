pub mod activation;
pub mod dataset;
pub mod error;
pub mod logistic_regression;
pub mod loss;
pub mod neuron;
pub mod plot;

pub use error::Error;
pub use logistic_regression::LogisticRegression;
pub use neuron::{Predictor, SingleNeuron};
