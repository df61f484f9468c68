use std::error;
use std::fmt;
use std::io;

#[derive(Debug)]
pub enum Error {
    /// Paired prediction/target sequences of different lengths.
    LengthMismatch { predictions: usize, targets: usize },
    SampleCountMismatch { samples: usize, labels: usize },
    FeatureCountMismatch { expected: usize, actual: usize },
    /// Cross-entropy evaluated at a probability outside the open interval (0, 1).
    ProbabilityOutOfRange { index: usize, value: f64 },
    InvalidLearningRate(f64),
    InvalidResolution(f64),
    EmptyDataset,
    LabelCountMismatch { species: usize, labels: usize },
    UnknownFeature(String),
    UnknownSpecies(String),
    Csv(csv::Error),
    Io(io::Error),
    Plot(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::LengthMismatch {
                predictions,
                targets,
            } => write!(
                f,
                "length mismatch: {predictions} predictions but {targets} targets"
            ),
            Error::SampleCountMismatch { samples, labels } => write!(
                f,
                "shape mismatch: {samples} samples but {labels} labels"
            ),
            Error::FeatureCountMismatch { expected, actual } => write!(
                f,
                "shape mismatch: expected {expected} features per sample, got {actual}"
            ),
            Error::ProbabilityOutOfRange { index, value } => write!(
                f,
                "numeric domain error: prediction {value} at index {index} is not strictly between 0 and 1"
            ),
            Error::InvalidLearningRate(rate) => {
                write!(f, "learning rate must be positive and finite, got {rate}")
            }
            Error::InvalidResolution(resolution) => {
                write!(f, "grid resolution must be positive and finite, got {resolution}")
            }
            Error::EmptyDataset => write!(f, "dataset contains no samples"),
            Error::LabelCountMismatch { species, labels } => write!(
                f,
                "length of labels ({labels}) must match the length of species ({species})"
            ),
            Error::UnknownFeature(name) => write!(
                f,
                "unknown feature `{name}`, expected one of sepal_length, sepal_width, petal_length, petal_width"
            ),
            Error::UnknownSpecies(name) => write!(
                f,
                "unknown species `{name}`, expected one of setosa, versicolor, virginica"
            ),
            Error::Csv(err) => write!(f, "csv error: {err}"),
            Error::Io(err) => write!(f, "io error: {err}"),
            Error::Plot(message) => write!(f, "plot error: {message}"),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::Csv(err) => Some(err),
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::Csv(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_sizes() {
        let message = Error::SampleCountMismatch {
            samples: 4,
            labels: 3,
        }
        .to_string();

        assert!(message.contains('4'));
        assert!(message.contains('3'));
    }

    #[test]
    fn io_errors_keep_their_source() {
        let err = Error::from(io::Error::new(io::ErrorKind::NotFound, "missing"));

        assert!(error::Error::source(&err).is_some());
        assert!(error::Error::source(&Error::EmptyDataset).is_none());
    }
}
