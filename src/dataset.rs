//! The iris demo dataset: loading, row/column selection and label mapping.

use std::fmt;
use std::io::Read;
use std::str::FromStr;

use csv::ReaderBuilder;
use ndarray::{Array1, Array2};
use serde::Deserialize;

use crate::error::Error;

const IRIS_CSV: &str = include_str!("../data/iris.csv");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    SepalLength,
    SepalWidth,
    PetalLength,
    PetalWidth,
}

impl Feature {
    pub const ALL: [Feature; 4] = [
        Feature::SepalLength,
        Feature::SepalWidth,
        Feature::PetalLength,
        Feature::PetalWidth,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Feature::SepalLength => "sepal_length",
            Feature::SepalWidth => "sepal_width",
            Feature::PetalLength => "petal_length",
            Feature::PetalWidth => "petal_width",
        }
    }

    fn value(self, record: &IrisRecord) -> f64 {
        match self {
            Feature::SepalLength => record.sepal_length,
            Feature::SepalWidth => record.sepal_width,
            Feature::PetalLength => record.petal_length,
            Feature::PetalWidth => record.petal_width,
        }
    }
}

impl FromStr for Feature {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Feature::ALL
            .into_iter()
            .find(|feature| feature.name() == name)
            .ok_or_else(|| Error::UnknownFeature(name.to_owned()))
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Setosa,
    Versicolor,
    Virginica,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Setosa, Species::Versicolor, Species::Virginica];

    pub fn name(self) -> &'static str {
        match self {
            Species::Setosa => "setosa",
            Species::Versicolor => "versicolor",
            Species::Virginica => "virginica",
        }
    }
}

impl FromStr for Species {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Species::ALL
            .into_iter()
            .find(|species| species.name() == name)
            .ok_or_else(|| Error::UnknownSpecies(name.to_owned()))
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of the iris table, in centimetres.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct IrisRecord {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
    pub species: Species,
}

/// Parses CSV that has the `sepal_length,sepal_width,petal_length,petal_width,species`
/// header.
pub fn load_records<R: Read>(reader: R) -> Result<Vec<IrisRecord>, Error> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let mut records = Vec::new();
    for result in reader.deserialize() {
        let record: IrisRecord = result?;
        records.push(record);
    }

    Ok(records)
}

/// The bundled 150-row iris table.
pub fn iris_records() -> Result<Vec<IrisRecord>, Error> {
    load_records(IRIS_CSV.as_bytes())
}

/// Feature matrix and label vector from the bundled table.
///
/// * `features`: columns to keep, in order; `None` keeps all four.
/// * `species`: rows to keep; `None` keeps every species in order of first
///   appearance. Row order of the table is preserved either way.
/// * `labels`: label for each entry of `species`; `None` numbers them
///   `0, 1, 2, ...`. Its length must match the species list.
pub fn iris_data(
    features: Option<&[Feature]>,
    species: Option<&[Species]>,
    labels: Option<&[i32]>,
) -> Result<(Array2<f64>, Array1<f64>), Error> {
    iris_data_from(&iris_records()?, features, species, labels)
}

/// Same selection as [`iris_data`] over already loaded records.
pub fn iris_data_from(
    records: &[IrisRecord],
    features: Option<&[Feature]>,
    species: Option<&[Species]>,
    labels: Option<&[i32]>,
) -> Result<(Array2<f64>, Array1<f64>), Error> {
    let species = match species {
        Some(species) => species.to_vec(),
        None => {
            let mut seen = Vec::new();
            for record in records {
                if !seen.contains(&record.species) {
                    seen.push(record.species);
                }
            }
            seen
        }
    };

    let labels: Vec<f64> = match labels {
        Some(labels) if labels.len() != species.len() => {
            return Err(Error::LabelCountMismatch {
                species: species.len(),
                labels: labels.len(),
            });
        }
        Some(labels) => labels.iter().copied().map(f64::from).collect(),
        None => (0..species.len()).map(|index| index as f64).collect(),
    };

    let features = features.unwrap_or(&Feature::ALL);

    // a species listed twice takes its last label
    let selected: Vec<(&IrisRecord, f64)> = records
        .iter()
        .filter_map(|record| {
            species
                .iter()
                .rposition(|&wanted| wanted == record.species)
                .map(|index| (record, labels[index]))
        })
        .collect();

    if selected.is_empty() {
        return Err(Error::EmptyDataset);
    }

    let samples = Array2::from_shape_fn((selected.len(), features.len()), |(row, column)| {
        features[column].value(selected[row].0)
    });
    let targets = selected.iter().map(|&(_, label)| label).collect::<Array1<f64>>();

    Ok((samples, targets))
}

/// Column-wise z-score: every column ends up with mean 0 and population
/// standard deviation 1. Constant columns are only centred.
pub fn standardize(features: &mut Array2<f64>) {
    for mut column in features.columns_mut() {
        let count = column.len() as f64;
        let mean = column.sum() / count;
        let variance = column.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / count;
        let std_dev = variance.sqrt();

        column.mapv_inplace(|x| {
            if std_dev > 0.0 {
                (x - mean) / std_dev
            } else {
                x - mean
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_table_has_three_balanced_species() {
        let records = iris_records().unwrap();

        assert_eq!(records.len(), 150);
        for species in Species::ALL {
            let count = records.iter().filter(|r| r.species == species).count();
            assert_eq!(count, 50);
        }
    }

    #[test]
    fn defaults_select_everything() {
        let (samples, targets) = iris_data(None, None, None).unwrap();

        assert_eq!(samples.dim(), (150, 4));
        assert_eq!(targets.len(), 150);
        assert!((targets[0] - 0.0).abs() < f64::EPSILON);
        assert!((targets[50] - 1.0).abs() < f64::EPSILON);
        assert!((targets[149] - 2.0).abs() < f64::EPSILON);
        assert_eq!(samples.row(0).to_vec(), vec![5.1, 3.5, 1.4, 0.2]);
    }

    #[test]
    fn selects_features_and_species_with_custom_labels() {
        let (samples, targets) = iris_data(
            Some(&[Feature::SepalLength, Feature::PetalLength]),
            Some(&[Species::Setosa, Species::Virginica]),
            Some(&[-1, 1]),
        )
        .unwrap();

        assert_eq!(samples.dim(), (100, 2));
        assert_eq!(samples.row(0).to_vec(), vec![5.1, 1.4]);
        assert_eq!(samples.row(50).to_vec(), vec![6.3, 6.0]);
        assert!(targets.iter().take(50).all(|&t| (t + 1.0).abs() < f64::EPSILON));
        assert!(targets.iter().skip(50).all(|&t| (t - 1.0).abs() < f64::EPSILON));
    }

    #[test]
    fn keeps_table_order_regardless_of_species_order() {
        let (samples, targets) = iris_data(
            Some(&[Feature::PetalWidth]),
            Some(&[Species::Virginica, Species::Versicolor]),
            None,
        )
        .unwrap();

        assert_eq!(samples.nrows(), 100);
        // versicolor rows come first in the table and map to label 1
        assert!((targets[0] - 1.0).abs() < f64::EPSILON);
        assert!(targets[99].abs() < f64::EPSILON);
        assert!((samples[(0, 0)] - 1.4).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_label_count_mismatch() {
        let result = iris_data(None, Some(&[Species::Setosa, Species::Virginica]), Some(&[0]));

        assert!(matches!(
            result,
            Err(Error::LabelCountMismatch {
                species: 2,
                labels: 1
            })
        ));
    }

    #[test]
    fn default_species_list_drives_label_count() {
        let result = iris_data(None, None, Some(&[0, 1]));

        assert!(matches!(
            result,
            Err(Error::LabelCountMismatch {
                species: 3,
                labels: 2
            })
        ));
    }

    #[test]
    fn empty_selection_is_an_error() {
        assert!(matches!(
            iris_data(None, Some(&[]), None),
            Err(Error::EmptyDataset)
        ));
    }

    #[test]
    fn parses_names() {
        assert_eq!("petal_width".parse::<Feature>().unwrap(), Feature::PetalWidth);
        assert_eq!("versicolor".parse::<Species>().unwrap(), Species::Versicolor);
        assert!(matches!(
            "petal_height".parse::<Feature>(),
            Err(Error::UnknownFeature(_))
        ));
        assert!(matches!("rose".parse::<Species>(), Err(Error::UnknownSpecies(_))));
        assert_eq!(Feature::SepalWidth.to_string(), "sepal_width");
    }

    #[test]
    fn loads_records_from_any_reader() {
        let csv = "sepal_length,sepal_width,petal_length,petal_width,species\n\
                   1.0,2.0,3.0,4.0,virginica\n";

        let records = load_records(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].species, Species::Virginica);
        assert!((records[0].petal_width - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn malformed_rows_surface_as_csv_errors() {
        let csv = "sepal_length,sepal_width,petal_length,petal_width,species\n\
                   1.0,2.0,3.0,4.0,tulip\n";

        assert!(matches!(load_records(csv.as_bytes()), Err(Error::Csv(_))));
    }

    #[test]
    fn standardize_centres_and_scales_columns() {
        let mut samples = ndarray::array![[1.0, 5.0], [2.0, 5.0], [3.0, 5.0], [6.0, 5.0]];

        standardize(&mut samples);

        let first = samples.column(0);
        let mean = first.sum() / 4.0;
        let variance = first.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / 4.0;
        assert!(mean.abs() < 1e-12);
        assert!((variance - 1.0).abs() < 1e-12);
        assert!(samples.column(1).iter().all(|x| x.abs() < 1e-12));
    }
}
