use std::path::Path;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::Error;
use crate::neuron::Predictor;

pub const DEFAULT_RESOLUTION: f64 = 0.01;

/// Space added on every side of the data when laying out the grid.
const PADDING: f64 = 1.0;
const SURFACE_OPACITY: f64 = 0.3;
const IMAGE_SIZE: (u32, u32) = (1000, 600);
const POINT_SIZE: u32 = 5;

/// Predictions of a model over a regular grid covering 2-D data.
#[derive(Debug, Clone)]
pub struct DecisionSurface {
    pub xs: Array1<f64>,
    pub ys: Array1<f64>,
    /// `values[(row, column)]` is the prediction at `(xs[column], ys[row])`.
    pub values: Array2<f64>,
    pub resolution: f64,
}

fn padded_range(column: ArrayView1<f64>) -> (f64, f64) {
    let min = column.iter().copied().fold(f64::INFINITY, f64::min);
    let max = column.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    (min - PADDING, max + PADDING)
}

impl DecisionSurface {
    pub fn compute<P>(
        predictor: &P,
        features: ArrayView2<f64>,
        resolution: f64,
    ) -> Result<Self, Error>
    where
        P: Predictor + ?Sized,
    {
        if features.ncols() != 2 {
            return Err(Error::FeatureCountMismatch {
                expected: 2,
                actual: features.ncols(),
            });
        }
        if features.nrows() == 0 {
            return Err(Error::EmptyDataset);
        }
        if !(resolution.is_finite() && resolution > 0.0) {
            return Err(Error::InvalidResolution(resolution));
        }

        let (x_min, x_max) = padded_range(features.column(0));
        let (y_min, y_max) = padded_range(features.column(1));
        let xs = Array1::range(x_min, x_max, resolution);
        let ys = Array1::range(y_min, y_max, resolution);

        let columns = xs.len();
        let grid = Array2::from_shape_fn((xs.len() * ys.len(), 2), |(point, axis)| {
            if axis == 0 {
                xs[point % columns]
            } else {
                ys[point / columns]
            }
        });

        let predictions = predictor.predict(grid.view())?;
        if predictions.len() != grid.nrows() {
            return Err(Error::LengthMismatch {
                predictions: predictions.len(),
                targets: grid.nrows(),
            });
        }
        let values = Array2::from_shape_vec((ys.len(), columns), predictions.to_vec())
            .map_err(|err| Error::Plot(err.to_string()))?;

        Ok(Self {
            xs,
            ys,
            values,
            resolution,
        })
    }

    fn value_range(&self) -> (f64, f64) {
        let min = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        (min, max)
    }
}

/// Maps `t` in `[0, 1]` onto a blue - grey - red diverging ramp.
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
fn cool_warm(t: f64) -> RGBColor {
    const COOL: (f64, f64, f64) = (59.0, 76.0, 192.0);
    const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
    const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

    let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) };
    let (from, to, local) = if t < 0.5 {
        (COOL, NEUTRAL, t * 2.0)
    } else {
        (NEUTRAL, WARM, (t - 0.5) * 2.0)
    };
    let channel = |a: f64, b: f64| (a + (b - a) * local).round() as u8;

    RGBColor(
        channel(from.0, to.0),
        channel(from.1, to.1),
        channel(from.2, to.2),
    )
}

fn normalize(value: f64, (min, max): (f64, f64)) -> f64 {
    if max > min {
        (value - min) / (max - min)
    } else {
        0.5
    }
}

/// Filled prediction surface with the samples scattered on top.
pub fn draw_decision_boundary<DB>(
    surface: &DecisionSurface,
    features: ArrayView2<f64>,
    labels: ArrayView1<f64>,
    drawing_area: &DrawingArea<DB, Shift>,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    <DB as DrawingBackend>::ErrorType: 'static,
{
    drawing_area.fill(&WHITE)?;

    let x_start = surface.xs.first().copied().unwrap_or(0.0);
    let y_start = surface.ys.first().copied().unwrap_or(0.0);
    let x_end = surface.xs.last().copied().unwrap_or(x_start) + surface.resolution;
    let y_end = surface.ys.last().copied().unwrap_or(y_start) + surface.resolution;

    let mut chart_context = ChartBuilder::on(drawing_area)
        .caption("Decision Boundary", ("sans-serif", 24))
        .set_all_label_area_size(50)
        .margin(20)
        .build_cartesian_2d(x_start..x_end, y_start..y_end)?;

    chart_context
        .configure_mesh()
        .disable_mesh()
        .x_labels(10)
        .x_desc("Feature 1")
        .y_labels(10)
        .y_desc("Feature 2")
        .draw()?;

    let value_range = surface.value_range();
    let step = surface.resolution;
    chart_context.draw_series(surface.values.indexed_iter().map(|((row, column), &value)| {
        let x = surface.xs[column];
        let y = surface.ys[row];

        Rectangle::new(
            [(x, y), (x + step, y + step)],
            cool_warm(normalize(value, value_range))
                .mix(SURFACE_OPACITY)
                .filled(),
        )
    }))?;

    let mut classes: Vec<f64> = labels.to_vec();
    classes.sort_by(f64::total_cmp);
    classes.dedup();
    let class_range = (
        classes.first().copied().unwrap_or(0.0),
        classes.last().copied().unwrap_or(0.0),
    );

    for class in classes {
        let color = cool_warm(normalize(class, class_range));
        let points = features
            .rows()
            .into_iter()
            .zip(labels.iter())
            .filter(|(_, &label)| label.total_cmp(&class).is_eq())
            .map(|(sample, _)| {
                EmptyElement::at((sample[0], sample[1]))
                    + Circle::new((0, 0), POINT_SIZE, color.filled())
                    + Circle::new((0, 0), POINT_SIZE, BLACK.stroke_width(1))
            })
            .collect::<Vec<_>>();

        chart_context
            .draw_series(points)?
            .label(format!("class {class}"))
            .legend(move |(x, y)| Circle::new((x, y), POINT_SIZE, color.filled()));
    }

    chart_context
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    Ok(())
}

/// Renders the decision boundary of `predictor` over `features` into a PNG.
pub fn plot_decision_boundary<P>(
    predictor: &P,
    features: ArrayView2<f64>,
    labels: ArrayView1<f64>,
    resolution: f64,
    path: &Path,
) -> Result<(), Error>
where
    P: Predictor + ?Sized,
{
    if features.nrows() != labels.len() {
        return Err(Error::SampleCountMismatch {
            samples: features.nrows(),
            labels: labels.len(),
        });
    }

    let surface = DecisionSurface::compute(predictor, features, resolution)?;

    let root = BitMapBackend::new(path, IMAGE_SIZE).into_drawing_area();
    draw_decision_boundary(&surface, features, labels, &root)
        .map_err(|err| Error::Plot(err.to_string()))?;
    root.present().map_err(|err| Error::Plot(err.to_string()))?;

    Ok(())
}
