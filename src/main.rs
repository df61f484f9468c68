use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use neuron::{
    dataset::{self, Feature, Species},
    neuron::{DEFAULT_EPOCHS, DEFAULT_LEARNING_RATE},
    plot::DEFAULT_RESOLUTION,
    LogisticRegression,
};

/// Trains a logistic-regression neuron on two iris species and plots its
/// decision boundary.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Feature columns to train on (two are needed for the plot)
    #[arg(long, value_delimiter = ',', default_value = "sepal_length,petal_length")]
    features: Vec<Feature>,

    #[arg(long, value_delimiter = ',', default_value = "setosa,virginica")]
    species: Vec<Species>,

    /// Label for each selected species, in order
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, default_value = "0,1")]
    labels: Vec<i32>,

    #[arg(long, default_value_t = DEFAULT_LEARNING_RATE)]
    learning_rate: f64,

    #[arg(long, default_value_t = DEFAULT_EPOCHS)]
    epochs: usize,

    /// Step of the prediction grid behind the plot
    #[arg(long, default_value_t = DEFAULT_RESOLUTION)]
    resolution: f64,

    #[arg(long, default_value = "plots/decision_boundary.png")]
    output: PathBuf,

    /// CSV with the iris header to use instead of the bundled table
    #[arg(long)]
    data: Option<PathBuf>,

    /// Train on raw measurements instead of z-scored columns
    #[arg(long)]
    raw: bool,

    /// Print the recorded loss every N epochs (0 disables)
    #[arg(long, default_value_t = 10)]
    log_every: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let records = match &args.data {
        Some(path) => dataset::load_records(File::open(path)?)?,
        None => dataset::iris_records()?,
    };

    let (mut features, labels) = dataset::iris_data_from(
        &records,
        Some(args.features.as_slice()),
        Some(args.species.as_slice()),
        Some(args.labels.as_slice()),
    )?;
    if !args.raw {
        dataset::standardize(&mut features);
    }

    let species = args
        .species
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "loaded {} samples x {} features ({species})",
        features.nrows(),
        features.ncols()
    );

    let mut model = LogisticRegression::new();
    model.train(features.view(), labels.view(), args.learning_rate, args.epochs)?;

    if args.log_every > 0 {
        for (epoch, loss) in model.errors.iter().enumerate() {
            if epoch % args.log_every == 0 {
                println!("epoch {epoch}: loss = {loss:.6}");
            }
        }
    }
    if let Some(loss) = model.errors.last() {
        println!("final loss: {loss:.6}");
    }

    let accuracy = model.accuracy(features.view(), labels.view())? * 100.0;
    println!("training accuracy: {accuracy:.3}%");

    if features.ncols() == 2 {
        if let Some(parent) = args.output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        model.plot_decision_boundary(
            features.view(),
            labels.view(),
            args.resolution,
            &args.output,
        )?;
        println!("decision boundary written to {}", args.output.display());
    } else {
        println!(
            "skipping decision boundary plot: needs 2 features, got {}",
            features.ncols()
        );
    }

    Ok(())
}
