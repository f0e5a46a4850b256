//! Command-line entry point: one sequential scoring run.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use sentir::pipeline::{self, PipelineConfig};

/// Blended Naive Bayes + SGD sentiment scoring over TF-IDF review features.
#[derive(Parser, Debug)]
#[command(name = "sentir", version, about)]
struct Cli {
    /// Labeled training reviews (TSV: id, sentiment, review)
    #[arg(long, default_value = "data/labeledTrainData.tsv")]
    train: PathBuf,

    /// Unlabeled training reviews (TSV: id, review)
    #[arg(long, default_value = "data/unlabeledTrainData.tsv")]
    unlabeled: PathBuf,

    /// Test reviews to score (TSV: id, review)
    #[arg(long, default_value = "data/testData.tsv")]
    test: PathBuf,

    /// Submission output (CSV: id, sentiment)
    #[arg(long, default_value = "data/submit_200_4.csv")]
    output: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = PipelineConfig {
        train: cli.train,
        unlabeled: cli.unlabeled,
        test: cli.test,
        output: cli.output,
    };

    if let Err(err) = pipeline::run(&config) {
        eprintln!("{err}");
        process::exit(1);
    }
}
