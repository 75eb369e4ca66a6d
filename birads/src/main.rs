//! `birads` command-line tool
//!
//! ```text
//! birads [--log-level L] [--json] evaluate <CORPUS>
//! birads [--log-level L] [--json] classify <CORPUS> <IMAGE>... [--region X,Y[,W,H]]
//! ```

use birads::classify::ClassifyError;
use birads::io::load_gray_image;
use birads::logging::{LogLevel, init_logging};
use birads::region::parse_region;
use birads::report::{ClassificationRecord, EvaluationRecord, render_classification, render_report};
use birads::{BiradsClassifier, Rect, TrainOptions};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "birads", version, about = "Texture-based BIRADS category classifier")]
struct Cli {
    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Seed for the train/held-out shuffle
    #[arg(long, global = true, env = "BIRADS_SEED")]
    seed: Option<u64>,

    /// Value added to each covariance diagonal before inversion
    #[arg(long, global = true, default_value_t = 0.0)]
    ridge: f64,

    /// Fraction of each class used for training
    #[arg(long, global = true, default_value_t = 0.75)]
    train_fraction: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Train on a corpus and report the held-out evaluation
    Evaluate {
        /// Corpus root with subdirectories 1 to 4
        corpus: PathBuf,
    },
    /// Train on a corpus, then classify images
    Classify {
        /// Corpus root with subdirectories 1 to 4
        corpus: PathBuf,

        /// Images to classify
        #[arg(required = true)]
        images: Vec<PathBuf>,

        /// Classify only this region, given as X,Y,W,H or as X,Y for a
        /// 128x128 square
        #[arg(long, value_name = "X,Y[,W,H]", value_parser = parse_region)]
        region: Option<Rect>,
    },
}

impl Cli {
    fn train_options(&self) -> TrainOptions {
        let mut options = TrainOptions::new()
            .with_ridge(self.ridge)
            .with_train_fraction(self.train_fraction);
        if let Some(seed) = self.seed {
            options = options.with_seed(seed);
        }
        options
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), ClassifyError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| ClassifyError::InvalidParameter(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

fn run(cli: &Cli) -> Result<(), ClassifyError> {
    let mut classifier = BiradsClassifier::with_options(cli.train_options());
    match &cli.command {
        Command::Evaluate { corpus } => {
            let report = classifier.train_from_dir(corpus)?;
            if cli.json {
                print_json(&EvaluationRecord::from(&report))?;
            } else {
                println!("{}", render_report(&report));
            }
        }
        Command::Classify {
            corpus,
            images,
            region,
        } => {
            classifier.train_from_dir(corpus)?;
            let mut records = Vec::with_capacity(images.len());
            for path in images {
                let result = match region {
                    Some(rect) => classifier.classify_region(&load_gray_image(path)?, *rect)?,
                    None => classifier.classify_file(path)?,
                };
                if cli.json {
                    records.push(ClassificationRecord::new(path, &result));
                } else if images.len() == 1 {
                    println!("{}", render_classification(&result));
                } else {
                    println!("{}: {}", path.display(), render_classification(&result));
                }
            }
            if cli.json {
                print_json(&records)?;
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);
    debug!(command = ?cli.command, "parsed arguments");

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
