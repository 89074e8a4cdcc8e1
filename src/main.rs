//! Batch sentiment classification over a labeled dataset.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::warn;

use it2fls::dataset::{read_records_from, Accuracy, ResultRow};
use it2fls::sentiment::SentimentFls;

#[derive(Parser)]
#[command(name = "sentiment")]
#[command(about = "Interval type-2 fuzzy sentiment classifier", long_about = None)]
struct Cli {
    /// Input dataset (comma-separated records)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Result file (semicolon-separated rows)
    #[arg(short, long, default_value = "output.csv")]
    output: PathBuf,

    /// Defuzzification mode
    #[arg(short, long, value_enum, default_value = "centroid")]
    mode: Mode,

    /// Output-domain samples used for type-reduction
    #[arg(short, long, default_value = "100")]
    discretization: usize,

    /// Print the rulebase before processing
    #[arg(long)]
    rules: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    Height,
    Centroid,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    let mut fls = SentimentFls::new().context("building the sentiment system")?;
    fls.set_discretization(cli.discretization);

    if cli.rules {
        println!("{}", fls.rulebase());
    }

    let records = read_records_from(&cli.input)
        .with_context(|| format!("opening {}", cli.input.display()))?;
    let mut out = BufWriter::new(
        File::create(&cli.output).with_context(|| format!("creating {}", cli.output.display()))?,
    );
    writeln!(out, "{}", ResultRow::HEADER)?;

    let mut accuracy = Accuracy::new();
    let mut sequence = 0;

    for record in records {
        // A failing record is reported and skipped, never fatal to the batch.
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                warn!(%err, "skipping malformed record");
                continue;
            },
        };

        sequence += 1;
        let score = match cli.mode {
            Mode::Centroid => fls.score(record.negativity, record.positivity),
            Mode::Height => fls.score_height(record.negativity, record.positivity),
        };
        let score = match score {
            Ok(score) => score,
            Err(err) => {
                warn!(%err, tweet_id = %record.tweet_id, "skipping record");
                continue;
            },
        };

        let row = ResultRow {
            sequence,
            positivity_bounds: bounds(fls.positivity_terms(), record.positivity),
            negativity_bounds: bounds(fls.negativity_terms(), record.negativity),
            classification_bounds: fls.classification_bounds(score),
            label: fls.classify(score),
            score,
            record,
        };

        accuracy.record(row.matched());
        writeln!(out, "{}", row.to_delimited())?;
    }

    out.flush()?;
    println!(
        "{} records, {} matched ground truth ({:.1}%)",
        accuracy.total(),
        accuracy.matches(),
        accuracy.ratio() * 100.,
    );

    Ok(())
}

fn bounds(terms: &[it2fls::IntervalT2Trapezoidal; 3], x: f64) -> [it2fls::Interval; 3] {
    [
        terms[0].membership_interval(x),
        terms[1].membership_interval(x),
        terms[2].membership_interval(x),
    ]
}
