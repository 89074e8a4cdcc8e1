//! Record source/sink for the batch driver.
//!
//! Input records are comma-separated lines (the `final_clean.csv` layout);
//! result rows are semicolon-separated. Accuracy against the ground-truth
//! label is tracked in an explicit accumulator owned by the caller.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::domain::Interval;
use crate::error::{FuzzyError, Result};
use crate::sentiment::Label;

/// One labeled measurement row from the dataset.
#[derive(Clone, Debug)]
pub struct Record {
    pub tweet_id: String,
    pub ground_truth: Label,
    pub positivity: f64,
    pub negativity: f64,
}

// Field layout of the cleaned dataset.
const FIELD_TWEET_ID: usize = 1;
const FIELD_LABEL: usize = 3;
const FIELD_POSITIVITY: usize = 4;
const FIELD_NEGATIVITY: usize = 5;
const MIN_FIELDS: usize = 6;

impl Record {
    /// Parse one comma-separated dataset line. `line_no` is 1-based and
    /// only used for error reporting.
    pub fn parse(line: &str, line_no: usize) -> Result<Self> {
        let fields: Vec<&str> = line.split(',').collect();

        if fields.len() < MIN_FIELDS {
            return Err(FuzzyError::MalformedRecord {
                line: line_no,
                reason: format!("expected at least {MIN_FIELDS} fields, found {}", fields.len()),
            });
        }

        let number = |index: usize, what: &str| -> Result<f64> {
            fields[index].trim().parse().map_err(|_| FuzzyError::MalformedRecord {
                line: line_no,
                reason: format!("{what} '{}' is not a number", fields[index]),
            })
        };

        Ok(Record {
            tweet_id: fields[FIELD_TWEET_ID].trim().to_owned(),
            ground_truth: fields[FIELD_LABEL]
                .parse()
                .map_err(|reason| FuzzyError::MalformedRecord { line: line_no, reason })?,
            positivity: number(FIELD_POSITIVITY, "positivity")?,
            negativity: number(FIELD_NEGATIVITY, "negativity")?,
        })
    }
}

/// Iterate records from a reader, yielding per-line parse results so a
/// caller can skip bad rows without aborting the batch.
pub fn read_records<R: Read>(reader: R) -> impl Iterator<Item = Result<Record>> {
    BufReader::new(reader)
        .lines()
        .enumerate()
        .map(|(i, line)| Record::parse(&line?, i + 1))
}

/// Open `path` and iterate its records.
pub fn read_records_from(path: impl AsRef<Path>) -> Result<impl Iterator<Item = Result<Record>>> {
    Ok(read_records(File::open(path)?))
}

/// One evaluated row of the result file.
#[derive(Clone, Debug)]
pub struct ResultRow {
    pub sequence: usize,
    pub record: Record,
    pub score: f64,
    /// Envelope values of the low/moderate/high positivity terms at the
    /// positivity measurement.
    pub positivity_bounds: [Interval; 3],
    /// Likewise for the negativity terms.
    pub negativity_bounds: [Interval; 3],
    /// Envelope values of the negative/neutral/positive output terms at
    /// the crisp score.
    pub classification_bounds: [Interval; 3],
    pub label: Label,
}

impl ResultRow {
    pub const HEADER: &str = "sequence; ground_truth; tweet_id; positivity; negativity; score; \
         lower_low_positivity; upper_low_positivity; lower_moderate_positivity; upper_moderate_positivity; \
         lower_high_positivity; upper_high_positivity; lower_low_negativity; upper_low_negativity; \
         lower_moderate_negativity; upper_moderate_negativity; lower_high_negativity; upper_high_negativity; \
         lower_negative_classification; upper_negative_classification; lower_neutral_classification; \
         upper_neutral_classification; lower_positive_classification; upper_positive_classification; \
         label; matched";

    pub fn matched(&self) -> bool {
        self.label == self.record.ground_truth
    }

    /// Render the semicolon-separated result line.
    pub fn to_delimited(&self) -> String {
        let mut out = format!(
            "{}; {}; {}; {}; {}; {}",
            self.sequence,
            self.record.ground_truth,
            self.record.tweet_id,
            self.record.positivity,
            self.record.negativity,
            self.score,
        );

        for bounds in [
            &self.positivity_bounds,
            &self.negativity_bounds,
            &self.classification_bounds,
        ] {
            for iv in bounds.iter() {
                out.push_str(&format!("; {}; {}", iv.lower, iv.upper));
            }
        }

        out.push_str(&format!("; {}; {}", self.label, u8::from(self.matched())));
        out
    }
}

/// Running match count against the ground truth.
#[derive(Clone, Copy, Debug, Default)]
pub struct Accuracy {
    matches: usize,
    total: usize,
}

impl Accuracy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, matched: bool) {
        self.total += 1;
        if matched {
            self.matches += 1;
        }
    }

    pub fn matches(&self) -> usize {
        self.matches
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.
        } else {
            self.matches as f64 / self.total as f64
        }
    }
}
