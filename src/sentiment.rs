//! The tweet-sentiment classifier: two inputs (negativity, positivity),
//! one classification output, three interval type-2 terms per variable and
//! a 9-rule table.

use std::fmt;
use std::str::FromStr;

use crate::domain::{Domain, Interval};
use crate::error::Result;
use crate::inference::{Defuzz, Rulebase};
use crate::mf::{IntervalT2Trapezoidal, T1Trapezoidal};
use crate::rules::{Antecedent, Consequent, Rule};
use crate::variable::{InputKey, OutputKey, Variables};

// Trapezoid breakpoints shared by both inputs and the output: the lower
// envelopes sit strictly inside the upper ones.
const LOWER_LOW: [f64; 4] = [0.0, 0.0, 0.3, 0.433_333_333_333_333_3];
const UPPER_LOW: [f64; 4] = [0.0, 0.0, 0.3, 0.5];
const LOWER_MODERATE: [f64; 4] = [0.366_666_666_666_666_6, 0.45, 0.55, 0.633_333_333_333_333_3];
const UPPER_MODERATE: [f64; 4] = [0.3, 0.45, 0.55, 0.7];
const LOWER_HIGH: [f64; 4] = [0.566_666_666_666_666_6, 0.7, 1.0, 1.0];
const UPPER_HIGH: [f64; 4] = [0.5, 0.7, 1.0, 1.0];

/// Crisp classification labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Label {
    Negative,
    Neutral,
    Positive,
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Label::Negative => "negative",
            Label::Neutral => "neutral",
            Label::Positive => "positive",
        };
        f.write_str(s)
    }
}

impl FromStr for Label {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "negative" => Ok(Label::Negative),
            "neutral" => Ok(Label::Neutral),
            "positive" => Ok(Label::Positive),
            other => Err(format!("unknown label '{other}'")),
        }
    }
}

/// The assembled system: variables, term sets and rulebase.
pub struct SentimentFls {
    vars: Variables,
    negativity: InputKey,
    positivity: InputKey,
    classification: OutputKey,
    rulebase: Rulebase,
    // Term sets kept around for the record sink and the plotting consumer.
    negativity_terms: [IntervalT2Trapezoidal; 3],
    positivity_terms: [IntervalT2Trapezoidal; 3],
    classification_terms: [IntervalT2Trapezoidal; 3],
}

fn term(name: &str, upper: [f64; 4], lower: [f64; 4]) -> Result<IntervalT2Trapezoidal> {
    IntervalT2Trapezoidal::new(
        name,
        T1Trapezoidal::new(format!("upper {name}"), upper)?,
        T1Trapezoidal::new(format!("lower {name}"), lower)?,
    )
}

fn term_triple(of: &str) -> Result<[IntervalT2Trapezoidal; 3]> {
    Ok([
        term(&format!("low {of}"), UPPER_LOW, LOWER_LOW)?,
        term(&format!("moderate {of}"), UPPER_MODERATE, LOWER_MODERATE)?,
        term(&format!("high {of}"), UPPER_HIGH, LOWER_HIGH)?,
    ])
}

impl SentimentFls {
    pub fn new() -> Result<Self> {
        let unit = Domain::new(0., 1.)?;
        let mut vars = Variables::new();
        let negativity = vars.add_input("negativity", unit);
        let positivity = vars.add_input("positivity", unit);
        let classification = vars.add_output("classification", unit);

        let negativity_terms = term_triple("negativity")?;
        let positivity_terms = term_triple("positivity")?;
        let classification_terms = [
            term("negative", UPPER_LOW, LOWER_LOW)?,
            term("neutral", UPPER_MODERATE, LOWER_MODERATE)?,
            term("positive", UPPER_HIGH, LOWER_HIGH)?,
        ];

        let neg = |i: usize| {
            Antecedent::new(
                match i {
                    0 => "Low Negativity",
                    1 => "Moderate Negativity",
                    _ => "High Negativity",
                },
                negativity_terms[i].clone(),
                negativity,
            )
        };
        let pos = |i: usize| {
            Antecedent::new(
                match i {
                    0 => "Low Positivity",
                    1 => "Moderate Positivity",
                    _ => "High Positivity",
                },
                positivity_terms[i].clone(),
                positivity,
            )
        };
        let class = |i: usize| {
            Consequent::new(
                match i {
                    0 => "Negative",
                    1 => "Neutral",
                    _ => "Positive",
                },
                classification_terms[i].clone(),
                classification,
            )
        };

        // The 9-rule table: matching intensities cancel out to neutral,
        // mismatches tip the score toward the dominant side.
        const LOW: usize = 0;
        const MODERATE: usize = 1;
        const HIGH: usize = 2;
        const NEGATIVE: usize = 0;
        const NEUTRAL: usize = 1;
        const POSITIVE: usize = 2;
        let table: [(usize, usize, usize); 9] = [
            (LOW, LOW, NEUTRAL),
            (MODERATE, MODERATE, NEUTRAL),
            (HIGH, HIGH, NEUTRAL),
            (LOW, MODERATE, NEGATIVE),
            (LOW, HIGH, NEGATIVE),
            (MODERATE, HIGH, NEGATIVE),
            (MODERATE, LOW, POSITIVE),
            (HIGH, MODERATE, POSITIVE),
            (HIGH, LOW, POSITIVE),
        ];

        let mut rulebase = Rulebase::with_capacity(table.len());
        for (n, p, c) in table {
            rulebase.add_rule(Rule::new(vec![neg(n), pos(p)], class(c))?, &vars)?;
        }

        Ok(SentimentFls {
            vars,
            negativity,
            positivity,
            classification,
            rulebase,
            negativity_terms,
            positivity_terms,
            classification_terms,
        })
    }

    /// Crisp classification score via centroid defuzzification.
    pub fn score(&mut self, negativity: f64, positivity: f64) -> Result<f64> {
        Ok(self.score_interval(negativity, positivity)?.avg())
    }

    /// The type-reduced `[yL, yR]` before averaging.
    pub fn score_interval(&mut self, negativity: f64, positivity: f64) -> Result<Interval> {
        self.vars.set_input(self.negativity, negativity)?;
        self.vars.set_input(self.positivity, positivity)?;

        let mut intervals = self.rulebase.evaluate_intervals(&self.vars)?;
        Ok(intervals.remove(&self.classification).expect("classification output"))
    }

    /// Fast approximate score via height defuzzification.
    pub fn score_height(&mut self, negativity: f64, positivity: f64) -> Result<f64> {
        self.vars.set_input(self.negativity, negativity)?;
        self.vars.set_input(self.positivity, positivity)?;

        let crisp = self.rulebase.evaluate(&self.vars, Defuzz::Height)?;
        Ok(crisp[&self.classification])
    }

    /// Map a crisp score to a label: the output term whose averaged
    /// envelope membership at the score is largest. Earlier terms win
    /// two-way ties; a perfect three-way tie reads as neutral.
    pub fn classify(&self, score: f64) -> Label {
        let degrees: Vec<f64> = self
            .classification_terms
            .iter()
            .map(|mf| mf.membership_interval(score).avg())
            .collect();

        if degrees[0] == degrees[1] && degrees[1] == degrees[2] {
            return Label::Neutral;
        }

        let labels = [Label::Negative, Label::Neutral, Label::Positive];
        let mut best = 0;
        for i in 1..3 {
            if degrees[i] > degrees[best] {
                best = i;
            }
        }

        labels[best]
    }

    /// Envelope membership of each term at the score, for both the driver
    /// output rows and downstream debugging.
    pub fn classification_bounds(&self, score: f64) -> [Interval; 3] {
        [
            self.classification_terms[0].membership_interval(score),
            self.classification_terms[1].membership_interval(score),
            self.classification_terms[2].membership_interval(score),
        ]
    }

    pub fn negativity_terms(&self) -> &[IntervalT2Trapezoidal; 3] {
        &self.negativity_terms
    }

    pub fn positivity_terms(&self) -> &[IntervalT2Trapezoidal; 3] {
        &self.positivity_terms
    }

    pub fn classification_terms(&self) -> &[IntervalT2Trapezoidal; 3] {
        &self.classification_terms
    }

    pub fn classification_domain(&self) -> Domain {
        self.vars.output(self.classification).expect("registered output").domain()
    }

    /// Resolution knob for type-reduction (default 100 samples).
    pub fn set_discretization(&mut self, level: usize) {
        self.vars
            .set_discretization(self.classification, level)
            .expect("registered output");
    }

    pub fn rulebase(&self) -> &Rulebase {
        &self.rulebase
    }
}
