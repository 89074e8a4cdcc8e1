//! Antecedents, consequents and rules.

use std::fmt;

use crate::domain::Interval;
use crate::error::{FuzzyError, Result};
use crate::mf::IntervalT2Trapezoidal;
use crate::variable::{InputKey, OutputKey, Variables};

/// An "if" clause: a linguistic term bound to an input variable.
#[derive(Clone, Debug)]
pub struct Antecedent {
    name: String,
    mf: IntervalT2Trapezoidal,
    input: InputKey,
}

impl Antecedent {
    pub fn new(name: impl Into<String>, mf: IntervalT2Trapezoidal, input: InputKey) -> Self {
        Antecedent {
            name: name.into(),
            mf,
            input,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn input(&self) -> InputKey {
        self.input
    }

    /// Membership interval of the bound input's current value. Pure; reads
    /// variable state at call time only.
    pub fn fire(&self, vars: &Variables) -> Result<Interval> {
        let input = vars.input(self.input).ok_or_else(|| FuzzyError::UnregisteredVariable {
            clause: self.name.clone(),
        })?;

        Ok(self.mf.membership_interval(input.value()))
    }
}

/// A "then" clause: the implied fuzzy set contributed to an output when the
/// owning rule fires.
#[derive(Clone, Debug)]
pub struct Consequent {
    name: String,
    mf: IntervalT2Trapezoidal,
    output: OutputKey,
}

impl Consequent {
    pub fn new(name: impl Into<String>, mf: IntervalT2Trapezoidal, output: OutputKey) -> Self {
        Consequent {
            name: name.into(),
            mf,
            output,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mf(&self) -> &IntervalT2Trapezoidal {
        &self.mf
    }

    pub fn output(&self) -> OutputKey {
        self.output
    }

    pub fn peak(&self) -> f64 {
        self.mf.peak()
    }
}

/// A conjunction of antecedents implying one consequent.
#[derive(Clone, Debug)]
pub struct Rule {
    antecedents: Vec<Antecedent>,
    consequent: Consequent,
}

impl Rule {
    pub fn new(antecedents: Vec<Antecedent>, consequent: Consequent) -> Result<Self> {
        if antecedents.is_empty() {
            return Err(FuzzyError::EmptyRule {
                consequent: consequent.name().to_owned(),
            });
        }

        Ok(Rule {
            antecedents,
            consequent,
        })
    }

    pub fn antecedents(&self) -> &[Antecedent] {
        &self.antecedents
    }

    pub fn consequent(&self) -> &Consequent {
        &self.consequent
    }

    /// Firing strength of the rule: the minimum t-norm over all antecedent
    /// intervals, applied to lower and upper bounds independently.
    pub fn firing_interval(&self, vars: &Variables) -> Result<Interval> {
        let mut fired = self.antecedents[0].fire(vars)?;

        for antecedent in &self.antecedents[1..] {
            fired = fired.min(&antecedent.fire(vars)?);
        }

        Ok(fired)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IF ")?;
        for (i, antecedent) in self.antecedents.iter().enumerate() {
            if i > 0 {
                write!(f, " AND ")?;
            }
            write!(f, "{}", antecedent.name())?;
        }
        write!(f, " THEN {}", self.consequent.name())
    }
}
