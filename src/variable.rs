//! Input and output variables.
//!
//! Variables live in a slotmap registry; antecedents and consequents hold
//! typed keys into it rather than references, so rules stay `'static` and
//! the only mutable state during evaluation is each input's current value.

use slotmap::{new_key_type, SlotMap};
use tracing::warn;

use crate::domain::Domain;
use crate::error::{FuzzyError, Result};

new_key_type! {
    /// Key of a registered input variable.
    pub struct InputKey;

    /// Key of a registered output variable.
    pub struct OutputKey;
}

/// Default number of samples taken across an output domain when building
/// the aggregated set for type-reduction.
pub const DEFAULT_DISCRETIZATION: usize = 100;

/// An input variable holding the current crisp measurement.
#[derive(Clone, Debug)]
pub struct Input {
    name: String,
    domain: Domain,
    value: f64,
}

impl Input {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// An output variable; `discretization` is the resolution knob for
/// centroid defuzzification.
#[derive(Clone, Debug)]
pub struct Output {
    name: String,
    domain: Domain,
    discretization: usize,
}

impl Output {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn discretization(&self) -> usize {
        self.discretization
    }
}

/// Registry of all inputs and outputs of one system.
#[derive(Default)]
pub struct Variables {
    inputs: SlotMap<InputKey, Input>,
    outputs: SlotMap<OutputKey, Output>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_input(&mut self, name: impl Into<String>, domain: Domain) -> InputKey {
        self.inputs.insert(Input {
            name: name.into(),
            domain,
            // No measurement yet; start at the bottom of the universe.
            value: domain.low(),
        })
    }

    pub fn add_output(&mut self, name: impl Into<String>, domain: Domain) -> OutputKey {
        self.outputs.insert(Output {
            name: name.into(),
            domain,
            discretization: DEFAULT_DISCRETIZATION,
        })
    }

    /// Set the crisp value of an input before evaluation.
    ///
    /// Out-of-domain values are clamped; membership outside the domain is
    /// zero anyway, so clamping is safe, but it is worth a warning since it
    /// usually means a scaling bug upstream. A key from another registry is
    /// an [`FuzzyError::UnregisteredVariable`] error, same as in rules.
    pub fn set_input(&mut self, key: InputKey, value: f64) -> Result<()> {
        let input = self.inputs.get_mut(key).ok_or_else(|| FuzzyError::UnregisteredVariable {
            clause: "input".to_owned(),
        })?;

        if !input.domain.contains(value) {
            warn!(
                input = input.name.as_str(),
                value,
                low = input.domain.low(),
                high = input.domain.high(),
                "input outside its domain, clamping"
            );
        }

        input.value = input.domain.clamp(value);
        Ok(())
    }

    /// Raise or lower the sampling resolution of an output.
    pub fn set_discretization(&mut self, key: OutputKey, level: usize) -> Result<()> {
        let output = self.outputs.get_mut(key).ok_or_else(|| FuzzyError::UnregisteredVariable {
            clause: "output".to_owned(),
        })?;

        // A single sample collapses the centroid to that point; two is the
        // minimum that still spans the domain.
        output.discretization = level.max(2);
        Ok(())
    }

    pub fn input(&self, key: InputKey) -> Option<&Input> {
        self.inputs.get(key)
    }

    pub fn output(&self, key: OutputKey) -> Option<&Output> {
        self.outputs.get(key)
    }
}
