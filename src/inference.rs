//! Rulebase aggregation and evaluation.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::domain::Interval;
use crate::error::{FuzzyError, Result};
use crate::reduction;
use crate::rules::Rule;
use crate::variable::{OutputKey, Variables};

/// Defuzzification mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Defuzz {
    /// Firing-strength-weighted centroid of consequent peaks. Closed form,
    /// O(rules), no type-reduction.
    Height,
    /// Full aggregation over the discretized output domain followed by
    /// Karnik--Mendel type-reduction.
    Centroid,
}

/// All rules of one system.
///
/// Immutable after setup; evaluation scratch (the aggregated envelope
/// buffers) is call-local, so concurrent evaluations against one rulebase
/// only contend on the caller-owned `Variables`.
#[derive(Default)]
pub struct Rulebase {
    rules: Vec<Rule>,
}

impl Rulebase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rulebase {
            rules: Vec::with_capacity(capacity),
        }
    }

    /// Add a rule, failing fast if any clause references a variable that is
    /// not registered in `vars`.
    pub fn add_rule(&mut self, rule: Rule, vars: &Variables) -> Result<()> {
        for antecedent in rule.antecedents() {
            if vars.input(antecedent.input()).is_none() {
                return Err(FuzzyError::UnregisteredVariable {
                    clause: antecedent.name().to_owned(),
                });
            }
        }
        if vars.output(rule.consequent().output()).is_none() {
            return Err(FuzzyError::UnregisteredVariable {
                clause: rule.consequent().name().to_owned(),
            });
        }

        self.rules.push(rule);
        Ok(())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Evaluate every output referenced by the rulebase against the current
    /// input values, returning one crisp value per output.
    pub fn evaluate(&self, vars: &Variables, mode: Defuzz) -> Result<HashMap<OutputKey, f64>> {
        let mut crisp = HashMap::new();

        for key in self.output_keys() {
            let value = match mode {
                Defuzz::Height => self.height_defuzz(vars, key)?,
                Defuzz::Centroid => self.type_reduce(vars, key)?.avg(),
            };
            crisp.insert(key, value);
        }

        Ok(crisp)
    }

    /// The richer centroid-mode call: the pre-averaged type-reduced
    /// interval `[yL, yR]` per output.
    pub fn evaluate_intervals(&self, vars: &Variables) -> Result<HashMap<OutputKey, Interval>> {
        let mut intervals = HashMap::new();

        for key in self.output_keys() {
            intervals.insert(key, self.type_reduce(vars, key)?);
        }

        Ok(intervals)
    }

    /// Distinct output keys in rule insertion order.
    fn output_keys(&self) -> Vec<OutputKey> {
        let mut keys = Vec::new();

        for rule in &self.rules {
            let key = rule.consequent().output();
            if !keys.contains(&key) {
                keys.push(key);
            }
        }

        keys
    }

    /// Height defuzzification: rules are grouped by consequent, strengths
    /// of rules sharing a consequent are joined with the maximum t-conorm,
    /// and the crisp value is the strength-weighted centroid of consequent
    /// peaks.
    fn height_defuzz(&self, vars: &Variables, key: OutputKey) -> Result<f64> {
        // (consequent name, peak, aggregated strength); rulebases are small
        // enough that a linear scan beats a map here.
        let mut groups: Vec<(&str, f64, Interval)> = Vec::new();

        for rule in self.rules_for(key) {
            let fired = rule.firing_interval(vars)?;
            let consequent = rule.consequent();

            match groups.iter().position(|(name, ..)| *name == consequent.name()) {
                Some(i) => groups[i].2 = groups[i].2.max(&fired),
                None => groups.push((consequent.name(), consequent.peak(), fired)),
            }
        }

        let mut num = 0.;
        let mut den = 0.;

        for (_, peak, strength) in &groups {
            let weight = strength.avg();
            num += weight * peak;
            den += weight;
        }

        if den == 0. {
            return Err(self.no_rule_fired(vars, key));
        }

        Ok(num / den)
    }

    /// Centroid defuzzification: build the aggregated interval type-2
    /// output set over the discretized domain, then type-reduce it.
    fn type_reduce(&self, vars: &Variables, key: OutputKey) -> Result<Interval> {
        let output = vars.output(key).ok_or_else(|| FuzzyError::UnregisteredVariable {
            clause: "output".to_owned(),
        })?;
        let n = output.discretization();

        let mut fired = Vec::new();
        for rule in self.rules_for(key) {
            fired.push((rule, rule.firing_interval(vars)?));
        }

        let xs: Vec<f64> = output.domain().sample(n).collect();
        let mut lower = vec![0f64; n];
        let mut upper = vec![0f64; n];

        // At each sample the rule's contribution is its firing strength
        // capped by the consequent envelope (min), and rules are joined by
        // max, independently per envelope.
        for (i, &x) in xs.iter().enumerate() {
            for (rule, strength) in &fired {
                let mf = rule.consequent().mf();
                lower[i] = lower[i].max(strength.lower.min(mf.lower_bound(x)));
                upper[i] = upper[i].max(strength.upper.min(mf.upper_bound(x)));
            }
        }

        if upper.iter().sum::<f64>() == 0. {
            return Err(self.no_rule_fired(vars, key));
        }

        let (y_l, y_r) = reduction::centroid(&xs, &lower, &upper)?;
        debug!(output = output.name(), y_l, y_r, "type reduction converged");

        Ok(Interval::new(y_l, y_r))
    }

    fn rules_for(&self, key: OutputKey) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(move |rule| rule.consequent().output() == key)
    }

    fn no_rule_fired(&self, vars: &Variables, key: OutputKey) -> FuzzyError {
        let output = vars.output(key).map(|o| o.name().to_owned()).unwrap_or_default();
        FuzzyError::NoRuleFired { output }
    }
}

impl fmt::Display for Rulebase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Rulebase with {} rules:", self.rules.len())?;
        for rule in &self.rules {
            writeln!(f, "  {rule}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Domain;
    use crate::mf::{IntervalT2Trapezoidal, T1Trapezoidal};
    use crate::rules::{Antecedent, Consequent};
    use approx::assert_relative_eq;

    fn t2(name: &str, upper: [f64; 4], lower: [f64; 4]) -> IntervalT2Trapezoidal {
        IntervalT2Trapezoidal::new(
            name,
            T1Trapezoidal::new(format!("upper {name}"), upper).unwrap(),
            T1Trapezoidal::new(format!("lower {name}"), lower).unwrap(),
        )
        .unwrap()
    }

    /// One input, one output, low/high terms on each.
    fn toy_system() -> (Variables, Rulebase, crate::variable::InputKey, OutputKey) {
        let unit = Domain::new(0., 1.).unwrap();
        let mut vars = Variables::new();
        let x = vars.add_input("x", unit);
        let y = vars.add_output("y", unit);

        let low = t2("low", [0., 0., 0.3, 0.5], [0., 0., 0.3, 0.4]);
        let high = t2("high", [0.5, 0.7, 1., 1.], [0.6, 0.7, 1., 1.]);

        let mut rulebase = Rulebase::with_capacity(2);
        rulebase
            .add_rule(
                Rule::new(
                    vec![Antecedent::new("x low", low.clone(), x)],
                    Consequent::new("y low", low.clone(), y),
                )
                .unwrap(),
                &vars,
            )
            .unwrap();
        rulebase
            .add_rule(
                Rule::new(
                    vec![Antecedent::new("x high", high.clone(), x)],
                    Consequent::new("y high", high, y),
                )
                .unwrap(),
                &vars,
            )
            .unwrap();

        (vars, rulebase, x, y)
    }

    #[test]
    fn low_input_lands_low_in_both_modes() {
        let (mut vars, rulebase, x, y) = toy_system();
        vars.set_input(x, 0.1).unwrap();

        let height = rulebase.evaluate(&vars, Defuzz::Height).unwrap()[&y];
        let centroid = rulebase.evaluate(&vars, Defuzz::Centroid).unwrap()[&y];

        assert!(height < 0.35, "height mode gave {height}");
        assert!(centroid < 0.35, "centroid mode gave {centroid}");
    }

    #[test]
    fn evaluation_is_idempotent() {
        let (mut vars, rulebase, x, y) = toy_system();
        vars.set_input(x, 0.42).unwrap();

        let first = rulebase.evaluate(&vars, Defuzz::Centroid).unwrap()[&y];
        let second = rulebase.evaluate(&vars, Defuzz::Centroid).unwrap()[&y];
        assert_eq!(first, second);
    }

    #[test]
    fn interval_call_brackets_the_crisp_value() {
        let (mut vars, rulebase, x, y) = toy_system();
        vars.set_input(x, 0.25).unwrap();

        let interval = rulebase.evaluate_intervals(&vars).unwrap()[&y];
        let crisp = rulebase.evaluate(&vars, Defuzz::Centroid).unwrap()[&y];

        assert!(interval.lower <= interval.upper);
        assert_relative_eq!(interval.avg(), crisp);
    }

    #[test]
    fn dead_zone_reports_no_rule_fired() {
        let unit = Domain::new(0., 1.).unwrap();
        let mut vars = Variables::new();
        let x = vars.add_input("x", unit);
        let y = vars.add_output("y", unit);

        // Single term with support only at the bottom of the universe.
        let low = t2("low", [0., 0., 0.2, 0.3], [0., 0., 0.2, 0.25]);
        let mut rulebase = Rulebase::new();
        rulebase
            .add_rule(
                Rule::new(
                    vec![Antecedent::new("x low", low.clone(), x)],
                    Consequent::new("y low", low, y),
                )
                .unwrap(),
                &vars,
            )
            .unwrap();

        vars.set_input(x, 0.9).unwrap();

        for mode in [Defuzz::Height, Defuzz::Centroid] {
            match rulebase.evaluate(&vars, mode) {
                Err(FuzzyError::NoRuleFired { output }) => assert_eq!(output, "y"),
                other => panic!("expected NoRuleFired, got {other:?}"),
            }
        }
    }

    #[test]
    fn failed_evaluation_leaves_the_rulebase_usable() {
        let unit = Domain::new(0., 1.).unwrap();
        let mut vars = Variables::new();
        let x = vars.add_input("x", unit);
        let y = vars.add_output("y", unit);

        let low = t2("low", [0., 0., 0.2, 0.3], [0., 0., 0.2, 0.25]);
        let mut rulebase = Rulebase::new();
        rulebase
            .add_rule(
                Rule::new(
                    vec![Antecedent::new("x low", low.clone(), x)],
                    Consequent::new("y low", low, y),
                )
                .unwrap(),
                &vars,
            )
            .unwrap();

        // One dead-zone record must not poison the batch that follows it.
        vars.set_input(x, 0.9).unwrap();
        assert!(rulebase.evaluate(&vars, Defuzz::Centroid).is_err());

        vars.set_input(x, 0.1).unwrap();
        let crisp = rulebase.evaluate(&vars, Defuzz::Centroid).unwrap()[&y];
        assert!(crisp < 0.35, "recovered evaluation gave {crisp}");
    }

    #[test]
    fn rules_referencing_foreign_registries_are_rejected_at_add() {
        let unit = Domain::new(0., 1.).unwrap();
        let mut vars = Variables::new();
        let mut foreign = Variables::new();
        let x = foreign.add_input("x", unit);
        let y = vars.add_output("y", unit);

        let low = t2("low", [0., 0., 0.3, 0.5], [0., 0., 0.3, 0.4]);
        let rule = Rule::new(
            vec![Antecedent::new("x low", low.clone(), x)],
            Consequent::new("y low", low, y),
        )
        .unwrap();

        let mut rulebase = Rulebase::new();
        assert!(matches!(
            rulebase.add_rule(rule, &vars),
            Err(FuzzyError::UnregisteredVariable { .. })
        ));
    }

    #[test]
    fn discretization_refines_the_centroid_smoothly() {
        let (mut vars, rulebase, x, y) = toy_system();
        vars.set_input(x, 0.3).unwrap();

        vars.set_discretization(y, 50).unwrap();
        let coarse = rulebase.evaluate(&vars, Defuzz::Centroid).unwrap()[&y];
        vars.set_discretization(y, 100).unwrap();
        let fine = rulebase.evaluate(&vars, Defuzz::Centroid).unwrap()[&y];

        assert!((coarse - fine).abs() < 0.05, "coarse {coarse} vs fine {fine}");
    }
}
