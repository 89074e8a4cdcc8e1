//! An interval type-2 fuzzy logic system (IT2-FLS).
//!
//! Linguistic terms are modeled as trapezoidal membership functions whose
//! definition is itself uncertain: each term carries an upper and a lower
//! type-1 envelope, and everything downstream (rule firing, aggregation)
//! works on membership *intervals* instead of single degrees. The final
//! aggregated output set is collapsed to a crisp number by Karnik--Mendel
//! type-reduction.
//!
//! ```
//! use it2fls::{Antecedent, Consequent, Defuzz, Domain, IntervalT2Trapezoidal,
//!              Rule, Rulebase, T1Trapezoidal, Variables};
//!
//! # fn main() -> it2fls::Result<()> {
//! let unit = Domain::new(0., 1.)?;
//! let mut vars = Variables::new();
//! let x = vars.add_input("x", unit);
//! let y = vars.add_output("y", unit);
//!
//! let low = IntervalT2Trapezoidal::new(
//!     "low",
//!     T1Trapezoidal::new("upper low", [0., 0., 0.3, 0.5])?,
//!     T1Trapezoidal::new("lower low", [0., 0., 0.3, 0.4])?,
//! )?;
//!
//! let mut rulebase = Rulebase::new();
//! rulebase.add_rule(
//!     Rule::new(
//!         vec![Antecedent::new("x is low", low.clone(), x)],
//!         Consequent::new("y is low", low, y),
//!     )?,
//!     &vars,
//! )?;
//!
//! vars.set_input(x, 0.2)?;
//! let crisp = rulebase.evaluate(&vars, Defuzz::Centroid)?;
//! assert!(crisp[&y] < 0.5);
//! # Ok(())
//! # }
//! ```

pub mod dataset;
mod domain;
mod error;
mod inference;
mod linspace;
mod mf;
pub mod reduction;
mod rules;
pub mod sentiment;
mod variable;

pub use domain::{Domain, Interval};
pub use error::{FuzzyError, Result};
pub use inference::{Defuzz, Rulebase};
pub use mf::{IntervalT2Trapezoidal, SampledMf, T1Trapezoidal};
pub use rules::{Antecedent, Consequent, Rule};
pub use variable::{Input, InputKey, Output, OutputKey, Variables, DEFAULT_DISCRETIZATION};
