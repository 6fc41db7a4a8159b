//! Generic Newton-Raphson scalar root finder.
//!
//! Used by the pricing models to invert price into yield. The deviation
//! function is arbitrary; convergence behavior is carried in an explicit
//! [`NewtonConfig`] so each use site (YTM vs. YTC) can tune it.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::BondCalcError;
use crate::types::Rate;
use crate::BondCalcResult;

/// Derivative magnitudes below this are treated as a plateau: a Newton step
/// against them would be unbounded.
const DERIVATIVE_FLOOR: Decimal = dec!(0.000000000001);

/// Convergence configuration for a Newton-Raphson solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewtonConfig {
    /// Starting rate for the iteration.
    pub initial_guess: Rate,
    /// Iteration budget; exhaustion is a `ConvergenceFailure`.
    pub max_iterations: u32,
    /// Forward-difference step for the derivative estimate. Must be nonzero.
    pub derivative_step: Decimal,
    /// Converged when successive guesses move less than this.
    pub tolerance: Decimal,
    /// Candidate rates are clamped into `[lower_bound, upper_bound]` between
    /// iterations so a divergent step cannot overflow decimal discounting.
    pub lower_bound: Rate,
    pub upper_bound: Rate,
}

impl Default for NewtonConfig {
    fn default() -> Self {
        Self {
            initial_guess: dec!(0.05),
            max_iterations: 100,
            derivative_step: dec!(0.0001),
            tolerance: dec!(0.000001),
            lower_bound: dec!(-0.5),
            upper_bound: dec!(2.0),
        }
    }
}

/// Solve `f(rate) = 0` by Newton-Raphson with a forward-difference derivative.
///
/// `function` names the solve in any `ConvergenceFailure` it produces.
pub fn solve<F>(function: &str, f: F, config: &NewtonConfig) -> BondCalcResult<Rate>
where
    F: Fn(Rate) -> Decimal,
{
    if config.derivative_step.is_zero() {
        return Err(BondCalcError::InvalidInput {
            field: "derivative_step".into(),
            reason: "Forward-difference step must be nonzero".into(),
        });
    }

    let mut guess = config.initial_guess;
    let mut last_delta = Decimal::ZERO;

    for iteration in 0..config.max_iterations {
        let f_val = f(guess);
        let f_stepped = f(guess + config.derivative_step);
        let derivative = (f_stepped - f_val) / config.derivative_step;

        if derivative.abs() < DERIVATIVE_FLOOR {
            return Err(stalled(function, iteration, f_val));
        }

        let step = f_val
            .checked_div(derivative)
            .ok_or_else(|| stalled(function, iteration, f_val))?;
        let next = guess - step;

        if (next - guess).abs() < config.tolerance {
            return Ok(next);
        }

        last_delta = next - guess;
        guess = next.clamp(config.lower_bound, config.upper_bound);
    }

    Err(BondCalcError::ConvergenceFailure {
        function: function.into(),
        iterations: config.max_iterations,
        last_delta,
    })
}

fn stalled(function: &str, iterations: u32, last_delta: Decimal) -> BondCalcError {
    BondCalcError::ConvergenceFailure {
        function: function.into(),
        iterations,
        last_delta,
    }
}
