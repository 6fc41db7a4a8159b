use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BondCalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Empty schedule: {context}")]
    EmptySchedule { context: String },

    #[error("Convergence failure: {function} did not converge after {iterations} iterations (last delta: {last_delta})")]
    ConvergenceFailure {
        function: String,
        iterations: u32,
        last_delta: Decimal,
    },
}
