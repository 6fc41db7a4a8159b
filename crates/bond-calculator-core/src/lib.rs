//! Fixed-income bond valuation engine.
//!
//! Five pure, stateless modules with no shared mutable state: day-count
//! arithmetic, a generic Newton-Raphson root finder, fixed- and floating-leg
//! pricers, and first-order rate risk metrics, fronted by the [`engine`]
//! facade. All arithmetic is `rust_decimal` for exact decimal discounting;
//! every operation is a single-pass computation safe to run concurrently
//! across a batch of bonds.

pub mod day_count;
pub mod engine;
pub mod error;
pub mod pricing;
pub mod risk;
pub mod solver;
pub mod types;

pub use error::BondCalcError;
pub use types::*;

/// Standard result type for all engine operations
pub type BondCalcResult<T> = Result<T, BondCalcError>;
