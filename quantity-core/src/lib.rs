//! Quantity Core - Fundamental types
//!
//! This crate provides the types shared by every layer of the engine:
//! - `QuantityError`: error taxonomy with machine-readable codes
//! - `number`: rounding and fixed-decimal rendering of IEEE doubles

mod error;
pub mod number;

pub use error::{codes, QuantityError, QuantityResult};
pub use number::within_tolerance;
