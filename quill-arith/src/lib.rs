//! The numeric tower behind the notebook engine.
//!
//! Four canonical kinds (integer, decimal, rational, complex), each with a
//! fixed and an arbitrary-precision representation, plus the promotion
//! tables for the binary operations, the trigonometric and transcendental
//! families, and uniform random generation. All operations read their
//! precision, rounding mode and exactness flags from a [`Session`].

pub mod dec;
pub mod dispatch;
pub mod error;
pub mod int;
pub mod number;
pub mod random;
pub mod rational;
pub mod rounding;
pub mod session;
pub mod trig;

pub use dec::Dec;
pub use error::{NumericError, Result};
pub use int::Int;
pub use number::{Cpx, Number, Real};
pub use rational::Rat;
pub use rounding::RoundingMode;
pub use session::{RoundingGuard, Session};
