use crate::rounding::RoundingMode;
use std::ops::{Deref, DerefMut};

/// Default number of significant decimal digits for arbitrary-precision
/// decimal values.
pub const DEFAULT_PRECISION: u32 = 34;

/// Per-reduction configuration, constructed by the host once per top-level
/// reduction request and threaded through every arithmetic call.
///
/// A session is never shared between concurrent reductions; each top-level
/// expression gets its own copy.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// BCP 47 locale tag of the notebook, carried for the host's benefit.
    pub locale: String,

    /// IANA time zone name of the notebook, carried for the host's benefit.
    pub time_zone: String,

    /// Number of significant decimal digits for arbitrary-precision decimals.
    pub precision: u32,

    /// The ambient rounding mode consulted by integer division, div/mod and
    /// the rounding operations.
    pub rounding: RoundingMode,

    /// When true, newly created integers and decimals use the
    /// arbitrary-precision representation; otherwise the fixed one.
    pub arbitrary: bool,

    /// When true, operations prefer numeric results (integer division falls
    /// back to decimal); when false, exact forms are kept and operations
    /// that can only approximate refuse to run.
    pub numeric: bool,

    /// Enables the symbolic rule pools of the reduction registry.
    pub symbolic: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            time_zone: "UTC".to_string(),
            precision: DEFAULT_PRECISION,
            rounding: RoundingMode::HalfEven,
            arbitrary: true,
            numeric: true,
            symbolic: false,
        }
    }
}

impl Session {
    /// Binary precision used when constructing `rug::Float` values,
    /// derived from the decimal digit count.
    pub fn float_prec(&self) -> u32 {
        // log2(10) ~ 3.322, plus guard bits
        ((self.precision as f64 * std::f64::consts::LOG2_10).ceil() as u32 + 8).max(64)
    }

    /// Temporarily replaces the ambient rounding mode. The previous mode is
    /// restored when the returned guard is dropped, including on early
    /// returns and panics, so an exceptional exit can never leak the
    /// override into the rest of the reduction.
    pub fn override_rounding(&mut self, mode: RoundingMode) -> RoundingGuard<'_> {
        let saved = self.rounding;
        self.rounding = mode;
        RoundingGuard { session: self, saved }
    }
}

/// Scope guard returned by [`Session::override_rounding`].
#[derive(Debug)]
pub struct RoundingGuard<'a> {
    session: &'a mut Session,
    saved: RoundingMode,
}

impl Deref for RoundingGuard<'_> {
    type Target = Session;

    fn deref(&self) -> &Session {
        self.session
    }
}

impl DerefMut for RoundingGuard<'_> {
    fn deref_mut(&mut self) -> &mut Session {
        self.session
    }
}

impl Drop for RoundingGuard<'_> {
    fn drop(&mut self) {
        self.session.rounding = self.saved;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_is_restored() {
        let mut session = Session::default();
        assert_eq!(session.rounding, RoundingMode::HalfEven);
        {
            let guard = session.override_rounding(RoundingMode::Floor);
            assert_eq!(guard.rounding, RoundingMode::Floor);
        }
        assert_eq!(session.rounding, RoundingMode::HalfEven);
    }

    #[test]
    fn override_is_restored_on_unwind() {
        let mut session = Session::default();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = session.override_rounding(RoundingMode::Euclidean);
            panic!("boom");
        }));
        assert!(result.is_err());
        assert_eq!(session.rounding, RoundingMode::HalfEven);
    }
}
