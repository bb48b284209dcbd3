/// How inexact division and the explicit rounding operations resolve a
/// value that falls between two representable results.
///
/// The `Half*` modes only differ when the value is exactly halfway between
/// its two neighbors. [`RoundingMode::Euclidean`] is special: it chooses the
/// quotient so that the matching remainder is always non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    AwayFromZero,
    TowardZero,
    Ceiling,
    Floor,
    HalfAwayFromZero,
    HalfTowardZero,
    HalfEven,
    HalfCeiling,
    HalfFloor,
    Euclidean,
}

impl RoundingMode {
    /// Stable numeric code used by hosts that persist notebook settings.
    pub fn code(self) -> u8 {
        match self {
            Self::AwayFromZero => 0,
            Self::TowardZero => 1,
            Self::Ceiling => 2,
            Self::Floor => 3,
            Self::HalfAwayFromZero => 4,
            Self::HalfTowardZero => 5,
            Self::HalfEven => 6,
            Self::HalfCeiling => 7,
            Self::HalfFloor => 8,
            Self::Euclidean => 9,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => Self::AwayFromZero,
            1 => Self::TowardZero,
            2 => Self::Ceiling,
            3 => Self::Floor,
            4 => Self::HalfAwayFromZero,
            5 => Self::HalfTowardZero,
            6 => Self::HalfEven,
            7 => Self::HalfCeiling,
            8 => Self::HalfFloor,
            9 => Self::Euclidean,
            _ => return None,
        })
    }
}
