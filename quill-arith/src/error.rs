use thiserror::Error;

/// Errors raised by the numeric kinds and the dispatch layer.
///
/// Reduction rules are expected to catch these close to the call site and
/// turn them into an in-tree `Error` node; none of them should ever escape
/// a top-level reduction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NumericError {
    /// A literal could not be parsed into the requested numeric kind, or a
    /// compound kind was constructed from operands of the wrong kind.
    #[error("cannot convert `{0}` to the requested numeric kind")]
    Conversion(String),

    /// A fixed-precision result left the representable range.
    #[error("arithmetic overflow")]
    Overflow,

    /// A fixed-precision division result was too small to represent.
    #[error("arithmetic underflow")]
    Underflow,

    /// Division (or an atan2-style operation with both arguments zero)
    /// with a structurally undefined result.
    #[error("division by zero")]
    DivisionByZero,

    /// A transcendental function was called outside its real domain while
    /// a complex result was not being computed.
    #[error("argument outside the domain of {0}")]
    Domain(&'static str),

    /// An operation was invoked on a kind combination that the dispatch
    /// layer is documented never to produce. Indicates an engine bug.
    #[error("{op} is not defined for {kind} operands")]
    Type {
        op: &'static str,
        kind: &'static str,
    },

    /// A purely numeric operation was attempted in symbolic mode.
    #[error("operation requires numeric mode")]
    NonNumeric,

    /// A documented gap, e.g. the complex inverse trigonometric family.
    #[error("{0} is not implemented for complex operands")]
    Unimplemented(&'static str),

    /// An unrecognized rounding mode reached a division routine.
    #[error("unrecognized rounding mode")]
    RoundingMode,
}

pub type Result<T> = std::result::Result<T, NumericError>;
