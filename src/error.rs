//! Errors reported by the functions with a restricted domain.

/// Raised when a function is evaluated outside of its domain.
///
/// Operations involving a value without a continued fraction ("no value")
/// never raise this error, the result is "no value" instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    #[error("the square root of a negative number cannot be computed")]
    NegativeSqrt,

    #[error("the logarithm of a non-positive number cannot be computed")]
    NonPositiveLog,

    #[error("the argument must lie in the range [-1, +1]")]
    OutOfUnitRange,

    #[error("a negative number cannot be raised to a fractional power")]
    NegativeBase,

    #[error("zero cannot be raised to a negative power")]
    ZeroToNegativePower,

    #[error("the divisor cannot be zero")]
    ZeroDivisor,

    #[error("the argument cannot be infinite")]
    InfiniteArgument,

    #[error("factorial is only defined for non-negative integers")]
    NotNatural,
}

pub type Result<T> = core::result::Result<T, DomainError>;
