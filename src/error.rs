use thiserror::Error;

/// An error from checked arithmetic.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    /// The result is beyond the largest finite magnitude.
    #[error("overflow: result too large to represent")]
    Overflow,
    /// The divisor is zero.
    #[error("division by zero")]
    DivisionByZero,
    /// An operand is infinite or NaN.
    #[error("operand is not finite")]
    NonFinite,
}

/// An error parsing a fixed-point number from text.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseNegatableError {
    /// The text holds no digits.
    #[error("cannot parse a number from an empty string")]
    Empty,
    /// The text holds a character that is not part of a decimal number.
    #[error("invalid digit found in string")]
    InvalidDigit,
    /// Only base 10 is supported.
    #[error("unsupported radix {0}")]
    UnsupportedRadix(u32),
}
