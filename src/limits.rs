use core::mem::size_of;

use num_traits::{Bounded, FromPrimitive, Num, NumCast, One, Signed, ToPrimitive, Zero};

use crate::{
    Backing, Bits, Kind, Magnitude, Negatable, Overflow, OverflowMode, ParseNegatableError, Raw,
    RoundMode, Rounding,
};

/// How a type rounds results that fall between representable values.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum RoundStyle {
    /// The direction cannot be determined.
    Indeterminate,
    /// Toward zero.
    TowardZero,
    /// To the nearest representable value.
    ToNearest,
    /// Toward positive infinity.
    TowardInfinity,
    /// Toward negative infinity.
    TowardNegInfinity,
}

impl RoundStyle {
    /// Returns the style that `mode` rounds with.
    #[must_use]
    pub const fn of(mode: RoundMode) -> Self {
        match mode {
            RoundMode::Fastest | RoundMode::Truncated => Self::TowardZero,
            RoundMode::Negative => Self::TowardNegInfinity,
            RoundMode::Positive => Self::TowardInfinity,
            RoundMode::Classic | RoundMode::NearestEven | RoundMode::NearestOdd => {
                Self::ToNearest
            }
        }
    }
}

/// Properties of a numeric type, for use by generic numeric code.
pub trait Limits: Sized {
    /// The number of radix digits represented without change.
    const DIGITS: u32;
    /// The number of decimal digits represented without change.
    const DIGITS10: u32;
    /// The number of decimal digits needed to distinguish every value.
    const MAX_DIGITS10: u32;
    /// The base of the representation.
    const RADIX: u32;
    /// True if the type represents negative values.
    const IS_SIGNED: bool;
    /// True if the type only represents integers.
    const IS_INTEGER: bool;
    /// True if every value is represented exactly.
    const IS_EXACT: bool;
    /// One more than the smallest power of the radix that is a normal value.
    const MIN_EXPONENT: i32;
    /// The smallest power of ten that is a normal value.
    const MIN_EXPONENT10: i32;
    /// One more than the largest power of the radix that is finite.
    const MAX_EXPONENT: i32;
    /// The largest power of ten that is finite.
    const MAX_EXPONENT10: i32;
    /// True if the type has a positive infinity.
    const HAS_INFINITY: bool;
    /// True if the type has a quiet NaN.
    const HAS_QUIET_NAN: bool;
    /// True if the type has a signaling NaN.
    const HAS_SIGNALING_NAN: bool;
    /// True if the type follows IEC 559.
    const IS_IEC559: bool;
    /// True if the type holds a finite set of values.
    const IS_BOUNDED: bool;
    /// True if overflowing arithmetic wraps.
    const IS_MODULO: bool;
    /// True if overflowing arithmetic traps.
    const TRAPS: bool;
    /// How results between representable values are rounded.
    const ROUND_STYLE: RoundStyle;

    /// Returns the smallest positive value.
    fn min_positive() -> Self;
    /// Returns the largest finite value.
    fn max_value() -> Self;
    /// Returns the most negative finite value.
    fn lowest() -> Self;
    /// Returns the difference between 1 and the next representable value.
    fn epsilon() -> Self;
    /// Returns the largest rounding error.
    fn round_error() -> Self;
    /// Returns positive infinity.
    fn infinity() -> Self;
    /// Returns a quiet NaN.
    fn quiet_nan() -> Self;
}

#[expect(clippy::cast_possible_truncation)]
const fn storage_digits<S>() -> u32 {
    (size_of::<S>() * 8) as u32 - 1
}

#[expect(clippy::cast_possible_wrap)]
const fn to_exponent10(exponent: u32, negative: bool) -> i32 {
    let magnitude = (exponent * 301 / 1000) as i32;
    if negative {
        -magnitude
    } else {
        magnitude
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> Limits for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    const DIGITS: u32 = storage_digits::<Raw<RANGE>>();
    const DIGITS10: u32 = Self::DIGITS * 301 / 1000;
    const MAX_DIGITS10: u32 = Self::DIGITS10 + 2;
    const RADIX: u32 = 2;
    const IS_SIGNED: bool = true;
    const IS_INTEGER: bool = false;
    const IS_EXACT: bool = true;
    const MIN_EXPONENT: i32 = RESOLUTION;
    const MIN_EXPONENT10: i32 = to_exponent10(RESOLUTION.unsigned_abs(), true);
    #[expect(clippy::cast_possible_wrap)]
    const MAX_EXPONENT: i32 = (Self::DIGITS - Self::FRACTION) as i32;
    const MAX_EXPONENT10: i32 = to_exponent10(Self::DIGITS - Self::FRACTION, false);
    const HAS_INFINITY: bool = true;
    const HAS_QUIET_NAN: bool = true;
    const HAS_SIGNALING_NAN: bool = false;
    const IS_IEC559: bool = false;
    const IS_BOUNDED: bool = true;
    const IS_MODULO: bool = matches!(O::MODE, OverflowMode::Modulus);
    const TRAPS: bool = matches!(O::MODE, OverflowMode::Exception);
    const ROUND_STYLE: RoundStyle = RoundStyle::of(R::MODE);

    #[inline]
    fn min_positive() -> Self {
        Self::min_positive()
    }

    #[inline]
    fn max_value() -> Self {
        Self::max_value()
    }

    #[inline]
    fn lowest() -> Self {
        Self::lowest()
    }

    #[inline]
    fn epsilon() -> Self {
        Self::epsilon()
    }

    #[inline]
    fn round_error() -> Self {
        Self::one().half()
    }

    #[inline]
    fn infinity() -> Self {
        Self::infinity()
    }

    #[inline]
    fn quiet_nan() -> Self {
        Self::nan()
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> Zero for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    #[inline]
    fn zero() -> Self {
        Self::zero()
    }

    #[inline]
    fn is_zero(&self) -> bool {
        Self::is_zero(*self)
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> One for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    #[inline]
    fn one() -> Self {
        Self::one()
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> Num for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    type FromStrRadixErr = ParseNegatableError;

    /// Parses a decimal string. Other radixes are rejected.
    fn from_str_radix(text: &str, radix: u32) -> Result<Self, Self::FromStrRadixErr> {
        if radix == 10 {
            text.parse()
        } else {
            Err(ParseNegatableError::UnsupportedRadix(radix))
        }
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> Bounded for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    #[inline]
    fn min_value() -> Self {
        Self::lowest()
    }

    #[inline]
    fn max_value() -> Self {
        Self::max_value()
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> Signed for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    #[inline]
    fn abs(&self) -> Self {
        Self::abs(*self)
    }

    fn abs_sub(&self, other: &Self) -> Self {
        if *self <= *other {
            Self::zero()
        } else {
            *self - *other
        }
    }

    #[inline]
    fn signum(&self) -> Self {
        Self::signum(*self)
    }

    #[inline]
    fn is_positive(&self) -> bool {
        !self.is_nan() && !self.is_zero() && self.is_sign_positive()
    }

    #[inline]
    fn is_negative(&self) -> bool {
        !self.is_nan() && self.is_sign_negative()
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    /// Returns the integer part, truncated toward zero, or `None` for
    /// non-finite values.
    fn integer_part(self) -> Option<i128> {
        if self.kind() != Kind::Finite {
            return None;
        }

        let whole = (self.magnitude() >> Self::SHIFT).widen_u128();
        let whole = i128::try_from(whole).ok()?;
        Some(if self.is_sign_negative() { -whole } else { whole })
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> ToPrimitive
    for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    #[inline]
    fn to_i64(&self) -> Option<i64> {
        self.integer_part().and_then(|whole| i64::try_from(whole).ok())
    }

    #[inline]
    fn to_u64(&self) -> Option<u64> {
        self.integer_part().and_then(|whole| u64::try_from(whole).ok())
    }

    #[inline]
    fn to_i128(&self) -> Option<i128> {
        self.integer_part()
    }

    #[inline]
    fn to_u128(&self) -> Option<u128> {
        self.integer_part().and_then(|whole| u128::try_from(whole).ok())
    }

    #[inline]
    fn to_f32(&self) -> Option<f32> {
        Some(Self::to_f32(*self))
    }

    #[inline]
    fn to_f64(&self) -> Option<f64> {
        Some(Self::to_f64(*self))
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> FromPrimitive
    for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    #[inline]
    fn from_i64(value: i64) -> Option<Self> {
        Self::checked_new(value)
    }

    #[inline]
    fn from_u64(value: u64) -> Option<Self> {
        Self::checked_new(value)
    }

    #[inline]
    fn from_i128(value: i128) -> Option<Self> {
        Self::checked_new(value)
    }

    #[inline]
    fn from_u128(value: u128) -> Option<Self> {
        Self::checked_new(value)
    }

    #[inline]
    fn from_f64(value: f64) -> Option<Self> {
        Self::checked_new(value)
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> NumCast for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    fn from<T: ToPrimitive>(value: T) -> Option<Self> {
        use num_traits::float::FloatCore;

        let real = value.to_f64()?;
        if FloatCore::fract(real) == 0. {
            if let Some(integer) = value.to_i128() {
                return Self::checked_new(integer);
            } else if let Some(integer) = value.to_u128() {
                return Self::checked_new(integer);
            }
        }
        Self::checked_new(real)
    }
}
