#![doc = include_str!(".crate-docs.md")]
#![no_std]

extern crate alloc;
#[cfg(any(feature = "std", test))]
extern crate std;

use core::cmp::Ordering;
use core::marker::PhantomData;
use core::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

use num_traits::{Bounded, CheckedAdd, One, WrappingAdd, WrappingNeg, Zero};

mod backing;
mod error;
mod format;
mod limits;
mod math;
pub mod mode;
mod scalar;

pub use backing::{
    exponent_bits, Backing, Bits, Magnitude, Quotient, Raw, RawMagnitude, Storage, Tail,
};
pub use error::{ArithmeticError, ParseNegatableError};
pub use limits::{Limits, RoundStyle};
pub use mode::{overflow, round, Overflow, OverflowMode, RoundMode, Rounding};
pub use scalar::{Scalar, Unpacked};

/// A binary fixed-point number with `RANGE` total bits and a grid spacing of
/// `2^RESOLUTION`.
///
/// The value is stored as a single scaled integer in the narrowest primitive
/// holding `RANGE` bits. `RESOLUTION` must be negative, and `-RESOLUTION` must
/// be less than `RANGE - 1` so that at least one integer bit remains beside
/// the sign. Violating either is a compile-time error.
///
/// The top three codes of the storage type are reserved: one for infinity,
/// one for quiet-NaN, and the storage maximum itself. The negation of the
/// infinity code is negative infinity. Arithmetic that leaves the finite range
/// is resolved by the overflow mode `O`, and results that fall between grid
/// points are resolved by the rounding mode `R`. The defaults truncate toward
/// zero and saturate to the signed infinity.
///
/// ```rust
/// use negatable::Negatable;
///
/// type Fixed = Negatable<32, -24>;
///
/// let x = Fixed::new(5_i32) / Fixed::new(7_i32);
/// assert!((x.to_f64() - 5.0 / 7.0).abs() < 1.0 / 16_777_216.0);
/// assert!((Fixed::max_value() + Fixed::min_positive()).is_infinite());
/// ```
pub struct Negatable<
    const RANGE: u32,
    const RESOLUTION: i32,
    R = round::Truncated,
    O = overflow::Saturate,
> where
    Bits<RANGE>: Backing,
{
    data: Raw<RANGE>,
    modes: PhantomData<(R, O)>,
}

#[derive(Clone, Copy, Eq, PartialEq, Debug)]
enum Kind {
    Finite,
    Infinite { negative: bool },
    Nan,
}

/// A result that left the finite range, along with the low bits that a
/// wrapping policy keeps.
#[derive(Clone, Copy, Debug)]
struct Overflowed<S> {
    negative: bool,
    wrapped: S,
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    const VALID: () = {
        assert!(RESOLUTION < 0, "the resolution must be negative");
        assert!(
            RESOLUTION.unsigned_abs() < RANGE - 1,
            "the range must hold the sign, an integer bit and every fractional bit"
        );
    };
    /// The number of fractional bits.
    pub(crate) const FRACTION: u32 = RESOLUTION.unsigned_abs();
    const SHIFT: usize = Self::FRACTION as usize;

    #[inline]
    pub(crate) fn from_data(data: Raw<RANGE>) -> Self {
        let () = Self::VALID;
        Self {
            data,
            modes: PhantomData,
        }
    }

    /// Returns `value` scaled onto this type's grid.
    ///
    /// Integers are exact when they fit. Floating point values are rounded
    /// per `R`, NaN becomes quiet-NaN and infinities map to the matching
    /// infinity. Values outside of the finite range are handled per `O`.
    #[inline]
    pub fn new<T: Scalar>(value: T) -> Self {
        Self::exact_scalar(value).unwrap_or_else(|overflow| Self::overflowed(overflow, "convert"))
    }

    /// Returns `value` scaled onto this type's grid, or `None` if it lands
    /// outside of the finite range. NaN and infinities are kept.
    pub(crate) fn checked_new<T: Scalar>(value: T) -> Option<Self> {
        Self::exact_scalar(value).ok()
    }

    fn exact_scalar<T: Scalar>(value: T) -> Result<Self, Overflowed<Raw<RANGE>>> {
        match value.unpack() {
            Unpacked::Integer {
                negative,
                magnitude,
            } => {
                let (magnitude, fits, tail) = Self::shifted(magnitude, RESOLUTION.wrapping_neg());
                Self::settled_parts(negative, magnitude, fits, tail)
            }
            Unpacked::Real(value) => Self::exact_f64(value),
        }
    }

    /// Returns the value whose raw code is `raw`.
    #[must_use]
    #[inline]
    pub fn from_raw(raw: Raw<RANGE>) -> Self {
        Self::from_data(raw)
    }

    /// Returns the raw code of this value.
    #[must_use]
    #[inline]
    pub fn to_raw(self) -> Raw<RANGE> {
        self.data
    }

    /// Returns 0.
    #[must_use]
    #[inline]
    pub fn zero() -> Self {
        Self::from_data(Raw::<RANGE>::zero())
    }

    /// Returns 1.
    #[must_use]
    #[inline]
    pub fn one() -> Self {
        Self::from_data(Raw::<RANGE>::one() << Self::SHIFT)
    }

    /// Returns the smallest positive value, one step of the grid.
    #[must_use]
    #[inline]
    pub fn min_positive() -> Self {
        Self::from_data(Raw::<RANGE>::one())
    }

    /// Returns the difference between adjacent values.
    #[must_use]
    #[inline]
    pub fn epsilon() -> Self {
        Self::min_positive()
    }

    /// Returns the largest finite value.
    #[must_use]
    #[inline]
    pub fn max_value() -> Self {
        Self::from_magnitude(<Raw<RANGE> as Storage>::finite_limit(), false)
    }

    /// Returns the most negative finite value.
    #[must_use]
    #[inline]
    pub fn lowest() -> Self {
        Self::from_magnitude(<Raw<RANGE> as Storage>::finite_limit(), true)
    }

    /// Returns positive infinity.
    #[must_use]
    #[inline]
    pub fn infinity() -> Self {
        Self::signed_infinity(false)
    }

    /// Returns negative infinity.
    #[must_use]
    #[inline]
    pub fn neg_infinity() -> Self {
        Self::signed_infinity(true)
    }

    /// Returns quiet-NaN.
    #[must_use]
    #[inline]
    pub fn nan() -> Self {
        Self::from_data(<Raw<RANGE> as Storage>::nan_code())
    }

    #[inline]
    fn signed_infinity(negative: bool) -> Self {
        Self::from_magnitude(<Raw<RANGE> as Storage>::infinity_magnitude(), negative)
    }

    #[inline]
    fn from_magnitude(magnitude: RawMagnitude<RANGE>, negative: bool) -> Self {
        Self::from_data(Raw::<RANGE>::with_sign(magnitude, negative))
    }

    #[inline]
    pub(crate) fn magnitude(self) -> RawMagnitude<RANGE> {
        self.data.magnitude()
    }

    fn kind(self) -> Kind {
        let magnitude = self.magnitude();
        let infinity = <Raw<RANGE> as Storage>::infinity_magnitude();
        match magnitude.cmp(&infinity) {
            Ordering::Less => Kind::Finite,
            Ordering::Equal => Kind::Infinite {
                negative: self.is_sign_negative(),
            },
            Ordering::Greater => Kind::Nan,
        }
    }

    /// Returns true if this value is quiet-NaN.
    ///
    /// Every code beyond the infinity sentinels, including the storage
    /// extremes, is treated as NaN.
    #[must_use]
    #[inline]
    pub fn is_nan(self) -> bool {
        self.kind() == Kind::Nan
    }

    /// Returns true if this value is positive or negative infinity.
    #[must_use]
    #[inline]
    pub fn is_infinite(self) -> bool {
        matches!(self.kind(), Kind::Infinite { .. })
    }

    /// Returns true if this value is neither infinite nor NaN.
    #[must_use]
    #[inline]
    pub fn is_finite(self) -> bool {
        self.kind() == Kind::Finite
    }

    /// Returns true if this value is 0.
    #[must_use]
    #[inline]
    pub fn is_zero(self) -> bool {
        self.data.is_zero()
    }

    /// Returns true if the raw code is negative.
    #[must_use]
    #[inline]
    pub fn is_sign_negative(self) -> bool {
        self.data < Raw::<RANGE>::zero()
    }

    /// Returns true if the raw code is zero or positive.
    #[must_use]
    #[inline]
    pub fn is_sign_positive(self) -> bool {
        !self.is_sign_negative()
    }

    /// Builds a value from a magnitude already expressed in grid units,
    /// applying the rounding mode to `tail` and the overflow mode when the
    /// magnitude does not fit.
    pub(crate) fn from_parts(
        negative: bool,
        magnitude: u128,
        fits: bool,
        tail: Tail,
        op: &'static str,
    ) -> Self {
        Self::settled_parts(negative, magnitude, fits, tail)
            .unwrap_or_else(|overflow| Self::overflowed(overflow, op))
    }

    fn settled_parts(
        negative: bool,
        magnitude: u128,
        fits: bool,
        tail: Tail,
    ) -> Result<Self, Overflowed<Raw<RANGE>>> {
        let bound = RawMagnitude::<RANGE>::max_value().widen_u128();
        Self::settled(
            Quotient {
                value: RawMagnitude::<RANGE>::truncate_u128(magnitude),
                fits: fits && magnitude <= bound,
                tail,
            },
            negative,
        )
    }

    /// Builds the value `magnitude * 2^shift` grid units.
    pub(crate) fn from_shifted(
        negative: bool,
        magnitude: u128,
        shift: i32,
        op: &'static str,
    ) -> Self {
        let (magnitude, fits, tail) = Self::shifted(magnitude, shift);
        Self::from_parts(negative, magnitude, fits, tail, op)
    }

    /// Returns `magnitude * 2^shift` along with whether it fits in 128 bits
    /// and the bits shifted out.
    fn shifted(magnitude: u128, shift: i32) -> (u128, bool, Tail) {
        let distance = shift.unsigned_abs();
        if shift >= 0 {
            let fits = distance < 128 && magnitude <= u128::MAX >> distance;
            let shifted = if distance < 128 { magnitude << distance } else { 0 };
            (shifted, fits, Tail::Zero)
        } else if distance < 128 {
            let divisor = 1_u128 << distance;
            (magnitude >> distance, true, Tail::of(magnitude & (divisor - 1), divisor))
        } else if magnitude == 0 {
            (0, true, Tail::Zero)
        } else {
            (0, true, Tail::BelowHalf)
        }
    }

    fn settled(
        quotient: Quotient<RawMagnitude<RANGE>>,
        negative: bool,
    ) -> Result<Self, Overflowed<Raw<RANGE>>> {
        let Quotient {
            mut value,
            mut fits,
            tail,
        } = quotient;
        let odd = !(value & RawMagnitude::<RANGE>::one()).is_zero();
        if R::MODE.increments(negative, odd, tail) {
            if let Some(incremented) = value.checked_add(&RawMagnitude::<RANGE>::one()) {
                value = incremented;
            } else {
                value = RawMagnitude::<RANGE>::zero();
                fits = false;
            }
        }

        if fits && value <= <Raw<RANGE> as Storage>::finite_limit() {
            Ok(Self::from_magnitude(value, negative))
        } else {
            Err(Overflowed {
                negative,
                wrapped: Raw::<RANGE>::with_sign(value, negative),
            })
        }
    }

    fn overflowed(overflow: Overflowed<Raw<RANGE>>, op: &'static str) -> Self {
        match O::MODE {
            OverflowMode::Saturate => {
                log::trace!("{op} overflowed, saturating to infinity");
                Self::signed_infinity(overflow.negative)
            }
            OverflowMode::Modulus | OverflowMode::Undefined => Self::from_data(overflow.wrapped),
            OverflowMode::Impossible => {
                if cfg!(debug_assertions) {
                    panic!("attempt to {op} with overflow");
                }
                Self::from_data(overflow.wrapped)
            }
            OverflowMode::Exception => panic!("attempt to {op} with overflow"),
        }
    }

    fn exact_sum(self, rhs: Self) -> Result<Self, Overflowed<Raw<RANGE>>> {
        let wrapped = self.data.wrapping_add(&rhs.data);
        match self.data.checked_add(&rhs.data) {
            Some(sum) if sum.magnitude() <= <Raw<RANGE> as Storage>::finite_limit() => {
                Ok(Self::from_data(sum))
            }
            Some(sum) => Err(Overflowed {
                negative: sum < Raw::<RANGE>::zero(),
                wrapped,
            }),
            None => Err(Overflowed {
                negative: self.is_sign_negative(),
                wrapped,
            }),
        }
    }

    fn exact_product(self, rhs: Self) -> Result<Self, Overflowed<Raw<RANGE>>> {
        let negative = self.is_sign_negative() != rhs.is_sign_negative();
        Self::settled(
            self.magnitude()
                .widening_mul_shr(rhs.magnitude(), Self::FRACTION),
            negative,
        )
    }

    fn exact_quotient(self, rhs: Self) -> Result<Self, Overflowed<Raw<RANGE>>> {
        let negative = self.is_sign_negative() != rhs.is_sign_negative();
        Self::settled(
            self.magnitude()
                .widening_shl_div(rhs.magnitude(), Self::FRACTION),
            negative,
        )
    }

    fn sum(self, rhs: Self, op: &'static str) -> Self {
        match (self.kind(), rhs.kind()) {
            (Kind::Nan, _) | (_, Kind::Nan) => Self::nan(),
            (Kind::Infinite { negative }, Kind::Infinite { negative: other })
                if negative != other =>
            {
                Self::nan()
            }
            (Kind::Infinite { .. }, _) => self,
            (_, Kind::Infinite { .. }) => rhs,
            (Kind::Finite, Kind::Finite) => self
                .exact_sum(rhs)
                .unwrap_or_else(|overflow| Self::overflowed(overflow, op)),
        }
    }

    fn require_finite(self, rhs: Self) -> Result<(), ArithmeticError> {
        if self.is_finite() && rhs.is_finite() {
            Ok(())
        } else {
            Err(ArithmeticError::NonFinite)
        }
    }

    /// Returns `self + rhs`, or an error if either operand is not finite or
    /// the sum leaves the finite range.
    #[inline]
    pub fn try_add(self, rhs: Self) -> Result<Self, ArithmeticError> {
        self.require_finite(rhs)?;
        self.exact_sum(rhs).map_err(|_| ArithmeticError::Overflow)
    }

    /// Returns `self - rhs`, or an error if either operand is not finite or
    /// the difference leaves the finite range.
    #[inline]
    pub fn try_sub(self, rhs: Self) -> Result<Self, ArithmeticError> {
        self.require_finite(rhs)?;
        self.exact_sum(-rhs).map_err(|_| ArithmeticError::Overflow)
    }

    /// Returns `self * rhs`, or an error if either operand is not finite or
    /// the product leaves the finite range.
    #[inline]
    pub fn try_mul(self, rhs: Self) -> Result<Self, ArithmeticError> {
        self.require_finite(rhs)?;
        self.exact_product(rhs).map_err(|_| ArithmeticError::Overflow)
    }

    /// Returns `self / rhs`, or an error if either operand is not finite,
    /// `rhs` is zero, or the quotient leaves the finite range.
    #[inline]
    pub fn try_div(self, rhs: Self) -> Result<Self, ArithmeticError> {
        self.require_finite(rhs)?;
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        self.exact_quotient(rhs).map_err(|_| ArithmeticError::Overflow)
    }

    /// Returns `self + rhs` if it is finite and fits.
    #[must_use]
    #[inline]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.try_add(rhs).ok()
    }

    /// Returns `self - rhs` if it is finite and fits.
    #[must_use]
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.try_sub(rhs).ok()
    }

    /// Returns `self * rhs` if it is finite and fits.
    #[must_use]
    #[inline]
    pub fn checked_mul(self, rhs: Self) -> Option<Self> {
        self.try_mul(rhs).ok()
    }

    /// Returns `self / rhs` if it is finite, fits and `rhs` is not zero.
    #[must_use]
    #[inline]
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        self.try_div(rhs).ok()
    }

    /// Adds one in place.
    #[inline]
    pub fn increment(&mut self) {
        *self += Self::one();
    }

    /// Subtracts one in place.
    #[inline]
    pub fn decrement(&mut self) {
        *self -= Self::one();
    }

    fn exact_f64(value: f64) -> Result<Self, Overflowed<Raw<RANGE>>> {
        use num_traits::float::FloatCore;

        if value.is_nan() {
            return Ok(Self::nan());
        } else if value.is_infinite() {
            return Ok(Self::signed_infinity(value < 0.));
        }

        let scaled = value * f64::from_bits(u64::from(1023 + Self::FRACTION) << 52);
        let negative = scaled < 0.;
        let magnitude = FloatCore::abs(scaled);
        let whole = FloatCore::trunc(magnitude);
        let fraction = magnitude - whole;
        let tail = if fraction == 0. {
            Tail::Zero
        } else if fraction < 0.5 {
            Tail::BelowHalf
        } else if fraction > 0.5 {
            Tail::AboveHalf
        } else {
            Tail::Half
        };
        let fits = whole < f64::from_bits((1023 + 128) << 52);
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let whole = whole as u128;
        Self::settled_parts(negative, whole, fits, tail)
    }

    /// Returns the nearest `f64` to this value.
    #[must_use]
    pub fn to_f64(self) -> f64 {
        match self.kind() {
            Kind::Nan => f64::NAN,
            Kind::Infinite { negative: false } => f64::INFINITY,
            Kind::Infinite { negative: true } => f64::NEG_INFINITY,
            Kind::Finite => {
                let magnitude = self.magnitude();
                let whole = magnitude >> Self::SHIFT;
                let fraction = magnitude - (whole << Self::SHIFT);
                let unit = f64::from_bits(u64::from(1023 - Self::FRACTION) << 52);
                let value = whole.approximate_f64() + fraction.approximate_f64() * unit;
                if self.is_sign_negative() {
                    -value
                } else {
                    value
                }
            }
        }
    }

    /// Returns the nearest `f32` to this value.
    #[must_use]
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.to_scalar()
    }

    /// Converts this value to a host scalar.
    ///
    /// Integer targets truncate toward zero and saturate at their bounds.
    /// NaN converts to zero, and infinities convert to the target's extremes.
    /// Floating point targets receive the nearest value.
    #[must_use]
    pub fn to_scalar<T: Scalar>(self) -> T {
        match self.kind() {
            Kind::Finite if !T::FLOATING => T::from_integer(
                self.is_sign_negative(),
                (self.magnitude() >> Self::SHIFT).widen_u128(),
            ),
            _ => T::from_real(self.to_f64()),
        }
    }

    /// Converts this value to another configuration.
    ///
    /// Fractional bits that the target cannot hold are rounded per the
    /// target's rounding mode, and values beyond the target's range are
    /// handled per the target's overflow mode.
    #[must_use]
    pub fn convert<const TO_RANGE: u32, const TO_RESOLUTION: i32, R2, O2>(
        self,
    ) -> Negatable<TO_RANGE, TO_RESOLUTION, R2, O2>
    where
        Bits<TO_RANGE>: Backing,
        R2: Rounding,
        O2: Overflow,
    {
        match self.kind() {
            Kind::Nan => Negatable::nan(),
            Kind::Infinite { negative } => Negatable::signed_infinity(negative),
            Kind::Finite => Negatable::from_shifted(
                self.is_sign_negative(),
                self.magnitude().widen_u128(),
                RESOLUTION - TO_RESOLUTION,
                "convert",
            ),
        }
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> Clone for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
{
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> Copy
    for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
{
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> Default for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> Neg for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    type Output = Self;

    #[inline]
    fn neg(self) -> Self::Output {
        if self.is_nan() {
            self
        } else {
            Self::from_data(self.data.wrapping_neg())
        }
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> Add for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.sum(rhs, "add")
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> AddAssign for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> Sub for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.sum(-rhs, "subtract")
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> SubAssign for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> Mul for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        match (self.kind(), rhs.kind()) {
            (Kind::Nan, _) | (_, Kind::Nan) => Self::nan(),
            (Kind::Infinite { .. }, _) | (_, Kind::Infinite { .. })
                if self.is_zero() || rhs.is_zero() =>
            {
                Self::nan()
            }
            (Kind::Infinite { .. }, _) | (_, Kind::Infinite { .. }) => {
                Self::signed_infinity(self.is_sign_negative() != rhs.is_sign_negative())
            }
            (Kind::Finite, Kind::Finite) => self
                .exact_product(rhs)
                .unwrap_or_else(|overflow| Self::overflowed(overflow, "multiply")),
        }
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> MulAssign for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> Div for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        match (self.kind(), rhs.kind()) {
            (Kind::Nan, _) | (_, Kind::Nan) | (Kind::Infinite { .. }, Kind::Infinite { .. }) => {
                Self::nan()
            }
            (Kind::Infinite { negative }, Kind::Finite) => {
                Self::signed_infinity(negative != rhs.is_sign_negative())
            }
            (Kind::Finite, Kind::Infinite { .. }) => Self::zero(),
            (Kind::Finite, Kind::Finite) if rhs.is_zero() => {
                if self.is_zero() {
                    Self::nan()
                } else {
                    log::trace!("division by zero");
                    Self::signed_infinity(self.is_sign_negative())
                }
            }
            (Kind::Finite, Kind::Finite) => self
                .exact_quotient(rhs)
                .unwrap_or_else(|overflow| Self::overflowed(overflow, "divide")),
        }
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> DivAssign for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    #[inline]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> Rem for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    type Output = Self;

    /// Returns the remainder of truncated division, which has the sign of
    /// `self` and is always exact.
    fn rem(self, rhs: Self) -> Self::Output {
        match (self.kind(), rhs.kind()) {
            (Kind::Finite, Kind::Finite) if !rhs.is_zero() => {
                Self::from_data(self.data % rhs.data)
            }
            (Kind::Finite, Kind::Infinite { .. }) => self,
            _ => Self::nan(),
        }
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> RemAssign for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    #[inline]
    fn rem_assign(&mut self, rhs: Self) {
        *self = *self % rhs;
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> PartialEq for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    /// NaN is unequal to every value, including itself.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        !self.is_nan() && !other.is_nan() && self.data == other.data
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> PartialOrd
    for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    /// NaN is unordered with every value, including itself.
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.is_nan() || other.is_nan() {
            None
        } else {
            Some(self.data.cmp(&other.data))
        }
    }
}
