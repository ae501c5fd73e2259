use core::cmp::Ordering;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Rem, RemAssign, Sub, SubAssign};

use num_traits::AsPrimitive;

use crate::{Backing, Bits, Kind, Magnitude, Negatable, Overflow, Rounding, Storage};

mod sealed {
    pub trait Sealed {}
}

/// A host scalar decomposed for conversion.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Unpacked {
    /// An integer, split into its sign and magnitude.
    Integer {
        /// True if the integer is below zero.
        negative: bool,
        /// The absolute value.
        magnitude: u128,
    },
    /// A floating point value.
    Real(f64),
}

/// A primitive integer or floating point type that converts to and from
/// [`Negatable`], and that mixes with it in arithmetic and comparisons.
///
/// This trait is sealed.
pub trait Scalar: sealed::Sealed + Copy {
    /// True for `f32` and `f64`.
    const FLOATING: bool;

    /// Decomposes this value.
    fn unpack(self) -> Unpacked;

    /// Returns the integer with the given sign and magnitude, saturating at
    /// the bounds of `Self`.
    fn from_integer(negative: bool, magnitude: u128) -> Self;

    /// Returns `value` converted with `as` semantics: integers truncate
    /// toward zero and saturate, and NaN becomes zero.
    fn from_real(value: f64) -> Self;
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    /// Orders this value against a scalar without converting the scalar,
    /// so values beyond the finite range or between grid points compare by
    /// their exact value.
    fn cmp_scalar<T: Scalar>(self, other: T) -> Option<Ordering> {
        match (self.kind(), other.unpack()) {
            (Kind::Nan, _) => None,
            (
                kind,
                Unpacked::Integer {
                    negative,
                    magnitude,
                },
            ) => Some(self.cmp_integer(kind, negative && magnitude != 0, magnitude)),
            (kind, Unpacked::Real(value)) => self.cmp_real(kind, value),
        }
    }

    fn cmp_integer(self, kind: Kind, negative: bool, magnitude: u128) -> Ordering {
        if let Kind::Infinite { negative } = kind {
            return if negative {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }
        match (self.is_sign_negative(), negative) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => {
                let ordering = if magnitude > u128::MAX >> Self::FRACTION {
                    Ordering::Less
                } else {
                    self.magnitude().widen_u128().cmp(&(magnitude << Self::FRACTION))
                };
                if negative {
                    ordering.reverse()
                } else {
                    ordering
                }
            }
        }
    }

    fn cmp_real(self, kind: Kind, value: f64) -> Option<Ordering> {
        use num_traits::float::FloatCore;

        match kind {
            Kind::Nan => None,
            Kind::Infinite { negative: false } => f64::INFINITY.partial_cmp(&value),
            Kind::Infinite { negative: true } => f64::NEG_INFINITY.partial_cmp(&value),
            Kind::Finite if value.is_nan() => None,
            Kind::Finite => {
                let scaled = value * f64::from_bits(u64::from(1023 + Self::FRACTION) << 52);
                let whole = FloatCore::trunc(scaled);
                // Saturates beyond i128, where no finite code can be equal.
                let code: i128 = whole.as_();
                match self.data.widen().cmp(&code) {
                    Ordering::Equal => 0_f64.partial_cmp(&(scaled - whole)),
                    ordering => Some(ordering),
                }
            }
        }
    }
}

macro_rules! mixed_operators {
    ($type:ty) => {
        impl<const RANGE: u32, const RESOLUTION: i32, R, O> From<$type>
            for Negatable<RANGE, RESOLUTION, R, O>
        where
            Bits<RANGE>: Backing,
            R: Rounding,
            O: Overflow,
        {
            #[inline]
            fn from(value: $type) -> Self {
                Self::new(value)
            }
        }

        impl<const RANGE: u32, const RESOLUTION: i32, R, O> PartialEq<$type>
            for Negatable<RANGE, RESOLUTION, R, O>
        where
            Bits<RANGE>: Backing,
            R: Rounding,
            O: Overflow,
        {
            #[inline]
            fn eq(&self, other: &$type) -> bool {
                self.cmp_scalar(*other) == Some(Ordering::Equal)
            }
        }

        impl<const RANGE: u32, const RESOLUTION: i32, R, O>
            PartialEq<Negatable<RANGE, RESOLUTION, R, O>> for $type
        where
            Bits<RANGE>: Backing,
            R: Rounding,
            O: Overflow,
        {
            #[inline]
            fn eq(&self, other: &Negatable<RANGE, RESOLUTION, R, O>) -> bool {
                other.cmp_scalar(*self) == Some(Ordering::Equal)
            }
        }

        impl<const RANGE: u32, const RESOLUTION: i32, R, O> PartialOrd<$type>
            for Negatable<RANGE, RESOLUTION, R, O>
        where
            Bits<RANGE>: Backing,
            R: Rounding,
            O: Overflow,
        {
            #[inline]
            fn partial_cmp(&self, other: &$type) -> Option<Ordering> {
                self.cmp_scalar(*other)
            }
        }

        impl<const RANGE: u32, const RESOLUTION: i32, R, O>
            PartialOrd<Negatable<RANGE, RESOLUTION, R, O>> for $type
        where
            Bits<RANGE>: Backing,
            R: Rounding,
            O: Overflow,
        {
            #[inline]
            fn partial_cmp(&self, other: &Negatable<RANGE, RESOLUTION, R, O>) -> Option<Ordering> {
                other.cmp_scalar(*self).map(Ordering::reverse)
            }
        }

        mixed_operators!($type: Add::add, AddAssign::add_assign);
        mixed_operators!($type: Sub::sub, SubAssign::sub_assign);
        mixed_operators!($type: Mul::mul, MulAssign::mul_assign);
        mixed_operators!($type: Div::div, DivAssign::div_assign);
        mixed_operators!($type: Rem::rem, RemAssign::rem_assign);
    };
    ($type:ty: $trait:ident::$method:ident, $assign:ident::$assign_method:ident) => {
        impl<const RANGE: u32, const RESOLUTION: i32, R, O> $trait<$type>
            for Negatable<RANGE, RESOLUTION, R, O>
        where
            Bits<RANGE>: Backing,
            R: Rounding,
            O: Overflow,
        {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: $type) -> Self::Output {
                $trait::$method(self, Self::new(rhs))
            }
        }

        impl<const RANGE: u32, const RESOLUTION: i32, R, O>
            $trait<Negatable<RANGE, RESOLUTION, R, O>> for $type
        where
            Bits<RANGE>: Backing,
            R: Rounding,
            O: Overflow,
        {
            type Output = Negatable<RANGE, RESOLUTION, R, O>;

            #[inline]
            fn $method(self, rhs: Negatable<RANGE, RESOLUTION, R, O>) -> Self::Output {
                $trait::$method(Negatable::<RANGE, RESOLUTION, R, O>::new(self), rhs)
            }
        }

        impl<const RANGE: u32, const RESOLUTION: i32, R, O> $assign<$type>
            for Negatable<RANGE, RESOLUTION, R, O>
        where
            Bits<RANGE>: Backing,
            R: Rounding,
            O: Overflow,
        {
            #[inline]
            fn $assign_method(&mut self, rhs: $type) {
                $assign::$assign_method(self, Self::new(rhs));
            }
        }
    };
}

macro_rules! signed {
    ($($type:ty),+) => {$(
        impl sealed::Sealed for $type {}

        impl Scalar for $type {
            const FLOATING: bool = false;

            #[inline]
            fn unpack(self) -> Unpacked {
                let wide: i128 = self.as_();
                Unpacked::Integer {
                    negative: wide < 0,
                    magnitude: wide.unsigned_abs(),
                }
            }

            #[inline]
            fn from_integer(negative: bool, magnitude: u128) -> Self {
                if negative {
                    num_traits::cast(0_i128.saturating_sub_unsigned(magnitude))
                        .unwrap_or(<$type>::MIN)
                } else {
                    num_traits::cast(magnitude).unwrap_or(<$type>::MAX)
                }
            }

            #[inline]
            fn from_real(value: f64) -> Self {
                value.as_()
            }
        }

        mixed_operators!($type);
    )+};
}

macro_rules! unsigned {
    ($($type:ty),+) => {$(
        impl sealed::Sealed for $type {}

        impl Scalar for $type {
            const FLOATING: bool = false;

            #[inline]
            fn unpack(self) -> Unpacked {
                Unpacked::Integer {
                    negative: false,
                    magnitude: self.as_(),
                }
            }

            #[inline]
            fn from_integer(negative: bool, magnitude: u128) -> Self {
                if negative {
                    0
                } else {
                    num_traits::cast(magnitude).unwrap_or(<$type>::MAX)
                }
            }

            #[inline]
            fn from_real(value: f64) -> Self {
                value.as_()
            }
        }

        mixed_operators!($type);
    )+};
}

macro_rules! floating {
    ($($type:ty),+) => {$(
        impl sealed::Sealed for $type {}

        impl Scalar for $type {
            const FLOATING: bool = true;

            #[inline]
            fn unpack(self) -> Unpacked {
                Unpacked::Real(self.as_())
            }

            #[inline]
            fn from_integer(negative: bool, magnitude: u128) -> Self {
                let magnitude: $type = magnitude.as_();
                if negative {
                    -magnitude
                } else {
                    magnitude
                }
            }

            #[inline]
            fn from_real(value: f64) -> Self {
                value.as_()
            }
        }

        mixed_operators!($type);
    )+};
}

signed!(i8, i16, i32, i64, i128, isize);
unsigned!(u8, u16, u32, u64, u128, usize);
floating!(f32, f64);
