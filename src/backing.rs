//! Compile-time selection of the integer storage behind a fixed-point type.
//!
//! A requested bit width is mapped to the narrowest signed primitive able to
//! hold it. Each storage type names an unsigned magnitude type of the same
//! width, and each magnitude type knows how to widen into an intermediate
//! twice its width for multiplication, division and square roots. The 128-bit
//! tier widens into an arbitrary-precision integer.

use core::fmt::Debug;
use core::ops::Sub;

use num_bigint::BigUint;
use num_traits::{AsPrimitive, One, PrimInt, WrappingAdd, WrappingNeg, Zero};

/// A bit width used to select a storage tier.
///
/// `Bits<W>` implements [`Backing`] for every `W` in `1..=128`.
#[derive(Clone, Copy, Default, Debug, Eq, PartialEq)]
pub struct Bits<const WIDTH: u32>;

/// Maps a [`Bits`] width to its storage type.
pub trait Backing {
    /// The narrowest signed primitive with at least the requested width.
    type Signed: Storage;
}

/// The signed storage selected for `RANGE` bits.
pub type Raw<const RANGE: u32> = <Bits<RANGE> as Backing>::Signed;

/// The unsigned magnitude type paired with [`Raw<RANGE>`].
pub type RawMagnitude<const RANGE: u32> = <Raw<RANGE> as Storage>::Magnitude;

/// Returns the width requested for the auxiliary exponent representation of a
/// type with the given resolution: the larger of 16 and the fractional bit
/// count.
#[must_use]
pub const fn exponent_bits(resolution: i32) -> u32 {
    let fractional = resolution.unsigned_abs();
    if fractional < 16 {
        16
    } else {
        fractional
    }
}

/// How the bits discarded by a truncating operation compare to half of one
/// unit in the last place.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum Tail {
    /// Nothing was discarded; the result is exact.
    Zero,
    /// Less than half a unit was discarded.
    BelowHalf,
    /// Exactly half a unit was discarded.
    Half,
    /// More than half a unit was discarded.
    AboveHalf,
}

impl Tail {
    /// Classifies `remainder` as a fraction of `divisor`.
    #[must_use]
    pub fn of<T>(remainder: T, divisor: T) -> Self
    where
        T: Ord + Zero + Clone + Sub<Output = T>,
    {
        if remainder.is_zero() {
            return Self::Zero;
        }

        let complement = divisor - remainder.clone();
        match remainder.cmp(&complement) {
            core::cmp::Ordering::Less => Self::BelowHalf,
            core::cmp::Ordering::Equal => Self::Half,
            core::cmp::Ordering::Greater => Self::AboveHalf,
        }
    }
}

/// The truncated result of a widening operation.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct Quotient<M> {
    /// The low bits of the truncated result.
    pub value: M,
    /// False if the truncated result did not fit in `M`.
    pub fits: bool,
    /// The discarded fraction.
    pub tail: Tail,
}

/// A signed primitive usable as fixed-point storage.
pub trait Storage:
    PrimInt + num_traits::Signed + WrappingAdd + WrappingNeg + Debug + Send + Sync + 'static
{
    /// The unsigned type of the same width.
    type Magnitude: Magnitude;

    /// Converts a small constant.
    fn small(value: i8) -> Self;

    /// Returns the absolute value without overflow.
    fn magnitude(self) -> Self::Magnitude;

    /// Reinterprets `magnitude` as signed and negates it if requested,
    /// wrapping when `magnitude` exceeds the signed maximum.
    fn with_sign(magnitude: Self::Magnitude, negative: bool) -> Self;

    /// Sign-extends to 128 bits.
    fn widen(self) -> i128;

    /// The largest magnitude of a finite value. The three codes above it are
    /// reserved for infinity, quiet-NaN and the storage maximum.
    #[inline]
    fn finite_limit() -> Self::Magnitude {
        Self::max_value().magnitude() - Self::Magnitude::small(3)
    }

    /// The magnitude of the infinity sentinels.
    #[inline]
    fn infinity_magnitude() -> Self::Magnitude {
        Self::finite_limit() + Self::Magnitude::one()
    }

    /// The quiet-NaN sentinel.
    #[inline]
    fn nan_code() -> Self {
        Self::with_sign(Self::finite_limit() + Self::Magnitude::small(2), false)
    }
}

/// An unsigned primitive holding the magnitude of a [`Storage`] value.
pub trait Magnitude: PrimInt + num_traits::Unsigned + Debug + Send + Sync + 'static {
    /// The unsigned intermediate twice as wide as `Self`.
    type Wide;

    /// Converts a small constant.
    fn small(value: u8) -> Self;

    /// Keeps the low bits of `value`.
    fn truncate_u128(value: u128) -> Self;

    /// Zero-extends to 128 bits.
    fn widen_u128(self) -> u128;

    /// Returns the nearest `f64`.
    fn approximate_f64(self) -> f64;

    /// Returns `(self * rhs) >> shift`, computed without intermediate
    /// overflow.
    fn widening_mul_shr(self, rhs: Self, shift: u32) -> Quotient<Self>;

    /// Returns `(self << shift) / rhs`, computed without intermediate
    /// overflow. `rhs` must not be zero.
    fn widening_shl_div(self, rhs: Self, shift: u32) -> Quotient<Self>;

    /// Returns `floor(sqrt(self << shift))`.
    ///
    /// `shift` must be less than the bit width of `Self`.
    fn widening_sqrt_shl(self, shift: u32) -> Self;
}

macro_rules! backing {
    ($signed:ty: $($width:literal)+) => {$(
        impl Backing for Bits<$width> {
            type Signed = $signed;
        }
    )+};
}

backing!(i8:
    1 2 3 4 5 6 7 8
);
backing!(i16:
    9 10 11 12 13 14 15 16
);
backing!(i32:
    17 18 19 20 21 22 23 24 25 26 27 28 29 30 31 32
);
backing!(i64:
    33 34 35 36 37 38 39 40 41 42 43 44 45 46 47 48
    49 50 51 52 53 54 55 56 57 58 59 60 61 62 63 64
);
backing!(i128:
    65 66 67 68 69 70 71 72 73 74 75 76 77 78 79 80
    81 82 83 84 85 86 87 88 89 90 91 92 93 94 95 96
    97 98 99 100 101 102 103 104 105 106 107 108 109 110 111 112
    113 114 115 116 117 118 119 120 121 122 123 124 125 126 127 128
);

macro_rules! storage {
    ($($signed:ty => $unsigned:ty),+ $(,)?) => {$(
        impl Storage for $signed {
            type Magnitude = $unsigned;

            #[inline]
            fn small(value: i8) -> Self {
                Self::from(value)
            }

            #[inline]
            fn magnitude(self) -> $unsigned {
                self.unsigned_abs()
            }

            #[inline]
            #[expect(clippy::cast_possible_wrap)]
            fn with_sign(magnitude: $unsigned, negative: bool) -> Self {
                let raw = magnitude as $signed;
                if negative {
                    raw.wrapping_neg()
                } else {
                    raw
                }
            }

            #[inline]
            fn widen(self) -> i128 {
                i128::from(self)
            }
        }
    )+};
}

storage!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128);

macro_rules! primitive_magnitude {
    ($($narrow:ty => $wide:ty),+ $(,)?) => {$(
        impl Magnitude for $narrow {
            type Wide = $wide;

            #[inline]
            fn small(value: u8) -> Self {
                Self::from(value)
            }

            #[inline]
            #[expect(clippy::cast_possible_truncation)]
            fn truncate_u128(value: u128) -> Self {
                value as $narrow
            }

            #[inline]
            fn widen_u128(self) -> u128 {
                u128::from(self)
            }

            #[inline]
            fn approximate_f64(self) -> f64 {
                self.as_()
            }

            #[inline]
            #[expect(clippy::cast_possible_truncation)]
            fn widening_mul_shr(self, rhs: Self, shift: u32) -> Quotient<Self> {
                let product = <$wide>::from(self) * <$wide>::from(rhs);
                let whole = product >> shift;
                let divisor: $wide = 1 << shift;
                Quotient {
                    value: whole as $narrow,
                    fits: whole <= <$wide>::from(<$narrow>::MAX),
                    tail: Tail::of(product & (divisor - 1), divisor),
                }
            }

            #[inline]
            #[expect(clippy::cast_possible_truncation)]
            fn widening_shl_div(self, rhs: Self, shift: u32) -> Quotient<Self> {
                let numerator = <$wide>::from(self) << shift;
                let divisor = <$wide>::from(rhs);
                let whole = numerator / divisor;
                Quotient {
                    value: whole as $narrow,
                    fits: whole <= <$wide>::from(<$narrow>::MAX),
                    tail: Tail::of(numerator % divisor, divisor),
                }
            }

            #[inline]
            #[expect(clippy::cast_possible_truncation)]
            fn widening_sqrt_shl(self, shift: u32) -> Self {
                isqrt(<$wide>::from(self) << shift) as $narrow
            }
        }
    )+};
}

primitive_magnitude!(u8 => u16, u16 => u32, u32 => u64, u64 => u128);

impl Magnitude for u128 {
    type Wide = BigUint;

    #[inline]
    fn small(value: u8) -> Self {
        Self::from(value)
    }

    #[inline]
    fn truncate_u128(value: u128) -> Self {
        value
    }

    #[inline]
    fn widen_u128(self) -> u128 {
        self
    }

    #[inline]
    #[expect(clippy::cast_precision_loss)]
    fn approximate_f64(self) -> f64 {
        self as f64
    }

    fn widening_mul_shr(self, rhs: Self, shift: u32) -> Quotient<Self> {
        let product = BigUint::from(self) * BigUint::from(rhs);
        let whole = &product >> shift;
        let remainder = product - (&whole << shift);
        narrow(&whole, Tail::of(remainder, BigUint::one() << shift))
    }

    fn widening_shl_div(self, rhs: Self, shift: u32) -> Quotient<Self> {
        let numerator = BigUint::from(self) << shift;
        let divisor = BigUint::from(rhs);
        let whole = &numerator / &divisor;
        let remainder = numerator % &divisor;
        narrow(&whole, Tail::of(remainder, divisor))
    }

    fn widening_sqrt_shl(self, shift: u32) -> Self {
        low_u128(&(BigUint::from(self) << shift).sqrt())
    }
}

fn narrow(whole: &BigUint, tail: Tail) -> Quotient<u128> {
    Quotient {
        value: low_u128(whole),
        fits: whole.bits() <= 128,
        tail,
    }
}

/// Returns the low 128 bits of `value`.
pub(crate) fn low_u128(value: &BigUint) -> u128 {
    let mut digits = value.iter_u64_digits();
    let low = digits.next().unwrap_or(0);
    let high = digits.next().unwrap_or(0);
    (u128::from(high) << 64) | u128::from(low)
}

/// Bit-by-bit integer square root.
fn isqrt<T: PrimInt>(value: T) -> T {
    let width = T::zero().count_zeros() as usize;
    let mut bit = T::one() << (width - 2);
    while bit > value {
        bit = bit >> 2;
    }

    let mut remainder = value;
    let mut root = T::zero();
    while !bit.is_zero() {
        if remainder >= root + bit {
            remainder = remainder - (root + bit);
            root = (root >> 1) + bit;
        } else {
            root = root >> 1;
        }
        bit = bit >> 2;
    }
    root
}
