//! Elementary functions evaluated with fixed-point arithmetic only.
//!
//! Each function reduces its argument into a small interval and evaluates a
//! fixed-degree polynomial there. The coefficients are minimax fits with 24
//! fractional bits; they and the constants below are widened to 64 fractional
//! bits and rounded to the configured resolution on use, so the same tables
//! serve every configuration.

use num_traits::Zero;

use crate::{Backing, Bits, Kind, Magnitude, Negatable, Overflow, Rounding, Storage};

const LN_2: u128 = 0xb172_17f7_d1cf_79ac;
const LOG10_2: u128 = 0x4d10_4d42_7de7_fbcc;
const PI: u128 = 0x3_243f_6a88_85a3_08d3;
const FRAC_PI_2: u128 = 0x1_921f_b544_42d1_846a;
const FRAC_PI_4: u128 = FRAC_PI_2 >> 1;
const FRAC_2_PI: u128 = 0xa2f9_836e_4e44_152a;

/// `(e^α - 1) / α` on `[0, ln 2)`.
const EXP: [i32; 6] = [16_777_246, 8_388_613, 2_795_628, 698_971, 142_422, 23_635];
/// `ln(1 + x) / x` on `[0, 1)`.
const LN: [i32; 5] = [16_768_752, -8_252_862, 4_856_580, -2_282_754, 539_529];
/// `(cos(r) - 1) / r²` as a polynomial in `r²`, on `[0, π/2]`.
const COS: [i32; 5] = [-8_388_607, 699_050, -23_300, 415, -4];
/// `sin(r) / r` as a polynomial in `r²`, on `[0, π/4]`.
const SIN: [i32; 5] = [16_777_216, -2_796_203, 139_810, -3_329, 46];
/// `(π/2 - asin(x)) / sqrt(1 - x)` on `[0, 1]`.
const ASIN: [i32; 8] = [
    26_353_588, -3_600_370, 1_492_819, -841_785, 518_279, -286_691, 111_905, -21_181,
];
/// `atan(x) / x` as a polynomial in `x²`, on `[0, 1]`.
const ATAN: [i32; 5] = [16_774_967, -5_541_506, 3_022_264, -1_428_294, 349_554];

impl<const RANGE: u32, const RESOLUTION: i32, R, O> Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    /// Rounds a constant with 64 fractional bits to the nearest grid point.
    fn from_q64(negative: bool, q64: u128) -> Self {
        if Self::FRACTION >= 64 {
            #[expect(clippy::cast_possible_wrap)]
            let shift = (Self::FRACTION - 64) as i32;
            Self::from_shifted(negative, q64, shift, "convert")
        } else {
            let shift = 64 - Self::FRACTION;
            let rounded = (q64 >> shift) + ((q64 >> (shift - 1)) & 1);
            Self::from_parts(negative, rounded, true, crate::Tail::Zero, "convert")
        }
    }

    fn coefficient(q24: i32) -> Self {
        Self::from_q64(q24 < 0, u128::from(q24.unsigned_abs()) << 40)
    }

    fn horner(self, coefficients: &[i32]) -> Self {
        coefficients
            .iter()
            .rev()
            .fold(Self::zero(), |sum, &coefficient| {
                sum * self + Self::coefficient(coefficient)
            })
    }

    /// Returns ln 2.
    #[must_use]
    pub fn ln_2() -> Self {
        Self::from_q64(false, LN_2)
    }

    /// Returns π.
    #[must_use]
    pub fn pi() -> Self {
        Self::from_q64(false, PI)
    }

    /// Returns π/2.
    #[must_use]
    pub fn frac_pi_2() -> Self {
        Self::from_q64(false, FRAC_PI_2)
    }

    fn nan_for(self, function: &str) -> Self {
        log::trace!("{function} is undefined for {self}");
        Self::nan()
    }

    /// Returns half of this value, rounded per `R`.
    #[must_use]
    pub fn half(self) -> Self {
        match self.kind() {
            Kind::Finite => Self::from_shifted(
                self.is_sign_negative(),
                self.magnitude().widen_u128(),
                -1,
                "divide",
            ),
            _ => self,
        }
    }

    /// Returns the absolute value.
    #[must_use]
    #[doc(alias = "fabs")]
    pub fn abs(self) -> Self {
        if self.is_nan() {
            self
        } else {
            Self::from_magnitude(self.magnitude(), false)
        }
    }

    /// Returns 1 for positive values, -1 for negative values and 0 for 0.
    #[must_use]
    pub fn signum(self) -> Self {
        if self.is_nan() || self.is_zero() {
            self
        } else if self.is_sign_negative() {
            -Self::one()
        } else {
            Self::one()
        }
    }

    /// Returns `1 / self`.
    #[must_use]
    pub fn recip(self) -> Self {
        Self::one() / self
    }

    fn checked_floor(self) -> Option<Self> {
        let floored = (self.data >> Self::SHIFT) << Self::SHIFT;
        (floored.magnitude() <= <crate::Raw<RANGE> as Storage>::finite_limit())
            .then(|| Self::from_data(floored))
    }

    /// Returns the largest integer less than or equal to this value.
    #[must_use]
    pub fn floor(self) -> Self {
        if !self.is_finite() {
            return self;
        }

        self.checked_floor().unwrap_or_else(|| {
            Self::overflowed(
                crate::Overflowed {
                    negative: true,
                    wrapped: (self.data >> Self::SHIFT) << Self::SHIFT,
                },
                "floor",
            )
        })
    }

    /// Returns the smallest integer greater than or equal to this value.
    #[must_use]
    pub fn ceil(self) -> Self {
        -(-self).floor()
    }

    /// Returns the integer part of this value.
    #[must_use]
    pub fn trunc(self) -> Self {
        if !self.is_finite() {
            return self;
        }

        Self::from_magnitude(
            (self.magnitude() >> Self::SHIFT) << Self::SHIFT,
            self.is_sign_negative(),
        )
    }

    /// Returns the nearest integer, with halves rounded away from zero.
    #[must_use]
    pub fn round(self) -> Self {
        if !self.is_finite() {
            return self;
        }

        let half = self.magnitude().widen_u128() + (1 << (Self::FRACTION - 1));
        Self::from_parts(
            self.is_sign_negative(),
            (half >> Self::FRACTION) << Self::FRACTION,
            true,
            crate::Tail::Zero,
            "round",
        )
    }

    /// Returns the fractional part of this value, with the sign of `self`.
    #[must_use]
    pub fn fract(self) -> Self {
        self - self.trunc()
    }

    /// Returns `self` raised to an integer power.
    #[must_use]
    pub fn powi(self, exponent: i32) -> Self {
        let mut base = self;
        let mut remaining = exponent.unsigned_abs();
        let mut result = Self::one();
        while remaining > 0 {
            if remaining & 1 == 1 {
                result *= base;
            }
            remaining >>= 1;
            if remaining > 0 {
                base *= base;
            }
        }

        if exponent < 0 {
            result.recip()
        } else {
            result
        }
    }

    /// Returns `self` raised to the power of `exponent`.
    ///
    /// Negative bases produce NaN.
    #[must_use]
    pub fn powf(self, exponent: Self) -> Self {
        if self.is_zero() && exponent > Self::zero() {
            Self::zero()
        } else if exponent.is_zero() && !self.is_nan() {
            Self::one()
        } else {
            (exponent * self.ln()).exp()
        }
    }

    /// Returns `e^self`.
    ///
    /// The argument is split as `n·ln 2 + α` with `α` in `[0, ln 2)`, the
    /// exponential of `α` is evaluated by polynomial, and the result is
    /// scaled by `2^n` with an exact shift.
    #[must_use]
    pub fn exp(self) -> Self {
        match self.kind() {
            Kind::Nan | Kind::Infinite { negative: false } => return self,
            Kind::Infinite { negative: true } => return Self::zero(),
            Kind::Finite if self.is_zero() => return Self::one(),
            Kind::Finite => {}
        }

        let ln_2 = Self::ln_2();
        let Some(whole) = self.checked_div(ln_2).and_then(Self::checked_floor) else {
            return if self.is_sign_negative() {
                Self::zero()
            } else {
                Self::overflowed(
                    crate::Overflowed {
                        negative: false,
                        wrapped: Self::infinity().data,
                    },
                    "exp",
                )
            };
        };
        let alpha = self - whole * ln_2;
        let sum = Self::one() + alpha * alpha.horner(&EXP);
        let power = (whole.data.widen() >> Self::FRACTION)
            .clamp(i128::from(i32::MIN), i128::from(i32::MAX));
        #[expect(clippy::cast_possible_truncation)]
        let power = power as i32;
        Self::from_shifted(false, sum.magnitude().widen_u128(), power, "exp")
    }

    /// Returns `2^self`.
    #[must_use]
    pub fn exp2(self) -> Self {
        (self * Self::ln_2()).exp()
    }

    /// Returns the natural logarithm.
    ///
    /// The argument is split as `m·2^e` with `m` in `[1, 2)` directly from
    /// the bit length of its raw code.
    #[must_use]
    #[doc(alias = "log")]
    pub fn ln(self) -> Self {
        match self.kind() {
            Kind::Nan | Kind::Infinite { negative: false } => return self,
            Kind::Infinite { negative: true } => return self.nan_for("ln"),
            Kind::Finite if self.data <= crate::Raw::<RANGE>::zero() => {
                return self.nan_for("ln");
            }
            Kind::Finite => {}
        }

        let magnitude = self.magnitude().widen_u128();
        #[expect(clippy::cast_possible_wrap)]
        let exponent = (127 - magnitude.leading_zeros()) as i32 - RESOLUTION.wrapping_neg();
        let mantissa = Self::from_shifted(false, magnitude, -exponent, "ln");
        let x = mantissa - Self::one();
        let scaled = Self::from_q64(
            exponent < 0,
            u128::from(exponent.unsigned_abs()) * LN_2,
        );
        x * x.horner(&LN) + scaled
    }

    /// Returns the base 2 logarithm.
    #[must_use]
    pub fn log2(self) -> Self {
        self.ln() / Self::ln_2()
    }

    /// Returns the base 10 logarithm.
    #[must_use]
    pub fn log10(self) -> Self {
        self.log2() * Self::from_q64(false, LOG10_2)
    }

    /// Returns the logarithm in `base`.
    #[must_use]
    pub fn log(self, base: Self) -> Self {
        self.ln() / base.ln()
    }

    /// Returns the square root, truncated to the grid.
    #[must_use]
    pub fn sqrt(self) -> Self {
        match self.kind() {
            Kind::Nan | Kind::Infinite { negative: false } => self,
            _ if self.is_sign_negative() => self.nan_for("sqrt"),
            _ => Self::from_magnitude(
                self.magnitude().widening_sqrt_shl(Self::FRACTION),
                false,
            ),
        }
    }

    /// Evaluates `cos(magnitude + offset·π/2)` for a non-negative
    /// `magnitude`.
    ///
    /// The angle is reduced to `[0, π/4]` so that small results come from
    /// the sine polynomial, which keeps its relative precision near zero.
    fn cosine(magnitude: Self, offset: i128) -> Self {
        let frac_pi_2 = Self::frac_pi_2();
        let quadrant = (magnitude * Self::from_q64(false, FRAC_2_PI)).floor();
        let reduced = magnitude - quadrant * frac_pi_2;
        let turn = ((quadrant.data.widen() >> Self::FRACTION) + offset) & 3;
        let complement = reduced > Self::from_q64(false, FRAC_PI_4);
        let angle = if complement {
            frac_pi_2 - reduced
        } else {
            reduced
        };
        let value = if (turn & 1 == 1) != complement {
            angle.sin_polynomial()
        } else {
            angle.cos_polynomial()
        };
        if turn == 1 || turn == 2 {
            -value
        } else {
            value
        }
    }

    fn cos_polynomial(self) -> Self {
        let squared = self * self;
        Self::one() + squared * squared.horner(&COS)
    }

    fn sin_polynomial(self) -> Self {
        self * (self * self).horner(&SIN)
    }

    /// Returns the cosine of an angle in radians.
    #[must_use]
    pub fn cos(self) -> Self {
        match self.kind() {
            Kind::Finite => Self::cosine(self.abs(), 0),
            Kind::Infinite { .. } => self.nan_for("cos"),
            Kind::Nan => self,
        }
    }

    /// Returns the sine of an angle in radians.
    #[must_use]
    pub fn sin(self) -> Self {
        match self.kind() {
            Kind::Finite => {
                let sine = Self::cosine(self.abs(), 3);
                if self.is_sign_negative() {
                    -sine
                } else {
                    sine
                }
            }
            Kind::Infinite { .. } => self.nan_for("sin"),
            Kind::Nan => self,
        }
    }

    /// Returns the tangent of an angle in radians.
    #[must_use]
    pub fn tan(self) -> Self {
        self.sin() / self.cos()
    }

    /// Returns the arcsine in radians. Arguments outside of `[-1, 1]` produce
    /// NaN.
    #[must_use]
    pub fn asin(self) -> Self {
        if self.is_nan() {
            return self;
        }

        let magnitude = self.abs();
        if magnitude > Self::one() {
            return self.nan_for("asin");
        }

        let angle =
            Self::frac_pi_2() - (Self::one() - magnitude).sqrt() * magnitude.horner(&ASIN);
        if self.is_sign_negative() {
            -angle
        } else {
            angle
        }
    }

    /// Returns the arccosine in radians. Arguments outside of `[-1, 1]`
    /// produce NaN.
    #[must_use]
    pub fn acos(self) -> Self {
        Self::frac_pi_2() - self.asin()
    }

    /// Returns the arctangent in radians.
    #[must_use]
    pub fn atan(self) -> Self {
        let magnitude = match self.kind() {
            Kind::Nan => return self,
            Kind::Infinite { .. } => Self::frac_pi_2(),
            Kind::Finite if self.abs() > Self::one() => {
                Self::frac_pi_2() - Self::atan_polynomial(self.abs().recip())
            }
            Kind::Finite => Self::atan_polynomial(self.abs()),
        };
        if self.is_sign_negative() {
            -magnitude
        } else {
            magnitude
        }
    }

    fn atan_polynomial(x: Self) -> Self {
        x * (x * x).horner(&ATAN)
    }

    /// Returns the angle of the point `(other, self)` in radians, in
    /// `[-π, π]`.
    #[must_use]
    pub fn atan2(self, other: Self) -> Self {
        if self.is_nan() || other.is_nan() {
            return Self::nan();
        }

        let zero = Self::zero();
        if other > zero {
            (self / other).atan()
        } else if other < zero {
            if self.is_sign_negative() {
                (self / other).atan() - Self::pi()
            } else {
                (self / other).atan() + Self::pi()
            }
        } else if self > zero {
            Self::frac_pi_2()
        } else if self < zero {
            -Self::frac_pi_2()
        } else {
            zero
        }
    }

    /// Returns the hyperbolic sine.
    ///
    /// The growing term is evaluated as `e^(|x| - ln 2)` so that it stays in
    /// range whenever the result does.
    #[must_use]
    pub fn sinh(self) -> Self {
        if self.is_nan() || self.is_zero() {
            return self;
        }

        let magnitude = self.abs();
        let sinh = (magnitude - Self::ln_2()).exp() - (-magnitude).exp().half();
        if self.is_sign_negative() {
            -sinh
        } else {
            sinh
        }
    }

    /// Returns the hyperbolic cosine.
    #[must_use]
    pub fn cosh(self) -> Self {
        let magnitude = self.abs();
        (magnitude - Self::ln_2()).exp() + (-magnitude).exp().half()
    }

    /// Returns the hyperbolic tangent.
    #[must_use]
    pub fn tanh(self) -> Self {
        if self.is_nan() {
            return self;
        }

        let magnitude = self.abs();
        let decay = magnitude
            .checked_add(magnitude)
            .map_or_else(Self::zero, |double| (-double).exp());
        let tanh = (Self::one() - decay) / (Self::one() + decay);
        if self.is_sign_negative() {
            -tanh
        } else {
            tanh
        }
    }

    /// Returns the inverse hyperbolic sine.
    #[must_use]
    pub fn asinh(self) -> Self {
        if !self.is_finite() {
            return self;
        }

        let one = Self::one();
        let magnitude = self.abs();
        let asinh = if magnitude > one {
            let inverse = magnitude.recip();
            magnitude.ln() + (one + (one + inverse * inverse).sqrt()).ln()
        } else {
            (magnitude + (magnitude * magnitude + one).sqrt()).ln()
        };
        if self.is_sign_negative() {
            -asinh
        } else {
            asinh
        }
    }

    /// Returns the inverse hyperbolic cosine. Arguments below 1 produce NaN.
    #[must_use]
    pub fn acosh(self) -> Self {
        let one = Self::one();
        if self.is_nan() || self == Self::infinity() {
            self
        } else if self < one {
            self.nan_for("acosh")
        } else {
            let inverse = self.recip();
            self.ln() + (one + (one - inverse * inverse).sqrt()).ln()
        }
    }

    /// Returns the inverse hyperbolic tangent. Arguments outside of `[-1, 1]`
    /// produce NaN, and ±1 produce the matching infinity.
    ///
    /// Evaluated as `-ln((1 - |x|) / (1 + |x|)) / 2`, whose quotient stays
    /// within `(0, 1]` for every argument.
    #[must_use]
    pub fn atanh(self) -> Self {
        let one = Self::one();
        let magnitude = self.abs();
        if self.is_nan() {
            return self;
        } else if magnitude > one {
            return self.nan_for("atanh");
        } else if magnitude == one {
            return Self::signed_infinity(self.is_sign_negative());
        }

        let atanh = (-((one - magnitude) / (one + magnitude)).ln()).half();
        if self.is_sign_negative() {
            -atanh
        } else {
            atanh
        }
    }
}
