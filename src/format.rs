use alloc::string::String;
use core::fmt::{Debug, Display, Write};
use core::str::FromStr;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::backing::low_u128;
use crate::{
    Backing, Bits, Kind, Magnitude, Negatable, Overflow, ParseNegatableError, Rounding, Tail,
};

impl<const RANGE: u32, const RESOLUTION: i32, R, O> Display for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    /// Writes the exact decimal expansion of this value.
    ///
    /// With a precision, exactly that many fractional digits are written and
    /// the rest are truncated. Without one, every digit of the expansion is
    /// written, which always terminates.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.kind() {
            Kind::Nan => return f.pad("NaN"),
            Kind::Infinite { negative: false } => return f.pad("inf"),
            Kind::Infinite { negative: true } => return f.pad("-inf"),
            Kind::Finite => {}
        }

        let magnitude = self.magnitude().widen_u128();
        let whole = magnitude >> Self::FRACTION;
        let mut text = String::new();
        write!(text, "{whole}")?;

        let mask = BigUint::from((1_u128 << Self::FRACTION) - 1);
        let mut fraction = BigUint::from(magnitude) & &mask;
        let digits = f.precision();
        if digits != Some(0) && (digits.is_some() || !fraction.is_zero()) {
            text.push('.');
        }
        let mut written = 0;
        while digits.map_or(!fraction.is_zero(), |digits| written < digits) {
            fraction *= 10_u32;
            let digit = low_u128(&(&fraction >> Self::FRACTION));
            fraction &= &mask;
            text.push(char::from(b'0' + u8::try_from(digit).map_err(|_| core::fmt::Error)?));
            written += 1;
        }

        f.pad_integral(!self.is_sign_negative(), "", &text)
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> Debug for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        Display::fmt(self, f)
    }
}

impl<const RANGE: u32, const RESOLUTION: i32, R, O> FromStr for Negatable<RANGE, RESOLUTION, R, O>
where
    Bits<RANGE>: Backing,
    R: Rounding,
    O: Overflow,
{
    type Err = ParseNegatableError;

    /// Parses an optionally signed decimal number, `inf`, `infinity` or
    /// `nan`, ignoring ASCII case. The exact value is rounded to the grid per
    /// `R`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, body) = if let Some(body) = s.strip_prefix('-') {
            (true, body)
        } else {
            (false, s.strip_prefix('+').unwrap_or(s))
        };

        if body.is_empty() {
            return Err(ParseNegatableError::Empty);
        } else if body.eq_ignore_ascii_case("inf") || body.eq_ignore_ascii_case("infinity") {
            return Ok(Self::signed_infinity(negative));
        } else if body.eq_ignore_ascii_case("nan") {
            return Ok(Self::nan());
        }

        let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
        if whole.is_empty() && fraction.is_empty() {
            return Err(ParseNegatableError::InvalidDigit);
        }

        let mut numerator = BigUint::zero();
        for digit in whole.bytes().chain(fraction.bytes()) {
            if !digit.is_ascii_digit() {
                return Err(ParseNegatableError::InvalidDigit);
            }
            numerator = numerator * 10_u32 + u32::from(digit - b'0');
        }

        let places =
            u32::try_from(fraction.len()).map_err(|_| ParseNegatableError::InvalidDigit)?;
        let denominator = BigUint::from(10_u32).pow(places);
        let scaled = numerator << Self::FRACTION;
        let quotient = &scaled / &denominator;
        let tail = Tail::of(scaled % &denominator, denominator);
        Ok(Self::from_parts(
            negative,
            low_u128(&quotient),
            quotient.bits() <= 128,
            tail,
            "parse",
        ))
    }
}
