//! Rounding and overflow configuration.
//!
//! Both are selected per type through zero-sized marker parameters, so a
//! value's behavior is fixed by its type and never consulted at runtime
//! beyond a `match` on a constant.

use core::fmt::Debug;

use crate::backing::Tail;

/// The direction used when an exact result falls between two grid points.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum RoundMode {
    /// Speed is more important than the choice of value. Truncates.
    Fastest,
    /// Round towards negative infinity.
    Negative,
    /// Round towards zero.
    Truncated,
    /// Round towards positive infinity.
    Positive,
    /// Round to nearest, with exact halves rounded away from zero.
    Classic,
    /// Round to nearest, with exact halves rounded to an even value.
    NearestEven,
    /// Round to nearest, with exact halves rounded to an odd value.
    NearestOdd,
}

impl RoundMode {
    /// Returns true if a magnitude of `whole` followed by `tail` must be
    /// incremented to honor this mode.
    #[must_use]
    pub const fn increments(self, negative: bool, whole_is_odd: bool, tail: Tail) -> bool {
        match (self, tail) {
            (_, Tail::Zero) | (Self::Fastest | Self::Truncated, _) => false,
            (Self::Negative, _) => negative,
            (Self::Positive, _) => !negative,
            (Self::Classic, tail) => matches!(tail, Tail::Half | Tail::AboveHalf),
            (Self::NearestEven | Self::NearestOdd, Tail::AboveHalf) => true,
            (Self::NearestEven, Tail::Half) => whole_is_odd,
            (Self::NearestOdd, Tail::Half) => !whole_is_odd,
            (Self::NearestEven | Self::NearestOdd, Tail::BelowHalf) => false,
        }
    }
}

/// What happens when a result exceeds the largest finite magnitude.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub enum OverflowMode {
    /// Overflow has been ruled out by analysis. Wraps, and panics in debug
    /// builds.
    Impossible,
    /// No guarantee is made about the result. Wraps.
    Undefined,
    /// The storage word wraps modulo its width.
    Modulus,
    /// The result becomes the infinity of the matching sign.
    Saturate,
    /// The operation panics.
    Exception,
}

mod sealed {
    pub trait Sealed {}
}

/// A marker type selecting a [`RoundMode`].
pub trait Rounding: sealed::Sealed + Copy + Default + Debug + Send + Sync + 'static {
    /// The selected mode.
    const MODE: RoundMode;
}

/// A marker type selecting an [`OverflowMode`].
pub trait Overflow: sealed::Sealed + Copy + Default + Debug + Send + Sync + 'static {
    /// The selected mode.
    const MODE: OverflowMode;
}

macro_rules! markers {
    ($trait:ident, $mode:ident: $($(#[$meta:meta])* $name:ident),+ $(,)?) => {$(
        $(#[$meta])*
        #[derive(Clone, Copy, Default, Debug, Eq, PartialEq)]
        pub struct $name;

        impl super::sealed::Sealed for $name {}

        impl super::$trait for $name {
            const MODE: super::$mode = super::$mode::$name;
        }
    )+};
}

/// Rounding mode markers.
pub mod round {
    markers!(Rounding, RoundMode:
        /// Selects [`RoundMode::Fastest`](super::RoundMode::Fastest).
        Fastest,
        /// Selects [`RoundMode::Negative`](super::RoundMode::Negative).
        Negative,
        /// Selects [`RoundMode::Truncated`](super::RoundMode::Truncated).
        Truncated,
        /// Selects [`RoundMode::Positive`](super::RoundMode::Positive).
        Positive,
        /// Selects [`RoundMode::Classic`](super::RoundMode::Classic).
        Classic,
        /// Selects [`RoundMode::NearestEven`](super::RoundMode::NearestEven).
        NearestEven,
        /// Selects [`RoundMode::NearestOdd`](super::RoundMode::NearestOdd).
        NearestOdd,
    );
}

/// Overflow mode markers.
pub mod overflow {
    markers!(Overflow, OverflowMode:
        /// Selects [`OverflowMode::Impossible`](super::OverflowMode::Impossible).
        Impossible,
        /// Selects [`OverflowMode::Undefined`](super::OverflowMode::Undefined).
        Undefined,
        /// Selects [`OverflowMode::Modulus`](super::OverflowMode::Modulus).
        Modulus,
        /// Selects [`OverflowMode::Saturate`](super::OverflowMode::Saturate).
        Saturate,
        /// Selects [`OverflowMode::Exception`](super::OverflowMode::Exception).
        Exception,
    );
}
