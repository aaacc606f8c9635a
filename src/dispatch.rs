//! Tier selection for `C = A * B`.
//!
//! The three dimensions of a product are const generics, so the tier is too:
//! [`Shape::TIER`] is computed once per monomorphized shape and the dispatcher
//! matches on that constant. The arms for the other tiers are dead code the
//! compiler drops.

use std::fmt;

use crate::kernels::UNROLL_BOUND;

/// The three multiplication strategies, most specialized first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    /// Every dimension is at most `UNROLL_BOUND`: a literal sum of products per
    /// output element, no loops.
    Unrolled,
    /// The inner dimension is at most `UNROLL_BOUND`: loops over rows and
    /// columns, inner sum still unrolled.
    FixedInner,
    /// Plain triple loop.
    Generic,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Unrolled, Tier::FixedInner, Tier::Generic];

    /// Picks the tier for `(rows_a x inner) * (inner x cols_b)`.
    ///
    /// ```
    /// use fixed_matrix::{Tier, UNROLL_BOUND};
    ///
    /// // An inner dimension past the bound always takes the generic path.
    /// assert_eq!(Tier::select(1, UNROLL_BOUND + 1, 1), Tier::Generic);
    /// ```
    pub const fn select(rows_a: usize, inner: usize, cols_b: usize) -> Tier {
        if inner == 0 || inner > UNROLL_BOUND {
            Tier::Generic
        } else if rows_a <= UNROLL_BOUND && cols_b <= UNROLL_BOUND {
            Tier::Unrolled
        } else {
            Tier::FixedInner
        }
    }

    /// The tier that runs when `self` is requested for a shape whose own tier
    /// is `natural`. A tier without generated code for the shape falls back to
    /// the next more generic one.
    pub const fn or_fallback(self, natural: Tier) -> Tier {
        if (self as u8) < (natural as u8) {
            natural
        } else {
            self
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Tier::Unrolled => "unrolled",
            Tier::FixedInner => "fixed-inner",
            Tier::Generic => "generic",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Type-level tag for a product shape `R x K * K x C`.
pub struct Shape<const R: usize, const K: usize, const C: usize>;

impl<const R: usize, const K: usize, const C: usize> Shape<R, K, C> {
    /// Evaluated at compile time for every shape that gets multiplied.
    pub const TIER: Tier = Tier::select(R, K, C);
}

/// The tier [`mul`](crate::mul) uses for `R x K * K x C`.
pub const fn tier_of<const R: usize, const K: usize, const C: usize>() -> Tier {
    Shape::<R, K, C>::TIER
}
