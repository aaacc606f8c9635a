//! Element types and the product-type table.
//!
//! Matrices in a product may carry different element types (an `i32` matrix
//! times an `f32` matrix into an `f64` matrix is fine). Each term is computed in
//! a common "product type" picked by [`Promote`], summed there, and converted to
//! the destination element type once with [`AsPrimitive`].

use std::fmt;

use num_traits::{AsPrimitive, NumOps, Zero};

/// A scalar that can live inside a [`Matrix`](crate::Matrix).
pub trait Element:
    Copy + Default + PartialEq + fmt::Debug + fmt::Display + Zero + Send + Sync + 'static
{
    /// Bit-level equality. Unlike `==`, `NaN` equals an identical `NaN` and
    /// `0.0` differs from `-0.0`.
    fn bit_eq(self, other: Self) -> bool;
}

macro_rules! element_int {
    ($($t:ty)*) => {$(
        impl Element for $t {
            #[inline]
            fn bit_eq(self, other: Self) -> bool {
                self == other
            }
        }
    )*};
}

macro_rules! element_float {
    ($($t:ty)*) => {$(
        impl Element for $t {
            #[inline]
            fn bit_eq(self, other: Self) -> bool {
                self.to_bits() == other.to_bits()
            }
        }
    )*};
}

element_int!(i8 i16 i32 i64 u8 u16 u32 u64);
element_float!(f32 f64);

/// Picks the type that `Self op Rhs` is evaluated in.
///
/// Floats win over integers and wider wins over narrower. Integers narrower
/// than 32 bits are promoted to `i32` first, so `u8 * u8` and `i8 * u16` are
/// both evaluated in `i32`. Mixing signedness goes to the narrowest signed
/// type that holds the unsigned side, capped at `i64`: a `u64` paired with a
/// signed type is evaluated in `i64`, and values above `i64::MAX` wrap.
pub trait Promote<Rhs: Element>: Element {
    type Output: Element + NumOps;

    fn promote(self) -> <Self as Promote<Rhs>>::Output;

    fn promote_rhs(rhs: Rhs) -> <Self as Promote<Rhs>>::Output;
}

/// The type a product of `A` and `B` elements is accumulated in.
pub type Product<A, B> = <A as Promote<B>>::Output;

/// `a * b`, evaluated in the promoted type.
#[inline(always)]
pub fn product<A, B>(a: A, b: B) -> Product<A, B>
where
    A: Promote<B>,
    B: Element,
{
    <A as Promote<B>>::promote(a) * <A as Promote<B>>::promote_rhs(b)
}

/// Converts a promoted result into the destination element type.
#[inline(always)]
pub(crate) fn store<P, T>(value: P) -> T
where
    P: AsPrimitive<T>,
    T: Copy + 'static,
{
    value.as_()
}

macro_rules! promote_same {
    ($($t:ty)*) => {$(
        impl Promote<$t> for $t {
            type Output = $t;

            #[inline(always)]
            fn promote(self) -> $t {
                self
            }

            #[inline(always)]
            fn promote_rhs(rhs: $t) -> $t {
                rhs
            }
        }
    )*};
}

// Sub-`i32` integers are widened even when both sides agree.
macro_rules! promote_narrow {
    ($($t:ty)*) => {$(
        impl Promote<$t> for $t {
            type Output = i32;

            #[inline(always)]
            fn promote(self) -> i32 {
                self as i32
            }

            #[inline(always)]
            fn promote_rhs(rhs: $t) -> i32 {
                rhs as i32
            }
        }
    )*};
}

// Both directions for each pair.
macro_rules! promote_pair {
    ($($a:ty, $b:ty => $out:ty;)*) => {$(
        impl Promote<$b> for $a {
            type Output = $out;

            #[inline(always)]
            fn promote(self) -> $out {
                self as $out
            }

            #[inline(always)]
            fn promote_rhs(rhs: $b) -> $out {
                rhs as $out
            }
        }

        impl Promote<$a> for $b {
            type Output = $out;

            #[inline(always)]
            fn promote(self) -> $out {
                self as $out
            }

            #[inline(always)]
            fn promote_rhs(rhs: $a) -> $out {
                rhs as $out
            }
        }
    )*};
}

promote_same!(i32 i64 u32 u64 f32 f64);
promote_narrow!(i8 i16 u8 u16);

promote_pair! {
    // floats
    f32, f64 => f64;
    i8, f32 => f32;
    i16, f32 => f32;
    i32, f32 => f32;
    i64, f32 => f32;
    u8, f32 => f32;
    u16, f32 => f32;
    u32, f32 => f32;
    u64, f32 => f32;
    i8, f64 => f64;
    i16, f64 => f64;
    i32, f64 => f64;
    i64, f64 => f64;
    u8, f64 => f64;
    u16, f64 => f64;
    u32, f64 => f64;
    u64, f64 => f64;

    // same signedness
    i8, i16 => i32;
    i8, i32 => i32;
    i8, i64 => i64;
    i16, i32 => i32;
    i16, i64 => i64;
    i32, i64 => i64;
    u8, u16 => i32;
    u8, u32 => u32;
    u8, u64 => u64;
    u16, u32 => u32;
    u16, u64 => u64;
    u32, u64 => u64;

    // mixed signedness
    u8, i8 => i32;
    u8, i16 => i32;
    u8, i32 => i32;
    u8, i64 => i64;
    u16, i8 => i32;
    u16, i16 => i32;
    u16, i32 => i32;
    u16, i64 => i64;
    u32, i8 => i64;
    u32, i16 => i64;
    u32, i32 => i64;
    u32, i64 => i64;
    u64, i8 => i64;
    u64, i16 => i64;
    u64, i32 => i64;
    u64, i64 => i64;
}
