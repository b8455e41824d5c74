//! Operation tags.
//!
//! Tags are zero-sized values naming the elementwise operation an expression node applies.
//! They carry no state, so nodes built from them stay as small as their operands.

use crate::traits::{Promote, Scalar};

/// An operation on a single element.
pub trait UnaryTag<E: Scalar>: Copy + Default {
    type Output: Scalar;

    fn apply(self, value: E) -> Self::Output;
}

/// An operation combining an element of type `L` with one of type `R`.
///
/// The result type follows [`Promote`]: both operands are converted to the promoted type and
/// then combined.
pub trait BinaryTag<L: Scalar, R: Scalar>: Copy + Default {
    type Output: Scalar;

    fn apply(self, left: L, right: R) -> Self::Output;
}

/// Identity (unary plus).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos;

/// Negation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Neg;

/// Addition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Add;

/// Subtraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Sub;

/// Elementwise multiplication.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Mul;

/// Elementwise division.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Div;

impl<E: Scalar> UnaryTag<E> for Pos {
    type Output = E;

    #[inline]
    fn apply(self, value: E) -> E {
        value
    }
}

impl<E: Scalar> UnaryTag<E> for Neg {
    type Output = E;

    #[inline]
    fn apply(self, value: E) -> E {
        -value
    }
}

macro_rules! binary_tags {
    ($($tag:ident => $op:tt),+ $(,)?) => {
        $(
            impl<L: Promote<R>, R: Scalar> BinaryTag<L, R> for $tag {
                type Output = <L as Promote<R>>::Output;

                #[inline]
                fn apply(self, left: L, right: R) -> <L as Promote<R>>::Output {
                    Promote::<R>::lift(left) $op <L as Promote<R>>::lift_rhs(right)
                }
            }
        )+
    };
}

binary_tags!(Add => +, Sub => -, Mul => *, Div => /);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unary() {
        assert_eq!(Pos.apply(-2.5f32), -2.5);
        assert_eq!(Neg.apply(-2.5f32), 2.5);
        assert_eq!(Neg.apply(4i64), -4);
    }

    #[test]
    fn binary_promotes() {
        let sum: f64 = Add.apply(1.5f32, 0.25f64);
        assert_eq!(sum, 1.75);
        assert_eq!(Sub.apply(1i32, 3i32), -2);
        assert_eq!(Mul.apply(3i32, 0.5f64), 1.5);
        assert_eq!(Div.apply(7i32, 2i32), 3);
        assert_eq!(Div.apply(7i32, 2.0f32), 3.5);
    }
}
