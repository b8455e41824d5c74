use std::{fmt, ops};

/// Types that support computing their square root.
pub trait Sqrt {
    fn sqrt(self) -> Self;
}

impl Sqrt for f32 {
    fn sqrt(self) -> Self {
        self.sqrt()
    }
}
impl Sqrt for f64 {
    fn sqrt(self) -> Self {
        self.sqrt()
    }
}

/// Types that have a "zero" value (an additive identity).
pub trait Zero {
    /// The *0* value of this type.
    const ZERO: Self;
}

/// Types that have a "one" value (a multiplicative identity).
pub trait One {
    /// The *1* value of this type.
    const ONE: Self;
}

macro_rules! zero_one {
    ($zero:literal, $one:literal: $($types:ty),+) => {
        $(
            impl Zero for $types {
                const ZERO: Self = $zero;
            }

            impl One for $types {
                const ONE: Self = $one;
            }
        )+
    };
}
zero_one!(0, 1: i8, i16, i32, i64, i128);
zero_one!(0.0, 1.0: f32, f64);

/// A trait for numeric types that support basic arithmetic operations.
pub trait Number:
    Zero
    + One
    + ops::Neg<Output = Self>
    + ops::Add<Output = Self>
    + ops::Sub<Output = Self>
    + ops::Mul<Output = Self>
    + ops::Div<Output = Self>
    + PartialEq
    + Copy
{
}
impl<T> Number for T where
    T: Zero
        + One
        + ops::Neg<Output = Self>
        + ops::Add<Output = Self>
        + ops::Sub<Output = Self>
        + ops::Mul<Output = Self>
        + ops::Div<Output = Self>
        + PartialEq
        + Copy
{
}

/// Element types that can be stored in containers and flow through expressions.
pub trait Scalar: Number + PartialOrd + fmt::Debug + fmt::Display + 'static {}
impl<T> Scalar for T where T: Number + PartialOrd + fmt::Debug + fmt::Display + 'static {}

/// Element type promotion.
///
/// Combining a `Self` with an `Rhs` produces a value of type [`Promote::Output`]. Identical types
/// promote to themselves; differing types widen the same way the usual arithmetic conversions do
/// (integers to larger integers or to floats, `f32` to `f64`).
///
/// ```
/// # use lazy_linalg::*;
/// let x: <f32 as Promote<f64>>::Output = 1.0f64;
/// let y: <i32 as Promote<f32>>::Output = 1.0f32;
/// assert_eq!(<i32 as Promote<i64>>::lift(7), 7i64);
/// # let _ = (x, y);
/// ```
pub trait Promote<Rhs: Scalar>: Scalar {
    type Output: Scalar;

    /// Converts the left operand to the promoted type.
    fn lift(self) -> <Self as Promote<Rhs>>::Output;

    /// Converts the right operand to the promoted type.
    fn lift_rhs(rhs: Rhs) -> <Self as Promote<Rhs>>::Output;
}

impl<T: Scalar> Promote<T> for T {
    type Output = T;

    #[inline]
    fn lift(self) -> T {
        self
    }

    #[inline]
    fn lift_rhs(rhs: T) -> T {
        rhs
    }
}

macro_rules! widen {
    ($($narrow:ty => $wide:ty),+ $(,)?) => {
        $(
            impl Promote<$wide> for $narrow {
                type Output = $wide;

                #[inline]
                fn lift(self) -> $wide {
                    self as $wide
                }

                #[inline]
                fn lift_rhs(rhs: $wide) -> $wide {
                    rhs
                }
            }

            impl Promote<$narrow> for $wide {
                type Output = $wide;

                #[inline]
                fn lift(self) -> $wide {
                    self
                }

                #[inline]
                fn lift_rhs(rhs: $narrow) -> $wide {
                    rhs as $wide
                }
            }
        )+
    };
}

widen!(
    i8 => i16, i8 => i32, i8 => i64, i8 => f32, i8 => f64,
    i16 => i32, i16 => i64, i16 => f32, i16 => f64,
    i32 => i64, i32 => f32, i32 => f64,
    i64 => f64,
    i8 => i128, i16 => i128, i32 => i128, i64 => i128,
    f32 => f64,
);

#[cfg(test)]
mod tests {
    use super::*;

    fn promoted<L: Promote<R>, R: Scalar>(
        l: L,
        r: R,
    ) -> (<L as Promote<R>>::Output, <L as Promote<R>>::Output) {
        (Promote::<R>::lift(l), <L as Promote<R>>::lift_rhs(r))
    }

    #[test]
    fn identity_promotion() {
        assert_eq!(promoted(1.5f32, 2.5f32), (1.5f32, 2.5f32));
        assert_eq!(promoted(3i64, -3i64), (3i64, -3i64));
    }

    #[test]
    fn widening_is_symmetric() {
        assert_eq!(promoted(1.5f32, 2.25f64), (1.5f64, 2.25f64));
        assert_eq!(promoted(2.25f64, 1.5f32), (2.25f64, 1.5f64));
        assert_eq!(promoted(7i32, 0.5f64), (7.0f64, 0.5f64));
        assert_eq!(promoted(-2i8, 300i16), (-2i16, 300i16));
    }
}
