//! Compile-time and runtime dimensions.

use std::fmt;

/// A single dimension (length of a vector, row or column count of a matrix).
///
/// Dimensions are either known at compile time ([`Const`]) or only at runtime ([`Dyn`]).
pub trait Dim: Copy + fmt::Debug + 'static {
    /// The dimension's value if it is part of the type, [`None`] otherwise.
    const FIXED: Option<usize>;

    /// Returns the runtime value of this dimension.
    fn value(self) -> usize;
}

/// A dimension fixed at compile time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Const<const N: usize>;

/// A dimension only known at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dyn(pub usize);

impl<const N: usize> Dim for Const<N> {
    const FIXED: Option<usize> = Some(N);

    #[inline]
    fn value(self) -> usize {
        N
    }
}

impl Dim for Dyn {
    const FIXED: Option<usize> = None;

    #[inline]
    fn value(self) -> usize {
        self.0
    }
}

/// Dimensions that may be equal to `Rhs`.
///
/// Two [`Const`] dimensions only implement this trait when they are identical, so combining
/// fixed-size operands of different sizes is rejected by the compiler. Any pairing involving a
/// [`Dyn`] dimension is accepted statically and compared at runtime by [`SameDim::same`].
///
/// The combined dimension ([`SameDim::Output`]) is dynamic whenever either side is.
///
/// Adding a 2-vector to a 3-vector does not compile:
///
/// ```compile_fail
/// # use lazy_linalg::*;
/// let a = vec2(1i32, 2);
/// let b = vec3(1i32, 2, 3);
/// let sum = &a + &b;
/// ```
///
/// Neither does assigning a 3-vector to a fixed 2-vector:
///
/// ```compile_fail
/// # use lazy_linalg::*;
/// let mut v = vec2(0i32, 0);
/// v.assign(vec3(1i32, 2, 3));
/// ```
///
/// With a dynamic side, the same assignment compiles and resizes the destination:
///
/// ```
/// # use lazy_linalg::*;
/// let mut v = DynVector::<i32>::zeros(2);
/// v.assign(vec3(1i32, 2, 3));
/// assert_eq!(v, [1, 2, 3]);
/// ```
#[diagnostic::on_unimplemented(
    message = "fixed dimensions do not match: `{Self}` vs `{Rhs}`",
    label = "operands have different compile-time sizes",
    note = "fixed-size operands must have identical dimensions; convert one side to dynamic storage to defer the check to runtime"
)]
pub trait SameDim<Rhs: Dim>: Dim {
    type Output: Dim;

    /// Returns the combined dimension, or [`None`] if the runtime values differ.
    fn same(self, rhs: Rhs) -> Option<Self::Output>;

    /// Combines two dimensions that have already been checked with [`SameDim::same`].
    fn merge(self, rhs: Rhs) -> Self::Output;
}

impl<const N: usize> SameDim<Const<N>> for Const<N> {
    type Output = Const<N>;

    #[inline]
    fn same(self, _: Const<N>) -> Option<Const<N>> {
        Some(Const)
    }

    #[inline]
    fn merge(self, _: Const<N>) -> Const<N> {
        Const
    }
}

impl<const N: usize> SameDim<Dyn> for Const<N> {
    type Output = Dyn;

    #[inline]
    fn same(self, rhs: Dyn) -> Option<Dyn> {
        (rhs.0 == N).then_some(rhs)
    }

    #[inline]
    fn merge(self, _: Dyn) -> Dyn {
        Dyn(N)
    }
}

impl<const N: usize> SameDim<Const<N>> for Dyn {
    type Output = Dyn;

    #[inline]
    fn same(self, _: Const<N>) -> Option<Dyn> {
        (self.0 == N).then_some(self)
    }

    #[inline]
    fn merge(self, _: Const<N>) -> Dyn {
        self
    }
}

impl SameDim<Dyn> for Dyn {
    type Output = Dyn;

    #[inline]
    fn same(self, rhs: Dyn) -> Option<Dyn> {
        (self.0 == rhs.0).then_some(self)
    }

    #[inline]
    fn merge(self, _: Dyn) -> Dyn {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combined<A: SameDim<B>, B: Dim>(a: A, b: B) -> Option<(usize, Option<usize>)> {
        a.same(b).map(|d| (d.value(), <A::Output as Dim>::FIXED))
    }

    #[test]
    fn fixed_stays_fixed() {
        assert_eq!(combined(Const::<3>, Const::<3>), Some((3, Some(3))));
    }

    #[test]
    fn dynamic_dominates() {
        assert_eq!(combined(Const::<3>, Dyn(3)), Some((3, None)));
        assert_eq!(combined(Dyn(3), Const::<3>), Some((3, None)));
        assert_eq!(combined(Dyn(0), Dyn(0)), Some((0, None)));
    }

    #[test]
    fn runtime_mismatch() {
        assert_eq!(combined(Const::<3>, Dyn(4)), None);
        assert_eq!(combined(Dyn(2), Const::<3>), None);
        assert_eq!(combined(Dyn(2), Dyn(1)), None);
    }
}
