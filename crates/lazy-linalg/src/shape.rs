//! Shapes: size checking and result-type promotion.
//!
//! Every expression has a [`Shape`], which combines the kind of value (vector, matrix,
//! quaternion) with its dimensions and layout tag. The traits in this module decide, from
//! operand shapes alone, whether an operation is allowed ([`CheckShape`], [`ProductShape`]),
//! what the result's shape is, and which concrete container holds it ([`Materialize`]).

use std::{fmt, marker::PhantomData};

use crate::{
    dim::{Const, Dim, Dyn, SameDim},
    error::SizeError,
    layout::{Layout, Order, PromoteLayout, PromoteOrder},
    matrix::{DynMatrix, Matrix},
    quat::Quaternion,
    traits::Scalar,
    vector::Vector,
};

/// The shape of an expression.
pub trait Shape: Copy + fmt::Debug + 'static {
    /// Logical element index.
    type Index: Copy + fmt::Debug;

    /// Total number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the shape has no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maps `0..self.len()` onto every logical index exactly once.
    fn index_at(&self, flat: usize) -> Self::Index;

    /// Runtime extent as `(rows, cols)`. Vectors and quaternions are a single column.
    fn extent(&self) -> (usize, usize);
}

/// Shape of a vector of length `D`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VectorShape<D>(pub D);

/// Shape of an `R`x`C` matrix with layout `L`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatrixShape<R, C, L> {
    pub rows: R,
    pub cols: C,
    layout: PhantomData<L>,
}

/// Shape of a quaternion stored with component order `O`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QuaternionShape<O>(PhantomData<O>);

impl<R, C, L> MatrixShape<R, C, L> {
    #[inline]
    pub fn new(rows: R, cols: C) -> Self {
        Self {
            rows,
            cols,
            layout: PhantomData,
        }
    }
}

impl<O> QuaternionShape<O> {
    #[inline]
    pub fn new() -> Self {
        Self(PhantomData)
    }
}

impl<D: Dim> Shape for VectorShape<D> {
    type Index = usize;

    #[inline]
    fn len(&self) -> usize {
        self.0.value()
    }

    #[inline]
    fn index_at(&self, flat: usize) -> usize {
        flat
    }

    #[inline]
    fn extent(&self) -> (usize, usize) {
        (self.0.value(), 1)
    }
}

impl<R: Dim, C: Dim, L: Layout> Shape for MatrixShape<R, C, L> {
    type Index = (usize, usize);

    #[inline]
    fn len(&self) -> usize {
        self.rows.value() * self.cols.value()
    }

    #[inline]
    fn index_at(&self, flat: usize) -> (usize, usize) {
        let cols = self.cols.value();
        (flat / cols, flat % cols)
    }

    #[inline]
    fn extent(&self) -> (usize, usize) {
        (self.rows.value(), self.cols.value())
    }
}

impl<O: Order> Shape for QuaternionShape<O> {
    type Index = usize;

    #[inline]
    fn len(&self) -> usize {
        4
    }

    #[inline]
    fn index_at(&self, flat: usize) -> usize {
        flat
    }

    #[inline]
    fn extent(&self) -> (usize, usize) {
        (4, 1)
    }
}

/// Elementwise compatibility between two shapes.
///
/// Only shapes of the same kind implement this trait for each other, and fixed dimensions must
/// match (see [`SameDim`]), so most mistakes are caught by the compiler. Dynamic dimensions are
/// compared by [`CheckShape::check`].
///
/// ```compile_fail
/// # use lazy_linalg::*;
/// let a = Mat2::<f64>::identity();
/// let b = Matrix::from_rows([[1.0f64, 2.0, 3.0], [4.0, 5.0, 6.0]]);
/// let sum = &a + &b;
/// ```
///
/// ```compile_fail
/// # use lazy_linalg::*;
/// let v = vec2(1.0f64, 2.0);
/// let m = Mat2::<f64>::identity();
/// let diff = &v - &m;
/// ```
#[diagnostic::on_unimplemented(
    message = "cannot combine an operand of shape `{Self}` with an operand of shape `{Rhs}`",
    label = "incompatible operand shapes",
    note = "elementwise operations need operands of the same kind (vector, matrix or quaternion) with matching fixed dimensions"
)]
pub trait CheckShape<Rhs: Shape>: Shape {
    /// The promoted shape of the result.
    type Output: Shape<Index = Self::Index>;

    /// Compares runtime dimensions, returning the result shape or a [`SizeError`].
    fn check(self, rhs: Rhs) -> Result<Self::Output, SizeError>;

    /// Combines two shapes that have already passed [`CheckShape::check`].
    fn merge(self, rhs: Rhs) -> Self::Output;
}

impl<D1, D2> CheckShape<VectorShape<D2>> for VectorShape<D1>
where
    D1: SameDim<D2>,
    D2: Dim,
{
    type Output = VectorShape<D1::Output>;

    fn check(self, rhs: VectorShape<D2>) -> Result<Self::Output, SizeError> {
        match self.0.same(rhs.0) {
            Some(dim) => Ok(VectorShape(dim)),
            None => {
                let err = SizeError::VectorSize {
                    expected: self.0.value(),
                    actual: rhs.0.value(),
                };
                log::debug!("elementwise size check failed: {err}");
                Err(err)
            }
        }
    }

    #[inline]
    fn merge(self, rhs: VectorShape<D2>) -> Self::Output {
        VectorShape(self.0.merge(rhs.0))
    }
}

impl<R1, C1, L1, R2, C2, L2> CheckShape<MatrixShape<R2, C2, L2>> for MatrixShape<R1, C1, L1>
where
    R1: SameDim<R2>,
    C1: SameDim<C2>,
    L1: PromoteLayout<L2>,
    R2: Dim,
    C2: Dim,
    L2: Layout,
{
    type Output = MatrixShape<R1::Output, C1::Output, L1::Output>;

    fn check(self, rhs: MatrixShape<R2, C2, L2>) -> Result<Self::Output, SizeError> {
        match (self.rows.same(rhs.rows), self.cols.same(rhs.cols)) {
            (Some(rows), Some(cols)) => Ok(MatrixShape::new(rows, cols)),
            _ => {
                let err = SizeError::MatrixSize {
                    expected_rows: self.rows.value(),
                    expected_cols: self.cols.value(),
                    actual_rows: rhs.rows.value(),
                    actual_cols: rhs.cols.value(),
                };
                log::debug!("elementwise size check failed: {err}");
                Err(err)
            }
        }
    }

    #[inline]
    fn merge(self, rhs: MatrixShape<R2, C2, L2>) -> Self::Output {
        MatrixShape::new(self.rows.merge(rhs.rows), self.cols.merge(rhs.cols))
    }
}

impl<O1, O2> CheckShape<QuaternionShape<O2>> for QuaternionShape<O1>
where
    O1: PromoteOrder<O2>,
    O2: Order,
{
    type Output = QuaternionShape<O1::Output>;

    #[inline]
    fn check(self, _: QuaternionShape<O2>) -> Result<Self::Output, SizeError> {
        Ok(QuaternionShape::new())
    }

    #[inline]
    fn merge(self, _: QuaternionShape<O2>) -> Self::Output {
        QuaternionShape::new()
    }
}

/// Shapes that support a dot product (an elementwise product folded into a scalar).
#[diagnostic::on_unimplemented(
    message = "dot products are defined for vectors and quaternions, not for `{Self}`"
)]
pub trait DotShape: Shape {}

impl<D: Dim> DotShape for VectorShape<D> {}
impl<O: Order> DotShape for QuaternionShape<O> {}

/// Shapes whose values multiply with the Hamilton product.
#[diagnostic::on_unimplemented(
    message = "the Hamilton product is defined for quaternions, not for `{Self}`"
)]
pub trait HamiltonShape: Shape<Index = usize> {}

impl<O: Order> HamiltonShape for QuaternionShape<O> {}

/// Product-shaped combination of two shapes (matrix × matrix, matrix × vector, vector ×
/// matrix).
///
/// The inner dimensions (left columns, right rows) must agree; the result has the outer
/// dimensions (left rows, right columns). Both are decided before any element is computed.
#[diagnostic::on_unimplemented(
    message = "no product is defined between shapes `{Self}` and `{Rhs}`",
    label = "inner dimensions differ, or the operands are not matrices and vectors",
    note = "products need the left operand's column count to equal the right operand's row count"
)]
pub trait ProductShape<Rhs: Shape>: Shape {
    type Output: Shape;

    /// Checks the inner dimensions and returns the outer shape.
    fn product(self, rhs: Rhs) -> Result<Self::Output, SizeError>;

    /// Length of the summed-over dimension.
    fn inner(self) -> usize;

    /// Operand indices contributing the `k`th term of the result element at `out`.
    fn operands(out: <Self::Output as Shape>::Index, k: usize) -> (Self::Index, Rhs::Index);
}

fn inner_mismatch(left_cols: usize, right_rows: usize) -> SizeError {
    let err = SizeError::InnerDimension {
        left_cols,
        right_rows,
    };
    log::debug!("product size check failed: {err}");
    err
}

impl<R1, C1, L1, R2, C2, L2> ProductShape<MatrixShape<R2, C2, L2>> for MatrixShape<R1, C1, L1>
where
    R1: Dim,
    C1: SameDim<R2>,
    L1: PromoteLayout<L2>,
    R2: Dim,
    C2: Dim,
    L2: Layout,
{
    type Output = MatrixShape<R1, C2, L1::Output>;

    fn product(self, rhs: MatrixShape<R2, C2, L2>) -> Result<Self::Output, SizeError> {
        self.cols
            .same(rhs.rows)
            .map(|_| MatrixShape::new(self.rows, rhs.cols))
            .ok_or_else(|| inner_mismatch(self.cols.value(), rhs.rows.value()))
    }

    #[inline]
    fn inner(self) -> usize {
        self.cols.value()
    }

    #[inline]
    fn operands((row, col): (usize, usize), k: usize) -> ((usize, usize), (usize, usize)) {
        ((row, k), (k, col))
    }
}

impl<R, C, L, D> ProductShape<VectorShape<D>> for MatrixShape<R, C, L>
where
    R: Dim,
    C: SameDim<D>,
    L: Layout,
    D: Dim,
{
    type Output = VectorShape<R>;

    fn product(self, rhs: VectorShape<D>) -> Result<Self::Output, SizeError> {
        self.cols
            .same(rhs.0)
            .map(|_| VectorShape(self.rows))
            .ok_or_else(|| inner_mismatch(self.cols.value(), rhs.0.value()))
    }

    #[inline]
    fn inner(self) -> usize {
        self.cols.value()
    }

    #[inline]
    fn operands(row: usize, k: usize) -> ((usize, usize), usize) {
        ((row, k), k)
    }
}

impl<D, R, C, L> ProductShape<MatrixShape<R, C, L>> for VectorShape<D>
where
    D: SameDim<R>,
    R: Dim,
    C: Dim,
    L: Layout,
{
    type Output = VectorShape<C>;

    fn product(self, rhs: MatrixShape<R, C, L>) -> Result<Self::Output, SizeError> {
        self.0
            .same(rhs.rows)
            .map(|_| VectorShape(rhs.cols))
            .ok_or_else(|| inner_mismatch(self.0.value(), rhs.rows.value()))
    }

    #[inline]
    fn inner(self) -> usize {
        self.0.value()
    }

    #[inline]
    fn operands(col: usize, k: usize) -> (usize, (usize, usize)) {
        (k, (k, col))
    }
}

/// Maps a shape and an element type to the concrete container that stores it.
///
/// Fixed dimensions materialize into fixed (inline) storage, anything involving a dynamic
/// dimension materializes into dynamic (heap) storage.
pub trait Materialize<E: Scalar>: Shape {
    type Container;

    /// Allocates a zero-filled container of this shape.
    fn allocate(self) -> Self::Container;

    /// Writes `value` to the element at `index`.
    fn store(container: &mut Self::Container, index: Self::Index, value: E);
}

impl<E: Scalar, const N: usize> Materialize<E> for VectorShape<Const<N>> {
    type Container = Vector<[E; N]>;

    fn allocate(self) -> Self::Container {
        Vector::<[E; N]>::zeros()
    }

    #[inline]
    fn store(container: &mut Self::Container, index: usize, value: E) {
        container[index] = value;
    }
}

impl<E: Scalar> Materialize<E> for VectorShape<Dyn> {
    type Container = Vector<Vec<E>>;

    fn allocate(self) -> Self::Container {
        Vector::<Vec<E>>::zeros(self.0.value())
    }

    #[inline]
    fn store(container: &mut Self::Container, index: usize, value: E) {
        container[index] = value;
    }
}

impl<E: Scalar, L: Layout, const R: usize, const C: usize> Materialize<E>
    for MatrixShape<Const<R>, Const<C>, L>
{
    type Container = Matrix<[[E; C]; R], L>;

    fn allocate(self) -> Self::Container {
        Matrix::<[[E; C]; R], L>::zeros()
    }

    #[inline]
    fn store(container: &mut Self::Container, index: (usize, usize), value: E) {
        container[index] = value;
    }
}

macro_rules! dynamic_matrix_materialize {
    ($([$($gen:tt)*] $rows:ty, $cols:ty;)+) => {
        $(
            impl<E: Scalar, L: Layout, $($gen)*> Materialize<E> for MatrixShape<$rows, $cols, L> {
                type Container = DynMatrix<E, L>;

                fn allocate(self) -> Self::Container {
                    DynMatrix::<E, L>::zeros(self.rows.value(), self.cols.value())
                }

                #[inline]
                fn store(container: &mut Self::Container, index: (usize, usize), value: E) {
                    container[index] = value;
                }
            }
        )+
    };
}

dynamic_matrix_materialize! {
    [const R: usize] Const<R>, Dyn;
    [const C: usize] Dyn, Const<C>;
    [] Dyn, Dyn;
}

impl<E: Scalar, O: Order> Materialize<E> for QuaternionShape<O> {
    type Container = Quaternion<[E; 4], O>;

    fn allocate(self) -> Self::Container {
        Quaternion::<[E; 4], O>::zeros()
    }

    #[inline]
    fn store(container: &mut Self::Container, index: usize, value: E) {
        container[index] = value;
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::{ColMajor, RowMajor};

    use super::*;

    #[test]
    fn matrix_index_enumeration() {
        let shape = MatrixShape::<_, _, ColMajor>::new(Const::<2>, Dyn(3));
        let indices: Vec<_> = (0..shape.len()).map(|i| shape.index_at(i)).collect();
        assert_eq!(indices, [(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn elementwise_check() {
        let a = MatrixShape::<_, _, RowMajor>::new(Const::<2>, Dyn(3));
        let b = MatrixShape::<_, _, ColMajor>::new(Dyn(2), Dyn(3));
        let out = a.check(b).unwrap();
        assert_eq!((out.rows, out.cols), (Dyn(2), Dyn(3)));

        let c = MatrixShape::<_, _, RowMajor>::new(Dyn(3), Dyn(3));
        assert_eq!(
            a.check(c),
            Err(SizeError::MatrixSize {
                expected_rows: 2,
                expected_cols: 3,
                actual_rows: 3,
                actual_cols: 3,
            })
        );
    }

    #[test]
    fn product_outer_dimensions() {
        let a = MatrixShape::<_, _, RowMajor>::new(Const::<4>, Dyn(2));
        let b = MatrixShape::<_, _, RowMajor>::new(Const::<2>, Const::<3>);
        let out = a.product(b).unwrap();
        assert_eq!((out.rows, out.cols), (Const::<4>, Const::<3>));
        assert_eq!(ProductShape::<MatrixShape<Const<2>, Const<3>, RowMajor>>::inner(a), 2);

        let bad = MatrixShape::<_, _, RowMajor>::new(Dyn(5), Const::<3>);
        assert_eq!(
            a.product(bad),
            Err(SizeError::InnerDimension {
                left_cols: 2,
                right_rows: 5,
            })
        );
    }

    #[test]
    fn matrix_vector_products() {
        let m = MatrixShape::<_, _, RowMajor>::new(Const::<2>, Const::<3>);
        assert_eq!(m.product(VectorShape(Dyn(3))), Ok(VectorShape(Const::<2>)));
        assert_eq!(VectorShape(Dyn(2)).product(m), Ok(VectorShape(Const::<3>)));
        assert!(VectorShape(Dyn(3)).product(m).is_err());
    }
}
