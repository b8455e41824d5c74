//! Expression nodes.

use crate::{
    dim::Dim,
    error::Result,
    layout::Layout,
    op::{BinaryTag, UnaryTag},
    shape::{CheckShape, DotShape, MatrixShape, Shape},
    traits::Scalar,
};

use super::{ElemOf, Expr, IndexOf, IntoExpr, ShapeOf};

/// Applies a [`UnaryTag`] to every element of its operand.
#[derive(Clone, Copy, Debug)]
pub struct UnaryOp<Op, A> {
    op: Op,
    arg: A,
}

impl<Op, A> UnaryOp<Op, A> {
    #[inline]
    pub fn new(op: Op, arg: A) -> Self {
        Self { op, arg }
    }

    /// Returns the operand.
    pub fn arg(&self) -> &A {
        &self.arg
    }
}

impl<Op, A> Expr for UnaryOp<Op, A>
where
    A: Expr,
    Op: UnaryTag<A::Elem>,
{
    type Elem = Op::Output;
    type Shape = A::Shape;

    #[inline]
    fn shape(&self) -> A::Shape {
        self.arg.shape()
    }

    #[inline]
    fn at(&self, index: IndexOf<A>) -> Op::Output {
        self.op.apply(self.arg.at(index))
    }
}

/// Combines two operands elementwise with a [`BinaryTag`].
///
/// The operands' shapes are checked once, when the node is created. The node's own shape is
/// the promoted shape of both operands.
#[derive(Clone, Copy, Debug)]
pub struct BinaryOp<Op, L, R> {
    op: Op,
    left: L,
    right: R,
}

impl<Op, L, R> BinaryOp<Op, L, R>
where
    L: Expr,
    R: Expr,
    L::Shape: CheckShape<R::Shape>,
{
    /// Creates a node after checking that `left` and `right` have compatible shapes.
    pub fn try_new(op: Op, left: L, right: R) -> Result<Self> {
        left.shape().check(right.shape())?;
        Ok(Self { op, left, right })
    }

    /// Creates a node from operands whose shapes are compatible by construction.
    #[inline]
    pub(crate) fn new_unchecked(op: Op, left: L, right: R) -> Self {
        Self { op, left, right }
    }
}

impl<Op, L, R> BinaryOp<Op, L, R> {
    pub fn left(&self) -> &L {
        &self.left
    }

    pub fn right(&self) -> &R {
        &self.right
    }
}

impl<Op, L, R> Expr for BinaryOp<Op, L, R>
where
    L: Expr,
    R: Expr,
    L::Shape: CheckShape<R::Shape>,
    R::Shape: Shape<Index = IndexOf<L>>,
    Op: BinaryTag<L::Elem, R::Elem>,
{
    type Elem = Op::Output;
    type Shape = <L::Shape as CheckShape<R::Shape>>::Output;

    #[inline]
    fn shape(&self) -> Self::Shape {
        self.left.shape().merge(self.right.shape())
    }

    #[inline]
    fn at(&self, index: IndexOf<L>) -> Op::Output {
        self.op.apply(self.left.at(index), self.right.at(index))
    }
}

/// A scalar broadcast to every element of a shape.
#[derive(Clone, Copy, Debug)]
pub struct Splat<E, Sh> {
    value: E,
    shape: Sh,
}

impl<E, Sh> Splat<E, Sh> {
    #[inline]
    pub fn new(value: E, shape: Sh) -> Self {
        Self { value, shape }
    }
}

impl<E: Scalar, Sh: Shape> Expr for Splat<E, Sh> {
    type Elem = E;
    type Shape = Sh;

    #[inline]
    fn shape(&self) -> Sh {
        self.shape
    }

    #[inline]
    fn at(&self, _: Sh::Index) -> E {
        self.value
    }
}

impl<E: Scalar, Sh: Shape> IntoExpr for Splat<E, Sh> {
    type Node = Self;

    #[inline]
    fn into_expr(self) -> Self {
        self
    }
}

/// The transpose of a matrix expression.
#[derive(Clone, Copy, Debug)]
pub struct Transpose<A>(A);

impl<A> Transpose<A> {
    #[inline]
    pub fn new(arg: A) -> Self {
        Self(arg)
    }
}

impl<A, R, C, L> Expr for Transpose<A>
where
    A: Expr<Shape = MatrixShape<R, C, L>>,
    R: Dim,
    C: Dim,
    L: Layout,
{
    type Elem = A::Elem;
    type Shape = MatrixShape<C, R, L>;

    #[inline]
    fn shape(&self) -> Self::Shape {
        let shape = self.0.shape();
        MatrixShape::new(shape.cols, shape.rows)
    }

    #[inline]
    fn at(&self, (row, col): (usize, usize)) -> A::Elem {
        self.0.at((col, row))
    }
}

/// Reduces two operands to a scalar: `Op` combines matching elements, `Fold` accumulates the
/// results starting from zero.
///
/// Unlike the other nodes, reductions are evaluated eagerly.
///
/// ```
/// # use lazy_linalg::*;
/// let dot = BinaryReductionOp::new(op::Mul, op::Add);
/// assert_eq!(dot.reduce(&vec3(1, 2, 3), &vec3(4, 5, 6)), Ok(32));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct BinaryReductionOp<Op, Fold> {
    op: Op,
    fold: Fold,
}

impl<Op, Fold> BinaryReductionOp<Op, Fold> {
    pub fn new(op: Op, fold: Fold) -> Self {
        Self { op, fold }
    }

    /// Folds `Op` applied to each pair of elements.
    pub fn fold_pairs<L, R, P, I>(&self, pairs: I) -> P
    where
        L: Scalar,
        R: Scalar,
        P: Scalar,
        Op: BinaryTag<L, R, Output = P>,
        Fold: BinaryTag<P, P, Output = P>,
        I: IntoIterator<Item = (L, R)>,
    {
        pairs.into_iter().fold(P::ZERO, |acc, (l, r)| {
            self.fold.apply(acc, self.op.apply(l, r))
        })
    }

    /// Checks that `left` and `right` have the same shape, then reduces them.
    pub fn reduce<L, R, P>(&self, left: L, right: R) -> Result<P>
    where
        L: Expr,
        R: Expr,
        L::Shape: CheckShape<R::Shape> + DotShape,
        ShapeOf<R>: Shape<Index = IndexOf<L>>,
        P: Scalar,
        Op: BinaryTag<ElemOf<L>, ElemOf<R>, Output = P>,
        Fold: BinaryTag<P, P, Output = P>,
    {
        let shape = left.shape().check(right.shape())?;
        Ok(self.fold_pairs((0..shape.len()).map(|flat| {
            let index = shape.index_at(flat);
            (left.at(index), right.at(index))
        })))
    }
}

#[cfg(test)]
mod tests {
    use crate::{op, DynVector, SizeError, Vector};

    use super::*;

    #[test]
    fn binary_nodes_compute_on_demand() {
        let a = Vector::new([1.0f32, 2.0, 3.0]);
        let b = Vector::new([0.5f64, 0.5, 0.5]);
        let node = BinaryOp::try_new(op::Add, &a, &b).unwrap();
        let x: f64 = node.at(2);
        assert_eq!(x, 3.5);
        assert_eq!(node.shape().len(), 3);
    }

    #[test]
    fn runtime_shape_check() {
        let a = DynVector::from_vec(vec![1, 2, 3]);
        let b = DynVector::from_vec(vec![1, 2]);
        let err = BinaryOp::try_new(op::Sub, &a, &b).unwrap_err();
        assert_eq!(
            err,
            SizeError::VectorSize {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn unary_and_splat() {
        let a = Vector::new([1, -2]);
        let neg = UnaryOp::new(op::Neg, &a);
        assert_eq!((neg.at(0), neg.at(1)), (-1, 2));

        let s = Splat::new(7, a.shape());
        assert_eq!(s.at(1), 7);
    }

    #[test]
    fn reduction() {
        let dot = BinaryReductionOp::new(op::Mul, op::Add);
        let a = Vector::new([1.0, 2.0, 3.0]);
        let b = DynVector::from_vec(vec![4.0, 5.0, 6.0]);
        assert_eq!(dot.reduce(&a, &b), Ok(32.0));
        let short = DynVector::from_vec(vec![4.0]);
        assert!(dot.reduce(&a, &short).is_err());
    }
}
