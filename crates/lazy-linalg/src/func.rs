//! Named operations.
//!
//! Each operation that can fail at runtime comes in two flavors: `try_*` returns a
//! [`SizeError`](crate::SizeError), and the plain version panics with the error's message.
//! Products, dot products and cross products are computed right away. [`try_add`],
//! [`try_sub`] and [`transpose`] return lazy expressions like the operators do.

use crate::{
    dim::{Const, Dim, SameDim},
    error::{Result, SizeError},
    expr::{
        BinaryOp, BinaryReductionOp, ElemOf, Expr, IndexOf, IntoExpr, MatrixXpr, NodeOf, RootOf,
        RootShape, ShapeOf, Transpose,
    },
    layout::{Layout, RowMajor},
    op::{self, BinaryTag},
    shape::{CheckShape, DotShape, Materialize, MatrixShape, ProductShape, Shape, VectorShape},
    traits::Sqrt,
    vector::Vec3,
};

/// Shape of the product of `A` and `B`.
pub type ProductShapeOf<A, B> =
    <ShapeOf<NodeOf<A>> as ProductShape<ShapeOf<NodeOf<B>>>>::Output;

/// Element type of the product of `A` and `B`.
pub type ProductElemOf<A, B> = <op::Mul as BinaryTag<ElemOf<NodeOf<A>>, ElemOf<NodeOf<B>>>>::Output;

/// The container holding the product of `A` and `B`.
pub type Product<A, B> = <ProductShapeOf<A, B> as Materialize<ProductElemOf<A, B>>>::Container;

/// The lazy node combining `A` and `B` elementwise with `Op`.
pub type Elementwise<Op, A, B> = BinaryOp<Op, NodeOf<A>, NodeOf<B>>;

/// Computes the matrix product `a * b` (matrix × matrix, matrix × vector or vector × matrix).
///
/// Inner dimensions are checked before any element is computed. The result's dimensions are
/// fixed wherever the contributing outer dimensions of `a` and `b` are.
///
/// # Errors
///
/// Returns [`SizeError::InnerDimension`] if a runtime inner dimension does not match.
///
/// # Examples
///
/// ```
/// # use lazy_linalg::*;
/// let m = DynMatrix::<i32>::from_row_slice(2, 2, &[1, 2, 3, 4])?;
/// let v = DynVector::from_vec(vec![1, 1, 1]);
/// assert_eq!(
///     try_mul(&m, &v).unwrap_err(),
///     SizeError::InnerDimension { left_cols: 2, right_rows: 3 },
/// );
/// # Ok::<(), SizeError>(())
/// ```
pub fn try_mul<A, B>(a: A, b: B) -> Result<Product<A, B>>
where
    A: IntoExpr,
    B: IntoExpr,
    ShapeOf<NodeOf<A>>: ProductShape<ShapeOf<NodeOf<B>>>,
    op::Mul: BinaryTag<ElemOf<NodeOf<A>>, ElemOf<NodeOf<B>>>,
    ProductShapeOf<A, B>: Materialize<ProductElemOf<A, B>>,
{
    let left = a.into_expr();
    let right = b.into_expr();
    let (left_shape, right_shape) = (left.shape(), right.shape());
    let shape = left_shape.product(right_shape)?;
    log::trace!("evaluating product of {left_shape:?} and {right_shape:?}");

    let inner = left_shape.inner();
    let reduction = BinaryReductionOp::new(op::Mul, op::Add);
    let mut out = shape.allocate();
    for flat in 0..shape.len() {
        let index = shape.index_at(flat);
        let value = reduction.fold_pairs((0..inner).map(|k| {
            let (l, r) =
                <ShapeOf<NodeOf<A>> as ProductShape<ShapeOf<NodeOf<B>>>>::operands(index, k);
            (left.at(l), right.at(r))
        }));
        <ProductShapeOf<A, B> as Materialize<ProductElemOf<A, B>>>::store(&mut out, index, value);
    }
    Ok(out)
}

/// Computes the matrix product `a * b`.
///
/// This is what `*` does when the left operand is a matrix.
///
/// # Panics
///
/// Panics where [`try_mul`] would return an error.
///
/// # Examples
///
/// ```
/// # use lazy_linalg::*;
/// let a = Matrix::from_rows([[1, 2], [3, 4]]);
/// let b = Matrix::from_rows([[5, 6], [7, 8]]);
/// assert_eq!(mul(&a, &b), Matrix::from_rows([[19, 22], [43, 50]]));
///
/// // Row vector times matrix.
/// assert_eq!(mul(&vec2(1, 1), &a), vec2(4, 6));
/// ```
///
/// Fixed inner dimensions that differ are rejected at compile time:
///
/// ```compile_fail
/// # use lazy_linalg::*;
/// let a = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
/// let b = Matrix::from_rows([[1, 2], [3, 4]]);
/// mul(&a, &b);
/// ```
#[track_caller]
pub fn mul<A, B>(a: A, b: B) -> Product<A, B>
where
    A: IntoExpr,
    B: IntoExpr,
    ShapeOf<NodeOf<A>>: ProductShape<ShapeOf<NodeOf<B>>>,
    op::Mul: BinaryTag<ElemOf<NodeOf<A>>, ElemOf<NodeOf<B>>>,
    ProductShapeOf<A, B>: Materialize<ProductElemOf<A, B>>,
{
    match try_mul(a, b) {
        Ok(out) => out,
        Err(err) => panic!("{err}"),
    }
}

/// Computes the dot product of two vectors or quaternions.
///
/// # Errors
///
/// Returns [`SizeError::VectorSize`] if the runtime lengths differ.
pub fn try_dot<A, B>(a: A, b: B) -> Result<ProductElemOf<A, B>>
where
    A: IntoExpr,
    B: IntoExpr,
    ShapeOf<NodeOf<A>>: CheckShape<ShapeOf<NodeOf<B>>> + DotShape,
    ShapeOf<NodeOf<B>>: Shape<Index = IndexOf<NodeOf<A>>>,
    op::Mul: BinaryTag<ElemOf<NodeOf<A>>, ElemOf<NodeOf<B>>>,
{
    BinaryReductionOp::new(op::Mul, op::Add).reduce(a.into_expr(), b.into_expr())
}

/// Computes the dot product of two vectors or quaternions.
///
/// # Panics
///
/// Panics where [`try_dot`] would return an error.
///
/// # Examples
///
/// ```
/// # use lazy_linalg::*;
/// assert_eq!(dot(&vec3(1, 2, 3), &vec3(4, 5, 6)), 32);
/// assert_eq!(dot(vec2(1.0f64, 2.0) * 2.0f64, &vec2(0.5f32, 0.5)), 3.0f64);
/// ```
///
/// Matrices have no dot product:
///
/// ```compile_fail
/// # use lazy_linalg::*;
/// let m = Matrix::from_rows([[1, 2], [3, 4]]);
/// dot(&m, &m);
/// ```
#[track_caller]
pub fn dot<A, B>(a: A, b: B) -> ProductElemOf<A, B>
where
    A: IntoExpr,
    B: IntoExpr,
    ShapeOf<NodeOf<A>>: CheckShape<ShapeOf<NodeOf<B>>> + DotShape,
    ShapeOf<NodeOf<B>>: Shape<Index = IndexOf<NodeOf<A>>>,
    op::Mul: BinaryTag<ElemOf<NodeOf<A>>, ElemOf<NodeOf<B>>>,
{
    match try_dot(a, b) {
        Ok(out) => out,
        Err(err) => panic!("{err}"),
    }
}

fn check_three<D: SameDim<Const<3>>>(dim: D) -> Result<()> {
    match dim.same(Const) {
        Some(_) => Ok(()),
        None => {
            let err = SizeError::VectorSize {
                expected: 3,
                actual: dim.value(),
            };
            log::debug!("cross product size check failed: {err}");
            Err(err)
        }
    }
}

/// Computes the cross product of two 3-dimensional vectors.
///
/// # Errors
///
/// Returns [`SizeError::VectorSize`] if a dynamic operand does not have 3 elements.
pub fn try_cross<A, B, DA, DB>(a: A, b: B) -> Result<Vec3<ProductElemOf<A, B>>>
where
    A: IntoExpr,
    B: IntoExpr,
    NodeOf<A>: Expr<Shape = VectorShape<DA>>,
    NodeOf<B>: Expr<Shape = VectorShape<DB>>,
    DA: SameDim<Const<3>>,
    DB: SameDim<Const<3>>,
    op::Mul: BinaryTag<ElemOf<NodeOf<A>>, ElemOf<NodeOf<B>>>,
{
    let a = a.into_expr();
    let b = b.into_expr();
    check_three(a.shape().0)?;
    check_three(b.shape().0)?;

    let m = |i: usize, j: usize| op::Mul.apply(a.at(i), b.at(j));
    Ok(Vec3::from_fn(|i| {
        let (j, k) = ((i + 1) % 3, (i + 2) % 3);
        m(j, k) - m(k, j)
    }))
}

/// Computes the cross product of two 3-dimensional vectors.
///
/// # Panics
///
/// Panics where [`try_cross`] would return an error.
///
/// # Examples
///
/// ```
/// # use lazy_linalg::*;
/// let x = vec3(1, 0, 0);
/// let y = vec3(0, 1, 0);
/// assert_eq!(cross(&x, &y), vec3(0, 0, 1));
/// assert_eq!(cross(&y, &x), vec3(0, 0, -1));
/// ```
///
/// ```compile_fail
/// # use lazy_linalg::*;
/// cross(&vec2(1, 0), &vec2(0, 1));
/// ```
#[track_caller]
pub fn cross<A, B, DA, DB>(a: A, b: B) -> Vec3<ProductElemOf<A, B>>
where
    A: IntoExpr,
    B: IntoExpr,
    NodeOf<A>: Expr<Shape = VectorShape<DA>>,
    NodeOf<B>: Expr<Shape = VectorShape<DB>>,
    DA: SameDim<Const<3>>,
    DB: SameDim<Const<3>>,
    op::Mul: BinaryTag<ElemOf<NodeOf<A>>, ElemOf<NodeOf<B>>>,
{
    match try_cross(a, b) {
        Ok(out) => out,
        Err(err) => panic!("{err}"),
    }
}

/// Computes the outer product `a * bᵀ` of two vectors, as a row-major matrix.
///
/// Never fails: every pair of vectors has an outer product.
///
/// # Examples
///
/// ```
/// # use lazy_linalg::*;
/// let m = outer(&vec2(1, 2), &vec3(1, 10, 100));
/// assert_eq!(m, Matrix::from_rows([[1, 10, 100], [2, 20, 200]]));
/// ```
pub fn outer<A, B, DA, DB>(
    a: A,
    b: B,
) -> <MatrixShape<DA, DB, RowMajor> as Materialize<ProductElemOf<A, B>>>::Container
where
    A: IntoExpr,
    B: IntoExpr,
    NodeOf<A>: Expr<Shape = VectorShape<DA>>,
    NodeOf<B>: Expr<Shape = VectorShape<DB>>,
    DA: Dim,
    DB: Dim,
    op::Mul: BinaryTag<ElemOf<NodeOf<A>>, ElemOf<NodeOf<B>>>,
    MatrixShape<DA, DB, RowMajor>: Materialize<ProductElemOf<A, B>> + Shape<Index = (usize, usize)>,
{
    let a = a.into_expr();
    let b = b.into_expr();
    let shape = MatrixShape::<DA, DB, RowMajor>::new(a.shape().0, b.shape().0);
    log::trace!("evaluating outer product of shape {shape:?}");
    let mut out = shape.allocate();
    for flat in 0..shape.len() {
        let (row, col) = shape.index_at(flat);
        <MatrixShape<DA, DB, RowMajor> as Materialize<ProductElemOf<A, B>>>::store(
            &mut out,
            (row, col),
            op::Mul.apply(a.at(row), b.at(col)),
        );
    }
    out
}

/// Returns a lazy expression that swaps the rows and columns of a matrix or matrix
/// expression.
///
/// # Examples
///
/// ```
/// # use lazy_linalg::*;
/// let m = Matrix::from_rows([[1i32, 2, 3]]);
/// let t = transpose(&m * 2i32);
/// assert_eq!((t.rows(), t.cols()), (3, 1));
/// assert_eq!(t.at((2, 0)), 6);
/// ```
pub fn transpose<A, R, C, L>(a: A) -> MatrixXpr<Transpose<NodeOf<A>>>
where
    A: IntoExpr,
    NodeOf<A>: Expr<Shape = MatrixShape<R, C, L>>,
    R: Dim,
    C: Dim,
    L: Layout,
{
    MatrixXpr::new(Transpose::new(a.into_expr()))
}

/// Returns the squared length of a vector or quaternion (its dot product with itself).
///
/// # Examples
///
/// ```
/// # use lazy_linalg::*;
/// assert_eq!(length_squared(&vec2(3, 4)), 25);
/// assert_eq!(length_squared(vec2(1, 1) + vec2(2, 3)), 25);
/// ```
pub fn length_squared<A>(a: A) -> ElemOf<NodeOf<A>>
where
    A: IntoExpr,
    ShapeOf<NodeOf<A>>: DotShape,
{
    let node = a.into_expr();
    let shape = node.shape();
    BinaryReductionOp::new(op::Mul, op::Add).fold_pairs((0..shape.len()).map(|flat| {
        let index = shape.index_at(flat);
        let x = node.at(index);
        (x, x)
    }))
}

/// Returns the length of a vector or quaternion.
///
/// # Examples
///
/// ```
/// # use lazy_linalg::*;
/// assert_eq!(length(vec2(3.0, 0.0) - vec2(0.0, 4.0)), 5.0);
/// ```
pub fn length<A>(a: A) -> ElemOf<NodeOf<A>>
where
    A: IntoExpr,
    ShapeOf<NodeOf<A>>: DotShape,
    ElemOf<NodeOf<A>>: Sqrt,
{
    length_squared(a).sqrt()
}

/// Combines `a` and `b` elementwise with `op`, checking shapes first.
///
/// This is the fallible form of the `+`, `-`, `*` and `/` operators.
///
/// # Errors
///
/// Returns a [`SizeError`] if runtime dimensions differ.
pub fn try_elementwise<Op, A, B>(op: Op, a: A, b: B) -> Result<RootOf<Elementwise<Op, A, B>>>
where
    A: IntoExpr,
    B: IntoExpr,
    ShapeOf<NodeOf<A>>: CheckShape<ShapeOf<NodeOf<B>>>,
    ShapeOf<NodeOf<B>>: Shape<Index = IndexOf<NodeOf<A>>>,
    Op: BinaryTag<ElemOf<NodeOf<A>>, ElemOf<NodeOf<B>>>,
    <ShapeOf<NodeOf<A>> as CheckShape<ShapeOf<NodeOf<B>>>>::Output: RootShape,
{
    let node = BinaryOp::try_new(op, a.into_expr(), b.into_expr())?;
    Ok(<ShapeOf<Elementwise<Op, A, B>> as RootShape>::wrap(node))
}

/// Adds `a` and `b` lazily, checking shapes first.
///
/// # Errors
///
/// Returns a [`SizeError`] if runtime dimensions differ.
///
/// # Examples
///
/// ```
/// # use lazy_linalg::*;
/// let a = DynVector::from_vec(vec![1, 2, 3]);
/// let b = DynVector::from_vec(vec![1, 2]);
/// assert!(try_add(&a, &b).is_err());
/// assert_eq!(try_add(&a, &a)?.eval(), vec3(2, 4, 6));
/// # Ok::<(), SizeError>(())
/// ```
pub fn try_add<A, B>(a: A, b: B) -> Result<RootOf<Elementwise<op::Add, A, B>>>
where
    A: IntoExpr,
    B: IntoExpr,
    ShapeOf<NodeOf<A>>: CheckShape<ShapeOf<NodeOf<B>>>,
    ShapeOf<NodeOf<B>>: Shape<Index = IndexOf<NodeOf<A>>>,
    op::Add: BinaryTag<ElemOf<NodeOf<A>>, ElemOf<NodeOf<B>>>,
    <ShapeOf<NodeOf<A>> as CheckShape<ShapeOf<NodeOf<B>>>>::Output: RootShape,
{
    try_elementwise(op::Add, a, b)
}

/// Subtracts `b` from `a` lazily, checking shapes first.
///
/// # Errors
///
/// Returns a [`SizeError`] if runtime dimensions differ.
pub fn try_sub<A, B>(a: A, b: B) -> Result<RootOf<Elementwise<op::Sub, A, B>>>
where
    A: IntoExpr,
    B: IntoExpr,
    ShapeOf<NodeOf<A>>: CheckShape<ShapeOf<NodeOf<B>>>,
    ShapeOf<NodeOf<B>>: Shape<Index = IndexOf<NodeOf<A>>>,
    op::Sub: BinaryTag<ElemOf<NodeOf<A>>, ElemOf<NodeOf<B>>>,
    <ShapeOf<NodeOf<A>> as CheckShape<ShapeOf<NodeOf<B>>>>::Output: RootShape,
{
    try_elementwise(op::Sub, a, b)
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn matrix_products() {
        let a = Matrix::from_rows([[1i32, 2], [3, 4], [5, 6], [7, 8]]);
        let b = Matrix::from_rows([[9i32, 10, 11], [12, 13, 14]]);
        let c = mul(&a, &b);
        assert_eq!((c.rows(), c.cols()), (4, 3));
        assert_eq!(c[(0, 1)], a[(0, 0)] * b[(0, 1)] + a[(0, 1)] * b[(1, 1)]);
        assert_eq!(c[(2, 2)], a[(2, 0)] * b[(0, 2)] + a[(2, 1)] * b[(1, 2)]);
    }

    #[test]
    fn product_dimensions_promote() {
        let a = Matrix::from_rows([[1.0f64, 2.0], [3.0, 4.0]]);
        let b = DynMatrix::<f64>::identity(2);
        let c: DynMatrix<f64> = mul(&a, &b);
        assert_eq!(c, a);

        let v = DynVector::from_vec(vec![1.0f64, 1.0]);
        let w: Vec2<f64> = mul(&a, &v);
        assert_eq!(w, vec2(3.0, 7.0));
    }

    #[test]
    fn product_of_expressions() {
        let a = Matrix::from_rows([[1i32, 0], [0, 1]]);
        let b = Matrix::from_rows([[1i32, 2], [3, 4]]);
        let c = mul(&a + &a, b.transpose());
        assert_eq!(c, Matrix::from_rows([[2, 6], [4, 8]]));
    }

    #[test]
    fn mixed_element_product() {
        let a = Matrix::from_rows([[1i32, 2], [3, 4]]);
        let v = vec2(0.5f32, 0.25);
        let out: Vec2<f32> = mul(&a, &v);
        assert_eq!(out, vec2(1.0, 2.5));
    }

    #[test]
    fn dot_checks_sizes() {
        let a = DynVector::from_vec(vec![1i32, 2, 3]);
        let b = vec2(1i32, 2);
        assert_eq!(
            try_dot(&a, &b),
            Err(SizeError::VectorSize {
                expected: 3,
                actual: 2
            })
        );
        assert_eq!(try_dot(&a, &a), Ok(14));
    }

    #[test]
    fn cross_checks_dynamic_sizes() {
        let a = DynVector::from_vec(vec![1.0f64, 0.0]);
        let b = vec3(0.0f64, 1.0, 0.0);
        assert!(try_cross(&a, &b).is_err());

        let a = DynVector::from_vec(vec![0.0f64, 0.0, 2.0]);
        assert_eq!(try_cross(&a, &b), Ok(vec3(-2.0, 0.0, 0.0)));
    }

    #[test]
    fn outer_with_dynamic_operand() {
        let a = DynVector::from_vec(vec![1i32, 2]);
        let m: DynMatrix<i32> = outer(&a, &vec2(3, 4));
        assert_eq!(m, Matrix::from_rows([[3, 4], [6, 8]]));
    }

    #[test]
    fn lengths() {
        let q = Quat::new(1.0f64, 2.0, 2.0, 4.0);
        assert_eq!(length_squared(&q), 25.0);
        assert_eq!(length(&q), 5.0);
    }

    #[test]
    fn try_sub_is_lazy() {
        let a = Matrix::from_rows([[5i32, 6]]);
        let b = DynMatrix::<i32>::from_row_slice(1, 2, &[1, 1]).unwrap();
        let diff = try_sub(&a, &b).unwrap();
        assert_eq!(diff.at((0, 1)), 5);
        assert!(try_sub(&a, &DynMatrix::<i32>::zeros(2, 1)).is_err());
    }
}
