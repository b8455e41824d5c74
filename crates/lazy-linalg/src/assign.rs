//! Assignment and evaluation.
//!
//! This is where expression trees are walked and their elements written to memory. A
//! destination is prepared first (dynamic storage is resized, everything else has its shape
//! checked), then every element of the source is computed once and stored.
//!
//! A destination cannot appear in its own source by reference, since the source would borrow
//! the destination while it is being written:
//!
//! ```compile_fail
//! # use lazy_linalg::*;
//! let mut v = DynVector::from_vec(vec![1.0, 2.0, 3.0]);
//! let w = vec3(1.0, 1.0, 1.0);
//! v.assign(&v + &w);
//! ```
//!
//! Copy the destination explicitly instead:
//!
//! ```
//! # use lazy_linalg::*;
//! let mut v = DynVector::from_vec(vec![1.0, 2.0, 3.0]);
//! let w = vec3(1.0, 1.0, 1.0);
//! v.assign(v.clone() + &w);
//! assert_eq!(v.as_slice(), &[2.0, 3.0, 4.0]);
//! ```

use crate::{
    error::Result,
    expr::{ElemOf, Expr, IndexOf, IntoExpr, NodeOf, ShapeOf, Temporary},
    op::BinaryTag,
    shape::{CheckShape, Materialize, Shape},
    traits::Promote,
};

/// Containers that can be the destination of an assignment.
///
/// Implemented by every container whose storage is writable. Sources are anything that
/// implements [`IntoExpr`]: containers, references to containers, and expressions.
pub trait Writable: Expr + Sized {
    /// Prepares the destination to receive a value with the given `(rows, cols)` extent.
    ///
    /// Dynamic storage is resized. Fixed and external storage is checked and left untouched on
    /// mismatch.
    fn fit(&mut self, extent: (usize, usize)) -> Result<()>;

    /// Overwrites the element at `index`.
    fn set(&mut self, index: IndexOf<Self>, value: Self::Elem);

    /// Writes every element of `source` into `self`, converting element types as needed.
    ///
    /// Source elements are widened to the destination's element type following [`Promote`], so
    /// an `i64` expression can be written into an `f64` container but not the other way around.
    ///
    /// Fixed-size destinations only accept sources whose fixed dimensions match (this is
    /// checked at compile time). Dynamic dimensions are compared at runtime.
    ///
    /// # Errors
    ///
    /// Returns a [`SizeError`](crate::SizeError) if `self` is fixed-size or external and the
    /// runtime shape of `source` differs from it. No element is written in that case.
    fn try_assign<X>(&mut self, source: X) -> Result<&mut Self>
    where
        X: IntoExpr,
        Self::Shape: CheckShape<ShapeOf<NodeOf<X>>>,
        ShapeOf<NodeOf<X>>: Shape<Index = IndexOf<Self>>,
        ElemOf<NodeOf<X>>: Promote<Self::Elem, Output = Self::Elem>,
    {
        let source = source.into_expr();
        let shape = source.shape();
        self.fit(shape.extent())?;
        for flat in 0..shape.len() {
            let index = shape.index_at(flat);
            self.set(index, Promote::<Self::Elem>::lift(source.at(index)));
        }
        Ok(self)
    }

    /// Writes every element of `source` into `self`.
    ///
    /// # Panics
    ///
    /// Panics where [`Writable::try_assign`] would return an error.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lazy_linalg::*;
    /// let a = vec3(1.0, 2.0, 3.0);
    /// let b = vec3(4.0, 5.0, 6.0);
    /// let mut out = DynVector::<f64>::new(Vec::new());
    /// out.assign(&a + &b);
    /// assert_eq!(out.as_slice(), &[5.0, 7.0, 9.0]);
    /// ```
    #[track_caller]
    fn assign<X>(&mut self, source: X) -> &mut Self
    where
        X: IntoExpr,
        Self::Shape: CheckShape<ShapeOf<NodeOf<X>>>,
        ShapeOf<NodeOf<X>>: Shape<Index = IndexOf<Self>>,
        ElemOf<NodeOf<X>>: Promote<Self::Elem, Output = Self::Elem>,
    {
        match self.try_assign(source) {
            Ok(this) => this,
            Err(err) => panic!("{err}"),
        }
    }

    /// Combines every element of `self` with the matching element of `source` using `op`, in
    /// place. The destination is never resized.
    ///
    /// # Errors
    ///
    /// Returns a [`SizeError`](crate::SizeError) if the shapes differ at runtime. No element is
    /// written in that case.
    fn try_update<Op, X>(&mut self, op: Op, source: X) -> Result<&mut Self>
    where
        X: IntoExpr,
        Self::Shape: CheckShape<ShapeOf<NodeOf<X>>>,
        ShapeOf<NodeOf<X>>: Shape<Index = IndexOf<Self>>,
        Op: BinaryTag<Self::Elem, ElemOf<NodeOf<X>>, Output = Self::Elem>,
    {
        let source = source.into_expr();
        let shape = self.shape().check(source.shape())?;
        for flat in 0..shape.len() {
            let index = shape.index_at(flat);
            let value = op.apply(self.at(index), source.at(index));
            self.set(index, value);
        }
        Ok(self)
    }
}

/// Computes every element of `source` into a freshly allocated [`Temporary`].
pub(crate) fn evaluate<X>(source: &X) -> Temporary<X>
where
    X: Expr,
    X::Shape: Materialize<X::Elem>,
{
    let shape = source.shape();
    let mut out = shape.allocate();
    for flat in 0..shape.len() {
        let index = shape.index_at(flat);
        <X::Shape as Materialize<X::Elem>>::store(&mut out, index, source.at(index));
    }
    out
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn assign_resizes_dynamic_destination() {
        let a = DynVector::from_vec(vec![1, 2]);
        let mut out = DynVector::<i32>::new(vec![9; 5]);
        out.assign(&a + &a);
        assert_eq!(out.size(), 2);
        assert_eq!(out.as_slice(), &[2, 4]);
    }

    #[test]
    fn fixed_destination_rejects_runtime_mismatch() {
        let mut out = vec3(0, 0, 0);
        let src = DynVector::from_vec(vec![1, 2]);
        assert_eq!(
            out.try_assign(&src).unwrap_err(),
            SizeError::VectorSize {
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(out, vec3(0, 0, 0));
    }

    #[test]
    fn external_destination_never_resizes() {
        let mut buf = [0.0f32; 2];
        let mut ext = Vector::external(&mut buf[..]);
        assert!(ext.try_assign(&DynVector::from_vec(vec![1.0f32; 3])).is_err());
        ext.assign(vec2(1.5f32, 2.5));
        assert_eq!(buf, [1.5, 2.5]);
    }

    #[test]
    fn element_conversion_on_assignment() {
        let mut out = vec2(0.0f64, 0.0);
        out.assign(vec2(1.5f32, 2.0) + vec2(1.0f32, 1.0));
        assert_eq!(out, vec2(2.5, 3.0));

        let mut wide = DynVector::<f64>::zeros(0);
        wide.assign(DynVector::from_vec(vec![1i64, -2, 3]) * 2i64);
        assert_eq!(wide.as_slice(), &[2.0, -4.0, 6.0]);
    }

    #[test]
    fn compound_never_resizes() {
        let mut out = DynVector::from_vec(vec![1, 2, 3]);
        let err = out
            .try_update(op::Add, &DynVector::from_vec(vec![1, 1]))
            .unwrap_err();
        assert!(matches!(err, SizeError::VectorSize { .. }));
        assert_eq!(out.as_slice(), &[1, 2, 3]);

        out += vec3(10, 10, 10);
        assert_eq!(out.as_slice(), &[11, 12, 13]);
    }

    #[test]
    fn matrix_assignment_across_layouts() {
        let src = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
        let mut dst = DynMatrix::<i32, ColMajor>::zeros(0, 0);
        dst.assign(&src);
        assert_eq!((dst.rows(), dst.cols()), (2, 3));
        assert_eq!(dst[(1, 0)], 4);
        assert_eq!(dst.as_slice(), &[1, 4, 2, 5, 3, 6]);
    }
}
