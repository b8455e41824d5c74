//! Root wrappers.
//!
//! Every operator returns one of these. The wrapper tells operator overloading which kind of
//! value the tree computes, and is stripped again when the expression becomes an operand of a
//! larger one, so arbitrarily deep trees still have a single wrapper at the top.

use std::fmt;

use crate::{
    assign::evaluate,
    dim::Dim,
    layout::{Layout, Order},
    op::{self, UnaryTag},
    shape::{Materialize, MatrixShape, QuaternionShape, Shape, VectorShape},
};

use super::{ElemOf, Expr, IndexOf, IntoExpr, UnaryOp};

/// Names and produces the container an expression materializes into.
pub trait Evaluate {
    /// The concrete container type, derived from the operand types alone.
    type Temporary;

    /// Computes every element and returns them in a new [`Evaluate::Temporary`].
    fn eval(self) -> Self::Temporary;
}

/// The container an expression `X` materializes into.
pub type Temporary<X> = <<X as Expr>::Shape as Materialize<<X as Expr>::Elem>>::Container;

/// Shapes that know which root wrapper holds an expression of their kind.
pub trait RootShape: Shape {
    type Root<N>;

    fn wrap<N>(node: N) -> Self::Root<N>;
}

/// The root wrapper holding the expression `X`.
pub type RootOf<X> = <<X as Expr>::Shape as RootShape>::Root<X>;

impl<D: Dim> RootShape for VectorShape<D> {
    type Root<N> = VectorXpr<N>;

    #[inline]
    fn wrap<N>(node: N) -> VectorXpr<N> {
        VectorXpr(node)
    }
}

impl<R: Dim, C: Dim, L: Layout> RootShape for MatrixShape<R, C, L> {
    type Root<N> = MatrixXpr<N>;

    #[inline]
    fn wrap<N>(node: N) -> MatrixXpr<N> {
        MatrixXpr(node)
    }
}

impl<O: Order> RootShape for QuaternionShape<O> {
    type Root<N> = QuaternionXpr<N>;

    #[inline]
    fn wrap<N>(node: N) -> QuaternionXpr<N> {
        QuaternionXpr(node)
    }
}

macro_rules! root_wrapper {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Clone, Copy)]
        pub struct $name<N>(N);

        impl<N: Expr> $name<N> {
            #[inline]
            pub fn new(node: N) -> Self {
                Self(node)
            }

            /// Returns the top node of the expression.
            #[inline]
            pub fn expression(&self) -> &N {
                &self.0
            }

            /// Unwraps the top node of the expression.
            #[inline]
            pub fn into_expression(self) -> N {
                self.0
            }

            /// Computes the element at the logical position `index`.
            #[inline]
            pub fn at(&self, index: IndexOf<N>) -> ElemOf<N> {
                self.0.at(index)
            }

            /// Identity. Returns an expression with the same elements.
            pub fn pos(self) -> $name<UnaryOp<op::Pos, N>>
            where
                op::Pos: UnaryTag<ElemOf<N>>,
            {
                $name(UnaryOp::new(op::Pos, self.0))
            }
        }

        impl<N: Expr> IntoExpr for $name<N> {
            type Node = N;

            #[inline]
            fn into_expr(self) -> N {
                self.0
            }
        }

        impl<'a, N: Expr> IntoExpr for &'a $name<N> {
            type Node = &'a N;

            #[inline]
            fn into_expr(self) -> &'a N {
                &self.0
            }
        }

        impl<N> Evaluate for $name<N>
        where
            N: Expr,
            N::Shape: Materialize<N::Elem>,
        {
            type Temporary = Temporary<N>;

            fn eval(self) -> Temporary<N> {
                evaluate(&self.0)
            }
        }

        impl<N: Expr> fmt::Debug for $name<N>
        where
            N::Shape: Materialize<N::Elem>,
            Temporary<N>: fmt::Debug,
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_tuple(stringify!($name))
                    .field(&evaluate(&self.0))
                    .finish()
            }
        }
    };
}

root_wrapper! {
    /// An expression computing a vector.
    VectorXpr
}

root_wrapper! {
    /// An expression computing a matrix.
    MatrixXpr
}

root_wrapper! {
    /// An expression computing a quaternion.
    QuaternionXpr
}

impl<N, D> VectorXpr<N>
where
    N: Expr<Shape = VectorShape<D>>,
    D: Dim,
{
    /// The length, if every operand has a compile-time length.
    pub const FIXED_SIZE: Option<usize> = D::FIXED;

    /// Returns the number of elements.
    #[inline]
    pub fn size(&self) -> usize {
        self.0.shape().0.value()
    }
}

impl<N, R, C, L> MatrixXpr<N>
where
    N: Expr<Shape = MatrixShape<R, C, L>>,
    R: Dim,
    C: Dim,
    L: Layout,
{
    /// The row count, if it is known at compile time.
    pub const FIXED_ROWS: Option<usize> = R::FIXED;
    /// The column count, if it is known at compile time.
    pub const FIXED_COLS: Option<usize> = C::FIXED;

    #[inline]
    pub fn rows(&self) -> usize {
        self.0.shape().rows.value()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.0.shape().cols.value()
    }
}

impl<N, O> QuaternionXpr<N>
where
    N: Expr<Shape = QuaternionShape<O>>,
    O: Order,
{
    /// Always 4.
    #[inline]
    pub fn size(&self) -> usize {
        4
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn fixed_sizes_survive_composition() {
        let a = vec3(1.0f64, 2.0, 3.0);
        let b = vec3(3.0f64, 2.0, 1.0);
        let c = DynVector::from_vec(vec![1.0f64, 1.0, 1.0]);

        let fixed = &a + &b;
        assert_eq!(fixed.size(), 3);
        assert_eq!(VectorXpr::<BinaryOp<op::Add, &Vec3<f64>, &Vec3<f64>>>::FIXED_SIZE, Some(3));

        let mixed = &a + &c;
        assert_eq!(mixed.size(), 3);
        assert_eq!(
            VectorXpr::<BinaryOp<op::Add, &Vec3<f64>, &DynVector<f64>>>::FIXED_SIZE,
            None
        );
    }

    #[test]
    fn matrix_dimensions() {
        let m = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
        let xpr = -&m;
        assert_eq!((xpr.rows(), xpr.cols()), (2, 3));
        assert_eq!(xpr.at((1, 2)), -6);
        let t = m.transpose();
        assert_eq!((t.rows(), t.cols()), (3, 2));
        assert_eq!(t.at((2, 1)), 6);
    }

    #[test]
    fn pos_is_identity() {
        let v = vec2(1, -1);
        let p = v.pos().pos();
        assert_eq!((p.at(0), p.at(1)), (1, -1));
    }

    #[test]
    fn debug_shows_values() {
        let a = vec2(1, 2);
        assert_eq!(format!("{:?}", &a + &a), "VectorXpr((2, 4))");
    }
}
