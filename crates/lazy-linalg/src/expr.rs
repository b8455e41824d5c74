//! Lazy expressions.
//!
//! Arithmetic on vectors, matrices and quaternions does not compute anything right away. Each
//! operator returns a root wrapper ([`VectorXpr`], [`MatrixXpr`] or [`QuaternionXpr`]) holding a
//! tree of expression nodes. Elements are computed on demand via [`Expr::at`], and the tree is
//! written to memory once, when it is assigned to a container or evaluated with
//! [`Evaluate::eval`].
//!
//! Operands are captured by reference or by value depending on how they are passed:
//!
//! ```
//! # use lazy_linalg::*;
//! let a = vec3(1.0f64, 2.0, 3.0);
//! let b = vec3(4.0f64, 5.0, 6.0);
//!
//! // `a` and `b` are borrowed by the expression.
//! let sum = &a + &b;
//! assert_eq!(sum.at(1), 7.0);
//!
//! // `sum` is moved into the new expression, so the whole tree is still a single expression.
//! let scaled = sum * 2.0f64;
//! assert_eq!(scaled.eval(), vec3(10.0, 14.0, 18.0));
//! ```
//!
//! A borrowed operand stays borrowed for as long as the expression is alive, so it cannot be
//! modified in the meantime:
//!
//! ```compile_fail
//! # use lazy_linalg::*;
//! let mut m = DynVector::from_vec(vec![2.0f64]);
//! let p = DynVector::from_vec(vec![3.0f64]);
//! let x = &m + &p;
//! m.assign(&p);
//! assert_eq!(x.at(0), 6.0);
//! ```
//!
//! Moving a copy into the expression instead detaches it from later changes:
//!
//! ```
//! # use lazy_linalg::*;
//! let mut m = DynVector::from_vec(vec![2.0f64]);
//! let p = DynVector::from_vec(vec![3.0f64]);
//! let x = m.clone() + &p;
//! m.assign(&p);
//! assert_eq!(x.at(0), 5.0);
//! assert_eq!((&m + &p).at(0), 6.0);
//! ```

use crate::{shape::Shape, traits::Scalar};

pub(crate) mod node;
pub(crate) mod ops;
mod root;

pub use node::*;
pub use root::*;

/// A value whose elements can be computed individually.
///
/// Implemented by the concrete containers, by references to expressions, and by every
/// expression node. Calling [`Expr::at`] on a node recomputes the element from its operands
/// each time; nothing is cached.
pub trait Expr {
    /// The (promoted) element type.
    type Elem: Scalar;

    /// The shape of the value, including compile-time dimensions where known.
    type Shape: Shape;

    fn shape(&self) -> Self::Shape;

    /// Computes the element at the logical position `index`.
    fn at(&self, index: <Self::Shape as Shape>::Index) -> Self::Elem;
}

impl<'a, X: Expr + ?Sized> Expr for &'a X {
    type Elem = X::Elem;
    type Shape = X::Shape;

    #[inline]
    fn shape(&self) -> X::Shape {
        (**self).shape()
    }

    #[inline]
    fn at(&self, index: <X::Shape as Shape>::Index) -> X::Elem {
        (**self).at(index)
    }
}

/// Conversion into an expression operand.
///
/// Containers are used as-is, references to containers are captured by reference, and root
/// wrappers are unwrapped so that their node is embedded directly in the enclosing expression.
///
/// Scalars are not operands, so passing one where a vector is expected does not compile:
///
/// ```compile_fail
/// # use lazy_linalg::*;
/// let v = vec3(1i32, 2, 3);
/// let d = dot(&v, 2i32);
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be used as an operand of a vector, matrix or quaternion expression",
    label = "not a vector, matrix, quaternion or expression",
    note = "scalars can only be combined with vectors, matrices and quaternions through `*` and `/`"
)]
pub trait IntoExpr {
    type Node: Expr;

    fn into_expr(self) -> Self::Node;
}

/// Element type of an expression.
pub type ElemOf<X> = <X as Expr>::Elem;

/// Shape of an expression.
pub type ShapeOf<X> = <X as Expr>::Shape;

/// Element index type of an expression.
pub type IndexOf<X> = <<X as Expr>::Shape as Shape>::Index;

/// Node an operand turns into.
pub type NodeOf<T> = <T as IntoExpr>::Node;
