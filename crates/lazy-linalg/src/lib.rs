//! Lazy linear algebra over vectors, matrices and quaternions.
//!
//! Arithmetic operators on the containers in this crate do not compute anything. They build a
//! small expression tree describing the computation, which is evaluated element by element when
//! it is assigned to a container. `&a + &b - &c` therefore allocates nothing and touches every
//! element of the operands exactly once, when the result is written.
//!
//! ```
//! # use lazy_linalg::*;
//! let a = vec3(1.0f64, 2.0, 3.0);
//! let b = vec3(4.0f64, 5.0, 6.0);
//!
//! let sum = &a + &b * 2.0f64;
//! assert_eq!(sum.at(2), 15.0);
//!
//! let mut out = DynVector::<f64>::zeros(0);
//! out.assign(sum);
//! assert_eq!(out, [9.0, 12.0, 15.0]);
//! ```
//!
//! # Containers
//!
//! [`Vector`], [`Matrix`] and [`Quaternion`] are generic over their storage, which can be:
//!
//! - **fixed**: an inline array whose dimensions are part of the type ([`Vec3`], [`Mat2`],
//!   [`Quat`], ...),
//! - **dynamic**: a heap buffer sized at runtime ([`DynVector`], [`DynMatrix`]),
//! - **external**: a buffer owned by the caller, which is written in place but never resized
//!   ([`ExternalVector`], [`ExternalMatrix`], [`ExternalQuat`]).
//!
//! All storage kinds, and element types, can be mixed within one expression. The element type of
//! the result is the promoted type of the operands (`i32 + f64` yields `f64`), and the container
//! an expression evaluates to is fixed-size whenever the dimensions are known at compile time.
//!
//! # Size checking
//!
//! Combining two fixed-size operands with mismatched dimensions fails to compile. As soon as a
//! dynamic operand is involved, dimensions are compared when the expression is built. Operators
//! panic on a mismatch, while the named `try_` functions ([`try_add`], [`try_mul`], [`try_dot`],
//! [`Writable::try_assign`], ...) return a [`SizeError`] instead.
//!
//! # Operators
//!
//! - `+` and `-` are elementwise for every container kind.
//! - `*` and `/` between two vectors are elementwise.
//! - `*` with a matrix on the left is the matrix product, computed right away.
//! - `*` between two quaternions is the Hamilton product, computed right away.
//! - `*` and `/` with a scalar scale every element, promoting element types like any other
//!   operand pair. Scalar literals need a suffix (`2.0f32`) unless their type is otherwise known.
//! - Compound assignment (`+=`, `*=`, ...) updates the destination in place and never resizes it.

pub mod op;

mod approx_eq;
mod assign;
mod dim;
mod error;
mod expr;
mod func;
mod layout;
mod matrix;
mod quat;
mod shape;
mod storage;
mod traits;
mod vector;

pub use assign::*;
pub use dim::*;
pub use error::{Result, SizeError};
pub use expr::*;
pub use func::*;
pub use layout::*;
pub use matrix::*;
pub use quat::*;
pub use shape::*;
pub use storage::*;
pub use traits::*;
pub use vector::*;
