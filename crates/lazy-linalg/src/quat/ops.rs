//! Implementations of `std::ops`.
//!
//! `+` and `-` are componentwise and lazy, as are multiplication and division by a scalar.
//! `*` between two quaternions is the Hamilton product.

use crate::{
    dim::Const,
    expr::ops::{compound_ops, elementwise_ops, hamilton_ops, neg_op, scalar_compound_ops, scalar_ops},
    layout::Order,
    storage::VectorStorage,
    QuaternionXpr,
};

use super::Quaternion;

// Compares logical components, so quaternions with different orders can be equal.
impl<S, T, O1, O2> PartialEq<Quaternion<T, O2>> for Quaternion<S, O1>
where
    S: VectorStorage<Dim = Const<4>>,
    T: VectorStorage<Dim = Const<4>>,
    O1: Order,
    O2: Order,
    S::Elem: PartialEq<T::Elem>,
{
    fn eq(&self, other: &Quaternion<T, O2>) -> bool {
        (0..4).all(|component| self[component] == other[component])
    }
}

impl<S, O> Eq for Quaternion<S, O>
where
    S: VectorStorage<Dim = Const<4>>,
    S::Elem: Eq,
    O: Order,
{
}

elementwise_ops!([S, O] Quaternion<S, O> => QuaternionXpr; (Add add Add) (Sub sub Sub));
elementwise_ops!(['a, S, O] &'a Quaternion<S, O> => QuaternionXpr; (Add add Add) (Sub sub Sub));
elementwise_ops!([N] QuaternionXpr<N> => QuaternionXpr; (Add add Add) (Sub sub Sub));
elementwise_ops!(['a, N] &'a QuaternionXpr<N> => QuaternionXpr; (Add add Add) (Sub sub Sub));

hamilton_ops!([S, O] Quaternion<S, O>);
hamilton_ops!(['a, S, O] &'a Quaternion<S, O>);
hamilton_ops!([N] QuaternionXpr<N>);
hamilton_ops!(['a, N] &'a QuaternionXpr<N>);

scalar_ops!([S, O] Quaternion<S, O> => QuaternionXpr; i8, i16, i32, i64, i128, f32, f64);
scalar_ops!(['a, S, O] &'a Quaternion<S, O> => QuaternionXpr; i8, i16, i32, i64, i128, f32, f64);
scalar_ops!([N] QuaternionXpr<N> => QuaternionXpr; i8, i16, i32, i64, i128, f32, f64);
scalar_ops!(['a, N] &'a QuaternionXpr<N> => QuaternionXpr; i8, i16, i32, i64, i128, f32, f64);

neg_op!([S, O] Quaternion<S, O> => QuaternionXpr);
neg_op!(['a, S, O] &'a Quaternion<S, O> => QuaternionXpr);
neg_op!([N] QuaternionXpr<N> => QuaternionXpr);
neg_op!(['a, N] &'a QuaternionXpr<N> => QuaternionXpr);

compound_ops!([S, O] Quaternion<S, O>; (AddAssign add_assign Add) (SubAssign sub_assign Sub));
scalar_compound_ops!([S, O] Quaternion<S, O>; i8, i16, i32, i64, i128, f32, f64);

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn componentwise() {
        let a = Quat::new(1i32, 2, 3, 4);
        let b = Quat::<i32, RealFirst>::from_xyzw(4, 3, 2, 1);
        assert_eq!((&a + &b).eval(), Quat::new(5, 5, 5, 5));
        assert_eq!((&a - &b).at(0), -3);
        assert_eq!((-&a).eval(), Quat::new(-1, -2, -3, -4));
    }

    #[test]
    fn scalars() {
        let q = Quat::new(2.0f64, 4.0, 6.0, 8.0);
        assert_eq!((&q * 0.5f64).eval(), Quat::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!((2.0f64 * &q).at(3), 16.0);
        assert_eq!((&q / 2.0f64).eval(), Quat::new(1.0, 2.0, 3.0, 4.0));
    }

    #[test]
    fn hamilton_product_of_expressions() {
        let a = Quat::new(1i32, 2, 3, 4);
        let b = Quat::new(5i32, 6, 7, 8);
        assert_eq!((&a + &a) * &b, Quat::new(48, 96, 96, -12));
        assert_eq!(&a * (&b - &b), Quat::new(0, 0, 0, 0));
        assert_ne!(&a * &b, &b * &a);
    }

    #[test]
    fn compound_assignment() {
        let mut q = Quat::<i32, RealFirst>::identity();
        q += Quat::new(1i32, 2, 3, 4);
        q -= &Quat::new(1i32, 1, 1, 1);
        q *= 2i32;
        assert_eq!(q, Quat::new(0, 2, 4, 8));
        assert_eq!(q.as_slice(), &[8, 0, 2, 4]);
    }
}
