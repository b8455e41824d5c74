//! Implementations of `std::ops`.
//!
//! Vector arithmetic is elementwise: `+`, `-`, `*` and `/` between vectors (or vector
//! expressions) combine matching elements. Scalars can multiply and divide vectors.

use std::ops::{Index, IndexMut};

use crate::{
    expr::ops::{compound_ops, elementwise_ops, neg_op, scalar_compound_ops, scalar_ops},
    storage::{VectorStorage, VectorStorageMut},
    VectorXpr,
};

use super::Vector;

impl<S: VectorStorage> Index<usize> for Vector<S> {
    type Output = S::Elem;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0.as_slice()[index]
    }
}

impl<S: VectorStorageMut> IndexMut<usize> for Vector<S> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.0.as_mut_slice()[index]
    }
}

// Compares elements, regardless of storage kind.
impl<S, T> PartialEq<Vector<T>> for Vector<S>
where
    S: VectorStorage,
    T: VectorStorage,
    S::Elem: PartialEq<T::Elem>,
{
    fn eq(&self, other: &Vector<T>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<S> Eq for Vector<S>
where
    S: VectorStorage,
    S::Elem: Eq,
{
}

impl<S, U, const N: usize> PartialEq<[U; N]> for Vector<S>
where
    S: VectorStorage,
    S::Elem: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == &other[..]
    }
}

impl<S, U> PartialEq<[U]> for Vector<S>
where
    S: VectorStorage,
    S::Elem: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

elementwise_ops!([S] Vector<S> => VectorXpr; (Add add Add) (Sub sub Sub) (Mul mul Mul) (Div div Div));
elementwise_ops!(['a, S] &'a Vector<S> => VectorXpr; (Add add Add) (Sub sub Sub) (Mul mul Mul) (Div div Div));
elementwise_ops!([N] VectorXpr<N> => VectorXpr; (Add add Add) (Sub sub Sub) (Mul mul Mul) (Div div Div));
elementwise_ops!(['a, N] &'a VectorXpr<N> => VectorXpr; (Add add Add) (Sub sub Sub) (Mul mul Mul) (Div div Div));

scalar_ops!([S] Vector<S> => VectorXpr; i8, i16, i32, i64, i128, f32, f64);
scalar_ops!(['a, S] &'a Vector<S> => VectorXpr; i8, i16, i32, i64, i128, f32, f64);
scalar_ops!([N] VectorXpr<N> => VectorXpr; i8, i16, i32, i64, i128, f32, f64);
scalar_ops!(['a, N] &'a VectorXpr<N> => VectorXpr; i8, i16, i32, i64, i128, f32, f64);

neg_op!([S] Vector<S> => VectorXpr);
neg_op!(['a, S] &'a Vector<S> => VectorXpr);
neg_op!([N] VectorXpr<N> => VectorXpr);
neg_op!(['a, N] &'a VectorXpr<N> => VectorXpr);

compound_ops!([S] Vector<S>; (AddAssign add_assign Add) (SubAssign sub_assign Sub) (MulAssign mul_assign Mul) (DivAssign div_assign Div));
scalar_compound_ops!([S] Vector<S>; i8, i16, i32, i64, i128, f32, f64);

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn elementwise_arithmetic() {
        let a = vec3(1, 2, 3);
        let b = vec3(4, 5, 6);
        let c = vec3(7, 8, 9);
        assert_eq!((&a + &b - &c).eval(), vec3(-2, -1, 0));
        assert_eq!((&a * &b).eval(), vec3(4, 10, 18));
        assert_eq!((&b / &a).eval(), vec3(4, 2, 2));
        assert_eq!((-&a).eval(), vec3(-1, -2, -3));
    }

    #[test]
    fn scalar_arithmetic() {
        let v = vec2(2.0f64, 4.0);
        assert_eq!((&v * 0.5f64).eval(), vec2(1.0, 2.0));
        assert_eq!((0.5f64 * &v).eval(), vec2(1.0, 2.0));
        assert_eq!((&v / 2.0f64).eval(), vec2(1.0, 2.0));
        assert_eq!(((&v + &v) * 2.0f64).eval(), vec2(8.0, 16.0));
    }

    #[test]
    fn scalars_promote() {
        let v = vec3(1i32, 2, 3);
        let scaled: Vec3<f64> = (&v * 2.5f64).eval();
        assert_eq!(scaled, [2.5, 5.0, 7.5]);
        assert_eq!((0.5f32 * &v).at(2), 1.5f32);
        assert_eq!((&v / 2i64).eval(), [0i64, 1, 1]);

        let mut w = v;
        w *= 3i16;
        assert_eq!(w, [3, 6, 9]);
    }

    #[test]
    fn promotion_across_element_types() {
        let a = vec2(1i32, 2);
        let b = vec2(0.5f64, 0.25);
        let sum: Vec2<f64> = (&a + &b).eval();
        assert_eq!(sum, vec2(1.5, 2.25));

        let c = vec2(0.5f32, 0.5);
        let prod: Vec2<f64> = (&c * &b).eval();
        assert_eq!(prod, vec2(0.25, 0.125));
    }

    #[test]
    fn fixed_and_dynamic_combine() {
        let a = vec3(1.0f64, 2.0, 3.0);
        let b = DynVector::from_vec(vec![1.0f64, 1.0, 1.0]);
        let sum: DynVector<f64> = (&a + &b).eval();
        assert_eq!(sum, vec3(2.0, 3.0, 4.0));
    }

    #[test]
    #[should_panic(expected = "vector size mismatch: expected 3 elements, got 2")]
    fn dynamic_mismatch_panics() {
        let a = DynVector::from_vec(vec![1, 2, 3]);
        let b = DynVector::from_vec(vec![1, 2]);
        let _ = &a + &b;
    }

    #[test]
    fn compound_assignment() {
        let mut v = vec3(1i32, 2, 3);
        v += vec3(1, 1, 1);
        v -= &vec3(0, 1, 0);
        v *= 2i32;
        assert_eq!(v, [4, 4, 8]);
        v /= &vec3(2, 4, 8);
        assert_eq!(v, [2, 1, 1]);
        v *= &v.clone() + &v.clone();
        assert_eq!(v, [8, 2, 2]);
    }

    #[test]
    fn indexing() {
        let mut v = DynVector::from_vec(vec![1, 2]);
        v[1] = 5;
        assert_eq!(v[1], 5);
        assert_eq!(v.get(2), None);
    }
}
