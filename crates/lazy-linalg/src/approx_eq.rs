//! Approximate equality via the [`approx`] traits.
//!
//! Containers compare approximately if they have the same extent and every pair of logical
//! elements does. Layout and component order are ignored.

use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::{
    dim::Const,
    expr::{Expr, IndexOf},
    layout::{Layout, Order},
    matrix::Matrix,
    quat::Quaternion,
    shape::Shape,
    storage::{MatrixStorage, VectorStorage},
    vector::Vector,
};

fn all_close<X, Y>(a: &X, b: &Y, mut close: impl FnMut(&X::Elem, &Y::Elem) -> bool) -> bool
where
    X: Expr,
    Y: Expr,
    Y::Shape: Shape<Index = IndexOf<X>>,
{
    let shape = a.shape();
    if shape.extent() != b.shape().extent() {
        return false;
    }
    (0..shape.len()).all(|flat| {
        let index = shape.index_at(flat);
        close(&a.at(index), &b.at(index))
    })
}

macro_rules! approx_impls {
    ([$($gen:tt)*] $lhs:ty, $rhs:ty; $le:ty, $re:ty; $($bounds:tt)*) => {
        impl<$($gen)*> AbsDiffEq<$rhs> for $lhs
        where
            $($bounds)*
            $le: AbsDiffEq<$re>,
            <$le as AbsDiffEq<$re>>::Epsilon: Clone,
        {
            type Epsilon = <$le as AbsDiffEq<$re>>::Epsilon;

            fn default_epsilon() -> Self::Epsilon {
                <$le as AbsDiffEq<$re>>::default_epsilon()
            }

            fn abs_diff_eq(&self, other: &$rhs, epsilon: Self::Epsilon) -> bool {
                all_close(self, other, |a, b| a.abs_diff_eq(b, epsilon.clone()))
            }
        }

        impl<$($gen)*> RelativeEq<$rhs> for $lhs
        where
            $($bounds)*
            $le: RelativeEq<$re>,
            <$le as AbsDiffEq<$re>>::Epsilon: Clone,
        {
            fn default_max_relative() -> Self::Epsilon {
                <$le as RelativeEq<$re>>::default_max_relative()
            }

            fn relative_eq(
                &self,
                other: &$rhs,
                epsilon: Self::Epsilon,
                max_relative: Self::Epsilon,
            ) -> bool {
                all_close(self, other, |a, b| {
                    a.relative_eq(b, epsilon.clone(), max_relative.clone())
                })
            }
        }

        impl<$($gen)*> UlpsEq<$rhs> for $lhs
        where
            $($bounds)*
            $le: UlpsEq<$re>,
            <$le as AbsDiffEq<$re>>::Epsilon: Clone,
        {
            fn default_max_ulps() -> u32 {
                <$le as UlpsEq<$re>>::default_max_ulps()
            }

            fn ulps_eq(&self, other: &$rhs, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
                all_close(self, other, |a, b| a.ulps_eq(b, epsilon.clone(), max_ulps))
            }
        }
    };
}

approx_impls!([S, T] Vector<S>, Vector<T>; S::Elem, T::Elem; S: VectorStorage, T: VectorStorage,);
approx_impls!(
    [S, T, L1, L2] Matrix<S, L1>, Matrix<T, L2>; S::Elem, T::Elem;
    S: MatrixStorage, T: MatrixStorage, L1: Layout, L2: Layout,
);
approx_impls!(
    [S, T, O1, O2] Quaternion<S, O1>, Quaternion<T, O2>; S::Elem, T::Elem;
    S: VectorStorage<Dim = Const<4>>, T: VectorStorage<Dim = Const<4>>, O1: Order, O2: Order,
);

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq, assert_relative_ne, assert_ulps_eq};

    use crate::*;

    #[test]
    fn vectors() {
        let a = vec3(1.0f32, 2.0, 3.0);
        let b = (&a + &vec3(1e-7f32, 0.0, -1e-7)).eval();
        assert_relative_eq!(a, b);
        assert_ulps_eq!(a, b);
        assert_relative_ne!(a, vec3(1.0f32, 2.0, 3.1));
        assert_relative_ne!(a, DynVector::from_vec(vec![1.0f32, 2.0]));
    }

    #[test]
    fn matrices_ignore_layout() {
        let a = Matrix::from_rows([[1.0f64, 2.0], [3.0, 4.0]]);
        let b = Matrix::from_cols([[1.0f64, 3.0], [2.0, 4.0 + 1e-9]]);
        assert_abs_diff_eq!(a, b, epsilon = 1e-6);
        assert_relative_ne!(a, a.transpose().eval());
    }

    #[test]
    fn quaternions_ignore_order() {
        let a = Quat::new(0.1f64, 0.2, 0.3, 0.4);
        let b = Quat::<f64, RealFirst>::from_xyzw(0.1, 0.2, 0.3, 0.4 + 1e-15);
        assert_relative_eq!(a, b, epsilon = 1e-12);
        assert_relative_eq!(a.length(), 0.3f64.sqrt(), max_relative = 1e-12);
    }
}
