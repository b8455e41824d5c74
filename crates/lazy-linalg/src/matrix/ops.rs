//! Implementations of `std::ops`.
//!
//! `+` and `-` are elementwise and lazy. `*` between a matrix and another matrix or a vector
//! is the matrix product and is evaluated immediately. Scalars multiply and divide every
//! element.

use crate::{
    expr::ops::{compound_ops, elementwise_ops, neg_op, product_ops, scalar_compound_ops, scalar_ops},
    layout::Layout,
    storage::MatrixStorage,
    MatrixXpr,
};

use super::Matrix;

// Compares logical elements, so matrices with different layouts or storage can be equal.
impl<S, T, L1, L2> PartialEq<Matrix<T, L2>> for Matrix<S, L1>
where
    S: MatrixStorage,
    T: MatrixStorage,
    L1: Layout,
    L2: Layout,
    S::Elem: PartialEq<T::Elem>,
{
    fn eq(&self, other: &Matrix<T, L2>) -> bool {
        self.rows() == other.rows()
            && self.cols() == other.cols()
            && (0..self.rows())
                .all(|row| (0..self.cols()).all(|col| self[(row, col)] == other[(row, col)]))
    }
}

impl<S, L> Eq for Matrix<S, L>
where
    S: MatrixStorage,
    S::Elem: Eq,
    L: Layout,
{
}

elementwise_ops!([S, L] Matrix<S, L> => MatrixXpr; (Add add Add) (Sub sub Sub));
elementwise_ops!(['a, S, L] &'a Matrix<S, L> => MatrixXpr; (Add add Add) (Sub sub Sub));
elementwise_ops!([N] MatrixXpr<N> => MatrixXpr; (Add add Add) (Sub sub Sub));
elementwise_ops!(['a, N] &'a MatrixXpr<N> => MatrixXpr; (Add add Add) (Sub sub Sub));

product_ops!([S, L] Matrix<S, L>);
product_ops!(['a, S, L] &'a Matrix<S, L>);
product_ops!([N] MatrixXpr<N>);
product_ops!(['a, N] &'a MatrixXpr<N>);

scalar_ops!([S, L] Matrix<S, L> => MatrixXpr; i8, i16, i32, i64, i128, f32, f64);
scalar_ops!(['a, S, L] &'a Matrix<S, L> => MatrixXpr; i8, i16, i32, i64, i128, f32, f64);
scalar_ops!([N] MatrixXpr<N> => MatrixXpr; i8, i16, i32, i64, i128, f32, f64);
scalar_ops!(['a, N] &'a MatrixXpr<N> => MatrixXpr; i8, i16, i32, i64, i128, f32, f64);

neg_op!([S, L] Matrix<S, L> => MatrixXpr);
neg_op!(['a, S, L] &'a Matrix<S, L> => MatrixXpr);
neg_op!([N] MatrixXpr<N> => MatrixXpr);
neg_op!(['a, N] &'a MatrixXpr<N> => MatrixXpr);

compound_ops!([S, L] Matrix<S, L>; (AddAssign add_assign Add) (SubAssign sub_assign Sub));
scalar_compound_ops!([S, L] Matrix<S, L>; i8, i16, i32, i64, i128, f32, f64);

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn mat_vec_mul() {
        let mat = Matrix::from_rows([[0, 1], [2, 3]]);
        let vec = vec2(4, 5);
        let out = &mat * &vec;
        assert_eq!(out, [4 * 0 + 5 * 1, 4 * 2 + 5 * 3]);
    }

    #[test]
    fn mat_mat_mul() {
        let a = Matrix::from_rows([[1, 2], [3, 4]]);
        let b = Matrix::from_rows([[5, 6], [7, 8]]);
        assert_eq!(&a * &b, Matrix::from_rows([[19, 22], [43, 50]]));
        assert_eq!((&a + &a) * &b, Matrix::from_rows([[38, 44], [86, 100]]));
    }

    #[test]
    #[should_panic(expected = "left operand has 2 columns, right operand has 3 rows")]
    fn dynamic_product_mismatch_panics() {
        let a = DynMatrix::<i32>::zeros(2, 2);
        let b = DynMatrix::<i32>::zeros(3, 1);
        let _ = &a * &b;
    }

    #[test]
    fn elementwise_and_scalar() {
        let a = Matrix::from_rows([[1.0f64, 2.0], [3.0, 4.0]]);
        let b = Matrix::from_cols([[1.0f64, 1.0], [1.0, 1.0]]);
        let c = (&a - &b) * 2.0f64;
        assert_eq!(c.eval(), Matrix::from_rows([[0.0, 2.0], [4.0, 6.0]]));
        assert_eq!((-(&a / 2.0f64)).at((1, 1)), -2.0);
        assert_eq!((0.5f64 * &a).at((0, 1)), 1.0);
    }

    #[test]
    fn scalars_promote() {
        let m = Mat2::<f32>::identity();
        let wide: Mat2<f64> = (&m * 2.0f64).eval();
        assert_eq!(wide, Matrix::from_rows([[2.0, 0.0], [0.0, 2.0]]));
        assert_eq!((3i32 * &m).at((1, 1)), 3.0f32);
    }

    #[test]
    fn compound_assignment() {
        let mut m = DynMatrix::<i32>::identity(2);
        m += Matrix::from_rows([[1, 2], [3, 4]]);
        m -= &Mat2::<i32>::identity();
        m *= 3i32;
        assert_eq!(m, Matrix::from_rows([[3, 6], [9, 12]]));
        m /= 3i32;
        assert_eq!(m[(1, 0)], 3);
    }

    #[test]
    #[should_panic(expected = "matrix size mismatch: expected 2x2, got 1x2")]
    fn compound_never_resizes() {
        let mut m = DynMatrix::<i32>::zeros(2, 2);
        m += DynMatrix::<i32>::zeros(1, 2);
    }
}
