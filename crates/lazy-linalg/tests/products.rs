//! Products checked against nalgebra.

use anyhow::Result;
use lazy_linalg::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Small integers, so that every product is exact in `f64`.
fn random_elems(rng: &mut fastrand::Rng, len: usize) -> Vec<f64> {
    (0..len).map(|_| rng.i32(-20..20) as f64).collect()
}

#[test]
fn matrix_products_match_nalgebra() -> Result<()> {
    init_logger();

    let mut rng = fastrand::Rng::with_seed(1234);
    for _ in 0..100 {
        let (rows, inner, cols) = (rng.usize(1..6), rng.usize(1..6), rng.usize(1..6));
        let left = random_elems(&mut rng, rows * inner);
        let right = random_elems(&mut rng, inner * cols);

        let a = DynMatrix::<f64>::from_row_slice(rows, inner, &left)?;
        let b = DynMatrix::<f64, ColMajor>::from_fn(inner, cols, |r, c| right[r * cols + c]);
        let product = try_mul(&a, &b)?;

        let expected = nalgebra::DMatrix::from_row_slice(rows, inner, &left)
            * nalgebra::DMatrix::from_row_slice(inner, cols, &right);
        assert_eq!((product.rows(), product.cols()), (rows, cols));
        for r in 0..rows {
            for c in 0..cols {
                assert_eq!(product[(r, c)], expected[(r, c)], "element ({r}, {c})");
            }
        }
    }
    Ok(())
}

#[test]
fn vector_products_match_nalgebra() -> Result<()> {
    init_logger();

    let mut rng = fastrand::Rng::with_seed(99);
    for _ in 0..100 {
        let (rows, cols) = (rng.usize(1..6), rng.usize(1..6));
        let elems = random_elems(&mut rng, rows * cols);
        let column = random_elems(&mut rng, cols);
        let row = random_elems(&mut rng, rows);

        let m = DynMatrix::<f64>::from_row_slice(rows, cols, &elems)?;
        let nm = nalgebra::DMatrix::from_row_slice(rows, cols, &elems);

        let mv = &m * &DynVector::from_vec(column.clone());
        let expected = &nm * nalgebra::DVector::from_vec(column);
        assert_eq!(mv.size(), rows);
        for i in 0..rows {
            assert_eq!(mv[i], expected[i]);
        }

        let vm = try_mul(&DynVector::from_vec(row.clone()), &m)?;
        let expected = nalgebra::DVector::from_vec(row).transpose() * &nm;
        assert_eq!(vm.size(), cols);
        for j in 0..cols {
            assert_eq!(vm[j], expected[j]);
        }
    }
    Ok(())
}

#[test]
fn fixed_products_match_nalgebra() {
    let a = Matrix::from_rows([[1.0f64, 2.0, 3.0], [4.0, 5.0, 6.0]]);
    let b = Matrix::from_rows([[7.0f64, 8.0], [9.0, 10.0], [11.0, 12.0]]);
    let na = nalgebra::Matrix2x3::new(1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0);
    let nb = nalgebra::Matrix3x2::new(7.0f64, 8.0, 9.0, 10.0, 11.0, 12.0);

    let product: Mat2<f64> = &a * &b;
    let expected = na * nb;
    for r in 0..2 {
        for c in 0..2 {
            assert_eq!(product[(r, c)], expected[(r, c)]);
        }
    }

    let outer_product = outer(&vec2(1.0f64, 2.0), &vec3(3.0f64, 4.0, 5.0));
    let expected = nalgebra::Vector2::new(1.0f64, 2.0) * nalgebra::Vector3::new(3.0f64, 4.0, 5.0).transpose();
    for r in 0..2 {
        for c in 0..3 {
            assert_eq!(outer_product[(r, c)], expected[(r, c)]);
        }
    }

    let c = cross(&vec3(1.0f64, 2.0, 3.0), &vec3(-2.0f64, 0.5, 4.0));
    let expected = nalgebra::Vector3::new(1.0f64, 2.0, 3.0).cross(&nalgebra::Vector3::new(-2.0f64, 0.5, 4.0));
    assert_eq!(c, [expected.x, expected.y, expected.z]);
}

#[test]
fn hamilton_products_match_nalgebra() {
    let mut rng = fastrand::Rng::with_seed(7);
    for _ in 0..100 {
        let a = random_elems(&mut rng, 4);
        let b = random_elems(&mut rng, 4);

        let qa = Quat::new(a[0], a[1], a[2], a[3]);
        let qb = Quat::<f64, RealFirst>::from_xyzw(b[0], b[1], b[2], b[3]);
        let product = &qa * &qb;

        let na = nalgebra::Quaternion::new(a[3], a[0], a[1], a[2]);
        let nb = nalgebra::Quaternion::new(b[3], b[0], b[1], b[2]);
        let expected = na * nb;
        assert_eq!(product.imaginary(), [expected.i, expected.j, expected.k]);
        assert_eq!(product.real(), expected.w);
    }
}
