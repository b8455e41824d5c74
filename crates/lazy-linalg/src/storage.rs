//! Storage backends for vectors and matrices.
//!
//! A container's storage type decides its [`StorageKind`] and whether its dimensions are part of
//! the type. All three kinds can be mixed freely in expressions.

use std::fmt;

use crate::{
    dim::{Const, Dim, Dyn},
    error::{Result, SizeError},
    traits::Scalar,
};

/// The three storage categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// Inline storage with dimensions fixed at compile time.
    Fixed,
    /// Heap storage that is resized by assignment.
    Dynamic,
    /// A caller-owned buffer. Never allocates or resizes.
    External,
}

/// Read access to the elements of a vector.
pub trait VectorStorage {
    type Elem: Scalar;
    type Dim: Dim;

    const KIND: StorageKind;

    fn dim(&self) -> Self::Dim;

    fn as_slice(&self) -> &[Self::Elem];
}

/// Write access to the elements of a vector.
pub trait VectorStorageMut: VectorStorage {
    fn as_mut_slice(&mut self) -> &mut [Self::Elem];

    /// Prepares the storage to hold `len` elements.
    ///
    /// Dynamic storage is resized; fixed and external storage report a [`SizeError`] if `len`
    /// differs from their length, and are left untouched.
    fn fit(&mut self, len: usize) -> Result<()>;
}

fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        let err = SizeError::VectorSize { expected, actual };
        log::debug!("destination size check failed: {err}");
        Err(err)
    }
}

impl<E: Scalar, const N: usize> VectorStorage for [E; N] {
    type Elem = E;
    type Dim = Const<N>;

    const KIND: StorageKind = StorageKind::Fixed;

    #[inline]
    fn dim(&self) -> Const<N> {
        Const
    }

    #[inline]
    fn as_slice(&self) -> &[E] {
        self
    }
}

impl<E: Scalar, const N: usize> VectorStorageMut for [E; N] {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [E] {
        self
    }

    fn fit(&mut self, len: usize) -> Result<()> {
        check_len(N, len)
    }
}

impl<E: Scalar> VectorStorage for Vec<E> {
    type Elem = E;
    type Dim = Dyn;

    const KIND: StorageKind = StorageKind::Dynamic;

    #[inline]
    fn dim(&self) -> Dyn {
        Dyn(self.len())
    }

    #[inline]
    fn as_slice(&self) -> &[E] {
        self
    }
}

impl<E: Scalar> VectorStorageMut for Vec<E> {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [E] {
        self
    }

    fn fit(&mut self, len: usize) -> Result<()> {
        if self.len() != len {
            log::trace!("resizing dynamic vector from {} to {} elements", self.len(), len);
            self.resize(len, E::ZERO);
        }
        Ok(())
    }
}

impl<'a, E: Scalar> VectorStorage for &'a mut [E] {
    type Elem = E;
    type Dim = Dyn;

    const KIND: StorageKind = StorageKind::External;

    #[inline]
    fn dim(&self) -> Dyn {
        Dyn(self.len())
    }

    #[inline]
    fn as_slice(&self) -> &[E] {
        self
    }
}

impl<'a, E: Scalar> VectorStorageMut for &'a mut [E] {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [E] {
        self
    }

    fn fit(&mut self, len: usize) -> Result<()> {
        check_len(self.len(), len)
    }
}

impl<'a, E: Scalar, const N: usize> VectorStorage for &'a mut [E; N] {
    type Elem = E;
    type Dim = Const<N>;

    const KIND: StorageKind = StorageKind::External;

    #[inline]
    fn dim(&self) -> Const<N> {
        Const
    }

    #[inline]
    fn as_slice(&self) -> &[E] {
        &self[..]
    }
}

impl<'a, E: Scalar, const N: usize> VectorStorageMut for &'a mut [E; N] {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [E] {
        &mut self[..]
    }

    fn fit(&mut self, len: usize) -> Result<()> {
        check_len(N, len)
    }
}

impl<'a, E: Scalar> VectorStorage for &'a [E] {
    type Elem = E;
    type Dim = Dyn;

    const KIND: StorageKind = StorageKind::External;

    #[inline]
    fn dim(&self) -> Dyn {
        Dyn(self.len())
    }

    #[inline]
    fn as_slice(&self) -> &[E] {
        self
    }
}

/// Read access to the elements of a matrix.
///
/// The slice returned by [`MatrixStorage::as_slice`] holds `rows * cols` elements. Which element
/// lives at which offset is decided by the matrix's layout tag, not by the storage.
pub trait MatrixStorage {
    type Elem: Scalar;
    type Rows: Dim;
    type Cols: Dim;

    const KIND: StorageKind;

    fn rows(&self) -> Self::Rows;

    fn cols(&self) -> Self::Cols;

    fn as_slice(&self) -> &[Self::Elem];
}

/// Write access to the elements of a matrix.
pub trait MatrixStorageMut: MatrixStorage {
    fn as_mut_slice(&mut self) -> &mut [Self::Elem];

    /// Prepares the storage to hold a `rows`x`cols` matrix.
    ///
    /// Dynamic storage is resized; fixed and external storage report a [`SizeError`] if the
    /// shape differs from theirs, and are left untouched.
    fn fit(&mut self, rows: usize, cols: usize) -> Result<()>;
}

fn check_matrix(expected: (usize, usize), actual: (usize, usize)) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        let err = SizeError::MatrixSize {
            expected_rows: expected.0,
            expected_cols: expected.1,
            actual_rows: actual.0,
            actual_cols: actual.1,
        };
        log::debug!("destination size check failed: {err}");
        Err(err)
    }
}

impl<E: Scalar, const R: usize, const C: usize> MatrixStorage for [[E; C]; R] {
    type Elem = E;
    type Rows = Const<R>;
    type Cols = Const<C>;

    const KIND: StorageKind = StorageKind::Fixed;

    #[inline]
    fn rows(&self) -> Const<R> {
        Const
    }

    #[inline]
    fn cols(&self) -> Const<C> {
        Const
    }

    #[inline]
    fn as_slice(&self) -> &[E] {
        self.as_flattened()
    }
}

impl<E: Scalar, const R: usize, const C: usize> MatrixStorageMut for [[E; C]; R] {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [E] {
        self.as_flattened_mut()
    }

    fn fit(&mut self, rows: usize, cols: usize) -> Result<()> {
        check_matrix((R, C), (rows, cols))
    }
}

impl<'a, E: Scalar, const R: usize, const C: usize> MatrixStorage for &'a mut [[E; C]; R] {
    type Elem = E;
    type Rows = Const<R>;
    type Cols = Const<C>;

    const KIND: StorageKind = StorageKind::External;

    #[inline]
    fn rows(&self) -> Const<R> {
        Const
    }

    #[inline]
    fn cols(&self) -> Const<C> {
        Const
    }

    #[inline]
    fn as_slice(&self) -> &[E] {
        self.as_flattened()
    }
}

impl<'a, E: Scalar, const R: usize, const C: usize> MatrixStorageMut for &'a mut [[E; C]; R] {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [E] {
        self.as_flattened_mut()
    }

    fn fit(&mut self, rows: usize, cols: usize) -> Result<()> {
        check_matrix((R, C), (rows, cols))
    }
}

/// Heap storage for a matrix whose dimensions are only known at runtime.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct DynMatrixStorage<E> {
    data: Vec<E>,
    rows: usize,
    cols: usize,
}

impl<E: Scalar> DynMatrixStorage<E> {
    /// Creates zero-filled storage for a `rows`x`cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![E::ZERO; rows * cols],
            rows,
            cols,
        }
    }

    /// Wraps `data`, which must hold exactly `rows * cols` elements.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<E>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(SizeError::BufferSize {
                expected: rows * cols,
                actual: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    pub fn into_vec(self) -> Vec<E> {
        self.data
    }
}

impl<E: fmt::Debug> fmt::Debug for DynMatrixStorage<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynMatrixStorage")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .field("data", &self.data)
            .finish()
    }
}

impl<E: Scalar> MatrixStorage for DynMatrixStorage<E> {
    type Elem = E;
    type Rows = Dyn;
    type Cols = Dyn;

    const KIND: StorageKind = StorageKind::Dynamic;

    #[inline]
    fn rows(&self) -> Dyn {
        Dyn(self.rows)
    }

    #[inline]
    fn cols(&self) -> Dyn {
        Dyn(self.cols)
    }

    #[inline]
    fn as_slice(&self) -> &[E] {
        &self.data
    }
}

impl<E: Scalar> MatrixStorageMut for DynMatrixStorage<E> {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [E] {
        &mut self.data
    }

    fn fit(&mut self, rows: usize, cols: usize) -> Result<()> {
        if (self.rows, self.cols) != (rows, cols) {
            log::trace!(
                "resizing dynamic matrix from {}x{} to {}x{}",
                self.rows,
                self.cols,
                rows,
                cols
            );
            self.data.clear();
            self.data.resize(rows * cols, E::ZERO);
            self.rows = rows;
            self.cols = cols;
        }
        Ok(())
    }
}

/// A caller-owned buffer viewed as a `rows`x`cols` matrix.
#[derive(Debug)]
pub struct ExternalMatrixStorage<'a, E> {
    data: &'a mut [E],
    rows: usize,
    cols: usize,
}

impl<'a, E: Scalar> ExternalMatrixStorage<'a, E> {
    /// Wraps `data`, which must hold exactly `rows * cols` elements.
    pub fn new(data: &'a mut [E], rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            let err = SizeError::BufferSize {
                expected: rows * cols,
                actual: data.len(),
            };
            log::debug!("cannot wrap external buffer: {err}");
            return Err(err);
        }
        Ok(Self { data, rows, cols })
    }
}

impl<'a, E: Scalar> MatrixStorage for ExternalMatrixStorage<'a, E> {
    type Elem = E;
    type Rows = Dyn;
    type Cols = Dyn;

    const KIND: StorageKind = StorageKind::External;

    #[inline]
    fn rows(&self) -> Dyn {
        Dyn(self.rows)
    }

    #[inline]
    fn cols(&self) -> Dyn {
        Dyn(self.cols)
    }

    #[inline]
    fn as_slice(&self) -> &[E] {
        &*self.data
    }
}

impl<'a, E: Scalar> MatrixStorageMut for ExternalMatrixStorage<'a, E> {
    #[inline]
    fn as_mut_slice(&mut self) -> &mut [E] {
        &mut *self.data
    }

    fn fit(&mut self, rows: usize, cols: usize) -> Result<()> {
        check_matrix((self.rows, self.cols), (rows, cols))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_resizes() {
        let mut v: Vec<f32> = Vec::new();
        v.fit(3).unwrap();
        assert_eq!(v, [0.0; 3]);
        v.fit(1).unwrap();
        assert_eq!(v, [0.0]);
    }

    #[test]
    fn fixed_and_external_check() {
        let mut a = [1, 2, 3];
        assert_eq!(a.fit(3), Ok(()));
        assert_eq!(
            a.fit(4),
            Err(SizeError::VectorSize {
                expected: 3,
                actual: 4
            })
        );
        assert_eq!(a, [1, 2, 3]);

        let mut buf = [0.0f64; 2];
        let mut ext: &mut [f64] = &mut buf;
        assert!(ext.fit(5).is_err());
        assert_eq!(ext.len(), 2);
    }

    #[test]
    fn matrix_storage() {
        let m = [[1, 2, 3], [4, 5, 6]];
        assert_eq!(MatrixStorage::as_slice(&m), &[1, 2, 3, 4, 5, 6]);
        assert_eq!((m.rows(), m.cols()), (Const::<2>, Const::<3>));

        let mut d = DynMatrixStorage::<i32>::zeros(0, 0);
        d.fit(2, 2).unwrap();
        assert_eq!((d.rows(), d.cols()), (Dyn(2), Dyn(2)));
        assert_eq!(d.as_slice().len(), 4);
    }

    #[test]
    fn external_matrix_buffer_length() {
        let mut buf = [0i32; 6];
        assert!(ExternalMatrixStorage::new(&mut buf, 2, 3).is_ok());
        assert_eq!(
            ExternalMatrixStorage::new(&mut buf, 2, 2).unwrap_err(),
            SizeError::BufferSize {
                expected: 4,
                actual: 6
            }
        );
    }
}
