use std::{fmt, marker::PhantomData};

use crate::{
    assign::Writable,
    dim::{Dim, SameDim},
    error::{Result, SizeError},
    expr::{Expr, IntoExpr, MatrixXpr, Transpose, UnaryOp},
    layout::{ColMajor, Layout, RowMajor},
    op,
    shape::MatrixShape,
    storage::{DynMatrixStorage, ExternalMatrixStorage, MatrixStorage, MatrixStorageMut, StorageKind},
    traits::{Scalar, Zero},
};

mod ops;

/// A matrix with fixed-size, inline storage.
pub type FixedMatrix<E, const R: usize, const C: usize, L = RowMajor> = Matrix<[[E; C]; R], L>;
/// A matrix with heap storage whose dimensions are only known at runtime.
pub type DynMatrix<E, L = RowMajor> = Matrix<DynMatrixStorage<E>, L>;
/// A matrix backed by a caller-owned buffer.
pub type ExternalMatrix<'a, E, L = RowMajor> = Matrix<ExternalMatrixStorage<'a, E>, L>;

/// A 2x2 matrix.
pub type Mat2<E, L = RowMajor> = Matrix<[[E; 2]; 2], L>;
/// A 3x3 matrix.
pub type Mat3<E, L = RowMajor> = Matrix<[[E; 3]; 3], L>;
/// A 4x4 matrix.
pub type Mat4<E, L = RowMajor> = Matrix<[[E; 4]; 4], L>;

/// A matrix with elements stored in `S`, laid out in memory according to `L`.
///
/// Like [`Vector`](crate::Vector), the storage type decides whether the dimensions are part of
/// the type ([`FixedMatrix`]), resizable at runtime ([`DynMatrix`]) or borrowed from the caller
/// ([`ExternalMatrix`]). The layout tag ([`RowMajor`] or [`ColMajor`]) only changes where
/// elements live in memory; indexing and all arithmetic are by logical `(row, col)` position.
///
/// # Construction
///
/// - [`Matrix::from_rows`] (row-major) and [`Matrix::from_cols`] (column-major) take nested
///   arrays of elements.
/// - [`Matrix::from_fn`] creates each element by invoking a closure with its row and column.
/// - [`Matrix::zeros`] and [`Matrix::identity`] create common matrices.
/// - [`DynMatrix::from_row_slice`] copies elements from a slice.
/// - [`ExternalMatrix::external`] wraps a caller-owned buffer.
///
/// # Element Access
///
/// [`Matrix`] implements [`Index`] and [`IndexMut`] for `(row, col)` tuples, matching common
/// mathematical notation. Indices are 0-based.
///
/// ```
/// # use lazy_linalg::*;
/// let mut mat = Matrix::from_rows([
///     [0, 1]
/// ]);
/// mat[(0, 0)] = 4;
/// assert_eq!(mat[(0, 0)], 4);
/// assert_eq!(mat[(0, 1)], 1);
/// assert_eq!(mat.get(0, 2), None);
/// ```
///
/// # Arithmetic
///
/// `+` and `-` between matrices, and `*` and `/` by a scalar, build lazy [`MatrixXpr`]s. `*`
/// between a matrix and a matrix or vector is the matrix product, which is evaluated
/// immediately (see [`mul`](crate::mul)).
///
/// [`Index`]: std::ops::Index
/// [`IndexMut`]: std::ops::IndexMut
#[derive(Clone, Copy, Default)]
#[repr(transparent)]
pub struct Matrix<S, L = RowMajor> {
    storage: S,
    layout: PhantomData<L>,
}

#[rustfmt::skip]
unsafe impl<E: bytemuck::Zeroable, L: Layout, const R: usize, const C: usize> bytemuck::Zeroable for Matrix<[[E; C]; R], L> {}
unsafe impl<E: bytemuck::Pod, L: Layout, const R: usize, const C: usize> bytemuck::Pod
    for Matrix<[[E; C]; R], L>
{
}

impl<S> Matrix<S, RowMajor> {
    /// Wraps a storage value holding elements in row-major order.
    #[inline]
    pub const fn new(storage: S) -> Self {
        Self::with_layout(storage)
    }
}

impl<S, L> Matrix<S, L> {
    /// Wraps a storage value holding elements in the order given by `L`.
    #[inline]
    pub const fn with_layout(storage: S) -> Self {
        Self {
            storage,
            layout: PhantomData,
        }
    }

    #[inline]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    #[inline]
    pub fn into_storage(self) -> S {
        self.storage
    }
}

impl<E: Scalar, const R: usize, const C: usize> Matrix<[[E; C]; R], RowMajor> {
    /// Creates a row-major [`Matrix`] from an array of rows.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lazy_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// assert_eq!((mat.rows(), mat.cols()), (2, 3));
    /// assert_eq!(mat[(1, 0)], 3);
    /// ```
    #[inline]
    pub const fn from_rows(rows: [[E; C]; R]) -> Self {
        Self::with_layout(rows)
    }
}

impl<E: Scalar, const R: usize, const C: usize> Matrix<[[E; C]; R], ColMajor> {
    /// Creates a column-major [`Matrix`] from an array of columns.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lazy_linalg::*;
    /// let rows = Matrix::from_rows([
    ///     [0, 1],
    ///     [2, 3],
    /// ]);
    /// let cols = Matrix::from_cols([
    ///     [0, 2],
    ///     [1, 3],
    /// ]);
    /// assert_eq!(rows, cols);
    /// assert_eq!(cols.as_slice(), &[0, 2, 1, 3]);
    /// ```
    pub fn from_cols(cols: [[E; R]; C]) -> Self {
        Self::from_fn(|row, col| cols[col][row])
    }
}

impl<E: Scalar, L: Layout, const R: usize, const C: usize> Matrix<[[E; C]; R], L> {
    /// A matrix with every element set to zero.
    #[inline]
    pub fn zeros() -> Self {
        Self::with_layout([[E::ZERO; C]; R])
    }

    /// Creates a [`Matrix`] by invoking a closure with the position (row and column) of each
    /// element.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lazy_linalg::*;
    /// let mat = FixedMatrix::<_, 2, 3>::from_fn(|row, col| (row * 10 + col) as i32);
    /// assert_eq!(mat, Matrix::from_rows([
    ///     [ 0,  1,  2],
    ///     [10, 11, 12],
    /// ]));
    /// ```
    pub fn from_fn<F>(mut cb: F) -> Self
    where
        F: FnMut(usize, usize) -> E,
    {
        let mut this = Self::zeros();
        for row in 0..R {
            for col in 0..C {
                this.storage.as_flattened_mut()[L::offset(row, col, R, C)] = cb(row, col);
            }
        }
        this
    }

    /// A matrix with 1 on its diagonal and 0 everywhere else.
    ///
    /// ```
    /// # use lazy_linalg::*;
    /// let id = Mat2::<i32>::identity();
    /// assert_eq!(id, Matrix::from_rows([[1, 0], [0, 1]]));
    /// ```
    pub fn identity() -> Self {
        Self::from_fn(|row, col| if row == col { E::ONE } else { E::ZERO })
    }
}

impl<E: Scalar, L: Layout> Matrix<DynMatrixStorage<E>, L> {
    /// Creates a `rows`x`cols` matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::with_layout(DynMatrixStorage::zeros(rows, cols))
    }

    /// Creates a `rows`x`cols` matrix by invoking a closure with the position of each element.
    pub fn from_fn<F>(rows: usize, cols: usize, mut cb: F) -> Self
    where
        F: FnMut(usize, usize) -> E,
    {
        let mut this = Self::zeros(rows, cols);
        for row in 0..rows {
            for col in 0..cols {
                this[(row, col)] = cb(row, col);
            }
        }
        this
    }

    /// Creates an `n`x`n` identity matrix.
    pub fn identity(n: usize) -> Self {
        Self::from_fn(n, n, |row, col| if row == col { E::ONE } else { E::ZERO })
    }

    /// Creates a `rows`x`cols` matrix from elements listed row by row.
    ///
    /// The result is stored according to `L`, whatever the order of `elems`.
    ///
    /// # Errors
    ///
    /// Returns [`SizeError::BufferSize`] if `elems` does not hold exactly `rows * cols`
    /// elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lazy_linalg::*;
    /// let m = DynMatrix::<i32, ColMajor>::from_row_slice(2, 2, &[1, 2, 3, 4])?;
    /// assert_eq!(m[(0, 1)], 2);
    /// assert_eq!(m.as_slice(), &[1, 3, 2, 4]);
    ///
    /// assert!(DynMatrix::<i32>::from_row_slice(2, 2, &[1, 2, 3]).is_err());
    /// # Ok::<(), SizeError>(())
    /// ```
    pub fn from_row_slice(rows: usize, cols: usize, elems: &[E]) -> Result<Self> {
        if elems.len() != rows * cols {
            return Err(SizeError::BufferSize {
                expected: rows * cols,
                actual: elems.len(),
            });
        }
        Ok(Self::from_fn(rows, cols, |row, col| elems[row * cols + col]))
    }

    /// Takes ownership of `data`, which holds `rows * cols` elements in the order given by `L`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<E>) -> Result<Self> {
        DynMatrixStorage::from_vec(rows, cols, data).map(Self::with_layout)
    }

    /// Changes the dimensions of this matrix. Every element is reset to zero.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.storage = DynMatrixStorage::zeros(rows, cols);
    }

    /// Returns the elements in storage order.
    pub fn into_vec(self) -> Vec<E> {
        self.storage.into_vec()
    }
}

impl<'a, E: Scalar, L: Layout> Matrix<ExternalMatrixStorage<'a, E>, L> {
    /// Uses `buf` as the storage of a `rows`x`cols` matrix, in the order given by `L`.
    ///
    /// # Errors
    ///
    /// Returns [`SizeError::BufferSize`] if `buf` does not hold exactly `rows * cols` elements.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lazy_linalg::*;
    /// let mut buf = [0; 4];
    /// let mut m = ExternalMatrix::<i32>::external(&mut buf, 2, 2)?;
    /// m.assign(Matrix::from_rows([[1, 2], [3, 4]]).transpose());
    /// assert_eq!(buf, [1, 3, 2, 4]);
    /// # Ok::<(), SizeError>(())
    /// ```
    pub fn external(buf: &'a mut [E], rows: usize, cols: usize) -> Result<Self> {
        ExternalMatrixStorage::new(buf, rows, cols).map(Self::with_layout)
    }
}

impl<S: MatrixStorage, L: Layout> Matrix<S, L> {
    /// The row count, if it is part of the type.
    pub const FIXED_ROWS: Option<usize> = <S::Rows as Dim>::FIXED;
    /// The column count, if it is part of the type.
    pub const FIXED_COLS: Option<usize> = <S::Cols as Dim>::FIXED;
    /// The storage category of this matrix type.
    pub const KIND: StorageKind = S::KIND;

    #[inline]
    pub fn rows(&self) -> usize {
        self.storage.rows().value()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.storage.cols().value()
    }

    /// Returns the elements in storage order (see [`Layout`]).
    #[inline]
    pub fn as_slice(&self) -> &[S::Elem] {
        self.storage.as_slice()
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> Option<usize> {
        let (rows, cols) = (self.rows(), self.cols());
        (row < rows && col < cols).then(|| L::offset(row, col, rows, cols))
    }

    #[track_caller]
    fn offset_or_panic(&self, row: usize, col: usize) -> usize {
        match self.offset(row, col) {
            Some(offset) => offset,
            None => panic!(
                "index ({row}, {col}) is out of bounds for a {}x{} matrix",
                self.rows(),
                self.cols()
            ),
        }
    }

    /// Returns the element at `(row, col)`, or [`None`] if out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<S::Elem> {
        self.offset(row, col).map(|i| self.storage.as_slice()[i])
    }

    /// Returns a lazy expression that swaps the rows and columns of this matrix.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lazy_linalg::*;
    /// let mat = Matrix::from_rows([
    ///     [0, 1, 2],
    ///     [3, 4, 5],
    /// ]);
    /// assert_eq!(mat.transpose().eval(), Matrix::from_rows([
    ///     [0, 3],
    ///     [1, 4],
    ///     [2, 5],
    /// ]));
    /// ```
    pub fn transpose(&self) -> MatrixXpr<Transpose<&Self>> {
        MatrixXpr::new(Transpose::new(self))
    }

    /// Returns the *trace* of the matrix (the sum of all elements on the diagonal).
    ///
    /// Non-square fixed-size matrices are rejected at compile time.
    ///
    /// # Errors
    ///
    /// Returns [`SizeError::NotSquare`] if a dynamic dimension makes the matrix non-square.
    pub fn try_trace(&self) -> Result<S::Elem>
    where
        S::Rows: SameDim<S::Cols>,
    {
        let (rows, cols) = (self.storage.rows(), self.storage.cols());
        if rows.same(cols).is_none() {
            let err = SizeError::NotSquare {
                rows: rows.value(),
                cols: cols.value(),
            };
            log::debug!("trace of non-square matrix: {err}");
            return Err(err);
        }
        Ok((0..rows.value()).fold(<S::Elem>::ZERO, |acc, i| acc + self[(i, i)]))
    }

    /// Returns the *trace* of the matrix (the sum of all elements on the diagonal).
    ///
    /// # Panics
    ///
    /// Panics where [`Matrix::try_trace`] would return an error.
    ///
    /// # Examples
    ///
    /// ```
    /// # use lazy_linalg::*;
    /// let m = Matrix::from_rows([[1, 2], [3, 4]]);
    /// assert_eq!(m.trace(), 5);
    /// assert_eq!(DynMatrix::<f64>::identity(3).trace(), 3.0);
    /// ```
    ///
    /// ```compile_fail
    /// # use lazy_linalg::*;
    /// let m = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
    /// m.trace();
    /// ```
    #[track_caller]
    pub fn trace(&self) -> S::Elem
    where
        S::Rows: SameDim<S::Cols>,
    {
        match self.try_trace() {
            Ok(trace) => trace,
            Err(err) => panic!("{err}"),
        }
    }

    /// Unary plus. Returns an expression with the same elements as `self`.
    pub fn pos(&self) -> MatrixXpr<UnaryOp<op::Pos, &Self>> {
        MatrixXpr::new(UnaryOp::new(op::Pos, self))
    }
}

impl<S: MatrixStorageMut, L: Layout> Matrix<S, L> {
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [S::Elem] {
        self.storage.as_mut_slice()
    }

    /// Returns a mutable reference to the element at `(row, col)`, or [`None`] if out of bounds.
    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut S::Elem> {
        self.offset(row, col)
            .map(|i| &mut self.storage.as_mut_slice()[i])
    }
}

impl<S: MatrixStorage, L: Layout> std::ops::Index<(usize, usize)> for Matrix<S, L> {
    type Output = S::Elem;

    #[inline]
    #[track_caller]
    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        &self.storage.as_slice()[self.offset_or_panic(row, col)]
    }
}

impl<S: MatrixStorageMut, L: Layout> std::ops::IndexMut<(usize, usize)> for Matrix<S, L> {
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut Self::Output {
        let offset = self.offset_or_panic(row, col);
        &mut self.storage.as_mut_slice()[offset]
    }
}

impl<S: MatrixStorage, L: Layout> Expr for Matrix<S, L> {
    type Elem = S::Elem;
    type Shape = MatrixShape<S::Rows, S::Cols, L>;

    #[inline]
    fn shape(&self) -> Self::Shape {
        MatrixShape::new(self.storage.rows(), self.storage.cols())
    }

    #[inline]
    fn at(&self, (row, col): (usize, usize)) -> S::Elem {
        self.storage.as_slice()[L::offset(row, col, self.rows(), self.cols())]
    }
}

impl<S: MatrixStorage, L: Layout> IntoExpr for Matrix<S, L> {
    type Node = Self;

    #[inline]
    fn into_expr(self) -> Self {
        self
    }
}

impl<'a, S: MatrixStorage, L: Layout> IntoExpr for &'a Matrix<S, L> {
    type Node = Self;

    #[inline]
    fn into_expr(self) -> Self {
        self
    }
}

impl<S: MatrixStorageMut, L: Layout> Writable for Matrix<S, L> {
    #[inline]
    fn fit(&mut self, (rows, cols): (usize, usize)) -> Result<()> {
        self.storage.fit(rows, cols)
    }

    #[inline]
    fn set(&mut self, (row, col): (usize, usize), value: S::Elem) {
        let offset = L::offset(row, col, self.rows(), self.cols());
        self.storage.as_mut_slice()[offset] = value;
    }
}

impl<E, L, const R: usize, const C: usize> From<Matrix<[[E; C]; R], L>> for [[E; C]; R] {
    #[inline]
    fn from(value: Matrix<[[E; C]; R], L>) -> Self {
        value.storage
    }
}

impl<S: MatrixStorage, L: Layout> fmt::Debug for Matrix<S, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct FormatRow<'a, S, L>(&'a Matrix<S, L>, usize);

        impl<'a, S: MatrixStorage, L: Layout> fmt::Debug for FormatRow<'a, S, L> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "[")?;
                for col in 0..self.0.cols() {
                    if col != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}", self.0[(self.1, col)])?;
                }
                write!(f, "]")
            }
        }

        let mut list = f.debug_list();
        for row in 0..self.rows() {
            list.entry(&FormatRow(self, row));
        }
        list.finish()
    }
}

impl<S: MatrixStorage, L: Layout> fmt::Display for Matrix<S, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use itertools::Itertools;

        let rows = (0..self.rows())
            .map(|row| (0..self.cols()).map(move |col| self[(row, col)]).format(", "));
        write!(f, "[{}]", rows.format("; "))
    }
}

#[cfg(test)]
mod tests {
    use crate::*;

    #[test]
    fn layouts_agree_logically() {
        let rows = Matrix::from_rows([[1, 2, 3], [4, 5, 6]]);
        let cols = Matrix::from_cols([[1, 4], [2, 5], [3, 6]]);
        assert_eq!(rows, cols);
        assert_eq!(rows.as_slice(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(cols.as_slice(), &[1, 4, 2, 5, 3, 6]);
        assert_eq!(cols[(1, 2)], 6);
    }

    #[test]
    fn storage_kinds() {
        assert_eq!(Mat3::<f32>::KIND, StorageKind::Fixed);
        assert_eq!(Mat3::<f32>::FIXED_ROWS, Some(3));
        assert_eq!(DynMatrix::<f32>::KIND, StorageKind::Dynamic);
        assert_eq!(DynMatrix::<f32>::FIXED_COLS, None);
        assert_eq!(ExternalMatrix::<f32>::KIND, StorageKind::External);
    }

    #[test]
    fn fmt() {
        let mat = Matrix::from_rows([[0, 1], [2, 3]]);

        // Natural writing order (row-wise) for debug output.
        assert_eq!(format!("{:?}", mat), "[[0, 1], [2, 3]]");
        assert_eq!(
            format!("{:#?}", mat),
            "
[
    [0, 1],
    [2, 3],
]
"
            .trim()
        );
        assert_eq!(mat.to_string(), "[0, 1; 2, 3]");

        let cm = Matrix::from_cols([[0, 2], [1, 3]]);
        assert_eq!(format!("{:?}", cm), "[[0, 1], [2, 3]]");
    }

    #[test]
    fn dynamic_construction() {
        let m = DynMatrix::<i32>::from_fn(2, 3, |r, c| (r * 3 + c) as i32);
        assert_eq!((m.rows(), m.cols()), (2, 3));
        assert_eq!(m, Matrix::from_rows([[0, 1, 2], [3, 4, 5]]));
        assert_eq!(DynMatrix::<i32>::identity(2), Mat2::<i32>::identity());

        let err = DynMatrix::<i32>::from_vec(2, 2, vec![1]).unwrap_err();
        assert_eq!(
            err,
            SizeError::BufferSize {
                expected: 4,
                actual: 1
            }
        );
    }

    #[test]
    fn resize_clears() {
        let mut m = DynMatrix::<i32>::identity(2);
        m.resize(1, 3);
        assert_eq!((m.rows(), m.cols()), (1, 3));
        assert_eq!(m.as_slice(), &[0, 0, 0]);
    }

    #[test]
    fn trace() {
        assert_eq!(Mat3::<i32>::identity().trace(), 3);
        let m = DynMatrix::<i32>::zeros(2, 3);
        assert_eq!(
            m.try_trace(),
            Err(SizeError::NotSquare { rows: 2, cols: 3 })
        );
    }

    #[test]
    #[should_panic(expected = "expected a square matrix, got 2x3")]
    fn trace_panics_on_non_square() {
        DynMatrix::<f32>::zeros(2, 3).trace();
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn index_out_of_bounds() {
        let m = Matrix::from_rows([[1, 2], [3, 4]]);
        let _elem = m[(0, 2)];
    }

    #[test]
    fn get_mut() {
        let mut mat = Matrix::from_rows([[0, 1, 2], [3, 4, 5]]);
        if let Some(elem) = mat.get_mut(1, 0) {
            *elem = 999;
        }
        assert!(mat.get_mut(2, 0).is_none());
        assert_eq!(mat, Matrix::from_rows([[0, 1, 2], [999, 4, 5]]));
    }

    #[test]
    fn external_fixed_storage() {
        let mut arr = [[0.0; 2]; 2];
        let mut m = Matrix::new(&mut arr);
        m.assign(Mat2::<f64>::identity() * 2.0f64);
        assert_eq!(arr, [[2.0, 0.0], [0.0, 2.0]]);
    }

    #[test]
    fn bytemuck_cast() {
        let m = Matrix::from_rows([[1.0f32, 2.0], [3.0, 4.0]]);
        let flat: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&m));
        assert_eq!(flat, &[1.0, 2.0, 3.0, 4.0]);
    }
}
