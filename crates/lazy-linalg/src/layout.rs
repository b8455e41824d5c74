//! Memory layout tags for matrices and component order tags for quaternions.
//!
//! Tags only affect where elements live in memory. Expressions always address elements
//! logically (`(row, col)` for matrices, `x, y, z, w` for quaternions), so operands with
//! different tags can be freely combined. The result's tag is chosen by [`PromoteLayout`] and
//! [`PromoteOrder`]: identical tags pass through, mixed tags fall back to the default
//! ([`RowMajor`] and [`ImaginaryFirst`]).

use std::fmt;

/// Maps a logical `(row, col)` position to an offset into a flat buffer.
pub trait Layout: Copy + Default + fmt::Debug + 'static {
    fn offset(row: usize, col: usize, rows: usize, cols: usize) -> usize;
}

/// Rows are stored contiguously.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RowMajor;

/// Columns are stored contiguously.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ColMajor;

impl Layout for RowMajor {
    #[inline]
    fn offset(row: usize, col: usize, _rows: usize, cols: usize) -> usize {
        row * cols + col
    }
}

impl Layout for ColMajor {
    #[inline]
    fn offset(row: usize, col: usize, rows: usize, _cols: usize) -> usize {
        col * rows + row
    }
}

/// Layout of the result of combining a `Self`-layout operand with an `Rhs`-layout operand.
pub trait PromoteLayout<Rhs: Layout>: Layout {
    type Output: Layout;
}

impl PromoteLayout<RowMajor> for RowMajor {
    type Output = RowMajor;
}
impl PromoteLayout<ColMajor> for ColMajor {
    type Output = ColMajor;
}
impl PromoteLayout<ColMajor> for RowMajor {
    type Output = RowMajor;
}
impl PromoteLayout<RowMajor> for ColMajor {
    type Output = RowMajor;
}

/// Maps a logical quaternion component (`0..4` for `x, y, z, w`) to its storage slot.
pub trait Order: Copy + Default + fmt::Debug + 'static {
    fn offset(component: usize) -> usize;
}

/// Stored as `[x, y, z, w]`: imaginary part first, real part last.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ImaginaryFirst;

/// Stored as `[w, x, y, z]`: real part first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct RealFirst;

impl Order for ImaginaryFirst {
    #[inline]
    fn offset(component: usize) -> usize {
        component
    }
}

impl Order for RealFirst {
    #[inline]
    fn offset(component: usize) -> usize {
        (component + 1) % 4
    }
}

/// Component order of the result of combining quaternions with orders `Self` and `Rhs`.
pub trait PromoteOrder<Rhs: Order>: Order {
    type Output: Order;
}

impl PromoteOrder<ImaginaryFirst> for ImaginaryFirst {
    type Output = ImaginaryFirst;
}
impl PromoteOrder<RealFirst> for RealFirst {
    type Output = RealFirst;
}
impl PromoteOrder<RealFirst> for ImaginaryFirst {
    type Output = ImaginaryFirst;
}
impl PromoteOrder<ImaginaryFirst> for RealFirst {
    type Output = ImaginaryFirst;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets() {
        // 2x3 matrix
        assert_eq!(RowMajor::offset(1, 2, 2, 3), 5);
        assert_eq!(ColMajor::offset(1, 2, 2, 3), 5);
        assert_eq!(RowMajor::offset(1, 0, 2, 3), 3);
        assert_eq!(ColMajor::offset(1, 0, 2, 3), 1);
    }

    #[test]
    fn quaternion_slots() {
        assert_eq!((0..4).map(ImaginaryFirst::offset).collect::<Vec<_>>(), [0, 1, 2, 3]);
        assert_eq!((0..4).map(RealFirst::offset).collect::<Vec<_>>(), [1, 2, 3, 0]);
    }
}
