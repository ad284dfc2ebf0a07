//! Row-major windows over a borrowed matrix buffer.
//!
//! A view is `rows × cols` elements whose rows start `stride` elements apart, so a
//! sub-block of a larger matrix keeps the parent's row stride. The borrowed slice is
//! trimmed to `(rows - 1) * stride + cols` elements, which is what lets mutable views
//! be split into disjoint row chunks for the parallel kernels.

use std::ops::{Index, IndexMut};

use crate::core::scalar::same_type_slice;
use crate::core::{MatShape, MatrixGet, Scalar};
use crate::error::LinalgError;
use crate::matrix::Matrix;
use crate::parallel;

fn window_len(rows: usize, cols: usize, stride: usize, available: usize) -> Result<usize, LinalgError> {
    if rows == 0 || cols == 0 {
        return Err(LinalgError::InvalidConstruction(format!(
            "matrix view must have positive extent, got {rows}x{cols}"
        )));
    }
    if stride < cols {
        return Err(LinalgError::InvalidConstruction(format!(
            "row stride {stride} is smaller than the column count {cols}"
        )));
    }
    let needed = (rows - 1) * stride + cols;
    if needed > available {
        return Err(LinalgError::InvalidConstruction(format!(
            "{rows}x{cols} view with stride {stride} needs {needed} elements, buffer has {available}"
        )));
    }
    Ok(needed)
}

/// Offset of the `height × width` window at (`row`, `col`) inside a `rows × cols` parent.
pub(crate) fn sub_window(
    parent: (usize, usize),
    stride: usize,
    row: usize,
    col: usize,
    height: usize,
    width: usize,
) -> Result<usize, LinalgError> {
    let (rows, cols) = parent;
    if height == 0 || width == 0 {
        return Err(LinalgError::InvalidArgument(format!(
            "view extent must be positive, got {height}x{width}"
        )));
    }
    if row + height > rows || col + width > cols {
        return Err(LinalgError::OutOfRange(format!(
            "{height}x{width} view at ({row}, {col}) exceeds {rows}x{cols}"
        )));
    }
    Ok(row * stride + col)
}

/// Read-only matrix view.
#[derive(Debug, Clone, Copy)]
pub struct MatrixView<'a, T> {
    data: &'a [T],
    rows: usize,
    cols: usize,
    stride: usize,
}

impl<'a, T: Scalar> MatrixView<'a, T> {
    /// View `rows × cols` elements of `data` with rows `stride` elements apart.
    pub fn new(data: &'a [T], rows: usize, cols: usize, stride: usize) -> Result<Self, LinalgError> {
        let needed = window_len(rows, cols, stride, data.len())?;
        Ok(Self { data: &data[..needed], rows, cols, stride })
    }

    /// Whole contiguous `rows × cols` buffer of an owning matrix.
    pub(crate) fn whole(data: &'a [T], rows: usize, cols: usize) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { data, rows, cols, stride: cols }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.cols
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Row `i` as a slice; panics when `i` is outside the view.
    pub fn row(&self, i: usize) -> &'a [T] {
        let start = i * self.stride;
        &self.data[start..start + self.cols]
    }

    /// Bounds-checked [`row`](Self::row).
    pub fn row_span(&self, i: usize) -> Result<&'a [T], LinalgError> {
        if i >= self.rows {
            return Err(LinalgError::out_of_range("row", i, self.rows));
        }
        Ok(self.row(i))
    }

    /// Bounds-checked read.
    pub fn at(&self, row: usize, col: usize) -> Result<T, LinalgError> {
        if row >= self.rows {
            return Err(LinalgError::out_of_range("row", row, self.rows));
        }
        if col >= self.cols {
            return Err(LinalgError::out_of_range("column", col, self.cols));
        }
        Ok(self.data[row * self.stride + col])
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> + 'a {
        let cols = self.cols;
        self.data.chunks(self.stride).map(move |r| &r[..cols])
    }

    /// Nested window at (`row`, `col`) sharing this view's stride.
    pub fn view(&self, row: usize, col: usize, height: usize, width: usize) -> Result<MatrixView<'a, T>, LinalgError> {
        let offset = sub_window((self.rows, self.cols), self.stride, row, col, height, width)?;
        MatrixView::new(&self.data[offset..], height, width, self.stride)
    }

    /// Owning copy of the window.
    pub fn to_matrix(&self) -> Matrix<T> {
        let mut data = Vec::with_capacity(self.rows * self.cols);
        self.rows().for_each(|r| data.extend_from_slice(r));
        Matrix::from_parts(self.rows, self.cols, data)
    }

    #[cfg(feature = "accelerate")]
    pub(crate) fn raw(&self) -> &'a [T] {
        self.data
    }

    pub(crate) fn reinterpret<R: Scalar>(&self) -> Option<MatrixView<'a, R>> {
        same_type_slice::<T, R>(self.data).map(|data| MatrixView {
            data,
            rows: self.rows,
            cols: self.cols,
            stride: self.stride,
        })
    }
}

impl<T> Index<(usize, usize)> for MatrixView<'_, T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[row * self.stride + col]
    }
}

impl<T: Scalar> MatShape for MatrixView<'_, T> {
    fn row_count(&self) -> usize {
        self.rows
    }
    fn column_count(&self) -> usize {
        self.cols
    }
}

impl<T: Scalar> MatrixGet<T> for MatrixView<'_, T> {
    fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.stride + col]
    }
}

/// Mutable matrix view.
#[derive(Debug)]
pub struct MatrixViewMut<'a, T> {
    data: &'a mut [T],
    rows: usize,
    cols: usize,
    stride: usize,
}

impl<'a, T: Scalar> MatrixViewMut<'a, T> {
    pub fn new(data: &'a mut [T], rows: usize, cols: usize, stride: usize) -> Result<Self, LinalgError> {
        let needed = window_len(rows, cols, stride, data.len())?;
        Ok(Self { data: &mut data[..needed], rows, cols, stride })
    }

    pub(crate) fn whole(data: &'a mut [T], rows: usize, cols: usize) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { data, rows, cols, stride: cols }
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.cols
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn row(&self, i: usize) -> &[T] {
        let start = i * self.stride;
        &self.data[start..start + self.cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        let start = i * self.stride;
        &mut self.data[start..start + self.cols]
    }

    pub fn row_span(&self, i: usize) -> Result<&[T], LinalgError> {
        if i >= self.rows {
            return Err(LinalgError::out_of_range("row", i, self.rows));
        }
        Ok(self.row(i))
    }

    pub fn at(&self, row: usize, col: usize) -> Result<T, LinalgError> {
        self.as_view().at(row, col)
    }

    pub fn at_mut(&mut self, row: usize, col: usize) -> Result<&mut T, LinalgError> {
        if row >= self.rows {
            return Err(LinalgError::out_of_range("row", row, self.rows));
        }
        if col >= self.cols {
            return Err(LinalgError::out_of_range("column", col, self.cols));
        }
        Ok(&mut self.data[row * self.stride + col])
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [T]> + '_ {
        let cols = self.cols;
        self.data.chunks_mut(self.stride).map(move |r| &mut r[..cols])
    }

    /// Run `f(i, row_i)` over every row, in parallel when `parallel` is set.
    pub(crate) fn for_each_row_mut<F>(&mut self, parallel: bool, f: F)
    where
        F: Fn(usize, &mut [T]) + Sync + Send,
    {
        let cols = self.cols;
        parallel::for_each_chunk_mut(self.data, self.stride, parallel, |i, r| f(i, &mut r[..cols]));
    }

    pub fn fill(&mut self, value: T) {
        self.rows_mut().for_each(|r| r.fill(value));
    }

    /// Read-only reborrow.
    pub fn as_view(&self) -> MatrixView<'_, T> {
        MatrixView { data: &*self.data, rows: self.rows, cols: self.cols, stride: self.stride }
    }

    /// Nested mutable window at (`row`, `col`) sharing this view's stride.
    pub fn view_mut(&mut self, row: usize, col: usize, height: usize, width: usize) -> Result<MatrixViewMut<'_, T>, LinalgError> {
        let offset = sub_window((self.rows, self.cols), self.stride, row, col, height, width)?;
        MatrixViewMut::new(&mut self.data[offset..], height, width, self.stride)
    }

    #[cfg(feature = "accelerate")]
    pub(crate) fn raw_mut(&mut self) -> &mut [T] {
        &mut *self.data
    }
}

impl<T> Index<(usize, usize)> for MatrixViewMut<'_, T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[row * self.stride + col]
    }
}

impl<T> IndexMut<(usize, usize)> for MatrixViewMut<'_, T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.data[row * self.stride + col]
    }
}

impl<T: Scalar> MatShape for MatrixViewMut<'_, T> {
    fn row_count(&self) -> usize {
        self.rows
    }
    fn column_count(&self) -> usize {
        self.cols
    }
}

impl<T: Scalar> MatrixGet<T> for MatrixViewMut<'_, T> {
    fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.stride + col]
    }
}
