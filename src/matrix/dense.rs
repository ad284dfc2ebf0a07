//! Owning row-major dense matrix.
//!
//! This module provides the `Matrix` type: a `rows × cols` grid stored contiguously in
//! row-major order. Constructors validate shapes up front; element access comes in a
//! bounds-checked flavour (`at`, returning [`LinalgError::OutOfRange`]) and an indexing
//! flavour (`m[(i, j)]`, panicking on misuse). Sub-blocks are borrowed through
//! [`MatrixView`] / [`MatrixViewMut`].

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::config::parallel_options;
use crate::core::{MatShape, MatrixGet, Scalar};
use crate::error::LinalgError;
use crate::matrix::view::{sub_window, MatrixView, MatrixViewMut};
use crate::parallel::{self, Workload};

/// Dense row-major matrix owning its elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

fn check_dims(rows: usize, cols: usize) -> Result<(), LinalgError> {
    if rows == 0 || cols == 0 {
        return Err(LinalgError::InvalidConstruction(format!(
            "matrix dimensions must be positive, got {rows}x{cols}"
        )));
    }
    Ok(())
}

impl<T: Scalar> Matrix<T> {
    /// Zero-filled `rows × cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Result<Self, LinalgError> {
        check_dims(rows, cols)?;
        Ok(Self { rows, cols, data: vec![T::zero(); rows * cols] })
    }

    /// Copy of a row-major slice holding exactly `rows * cols` elements.
    pub fn from_slice(rows: usize, cols: usize, data: &[T]) -> Result<Self, LinalgError> {
        check_dims(rows, cols)?;
        if data.len() != rows * cols {
            return Err(LinalgError::InvalidConstruction(format!(
                "{rows}x{cols} matrix needs {} elements, source has {}",
                rows * cols,
                data.len()
            )));
        }
        Ok(Self { rows, cols, data: data.to_vec() })
    }

    /// Takes ownership of a row-major buffer without copying.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, LinalgError> {
        check_dims(rows, cols)?;
        if data.len() != rows * cols {
            return Err(LinalgError::InvalidConstruction(format!(
                "{rows}x{cols} matrix needs {} elements, source has {}",
                rows * cols,
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Copy of a sequence of equally long rows.
    pub fn from_rows<R: AsRef<[T]>>(rows: &[R]) -> Result<Self, LinalgError> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        check_dims(rows.len(), cols)?;
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(LinalgError::InvalidConstruction(format!(
                    "row {i} has {} elements, expected {cols}",
                    row.len()
                )));
            }
            data.extend_from_slice(row);
        }
        Ok(Self { rows: rows.len(), cols, data })
    }

    /// Copy of a fixed-size nested array, e.g. `Matrix::from_nested([[1, 2], [3, 4]])`.
    pub fn from_nested<const R: usize, const C: usize>(rows: [[T; C]; R]) -> Result<Self, LinalgError> {
        check_dims(R, C)?;
        Ok(Self { rows: R, cols: C, data: rows.iter().flatten().copied().collect() })
    }

    /// Copy of a flat row-major array of `rows * cols` elements.
    pub fn from_array<const N: usize>(rows: usize, cols: usize, data: [T; N]) -> Result<Self, LinalgError> {
        Self::from_slice(rows, cols, &data)
    }

    /// Matrix whose element (i, j) is `f(i, j)`.
    pub fn from_fn<F: FnMut(usize, usize) -> T>(rows: usize, cols: usize, mut f: F) -> Result<Self, LinalgError> {
        check_dims(rows, cols)?;
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Ok(Self { rows, cols, data })
    }

    /// Assumes `data.len() == rows * cols` with both dimensions positive.
    pub(crate) fn from_parts(rows: usize, cols: usize, data: Vec<T>) -> Self {
        debug_assert!(rows > 0 && cols > 0 && data.len() == rows * cols);
        Self { rows, cols, data }
    }

    /// Element-wise `as` conversion into another scalar type.
    pub fn cast<U: Scalar>(&self) -> Matrix<U> {
        let par = parallel::should_parallelize(self.data.len(), Workload::Linear);
        let data = parallel::collect_indexed(self.data.len(), par, |i| U::from_scalar(self.data[i]));
        Matrix::from_parts(self.rows, self.cols, data)
    }

    pub fn row_count(&self) -> usize {
        self.rows
    }

    pub fn column_count(&self) -> usize {
        self.cols
    }

    /// Total number of elements.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Bounds-checked read.
    pub fn at(&self, row: usize, col: usize) -> Result<T, LinalgError> {
        self.check_index(row, col)?;
        Ok(self.data[row * self.cols + col])
    }

    pub fn at_mut(&mut self, row: usize, col: usize) -> Result<&mut T, LinalgError> {
        self.check_index(row, col)?;
        Ok(&mut self.data[row * self.cols + col])
    }

    fn check_index(&self, row: usize, col: usize) -> Result<(), LinalgError> {
        if row >= self.rows {
            return Err(LinalgError::out_of_range("row", row, self.rows));
        }
        if col >= self.cols {
            return Err(LinalgError::out_of_range("column", col, self.cols));
        }
        Ok(())
    }

    /// Row `i`; panics when `i` is out of range.
    pub fn row(&self, i: usize) -> &[T] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn row_mut(&mut self, i: usize) -> &mut [T] {
        &mut self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Bounds-checked [`row`](Self::row).
    pub fn row_span(&self, i: usize) -> Result<&[T], LinalgError> {
        if i >= self.rows {
            return Err(LinalgError::out_of_range("row", i, self.rows));
        }
        Ok(self.row(i))
    }

    pub fn rows(&self) -> std::slice::Chunks<'_, T> {
        self.data.chunks(self.cols)
    }

    /// `height × width` window at (`row`, `col`) sharing this matrix's row stride.
    pub fn view(&self, row: usize, col: usize, height: usize, width: usize) -> Result<MatrixView<'_, T>, LinalgError> {
        let offset = sub_window((self.rows, self.cols), self.cols, row, col, height, width)?;
        MatrixView::new(&self.data[offset..], height, width, self.cols)
    }

    pub fn view_mut(
        &mut self,
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    ) -> Result<MatrixViewMut<'_, T>, LinalgError> {
        let offset = sub_window((self.rows, self.cols), self.cols, row, col, height, width)?;
        let stride = self.cols;
        MatrixViewMut::new(&mut self.data[offset..], height, width, stride)
    }

    /// View of the whole matrix.
    pub fn view_all(&self) -> MatrixView<'_, T> {
        MatrixView::whole(&self.data, self.rows, self.cols)
    }

    pub fn view_all_mut(&mut self) -> MatrixViewMut<'_, T> {
        let (rows, cols) = (self.rows, self.cols);
        MatrixViewMut::whole(&mut self.data, rows, cols)
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Overwrite with the identity. Only square matrices qualify.
    pub fn make_identity(&mut self) -> Result<(), LinalgError> {
        if self.rows != self.cols {
            return Err(LinalgError::InvalidArgument(format!(
                "identity requires a square matrix, got {}x{}",
                self.rows, self.cols
            )));
        }
        self.data.fill(T::zero());
        for i in 0..self.rows {
            self.data[i * self.cols + i] = T::one();
        }
        Ok(())
    }

    /// Transpose a square matrix in place by swapping tiles across the diagonal.
    pub fn transpose(&mut self) -> Result<(), LinalgError> {
        if self.rows != self.cols {
            return Err(LinalgError::InvalidArgument(format!(
                "in-place transpose requires a square matrix, got {}x{}; use transposed()",
                self.rows, self.cols
            )));
        }
        let n = self.rows;
        let bs = parallel_options().block_size;
        for ib in (0..n).step_by(bs) {
            let i_end = (ib + bs).min(n);
            for jb in (ib..n).step_by(bs) {
                let j_end = (jb + bs).min(n);
                for i in ib..i_end {
                    // Diagonal tiles only swap their strictly upper half.
                    let j_start = if ib == jb { i + 1 } else { jb };
                    for j in j_start..j_end {
                        self.data.swap(i * n + j, j * n + i);
                    }
                }
            }
        }
        Ok(())
    }

    /// New `cols × rows` matrix holding the transpose; works for any shape.
    pub fn transposed(&self) -> Self {
        let (rows, cols) = (self.rows, self.cols);
        let par = parallel::should_parallelize(rows * cols, Workload::Quadratic);
        let data = parallel::collect_indexed(rows * cols, par, |k| {
            let (j, i) = (k / rows, k % rows);
            self.data[i * cols + j]
        });
        Self::from_parts(cols, rows, data)
    }
}

impl<T> Index<(usize, usize)> for Matrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for Matrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.data[row * self.cols + col]
    }
}

impl<T: Scalar> MatShape for Matrix<T> {
    fn row_count(&self) -> usize {
        self.rows
    }
    fn column_count(&self) -> usize {
        self.cols
    }
}

impl<T: Scalar> MatrixGet<T> for Matrix<T> {
    fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }
}

impl<T: Scalar> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            write!(f, "[")?;
            for (j, x) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{x}")?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
