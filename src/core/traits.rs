//! Core linear-algebra traits for densela.

/// Row and column extent of a matrix-like value.
pub trait MatShape {
    fn row_count(&self) -> usize;
    fn column_count(&self) -> usize;

    /// Total number of logical elements.
    fn size(&self) -> usize {
        self.row_count() * self.column_count()
    }

    fn is_square(&self) -> bool {
        self.row_count() == self.column_count()
    }
}

/// Unchecked element read: `get(i, j)` = A[i, j].
pub trait MatrixGet<T> {
    fn get(&self, row: usize, col: usize) -> T;
}
