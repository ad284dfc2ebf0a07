//! Tests for matrix and vector views: window bounds, shared strides, writes through
//! mutable windows and owning copies.

use densela::{LinalgError, Matrix, MatrixView, Orientation, Vector, VectorView};

fn numbered(rows: usize, cols: usize) -> Matrix<i32> {
    Matrix::from_fn(rows, cols, |i, j| (i * cols + j) as i32).unwrap()
}

/// Test that a window keeps the parent's row stride and reads the right elements.
#[test]
fn window_shares_parent_stride() {
    let a = numbered(4, 5);
    let w = a.view(1, 2, 2, 3).unwrap();
    assert_eq!((w.row_count(), w.column_count(), w.stride()), (2, 3, 5));
    assert_eq!(w.row(0), &[7, 8, 9]);
    assert_eq!(w.row(1), &[12, 13, 14]);
    assert_eq!(w[(1, 0)], 12);
    assert_eq!(w.at(0, 2).unwrap(), 9);
    assert!(matches!(w.at(2, 0), Err(LinalgError::OutOfRange(_))));
    assert!(matches!(w.row_span(2), Err(LinalgError::OutOfRange(_))));

    let inner = w.view(1, 1, 1, 2).unwrap();
    assert_eq!(inner.row(0), &[13, 14]);
    assert_eq!(inner.to_matrix().data(), &[13, 14]);
}

/// Test the error kinds for windows that are empty or fall outside the matrix.
#[test]
fn invalid_windows() {
    let mut a = numbered(3, 3);
    assert!(matches!(a.view(0, 0, 0, 2), Err(LinalgError::InvalidArgument(_))));
    assert!(matches!(a.view(2, 0, 2, 1), Err(LinalgError::OutOfRange(_))));
    assert!(matches!(a.view_mut(0, 1, 1, 3), Err(LinalgError::OutOfRange(_))));
    assert!(matches!(a.view_mut(1, 1, 2, 0), Err(LinalgError::InvalidArgument(_))));
}

/// Test that writes through a mutable window land in the parent and nowhere else.
#[test]
fn mutable_window_writes_through() {
    let mut a = Matrix::<f64>::new(4, 4).unwrap();
    {
        let mut w = a.view_mut(1, 1, 2, 2).unwrap();
        w.fill(1.0);
        w[(0, 1)] = 5.0;
        *w.at_mut(1, 0).unwrap() = -2.0;
        assert!(w.at_mut(2, 0).is_err());
    }
    assert_eq!(a.row(0), &[0.0, 0.0, 0.0, 0.0]);
    assert_eq!(a.row(1), &[0.0, 1.0, 5.0, 0.0]);
    assert_eq!(a.row(2), &[0.0, -2.0, 1.0, 0.0]);
    assert_eq!(a.row(3), &[0.0, 0.0, 0.0, 0.0]);
}

/// Test views built directly from slices with a stride wider than the row.
#[test]
fn raw_strided_matrix_view() {
    let buf = [1, 2, 0, 3, 4, 0, 5, 6];
    let v = MatrixView::new(&buf, 3, 2, 3).unwrap();
    assert_eq!(v.to_matrix(), Matrix::from_rows(&[[1, 2], [3, 4], [5, 6]]).unwrap());
    assert!(matches!(MatrixView::new(&buf, 3, 3, 2), Err(LinalgError::InvalidConstruction(_))));
    assert!(matches!(MatrixView::new(&buf, 4, 2, 3), Err(LinalgError::InvalidConstruction(_))));
}

/// Test strided vector views over a vector and their owning copies.
#[test]
fn strided_vector_views() {
    let v = Vector::from_vec((0..10).collect::<Vec<i64>>(), Orientation::Column).unwrap();
    let evens = v.view_strided(0, 5, 2).unwrap();
    assert_eq!((evens.len(), evens.increment()), (5, 2));
    assert_eq!(evens.iter().collect::<Vec<_>>(), vec![0, 2, 4, 6, 8]);
    let odds = v.view_strided(1, 5, 2).unwrap().to_vector(Orientation::Row);
    assert_eq!(odds.data(), &[1, 3, 5, 7, 9]);
    assert_eq!(odds.orientation(), Orientation::Row);
    assert!(matches!(v.view_strided(1, 6, 2), Err(LinalgError::OutOfRange(_))));
    assert!(matches!(v.view_strided(11, 1, 1), Err(LinalgError::OutOfRange(_))));

    let buf = [1.0, -1.0, 2.0, -1.0, 3.0];
    let raw = VectorView::new(&buf, 3, 2).unwrap();
    assert_eq!(raw.to_vector(Orientation::Column).data(), &[1.0, 2.0, 3.0]);
}

/// Test writes through a mutable vector view.
#[test]
fn vector_view_mut_writes_through() {
    let mut v = Vector::<u32>::new(4, Orientation::Row).unwrap();
    {
        let mut w = v.view_mut();
        w[1] = 7;
        *w.at_mut(3).unwrap() = 9;
        assert!(w.at_mut(4).is_err());
    }
    assert_eq!(v.data(), &[0, 7, 0, 9]);
}
