//! Strided windows over a borrowed vector buffer.
//!
//! A view borrows the slice it reads from, so the owning [`Vector`] cannot be resized,
//! moved or dropped while the view is alive. The borrowed slice is trimmed to exactly
//! `(len - 1) * inc + 1` elements, which makes unchecked indexing past the logical
//! extent panic instead of silently reading a neighbour.

use std::ops::{Index, IndexMut};

use crate::core::Scalar;
use crate::core::scalar::same_type_slice;
use crate::error::LinalgError;
use crate::vector::{Orientation, Vector};

fn window_len(len: usize, inc: usize, available: usize) -> Result<usize, LinalgError> {
    if len == 0 {
        return Err(LinalgError::InvalidConstruction("vector view must have a positive length".into()));
    }
    if inc == 0 {
        return Err(LinalgError::InvalidConstruction("vector view increment must be positive".into()));
    }
    let needed = (len - 1) * inc + 1;
    if needed > available {
        return Err(LinalgError::InvalidConstruction(format!(
            "vector view of {len} elements with increment {inc} needs {needed} elements, buffer has {available}"
        )));
    }
    Ok(needed)
}

/// Read-only strided vector view.
#[derive(Debug, Clone, Copy)]
pub struct VectorView<'a, T> {
    data: &'a [T],
    len: usize,
    inc: usize,
}

impl<'a, T: Scalar> VectorView<'a, T> {
    /// View `len` elements of `data`, `inc` apart, starting at `data[0]`.
    pub fn new(data: &'a [T], len: usize, inc: usize) -> Result<Self, LinalgError> {
        let needed = window_len(len, inc, data.len())?;
        Ok(Self { data: &data[..needed], len, inc })
    }

    /// Contiguous view over a whole vector buffer.
    pub(crate) fn from_vector(data: &'a [T]) -> Self {
        Self { data, len: data.len(), inc: 1 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn increment(&self) -> usize {
        self.inc
    }

    /// Bounds-checked read.
    pub fn at(&self, i: usize) -> Result<T, LinalgError> {
        if i >= self.len {
            return Err(LinalgError::out_of_range("vector view index", i, self.len));
        }
        Ok(self.data[i * self.inc])
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + 'a {
        self.data.iter().step_by(self.inc).copied()
    }

    /// The logical elements as a plain slice, when they are contiguous.
    pub fn as_contiguous(&self) -> Option<&'a [T]> {
        (self.inc == 1).then_some(self.data)
    }

    /// Underlying window, gaps between strided elements included.
    #[cfg(feature = "accelerate")]
    pub(crate) fn raw(&self) -> &'a [T] {
        self.data
    }

    /// Owning copy with the given orientation.
    pub fn to_vector(&self, orientation: Orientation) -> Vector<T> {
        Vector::from_parts(self.iter().collect(), orientation)
    }

    pub(crate) fn reinterpret<R: Scalar>(&self) -> Option<VectorView<'a, R>> {
        same_type_slice::<T, R>(self.data).map(|data| VectorView { data, len: self.len, inc: self.inc })
    }
}

impl<T> Index<usize> for VectorView<'_, T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.data[i * self.inc]
    }
}

/// Mutable strided vector view.
#[derive(Debug)]
pub struct VectorViewMut<'a, T> {
    data: &'a mut [T],
    len: usize,
    inc: usize,
}

impl<'a, T: Scalar> VectorViewMut<'a, T> {
    pub fn new(data: &'a mut [T], len: usize, inc: usize) -> Result<Self, LinalgError> {
        let needed = window_len(len, inc, data.len())?;
        Ok(Self { data: &mut data[..needed], len, inc })
    }

    pub(crate) fn from_vector(data: &'a mut [T]) -> Self {
        let len = data.len();
        Self { data, len, inc: 1 }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn increment(&self) -> usize {
        self.inc
    }

    pub fn at(&self, i: usize) -> Result<T, LinalgError> {
        if i >= self.len {
            return Err(LinalgError::out_of_range("vector view index", i, self.len));
        }
        Ok(self.data[i * self.inc])
    }

    pub fn at_mut(&mut self, i: usize) -> Result<&mut T, LinalgError> {
        if i >= self.len {
            return Err(LinalgError::out_of_range("vector view index", i, self.len));
        }
        Ok(&mut self.data[i * self.inc])
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> + '_ {
        self.data.iter_mut().step_by(self.inc)
    }

    pub fn fill(&mut self, value: T) {
        self.iter_mut().for_each(|x| *x = value);
    }

    /// Read-only reborrow.
    pub fn as_view(&self) -> VectorView<'_, T> {
        VectorView { data: &*self.data, len: self.len, inc: self.inc }
    }
}

impl<T> Index<usize> for VectorViewMut<'_, T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.data[i * self.inc]
    }
}

impl<T> IndexMut<usize> for VectorViewMut<'_, T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i * self.inc]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strided_view_reads_every_other_element() {
        let data = [1, 2, 3, 4, 5];
        let view = VectorView::new(&data, 3, 2).unwrap();
        assert_eq!(view.iter().collect::<Vec<_>>(), vec![1, 3, 5]);
        assert_eq!(view[2], 5);
        assert_eq!(view.at(1).unwrap(), 3);
        assert!(matches!(view.at(3), Err(LinalgError::OutOfRange(_))));
        assert!(view.as_contiguous().is_none());
    }

    #[test]
    fn view_must_fit_in_buffer() {
        let data = [1.0, 2.0, 3.0];
        assert!(VectorView::new(&data, 3, 2).is_err());
        assert!(VectorView::new(&data, 0, 1).is_err());
        assert!(VectorView::new(&data, 1, 0).is_err());
    }

    #[test]
    fn writes_through_mutable_view() {
        let mut data = vec![0; 6];
        {
            let mut view = VectorViewMut::new(&mut data[1..], 3, 2).unwrap();
            view.fill(7);
            view[0] = 1;
            *view.at_mut(2).unwrap() += 1;
        }
        assert_eq!(data, vec![0, 1, 0, 7, 0, 8]);
    }
}
