//! Owning dense vectors with a row/column orientation.
//!
//! Orientation decides which products are legal: a row vector times a column vector is
//! their dot product, a column vector times a row vector is their outer product, and a
//! row vector can multiply a matrix from the left.

pub mod ops;
pub mod view;

pub use view::{VectorView, VectorViewMut};

use std::fmt;
use std::ops::{Index, IndexMut};

use num_traits::Float;

use crate::core::{Real, Scalar};
use crate::error::LinalgError;
use crate::parallel::{self, Workload};
use crate::utils::tolerance::{is_close, EPSILON};

/// Row or column interpretation of a [`Vector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    Row,
    #[default]
    Column,
}

impl Orientation {
    pub fn flipped(self) -> Self {
        match self {
            Orientation::Row => Orientation::Column,
            Orientation::Column => Orientation::Row,
        }
    }
}

/// Dense vector owning its elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Vector<T> {
    data: Vec<T>,
    orientation: Orientation,
}

impl<T: Scalar> Vector<T> {
    /// Zero-filled vector of `size` elements.
    pub fn new(size: usize, orientation: Orientation) -> Result<Self, LinalgError> {
        if size == 0 {
            return Err(LinalgError::InvalidConstruction("vector size must be positive".into()));
        }
        Ok(Self { data: vec![T::zero(); size], orientation })
    }

    /// Copy of `data`.
    pub fn from_slice(data: &[T], orientation: Orientation) -> Result<Self, LinalgError> {
        Self::from_vec(data.to_vec(), orientation)
    }

    /// Takes ownership of `data` without copying.
    pub fn from_vec(data: Vec<T>, orientation: Orientation) -> Result<Self, LinalgError> {
        if data.is_empty() {
            return Err(LinalgError::InvalidConstruction("vector source is empty".into()));
        }
        Ok(Self { data, orientation })
    }

    /// Copy of the first `size` elements of `data`, which must hold exactly `size` elements.
    pub fn from_sized(size: usize, data: &[T], orientation: Orientation) -> Result<Self, LinalgError> {
        if data.len() != size {
            return Err(LinalgError::InvalidConstruction(format!(
                "declared size {size} does not match source length {}",
                data.len()
            )));
        }
        Self::from_slice(data, orientation)
    }

    pub fn from_array<const N: usize>(data: [T; N], orientation: Orientation) -> Result<Self, LinalgError> {
        Self::from_vec(data.to_vec(), orientation)
    }

    /// Assumes `data` is non-empty.
    pub(crate) fn from_parts(data: Vec<T>, orientation: Orientation) -> Self {
        debug_assert!(!data.is_empty());
        Self { data, orientation }
    }

    /// Element-wise `as` conversion into another scalar type.
    pub fn cast<U: Scalar>(&self) -> Vector<U> {
        Vector::from_parts(self.data.iter().map(|&x| U::from_scalar(x)).collect(), self.orientation)
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
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
    pub fn at(&self, i: usize) -> Result<T, LinalgError> {
        self.data
            .get(i)
            .copied()
            .ok_or_else(|| LinalgError::out_of_range("vector index", i, self.data.len()))
    }

    pub fn at_mut(&mut self, i: usize) -> Result<&mut T, LinalgError> {
        let len = self.data.len();
        self.data.get_mut(i).ok_or_else(|| LinalgError::out_of_range("vector index", i, len))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Contiguous view of the whole vector.
    pub fn view(&self) -> VectorView<'_, T> {
        VectorView::from_vector(&self.data)
    }

    pub fn view_mut(&mut self) -> VectorViewMut<'_, T> {
        VectorViewMut::from_vector(&mut self.data)
    }

    /// `len` elements starting at `offset`, `inc` apart.
    pub fn view_strided(&self, offset: usize, len: usize, inc: usize) -> Result<VectorView<'_, T>, LinalgError> {
        let tail = self
            .data
            .get(offset..)
            .ok_or_else(|| LinalgError::out_of_range("view offset", offset, self.data.len()))?;
        VectorView::new(tail, len, inc).map_err(|e| match e {
            LinalgError::InvalidConstruction(msg) => LinalgError::OutOfRange(msg),
            other => other,
        })
    }

    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// `true` when every element is within [`EPSILON`] of zero.
    pub fn is_null(&self) -> bool {
        self.data.iter().all(|&x| is_close(x, 0.0_f64, EPSILON))
    }

    /// Euclidean norm in the floating type of `T`.
    pub fn norm(&self) -> T::Float {
        let n = self.data.len();
        let par = parallel::should_parallelize(n, Workload::Linear);
        let sum_sq: T::Float = parallel::sum_indexed(n, par, |i| {
            let x = <T::Float>::from_scalar(self.data[i]);
            x * x
        });
        sum_sq.sqrt()
    }

    /// Flip the orientation in place; the elements do not move.
    pub fn transpose(&mut self) {
        self.orientation = self.orientation.flipped();
    }

    pub fn transposed(&self) -> Self {
        Self { data: self.data.clone(), orientation: self.orientation.flipped() }
    }
}

impl<T: Real> Vector<T> {
    /// Scale to unit Euclidean norm. A zero vector cannot be normalized.
    pub fn normalize(&mut self) -> Result<(), LinalgError> {
        let norm = self.norm();
        if norm.is_zero() {
            return Err(LinalgError::InvalidArgument("cannot normalize a zero vector".into()));
        }
        let inv = T::one() / norm;
        self.data.iter_mut().for_each(|x| *x *= inv);
        Ok(())
    }
}

impl<T> Index<usize> for Vector<T> {
    type Output = T;

    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T> IndexMut<usize> for Vector<T> {
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

impl<'a, T> IntoIterator for &'a Vector<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

impl<T: Scalar> fmt::Display for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = match self.orientation {
            Orientation::Row => ", ",
            Orientation::Column => "; ",
        };
        write!(f, "[")?;
        for (i, x) in self.data.iter().enumerate() {
            if i > 0 {
                write!(f, "{sep}")?;
            }
            write!(f, "{x}")?;
        }
        write!(f, "]")
    }
}
