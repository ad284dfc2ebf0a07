//! Arithmetic operators for [`Vector`].
//!
//! Element-wise operations need both operands to share size and orientation. Products
//! follow the orientation rules: row·column is a dot product, column·row an outer product,
//! and a row vector times a matrix is `xᵀ·A`.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::One;

use crate::core::{DivPromote, DivPromoted, Promote, Promoted, Scalar};
use crate::error::LinalgError;
use crate::kernels::{self, Op};
use crate::matrix::Matrix;
use crate::parallel;
use crate::vector::{Orientation, Vector};

fn check_compatible<T: Scalar, U: Scalar>(op: &str, a: &Vector<T>, b: &Vector<U>) -> Result<(), LinalgError> {
    if a.size() != b.size() || a.orientation() != b.orientation() {
        return Err(LinalgError::DimensionMismatch(format!(
            "{op}: {:?} vector of size {} with {:?} vector of size {}",
            a.orientation(),
            a.size(),
            b.orientation(),
            b.size()
        )));
    }
    Ok(())
}

fn zip_with<T, U, R, F>(op: &str, a: &Vector<T>, b: &Vector<U>, f: F) -> Result<Vector<R>, LinalgError>
where
    T: Scalar,
    U: Scalar,
    R: Scalar,
    F: Fn(R, R) -> R + Sync + Send,
{
    check_compatible(op, a, b)?;
    Ok(Vector::from_parts(parallel::zip_map(a.data(), b.data(), f), a.orientation()))
}

fn map_with<T: Scalar, R: Scalar, F: Fn(T) -> R + Sync + Send>(a: &Vector<T>, f: F) -> Vector<R> {
    Vector::from_parts(parallel::map(a.data(), f), a.orientation())
}

impl<T: Scalar + Neg<Output = T>> Neg for &Vector<T> {
    type Output = Vector<T>;

    fn neg(self) -> Vector<T> {
        map_with(self, |x| -x)
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for Vector<T> {
    type Output = Vector<T>;

    fn neg(mut self) -> Vector<T> {
        parallel::map_in_place(self.data_mut(), |x| -x);
        self
    }
}

impl<T: Promote<U>, U: Scalar> Add<&Vector<U>> for &Vector<T> {
    type Output = Result<Vector<Promoted<T, U>>, LinalgError>;

    fn add(self, rhs: &Vector<U>) -> Self::Output {
        zip_with("vector addition", self, rhs, |a, b| a + b)
    }
}

impl<T: Promote<U>, U: Scalar> Sub<&Vector<U>> for &Vector<T> {
    type Output = Result<Vector<Promoted<T, U>>, LinalgError>;

    fn sub(self, rhs: &Vector<U>) -> Self::Output {
        zip_with("vector subtraction", self, rhs, |a, b| a - b)
    }
}

/// Row times column: the dot product.
impl<T: Promote<U>, U: Scalar> Mul<&Vector<U>> for &Vector<T> {
    type Output = Result<Promoted<T, U>, LinalgError>;

    fn mul(self, rhs: &Vector<U>) -> Self::Output {
        if self.orientation() != Orientation::Row || rhs.orientation() != Orientation::Column {
            return Err(LinalgError::DimensionMismatch(format!(
                "vector product needs a row vector times a column vector, got {:?} times {:?}",
                self.orientation(),
                rhs.orientation()
            )));
        }
        kernels::dot(&self.view(), &rhs.view())
    }
}

/// Row vector times matrix, `xᵀ·A`.
impl<T: Scalar, U: Promote<T>> Mul<&Matrix<U>> for &Vector<T> {
    type Output = Result<Vector<Promoted<U, T>>, LinalgError>;

    fn mul(self, rhs: &Matrix<U>) -> Self::Output {
        if self.orientation() != Orientation::Row {
            return Err(LinalgError::DimensionMismatch(
                "only a row vector can multiply a matrix from the left".into(),
            ));
        }
        if self.size() != rhs.row_count() {
            return Err(LinalgError::mismatch(
                "vector-matrix product",
                (1, self.size()),
                (rhs.row_count(), rhs.column_count()),
            ));
        }
        kernels::gemv(Op::Trans, &rhs.view_all(), &self.view())
    }
}

impl<T: Scalar> Vector<T> {
    /// Dot product regardless of orientation; only the sizes have to agree.
    pub fn dot<U: Scalar>(&self, other: &Vector<U>) -> Result<Promoted<T, U>, LinalgError>
    where
        T: Promote<U>,
    {
        kernels::dot(&self.view(), &other.view())
    }

    /// Product of `self` and `other` as a matrix.
    ///
    /// A column times a row gives the `n × m` outer product and a row times a column gives
    /// the `1 × 1` dot product. Two single-element vectors of the same orientation multiply
    /// into a `1 × 1` matrix. Anything else is a mismatch.
    pub fn outer<U: Scalar>(&self, other: &Vector<U>) -> Result<Matrix<Promoted<T, U>>, LinalgError>
    where
        T: Promote<U>,
    {
        match (self.orientation(), other.orientation()) {
            (Orientation::Column, Orientation::Row) => Ok(kernels::outer(&self.view(), &other.view())),
            (Orientation::Row, Orientation::Column) => {
                let d = kernels::dot(&self.view(), &other.view())?;
                Ok(Matrix::from_parts(1, 1, vec![d]))
            }
            _ if self.size() == 1 && other.size() == 1 => Ok(kernels::outer(&self.view(), &other.view())),
            (lhs, rhs) => Err(LinalgError::DimensionMismatch(format!(
                "outer product of {lhs:?} vector of size {} with {rhs:?} vector of size {}",
                self.size(),
                other.size()
            ))),
        }
    }

    /// `self += other`, converting the sum back to `T`.
    pub fn try_add_assign<U: Scalar>(&mut self, other: &Vector<U>) -> Result<(), LinalgError>
    where
        T: Promote<U>,
    {
        let sum = (&*self + other)?;
        *self = sum.cast();
        Ok(())
    }

    /// `self -= other`, converting the difference back to `T`.
    pub fn try_sub_assign<U: Scalar>(&mut self, other: &Vector<U>) -> Result<(), LinalgError>
    where
        T: Promote<U>,
    {
        let diff = (&*self - other)?;
        *self = diff.cast();
        Ok(())
    }
}

impl<T: Promote<U>, U: Scalar> AddAssign<U> for Vector<T> {
    fn add_assign(&mut self, rhs: U) {
        let rhs = Promoted::<T, U>::from_scalar(rhs);
        parallel::map_in_place(self.data_mut(), |x| T::from_scalar(Promoted::<T, U>::from_scalar(x) + rhs));
    }
}

impl<T: Promote<U>, U: Scalar> SubAssign<U> for Vector<T> {
    fn sub_assign(&mut self, rhs: U) {
        let rhs = Promoted::<T, U>::from_scalar(rhs);
        parallel::map_in_place(self.data_mut(), |x| T::from_scalar(Promoted::<T, U>::from_scalar(x) - rhs));
    }
}

impl<T: Promote<U>, U: Scalar> MulAssign<U> for Vector<T> {
    fn mul_assign(&mut self, rhs: U) {
        let rhs = Promoted::<T, U>::from_scalar(rhs);
        parallel::map_in_place(self.data_mut(), |x| T::from_scalar(Promoted::<T, U>::from_scalar(x) * rhs));
    }
}

/// Two integer types divide directly; otherwise every element is multiplied by the
/// reciprocal of `rhs`.
impl<T: Promote<U>, U: Scalar> DivAssign<U> for Vector<T> {
    fn div_assign(&mut self, rhs: U) {
        let rhs = Promoted::<T, U>::from_scalar(rhs);
        if <Promoted<T, U>>::IS_INTEGER {
            parallel::map_in_place(self.data_mut(), |x| T::from_scalar(Promoted::<T, U>::from_scalar(x) / rhs));
        } else {
            let inv = <Promoted<T, U>>::one() / rhs;
            parallel::map_in_place(self.data_mut(), |x| T::from_scalar(Promoted::<T, U>::from_scalar(x) * inv));
        }
    }
}

macro_rules! scalar_ops {
    ($($s:ty),*) => {$(
        impl<T: Promote<$s>> Add<$s> for &Vector<T> {
            type Output = Vector<Promoted<T, $s>>;

            fn add(self, rhs: $s) -> Self::Output {
                let rhs = Promoted::<T, $s>::from_scalar(rhs);
                map_with(self, |x| Promoted::<T, $s>::from_scalar(x) + rhs)
            }
        }

        impl<T: Promote<$s>> Sub<$s> for &Vector<T> {
            type Output = Vector<Promoted<T, $s>>;

            fn sub(self, rhs: $s) -> Self::Output {
                let rhs = Promoted::<T, $s>::from_scalar(rhs);
                map_with(self, |x| Promoted::<T, $s>::from_scalar(x) - rhs)
            }
        }

        impl<T: Promote<$s>> Mul<$s> for &Vector<T> {
            type Output = Vector<Promoted<T, $s>>;

            fn mul(self, rhs: $s) -> Self::Output {
                let rhs = Promoted::<T, $s>::from_scalar(rhs);
                map_with(self, |x| Promoted::<T, $s>::from_scalar(x) * rhs)
            }
        }

        impl<T: DivPromote<$s>> Div<$s> for &Vector<T> {
            type Output = Vector<DivPromoted<T, $s>>;

            fn div(self, rhs: $s) -> Self::Output {
                let rhs = DivPromoted::<T, $s>::from_scalar(rhs);
                map_with(self, |x| DivPromoted::<T, $s>::from_scalar(x) / rhs)
            }
        }

        impl<T: Scalar> Add<&Vector<T>> for $s
        where
            $s: Promote<T>,
        {
            type Output = Vector<Promoted<$s, T>>;

            fn add(self, rhs: &Vector<T>) -> Self::Output {
                let lhs = Promoted::<$s, T>::from_scalar(self);
                map_with(rhs, |x| lhs + Promoted::<$s, T>::from_scalar(x))
            }
        }

        impl<T: Scalar> Sub<&Vector<T>> for $s
        where
            $s: Promote<T>,
        {
            type Output = Vector<Promoted<$s, T>>;

            fn sub(self, rhs: &Vector<T>) -> Self::Output {
                let lhs = Promoted::<$s, T>::from_scalar(self);
                map_with(rhs, |x| lhs - Promoted::<$s, T>::from_scalar(x))
            }
        }

        impl<T: Scalar> Mul<&Vector<T>> for $s
        where
            $s: Promote<T>,
        {
            type Output = Vector<Promoted<$s, T>>;

            fn mul(self, rhs: &Vector<T>) -> Self::Output {
                let lhs = Promoted::<$s, T>::from_scalar(self);
                map_with(rhs, |x| lhs * Promoted::<$s, T>::from_scalar(x))
            }
        }

        impl<T: Scalar> Div<&Vector<T>> for $s
        where
            $s: DivPromote<T>,
        {
            type Output = Vector<DivPromoted<$s, T>>;

            fn div(self, rhs: &Vector<T>) -> Self::Output {
                let lhs = DivPromoted::<$s, T>::from_scalar(self);
                map_with(rhs, |x| lhs / DivPromoted::<$s, T>::from_scalar(x))
            }
        }
    )*};
}

scalar_ops!(i32, i64, u32, u64, f32, f64);
