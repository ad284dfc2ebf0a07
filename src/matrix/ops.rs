//! Arithmetic operators for [`Matrix`].
//!
//! Binary operators take their operands by reference and produce a new matrix in the
//! promoted element type. Matrix ⊕ matrix operations can fail on mismatched shapes, so
//! their `Output` is a `Result`; scalar operations cannot fail. Scalars work on either side
//! for each supported element type. In-place scalar updates use the `*Assign` operators;
//! in-place matrix updates are the fallible `try_*_assign` methods.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::One;

use crate::core::{DivPromote, DivPromoted, Promote, Promoted, Scalar};
use crate::error::LinalgError;
use crate::kernels::{self, Op};
use crate::matrix::Matrix;
use crate::parallel;
use crate::vector::{Orientation, Vector};

fn check_same_shape<T: Scalar, U: Scalar>(op: &str, a: &Matrix<T>, b: &Matrix<U>) -> Result<(), LinalgError> {
    if a.row_count() != b.row_count() || a.column_count() != b.column_count() {
        return Err(LinalgError::mismatch(
            op,
            (a.row_count(), a.column_count()),
            (b.row_count(), b.column_count()),
        ));
    }
    Ok(())
}

fn zip_with<T, U, R, F>(op: &str, a: &Matrix<T>, b: &Matrix<U>, f: F) -> Result<Matrix<R>, LinalgError>
where
    T: Scalar,
    U: Scalar,
    R: Scalar,
    F: Fn(R, R) -> R + Sync + Send,
{
    check_same_shape(op, a, b)?;
    let data = parallel::zip_map(a.data(), b.data(), f);
    Ok(Matrix::from_parts(a.row_count(), a.column_count(), data))
}

fn map_with<T: Scalar, R: Scalar, F: Fn(T) -> R + Sync + Send>(a: &Matrix<T>, f: F) -> Matrix<R> {
    Matrix::from_parts(a.row_count(), a.column_count(), parallel::map(a.data(), f))
}

impl<T: Scalar + Neg<Output = T>> Neg for &Matrix<T> {
    type Output = Matrix<T>;

    fn neg(self) -> Matrix<T> {
        map_with(self, |x| -x)
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for Matrix<T> {
    type Output = Matrix<T>;

    fn neg(mut self) -> Matrix<T> {
        parallel::map_in_place(self.data_mut(), |x| -x);
        self
    }
}

impl<T: Promote<U>, U: Scalar> Add<&Matrix<U>> for &Matrix<T> {
    type Output = Result<Matrix<Promoted<T, U>>, LinalgError>;

    fn add(self, rhs: &Matrix<U>) -> Self::Output {
        zip_with("matrix addition", self, rhs, |a, b| a + b)
    }
}

impl<T: Promote<U>, U: Scalar> Sub<&Matrix<U>> for &Matrix<T> {
    type Output = Result<Matrix<Promoted<T, U>>, LinalgError>;

    fn sub(self, rhs: &Matrix<U>) -> Self::Output {
        zip_with("matrix subtraction", self, rhs, |a, b| a - b)
    }
}

/// Matrix product.
impl<T: Promote<U>, U: Scalar> Mul<&Matrix<U>> for &Matrix<T> {
    type Output = Result<Matrix<Promoted<T, U>>, LinalgError>;

    fn mul(self, rhs: &Matrix<U>) -> Self::Output {
        kernels::gemm(&self.view_all(), &rhs.view_all())
    }
}

/// Matrix times column vector.
impl<T: Promote<U>, U: Scalar> Mul<&Vector<U>> for &Matrix<T> {
    type Output = Result<Vector<Promoted<T, U>>, LinalgError>;

    fn mul(self, rhs: &Vector<U>) -> Self::Output {
        if rhs.orientation() != Orientation::Column {
            return Err(LinalgError::DimensionMismatch(
                "a matrix can only multiply a column vector from the left".into(),
            ));
        }
        if rhs.size() != self.column_count() {
            return Err(LinalgError::mismatch(
                "matrix-vector product",
                (self.row_count(), self.column_count()),
                (rhs.size(), 1),
            ));
        }
        kernels::gemv(Op::NoTrans, &self.view_all(), &rhs.view())
    }
}

impl<T: Scalar> Matrix<T> {
    /// `self += other`, converting the sum back to `T`.
    pub fn try_add_assign<U: Scalar>(&mut self, other: &Matrix<U>) -> Result<(), LinalgError>
    where
        T: Promote<U>,
    {
        let sum = (&*self + other)?;
        *self = sum.cast();
        Ok(())
    }

    /// `self -= other`, converting the difference back to `T`.
    pub fn try_sub_assign<U: Scalar>(&mut self, other: &Matrix<U>) -> Result<(), LinalgError>
    where
        T: Promote<U>,
    {
        let diff = (&*self - other)?;
        *self = diff.cast();
        Ok(())
    }

    /// `self = self · other`, converting the product back to `T`.
    pub fn try_mul_assign<U: Scalar>(&mut self, other: &Matrix<U>) -> Result<(), LinalgError>
    where
        T: Promote<U>,
    {
        let product = (&*self * other)?;
        *self = product.cast();
        Ok(())
    }
}

impl<T: Promote<U>, U: Scalar> AddAssign<U> for Matrix<T> {
    fn add_assign(&mut self, rhs: U) {
        let rhs = Promoted::<T, U>::from_scalar(rhs);
        parallel::map_in_place(self.data_mut(), |x| T::from_scalar(Promoted::<T, U>::from_scalar(x) + rhs));
    }
}

impl<T: Promote<U>, U: Scalar> SubAssign<U> for Matrix<T> {
    fn sub_assign(&mut self, rhs: U) {
        let rhs = Promoted::<T, U>::from_scalar(rhs);
        parallel::map_in_place(self.data_mut(), |x| T::from_scalar(Promoted::<T, U>::from_scalar(x) - rhs));
    }
}

impl<T: Promote<U>, U: Scalar> MulAssign<U> for Matrix<T> {
    fn mul_assign(&mut self, rhs: U) {
        let rhs = Promoted::<T, U>::from_scalar(rhs);
        parallel::map_in_place(self.data_mut(), |x| T::from_scalar(Promoted::<T, U>::from_scalar(x) * rhs));
    }
}

/// Divides in the common type of `T` and `U`: two integer types use integer division,
/// otherwise every element is multiplied by the reciprocal of `rhs`.
impl<T: Promote<U>, U: Scalar> DivAssign<U> for Matrix<T> {
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
        impl<T: Promote<$s>> Add<$s> for &Matrix<T> {
            type Output = Matrix<Promoted<T, $s>>;

            fn add(self, rhs: $s) -> Self::Output {
                let rhs = Promoted::<T, $s>::from_scalar(rhs);
                map_with(self, |x| Promoted::<T, $s>::from_scalar(x) + rhs)
            }
        }

        impl<T: Promote<$s>> Sub<$s> for &Matrix<T> {
            type Output = Matrix<Promoted<T, $s>>;

            fn sub(self, rhs: $s) -> Self::Output {
                let rhs = Promoted::<T, $s>::from_scalar(rhs);
                map_with(self, |x| Promoted::<T, $s>::from_scalar(x) - rhs)
            }
        }

        impl<T: Promote<$s>> Mul<$s> for &Matrix<T> {
            type Output = Matrix<Promoted<T, $s>>;

            fn mul(self, rhs: $s) -> Self::Output {
                let rhs = Promoted::<T, $s>::from_scalar(rhs);
                map_with(self, |x| Promoted::<T, $s>::from_scalar(x) * rhs)
            }
        }

        impl<T: DivPromote<$s>> Div<$s> for &Matrix<T> {
            type Output = Matrix<DivPromoted<T, $s>>;

            fn div(self, rhs: $s) -> Self::Output {
                let rhs = DivPromoted::<T, $s>::from_scalar(rhs);
                map_with(self, |x| DivPromoted::<T, $s>::from_scalar(x) / rhs)
            }
        }

        impl<T: Scalar> Add<&Matrix<T>> for $s
        where
            $s: Promote<T>,
        {
            type Output = Matrix<Promoted<$s, T>>;

            fn add(self, rhs: &Matrix<T>) -> Self::Output {
                let lhs = Promoted::<$s, T>::from_scalar(self);
                map_with(rhs, |x| lhs + Promoted::<$s, T>::from_scalar(x))
            }
        }

        impl<T: Scalar> Sub<&Matrix<T>> for $s
        where
            $s: Promote<T>,
        {
            type Output = Matrix<Promoted<$s, T>>;

            fn sub(self, rhs: &Matrix<T>) -> Self::Output {
                let lhs = Promoted::<$s, T>::from_scalar(self);
                map_with(rhs, |x| lhs - Promoted::<$s, T>::from_scalar(x))
            }
        }

        impl<T: Scalar> Mul<&Matrix<T>> for $s
        where
            $s: Promote<T>,
        {
            type Output = Matrix<Promoted<$s, T>>;

            fn mul(self, rhs: &Matrix<T>) -> Self::Output {
                let lhs = Promoted::<$s, T>::from_scalar(self);
                map_with(rhs, |x| lhs * Promoted::<$s, T>::from_scalar(x))
            }
        }

        impl<T: Scalar> Div<&Matrix<T>> for $s
        where
            $s: DivPromote<T>,
        {
            type Output = Matrix<DivPromoted<$s, T>>;

            fn div(self, rhs: &Matrix<T>) -> Self::Output {
                let lhs = DivPromoted::<$s, T>::from_scalar(self);
                map_with(rhs, |x| lhs / DivPromoted::<$s, T>::from_scalar(x))
            }
        }
    )*};
}

scalar_ops!(i32, i64, u32, u64, f32, f64);
