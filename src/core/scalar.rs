//! Numeric element types and the promotion rules between them.
//!
//! Every container, kernel and factorization in the crate is generic over [`Scalar`],
//! a sealed trait implemented for `i32`, `i64`, `u32`, `u64`, `f32` and `f64`.
//! Binary operations between a `T` and a `U` produce their common type
//! [`Promoted<T, U>`]; scalar division between two integer types always lands in
//! `f64` ([`DivPromoted<T, U>`]).
//!
//! Floating element types additionally implement [`Real`], the bound used by the
//! factorizations. `f32` and `f64` also carry hidden hooks into the active backend,
//! so a kernel call on same-type float data reaches the accelerated routine through
//! static dispatch alone.

use std::any::TypeId;
use std::fmt::{Debug, Display};

use num_traits::{AsPrimitive, Float, Num, NumAssign};

use crate::backend::{ActiveBackend, Backend};
use crate::kernels::Op;
use crate::matrix::view::{MatrixView, MatrixViewMut};
use crate::vector::view::VectorView;

mod sealed {
    pub trait Sealed {}
}

/// Arithmetic element type accepted by [`Vector`](crate::Vector) and [`Matrix`](crate::Matrix).
pub trait Scalar:
    sealed::Sealed
    + Copy
    + Send
    + Sync
    + Debug
    + Display
    + Default
    + PartialOrd
    + Num
    + NumAssign
    + AsPrimitive<i32>
    + AsPrimitive<i64>
    + AsPrimitive<u32>
    + AsPrimitive<u64>
    + AsPrimitive<f32>
    + AsPrimitive<f64>
    + 'static
{
    /// Floating type used when this type has to be factorized or divided.
    type Float: Real;

    /// `true` for the integer element types.
    const IS_INTEGER: bool;

    /// Numeric conversion with `as` semantics.
    fn from_scalar<S: Scalar>(value: S) -> Self;

    /// Absolute value (identity for unsigned types).
    fn magnitude(self) -> Self;

    fn as_f64(self) -> f64 {
        <Self as AsPrimitive<f64>>::as_(self)
    }

    #[doc(hidden)]
    fn accel_gemv(_op: Op, _a: &MatrixView<'_, Self>, _x: &VectorView<'_, Self>) -> Option<Vec<Self>> {
        None
    }

    #[doc(hidden)]
    fn accel_ger(
        _a: &mut MatrixViewMut<'_, Self>,
        _x: &VectorView<'_, Self>,
        _y: &VectorView<'_, Self>,
        _alpha: Self,
    ) -> bool {
        false
    }

    #[doc(hidden)]
    fn accel_dot(_x: &VectorView<'_, Self>, _y: &VectorView<'_, Self>) -> Option<Self> {
        None
    }

    #[doc(hidden)]
    fn accel_gemm(_a: &MatrixView<'_, Self>, _b: &MatrixView<'_, Self>) -> Option<Vec<Self>> {
        None
    }
}

/// Floating element type (`f32` or `f64`).
#[cfg(not(feature = "accelerate"))]
pub trait Real: Scalar<Float = Self> + Float + Promote<Self, Output = Self> + DivPromote<Self, Output = Self> {}

/// Floating element type (`f32` or `f64`).
#[cfg(feature = "accelerate")]
pub trait Real:
    Scalar<Float = Self>
    + Float
    + Promote<Self, Output = Self>
    + DivPromote<Self, Output = Self>
    + faer::traits::ComplexField
{
}

macro_rules! impl_integer {
    ($($t:ty => |$v:ident| $abs:expr),* $(,)?) => {$(
        impl sealed::Sealed for $t {}

        impl Scalar for $t {
            type Float = f64;
            const IS_INTEGER: bool = true;

            #[inline]
            fn from_scalar<S: Scalar>(value: S) -> Self {
                <S as AsPrimitive<$t>>::as_(value)
            }

            #[inline]
            fn magnitude(self) -> Self {
                let $v = self;
                $abs
            }
        }
    )*};
}

impl_integer! {
    i32 => |v| v.wrapping_abs(),
    i64 => |v| v.wrapping_abs(),
    u32 => |v| v,
    u64 => |v| v,
}

macro_rules! impl_real {
    ($($t:ty),*) => {$(
        impl sealed::Sealed for $t {}

        impl Scalar for $t {
            type Float = $t;
            const IS_INTEGER: bool = false;

            #[inline]
            fn from_scalar<S: Scalar>(value: S) -> Self {
                <S as AsPrimitive<$t>>::as_(value)
            }

            #[inline]
            fn magnitude(self) -> Self {
                <$t>::abs(self)
            }

            fn accel_gemv(op: Op, a: &MatrixView<'_, Self>, x: &VectorView<'_, Self>) -> Option<Vec<Self>> {
                ActiveBackend::gemv(op, a, x)
            }

            fn accel_ger(
                a: &mut MatrixViewMut<'_, Self>,
                x: &VectorView<'_, Self>,
                y: &VectorView<'_, Self>,
                alpha: Self,
            ) -> bool {
                ActiveBackend::ger(a, x, y, alpha)
            }

            fn accel_dot(x: &VectorView<'_, Self>, y: &VectorView<'_, Self>) -> Option<Self> {
                ActiveBackend::dot(x, y)
            }

            fn accel_gemm(a: &MatrixView<'_, Self>, b: &MatrixView<'_, Self>) -> Option<Vec<Self>> {
                ActiveBackend::gemm(a, b)
            }
        }

        impl Real for $t {}
    )*};
}

impl_real!(f32, f64);

/// Common type of a binary operation between `Self` and `Rhs`.
pub trait Promote<Rhs: Scalar>: Scalar {
    type Output: Scalar;
}

/// Result type of dividing `Self` by `Rhs`: `f64` for two integers, the common type otherwise.
pub trait DivPromote<Rhs: Scalar>: Scalar {
    type Output: Real;
}

pub type Promoted<T, U> = <T as Promote<U>>::Output;
pub type DivPromoted<T, U> = <T as DivPromote<U>>::Output;

macro_rules! promote {
    ($($lhs:ty, $rhs:ty => $out:ty, $div:ty;)*) => {$(
        impl Promote<$rhs> for $lhs {
            type Output = $out;
        }
        impl DivPromote<$rhs> for $lhs {
            type Output = $div;
        }
    )*};
}

promote! {
    i32, i32 => i32, f64;
    i32, i64 => i64, f64;
    i32, u32 => u32, f64;
    i32, u64 => u64, f64;
    i32, f32 => f32, f32;
    i32, f64 => f64, f64;

    i64, i32 => i64, f64;
    i64, i64 => i64, f64;
    i64, u32 => i64, f64;
    i64, u64 => u64, f64;
    i64, f32 => f32, f32;
    i64, f64 => f64, f64;

    u32, i32 => u32, f64;
    u32, i64 => i64, f64;
    u32, u32 => u32, f64;
    u32, u64 => u64, f64;
    u32, f32 => f32, f32;
    u32, f64 => f64, f64;

    u64, i32 => u64, f64;
    u64, i64 => u64, f64;
    u64, u32 => u64, f64;
    u64, u64 => u64, f64;
    u64, f32 => f32, f32;
    u64, f64 => f64, f64;

    f32, i32 => f32, f32;
    f32, i64 => f32, f32;
    f32, u32 => f32, f32;
    f32, u64 => f32, f32;
    f32, f32 => f32, f32;
    f32, f64 => f64, f64;

    f64, i32 => f64, f64;
    f64, i64 => f64, f64;
    f64, u32 => f64, f64;
    f64, u64 => f64, f64;
    f64, f32 => f64, f64;
    f64, f64 => f64, f64;
}

#[inline]
pub(crate) fn same_type<T: 'static, R: 'static>() -> bool {
    TypeId::of::<T>() == TypeId::of::<R>()
}

/// Reborrows `values` as `&[R]` when `T` and `R` are the same type.
pub(crate) fn same_type_slice<T: Scalar, R: Scalar>(values: &[T]) -> Option<&[R]> {
    if same_type::<T, R>() {
        // SAFETY: T and R are the same type.
        Some(unsafe { std::slice::from_raw_parts(values.as_ptr().cast::<R>(), values.len()) })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn promoted_name<T: Promote<U>, U: Scalar>() -> &'static str {
        std::any::type_name::<Promoted<T, U>>()
    }

    #[test]
    fn promotion_follows_common_type_rules() {
        assert_eq!(promoted_name::<i32, f64>(), "f64");
        assert_eq!(promoted_name::<i32, i64>(), "i64");
        assert_eq!(promoted_name::<u32, i32>(), "u32");
        assert_eq!(promoted_name::<f32, f64>(), "f64");
        assert_eq!(promoted_name::<u64, f32>(), "f32");
    }

    #[test]
    fn integer_division_promotes_to_f64() {
        assert_eq!(std::any::type_name::<DivPromoted<i32, i32>>(), "f64");
        assert_eq!(std::any::type_name::<DivPromoted<f32, i32>>(), "f32");
    }

    #[test]
    fn conversion_and_magnitude() {
        assert_eq!(f64::from_scalar(3_i32), 3.0);
        assert_eq!(i32::from_scalar(2.9_f64), 2);
        assert_eq!((-4_i64).magnitude(), 4);
        assert_eq!((-1.5_f32).magnitude(), 1.5);
        assert!(i32::IS_INTEGER && !f64::IS_INTEGER);
    }

    #[test]
    fn same_type_reinterpretation() {
        let v = [1.0_f64, 2.0];
        assert_eq!(same_type_slice::<f64, f64>(&v), Some(&v[..]));
        assert!(same_type_slice::<f64, f32>(&v).is_none());
    }
}
