//! Constructors for frequently used matrices.

use crate::core::Scalar;
use crate::error::LinalgError;
use crate::matrix::Matrix;

/// `n × n` identity.
pub fn identity_matrix<T: Scalar>(n: usize) -> Result<Matrix<T>, LinalgError> {
    let mut m = Matrix::new(n, n)?;
    for i in 0..n {
        m[(i, i)] = T::one();
    }
    Ok(m)
}

/// `rows × cols` matrix of ones.
pub fn ones<T: Scalar>(rows: usize, cols: usize) -> Result<Matrix<T>, LinalgError> {
    let mut m = Matrix::new(rows, cols)?;
    m.fill(T::one());
    Ok(m)
}

/// Permutation matrix `P` with `P[i][perm[i]] = 1`, so row `i` of `P·A` is row `perm[i]` of `A`.
///
/// `perm` must contain every index in `0..perm.len()` exactly once.
pub fn permutation_matrix<T: Scalar>(perm: &[usize]) -> Result<Matrix<T>, LinalgError> {
    let n = perm.len();
    let mut seen = vec![false; n];
    for &p in perm {
        if p >= n || std::mem::replace(&mut seen[p], true) {
            return Err(LinalgError::InvalidArgument(format!("{perm:?} is not a permutation of 0..{n}")));
        }
    }
    let mut m = Matrix::new(n, n)?;
    for (i, &p) in perm.iter().enumerate() {
        m[(i, p)] = T::one();
    }
    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_and_ones() {
        let eye: Matrix<i32> = identity_matrix(3).unwrap();
        assert_eq!(eye.data(), &[1, 0, 0, 0, 1, 0, 0, 0, 1]);
        let o: Matrix<f32> = ones(2, 3).unwrap();
        assert!(o.data().iter().all(|&v| v == 1.0));
        assert!(matches!(identity_matrix::<f64>(0), Err(LinalgError::InvalidConstruction(_))));
        assert!(ones::<u32>(2, 0).is_err());
    }

    #[test]
    fn permutation_reorders_rows() {
        let p: Matrix<i64> = permutation_matrix(&[2, 0, 1]).unwrap();
        let a = Matrix::from_rows(&[[1_i64, 1], [2, 2], [3, 3]]).unwrap();
        let pa = (&p * &a).unwrap();
        assert_eq!(pa.data(), &[3, 3, 1, 1, 2, 2]);
    }

    #[test]
    fn rejects_non_permutations() {
        assert!(matches!(permutation_matrix::<f64>(&[0, 0]), Err(LinalgError::InvalidArgument(_))));
        assert!(matches!(permutation_matrix::<f64>(&[0, 2]), Err(LinalgError::InvalidArgument(_))));
        assert!(matches!(permutation_matrix::<f64>(&[]), Err(LinalgError::InvalidConstruction(_))));
    }
}
