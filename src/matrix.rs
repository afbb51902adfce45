//! Matrix construction and the baseline multiply.
//!
//! Every matrix in a run is an [`Array2<f64>`] in standard (row-major) layout.
//! Buffers are allocated through [`try_alloc_zeroed`] so that running out of
//! memory on a full-size matrix surfaces as an error.

use ndarray::{Array2, ArrayView2};
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    error::{allocation_error, shape_error, Result},
    utils::try_alloc_zeroed,
};

/// Dense row-major `f64` matrix.
pub type Matrix = Array2<f64>;

/// Allocates a `rows x cols` matrix filled with zeros.
pub fn zeros(rows: usize, cols: usize) -> Result<Matrix> {
    let len = element_count(rows, cols)?;
    let data = try_alloc_zeroed(len)?;
    Array2::from_shape_vec((rows, cols), data)
        .map_err(|err| allocation_error(len.saturating_mul(8), err.to_string()))
}

/// Allocates a zeroed output buffer shaped for `a * b`.
pub fn zeros_for_product(a: &ArrayView2<f64>, b: &ArrayView2<f64>) -> Result<Matrix> {
    zeros(a.nrows(), b.ncols())
}

/// Allocates a `rows x cols` matrix with entries drawn uniformly from
/// `[-1, 1)` using `rng`.
///
/// Entries are drawn in row-major order, so the same generator state always
/// yields the same matrix.
pub fn random<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Result<Matrix> {
    let mut matrix = zeros(rows, cols)?;
    matrix
        .iter_mut()
        .for_each(|x| *x = rng.random_range(-1.0..1.0));
    Ok(matrix)
}

/// Square random matrix from a fresh generator seeded with `seed`.
pub fn random_square(size: usize, seed: u64) -> Result<Matrix> {
    let mut rng = StdRng::seed_from_u64(seed);
    random(size, size, &mut rng)
}

/// Baseline multiply the kernels are timed against.
///
/// Allocates and returns a new matrix; its algorithm is whatever `ndarray`
/// picks for `dot`.
pub fn reference_matmul(a: &Matrix, b: &Matrix) -> Matrix {
    a.dot(b)
}

/// Checks that `a * b` can be accumulated into `out`.
///
/// Kernels assert the same conditions and panic; this is the fallible form
/// for callers that want to fail cleanly before starting a round.
pub fn check_shapes(
    a: &ArrayView2<f64>,
    b: &ArrayView2<f64>,
    out: &ArrayView2<f64>,
) -> Result<()> {
    if a.ncols() != b.nrows() {
        return Err(shape_error(
            a.dim(),
            b.dim(),
            "columns of a must equal rows of b",
        ));
    }
    if out.dim() != (a.nrows(), b.ncols()) {
        return Err(shape_error(
            (a.nrows(), b.ncols()),
            out.dim(),
            "output must be a.rows x b.cols",
        ));
    }
    Ok(())
}

fn element_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or_else(|| {
        allocation_error(usize::MAX, format!("{rows}x{cols} elements overflow usize"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoopmulError;
    use ndarray::array;

    #[test]
    fn test_zeros_shape_and_contents() {
        let m = zeros(3, 5).unwrap();
        assert_eq!(m.dim(), (3, 5));
        assert!(m.is_standard_layout());
        assert!(m.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_zeros_empty() {
        let m = zeros(0, 7).unwrap();
        assert_eq!(m.dim(), (0, 7));
    }

    #[test]
    fn test_zeros_overflowing_dimensions() {
        let err = zeros(usize::MAX, 2).unwrap_err();
        assert!(matches!(err, LoopmulError::AllocationError { .. }));
    }

    #[test]
    fn test_random_is_reproducible() {
        let a = random_square(16, 7).unwrap();
        let b = random_square(16, 7).unwrap();
        let c = random_square(16, 8).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_random_range() {
        let m = random_square(32, 1).unwrap();
        assert!(m.iter().all(|&x| (-1.0..1.0).contains(&x)));
        assert!(m.iter().any(|&x| x != 0.0));
    }

    #[test]
    fn test_reference_known_case() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let b = array![[5.0, 6.0], [7.0, 8.0]];
        assert_eq!(reference_matmul(&a, &b), array![[19.0, 22.0], [43.0, 50.0]]);
    }

    #[test]
    fn test_check_shapes() {
        let a = zeros(2, 3).unwrap();
        let b = zeros(3, 4).unwrap();
        let out = zeros(2, 4).unwrap();
        assert!(check_shapes(&a.view(), &b.view(), &out.view()).is_ok());

        let bad_b = zeros(2, 4).unwrap();
        let err = check_shapes(&a.view(), &bad_b.view(), &out.view()).unwrap_err();
        assert_eq!(err, shape_error((2, 3), (2, 4), "columns of a must equal rows of b"));

        let bad_out = zeros(4, 2).unwrap();
        let err = check_shapes(&a.view(), &b.view(), &bad_out.view()).unwrap_err();
        assert!(matches!(err, LoopmulError::ShapeError { right: (4, 2), .. }));
    }

    #[test]
    fn test_zeros_for_product() {
        let a = zeros(2, 3).unwrap();
        let b = zeros(3, 6).unwrap();
        assert_eq!(zeros_for_product(&a.view(), &b.view()).unwrap().dim(), (2, 6));
    }
}
