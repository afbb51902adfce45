//! Naive triple-loop matrix multiplication in three variants.
//!
//! All kernels compute `out += a * b` for `a` (M x K), `b` (K x N) and `out`
//! (M x N). They accumulate into `out` rather than overwrite it, so callers
//! pass a zeroed buffer to get the plain product. None of them allocate.
//!
//! The variants differ only in loop order and parallelism:
//!
//! | kernel             | nesting             | parallel            |
//! |--------------------|---------------------|---------------------|
//! | [`matmul_mnk`]     | m -> n -> k         | no                  |
//! | [`matmul_mkn`]     | m -> k -> n         | no                  |
//! | [`par_matmul_mkn`] | m -> k -> n         | rows split by rayon |
//!
//! With row-major storage the innermost `n` loop of the `mkn` order walks a
//! row of `b` and a row of `out` contiguously, while the innermost `k` loop
//! of the `mnk` order strides down a column of `b`.

use std::fmt;

use ndarray::{ArrayView2, ArrayViewMut2, Axis};
use num::traits::NumAssign;
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};

use crate::matrix::Matrix;

#[inline(always)]
fn assert_shapes<T>(a: &ArrayView2<'_, T>, b: &ArrayView2<'_, T>, out: &ArrayViewMut2<'_, T>) {
    assert_eq!(
        a.ncols(),
        b.nrows(),
        "a is {:?} and b is {:?}: columns of a must equal rows of b",
        a.dim(),
        b.dim()
    );
    assert_eq!(
        out.dim(),
        (a.nrows(), b.ncols()),
        "output must be a.rows x b.cols"
    );
}

/// Accumulates `a * b` into `out` with loop order m -> n -> k.
///
/// # Panics
///
/// Panics if the shapes are incompatible.
pub fn matmul_mnk<T>(a: ArrayView2<'_, T>, b: ArrayView2<'_, T>, mut out: ArrayViewMut2<'_, T>)
where
    T: Copy + NumAssign,
{
    assert_shapes(&a, &b, &out);
    let (m_dim, k_dim) = a.dim();
    let n_dim = b.ncols();

    for m in 0..m_dim {
        for n in 0..n_dim {
            for inner in 0..k_dim {
                out[[m, n]] += a[[m, inner]] * b[[inner, n]];
            }
        }
    }
}

/// Accumulates `a * b` into `out` with loop order m -> k -> n.
///
/// # Panics
///
/// Panics if the shapes are incompatible.
pub fn matmul_mkn<T>(a: ArrayView2<'_, T>, b: ArrayView2<'_, T>, mut out: ArrayViewMut2<'_, T>)
where
    T: Copy + NumAssign,
{
    assert_shapes(&a, &b, &out);
    let (m_dim, k_dim) = a.dim();
    let n_dim = b.ncols();

    for m in 0..m_dim {
        for inner in 0..k_dim {
            for n in 0..n_dim {
                out[[m, n]] += a[[m, inner]] * b[[inner, n]];
            }
        }
    }
}

/// Accumulates `a * b` into `out` with loop order m -> k -> n, splitting the
/// rows of `out` across the current rayon pool.
///
/// Rows are cut into one contiguous range per worker of the pool this is
/// called from (wrap the call in [`rayon::ThreadPool::install`] to pick the
/// worker count). Each range of `out` is owned by exactly one task, so no
/// locking is needed, and the call returns once every range is done.
///
/// Every output element sees the same sequence of additions as in
/// [`matmul_mkn`], so the two produce bit-identical results.
///
/// # Panics
///
/// Panics if the shapes are incompatible, or if a worker panics.
#[allow(clippy::needless_range_loop)]
pub fn par_matmul_mkn<T>(a: ArrayView2<'_, T>, b: ArrayView2<'_, T>, mut out: ArrayViewMut2<'_, T>)
where
    T: Copy + NumAssign + Send + Sync,
{
    assert_shapes(&a, &b, &out);
    let (m_dim, k_dim) = a.dim();
    let n_dim = b.ncols();
    if m_dim == 0 {
        return;
    }

    let rows_per_worker = m_dim.div_ceil(rayon::current_num_threads().max(1));

    out.axis_chunks_iter_mut(Axis(0), rows_per_worker)
        .into_par_iter()
        .zip(a.axis_chunks_iter(Axis(0), rows_per_worker))
        .for_each(|(mut out_rows, a_rows)| {
            for (mut out_row, a_row) in out_rows.outer_iter_mut().zip(a_rows.outer_iter()) {
                for inner in 0..k_dim {
                    let a_mk = a_row[inner];
                    let b_row = b.row(inner);
                    for n in 0..n_dim {
                        out_row[n] += a_mk * b_row[n];
                    }
                }
            }
        });
}

/// One of the kernels under study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kernel {
    /// [`matmul_mnk`]
    Mnk,
    /// [`matmul_mkn`]
    Mkn,
    /// [`par_matmul_mkn`]
    ParMkn,
}

impl Kernel {
    /// Kernels in the order the driver reports them.
    pub const ALL: [Kernel; 3] = [Kernel::Mnk, Kernel::Mkn, Kernel::ParMkn];

    /// Label printed next to the kernel's timing.
    pub fn label(self) -> &'static str {
        match self {
            Kernel::Mnk => "matmul_mnk",
            Kernel::Mkn => "matmul_mkn",
            Kernel::ParMkn => "par_matmul_mkn",
        }
    }

    /// Accumulates `a * b` into `out` with this kernel.
    pub fn run(self, a: &Matrix, b: &Matrix, out: &mut Matrix) {
        match self {
            Kernel::Mnk => matmul_mnk(a.view(), b.view(), out.view_mut()),
            Kernel::Mkn => matmul_mkn(a.view(), b.view(), out.view_mut()),
            Kernel::ParMkn => par_matmul_mkn(a.view(), b.view(), out.view_mut()),
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
