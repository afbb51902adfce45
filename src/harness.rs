//! Single-shot wall-clock timing of the kernels and the baseline multiply.
//!
//! A kernel round follows a fixed protocol:
//!
//! 1. allocate a zeroed output,
//! 2. run the kernel once untimed (warm-up),
//! 3. allocate a fresh zeroed output, since kernels accumulate,
//! 4. time exactly one invocation with [`measure`].
//!
//! There is no repetition or averaging: one round yields one sample.

use std::fmt;
use std::time::{Duration, Instant};

use rayon::ThreadPool;
use tracing::{debug, info};

use crate::{
    error::Result,
    matmul::Kernel,
    matrix::{check_shapes, reference_matmul, zeros_for_product, Matrix},
};

/// Label reported for the baseline multiply.
pub const REFERENCE_LABEL: &str = "ndarray_dot";

/// Runs `op` once and returns how long it took.
pub fn measure<F: FnOnce()>(op: F) -> Duration {
    let start = Instant::now();
    op();
    start.elapsed()
}

/// One labelled measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    pub label: &'static str,
    pub elapsed: Duration,
}

impl Timing {
    pub fn seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

impl fmt::Display for Timing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.6}", self.label, self.seconds())
    }
}

/// Times one call of the baseline multiply.
pub fn run_reference(a: &Matrix, b: &Matrix) -> Timing {
    let mut product = None;
    let elapsed = measure(|| product = Some(reference_matmul(a, b)));
    // Free the product outside the timed region.
    drop(product);

    info!(label = REFERENCE_LABEL, seconds = elapsed.as_secs_f64(), "reference timed");
    Timing {
        label: REFERENCE_LABEL,
        elapsed,
    }
}

/// Runs one benchmark round of `kernel` on `a * b` inside `pool`.
///
/// Returns the timing of the measured invocation together with the output
/// it produced. The warm-up runs only when `warm_up` is set, and its output
/// is discarded before the timed run starts.
pub fn run_round(
    kernel: Kernel,
    a: &Matrix,
    b: &Matrix,
    pool: &ThreadPool,
    warm_up: bool,
) -> Result<(Timing, Matrix)> {
    let mut out = zeros_for_product(&a.view(), &b.view())?;
    check_shapes(&a.view(), &b.view(), &out.view())?;

    if warm_up {
        debug!(%kernel, "warm-up");
        pool.install(|| kernel.run(a, b, &mut out));
        drop(out);
        out = zeros_for_product(&a.view(), &b.view())?;
    }

    debug!(%kernel, workers = pool.current_num_threads(), "timed run");
    let elapsed = measure(|| pool.install(|| kernel.run(a, b, &mut out)));

    info!(label = kernel.label(), seconds = elapsed.as_secs_f64(), "kernel timed");
    Ok((
        Timing {
            label: kernel.label(),
            elapsed,
        },
        out,
    ))
}
