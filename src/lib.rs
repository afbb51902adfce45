//! Loop-order and row-parallelism study of a naive `f64` matrix multiply.
//!
//! [`matmul`] holds the kernels, [`harness`] times them, and the `loopmul`
//! binary runs the fixed comparison against `ndarray`'s `dot`.

pub mod config;
pub mod error;
pub mod harness;
pub mod matmul;
pub mod matrix;
pub mod utils;

pub use config::BenchConfig;
pub use error::{LoopmulError, Result};
pub use matmul::{matmul_mkn, matmul_mnk, par_matmul_mkn, Kernel};
pub use matrix::Matrix;

/// Side length of the square input in the reference configuration
/// (one matrix is 800 MB).
pub const MATRIX_SIZE: usize = 10_000;

/// Seed of the input generator used by the executable.
pub const DEFAULT_SEED: u64 = 42;
