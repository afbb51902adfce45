use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::{error::Result, DEFAULT_SEED, MATRIX_SIZE};

/// Parameters of one benchmark run.
///
/// The executable always runs with [`BenchConfig::default`]; the `with_*`
/// methods exist for tests and the criterion benchmarks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Side length of the square input matrix.
    pub size: usize,
    /// Seed of the generator that fills the input matrix.
    pub seed: u64,
    /// Worker threads for the parallel kernel. `None` lets rayon pick
    /// (one per logical CPU unless `RAYON_NUM_THREADS` says otherwise).
    pub workers: Option<usize>,
    /// Whether each round runs an untimed warm-up invocation first.
    pub warm_up: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            size: MATRIX_SIZE,
            seed: DEFAULT_SEED,
            workers: None,
            warm_up: true,
        }
    }
}

impl BenchConfig {
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_warm_up(mut self, warm_up: bool) -> Self {
        self.warm_up = warm_up;
        self
    }

    /// Builds the pool every kernel round runs inside.
    ///
    /// A dedicated pool rather than rayon's global one, so that the worker
    /// count is fixed for the whole run.
    pub fn thread_pool(&self) -> Result<ThreadPool> {
        let mut builder = ThreadPoolBuilder::new().thread_name(|i| format!("loopmul-worker-{i}"));
        if let Some(workers) = self.workers {
            builder = builder.num_threads(workers);
        }
        Ok(builder.build()?)
    }
}
