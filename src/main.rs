use loopmul::{
    harness::{run_reference, run_round},
    matrix::random_square,
    BenchConfig, Kernel, Result,
};
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let config = BenchConfig::default();
    let pool = config.thread_pool()?;
    info!(
        started = %chrono::Local::now().to_rfc3339(),
        size = config.size,
        seed = config.seed,
        workers = pool.current_num_threads(),
        "starting benchmark"
    );

    let a = random_square(config.size, config.seed)?;
    info!("input generated");

    println!("{}", run_reference(&a, &a));

    for kernel in Kernel::ALL {
        let (timing, _) = run_round(kernel, &a, &a, &pool, config.warm_up)?;
        println!("{timing}");
    }

    Ok(())
}
