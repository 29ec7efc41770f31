//! Demo: submitting work to an executor and collecting the results.
//!
//! Run with `RUST_LOG=foreman=debug` to watch worker and master lifecycle.

use foreman::{Executor, Scheduler, current_worker};
use tracing_subscriber::EnvFilter;

fn fibonacci(n: u64) -> u64 {
    match n {
        0 | 1 => n,
        _ => fibonacci(n - 1) + fibonacci(n - 2),
    }
}

fn main() -> Result<(), foreman::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // One master thread and three workers
    let executor = Executor::new(4)?;

    let channels = (20..30)
        .map(|n| executor.scheduler().spawn(move || (n, fibonacci(n), current_worker())))
        .collect::<Result<Vec<_>, _>>()?;

    for channel in channels {
        match channel.recv() {
            Ok((n, value, worker)) => println!("fib({n}) = {value} on worker {worker:?}"),
            Err(err) => eprintln!("task failed: {err}"),
        }
    }

    let failing = executor.scheduler().spawn(|| -> u64 { panic!("division by zero") })?;
    if let Err(err) = failing.recv() {
        println!("captured: {err}");
    }

    Ok(())
}
