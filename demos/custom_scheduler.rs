//! Demo: plugging a custom scheduling policy into the executor.
//!
//! `Pinned` keeps first-come-first-served order but routes every task to
//! worker 0, turning the pool into a serial queue with a dedicated thread.

use foreman::{Error, Executor, Fcfs, ScheduledTask, Scheduler, Task, current_worker};
use tracing_subscriber::EnvFilter;

struct Pinned {
    inner: Fcfs,
}

impl Scheduler for Pinned {
    fn new(workers: usize, capacity: usize) -> Self {
        Self {
            inner: Fcfs::new(workers, capacity),
        }
    }

    fn schedule(&self, task: Task) -> Result<(), Error> {
        self.inner.schedule(task)
    }

    fn try_schedule(&self, task: Task) -> Result<(), Error> {
        self.inner.try_schedule(task)
    }

    fn has_tasks(&self) -> bool {
        self.inner.has_tasks()
    }

    fn next(&self) -> Option<ScheduledTask> {
        let scheduled = self.inner.next()?;

        Some(ScheduledTask {
            task: scheduled.task,
            worker: 0,
        })
    }

    fn close(&self) {
        self.inner.close();
    }
}

fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let executor = Executor::<Pinned>::with_scheduler(3)?;

    let channels = (0..5)
        .map(|i| executor.scheduler().spawn(move || (i, current_worker())))
        .collect::<Result<Vec<_>, _>>()?;

    for channel in channels {
        if let Ok((i, worker)) = channel.recv() {
            println!("task {i} ran on worker {worker:?}");
        }
    }

    Ok(())
}
