//! # Foreman
//!
//! **Foreman** is a small in-process task executor, built as the blocking
//! work pool of the **Nebula** ecosystem.
//!
//! A foreman thread (the *master*) pulls tasks from a pluggable
//! [`Scheduler`] and hands each one to the worker the scheduler picked.
//! Every worker owns a bounded queue and a dedicated OS thread. Submitting
//! work returns a [`ResultChannel`] that resolves once the task has run.
//!
//! Foreman offers:
//!
//! - **Run-once tasks**: a [`Task`] executes at most once, even when several
//!   threads race to invoke it
//! - **One-shot results**: a [`ResultChannel`] yields the value, or the panic
//!   message if the callable panicked, exactly once
//! - **Pluggable scheduling** through the [`Scheduler`] trait, with the
//!   first-come-first-served, round-robin [`Fcfs`] as default
//! - **Backpressure**: bounded queues slow submitters down instead of
//!   growing without limit, with [`Scheduler::try_spawn`] as a non-blocking
//!   alternative
//! - **Graceful shutdown**: dropping the [`Executor`] runs every accepted task
//!   before joining its threads
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use foreman::{Executor, Scheduler};
//!
//! fn main() -> Result<(), foreman::Error> {
//!     let executor = Executor::new(4)?;
//!
//!     let a = executor.scheduler().spawn(|| 6 * 7)?;
//!     let b = executor.scheduler().spawn(|| "done")?;
//!
//!     assert_eq!(a.recv(), Ok(42));
//!     assert_eq!(b.recv(), Ok("done"));
//!     Ok(())
//! }
//! ```
//!
//! ## Caveat
//!
//! Queues are bounded. A task that blocks on submitting more work while
//! every queue is full can stall the master; tasks that fan out should use
//! [`Scheduler::try_spawn`].
//!
//! ## Modules
//!
//! - [`scheduler`]: the scheduling trait and the default policy
//! - [`task`]: tasks and result channels

mod error;
mod runtime;

pub use error::{Error, TaskError};
pub use runtime::builder::{Config, ExecutorBuilder, MIN_THREADS};
pub use runtime::context::current_worker;
pub use runtime::scheduler::{self, Fcfs, ScheduledTask, Scheduler, WorkerId};
pub use runtime::task::{self, ResultChannel, Task};
pub use runtime::{Executor, ExecutorState};
