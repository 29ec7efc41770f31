//! Core executor components.
//!
//! This module contains the building blocks of the executor, leaves first:
//! - `queue` and `signal`: the bounded hand-off queue and the readiness
//!   event every blocking component is built on,
//! - [`task`]: run-once tasks and their result channels,
//! - `worker`: threads that drain their own task queue,
//! - [`scheduler`]: the policy deciding order and worker placement,
//! - `core`: the executor and its master thread.
//!
//! Most users will interact with [`Executor`] and
//! [`Scheduler::spawn`](scheduler::Scheduler::spawn) rather than with these
//! components directly.

mod core;
mod queue;
mod signal;
mod worker;

pub(crate) mod builder;
pub(crate) mod context;

pub mod scheduler;
pub mod task;

pub use self::core::{Executor, ExecutorState};
