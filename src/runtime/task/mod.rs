//! Task primitives.
//!
//! This module defines the unit of work handled by the executor and the
//! one-shot channel through which its result is delivered.
//!
//! It includes:
//! - [`Task`], a callable that executes at most once,
//! - [`ResultChannel`], the read half of the task's result,
//! - the crate-private promise that fills the channel.
//!
//! Most users only see [`ResultChannel`], returned by
//! [`Scheduler::spawn`](crate::Scheduler::spawn).

pub(crate) mod core;
pub(crate) mod handle;

pub use self::core::Task;
pub use self::handle::ResultChannel;
