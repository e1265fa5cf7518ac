//! Packaging script calls for worker threads.
//!
//! A script call's arguments may live in storage the host reuses the moment
//! the synchronous call returns. [`spawn_worker`] therefore copies the call
//! site into a [`CallArgs`] on the calling thread, before the worker
//! starts, and moves the copy into the worker; the worker frees it when it
//! returns.

mod args;

pub use args::{CallArgs, CallContext};

use std::thread::{self, JoinHandle};

/// Copy `ctx` and run `work` on a new worker thread that owns the copy.
///
/// The snapshot is taken on the calling thread, so the source context may
/// be invalidated as soon as this function returns. Dropping the returned
/// handle detaches the worker.
pub fn spawn_worker<F>(ctx: CallContext<'_>, work: F) -> JoinHandle<()>
where
    F: FnOnce(CallArgs) + Send + 'static,
{
    let args = CallArgs::capture(ctx);
    thread::spawn(move || work(args))
}

/// Number of hardware threads reported by the host machine.
pub fn cpu_count() -> usize {
    thread::available_parallelism()
        .map(usize::from)
        .unwrap_or(1)
}
