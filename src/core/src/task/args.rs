//! Owned snapshots of script call sites.

use spindle_common::value::{InstanceRef, Value};

/// Borrowed view of a script call site, exactly as the host presents it:
/// the calling instance, the secondary instance, and the argument list.
#[derive(Debug, Clone, Copy)]
pub struct CallContext<'a> {
    /// The instance the script is running on, if any.
    pub this: Option<&'a InstanceRef>,
    /// The secondary instance of the call site, if any.
    pub other: Option<&'a InstanceRef>,
    /// Arguments passed to the script, in call order.
    pub args: &'a [Value],
}

/// Owned deep copy of a [`CallContext`], safe to hand to another thread.
///
/// The copy is complete before [`capture`](CallArgs::capture) returns: the
/// source context may be torn down or mutated the moment the constructing
/// call returns, and a worker reading the snapshot later still sees the
/// values as they were at hand-off. Argument values are copied element by
/// element; the instance references are recorded as references — the
/// instances themselves stay the host's responsibility.
///
/// Ownership is move-only. Exactly one thread — the one the snapshot was
/// handed to — drops it, which frees every copied element and the backing
/// list.
#[derive(Debug)]
pub struct CallArgs {
    this: Option<InstanceRef>,
    other: Option<InstanceRef>,
    args: Vec<Value>,
}

impl CallArgs {
    /// Copy `ctx` into an independently owned snapshot.
    pub fn capture(ctx: CallContext<'_>) -> Self {
        Self {
            this: ctx.this.cloned(),
            other: ctx.other.cloned(),
            args: ctx.args.to_vec(),
        }
    }

    /// The calling instance recorded at capture time.
    pub fn this(&self) -> Option<&InstanceRef> {
        self.this.as_ref()
    }

    /// The secondary instance recorded at capture time.
    pub fn other(&self) -> Option<&InstanceRef> {
        self.other.as_ref()
    }

    /// Number of copied arguments.
    pub fn count(&self) -> usize {
        self.args.len()
    }

    /// Copied argument at `index`, in the original call order.
    pub fn arg(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    /// All copied arguments.
    pub fn args(&self) -> &[Value] {
        &self.args
    }
}
