//! Access rights carried by open handles to named objects.

use bitflags::bitflags;

bitflags! {
    /// Actions a transient handle is allowed to perform.
    ///
    /// Rights are requested when the handle is opened and checked on every
    /// action; they are a property of the handle, not of the object behind
    /// it.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct HandleRights: u32 {
        /// Block on the object until it is signaled.
        const WAIT   = 1 << 0;
        /// Change the object's state: release a mutex, post a permit.
        const MODIFY = 1 << 1;
    }
}
