//! Script-facing entry points.
//!
//! One function per operation the embedding host exposes to scripts. Each
//! call resolves its object by name, acts through a transient handle opened
//! with exactly the rights the action needs, and drops the handle before
//! returning — nothing is cached between calls.

use spindle_common::error::SyncError;
use spindle_common::rights::HandleRights;

use super::registry;

/// Create a named mutex, initially unowned.
///
/// If an object already exists under `name` it is left untouched; creating
/// an existing name is not an error.
pub fn mutex_create(name: &str) -> Result<(), SyncError> {
    registry::create_mutex(name);
    Ok(())
}

/// Block until the calling thread owns the named mutex.
///
/// There is no timeout and no way to abandon the wait: if no other thread
/// ever releases the mutex, the call blocks forever. Ownership persists
/// after the transient handle is dropped, until a matching
/// [`mutex_release`] from this thread.
pub fn mutex_acquire(name: &str) -> Result<(), SyncError> {
    registry::open_mutex(name, HandleRights::WAIT)?.wait()
}

/// Release one level of ownership of the named mutex.
///
/// Fails with [`SyncError::NotOwner`] when the calling thread does not hold
/// the mutex.
pub fn mutex_release(name: &str) -> Result<(), SyncError> {
    registry::open_mutex(name, HandleRights::MODIFY)?.release()
}

/// Create a named counting semaphore with `initial` permits out of `max`.
///
/// `initial` above `max` is rejected with [`SyncError::CreateFailed`]. If
/// an object already exists under `name` it is left untouched — including
/// its current count and maximum — and the call succeeds.
pub fn semaphore_create(name: &str, initial: u32, max: u32) -> Result<(), SyncError> {
    registry::create_semaphore(name, initial, max).map(|_| ())
}

/// Block until a permit of the named semaphore can be taken.
///
/// There is no timeout; the call returns once some other thread posts a
/// permit through [`semaphore_release`].
pub fn semaphore_acquire(name: &str) -> Result<(), SyncError> {
    registry::open_semaphore(name, HandleRights::WAIT)?.wait()
}

/// Return exactly one permit to the named semaphore.
///
/// Fails with [`SyncError::AtMaximum`] when the count is already at the
/// maximum fixed at creation.
pub fn semaphore_release(name: &str) -> Result<(), SyncError> {
    registry::open_semaphore(name, HandleRights::MODIFY)?.release()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::unique_name;

    #[test]
    fn mutex_full_cycle() {
        let name = unique_name("ops.mutex");
        mutex_create(&name).unwrap();
        mutex_acquire(&name).unwrap();
        mutex_release(&name).unwrap();
    }

    #[test]
    fn create_twice_then_acquire() {
        let name = unique_name("ops.mutex");
        mutex_create(&name).unwrap();
        mutex_create(&name).unwrap();
        mutex_acquire(&name).unwrap();
        mutex_release(&name).unwrap();
    }

    #[test]
    fn acquire_unknown_name_fails() {
        assert_eq!(mutex_acquire("ops.never-created"), Err(SyncError::NotFound));
        assert_eq!(
            semaphore_acquire("ops.never-created"),
            Err(SyncError::NotFound)
        );
    }

    #[test]
    fn release_unknown_name_fails() {
        assert_eq!(mutex_release("ops.never-created"), Err(SyncError::NotFound));
        assert_eq!(
            semaphore_release("ops.never-created"),
            Err(SyncError::NotFound)
        );
    }

    #[test]
    fn semaphore_capacity_is_validated() {
        let name = unique_name("ops.sem");
        assert_eq!(
            semaphore_create(&name, 3, 2),
            Err(SyncError::CreateFailed)
        );
    }

    #[test]
    fn semaphore_full_cycle() {
        let name = unique_name("ops.sem");
        semaphore_create(&name, 1, 1).unwrap();
        semaphore_acquire(&name).unwrap();
        semaphore_release(&name).unwrap();
        assert_eq!(semaphore_release(&name), Err(SyncError::AtMaximum));
    }

    #[test]
    fn release_by_non_owner_fails() {
        let name = unique_name("ops.mutex");
        mutex_create(&name).unwrap();
        mutex_acquire(&name).unwrap();

        let stolen = name.clone();
        std::thread::spawn(move || {
            assert_eq!(mutex_release(&stolen), Err(SyncError::NotOwner));
        })
        .join()
        .unwrap();

        mutex_release(&name).unwrap();
    }
}
