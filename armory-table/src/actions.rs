//! Bulk toolbar actions.

use std::sync::Arc;

use tokio::sync::{Semaphore, SemaphorePermit};

use crate::collaborators::{ItemStore, Notification, Notifier};
use crate::error::ActionError;
use crate::item::TableItem;

/// Admits one invocation of an action at a time.
///
/// While a permit is held, further attempts are turned away instead of
/// queued. The permit is released when dropped.
#[derive(Debug)]
pub struct ActionTracker {
    semaphore: Semaphore,
}

impl ActionTracker {
    pub fn new() -> Self {
        Self {
            semaphore: Semaphore::new(1),
        }
    }

    /// Start an invocation, or `None` if one is already running.
    pub fn try_begin(&self) -> Option<SemaphorePermit<'_>> {
        self.semaphore.try_acquire().ok()
    }

    pub fn is_pending(&self) -> bool {
        self.semaphore.available_permits() == 0
    }
}

impl Default for ActionTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a bulk lock or unlock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockOutcome {
    /// Items whose lock state was changed before the batch stopped.
    pub applied: usize,
    /// The failure that stopped the batch, if any.
    pub error: Option<ActionError>,
}

impl LockOutcome {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Calls `touch` on the store when dropped, whatever happened before.
struct TouchOnDrop<'a, I: TableItem> {
    store: &'a dyn ItemStore<I>,
}

impl<I: TableItem> Drop for TouchOnDrop<'_, I> {
    fn drop(&mut self) {
        self.store.touch();
    }
}

/// Lock or unlock `items` one at a time.
///
/// Stops at the first failure: earlier items keep their new state, later
/// items are never sent. Every batch ends with exactly one notification,
/// an error naming the failure or a success carrying the item count.
/// The store is touched once when the batch ends, including on failure.
pub(crate) async fn lock_items<I: TableItem>(
    store: &dyn ItemStore<I>,
    notifier: &dyn Notifier,
    items: &[Arc<I>],
    locked: bool,
) -> LockOutcome {
    let _touch = TouchOnDrop { store };
    let mut applied = 0;

    for item in items {
        if let Err(error) = store.set_lock_state(item, locked).await {
            log::warn!(
                "[actions] {} failed on {} after {} of {} items: {}",
                if locked { "lock" } else { "unlock" },
                item.id(),
                applied,
                items.len(),
                error
            );
            let title = if locked { "Lock failed" } else { "Unlock failed" };
            notifier.notify(Notification::error(title, error.message.clone()));
            return LockOutcome {
                applied,
                error: Some(error),
            };
        }
        applied += 1;
    }

    let verb = if locked { "Locked" } else { "Unlocked" };
    log::debug!("[actions] {} {} items", verb, applied);
    notifier.notify(Notification::success(
        format!("{} items", verb),
        format!("{} {} items", verb, applied),
    ));
    LockOutcome {
        applied,
        error: None,
    }
}
