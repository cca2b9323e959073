use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::task_queue::{DeferredTaskQueue, PendingLoad};
use crate::core::ViewWindow;
use crate::error::ChartResult;

/// Which end of the loaded series a fetch should extend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadDirection {
    /// Older history, prepended at index 0.
    Past,
    /// Newer bars, appended at the tail.
    Future,
}

/// Injected data-fetch callback.
///
/// Returning `Ok(false)` signals that no new data was loaded; the edge lock
/// for that direction is released so a later approach can retry. Errors are
/// treated the same way — a permanent lock after a failed fetch would
/// silently stop all future auto-loading at that edge.
pub trait DataLoader {
    fn load(&mut self, direction: LoadDirection) -> ChartResult<bool>;
}

impl<F> DataLoader for F
where
    F: FnMut(LoadDirection) -> ChartResult<bool>,
{
    fn load(&mut self, direction: LoadDirection) -> ChartResult<bool> {
        self(direction)
    }
}

/// Cooperative per-edge lock + last-seen-length pairs.
///
/// Not a concurrency primitive: the whole render path runs on one logical
/// thread, and the lock only collapses repeated edge-proximity events into
/// at most one in-flight request per edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeLockState {
    left_locked: bool,
    right_locked: bool,
    left_seen_len: Option<usize>,
    right_seen_len: Option<usize>,
}

impl EdgeLockState {
    #[must_use]
    pub fn is_locked(self, direction: LoadDirection) -> bool {
        match direction {
            LoadDirection::Past => self.left_locked,
            LoadDirection::Future => self.right_locked,
        }
    }

    fn lock(&mut self, direction: LoadDirection, total_len: usize) {
        match direction {
            LoadDirection::Past => {
                self.left_locked = true;
                self.left_seen_len = Some(total_len);
            }
            LoadDirection::Future => {
                self.right_locked = true;
                self.right_seen_len = Some(total_len);
            }
        }
    }

    pub fn release(&mut self, direction: LoadDirection) {
        match direction {
            LoadDirection::Past => {
                self.left_locked = false;
                self.left_seen_len = None;
            }
            LoadDirection::Future => {
                self.right_locked = false;
                self.right_seen_len = None;
            }
        }
    }

    /// A changed dataset length means a lock's premise is stale; release it.
    fn reset_stale(&mut self, total_len: usize) {
        if self.left_locked && self.left_seen_len != Some(total_len) {
            self.release(LoadDirection::Past);
        }
        if self.right_locked && self.right_seen_len != Some(total_len) {
            self.release(LoadDirection::Future);
        }
    }
}

/// Checks viewport proximity to both data edges and schedules deferred loads.
///
/// Per edge: trigger when `distance <= threshold` and the edge is not
/// already locked. The lock is set synchronously, before the load is queued,
/// so render ticks arriving while a fetch is outstanding cannot duplicate
/// it. Returns the directions triggered by this call.
pub fn check_edges(
    locks: &mut EdgeLockState,
    window: ViewWindow,
    total_len: usize,
    threshold: usize,
    queue: &mut DeferredTaskQueue,
) -> (bool, bool) {
    if total_len == 0 {
        return (false, false);
    }

    locks.reset_stale(total_len);

    let distance_left = window.start();
    let distance_right = (total_len - 1).saturating_sub(window.end());

    let trigger_left = distance_left <= threshold && !locks.is_locked(LoadDirection::Past);
    if trigger_left {
        locks.lock(LoadDirection::Past, total_len);
        queue.schedule(PendingLoad {
            direction: LoadDirection::Past,
        });
        debug!(distance = distance_left, "left edge load triggered");
    }

    let trigger_right = distance_right <= threshold && !locks.is_locked(LoadDirection::Future);
    if trigger_right {
        locks.lock(LoadDirection::Future, total_len);
        queue.schedule(PendingLoad {
            direction: LoadDirection::Future,
        });
        debug!(distance = distance_right, "right edge load triggered");
    }

    (trigger_left, trigger_right)
}

/// Reconciles lock state after a drained load completes.
///
/// "No data loaded" and failure both release the lock; a successful load
/// leaves it set, to be cleared by the length-change reset on the next check.
pub fn reconcile_load_result(
    locks: &mut EdgeLockState,
    direction: LoadDirection,
    result: ChartResult<bool>,
) {
    match result {
        Ok(true) => {}
        Ok(false) => {
            debug!(?direction, "edge load reported no new data; releasing lock");
            locks.release(direction);
        }
        Err(err) => {
            warn!(?direction, error = %err, "edge load failed; releasing lock");
            locks.release(direction);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EdgeLockState, LoadDirection, check_edges, reconcile_load_result};
    use crate::api::task_queue::DeferredTaskQueue;
    use crate::core::ViewWindow;
    use crate::error::ChartError;

    #[test]
    fn trigger_sets_lock_before_queueing() {
        let mut locks = EdgeLockState::default();
        let mut queue = DeferredTaskQueue::default();
        let window = ViewWindow::new(5, 84).expect("window");

        let (left, right) = check_edges(&mut locks, window, 500, 10, &mut queue);
        assert!(left);
        assert!(!right);
        assert!(locks.is_locked(LoadDirection::Past));
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn locked_edge_does_not_retrigger() {
        let mut locks = EdgeLockState::default();
        let mut queue = DeferredTaskQueue::default();
        let window = ViewWindow::new(5, 84).expect("window");

        check_edges(&mut locks, window, 500, 10, &mut queue);
        queue.drain();
        let (left, _) = check_edges(&mut locks, window, 500, 10, &mut queue);
        assert!(!left);
        assert!(queue.is_empty());
    }

    #[test]
    fn length_change_resets_stale_lock() {
        let mut locks = EdgeLockState::default();
        let mut queue = DeferredTaskQueue::default();
        let window = ViewWindow::new(5, 84).expect("window");

        check_edges(&mut locks, window, 500, 10, &mut queue);
        // The fetch grew the dataset; the old lock's premise is stale.
        let (left, _) = check_edges(&mut locks, window, 700, 10, &mut queue);
        assert!(left);
    }

    #[test]
    fn failure_releases_lock() {
        let mut locks = EdgeLockState::default();
        let mut queue = DeferredTaskQueue::default();
        let window = ViewWindow::new(0, 79).expect("window");
        check_edges(&mut locks, window, 500, 10, &mut queue);

        reconcile_load_result(
            &mut locks,
            LoadDirection::Past,
            Err(ChartError::InvalidData("fetch failed".to_owned())),
        );
        assert!(!locks.is_locked(LoadDirection::Past));

        check_edges(&mut locks, window, 500, 10, &mut queue);
        reconcile_load_result(&mut locks, LoadDirection::Past, Ok(false));
        assert!(!locks.is_locked(LoadDirection::Past));
    }

    #[test]
    fn single_bar_dataset_triggers_both_edges_once() {
        let mut locks = EdgeLockState::default();
        let mut queue = DeferredTaskQueue::default();
        let window = ViewWindow::new(0, 0).expect("window");

        let (left, right) = check_edges(&mut locks, window, 1, 10, &mut queue);
        assert!(left && right);
        assert_eq!(queue.len(), 2);

        let (left, right) = check_edges(&mut locks, window, 1, 10, &mut queue);
        assert!(!left && !right);
    }
}
