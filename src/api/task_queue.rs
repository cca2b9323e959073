use smallvec::SmallVec;

use crate::api::edge_loader::LoadDirection;

/// A data-load request deferred past the current render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingLoad {
    pub direction: LoadDirection,
}

/// Explicit deferral queue decoupling edge triggers from the render stack.
///
/// The edge check schedules loads here synchronously; the host drains the
/// queue after its render turn completes. This keeps the same logic working
/// under a single-threaded event loop or a task-pool host without binding to
/// any particular scheduler.
#[derive(Debug, Default)]
pub struct DeferredTaskQueue {
    pending: SmallVec<[PendingLoad; 2]>,
}

impl DeferredTaskQueue {
    /// Schedules a load unless one for the same direction is already queued.
    pub fn schedule(&mut self, load: PendingLoad) {
        if self
            .pending
            .iter()
            .any(|queued| queued.direction == load.direction)
        {
            return;
        }
        self.pending.push(load);
    }

    /// Takes every pending load, leaving the queue empty.
    pub fn drain(&mut self) -> SmallVec<[PendingLoad; 2]> {
        std::mem::take(&mut self.pending)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
