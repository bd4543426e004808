//! Bookkeeping for the background timer attached to a checkout session.
//!
//! The tasks themselves are spawned by the checkout actor (see
//! [`crate::checkout_actor::timer`]); a session only records which one is
//! running and how to stop it.

use serde::{Deserialize, Serialize};
use tokio::task::AbortHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerKind {
    /// The QRIS payment countdown.
    Countdown,
    /// Delay between a confirmed payment and clearing the cart.
    Handoff,
    /// Order progress on the success screen.
    Tracking,
}

/// The session's active timer, if any.
///
/// Every start bumps the generation. Timers that report back tag their
/// messages with the generation they were started under, so a message sent
/// by a replaced timer can be told apart from the current one.
///
/// Clones (the snapshots handed out by `get`) remember the kind but not the
/// handle, so only the actor's own copy can abort the task.
#[derive(Debug, Default)]
pub struct TimerSlot {
    kind: Option<TimerKind>,
    generation: u64,
    handle: Option<AbortHandle>,
}

impl Clone for TimerSlot {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            generation: self.generation,
            handle: None,
        }
    }
}

impl TimerSlot {
    pub fn kind(&self) -> Option<TimerKind> {
        self.kind
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether a message tagged with `generation` comes from the running
    /// timer of the given kind.
    pub fn is_current(&self, kind: TimerKind, generation: u64) -> bool {
        self.kind == Some(kind) && self.generation == generation
    }

    /// Aborts the active timer and installs the one `spawn` creates for the
    /// next generation.
    pub(crate) fn start(&mut self, kind: TimerKind, spawn: impl FnOnce(u64) -> AbortHandle) {
        self.cancel();
        self.generation = self.generation.wrapping_add(1);
        self.handle = Some(spawn(self.generation));
        self.kind = Some(kind);
    }

    /// Aborts the active timer.
    pub(crate) fn cancel(&mut self) {
        self.abort();
        self.kind = None;
        self.handle = None;
    }

    /// Forgets a timer that is ending on its own. Must not abort: the caller is
    /// usually that timer's task, waiting for the reply.
    pub(crate) fn finish(&mut self) {
        self.kind = None;
        self.handle = None;
    }

    pub(crate) fn abort(&self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::pending;

    #[tokio::test]
    async fn test_start_aborts_previous_timer() {
        let first = tokio::spawn(pending::<()>());
        let second = tokio::spawn(pending::<()>());

        let mut slot = TimerSlot::default();
        slot.start(TimerKind::Countdown, |_| first.abort_handle());
        slot.start(TimerKind::Tracking, |_| second.abort_handle());

        assert!(first.await.unwrap_err().is_cancelled());
        assert_eq!(slot.kind(), Some(TimerKind::Tracking));

        slot.cancel();
        assert!(second.await.unwrap_err().is_cancelled());
        assert_eq!(slot.kind(), None);
    }

    #[tokio::test]
    async fn test_each_start_gets_a_new_generation() {
        let mut slot = TimerSlot::default();
        let mut seen = Vec::new();

        for _ in 0..2 {
            let task = tokio::spawn(pending::<()>());
            slot.start(TimerKind::Countdown, |generation| {
                seen.push(generation);
                task.abort_handle()
            });
        }

        assert_eq!(seen, vec![1, 2]);
        assert!(slot.is_current(TimerKind::Countdown, 2));
        assert!(!slot.is_current(TimerKind::Countdown, 1));
        assert!(!slot.is_current(TimerKind::Tracking, 2));

        slot.cancel();
        assert!(!slot.is_current(TimerKind::Countdown, 2));
    }

    #[tokio::test]
    async fn test_finish_leaves_task_running() {
        let task = tokio::spawn(async { 7 });

        let mut slot = TimerSlot::default();
        slot.start(TimerKind::Handoff, |_| task.abort_handle());
        slot.finish();

        assert_eq!(task.await.unwrap(), 7);
        assert_eq!(slot.kind(), None);
    }

    #[tokio::test]
    async fn test_clone_cannot_abort() {
        let task = tokio::spawn(async { 1 });

        let mut slot = TimerSlot::default();
        slot.start(TimerKind::Countdown, |_| task.abort_handle());
        let mut snapshot = slot.clone();
        assert_eq!(snapshot.kind(), Some(TimerKind::Countdown));
        assert_eq!(snapshot.generation(), 1);

        snapshot.cancel();
        assert_eq!(task.await.unwrap(), 1);
    }
}
