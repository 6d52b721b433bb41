//! Cooperative completion scheduler.
//!
//! Playback hands animated effects to an external tween engine and finishes
//! via callback. This queue models that handoff single-threaded: `schedule`
//! enqueues a completion, `pump` delivers each pending completion exactly
//! once in schedule order, and a completion may schedule follow-up work,
//! which is how sequential chaining ("write the next item only after the
//! previous one finished") is expressed. `cancel` discards an owner's
//! pending completions without running them.

use std::collections::VecDeque;

use crate::render::surface::DrawSurface;

/// Identifies who scheduled a completion, so cancellation can discard a
/// single command's pending work.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OwnerId(pub u64);

/// Runs when the tween an owner scheduled would have finished.
pub type Completion = Box<dyn FnOnce(&mut TweenQueue, &mut dyn DrawSurface)>;

#[derive(Default)]
pub struct TweenQueue {
    pending: VecDeque<(OwnerId, Completion)>,
    next_owner: u64,
}

impl TweenQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a fresh owner id.
    pub fn register_owner(&mut self) -> OwnerId {
        let id = OwnerId(self.next_owner);
        self.next_owner += 1;
        id
    }

    /// Enqueue a completion on behalf of `owner`.
    pub fn schedule(&mut self, owner: OwnerId, on_complete: Completion) {
        self.pending.push_back((owner, on_complete));
    }

    /// Discard every pending completion scheduled by `owner`.
    pub fn cancel(&mut self, owner: OwnerId) {
        self.pending.retain(|(o, _)| *o != owner);
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Deliver the next pending completion, if any. Returns whether one ran.
    pub fn pump_one(&mut self, surface: &mut dyn DrawSurface) -> bool {
        match self.pending.pop_front() {
            Some((_, complete)) => {
                complete(self, surface);
                true
            }
            None => false,
        }
    }

    /// Deliver completions until the queue drains, including any scheduled
    /// by the completions themselves. Returns how many ran.
    pub fn pump(&mut self, surface: &mut dyn DrawSurface) -> usize {
        let mut ran = 0;
        while self.pump_one(surface) {
            ran += 1;
        }
        ran
    }
}

impl std::fmt::Debug for TweenQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TweenQueue")
            .field("pending", &self.pending.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/command/queue.rs"]
mod tests;
