//! One-shot deferred events
//!
//! Stands in for a `setTimeout`-style callback: the owner advances it with
//! real elapsed time and acts when it fires. Each schedule gets a fresh
//! handle, and cancelling drops the pending event outright, so a timer from a
//! previous run can never fire into a new one.

/// Identifies one scheduled firing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    handle: TimerHandle,
    remaining: f32,
}

/// A cancellable one-shot timer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeferredTimer {
    pending: Option<Pending>,
    generation: u64,
}

impl DeferredTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire after `delay` seconds, replacing anything already pending
    pub fn schedule(&mut self, delay: f32) -> TimerHandle {
        self.generation += 1;
        let handle = TimerHandle(self.generation);
        self.pending = Some(Pending {
            handle,
            remaining: delay,
        });
        handle
    }

    /// Drop the pending event. Safe to call when nothing is pending;
    /// returns whether something was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Handle of the pending event, if any
    pub fn handle(&self) -> Option<TimerHandle> {
        self.pending.map(|p| p.handle)
    }

    /// Seconds until the pending event fires
    pub fn remaining(&self) -> Option<f32> {
        self.pending.map(|p| p.remaining)
    }

    /// Let `dt` seconds pass; returns the handle if the event fired
    pub fn advance(&mut self, dt: f32) -> Option<TimerHandle> {
        let pending = self.pending.as_mut()?;
        pending.remaining -= dt;
        if pending.remaining <= 0.0 {
            self.pending.take().map(|p| p.handle)
        } else {
            None
        }
    }
}
