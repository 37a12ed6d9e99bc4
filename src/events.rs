//! Refresh signal between writers and the views that display a series.
//!
//! Writers publish a [`Series`] topic after each create, update or delete.
//! Topics queue up until the event loop drains them, so a burst of writes to
//! one series collapses into a single reload.

use anyhow::Result;
use std::collections::VecDeque;

use crate::models::Series;

/// Reload callback. Plain `fn` so the bus can live inside the state it
/// mutates: `S` is that state, `C` whatever the reload reads from.
pub(crate) type Subscriber<S, C> = fn(&mut S, &C) -> Result<()>;

pub(crate) struct RefreshBus<S, C> {
    subscribers: Vec<(Series, Subscriber<S, C>)>,
    pending: VecDeque<Series>,
}

impl<S, C> Default for RefreshBus<S, C> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
            pending: VecDeque::new(),
        }
    }
}

impl<S, C> RefreshBus<S, C> {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn subscribe(&mut self, topic: Series, callback: Subscriber<S, C>) {
        self.subscribers.push((topic, callback));
    }

    /// Queues a topic; a topic already waiting is not queued twice.
    pub(crate) fn publish(&mut self, topic: Series) {
        if !self.pending.contains(&topic) {
            self.pending.push_back(topic);
        }
    }

    pub(crate) fn publish_all(&mut self) {
        for topic in Series::all() {
            self.publish(*topic);
        }
    }

    pub(crate) fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Empties the queue and returns the callbacks to run, in publish order.
    /// The caller runs them against the state that owns this bus.
    pub(crate) fn take_jobs(&mut self) -> Vec<Subscriber<S, C>> {
        let mut jobs = Vec::new();
        while let Some(topic) = self.pending.pop_front() {
            jobs.extend(
                self.subscribers
                    .iter()
                    .filter(|(t, _)| *t == topic)
                    .map(|(_, cb)| *cb),
            );
        }
        jobs
    }
}
