//! Delayed, cancellable label reveals.
//!
//! Every reveal carries the generation it was scheduled under. Starting a new
//! generation (on every activation and reset) drops all pending reveals, and
//! [`RevealQueue::take_due`] discards anything from an older generation, so a
//! cancelled reveal can never touch the scene.

use std::time::Duration;

use crate::models::{LayerId, SubItemId};

/// A label reveal waiting for its time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledReveal {
    pub layer: LayerId,
    pub sub_item: SubItemId,
    /// Generation the reveal belongs to.
    pub generation: u64,
    /// Delay requested when scheduling.
    pub delay: Duration,
    /// Absolute stage time at which the reveal fires.
    pub due: Duration,
}

/// Pending reveals, ordered by scheduling.
#[derive(Debug, Clone, Default)]
pub struct RevealQueue {
    pending: Vec<ScheduledReveal>,
    generation: u64,
}

impl RevealQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a new generation, cancelling every pending reveal.
    pub fn next_generation(&mut self) -> u64 {
        self.generation += 1;
        if !self.pending.is_empty() {
            tracing::debug!(
                "Cancelled {} pending reveal(s) at generation {}",
                self.pending.len(),
                self.generation
            );
            self.pending.clear();
        }
        self.generation
    }

    /// Schedule a reveal `delay` after `now` under the current generation.
    pub fn schedule(&mut self, now: Duration, delay: Duration, layer: LayerId, sub_item: SubItemId) {
        self.pending.push(ScheduledReveal {
            layer,
            sub_item,
            generation: self.generation,
            delay,
            due: now + delay,
        });
    }

    /// Cancel every pending reveal of `layer`. Returns how many were dropped.
    pub fn cancel_layer(&mut self, layer: LayerId) -> usize {
        let before = self.pending.len();
        self.pending.retain(|r| r.layer != layer);
        before - self.pending.len()
    }

    /// Remove and return the reveals due at `now`, earliest first.
    ///
    /// Reveals from an older generation are dropped instead of returned.
    pub fn take_due(&mut self, now: Duration) -> Vec<ScheduledReveal> {
        let generation = self.generation;
        let mut due = Vec::new();
        self.pending.retain(|r| {
            if r.due <= now {
                if r.generation == generation {
                    due.push(*r);
                }
                false
            } else {
                true
            }
        });
        due.sort_by_key(|r| r.due);
        due
    }

    pub fn pending(&self) -> &[ScheduledReveal] {
        &self.pending
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentCatalog;

    fn ids() -> (LayerId, LayerId, Vec<SubItemId>, Vec<SubItemId>) {
        let catalog = ContentCatalog::builtin();
        let a = catalog.layer_id("automation").unwrap();
        let c = catalog.layer_id("cognitive").unwrap();
        (
            a,
            c,
            catalog.sub_items_of(a).collect(),
            catalog.sub_items_of(c).collect(),
        )
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    #[test]
    fn test_take_due_in_time_order() {
        let (a, _, subs, _) = ids();
        let mut queue = RevealQueue::new();
        queue.schedule(ms(0), ms(2000), a, subs[1]);
        queue.schedule(ms(0), ms(0), a, subs[0]);
        queue.schedule(ms(0), ms(4000), a, subs[2]);

        let first = queue.take_due(ms(0));
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].sub_item, subs[0]);

        let rest = queue.take_due(ms(5000));
        assert_eq!(
            rest.iter().map(|r| r.sub_item).collect::<Vec<_>>(),
            vec![subs[1], subs[2]]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_next_generation_cancels_pending() {
        let (a, _, subs, _) = ids();
        let mut queue = RevealQueue::new();
        queue.schedule(ms(0), ms(2000), a, subs[0]);
        assert_eq!(queue.next_generation(), 1);
        assert!(queue.is_empty());
        assert!(queue.take_due(ms(10_000)).is_empty());
    }

    #[test]
    fn test_stale_generation_never_fires() {
        let (a, _, subs, _) = ids();
        let mut queue = RevealQueue::new();
        queue.schedule(ms(0), ms(100), a, subs[0]);
        // Bump without going through next_generation's cleanup path.
        queue.generation += 1;
        assert!(queue.take_due(ms(1000)).is_empty());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancel_layer_keeps_other_layers() {
        let (a, c, subs_a, subs_c) = ids();
        let mut queue = RevealQueue::new();
        queue.schedule(ms(0), ms(0), a, subs_a[0]);
        queue.schedule(ms(0), ms(0), c, subs_c[0]);

        assert_eq!(queue.cancel_layer(a), 1);
        assert_eq!(queue.pending().len(), 1);
        assert_eq!(queue.pending()[0].layer, c);
    }
}
