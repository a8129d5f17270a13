//! Reputation tracker - bounded score with change notifications.

use super::events::Signal;

/// Reputation score clamped to [0, 100]. Only agent events move it;
/// there is no decay over time.
pub struct Reputation {
    value: i32,
    /// Fires with the new value, only when the clamped value changed.
    pub on_change: Signal<i32>,
}

impl Reputation {
    pub const MIN: i32 = 0;
    pub const MAX: i32 = 100;

    pub fn new(value: i32) -> Self {
        Self {
            value: value.clamp(Self::MIN, Self::MAX),
            on_change: Signal::default(),
        }
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    /// Set to the clamped value; emits only if it actually changed.
    pub fn set(&mut self, value: i32) {
        let clamped = value.clamp(Self::MIN, Self::MAX);
        if clamped != self.value {
            self.value = clamped;
            let value = self.value;
            self.on_change.emit(&value);
        }
    }

    pub fn add(&mut self, delta: i32) {
        self.set(self.value.saturating_add(delta));
    }

    pub fn remove(&mut self, delta: i32) {
        self.set(self.value.saturating_sub(delta));
    }
}

impl std::fmt::Debug for Reputation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reputation")
            .field("value", &self.value)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_clamped_to_bounds() {
        let mut rep = Reputation::new(50);
        rep.add(1000);
        assert_eq!(rep.value(), 100);
        rep.remove(1000);
        assert_eq!(rep.value(), 0);
    }

    #[test]
    fn test_stays_in_range_over_any_sequence() {
        let mut rep = Reputation::new(50);
        for i in 0..200 {
            if i % 3 == 0 {
                rep.add(7);
            } else {
                rep.remove(5);
            }
            assert!((0..=100).contains(&rep.value()));
        }
    }

    #[test]
    fn test_no_event_when_already_clamped() {
        let mut rep = Reputation::new(100);
        let fired = Arc::new(AtomicU32::new(0));
        {
            let fired = Arc::clone(&fired);
            rep.on_change.connect(move |_| {
                fired.fetch_add(1, Ordering::SeqCst);
            });
        }
        rep.add(5); // Already at max, clamp produces no change.
        assert_eq!(fired.load(Ordering::SeqCst), 0);
        rep.remove(2);
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
