use chrono::Utc;
use rand::Rng;
use std::cell::Cell;

/// Source of entity identifiers, injected into every store that creates
/// records. Production uses wall-clock ids; tests swap in a deterministic
/// counter.
pub trait IdGenerator {
    /// Creation-ordered id for jobs, events, posts and education items.
    fn next_id(&self) -> String;

    /// Collision-resistant id for responses and certificates.
    fn random_id(&self) -> String;
}

/// Unix-millis timestamp with a random 4-digit suffix. The suffix keeps
/// rapid-fire creation from colliding within one millisecond; this is only
/// adequate for a single-writer session, not a multi-client backend.
pub struct ClockIds;

impl IdGenerator for ClockIds {
    fn next_id(&self) -> String {
        let millis = Utc::now().timestamp_millis();
        let suffix: u16 = rand::thread_rng().gen_range(0..10_000);
        format!("{millis}{suffix:04}")
    }

    fn random_id(&self) -> String {
        let bits: u128 = rand::random();
        format!("{bits:032x}")
    }
}

/// Deterministic generator for tests: "id-1", "id-2", ...
pub struct SequentialIds {
    counter: Cell<u64>,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self { counter: Cell::new(0) }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self) -> String {
        let n = self.counter.get() + 1;
        self.counter.set(n);
        format!("id-{n}")
    }

    fn random_id(&self) -> String {
        let n = self.counter.get() + 1;
        self.counter.set(n);
        format!("rid-{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_count_up() {
        let ids = SequentialIds::new();
        assert_eq!(ids.next_id(), "id-1");
        assert_eq!(ids.random_id(), "rid-2");
        assert_eq!(ids.next_id(), "id-3");
    }

    #[test]
    fn clock_ids_are_distinct() {
        let ids = ClockIds;
        assert_ne!(ids.random_id(), ids.random_id());
    }
}
