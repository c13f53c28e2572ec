use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::persist::{StorageBackend, load_state, save_state};

pub type SubscriptionId = u64;

type Listener<S> = Box<dyn Fn(&S)>;

/// Generic reactive state container. Holds one state value, notifies
/// subscribers on every update, and mirrors the whole state to the backend
/// under a fixed key.
///
/// Single-threaded by design: there is exactly one logical writer (the
/// current UI session), so `Rc`/`RefCell` rather than locks.
pub struct Store<S> {
    key: &'static str,
    state: RefCell<S>,
    listeners: RefCell<Vec<(SubscriptionId, Listener<S>)>>,
    next_subscription: Cell<SubscriptionId>,
    backend: Rc<dyn StorageBackend>,
}

impl<S: Serialize + DeserializeOwned> Store<S> {
    /// Seeds state with one load from the backend; a missing or corrupt blob
    /// falls back to `default`.
    pub fn new(backend: Rc<dyn StorageBackend>, key: &'static str, default: S) -> Self {
        let state = load_state(backend.as_ref(), key).unwrap_or(default);
        Self {
            key,
            state: RefCell::new(state),
            listeners: RefCell::new(Vec::new()),
            next_subscription: Cell::new(0),
            backend,
        }
    }

    /// Read a slice of state. The closure must not call back into `update`.
    pub fn with<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Owned copy of the full state.
    pub fn snapshot(&self) -> S
    where
        S: Clone,
    {
        self.state.borrow().clone()
    }

    /// Mutate state, notify subscribers, then mirror the entire state to the
    /// backend. The new state is visible to readers as soon as this returns;
    /// the persistence write is fire-and-forget.
    pub fn update(&self, f: impl FnOnce(&mut S)) {
        f(&mut self.state.borrow_mut());
        let state = self.state.borrow();
        for (_, listener) in self.listeners.borrow().iter() {
            listener(&state);
        }
        save_state(self.backend.as_ref(), self.key, &*state);
    }

    /// Register a listener invoked with the new state after every update.
    pub fn subscribe(&self, f: impl Fn(&S) + 'static) -> SubscriptionId {
        let id = self.next_subscription.get();
        self.next_subscription.set(id + 1);
        self.listeners.borrow_mut().push((id, Box::new(f)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.borrow_mut().retain(|(other, _)| *other != id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::{MemoryBackend, NullBackend, StorageBackend};

    #[test]
    fn update_is_visible_immediately() {
        let store = Store::new(Rc::new(NullBackend), "t.counter", 0i64);
        store.update(|n| *n += 5);
        assert_eq!(store.with(|n| *n), 5);
    }

    #[test]
    fn update_persists_whole_state() {
        let backend = Rc::new(MemoryBackend::new());
        let store = Store::new(backend.clone(), "t.items", Vec::<String>::new());
        store.update(|items| items.push("a".into()));
        store.update(|items| items.push("b".into()));
        assert_eq!(backend.load("t.items").as_deref(), Some(r#"["a","b"]"#));
    }

    #[test]
    fn construction_seeds_from_backend() {
        let backend = Rc::new(MemoryBackend::new());
        backend.save("t.items", r#"["seeded"]"#).unwrap();
        let store = Store::new(backend, "t.items", Vec::<String>::new());
        assert_eq!(store.snapshot(), vec!["seeded".to_string()]);
    }

    #[test]
    fn corrupt_seed_falls_back_to_default() {
        let backend = Rc::new(MemoryBackend::new());
        backend.save("t.items", "{broken").unwrap();
        let store = Store::new(backend, "t.items", vec!["default".to_string()]);
        assert_eq!(store.snapshot(), vec!["default".to_string()]);
    }

    #[test]
    fn subscribers_see_every_update_until_unsubscribed() {
        let store = Store::new(Rc::new(NullBackend), "t.counter", 0i64);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let id = store.subscribe(move |n| sink.borrow_mut().push(*n));
        store.update(|n| *n = 1);
        store.update(|n| *n = 2);
        store.unsubscribe(id);
        store.update(|n| *n = 3);
        assert_eq!(*seen.borrow(), vec![1, 2]);
    }
}
