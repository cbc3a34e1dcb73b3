//! History Page Store.
//!
//! Passive container for the sidebar's `HistoryState`. Callers compute the
//! next state themselves; the store only swaps it in, tells subscribers, and
//! refuses writes once the owning view has been unmounted.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use crate::types::history::HistoryState;

/// Callback invoked with the new state after every successful write.
pub type Listener = Arc<dyn Fn(&HistoryState) + Send + Sync>;

/// Trait defining the store's read/write contract.
pub trait HistoryStoreTrait {
    fn read(&self) -> HistoryState;
    fn replace(&self, new_state: HistoryState) -> bool;
    fn is_alive(&self) -> bool;
    fn close(&self);
}

/// In-memory store for one mounted history view.
pub struct HistoryStore {
    state: Mutex<HistoryState>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
    alive: AtomicBool,
}

/// Handle returned by [`HistoryStore::subscribe`].
pub struct Subscription {
    store: Weak<HistoryStore>,
    id: u64,
}

impl Subscription {
    /// Stops delivering state changes to the listener.
    pub fn unsubscribe(self) {
        if let Some(store) = self.store.upgrade() {
            store.lock_listeners().retain(|(id, _)| *id != self.id);
        }
    }
}

impl HistoryStore {
    /// Creates an empty store: no entries, `has_more`, cursor at page 1.
    pub fn new() -> Arc<Self> {
        Self::with_state(HistoryState::default())
    }

    pub fn with_state(state: HistoryState) -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(state),
            listeners: Mutex::new(Vec::new()),
            next_listener_id: AtomicU64::new(1),
            alive: AtomicBool::new(true),
        })
    }

    /// Registers a listener called after every write.
    pub fn subscribe(self: &Arc<Self>, listener: Listener) -> Subscription {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.lock_listeners().push((id, listener));
        Subscription {
            store: Arc::downgrade(self),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.lock_listeners().len()
    }

    pub fn has_more(&self) -> bool {
        self.lock_state().has_more
    }

    /// Computes and stores the next state while holding the state lock.
    ///
    /// `f` returns `None` to leave the state unchanged. Returns whether a new
    /// state was stored.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&HistoryState) -> Option<HistoryState>,
    {
        let snapshot = {
            let mut state = self.lock_state();
            if !self.is_alive() {
                return false;
            }
            match f(&state) {
                Some(next) => {
                    *state = next;
                    state.clone()
                }
                None => return false,
            }
        };

        self.notify(&snapshot);
        true
    }

    fn notify(&self, state: &HistoryState) {
        let listeners: Vec<Listener> = self
            .lock_listeners()
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();
        for listener in listeners {
            listener(state);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, HistoryState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Vec<(u64, Listener)>> {
        self.listeners.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl HistoryStoreTrait for HistoryStore {
    fn read(&self) -> HistoryState {
        self.lock_state().clone()
    }

    /// Overwrites the state. Ignored once the store is closed.
    fn replace(&self, new_state: HistoryState) -> bool {
        self.update(|_| Some(new_state))
    }

    fn is_alive(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }

    /// Marks the owning view as gone and drops all listeners.
    fn close(&self) {
        {
            // Writers check the flag under this lock.
            let _state = self.lock_state();
            self.alive.store(false, Ordering::Release);
        }
        self.lock_listeners().clear();
    }
}
