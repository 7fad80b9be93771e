//! Execution context: the store a call writes to plus the events it emits

use crate::events::Event;
use crate::store::{CacheStore, KvStore};
use mm_common::Result;

pub struct Ctx<'a> {
    store: &'a mut dyn KvStore,
    events: &'a mut Vec<Event>,
}

impl<'a> Ctx<'a> {
    pub fn new(store: &'a mut dyn KvStore, events: &'a mut Vec<Event>) -> Self {
        Self { store, events }
    }

    pub fn store(&self) -> &dyn KvStore {
        &*self.store
    }

    pub fn store_mut(&mut self) -> &mut dyn KvStore {
        &mut *self.store
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[Event] {
        self.events.as_slice()
    }

    /// Run `f` as one unit of work.
    ///
    /// Writes and events are staged in a child context and merged into this one only
    /// when `f` returns `Ok`; on error nothing `f` did is visible.
    pub fn atomic<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Ctx<'_>) -> Result<T>,
    {
        let mut staged_events = Vec::new();
        let mut cache = CacheStore::new(&mut *self.store);
        let out = f(&mut Ctx::new(&mut cache, &mut staged_events))?;
        cache.write();
        self.events.append(&mut staged_events);
        Ok(out)
    }
}
