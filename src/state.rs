use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use eframe::egui;
use parking_lot::RwLock;

/// Retained per-instance widget state, keyed by the widget's `egui::Id`.
///
/// Each widget instance owns exactly one entry; sibling instances never share
/// one because their ids are salted by their position in the UI tree. Removing
/// an entry models unmount: everything the state value owns (pending timers,
/// key subscriptions) is dropped with it, so nothing can fire afterwards.
#[derive(Debug, Default)]
pub struct StateStore {
    states: RwLock<HashMap<egui::Id, Arc<dyn Any + Send + Sync>>>,
}

impl StateStore {
    pub fn get<T: Send + Sync + 'static>(&self, id: egui::Id) -> Option<Arc<RwLock<T>>> {
        let entry = self.states.read().get(&id).cloned()?;
        entry.downcast::<RwLock<T>>().ok()
    }

    pub fn get_or_insert_with<T: Send + Sync + 'static>(
        &self,
        id: egui::Id,
        init: impl FnOnce() -> T,
    ) -> Arc<RwLock<T>> {
        {
            let states = self.states.read();
            if let Some(existing) = states.get(&id) {
                if let Ok(state) = existing.clone().downcast::<RwLock<T>>() {
                    return state;
                }
            }
        }

        let state = Arc::new(RwLock::new(init()));
        let erased: Arc<dyn Any + Send + Sync> = state.clone();
        let mut states = self.states.write();
        let entry = states.entry(id).or_insert_with(|| erased.clone());
        entry
            .clone()
            .downcast::<RwLock<T>>()
            .expect("state store type mismatch")
    }

    /// Read state that a caller asserts must exist. Reaching for state that was
    /// never mounted is a usage error, not a runtime condition.
    pub fn expect<T: Send + Sync + 'static>(&self, id: egui::Id) -> Arc<RwLock<T>> {
        self.get(id)
            .unwrap_or_else(|| panic!("widget state missing for id {id:?}; was it unmounted?"))
    }

    /// Drop an instance's state. Models widget teardown.
    pub fn remove(&self, id: egui::Id) {
        self.states.write().remove(&id);
    }

    pub fn len(&self) -> usize {
        self.states.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_id_returns_same_state() {
        let store = StateStore::default();
        let id = egui::Id::new("a");
        let first = store.get_or_insert_with(id, || 1u32);
        let second = store.get_or_insert_with(id, || 2u32);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*second.read(), 1);
    }

    #[test]
    fn sibling_ids_do_not_interfere() {
        let store = StateStore::default();
        let a = store.get_or_insert_with(egui::Id::new("a"), || 1u32);
        let b = store.get_or_insert_with(egui::Id::new("b"), || 2u32);
        *a.write() = 10;
        assert_eq!(*b.read(), 2);
    }

    #[test]
    fn remove_drops_the_entry() {
        let store = StateStore::default();
        let id = egui::Id::new("a");
        store.get_or_insert_with(id, || 1u32);
        assert_eq!(store.len(), 1);
        store.remove(id);
        assert!(store.get::<u32>(id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    #[should_panic(expected = "widget state missing")]
    fn expect_panics_on_missing_state() {
        let store = StateStore::default();
        let _ = store.expect::<u32>(egui::Id::new("nope"));
    }
}
