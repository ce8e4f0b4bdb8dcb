//! Keyed storage for one entity kind.

use std::collections::HashMap;
use std::hash::Hash;

/// Map from handle to entity with handles allocated from a counter that
/// never rewinds, so a removed entity's handle is never handed out again.
#[derive(Clone, Debug)]
pub(crate) struct Arena<K, T> {
    slots: HashMap<K, T>,
    next: u32,
    make_key: fn(u32) -> K,
}

impl<K: Copy + Eq + Hash, T> Arena<K, T> {
    pub(crate) fn new(make_key: fn(u32) -> K) -> Self {
        Self {
            slots: HashMap::new(),
            next: 0,
            make_key,
        }
    }

    /// Reserve a key and store the value built from it
    pub(crate) fn insert_with(&mut self, build: impl FnOnce(K) -> T) -> K {
        let key = (self.make_key)(self.next);
        self.next += 1;
        self.slots.insert(key, build(key));
        key
    }

    pub(crate) fn get(&self, key: K) -> Option<&T> {
        self.slots.get(&key)
    }

    pub(crate) fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.slots.get_mut(&key)
    }

    pub(crate) fn remove(&mut self, key: K) -> Option<T> {
        self.slots.remove(&key)
    }

    pub(crate) fn contains(&self, key: K) -> bool {
        self.slots.contains_key(&key)
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identifiers::RouteKey;

    #[test]
    fn test_keys_are_not_reused() {
        let mut arena: Arena<RouteKey, &str> = Arena::new(RouteKey::from_raw);
        let a = arena.insert_with(|_| "a");
        let b = arena.insert_with(|_| "b");
        assert_ne!(a, b);

        assert_eq!(arena.remove(a), Some("a"));
        let c = arena.insert_with(|_| "c");
        assert_ne!(a, c);
        assert!(!arena.contains(a));
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(c), Some(&"c"));
    }

    #[test]
    fn test_builder_sees_its_own_key() {
        let mut arena: Arena<RouteKey, RouteKey> = Arena::new(RouteKey::from_raw);
        let key = arena.insert_with(|k| k);
        assert_eq!(arena.get(key), Some(&key));
    }
}
