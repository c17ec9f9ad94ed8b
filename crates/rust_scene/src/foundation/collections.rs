//! Specialized collection types

pub use slotmap::{SlotMap, Key};

/// Insertion-ordered map keyed by stable slot-map handles
///
/// Used for every observer list the orchestrator iterates once per tick.
/// Handles stay valid until their entry is removed and are never reused for
/// a different entry, so removal is unambiguous even when the same value was
/// registered twice.
#[derive(Debug, Clone)]
pub struct OrderedRegistry<K: Key, V> {
    entries: SlotMap<K, V>,
    order: Vec<K>,
}

impl<K: Key, V> Default for OrderedRegistry<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Key, V> OrderedRegistry<K, V> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            order: Vec::new(),
        }
    }
    
    /// Append a value and return its handle
    pub fn insert(&mut self, value: V) -> K {
        let key = self.entries.insert(value);
        self.order.push(key);
        key
    }
    
    /// Remove the value behind `key`, if it is still registered
    pub fn remove(&mut self, key: K) -> Option<V> {
        let value = self.entries.remove(key)?;
        self.order.retain(|k| *k != key);
        Some(value)
    }
    
    /// Look up a value by handle
    pub fn get(&self, key: K) -> Option<&V> {
        self.entries.get(key)
    }
    
    /// Mutable lookup by handle
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.entries.get_mut(key)
    }
    
    /// Whether `key` is still registered
    pub fn contains(&self, key: K) -> bool {
        self.entries.contains_key(key)
    }
    
    /// Number of registered values
    pub fn len(&self) -> usize {
        self.order.len()
    }
    
    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
    
    /// Iterate in registration order
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        self.order.iter().map(move |k| (*k, &self.entries[*k]))
    }
    
    /// Visit every value mutably in registration order
    pub fn for_each_mut(&mut self, mut f: impl FnMut(K, &mut V)) {
        for key in &self.order {
            if let Some(value) = self.entries.get_mut(*key) {
                f(*key, value);
            }
        }
    }
}

impl<K: Key, V: Clone> OrderedRegistry<K, V> {
    /// Clone every value in registration order
    ///
    /// Per-tick iteration goes through a snapshot so hooks that register or
    /// unregister objects cannot invalidate the loop.
    pub fn snapshot(&self) -> Vec<(K, V)> {
        self.iter().map(|(k, v)| (k, v.clone())).collect()
    }
}
