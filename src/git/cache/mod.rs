// gitdeck: git desktop front-end core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bounded memoization map.
//!
//! When an insert would exceed the capacity the whole map is cleared first.
//! Capacity 0 disables caching. Entries are pure memoization and never affect
//! results.

use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct BoundedCache<K, V> {
    entries: BTreeMap<K, V>,
    capacity: usize,
}

impl<K: Ord, V: Clone> BoundedCache<K, V> {
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            capacity,
        }
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: std::borrow::Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.entries.get(key).cloned()
    }

    pub fn insert(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&key) {
            self.entries.clear();
        }
        self.entries.insert(key, value);
    }

    /// Returns the cached value, computing and storing it on a miss.
    pub fn get_or_insert_with(&mut self, key: K, compute: impl FnOnce(&K) -> V) -> V {
        if let Some(value) = self.entries.get(&key) {
            return value.clone();
        }
        let value = compute(&key);
        self.insert(key, value.clone());
        value
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
