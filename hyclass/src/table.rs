//! Order-preserving containers backing every entity of the model.
//!
//! - [`OrderedTable`]: a keyed map remembering insertion order, with the
//!   replacement behavior chosen by a [`ReplacePolicy`].
//! - [`LazyList`]: a list that stays unallocated until its first element.
//!
//! Both compare equal by content and order. An unallocated [`LazyList`] equals
//! an allocated empty one, and the policy of a table is not part of its value.
use std::hash::Hash;

use indexmap::{Equivalent, IndexMap};

use crate::config::ReplacePolicy;

#[derive(Debug, Clone)]
pub struct OrderedTable<K, V> {
    entries: IndexMap<K, V>,
    policy: ReplacePolicy,
}

impl<K, V> Default for OrderedTable<K, V> {
    fn default() -> Self {
        Self {
            entries: IndexMap::default(),
            policy: ReplacePolicy::default(),
        }
    }
}

impl<K: Hash + Eq, V> OrderedTable<K, V> {
    pub fn new(policy: ReplacePolicy) -> Self {
        Self {
            entries: IndexMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> ReplacePolicy {
        self.policy
    }

    /// Change how later replacements are placed. Existing order is kept.
    pub fn set_policy(&mut self, policy: ReplacePolicy) {
        self.policy = policy;
    }

    /// Insert `value` under `key`, replacing any entry with an equal key.
    ///
    /// Returns the stored value together with the entry it replaced.
    pub fn upsert(&mut self, key: K, value: V) -> (&mut V, Option<V>) {
        let (index, previous) = match self.policy {
            ReplacePolicy::InPlace => self.entries.insert_full(key, value),
            ReplacePolicy::MoveToEnd => {
                let previous = self.entries.shift_remove(&key);
                let (index, _) = self.entries.insert_full(key, value);
                (index, previous)
            }
        };
        (&mut self.entries[index], previous)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.entries.get(key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.entries.get_mut(key)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.entries.contains_key(key)
    }

    /// Remove an entry, keeping the relative order of the remaining ones.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.entries.shift_remove(key)
    }
}

impl<K, V> OrderedTable<K, V> {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, K, V> {
        self.entries.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, K, V> {
        self.entries.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, K, V> {
        self.entries.values()
    }

    pub fn values_mut(&mut self) -> indexmap::map::ValuesMut<'_, K, V> {
        self.entries.values_mut()
    }

    pub fn get_index(&self, index: usize) -> Option<(&K, &V)> {
        self.entries.get_index(index)
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for OrderedTable<K, V> {
    fn eq(&self, other: &Self) -> bool {
        // `IndexMap` equality ignores order.
        self.entries.len() == other.entries.len()
            && self.entries.iter().zip(other.entries.iter()).all(|(a, b)| a == b)
    }
}

impl<'a, K, V> IntoIterator for &'a OrderedTable<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = indexmap::map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A list that is not allocated until an element is pushed.
#[derive(Debug, Clone)]
pub struct LazyList<T>(Option<Vec<T>>);

impl<T> Default for LazyList<T> {
    fn default() -> Self {
        Self(None)
    }
}

impl<T> LazyList<T> {
    pub const fn new() -> Self {
        Self(None)
    }

    /// Append `value`, allocating on first use.
    pub fn push(&mut self, value: T) -> &mut T {
        let list = self.0.get_or_insert_with(Vec::new);
        let index = list.len();
        list.push(value);
        &mut list[index]
    }

    pub fn is_allocated(&self) -> bool {
        self.0.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn as_slice(&self) -> &[T] {
        self.0.as_deref().unwrap_or(&[])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.0.as_deref_mut().unwrap_or(&mut []).iter_mut()
    }

    pub fn remove(&mut self, index: usize) -> Option<T> {
        let list = self.0.as_mut()?;
        (index < list.len()).then(|| list.remove(index))
    }

    pub fn retain(&mut self, keep: impl FnMut(&T) -> bool) {
        if let Some(list) = self.0.as_mut() {
            list.retain(keep);
        }
    }

    /// Drop the storage entirely, returning to the unallocated state.
    pub fn clear(&mut self) {
        self.0 = None;
    }
}

impl<T: PartialEq> PartialEq for LazyList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for LazyList<T> {}

impl<T> From<Vec<T>> for LazyList<T> {
    fn from(values: Vec<T>) -> Self {
        Self(Some(values))
    }
}

impl<T> FromIterator<T> for LazyList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(Some(iter.into_iter().collect()))
    }
}

impl<'a, T> IntoIterator for &'a LazyList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(table: &OrderedTable<&'static str, i32>) -> Vec<(&'static str, i32)> {
        table.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[test]
    fn in_place_replacement_keeps_slot() {
        let mut table = OrderedTable::new(ReplacePolicy::InPlace);
        table.upsert("a", 1);
        table.upsert("b", 2);
        let (value, previous) = table.upsert("a", 3);
        assert_eq!(*value, 3);
        assert_eq!(previous, Some(1));
        assert_eq!(collect(&table), vec![("a", 3), ("b", 2)]);
    }

    #[test]
    fn move_to_end_replacement_appends() {
        let mut table = OrderedTable::new(ReplacePolicy::MoveToEnd);
        table.upsert("a", 1);
        table.upsert("b", 2);
        let (value, previous) = table.upsert("a", 3);
        assert_eq!(*value, 3);
        assert_eq!(previous, Some(1));
        assert_eq!(collect(&table), vec![("b", 2), ("a", 3)]);
    }

    #[test]
    fn remove_preserves_order() {
        let mut table = OrderedTable::new(ReplacePolicy::InPlace);
        for (i, key) in ["a", "b", "c", "d"].into_iter().enumerate() {
            table.upsert(key, i as i32);
        }
        assert_eq!(table.remove("b"), Some(1));
        assert_eq!(collect(&table), vec![("a", 0), ("c", 2), ("d", 3)]);
    }

    #[test]
    fn equality_is_order_sensitive_and_ignores_policy() {
        let mut left = OrderedTable::new(ReplacePolicy::InPlace);
        left.upsert("a", 1);
        left.upsert("b", 2);

        let mut right = OrderedTable::new(ReplacePolicy::MoveToEnd);
        right.upsert("a", 1);
        right.upsert("b", 2);
        assert_eq!(left, right);

        let mut swapped = OrderedTable::new(ReplacePolicy::InPlace);
        swapped.upsert("b", 2);
        swapped.upsert("a", 1);
        assert_ne!(left, swapped);
    }

    #[test]
    fn lazy_list_allocates_on_first_push() {
        let mut list = LazyList::new();
        assert!(!list.is_allocated());
        assert!(list.is_empty());
        *list.push(1) += 10;
        list.push(2);
        assert!(list.is_allocated());
        assert_eq!(list.as_slice(), &[11, 2]);
        assert_eq!(list.remove(5), None);
        assert_eq!(list.remove(0), Some(11));
        list.clear();
        assert!(!list.is_allocated());
    }

    #[test]
    fn lazy_list_empty_equals_unallocated() {
        let mut allocated = LazyList::from(vec![1]);
        allocated.retain(|_| false);
        assert!(allocated.is_allocated());
        assert_eq!(allocated, LazyList::new());
    }

    #[test]
    fn lazy_list_is_eq_when_elements_are() {
        fn assert_eq_impl<T: Eq>() {}
        assert_eq_impl::<LazyList<String>>();
        let collected: LazyList<String> = ["a".to_string()].into_iter().collect();
        assert_eq!(LazyList::from(vec!["a".to_string()]), collected);
    }

    #[test]
    fn set_policy_affects_later_replacements_only() {
        let mut table = OrderedTable::new(ReplacePolicy::InPlace);
        table.upsert("a", 1);
        table.upsert("b", 2);
        table.set_policy(ReplacePolicy::MoveToEnd);
        assert_eq!(collect(&table), vec![("a", 1), ("b", 2)]);
        table.upsert("a", 3);
        assert_eq!(table.policy(), ReplacePolicy::MoveToEnd);
        assert_eq!(collect(&table), vec![("b", 2), ("a", 3)]);
    }
}
