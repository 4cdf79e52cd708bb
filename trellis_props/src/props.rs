// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The property dictionary.

use core::any::{Any, type_name};
use core::fmt;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::{IdMap, Key, PropsError, registry};

struct Slot {
    value: Box<dyn Any>,
    type_name: &'static str,
}

impl Slot {
    fn new<T: 'static>(value: T) -> Self {
        Self {
            value: Box::new(value),
            type_name: type_name::<T>(),
        }
    }
}

/// A typed, open-ended key/value dictionary.
///
/// Reads of absent keys yield `None`. Writes bind the key name to its value
/// type in the [registry](crate::registry) the first time the name is stored
/// anywhere in the process; writing a name with a conflicting type panics, as
/// does a strongly typed read that finds a value of another type. Both are
/// programming errors rather than runtime conditions. Use [`Props::try_get`]
/// to inspect a value without panicking.
#[derive(Default)]
pub struct Props {
    values: HashMap<&'static str, Slot>,
}

impl fmt::Debug for Props {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<(&str, &str)> =
            self.values.iter().map(|(k, s)| (*k, s.type_name)).collect();
        names.sort_unstable();
        f.debug_map().entries(names).finish()
    }
}

impl Props {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Props::put`], for boxes that register capabilities at construction.
    #[must_use]
    #[track_caller]
    pub fn with<T: 'static>(mut self, key: &Key<T>, value: T) -> Self {
        self.put(key, value);
        self
    }

    /// Whether a value is stored under `key`'s name.
    pub fn has<T: 'static>(&self, key: &Key<T>) -> bool {
        self.values.contains_key(key.name())
    }

    /// Read a value, reporting a type mismatch instead of panicking.
    pub fn try_get<T: 'static>(&self, key: &Key<T>) -> Result<Option<&T>, PropsError> {
        let Some(slot) = self.values.get(key.name()) else {
            return Ok(None);
        };
        match slot.value.downcast_ref::<T>() {
            Some(value) => Ok(Some(value)),
            None => Err(mismatch::<T>(key.name(), slot.type_name)),
        }
    }

    /// Read a value.
    ///
    /// # Panics
    ///
    /// Panics if the stored value is not a `T`.
    #[track_caller]
    pub fn get<T: 'static>(&self, key: &Key<T>) -> Option<&T> {
        match self.try_get(key) {
            Ok(value) => value,
            Err(err) => misuse(err),
        }
    }

    /// Read a value mutably.
    ///
    /// # Panics
    ///
    /// Panics if the stored value is not a `T`.
    #[track_caller]
    pub fn get_mut<T: 'static>(&mut self, key: &Key<T>) -> Option<&mut T> {
        let slot = self.values.get_mut(key.name())?;
        Some(downcast_slot(key, slot))
    }

    /// Store a value, returning the one it replaced.
    ///
    /// # Panics
    ///
    /// Panics if `key`'s name is bound to a different value type.
    #[track_caller]
    pub fn put<T: 'static>(&mut self, key: &Key<T>, value: T) -> Option<T> {
        match self.values.entry(key.name()) {
            Entry::Occupied(mut slot) => {
                let stored = downcast_slot(key, slot.get_mut());
                Some(core::mem::replace(stored, value))
            }
            Entry::Vacant(slot) => {
                bind(key);
                slot.insert(Slot::new(value));
                None
            }
        }
    }

    /// Remove and return a value.
    ///
    /// # Panics
    ///
    /// Panics if the stored value is not a `T`.
    #[track_caller]
    pub fn remove<T: 'static>(&mut self, key: &Key<T>) -> Option<T> {
        let slot = self.values.remove(key.name())?;
        let found = slot.type_name;
        match slot.value.downcast::<T>() {
            Ok(value) => Some(*value),
            Err(_) => misuse(mismatch::<T>(key.name(), found)),
        }
    }

    /// Return the stored value, first storing `supplier()` if the key is absent.
    ///
    /// # Panics
    ///
    /// Panics if the stored value is not a `T`.
    #[track_caller]
    pub fn compute_if_absent<T: 'static>(
        &mut self,
        key: &Key<T>,
        supplier: impl FnOnce() -> T,
    ) -> &mut T {
        let slot = match self.values.entry(key.name()) {
            Entry::Occupied(slot) => slot.into_mut(),
            Entry::Vacant(slot) => {
                bind(key);
                slot.insert(Slot::new(supplier()))
            }
        };
        downcast_slot(key, slot)
    }

    /// Return the stored value, constructing it with the key's default factory
    /// if absent. Returns `None` when absent and the key has no factory.
    #[track_caller]
    pub fn get_or_construct<T: 'static>(&mut self, key: &Key<T>) -> Option<&mut T> {
        if !self.has(key) {
            let value = key.construct()?;
            return Some(self.compute_if_absent(key, || value));
        }
        self.get_mut(key)
    }

    /// Append to a list aggregate, creating the list on first use.
    ///
    /// The list is created with the key's default factory if it has one.
    #[track_caller]
    pub fn put_to_list<V: 'static>(&mut self, key: &Key<Vec<V>>, value: V) {
        self.aggregate(key).push(value);
    }

    /// Remove the first element equal to `value` from a list aggregate.
    #[track_caller]
    pub fn remove_from_list<V: PartialEq + 'static>(&mut self, key: &Key<Vec<V>>, value: &V) -> bool {
        let Some(list) = self.get_mut(key) else {
            return false;
        };
        match list.iter().position(|v| v == value) {
            Some(at) => {
                list.remove(at);
                true
            }
            None => false,
        }
    }

    /// Insert or replace under `id` in a map aggregate, creating the map on first use.
    ///
    /// Returns the value previously stored under `id`.
    #[track_caller]
    pub fn put_to_map<V: 'static>(
        &mut self,
        key: &Key<IdMap<V>>,
        id: impl Into<String>,
        value: V,
    ) -> Option<V> {
        self.aggregate(key).insert(id, value)
    }

    /// Remove the entry under `id` from a map aggregate.
    #[track_caller]
    pub fn remove_from_map<V: 'static>(&mut self, key: &Key<IdMap<V>>, id: &str) -> Option<V> {
        self.get_mut(key)?.remove(id)
    }

    /// The stored boolean, or `default` if absent or not a boolean.
    pub fn is_true(&self, key: &Key<bool>, default: bool) -> bool {
        self.values
            .get(key.name())
            .and_then(|slot| slot.value.downcast_ref::<bool>())
            .copied()
            .unwrap_or(default)
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Names of the stored keys, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.values.keys().copied()
    }

    /// Remove everything.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    #[track_caller]
    fn aggregate<C: Default + 'static>(&mut self, key: &Key<C>) -> &mut C {
        self.compute_if_absent(key, || key.construct().unwrap_or_default())
    }
}

#[track_caller]
fn downcast_slot<'a, T: 'static>(key: &Key<T>, slot: &'a mut Slot) -> &'a mut T {
    let found = slot.type_name;
    match slot.value.downcast_mut::<T>() {
        Some(value) => value,
        None => misuse(mismatch::<T>(key.name(), found)),
    }
}

fn mismatch<T: 'static>(name: &'static str, found: &'static str) -> PropsError {
    PropsError::TypeMismatch {
        name,
        expected: type_name::<T>(),
        found,
    }
}

#[track_caller]
fn bind<T: 'static>(key: &Key<T>) {
    if let Err(err) = registry::observe(key) {
        misuse(err);
    }
}

#[cold]
#[track_caller]
fn misuse(err: impl fmt::Display) -> ! {
    panic!("{err}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABEL: Key<String> = Key::new("props.tests.label");
    const FLAG: Key<bool> = Key::new("props.tests.flag");
    const LIST: Key<Vec<u32>> = Key::new("props.tests.list");
    const FEEDBACK: Key<IdMap<&'static str>> = Key::new("props.tests.feedback");

    #[test]
    fn absent_reads_are_none() {
        let props = Props::new();
        assert!(props.get(&LABEL).is_none());
        assert_eq!(props.try_get(&LABEL), Ok(None));
        assert!(!props.has(&LABEL));
        assert!(props.is_empty());
    }

    #[test]
    fn put_overwrites_scalars() {
        let mut props = Props::new();
        assert_eq!(props.put(&LABEL, "a".into()), None);
        assert_eq!(props.put(&LABEL, "b".into()), Some("a".into()));
        assert_eq!(props.get(&LABEL).map(String::as_str), Some("b"));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn put_to_list_creates_then_appends() {
        let mut props = Props::new();
        props.put_to_list(&LIST, 1);
        props.put_to_list(&LIST, 2);
        assert_eq!(props.get(&LIST), Some(&vec![1, 2]));
        assert!(props.remove_from_list(&LIST, &1));
        assert!(!props.remove_from_list(&LIST, &1));
        assert_eq!(props.get(&LIST), Some(&vec![2]));
    }

    #[test]
    fn put_to_map_same_id_replaces() {
        let mut props = Props::new();
        assert_eq!(props.put_to_map(&FEEDBACK, "outline", "first"), None);
        assert_eq!(props.put_to_map(&FEEDBACK, "outline", "second"), Some("first"));
        let map = props.get(&FEEDBACK).unwrap();
        assert_eq!(map.len(), 1, "same id keeps exactly one entry");
        assert_eq!(map.get("outline"), Some(&"second"));
    }

    #[test]
    fn put_to_map_distinct_ids_accumulate() {
        let mut props = Props::new();
        props.put_to_map(&FEEDBACK, "outline", "a");
        props.put_to_map(&FEEDBACK, "badge", "b");
        assert_eq!(props.get(&FEEDBACK).map(IdMap::len), Some(2));
        assert_eq!(props.remove_from_map(&FEEDBACK, "outline"), Some("a"));
        assert_eq!(props.remove_from_map(&FEEDBACK, "outline"), None);
    }

    #[test]
    fn compute_if_absent_runs_supplier_once() {
        const COUNT: Key<u32> = Key::new("props.tests.count");
        let mut props = Props::new();
        let mut calls = 0;
        *props.compute_if_absent(&COUNT, || {
            calls += 1;
            5
        }) += 1;
        let value = *props.compute_if_absent(&COUNT, || {
            calls += 1;
            0
        });
        assert_eq!(value, 6);
        assert_eq!(calls, 1, "supplier must only run for an absent key");
    }

    #[test]
    fn get_or_construct_uses_key_factory() {
        const WITH: Key<Vec<u8>> = Key::new("props.tests.with-default").with_default(|| vec![9]);
        const WITHOUT: Key<u8> = Key::new("props.tests.without-default");
        let mut props = Props::new();
        assert_eq!(props.get_or_construct(&WITH).map(|v| v.len()), Some(1));
        assert!(props.get_or_construct(&WITHOUT).is_none());
        assert!(!props.has(&WITHOUT), "no value is stored without a factory");
    }

    #[test]
    fn list_aggregate_starts_from_key_factory() {
        const SEEDED: Key<Vec<u8>> = Key::new("props.tests.seeded").with_default(|| vec![0]);
        let mut props = Props::new();
        props.put_to_list(&SEEDED, 1);
        assert_eq!(props.get(&SEEDED), Some(&vec![0, 1]));
    }

    #[test]
    fn is_true_defaults() {
        let mut props = Props::new();
        assert!(props.is_true(&FLAG, true));
        assert!(!props.is_true(&FLAG, false));
        props.put(&FLAG, false);
        assert!(!props.is_true(&FLAG, true));
        props.put(&FLAG, true);
        assert!(props.is_true(&FLAG, false));
    }

    #[test]
    fn is_true_ignores_non_boolean_values() {
        const NOT_BOOL: Key<u8> = Key::new("props.tests.not-bool");
        let mut props = Props::new();
        props.put(&NOT_BOOL, 1);
        let as_bool: Key<bool> = Key::new("props.tests.not-bool");
        assert!(props.is_true(&as_bool, true));
        assert!(!props.is_true(&as_bool, false));
    }

    #[test]
    fn wrong_typed_read_is_reported() {
        const STORED: Key<u8> = Key::new("props.tests.stored-u8");
        let mut props = Props::new();
        props.put(&STORED, 3);
        let wrong: Key<String> = Key::new("props.tests.stored-u8");
        assert!(matches!(
            props.try_get(&wrong),
            Err(PropsError::TypeMismatch { name: "props.tests.stored-u8", .. })
        ));
    }

    #[test]
    #[should_panic(expected = "props.tests.panics")]
    fn wrong_typed_get_panics() {
        const STORED: Key<u8> = Key::new("props.tests.panics");
        let mut props = Props::new();
        props.put(&STORED, 3);
        let wrong: Key<i32> = Key::new("props.tests.panics");
        let _ = props.get(&wrong);
    }

    #[test]
    #[should_panic(expected = "props.tests.conflict")]
    fn conflicting_write_panics() {
        let mut props = Props::new();
        props.put(&Key::<u8>::new("props.tests.conflict"), 1);
        let mut other = Props::new();
        other.put(&Key::<String>::new("props.tests.conflict"), String::new());
    }

    #[test]
    fn names_list_stored_keys_until_cleared() {
        let mut props = Props::new().with(&LABEL, "x".to_string()).with(&FLAG, true);
        let mut names: Vec<_> = props.names().collect();
        names.sort_unstable();
        assert_eq!(names, ["props.tests.flag", "props.tests.label"]);

        props.clear();
        assert!(props.is_empty());
        assert_eq!(props.names().count(), 0);
        assert!(props.get(&LABEL).is_none());
    }

    #[test]
    fn debug_lists_names_and_types() {
        let props = Props::new().with(&LABEL, "x".to_string());
        let shown = format!("{props:?}");
        assert!(shown.contains("props.tests.label"), "got {shown}");
    }
}
