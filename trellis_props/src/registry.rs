// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Process-wide registry of key names.
//!
//! The registry binds each key name to one value type the first time the name
//! is written into a dictionary or explicitly [declared](declare). Later uses of
//! the same name with another type are rejected, which is what makes name
//! interning safe across independently compiled plugins.
//!
//! Declaring a key also marks it *canonical* and records its documentation so
//! tools can list the vocabulary of properties in use.
//!
//! ```rust
//! use trellis_props::{Key, registry};
//!
//! const ZOOM: Key<f64> = Key::new("docs.registry.zoom").doc("canvas zoom factor");
//!
//! let info = registry::declare(&ZOOM).unwrap();
//! assert!(info.canonical);
//! assert_eq!(registry::lookup("docs.registry.zoom").unwrap().doc, Some("canvas zoom factor"));
//!
//! // The same name with another type is refused.
//! const WRONG: Key<String> = Key::new("docs.registry.zoom");
//! assert!(registry::declare(&WRONG).is_err());
//! ```

use core::any::{TypeId, type_name};
use std::sync::LazyLock;

use hashbrown::{HashMap, HashSet};
use parking_lot::Mutex;

use crate::{Key, KeyError};

/// What the registry knows about a key name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyInfo {
    /// The key name.
    pub name: &'static str,
    /// Type identifier of the bound value type.
    pub type_id: TypeId,
    /// Name of the bound value type.
    pub type_name: &'static str,
    /// Documentation recorded at declaration time.
    pub doc: Option<&'static str>,
    /// Whether the key was explicitly declared with [`declare`].
    pub canonical: bool,
}

#[derive(Default)]
struct Registry {
    /// Interned names, including names that have not been bound to a type yet.
    names: HashSet<&'static str>,
    keys: HashMap<&'static str, KeyInfo>,
}

static REGISTRY: LazyLock<Mutex<Registry>> = LazyLock::new(|| Mutex::new(Registry::default()));

impl Registry {
    fn intern(&mut self, name: &str) -> &'static str {
        if let Some(&interned) = self.names.get(name) {
            return interned;
        }
        // Interned names live for the rest of the process.
        let interned: &'static str = Box::leak(name.to_owned().into_boxed_str());
        self.names.insert(interned);
        interned
    }

    fn bind<T: 'static>(&mut self, key: &Key<T>, canonical: bool) -> Result<KeyInfo, KeyError> {
        let name = key.name();
        self.names.insert(name);
        match self.keys.get_mut(name) {
            Some(info) if info.type_id != TypeId::of::<T>() => Err(KeyError::TypeConflict {
                name: info.name,
                existing: info.type_name,
                requested: type_name::<T>(),
            }),
            Some(info) => {
                if canonical {
                    info.canonical = true;
                    info.doc = key.documentation().or(info.doc);
                }
                Ok(*info)
            }
            None => {
                let info = KeyInfo {
                    name,
                    type_id: TypeId::of::<T>(),
                    type_name: type_name::<T>(),
                    doc: key.documentation(),
                    canonical,
                };
                self.keys.insert(name, info);
                Ok(info)
            }
        }
    }
}

/// Declare a key as canonical, binding its name to its value type.
///
/// Declaring is idempotent. It fails only when the name is already bound to a
/// different value type.
pub fn declare<T: 'static>(key: &Key<T>) -> Result<KeyInfo, KeyError> {
    REGISTRY.lock().bind(key, true)
}

/// Bind a key's name to its type without marking it canonical.
///
/// Dictionaries call this the first time a name is written.
pub(crate) fn observe<T: 'static>(key: &Key<T>) -> Result<KeyInfo, KeyError> {
    REGISTRY.lock().bind(key, false)
}

/// Look up what is known about a key name.
pub fn lookup(name: &str) -> Option<KeyInfo> {
    REGISTRY.lock().keys.get(name).copied()
}

/// All canonical keys, sorted by name.
pub fn canonical() -> Vec<KeyInfo> {
    let mut out: Vec<KeyInfo> = REGISTRY
        .lock()
        .keys
        .values()
        .filter(|info| info.canonical)
        .copied()
        .collect();
    out.sort_by_key(|info| info.name);
    out
}

pub(crate) fn intern_name(name: &str) -> &'static str {
    REGISTRY.lock().intern(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observe_binds_first_type_only() {
        const FIRST: Key<u32> = Key::new("registry.tests.bind");
        const SECOND: Key<i64> = Key::new("registry.tests.bind");

        let info = observe(&FIRST).unwrap();
        assert!(!info.canonical, "observing does not make a key canonical");
        assert_eq!(info.type_id, TypeId::of::<u32>());

        let err = observe(&SECOND).unwrap_err();
        assert!(
            matches!(err, KeyError::TypeConflict { name: "registry.tests.bind", .. }),
            "conflict should name the key, got {err:?}"
        );
    }

    #[test]
    fn declare_is_idempotent_and_keeps_docs() {
        const KEY: Key<bool> = Key::new("registry.tests.declare").doc("a flag");
        let a = declare(&KEY).unwrap();
        let b = declare(&Key::<bool>::new("registry.tests.declare")).unwrap();
        assert_eq!(a, b);
        assert_eq!(b.doc, Some("a flag"));
        assert!(
            canonical().iter().any(|i| i.name == "registry.tests.declare"),
            "declared key should be listed"
        );
    }

    #[test]
    fn interning_returns_the_same_str() {
        let a = intern_name(&String::from("registry.tests.interned"));
        let b = intern_name("registry.tests.interned");
        assert!(core::ptr::eq(a, b), "interned names share storage");
    }

    #[test]
    fn lookup_unknown_name_is_none() {
        assert!(lookup("registry.tests.never-written").is_none());
    }
}
