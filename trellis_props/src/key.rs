// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed, named property keys.

use core::any::type_name;
use core::fmt;
use core::marker::PhantomData;

use crate::registry;

/// A canonical property key: a process-wide name paired with a value type.
///
/// Keys compare and hash by name only. Declaring the same name twice, in the
/// same crate or in two crates that never see each other, yields the same
/// key; the [registry](crate::registry) makes sure the name is never used
/// with two different value types.
///
/// ```rust
/// use trellis_props::Key;
///
/// const SELECTED: Key<bool> = Key::new("docs.selected").doc("box is part of the selection");
/// const ALSO_SELECTED: Key<bool> = Key::new("docs.selected");
///
/// assert_eq!(SELECTED, ALSO_SELECTED);
/// assert_eq!(SELECTED.documentation(), Some("box is part of the selection"));
/// ```
pub struct Key<T: 'static> {
    name: &'static str,
    doc: Option<&'static str>,
    default: Option<fn() -> T>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: 'static> Key<T> {
    /// Create a key with a static name.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            doc: None,
            default: None,
            _marker: PhantomData,
        }
    }

    /// Create a key whose name is only known at runtime.
    ///
    /// The name is interned for the rest of the process, so calling this
    /// repeatedly with the same name does not grow memory.
    pub fn intern(name: &str) -> Self {
        Self::new(registry::intern_name(name))
    }

    /// Attach human-readable documentation.
    pub const fn doc(self, doc: &'static str) -> Self {
        Self {
            doc: Some(doc),
            ..self
        }
    }

    /// Attach a factory used when the value must be created on first use.
    ///
    /// See [`Props::get_or_construct`](crate::Props::get_or_construct).
    pub const fn with_default(self, factory: fn() -> T) -> Self {
        Self {
            default: Some(factory),
            ..self
        }
    }

    /// The key's name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Documentation attached with [`Key::doc`], if any.
    pub const fn documentation(&self) -> Option<&'static str> {
        self.doc
    }

    /// Build a fresh value with the key's default factory, if it has one.
    pub fn construct(&self) -> Option<T> {
        self.default.map(|f| f())
    }

    /// The declared value type's name, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        type_name::<T>()
    }
}

impl<T: 'static> Clone for Key<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> Copy for Key<T> {}

impl<T: 'static> PartialEq for Key<T> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl<T: 'static> Eq for Key<T> {}

impl<T: 'static> core::hash::Hash for Key<T> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl<T: 'static> fmt::Debug for Key<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("name", &self.name)
            .field("type", &type_name::<T>())
            .field("doc", &self.doc)
            .finish_non_exhaustive()
    }
}
