// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for keys and dictionaries.

/// Errors raised when reading a dictionary with a strongly typed key.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PropsError {
    /// The stored value has a different type than the key declares.
    #[error("property `{name}` holds a `{found}`, not a `{expected}`")]
    TypeMismatch {
        /// Key name.
        name: &'static str,
        /// Type named by the key used for the read.
        expected: &'static str,
        /// Type of the value actually stored.
        found: &'static str,
    },
}

/// Errors raised by the key registry.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// A key name was already bound to another value type.
    #[error("key `{name}` is bound to `{existing}` and cannot be used as `{requested}`")]
    TypeConflict {
        /// Key name.
        name: &'static str,
        /// Type the name was first bound to.
        existing: &'static str,
        /// Type of the conflicting declaration.
        requested: &'static str,
    },
}
