// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Props: name-interned, typed property keys and property dictionaries.
//!
//! Every box in a Trellis graph owns one [`Props`] dictionary. Plugins publish
//! capabilities into dictionaries and discover each other's capabilities by
//! reading them back, so the one thing they must agree on is the key.
//!
//! - [`Key`]: a typed, named handle. Two keys with the same name are the same
//!   key, even if they were declared in unrelated crates. Keys are usually
//!   `const` items; names computed at runtime go through [`Key::intern`].
//! - [`registry`]: the process-wide record of key names, their value types, and
//!   optional documentation. A name is bound to exactly one value type for the
//!   life of the process.
//! - [`Props`]: the dictionary. Absent keys read as `None` and never fail.
//! - [`IdMap`]: an insertion-ordered map keyed by caller-chosen string ids,
//!   used for "one entry per named effect" aggregates.
//!
//! ## Value shapes
//!
//! - Scalars are overwritten by [`Props::put`].
//! - Lists (`Vec<V>`) grow through [`Props::put_to_list`], which creates the
//!   list on first use.
//! - Id maps ([`IdMap<V>`]) are written through [`Props::put_to_map`], which
//!   creates the map on first use and then inserts or replaces under the id.
//!
//! ## Example
//!
//! ```rust
//! use trellis_props::{IdMap, Key, Props};
//!
//! const LABEL: Key<String> = Key::new("docs.label").doc("display label");
//! const EFFECTS: Key<IdMap<u32>> = Key::new("docs.effects");
//!
//! let mut props = Props::new();
//! assert!(props.get(&LABEL).is_none());
//!
//! props.put(&LABEL, "hello".to_string());
//! props.put_to_map(&EFFECTS, "glow", 1);
//! props.put_to_map(&EFFECTS, "glow", 2);
//!
//! assert_eq!(props.get(&LABEL).map(String::as_str), Some("hello"));
//! assert_eq!(props.get(&EFFECTS).map(IdMap::len), Some(1));
//! ```
//!
//! Dictionaries are meant to be touched from one thread only; values are
//! stored as `dyn Any`, which makes [`Props`] neither `Send` nor `Sync`.

mod error;
mod id_map;
mod key;
mod props;
pub mod registry;

pub use error::{KeyError, PropsError};
pub use id_map::IdMap;
pub use key::Key;
pub use props::Props;
