// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the box graph: box identifiers and traversal directions.

/// Identifier for a box in the graph (generational).
///
/// A slot is reused under a new generation after its box is removed. A slot
/// that reaches the last `u32` generation is retired instead, so an id is
/// never handed out twice.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct BoxId(pub(crate) u32, pub(crate) u32);

impl BoxId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Which edges a traversal follows.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Follow parent edges.
    Upwards,
    /// Follow child edges.
    Downwards,
    /// Follow child edges, then parent edges.
    #[default]
    Both,
}

impl Direction {
    pub(crate) const fn follows_children(self) -> bool {
        matches!(self, Self::Downwards | Self::Both)
    }

    pub(crate) const fn follows_parents(self) -> bool {
        matches!(self, Self::Upwards | Self::Both)
    }
}
