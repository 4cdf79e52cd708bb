// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared dispatch types: outcomes, handler errors, dispatch errors.

/// Whether a handler or dragger wants to keep receiving events.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Keep this handler installed.
    Continue,
    /// Remove this handler; it will not be called again.
    Stop,
}

/// Error returned by a plugin handler.
///
/// Any error type converts into it, so handlers can use `?` freely.
pub type HandlerError = Box<dyn core::error::Error + 'static>;

/// Result returned by plugin handlers.
pub type HandlerResult<T = ()> = Result<T, HandlerError>;

/// Errors that prevent a dispatch from routing at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// No [`Drawing`](crate::Drawing) capability is reachable from the root,
    /// so window coordinates cannot be mapped into drawing space.
    #[error("no drawing capability is reachable from the root to map window coordinates")]
    MissingDrawing,
    /// The event carries no pointer position to hit-test with.
    #[error("the event carries no pointer position")]
    MissingPosition,
}
