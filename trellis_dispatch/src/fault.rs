// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handler faults collected during a dispatch.

use std::backtrace::Backtrace;

use trellis_event_state::Button;

use crate::types::HandlerError;

/// Which kind of handler failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Site {
    /// A mouse-down handler.
    MouseDown,
    /// A mouse-scroll handler.
    MouseScroll,
    /// A keyboard handler.
    Keyboard,
    /// A drop handler.
    Drop,
}

/// One failed handler invocation.
#[derive(Debug)]
pub struct Fault {
    /// Handler kind.
    pub site: Site,
    /// Button the handler was invoked for, if any.
    pub button: Option<Button>,
    /// The handler's error.
    pub error: HandlerError,
    /// Captured where the fault was recorded; empty unless backtraces are enabled.
    pub backtrace: Backtrace,
}

impl Fault {
    /// Record a fault, capturing a backtrace.
    pub fn new(site: Site, button: Option<Button>, error: HandlerError) -> Self {
        Self {
            site,
            button,
            error,
            backtrace: Backtrace::capture(),
        }
    }
}

/// Faults collected over one dispatch.
///
/// A fault degrades a single interaction; the dispatch that collected it ran
/// every other handler regardless.
#[derive(Debug, Default)]
pub struct Faults {
    faults: Vec<Fault>,
}

impl Faults {
    /// No faults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fault.
    pub fn push(&mut self, fault: Fault) {
        self.faults.push(fault);
    }

    /// Record the error of a failed handler.
    pub(crate) fn record(&mut self, site: Site, button: Option<Button>, error: HandlerError) {
        self.push(Fault::new(site, button, error));
    }

    /// Number of faults.
    pub fn len(&self) -> usize {
        self.faults.len()
    }

    /// Whether every handler succeeded.
    pub fn is_empty(&self) -> bool {
        self.faults.is_empty()
    }

    /// The faults, in the order they happened.
    pub fn iter(&self) -> impl Iterator<Item = &Fault> + '_ {
        self.faults.iter()
    }

    /// Emit every fault at error level.
    pub fn log(&self) {
        for fault in &self.faults {
            tracing::error!(
                site = ?fault.site,
                button = ?fault.button,
                error = %fault.error,
                backtrace = %fault.backtrace,
                "handler failed"
            );
        }
    }
}

impl Extend<Fault> for Faults {
    fn extend<I: IntoIterator<Item = Fault>>(&mut self, iter: I) {
        self.faults.extend(iter);
    }
}

impl IntoIterator for Faults {
    type Item = Fault;
    type IntoIter = std::vec::IntoIter<Fault>;

    fn into_iter(self) -> Self::IntoIter {
        self.faults.into_iter()
    }
}
