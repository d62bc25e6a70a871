//! Utilities for inspecting non-fatal diagnostics.
//!
//! The default pipeline treats an unknown template as a fatal error, since
//! dropping it would lose dialogue content. For surveying a document the
//! [`LenientHandler`][crate::LenientHandler] instead records every unknown
//! template here, so a caller can list all of them in one run.

use std::fmt;

#[derive(Clone, Debug, Default)]
/// Collector of non-fatal diagnostics from a run.
pub struct Logger {
    /// Warnings in the order they were encountered.
    pub warnings: Vec<Warning>,
}

impl Logger {
    pub(crate) fn add_warning(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    /// Create an iterator over the collected warnings.
    pub fn iter(&self) -> impl Iterator<Item = &Warning> {
        self.warnings.iter()
    }
}

#[derive(Clone, Debug, PartialEq)]
/// A detected non-fatal problem.
pub enum Warning {
    /// A template with no registered handler was dropped from the output.
    UnknownTemplate { name: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Warning::UnknownTemplate { name } => {
                write!(f, "[WARNING] dropped template '{}': no handler registered", name)
            }
        }
    }
}
