// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::formula::Formula;
use std::fmt;

/// A minimization engine.
pub trait Minimizer {
    /// Minimizes `formula`, returning a new formula holding the cover.
    ///
    /// `formula` is only changed to mark it minimized. If `debug` is true, a trace of the run
    /// is kept by the engine until the next call.
    fn minimize(&mut self, formula: &mut Formula, debug: bool) -> Formula;

    /// Whether the last run kept a trace.
    fn is_debug(&self) -> bool;
}

/// The available minimization engines.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Exact Quine-McCluskey.
    QuineMcCluskey,
    /// Heuristic Espresso.
    Espresso,
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::QuineMcCluskey
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::QuineMcCluskey => write!(f, "Quine-McCluskey"),
            Self::Espresso => write!(f, "Espresso"),
        }
    }
}
