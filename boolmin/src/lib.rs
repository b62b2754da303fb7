// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Two-level minimization of Boolean functions, exactly with Quine-McCluskey or heuristically
//! with Espresso.

pub mod algorithm;
pub mod container;
pub mod cover;
pub mod errors;
pub mod espresso;
pub mod formula;
pub mod kernel;
#[cfg(any(test, feature = "proptest1"))]
pub mod proptest_helpers;
pub mod qm;
pub mod term;
pub mod values;

pub use algorithm::{Algorithm, Minimizer};
pub use errors::{ErrorKind, KernelError};
pub use espresso::Espresso;
pub use formula::Formula;
pub use kernel::{Events, EventsId, Kernel, MinimizeEvent};
pub use qm::QuineMcCluskey;
pub use term::Term;
pub use values::{LiteralValue, OutputValue, Repre, State};
