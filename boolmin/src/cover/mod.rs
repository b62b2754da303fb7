// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Unordered collections of terms, and the cube calculus Espresso is built on.

mod complement;
mod cover_impl;
mod tautology;

pub use cover_impl::*;
