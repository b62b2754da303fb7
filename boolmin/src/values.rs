// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

/// The value of a single position within a term.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    Zero,
    One,
    /// The position is a don't care.
    Missing,
}

impl LiteralValue {
    /// Returns the character used when displaying a term as a bit string.
    pub fn to_char(self) -> char {
        match self {
            Self::Zero => '0',
            Self::One => '1',
            Self::Missing => '-',
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// The value of a Boolean function for a given input index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OutputValue {
    Zero,
    One,
    Dc,
}

impl OutputValue {
    pub fn to_char(self) -> char {
        match self {
            Self::Zero => '0',
            Self::One => '1',
            Self::Dc => 'X',
        }
    }
}

impl fmt::Display for OutputValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Representation of a formula: sum of products or product of sums.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Repre {
    /// Sum of products -- the explicit terms are minterms.
    Sop,
    /// Product of sums -- the explicit terms are maxterms.
    Pos,
}

impl Repre {
    /// The output value carried by explicit terms in this representation.
    #[inline]
    pub fn explicit_value(self) -> OutputValue {
        match self {
            Self::Sop => OutputValue::One,
            Self::Pos => OutputValue::Zero,
        }
    }

    /// The output value of indexes that aren't stored in this representation.
    #[inline]
    pub fn implicit_value(self) -> OutputValue {
        match self {
            Self::Sop => OutputValue::Zero,
            Self::Pos => OutputValue::One,
        }
    }

    /// The literal value counted by the Quine-McCluskey table.
    #[inline]
    pub(crate) fn explicit_literal(self) -> LiteralValue {
        match self {
            Self::Sop => LiteralValue::One,
            Self::Pos => LiteralValue::Zero,
        }
    }
}

impl Default for Repre {
    fn default() -> Self {
        Self::Sop
    }
}

/// Minimization progress of a formula.
///
/// Used for tracing only; no algorithm branches on it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum State {
    Complete,
    Expanded,
    Irredundant,
    Reduced,
    Minimized,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::Complete => "COMPLETE",
            Self::Expanded => "EXPANDED",
            Self::Irredundant => "IRREDUNDANT",
            Self::Reduced => "REDUCED",
            Self::Minimized => "MINIMIZED",
        };
        write!(f, "{}", s)
    }
}
