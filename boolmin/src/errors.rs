// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Errors raised while constructing or mutating terms and formulas.
//!
//! Minimization itself never fails: the engines treat empty, tautological and contradictory
//! functions as regular inputs.

use thiserror::Error;

/// An error returned for malformed construction input.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum KernelError {
    /// Variable names are invalid, or their number doesn't match the formula.
    #[error("invalid variables: {reason}")]
    InvalidVariables { reason: String },

    /// A term index is outside `[0, max)`.
    #[error("invalid formula index: {index} (must be less than {max})")]
    InvalidIndex { index: u64, max: u64 },

    /// A term has a different number of positions than required.
    #[error("invalid term: number of variables in term: {actual} (required: {required})")]
    InvalidTermSize { actual: usize, required: usize },

    /// A position is outside the term.
    #[error("invalid term position: {position} (term size is {size})")]
    InvalidPosition { position: usize, size: usize },

    /// No terms were supplied, so the variable count can't be inferred.
    #[error("no terms were added")]
    NoTerms,

    /// An index is in more than one of the on-set, don't care set and off-set, or in none of
    /// them while both the on-set and off-set are given.
    #[error("index {index} is listed inconsistently in the on-set, don't care set and off-set")]
    InconsistentSets { index: u64 },
}

/// The kind of a [`KernelError`], without its context.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidVariables,
    InvalidIndex,
    InvalidTermSize,
    InvalidPosition,
    NoTerms,
    InconsistentSets,
}

impl KernelError {
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidVariables { .. } => ErrorKind::InvalidVariables,
            Self::InvalidIndex { .. } => ErrorKind::InvalidIndex,
            Self::InvalidTermSize { .. } => ErrorKind::InvalidTermSize,
            Self::InvalidPosition { .. } => ErrorKind::InvalidPosition,
            Self::NoTerms => ErrorKind::NoTerms,
            Self::InconsistentSets { .. } => ErrorKind::InconsistentSets,
        }
    }

    pub(crate) fn invalid_variables(reason: impl Into<String>) -> Self {
        Self::InvalidVariables {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_message() {
        let err = KernelError::InvalidIndex { index: 9, max: 8 };
        assert_eq!(err.kind(), ErrorKind::InvalidIndex);
        assert_eq!(
            err.to_string(),
            "invalid formula index: 9 (must be less than 8)"
        );

        let err = KernelError::InvalidTermSize {
            actual: 2,
            required: 3,
        };
        assert_eq!(err.kind(), ErrorKind::InvalidTermSize);
        assert_eq!(
            err.to_string(),
            "invalid term: number of variables in term: 2 (required: 3)"
        );

        let err = KernelError::InconsistentSets { index: 5 };
        assert_eq!(err.kind(), ErrorKind::InconsistentSets);
        assert_eq!(
            err.to_string(),
            "index 5 is listed inconsistently in the on-set, don't care set and off-set"
        );
    }
}
