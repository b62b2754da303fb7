// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{cover::Cover, term::Term};

impl Cover {
    /// Returns true if this cover evaluates to 1 for every input.
    pub fn is_tautology(&self) -> bool {
        // The empty cover is not a tautology.
        if self.is_empty() {
            return false;
        }

        // The universe cube is present in this cover.
        if self.iter().any(|cube| cube.is_universe()) {
            return true;
        }

        // A unate cover is a tautology only if it contains the universe cube. The vertex with
        // every position set against its column isn't covered.
        if self.is_unate() {
            return false;
        }

        let position = match self.first_meaningful_position() {
            Some(position) => position,
            // Every cube is the universe, handled above.
            None => return true,
        };
        [false, true].iter().all(|&value| {
            let half = Term::literal(position, value, self.size());
            let cofactor = self.cofactor(&half);
            !cofactor.is_empty() && cofactor.is_tautology()
        })
    }

    #[cfg(test)]
    pub(crate) fn is_tautology_exhaustive(&self) -> bool {
        (0..1_u32 << self.size()).all(|index| self.covers(&Term::minterm(index, self.size())))
    }
}
