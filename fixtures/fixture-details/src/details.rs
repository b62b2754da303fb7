// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

/// Totals over a run of [`crate::AllFixtures::check_random`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CheckSummary {
    /// Number of formulas checked.
    pub formulas: usize,
    /// Terms in all Quine-McCluskey covers.
    pub qm_terms: usize,
    /// Terms in all Espresso covers.
    pub espresso_terms: usize,
    /// Formulas where Espresso found fewer terms than Quine-McCluskey.
    pub espresso_smaller: usize,
    /// Formulas where Espresso found more terms than Quine-McCluskey.
    pub espresso_larger: usize,
}

impl CheckSummary {
    pub(crate) fn record(&mut self, qm_terms: usize, espresso_terms: usize) {
        self.formulas += 1;
        self.qm_terms += qm_terms;
        self.espresso_terms += espresso_terms;
        if espresso_terms < qm_terms {
            self.espresso_smaller += 1;
        } else if espresso_terms > qm_terms {
            self.espresso_larger += 1;
        }
    }
}

impl fmt::Display for CheckSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} formulas: {} terms (quine-mccluskey), {} terms (espresso); \
             espresso smaller in {}, larger in {}",
            self.formulas,
            self.qm_terms,
            self.espresso_terms,
            self.espresso_smaller,
            self.espresso_larger
        )
    }
}
