// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{term::Term, values::Repre};
use bitvec::prelude::*;
use std::collections::HashSet;

/// A cube in the implicant table, with the indexes of the original terms it was combined from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QmImplicant {
    term: Term,
    ancestors: Vec<u32>,
    prime: bool,
}

impl QmImplicant {
    fn new(term: Term) -> Self {
        let mut ancestors: Vec<_> = term
            .expand_missing_values()
            .filter_map(|t| t.index())
            .collect();
        ancestors.sort_unstable();
        Self {
            term,
            ancestors,
            prime: false,
        }
    }

    #[inline]
    pub fn term(&self) -> &Term {
        &self.term
    }

    /// Sorted indexes of the terms this cube was combined from.
    #[inline]
    pub fn ancestors(&self) -> &[u32] {
        &self.ancestors
    }

    #[inline]
    pub fn is_prime(&self) -> bool {
        self.prime
    }
}

/// Trace of a Quine-McCluskey run: the implicant table and the covering table.
///
/// No formatting is done here; renderers read the cells and headers directly.
#[derive(Clone, Debug)]
pub struct QuineMcCluskeyData {
    empty: bool,
    repre: Repre,
    vars_count: usize,
    max_missing: usize,
    // (vars_count + 1) * (vars_count + 1) cells, indexed by (missing, explicit).
    implicants: Vec<Vec<QmImplicant>>,
    cover_rows: Vec<Term>,
    cover_cols: Vec<Term>,
    // Column-major: col * rows + row.
    covered: BitVec,
}

impl QuineMcCluskeyData {
    pub(crate) fn new(vars_count: usize, repre: Repre) -> Self {
        let cells = (vars_count + 1) * (vars_count + 1);
        Self {
            empty: false,
            repre,
            vars_count,
            max_missing: 0,
            implicants: vec![Vec::new(); cells],
            cover_rows: Vec::new(),
            cover_cols: Vec::new(),
            covered: BitVec::new(),
        }
    }

    /// Trace for a function without explicit terms.
    pub(crate) fn empty(vars_count: usize, repre: Repre) -> Self {
        Self {
            empty: true,
            ..Self::new(vars_count, repre)
        }
    }

    pub(crate) fn add_implicant(&mut self, missing: usize, explicit: usize, term: Term) {
        self.max_missing = self.max_missing.max(missing);
        let ix = self.cell_index(missing, explicit);
        self.implicants[ix].push(QmImplicant::new(term));
    }

    pub(crate) fn set_primes(&mut self, primes: &[Term]) {
        let primes: HashSet<&Term> = primes.iter().collect();
        for implicant in self.implicants.iter_mut().flatten() {
            if primes.contains(&implicant.term) {
                implicant.prime = true;
            }
        }
    }

    pub(crate) fn init_cover(&mut self, rows: Vec<Term>, cols: Vec<Term>) {
        self.covered = BitVec::repeat(false, rows.len() * cols.len());
        self.cover_rows = rows;
        self.cover_cols = cols;
    }

    pub(crate) fn set_covered(&mut self, row: usize, col: usize) {
        let ix = self.cover_index(row, col);
        self.covered.set(ix, true);
    }

    /// Whether the function had no explicit terms, so no tables were built.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.empty
    }

    #[inline]
    pub fn is_sop(&self) -> bool {
        self.repre == Repre::Sop
    }

    #[inline]
    pub fn repre(&self) -> Repre {
        self.repre
    }

    #[inline]
    pub fn vars_count(&self) -> usize {
        self.vars_count
    }

    /// The largest number of missing positions of any implicant.
    #[inline]
    pub fn max_missing(&self) -> usize {
        self.max_missing
    }

    /// Cubes with `missing` missing positions and `explicit` explicit positions valued 1 (or 0
    /// for product of sums), in insertion order.
    pub fn implicants(&self, missing: usize, explicit: usize) -> &[QmImplicant] {
        if missing > self.vars_count || explicit > self.vars_count {
            return &[];
        }
        &self.implicants[self.cell_index(missing, explicit)]
    }

    /// The lowest explicit count with any term in the first column.
    pub fn first_explicit_term(&self) -> Option<usize> {
        (0..=self.vars_count).find(|&explicit| !self.implicants(0, explicit).is_empty())
    }

    /// The highest explicit count with any term in the first column.
    pub fn last_explicit_term(&self) -> Option<usize> {
        (0..=self.vars_count)
            .rev()
            .find(|&explicit| !self.implicants(0, explicit).is_empty())
    }

    /// Prime implicants heading the rows of the covering table.
    #[inline]
    pub fn cover_head_row(&self) -> &[Term] {
        &self.cover_rows
    }

    /// Explicit terms heading the columns of the covering table.
    #[inline]
    pub fn cover_head_col(&self) -> &[Term] {
        &self.cover_cols
    }

    /// Whether the prime implicant in `row` covers the term in `col`.
    pub fn is_covered(&self, row: usize, col: usize) -> bool {
        if row >= self.cover_rows.len() || col >= self.cover_cols.len() {
            return false;
        }
        self.covered[self.cover_index(row, col)]
    }

    #[inline]
    fn cell_index(&self, missing: usize, explicit: usize) -> usize {
        missing * (self.vars_count + 1) + explicit
    }

    #[inline]
    fn cover_index(&self, row: usize, col: usize) -> usize {
        row + col * self.cover_rows.len()
    }
}
