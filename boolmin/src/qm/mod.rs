// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Quine-McCluskey algorithm.

mod data;

pub use data::*;

use crate::{
    algorithm::Minimizer,
    formula::Formula,
    term::Term,
    values::{LiteralValue, State},
};
use bitvec::prelude::*;
use log::debug;
use std::collections::{HashMap, HashSet};

/// Exact minimization: all prime implicants are generated, then a cover is picked from them.
#[derive(Clone, Debug, Default)]
pub struct QuineMcCluskey {
    data: Option<QuineMcCluskeyData>,
}

impl QuineMcCluskey {
    pub fn new() -> Self {
        Self::default()
    }

    /// The trace of the last run, if it was a debug run.
    #[inline]
    pub fn data(&self) -> Option<&QuineMcCluskeyData> {
        self.data.as_ref()
    }

    fn run(&mut self, formula: &Formula, debug: bool) -> Vec<Term> {
        let terms = formula.expanded_terms();
        let dont_cares = formula.terms_container().expanded_dont_cares();
        debug!(
            "quine-mccluskey: {} terms, {} don't cares over {} variables",
            terms.len(),
            dont_cares.len(),
            formula.vars_count()
        );

        if debug {
            if terms.is_empty() {
                self.data = Some(QuineMcCluskeyData::empty(
                    formula.vars_count(),
                    formula.repre(),
                ));
                return Vec::new();
            }
        } else if terms.is_empty() || (terms.len() == 1 && dont_cares.is_empty()) {
            return terms;
        }

        let mut data = debug.then(|| QuineMcCluskeyData::new(formula.vars_count(), formula.repre()));
        let primes = find_prime_implicants(formula, &terms, &dont_cares, data.as_mut());
        debug!("quine-mccluskey: {} prime implicants", primes.len());
        let cover = find_final_implicants(&primes, &terms, data.as_mut());
        self.data = data;
        cover
    }
}

impl Minimizer for QuineMcCluskey {
    fn minimize(&mut self, formula: &mut Formula, debug: bool) -> Formula {
        self.data = None;
        let cover = self.run(formula, debug);
        debug!("quine-mccluskey: cover of {} terms", cover.len());

        let mut minimized = formula.derive_with_cover(cover);
        minimized.set_state(State::Minimized);
        minimized.set_minimized(true);
        formula.set_minimized(true);
        minimized
    }

    fn is_debug(&self) -> bool {
        self.data.is_some()
    }
}

/// Generates all prime implicants of `terms` and `dont_cares`, both fully expanded.
///
/// Cubes are bucketed by (missing positions, explicit positions), and each bucket is combined
/// with the bucket holding one more explicit position. Partners are looked up by flipping one
/// literal instead of trying every pair of cubes in the two buckets.
fn find_prime_implicants(
    formula: &Formula,
    terms: &[Term],
    dont_cares: &[Term],
    mut data: Option<&mut QuineMcCluskeyData>,
) -> Vec<Term> {
    let vars_count = formula.vars_count();
    let explicit = formula.repre().explicit_literal();

    let mut seed: Vec<Term> = terms.iter().chain(dont_cares).copied().collect();
    seed.sort();

    let mut table: Vec<Vec<Vec<Term>>> = vec![vec![Vec::new(); vars_count + 1]; vars_count + 1];
    for term in &seed {
        let count = term.count(explicit);
        table[0][count].push(*term);
        if let Some(data) = data.as_deref_mut() {
            data.add_implicant(0, count, *term);
        }
    }

    // Primes are collected level by level: the cubes of a level that no combination used, in
    // order of creation.
    let mut level = seed;
    let mut primes = Vec::new();
    for missing in 0..vars_count {
        let (lower, upper) = table.split_at_mut(missing + 1);
        let row = &lower[missing];
        let next_row = &mut upper[0];
        let mut combined: HashSet<Term> = HashSet::new();
        let mut seen: HashSet<Term> = HashSet::new();
        let mut next_level = Vec::new();
        for count in 0..vars_count {
            // Position of every cube in the next cell, so partners are visited in cell order.
            let rights: HashMap<Term, usize> = row[count + 1]
                .iter()
                .enumerate()
                .map(|(ix, cube)| (*cube, ix))
                .collect();
            if rights.is_empty() {
                continue;
            }
            for left in &row[count] {
                // A partner has the same missing positions and one more explicit literal.
                let mut partners: Vec<(usize, Term)> = (0..vars_count)
                    .filter(|&position| {
                        let value = left.value_at(position);
                        value != explicit && value != LiteralValue::Missing
                    })
                    .filter_map(|position| {
                        let partner = Term::new_unchecked(
                            left.literals() ^ (1 << position),
                            left.missing(),
                            vars_count,
                        );
                        rights.get(&partner).map(|&ix| (ix, partner))
                    })
                    .collect();
                partners.sort_unstable_by_key(|&(ix, _)| ix);

                for (_, right) in partners {
                    let cube = match left.combine(&right) {
                        Some(cube) => cube,
                        None => continue,
                    };
                    combined.insert(*left);
                    combined.insert(right);
                    // The explicit count fixes the cell, so a cube new to the level is new to
                    // its cell.
                    if seen.insert(cube) {
                        next_row[count].push(cube);
                        next_level.push(cube);
                        if let Some(data) = data.as_deref_mut() {
                            data.add_implicant(missing + 1, count, cube);
                        }
                    }
                }
            }
        }
        primes.extend(level.into_iter().filter(|cube| !combined.contains(cube)));
        level = next_level;
        if level.is_empty() {
            break;
        }
    }
    primes.extend(level);

    if let Some(data) = data {
        data.set_primes(&primes);
    }
    primes
}

/// Picks a cover of `terms` out of `primes`.
///
/// Essential implicants are taken first. When there are none left, the implicant covering the
/// most uncovered terms is taken; on ties, the first one wins.
fn find_final_implicants(
    primes: &[Term],
    terms: &[Term],
    mut data: Option<&mut QuineMcCluskeyData>,
) -> Vec<Term> {
    let mut table: Vec<BitVec> = primes
        .iter()
        .map(|prime| terms.iter().map(|term| prime.implies(term)).collect())
        .collect();

    if let Some(data) = data.as_deref_mut() {
        data.init_cover(primes.to_vec(), terms.to_vec());
        for (row, bits) in table.iter().enumerate() {
            for col in bits.iter_ones() {
                data.set_covered(row, col);
            }
        }
    }

    let mut cover = Vec::new();
    while let Some(row) =
        extract_essential(&mut table, terms.len()).or_else(|| extract_largest(&mut table))
    {
        cover.push(primes[row]);
    }
    cover
}

fn extract_essential(table: &mut [BitVec], cols: usize) -> Option<usize> {
    for col in 0..cols {
        let mut rows = table
            .iter()
            .enumerate()
            .filter_map(|(row, bits)| bits[col].then(|| row));
        if let (Some(row), None) = (rows.next(), rows.next()) {
            extract_implicant(table, row);
            return Some(row);
        }
    }
    None
}

fn extract_largest(table: &mut [BitVec]) -> Option<usize> {
    let mut max = 0;
    let mut selected = None;
    for (row, bits) in table.iter().enumerate() {
        let count = bits.count_ones();
        if count > max {
            max = count;
            selected = Some(row);
        }
    }
    if let Some(row) = selected {
        extract_implicant(table, row);
    }
    selected
}

/// Marks every term covered by `row` as covered, for all rows.
fn extract_implicant(table: &mut [BitVec], row: usize) {
    let cols: Vec<_> = table[row].iter_ones().collect();
    for bits in table.iter_mut() {
        for &col in &cols {
            bits.set(col, false);
        }
    }
}
