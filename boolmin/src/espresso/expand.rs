// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::EspressoCover;
use crate::{
    cover::Cover,
    term::{Term, TermMask},
};
use std::cmp::Reverse;

/// Expands every non-prime cube of `f` into a prime implicant that doesn't intersect the off-set
/// `r`. Cubes contained in an expanded cube are removed.
pub(super) fn expand(f: &mut EspressoCover, r: &Cover) {
    f.clear_scratch();
    if r.is_empty() {
        f.set_tautology();
        return;
    }

    f.sort_by_decreasing_missing();
    for ix in 0..f.len() {
        let flags = f.flags(ix);
        if flags.prime || flags.covered {
            continue;
        }

        let expanded = expand_cube(f, ix, r);
        f.set_cube(ix, expanded);
        f.flags_mut(ix).prime = true;

        for other in 0..f.len() {
            if other != ix && !f.flags(other).covered && expanded.contains(&f.cube(other)) {
                f.flags_mut(other).covered = true;
            }
        }
    }
    f.retain(|_, flags| !flags.covered);
}

/// Expands cube `ix` of `f` against `r`.
///
/// Every off-set cube is a row of the blocking matrix, holding the positions where it conflicts
/// with the cube. Every other cube of `f` is a row of the covering matrix, holding the positions
/// that have to be raised for the expanded cube to contain it. Each care position is either
/// lowered (kept) or raised (made missing).
fn expand_cube(f: &EspressoCover, ix: usize, r: &Cover) -> Term {
    let cube = f.cube(ix);
    let care = cube.care();

    let blocking: Vec<TermMask> = r
        .iter()
        .map(|off| (cube.literals() ^ off.literals()) & care & off.care())
        .collect();
    debug_assert!(
        blocking.iter().all(|&row| row != 0),
        "cube {} intersects the off-set",
        cube
    );
    let covering: Vec<TermMask> = (0..f.len())
        .filter(|&other| other != ix && !f.flags(other).covered)
        .map(|other| {
            let other = f.cube(other);
            care & (other.missing() | (cube.literals() ^ other.literals()))
        })
        .collect();

    let mut free = care;
    let mut lowered: TermMask = 0;
    loop {
        // Essential positions: the only remaining conflict in a row that isn't blocked yet.
        loop {
            let mut changed = false;
            for &row in &blocking {
                let candidates = row & free;
                if row & lowered == 0 && candidates.count_ones() == 1 {
                    lowered |= candidates;
                    free &= !candidates;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        // Inessential positions: not needed by any unblocked row.
        let needed = blocking
            .iter()
            .filter(|&&row| row & lowered == 0)
            .fold(0, |acc, &row| acc | (row & free));
        free &= needed;
        if free == 0 {
            break;
        }

        // Raise the position that helps contain the most cubes that can still be contained.
        // Every unblocked row has at least two candidates left, so any position is feasible.
        let raised = (0..cube.size())
            .filter(|position| free & (1 << position) != 0)
            .max_by_key(|&position| {
                let bit = 1 << position;
                let covers = covering
                    .iter()
                    .filter(|&&row| row & lowered == 0 && row & bit != 0)
                    .count();
                let blocks = blocking
                    .iter()
                    .filter(|&&row| row & lowered == 0 && row & bit != 0)
                    .count();
                (covers, Reverse(blocks), Reverse(position))
            });
        if let Some(position) = raised {
            free &= !(1 << position);
        }
    }

    // Raising one lowered position more is fine if every row stays blocked by another one.
    for position in 0..cube.size() {
        let bit = 1 << position;
        if lowered & bit != 0 && blocking.iter().all(|&row| row & lowered & !bit != 0) {
            lowered &= !bit;
        }
    }

    let mut expanded = cube;
    expanded.lower(lowered);
    expanded
}
