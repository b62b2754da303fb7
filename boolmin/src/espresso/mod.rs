// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The Espresso heuristic minimizer.
//!
//! The on-set cover is improved in rounds of EXPAND, IRREDUNDANT and REDUCE until a phase leaves
//! its cost unchanged.

mod data;
mod expand;
mod irredundant;
mod reduce;

pub use data::*;

use crate::{
    algorithm::Minimizer,
    cover::{Cost, Cover},
    formula::{Covers, Formula},
    term::Term,
    values::State,
};
use log::{debug, trace};

/// Heuristic minimization over covers of the on-set, don't care set and off-set.
#[derive(Clone, Debug, Default)]
pub struct Espresso {
    max_iterations: Option<usize>,
    data: Option<EspressoData>,
}

impl Espresso {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caps the number of EXPAND/IRREDUNDANT/REDUCE rounds. `None`, the default, runs until the
    /// cost stops changing.
    pub fn with_max_iterations(mut self, max_iterations: Option<usize>) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    #[inline]
    pub fn max_iterations(&self) -> Option<usize> {
        self.max_iterations
    }

    /// The trace of the last run, if it was a debug run.
    #[inline]
    pub fn data(&self) -> Option<&EspressoData> {
        self.data.as_ref()
    }

    fn run(&self, formula: &Formula, mut data: Option<&mut EspressoData>) -> Vec<Term> {
        let vars_count = formula.vars_count();
        let Covers { f, d, r } = formula.covers();
        debug!(
            "espresso: |f| = {}, |d| = {}, |r| = {}",
            f.len(),
            d.len(),
            r.len()
        );
        if f.is_empty() {
            return f;
        }

        let d = Cover::from_terms(vars_count, d);
        let r = Cover::from_terms(vars_count, r);
        let mut f = EspressoCover::new(vars_count, f);
        let mut best = (f.cost(), f.terms());

        let mut record = |f: &EspressoCover, state: State, best: &mut (Cost, Vec<Term>)| {
            let cost = f.cost();
            trace!("espresso: {} ({})", state, cost);
            if let Some(data) = data.as_deref_mut() {
                data.push(state, formula.derive_with_cover(f.terms()));
            }
            if state != State::Reduced && cost <= best.0 {
                *best = (cost, f.terms());
            }
            cost
        };

        let mut iteration = 0;
        loop {
            if self.max_iterations == Some(iteration) {
                debug!("espresso: stopping after {} iterations", iteration);
                break;
            }
            iteration += 1;

            let cost = f.cost();
            expand::expand(&mut f, &r);
            if record(&f, State::Expanded, &mut best) == cost {
                break;
            }

            let cost = f.cost();
            irredundant::irredundant(&mut f, &d);
            if record(&f, State::Irredundant, &mut best) == cost {
                break;
            }

            let cost = f.cost();
            reduce::reduce(&mut f, &d);
            if record(&f, State::Reduced, &mut best) == cost {
                break;
            }
        }

        debug!(
            "espresso: cover of {} terms after {} iterations",
            best.1.len(),
            iteration
        );
        best.1
    }
}

impl Minimizer for Espresso {
    fn minimize(&mut self, formula: &mut Formula, debug: bool) -> Formula {
        let mut data = debug.then(|| EspressoData::new(formula.clone()));
        let cover = self.run(formula, data.as_mut());

        let mut minimized = formula.derive_with_cover(cover);
        minimized.set_state(State::Minimized);
        minimized.set_minimized(true);
        if let Some(data) = data.as_mut() {
            data.push(State::Minimized, minimized.clone());
        }
        self.data = data;
        formula.set_minimized(true);
        minimized
    }

    fn is_debug(&self) -> bool {
        self.data.is_some()
    }
}

/// Scratch flags for one cube of an [`EspressoCover`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(super) struct CubeFlags {
    pub(super) prime: bool,
    pub(super) covered: bool,
    pub(super) dc: bool,
    pub(super) relatively_essential: bool,
    pub(super) redundant: bool,
}

/// The working cover: cubes with their scratch flags, kept side by side and reordered together.
#[derive(Clone, Debug)]
pub(super) struct EspressoCover {
    size: usize,
    cubes: Vec<Term>,
    flags: Vec<CubeFlags>,
}

impl EspressoCover {
    pub(super) fn new(size: usize, cubes: Vec<Term>) -> Self {
        let flags = vec![CubeFlags::default(); cubes.len()];
        Self { size, cubes, flags }
    }

    #[inline]
    pub(super) fn len(&self) -> usize {
        self.cubes.len()
    }

    #[inline]
    pub(super) fn cube(&self, ix: usize) -> Term {
        self.cubes[ix]
    }

    #[inline]
    pub(super) fn flags(&self, ix: usize) -> CubeFlags {
        self.flags[ix]
    }

    #[inline]
    pub(super) fn flags_mut(&mut self, ix: usize) -> &mut CubeFlags {
        &mut self.flags[ix]
    }

    #[inline]
    pub(super) fn set_cube(&mut self, ix: usize, cube: Term) {
        self.cubes[ix] = cube;
    }

    /// The cubes that aren't don't cares.
    pub(super) fn terms(&self) -> Vec<Term> {
        self.iter()
            .filter(|(_, flags)| !flags.dc)
            .map(|(cube, _)| cube)
            .collect()
    }

    pub(super) fn cost(&self) -> Cost {
        Cost::of(
            self.cubes
                .iter()
                .zip(&self.flags)
                .filter(|(_, flags)| !flags.dc)
                .map(|(cube, _)| cube),
        )
    }

    /// Replaces the cover with the universe cube.
    pub(super) fn set_tautology(&mut self) {
        self.cubes = vec![Term::universe(self.size)];
        self.flags = vec![CubeFlags {
            prime: true,
            ..CubeFlags::default()
        }];
    }

    /// Appends `d`, flagged as don't cares.
    pub(super) fn append_dc(&mut self, d: &Cover) {
        for cube in d.iter() {
            self.cubes.push(*cube);
            self.flags.push(CubeFlags {
                dc: true,
                ..CubeFlags::default()
            });
        }
    }

    /// Resets the flags that only live for one phase.
    pub(super) fn clear_scratch(&mut self) {
        for flags in &mut self.flags {
            flags.covered = false;
            flags.relatively_essential = false;
            flags.redundant = false;
        }
    }

    /// Sorts by decreasing number of missing positions, keeping the order of equal cubes.
    pub(super) fn sort_by_decreasing_missing(&mut self) {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_by_key(|(cube, _)| std::cmp::Reverse(cube.missing().count_ones()));
        let (cubes, flags): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        self.cubes = cubes;
        self.flags = flags;
    }

    pub(super) fn retain(&mut self, mut keep: impl FnMut(&Term, CubeFlags) -> bool) {
        let (cubes, flags): (Vec<_>, Vec<_>) = self
            .iter()
            .filter(|(cube, flags)| keep(cube, *flags))
            .unzip();
        self.cubes = cubes;
        self.flags = flags;
    }

    /// Collects the cubes matching `select` into a plain cover.
    pub(super) fn cover_where(&self, mut select: impl FnMut(usize, CubeFlags) -> bool) -> Cover {
        Cover::from_terms(
            self.size,
            self.iter()
                .enumerate()
                .filter(|(ix, (_, flags))| select(*ix, *flags))
                .map(|(_, (cube, _))| cube),
        )
    }

    fn iter(&self) -> impl Iterator<Item = (Term, CubeFlags)> + '_ {
        self.cubes.iter().copied().zip(self.flags.iter().copied())
    }
}
