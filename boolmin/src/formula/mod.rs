// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Boolean functions with named variables.

mod display;

pub use display::*;

use crate::{
    container::TermsContainer,
    cover::Cover,
    errors::KernelError,
    term::{check_size, Term},
    values::{OutputValue, Repre, State},
};
use std::collections::BTreeSet;

/// Index sets describing a function: on-set `f`, don't care set `d` and off-set `r`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormulaSpec {
    pub f: Option<BTreeSet<u64>>,
    pub d: BTreeSet<u64>,
    pub r: Option<BTreeSet<u64>>,
}

/// Declaration of a function: its name and variable names.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormulaDecl {
    pub name: char,
    pub vars: Vec<char>,
}

impl FormulaDecl {
    pub fn new(name: char, vars: impl IntoIterator<Item = char>) -> Self {
        Self {
            name,
            vars: vars.into_iter().collect(),
        }
    }
}

/// The sets a formula's universe is partitioned into, as used by Espresso.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Covers {
    /// Explicit terms.
    pub f: Vec<Term>,
    /// Don't cares.
    pub d: Vec<Term>,
    /// The complement: terms of the opposite representation.
    pub r: Vec<Term>,
}

/// A Boolean function of named variables in the sum of products or product of sums
/// representation.
#[derive(Clone, Debug)]
pub struct Formula {
    terms: TermsContainer,
    name: char,
    vars: Vec<char>,
    state: State,
    minimized: bool,
}

impl Formula {
    pub const DEFAULT_NAME: char = 'f';
    pub const DEFAULT_FIRST_VAR: char = 'a';
    /// Variables are named by distinct lower case letters, so a formula has at most 26 of them,
    /// fewer than the [`Term::MAX_SIZE`] positions a term can hold.
    pub const MAX_VARS: usize = 26;

    /// Creates a formula with no terms and default variable names.
    pub fn new(vars_count: usize, repre: Repre) -> Result<Self, KernelError> {
        check_vars_count(vars_count)?;
        Ok(Self::with_cover(
            vars_count,
            repre,
            Vec::new(),
            Self::DEFAULT_NAME,
            default_vars(vars_count),
        ))
    }

    /// Creates a formula from explicit and don't care indexes.
    pub fn from_indices(
        vars_count: usize,
        repre: Repre,
        terms: impl IntoIterator<Item = u64>,
        dont_cares: impl IntoIterator<Item = u64>,
    ) -> Result<Self, KernelError> {
        let mut formula = Self::new(vars_count, repre)?;
        formula.push_indices(terms, dont_cares)?;
        Ok(formula)
    }

    /// Creates a formula from index sets.
    ///
    /// An on-set produces a sum of products formula; without one, the off-set produces a product
    /// of sums formula. A spec with neither is an empty sum of products. The sets must be
    /// disjoint, and if both the on-set and the off-set are given, every index must be in one of
    /// the three sets.
    pub fn from_spec(spec: &FormulaSpec, decl: FormulaDecl) -> Result<Self, KernelError> {
        let vars_count = decl.vars.len();
        check_size(vars_count)?;
        check_vars(&decl.vars, vars_count)?;
        check_spec(spec, 1 << vars_count)?;

        let (repre, terms): (_, Vec<u64>) = match (&spec.f, &spec.r) {
            (Some(f), _) => (Repre::Sop, f.iter().copied().collect()),
            (None, Some(r)) => (Repre::Pos, r.iter().copied().collect()),
            (None, None) => (Repre::Sop, Vec::new()),
        };
        let mut formula =
            Self::with_cover(vars_count, repre, Vec::new(), decl.name, decl.vars);
        formula.push_indices(terms, spec.d.iter().copied())?;
        Ok(formula)
    }

    /// Creates a formula from terms, which may have missing positions. The variable count is
    /// taken from the first term.
    pub fn from_terms(terms: Vec<Term>, repre: Repre) -> Result<Self, KernelError> {
        let vars_count = terms.first().ok_or(KernelError::NoTerms)?.size();
        check_vars_count(vars_count)?;
        if let Some(term) = terms.iter().find(|t| t.size() != vars_count) {
            return Err(KernelError::InvalidTermSize {
                actual: term.size(),
                required: vars_count,
            });
        }
        Ok(Self::with_cover(
            vars_count,
            repre,
            terms,
            Self::DEFAULT_NAME,
            default_vars(vars_count),
        ))
    }

    /// Creates a formula holding `cover`, with the declaration and representation of `self`.
    pub(crate) fn derive_with_cover(&self, cover: impl IntoIterator<Item = Term>) -> Self {
        Self::with_cover(
            self.vars_count(),
            self.repre(),
            cover,
            self.name,
            self.vars.clone(),
        )
    }

    fn push_indices(
        &mut self,
        terms: impl IntoIterator<Item = u64>,
        dont_cares: impl IntoIterator<Item = u64>,
    ) -> Result<(), KernelError> {
        for index in terms {
            self.terms.push_term(index, false)?;
        }
        for index in dont_cares {
            self.terms.push_term(index, true)?;
        }
        Ok(())
    }

    fn with_cover(
        vars_count: usize,
        repre: Repre,
        cover: impl IntoIterator<Item = Term>,
        name: char,
        vars: Vec<char>,
    ) -> Self {
        Self {
            terms: TermsContainer::from_terms(vars_count, repre, cover),
            name,
            vars,
            state: State::Complete,
            minimized: false,
        }
    }

    // ---
    // Mutators
    // ---

    /// Sets the term at `index` to the explicit value of the representation, or to don't care.
    pub fn push_term(&mut self, index: u64, is_dc: bool) -> Result<bool, KernelError> {
        let changed = self.terms.push_term(index, is_dc)?;
        self.on_change(changed);
        Ok(changed)
    }

    /// Sets the term at `index` to the implicit value of the representation.
    pub fn remove_term(&mut self, index: u64) -> Result<bool, KernelError> {
        let changed = self.terms.remove_term(index)?;
        self.on_change(changed);
        Ok(changed)
    }

    /// Sets the value of the function at `index`. Returns whether anything changed.
    pub fn set_term_value(&mut self, index: u64, value: OutputValue) -> Result<bool, KernelError> {
        if value == OutputValue::Dc {
            self.push_term(index, true)
        } else if value == self.repre().explicit_value() {
            self.push_term(index, false)
        } else {
            self.remove_term(index)
        }
    }

    /// Switches the representation. Returns whether it changed.
    pub fn set_repre(&mut self, repre: Repre) -> bool {
        let changed = self.terms.set_repre(repre);
        self.on_change(changed);
        changed
    }

    #[inline]
    pub fn set_name(&mut self, name: char) {
        self.name = name;
    }

    /// Sets the variable names. `vars[0]` names the most significant position.
    pub fn set_vars(&mut self, vars: Vec<char>) -> Result<(), KernelError> {
        check_vars(&vars, self.vars_count())?;
        self.vars = vars;
        Ok(())
    }

    /// Resets the variable names to the defaults: `c, b, a` for three variables.
    pub fn set_default_vars(&mut self) {
        self.vars = default_vars(self.vars_count());
    }

    pub(crate) fn set_state(&mut self, state: State) {
        self.state = state;
    }

    pub(crate) fn set_minimized(&mut self, minimized: bool) {
        self.minimized = minimized;
    }

    fn on_change(&mut self, changed: bool) {
        if changed {
            self.minimized = false;
            self.state = State::Complete;
        }
    }

    // ---
    // Accessors
    // ---

    #[inline]
    pub fn name(&self) -> char {
        self.name
    }

    #[inline]
    pub fn vars(&self) -> &[char] {
        &self.vars
    }

    #[inline]
    pub fn vars_count(&self) -> usize {
        self.terms.vars_count()
    }

    #[inline]
    pub fn repre(&self) -> Repre {
        self.terms.repre()
    }

    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    #[inline]
    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    #[inline]
    pub fn terms_container(&self) -> &TermsContainer {
        &self.terms
    }

    /// Explicit terms (the cover, for a minimized formula).
    #[inline]
    pub fn terms(&self) -> &[Term] {
        self.terms.terms()
    }

    #[inline]
    pub fn dont_cares(&self) -> &[Term] {
        self.terms.dont_cares()
    }

    /// Number of explicit terms, don't cares excluded.
    #[inline]
    pub fn size(&self) -> usize {
        self.terms.terms().len()
    }

    pub fn term_at(&self, position: usize) -> Result<&Term, KernelError> {
        self.terms().get(position).ok_or(KernelError::InvalidPosition {
            position,
            size: self.size(),
        })
    }

    #[inline]
    pub fn has_term(&self, term: &Term) -> bool {
        self.terms.has_term(term)
    }

    #[inline]
    pub fn term_value(&self, index: u64) -> Result<OutputValue, KernelError> {
        self.terms.term_value(index)
    }

    #[inline]
    pub fn term_indices(&self, value: OutputValue) -> Vec<u32> {
        self.terms.term_indices(value)
    }

    /// Explicit terms expanded to minterms (or maxterms), sorted by index.
    #[inline]
    pub fn expanded_terms(&self) -> Vec<Term> {
        self.terms.expanded_terms()
    }

    /// Partitions the universe into explicit terms, don't cares and the complement, all fully
    /// expanded.
    pub fn covers(&self) -> Covers {
        Covers {
            f: self.terms.expanded_terms(),
            d: self.terms.expanded_dont_cares(),
            r: self.terms.complement_terms().to_vec(),
        }
    }

    /// Whether this formula is always 1.
    pub fn is_tautology(&self) -> bool {
        match self.repre() {
            Repre::Sop => self.terms().iter().any(|t| t.is_universe()),
            Repre::Pos => self.terms().is_empty(),
        }
    }

    /// Whether this formula is always 0.
    pub fn is_contradiction(&self) -> bool {
        match self.repre() {
            Repre::Sop => self.terms().is_empty(),
            Repre::Pos => self.terms().iter().any(|t| t.is_universe()),
        }
    }

    /// Checks that `cover`, a minimized version of this formula, has the same value on every
    /// index that isn't a don't care.
    ///
    /// Returns the first index where they differ.
    pub fn check_cover(&self, cover: &Formula) -> Result<(), u32> {
        debug_assert_eq!(self.vars_count(), cover.vars_count());
        debug_assert_eq!(self.repre(), cover.repre());
        let dont_cares = self.terms.expanded_dont_cares();
        let expected = Cover::from_terms(self.vars_count(), self.terms().iter().copied());
        let actual = Cover::from_terms(cover.vars_count(), cover.terms().iter().copied());
        for index in 0..self.terms.max_index() as u32 {
            let minterm = Term::minterm(index, self.vars_count());
            if dont_cares.contains(&minterm) {
                continue;
            }
            let expected = expected.covers(&minterm);
            let actual = actual.covers(&minterm);
            if expected != actual {
                return Err(index);
            }
        }
        Ok(())
    }

    /// Compares the term sets, and the variable names if `include_vars` is true.
    pub fn equal(&self, other: &Formula, include_vars: bool) -> bool {
        self.terms == other.terms && (!include_vars || self.vars == other.vars)
    }
}

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other, true)
    }
}

impl Eq for Formula {}

fn check_vars_count(vars_count: usize) -> Result<(), KernelError> {
    check_size(vars_count)?;
    if vars_count > Formula::MAX_VARS {
        return Err(KernelError::invalid_variables(format!(
            "{} variables can't be named, at most {} are available",
            vars_count,
            Formula::MAX_VARS
        )));
    }
    Ok(())
}

/// `c, b, a` for three variables.
fn default_vars(vars_count: usize) -> Vec<char> {
    debug_assert!(vars_count <= Formula::MAX_VARS);
    (0..vars_count)
        .rev()
        .map(|ix| (Formula::DEFAULT_FIRST_VAR as u8 + ix as u8) as char)
        .collect()
}

fn check_spec(spec: &FormulaSpec, max_index: u64) -> Result<(), KernelError> {
    let empty = BTreeSet::new();
    let f = spec.f.as_ref().unwrap_or(&empty);
    let r = spec.r.as_ref().unwrap_or(&empty);
    let overlap = f
        .intersection(&spec.d)
        .chain(f.intersection(r))
        .chain(spec.d.intersection(r))
        .min();
    if let Some(&index) = overlap {
        return Err(KernelError::InconsistentSets { index });
    }
    if spec.f.is_some() && spec.r.is_some() {
        let unlisted = (0..max_index).find(|index| {
            !f.contains(index) && !spec.d.contains(index) && !r.contains(index)
        });
        if let Some(index) = unlisted {
            return Err(KernelError::InconsistentSets { index });
        }
    }
    Ok(())
}

fn check_vars(vars: &[char], vars_count: usize) -> Result<(), KernelError> {
    if vars.len() != vars_count {
        return Err(KernelError::invalid_variables(format!(
            "{} names given for {} variables",
            vars.len(),
            vars_count
        )));
    }
    let invalid: String = vars.iter().filter(|c| !c.is_ascii_lowercase()).collect();
    if !invalid.is_empty() {
        return Err(KernelError::invalid_variables(format!(
            "invalid names {:?}, only lower case letters can be used",
            invalid
        )));
    }
    let unique: BTreeSet<_> = vars.iter().collect();
    if unique.len() != vars.len() {
        return Err(KernelError::invalid_variables("names must be unique"));
    }
    Ok(())
}
