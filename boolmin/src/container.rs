// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    errors::KernelError,
    term::{Term, TermMask},
    values::{OutputValue, Repre},
};
use once_cell::sync::OnceCell;

/// The terms defining a Boolean function in one representation.
///
/// The explicit terms and don't cares of the active representation are stored; the terms of
/// the opposite representation are computed on demand and cached until the next mutation.
#[derive(Clone, Debug)]
pub struct TermsContainer {
    vars_count: usize,
    repre: Repre,
    terms: Vec<Term>,
    dont_cares: Vec<Term>,
    complement: OnceCell<Vec<Term>>,
}

impl TermsContainer {
    pub fn new(vars_count: usize, repre: Repre) -> Self {
        debug_assert!(vars_count <= Term::MAX_SIZE);
        Self {
            vars_count,
            repre,
            terms: Vec::new(),
            dont_cares: Vec::new(),
            complement: OnceCell::new(),
        }
    }

    /// Creates a container from terms that are already known to have `vars_count` positions.
    pub(crate) fn from_terms(
        vars_count: usize,
        repre: Repre,
        terms: impl IntoIterator<Item = Term>,
    ) -> Self {
        let mut container = Self::new(vars_count, repre);
        for term in terms {
            debug_assert_eq!(term.size(), vars_count);
            if !container.terms.contains(&term) {
                container.terms.push(term);
            }
        }
        container
    }

    #[inline]
    pub fn vars_count(&self) -> usize {
        self.vars_count
    }

    #[inline]
    pub fn repre(&self) -> Repre {
        self.repre
    }

    /// Number of stored terms, don't cares included.
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len() + self.dont_cares.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.dont_cares.is_empty()
    }

    /// Explicit terms: minterms (or implicants) for SOP, maxterms (or implicates) for POS.
    #[inline]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    #[inline]
    pub fn dont_cares(&self) -> &[Term] {
        &self.dont_cares
    }

    /// One past the largest valid index.
    #[inline]
    pub fn max_index(&self) -> u64 {
        1 << self.vars_count
    }

    /// Sets the term at `index` to the explicit value of the representation, or to don't care.
    /// Returns whether the value of the function changed.
    ///
    /// Stored cubes covering `index` with another value are split around it.
    pub fn push_term(&mut self, index: u64, is_dc: bool) -> Result<bool, KernelError> {
        let wanted = if is_dc {
            OutputValue::Dc
        } else {
            self.repre.explicit_value()
        };
        let minterm = self.check_index(index)?;
        if self.value_of(&minterm) == wanted {
            return Ok(false);
        }

        split_off(&mut self.terms, &minterm);
        split_off(&mut self.dont_cares, &minterm);
        if is_dc {
            self.dont_cares.push(minterm);
        } else {
            self.terms.push(minterm);
        }
        self.invalidate();
        Ok(true)
    }

    /// Sets the term at `index` to the implicit value of the representation. Returns whether
    /// the value of the function changed.
    pub fn remove_term(&mut self, index: u64) -> Result<bool, KernelError> {
        let minterm = self.check_index(index)?;
        if self.value_of(&minterm) == self.repre.implicit_value() {
            return Ok(false);
        }

        split_off(&mut self.terms, &minterm);
        split_off(&mut self.dont_cares, &minterm);
        self.invalidate();
        Ok(true)
    }

    #[inline]
    pub fn has_term(&self, term: &Term) -> bool {
        term.size() == self.vars_count && (self.terms.contains(term) || self.dont_cares.contains(term))
    }

    /// Returns the value of the function at `index`.
    pub fn term_value(&self, index: u64) -> Result<OutputValue, KernelError> {
        let minterm = self.check_index(index)?;
        Ok(self.value_of(&minterm))
    }

    fn value_of(&self, minterm: &Term) -> OutputValue {
        if self.dont_cares.iter().any(|t| t.implies(minterm)) {
            OutputValue::Dc
        } else if self.terms.iter().any(|t| t.implies(minterm)) {
            self.repre.explicit_value()
        } else {
            self.repre.implicit_value()
        }
    }

    /// Returns the sorted indexes with the given value.
    pub fn term_indices(&self, value: OutputValue) -> Vec<u32> {
        let terms = if value == OutputValue::Dc {
            expand_all(&self.dont_cares)
        } else if value == self.repre.explicit_value() {
            self.expanded_terms()
        } else {
            self.complement_terms().to_vec()
        };
        terms.iter().filter_map(|t| t.index()).collect()
    }

    /// Explicit terms expanded to terms without missing positions, sorted by index. Indexes that
    /// are also don't cares are left out.
    pub fn expanded_terms(&self) -> Vec<Term> {
        let dont_cares = self.expanded_dont_cares();
        let mut terms = expand_all(&self.terms);
        terms.retain(|t| !dont_cares.contains(t));
        terms
    }

    #[inline]
    pub fn expanded_dont_cares(&self) -> Vec<Term> {
        expand_all(&self.dont_cares)
    }

    /// Returns every explicit index that is neither a term nor a don't care, i.e. the terms of
    /// the opposite representation.
    ///
    /// This enumerates all `2^vars_count` indexes, and is cached until the next mutation.
    pub fn complement_terms(&self) -> &[Term] {
        self.complement.get_or_init(|| {
            log::trace!(
                "computing complement terms over {} indexes",
                self.max_index()
            );
            (0..self.max_index() as u32)
                .map(|index| Term::minterm(index, self.vars_count))
                .filter(|minterm| {
                    !self
                        .terms
                        .iter()
                        .chain(&self.dont_cares)
                        .any(|t| t.implies(minterm))
                })
                .collect()
        })
    }

    /// Switches the active representation. Returns whether it changed.
    ///
    /// The complement becomes the active set of terms, and the previously active terms become
    /// the cached complement.
    pub fn set_repre(&mut self, repre: Repre) -> bool {
        if repre == self.repre {
            return false;
        }
        let complement = match self.complement.take() {
            Some(complement) => complement,
            None => self.complement_terms().to_vec(),
        };
        let previous = self.expanded_terms();
        self.terms = complement;
        self.dont_cares = self.expanded_dont_cares();
        self.complement = OnceCell::from(previous);
        self.repre = repre;
        true
    }

    pub fn clear(&mut self) {
        self.terms.clear();
        self.dont_cares.clear();
        self.invalidate();
    }

    fn check_index(&self, index: u64) -> Result<Term, KernelError> {
        if index >= self.max_index() {
            return Err(KernelError::InvalidIndex {
                index,
                max: self.max_index(),
            });
        }
        Ok(Term::minterm(index as u32, self.vars_count))
    }

    #[inline]
    fn invalidate(&mut self) {
        self.complement = OnceCell::new();
    }
}

/// Equality of the stored term sets, regardless of order.
impl PartialEq for TermsContainer {
    fn eq(&self, other: &Self) -> bool {
        fn same_set(a: &[Term], b: &[Term]) -> bool {
            a.len() == b.len() && a.iter().all(|t| b.contains(t))
        }
        self.vars_count == other.vars_count
            && self.repre == other.repre
            && same_set(&self.terms, &other.terms)
            && same_set(&self.dont_cares, &other.dont_cares)
    }
}

impl Eq for TermsContainer {}

/// Removes `minterm` from every cube of `terms` containing it.
///
/// A cube with k missing positions is replaced by k disjoint cubes: the i-th one agrees with
/// `minterm` on the first i - 1 missing positions and differs from it on the i-th.
fn split_off(terms: &mut Vec<Term>, minterm: &Term) {
    if !terms.iter().any(|t| t.implies(minterm)) {
        return;
    }
    let mut split = Vec::with_capacity(terms.len());
    for term in terms.drain(..) {
        if !term.implies(minterm) {
            split.push(term);
            continue;
        }
        let mut fixed: TermMask = 0;
        for position in 0..term.size() {
            let bit = 1 << position;
            if term.missing() & bit == 0 {
                continue;
            }
            let literals =
                term.literals() | (minterm.literals() & fixed) | (!minterm.literals() & bit);
            let cube = Term::new_unchecked(literals, term.missing() & !(fixed | bit), term.size());
            if !split.contains(&cube) {
                split.push(cube);
            }
            fixed |= bit;
        }
    }
    *terms = split;
}

fn expand_all(terms: &[Term]) -> Vec<Term> {
    let mut expanded: Vec<_> = terms
        .iter()
        .flat_map(|t| t.expand_missing_values())
        .collect();
    expanded.sort_unstable_by_key(|t| t.literals());
    expanded.dedup();
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn indices(terms: &[Term]) -> Vec<u32> {
        terms.iter().filter_map(|t| t.index()).collect()
    }

    #[test]
    fn test_push_and_remove() {
        let mut container = TermsContainer::new(3, Repre::Sop);
        assert!(container.push_term(1, false).unwrap());
        assert!(!container.push_term(1, false).unwrap(), "same value is a no-op");
        assert!(container.push_term(1, true).unwrap(), "one to don't care");
        assert_eq!(container.terms().len(), 0);
        assert_eq!(container.dont_cares().len(), 1);

        assert!(container.remove_term(1).unwrap());
        assert!(!container.remove_term(1).unwrap());
        assert!(container.is_empty());

        assert_eq!(
            container.push_term(8, false).unwrap_err(),
            KernelError::InvalidIndex { index: 8, max: 8 }
        );
    }

    #[test]
    fn test_complement_is_cached_until_mutation() {
        let mut container = TermsContainer::new(3, Repre::Sop);
        for index in [1, 2, 4] {
            container.push_term(index, false).unwrap();
        }
        container.push_term(0, true).unwrap();

        assert_eq!(indices(container.complement_terms()), vec![3, 5, 6, 7]);
        container.push_term(7, false).unwrap();
        assert_eq!(indices(container.complement_terms()), vec![3, 5, 6]);

        assert_eq!(container.term_value(7).unwrap(), OutputValue::One);
        assert_eq!(container.term_value(0).unwrap(), OutputValue::Dc);
        assert_eq!(container.term_value(3).unwrap(), OutputValue::Zero);
        assert_eq!(container.term_indices(OutputValue::Zero), vec![3, 5, 6]);
        assert_eq!(container.term_indices(OutputValue::One), vec![1, 2, 4, 7]);
    }

    #[test]
    fn test_set_repre() {
        let mut container = TermsContainer::new(2, Repre::Sop);
        container.push_term(0, false).unwrap();
        container.push_term(3, true).unwrap();

        assert!(container.set_repre(Repre::Pos));
        assert!(!container.set_repre(Repre::Pos));
        assert_eq!(indices(container.terms()), vec![1, 2]);
        assert_eq!(indices(container.dont_cares()), vec![3]);
        assert_eq!(indices(container.complement_terms()), vec![0]);
        assert_eq!(container.term_value(1).unwrap(), OutputValue::Zero);
        assert_eq!(container.term_value(0).unwrap(), OutputValue::One);

        assert!(container.set_repre(Repre::Sop));
        assert_eq!(indices(container.terms()), vec![0]);
    }

    #[test]
    fn test_push_into_cube() {
        let mut container =
            TermsContainer::from_terms(3, Repre::Sop, vec!["0--".parse().unwrap()]);
        assert!(!container.push_term(1, false).unwrap(), "already covered by 0--");
        assert_eq!(container.terms().len(), 1);

        // Turning a covered index into a don't care splits the cube around it.
        assert!(container.push_term(1, true).unwrap());
        assert_eq!(container.term_value(1).unwrap(), OutputValue::Dc);
        assert_eq!(container.term_indices(OutputValue::One), vec![0, 2, 3]);
        assert_eq!(container.term_indices(OutputValue::Zero), vec![4, 5, 6, 7]);
    }

    #[test]
    fn test_remove_from_cube() {
        let mut container =
            TermsContainer::from_terms(3, Repre::Sop, vec!["0--".parse().unwrap()]);
        assert!(container.remove_term(0).unwrap());
        assert_eq!(container.term_value(0).unwrap(), OutputValue::Zero);
        assert_eq!(container.term_indices(OutputValue::One), vec![1, 2, 3]);
        // 0-- minus 000 is 0-1 plus 010.
        let terms: Vec<String> = container.terms().iter().map(|t| t.to_string()).collect();
        assert_eq!(terms, vec!["0-1", "010"]);

        assert!(!container.remove_term(0).unwrap());
        assert!(!container.remove_term(5).unwrap());
    }

    #[test]
    fn test_remove_from_overlapping_cubes() {
        let mut container = TermsContainer::from_terms(
            3,
            Repre::Sop,
            vec!["0--".parse().unwrap(), "--1".parse().unwrap()],
        );
        container.push_term(6, true).unwrap();
        assert!(container.remove_term(1).unwrap());
        assert_eq!(container.term_indices(OutputValue::One), vec![0, 2, 3, 5, 7]);
        assert_eq!(container.term_indices(OutputValue::Dc), vec![6]);
    }

    #[test]
    fn test_cubes_are_expanded() {
        let container = TermsContainer::from_terms(
            3,
            Repre::Sop,
            vec!["0--".parse().unwrap(), "01-".parse().unwrap()],
        );
        assert_eq!(container.terms().len(), 2);
        assert_eq!(indices(&container.expanded_terms()), vec![0, 1, 2, 3]);
        assert_eq!(indices(container.complement_terms()), vec![4, 5, 6, 7]);
    }
}
