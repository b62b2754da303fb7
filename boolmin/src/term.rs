// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Product terms (cubes) over up to [`Term::MAX_SIZE`] Boolean variables.

use crate::{
    errors::KernelError,
    values::{LiteralValue, Repre},
};
use arrayvec::ArrayVec;
use std::{
    cmp::Ordering,
    fmt,
    iter::FusedIterator,
    ops::{BitAnd, Not},
    str::FromStr,
};

/// Bit mask with one bit per term position. Position 0 is the least significant bit.
pub type TermMask = u32;

/// A product term.
///
/// Every position is `0`, `1` or missing (don't care). A term without missing positions is a
/// minterm (or a maxterm in the product of sums representation) and has an index.
///
/// Position 0 is the least significant position of the index.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Term {
    // Invariant: literals & missing == 0, and neither has bits at or above `size`.
    literals: TermMask,
    missing: TermMask,
    size: u8,
}

impl Term {
    /// The maximum number of positions in a term.
    pub const MAX_SIZE: usize = TermMask::BITS as usize - 1;

    /// Creates the term with the given index and no missing positions.
    pub fn from_index(index: u64, size: usize) -> Result<Self, KernelError> {
        check_size(size)?;
        let max = 1_u64 << size;
        if index >= max {
            return Err(KernelError::InvalidIndex { index, max });
        }
        Ok(Self::minterm(index as TermMask, size))
    }

    /// Creates a term from its literal and missing masks.
    pub fn from_masks(
        literals: TermMask,
        missing: TermMask,
        size: usize,
    ) -> Result<Self, KernelError> {
        check_size(size)?;
        let full = full_mask(size);
        if (literals | missing) & !full != 0 {
            let position = (TermMask::BITS - (literals | missing).leading_zeros() - 1) as usize;
            return Err(KernelError::InvalidPosition { position, size });
        }
        Ok(Self::new_unchecked(literals, missing, size))
    }

    /// The all-missing term, covering every index.
    pub fn universe(size: usize) -> Self {
        debug_assert!(size <= Self::MAX_SIZE);
        Self {
            literals: 0,
            missing: full_mask(size),
            size: size as u8,
        }
    }

    /// The half space where `position` has the given value and every other position is missing.
    #[inline]
    pub(crate) fn literal(position: usize, value: bool, size: usize) -> Self {
        let bit = 1 << position;
        Self::new_unchecked(
            if value { bit } else { 0 },
            full_mask(size) & !bit,
            size,
        )
    }

    #[inline]
    pub(crate) fn minterm(index: TermMask, size: usize) -> Self {
        Self::new_unchecked(index, 0, size)
    }

    #[inline]
    pub(crate) fn new_unchecked(literals: TermMask, missing: TermMask, size: usize) -> Self {
        debug_assert!(size <= Self::MAX_SIZE);
        let full = full_mask(size);
        let missing = missing & full;
        Self {
            literals: literals & !missing & full,
            missing,
            size: size as u8,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size as usize
    }

    #[inline]
    pub fn literals(&self) -> TermMask {
        self.literals
    }

    #[inline]
    pub fn missing(&self) -> TermMask {
        self.missing
    }

    /// Mask of the positions that are not missing.
    #[inline]
    pub fn care(&self) -> TermMask {
        !self.missing & full_mask(self.size())
    }

    /// Returns the index of this term, or `None` if any position is missing.
    #[inline]
    pub fn index(&self) -> Option<u32> {
        (self.missing == 0).then(|| self.literals)
    }

    #[inline]
    pub fn is_universe(&self) -> bool {
        self.missing == full_mask(self.size())
    }

    /// Number of positions that are not missing.
    #[inline]
    pub fn literal_count(&self) -> usize {
        self.care().count_ones() as usize
    }

    /// Returns the number of positions with the given value.
    pub fn count(&self, value: LiteralValue) -> usize {
        let mask = match value {
            LiteralValue::One => self.literals,
            LiteralValue::Zero => !self.literals & self.care(),
            LiteralValue::Missing => self.missing,
        };
        mask.count_ones() as usize
    }

    /// Returns the value at `position`, which must be less than the size.
    #[inline]
    pub fn value_at(&self, position: usize) -> LiteralValue {
        debug_assert!(position < self.size());
        let bit = 1 << position;
        if self.missing & bit != 0 {
            LiteralValue::Missing
        } else if self.literals & bit != 0 {
            LiteralValue::One
        } else {
            LiteralValue::Zero
        }
    }

    /// Returns the value at `position`, checking that it is inside the term.
    pub fn at(&self, position: usize) -> Result<LiteralValue, KernelError> {
        if position >= self.size() {
            return Err(KernelError::InvalidPosition {
                position,
                size: self.size(),
            });
        }
        Ok(self.value_at(position))
    }

    /// Combines two terms that differ in exactly one explicit position, e.g. `0010` and `0000`
    /// into `00-0`.
    ///
    /// Both terms must have the same size and the same missing positions.
    pub fn combine(&self, other: &Term) -> Option<Term> {
        if self.size != other.size || self.missing != other.missing {
            return None;
        }
        let diff = (self.literals ^ other.literals) & !self.missing;
        if diff.count_ones() != 1 {
            return None;
        }
        Some(Self {
            literals: self.literals & !diff,
            missing: self.missing | diff,
            size: self.size,
        })
    }

    /// Returns true if every position that is not missing in `self` has the same value in
    /// `other`.
    ///
    /// For an `other` without missing positions this is cube membership.
    #[inline]
    pub fn implies(&self, other: &Term) -> bool {
        (self.literals ^ other.literals) & !self.missing == 0
    }

    /// Returns true if every index covered by `other` is covered by `self`.
    #[inline]
    pub fn contains(&self, other: &Term) -> bool {
        other.missing & !self.missing == 0 && self.implies(other)
    }

    /// Lazily expands this term into all the fully explicit terms it covers.
    ///
    /// The first missing position is replaced by 0 and then by 1, recursively.
    #[inline]
    pub fn expand_missing_values(&self) -> MissingExpansion {
        MissingExpansion::new(*self)
    }

    /// Restricts `self` by the cube `p`: positions explicit in `p` become missing.
    ///
    /// Returns `None` if `self` and `p` don't intersect.
    pub fn cofactor(&self, p: &Term) -> Option<Term> {
        debug_assert_eq!(self.size, p.size);
        let p_care = p.care();
        if (self.literals ^ p.literals) & self.care() & p_care != 0 {
            return None;
        }
        Some(Self::new_unchecked(
            self.literals,
            self.missing | p_care,
            self.size(),
        ))
    }

    /// Makes every position outside `mask` missing.
    pub fn lower(&mut self, mask: TermMask) {
        self.missing |= !mask & full_mask(self.size());
        self.literals &= !self.missing;
    }

    /// Returns the smallest term containing both `self` and `other`.
    pub fn supercube(&self, other: &Term) -> Term {
        debug_assert_eq!(self.size, other.size);
        let missing = self.missing | other.missing | (self.literals ^ other.literals);
        Self::new_unchecked(self.literals, missing, self.size())
    }

    /// Returns a display adapter which shows this term as a product (or a sum, for the product
    /// of sums representation) of named variables.
    ///
    /// `vars[0]` names the most significant position.
    #[inline]
    pub fn algebraic_display<'a>(&'a self, vars: &'a [char]) -> TermAlgebraicDisplay<'a> {
        TermAlgebraicDisplay::new(self, vars)
    }

    fn intersect_impl(&self, other: &Term) -> Option<Term> {
        debug_assert_eq!(self.size, other.size);
        if (self.literals ^ other.literals) & self.care() & other.care() != 0 {
            return None;
        }
        Some(Self::new_unchecked(
            self.literals | other.literals,
            self.missing & other.missing,
            self.size(),
        ))
    }

    fn complement_impl(&self) -> Term {
        Self {
            literals: !self.literals & self.care(),
            missing: self.missing,
            size: self.size,
        }
    }

    fn sorted_expansion(&self) -> Vec<u32> {
        let mut indexes: Vec<_> = self
            .expand_missing_values()
            .map(|term| term.literals)
            .collect();
        indexes.sort_unstable();
        indexes
    }
}

#[inline]
pub(crate) fn full_mask(size: usize) -> TermMask {
    debug_assert!(size <= Term::MAX_SIZE);
    (1 << size) - 1
}

pub(crate) fn check_size(size: usize) -> Result<(), KernelError> {
    if size > Term::MAX_SIZE {
        return Err(KernelError::invalid_variables(format!(
            "{} variables requested, at most {} are supported",
            size,
            Term::MAX_SIZE
        )));
    }
    Ok(())
}

/// Intersection. `None` means the terms don't intersect.
impl BitAnd for Term {
    type Output = Option<Term>;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersect_impl(&rhs)
    }
}

impl<'a, 'b> BitAnd<&'a Term> for &'b Term {
    type Output = Option<Term>;

    fn bitand(self, rhs: &'a Term) -> Self::Output {
        self.intersect_impl(rhs)
    }
}

/// Complement of every explicit position.
impl Not for Term {
    type Output = Term;

    fn not(self) -> Self::Output {
        self.complement_impl()
    }
}

impl<'a> Not for &'a Term {
    type Output = Term;

    fn not(self) -> Self::Output {
        self.complement_impl()
    }
}

/// Orders explicit terms by index. Terms with missing positions are ordered by their sorted
/// expansions, so debug tables come out in a reproducible order.
impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        let ordering = match (self.index(), other.index()) {
            (Some(a), Some(b)) => a.cmp(&b),
            _ => self.sorted_expansion().cmp(&other.sorted_expansion()),
        };
        ordering.then_with(|| self.size.cmp(&other.size))
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Bit string, most significant position first: `1-0`.
impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for position in (0..self.size()).rev() {
            write!(f, "{}", self.value_at(position))?;
        }
        Ok(())
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Term")
            .field(&format_args!("{}", self))
            .finish()
    }
}

/// Parses a bit string such as `1-0`; `-`, `x` and `X` mark missing positions.
impl FromStr for Term {
    type Err = KernelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let size = s.chars().count();
        if size == 0 || size > Term::MAX_SIZE {
            return Err(KernelError::InvalidTermSize {
                actual: size,
                required: size.clamp(1, Term::MAX_SIZE),
            });
        }

        let mut literals = 0;
        let mut missing = 0;
        for (offset, ch) in s.chars().enumerate() {
            let bit = 1 << (size - 1 - offset);
            match ch {
                '0' => {}
                '1' => literals |= bit,
                '-' | 'x' | 'X' => missing |= bit,
                _ => {
                    return Err(KernelError::InvalidPosition {
                        position: size - 1 - offset,
                        size,
                    })
                }
            }
        }
        Ok(Self::new_unchecked(literals, missing, size))
    }
}

/// Iterator over the explicit terms covered by a term. See [`Term::expand_missing_values`].
#[derive(Clone, Debug)]
pub struct MissingExpansion {
    term: Term,
    // Missing positions in increasing order.
    positions: ArrayVec<u8, { Term::MAX_SIZE }>,
    next: u64,
    end: u64,
}

impl MissingExpansion {
    fn new(term: Term) -> Self {
        let positions: ArrayVec<u8, { Term::MAX_SIZE }> = (0..term.size)
            .filter(|&position| term.missing & (1 << position) != 0)
            .collect();
        let end = 1_u64 << positions.len();
        Self {
            term,
            positions,
            next: 0,
            end,
        }
    }
}

impl Iterator for MissingExpansion {
    type Item = Term;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next == self.end {
            return None;
        }
        // The first missing position changes slowest: it is the top bit of the counter.
        let count = self.positions.len();
        let mut literals = self.term.literals;
        for (ix, &position) in self.positions.iter().enumerate() {
            if (self.next >> (count - 1 - ix)) & 1 == 1 {
                literals |= 1 << position;
            }
        }
        self.next += 1;
        Some(Term::minterm(literals, self.term.size()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for MissingExpansion {}

impl FusedIterator for MissingExpansion {}

pub struct TermAlgebraicDisplay<'a> {
    term: &'a Term,
    vars: &'a [char],
    repre: Repre,
}

impl<'a> TermAlgebraicDisplay<'a> {
    pub fn new(term: &'a Term, vars: &'a [char]) -> Self {
        debug_assert_eq!(term.size(), vars.len());
        Self {
            term,
            vars,
            repre: Repre::Sop,
        }
    }

    pub fn with_repre(mut self, repre: Repre) -> Self {
        self.repre = repre;
        self
    }
}

impl<'a> fmt::Display for TermAlgebraicDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let size = self.term.size();
        let literals = self
            .vars
            .iter()
            .enumerate()
            .filter_map(|(var_ix, &var)| match self.term.value_at(size - 1 - var_ix) {
                LiteralValue::Missing => None,
                value => Some((var, value)),
            });

        match self.repre {
            Repre::Sop => {
                if self.term.is_universe() {
                    return write!(f, "1");
                }
                for (var, value) in literals {
                    match value {
                        LiteralValue::Zero => write!(f, "{}'", var)?,
                        _ => write!(f, "{}", var)?,
                    }
                }
                Ok(())
            }
            Repre::Pos => {
                if self.term.is_universe() {
                    return write!(f, "0");
                }
                write!(f, "(")?;
                for (ix, (var, value)) in literals.enumerate() {
                    if ix != 0 {
                        write!(f, " + ")?;
                    }
                    // A maxterm is false when every variable takes its value in the term.
                    match value {
                        LiteralValue::One => write!(f, "{}'", var)?,
                        _ => write!(f, "{}", var)?,
                    }
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn term(s: &str) -> Term {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let t = term("1-0");
        assert_eq!(t.size(), 3);
        assert_eq!(t.value_at(0), LiteralValue::Zero);
        assert_eq!(t.value_at(1), LiteralValue::Missing);
        assert_eq!(t.value_at(2), LiteralValue::One);
        assert_eq!(t.to_string(), "1-0");
        assert_eq!(term("x1X").to_string(), "-1-");

        assert_eq!(
            "10a".parse::<Term>().unwrap_err(),
            KernelError::InvalidPosition {
                position: 0,
                size: 3
            }
        );
        assert_eq!(
            "".parse::<Term>().unwrap_err().kind(),
            ErrorKind::InvalidTermSize
        );
    }

    #[test]
    fn test_from_index() {
        let t = Term::from_index(6, 3).unwrap();
        assert_eq!(t.to_string(), "110");
        assert_eq!(t.index(), Some(6));
        assert_eq!(
            Term::from_index(8, 3).unwrap_err(),
            KernelError::InvalidIndex { index: 8, max: 8 }
        );
        assert_eq!(
            Term::from_index(0, 40).unwrap_err().kind(),
            ErrorKind::InvalidVariables
        );
        assert_eq!(
            Term::from_masks(0b1000, 0, 3).unwrap_err().kind(),
            ErrorKind::InvalidPosition
        );
        assert_eq!(
            t.at(3).unwrap_err(),
            KernelError::InvalidPosition {
                position: 3,
                size: 3
            }
        );
    }

    #[test]
    fn test_combine() {
        assert_eq!(term("0010").combine(&term("0000")), Some(term("00-0")));
        assert_eq!(term("0-10").combine(&term("0-00")), Some(term("0--0")));
        // Two differences.
        assert_eq!(term("0011").combine(&term("0000")), None);
        // No difference.
        assert_eq!(term("0011").combine(&term("0011")), None);
        // Different missing masks.
        assert_eq!(term("0-11").combine(&term("00-1")), None);
    }

    #[test]
    fn test_implies_and_contains() {
        let cube = term("1-0");
        assert!(cube.implies(&term("100")));
        assert!(cube.implies(&term("110")));
        assert!(!cube.implies(&term("101")));

        assert!(cube.contains(&term("1-0")));
        assert!(term("--0").contains(&cube));
        assert!(!cube.contains(&term("--0")));
        assert!(Term::universe(3).contains(&cube));
    }

    #[test]
    fn test_expand_missing_values_order() {
        let expanded: Vec<_> = term("-1-").expand_missing_values().collect();
        // The first missing position (position 0) is replaced by 0 and then by 1.
        assert_eq!(
            expanded,
            vec![term("010"), term("110"), term("011"), term("111")]
        );
        assert_eq!(term("101").expand_missing_values().len(), 1);
        assert_eq!(Term::universe(4).expand_missing_values().count(), 16);
    }

    #[test]
    fn test_cofactor_and_intersection() {
        // Cofactors on page 30 of the Espresso book, single output.
        assert_eq!(term("110-").cofactor(&term("11--")), Some(term("--0-")));
        assert_eq!(term("010-").cofactor(&term("11--")), None);
        assert_eq!(term("1111").cofactor(&term("---1")), Some(term("111-")));

        assert_eq!(term("1--") & term("-0-"), Some(term("10-")));
        assert_eq!(term("1--") & term("0--"), None);
        assert_eq!(!term("10-"), term("01-"));
    }

    #[test]
    fn test_lower_and_supercube() {
        let mut t = term("101");
        t.lower(0b100);
        assert_eq!(t, term("1--"));

        assert_eq!(term("100").supercube(&term("110")), term("1-0"));
        assert_eq!(term("100").supercube(&term("011")), Term::universe(3));
    }

    #[test]
    fn test_ordering() {
        let mut terms = vec![term("1-1"), term("011"), term("0-0"), term("000")];
        terms.sort();
        assert_eq!(
            terms,
            vec![term("000"), term("0-0"), term("011"), term("1-1")]
        );
        // Same first index, shorter expansion first.
        assert!(term("000") < term("00-"));
    }

    #[test]
    fn test_algebraic_display() {
        let vars = ['c', 'b', 'a'];
        assert_eq!(term("0-1").algebraic_display(&vars).to_string(), "c'a");
        assert_eq!(Term::universe(3).algebraic_display(&vars).to_string(), "1");
        assert_eq!(
            term("0-1")
                .algebraic_display(&vars)
                .with_repre(Repre::Pos)
                .to_string(),
            "(c + a')"
        );
    }

    proptest! {
        #[test]
        fn proptest_index_round_trip(size in 1_usize..=12, seed: u32) {
            let index = seed as u64 % (1 << size);
            let t = Term::from_index(index, size).unwrap();
            prop_assert_eq!(t.index(), Some(index as u32));
        }

        #[test]
        fn proptest_combine_soundness(a in any_with::<Term>(5), b in any_with::<Term>(5)) {
            // Force equal missing masks so that combination is possible.
            let b = Term::new_unchecked(b.literals(), a.missing(), 5);
            let diff = (a.literals() ^ b.literals()) & a.care();
            match a.combine(&b) {
                Some(combined) => {
                    prop_assert_eq!(diff.count_ones(), 1);
                    let expected: BTreeSet<_> = a
                        .expand_missing_values()
                        .chain(b.expand_missing_values())
                        .collect();
                    let actual: BTreeSet<_> = combined.expand_missing_values().collect();
                    prop_assert_eq!(actual, expected);
                }
                None => prop_assert_ne!(diff.count_ones(), 1),
            }
        }

        #[test]
        fn proptest_cofactor_matches_intersection(a in any_with::<Term>(4), p in any_with::<Term>(4)) {
            prop_assert_eq!(a.cofactor(&p).is_some(), (a & p).is_some());
        }
    }
}
