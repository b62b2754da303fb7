// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::term::Term;
use arrayvec::ArrayVec;
use itertools::{Itertools, Position};
use once_cell::sync::OnceCell;
use std::{
    cmp::Ordering,
    fmt,
    ops::Deref,
};

/// An unordered collection of terms with the same size. A cover evaluates to the union of its
/// terms.
///
/// Covers are immutable once built, so the column counts are computed at most once.
#[derive(Clone, Default)]
pub struct Cover {
    size: usize,
    cubes: Vec<Term>,
    columns: OnceCell<ColumnCounts>,
}

impl Cover {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cubes: Vec::new(),
            columns: OnceCell::new(),
        }
    }

    pub fn from_terms(size: usize, cubes: impl IntoIterator<Item = Term>) -> Self {
        let cubes: Vec<_> = cubes.into_iter().collect();
        debug_assert!(cubes.iter().all(|c| c.size() == size));
        Self {
            size,
            cubes,
            columns: OnceCell::new(),
        }
    }

    /// Number of positions in every cube.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn cubes(&self) -> &[Term] {
        &self.cubes
    }

    /// Restricts every cube to `p`, dropping cubes that don't intersect it.
    pub fn cofactor(&self, p: &Term) -> Self {
        Self::from_terms(self.size, self.cubes.iter().filter_map(|c| c.cofactor(p)))
    }

    /// Whether the minterm `term` is covered by any cube.
    #[inline]
    pub fn covers(&self, term: &Term) -> bool {
        self.cubes.iter().any(|c| c.implies(term))
    }

    /// Whether every position is unate: no position has both a 0 and a 1 across the cubes.
    #[inline]
    pub fn is_unate(&self) -> bool {
        self.column_counts().binate().next().is_none()
    }

    /// Selects the most binate position: the one with the most cubes on its smaller side,
    /// preferring a larger bigger side and then a lower position.
    ///
    /// Returns `None` if the cover is unate.
    pub fn binate_select(&self) -> Option<usize> {
        let counts = self.column_counts();
        let mut selected: Option<(usize, (u32, u32))> = None;
        for position in counts.binate() {
            let (ones, zeros) = (counts.ones[position], counts.zeros[position]);
            let key = (ones.min(zeros), ones.max(zeros));
            match selected {
                Some((_, best)) if best >= key => {}
                _ => selected = Some((position, key)),
            }
        }
        selected.map(|(position, _)| position)
    }

    /// The lowest position which isn't missing in every cube.
    pub fn first_meaningful_position(&self) -> Option<usize> {
        let counts = self.column_counts();
        (0..self.size).find(|&position| counts.ones[position] + counts.zeros[position] != 0)
    }

    #[inline]
    pub fn column_counts(&self) -> &ColumnCounts {
        self.columns.get_or_init(|| ColumnCounts::new(self.size, &self.cubes))
    }

    /// Returns a display adapter listing the cubes as bit strings.
    #[inline]
    pub fn matrix_display(&self) -> CoverMatrixDisplay<'_> {
        CoverMatrixDisplay::new(self)
    }
}

impl Deref for Cover {
    type Target = [Term];

    fn deref(&self) -> &Self::Target {
        &self.cubes
    }
}

impl PartialEq for Cover {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.cubes == other.cubes
    }
}

impl Eq for Cover {}

impl fmt::Debug for Cover {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Cover")
            .field(&format_args!("{}", self.matrix_display().with_separator(", ")))
            .finish()
    }
}

/// Per-position counts of cubes with a 1 and with a 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnCounts {
    pub ones: ArrayVec<u32, { Term::MAX_SIZE }>,
    pub zeros: ArrayVec<u32, { Term::MAX_SIZE }>,
}

impl ColumnCounts {
    fn new(size: usize, cubes: &[Term]) -> Self {
        let mut ones: ArrayVec<u32, { Term::MAX_SIZE }> = (0..size).map(|_| 0).collect();
        let mut zeros = ones.clone();
        for cube in cubes {
            let care = cube.care();
            for position in 0..size {
                let bit = 1 << position;
                if care & bit == 0 {
                    continue;
                }
                if cube.literals() & bit != 0 {
                    ones[position] += 1;
                } else {
                    zeros[position] += 1;
                }
            }
        }
        Self { ones, zeros }
    }

    /// Positions with both 0s and 1s.
    pub fn binate(&self) -> impl Iterator<Item = usize> + '_ {
        self.ones
            .iter()
            .zip(&self.zeros)
            .enumerate()
            .filter_map(|(position, (&ones, &zeros))| (ones != 0 && zeros != 0).then(|| position))
    }
}

/// Cost of a cover used to decide whether an Espresso phase improved it.
///
/// Fewer cubes is cheaper; with the same number of cubes, more missing positions (larger cubes)
/// is cheaper. `Ord` sorts cheaper costs first.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cost {
    pub cubes: usize,
    pub missing: usize,
}

impl Cost {
    pub fn of<'a>(cubes: impl IntoIterator<Item = &'a Term>) -> Self {
        let mut cost = Self {
            cubes: 0,
            missing: 0,
        };
        for cube in cubes {
            cost.cubes += 1;
            cost.missing += cube.missing().count_ones() as usize;
        }
        cost
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cubes
            .cmp(&other.cubes)
            .then_with(|| other.missing.cmp(&self.missing))
    }
}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} cubes, {} missing", self.cubes, self.missing)
    }
}

#[derive(Clone, Debug)]
pub struct CoverMatrixDisplay<'a> {
    cover: &'a Cover,
    separator: &'a str,
}

impl<'a> CoverMatrixDisplay<'a> {
    pub fn new(cover: &'a Cover) -> Self {
        Self {
            cover,
            separator: "\n",
        }
    }

    pub fn with_separator(mut self, separator: &'a str) -> Self {
        self.separator = separator;
        self
    }
}

impl<'a> fmt::Display for CoverMatrixDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for cube in self.cover.cubes().iter().with_position() {
            match cube {
                Position::First(cube) | Position::Middle(cube) => {
                    write!(f, "{}{}", cube, self.separator)?
                }
                Position::Last(cube) | Position::Only(cube) => write!(f, "{}", cube)?,
            }
        }
        Ok(())
    }
}
