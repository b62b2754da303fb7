// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{cover::Cover, term::Term};

impl Cover {
    /// Returns the smallest cube containing the complement of this cover, or `None` if the
    /// complement is empty (the cover is a tautology).
    pub fn smallest_cube_containing_complement(&self) -> Option<Term> {
        if self.is_empty() {
            return Some(Term::universe(self.size()));
        }
        if self.iter().any(|cube| cube.is_universe()) {
            return None;
        }

        match self.binate_select() {
            None => Some(self.unate_complement_supercube()),
            Some(position) => {
                let branches = [false, true].map(|value| {
                    let half = Term::literal(position, value, self.size());
                    self.cofactor(&half)
                        .smallest_cube_containing_complement()
                        .and_then(|cube| cube & half)
                });
                match branches {
                    [Some(zero), Some(one)] => Some(zero.supercube(&one)),
                    [Some(cube), None] | [None, Some(cube)] => Some(cube),
                    [None, None] => None,
                }
            }
        }
    }

    // The complement of a unate cover without the universe cube is never empty. A position is
    // fixed in it only when the cover has a cube with that single literal.
    fn unate_complement_supercube(&self) -> Term {
        self.iter()
            .filter(|cube| cube.literal_count() == 1)
            .fold(Term::universe(self.size()), |acc, cube| {
                let negated = !cube;
                (acc & negated).unwrap_or(acc)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::{collection::vec, prelude::*};

    fn cover(size: usize, cubes: &[&str]) -> Cover {
        Cover::from_terms(size, cubes.iter().map(|c| c.parse::<Term>().unwrap()))
    }

    fn term(s: &str) -> Term {
        s.parse().unwrap()
    }

    #[test]
    fn test_sccc_special_cases() {
        assert_eq!(
            Cover::new(3).smallest_cube_containing_complement(),
            Some(Term::universe(3))
        );
        assert_eq!(cover(3, &["---"]).smallest_cube_containing_complement(), None);
        assert_eq!(
            cover(3, &["-0-", "-1-"]).smallest_cube_containing_complement(),
            None
        );
    }

    #[test]
    fn test_sccc_unate() {
        // Complement of a + b is a'b'.
        assert_eq!(
            cover(3, &["--1", "-1-"]).smallest_cube_containing_complement(),
            Some(term("-00"))
        );
        // Complement of ab is a' + b', contained only by the universe.
        assert_eq!(
            cover(3, &["-11"]).smallest_cube_containing_complement(),
            Some(Term::universe(3))
        );
    }

    #[test]
    fn test_sccc_binate() {
        // Complement of c'a + ca' + b is c'b'a' + cb'a, contained by -0-.
        assert_eq!(
            cover(3, &["0-1", "1-0", "-1-"]).smallest_cube_containing_complement(),
            Some(term("-0-"))
        );
    }

    proptest! {
        #[test]
        fn proptest_sccc_contains_complement(cubes in vec(any_with::<Term>(4), 0..6)) {
            let cover = Cover::from_terms(4, cubes);
            let complement: Vec<_> = (0..16)
                .map(|index| Term::minterm(index, 4))
                .filter(|minterm| !cover.covers(minterm))
                .collect();
            match cover.smallest_cube_containing_complement() {
                None => prop_assert!(complement.is_empty()),
                Some(cube) => {
                    prop_assert!(complement.iter().all(|minterm| cube.implies(minterm)));
                    let supercube = complement
                        .iter()
                        .copied()
                        .reduce(|acc, minterm| acc.supercube(&minterm));
                    prop_assert_eq!(Some(cube), supercube, "cube is the smallest");
                }
            }
        }
    }
}
