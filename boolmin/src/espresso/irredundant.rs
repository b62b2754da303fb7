// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::EspressoCover;
use crate::cover::Cover;
use log::trace;

/// Removes cubes of `f` that are covered by the remaining cubes and the don't cares `d`.
pub(super) fn irredundant(f: &mut EspressoCover, d: &Cover) {
    f.clear_scratch();
    f.append_dc(d);
    let len = f.len();

    // A cube is relatively essential if the rest of the cover doesn't cover it.
    for ix in 0..len {
        if f.flags(ix).dc {
            continue;
        }
        let rest = f.cover_where(|other, _| other != ix);
        if !rest.cofactor(&f.cube(ix)).is_tautology() {
            f.flags_mut(ix).relatively_essential = true;
        }
    }

    // Totally redundant cubes are covered by the relatively essential cubes and don't cares.
    let essential = f.cover_where(|_, flags| flags.dc || flags.relatively_essential);
    let mut partially_redundant = Vec::new();
    for ix in 0..len {
        let flags = f.flags(ix);
        if flags.dc || flags.relatively_essential {
            continue;
        }
        if essential.cofactor(&f.cube(ix)).is_tautology() {
            f.flags_mut(ix).redundant = true;
        } else {
            partially_redundant.push(ix);
        }
    }

    // Partially redundant cubes are dropped one at a time, as long as the cubes left over still
    // cover them.
    for ix in partially_redundant {
        let rest = f.cover_where(|other, flags| other != ix && !flags.redundant);
        if rest.cofactor(&f.cube(ix)).is_tautology() {
            f.flags_mut(ix).redundant = true;
        } else {
            f.flags_mut(ix).relatively_essential = true;
        }
    }

    trace!(
        "irredundant: removing {} of {} cubes",
        (0..len).filter(|&ix| f.flags(ix).redundant).count(),
        (0..len).filter(|&ix| !f.flags(ix).dc).count()
    );
    f.retain(|_, flags| !flags.redundant && !flags.dc);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::Term;

    fn term(s: &str) -> Term {
        s.parse().unwrap()
    }

    #[test]
    fn test_totally_redundant() {
        // 0-1 is covered by 0-- alone.
        let mut f = EspressoCover::new(3, vec![term("0--"), term("0-1"), term("1-1")]);
        irredundant(&mut f, &Cover::new(3));
        assert_eq!(f.terms(), vec![term("0--"), term("1-1")]);
    }

    #[test]
    fn test_consensus_term() {
        // The consensus term -11 is covered by 01- and 1-1 together.
        let mut f = EspressoCover::new(3, vec![term("01-"), term("-11"), term("1-1")]);
        irredundant(&mut f, &Cover::new(3));
        assert_eq!(f.terms(), vec![term("01-"), term("1-1")]);
    }

    #[test]
    fn test_cyclic_cover() {
        // Every prime of m(0,1,2,5,6,7) is covered by its two neighbours, so none is relatively
        // essential and they are dropped one at a time.
        let primes = ["00-", "0-0", "-01", "-10", "1-1", "11-"];
        let mut f = EspressoCover::new(3, primes.iter().map(|p| term(p)).collect());
        irredundant(&mut f, &Cover::new(3));
        assert_eq!(f.terms(), vec![term("0-0"), term("-01"), term("11-")]);
    }

    #[test]
    fn test_dont_cares_cover() {
        // 10 and 11 are don't cares, so 1- is covered without being kept.
        let mut f = EspressoCover::new(2, vec![term("-1"), term("1-")]);
        let d = Cover::from_terms(2, vec![term("11"), term("10")]);
        irredundant(&mut f, &d);
        assert_eq!(f.terms(), vec![term("-1")]);
    }
}
