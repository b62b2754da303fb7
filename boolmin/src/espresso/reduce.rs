// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::EspressoCover;
use crate::cover::Cover;

/// Shrinks every cube of `f` to the smallest cube that keeps the cover (with the don't cares
/// `d`) unchanged. Cubes that shrink to nothing are removed.
///
/// Cubes are processed largest first, each against the already reduced ones.
pub(super) fn reduce(f: &mut EspressoCover, d: &Cover) {
    f.clear_scratch();
    f.sort_by_decreasing_missing();
    f.append_dc(d);

    for ix in 0..f.len() {
        let flags = f.flags(ix);
        if flags.dc || flags.redundant {
            continue;
        }

        let cube = f.cube(ix);
        let rest = f.cover_where(|other, flags| other != ix && !flags.redundant);
        let reduced = rest
            .cofactor(&cube)
            .smallest_cube_containing_complement()
            .and_then(|sccc| cube & sccc);
        match reduced {
            Some(reduced) if reduced == cube => {}
            Some(reduced) => {
                f.set_cube(ix, reduced);
                f.flags_mut(ix).prime = false;
            }
            None => f.flags_mut(ix).redundant = true,
        }
    }
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
    fn test_reduce_overlap() {
        // 0-- and -0- overlap on 00-. 0-- comes first and gives up the overlap; -0- is then the
        // only cube covering 00- and stays whole.
        let mut f = EspressoCover::new(3, vec![term("0--"), term("-0-")]);
        reduce(&mut f, &Cover::new(3));
        assert_eq!(f.terms(), vec![term("01-"), term("-0-")]);
        assert!(!f.flags(0).prime);
    }

    #[test]
    fn test_reduce_covered_by_dont_cares() {
        let mut f = EspressoCover::new(2, vec![term("1-"), term("00")]);
        reduce(&mut f, &Cover::from_terms(2, vec![term("10"), term("11")]));
        assert_eq!(f.terms(), vec![term("00")]);
    }

    #[test]
    fn test_reduce_with_dont_cares() {
        // 01 is a don't care, so -1 only needs to cover 11.
        let mut f = EspressoCover::new(2, vec![term("-1")]);
        reduce(&mut f, &Cover::from_terms(2, vec![term("01")]));
        assert_eq!(f.terms(), vec![term("11")]);
    }
}
