// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    formula::Formula,
    term::{full_mask, Term},
    values::{OutputValue, Repre},
};
use proptest::{collection::vec, prelude::*};

/// Terms of the given size, with any mix of 0, 1 and missing positions.
impl Arbitrary for Term {
    type Parameters = usize;
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(size: Self::Parameters) -> Self::Strategy {
        assert!(
            size <= Term::MAX_SIZE,
            "size {} must be at most {}",
            size,
            Term::MAX_SIZE
        );
        let full = full_mask(size);
        (any::<u32>(), any::<u32>())
            .prop_map(move |(literals, missing)| {
                let missing = missing & full;
                Term::new_unchecked(literals & !missing, missing, size)
            })
            .boxed()
    }
}

impl Arbitrary for OutputValue {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![
            3 => Just(OutputValue::Zero),
            3 => Just(OutputValue::One),
            1 => Just(OutputValue::Dc),
        ]
        .boxed()
    }
}

impl Arbitrary for Repre {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop_oneof![Just(Repre::Sop), Just(Repre::Pos)].boxed()
    }
}

/// Generates formulas with 1 to `max_vars` variables and an arbitrary value at every index.
pub fn formula_strategy(max_vars: usize) -> impl Strategy<Value = Formula> {
    assert!(
        (1..=10).contains(&max_vars),
        "max vars {} must be in range 1..=10",
        max_vars
    );
    (1..=max_vars)
        .prop_flat_map(|vars_count| {
            (
                Just(vars_count),
                any::<Repre>(),
                vec(any::<OutputValue>(), 1 << vars_count),
            )
        })
        .prop_map(|(vars_count, repre, values)| formula_from_values(vars_count, repre, &values))
}

/// Builds a formula from its value at every index.
pub fn formula_from_values(vars_count: usize, repre: Repre, values: &[OutputValue]) -> Formula {
    let explicit = repre.explicit_value();
    let indexes = |wanted: OutputValue| {
        values
            .iter()
            .enumerate()
            .filter_map(move |(index, &value)| (value == wanted).then(|| index as u64))
    };
    Formula::from_indices(
        vars_count,
        repre,
        indexes(explicit),
        indexes(OutputValue::Dc),
    )
    .expect("indexes are within range")
}
