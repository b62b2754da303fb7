// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{details::CheckSummary, value_generator::ValueGenerator};
use boolmin::{proptest_helpers::formula_strategy, Espresso, Formula, Minimizer, QuineMcCluskey};
use color_eyre::{eyre::bail, Result};
use log::debug;

pub struct AllFixtures;

impl AllFixtures {
    /// The largest variable count accepted by [`Self::check_random`].
    pub const MAX_VARS: usize = 10;

    /// Minimizes `count` random formulas of up to `max_vars` variables with both engines and
    /// checks that every cover matches its formula.
    pub fn check_random(count: usize, max_vars: usize, seed: &str) -> Result<CheckSummary> {
        if !(1..=Self::MAX_VARS).contains(&max_vars) {
            bail!(
                "number of variables {} must be in range 1..={}",
                max_vars,
                Self::MAX_VARS
            );
        }

        let mut value_gen = ValueGenerator::from_seed(seed);
        let mut summary = CheckSummary::default();
        for ix in 0..count {
            let mut gen = value_gen.partial_clone();
            let formula = gen.generate(formula_strategy(max_vars));
            debug!("formula {}: {}", ix, formula.index_display());

            let qm = minimize(&mut QuineMcCluskey::new(), &formula);
            check(ix, "quine-mccluskey", &formula, &qm)?;
            let espresso = minimize(&mut Espresso::new(), &formula);
            check(ix, "espresso", &formula, &espresso)?;

            summary.record(qm.size(), espresso.size());
        }

        Ok(summary)
    }
}

fn minimize(engine: &mut dyn Minimizer, formula: &Formula) -> Formula {
    let mut formula = formula.clone();
    engine.minimize(&mut formula, false)
}

fn check(ix: usize, engine: &str, formula: &Formula, cover: &Formula) -> Result<()> {
    if let Err(index) = formula.check_cover(cover) {
        bail!(
            "formula {} ({}): {} cover {} is wrong at index {}",
            ix,
            formula.index_display(),
            engine,
            cover,
            index
        );
    }
    Ok(())
}
