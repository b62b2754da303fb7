// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{formula::Formula, values::State};

/// The cover after one Espresso phase.
#[derive(Clone, Debug)]
pub struct EspressoStep {
    state: State,
    formula: Formula,
}

impl EspressoStep {
    /// The phase that produced this cover.
    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    #[inline]
    pub fn formula(&self) -> &Formula {
        &self.formula
    }
}

/// Trace of an Espresso run: the input formula and a snapshot after every phase.
#[derive(Clone, Debug)]
pub struct EspressoData {
    original: Formula,
    steps: Vec<EspressoStep>,
}

impl EspressoData {
    pub(crate) fn new(original: Formula) -> Self {
        Self {
            original,
            steps: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, state: State, mut formula: Formula) {
        formula.set_state(state);
        self.steps.push(EspressoStep { state, formula });
    }

    #[inline]
    pub fn original(&self) -> &Formula {
        &self.original
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&EspressoStep> {
        self.steps.get(index)
    }

    #[inline]
    pub fn steps(&self) -> &[EspressoStep] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = &EspressoStep> + '_ {
        self.steps.iter()
    }
}
