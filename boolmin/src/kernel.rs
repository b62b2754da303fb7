// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A minimization session: the current formula, its minimized form and the engines.

use crate::{
    algorithm::{Algorithm, Minimizer},
    errors::KernelError,
    espresso::{Espresso, EspressoData},
    formula::Formula,
    qm::{QuineMcCluskey, QuineMcCluskeyData},
    values::{OutputValue, Repre},
};
use log::debug;
use std::fmt;

/// Observer of a [`Kernel`]. Every method does nothing by default.
pub trait Events {
    /// The current formula was replaced or changed.
    fn formula_changed(&mut self, _formula: &Formula) {}

    /// [`Kernel::minimize_formula`] was called.
    fn formula_minimized(&mut self, _minimized: Option<&Formula>, _event: MinimizeEvent) {}

    /// A forwarded mutation failed.
    fn error(&mut self, _error: &KernelError) {}
}

/// What happened in a call to [`Kernel::minimize_formula`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MinimizeEvent {
    /// There was a formula to minimize.
    pub has_formula: bool,
    /// The engine kept a trace of the run.
    pub debug: bool,
    /// The engine actually ran, instead of the stored result being reused.
    pub run: bool,
}

/// Handle returned by [`Kernel::register_events`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventsId(u64);

/// Owns the formula being worked on and the minimization engines.
#[derive(Default)]
pub struct Kernel {
    formula: Option<Formula>,
    minimized: Option<Formula>,
    qm: QuineMcCluskey,
    espresso: Espresso,
    algorithm: Algorithm,
    repre: Repre,
    events: Vec<(EventsId, Box<dyn Events>)>,
    next_events_id: u64,
}

impl Kernel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the Espresso engine, for instance to cap its iterations.
    pub fn with_espresso(mut self, espresso: Espresso) -> Self {
        self.espresso = espresso;
        self
    }

    // ---
    // Formula
    // ---

    /// Makes `formula` the current formula. Any stored result is dropped.
    pub fn set_formula(&mut self, mut formula: Formula) {
        formula.set_minimized(false);
        self.minimized = None;
        let formula = self.formula.insert(formula);
        emit(&mut self.events, |events| events.formula_changed(formula));
    }

    /// Removes the current formula and its minimized form, returning the formula.
    pub fn remove_formula(&mut self) -> Option<Formula> {
        self.minimized = None;
        self.formula.take()
    }

    #[inline]
    pub fn formula(&self) -> Option<&Formula> {
        self.formula.as_ref()
    }

    #[inline]
    pub fn has_formula(&self) -> bool {
        self.formula.is_some()
    }

    /// The minimized formula, if the current formula hasn't changed since it was minimized.
    pub fn minimized_formula(&self) -> Option<&Formula> {
        match &self.formula {
            Some(formula) if formula.is_minimized() => self.minimized.as_ref(),
            _ => None,
        }
    }

    #[inline]
    pub fn has_minimized_formula(&self) -> bool {
        self.minimized_formula().is_some()
    }

    /// Minimizes the current formula with the selected algorithm.
    ///
    /// The engine only runs if the formula changed since the last run, or if a trace is
    /// requested and the last run didn't keep one. Otherwise the stored result is returned.
    pub fn minimize_formula(&mut self, debug: bool) -> Option<&Formula> {
        let mut event = MinimizeEvent::default();
        if let Some(formula) = self.formula.as_mut() {
            event.has_formula = true;
            let engine: &mut dyn Minimizer = match self.algorithm {
                Algorithm::QuineMcCluskey => &mut self.qm,
                Algorithm::Espresso => &mut self.espresso,
            };
            if !formula.is_minimized() || self.minimized.is_none() || (debug && !engine.is_debug())
            {
                debug!("kernel: minimizing with {} (debug: {})", self.algorithm, debug);
                self.minimized = Some(engine.minimize(formula, debug));
                event.run = true;
            }
            event.debug = engine.is_debug();
        }

        let minimized = self.minimized.as_ref();
        emit(&mut self.events, |events| {
            events.formula_minimized(minimized, event)
        });
        self.minimized_formula()
    }

    /// Sets the value of the current formula at `index`. Returns whether anything changed.
    ///
    /// Errors are reported to the observers as well as returned.
    pub fn set_term_value(&mut self, index: u64, value: OutputValue) -> Result<bool, KernelError> {
        let formula = match self.formula.as_mut() {
            Some(formula) => formula,
            None => return Ok(false),
        };
        match formula.set_term_value(index, value) {
            Ok(changed) => {
                if changed {
                    emit(&mut self.events, |events| events.formula_changed(formula));
                }
                Ok(changed)
            }
            Err(error) => {
                self.error(&error);
                Err(error)
            }
        }
    }

    /// Renames the variables of the current formula and of its minimized form.
    pub fn set_vars(&mut self, vars: Vec<char>) -> Result<(), KernelError> {
        let formula = match self.formula.as_mut() {
            Some(formula) => formula,
            None => return Ok(()),
        };
        if let Err(error) = formula.set_vars(vars.clone()) {
            self.error(&error);
            return Err(error);
        }
        if let Some(minimized) = self.minimized.as_mut() {
            // Same variable count as the formula it was derived from.
            minimized.set_vars(vars)?;
        }
        emit(&mut self.events, |events| events.formula_changed(formula));
        Ok(())
    }

    /// Sets the session representation and switches the current formula to it.
    ///
    /// A formula that was minimized before the switch is minimized again, keeping a trace if
    /// the last run kept one.
    pub fn set_repre(&mut self, repre: Repre) {
        self.repre = repre;
        let formula = match self.formula.as_mut() {
            Some(formula) => formula,
            None => return,
        };
        let was_minimized = formula.is_minimized();
        if !formula.set_repre(repre) {
            return;
        }
        emit(&mut self.events, |events| events.formula_changed(formula));
        if was_minimized {
            let debug = self.engine().is_debug();
            self.minimize_formula(debug);
        }
    }

    #[inline]
    pub fn repre(&self) -> Repre {
        self.repre
    }

    // ---
    // Algorithms
    // ---

    /// Selects the algorithm used by [`Self::minimize_formula`]. Changing it drops the stored
    /// result.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        if self.algorithm == algorithm {
            return;
        }
        self.algorithm = algorithm;
        self.minimized = None;
        if let Some(formula) = self.formula.as_mut() {
            formula.set_minimized(false);
        }
    }

    #[inline]
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    #[inline]
    pub fn espresso(&self) -> &Espresso {
        &self.espresso
    }

    /// The Quine-McCluskey trace of the current minimized formula.
    pub fn qm_data(&self) -> Option<&QuineMcCluskeyData> {
        match self.algorithm {
            Algorithm::QuineMcCluskey if self.has_minimized_formula() => self.qm.data(),
            _ => None,
        }
    }

    /// The Espresso trace of the current minimized formula.
    pub fn espresso_data(&self) -> Option<&EspressoData> {
        match self.algorithm {
            Algorithm::Espresso if self.has_minimized_formula() => self.espresso.data(),
            _ => None,
        }
    }

    fn engine(&self) -> &dyn Minimizer {
        match self.algorithm {
            Algorithm::QuineMcCluskey => &self.qm,
            Algorithm::Espresso => &self.espresso,
        }
    }

    // ---
    // Events
    // ---

    pub fn register_events(&mut self, events: Box<dyn Events>) -> EventsId {
        let id = EventsId(self.next_events_id);
        self.next_events_id += 1;
        self.events.push((id, events));
        id
    }

    /// Removes an observer. Returns false if `id` isn't registered.
    pub fn unregister_events(&mut self, id: EventsId) -> bool {
        let len = self.events.len();
        self.events.retain(|(other, _)| *other != id);
        self.events.len() != len
    }

    /// Reports `error` to every observer.
    pub fn error(&mut self, error: &KernelError) {
        debug!("kernel: {}", error);
        emit(&mut self.events, |events| events.error(error));
    }
}

impl fmt::Debug for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Kernel")
            .field("formula", &self.formula)
            .field("minimized", &self.minimized)
            .field("algorithm", &self.algorithm)
            .field("repre", &self.repre)
            .field("events", &format_args!("{} observers", self.events.len()))
            .finish()
    }
}

fn emit(events: &mut [(EventsId, Box<dyn Events>)], mut f: impl FnMut(&mut dyn Events)) {
    for (_, events) in events {
        f(events.as_mut());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{errors::ErrorKind, values::State};
    use std::{cell::RefCell, rc::Rc};
    use test_log::test;

    #[derive(Clone, Debug, PartialEq, Eq)]
    enum Record {
        Changed(usize),
        Minimized(Option<usize>, MinimizeEvent),
        Error(ErrorKind),
    }

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Record>>>);

    impl Recorder {
        fn take(&self) -> Vec<Record> {
            std::mem::take(&mut *self.0.borrow_mut())
        }
    }

    impl Events for Recorder {
        fn formula_changed(&mut self, formula: &Formula) {
            self.0.borrow_mut().push(Record::Changed(formula.size()));
        }

        fn formula_minimized(&mut self, minimized: Option<&Formula>, event: MinimizeEvent) {
            self.0
                .borrow_mut()
                .push(Record::Minimized(minimized.map(Formula::size), event));
        }

        fn error(&mut self, error: &KernelError) {
            self.0.borrow_mut().push(Record::Error(error.kind()));
        }
    }

    fn kernel_with_recorder() -> (Kernel, Recorder) {
        let mut kernel = Kernel::new();
        let recorder = Recorder::default();
        kernel.register_events(Box::new(recorder.clone()));
        (kernel, recorder)
    }

    fn ran(debug: bool) -> MinimizeEvent {
        MinimizeEvent {
            has_formula: true,
            debug,
            run: true,
        }
    }

    #[test]
    fn test_minimize_without_formula() {
        let (mut kernel, recorder) = kernel_with_recorder();
        assert!(kernel.minimize_formula(false).is_none());
        assert_eq!(
            recorder.take(),
            vec![Record::Minimized(None, MinimizeEvent::default())]
        );
    }

    #[test]
    fn test_minimize_is_idempotent() {
        let (mut kernel, recorder) = kernel_with_recorder();
        kernel.set_formula(Formula::from_indices(3, Repre::Sop, [0, 1, 2, 3], []).unwrap());
        let first = kernel.minimize_formula(false).cloned().unwrap();
        assert_eq!(first.to_string(), "f(c,b,a) = c'");
        assert_eq!(first.state(), State::Minimized);

        let second = kernel.minimize_formula(false).cloned().unwrap();
        assert_eq!(first, second);
        let no_run = MinimizeEvent {
            run: false,
            ..ran(false)
        };
        assert_eq!(
            recorder.take(),
            vec![
                Record::Changed(4),
                Record::Minimized(Some(1), ran(false)),
                Record::Minimized(Some(1), no_run),
            ]
        );

        // Asking for a trace reruns the engine once.
        kernel.minimize_formula(true);
        kernel.minimize_formula(true);
        assert_eq!(
            recorder.take(),
            vec![
                Record::Minimized(Some(1), ran(true)),
                Record::Minimized(
                    Some(1),
                    MinimizeEvent {
                        run: false,
                        ..ran(true)
                    }
                ),
            ]
        );
        assert!(kernel.qm_data().is_some());
        assert!(kernel.espresso_data().is_none());
    }

    #[test]
    fn test_unchanged_value_keeps_result() {
        let mut kernel = Kernel::new();
        kernel.set_formula(Formula::from_indices(3, Repre::Sop, [1, 2], []).unwrap());
        kernel.minimize_formula(false);
        assert!(kernel.has_minimized_formula());

        // 1 is already in the on-set.
        assert_eq!(kernel.set_term_value(1, OutputValue::One), Ok(false));
        assert!(kernel.has_minimized_formula());

        assert_eq!(kernel.set_term_value(3, OutputValue::One), Ok(true));
        assert!(!kernel.has_minimized_formula());
        assert!(kernel.qm_data().is_none());

        let minimized = kernel.minimize_formula(false).unwrap();
        assert_eq!(minimized.size(), 2);
    }

    #[test]
    fn test_set_term_value_on_cube_formula() {
        let (mut kernel, recorder) = kernel_with_recorder();
        kernel.set_formula(Formula::from_terms(vec!["1-".parse().unwrap()], Repre::Sop).unwrap());
        kernel.minimize_formula(false);
        recorder.take();

        assert_eq!(kernel.set_term_value(3, OutputValue::One), Ok(false));
        assert!(kernel.has_minimized_formula());
        assert!(recorder.take().is_empty());

        assert_eq!(kernel.set_term_value(3, OutputValue::Zero), Ok(true));
        assert_eq!(recorder.take(), vec![Record::Changed(1)]);
        let formula = kernel.formula().unwrap();
        assert_eq!(formula.term_indices(OutputValue::One), vec![2]);
        assert_eq!(kernel.minimize_formula(false).unwrap().to_string(), "f(b,a) = ba'");
    }

    #[test]
    fn test_errors_are_reported() {
        let (mut kernel, recorder) = kernel_with_recorder();
        kernel.set_formula(Formula::new(2, Repre::Sop).unwrap());
        recorder.take();

        let err = kernel.set_term_value(4, OutputValue::One).unwrap_err();
        assert_eq!(err, KernelError::InvalidIndex { index: 4, max: 4 });
        let err = kernel.set_vars(vec!['x']).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidVariables);
        assert_eq!(
            recorder.take(),
            vec![
                Record::Error(ErrorKind::InvalidIndex),
                Record::Error(ErrorKind::InvalidVariables),
            ]
        );
    }

    #[test]
    fn test_set_vars_renames_both() {
        let mut kernel = Kernel::new();
        kernel.set_formula(Formula::from_indices(2, Repre::Sop, [2, 3], []).unwrap());
        kernel.minimize_formula(false);
        kernel.set_vars(vec!['x', 'y']).unwrap();
        assert_eq!(kernel.formula().unwrap().vars(), &['x', 'y']);
        let minimized = kernel.minimized_formula().unwrap();
        assert_eq!(minimized.to_string(), "f(x,y) = x");
    }

    #[test]
    fn test_set_repre_minimizes_again() {
        let (mut kernel, recorder) = kernel_with_recorder();
        kernel.set_formula(Formula::from_indices(2, Repre::Sop, [0, 1], []).unwrap());
        kernel.minimize_formula(true);
        recorder.take();

        kernel.set_repre(Repre::Pos);
        assert_eq!(kernel.repre(), Repre::Pos);
        let formula = kernel.formula().unwrap();
        assert_eq!(formula.repre(), Repre::Pos);
        assert_eq!(formula.term_indices(OutputValue::Zero), vec![2, 3]);

        let minimized = kernel.minimized_formula().unwrap();
        assert_eq!(minimized.repre(), Repre::Pos);
        assert_eq!(minimized.to_string(), "f(b,a) = (b')");
        assert_eq!(
            recorder.take(),
            vec![Record::Changed(2), Record::Minimized(Some(1), ran(true))]
        );

        // Same representation: nothing happens.
        kernel.set_repre(Repre::Pos);
        assert!(recorder.take().is_empty());
    }

    #[test]
    fn test_set_repre_not_minimized() {
        let (mut kernel, recorder) = kernel_with_recorder();
        kernel.set_formula(Formula::from_indices(2, Repre::Sop, [0, 1], []).unwrap());
        recorder.take();
        kernel.set_repre(Repre::Pos);
        assert_eq!(recorder.take(), vec![Record::Changed(2)]);
        assert!(!kernel.has_minimized_formula());
    }

    #[test]
    fn test_switch_algorithm() {
        let mut kernel = Kernel::new();
        kernel.set_formula(
            Formula::from_indices(4, Repre::Sop, [0, 2, 5, 6, 7, 8, 10, 13, 15], []).unwrap(),
        );
        let qm = kernel.minimize_formula(true).cloned().unwrap();
        assert!(kernel.qm_data().is_some());

        kernel.set_algorithm(Algorithm::Espresso);
        assert_eq!(kernel.algorithm(), Algorithm::Espresso);
        assert!(!kernel.has_minimized_formula());
        assert!(kernel.qm_data().is_none());

        let espresso = kernel.minimize_formula(true).cloned().unwrap();
        assert_eq!(espresso.size(), qm.size());
        assert_eq!(kernel.formula().unwrap().check_cover(&espresso), Ok(()));
        let data = kernel.espresso_data().unwrap();
        assert_eq!(data.steps().last().unwrap().state(), State::Minimized);
    }

    #[test]
    fn test_espresso_configuration() {
        let mut kernel = Kernel::new().with_espresso(Espresso::new().with_max_iterations(Some(0)));
        kernel.set_algorithm(Algorithm::Espresso);
        kernel.set_formula(Formula::from_indices(2, Repre::Sop, [0, 1], []).unwrap());
        assert_eq!(kernel.espresso().max_iterations(), Some(0));
        assert_eq!(kernel.minimize_formula(false).unwrap().size(), 2);
    }

    #[test]
    fn test_unregister_events() {
        let (mut kernel, recorder) = kernel_with_recorder();
        let other = kernel.register_events(Box::new(Recorder::default()));
        assert!(kernel.unregister_events(other));
        assert!(!kernel.unregister_events(other));

        kernel.remove_formula();
        assert!(!kernel.has_formula());
        kernel.minimize_formula(false);
        assert_eq!(recorder.take().len(), 1);
    }
}
