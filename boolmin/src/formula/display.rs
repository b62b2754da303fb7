// Copyright (c) The boolmin Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{
    formula::Formula,
    values::{OutputValue, Repre},
};
use itertools::{Itertools, Position};
use std::fmt;

impl Formula {
    /// Returns a display adapter for the algebraic form, e.g. `f(c,b,a) = ab + c'a`.
    #[inline]
    pub fn algebraic_display(&self) -> FormulaAlgebraicDisplay<'_> {
        FormulaAlgebraicDisplay::new(self)
    }

    /// Returns a display adapter for the index form, e.g. `Em(1,2,4) + Ed(0)`.
    #[inline]
    pub fn index_display(&self) -> FormulaIndexDisplay<'_> {
        FormulaIndexDisplay::new(self)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.algebraic_display())
    }
}

pub struct FormulaAlgebraicDisplay<'a> {
    formula: &'a Formula,
    with_header: bool,
}

impl<'a> FormulaAlgebraicDisplay<'a> {
    pub fn new(formula: &'a Formula) -> Self {
        Self {
            formula,
            with_header: true,
        }
    }

    /// Whether to print the `f(c,b,a) = ` prefix. Defaults to true.
    pub fn with_header(mut self, with_header: bool) -> Self {
        self.with_header = with_header;
        self
    }
}

impl<'a> fmt::Display for FormulaAlgebraicDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let formula = self.formula;
        if self.with_header {
            write!(f, "{} = ", Header(formula))?;
        }

        let repre = formula.repre();
        let terms = formula.terms();
        if terms.is_empty() {
            return match repre {
                Repre::Sop => write!(f, "0"),
                Repre::Pos => write!(f, "1"),
            };
        }

        let separator = match repre {
            Repre::Sop => " + ",
            Repre::Pos => "",
        };
        for term in terms.iter().with_position() {
            match term {
                Position::First(term) | Position::Middle(term) => {
                    write!(
                        f,
                        "{}{}",
                        term.algebraic_display(formula.vars()).with_repre(repre),
                        separator
                    )?;
                }
                Position::Last(term) | Position::Only(term) => {
                    write!(
                        f,
                        "{}",
                        term.algebraic_display(formula.vars()).with_repre(repre)
                    )?;
                }
            }
        }
        Ok(())
    }
}

pub struct FormulaIndexDisplay<'a> {
    formula: &'a Formula,
    with_header: bool,
}

impl<'a> FormulaIndexDisplay<'a> {
    pub fn new(formula: &'a Formula) -> Self {
        Self {
            formula,
            with_header: false,
        }
    }

    /// Whether to print the `f(c,b,a) = ` prefix. Defaults to false.
    pub fn with_header(mut self, with_header: bool) -> Self {
        self.with_header = with_header;
        self
    }
}

impl<'a> fmt::Display for FormulaIndexDisplay<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let formula = self.formula;
        if self.with_header {
            write!(f, "{} = ", Header(formula))?;
        }

        let repre = formula.repre();
        let (symbol, explicit, dc) = match repre {
            Repre::Sop => ('E', 'm', 'd'),
            Repre::Pos => ('P', 'M', 'd'),
        };
        write!(
            f,
            "{}{}({})",
            symbol,
            explicit,
            formula.term_indices(repre.explicit_value()).iter().join(",")
        )?;

        let dont_cares = formula.term_indices(OutputValue::Dc);
        if !dont_cares.is_empty() {
            write!(f, " + {}{}({})", symbol, dc, dont_cares.iter().join(","))?;
        }
        Ok(())
    }
}

/// `f(c,b,a)`
struct Header<'a>(&'a Formula);

impl<'a> fmt::Display for Header<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.0.name(), self.0.vars().iter().join(","))
    }
}
