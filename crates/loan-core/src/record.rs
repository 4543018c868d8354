use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Term;

/// The four loan terms, each either user-entered, solver-computed, or unset.
///
/// A record starts fully unset and is mutated in place by its owner; solvers
/// only ever receive a shared reference and return a fresh value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub amount: Option<Decimal>,
    pub rate: Option<Decimal>,
    pub length: Option<Decimal>,
    pub payment: Option<Decimal>,
}

impl LoanRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, term: Term) -> Option<Decimal> {
        match term {
            Term::Amount => self.amount,
            Term::Rate => self.rate,
            Term::Length => self.length,
            Term::Payment => self.payment,
        }
    }

    pub fn set(&mut self, term: Term, value: Decimal) {
        let field = match term {
            Term::Amount => &mut self.amount,
            Term::Rate => &mut self.rate,
            Term::Length => &mut self.length,
            Term::Payment => &mut self.payment,
        };
        *field = Some(value);
    }

    /// True iff every field other than `target` is populated. Solving a term
    /// is only meaningful when the other three are known; every solve path
    /// checks this before touching the math.
    pub fn is_solvable(&self, target: Term) -> bool {
        Term::ALL
            .iter()
            .all(|&term| term == target || self.get(term).is_some())
    }

    /// True when all four terms are populated.
    pub fn is_complete(&self) -> bool {
        Term::ALL.iter().all(|&term| self.get(term).is_some())
    }
}
