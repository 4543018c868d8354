use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Nominal annual rates in percent form (6.0 = 6%). Never as decimals.
pub type Rate = Decimal;

/// Term lengths in months. Fractional months are allowed.
pub type Months = Decimal;

/// One of the four loan parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Term {
    Amount,
    Rate,
    Length,
    Payment,
}

impl Term {
    /// All four terms in menu order.
    pub const ALL: [Term; 4] = [Term::Amount, Term::Rate, Term::Length, Term::Payment];

    /// Map a 1-based menu index to a term.
    pub fn from_menu_index(index: usize) -> Option<Term> {
        match index {
            1 => Some(Term::Amount),
            2 => Some(Term::Rate),
            3 => Some(Term::Length),
            4 => Some(Term::Payment),
            _ => None,
        }
    }

    /// Lowercase name used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            Term::Amount => "amount",
            Term::Rate => "rate",
            Term::Length => "length",
            Term::Payment => "payment",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_index_mapping() {
        assert_eq!(Term::from_menu_index(1), Some(Term::Amount));
        assert_eq!(Term::from_menu_index(4), Some(Term::Payment));
        assert_eq!(Term::from_menu_index(0), None);
        assert_eq!(Term::from_menu_index(5), None);
    }

    #[test]
    fn test_menu_order() {
        let labels: Vec<&str> = Term::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(labels, vec!["amount", "rate", "length", "payment"]);
    }
}
