use std::io::{self, BufRead, Write};

use loan_core::Term;
use regex::Regex;
use rust_decimal::Decimal;

use crate::config::{PerTerm, UiConfig};

/// Outcome of one menu selection line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Quit,
    Update(Term),
    Solve(Term),
    Invalid,
}

/// Classify a raw selection line: a leading 'q' quits, a lone digit 1-4
/// selects a term to update, and 'c' plus a digit selects a term to solve.
pub fn parse_selection(line: &str) -> Selection {
    if line.starts_with(['q', 'Q']) {
        return Selection::Quit;
    }
    match line.as_bytes() {
        [digit @ b'1'..=b'4'] => term_for(*digit)
            .map(Selection::Update)
            .unwrap_or(Selection::Invalid),
        [b'c' | b'C', digit @ b'1'..=b'4'] => term_for(*digit)
            .map(Selection::Solve)
            .unwrap_or(Selection::Invalid),
        _ => Selection::Invalid,
    }
}

fn term_for(digit: u8) -> Option<Term> {
    Term::from_menu_index(usize::from(digit - b'0'))
}

/// Per-term input validators compiled once from the configured patterns.
pub struct Validator {
    patterns: PerTerm<Regex>,
}

impl Validator {
    pub fn from_config(config: &UiConfig) -> Result<Self, regex::Error> {
        Ok(Self {
            patterns: PerTerm {
                amount: Regex::new(&config.patterns.amount)?,
                rate: Regex::new(&config.patterns.rate)?,
                length: Regex::new(&config.patterns.length)?,
                payment: Regex::new(&config.patterns.payment)?,
            },
        })
    }

    /// A value is accepted iff it matches the term's pattern and parses to a
    /// strictly positive number.
    pub fn validate(&self, term: Term, raw: &str) -> Option<Decimal> {
        if !self.patterns.get(term).is_match(raw) {
            return None;
        }
        let value: Decimal = raw.parse().ok()?;
        (value > Decimal::ZERO).then_some(value)
    }
}

/// Prompt for a term value until the input validates. `None` means the input
/// stream ended mid-entry.
pub fn read_term_value<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    config: &UiConfig,
    validator: &Validator,
    term: Term,
) -> io::Result<Option<Decimal>> {
    loop {
        writeln!(writer, "{}", config.prompts.get(term))?;
        write!(writer, "{}", config.messages.prompt)?;
        writer.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let raw = line.trim_end_matches(['\r', '\n']);

        if let Some(value) = validator.validate(term, raw) {
            return Ok(Some(value));
        }
        writeln!(writer, "{}", config.messages.invalid_data)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    #[test]
    fn test_parse_selection_update() {
        assert_eq!(parse_selection("1"), Selection::Update(Term::Amount));
        assert_eq!(parse_selection("4"), Selection::Update(Term::Payment));
    }

    #[test]
    fn test_parse_selection_solve() {
        assert_eq!(parse_selection("c1"), Selection::Solve(Term::Amount));
        assert_eq!(parse_selection("C4"), Selection::Solve(Term::Payment));
    }

    #[test]
    fn test_parse_selection_quit_is_prefix_match() {
        assert_eq!(parse_selection("q"), Selection::Quit);
        assert_eq!(parse_selection("Quit"), Selection::Quit);
        assert_eq!(parse_selection("quit please"), Selection::Quit);
    }

    #[test]
    fn test_parse_selection_rejects_everything_else() {
        for line in ["", "5", "0", "c5", "c", "12", "c12", " 1", "x", "cq"] {
            assert_eq!(parse_selection(line), Selection::Invalid, "line: {line:?}");
        }
    }

    #[test]
    fn test_validator_accepts_positive_numerics() {
        let config = UiConfig::default();
        let validator = Validator::from_config(&config).unwrap();
        assert_eq!(validator.validate(Term::Amount, "20000"), Some(dec!(20000)));
        assert_eq!(validator.validate(Term::Rate, "6.5"), Some(dec!(6.5)));
    }

    #[test]
    fn test_validator_rejects_nonpositive_and_malformed() {
        let config = UiConfig::default();
        let validator = Validator::from_config(&config).unwrap();
        for raw in ["0", "0.00", "-5", "abc", "12a", "1 2", ""] {
            assert_eq!(validator.validate(Term::Amount, raw), None, "raw: {raw:?}");
        }
    }

    #[test]
    fn test_read_term_value_reprompts_until_valid() {
        let config = UiConfig::default();
        let validator = Validator::from_config(&config).unwrap();
        let mut reader = Cursor::new(b"abc\n0\n386.66\n".to_vec());
        let mut writer = Vec::new();

        let value =
            read_term_value(&mut reader, &mut writer, &config, &validator, Term::Payment).unwrap();
        assert_eq!(value, Some(dec!(386.66)));

        let output = String::from_utf8(writer).unwrap();
        let rejections = output.matches(&config.messages.invalid_data).count();
        assert_eq!(rejections, 2);
    }

    #[test]
    fn test_read_term_value_none_on_eof() {
        let config = UiConfig::default();
        let validator = Validator::from_config(&config).unwrap();
        let mut reader = Cursor::new(b"abc\n".to_vec());
        let mut writer = Vec::new();

        let value =
            read_term_value(&mut reader, &mut writer, &config, &validator, Term::Amount).unwrap();
        assert_eq!(value, None);
    }
}
