use std::error::Error;
use std::fs;
use std::path::Path;

use loan_core::Term;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A value of type `T` for each of the four loan terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerTerm<T> {
    pub amount: T,
    pub rate: T,
    pub length: T,
    pub payment: T,
}

impl<T> PerTerm<T> {
    pub fn get(&self, term: Term) -> &T {
        match term {
            Term::Amount => &self.amount,
            Term::Rate => &self.rate,
            Term::Length => &self.length,
            Term::Payment => &self.payment,
        }
    }
}

/// How one term's value renders inside the panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueFormat {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    pub decimals: u32,
}

impl ValueFormat {
    pub fn render(&self, value: Decimal) -> String {
        let dp = self.decimals as usize;
        format!("{}{value:.dp$}{}", self.prefix, self.suffix)
    }
}

/// Static panel chrome: title, key help, per-term row labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub title: String,
    pub help: Vec<String>,
    pub labels: PerTerm<String>,
    pub placeholder: String,
    pub width: usize,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            title: "Loan Calculator".into(),
            help: vec![
                "Enter 1-4 to update a loan term".into(),
                "Prefix with 'c' to calculate a term (example: c4 for payment)".into(),
            ],
            labels: PerTerm {
                amount: "Amount".into(),
                rate: "Rate (APR)".into(),
                length: "Length".into(),
                payment: "Payment".into(),
            },
            placeholder: "No Data".into(),
            width: 46,
        }
    }
}

/// The status-line catalogue and fixed prompt strings. `{term}` in the
/// confirmation templates expands to the term's lowercase name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub prompt: String,
    pub select: String,
    pub quit_hint: String,
    pub updated: String,
    pub calculated: String,
    pub recalc_hint: String,
    pub not_enough_data: String,
    pub could_not_compute: String,
    pub no_valid_rate: String,
    pub invalid_selection: String,
    pub invalid_data: String,
    pub exit: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            prompt: "> ".into(),
            select: "Please enter a selection:".into(),
            quit_hint: "(Enter 'q' to quit)".into(),
            updated: "The loan {term} has been updated!".into(),
            calculated: "The loan {term} has been calculated!".into(),
            recalc_hint: "You may want to recalculate the other terms.".into(),
            not_enough_data: "Not enough data: enter the other three terms first.".into(),
            could_not_compute: "These terms do not describe a valid loan.".into(),
            no_valid_rate: "No valid rate was found for these terms.".into(),
            invalid_selection: "That is not a valid selection.".into(),
            invalid_data: "Please enter a positive number.".into(),
            exit: " Thank you for using the loan calculator! ".into(),
        }
    }
}

/// Externally overridable UI text, loaded once at startup and handed to the
/// presentation layer at construction. The solver never sees any of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub prompts: PerTerm<String>,
    pub patterns: PerTerm<String>,
    pub formats: PerTerm<ValueFormat>,
    pub panel: PanelConfig,
    pub messages: Messages,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            prompts: default_prompts(),
            patterns: default_patterns(),
            formats: default_formats(),
            panel: PanelConfig::default(),
            messages: Messages::default(),
        }
    }
}

impl UiConfig {
    /// Load overrides from a YAML file. Missing sections keep their defaults.
    pub fn load(path: &Path) -> Result<UiConfig, Box<dyn Error>> {
        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
        let config: UiConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse '{}': {}", path.display(), e))?;
        Ok(config)
    }
}

fn default_prompts() -> PerTerm<String> {
    PerTerm {
        amount: "Enter the loan amount in dollars:".into(),
        rate: "Enter the annual interest rate as a percentage:".into(),
        length: "Enter the loan length in months:".into(),
        payment: "Enter the monthly payment in dollars:".into(),
    }
}

fn default_patterns() -> PerTerm<String> {
    let numeric = r"^\d+\.?\d*$".to_string();
    PerTerm {
        amount: numeric.clone(),
        rate: numeric.clone(),
        length: numeric.clone(),
        payment: numeric,
    }
}

fn default_formats() -> PerTerm<ValueFormat> {
    PerTerm {
        amount: ValueFormat {
            prefix: "$".into(),
            suffix: String::new(),
            decimals: 2,
        },
        rate: ValueFormat {
            prefix: String::new(),
            suffix: " %".into(),
            decimals: 3,
        },
        length: ValueFormat {
            prefix: String::new(),
            suffix: " months".into(),
            decimals: 2,
        },
        payment: ValueFormat {
            prefix: "$".into(),
            suffix: String::new(),
            decimals: 2,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_formats_render() {
        let config = UiConfig::default();
        assert_eq!(config.formats.amount.render(dec!(20000)), "$20000.00");
        assert_eq!(config.formats.rate.render(dec!(6.000435)), "6.000 %");
        assert_eq!(config.formats.length.render(dec!(60)), "60.00 months");
    }

    #[test]
    fn test_partial_yaml_overrides_named_fields_only() {
        let yaml = "
messages:
  prompt: \">> \"
panel:
  placeholder: \"---\"
";
        let config: UiConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.messages.prompt, ">> ");
        assert_eq!(config.panel.placeholder, "---");
        // Untouched fields keep their defaults.
        assert_eq!(config.messages.exit, Messages::default().exit);
        assert_eq!(config.panel.width, 46);
        assert_eq!(config.patterns.amount, r"^\d+\.?\d*$");
    }

    #[test]
    fn test_empty_yaml_is_all_defaults() {
        let config: UiConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config.messages.prompt, "> ");
        assert_eq!(config.panel.placeholder, "No Data");
    }
}
