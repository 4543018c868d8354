use colored::Colorize;
use loan_core::{LoanRecord, Term};
use tabled::{builder::Builder, Table};

use crate::config::UiConfig;
use crate::session::Status;

/// Render the four-term panel as a bordered table, one row per term.
pub fn render_panel(record: &LoanRecord, config: &UiConfig) -> String {
    let mut builder = Builder::default();
    builder.push_record(["#".to_string(), "Term".to_string(), "Value".to_string()]);
    for (index, term) in Term::ALL.iter().enumerate() {
        let value = match record.get(*term) {
            Some(value) => config.formats.get(*term).render(value),
            None => config.panel.placeholder.clone(),
        };
        builder.push_record([
            (index + 1).to_string(),
            config.panel.labels.get(*term).clone(),
            value,
        ]);
    }
    Table::from(builder).to_string()
}

/// Compose the full between-prompt screen: title, key help, panel, quit
/// hint, and the current status message centered beneath the panel.
pub fn render_screen(record: &LoanRecord, status: &Status, config: &UiConfig) -> String {
    let width = config.panel.width;
    let mut out = String::new();

    let title = format!(" {} ", config.panel.title);
    out.push_str(&format!("{title:*^width$}\n\n"));
    for line in &config.panel.help {
        out.push_str(&format!("  {line}\n"));
    }
    out.push('\n');
    out.push_str(&render_panel(record, config));
    out.push('\n');
    out.push_str(&center(&config.messages.quit_hint, width));
    out.push('\n');

    match status.text(config) {
        Some(text) => {
            for line in text.lines() {
                let centered = center(line, width);
                if status.is_error() {
                    out.push_str(&format!("{}\n", centered.red()));
                } else {
                    out.push_str(&format!("{centered}\n"));
                }
            }
        }
        None => out.push('\n'),
    }

    out.push_str(&format!("{}\n", config.messages.select));
    out
}

fn center(text: &str, width: usize) -> String {
    format!("{text:^width$}")
}
