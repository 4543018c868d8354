use std::io::{self, BufRead, Write};

use loan_core::{solver, LoanError, LoanRecord, Term};

use crate::config::UiConfig;
use crate::input::{self, Selection, Validator};
use crate::render;

/// What the message line beneath the panel should say next iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Empty,
    Updated { term: Term, recalc_hint: bool },
    Calculated(Term),
    NotEnoughData,
    CouldNotCompute,
    NoValidRate,
    InvalidSelection,
}

impl Status {
    /// Collapse a solver error into the message category shown to the user.
    pub fn from_error(error: &LoanError) -> Status {
        if error.is_domain() {
            Status::CouldNotCompute
        } else if matches!(error, LoanError::InsufficientData(_)) {
            Status::NotEnoughData
        } else {
            Status::NoValidRate
        }
    }

    /// Message text for this status, or `None` when there is nothing to show.
    pub fn text(&self, config: &UiConfig) -> Option<String> {
        let messages = &config.messages;
        match self {
            Status::Empty => None,
            Status::Updated { term, recalc_hint } => {
                let mut text = messages.updated.replace("{term}", term.label());
                if *recalc_hint {
                    text.push('\n');
                    text.push_str(&messages.recalc_hint);
                }
                Some(text)
            }
            Status::Calculated(term) => {
                Some(messages.calculated.replace("{term}", term.label()))
            }
            Status::NotEnoughData => Some(messages.not_enough_data.clone()),
            Status::CouldNotCompute => Some(messages.could_not_compute.clone()),
            Status::NoValidRate => Some(messages.no_valid_rate.clone()),
            Status::InvalidSelection => Some(messages.invalid_selection.clone()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Status::NotEnoughData
                | Status::CouldNotCompute
                | Status::NoValidRate
                | Status::InvalidSelection
        )
    }
}

/// One interactive calculator session over a pair of line-oriented handles.
///
/// The session exclusively owns the loan record; solvers see it read-only
/// and their results are stored here, never by the solver itself.
pub struct Session<'a, R, W> {
    config: &'a UiConfig,
    validator: Validator,
    record: LoanRecord,
    status: Status,
    wipe_screen: bool,
    reader: R,
    writer: W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        config: &'a UiConfig,
        wipe_screen: bool,
        reader: R,
        writer: W,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            config,
            validator: Validator::from_config(config)?,
            record: LoanRecord::new(),
            status: Status::Empty,
            wipe_screen,
            reader,
            writer,
        })
    }

    /// Run until the user quits or the input stream ends.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.render()?;
            let Some(line) = self.read_line()? else { break };
            match input::parse_selection(&line) {
                Selection::Quit => {
                    self.exit_banner()?;
                    break;
                }
                Selection::Update(term) => {
                    if !self.update_term(term)? {
                        break;
                    }
                }
                Selection::Solve(term) => self.solve_term(term),
                Selection::Invalid => self.status = Status::InvalidSelection,
            }
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        if self.wipe_screen {
            // ANSI clear + cursor home
            write!(self.writer, "\x1b[2J\x1b[1;1H")?;
        }
        let screen = render::render_screen(&self.record, &self.status, self.config);
        write!(self.writer, "{screen}")?;
        write!(self.writer, "{}", self.config.messages.prompt)?;
        self.writer.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }

    /// Prompt for and store a user-entered value. Returns false when the
    /// input stream ended mid-entry.
    fn update_term(&mut self, term: Term) -> io::Result<bool> {
        let value = input::read_term_value(
            &mut self.reader,
            &mut self.writer,
            self.config,
            &self.validator,
            term,
        )?;
        let Some(value) = value else {
            return Ok(false);
        };

        self.record.set(term, value);
        // Once the record is complete, a fresh entry may leave previously
        // computed terms stale next to it.
        self.status = Status::Updated {
            term,
            recalc_hint: self.record.is_complete(),
        };
        Ok(true)
    }

    fn solve_term(&mut self, term: Term) {
        if !self.record.is_solvable(term) {
            self.status = Status::NotEnoughData;
            return;
        }
        match solver::solve(&self.record, term) {
            Ok(value) => {
                self.record.set(term, value);
                self.status = Status::Calculated(term);
            }
            // The record is left as it was; only the message changes.
            Err(error) => self.status = Status::from_error(&error),
        }
    }

    fn exit_banner(&mut self) -> io::Result<()> {
        writeln!(
            self.writer,
            "{:*^width$}",
            self.config.messages.exit,
            width = self.config.panel.width
        )
    }
}
