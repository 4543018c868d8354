use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::LoanError;
use crate::record::LoanRecord;
use crate::types::{Money, Months, Rate, Term};
use crate::LoanResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum Newton-Raphson iterations for the rate solve.
const MAX_RATE_ITERATIONS: u32 = 1000;

/// Decimal places for currency and period results.
const CURRENCY_DP: u32 = 2;

/// Decimal places for the rate convergence test and result.
const RATE_DP: u32 = 6;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Compute `target` from the other three terms of `record`.
///
/// The record is read-only; the caller decides whether to store the result.
/// Dispatch is a static match on the term, and gating on record completeness
/// happens here so no individual solver can be reached with missing data.
pub fn solve(record: &LoanRecord, target: Term) -> LoanResult<Decimal> {
    if !record.is_solvable(target) {
        return Err(LoanError::InsufficientData(format!(
            "solving {target} requires the other three terms"
        )));
    }

    match target {
        Term::Amount => solve_amount(
            require(record, Term::Rate)?,
            require(record, Term::Length)?,
            require(record, Term::Payment)?,
        ),
        Term::Rate => solve_rate(
            require(record, Term::Amount)?,
            require(record, Term::Length)?,
            require(record, Term::Payment)?,
        ),
        Term::Length => solve_length(
            require(record, Term::Amount)?,
            require(record, Term::Rate)?,
            require(record, Term::Payment)?,
        ),
        Term::Payment => solve_payment(
            require(record, Term::Amount)?,
            require(record, Term::Rate)?,
            require(record, Term::Length)?,
        ),
    }
}

fn require(record: &LoanRecord, term: Term) -> LoanResult<Decimal> {
    record
        .get(term)
        .ok_or_else(|| LoanError::InsufficientData(format!("loan {term} is not set")))
}

// ---------------------------------------------------------------------------
// Closed-form solves
// ---------------------------------------------------------------------------

/// Principal that a given payment amortizes over `length` months at `rate`.
///
/// amount = payment / (r / (1 - (1+r)^(-length))), rounded to cents.
pub fn solve_amount(rate: Rate, length: Months, payment: Money) -> LoanResult<Money> {
    let factor = annuity_factor(monthly_rate(rate), length)?;
    if factor.is_zero() {
        return Err(LoanError::DivisionByZero {
            context: "annuity factor".into(),
        });
    }
    Ok(round_half_up(payment / factor, CURRENCY_DP))
}

/// Monthly payment that amortizes `amount` over `length` months at `rate`.
///
/// payment = amount * (r / (1 - (1+r)^(-length))), rounded to cents.
pub fn solve_payment(amount: Money, rate: Rate, length: Months) -> LoanResult<Money> {
    let factor = annuity_factor(monthly_rate(rate), length)?;
    Ok(round_half_up(amount * factor, CURRENCY_DP))
}

/// Months needed to amortize `amount` at `rate` with a fixed `payment`.
///
/// length = -ln(1 - r*amount/payment) / ln(1+r). Requires the payment to
/// exceed the first month's interest, otherwise the balance never shrinks.
pub fn solve_length(amount: Money, rate: Rate, payment: Money) -> LoanResult<Months> {
    let r = monthly_rate(rate);
    if r.is_zero() {
        return Err(LoanError::DivisionByZero {
            context: "monthly rate".into(),
        });
    }
    if payment.is_zero() {
        return Err(LoanError::DivisionByZero {
            context: "payment".into(),
        });
    }

    let paydown = Decimal::ONE - r * amount / payment;
    if paydown <= Decimal::ZERO {
        return Err(LoanError::FinancialImpossibility(
            "payment does not cover the interest; the loan can never be paid off".into(),
        ));
    }

    let one_plus_r = Decimal::ONE + r;
    if one_plus_r <= Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "rate".into(),
            reason: "monthly rate must exceed -100%".into(),
        });
    }

    let denominator = one_plus_r.ln();
    if denominator.is_zero() {
        return Err(LoanError::DivisionByZero {
            context: "log of compound base".into(),
        });
    }

    Ok(ceil_then_round(-paydown.ln() / denominator))
}

// ---------------------------------------------------------------------------
// Rate solve (Newton-Raphson)
// ---------------------------------------------------------------------------

/// Nominal annual percentage rate recovered from the other three terms.
///
/// Newton-Raphson on f(r) = payment - payment*(1+r)^(-length) - r*amount,
/// converging when successive monthly-rate iterates agree to 6 decimal
/// places. A converged rate at or below zero means the payment can never
/// amortize the loan: `NoSolution`.
pub fn solve_rate(amount: Money, length: Months, payment: Money) -> LoanResult<Rate> {
    // Fixed starting seed of 100% APR expressed monthly, deliberately not
    // derived from the inputs.
    let mut rate = Decimal::ONE / MONTHS_PER_YEAR;

    for iterations in 0..MAX_RATE_ITERATIONS {
        let one_plus_r = Decimal::ONE + rate;
        if one_plus_r <= Decimal::ZERO {
            return Err(diverged(iterations));
        }

        // discount = (1+r)^(-length); keep the exponent positive and invert.
        let compound = one_plus_r
            .checked_powd(length)
            .filter(|c| !c.is_zero())
            .ok_or_else(|| diverged(iterations))?;
        let discount = Decimal::ONE / compound;

        let f = payment - payment * discount - rate * amount;
        let fprime = length * payment * discount / one_plus_r - amount;
        if fprime.is_zero() {
            return Err(diverged(iterations));
        }

        let step = f.checked_div(fprime).ok_or_else(|| diverged(iterations))?;
        let mut next = rate - step;

        // Guard against divergence
        if next < dec!(-0.99) {
            next = dec!(-0.99);
        } else if next > dec!(100.0) {
            next = dec!(100.0);
        }

        if round_half_up(next, RATE_DP) == round_half_up(rate, RATE_DP) {
            if round_half_up(rate, RATE_DP) <= Decimal::ZERO {
                return Err(LoanError::NoSolution(
                    "payment cannot amortize the loan at any positive rate".into(),
                ));
            }
            return Ok(round_half_up(rate * MONTHS_PER_YEAR * PERCENT, RATE_DP));
        }

        rate = next;
    }

    Err(diverged(MAX_RATE_ITERATIONS))
}

fn diverged(iterations: u32) -> LoanError {
    LoanError::ConvergenceFailure {
        function: "solve_rate".into(),
        iterations,
    }
}

// ---------------------------------------------------------------------------
// Shared arithmetic
// ---------------------------------------------------------------------------

/// Effective monthly rate from a nominal annual percentage rate.
fn monthly_rate(annual_percent: Rate) -> Decimal {
    annual_percent / PERCENT / MONTHS_PER_YEAR
}

/// Periodic annuity factor r / (1 - (1+r)^(-n)).
fn annuity_factor(r: Decimal, n: Months) -> LoanResult<Decimal> {
    if r.is_zero() {
        return Err(LoanError::DivisionByZero {
            context: "monthly rate".into(),
        });
    }

    let one_plus_r = Decimal::ONE + r;
    if one_plus_r <= Decimal::ZERO {
        return Err(LoanError::InvalidInput {
            field: "rate".into(),
            reason: "monthly rate must exceed -100%".into(),
        });
    }

    let compound = one_plus_r
        .checked_powd(n)
        .ok_or_else(|| LoanError::InvalidInput {
            field: "length".into(),
            reason: "compound factor out of decimal range".into(),
        })?;
    if compound.is_zero() {
        return Err(LoanError::DivisionByZero {
            context: "compound factor".into(),
        });
    }

    let denominator = Decimal::ONE - Decimal::ONE / compound;
    if denominator.is_zero() {
        return Err(LoanError::DivisionByZero {
            context: "annuity denominator".into(),
        });
    }

    Ok(r / denominator)
}

/// Two-stage period rounding: ceiling at 2 decimal places, then an ordinary
/// round to 2 decimal places. The ceiling step truncates fractional periods
/// upward so the count is never understated; the stages are kept separate
/// because they differ at exact boundary values.
fn ceil_then_round(periods: Decimal) -> Months {
    let ceiled = periods.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::ToPositiveInfinity);
    round_half_up(ceiled, CURRENCY_DP)
}

/// Rounds half away from zero rather than to even.
fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
