//! Closed-form mortgage arithmetic.
//!
//! Every function here is pure: inputs are assumed to have passed
//! `EstimateRequest::validate`, and nothing in this module can fail or panic
//! for any `Decimal` it is given. Products saturate at the edge of the
//! `Decimal` range instead of overflowing.

use super::mortgage::{LoanInputs, MortgageType, Totals};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

fn monthly_rate(annual_rate_percent: Decimal) -> Decimal {
    annual_rate_percent / PERCENT / MONTHS_PER_YEAR
}

/// Number of monthly payments in a term, `round(term_years * 12)`.
///
/// Half months round away from zero, so a term of 0.125 years is 2 months.
pub fn number_of_monthly_periods(term_years: Decimal) -> i64 {
    let months = term_years
        .saturating_mul(MONTHS_PER_YEAR)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    months.to_i64().unwrap_or(if months.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}

fn periods_as_decimal(term_years: Decimal) -> Decimal {
    Decimal::from(number_of_monthly_periods(term_years).max(0))
}

/// Level monthly payment that retires `principal` over the term.
///
/// `P * r * (1+r)^n / ((1+r)^n - 1)` with `r` the monthly rate. A zero
/// rate is straight-line `P / n`; a term shorter than half a month pays 0.
pub fn repayment_monthly(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_years: Decimal,
) -> Decimal {
    let n = number_of_monthly_periods(term_years);
    if n <= 0 {
        return Decimal::ZERO;
    }

    let r = monthly_rate(annual_rate_percent);
    if r.is_zero() {
        return principal / Decimal::from(n);
    }

    // (1+r)^n beyond the Decimal range: the annuity factor has converged to 1.
    let Some(growth) = (Decimal::ONE + r).checked_powu(n as u64) else {
        return principal.saturating_mul(r);
    };
    // r too small to register at 28 digits of precision.
    if growth <= Decimal::ONE {
        return principal / Decimal::from(n);
    }

    principal
        .saturating_mul(r)
        .saturating_mul(growth / (growth - Decimal::ONE))
}

/// Monthly interest on the full principal. Independent of the term.
pub fn interest_only_monthly(principal: Decimal, annual_rate_percent: Decimal) -> Decimal {
    principal.saturating_mul(monthly_rate(annual_rate_percent))
}

/// Totals for an amortizing loan.
///
/// Interest is derived as `total - principal - fees` so that the three
/// figures always add up.
pub fn repayment_totals(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_years: Decimal,
    fees: Decimal,
) -> Totals {
    let monthly_payment = repayment_monthly(principal, annual_rate_percent, term_years);
    let total_repaid = monthly_payment
        .saturating_mul(periods_as_decimal(term_years))
        .saturating_add(fees);
    let total_interest = total_repaid.saturating_sub(principal).saturating_sub(fees);

    Totals {
        monthly_payment,
        total_repaid,
        total_interest,
    }
}

/// Totals for an interest-only loan, with the principal repaid as a single
/// lump sum at the end of the term.
pub fn interest_only_totals(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_years: Decimal,
    fees: Decimal,
) -> Totals {
    let monthly_payment = interest_only_monthly(principal, annual_rate_percent);
    let total_interest = monthly_payment.saturating_mul(periods_as_decimal(term_years));
    let total_repaid = principal
        .saturating_add(total_interest)
        .saturating_add(fees);

    Totals {
        monthly_payment,
        total_repaid,
        total_interest,
    }
}

pub fn totals(inputs: &LoanInputs, mortgage_type: MortgageType) -> Totals {
    let LoanInputs {
        principal,
        annual_rate_percent,
        term_years,
        fees,
    } = *inputs;

    match mortgage_type {
        MortgageType::Repayment => {
            repayment_totals(principal, annual_rate_percent, term_years, fees)
        }
        MortgageType::InterestOnly => {
            interest_only_totals(principal, annual_rate_percent, term_years, fees)
        }
    }
}
