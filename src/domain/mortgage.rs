use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How the borrowed principal is paid back.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default, Hash)]
#[serde(rename_all = "kebab-case", try_from = "String")]
pub enum MortgageType {
    /// Each payment covers interest and retires part of the principal.
    #[default]
    Repayment,
    /// Payments cover interest only; the principal is repaid at term end.
    InterestOnly,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown mortgage type '{0}', expected 'repayment' or 'interest-only'")]
pub struct ParseMortgageTypeError(pub String);

impl FromStr for MortgageType {
    type Err = ParseMortgageTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "repayment" => Ok(Self::Repayment),
            "interest-only" | "interest_only" | "interestonly" => Ok(Self::InterestOnly),
            _ => Err(ParseMortgageTypeError(s.to_string())),
        }
    }
}

impl TryFrom<String> for MortgageType {
    type Error = ParseMortgageTypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for MortgageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Repayment => write!(f, "repayment"),
            Self::InterestOnly => write!(f, "interest-only"),
        }
    }
}

/// Validated parameters handed to the amortization engine.
///
/// Only `EstimateRequest::validate` builds one from user input, so every
/// `LoanInputs` satisfies `principal >= 0`, `annual_rate_percent >= 0`,
/// `term_years > 0` and `fees >= 0`.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
pub struct LoanInputs {
    pub principal: Decimal,
    pub annual_rate_percent: Decimal,
    pub term_years: Decimal,
    pub fees: Decimal,
}

/// Figures derived from a `LoanInputs` and a `MortgageType`.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
pub struct Totals {
    pub monthly_payment: Decimal,
    pub total_repaid: Decimal,
    pub total_interest: Decimal,
}

/// A deposit as the user expressed it.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase", tag = "mode", content = "value")]
pub enum DepositInput {
    Amount(Decimal),
    Percent(Decimal),
}

impl DepositInput {
    /// Converts the deposit into an absolute amount against `price`.
    ///
    /// A percentage never resolves to more than the price itself. A product
    /// outside the `Decimal` range saturates in the direction of its sign.
    pub fn resolve(&self, price: Decimal) -> Decimal {
        match *self {
            Self::Amount(amount) => amount,
            Self::Percent(percent) => {
                let fraction = percent / dec!(100);
                let amount = price.checked_mul(fraction).unwrap_or(
                    if price.is_sign_negative() != fraction.is_sign_negative() {
                        Decimal::MIN
                    } else {
                        Decimal::MAX
                    },
                );
                amount.min(price)
            }
        }
    }
}

/// The numeric form, before validation.
#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy)]
pub struct EstimateRequest {
    pub price: Decimal,
    pub deposit: DepositInput,
    pub term_years: Decimal,
    pub annual_rate_percent: Decimal,
    pub fees: Decimal,
    pub mortgage_type: MortgageType,
}

impl EstimateRequest {
    pub fn deposit_amount(&self) -> Decimal {
        self.deposit.resolve(self.price)
    }

    /// Price minus deposit, clamped at zero.
    pub fn loan_amount(&self) -> Decimal {
        self.price
            .saturating_sub(self.deposit_amount())
            .max(Decimal::ZERO)
    }
}
