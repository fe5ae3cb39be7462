use super::mortgage::{EstimateRequest, LoanInputs};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single field that blocks an estimate.
#[derive(Error, Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Enter a valid property price.")]
    InvalidPrice,
    #[error("Enter a valid term in years.")]
    InvalidTerm,
    #[error("Enter a valid interest rate.")]
    InvalidRate,
    #[error("{0}")]
    InvalidDeposit(DepositIssue),
    #[error("Fees cannot be negative.")]
    InvalidFees,
}

#[derive(Error, Debug, Serialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum DepositIssue {
    #[error("Deposit cannot be negative.")]
    Negative,
    #[error("Deposit must be less than price.")]
    NotBelowPrice,
}

impl ValidationError {
    /// Name of the form field the error belongs to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidPrice => "price",
            Self::InvalidTerm => "term",
            Self::InvalidRate => "rate",
            Self::InvalidDeposit(_) => "deposit",
            Self::InvalidFees => "fees",
        }
    }
}

/// Every field error found in one request, at most one per field.
#[derive(Debug, Serialize, Default, PartialEq, Eq, Clone)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Records `error`, replacing any earlier error for the same field.
    pub fn push(&mut self, error: ValidationError) {
        self.0.retain(|e| e.field() != error.field());
        self.0.push(error);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl EstimateRequest {
    /// Checks the request and produces the engine's inputs.
    ///
    /// All fields are checked, so the caller can show every problem at once.
    pub fn validate(&self) -> Result<LoanInputs, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let deposit = self.deposit_amount();

        if self.price <= Decimal::ZERO {
            errors.push(ValidationError::InvalidPrice);
        }
        if self.term_years <= Decimal::ZERO {
            errors.push(ValidationError::InvalidTerm);
        }
        if self.annual_rate_percent < Decimal::ZERO {
            errors.push(ValidationError::InvalidRate);
        }
        if deposit < Decimal::ZERO {
            errors.push(ValidationError::InvalidDeposit(DepositIssue::Negative));
        }
        if deposit >= self.price && self.price > Decimal::ZERO {
            errors.push(ValidationError::InvalidDeposit(DepositIssue::NotBelowPrice));
        }
        if self.fees < Decimal::ZERO {
            errors.push(ValidationError::InvalidFees);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(LoanInputs {
            principal: self.loan_amount(),
            annual_rate_percent: self.annual_rate_percent,
            term_years: self.term_years,
            fees: self.fees,
        })
    }
}

#[cfg(test)]
impl ValidationErrors {
    pub(crate) fn contains(&self, error: ValidationError) -> bool {
        self.0.contains(&error)
    }
}
