use super::format::{format_gbp, to_pennies};
use crate::application::estimator::Estimate;
use crate::domain::mortgage::{MortgageType, Totals};
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

const ENTER_VALID_DETAILS: &str = "Enter valid details to see your results.";
const ASSUMPTIONS: &str = "Assumes fixed rate for the term you entered and equal monthly payments.";
const EXPLANATION: &str = "\
How we calculate this:
  Repayment mortgages use the standard amortizing loan formula. If the rate
  is 0%, the payment is simply the principal divided by the number of months.
  Interest-only payments are principal x (APR / 12), and the principal is
  repaid in full at the end of the term.";

/// Human-readable results panel for one estimate.
pub struct TextReport<'a> {
    estimate: &'a Estimate,
    explain: bool,
}

impl<'a> TextReport<'a> {
    pub fn new(estimate: &'a Estimate) -> Self {
        Self {
            estimate,
            explain: false,
        }
    }

    /// Appends a description of the formulas after the figures.
    pub fn with_explanation(mut self, explain: bool) -> Self {
        self.explain = explain;
        self
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Loan amount: {}", format_gbp(self.estimate.loan_amount))?;
        writeln!(f)?;

        match &self.estimate.outcome {
            Ok(totals) => {
                writeln!(f, "Mortgage type: {}", self.estimate.mortgage_type)?;
                writeln!(
                    f,
                    "Estimated monthly payment: {}",
                    format_gbp(totals.monthly_payment)
                )?;
                writeln!(f, "Total to repay: {}", format_gbp(totals.total_repaid))?;
                writeln!(f, "Total interest: {}", format_gbp(totals.total_interest))?;
                if self.explain {
                    writeln!(f)?;
                    writeln!(f, "{EXPLANATION}")?;
                }
            }
            Err(errors) => {
                for error in errors.iter() {
                    writeln!(f, "{}: {error}", error.field())?;
                }
                writeln!(f, "{ENTER_VALID_DETAILS}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{ASSUMPTIONS}")
    }
}

#[derive(Debug, Serialize)]
struct FieldMessage {
    field: &'static str,
    message: String,
}

/// Machine-readable form of an estimate.
#[derive(Debug, Serialize)]
pub struct JsonReport {
    loan_amount: Decimal,
    mortgage_type: MortgageType,
    #[serde(skip_serializing_if = "Option::is_none")]
    totals: Option<Totals>,
    errors: Vec<FieldMessage>,
}

impl From<&Estimate> for JsonReport {
    fn from(estimate: &Estimate) -> Self {
        let errors = estimate
            .errors()
            .map(|errors| {
                errors
                    .iter()
                    .map(|e| FieldMessage {
                        field: e.field(),
                        message: e.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            loan_amount: to_pennies(estimate.loan_amount),
            mortgage_type: estimate.mortgage_type,
            totals: estimate.totals().map(|t| Totals {
                monthly_payment: to_pennies(t.monthly_payment),
                total_repaid: to_pennies(t.total_repaid),
                total_interest: to_pennies(t.total_interest),
            }),
            errors,
        }
    }
}

pub fn render_json(estimate: &Estimate) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport::from(estimate))?)
}
