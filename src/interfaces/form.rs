use crate::domain::mortgage::{DepositInput, EstimateRequest, MortgageType, ParseMortgageTypeError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Parses free-text numeric input.
///
/// Thousands separators and whitespace are ignored and scientific notation
/// is accepted. Anything else that does not parse, including an empty field,
/// reads as zero.
pub fn parse_number(text: &str) -> Decimal {
    let cleaned: String = text
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or(Decimal::ZERO)
}

/// Whether the deposit field holds pounds or a percentage of the price.
#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(try_from = "String")]
pub enum DepositMode {
    #[default]
    Amount,
    Percent,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown deposit mode '{0}', expected 'amount' or 'percent'")]
pub struct ParseDepositModeError(pub String);

impl FromStr for DepositMode {
    type Err = ParseDepositModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "amount" | "£" => Ok(Self::Amount),
            "percent" | "%" => Ok(Self::Percent),
            _ => Err(ParseDepositModeError(s.to_string())),
        }
    }
}

impl TryFrom<String> for DepositMode {
    type Error = ParseDepositModeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for DepositMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount => write!(f, "amount"),
            Self::Percent => write!(f, "percent"),
        }
    }
}

impl DepositMode {
    pub fn deposit(&self, value: Decimal) -> DepositInput {
        match self {
            Self::Amount => DepositInput::Amount(value),
            Self::Percent => DepositInput::Percent(value),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("unknown field '{0}'")]
    UnknownField(String),
    #[error(transparent)]
    DepositMode(#[from] ParseDepositModeError),
    #[error(transparent)]
    MortgageType(#[from] ParseMortgageTypeError),
}

/// The estimator form as typed, one raw string per numeric field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MortgageForm {
    pub price: String,
    pub deposit: String,
    pub deposit_mode: DepositMode,
    pub term: String,
    pub rate: String,
    pub fees: String,
    pub mortgage_type: MortgageType,
}

impl Default for MortgageForm {
    fn default() -> Self {
        Self {
            price: "300000".to_string(),
            deposit: "60000".to_string(),
            deposit_mode: DepositMode::Amount,
            term: "25".to_string(),
            rate: "4.5".to_string(),
            fees: "0".to_string(),
            mortgage_type: MortgageType::Repayment,
        }
    }
}

impl MortgageForm {
    pub const FIELDS: [&'static str; 7] = ["price", "deposit", "mode", "term", "rate", "fees", "type"];

    pub fn to_request(&self) -> EstimateRequest {
        EstimateRequest {
            price: parse_number(&self.price),
            deposit: self.deposit_mode.deposit(parse_number(&self.deposit)),
            term_years: parse_number(&self.term),
            annual_rate_percent: parse_number(&self.rate),
            fees: parse_number(&self.fees),
            mortgage_type: self.mortgage_type,
        }
    }

    /// Updates one field by name. Numeric fields accept any text.
    pub fn set(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        let value = value.trim();
        match field.trim().to_ascii_lowercase().as_str() {
            "price" => self.price = value.to_string(),
            "deposit" => self.deposit = value.to_string(),
            "mode" | "deposit_mode" | "deposit-mode" => self.deposit_mode = value.parse()?,
            "term" => self.term = value.to_string(),
            "rate" => self.rate = value.to_string(),
            "fees" => self.fees = value.to_string(),
            "type" => self.mortgage_type = value.parse()?,
            other => return Err(FormError::UnknownField(other.to_string())),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_number_plain() {
        assert_eq!(parse_number("4.5"), dec!(4.5));
        assert_eq!(parse_number("300000"), dec!(300000));
        assert_eq!(parse_number("-12"), dec!(-12));
    }

    #[test]
    fn test_parse_number_tolerates_separators_and_whitespace() {
        assert_eq!(parse_number("300,000"), dec!(300000));
        assert_eq!(parse_number(" 1 250 000.50 "), dec!(1250000.50));
        assert_eq!(parse_number("\t60,000\n"), dec!(60000));
    }

    #[test]
    fn test_parse_number_scientific() {
        assert_eq!(parse_number("2.5e5"), dec!(250000));
    }

    #[test]
    fn test_parse_number_garbage_is_zero() {
        assert_eq!(parse_number(""), Decimal::ZERO);
        assert_eq!(parse_number("   "), Decimal::ZERO);
        assert_eq!(parse_number("abc"), Decimal::ZERO);
        assert_eq!(parse_number("Infinity"), Decimal::ZERO);
        assert_eq!(parse_number("NaN"), Decimal::ZERO);
    }

    #[test]
    fn test_default_form_request() {
        let request = MortgageForm::default().to_request();
        assert_eq!(request.price, dec!(300000));
        assert_eq!(request.deposit, DepositInput::Amount(dec!(60000)));
        assert_eq!(request.term_years, dec!(25));
        assert_eq!(request.annual_rate_percent, dec!(4.5));
        assert_eq!(request.fees, Decimal::ZERO);
        assert_eq!(request.mortgage_type, MortgageType::Repayment);
    }

    #[test]
    fn test_percent_mode_request() {
        let mut form = MortgageForm::default();
        form.set("mode", "%").unwrap();
        form.set("deposit", "20").unwrap();

        let request = form.to_request();
        assert_eq!(request.deposit, DepositInput::Percent(dec!(20)));
        assert_eq!(request.loan_amount(), dec!(240000));
    }

    #[test]
    fn test_set_rejects_unknown_field_and_bad_choices() {
        let mut form = MortgageForm::default();
        assert_eq!(
            form.set("colour", "blue"),
            Err(FormError::UnknownField("colour".to_string()))
        );
        assert!(matches!(form.set("type", "tracker"), Err(FormError::MortgageType(_))));
        assert!(matches!(form.set("mode", "euros"), Err(FormError::DepositMode(_))));
        assert_eq!(form, MortgageForm::default());
    }

    #[test]
    fn test_set_type() {
        let mut form = MortgageForm::default();
        form.set("TYPE", "interest-only").unwrap();
        assert_eq!(form.mortgage_type, MortgageType::InterestOnly);
    }
}
