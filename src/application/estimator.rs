use crate::domain::amortization;
use crate::domain::mortgage::{EstimateRequest, LoanInputs, MortgageType, Totals};
use crate::domain::validation::{DepositIssue, ValidationError, ValidationErrors};
use rust_decimal::Decimal;
use tracing::{debug, trace};

/// The outcome of estimating one request.
///
/// The loan amount is always reported, even when validation blocked the
/// calculation, so a caller can keep showing it next to the error messages.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub loan_amount: Decimal,
    pub mortgage_type: MortgageType,
    pub outcome: Result<Totals, ValidationErrors>,
}

impl Estimate {
    pub fn totals(&self) -> Option<&Totals> {
        self.outcome.as_ref().ok()
    }

    pub fn errors(&self) -> Option<&ValidationErrors> {
        self.outcome.as_ref().err()
    }

    pub fn is_valid(&self) -> bool {
        self.outcome.is_ok()
    }
}

struct CachedTotals {
    inputs: LoanInputs,
    mortgage_type: MortgageType,
    totals: Totals,
}

/// Turns requests into estimates, recomputing only when the validated inputs
/// change.
///
/// Meant to be called on every edit of a form. Only the most recent valid
/// computation is kept; an invalid request leaves it untouched.
#[derive(Default)]
pub struct Estimator {
    last: Option<CachedTotals>,
    computations: u64,
}

impl Estimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn estimate(&mut self, request: &EstimateRequest) -> Estimate {
        let loan_amount = request.loan_amount();

        let outcome = match request.validate() {
            Ok(inputs) if inputs.principal <= Decimal::ZERO => {
                let mut errors = ValidationErrors::default();
                errors.push(ValidationError::InvalidDeposit(DepositIssue::NotBelowPrice));
                Err(errors)
            }
            Ok(inputs) => Ok(self.totals_for(inputs, request.mortgage_type)),
            Err(errors) => {
                debug!(%errors, "estimate blocked by validation");
                Err(errors)
            }
        };

        Estimate {
            loan_amount,
            mortgage_type: request.mortgage_type,
            outcome,
        }
    }

    /// How many times the engine has actually been invoked.
    pub fn computations(&self) -> u64 {
        self.computations
    }

    fn totals_for(&mut self, inputs: LoanInputs, mortgage_type: MortgageType) -> Totals {
        if let Some(cached) = &self.last
            && cached.inputs == inputs
            && cached.mortgage_type == mortgage_type
        {
            trace!("inputs unchanged, reusing previous totals");
            return cached.totals;
        }

        let totals = amortization::totals(&inputs, mortgage_type);
        self.computations += 1;
        debug!(
            principal = %inputs.principal,
            rate = %inputs.annual_rate_percent,
            term = %inputs.term_years,
            %mortgage_type,
            monthly = %totals.monthly_payment,
            "computed totals"
        );

        self.last = Some(CachedTotals {
            inputs,
            mortgage_type,
            totals,
        });
        totals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::mortgage::DepositInput;
    use crate::interfaces::form::MortgageForm;
    use rust_decimal_macros::dec;

    fn request() -> EstimateRequest {
        EstimateRequest {
            price: dec!(300000),
            deposit: DepositInput::Amount(dec!(60000)),
            term_years: dec!(25),
            annual_rate_percent: dec!(4.5),
            fees: dec!(0),
            mortgage_type: MortgageType::InterestOnly,
        }
    }

    #[test]
    fn test_estimate_valid_request() {
        let mut estimator = Estimator::new();
        let estimate = estimator.estimate(&request());

        assert_eq!(estimate.loan_amount, dec!(240000));
        let totals = estimate.totals().unwrap();
        assert_eq!(totals.monthly_payment, dec!(900));
        assert_eq!(totals.total_interest, dec!(270000));
        assert_eq!(totals.total_repaid, dec!(510000));
    }

    #[test]
    fn test_invalid_deposit_blocks_totals() {
        let mut estimator = Estimator::new();
        let estimate = estimator.estimate(&EstimateRequest {
            price: dec!(100000),
            deposit: DepositInput::Amount(dec!(100000)),
            ..request()
        });

        assert!(!estimate.is_valid());
        assert!(estimate.totals().is_none());
        assert_eq!(estimate.loan_amount, Decimal::ZERO);
        assert!(
            estimate
                .errors()
                .unwrap()
                .contains(ValidationError::InvalidDeposit(DepositIssue::NotBelowPrice))
        );
        assert_eq!(estimator.computations(), 0);
    }

    #[test]
    fn test_unchanged_inputs_reuse_previous_totals() {
        let mut estimator = Estimator::new();
        let first = estimator.estimate(&request());
        let second = estimator.estimate(&request());

        assert_eq!(first, second);
        assert_eq!(estimator.computations(), 1);
    }

    #[test]
    fn test_equivalent_deposit_modes_share_cache() {
        let mut estimator = Estimator::new();
        estimator.estimate(&request());
        estimator.estimate(&EstimateRequest {
            deposit: DepositInput::Percent(dec!(20)),
            ..request()
        });

        assert_eq!(estimator.computations(), 1);
    }

    #[test]
    fn test_changed_inputs_recompute() {
        let mut estimator = Estimator::new();
        estimator.estimate(&request());
        let repayment = estimator.estimate(&EstimateRequest {
            mortgage_type: MortgageType::Repayment,
            ..request()
        });
        estimator.estimate(&EstimateRequest {
            annual_rate_percent: dec!(5),
            ..request()
        });

        assert_eq!(
            repayment.totals().unwrap().monthly_payment.round_dp(2),
            dec!(1334.00)
        );
        assert_eq!(estimator.computations(), 3);
    }

    #[test]
    fn test_huge_typed_percent_deposit_is_rejected() {
        let mut form = MortgageForm::default();
        form.set("price", "1000000000000000000000").unwrap();
        form.set("mode", "percent").unwrap();
        form.set("deposit", "1000000000000000000000").unwrap();

        let estimate = Estimator::new().estimate(&form.to_request());
        assert_eq!(estimate.loan_amount, Decimal::ZERO);
        assert!(
            estimate
                .errors()
                .unwrap()
                .contains(ValidationError::InvalidDeposit(DepositIssue::NotBelowPrice))
        );
    }

    #[test]
    fn test_extreme_negative_deposit_is_rejected() {
        let estimate = Estimator::new().estimate(&EstimateRequest {
            price: Decimal::MAX,
            deposit: DepositInput::Amount(-Decimal::MAX),
            ..request()
        });

        assert_eq!(estimate.loan_amount, Decimal::MAX);
        assert!(
            estimate
                .errors()
                .unwrap()
                .contains(ValidationError::InvalidDeposit(DepositIssue::Negative))
        );
    }

    #[test]
    fn test_maximum_price_saturates_totals() {
        let mut estimator = Estimator::new();
        for mortgage_type in [MortgageType::Repayment, MortgageType::InterestOnly] {
            let estimate = estimator.estimate(&EstimateRequest {
                price: Decimal::MAX,
                deposit: DepositInput::Amount(Decimal::ZERO),
                mortgage_type,
                ..request()
            });

            let totals = estimate.totals().unwrap();
            assert!(totals.monthly_payment > Decimal::ZERO);
            assert_eq!(totals.total_repaid, Decimal::MAX);
        }
    }

    #[test]
    fn test_invalid_request_keeps_cache() {
        let mut estimator = Estimator::new();
        estimator.estimate(&request());
        estimator.estimate(&EstimateRequest {
            term_years: dec!(0),
            ..request()
        });
        estimator.estimate(&request());

        assert_eq!(estimator.computations(), 1);
    }
}
