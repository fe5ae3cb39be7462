use crate::application::estimator::Estimate;
use crate::error::Result;
use crate::interfaces::format::to_pennies;
use rust_decimal::Decimal;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Serialize)]
struct EstimateRecord {
    scenario: usize,
    loan_amount: Decimal,
    monthly_payment: Option<Decimal>,
    total_repaid: Option<Decimal>,
    total_interest: Option<Decimal>,
    status: String,
}

impl EstimateRecord {
    fn new(scenario: usize, estimate: &Estimate) -> Self {
        let totals = estimate.totals();
        Self {
            scenario,
            loan_amount: to_pennies(estimate.loan_amount),
            monthly_payment: totals.map(|t| to_pennies(t.monthly_payment)),
            total_repaid: totals.map(|t| to_pennies(t.total_repaid)),
            total_interest: totals.map(|t| to_pennies(t.total_interest)),
            status: estimate
                .errors()
                .map(ToString::to_string)
                .unwrap_or_else(|| "ok".to_string()),
        }
    }
}

/// Writes estimates as CSV, one row per scenario, amounts in pounds and pence.
pub struct EstimateWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> EstimateWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_estimate(&mut self, scenario: usize, estimate: &Estimate) -> Result<()> {
        self.writer.serialize(EstimateRecord::new(scenario, estimate))?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
