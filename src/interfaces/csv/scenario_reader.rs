use crate::domain::mortgage::MortgageType;
use crate::error::{EstimatorError, Result};
use crate::interfaces::form::{DepositMode, MortgageForm};
use serde::Deserialize;
use std::io::Read;

/// One row of a scenario file.
///
/// Numeric columns are kept as text and parsed the same way as typed form
/// input. `deposit_mode`, `type` and `fees` may be blank or absent.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct Scenario {
    pub price: String,
    pub deposit: String,
    #[serde(default)]
    pub deposit_mode: Option<DepositMode>,
    pub term: String,
    pub rate: String,
    #[serde(rename = "type", default)]
    pub mortgage_type: Option<MortgageType>,
    #[serde(default)]
    pub fees: Option<String>,
}

impl From<Scenario> for MortgageForm {
    fn from(scenario: Scenario) -> Self {
        Self {
            price: scenario.price,
            deposit: scenario.deposit,
            deposit_mode: scenario.deposit_mode.unwrap_or_default(),
            term: scenario.term,
            rate: scenario.rate,
            fees: scenario.fees.unwrap_or_default(),
            mortgage_type: scenario.mortgage_type.unwrap_or_default(),
        }
    }
}

/// Reads scenarios from a CSV source.
///
/// This reader wraps `csv::Reader` and provides an iterator over `Result<Scenario>`.
/// It trims whitespace and tolerates rows with missing trailing columns.
pub struct ScenarioReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> ScenarioReader<R> {
    /// Creates a new `ScenarioReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes scenarios.
    pub fn scenarios(self) -> impl Iterator<Item = Result<Scenario>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(EstimatorError::from))
    }
}
