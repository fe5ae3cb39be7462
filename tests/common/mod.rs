use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Writes `rows` valid repayment scenarios whose price grows with the row
/// number, all sharing the same 20% deposit, term and rate.
pub fn generate_scenarios_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["price", "deposit", "deposit_mode", "term", "rate", "type", "fees"])?;

    for i in 1..=rows {
        let price = (100_000 + i * 1_000).to_string();
        wtr.write_record([
            price.as_str(),
            "20",
            "percent",
            "25",
            "4.5",
            "repayment",
            "0",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
