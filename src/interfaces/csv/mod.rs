pub mod estimate_writer;
pub mod scenario_reader;
