pub mod assembler;
pub mod csv_writer;

pub use assembler::{assemble_dev_row, assemble_onchain_row, assemble_row};
pub use csv_writer::{CsvWriter, WriteOutcome};
