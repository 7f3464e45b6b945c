pub mod market;
pub mod snapshot;

pub use market::{DevActivityRecord, OnchainRecord, PriceRecord, WatchlistEntry};
pub use snapshot::{CsvRow, DevActivityRow, OnchainRow, SnapshotRow};
