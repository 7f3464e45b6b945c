use chrono::{DateTime, Utc};

use crate::models::{
    DevActivityRecord, DevActivityRow, OnchainRecord, OnchainRow, PriceRecord, SnapshotRow,
    WatchlistEntry,
};

pub fn assemble_row(
    entry: &WatchlistEntry,
    price: PriceRecord,
    onchain: OnchainRecord,
    captured_at: DateTime<Utc>,
) -> SnapshotRow {
    SnapshotRow {
        ticker: entry.ticker.clone(),
        contract: entry.contract_address.as_ref().map(|c| c.to_ascii_lowercase()),
        price,
        onchain,
        last_updated: captured_at,
    }
}

/// `contract` is the address the record was fetched for.
pub fn assemble_onchain_row(
    entry: &WatchlistEntry,
    contract: &str,
    onchain: OnchainRecord,
    captured_at: DateTime<Utc>,
) -> OnchainRow {
    OnchainRow {
        ticker: entry.ticker.clone(),
        contract: contract.to_ascii_lowercase(),
        onchain,
        last_updated: captured_at,
    }
}

pub fn assemble_dev_row(
    entry: &WatchlistEntry,
    repo: &str,
    activity: DevActivityRecord,
    captured_at: DateTime<Utc>,
) -> DevActivityRow {
    DevActivityRow {
        ticker: entry.ticker.clone(),
        repo: repo.to_string(),
        activity,
        last_updated: captured_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_all_null_inputs_keep_identity() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let entry = WatchlistEntry::new("AAA", "aaa-coin");
        let row = assemble_row(&entry, PriceRecord::default(), OnchainRecord::default(), ts);
        assert_eq!(row.ticker, "AAA");
        assert_eq!(row.contract, None);
        assert!(row.price.is_empty());
        assert_eq!(row.onchain, OnchainRecord::default());
        assert_eq!(row.last_updated, ts);
    }

    #[test]
    fn test_contract_is_lowercased() {
        let entry = WatchlistEntry::new("LKI", "laika-ai")
            .with_contract("0x3D1A0e1dE8e17bD50A865A340a3F5D8D1f46A1F1");
        let row = assemble_row(&entry, PriceRecord::default(), OnchainRecord::default(), Utc::now());
        assert_eq!(row.contract.as_deref(), Some("0x3d1a0e1de8e17bd50a865a340a3f5d8d1f46a1f1"));

        let onchain = assemble_onchain_row(
            &entry,
            entry.contract_address.as_deref().unwrap(),
            OnchainRecord::new(Some(5), 1, 0),
            Utc::now(),
        );
        assert_eq!(onchain.contract, "0x3d1a0e1de8e17bd50a865a340a3f5d8d1f46a1f1");
    }

    #[test]
    fn test_dev_row() {
        let entry = WatchlistEntry::new("TAO", "bittensor").with_repo("bittensor/bittensor");
        let row = assemble_dev_row(&entry, "bittensor/bittensor", DevActivityRecord::default(), Utc::now());
        assert_eq!(row.repo, "bittensor/bittensor");
        assert_eq!(row.activity, DevActivityRecord::default());
    }
}
