//! Known exchange deposit/hot-wallet addresses.
//!
//! Matching a transfer's destination against this list is a heuristic for
//! "possibly moved to an exchange to sell". The list is operator-maintained
//! and far from exhaustive.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::validation::validate_address;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeAddress {
    pub label: String,
    pub address: String,
}

/// Lower-cased address → exchange label.
#[derive(Debug, Clone, Default)]
pub struct ExchangeAllowList {
    addresses: HashMap<String, String>,
}

impl ExchangeAllowList {
    pub fn from_entries(entries: &[ExchangeAddress]) -> Result<Self> {
        let mut addresses = HashMap::with_capacity(entries.len());
        for entry in entries {
            validate_address(&entry.address).map_err(|e| {
                Error::ConfigError(format!("Exchange '{}': {}", entry.label, e))
            })?;
            addresses.insert(entry.address.to_ascii_lowercase(), entry.label.clone());
        }
        Ok(Self { addresses })
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn label_for(&self, address: &str) -> Option<&str> {
        self.addresses
            .get(&address.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn contains(&self, address: &str) -> bool {
        self.label_for(address).is_some()
    }

    /// Number of destinations that belong to a known exchange.
    pub fn count_matches<'a, I>(&self, destinations: I) -> usize
    where
        I: IntoIterator<Item = &'a str>,
    {
        destinations.into_iter().filter(|to| self.contains(to)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allow_list() -> ExchangeAllowList {
        ExchangeAllowList::from_entries(&[ExchangeAddress {
            label: "binance".to_string(),
            address: "0xBE0eB53F46cd790Cd13851d5EFf43D12404d33E8".to_string(),
        }])
        .unwrap()
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let list = allow_list();
        assert!(list.contains("0xbe0eb53f46cd790cd13851d5eff43d12404d33e8"));
        assert!(list.contains("0XBE0EB53F46CD790CD13851D5EFF43D12404D33E8"));
        assert_eq!(list.label_for("0xbe0eb53f46cd790cd13851d5eff43d12404d33e8"), Some("binance"));
    }

    #[test]
    fn test_count_matches() {
        let list = allow_list();
        let destinations = [
            "0xbe0eb53f46cd790cd13851d5eff43d12404d33e8",
            "0x0000000000000000000000000000000000000001",
            "0xBE0EB53F46CD790CD13851D5EFF43D12404D33E8",
            "",
        ];
        assert_eq!(list.count_matches(destinations.iter().copied()), 2);
    }

    #[test]
    fn test_rejects_malformed_address() {
        let result = ExchangeAllowList::from_entries(&[ExchangeAddress {
            label: "bad".to_string(),
            address: "0x1234".to_string(),
        }]);
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }
}
