use crate::error::{Error, Result};

pub fn validate_ticker(ticker: &str) -> Result<()> {
    if ticker.is_empty() {
        return Err(Error::ValidationError("Ticker cannot be empty".to_string()));
    }
    if !ticker.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()) {
        return Err(Error::ValidationError(format!(
            "Ticker '{}' must contain only uppercase letters and digits",
            ticker
        )));
    }
    Ok(())
}

pub fn validate_market_id(market_id: &str) -> Result<()> {
    if market_id.is_empty() {
        return Err(Error::ValidationError("Market id cannot be empty".to_string()));
    }
    if !market_id
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(Error::ValidationError(format!(
            "Market id '{}' must be a lowercase slug",
            market_id
        )));
    }
    Ok(())
}

/// EVM address: `0x` followed by 40 hex digits, any case.
pub fn validate_address(address: &str) -> Result<()> {
    let hex = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .ok_or_else(|| Error::ValidationError(format!("Address '{}' must start with 0x", address)))?;
    if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::ValidationError(format!(
            "Address '{}' must have 40 hex digits",
            address
        )));
    }
    Ok(())
}

pub fn validate_repo_slug(repo: &str) -> Result<()> {
    let valid_part = |part: &str| {
        !part.is_empty()
            && part
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
    };
    match repo.split_once('/') {
        Some((owner, name)) if valid_part(owner) && valid_part(name) => Ok(()),
        _ => Err(Error::ValidationError(format!(
            "Repository '{}' must be in owner/name form",
            repo
        ))),
    }
}
