use crate::ConfigError;
use alloy::primitives::Address;
use std::{borrow::Cow, env};

/// Read a variable, trimmed. Empty values count as unset, so a blank line in
/// a shell profile never parses as a value.
fn read(key: &str) -> Option<String> {
    let value = env::var(key).ok()?;
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_owned())
}

/// Load a required string.
pub fn load_string(key: &str) -> Result<String, ConfigError> {
    read(key).ok_or_else(|| ConfigError::missing(key))
}

/// Load an optional string.
pub fn load_string_opt(key: &str) -> Option<String> {
    read(key)
}

/// Load a required decimal integer.
pub fn load_u64(key: &str) -> Result<u64, ConfigError> {
    Ok(load_string(key)?.parse::<u64>()?)
}

/// Load a percentage, rejecting values above 100.
pub fn load_percent(key: &'static str) -> Result<u8, ConfigError> {
    let value = load_u64(key)?;
    u8::try_from(value)
        .ok()
        .filter(|pct| *pct <= 100)
        .ok_or(ConfigError::Percent { key, value })
}

/// Load a required URL. The value is checked when the client is built.
pub fn load_url(key: &str) -> Result<Cow<'static, str>, ConfigError> {
    load_string(key).map(Cow::Owned)
}

/// Load an optional URL override.
pub fn load_url_opt(key: &str) -> Option<Cow<'static, str>> {
    read(key).map(Cow::Owned)
}

/// Load a required hex address. Checksum casing is not enforced.
pub fn load_address(key: &str) -> Result<Address, ConfigError> {
    Ok(load_string(key)?.parse::<Address>()?)
}
