use crate::error::{Error, Result};
use tracing::error;

/// Returns the value if it is present and not blank.
///
/// `None`, empty, and whitespace-only values are rejected with
/// `Error::MissingParameter`, which is also logged at error level.
pub fn require<'a>(name: &str, value: Option<&'a str>) -> Result<&'a str> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(missing(name)),
    }
}

pub fn require_number(name: &str, value: Option<u64>) -> Result<u64> {
    value.ok_or_else(|| missing(name))
}

fn missing(name: &str) -> Error {
    let err = Error::MissingParameter {
        name: name.to_string(),
    };
    error!("{err}");
    err
}

/// Validates every `(name, value)` pair in order. The first failure wins.
pub fn require_all(params: &[(&str, Option<&str>)]) -> Result<()> {
    params
        .iter()
        .try_for_each(|(name, value)| require(name, *value).map(|_| ()))
}
