use serde::{Deserialize, Serialize};
use std::fmt;

/// Exchange-listed currency symbol.
///
/// The symbol is trimmed and uppercased on construction so that lookups are
/// case-insensitive everywhere downstream. Currencies themselves (names,
/// logos, precision) live in an external catalog; the engine only ever refers
/// to them by code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(symbol: impl AsRef<str>) -> Self {
        Self(symbol.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CurrencyCode {
    fn from(symbol: &str) -> Self {
        Self::new(symbol)
    }
}
