use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EngineError;
use crate::value_objects::CurrencyCode;

/// Valuation bases supported by the price resolver.
///
/// Every stored equivalent value and every resolver query is denominated in
/// one of these three; asking for any other base is an invalid argument, not
/// a lookup miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseCurrency {
    Irt,
    Usdt,
    Btc,
}

impl BaseCurrency {
    pub const ALL: [BaseCurrency; 3] = [Self::Irt, Self::Usdt, Self::Btc];

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Irt => "IRT",
            Self::Usdt => "USDT",
            Self::Btc => "BTC",
        }
    }

    pub fn code(&self) -> CurrencyCode {
        CurrencyCode::new(self.symbol())
    }

    /// Parses a currency code, rejecting anything outside the three bases.
    pub fn try_from_code(code: &CurrencyCode) -> Result<Self, EngineError> {
        match code.as_str() {
            "IRT" => Ok(Self::Irt),
            "USDT" => Ok(Self::Usdt),
            "BTC" => Ok(Self::Btc),
            _ => Err(EngineError::UnsupportedBaseCurrency(code.clone())),
        }
    }
}

impl fmt::Display for BaseCurrency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Direction of a provider transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderTxKind {
    Add,
    Remove,
}

/// Which pool operations a suspension blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuspendScope {
    Swap,
    Providing,
    Both,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_currency_parsing() {
        assert_eq!(
            BaseCurrency::try_from_code(&CurrencyCode::new("usdt")).unwrap(),
            BaseCurrency::Usdt
        );
        assert!(matches!(
            BaseCurrency::try_from_code(&CurrencyCode::new("ETH")),
            Err(EngineError::UnsupportedBaseCurrency(_))
        ));
    }
}
