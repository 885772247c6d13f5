//! Currency model
//!
//! Three fiat currencies and six crypto coins, with all balances and
//! amounts held as i64 minor units.
//!
//! CRITICAL: All money values are i64 minor units (cents for fiat,
//! 1e-8 units for crypto). Amounts are therefore always finite.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Money amount in minor units (i64)
pub type Cents = i64;

/// Fiat currencies supported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FiatCurrency {
    Usd,
    Ngn,
    Eur,
}

impl FiatCurrency {
    pub const ALL: [FiatCurrency; 3] = [FiatCurrency::Usd, FiatCurrency::Ngn, FiatCurrency::Eur];

    pub fn code(&self) -> &'static str {
        match self {
            FiatCurrency::Usd => "USD",
            FiatCurrency::Ngn => "NGN",
            FiatCurrency::Eur => "EUR",
        }
    }
}

/// Crypto coins supported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CryptoCoin {
    Btc,
    Eth,
    Ltc,
    Xrp,
    Doge,
    Gmz,
}

impl CryptoCoin {
    pub const ALL: [CryptoCoin; 6] = [
        CryptoCoin::Btc,
        CryptoCoin::Eth,
        CryptoCoin::Ltc,
        CryptoCoin::Xrp,
        CryptoCoin::Doge,
        CryptoCoin::Gmz,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            CryptoCoin::Btc => "BTC",
            CryptoCoin::Eth => "ETH",
            CryptoCoin::Ltc => "LTC",
            CryptoCoin::Xrp => "XRP",
            CryptoCoin::Doge => "DOGE",
            CryptoCoin::Gmz => "GMZ",
        }
    }
}

/// Any balance-bearing currency: fiat or crypto
///
/// # Example
/// ```
/// use bank_sim_core_rs::models::currency::{Currency, FiatCurrency};
///
/// let usd = Currency::Fiat(FiatCurrency::Usd);
/// assert_eq!(usd.code(), "USD");
/// assert_eq!(usd.scale(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Currency {
    Fiat(FiatCurrency),
    Crypto(CryptoCoin),
}

/// USD as a `Currency`, the unit most operations settle in
pub const USD: Currency = Currency::Fiat(FiatCurrency::Usd);

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Fiat(f) => f.code(),
            Currency::Crypto(c) => c.code(),
        }
    }

    /// Minor units per whole unit: 100 for fiat, 1e8 for crypto
    pub fn scale(&self) -> i64 {
        match self {
            Currency::Fiat(_) => 100,
            Currency::Crypto(_) => 100_000_000,
        }
    }

    /// Render a minor-unit amount as a human-readable string
    ///
    /// # Example
    /// ```
    /// use bank_sim_core_rs::models::currency::{Currency, FiatCurrency};
    ///
    /// let usd = Currency::Fiat(FiatCurrency::Usd);
    /// assert_eq!(usd.format(123450), "1234.50 USD");
    /// ```
    pub fn format(&self, amount: Cents) -> String {
        let scale = self.scale() as u64;
        let sign = if amount < 0 { "-" } else { "" };
        let abs = amount.unsigned_abs();
        let whole = abs / scale;
        let frac = abs % scale;
        match self {
            Currency::Fiat(_) => format!("{}{}.{:02} {}", sign, whole, frac, self.code()),
            Currency::Crypto(_) => format!("{}{}.{:08} {}", sign, whole, frac, self.code()),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fiat_serializes_as_code() {
        let json = serde_json::to_string(&FiatCurrency::Ngn).unwrap();
        assert_eq!(json, "\"NGN\"");
    }

    #[test]
    fn test_currency_roundtrip() {
        let c: Currency = serde_json::from_str("\"BTC\"").unwrap();
        assert_eq!(c, Currency::Crypto(CryptoCoin::Btc));
    }

    #[test]
    fn test_format_negative() {
        assert_eq!(USD.format(-500), "-5.00 USD");
    }
}
