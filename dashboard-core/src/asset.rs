//! Tracked asset definitions

use std::fmt;

/// Assets shown on the dashboard, in display order.
///
/// Every request list built from this slice must keep this order: the
/// aggregator pairs current and historical responses by index.
pub const TRACKED_ASSETS: [Asset; 3] = [Asset::Bitcoin, Asset::Ethereum, Asset::Dogecoin];

/// A cryptocurrency tracked by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Asset {
    Bitcoin,
    Ethereum,
    Dogecoin,
}

impl Asset {
    /// CoinGecko coin id used in upstream URLs
    pub fn coin_id(&self) -> &'static str {
        match self {
            Asset::Bitcoin => "bitcoin",
            Asset::Ethereum => "ethereum",
            Asset::Dogecoin => "dogecoin",
        }
    }

    /// Ticker symbol (lowercase, as CoinGecko reports it)
    pub fn symbol(&self) -> &'static str {
        match self {
            Asset::Bitcoin => "btc",
            Asset::Ethereum => "eth",
            Asset::Dogecoin => "doge",
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coin_id())
    }
}

impl std::str::FromStr for Asset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bitcoin" | "btc" => Ok(Asset::Bitcoin),
            "ethereum" | "eth" => Ok(Asset::Ethereum),
            "dogecoin" | "doge" => Ok(Asset::Dogecoin),
            _ => Err(format!("Unknown asset: {}", s)),
        }
    }
}
