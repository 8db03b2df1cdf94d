use serde::{Deserialize, Serialize};

/// Company profile from `/stock/profile2`. Finnhub answers `{}` for unknown symbols, so every
/// field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub finnhub_industry: Option<String>,
    #[serde(default)]
    pub ipo: Option<String>,
    #[serde(default)]
    pub logo: Option<String>,
    /// Market capitalization in millions of `currency`.
    #[serde(default)]
    pub market_capitalization: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub share_outstanding: Option<f64>,
    #[serde(default)]
    pub ticker: Option<String>,
    #[serde(default)]
    pub weburl: Option<String>,
}

fn present(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|v| !v.is_empty())
}

impl CompanyProfile {
    /// The company name, or the ticker when the name is blank. `None` when neither is usable.
    pub fn display_name(&self) -> Option<&str> {
        present(self.name.as_deref()).or_else(|| present(self.ticker.as_deref()))
    }

    /// The listing exchange when the profile carries one.
    pub fn exchange(&self) -> Option<&str> {
        present(self.exchange.as_deref())
    }
}
