use serde::Deserialize;

/// `/quote`. Finnhub answers zeros (or nulls) for unknown symbols.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct QuoteData {
    /// Current price.
    #[serde(default)]
    pub(crate) c: Option<f64>,
    /// Change.
    #[allow(dead_code)]
    #[serde(default)]
    pub(crate) d: Option<f64>,
    /// Percent change.
    #[serde(default)]
    pub(crate) dp: Option<f64>,
    /// Previous close.
    #[allow(dead_code)]
    #[serde(default)]
    pub(crate) pc: Option<f64>,
}

/// `/stock/metric?metric=all`; only the block this crate reads is modelled.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FinancialsData {
    #[serde(default)]
    pub(crate) metric: Option<MetricBlock>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MetricBlock {
    #[serde(rename = "peNormalizedAnnual")]
    #[serde(default)]
    pub(crate) pe_normalized_annual: Option<f64>,
}
