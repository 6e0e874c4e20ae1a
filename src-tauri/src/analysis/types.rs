//! Structured market-impact analysis returned by the model.
//!
//! Every field is optional on the wire. Models routinely drop keys, send
//! `null`, emit numbers where text was asked for, or pad arrays with junk,
//! so deserialization never fails on shape: missing pieces become empty
//! values and unusable list elements are dropped.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Full analysis of one news item across duration, direction, magnitude and
/// monitoring dimensions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    /// Short summary of the news and its overall impact
    #[serde(deserialize_with = "lenient_text")]
    pub summary: String,
    #[serde(deserialize_with = "lenient_object")]
    pub duration: DurationAssessment,
    #[serde(deserialize_with = "lenient_object")]
    pub direction: MarketDirection,
    #[serde(deserialize_with = "lenient_object")]
    pub magnitude: MagnitudeAssessment,
    #[serde(deserialize_with = "lenient_object")]
    pub monitoring: MonitoringPlan,
}

/// How long the impact is expected to last.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DurationAssessment {
    /// Long / medium / short term
    #[serde(deserialize_with = "lenient_text")]
    pub assessment: String,
    #[serde(deserialize_with = "lenient_text")]
    pub explanation: String,
    #[serde(deserialize_with = "lenient_text")]
    pub theory_support: String,
    #[serde(deserialize_with = "lenient_text")]
    pub modulating_factors: String,
}

/// Direction of impact per asset class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDirection {
    #[serde(deserialize_with = "lenient_object")]
    pub stocks: StockMarketImpact,
    #[serde(deserialize_with = "lenient_object")]
    pub bonds: BondMarketImpact,
    #[serde(deserialize_with = "lenient_object")]
    pub commodities: CommodityMarketImpact,
    #[serde(deserialize_with = "lenient_object")]
    pub forex: ForexMarketImpact,
    #[serde(deserialize_with = "lenient_object")]
    pub crypto: CryptoMarketImpact,
    /// Spill-over effects between markets
    #[serde(deserialize_with = "lenient_text")]
    pub cross_market: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StockMarketImpact {
    #[serde(deserialize_with = "lenient_text")]
    pub overall: String,
    #[serde(deserialize_with = "lenient_list")]
    pub sectors: Vec<SectorImpact>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectorImpact {
    #[serde(deserialize_with = "lenient_text")]
    pub sector: String,
    #[serde(deserialize_with = "lenient_text")]
    pub impact: String,
    #[serde(deserialize_with = "lenient_text")]
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BondMarketImpact {
    #[serde(deserialize_with = "lenient_text")]
    pub overall: String,
    #[serde(deserialize_with = "lenient_text")]
    pub details: String,
    #[serde(deserialize_with = "lenient_text")]
    pub yield_curve: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommodityMarketImpact {
    #[serde(deserialize_with = "lenient_text")]
    pub overall: String,
    #[serde(deserialize_with = "lenient_list")]
    pub details: Vec<CommodityImpact>,
}

/// Impact on one commodity class (energy, precious metals, agriculture...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommodityImpact {
    #[serde(rename = "type", deserialize_with = "lenient_text")]
    pub kind: String,
    #[serde(deserialize_with = "lenient_text")]
    pub impact: String,
    #[serde(deserialize_with = "lenient_text")]
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForexMarketImpact {
    #[serde(deserialize_with = "lenient_text")]
    pub overall: String,
    #[serde(deserialize_with = "lenient_list")]
    pub pairs: Vec<CurrencyPairImpact>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyPairImpact {
    #[serde(deserialize_with = "lenient_text")]
    pub pair: String,
    /// Appreciation / depreciation
    #[serde(deserialize_with = "lenient_text")]
    pub impact: String,
    #[serde(deserialize_with = "lenient_text")]
    pub magnitude: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CryptoMarketImpact {
    #[serde(deserialize_with = "lenient_text")]
    pub overall: String,
    #[serde(deserialize_with = "lenient_text")]
    pub details: String,
    #[serde(deserialize_with = "lenient_list")]
    pub specific_coins: Vec<CoinImpact>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinImpact {
    #[serde(deserialize_with = "lenient_text")]
    pub coin: String,
    #[serde(deserialize_with = "lenient_text")]
    pub impact: String,
    #[serde(deserialize_with = "lenient_text")]
    pub reason: String,
}

/// Expected size of the market reaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagnitudeAssessment {
    /// High / medium / low
    #[serde(deserialize_with = "lenient_text")]
    pub overall: String,
    #[serde(deserialize_with = "lenient_text")]
    pub quantitative: String,
    #[serde(deserialize_with = "lenient_text")]
    pub historical_comparison: String,
    #[serde(deserialize_with = "lenient_text")]
    pub sensitivity_factors: String,
    #[serde(deserialize_with = "lenient_text")]
    pub surprise_scenarios: String,
}

/// Indicators to watch for the impact fading out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringPlan {
    #[serde(deserialize_with = "lenient_list")]
    pub technical_indicators: Vec<IndicatorSignal>,
    #[serde(deserialize_with = "lenient_list")]
    pub sentiment_indicators: Vec<IndicatorSignal>,
    #[serde(deserialize_with = "lenient_list")]
    pub related_markets: Vec<MarketSignal>,
    #[serde(deserialize_with = "lenient_text")]
    pub monitoring_window: String,
    #[serde(deserialize_with = "lenient_text")]
    pub secondary_effects: String,
    #[serde(deserialize_with = "lenient_text")]
    pub tail_risks: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorSignal {
    #[serde(deserialize_with = "lenient_text")]
    pub indicator: String,
    #[serde(deserialize_with = "lenient_text")]
    pub threshold: String,
    #[serde(deserialize_with = "lenient_text")]
    pub interpretation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketSignal {
    #[serde(deserialize_with = "lenient_text")]
    pub market: String,
    #[serde(deserialize_with = "lenient_text")]
    pub signal: String,
    #[serde(deserialize_with = "lenient_text")]
    pub interpretation: String,
}

/// List entries whose every field is empty carry nothing worth rendering.
pub trait Blank {
    fn is_blank(&self) -> bool;
}

macro_rules! impl_blank {
    ($ty:ty, $($field:ident),+) => {
        impl Blank for $ty {
            fn is_blank(&self) -> bool {
                $(self.$field.trim().is_empty())&&+
            }
        }
    };
}

impl_blank!(SectorImpact, sector, impact, reason);
impl_blank!(CommodityImpact, kind, impact, reason);
impl_blank!(CurrencyPairImpact, pair, impact, magnitude);
impl_blank!(CoinImpact, coin, impact, reason);
impl_blank!(IndicatorSignal, indicator, threshold, interpretation);
impl_blank!(MarketSignal, market, signal, interpretation);

/// Render any JSON value as display text.
fn value_to_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .into_iter()
            .map(value_to_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("; "),
        other @ Value::Object(_) => other.to_string(),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(value_to_text)
}

/// Nested records: anything that is not an object becomes the default.
fn lenient_object<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).map_err(serde::de::Error::custom),
        _ => Ok(T::default()),
    }
}

/// Lists: a non-array becomes empty; non-object or blank elements are dropped.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Blank,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => return Ok(Vec::new()),
    };
    Ok(items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value::<T>(item).ok())
        .filter(|entry| !entry.is_blank())
        .collect())
}
