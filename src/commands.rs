use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["window", "__TAURI__", "core"], catch)]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

// -- Arg structs for serialization --

#[derive(Serialize)]
struct SetApiKeyArgs {
    key: String,
}

#[derive(Serialize)]
struct ModelNameArgs {
    name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AddModelArgs {
    name: String,
    api_url: String,
    api_key: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DisplayOptionsArgs {
    detailed_analysis: bool,
    include_charts: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeNewsArgs {
    news_text: String,
}

#[derive(Serialize)]
struct ExportReportArgs {
    directory: Option<String>,
}

// -- Settings matching backend struct --

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    pub name: String,
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsView {
    pub api_key: String,
    pub selected_model: Option<ModelConfig>,
    pub available_models: Vec<ModelConfig>,
    pub detailed_analysis: bool,
    pub include_charts: bool,
}

impl SettingsView {
    pub fn selected_name(&self) -> String {
        self.selected_model
            .as_ref()
            .map(|m| m.name.clone())
            .unwrap_or_default()
    }
}

// -- Analysis result matching backend structs --

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AnalysisResult {
    pub summary: String,
    pub duration: DurationAssessment,
    pub direction: MarketDirection,
    pub magnitude: MagnitudeAssessment,
    pub monitoring: MonitoringPlan,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct DurationAssessment {
    pub assessment: String,
    pub explanation: String,
    pub theory_support: String,
    pub modulating_factors: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MarketDirection {
    pub stocks: StockMarketImpact,
    pub bonds: BondMarketImpact,
    pub commodities: CommodityMarketImpact,
    pub forex: ForexMarketImpact,
    pub crypto: CryptoMarketImpact,
    pub cross_market: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct StockMarketImpact {
    pub overall: String,
    pub sectors: Vec<SectorImpact>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SectorImpact {
    pub sector: String,
    pub impact: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct BondMarketImpact {
    pub overall: String,
    pub details: String,
    pub yield_curve: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CommodityMarketImpact {
    pub overall: String,
    pub details: Vec<CommodityImpact>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CommodityImpact {
    #[serde(rename = "type")]
    pub kind: String,
    pub impact: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ForexMarketImpact {
    pub overall: String,
    pub pairs: Vec<CurrencyPairImpact>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CurrencyPairImpact {
    pub pair: String,
    pub impact: String,
    pub magnitude: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CryptoMarketImpact {
    pub overall: String,
    pub details: String,
    pub specific_coins: Vec<CoinImpact>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CoinImpact {
    pub coin: String,
    pub impact: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MagnitudeAssessment {
    pub overall: String,
    pub quantitative: String,
    pub historical_comparison: String,
    pub sensitivity_factors: String,
    pub surprise_scenarios: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MonitoringPlan {
    pub technical_indicators: Vec<IndicatorSignal>,
    pub sentiment_indicators: Vec<IndicatorSignal>,
    pub related_markets: Vec<MarketSignal>,
    pub monitoring_window: String,
    pub secondary_effects: String,
    pub tail_risks: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct IndicatorSignal {
    pub indicator: String,
    pub threshold: String,
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct MarketSignal {
    pub market: String,
    pub signal: String,
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
}

/// Response of `analyze_news`. `advice` is only set when rebuilt from a
/// session snapshot.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: AnalysisResult,
    pub advice: Option<String>,
    #[serde(default)]
    pub warnings: Vec<ValidationWarning>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionSnapshot {
    pub news_text: String,
    pub analysis: Option<AnalysisResult>,
    pub advice: Option<String>,
    pub warnings: Vec<ValidationWarning>,
    pub is_analyzing: bool,
    pub advice_pending: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExportResult {
    pub path: String,
    pub filename: String,
}

// -- Typed invoke helpers --

async fn call<T: DeserializeOwned>(cmd: &str, args: JsValue) -> Result<T, String> {
    let result = invoke(cmd, args)
        .await
        .map_err(|e| e.as_string().unwrap_or_else(|| "Unknown error".to_string()))?;

    serde_wasm_bindgen::from_value(result).map_err(|e| format!("Failed to parse response: {}", e))
}

fn no_args() -> Result<JsValue, String> {
    serde_wasm_bindgen::to_value(&serde_json::json!({})).map_err(|e| e.to_string())
}

fn to_args<A: Serialize>(args: &A) -> Result<JsValue, String> {
    serde_wasm_bindgen::to_value(args).map_err(|e| e.to_string())
}

pub async fn get_settings() -> Result<SettingsView, String> {
    call("get_settings", no_args()?).await
}

pub async fn set_api_key(key: &str) -> Result<SettingsView, String> {
    call("set_api_key", to_args(&SetApiKeyArgs { key: key.to_string() })?).await
}

pub async fn select_model(name: &str) -> Result<SettingsView, String> {
    call("select_model", to_args(&ModelNameArgs { name: name.to_string() })?).await
}

pub async fn add_model(name: &str, api_url: &str, api_key: &str) -> Result<SettingsView, String> {
    let args = AddModelArgs {
        name: name.to_string(),
        api_url: api_url.to_string(),
        api_key: api_key.to_string(),
    };
    call("add_model", to_args(&args)?).await
}

pub async fn remove_model(name: &str) -> Result<SettingsView, String> {
    call("remove_model", to_args(&ModelNameArgs { name: name.to_string() })?).await
}

pub async fn set_display_options(
    detailed_analysis: bool,
    include_charts: bool,
) -> Result<SettingsView, String> {
    let args = DisplayOptionsArgs {
        detailed_analysis,
        include_charts,
    };
    call("set_display_options", to_args(&args)?).await
}

/// Run an analysis. Resolves as soon as the analysis parses; the advice
/// summary shows up in a later `get_session` snapshot.
pub async fn analyze_news(news_text: &str) -> Result<AnalyzeResponse, String> {
    let args = AnalyzeNewsArgs {
        news_text: news_text.to_string(),
    };
    call("analyze_news", to_args(&args)?).await
}

pub async fn get_session() -> Result<SessionSnapshot, String> {
    call("get_session", no_args()?).await
}

/// Markdown report for the current session.
pub async fn generate_report() -> Result<String, String> {
    call("generate_report", no_args()?).await
}

/// Write the current report to disk; `None` uses the download directory.
pub async fn export_report(directory: Option<String>) -> Result<ExportResult, String> {
    call("export_report", to_args(&ExportReportArgs { directory })?).await
}
