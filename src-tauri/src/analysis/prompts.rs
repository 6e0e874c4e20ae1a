//! Prompts for the news analysis and investment advice calls.

use super::types::AnalysisResult;

/// Number of news characters quoted in the advice prompt.
pub const ADVICE_EXCERPT_CHARS: usize = 300;

/// Example response embedded in the analysis prompt.
/// Key order is kept as written (serde_json `preserve_order`).
pub fn analysis_example_json() -> serde_json::Value {
    serde_json::json!({
        "summary": "Brief summary of the news and its overall impact",
        "duration": {
            "assessment": "long-term/medium-term/short-term",
            "explanation": "Detailed explanation",
            "theory_support": "Supporting theory or precedent",
            "modulating_factors": "Factors that may lengthen or shorten the impact"
        },
        "direction": {
            "stocks": {
                "overall": "positive/negative/neutral",
                "sectors": [
                    {"sector": "Sector 1", "impact": "positive/negative/neutral", "reason": "Reason"},
                    {"sector": "Sector 2", "impact": "positive/negative/neutral", "reason": "Reason"}
                ]
            },
            "bonds": {
                "overall": "positive/negative/neutral",
                "details": "Detailed explanation",
                "yield_curve": "Expected yield curve change"
            },
            "commodities": {
                "overall": "positive/negative/neutral",
                "details": [
                    {"type": "Energy", "impact": "positive/negative/neutral", "reason": "Reason"},
                    {"type": "Precious metals", "impact": "positive/negative/neutral", "reason": "Reason"},
                    {"type": "Agriculture", "impact": "positive/negative/neutral", "reason": "Reason"}
                ]
            },
            "forex": {
                "overall": "Detailed description",
                "pairs": [
                    {"pair": "Pair 1", "impact": "appreciate/depreciate", "magnitude": "Size of move"},
                    {"pair": "Pair 2", "impact": "appreciate/depreciate", "magnitude": "Size of move"}
                ]
            },
            "crypto": {
                "overall": "positive/negative/neutral",
                "details": "Detailed explanation",
                "specific_coins": [
                    {"coin": "Bitcoin", "impact": "positive/negative/neutral", "reason": "Reason"},
                    {"coin": "Ethereum", "impact": "positive/negative/neutral", "reason": "Reason"}
                ]
            },
            "cross_market": "Cross-market transmission analysis"
        },
        "magnitude": {
            "overall": "high/medium/low",
            "quantitative": "Quantitative estimate",
            "historical_comparison": "Comparison with similar historical events",
            "sensitivity_factors": "Sensitivity factors in the current environment",
            "surprise_scenarios": "Scenarios for an outsized reaction"
        },
        "monitoring": {
            "technical_indicators": [
                {"indicator": "Indicator 1", "threshold": "Threshold", "interpretation": "Interpretation"},
                {"indicator": "Indicator 2", "threshold": "Threshold", "interpretation": "Interpretation"}
            ],
            "sentiment_indicators": [
                {"indicator": "Indicator 1", "threshold": "Threshold", "interpretation": "Interpretation"},
                {"indicator": "Indicator 2", "threshold": "Threshold", "interpretation": "Interpretation"}
            ],
            "related_markets": [
                {"market": "Market 1", "signal": "Signal", "interpretation": "Interpretation"},
                {"market": "Market 2", "signal": "Signal", "interpretation": "Interpretation"}
            ],
            "monitoring_window": "Suggested monitoring window",
            "secondary_effects": "Second-order effects",
            "tail_risks": "Tail risks"
        }
    })
}

/// Build the main analysis prompt.
///
/// # Arguments
/// * `news_text` - The news item, quoted verbatim
/// * `detailed` - Ask for a data-backed detailed analysis instead of a concise one
pub fn build_analysis_prompt(news_text: &str, detailed: bool) -> String {
    let depth_instruction = if detailed {
        "Provide a detailed analysis backed by data and economic theory, avoid subjective speculation, \
         and point out the uncertainty of the analysis where appropriate."
    } else {
        "Provide a brief, focused analysis that highlights the key impacts and core conclusions."
    };
    let example = serde_json::to_string_pretty(&analysis_example_json())
        .unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"Perform a comprehensive analysis of the following macroeconomic / financial news:

"{news_text}"

Assess it professionally along these four dimensions:

1. Impact duration:
   - Is the market impact long-term (months to years), medium-term (weeks to months) or short-term (hours to days)?
   - Which economic or financial theories, or historical precedents, support this judgement?
   - Which additional factors could lengthen or shorten the impact?

2. Impact direction and scope:
   - Direction of impact on each asset class (positive / negative / neutral):
     * Stocks (differences between sectors)
     * Bonds (focus on yield curve changes)
     * Commodities (energy, precious metals, agriculture, ...)
     * Forex (major currency pairs)
     * Crypto assets
   - Are there cross-market transmission effects?

3. Impact magnitude:
   - Expected market volatility (high / medium / low) with a quantitative estimate
   - Comparison with similar historical events
   - Sensitivity factors in the current market environment
   - Possible scenarios for an outsized reaction

4. Indicators that the impact is fading:
   - Key monitoring indicators:
     * Technical indicators (price, volume, volatility, ...)
     * Sentiment indicators (VIX, sentiment indices, fund flows, ...)
     * Reactions in related markets
   - Suggested monitoring window
   - Potential second-order effects or tail risks

{depth_instruction}

Return the result as JSON in exactly this format:
{example}"#
    )
}

/// First `max_chars` characters of `text`, never splitting a character.
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Build the follow-up prompt asking for a short investment advice summary.
pub fn build_advice_prompt(news_text: &str, analysis: &AnalysisResult) -> String {
    let direction = &analysis.direction;
    format!(
        r#"Based on the following macro news analysis, provide a concise investment advice summary:

News: {news}...

Impact duration: {duration}
Overall impact magnitude: {magnitude}

Stock market impact: {stocks}
Bond market impact: {bonds}
Commodity market impact: {commodities}
Crypto market impact: {crypto}

Keep the summary under 200 words and include risk warnings."#,
        news = excerpt(news_text, ADVICE_EXCERPT_CHARS),
        duration = analysis.duration.assessment,
        magnitude = analysis.magnitude.overall,
        stocks = direction.stocks.overall,
        bonds = direction.bonds.overall,
        commodities = direction.commodities.overall,
        crypto = direction.crypto.overall,
    )
}
