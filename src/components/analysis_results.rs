//! Analysis results display component.
//!
//! Renders the four analysis dimensions, the optional advice summary and
//! any validation warnings. Empty lists show a placeholder line instead of
//! an empty table.

use leptos::prelude::*;

use crate::commands::{AnalysisResult, IndicatorSignal, MarketSignal, ValidationWarning};
use crate::components::impact_chart::ImpactChart;
use crate::components::level_badge::{duration_level, magnitude_level, LevelBadge};

#[component]
pub fn AnalysisResults(
    analysis: AnalysisResult,
    advice: Option<String>,
    warnings: Vec<ValidationWarning>,
    include_charts: bool,
) -> impl IntoView {
    let d = analysis.direction.clone();
    let m = analysis.monitoring.clone();
    let duration = analysis.duration.clone();
    let magnitude = analysis.magnitude.clone();
    let chart_data = analysis.clone();

    view! {
        <div class="analysis-results">
            <style>{include_str!("analysis_results.css")}</style>

            {(!warnings.is_empty()).then(|| view! {
                <div class="warnings-box">
                    <strong>"The model left some fields empty:"</strong>
                    <ul>
                        {warnings.iter().map(|w| view! { <li>{w.message.clone()}</li> }).collect::<Vec<_>>()}
                    </ul>
                </div>
            })}

            <section class="result-card">
                <h3>"Summary"</h3>
                <p class="summary-text">{analysis.summary.clone()}</p>
            </section>

            {include_charts.then(|| view! {
                <section class="result-card">
                    <h3>"Impact Overview"</h3>
                    <ImpactChart analysis=chart_data />
                </section>
            })}

            <section class="result-card">
                <h3>
                    "1. Impact Duration "
                    <LevelBadge label=duration.assessment.clone() level=duration_level(&duration.assessment) />
                </h3>
                <Field label="Explanation" value=duration.explanation />
                <Field label="Theory support" value=duration.theory_support />
                <Field label="Modulating factors" value=duration.modulating_factors />
            </section>

            <section class="result-card">
                <h3>"2. Impact Direction and Scope"</h3>

                <h4>"Stock Market"</h4>
                <Field label="Overall" value=d.stocks.overall.clone() />
                <EntryTable
                    headers=["Sector", "Impact", "Reason"]
                    rows=d.stocks.sectors.iter().map(|s| [s.sector.clone(), s.impact.clone(), s.reason.clone()]).collect()
                />

                <h4>"Bond Market"</h4>
                <Field label="Overall" value=d.bonds.overall.clone() />
                <Field label="Yield curve" value=d.bonds.yield_curve.clone() />
                <Field label="Details" value=d.bonds.details.clone() />

                <h4>"Commodity Market"</h4>
                <Field label="Overall" value=d.commodities.overall.clone() />
                <EntryTable
                    headers=["Commodity", "Impact", "Reason"]
                    rows=d.commodities.details.iter().map(|c| [c.kind.clone(), c.impact.clone(), c.reason.clone()]).collect()
                />

                <h4>"Forex Market"</h4>
                <Field label="Overall" value=d.forex.overall.clone() />
                <EntryTable
                    headers=["Pair", "Impact", "Magnitude"]
                    rows=d.forex.pairs.iter().map(|p| [p.pair.clone(), p.impact.clone(), p.magnitude.clone()]).collect()
                />

                <h4>"Crypto Market"</h4>
                <Field label="Overall" value=d.crypto.overall.clone() />
                <Field label="Details" value=d.crypto.details.clone() />
                <EntryTable
                    headers=["Coin", "Impact", "Reason"]
                    rows=d.crypto.specific_coins.iter().map(|c| [c.coin.clone(), c.impact.clone(), c.reason.clone()]).collect()
                />

                <h4>"Cross-Market Transmission"</h4>
                <p>{d.cross_market.clone()}</p>
            </section>

            <section class="result-card">
                <h3>
                    "3. Impact Magnitude "
                    <LevelBadge label=magnitude.overall.clone() level=magnitude_level(&magnitude.overall) />
                </h3>
                <Field label="Quantitative estimate" value=magnitude.quantitative />
                <Field label="Historical comparison" value=magnitude.historical_comparison />
                <Field label="Sensitivity factors" value=magnitude.sensitivity_factors />
                <Field label="Surprise scenarios" value=magnitude.surprise_scenarios />
            </section>

            <section class="result-card">
                <h3>"4. Impact Fade Indicators"</h3>
                <h4>"Technical Indicators"</h4>
                <EntryTable headers=["Indicator", "Threshold", "Interpretation"] rows=indicator_rows(&m.technical_indicators) />
                <h4>"Sentiment Indicators"</h4>
                <EntryTable headers=["Indicator", "Threshold", "Interpretation"] rows=indicator_rows(&m.sentiment_indicators) />
                <h4>"Related Markets"</h4>
                <EntryTable headers=["Market", "Signal", "Interpretation"] rows=market_rows(&m.related_markets) />
                <Field label="Monitoring window" value=m.monitoring_window.clone() />
                <Field label="Secondary effects" value=m.secondary_effects.clone() />
                <Field label="Tail risks" value=m.tail_risks.clone() />
            </section>

            {advice.filter(|a| !a.trim().is_empty()).map(|text| view! {
                <section class="result-card advice-card">
                    <h3>"Investment Advice Summary"</h3>
                    <p class="advice-text">{text}</p>
                </section>
            })}
        </div>
    }
}

fn indicator_rows(items: &[IndicatorSignal]) -> Vec<[String; 3]> {
    items
        .iter()
        .map(|i| [i.indicator.clone(), i.threshold.clone(), i.interpretation.clone()])
        .collect()
}

fn market_rows(items: &[MarketSignal]) -> Vec<[String; 3]> {
    items
        .iter()
        .map(|s| [s.market.clone(), s.signal.clone(), s.interpretation.clone()])
        .collect()
}

/// Labelled text field.
#[component]
fn Field(label: &'static str, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div class="detail-row">
            <span class="detail-label">{label}":"</span>
            <span class="detail-value">{value}</span>
        </div>
    }
}

/// Three-column table, or a placeholder when there are no rows.
#[component]
fn EntryTable(headers: [&'static str; 3], rows: Vec<[String; 3]>) -> impl IntoView {
    if rows.is_empty() {
        return view! { <p class="empty-state">"No data"</p> }.into_any();
    }
    view! {
        <table class="entry-table">
            <thead>
                <tr>{headers.iter().map(|h| view! { <th>{*h}</th> }).collect::<Vec<_>>()}</tr>
            </thead>
            <tbody>
                {rows.into_iter().map(|row| view! {
                    <tr>{row.into_iter().map(|cell| view! { <td>{cell}</td> }).collect::<Vec<_>>()}</tr>
                }).collect::<Vec<_>>()}
            </tbody>
        </table>
    }
    .into_any()
}
