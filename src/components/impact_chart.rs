//! Bar chart of the overall direction per market.

use leptos::prelude::*;

use crate::commands::AnalysisResult;

/// Keyword groups checked in order; qualified labels come before the plain
/// ones they contain.
const SCORE_RULES: &[(f32, &[&str])] = &[
    (0.1, &["strongly negative", "strong negative", "significantly negative", "very negative", "强烈利空", "显著利空", "强利空"]),
    (0.9, &["strongly positive", "strong positive", "significantly positive", "very positive", "强烈利好", "显著利好", "强利好"]),
    (0.4, &["slightly negative", "mildly negative", "somewhat negative", "轻微利空", "小幅利空"]),
    (0.6, &["slightly positive", "mildly positive", "somewhat positive", "轻微利好", "小幅利好"]),
    (0.5, &["neutral", "mixed", "中性", "混合"]),
    (0.3, &["negative", "bearish", "利空", "负面", "消极"]),
    (0.7, &["positive", "bullish", "利好", "正面", "积极"]),
];

pub const NEUTRAL_SCORE: f32 = 0.5;

/// Map a direction label to a score in `[0, 1]`; unknown labels are neutral.
pub fn impact_score(label: &str) -> f32 {
    let label = label.trim().to_lowercase();
    if label.is_empty() {
        return NEUTRAL_SCORE;
    }
    SCORE_RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| label.contains(k)))
        .map(|(score, _)| *score)
        .unwrap_or(NEUTRAL_SCORE)
}

/// Scores for the five charted markets, in display order.
pub fn market_scores(analysis: &AnalysisResult) -> Vec<(&'static str, f32)> {
    let d = &analysis.direction;
    vec![
        ("Stocks", impact_score(&d.stocks.overall)),
        ("Bonds", impact_score(&d.bonds.overall)),
        ("Commodities", impact_score(&d.commodities.overall)),
        ("Forex", impact_score(&d.forex.overall)),
        ("Crypto", impact_score(&d.crypto.overall)),
    ]
}

fn bar_class(score: f32) -> &'static str {
    if score > NEUTRAL_SCORE {
        "impact-fill impact-positive"
    } else if score < NEUTRAL_SCORE {
        "impact-fill impact-negative"
    } else {
        "impact-fill impact-neutral"
    }
}

#[component]
pub fn ImpactChart(analysis: AnalysisResult) -> impl IntoView {
    let scores = market_scores(&analysis);

    view! {
        <div class="impact-chart">
            <div class="impact-scale">
                <span>"Strongly negative"</span>
                <span>"Neutral"</span>
                <span>"Strongly positive"</span>
            </div>
            {scores.into_iter().map(|(market, score)| view! {
                <div class="impact-row">
                    <span class="impact-label">{market}</span>
                    <div class="impact-bar">
                        <div class=bar_class(score) style=format!("width: {:.0}%", score * 100.0)></div>
                    </div>
                    <span class="impact-value">{format!("{:.0}", score * 100.0)}</span>
                </div>
            }).collect::<Vec<_>>()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_labels() {
        assert_eq!(impact_score("positive"), 0.7);
        assert_eq!(impact_score("Negative"), 0.3);
        assert_eq!(impact_score("strongly positive"), 0.9);
        assert_eq!(impact_score("Strong negative"), 0.1);
        assert_eq!(impact_score("slightly positive"), 0.6);
        assert_eq!(impact_score("mildly negative"), 0.4);
        assert_eq!(impact_score("mixed"), 0.5);
    }

    #[test]
    fn test_chinese_labels() {
        assert_eq!(impact_score("强烈利好"), 0.9);
        assert_eq!(impact_score("利好"), 0.7);
        assert_eq!(impact_score("轻微利好"), 0.6);
        assert_eq!(impact_score("中性"), 0.5);
        assert_eq!(impact_score("小幅利空"), 0.4);
        assert_eq!(impact_score("负面"), 0.3);
        assert_eq!(impact_score("显著利空"), 0.1);
    }

    #[test]
    fn test_unknown_is_neutral() {
        assert_eq!(impact_score(""), NEUTRAL_SCORE);
        assert_eq!(impact_score("USD broadly stronger"), NEUTRAL_SCORE);
    }

    #[test]
    fn test_market_scores_order() {
        let mut analysis = AnalysisResult::default();
        analysis.direction.stocks.overall = "negative".into();
        analysis.direction.crypto.overall = "bullish".into();
        let scores = market_scores(&analysis);
        let labels: Vec<&str> = scores.iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["Stocks", "Bonds", "Commodities", "Forex", "Crypto"]);
        assert_eq!(scores[0].1, 0.3);
        assert_eq!(scores[1].1, NEUTRAL_SCORE);
        assert_eq!(scores[4].1, 0.7);
    }
}
