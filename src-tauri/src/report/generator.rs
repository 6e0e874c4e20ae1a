//! Markdown report rendering.
//!
//! Rendering is a pure function of its inputs; the timestamp is passed in.

use chrono::NaiveDateTime;

use crate::analysis::types::{AnalysisResult, IndicatorSignal, MarketSignal};

pub const REPORT_TITLE: &str = "# Macro News Impact Analysis Report";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render the full report for one analysed news item.
///
/// List blocks are left out entirely when their list is empty, and the
/// advice section only appears for non-blank advice.
pub fn generate_report(
    news_text: &str,
    analysis: &AnalysisResult,
    advice: Option<&str>,
    generated_at: NaiveDateTime,
) -> String {
    let mut r = ReportWriter::default();
    let d = &analysis.direction;
    let m = &analysis.monitoring;

    r.line(REPORT_TITLE);
    r.blank();
    r.section("## Analyzed News", news_text);
    r.section("## Summary and Overall Impact", &analysis.summary);

    r.line("## 1. Impact Duration");
    r.field("Assessment", &analysis.duration.assessment);
    r.field("Explanation", &analysis.duration.explanation);
    r.field("Theory Support", &analysis.duration.theory_support);
    r.field("Modulating Factors", &analysis.duration.modulating_factors);
    r.blank();

    r.line("## 2. Impact Direction and Scope");
    r.blank();

    r.line("### Stock Market");
    r.field("Overall Impact", &d.stocks.overall);
    r.bullets(
        "Sector Impact",
        d.stocks.sectors.iter().map(|s| dash_entry(&s.sector, &s.impact, &s.reason)),
    );
    r.blank();

    r.line("### Bond Market");
    r.field("Overall Impact", &d.bonds.overall);
    r.field("Yield Curve", &d.bonds.yield_curve);
    r.field("Details", &d.bonds.details);
    r.blank();

    r.line("### Commodity Market");
    r.field("Overall Impact", &d.commodities.overall);
    r.bullets(
        "Commodity Impact",
        d.commodities.details.iter().map(|c| dash_entry(&c.kind, &c.impact, &c.reason)),
    );
    r.blank();

    r.line("### Forex Market");
    r.field("Overall Impact", &d.forex.overall);
    r.bullets(
        "Currency Pairs",
        d.forex.pairs.iter().map(|p| pair_entry(&p.pair, &p.impact, &p.magnitude)),
    );
    r.blank();

    r.line("### Crypto Market");
    r.field("Overall Impact", &d.crypto.overall);
    r.field("Details", &d.crypto.details);
    r.bullets(
        "Coin Impact",
        d.crypto.specific_coins.iter().map(|c| dash_entry(&c.coin, &c.impact, &c.reason)),
    );
    r.blank();

    r.section("### Cross-Market Transmission", &d.cross_market);

    r.line("## 3. Impact Magnitude");
    r.field("Overall Assessment", &analysis.magnitude.overall);
    r.field("Quantitative Estimate", &analysis.magnitude.quantitative);
    r.field("Historical Comparison", &analysis.magnitude.historical_comparison);
    r.field("Sensitivity Factors", &analysis.magnitude.sensitivity_factors);
    r.field("Surprise Scenarios", &analysis.magnitude.surprise_scenarios);
    r.blank();

    r.line("## 4. Impact Fade Indicators");
    r.blank();
    r.signal_block("### Technical Indicators", indicator_lines(&m.technical_indicators));
    r.signal_block("### Sentiment Indicators", indicator_lines(&m.sentiment_indicators));
    r.signal_block("### Related Markets", market_lines(&m.related_markets));
    r.field("Monitoring Window", &m.monitoring_window);
    r.field("Secondary Effects", &m.secondary_effects);
    r.field("Tail Risks", &m.tail_risks);

    if let Some(advice) = advice.filter(|a| !a.trim().is_empty()) {
        r.blank();
        r.line("## Investment Advice Summary");
        r.line(advice.trim_end());
    }

    r.blank();
    r.line("---");
    r.line(&format!(
        "*Report generated at: {}*",
        generated_at.format(TIMESTAMP_FORMAT)
    ));
    r.line("*Generated by MacroInsight*");

    r.finish()
}

/// `head: impact - reason`, without the dash when there is no reason.
fn dash_entry(head: &str, impact: &str, reason: &str) -> String {
    if reason.trim().is_empty() {
        format!("{}: {}", head, impact)
    } else {
        format!("{}: {} - {}", head, impact, reason)
    }
}

fn pair_entry(pair: &str, impact: &str, magnitude: &str) -> String {
    if magnitude.trim().is_empty() {
        format!("{}: {}", pair, impact)
    } else {
        format!("{}: {} ({})", pair, impact, magnitude)
    }
}

fn indicator_lines(items: &[IndicatorSignal]) -> Vec<String> {
    items
        .iter()
        .map(|i| dash_entry(&i.indicator, &i.threshold, &i.interpretation))
        .collect()
}

fn market_lines(items: &[MarketSignal]) -> Vec<String> {
    items
        .iter()
        .map(|s| dash_entry(&s.market, &s.signal, &s.interpretation))
        .collect()
}

#[derive(Default)]
struct ReportWriter {
    lines: Vec<String>,
}

impl ReportWriter {
    fn line(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    /// Heading, body text, blank line.
    fn section(&mut self, heading: &str, body: &str) {
        self.line(heading);
        self.line(body);
        self.blank();
    }

    fn field(&mut self, label: &str, value: &str) {
        self.lines.push(format!("- **{}:** {}", label, value));
    }

    /// Labelled nested bullet list; nothing at all when empty.
    fn bullets(&mut self, label: &str, items: impl Iterator<Item = String>) {
        let items: Vec<String> = items.collect();
        if items.is_empty() {
            return;
        }
        self.lines.push(format!("- **{}:**", label));
        for item in items {
            self.lines.push(format!("  - {}", item));
        }
    }

    /// Sub-heading with bullets; nothing at all when empty.
    fn signal_block(&mut self, heading: &str, items: Vec<String>) {
        if items.is_empty() {
            return;
        }
        self.line(heading);
        for item in items {
            self.lines.push(format!("- {}", item));
        }
        self.blank();
    }

    fn finish(self) -> String {
        let mut out = self.lines.join("\n");
        out.push('\n');
        out
    }
}
