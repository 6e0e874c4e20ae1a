use std::path::PathBuf;

use chrono::NaiveDate;
use macroinsight_tauri::analysis::extraction::parse_analysis;
use macroinsight_tauri::analysis::validation::validate_analysis;
use macroinsight_tauri::report::generate_report;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixture_path(name)).expect("Failed to read fixture")
}

#[test]
fn test_fixture_response_parses() {
    let analysis = parse_analysis(&fixture("model_response.md")).expect("Failed to parse fixture");

    assert!(analysis.summary.starts_with("The Federal Reserve raised"));
    assert_eq!(analysis.duration.assessment, "medium-term");
    assert_eq!(analysis.direction.bonds.yield_curve, "Bear flattening");
    assert_eq!(analysis.magnitude.overall, "high");

    // blank sector and bare-string coin are dropped
    assert_eq!(analysis.direction.stocks.sectors.len(), 2);
    assert_eq!(analysis.direction.crypto.specific_coins.len(), 1);
    assert_eq!(analysis.direction.commodities.details[1].kind, "Precious metals");

    assert_eq!(analysis.monitoring.technical_indicators.len(), 1);
    assert!(analysis.monitoring.sentiment_indicators.is_empty());
    assert!(analysis.monitoring.related_markets.is_empty());

    assert!(validate_analysis(&analysis).is_empty());
}

#[test]
fn test_fixture_report() {
    let analysis = parse_analysis(&fixture("model_response.md")).unwrap();
    let at = NaiveDate::from_ymd_opt(2024, 3, 20)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    let news = "Fed raises rates by 50bp";
    let report = generate_report(news, &analysis, Some("Shorten duration, keep some cash."), at);

    assert!(report.starts_with("# Macro News Impact Analysis Report\n\n## Analyzed News\nFed raises rates by 50bp\n"));
    assert!(report.contains("  - Banks: positive - Wider net interest margins"));
    assert!(report.contains("  - Precious metals: negative - Higher real yields"));
    assert!(report.contains("  - USD/JPY: appreciate (around 2%)"));
    assert!(report.contains("  - Bitcoin: negative - Liquidity sensitive"));
    assert!(!report.contains("Ethereum"));
    assert!(report.contains("### Technical Indicators\n- 2y Treasury yield: below 4.5% - Repricing has faded"));
    assert!(!report.contains("### Sentiment Indicators"));
    assert!(!report.contains("### Related Markets"));
    assert!(report.contains("- **Tail Risks:** Funding stress in regional banks."));
    assert!(report.contains("## Investment Advice Summary\nShorten duration, keep some cash."));
    assert!(report.contains("*Report generated at: 2024-03-20 09:30:00*"));

    // same inputs, same bytes
    assert_eq!(report, generate_report(news, &analysis, Some("Shorten duration, keep some cash."), at));
}

#[test]
fn test_truncated_fixture_fails() {
    let full = fixture("model_response.md");
    let cut = &full[..full.len() / 2];
    assert!(parse_analysis(cut).is_err());
}
