use leptos::prelude::*;

/// Colour level for duration and magnitude badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    High,
    Medium,
    Low,
    Unknown,
}

impl Level {
    fn class(self) -> &'static str {
        match self {
            Level::High => "level-badge level-high",
            Level::Medium => "level-badge level-medium",
            Level::Low => "level-badge level-low",
            Level::Unknown => "level-badge level-unknown",
        }
    }
}

/// Long-lasting impacts rank highest.
pub fn duration_level(assessment: &str) -> Level {
    let a = assessment.to_lowercase();
    if a.contains("long") || a.contains("长期") {
        Level::High
    } else if a.contains("medium") || a.contains("mid") || a.contains("中期") {
        Level::Medium
    } else if a.contains("short") || a.contains("短期") {
        Level::Low
    } else {
        Level::Unknown
    }
}

pub fn magnitude_level(overall: &str) -> Level {
    let o = overall.to_lowercase();
    if o.contains("high") || o.contains("高") {
        Level::High
    } else if o.contains("medium") || o.contains("moderate") || o.contains("中") {
        Level::Medium
    } else if o.contains("low") || o.contains("低") {
        Level::Low
    } else {
        Level::Unknown
    }
}

#[component]
pub fn LevelBadge(
    /// Text shown inside the badge, e.g. "medium-term"
    #[prop(into)]
    label: String,
    level: Level,
) -> impl IntoView {
    let text = if label.trim().is_empty() { "n/a".to_string() } else { label };
    view! { <span class=level.class()>{text}</span> }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_level() {
        assert_eq!(duration_level("long-term"), Level::High);
        assert_eq!(duration_level("Medium-term"), Level::Medium);
        assert_eq!(duration_level("short-term"), Level::Low);
        assert_eq!(duration_level("长期"), Level::High);
        assert_eq!(duration_level("短期"), Level::Low);
        assert_eq!(duration_level(""), Level::Unknown);
    }

    #[test]
    fn test_magnitude_level() {
        assert_eq!(magnitude_level("high"), Level::High);
        assert_eq!(magnitude_level("Moderate"), Level::Medium);
        assert_eq!(magnitude_level("low"), Level::Low);
        assert_eq!(magnitude_level("高"), Level::High);
        assert_eq!(magnitude_level("unclear"), Level::Unknown);
    }
}
