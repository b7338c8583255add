use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViralityLevel {
    ViralPotential,
    Strong,
    Moderate,
    BelowAverage,
    Low,
}

impl ViralityLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            ViralityLevel::ViralPotential
        } else if score >= 70.0 {
            ViralityLevel::Strong
        } else if score >= 55.0 {
            ViralityLevel::Moderate
        } else if score >= 40.0 {
            ViralityLevel::BelowAverage
        } else {
            ViralityLevel::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViralityLevel::ViralPotential => "Viral Potential",
            ViralityLevel::Strong => "Strong",
            ViralityLevel::Moderate => "Moderate",
            ViralityLevel::BelowAverage => "Below Average",
            ViralityLevel::Low => "Low",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ViralityLevel::ViralPotential => {
                "High probability of significant reach beyond your followers"
            }
            ViralityLevel::Strong => {
                "Above average engagement expected, good out-of-network potential"
            }
            ViralityLevel::Moderate => {
                "Decent engagement within your network, limited viral potential"
            }
            ViralityLevel::BelowAverage => {
                "May underperform. Consider the optimization suggestions"
            }
            ViralityLevel::Low => "Likely to be buried. Significant improvements needed",
        }
    }
}

/// One decimal, rounded on the exact binary value of the `f64` quotient with
/// ties going up. So `1_250` is `1.3K` but `1_150` (1.1499...) is `1.1K`.
pub fn format_number(value: u64) -> String {
    if value >= 1_000_000 {
        with_suffix(value, 1_000_000, 'M')
    } else if value >= 1_000 {
        with_suffix(value, 1_000, 'K')
    } else {
        value.to_string()
    }
}

fn with_suffix(value: u64, unit: u64, suffix: char) -> String {
    let scaled = value as f64 / unit as f64;
    format!("{}{}", one_decimal(scaled), suffix)
}

fn one_decimal(value: f64) -> String {
    // 64 places covers the full expansion of any f64 at or above 1.
    let exact = format!("{:.64}", value);
    let (whole, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let mut digits = fraction.bytes().map(|digit| u64::from(digit - b'0'));
    let first = digits.next().unwrap_or(0);
    let round_up = digits.next().is_some_and(|digit| digit >= 5);

    let whole: u64 = whole.parse().unwrap_or(0);
    let tenths = whole * 10 + first + u64::from(round_up);
    format!("{}.{}", tenths / 10, tenths % 10)
}

pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.1$}", value, digits)
}
