//! Quotes and market news.

use crate::config::ChartConfig;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Latest price of a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub price: f64,
    #[serde(default)]
    pub change_percent: f64,
    /// Empty when the lookup did not name one.
    #[serde(default)]
    pub currency: String,
}

impl Quote {
    /// Random but plausible quote used when the lookup has nothing.
    pub fn fallback<R: Rng + ?Sized>(config: &ChartConfig, rng: &mut R) -> Self {
        let (min, max) = (config.fallback_price_min, config.fallback_price_max);
        let price = if max > min {
            rng.random_range(min..max)
        } else {
            min
        };

        Self {
            price: (price * 100.0).round() / 100.0,
            change_percent: ((rng.random::<f64>() * 4.0 - 2.0) * 100.0).round() / 100.0,
            currency: config.fallback_currency.clone(),
        }
    }

    /// Whether the day is up.
    pub fn is_up(&self) -> bool {
        self.change_percent >= 0.0
    }

    /// Price with its currency sign, e.g. `₹1,450.20`.
    pub fn display_price(&self) -> String {
        format!("{}{}", currency_symbol(&self.currency), group_thousands(self.price))
    }

    /// Signed change, e.g. `+1.25%`.
    pub fn display_change(&self) -> String {
        format!("{:+.2}%", self.change_percent)
    }
}

/// A market headline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub title: String,
    pub source: String,
    /// Relative publication time, e.g. "2h ago".
    pub time_ago: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Display sign for an ISO currency code.
pub fn currency_symbol(code: &str) -> String {
    match code.to_ascii_uppercase().as_str() {
        "INR" => "₹".to_string(),
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "JPY" => "¥".to_string(),
        other => format!("{other} "),
    }
}

fn group_thousands(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (whole, fraction) = formatted.split_once('.').unwrap_or((&formatted, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_fallback_stays_in_configured_band() {
        let config = ChartConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..200 {
            let quote = Quote::fallback(&config, &mut rng);
            assert!(quote.price >= 1000.0 && quote.price <= 1500.0);
            assert!(quote.change_percent >= -2.0 && quote.change_percent <= 2.0);
            assert_eq!(quote.currency, "INR");
        }
    }

    #[test]
    fn test_fallback_with_degenerate_band() {
        let config = ChartConfig {
            fallback_price_min: 50.0,
            fallback_price_max: 50.0,
            ..ChartConfig::default()
        };
        let quote = Quote::fallback(&config, &mut StdRng::seed_from_u64(2));
        assert_eq!(quote.price, 50.0);
    }

    #[test]
    fn test_display() {
        let quote = Quote {
            price: 1234567.891,
            change_percent: -0.5,
            currency: "INR".to_string(),
        };
        assert_eq!(quote.display_price(), "₹1,234,567.89");
        assert_eq!(quote.display_change(), "-0.50%");
        assert!(!quote.is_up());

        let usd = Quote {
            price: 999.0,
            change_percent: 1.0,
            currency: "USD".to_string(),
        };
        assert_eq!(usd.display_price(), "$999.00");
        assert_eq!(usd.display_change(), "+1.00%");
    }

    #[test]
    fn test_unknown_currency_uses_code() {
        assert_eq!(currency_symbol("chf"), "CHF ");
    }
}
