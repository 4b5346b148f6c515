//! Synthetic OHLC series anchored to a current price.
//!
//! Series are generated backward from the anchor so the newest close always
//! matches the quote the user sees, then returned oldest-first.

use chrono::{Local, NaiveDateTime, NaiveTime, TimeDelta};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Intraday candles start at the 9:15 market open.
const MARKET_OPEN: (u32, u32) = (9, 15);

/// Relative size of one live tick.
const LIVE_TICK_VOLATILITY: f64 = 0.0005;

/// Lowest price a simulated point may take.
const PRICE_FLOOR: f64 = 0.01;

/// Chart time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "6M")]
    SixMonths,
    #[serde(rename = "1Y")]
    OneYear,
}

/// Shape parameters of a range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeProfile {
    /// Number of candles.
    pub points: usize,
    /// Time between candles.
    pub spacing: TimeDelta,
    /// Relative size of random moves.
    pub volatility: f64,
}

impl TimeRange {
    pub const ALL: [TimeRange; 5] = [
        Self::OneDay,
        Self::OneWeek,
        Self::OneMonth,
        Self::SixMonths,
        Self::OneYear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::OneDay => "1D",
            Self::OneWeek => "1W",
            Self::OneMonth => "1M",
            Self::SixMonths => "6M",
            Self::OneYear => "1Y",
        }
    }

    pub fn profile(&self) -> RangeProfile {
        match self {
            Self::OneDay => RangeProfile {
                points: 40,
                spacing: TimeDelta::minutes(10),
                volatility: 0.002,
            },
            Self::OneWeek => RangeProfile {
                points: 35,
                spacing: TimeDelta::hours(1),
                volatility: 0.008,
            },
            Self::OneMonth => RangeProfile {
                points: 30,
                spacing: TimeDelta::days(1),
                volatility: 0.015,
            },
            Self::SixMonths => RangeProfile {
                points: 26,
                spacing: TimeDelta::weeks(1),
                volatility: 0.03,
            },
            Self::OneYear => RangeProfile {
                points: 52,
                spacing: TimeDelta::weeks(1),
                volatility: 0.04,
            },
        }
    }

    /// The shortest range, the only one with a live quote.
    pub fn is_intraday(&self) -> bool {
        *self == Self::OneDay
    }

    pub fn next(&self) -> Self {
        let i = Self::ALL.iter().position(|r| r == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Self {
        let i = Self::ALL.iter().position(|r| r == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn format_label(&self, at: NaiveDateTime) -> String {
        match self {
            Self::OneDay => at.format("%-H:%M").to_string(),
            Self::OneWeek => at.format("%d %b").to_string(),
            _ => at.format("%b %d").to_string(),
        }
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One candle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Axis label.
    pub label: String,
    /// Time of the candle.
    pub at: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl PricePoint {
    /// Close at or above open.
    pub fn is_bullish(&self) -> bool {
        self.close >= self.open
    }

    /// `low <= min(open, close)` and `high >= max(open, close)`.
    pub fn is_consistent(&self) -> bool {
        self.low <= self.open.min(self.close) && self.high >= self.open.max(self.close)
    }
}

/// Candles for a symbol over a range, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    symbol: String,
    range: TimeRange,
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Generate a series ending at `anchor_price` now.
    pub fn generate(
        symbol: impl Into<String>,
        range: TimeRange,
        anchor_price: f64,
        daily_change_percent: f64,
    ) -> Self {
        Self::generate_with(
            symbol,
            range,
            anchor_price,
            daily_change_percent,
            Local::now().naive_local(),
            &mut rand::rng(),
        )
    }

    /// Generate a series with an explicit clock and random source.
    pub fn generate_with<R: Rng + ?Sized>(
        symbol: impl Into<String>,
        range: TimeRange,
        anchor_price: f64,
        daily_change_percent: f64,
        now: NaiveDateTime,
        rng: &mut R,
    ) -> Self {
        let profile = range.profile();
        let volatility = profile.volatility;
        let drift = intraday_drift(range, anchor_price, daily_change_percent, profile.points);

        let mut points = Vec::with_capacity(profile.points);
        let mut base = anchor_price.max(PRICE_FLOOR);

        // i = 0 is the newest candle
        for i in 0..profile.points {
            let close = base;
            let change = (rng.random::<f64>() - 0.5) * volatility * base;
            let prev_close = (close - change - drift).max(PRICE_FLOOR);
            let open = prev_close;

            let high = open.max(close) * (1.0 + rng.random::<f64>() * volatility * 0.5);
            let low = open.min(close) * (1.0 - rng.random::<f64>() * volatility * 0.5);

            let at = candle_time(range, now, i, profile);
            points.push(PricePoint {
                label: range.format_label(at),
                at,
                open: round_cents(open),
                high: round_cents(high),
                low: round_cents(low),
                close: round_cents(close),
            });

            base = prev_close;
        }

        points.reverse();

        tracing::debug!(
            range = %range,
            points = points.len(),
            anchor = anchor_price,
            "Generated price series"
        );

        Self {
            symbol: symbol.into(),
            range,
            points,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Newest candle.
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Lowest low and highest high.
    pub fn price_bounds(&self) -> Option<(f64, f64)> {
        let low = self.points.iter().map(|p| p.low).reduce(f64::min)?;
        let high = self.points.iter().map(|p| p.high).reduce(f64::max)?;
        Some((low, high))
    }

    /// Move the newest close by a small random step, widening its high/low.
    ///
    /// Returns the new close, which becomes the anchor price.
    pub fn apply_tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<f64> {
        let last = self.points.last_mut()?;
        let step = last.close * LIVE_TICK_VOLATILITY;
        let movement = (rng.random::<f64>() - 0.5) * 2.0 * step;
        let close = round_cents((last.close + movement).max(PRICE_FLOOR));

        last.close = close;
        last.high = last.high.max(close);
        last.low = last.low.min(close);
        Some(close)
    }
}

/// Per-candle drift that makes the intraday series open near the previous
/// close implied by the day's change.
fn intraday_drift(range: TimeRange, anchor: f64, change_percent: f64, points: usize) -> f64 {
    let factor = 1.0 + change_percent / 100.0;
    if !range.is_intraday() || points == 0 || factor <= 0.0 || !factor.is_finite() {
        return 0.0;
    }
    let previous_close = anchor / factor;
    (anchor - previous_close) / points as f64
}

/// Timestamp of the candle `i` positions back from the newest.
fn candle_time(range: TimeRange, now: NaiveDateTime, i: usize, profile: RangeProfile) -> NaiveDateTime {
    let steps = i as i32;
    if range.is_intraday() {
        let open = NaiveTime::from_hms_opt(MARKET_OPEN.0, MARKET_OPEN.1, 0).unwrap_or_default();
        let from_open = profile.spacing * (profile.points as i32 - 1 - steps);
        now.date().and_time(open) + from_open
    } else {
        now - profile.spacing * steps
    }
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 18)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    fn series(range: TimeRange, seed: u64) -> PriceSeries {
        let mut rng = StdRng::seed_from_u64(seed);
        PriceSeries::generate_with("$INFY", range, 1450.20, 1.5, fixed_now(), &mut rng)
    }

    #[test]
    fn test_every_point_is_consistent() {
        for range in TimeRange::ALL {
            for seed in 0..20 {
                let s = series(range, seed);
                assert!(
                    s.points().iter().all(PricePoint::is_consistent),
                    "range {range} seed {seed}"
                );
            }
        }
    }

    #[test]
    fn test_length_matches_profile() {
        for range in TimeRange::ALL {
            assert_eq!(series(range, 7).len(), range.profile().points);
        }
    }

    #[test]
    fn test_chronological_order() {
        for range in TimeRange::ALL {
            let s = series(range, 3);
            assert!(
                s.points().windows(2).all(|w| w[0].at < w[1].at),
                "range {range}"
            );
        }
    }

    #[test]
    fn test_newest_close_is_anchor() {
        for range in TimeRange::ALL {
            assert_eq!(series(range, 11).last().unwrap().close, 1450.20);
        }
    }

    #[test]
    fn test_each_open_is_previous_close() {
        let s = series(TimeRange::OneMonth, 5);
        for w in s.points().windows(2) {
            assert_eq!(w[1].open, w[0].close);
        }
    }

    #[test]
    fn test_intraday_labels_run_from_market_open() {
        let s = series(TimeRange::OneDay, 1);
        assert_eq!(s.points()[0].label, "9:15");
        assert_eq!(s.points()[1].label, "9:25");
        assert_eq!(s.last().unwrap().label, "15:45");
    }

    #[test]
    fn test_daily_labels_count_back_from_today() {
        let s = series(TimeRange::OneMonth, 1);
        assert_eq!(s.last().unwrap().label, "Mar 18");
        assert_eq!(s.points()[s.len() - 2].label, "Mar 17");

        let w = series(TimeRange::OneWeek, 1);
        assert_eq!(w.last().unwrap().label, "18 Mar");
    }

    #[test]
    fn test_intraday_change_shapes_the_open() {
        let mut rng = StdRng::seed_from_u64(42);
        let s = PriceSeries::generate_with("$X", TimeRange::OneDay, 1000.0, 50.0, fixed_now(), &mut rng);
        // Previous close implied by +50% is ~666.67; noise is well under 10%.
        assert!(s.points()[0].open < 750.0);
    }

    #[test]
    fn test_tiny_anchor_stays_positive() {
        let mut rng = StdRng::seed_from_u64(9);
        let s = PriceSeries::generate_with("$PENNY", TimeRange::OneYear, 0.02, 0.0, fixed_now(), &mut rng);
        assert!(s.points().iter().all(|p| p.low >= 0.0 && p.is_consistent()));
    }

    #[test]
    fn test_live_tick_only_touches_last_point() {
        let mut s = series(TimeRange::OneDay, 21);
        let before = s.points()[..s.len() - 1].to_vec();
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..50 {
            let close = s.apply_tick(&mut rng).unwrap();
            let last = s.last().unwrap();
            assert_eq!(last.close, close);
            assert!(last.is_consistent());
        }

        assert_eq!(&s.points()[..s.len() - 1], before.as_slice());
    }

    #[test]
    fn test_live_tick_step_is_small() {
        let mut s = series(TimeRange::OneDay, 2);
        let previous = s.last().unwrap().close;
        let close = s.apply_tick(&mut StdRng::seed_from_u64(4)).unwrap();
        assert!((close - previous).abs() <= previous * LIVE_TICK_VOLATILITY + 0.01);
    }

    #[test]
    fn test_price_bounds() {
        let s = series(TimeRange::SixMonths, 8);
        let (low, high) = s.price_bounds().unwrap();
        assert!(s.points().iter().all(|p| p.low >= low && p.high <= high));
    }

    #[test]
    fn test_range_cycling() {
        assert_eq!(TimeRange::OneDay.next(), TimeRange::OneWeek);
        assert_eq!(TimeRange::OneYear.next(), TimeRange::OneDay);
        assert_eq!(TimeRange::OneDay.prev(), TimeRange::OneYear);
        assert!(TimeRange::OneDay.is_intraday());
        assert!(!TimeRange::OneMonth.is_intraday());
    }
}
