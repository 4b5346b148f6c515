//! Simulated market data.
//!
//! - **Series**: OHLC generation per time range and live ticks
//! - **Live**: background tick task for the intraday chart
//! - **Quote**: quotes, news items and the offline fallback quote

pub mod live;
pub mod quote;
pub mod series;

pub use live::LiveFeed;
pub use quote::{NewsItem, Quote};
pub use series::{PricePoint, PriceSeries, RangeProfile, TimeRange};
