//! Periodic live-quote ticks for the intraday chart.

use crate::state::Action;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tokio_stream::StreamExt;
use tokio_stream::wrappers::IntervalStream;

/// Background task sending [`Action::LiveTick`] at a fixed period.
///
/// The task stops when the feed is dropped or the action channel closes.
#[derive(Debug)]
pub struct LiveFeed {
    symbol: String,
    handle: JoinHandle<()>,
}

impl LiveFeed {
    /// Start ticking for `symbol`. The first tick fires after one period.
    pub fn spawn(
        symbol: impl Into<String>,
        period: Duration,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        let symbol = symbol.into();
        let tick_symbol = symbol.clone();
        let period = period.max(Duration::from_millis(1));

        let handle = tokio::spawn(async move {
            let mut ticks = IntervalStream::new(interval_at(Instant::now() + period, period));
            while ticks.next().await.is_some() {
                if action_tx.send(Action::LiveTick(tick_symbol.clone())).is_err() {
                    break;
                }
            }
            tracing::debug!(symbol = %tick_symbol, "Live feed stopped");
        });

        tracing::debug!(symbol = %symbol, period_ms = period.as_millis() as u64, "Live feed started");
        Self { symbol, handle }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for LiveFeed {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_ticks_carry_symbol() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _feed = LiveFeed::spawn("$TCS", Duration::from_millis(10), tx);

        let action = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(action, Action::LiveTick(ref s) if s == "$TCS"));
    }

    #[tokio::test]
    async fn test_drop_stops_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let feed = LiveFeed::spawn("$TCS", Duration::from_millis(5), tx);
        tokio::time::sleep(Duration::from_millis(20)).await;
        drop(feed);

        // Let the abort land, then drain what was already queued.
        tokio::time::sleep(Duration::from_millis(20)).await;
        while rx.try_recv().is_ok() {}

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_closed_channel_ends_task() {
        let (tx, rx) = mpsc::unbounded_channel();
        let feed = LiveFeed::spawn("$TCS", Duration::from_millis(5), tx);
        drop(rx);

        tokio::time::timeout(Duration::from_secs(1), async {
            while feed.is_running() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();
    }
}
