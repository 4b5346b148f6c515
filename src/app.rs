//! Main application module.
//!
//! This module contains the main `App` struct that coordinates
//! the event loop, state management, and rendering.

use crate::api::Collaborators;
use crate::config::Config;
use crate::error::Result;
use crate::events::EventHandler;
use crate::state::{Action, SeedData, Store, View};
use crate::ui::Ui;

use crossterm::{
    event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;

/// The main application.
pub struct App {
    /// Terminal.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Application store.
    store: Store,
    /// Event handler.
    event_handler: EventHandler,
    /// Action receiver.
    action_rx: mpsc::UnboundedReceiver<Action>,
    /// Performs requested side effects.
    effects: Effects,
    /// Whether mouse capture was enabled.
    mouse_capture: bool,
}

impl App {
    /// Create a new application.
    pub fn new(config: Config) -> Result<Self> {
        // Set up terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
        if config.ui.mouse_support {
            execute!(stdout, EnableMouseCapture)?;
        }
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        // Create action channel
        let (action_tx, action_rx) = mpsc::unbounded_channel();

        let collaborators = Collaborators::from_config(&config.ai);

        // Create store
        let mut store = Store::new(SeedData::default(), &config, action_tx.clone());
        store.reduce(Action::SetOnline(collaborators.is_online()));

        // Create event handler
        let event_handler = EventHandler::new(
            config.keybindings.clone(),
            Duration::from_millis(config.ui.tick_rate_ms.max(10)),
        );

        let effects = Effects::new(
            collaborators,
            action_tx,
            Duration::from_millis(config.ui.chat_reply_delay_ms),
        );

        Ok(Self {
            terminal,
            store,
            event_handler,
            action_rx,
            effects,
            mouse_capture: config.ui.mouse_support,
        })
    }

    /// Run the application event loop.
    pub async fn run(&mut self) -> Result<()> {
        // Open the feed, which requests the first chart
        self.store.dispatch(Action::SetView(View::Feed))?;

        // Main event loop
        loop {
            // Update event handler with current state
            self.event_handler.update_store_snapshot(&self.store);

            // Render UI
            self.terminal.draw(|frame| {
                Ui::render(frame, &self.store);
            })?;

            // Handle events and actions
            tokio::select! {
                // Handle terminal events
                result = self.event_handler.next() => {
                    if let Some(action) = result? {
                        self.handle_action(action);
                    }
                }

                // Handle actions from the channel
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                }
            }

            // Check if we should quit
            if self.store.app.should_quit {
                break;
            }
        }

        tracing::info!("Shutting down");
        Ok(())
    }

    /// Handle an action.
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::RequestAnalysis { post_id, content } => self.effects.analyze(post_id, content),
            Action::RequestQuote(symbol) => self.effects.quote(symbol),
            Action::RequestSummary(lines) => self.effects.summarize(lines),
            Action::ScheduleChatReply => self.effects.schedule_chat_reply(),
            action => {
                // Let the store handle the action
                self.store.reduce(action);
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        // Restore terminal state
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableBracketedPaste
        );
        if self.mouse_capture {
            let _ = execute!(self.terminal.backend_mut(), DisableMouseCapture);
        }
        let _ = self.terminal.show_cursor();
    }
}

/// Runs collaborator calls and timers off the UI loop, answering each with a
/// completion action.
#[derive(Clone)]
pub struct Effects {
    collaborators: Collaborators,
    action_tx: mpsc::UnboundedSender<Action>,
    chat_reply_delay: Duration,
}

impl Effects {
    pub fn new(
        collaborators: Collaborators,
        action_tx: mpsc::UnboundedSender<Action>,
        chat_reply_delay: Duration,
    ) -> Self {
        Self {
            collaborators,
            action_tx,
            chat_reply_delay,
        }
    }

    /// Analyze a post's sentiment.
    pub fn analyze(&self, post_id: String, content: String) {
        let analyzer = self.collaborators.analyzer.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            tracing::debug!(post_id = %post_id, "Analyzing post");
            let analysis = analyzer.analyze(&content).await;
            send(&tx, Action::AnalysisLoaded { post_id, analysis });
        });
    }

    /// Look up the quote and news for a ticker concurrently.
    pub fn quote(&self, symbol: String) {
        let market = self.collaborators.market.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let (quote, news) = futures::join!(market.quote(&symbol), market.news(&symbol));
            tracing::debug!(symbol = %symbol, found = quote.is_some(), headlines = news.len(), "Quote lookup finished");
            send(&tx, Action::QuoteLoaded { symbol, quote, news });
        });
    }

    /// Summarize the chat log.
    pub fn summarize(&self, lines: Vec<String>) {
        let summarizer = self.collaborators.summarizer.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let summary = summarizer.summarize(&lines).await;
            send(&tx, Action::SummaryLoaded(summary));
        });
    }

    /// Deliver a simulated reply after the configured delay.
    pub fn schedule_chat_reply(&self) {
        let delay = self.chat_reply_delay;
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            send(&tx, Action::ChatReply);
        });
    }
}

fn send(tx: &mpsc::UnboundedSender<Action>, action: Action) {
    if tx.send(action).is_err() {
        tracing::debug!("Action channel closed before an effect completed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        Analysis, MockChatSummarizer, MockMarketLookup, MockSentimentAnalyzer, Sentiment,
    };
    use crate::market::{NewsItem, Quote};
    use std::sync::Arc;

    fn effects(
        analyzer: MockSentimentAnalyzer,
        summarizer: MockChatSummarizer,
        market: MockMarketLookup,
        delay: Duration,
    ) -> (Effects, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let collaborators =
            Collaborators::new(Arc::new(analyzer), Arc::new(summarizer), Arc::new(market));
        (Effects::new(collaborators, tx, delay), rx)
    }

    #[tokio::test]
    async fn test_analysis_is_delivered() {
        let mut analyzer = MockSentimentAnalyzer::new();
        analyzer
            .expect_analyze()
            .withf(|text| text.contains("$INFY"))
            .times(1)
            .returning(|_| Analysis {
                sentiment: Sentiment::Bullish,
                risk: "Weak guidance".to_string(),
                summary: "Long IT.".to_string(),
            });
        let (effects, mut rx) = effects(
            analyzer,
            MockChatSummarizer::new(),
            MockMarketLookup::new(),
            Duration::ZERO,
        );

        effects.analyze("101".to_string(), "Buying $INFY".to_string());

        match rx.recv().await {
            Some(Action::AnalysisLoaded { post_id, analysis }) => {
                assert_eq!(post_id, "101");
                assert_eq!(analysis.sentiment, Sentiment::Bullish);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_quote_joins_quote_and_news() {
        let mut market = MockMarketLookup::new();
        market.expect_quote().returning(|_| {
            Some(Quote {
                price: 1450.2,
                change_percent: 1.2,
                currency: "INR".to_string(),
            })
        });
        market.expect_news().returning(|_| {
            vec![NewsItem {
                title: "IT stocks rally".to_string(),
                source: "Mint".to_string(),
                time_ago: "1h ago".to_string(),
                url: None,
            }]
        });
        let (effects, mut rx) = effects(
            MockSentimentAnalyzer::new(),
            MockChatSummarizer::new(),
            market,
            Duration::ZERO,
        );

        effects.quote("$INFY".to_string());

        match rx.recv().await {
            Some(Action::QuoteLoaded { symbol, quote, news }) => {
                assert_eq!(symbol, "$INFY");
                assert_eq!(quote.map(|q| q.price), Some(1450.2));
                assert_eq!(news.len(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_summary_is_delivered() {
        let mut summarizer = MockChatSummarizer::new();
        summarizer
            .expect_summarize()
            .withf(|lines| lines.len() == 2)
            .returning(|_| "- Resistance at 44500".to_string());
        let (effects, mut rx) = effects(
            MockSentimentAnalyzer::new(),
            summarizer,
            MockMarketLookup::new(),
            Duration::ZERO,
        );

        effects.summarize(vec!["a: one".to_string(), "b: two".to_string()]);

        assert!(matches!(
            rx.recv().await,
            Some(Action::SummaryLoaded(s)) if s == "- Resistance at 44500"
        ));
    }

    #[tokio::test]
    async fn test_chat_reply_waits_for_delay() {
        let (effects, mut rx) = effects(
            MockSentimentAnalyzer::new(),
            MockChatSummarizer::new(),
            MockMarketLookup::new(),
            Duration::from_millis(50),
        );

        effects.schedule_chat_reply();
        assert!(rx.try_recv().is_err());

        let reply = tokio::time::timeout(Duration::from_secs(2), rx.recv()).await;
        assert!(matches!(reply, Ok(Some(Action::ChatReply))));
    }
}
