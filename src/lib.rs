//! # InvestMate - a terminal social network for retail investors
//!
//! A community feed with polls and `@mentions`, a live discussion room,
//! clubs, a leaderboard and profiles, with simulated price charts and
//! optional generative-AI assistance. Built with ratatui.
//!
//! ## Architecture
//!
//! The application follows a clean architecture pattern:
//!
//! - **App**: Core application state and lifecycle management
//! - **UI**: Layout and rendering logic
//! - **Content**: Body tokenizer, mention autocomplete and polls
//! - **Market**: Quotes, simulated price series and live ticks
//! - **API**: AI collaborators with offline fallbacks
//! - **State**: Centralized state management
//! - **Events**: Input handling and event processing
//! - **Config**: Configuration management

pub mod api;
pub mod app;
pub mod config;
pub mod content;
pub mod error;
pub mod events;
pub mod market;
pub mod state;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
