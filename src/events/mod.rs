//! Event handling for InvestMate.
//!
//! Terminal input is polled by the [`EventHandler`], which maps key presses
//! to store actions according to the configured key bindings and the
//! current input mode.

mod handler;
mod input;

pub use handler::EventHandler;
pub use input::{InputEvent, Key, Modifiers};
