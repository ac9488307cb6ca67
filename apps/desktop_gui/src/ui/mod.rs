//! UI layer: the game window and board painting.

pub mod app;
pub mod board;

pub use app::MatchGameApp;
