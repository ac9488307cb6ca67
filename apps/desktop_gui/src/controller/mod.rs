//! Controller layer: UI events, the game reducer, and deferred-event scheduling.

pub mod events;
pub mod orchestration;
pub mod reducer;

pub use reducer::GameController;
