//! Events flowing from the window into the game controller.

use match_core::TileId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    TileClicked(TileId),
    Restart,
}

/// Work scheduled to run after the reveal delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredEvent {
    ResolveTurn,
}

impl DeferredEvent {
    pub fn name(self) -> &'static str {
        match self {
            DeferredEvent::ResolveTurn => "resolve_turn",
        }
    }
}
