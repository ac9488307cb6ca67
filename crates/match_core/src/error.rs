use thiserror::Error;

use crate::domain::{ImageId, TileId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("tile {0} is outside the board")]
    UnknownTile(TileId),
    #[error("tile {0} is already revealed or matched")]
    TileUnavailable(TileId),
    #[error("input is disabled until the current turn resolves")]
    InputDisabled,
    #[error("game is over; restart to play again")]
    GameOver,
    #[error("no turn is waiting to be resolved")]
    NothingToResolve,
    #[error("layout must hold {expected} tiles, got {actual}")]
    LayoutSize { expected: usize, actual: usize },
    #[error("image {image} appears {count} times; every image must appear exactly twice")]
    UnpairedImage { image: ImageId, count: usize },
}

impl GameError {
    /// Rejections the UI treats as an ignored click rather than a fault.
    pub fn is_ignored_click(&self) -> bool {
        matches!(
            self,
            GameError::TileUnavailable(_) | GameError::InputDisabled | GameError::GameOver
        )
    }
}
