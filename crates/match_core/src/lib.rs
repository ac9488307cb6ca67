//! Rules of the matching game: the dealt board, turn state machine, and scoring.

pub mod board;
pub mod domain;
pub mod error;
pub mod session;

pub use board::{Board, Tile, GRID_SIDE, PAIR_COUNT, TILE_COUNT};
pub use domain::{
    ImageId, PlayerColor, Reveal, ScoreRules, Summary, TileColor, TileId, NEUTRAL_RGB,
};
pub use error::GameError;
pub use session::{ClickOutcome, Phase, Resolution, Session};
