//! Turn/reveal state machine.
//!
//! A session only changes state through [`Session::click`], [`Session::resolve`]
//! and [`Session::restart`]. Timing is the caller's concern: after a second
//! click the session sits in [`Phase::Resolving`] until the caller decides the
//! reveal delay has passed and calls `resolve`.

use rand::Rng;
use tracing::{debug, info};

use crate::{
    board::{Board, Tile, TILE_COUNT},
    domain::{ImageId, Reveal, ScoreRules, Summary, TileColor, TileId},
    error::GameError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingFirst,
    FirstRevealed {
        first: TileId,
    },
    Resolving {
        first: TileId,
        second: TileId,
        matched: bool,
    },
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    FirstRevealed {
        tile: TileId,
        image: ImageId,
    },
    SecondRevealed {
        first: TileId,
        second: TileId,
        matched: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Continue { matched: bool },
    GameOver(Summary),
}

#[derive(Debug, Clone)]
pub struct Session {
    board: Board,
    rules: ScoreRules,
    score: i32,
    clicks: u32,
    remaining_tiles: usize,
    phase: Phase,
    epoch: u64,
}

impl Session {
    pub fn new(board: Board, rules: ScoreRules) -> Self {
        Self {
            board,
            rules,
            score: rules.starting_score,
            clicks: 0,
            remaining_tiles: TILE_COUNT,
            phase: Phase::AwaitingFirst,
            epoch: 0,
        }
    }

    pub fn start<R: Rng + ?Sized>(rng: &mut R, rules: ScoreRules) -> Self {
        Self::new(Board::deal(rng), rules)
    }

    pub fn click(&mut self, tile: TileId) -> Result<ClickOutcome, GameError> {
        let first = match self.phase {
            Phase::AwaitingFirst => None,
            Phase::FirstRevealed { first } => Some(first),
            Phase::Resolving { .. } => return Err(GameError::InputDisabled),
            Phase::Finished => return Err(GameError::GameOver),
        };

        let image = {
            let target = self.board.tile(tile).ok_or(GameError::UnknownTile(tile))?;
            if target.is_revealed() || target.is_matched() {
                return Err(GameError::TileUnavailable(tile));
            }
            target.image
        };

        self.clicks += 1;
        if self.clicks % 2 == 0 && self.turns() > self.rules.free_turns {
            self.score = self.score.saturating_sub(self.rules.turn_penalty);
        }
        self.set_reveal(tile, Reveal::Revealed);

        let Some(first) = first else {
            self.phase = Phase::FirstRevealed { first: tile };
            debug!(tile = tile.0, image = image.0, "first tile revealed");
            return Ok(ClickOutcome::FirstRevealed { tile, image });
        };

        let matched = self.board.tile(first).map(|t| t.image) == Some(image);
        if matched {
            self.remaining_tiles -= 2;
        }
        self.phase = Phase::Resolving {
            first,
            second: tile,
            matched,
        };
        debug!(
            first = first.0,
            second = tile.0,
            matched,
            turns = self.turns(),
            score = self.score,
            "second tile revealed"
        );
        Ok(ClickOutcome::SecondRevealed {
            first,
            second: tile,
            matched,
        })
    }

    /// Hides both revealed tiles, recolors them on a match, and reopens input
    /// unless the board is cleared.
    pub fn resolve(&mut self) -> Result<Resolution, GameError> {
        let Phase::Resolving {
            first,
            second,
            matched,
        } = self.phase
        else {
            return Err(GameError::NothingToResolve);
        };

        for id in [first, second] {
            if let Some(tile) = self.board.tile_mut(id) {
                tile.reveal = Reveal::Hidden;
                if matched {
                    tile.color = TileColor::Matched;
                }
            }
        }

        if self.remaining_tiles == 0 {
            self.phase = Phase::Finished;
            let summary = self.summary();
            info!(score = summary.score, turns = summary.turns, "game over");
            return Ok(Resolution::GameOver(summary));
        }

        self.phase = Phase::AwaitingFirst;
        if matched {
            info!(remaining = self.remaining_tiles, "pair matched");
        }
        Ok(Resolution::Continue { matched })
    }

    pub fn restart<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.board.reshuffle(rng);
        self.score = self.rules.starting_score;
        self.clicks = 0;
        self.remaining_tiles = TILE_COUNT;
        self.phase = Phase::AwaitingFirst;
        self.epoch = self.epoch.wrapping_add(1);
        info!(epoch = self.epoch, "game restarted");
    }

    fn set_reveal(&mut self, id: TileId, reveal: Reveal) {
        if let Some(tile) = self.board.tile_mut(id) {
            tile.reveal = reveal;
        }
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    /// Completed pairs.
    pub fn turns(&self) -> u32 {
        self.clicks / 2
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn remaining_tiles(&self) -> usize {
        self.remaining_tiles
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn accepts_input(&self) -> bool {
        matches!(self.phase, Phase::AwaitingFirst | Phase::FirstRevealed { .. })
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.board.tile(id)
    }

    pub fn tiles(&self) -> &[Tile] {
        self.board.tiles()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            score: self.score,
            turns: self.turns(),
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
