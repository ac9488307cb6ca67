//! The 4x4 grid and its dealing rules.

use rand::{seq::SliceRandom, Rng};

use crate::{
    domain::{ImageId, Reveal, TileColor, TileId},
    error::GameError,
};

pub const GRID_SIDE: usize = 4;
pub const TILE_COUNT: usize = GRID_SIDE * GRID_SIDE;
pub const PAIR_COUNT: usize = TILE_COUNT / 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    pub image: ImageId,
    pub reveal: Reveal,
    pub color: TileColor,
}

impl Tile {
    fn fresh(id: TileId, image: ImageId) -> Self {
        Self {
            id,
            image,
            reveal: Reveal::Hidden,
            color: TileColor::Neutral,
        }
    }

    pub fn is_matched(&self) -> bool {
        self.color == TileColor::Matched
    }

    pub fn is_revealed(&self) -> bool {
        self.reveal == Reveal::Revealed
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    tiles: Vec<Tile>,
}

impl Board {
    /// Deals every image identity onto exactly two tiles in random order.
    pub fn deal<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut images: Vec<ImageId> = (0..PAIR_COUNT)
            .flat_map(|image| [ImageId(image), ImageId(image)])
            .collect();
        images.shuffle(rng);
        Self::from_images(images)
    }

    /// Builds a board from an explicit row-major layout, checking the pair invariant.
    pub fn from_layout(layout: &[ImageId]) -> Result<Self, GameError> {
        if layout.len() != TILE_COUNT {
            return Err(GameError::LayoutSize {
                expected: TILE_COUNT,
                actual: layout.len(),
            });
        }

        let mut counts = [0usize; PAIR_COUNT];
        for image in layout {
            match counts.get_mut(image.0) {
                Some(count) => *count += 1,
                None => {
                    return Err(GameError::UnpairedImage {
                        image: *image,
                        count: 1,
                    })
                }
            }
        }
        if let Some((image, count)) = counts
            .iter()
            .enumerate()
            .find(|(_, count)| **count != 2)
        {
            return Err(GameError::UnpairedImage {
                image: ImageId(image),
                count: *count,
            });
        }

        Ok(Self::from_images(layout.to_vec()))
    }

    fn from_images(images: Vec<ImageId>) -> Self {
        let tiles = images
            .into_iter()
            .enumerate()
            .map(|(index, image)| Tile::fresh(TileId(index), image))
            .collect();
        Self { tiles }
    }

    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        *self = Self::deal(rng);
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0)
    }

    pub(crate) fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id.0)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn layout(&self) -> Vec<ImageId> {
        self.tiles.iter().map(|tile| tile.image).collect()
    }

    pub fn copies_of(&self, image: ImageId) -> usize {
        self.tiles.iter().filter(|tile| tile.image == image).count()
    }
}

#[cfg(test)]
#[path = "tests/board_tests.rs"]
mod tests;
