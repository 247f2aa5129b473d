use crate::{tiles, tiles_len, HandTiles, Tile};
use rand::Rng;

/// The draw pile. Holds every [tile](Tile) of a set that hasn't been dealt or drawn yet.
///
/// A fresh [`Pack`] is created for every round.
#[derive(Debug, Clone)]
pub struct Pack {
    tiles: Vec<Tile>,
}

impl Pack {
    /// # Returns
    ///
    /// A full [`Pack`] with one of every [tile](Tile) with at most `max_pips` pips on either end.
    pub fn new(max_pips: u8) -> Pack {
        let mut pack = Vec::with_capacity(tiles_len(max_pips));
        pack.extend(tiles(max_pips));
        Pack { tiles: pack }
    }

    /// The number of [tiles](Tile) left.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether every [tile](Tile) has been drawn.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Removes one [tile](Tile) chosen uniformly at random.
    ///
    /// # Returns
    ///
    /// The drawn [tile](Tile), or [None] when the [`Pack`] is empty.
    pub fn draw_one<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Tile> {
        if self.tiles.is_empty() {
            return None;
        }
        // order inside the pack carries no meaning
        Some(self.tiles.swap_remove(rng.gen_range(0..self.tiles.len())))
    }

    /// Removes `n` [tiles](Tile) chosen uniformly at random without replacement.
    ///
    /// # Returns
    ///
    /// The drawn [tiles](Tile) in no particular order, or [None] when fewer than `n` remain, in
    /// which case nothing is removed.
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R, n: usize) -> Option<HandTiles> {
        if n > self.tiles.len() {
            return None;
        }
        (0..n).map(|_| self.draw_one(rng)).collect()
    }
}

#[cfg(test)]
impl Pack {
    /// Generates a [`Pack`] holding exactly `tiles`.
    pub fn from_tiles(tiles: impl IntoIterator<Item = Tile>) -> Pack {
        Pack {
            tiles: tiles.into_iter().collect(),
        }
    }
}
