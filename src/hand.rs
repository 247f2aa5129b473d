use crate::{HandTiles, Tile, HAND_CAPACITY};

/// Describes the reason why a [tile](Tile) could not be removed from a [`Hand`].
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum HandError {
    /// Attempting to remove a [tile](Tile) which the player does not hold.
    NotFound {
        /// The index of the player.
        id: usize,
        /// The requested [tile](Tile).
        tile: Tile,
    },
}

/// The [tiles](Tile) held by one player and the points they have accumulated over the game.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Hand {
    /// The index of the player.
    id: usize,
    /// The held [tiles](Tile) in the order they were dealt or drawn.
    tiles: HandTiles,
    /// The points accumulated over every round so far.
    score: usize,
}

impl Hand {
    /// # Returns
    ///
    /// A [`Hand`] without [tiles](Tile) or points for the player at index `id`.
    pub fn new(id: usize) -> Hand {
        Hand {
            id,
            tiles: HandTiles::with_capacity(HAND_CAPACITY),
            score: 0,
        }
    }

    /// The index of the player.
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// The held [tiles](Tile).
    #[inline]
    pub fn tiles(&self) -> &HandTiles {
        &self.tiles
    }

    /// The points accumulated over every round so far.
    #[inline]
    pub fn score(&self) -> usize {
        self.score
    }

    /// The number of held [tiles](Tile).
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the player holds no [tiles](Tile).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// The sum of the [totals](Tile::total) of every held [tile](Tile).
    pub fn total(&self) -> usize {
        self.tiles.iter().map(Tile::total).sum()
    }

    /// Replaces every held [tile](Tile) at the start of a round.
    pub fn assign(&mut self, tiles: HandTiles) {
        self.tiles = tiles;
    }

    /// Appends a drawn [tile](Tile).
    pub fn add(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    /// Removes exactly one held [tile](Tile) equal to `tile`, keeping the order of the rest.
    ///
    /// # Errors
    ///
    /// * [HandError::NotFound] When no held [tile](Tile) is equal to `tile`.
    ///
    /// # Returns
    ///
    /// The removed [tile](Tile).
    pub fn remove(&mut self, tile: &Tile) -> Result<Tile, HandError> {
        let Some(index) = self.tiles.iter().position(|held| held == tile) else {
            return Err(HandError::NotFound {
                id: self.id,
                tile: *tile,
            });
        };
        Ok(self.tiles.remove(index))
    }

    /// Adds `points` to the accumulated score.
    pub fn add_points(&mut self, points: usize) {
        self.score += points;
    }
}
