use crate::{Directions, Layout, PlayableTile, Placements, Tile};
use itertools::Itertools;

impl Layout {
    /// Lists the legal [directions](crate::Direction) of every [tile](Tile) in a hand.
    ///
    /// At the start of a fresh round, only the largest double in the hand may be played, so
    /// every other [tile](Tile) is left without [directions](crate::Direction).
    ///
    /// # Arguments
    ///
    /// * `hand`: The [tiles](Tile) held by the current player.
    /// * `play_fresh`: Whether the round has to be opened with the largest double.
    ///
    /// # Returns
    ///
    /// One [PlayableTile] for every [tile](Tile) in `hand`, in the same order.
    pub fn placements_for_hand(&self, hand: &[Tile], play_fresh: bool) -> Placements {
        let largest_double = if play_fresh {
            hand.iter()
                .filter(|tile| tile.is_double())
                .map(Tile::big)
                .max()
        } else {
            None
        };

        hand.iter()
            .enumerate()
            .map(|(index, tile)| {
                let eligible =
                    !play_fresh || (tile.is_double() && Some(tile.big()) == largest_double);
                PlayableTile {
                    index,
                    tile: *tile,
                    directions: if eligible {
                        self.valid_directions(tile)
                    } else {
                        Directions::new()
                    },
                }
            })
            .collect()
    }
}

/// # Returns
///
/// The indexes of every [playable](PlayableTile::is_playable) [tile](Tile) in `placements`.
pub fn playable_indexes(placements: &[PlayableTile]) -> Vec<usize> {
    placements
        .iter()
        .filter(|placement| placement.is_playable())
        .map(|placement| placement.index)
        .collect_vec()
}
