use crate::{Direction, Hand, Tile, HAND_CAPACITY, PLAYER_CAPACITY};
use smallvec::SmallVec;

/// A vector of [tiles](Tile) held by one player. Indexes are stable between draws and plays
/// so that players can pick a [tile](Tile) by its index.
///
/// # See Also
///
/// * [Tile]
/// * [HAND_CAPACITY]
/// * [Hand]
pub type HandTiles = SmallVec<[Tile; HAND_CAPACITY]>;
/// A vector of [hands](Hand) for each player.
///
/// # See Also
///
/// * [Hand]
/// * [PLAYER_CAPACITY]
/// * [RoundEngine](crate::RoundEngine)
pub type Hands = SmallVec<[Hand; PLAYER_CAPACITY]>;
/// A vector of points for each player.
///
/// # See Also
///
/// * [PLAYER_CAPACITY]
/// * [RoundEngine::scores](crate::RoundEngine::scores)
/// * [RoundView](crate::RoundView)
pub type Points = SmallVec<[usize; PLAYER_CAPACITY]>;
/// A vector of hand lengths.
///
/// # See Also
///
/// * [Hands]
/// * [PLAYER_CAPACITY]
/// * [RoundView](crate::RoundView)
pub type HandLens = SmallVec<[usize; PLAYER_CAPACITY]>;
/// The legal [directions](Direction) for a single [tile](Tile). At most one for each arm.
///
/// # See Also
///
/// * [Layout::valid_directions](crate::Layout::valid_directions)
/// * [PlayableTile]
pub type Directions = SmallVec<[Direction; Direction::ARMS_LEN]>;
/// One entry for every [tile](Tile) in a hand with its legal [directions](Direction), which are
/// empty when the [tile](Tile) cannot be played.
///
/// # See Also
///
/// * [PlayableTile]
/// * [Layout::placements_for_hand](crate::Layout::placements_for_hand)
/// * [RoundEngine::placements](crate::RoundEngine::placements)
pub type Placements = SmallVec<[PlayableTile; HAND_CAPACITY]>;

/// A [tile](Tile) in a hand paired with the [directions](Direction) it may legally be placed in.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct PlayableTile {
    /// The index of the [tile](Tile) in its hand.
    pub index: usize,
    /// The [tile](Tile) at `index`.
    pub tile: Tile,
    /// Every legal [direction](Direction). Empty when the [tile](Tile) cannot be played.
    pub directions: Directions,
}

impl PlayableTile {
    /// Whether the [tile](Tile) can be placed anywhere.
    #[inline]
    pub fn is_playable(&self) -> bool {
        !self.directions.is_empty()
    }
}

/// A choice of [tile](Tile) made by a player, and the [direction](Direction) to place it in when
/// more than one is legal.
///
/// # See Also
///
/// * [RoundEngine::play](crate::RoundEngine::play)
/// * [Player::request_move](crate::Player::request_move)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MoveChoice {
    /// The index of the chosen [tile](Tile) in the player's hand.
    pub tile_index: usize,
    /// The chosen [direction](Direction). May be omitted when exactly one is legal.
    pub direction: Option<Direction>,
}
