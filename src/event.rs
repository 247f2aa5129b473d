use crate::{HandTiles, PlacementView, Points};

/// Who an event is sent to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Scope {
    /// Every player.
    All,
    /// Only the player at the index. Used for private information such as hand contents.
    Player(usize),
}

impl Scope {
    /// Whether the player at `index` receives events sent with this [`Scope`].
    #[inline]
    pub fn includes(self, index: usize) -> bool {
        match self {
            Scope::All => true,
            Scope::Player(player) => player == index,
        }
    }
}

/// One-way notifications about state changes. The game stays correct when they are dropped
/// or duplicated.
///
/// # See Also
///
/// * [Player::notify](crate::Player::notify)
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum GameEvent {
    /// A round was dealt.
    NewRound {
        /// The number of the round, starting from `1`.
        round: usize,
        /// The index of the player who opens it.
        first_player: usize,
        /// Whether it has to be opened with the highest double.
        fresh: bool,
    },
    /// The [tiles](crate::Tile) of a player. Private.
    Hand {
        /// The held [tiles](crate::Tile).
        tiles: HandTiles,
    },
    /// It is the turn of `player`.
    Turn {
        /// The index of the current player.
        player: usize,
    },
    /// The indexes of the [tiles](crate::Tile) the current player may place. Private.
    PlayableTiles {
        /// Indexes into the hand of the current player.
        indexes: Vec<usize>,
    },
    /// A [tile](crate::Tile) was placed.
    TilePlaced {
        /// The index of the player who placed it.
        player: usize,
        /// How the placed [tile](crate::Tile) should be shown.
        placement: PlacementView,
        /// The points earned by the placement.
        points: usize,
    },
    /// A player drew a [tile](crate::Tile).
    Drew {
        /// The index of the player.
        player: usize,
        /// The number of [tiles](crate::Tile) left to draw.
        pack_len: usize,
    },
    /// A player had to draw from an empty [pack](crate::Pack).
    PackEmpty {
        /// The index of the player.
        player: usize,
    },
    /// A player passed.
    Passed {
        /// The index of the player.
        player: usize,
    },
    /// A player gave no response and lost their turn.
    Forfeited {
        /// The index of the player.
        player: usize,
    },
    /// The accumulated score of every player.
    Scores {
        /// One score for each player.
        points: Points,
    },
    /// A player went out.
    Dominoed {
        /// The index of the player.
        player: usize,
        /// The value on domino they earned.
        points: usize,
    },
    /// Every player passed in a row.
    Blocked {
        /// The index of the player with the strictly lowest hand total, if any.
        scorer: Option<usize>,
        /// The points earned by `scorer`.
        points: usize,
    },
    /// Some player reached the win threshold.
    GameOver {
        /// The index of the first player with the highest score.
        winner: usize,
    },
    /// A human readable line describing what happened.
    Log {
        /// The line.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_all_includes_everyone() {
        for index in 0..4 {
            assert!(Scope::All.includes(index));
        }
    }

    #[test]
    fn scope_player_includes_only_player() {
        let scope = Scope::Player(2);

        assert!(scope.includes(2));
        assert!(!scope.includes(0));
        assert!(!scope.includes(3));
    }
}
