use crate::{
    tiles_len, DEFAULT_HAND_LEN, DEFAULT_MAX_PIPS, DEFAULT_PLAYERS_LEN, DEFAULT_WIN_THRESHOLD,
    DOUBLES_LIMIT, PIPS_LIMIT,
};
use std::collections::HashSet;

/// Describes how many times a player without a playable [tile](crate::Tile) may draw before
/// being forced to pass.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum DrawRule {
    /// A single draw, then the player plays the drawn [tile](crate::Tile) if it fits
    /// or passes.
    #[default]
    Once,
    /// Draw until a [tile](crate::Tile) fits or the [pack](crate::Pack) is empty.
    UntilPlayable,
}

/// Describes the reason why a [`GameConfig`] cannot start a game.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum ConfigError {
    /// Fewer than two players.
    NotEnoughPlayers {
        /// The requested number of players.
        players_len: usize,
    },
    /// Dealing no [tiles](crate::Tile) to each player.
    EmptyHands,
    /// The [pack](crate::Pack) cannot deal every hand.
    NotEnoughTiles {
        /// `players_len * hand_len`.
        requested_tiles: usize,
        /// The number of [tiles](crate::Tile) in a full [pack](crate::Pack).
        tiles_in_pack: usize,
    },
    /// More pips than [tiles](crate::Tile) support.
    PipsOutOfBounds {
        /// The requested number of pips.
        max_pips: u8,
        /// [PIPS_LIMIT].
        limit: u8,
    },
    /// A win threshold of `0` would end the game before it starts.
    EmptyWinThreshold,
    /// With the double distribution check, so many doubles would have to be dealt that some
    /// hand always holds at least [DOUBLES_LIMIT] of them.
    DoublesUndistributable {
        /// The least number of doubles which end up in hands.
        dealt_doubles: usize,
        /// The requested number of players.
        players_len: usize,
    },
}

/// The parameters of a game, fixed when the game is created.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct GameConfig {
    /// The number of players.
    pub players_len: usize,
    /// The number of [tiles](crate::Tile) dealt to each player.
    pub hand_len: usize,
    /// The game ends after a round in which some player reaches this score.
    pub win_threshold: usize,
    /// The highest number of pips on either end of a [tile](crate::Tile). `6` for double-six.
    pub max_pips: u8,
    /// Whether to re-deal when any hand holds at least [DOUBLES_LIMIT] doubles.
    pub enforce_double_distribution: bool,
    /// How many times a player may draw before passing.
    pub draw_rule: DrawRule,
    /// Seeds the random number generator of the game. Entropy is used when [None].
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            players_len: DEFAULT_PLAYERS_LEN,
            hand_len: DEFAULT_HAND_LEN,
            win_threshold: DEFAULT_WIN_THRESHOLD,
            max_pips: DEFAULT_MAX_PIPS,
            enforce_double_distribution: true,
            draw_rule: DrawRule::Once,
            seed: None,
        }
    }
}

impl GameConfig {
    /// The number of [tiles](crate::Tile) dealt at the start of every round.
    #[inline]
    pub fn requested_tiles(&self) -> usize {
        self.players_len.saturating_mul(self.hand_len)
    }

    /// Checks whether a game can be played with this [`GameConfig`].
    ///
    /// # Errors
    ///
    /// Every [ConfigError] which applies.
    pub fn check(&self) -> Result<(), HashSet<ConfigError>> {
        let mut errors = HashSet::new();

        if self.players_len < 2 {
            errors.insert(ConfigError::NotEnoughPlayers {
                players_len: self.players_len,
            });
        }
        if self.hand_len == 0 {
            errors.insert(ConfigError::EmptyHands);
        }
        if self.win_threshold == 0 {
            errors.insert(ConfigError::EmptyWinThreshold);
        }

        if self.max_pips > PIPS_LIMIT {
            errors.insert(ConfigError::PipsOutOfBounds {
                max_pips: self.max_pips,
                limit: PIPS_LIMIT,
            });
        } else {
            let requested_tiles = self.requested_tiles();
            let tiles_in_pack = tiles_len(self.max_pips);
            if requested_tiles > tiles_in_pack {
                errors.insert(ConfigError::NotEnoughTiles {
                    requested_tiles,
                    tiles_in_pack,
                });
            } else if self.enforce_double_distribution {
                // every double left out of the pack has to be dealt
                let doubles = self.max_pips as usize + 1;
                let dealt_doubles = doubles.saturating_sub(tiles_in_pack - requested_tiles);
                if dealt_doubles > self.players_len * (DOUBLES_LIMIT - 1) {
                    errors.insert(ConfigError::DoublesUndistributable {
                        dealt_doubles,
                        players_len: self.players_len,
                    });
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
