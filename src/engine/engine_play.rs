use super::RoundStatus;
use crate::{
    Direction, Directions, DrawRule, EngineError, MoveChoice, PlacementView, Placements,
    RoundEngine, RoundOutcome, Tile,
};
use either::Either;
use log::debug;
use std::collections::HashSet;

/// Describes the reason why a [move](MoveChoice) was rejected. The player may choose again.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum MoveError {
    /// Attempting to play while no round is in progress.
    RoundNotInProgress,
    /// Attempting to play a [tile](Tile) not in the current player's hand.
    IndexOutOfBounds {
        /// The requested index.
        tile_index: usize,
        /// The number of [tiles](Tile) in the current player's hand.
        hand_len: usize,
    },
    /// Attempting to play a [tile](Tile) which fits nowhere, or which is not the largest
    /// double at the start of a fresh round.
    NotPlayable {
        /// The requested index.
        tile_index: usize,
    },
    /// Omitting the [direction](Direction) of a [tile](Tile) which fits in more than one.
    AmbiguousDirection {
        /// The requested index.
        tile_index: usize,
        /// Every legal [direction](Direction) of the [tile](Tile).
        directions: Directions,
    },
    /// Attempting to place a [tile](Tile) in a [direction](Direction) where it does not fit.
    IllegalDirection {
        /// The requested index.
        tile_index: usize,
        /// The requested [direction](Direction).
        direction: Direction,
        /// Every legal [direction](Direction) of the [tile](Tile).
        directions: Directions,
    },
}

/// Describes the reason why [RoundEngine::play] failed.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PlayError {
    /// The [move](MoveChoice) was rejected and nothing changed.
    Rejected(HashSet<MoveError>),
    /// An invariant broke while applying a checked [move](MoveChoice).
    Invariant(EngineError),
}

/// Describes the reason why the current player could not [draw](RoundEngine::draw).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum DrawError {
    /// Attempting to draw while no round is in progress.
    RoundNotInProgress,
    /// Attempting to draw while holding a playable [tile](Tile).
    HasPlayableTiles,
    /// Attempting to draw again under [DrawRule::Once].
    DrawLimitReached,
}

/// Describes the reason why the current player could not [pass](RoundEngine::pass).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum PassError {
    /// Attempting to pass while no round is in progress.
    RoundNotInProgress,
    /// Attempting to pass while holding a playable [tile](Tile).
    HasPlayableTiles,
    /// Attempting to pass while a [draw](RoundEngine::draw) is still allowed.
    MustDraw,
}

/// What the current player did with their turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum TurnOutcome {
    /// The player placed a [tile](Tile).
    Played {
        /// The index of the player.
        player: usize,
        /// How the placed [tile](Tile) should be shown.
        placement: PlacementView,
        /// The [layout score](crate::Layout::score) earned by the placement.
        points: usize,
    },
    /// The player could neither place nor draw.
    Passed {
        /// The index of the player.
        player: usize,
    },
    /// The player gave no response. Counted as a pass.
    Forfeited {
        /// The index of the player.
        player: usize,
    },
}

/// The result of a turn.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Turn {
    /// What the player did.
    pub outcome: TurnOutcome,
    /// Either the index of the next player or how the round ended.
    pub next: Either<usize, RoundOutcome>,
}

impl RoundEngine {
    /// # Returns
    ///
    /// One [PlayableTile](crate::PlayableTile) for every [tile](Tile) in the current player's
    /// hand, empty when no round is in progress.
    pub fn placements(&self) -> Placements {
        if self.status != RoundStatus::InProgress {
            return Placements::new();
        }
        self.layout
            .placements_for_hand(self.hands[self.current_player].tiles(), self.play_fresh)
    }

    /// Whether the current player holds a [tile](Tile) which fits somewhere.
    pub fn has_playable(&self) -> bool {
        self.placements().iter().any(|placement| placement.is_playable())
    }

    /// Whether the current player is allowed to [draw](RoundEngine::draw) now.
    pub fn may_draw(&self) -> bool {
        self.check_draw().is_ok() && !self.pack.is_empty()
    }

    /// The number of [tiles](Tile) left to draw.
    #[inline]
    pub fn pack_len(&self) -> usize {
        self.pack.len()
    }

    /// Checks the [move](MoveChoice) against the current player's placements and resolves an
    /// omitted [direction](Direction).
    fn check_move(&self, choice: &MoveChoice) -> Result<(Tile, Direction), HashSet<MoveError>> {
        let mut errors = HashSet::new();
        if self.status != RoundStatus::InProgress {
            errors.insert(MoveError::RoundNotInProgress);
            return Err(errors);
        }

        let tile_index = choice.tile_index;
        let placements = self.placements();
        let Some(playable) = placements.get(tile_index) else {
            errors.insert(MoveError::IndexOutOfBounds {
                tile_index,
                hand_len: placements.len(),
            });
            return Err(errors);
        };
        if !playable.is_playable() {
            errors.insert(MoveError::NotPlayable { tile_index });
            return Err(errors);
        }

        let direction = match (choice.direction, playable.directions.as_slice()) {
            (None, &[direction]) => direction,
            (None, directions) => {
                errors.insert(MoveError::AmbiguousDirection {
                    tile_index,
                    directions: Directions::from_slice(directions),
                });
                return Err(errors);
            }
            (Some(direction), directions) if directions.contains(&direction) => direction,
            (Some(direction), directions) => {
                errors.insert(MoveError::IllegalDirection {
                    tile_index,
                    direction,
                    directions: Directions::from_slice(directions),
                });
                return Err(errors);
            }
        };

        Ok((playable.tile, direction))
    }

    /// Places a [tile](Tile) from the current player's hand, removes it from their hand, and
    /// adds the [layout score](crate::Layout::score) to their score.
    ///
    /// When the hand becomes empty, the player also earns the
    /// [value on domino](RoundEngine::value_on_domino) and the round ends. Otherwise, the turn
    /// passes to the next player.
    ///
    /// # Arguments
    ///
    /// * `choice`: The index of a [tile](Tile) in the current player's hand, and the
    /// [direction](Direction) to place it in. The [direction](Direction) may be omitted when
    /// only one is legal.
    ///
    /// # Errors
    ///
    /// * [PlayError::Rejected] with every [MoveError] which applies. Nothing changes.
    /// * [PlayError::Invariant] When the checked [tile](Tile) cannot be placed or removed.
    ///
    /// # Returns
    ///
    /// The [turn](Turn) with either the next player or how the round ended.
    pub fn play(&mut self, choice: &MoveChoice) -> Result<Turn, PlayError> {
        let (tile, direction) = self.check_move(choice).map_err(PlayError::Rejected)?;

        let player = self.current_player;
        let placement = self
            .layout
            .place(tile, direction)
            .map_err(|error| PlayError::Invariant(EngineError::Layout(error)))?;
        let hand = &mut self.hands[player];
        hand.remove(&tile)
            .map_err(|error| PlayError::Invariant(EngineError::Hand(error)))?;

        let points = self.layout.score();
        hand.add_points(points);
        let went_out = hand.is_empty();
        self.passes = 0;
        self.draws = 0;
        self.play_fresh = false;
        debug!(
            "player {} placed {} {} for {} points\n{}",
            player, tile, direction, points, self.layout
        );

        let outcome = TurnOutcome::Played {
            player,
            placement,
            points,
        };
        if went_out {
            let round_outcome = RoundOutcome::Out {
                player,
                points: self.value_on_domino(player),
            };
            self.end_round(round_outcome);
            return Ok(Turn {
                outcome,
                next: Either::Right(round_outcome),
            });
        }

        Ok(Turn {
            outcome,
            next: Either::Left(self.advance()),
        })
    }

    fn check_draw(&self) -> Result<(), HashSet<DrawError>> {
        let mut errors = HashSet::new();
        if self.status != RoundStatus::InProgress {
            errors.insert(DrawError::RoundNotInProgress);
            return Err(errors);
        }
        if self.has_playable() {
            errors.insert(DrawError::HasPlayableTiles);
        }
        if self.config.draw_rule == DrawRule::Once && self.draws > 0 {
            errors.insert(DrawError::DrawLimitReached);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Draws a [tile](Tile) into the current player's hand. Only allowed when they hold no
    /// playable [tile](Tile), and only once per turn under [DrawRule::Once].
    ///
    /// # Errors
    ///
    /// Every [DrawError] which applies.
    ///
    /// # Returns
    ///
    /// The drawn [tile](Tile), or [None] when the [pack](crate::Pack) is empty, which is not
    /// an error.
    pub fn draw(&mut self) -> Result<Option<Tile>, HashSet<DrawError>> {
        self.check_draw()?;

        let Some(tile) = self.pack.draw_one(&mut self.rng) else {
            debug!("player {} found the pack empty", self.current_player);
            return Ok(None);
        };
        self.hands[self.current_player].add(tile);
        self.draws += 1;
        debug!(
            "player {} drew {}, {} left in the pack",
            self.current_player,
            tile,
            self.pack.len()
        );

        Ok(Some(tile))
    }

    /// Passes the turn when the current player can neither place nor draw. When every player
    /// has passed in a row, the round is blocked.
    ///
    /// # Errors
    ///
    /// Every [PassError] which applies.
    ///
    /// # Returns
    ///
    /// The [turn](Turn) with either the next player or how the round ended.
    pub fn pass(&mut self) -> Result<Turn, HashSet<PassError>> {
        let mut errors = HashSet::new();
        if self.status != RoundStatus::InProgress {
            errors.insert(PassError::RoundNotInProgress);
            return Err(errors);
        }
        if self.has_playable() {
            errors.insert(PassError::HasPlayableTiles);
        }
        if self.may_draw() {
            errors.insert(PassError::MustDraw);
        }
        if !errors.is_empty() {
            return Err(errors);
        }

        let player = self.current_player;
        debug!("player {} passed", player);
        Ok(self.skip_turn(TurnOutcome::Passed { player }))
    }

    /// Gives up the current player's turn without a response from them. Counted as a pass.
    ///
    /// # Errors
    ///
    /// * [PassError::RoundNotInProgress] When no round is in progress.
    ///
    /// # Returns
    ///
    /// The [turn](Turn) with either the next player or how the round ended.
    pub fn forfeit(&mut self) -> Result<Turn, HashSet<PassError>> {
        if self.status != RoundStatus::InProgress {
            return Err(HashSet::from([PassError::RoundNotInProgress]));
        }

        let player = self.current_player;
        debug!("player {} forfeited", player);
        Ok(self.skip_turn(TurnOutcome::Forfeited { player }))
    }

    fn skip_turn(&mut self, outcome: TurnOutcome) -> Turn {
        self.passes += 1;
        self.draws = 0;
        // only the opening turn is restricted to the largest double
        self.play_fresh = false;

        if self.passes >= self.hands.len() {
            let round_outcome = self.blocked_result();
            self.end_round(round_outcome);
            return Turn {
                outcome,
                next: Either::Right(round_outcome),
            };
        }

        Turn {
            outcome,
            next: Either::Left(self.advance()),
        }
    }

    /// Moves the turn to the next player round-robin.
    fn advance(&mut self) -> usize {
        self.current_player = (self.current_player + 1) % self.hands.len();
        self.current_player
    }
}
