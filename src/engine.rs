use crate::{
    ConfigError, GameConfig, Hand, HandError, HandTiles, Hands, Layout, LayoutError, Pack, Points,
    DOUBLES_LIMIT, SCORE_MULTIPLE,
};
pub use engine_play::*;
pub use engine_view::*;
use log::{debug, info};
use num::Integer;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

mod engine_play;
mod engine_view;
#[cfg(test)]
mod test_setup;

/// Describes a broken invariant of the [`RoundEngine`]. Unlike rejected choices, these are never
/// recoverable by asking the player again.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum EngineError {
    /// No player holds a double at the start of a fresh round.
    NoDoubles,
    /// The [pack](Pack) cannot deal every hand.
    NotEnoughTiles {
        /// `players_len * hand_len`.
        requested_tiles: usize,
        /// The number of [tiles](crate::Tile) in a full [pack](Pack).
        tiles_in_pack: usize,
    },
    /// Attempting to [start a round](RoundEngine::start_round) while another is in progress.
    RoundInProgress,
    /// Attempting to [start a round](RoundEngine::start_round) after the game has ended.
    GameOver,
    /// The hand and the [layout](Layout) disagree about a [tile](crate::Tile).
    Hand(HandError),
    /// A [tile](crate::Tile) which was checked to fit could not be placed.
    Layout(LayoutError),
    /// No hand exists for the player.
    MissingHand {
        /// The index of the player.
        player: usize,
    },
}

/// How a round ended and who scored for it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RoundOutcome {
    /// A player placed their last [tile](crate::Tile).
    Out {
        /// The index of the player who went out.
        player: usize,
        /// The [value on domino](RoundEngine::value_on_domino) awarded to them.
        points: usize,
    },
    /// Every player passed in a row.
    Blocked {
        /// The index of the player with the strictly lowest hand total, or [None] on a tie.
        scorer: Option<usize>,
        /// The points awarded to `scorer`. `0` on a tie.
        points: usize,
    },
}

/// The phase of the game as seen from outside the [`RoundEngine`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum RoundPhase {
    /// Waiting for [RoundEngine::start_round].
    Dealing,
    /// Waiting for `player` to play, draw or pass.
    AwaitingMove {
        /// The index of the current player.
        player: usize,
    },
    /// The round ended and no player has reached the win threshold.
    RoundOver(RoundOutcome),
    /// The round ended and some player reached the win threshold.
    GameOver {
        /// The index of the first player with the highest score.
        winner: usize,
    },
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
enum RoundStatus {
    Dealing,
    InProgress,
    Over(RoundOutcome),
}

/// Owns the state of a game of spinner dominoes scored in fives: the hands and scores of every
/// player, and the [layout](Layout) and [pack](Pack) of the current round.
///
/// A game is a series of rounds. Each round is [started](RoundEngine::start_round) by dealing
/// fresh hands, and players take turns to [play](RoundEngine::play),
/// [draw](RoundEngine::draw), or [pass](RoundEngine::pass) until a player goes out or every
/// player passes in a row. After a round ends, the game ends when some player has reached the
/// win threshold.
#[derive(Debug)]
pub struct RoundEngine {
    /// The parameters of the game.
    config: GameConfig,
    /// The hand and score of every player.
    hands: Hands,
    /// The [tiles](crate::Tile) placed this round.
    layout: Layout,
    /// The [tiles](crate::Tile) left to draw this round.
    pack: Pack,
    /// The index of the player whose turn it is.
    current_player: usize,
    /// The number of turns in a row without a placement.
    passes: usize,
    /// The number of draws by the current player this turn.
    draws: usize,
    /// Whether the next placement has to be the largest double of the current player.
    play_fresh: bool,
    /// The number of rounds started.
    rounds: usize,
    status: RoundStatus,
    /// The player who opens the next round, or [None] when it has to be opened with the
    /// highest double.
    next_opener: Option<usize>,
    rng: StdRng,
}

/// Rounds `total` to the nearest multiple of [SCORE_MULTIPLE]. Remainders above half of
/// [SCORE_MULTIPLE] round up, so `13` becomes `15` and `12` becomes `10`.
pub fn round_to_score_multiple(total: usize) -> usize {
    let (quotient, remainder) = total.div_rem(&SCORE_MULTIPLE);
    if remainder > SCORE_MULTIPLE / 2 {
        (quotient + 1) * SCORE_MULTIPLE
    } else {
        quotient * SCORE_MULTIPLE
    }
}

/// Checks dealt hands against the deal constraints.
///
/// # Arguments
///
/// * `hands`: The dealt [tiles](crate::Tile) of each player.
/// * `check_any_double`: Whether some hand has to hold a double.
/// * `check_doubles`: Whether every hand has to hold fewer than [DOUBLES_LIMIT] doubles.
///
/// # Returns
///
/// Whether `hands` satisfy every enabled constraint.
pub fn verify_hands(hands: &[HandTiles], check_any_double: bool, check_doubles: bool) -> bool {
    let doubles: Vec<usize> = hands
        .iter()
        .map(|hand| hand.iter().filter(|tile| tile.is_double()).count())
        .collect();

    if check_doubles && doubles.iter().any(|&count| count >= DOUBLES_LIMIT) {
        return false;
    }
    if check_any_double && doubles.iter().all(|&count| count == 0) {
        return false;
    }
    true
}

impl RoundEngine {
    /// Creates a game without dealing. Call [RoundEngine::start_round] to deal the first round.
    ///
    /// # Errors
    ///
    /// Every [ConfigError] found by [GameConfig::check].
    pub fn new(config: GameConfig) -> Result<RoundEngine, HashSet<ConfigError>> {
        config.check()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let hands = (0..config.players_len).map(Hand::new).collect();
        let pack = Pack::new(config.max_pips);
        info!(
            "new game with {} players, {} tiles each, up to {} points",
            config.players_len, config.hand_len, config.win_threshold
        );

        Ok(RoundEngine {
            config,
            hands,
            layout: Layout::new(),
            pack,
            current_player: 0,
            passes: 0,
            draws: 0,
            play_fresh: false,
            rounds: 0,
            status: RoundStatus::Dealing,
            next_opener: None,
            rng,
        })
    }

    /// The parameters of the game.
    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The [tiles](crate::Tile) placed this round.
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// # Returns
    ///
    /// The index of the player whose turn it is.
    #[inline]
    pub fn current_player(&self) -> usize {
        self.current_player
    }

    /// The number of players.
    #[inline]
    pub fn players_len(&self) -> usize {
        self.hands.len()
    }

    /// The number of rounds started so far.
    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Whether the next placement has to be the largest double of the current player.
    #[inline]
    pub fn play_fresh(&self) -> bool {
        self.play_fresh
    }

    /// # Returns
    ///
    /// The phase of the game.
    pub fn phase(&self) -> RoundPhase {
        match self.status {
            RoundStatus::Dealing => RoundPhase::Dealing,
            RoundStatus::InProgress => RoundPhase::AwaitingMove {
                player: self.current_player,
            },
            RoundStatus::Over(outcome) => match self.winner() {
                Some(winner) => RoundPhase::GameOver { winner },
                None => RoundPhase::RoundOver(outcome),
            },
        }
    }

    /// Whether a round is in progress.
    #[inline]
    pub fn is_round_in_progress(&self) -> bool {
        self.status == RoundStatus::InProgress
    }

    /// Deals a new round and determines who opens it.
    ///
    /// A fresh [pack](Pack) is dealt until the hands satisfy the deal constraints. The first
    /// round and every round after a blocked round are fresh: some hand has to hold a double,
    /// the player with the highest double opens, and they have to open with it. After a player
    /// goes out, they open the next round with any [tile](crate::Tile).
    ///
    /// # Errors
    ///
    /// * [EngineError::RoundInProgress] When the current round has not ended.
    /// * [EngineError::GameOver] When some player has already reached the win threshold.
    /// * [EngineError::NotEnoughTiles] When the [pack](Pack) cannot deal every hand.
    /// * [EngineError::NoDoubles] When no player holds a double in a fresh round.
    ///
    /// # Returns
    ///
    /// The index of the player who opens the round.
    pub fn start_round(&mut self) -> Result<usize, EngineError> {
        if self.status == RoundStatus::InProgress {
            return Err(EngineError::RoundInProgress);
        }
        if self.is_game_over() {
            return Err(EngineError::GameOver);
        }

        let fresh = self.next_opener.is_none();
        let mut deals = 0;
        let (pack, dealt) = loop {
            deals += 1;
            let mut pack = Pack::new(self.config.max_pips);
            let tiles_in_pack = pack.len();
            let dealt: Option<Vec<HandTiles>> = (0..self.hands.len())
                .map(|_| pack.draw(&mut self.rng, self.config.hand_len))
                .collect();
            let Some(dealt) = dealt else {
                return Err(EngineError::NotEnoughTiles {
                    requested_tiles: self.config.requested_tiles(),
                    tiles_in_pack,
                });
            };
            if verify_hands(&dealt, fresh, self.config.enforce_double_distribution) {
                break (pack, dealt);
            }
        };
        debug!("dealt round {} after {} deals", self.rounds + 1, deals);

        for (hand, tiles) in self.hands.iter_mut().zip(dealt) {
            hand.assign(tiles);
        }
        self.pack = pack;
        self.layout = Layout::new();
        self.passes = 0;
        self.draws = 0;
        self.rounds += 1;

        let first_player = match self.next_opener {
            Some(opener) => opener,
            None => self.determine_first_player()?,
        };
        self.current_player = first_player;
        self.play_fresh = fresh;
        self.status = RoundStatus::InProgress;
        info!(
            "round {} starts with player {}{}",
            self.rounds,
            first_player,
            if fresh { " on the highest double" } else { "" }
        );

        Ok(first_player)
    }

    /// Scans doubles from the highest pips down and finds who holds the first one.
    ///
    /// # Errors
    ///
    /// * [EngineError::NoDoubles] When no player holds a double.
    ///
    /// # Returns
    ///
    /// The index of the player holding the highest double.
    pub fn determine_first_player(&self) -> Result<usize, EngineError> {
        (0..=self.config.max_pips)
            .rev()
            .find_map(|pips| {
                self.hands.iter().position(|hand| {
                    hand.tiles()
                        .iter()
                        .any(|tile| tile.is_double() && tile.big() == pips)
                })
            })
            .ok_or(EngineError::NoDoubles)
    }

    /// # Returns
    ///
    /// The sum of every other player's hand total, [rounded](round_to_score_multiple).
    pub fn value_on_domino(&self, player: usize) -> usize {
        let total = self
            .hands
            .iter()
            .enumerate()
            .filter(|&(index, _)| index != player)
            .map(|(_, hand)| hand.total())
            .sum();
        round_to_score_multiple(total)
    }

    /// Decides who scores for a blocked round.
    ///
    /// # Returns
    ///
    /// [RoundOutcome::Blocked] with the player holding the strictly lowest hand total and the
    /// [value on domino](RoundEngine::value_on_domino) for them, or no scorer and no points
    /// when the lowest total is shared.
    pub fn blocked_result(&self) -> RoundOutcome {
        let totals: Vec<usize> = self.hands.iter().map(Hand::total).collect();
        let Some(&lowest) = totals.iter().min() else {
            return RoundOutcome::Blocked {
                scorer: None,
                points: 0,
            };
        };

        let mut lowest_players = totals
            .iter()
            .enumerate()
            .filter(|&(_, &total)| total == lowest)
            .map(|(index, _)| index);
        match (lowest_players.next(), lowest_players.next()) {
            (Some(scorer), None) => RoundOutcome::Blocked {
                scorer: Some(scorer),
                points: self.value_on_domino(scorer),
            },
            _ => RoundOutcome::Blocked {
                scorer: None,
                points: 0,
            },
        }
    }

    /// # Returns
    ///
    /// The accumulated score of every player.
    pub fn scores(&self) -> Points {
        self.hands.iter().map(Hand::score).collect()
    }

    /// Whether a round has ended with some player at or above the win threshold. Scores earned
    /// in the middle of a round never end the game.
    pub fn is_game_over(&self) -> bool {
        matches!(self.status, RoundStatus::Over(_))
            && self
                .hands
                .iter()
                .any(|hand| hand.score() >= self.config.win_threshold)
    }

    /// # Returns
    ///
    /// The first player with the highest score once [the game is over](RoundEngine::is_game_over),
    /// otherwise [None].
    pub fn winner(&self) -> Option<usize> {
        if !self.is_game_over() {
            return None;
        }
        let highest = self.hands.iter().map(Hand::score).max()?;
        self.hands.iter().position(|hand| hand.score() == highest)
    }

    /// Ends the round with `outcome` and awards its points.
    fn end_round(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::Out { player, points } => {
                if let Some(hand) = self.hands.get_mut(player) {
                    hand.add_points(points);
                }
                self.next_opener = Some(player);
                info!("player {} dominoed for {} points", player, points);
            }
            RoundOutcome::Blocked { scorer, points } => {
                if let Some(hand) = scorer.and_then(|scorer| self.hands.get_mut(scorer)) {
                    hand.add_points(points);
                }
                self.next_opener = None;
                info!("round blocked, {:?} scores {} points", scorer, points);
            }
        }
        self.status = RoundStatus::Over(outcome);
        if let Some(winner) = self.winner() {
            info!("player {} wins with {:?}", winner, self.scores());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{random_hands, random_players, DrawRule, Tile};
    use map_macro::hash_set;
    use smallvec::smallvec;

    fn tile(big: u8, small: u8) -> Tile {
        Tile::new(big, small).unwrap()
    }

    #[test]
    fn new_invalid_config() {
        let config = GameConfig {
            players_len: 1,
            ..GameConfig::default()
        };

        assert_eq!(
            hash_set! { ConfigError::NotEnoughPlayers { players_len: 1 } },
            RoundEngine::new(config).unwrap_err()
        );
    }

    #[test]
    fn new_dealing() {
        let engine = RoundEngine::new(GameConfig::default()).unwrap();

        assert_eq!(RoundPhase::Dealing, engine.phase());
        assert_eq!(4, engine.players_len());
        assert_eq!(0, engine.rounds());
        assert!(!engine.is_game_over());
        assert!(engine.winner().is_none());
    }

    #[test]
    fn round_to_nearest_multiple() {
        for (total, expected) in [
            (0, 0),
            (1, 0),
            (2, 0),
            (3, 5),
            (4, 5),
            (5, 5),
            (12, 10),
            (13, 15),
            (20, 20),
            (22, 20),
            (23, 25),
        ] {
            assert_eq!(expected, round_to_score_multiple(total), "{}", total);
        }
    }

    #[test]
    fn verify_hands_constraints() {
        let no_doubles: Vec<HandTiles> = vec![smallvec![tile(6, 5)], smallvec![tile(4, 1)]];
        let too_many: Vec<HandTiles> = vec![
            smallvec![tile(0, 0), tile(1, 1), tile(2, 2), tile(3, 3), tile(4, 4)],
            smallvec![tile(6, 5)],
        ];
        let four: Vec<HandTiles> = vec![
            smallvec![tile(0, 0), tile(1, 1), tile(2, 2), tile(3, 3), tile(6, 1)],
            smallvec![tile(6, 5)],
        ];

        assert!(!verify_hands(&no_doubles, true, false));
        assert!(verify_hands(&no_doubles, false, true));
        assert!(!verify_hands(&too_many, false, true));
        assert!(verify_hands(&too_many, true, false));
        assert!(verify_hands(&four, true, true));
    }

    #[test]
    fn start_round_deals_fresh() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut engine = RoundEngine::new(GameConfig {
            seed: Some(7),
            ..GameConfig::default()
        })
        .unwrap();

        let first_player = engine.start_round().unwrap();

        assert_eq!(RoundPhase::AwaitingMove { player: first_player }, engine.phase());
        assert_eq!(1, engine.rounds());
        assert!(engine.play_fresh());
        assert!(engine.layout().is_empty());
        assert_eq!(0, engine.pack.len());
        let hands: Vec<HandTiles> = engine.hands.iter().map(|hand| hand.tiles().clone()).collect();
        assert!(verify_hands(&hands, true, true));
        for hand in &engine.hands {
            assert_eq!(7, hand.len());
        }
        let highest_double = engine.hands[first_player]
            .tiles()
            .iter()
            .filter(|tile| tile.is_double())
            .map(Tile::big)
            .max()
            .unwrap();
        for hand in &engine.hands {
            for tile in hand.tiles() {
                assert!(!tile.is_double() || tile.big() <= highest_double);
            }
        }
    }

    #[test]
    fn start_round_leaves_pack() {
        let mut engine = RoundEngine::new(GameConfig {
            players_len: 2,
            draw_rule: DrawRule::UntilPlayable,
            ..GameConfig::default()
        })
        .unwrap();

        engine.start_round().unwrap();

        assert_eq!(14, engine.pack.len());
        assert_eq!(
            Err(EngineError::RoundInProgress),
            engine.start_round()
        );
    }

    #[test]
    fn same_seed_same_deal() {
        let config = GameConfig {
            seed: Some(42),
            ..GameConfig::default()
        };
        let mut first = RoundEngine::new(config.clone()).unwrap();
        let mut second = RoundEngine::new(config).unwrap();

        assert_eq!(first.start_round(), second.start_round());
        assert_eq!(first.hands, second.hands);
    }

    #[test]
    fn first_player_highest_double() {
        let mut engine = RoundEngine::empty_engine(3);
        engine.set_hands([
            smallvec![tile(4, 4), tile(6, 1)],
            smallvec![tile(2, 2), tile(5, 5)],
            smallvec![tile(6, 5), tile(0, 0)],
        ]);

        assert_eq!(Ok(1), engine.determine_first_player());
    }

    #[test]
    fn first_player_no_doubles() {
        let mut engine = RoundEngine::empty_engine(2);
        engine.set_hands([smallvec![tile(4, 1)], smallvec![tile(6, 5)]]);

        assert_eq!(Err(EngineError::NoDoubles), engine.determine_first_player());
    }

    #[test]
    fn value_on_domino_rounds_others() {
        let mut engine = RoundEngine::empty_engine(4);
        engine.set_hands([
            smallvec![tile(6, 4)],
            smallvec![],
            smallvec![tile(4, 3)],
            smallvec![tile(2, 1)],
        ]);

        // 10 + 7 + 3
        assert_eq!(20, engine.value_on_domino(1));
        // 0 + 7 + 3
        assert_eq!(10, engine.value_on_domino(0));
        // 10 + 0 + 7 = 17
        assert_eq!(15, engine.value_on_domino(3));
    }

    #[test]
    fn blocked_unique_lowest_scores() {
        let mut engine = RoundEngine::empty_engine(3);
        engine.set_hands([
            smallvec![tile(6, 6)],
            smallvec![tile(1, 0)],
            smallvec![tile(5, 4), tile(3, 0)],
        ]);

        // 12 + 12 = 24
        assert_eq!(
            RoundOutcome::Blocked {
                scorer: Some(1),
                points: 25
            },
            engine.blocked_result()
        );
    }

    #[test]
    fn blocked_tie_nobody_scores() {
        let mut engine = RoundEngine::empty_engine(3);
        engine.set_hands([
            smallvec![tile(3, 0)],
            smallvec![tile(2, 1)],
            smallvec![tile(5, 4)],
        ]);

        assert_eq!(
            RoundOutcome::Blocked {
                scorer: None,
                points: 0
            },
            engine.blocked_result()
        );
    }

    #[test]
    fn game_over_only_after_round() {
        let mut engine = RoundEngine::empty_engine(2);
        engine.start_test_round([smallvec![tile(1, 0)], smallvec![tile(2, 0)]], 0);
        engine.hands[1].add_points(engine.config.win_threshold);

        assert!(!engine.is_game_over());
        assert_eq!(RoundPhase::AwaitingMove { player: 0 }, engine.phase());

        engine.end_round(RoundOutcome::Blocked {
            scorer: None,
            points: 0,
        });

        assert!(engine.is_game_over());
        assert_eq!(Some(1), engine.winner());
        assert_eq!(RoundPhase::GameOver { winner: 1 }, engine.phase());
        assert_eq!(Err(EngineError::GameOver), engine.start_round());
    }

    #[test]
    fn winner_first_of_tied() {
        let mut engine = RoundEngine::empty_engine(3);
        engine.hands[1].add_points(200);
        engine.hands[2].add_points(200);
        engine.status = RoundStatus::Over(RoundOutcome::Blocked {
            scorer: None,
            points: 0,
        });

        assert_eq!(Some(1), engine.winner());
    }

    #[test]
    fn round_over_below_threshold() {
        let mut engine = RoundEngine::empty_engine(2);
        engine.start_test_round([smallvec![tile(1, 0)], smallvec![tile(2, 0)]], 0);

        let outcome = RoundOutcome::Out {
            player: 0,
            points: 0,
        };
        engine.end_round(outcome);

        assert_eq!(RoundPhase::RoundOver(outcome), engine.phase());
        assert_eq!(Some(0), engine.next_opener);
    }

    #[test]
    fn after_out_opener_starts_free() {
        let mut engine = RoundEngine::new(GameConfig {
            players_len: 3,
            seed: Some(3),
            ..GameConfig::default()
        })
        .unwrap();
        engine.start_round().unwrap();
        engine.end_round(RoundOutcome::Out {
            player: 2,
            points: 10,
        });

        assert_eq!(Ok(2), engine.start_round());
        assert!(!engine.play_fresh());
        assert_eq!(2, engine.rounds());
        assert_eq!(10, engine.scores()[2]);
    }

    #[test]
    fn start_round_redeals_until_valid() {
        for seed in 0..300 {
            let mut engine = RoundEngine::new(GameConfig {
                players_len: 2 + seed as usize % 3,
                seed: Some(seed),
                ..GameConfig::default()
            })
            .unwrap();

            engine.start_round().unwrap();

            let hands: Vec<HandTiles> =
                engine.hands.iter().map(|hand| hand.tiles().clone()).collect();
            assert!(verify_hands(&hands, true, true), "seed {}", seed);
        }
    }

    #[test]
    fn value_on_domino_random_hands() {
        let mut rng = rand::thread_rng();
        let mut engine = RoundEngine::empty_engine(0);
        let players = random_players(&mut rng, engine.mut_hands());
        engine.mut_config().players_len = players;
        let totals = random_hands(&mut rng, engine.mut_hands());

        for player in 0..players {
            let others: usize = totals.iter().sum::<usize>() - totals[player];
            let value = engine.value_on_domino(player);
            assert_eq!(0, value % SCORE_MULTIPLE);
            assert!(value + 2 >= others && value <= others + 2);
        }
    }

    #[test]
    fn after_block_fresh_again() {
        let mut engine = RoundEngine::new(GameConfig {
            players_len: 3,
            ..GameConfig::default()
        })
        .unwrap();
        engine.start_round().unwrap();
        engine.end_round(RoundOutcome::Blocked {
            scorer: Some(0),
            points: 5,
        });

        let first_player = engine.start_round().unwrap();

        assert!(engine.play_fresh());
        assert_eq!(Ok(first_player), engine.determine_first_player());
    }
}
