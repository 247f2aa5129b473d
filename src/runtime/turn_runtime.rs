use crate::runtime::{deliver, Player, RunError};
use crate::{
    playable_indexes, EngineError, GameEvent, Hand, PlayError, RoundEngine, Scope, Turn,
    TurnOutcome,
};
use log::{debug, warn};

/// Resolves the turn of the current player.
///
/// While the current player holds a playable [tile](crate::Tile), it repeatedly asks them for a
/// move with [`Player::request_move`], and if the move is rejected, it tells the player about
/// the errors with [`Player::update_move_errors`] and asks again. A [None] response forfeits
/// the turn. When nothing in their hand fits, the player draws as often as the
/// [draw rule](crate::DrawRule) allows, acknowledging each draw with
/// [`Player::acknowledge_draw`], and passes once they can neither place nor draw.
///
/// Every step is announced with a [`GameEvent`]. Failed notifications are dropped.
///
/// # Arguments
///
/// * `players`: A slice of [`Player`]s, one for each hand.
/// * `engine`: The game, with a round in progress.
///
/// # Errors
///
/// * [RunError::Player] When the current player fails to respond.
/// * [RunError::PlayerCountMismatch] When there is no [`Player`] for the current player.
/// * [RunError::Engine] When the engine breaks an invariant.
/// * [RunError::Draw] and [RunError::Pass] When the engine refuses a draw or pass it
/// offered.
///
/// # Returns
///
/// The [turn](Turn) with either the next player or how the round ended.
pub async fn process_turn<P, E>(players: &[P], engine: &mut RoundEngine) -> Result<Turn, RunError<E>>
where
    P: Player<E>,
{
    let current_player = engine.current_player();
    let Some(player) = players.get(current_player) else {
        return Err(RunError::PlayerCountMismatch {
            expected: engine.players_len(),
            actual: players.len(),
        });
    };
    deliver::<P, E>(
        players,
        Scope::All,
        GameEvent::Turn {
            player: current_player,
        },
    )
    .await;

    loop {
        let placements = engine.placements();
        let indexes = playable_indexes(&placements);

        if !indexes.is_empty() {
            deliver::<P, E>(
                players,
                Scope::Player(current_player),
                GameEvent::PlayableTiles { indexes },
            )
            .await;

            let choice = {
                let round_view = engine.round_view();
                let hand = hand_of(engine, current_player)?;
                player
                    .request_move(&round_view, hand, &placements)
                    .await
                    .map_err(RunError::Player)?
            };
            let Some(choice) = choice else {
                let turn = engine.forfeit().map_err(RunError::Pass)?;
                announce_turn::<P, E>(players, engine, &turn).await;
                return Ok(turn);
            };

            match engine.play(&choice) {
                Ok(turn) => {
                    announce_turn::<P, E>(players, engine, &turn).await;
                    return Ok(turn);
                }
                Err(PlayError::Rejected(move_errors)) => {
                    warn!(
                        "player {} chose {:?}, which was rejected: {:?}",
                        current_player, choice, move_errors
                    );
                    let round_view = engine.round_view();
                    let hand = hand_of(engine, current_player)?;
                    player
                        .update_move_errors(&round_view, hand, choice, move_errors)
                        .await
                        .map_err(RunError::Player)?;
                }
                Err(PlayError::Invariant(error)) => return Err(RunError::Engine(error)),
            }
            continue;
        }

        if engine.may_draw() {
            if let Some(tile) = engine.draw().map_err(RunError::Draw)? {
                debug!("player {} drew {}", current_player, tile);
                deliver::<P, E>(
                    players,
                    Scope::All,
                    GameEvent::Drew {
                        player: current_player,
                        pack_len: engine.pack_len(),
                    },
                )
                .await;
                let hand = hand_of(engine, current_player)?;
                deliver::<P, E>(
                    players,
                    Scope::Player(current_player),
                    GameEvent::Hand {
                        tiles: hand.tiles().clone(),
                    },
                )
                .await;

                let round_view = engine.round_view();
                player
                    .acknowledge_draw(&round_view, hand)
                    .await
                    .map_err(RunError::Player)?;
                continue;
            }
        }

        if engine.pack_len() == 0 {
            deliver::<P, E>(
                players,
                Scope::All,
                GameEvent::PackEmpty {
                    player: current_player,
                },
            )
            .await;
        }
        let turn = engine.pass().map_err(RunError::Pass)?;
        announce_turn::<P, E>(players, engine, &turn).await;
        return Ok(turn);
    }
}

fn hand_of<E>(engine: &RoundEngine, player: usize) -> Result<&Hand, RunError<E>> {
    engine
        .get_hand(player)
        .ok_or(RunError::Engine(EngineError::MissingHand { player }))
}

/// Tells every player what the current player did.
async fn announce_turn<P, E>(players: &[P], engine: &RoundEngine, turn: &Turn)
where
    P: Player<E>,
{
    let (event, message) = match turn.outcome {
        TurnOutcome::Played {
            player,
            placement,
            points,
        } => (
            GameEvent::TilePlaced {
                player,
                placement,
                points,
            },
            format!(
                "player {} placed [{},{}] {} for {} points",
                player, placement.face1, placement.face2, placement.direction, points
            ),
        ),
        TurnOutcome::Passed { player } => (
            GameEvent::Passed { player },
            format!("player {} passed", player),
        ),
        TurnOutcome::Forfeited { player } => (
            GameEvent::Forfeited { player },
            format!("player {} forfeited", player),
        ),
    };

    deliver::<P, E>(players, Scope::All, event).await;
    deliver::<P, E>(players, Scope::All, GameEvent::Log { message }).await;
    if matches!(turn.outcome, TurnOutcome::Played { .. }) {
        deliver::<P, E>(
            players,
            Scope::All,
            GameEvent::Scores {
                points: engine.scores(),
            },
        )
        .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::test_players::{Behavior, Bot, Unreachable};
    use crate::{Direction, Layout, Tile};
    use either::Either;
    use futures::executor::block_on;
    use smallvec::smallvec;

    fn tile(big: u8, small: u8) -> Tile {
        Tile::new(big, small).unwrap()
    }

    #[test]
    fn process_turn_plays() {
        let _ = env_logger::builder().is_test(true).try_init();
        let players = vec![Bot::default(), Bot::default()];
        let mut engine = RoundEngine::empty_engine(2);
        engine.start_test_round([smallvec![tile(5, 0), tile(6, 6)], smallvec![tile(1, 1)]], 0);

        let turn = block_on(process_turn::<_, String>(&players, &mut engine)).unwrap();

        assert!(matches!(
            turn.outcome,
            TurnOutcome::Played {
                player: 0,
                points: 5,
                ..
            }
        ));
        assert_eq!(Either::Left(1), turn.next);
        let events = players[0].events();
        assert_eq!(GameEvent::Turn { player: 0 }, events[0]);
        assert_eq!(GameEvent::PlayableTiles { indexes: vec![0, 1] }, events[1]);
        assert!(events.contains(&GameEvent::Scores {
            points: smallvec![5, 0],
        }));
        // private events only reach the current player
        assert!(!players[1]
            .events()
            .iter()
            .any(|event| matches!(event, GameEvent::PlayableTiles { .. })));
    }

    #[test]
    fn process_turn_reprompts() {
        let players = vec![Bot::new(Behavior::MistakeFirst), Bot::default()];
        let mut engine = RoundEngine::empty_engine(2);
        engine.start_test_round([smallvec![tile(4, 1)], smallvec![tile(1, 1)]], 0);
        *engine.mut_layout() = Layout::from_plays([(tile(6, 4), Direction::Origin)]);

        let turn = block_on(process_turn::<_, String>(&players, &mut engine)).unwrap();

        assert_eq!(1, players[0].rejections());
        assert!(matches!(turn.outcome, TurnOutcome::Played { player: 0, .. }));
        assert!(matches!(turn.next, Either::Right(_)));
    }

    #[test]
    fn process_turn_draws_then_plays() {
        let players = vec![Bot::default(), Bot::default()];
        let mut engine = RoundEngine::empty_engine(2);
        engine.start_test_round([smallvec![tile(2, 1)], smallvec![tile(1, 1)]], 0);
        *engine.mut_layout() = Layout::from_plays([(tile(6, 6), Direction::Origin)]);
        engine.set_pack([tile(6, 3)]);

        let turn = block_on(process_turn::<_, String>(&players, &mut engine)).unwrap();

        assert_eq!(1, players[0].draws());
        // 12 from the spinner and 3 from the east tip
        assert!(matches!(
            turn.outcome,
            TurnOutcome::Played {
                player: 0,
                points: 15,
                ..
            }
        ));
        assert!(players[1]
            .events()
            .contains(&GameEvent::Drew {
                player: 0,
                pack_len: 0
            }));
    }

    #[test]
    fn process_turn_passes_on_empty_pack() {
        let players = vec![Bot::default(), Bot::default()];
        let mut engine = RoundEngine::empty_engine(2);
        engine.start_test_round([smallvec![tile(2, 1)], smallvec![tile(1, 1)]], 0);
        *engine.mut_layout() = Layout::from_plays([(tile(6, 6), Direction::Origin)]);

        let turn = block_on(process_turn::<_, String>(&players, &mut engine)).unwrap();

        assert_eq!(TurnOutcome::Passed { player: 0 }, turn.outcome);
        assert_eq!(0, players[0].draws());
        let events = players[1].events();
        assert!(events.contains(&GameEvent::PackEmpty { player: 0 }));
        assert!(events.contains(&GameEvent::Passed { player: 0 }));
    }

    #[test]
    fn process_turn_forfeits_on_silence() {
        let players = vec![Bot::new(Behavior::Silent), Bot::default()];
        let mut engine = RoundEngine::empty_engine(2);
        engine.start_test_round([smallvec![tile(2, 1)], smallvec![tile(1, 1)]], 0);

        let turn = block_on(process_turn::<_, String>(&players, &mut engine)).unwrap();

        assert_eq!(
            Turn {
                outcome: TurnOutcome::Forfeited { player: 0 },
                next: Either::Left(1),
            },
            turn
        );
        assert!(engine.layout().is_empty());
    }

    #[test]
    fn process_turn_player_error() {
        let players = vec![Unreachable, Unreachable];
        let mut engine = RoundEngine::empty_engine(2);
        engine.start_test_round([smallvec![tile(2, 1)], smallvec![tile(1, 1)]], 0);

        let error = block_on(process_turn::<_, String>(&players, &mut engine)).unwrap_err();

        assert!(matches!(error, RunError::Player(message) if message == "unreachable"));
        assert_eq!(0, engine.current_player());
        assert_eq!(2, engine.get_hand(0).unwrap().len() + engine.get_hand(1).unwrap().len());
    }

    #[test]
    fn process_turn_missing_player() {
        let players = vec![Bot::default()];
        let mut engine = RoundEngine::empty_engine(2);
        engine.start_test_round([smallvec![tile(2, 1)], smallvec![tile(1, 1)]], 1);

        let error = block_on(process_turn::<_, String>(&players, &mut engine)).unwrap_err();

        assert!(matches!(
            error,
            RunError::PlayerCountMismatch {
                expected: 2,
                actual: 1
            }
        ));
    }
}
