use crate::runtime::{deliver, process_turn, Player, RunError};
use crate::{GameEvent, RoundEngine, RoundOutcome, Scope};
use either::Either;
use log::info;

/// Deals a round, tells every player their hand, and resolves turns until the round ends.
///
/// # Arguments
///
/// * `players`: A slice of [`Player`]s, one for each hand.
/// * `engine`: The game, between rounds.
///
/// # Errors
///
/// Any error from [RoundEngine::start_round] or [process_turn].
///
/// # Returns
///
/// How the round ended.
pub async fn run_round<P, E>(
    players: &[P],
    engine: &mut RoundEngine,
) -> Result<RoundOutcome, RunError<E>>
where
    P: Player<E>,
{
    let first_player = engine.start_round().map_err(RunError::Engine)?;
    deliver::<P, E>(
        players,
        Scope::All,
        GameEvent::NewRound {
            round: engine.rounds(),
            first_player,
            fresh: engine.play_fresh(),
        },
    )
    .await;
    for index in 0..engine.players_len() {
        if let Some(hand) = engine.get_hand(index) {
            deliver::<P, E>(
                players,
                Scope::Player(index),
                GameEvent::Hand {
                    tiles: hand.tiles().clone(),
                },
            )
            .await;
        }
    }

    loop {
        let turn = process_turn::<P, E>(players, engine).await?;
        let Either::Right(outcome) = turn.next else {
            continue;
        };

        let event = match outcome {
            RoundOutcome::Out { player, points } => GameEvent::Dominoed { player, points },
            RoundOutcome::Blocked { scorer, points } => GameEvent::Blocked { scorer, points },
        };
        deliver::<P, E>(players, Scope::All, event).await;
        deliver::<P, E>(
            players,
            Scope::All,
            GameEvent::Scores {
                points: engine.scores(),
            },
        )
        .await;
        return Ok(outcome);
    }
}

/// Plays rounds until some player reaches the win threshold.
///
/// # Arguments
///
/// * `players`: A slice of [`Player`]s, one for each hand.
/// * `engine`: A new game.
///
/// # Errors
///
/// * [RunError::PlayerCountMismatch] When the number of [`Player`]s differs from the number
/// of hands.
/// * Any error from [run_round].
///
/// # Returns
///
/// The index of the winner.
pub async fn run_game<P, E>(players: &[P], engine: &mut RoundEngine) -> Result<usize, RunError<E>>
where
    P: Player<E>,
{
    if players.len() != engine.players_len() {
        return Err(RunError::PlayerCountMismatch {
            expected: engine.players_len(),
            actual: players.len(),
        });
    }

    loop {
        let outcome = run_round::<P, E>(players, engine).await?;
        info!(
            "round {} ended with {:?}, scores {:?}",
            engine.rounds(),
            outcome,
            engine.scores()
        );

        if let Some(winner) = engine.winner() {
            deliver::<P, E>(players, Scope::All, GameEvent::GameOver { winner }).await;
            return Ok(winner);
        }
    }
}
