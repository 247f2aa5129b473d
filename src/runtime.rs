use crate::{
    DrawError, EngineError, GameEvent, Hand, MoveChoice, MoveError, PassError, Placements,
    RoundView, Scope,
};
use async_trait::async_trait;
use futures::future;
use itertools::Itertools;
use log::warn;
pub use round_runtime::*;
use std::collections::HashSet;
pub use turn_runtime::*;

mod round_runtime;
mod turn_runtime;

/// The collaborator contract between the game and whatever connects it to a player: a person
/// over some transport, or a bot.
///
/// `request_move` and `update_move_errors` block the turn until the player responds.
/// `notify` calls for every player run concurrently and their failures never affect the game.
///
/// # Errors
///
/// The implementor of [`Player`] is responsible for returning an error to prevent the runtime
/// from running indefinitely whether from no response or repeated invalid inputs. When
/// `request_move`, `update_move_errors`, or `acknowledge_draw` fails, the runtime is stopped,
/// and the error is propagated out of the runtime and back to the calling client code.
/// A player who should merely lose their turn, for example after a timeout, responds to
/// `request_move` with [None] instead.
#[async_trait]
pub trait Player<E> {
    /// Asks the current player to choose one of their playable [tiles](crate::Tile) and, when
    /// it fits in more than one [direction](crate::Direction), a direction.
    ///
    /// # Returns
    ///
    /// The chosen [move](MoveChoice), or [None] to forfeit the turn.
    async fn request_move<'a>(
        &self,
        round_view: &'a RoundView<'a>,
        hand: &'a Hand,
        placements: &'a Placements,
    ) -> Result<Option<MoveChoice>, E>;

    /// When a call to [`RoundEngine::play`](crate::RoundEngine::play) rejects a move, updates
    /// the current player with the state of the round, their hand, their choice, and the
    /// reasons why it was rejected. They are asked for a move again afterwards.
    async fn update_move_errors<'a>(
        &self,
        round_view: &'a RoundView<'a>,
        hand: &'a Hand,
        choice: MoveChoice,
        move_errors: HashSet<MoveError>,
    ) -> Result<(), E>;

    /// After the current player drew a [tile](crate::Tile), shows them their new hand before
    /// the turn goes on.
    async fn acknowledge_draw<'a>(
        &self,
        round_view: &'a RoundView<'a>,
        hand: &'a Hand,
    ) -> Result<(), E>;

    /// Delivers a one-way [event](GameEvent).
    async fn notify<'a>(&self, event: &'a GameEvent) -> Result<(), E>;
}

/// Describes the reason why the runtime stopped before the game ended.
#[derive(Debug)]
pub enum RunError<E> {
    /// A [`Player`] failed to respond.
    Player(E),
    /// The number of [`Player`]s differs from the number of hands.
    PlayerCountMismatch {
        /// The number of hands.
        expected: usize,
        /// The number of [`Player`]s.
        actual: usize,
    },
    /// The [engine](crate::RoundEngine) broke an invariant.
    Engine(EngineError),
    /// The runtime drew when the [engine](crate::RoundEngine) did not allow it.
    Draw(HashSet<DrawError>),
    /// The runtime passed when the [engine](crate::RoundEngine) did not allow it.
    Pass(HashSet<PassError>),
}

/// Asynchronously sends an [event](GameEvent) to every [`Player`] in `scope`.
///
/// # Arguments
///
/// * `players`: A slice of [`Player`]s.
/// * `scope`: Who receives the [event](GameEvent).
/// * `event`: The [event](GameEvent).
///
/// # Errors
///
/// Accumulates all errors from [`Player::notify`] into a vector.
///
/// # Returns
///
/// An empty tuple if there are no errors; otherwise, a vector of errors.
pub async fn send_event<P, E>(players: &[P], scope: Scope, event: &GameEvent) -> Result<(), Vec<E>>
where
    P: Player<E>,
{
    let notify_tasks = players
        .iter()
        .enumerate()
        .filter(|&(index, _)| scope.includes(index))
        .map(|(_, player)| player.notify(event));

    let errors = future::join_all(notify_tasks)
        .await
        .into_iter()
        .filter_map(Result::err)
        .collect_vec();
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(())
}

/// Like [send_event], but failures are logged and dropped.
pub(crate) async fn deliver<P, E>(players: &[P], scope: Scope, event: GameEvent)
where
    P: Player<E>,
{
    if let Err(errors) = send_event::<P, E>(players, scope, &event).await {
        warn!(
            "{} players in {:?} did not receive {:?}",
            errors.len(),
            scope,
            event
        );
    }
}

#[cfg(test)]
mod test_players;

#[cfg(test)]
mod tests {
    use super::test_players::{Bot, Unreachable};
    use super::*;
    use futures::executor::block_on;

    #[test]
    fn send_event_scope_all() {
        let players = vec![Bot::default(), Bot::default(), Bot::default()];
        let event = GameEvent::Turn { player: 1 };

        let result: Result<(), Vec<String>> = block_on(send_event(&players, Scope::All, &event));

        assert!(result.is_ok());
        for player in &players {
            assert_eq!(vec![event.clone()], player.events());
        }
    }

    #[test]
    fn send_event_scope_player() {
        let players = vec![Bot::default(), Bot::default()];
        let event = GameEvent::Log {
            message: String::from("only you"),
        };

        block_on(send_event::<_, String>(&players, Scope::Player(1), &event)).unwrap();

        assert!(players[0].events().is_empty());
        assert_eq!(vec![event], players[1].events());
    }

    #[test]
    fn send_event_collects_errors() {
        let players = vec![Unreachable, Unreachable, Unreachable];

        let errors = block_on(send_event::<_, String>(
            &players,
            Scope::All,
            &GameEvent::Turn { player: 0 },
        ))
        .unwrap_err();

        assert_eq!(3, errors.len());
    }

    #[test]
    fn deliver_drops_errors() {
        let _ = env_logger::builder().is_test(true).try_init();
        let players = vec![Unreachable, Unreachable];

        block_on(deliver::<_, String>(
            &players,
            Scope::All,
            GameEvent::Turn { player: 0 },
        ));
    }
}
