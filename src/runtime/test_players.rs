use crate::{GameEvent, Hand, MoveChoice, MoveError, Placements, Player, RoundView};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// How a [`Bot`] answers [move requests](Player::request_move).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Behavior {
    /// Chooses the first playable [tile](crate::Tile) and its first legal direction.
    #[default]
    FirstLegal,
    /// Chooses a [tile](crate::Tile) past the end of the hand, then the first legal one.
    MistakeFirst,
    /// Never answers, so every turn is forfeited.
    Silent,
}

/// A [`Player`] which records every [event](GameEvent) it receives.
#[derive(Debug, Default)]
pub struct Bot {
    behavior: Behavior,
    /// Whether every [notification](Player::notify) fails.
    deaf: bool,
    events: Mutex<Vec<GameEvent>>,
    requests: AtomicUsize,
    rejections: AtomicUsize,
    draws: AtomicUsize,
}

impl Bot {
    pub fn new(behavior: Behavior) -> Bot {
        Bot {
            behavior,
            ..Bot::default()
        }
    }

    pub fn deaf() -> Bot {
        Bot {
            deaf: true,
            ..Bot::default()
        }
    }

    pub fn events(&self) -> Vec<GameEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn rejections(&self) -> usize {
        self.rejections.load(Ordering::SeqCst)
    }

    pub fn draws(&self) -> usize {
        self.draws.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Player<String> for Bot {
    async fn request_move<'a>(
        &self,
        _round_view: &'a RoundView<'a>,
        hand: &'a Hand,
        placements: &'a Placements,
    ) -> Result<Option<MoveChoice>, String> {
        let request = self.requests.fetch_add(1, Ordering::SeqCst);
        let first_legal = placements
            .iter()
            .find(|placement| placement.is_playable())
            .map(|placement| MoveChoice {
                tile_index: placement.index,
                direction: placement.directions.first().copied(),
            });

        Ok(match self.behavior {
            Behavior::FirstLegal => first_legal,
            Behavior::MistakeFirst if request % 2 == 0 => Some(MoveChoice {
                tile_index: hand.len(),
                direction: None,
            }),
            Behavior::MistakeFirst => first_legal,
            Behavior::Silent => None,
        })
    }

    async fn update_move_errors<'a>(
        &self,
        _round_view: &'a RoundView<'a>,
        _hand: &'a Hand,
        _choice: MoveChoice,
        _move_errors: HashSet<MoveError>,
    ) -> Result<(), String> {
        self.rejections.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn acknowledge_draw<'a>(
        &self,
        _round_view: &'a RoundView<'a>,
        _hand: &'a Hand,
    ) -> Result<(), String> {
        self.draws.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn notify<'a>(&self, event: &'a GameEvent) -> Result<(), String> {
        if self.deaf {
            return Err(String::from("deaf"));
        }
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }
}

/// A [`Player`] who fails every call.
#[derive(Debug)]
pub struct Unreachable;

#[async_trait]
impl Player<String> for Unreachable {
    async fn request_move<'a>(
        &self,
        _round_view: &'a RoundView<'a>,
        _hand: &'a Hand,
        _placements: &'a Placements,
    ) -> Result<Option<MoveChoice>, String> {
        Err(String::from("unreachable"))
    }

    async fn update_move_errors<'a>(
        &self,
        _round_view: &'a RoundView<'a>,
        _hand: &'a Hand,
        _choice: MoveChoice,
        _move_errors: HashSet<MoveError>,
    ) -> Result<(), String> {
        Err(String::from("unreachable"))
    }

    async fn acknowledge_draw<'a>(
        &self,
        _round_view: &'a RoundView<'a>,
        _hand: &'a Hand,
    ) -> Result<(), String> {
        Err(String::from("unreachable"))
    }

    async fn notify<'a>(&self, _event: &'a GameEvent) -> Result<(), String> {
        Err(String::from("unreachable"))
    }
}
