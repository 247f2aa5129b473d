use crate::{Hand, HandLens, Layout, Points, RoundEngine};

/// Immutably borrows the public parts of [`RoundEngine`]. Safe to show to every player.
#[derive(Debug)]
pub struct RoundView<'a> {
    /// The [tiles](crate::Tile) placed this round.
    pub layout: &'a Layout,
    /// The accumulated score of every player.
    pub scores: Points,
    /// The number of [tiles](crate::Tile) in every hand.
    pub hand_lens: HandLens,
    /// The number of [tiles](crate::Tile) left to draw.
    pub pack_len: usize,
    /// The index of the player whose turn it is.
    pub current_player: usize,
    /// The number of turns in a row without a placement.
    pub passes: usize,
    /// The number of rounds started so far.
    pub round: usize,
    /// Whether the next placement has to be the largest double of the current player.
    pub play_fresh: bool,
}

impl<'a> RoundEngine {
    /// # Returns
    ///
    /// A new [`RoundView`] struct, which immutably borrows the [layout](Layout) from
    /// [`RoundEngine`], with hands replaced by the number of [tiles](crate::Tile) in each hand.
    pub fn round_view(&'a self) -> RoundView<'a> {
        RoundView {
            layout: &self.layout,
            scores: self.scores(),
            hand_lens: self.hands.iter().map(Hand::len).collect(),
            pack_len: self.pack.len(),
            current_player: self.current_player,
            passes: self.passes,
            round: self.rounds,
            play_fresh: self.play_fresh,
        }
    }

    /// # Returns
    ///
    /// The [hand](Hand) of the requesting player or `None` if out of bounds.
    pub fn get_hand(&self, index: usize) -> Option<&Hand> {
        self.hands.get(index)
    }
}
