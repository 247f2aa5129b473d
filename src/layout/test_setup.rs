use crate::{Direction, Layout, Tile};
use tap::Tap;

impl Layout {
    /// Generates a [`Layout`] by [placing](Layout::place) every [tile](Tile) in order.
    ///
    /// # Panics
    ///
    /// When any placement is illegal.
    pub fn from_plays(plays: impl IntoIterator<Item = (Tile, Direction)>) -> Layout {
        Layout::new().tap_mut(|layout| {
            for (tile, direction) in plays {
                layout
                    .place(tile, direction)
                    .unwrap_or_else(|error| panic!("{} should fit: {:?}", tile, error));
            }
        })
    }
}
