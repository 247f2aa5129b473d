use crate::{DEFAULT_MAX_PIPS, PIPS_LIMIT};
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Describes the reason why a [`Tile`] could not be created or changed.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum TileError {
    /// Attempting to create a [`Tile`] with the small end given first.
    BigLessThanSmall {
        /// The pips given for the big end.
        big: u8,
        /// The pips given for the small end.
        small: u8,
    },
    /// Attempting to create a [`Tile`] with more pips than the [pips limit](PIPS_LIMIT).
    PipsOutOfBounds {
        /// The pips given for the big end.
        big: u8,
        /// The [pips limit](PIPS_LIMIT).
        limit: u8,
    },
    /// Attempting to [reverse](Tile::reverse) a [`Tile`] twice.
    AlreadyReversed,
    /// Attempting to [mark](Tile::mark_as_spinner) a [`Tile`] which is not a double as
    /// the spinner.
    NotDouble,
    /// Attempting to [mark](Tile::mark_as_spinner) a [`Tile`] as the spinner twice.
    AlreadySpinner,
}

/// A domino with two pip counts where `big >= small`.
///
/// Two [tiles](Tile) are equal when their pips are equal, whatever their reversal
/// or spinner state.
#[derive(Debug, Copy, Clone)]
pub struct Tile {
    big: u8,
    small: u8,
    /// Whether the small end is the head. Set at most once.
    reversed: bool,
    /// Whether the tile is the spinner of a [layout](crate::Layout). Set at most once.
    spinner: bool,
}

/// # Returns
///
/// The number of [tiles](Tile) in a set whose highest double has `max_pips` pips.
#[inline]
pub fn tiles_len(max_pips: u8) -> usize {
    let ends = max_pips as usize + 1;
    ends * (ends + 1) / 2
}

/// # Returns
///
/// An [iterator](Iterator) of every distinct [tile](Tile) with at most `max_pips` pips on either
/// end, in big then small order.
pub fn tiles(max_pips: u8) -> impl Iterator<Item = Tile> {
    (0..=max_pips).flat_map(|big| (0..=big).map(move |small| Tile::from_ordered(big, small)))
}

impl Tile {
    /// # Errors
    ///
    /// * [TileError::BigLessThanSmall] When `big < small`.
    /// * [TileError::PipsOutOfBounds] When `big` is greater than the [pips limit](PIPS_LIMIT).
    ///
    /// # Returns
    ///
    /// A new [`Tile`] which is neither reversed nor the spinner.
    pub fn new(big: u8, small: u8) -> Result<Tile, TileError> {
        if big < small {
            return Err(TileError::BigLessThanSmall { big, small });
        }
        if big > PIPS_LIMIT {
            return Err(TileError::PipsOutOfBounds {
                big,
                limit: PIPS_LIMIT,
            });
        }

        Ok(Tile::from_ordered(big, small))
    }

    /// # Returns
    ///
    /// A new double [`Tile`] with `pips` on both ends.
    ///
    /// # Errors
    ///
    /// * [TileError::PipsOutOfBounds] When `pips` is greater than the [pips limit](PIPS_LIMIT).
    pub fn double(pips: u8) -> Result<Tile, TileError> {
        Tile::new(pips, pips)
    }

    // callers guarantee big >= small
    fn from_ordered(big: u8, small: u8) -> Tile {
        Tile {
            big,
            small,
            reversed: false,
            spinner: false,
        }
    }

    /// The larger pip count.
    #[inline]
    pub fn big(&self) -> u8 {
        self.big
    }

    /// The smaller pip count.
    #[inline]
    pub fn small(&self) -> u8 {
        self.small
    }

    /// Whether both ends have the same pips.
    #[inline]
    pub fn is_double(&self) -> bool {
        self.big == self.small
    }

    /// Whether the [`Tile`] has been [reversed](Tile::reverse).
    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Whether the [`Tile`] has been [marked as the spinner](Tile::mark_as_spinner).
    #[inline]
    pub fn is_spinner(&self) -> bool {
        self.spinner
    }

    /// The end matched against the west and north arms. `small` if reversed, otherwise `big`.
    #[inline]
    pub fn head(&self) -> u8 {
        if self.reversed {
            self.small
        } else {
            self.big
        }
    }

    /// The end matched against the east and south arms. `big` if reversed, otherwise `small`.
    #[inline]
    pub fn tail(&self) -> u8 {
        if self.reversed {
            self.big
        } else {
            self.small
        }
    }

    /// The sum of both ends.
    #[inline]
    pub fn total(&self) -> usize {
        self.big as usize + self.small as usize
    }

    /// Swaps the head and the tail.
    ///
    /// # Errors
    ///
    /// * [TileError::AlreadyReversed] When the [`Tile`] has already been reversed.
    pub fn reverse(&mut self) -> Result<(), TileError> {
        if self.reversed {
            return Err(TileError::AlreadyReversed);
        }
        self.reversed = true;
        Ok(())
    }

    /// Marks a double as the spinner.
    ///
    /// # Errors
    ///
    /// * [TileError::NotDouble] When the [`Tile`] is not a double.
    /// * [TileError::AlreadySpinner] When the [`Tile`] has already been marked.
    pub fn mark_as_spinner(&mut self) -> Result<(), TileError> {
        if !self.is_double() {
            return Err(TileError::NotDouble);
        }
        if self.spinner {
            return Err(TileError::AlreadySpinner);
        }
        self.spinner = true;
        Ok(())
    }
}

impl PartialEq for Tile {
    fn eq(&self, other: &Tile) -> bool {
        self.big == other.big && self.small == other.small
    }
}

impl Eq for Tile {}

impl Hash for Tile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.big.hash(state);
        self.small.hash(state);
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}]", self.head(), self.tail())
    }
}

impl Distribution<Tile> for Standard {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Tile {
        let big = rng.gen_range(0..=DEFAULT_MAX_PIPS);
        let small = rng.gen_range(0..=big);
        Tile::from_ordered(big, small)
    }
}
