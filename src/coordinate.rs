use num_derive::FromPrimitive;
use rand::distributions::{Distribution, Standard};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// A tuple with two integer components for horizontal and vertical position in
/// the [layout](crate::Layout). East and north are positive.
///
/// # See Also
///
/// * [Layout](crate::Layout)
/// * [PlacementView](crate::PlacementView)
pub type Coordinate = (isize, isize);

/// Describes which arm of the [layout](crate::Layout) a [tile](crate::Tile) is placed on.
///
/// # See Also
///
/// * [Layout::can_place](crate::Layout::can_place)
/// * [Layout::place](crate::Layout::place)
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, FromPrimitive)]
pub enum Direction {
    /// `0`. Above the spinner.
    North = 0,
    /// `1`. Right of the first tile.
    East = 1,
    /// `2`. Below the spinner.
    South = 2,
    /// `3`. Left of the first tile.
    West = 3,
    /// `4`. The first tile of a round, placed at the origin.
    Origin = 4,
}

/// Describes the reason why a [`Direction`] could not be parsed.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ParseDirectionError {
    /// The unrecognized input.
    pub input: String,
}

impl Direction {
    /// The number of [`Direction`] variants which extend an arm. 4 directions.
    pub const ARMS_LEN: usize = 4;

    /// # Returns
    ///
    /// An array of the [`Direction`] variants which extend an arm, in compass order.
    #[inline]
    pub fn arms() -> [Direction; Direction::ARMS_LEN] {
        [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ]
    }

    /// Whether an incoming [tile](crate::Tile) links through its tail on this arm.
    /// Tiles link through their tail on the north and west arms and through their head
    /// everywhere else.
    #[inline]
    pub fn links_by_tail(self) -> bool {
        matches!(self, Direction::North | Direction::West)
    }

    /// Whether this arm runs along the east-west line.
    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::East | Direction::West | Direction::Origin)
    }

    /// The wire letter of the [`Direction`]: `N`, `E`, `S`, `W`, or an empty string for
    /// [Direction::Origin].
    #[inline]
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::East => "E",
            Direction::South => "S",
            Direction::West => "W",
            Direction::Origin => "",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(input: &str) -> Result<Direction, ParseDirectionError> {
        match input.trim().to_ascii_uppercase().as_str() {
            "N" | "NORTH" => Ok(Direction::North),
            "E" | "EAST" => Ok(Direction::East),
            "S" | "SOUTH" => Ok(Direction::South),
            "W" | "WEST" => Ok(Direction::West),
            "" => Ok(Direction::Origin),
            _ => Err(ParseDirectionError {
                input: input.to_owned(),
            }),
        }
    }
}

impl Distribution<Direction> for Standard {
    #[inline]
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        let index = rng.gen_range(0..Direction::ARMS_LEN);
        num::FromPrimitive::from_usize(index).unwrap_or_else(|| {
            unreachable!(
                "index ({:?}) should be matched since arms cover all indexes \
                in range 0..Direction::ARMS_LEN (0..{:?}).",
                index,
                Direction::ARMS_LEN
            );
        })
    }
}
