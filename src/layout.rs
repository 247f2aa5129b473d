use crate::{Coordinate, Direction, Directions, Tile, TileError, SCORE_MULTIPLE};
use bimap::BiHashMap;
use std::fmt;

pub use placements::*;

mod placements;
#[cfg(test)]
mod test_setup;

/// Describes the reason why a [tile](Tile) could not be [placed](Layout::place).
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum LayoutError {
    /// Attempting to place a [tile](Tile) which [does not fit](Layout::can_place) in
    /// the [direction](Direction).
    IllegalPlacement {
        /// The [tile](Tile) being placed.
        tile: Tile,
        /// The requested [direction](Direction).
        direction: Direction,
    },
    /// Marking the spinner or reversing the [tile](Tile) failed.
    Tile(TileError),
}

impl From<TileError> for LayoutError {
    fn from(error: TileError) -> LayoutError {
        LayoutError::Tile(error)
    }
}

/// The outermost positions of each arm once the first [tile](Tile) has been placed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Arms {
    /// The y component of the northern tip. Only moves once a spinner exists.
    pub north: isize,
    /// The x component of the eastern tip.
    pub east: isize,
    /// The y component of the southern tip. Only moves once a spinner exists.
    pub south: isize,
    /// The x component of the western tip.
    pub west: isize,
    /// The x component of the spinner, or [None] before any double has been placed on
    /// the east-west line.
    pub spinner_x: Option<isize>,
}

impl Arms {
    /// Whether the north and south arms accept [tiles](Tile): a spinner exists and the east-west
    /// line has grown past it on both sides.
    #[inline]
    pub fn is_branching(&self) -> bool {
        self.spinner_x
            .map_or(false, |spinner_x| self.east != spinner_x && self.west != spinner_x)
    }
}

/// Whether any [tile](Tile) has been placed yet.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Bounds {
    /// No [tile](Tile) has been placed.
    Empty,
    /// At least one [tile](Tile) has been placed.
    Populated(Arms),
}

/// Describes whether a [tile](Tile) fits in a [direction](Direction), and how.
///
/// # See Also
///
/// * [Layout::can_place]
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Fit {
    /// The [tile](Tile) cannot be placed.
    Illegal,
    /// The [tile](Tile) fits as it is.
    Linked,
    /// The [tile](Tile) fits once [reversed](Tile::reverse).
    Reversed,
}

impl Fit {
    /// Whether the [tile](Tile) can be placed.
    #[inline]
    pub fn is_legal(self) -> bool {
        self != Fit::Illegal
    }

    /// Whether the [tile](Tile) must be reversed before it is placed.
    #[inline]
    pub fn needs_reversal(self) -> bool {
        self == Fit::Reversed
    }
}

/// How a placed [tile](Tile) should be shown: its ends after any reversal, its cell, and the
/// way it points.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct PlacementView {
    /// The [head](Tile::head) of the placed [tile](Tile).
    pub face1: u8,
    /// The [tail](Tile::tail) of the placed [tile](Tile).
    pub face2: u8,
    /// The x component of the cell.
    pub x: isize,
    /// The y component of the cell.
    pub y: isize,
    /// The arm the [tile](Tile) was placed on.
    pub direction: Direction,
    /// The way the [tile](Tile) points. Doubles lie across their arm and other
    /// [tiles](Tile) point along it, from head to tail.
    pub orientation: Direction,
}

impl PlacementView {
    fn new(tile: &Tile, (x, y): Coordinate, direction: Direction) -> PlacementView {
        let orientation = match (direction.is_horizontal(), tile.is_double(), tile.is_reversed()) {
            (true, true, _) => Direction::South,
            (true, false, false) => Direction::East,
            (true, false, true) => Direction::West,
            (false, true, _) => Direction::East,
            (false, false, false) => Direction::South,
            (false, false, true) => Direction::North,
        };
        PlacementView {
            face1: tile.head(),
            face2: tile.tail(),
            x,
            y,
            direction,
            orientation,
        }
    }
}

/// The placed [tiles](Tile) of a round, laid out in four arms around the first [tile](Tile).
///
/// The east and west arms grow along `y = 0` from the first [tile](Tile). The first double on
/// that line becomes the spinner, and the north and south arms grow along its x component.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Every placed [tile](Tile) in the order it was placed.
    tiles: Vec<Tile>,
    /// [Coordinates](Coordinate) of cells to indexes into `tiles`.
    cells: BiHashMap<Coordinate, usize>,
    /// The tips of each arm.
    bounds: Bounds,
}

/// The end of `tile` which faces the center of the layout on the arm in `direction`.
#[inline]
pub fn link_end(tile: &Tile, direction: Direction) -> u8 {
    if direction.links_by_tail() {
        tile.tail()
    } else {
        tile.head()
    }
}

/// The end of `tile` which faces away from the center of the layout on the arm
/// in `direction`.
#[inline]
pub fn free_end(tile: &Tile, direction: Direction) -> u8 {
    if direction.links_by_tail() {
        tile.head()
    } else {
        tile.tail()
    }
}

impl Default for Layout {
    fn default() -> Layout {
        Layout::new()
    }
}

impl Layout {
    /// # Returns
    ///
    /// An empty [`Layout`].
    pub fn new() -> Layout {
        Layout {
            tiles: Vec::new(),
            cells: BiHashMap::new(),
            bounds: Bounds::Empty,
        }
    }

    /// The number of placed [tiles](Tile).
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether no [tile](Tile) has been placed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bounds == Bounds::Empty
    }

    /// The tips of each arm, or [Bounds::Empty].
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// # Returns
    ///
    /// The [tile](Tile) at `coordinate` or [None] if the cell is empty.
    pub fn tile_at(&self, coordinate: Coordinate) -> Option<&Tile> {
        self.cells
            .get_by_left(&coordinate)
            .and_then(|&index| self.tiles.get(index))
    }

    /// # Returns
    ///
    /// An [iterator](Iterator) of every placed [tile](Tile) and its [coordinate](Coordinate)
    /// in the order they were placed.
    pub fn placed(&self) -> impl Iterator<Item = (Coordinate, &Tile)> + '_ {
        self.tiles.iter().enumerate().filter_map(|(index, tile)| {
            self.cells
                .get_by_right(&index)
                .map(|&coordinate| (coordinate, tile))
        })
    }

    /// # Returns
    ///
    /// The spinner, or [None] if no double has been placed on the east-west line.
    pub fn spinner(&self) -> Option<&Tile> {
        let Bounds::Populated(Arms {
            spinner_x: Some(spinner_x),
            ..
        }) = self.bounds
        else {
            return None;
        };
        self.tile_at((spinner_x, 0))
    }

    /// # Returns
    ///
    /// The [coordinate](Coordinate) of the outermost [tile](Tile) on the arm in `direction`,
    /// or [None] when the [`Layout`] is empty, when `direction` is [Direction::Origin], or when
    /// `direction` is north or south and no spinner exists.
    pub fn tip_coordinate(&self, direction: Direction) -> Option<Coordinate> {
        let Bounds::Populated(arms) = self.bounds else {
            return None;
        };
        match direction {
            Direction::North => arms.spinner_x.map(|spinner_x| (spinner_x, arms.north)),
            Direction::East => Some((arms.east, 0)),
            Direction::South => arms.spinner_x.map(|spinner_x| (spinner_x, arms.south)),
            Direction::West => Some((arms.west, 0)),
            Direction::Origin => None,
        }
    }

    /// # Returns
    ///
    /// The outermost [tile](Tile) on the arm in `direction`.
    ///
    /// # See Also
    ///
    /// * [Layout::tip_coordinate]
    pub fn tip(&self, direction: Direction) -> Option<&Tile> {
        self.tip_coordinate(direction)
            .and_then(|coordinate| self.tile_at(coordinate))
    }

    /// # Returns
    ///
    /// The pips exposed at the tip of the arm in `direction` which an incoming [tile](Tile)
    /// has to match.
    pub fn hook(&self, direction: Direction) -> Option<u8> {
        self.tip(direction).map(|tip| free_end(tip, direction))
    }

    /// Checks whether `tile` may be placed in `direction`.
    ///
    /// * [Direction::Origin] is only legal while the [`Layout`] is empty.
    /// * East and west are legal whenever the [`Layout`] is not empty and the [tile](Tile)
    /// matches the hook.
    /// * North and south are only legal once [the arms are branching](Arms::is_branching).
    ///
    /// A [tile](Tile) matches when its [link end](link_end) equals the hook, or when its
    /// [free end](free_end) does, in which case it has to be reversed. Doubles always link
    /// without reversal.
    ///
    /// # Returns
    ///
    /// Whether and how `tile` fits.
    pub fn can_place(&self, tile: &Tile, direction: Direction) -> Fit {
        match (self.bounds, direction) {
            (Bounds::Empty, Direction::Origin) => return Fit::Linked,
            (Bounds::Empty, _) | (Bounds::Populated(_), Direction::Origin) => return Fit::Illegal,
            (Bounds::Populated(arms), Direction::North | Direction::South)
                if !arms.is_branching() =>
            {
                return Fit::Illegal
            }
            (Bounds::Populated(_), _) => {}
        }

        let Some(hook) = self.hook(direction) else {
            return Fit::Illegal;
        };
        if link_end(tile, direction) == hook {
            Fit::Linked
        } else if free_end(tile, direction) == hook {
            Fit::Reversed
        } else {
            Fit::Illegal
        }
    }

    /// # Returns
    ///
    /// Every [direction](Direction) `tile` may be placed in. Only [Direction::Origin] while
    /// the [`Layout`] is empty.
    pub fn valid_directions(&self, tile: &Tile) -> Directions {
        if self.is_empty() {
            return Directions::from_slice(&[Direction::Origin]);
        }
        Direction::arms()
            .into_iter()
            .filter(|&direction| self.can_place(tile, direction).is_legal())
            .collect()
    }

    /// Places `tile` at the tip of the arm in `direction`, which grows by one cell.
    ///
    /// The first [tile](Tile) is placed at the origin. The first double placed on the
    /// east-west line, including the first [tile](Tile), becomes the spinner. North and south
    /// [tiles](Tile) are placed along the spinner's x component. When the [tile](Tile) only
    /// matches by its free end, it is reversed after the arms have been updated.
    ///
    /// # Errors
    ///
    /// * [LayoutError::IllegalPlacement] When `tile` [does not fit](Layout::can_place)
    /// in `direction`. The [`Layout`] is left unchanged.
    /// * [LayoutError::Tile] When `tile` had already been reversed or marked as the spinner.
    ///
    /// # Returns
    ///
    /// How the placed [tile](Tile) should be shown.
    pub fn place(
        &mut self,
        mut tile: Tile,
        direction: Direction,
    ) -> Result<PlacementView, LayoutError> {
        let fit = self.can_place(&tile, direction);
        let illegal = LayoutError::IllegalPlacement { tile, direction };
        if !fit.is_legal() {
            return Err(illegal);
        }

        let (arms, coordinate) = match (self.bounds, direction) {
            (Bounds::Empty, Direction::Origin) => {
                let spinner_x = if tile.is_double() {
                    tile.mark_as_spinner()?;
                    Some(0)
                } else {
                    None
                };
                let arms = Arms {
                    north: 0,
                    east: 0,
                    south: 0,
                    west: 0,
                    spinner_x,
                };
                (arms, (0, 0))
            }
            (Bounds::Populated(mut arms), Direction::East) => {
                arms.east += 1;
                if arms.spinner_x.is_none() && tile.is_double() {
                    tile.mark_as_spinner()?;
                    arms.spinner_x = Some(arms.east);
                }
                (arms, (arms.east, 0))
            }
            (Bounds::Populated(mut arms), Direction::West) => {
                arms.west -= 1;
                if arms.spinner_x.is_none() && tile.is_double() {
                    tile.mark_as_spinner()?;
                    arms.spinner_x = Some(arms.west);
                }
                (arms, (arms.west, 0))
            }
            (Bounds::Populated(mut arms), Direction::North) => {
                let Some(spinner_x) = arms.spinner_x else {
                    return Err(illegal);
                };
                arms.north += 1;
                (arms, (spinner_x, arms.north))
            }
            (Bounds::Populated(mut arms), Direction::South) => {
                let Some(spinner_x) = arms.spinner_x else {
                    return Err(illegal);
                };
                arms.south -= 1;
                (arms, (spinner_x, arms.south))
            }
            _ => return Err(illegal),
        };

        if fit.needs_reversal() {
            tile.reverse()?;
        }

        let index = self.tiles.len();
        self.tiles.push(tile);
        self.cells.insert(coordinate, index);
        self.bounds = Bounds::Populated(arms);

        Ok(PlacementView::new(&tile, coordinate, direction))
    }

    /// The points exposed at the tip of the arm in `direction`: the [total](Tile::total) of
    /// a double, otherwise its [free end](free_end).
    fn tip_points(&self, direction: Direction) -> usize {
        self.tip(direction).map_or(0, |tip| {
            if tip.is_double() {
                tip.total()
            } else {
                free_end(tip, direction) as usize
            }
        })
    }

    /// Calculates the points earned by the most recent placement.
    ///
    /// # Points Calculation
    ///
    /// With a single [tile](Tile), both of its ends are exposed and its [total](Tile::total)
    /// counts. Otherwise, the east and west tips always count, and the north and south tips
    /// count once a [tile](Tile) has been placed on them. A double at a tip counts both ends;
    /// any other [tile](Tile) counts its free end. Only totals which are multiples of
    /// [SCORE_MULTIPLE] earn points.
    ///
    /// # Returns
    ///
    /// The earned points, `0` when the total is not a multiple of [SCORE_MULTIPLE] or when
    /// the [`Layout`] is empty.
    pub fn score(&self) -> usize {
        let Bounds::Populated(arms) = self.bounds else {
            return 0;
        };

        let total = if self.tiles.len() == 1 {
            self.tiles.iter().map(Tile::total).sum()
        } else {
            let mut total = self.tip_points(Direction::East) + self.tip_points(Direction::West);
            if arms.north > 0 {
                total += self.tip_points(Direction::North);
            }
            if arms.south < 0 {
                total += self.tip_points(Direction::South);
            }
            total
        };

        if total % SCORE_MULTIPLE == 0 {
            total
        } else {
            0
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Bounds::Populated(arms) = self.bounds else {
            return f.write_str(".");
        };
        for y in (arms.south..=arms.north).rev() {
            for x in arms.west..=arms.east {
                match self.tile_at((x, y)) {
                    Some(tile) => write!(f, "{}", tile)?,
                    None => f.write_str("  .  ")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
