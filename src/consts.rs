use konst::primitive::parse_usize;
use konst::{option, result};

/// The number of pips on the highest double of the standard set. `6` for a double-six set of
/// `28` [tiles](crate::Tile).
///
/// # See Also
///
/// * [GameConfig](crate::GameConfig)
/// * [Pack::new](crate::Pack::new)
pub const DEFAULT_MAX_PIPS: u8 = 6;
/// The default number of players in a game. `4` players.
///
/// # See Also
///
/// * [GameConfig](crate::GameConfig)
pub const DEFAULT_PLAYERS_LEN: usize = 4;
/// The default number of [tiles](crate::Tile) dealt to each player. `7` tiles per hand.
///
/// # See Also
///
/// * [GameConfig](crate::GameConfig)
pub const DEFAULT_HAND_LEN: usize = 7;
/// The default score a player must reach for the game to end after a round. `150` points.
///
/// # See Also
///
/// * [GameConfig](crate::GameConfig)
pub const DEFAULT_WIN_THRESHOLD: usize = 150;
/// Points are only ever awarded in multiples of this value. `5` points.
///
/// # See Also
///
/// * [Layout::score](crate::Layout::score)
/// * [round_to_score_multiple](crate::round_to_score_multiple)
pub const SCORE_MULTIPLE: usize = 5;
/// A deal is rejected when some hand holds at least this many doubles and the double
/// distribution check is enabled. `5` doubles.
///
/// # See Also
///
/// * [verify_hands](crate::verify_hands)
pub const DOUBLES_LIMIT: usize = 5;
/// All small, dynamically allocated structs which store player data will be stored on the stack
/// until the number of players becomes greater than `PLAYER_CAPACITY`. When there are more than
/// `PLAYER_CAPACITY` players, player data will be heap allocated. If the environment variable
/// named `PLAYER_CAPACITY` is present at compile time and is able to be parsed into a `usize`,
/// set to the value of the environment variable. Otherwise, it is set to `4`.
///
/// # See Also
///
/// * [Hands](crate::Hands)
/// * [Points](crate::Points)
pub const PLAYER_CAPACITY: usize = option::unwrap_or!(
    option::and_then!(option_env!("PLAYER_CAPACITY"), |str| result::ok!(
        parse_usize(str)
    )),
    4
);
/// All hands will be stored on the stack until the number of [tiles](crate::Tile) in a hand
/// becomes greater than `HAND_CAPACITY`. Hands grow past their dealt size when players draw,
/// so the default leaves some room above [DEFAULT_HAND_LEN]. If the environment variable named
/// `HAND_CAPACITY` is present at compile time and is able to be parsed into a `usize`,
/// set to the value of the environment variable. Otherwise, it is set to `10`.
///
/// # See Also
///
/// * [HandTiles](crate::HandTiles)
/// * [Placements](crate::Placements)
pub const HAND_CAPACITY: usize = option::unwrap_or!(
    option::and_then!(option_env!("HAND_CAPACITY"), |str| result::ok!(
        parse_usize(str)
    )),
    10
);
/// The maximum number of pips allowed on either end of a [tile](crate::Tile). If the environment
/// variable named `PIPS_LIMIT` is present at compile time, is able to be parsed into a `usize` and
/// fits into a `u8`, set to the value of the environment variable. Otherwise, it is set to `18`,
/// the largest commonly sold set.
///
/// # Panics
///
/// * When the given value is less than [DEFAULT_MAX_PIPS]
/// * When the given value is greater than [u8::MAX]
///
/// # See Also
///
/// * [Tile::new](crate::Tile::new)
/// * [GameConfig::check](crate::GameConfig::check)
pub const PIPS_LIMIT: u8 = {
    let limit = option::unwrap_or!(
        option::and_then!(option_env!("PIPS_LIMIT"), |str| result::ok!(parse_usize(
            str
        ))),
        18
    );
    assert!(limit <= u8::MAX as usize);
    limit as u8
};
const _: () = assert!(PIPS_LIMIT >= DEFAULT_MAX_PIPS);
const _: () = assert!(PLAYER_CAPACITY > 0);
const _: () = assert!(HAND_CAPACITY > 0);
