//! Placement, scoring, and turn sequencing for spinner dominoes scored in fives, with an async
//! runtime that drives the game through collaborating players.
//!
//! ## Summary
//!
//! Players hold [tiles](Tile) from a double-six set (or larger, see [GameConfig::max_pips]) and
//! take turns to extend a [layout](Layout) of four arms. The first double placed on the
//! east-west line becomes the spinner, and once both sides of the spinner have been covered,
//! the north and south arms open too. After every placement, the exposed ends of each arm are
//! added up, and when the sum is a multiple of [SCORE_MULTIPLE], the current player scores it.
//! A round ends when a player goes out or every player passes in a row, and the game ends after
//! a round in which some player reached the [win threshold](GameConfig::win_threshold).
//!
//! ## How is the game created?
//!
//! [RoundEngine::new] validates a [GameConfig] and creates the game before the first deal.
//! [RoundEngine::start_round] deals every round.
//!
//! ## How is the game advanced?
//!
//! The current player either [plays](RoundEngine::play) a [tile](Tile) from their hand,
//! [draws](RoundEngine::draw) when nothing fits, or [passes](RoundEngine::pass) when they can
//! neither place nor draw. [RoundEngine::forfeit] gives up the turn of a player who did not
//! respond. Each [turn](Turn) reports either the next player or how the round ended.
//!
//! The current player is represented as the index of the player whose turn it is in the range
//! `0`..(the number of players) which either increments or loops back to `0` when necessary.
//!
//! ### Where may a tile be placed?
//!
//! [Layout::can_place] checks one [direction](Direction), [Layout::valid_directions] lists every
//! legal one, and [Layout::placements_for_hand] lists them for a whole hand. The first round,
//! and every round after a blocked round, has to be opened with the highest double dealt.
//!
//! ## How are points calculated?
//!
//! * [Layout::score] after every placement.
//! * [RoundEngine::value_on_domino] for going out: the hand totals of every other player,
//! [rounded](round_to_score_multiple) to the nearest multiple of [SCORE_MULTIPLE].
//! * [RoundEngine::blocked_result] for a blocked round: the same value for the player with the
//! strictly lowest hand total, and nothing when the lowest total is shared.
//!
//! ## How is the game viewed?
//!
//! [RoundEngine::round_view] immutably borrows the state visible to all players, and
//! [RoundEngine::get_hand] shares private information for each individual player.
//!
//! ## How is the game run?
//!
//! [run_game] plays rounds through [`Player`]s until there is a winner, announcing every change
//! as a [GameEvent]. [run_round] and [process_turn] run smaller steps.
//!
//! ## How are engine states tested when properties are private?
//!
//! The `test` build configuration adds many required methods for testing. The
//! [engine](RoundEngine) implements methods to get mutable references to its properties and
//! methods to set properties for common scenarios, and random data comes from generators
//! in a test-only module.

// Document!
#![forbid(
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::invalid_codeblock_attributes,
    rustdoc::invalid_html_tags,
    rustdoc::bare_urls
)]
// Don't leave a build in a half finished state!
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_compatibility,
    rust_2018_idioms,
    rust_2021_compatibility,
    missing_debug_implementations,
    unsafe_code
)]

pub use config::*;
pub use consts::*;
pub use coordinate::*;
pub use engine::*;
pub use event::*;
pub use hand::*;
pub use layout::*;
pub use pack::*;
#[cfg(test)]
pub use random::*;
pub use runtime::*;
pub use tile::*;
pub use types::*;

mod config;
mod consts;
mod coordinate;
mod engine;
mod event;
mod hand;
mod layout;
mod pack;
#[cfg(test)]
mod random;
mod runtime;
mod tile;
mod types;
