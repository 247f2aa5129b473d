use crate::{Hand, HandTiles, Hands, Tile, DEFAULT_MAX_PIPS, HAND_CAPACITY, PLAYER_CAPACITY};
use rand::Rng;

/// A random [tile](Tile) from the standard set which is not a double.
pub fn random_non_double<R: Rng + ?Sized>(rng: &mut R) -> Tile {
    let big = rng.gen_range(1..=DEFAULT_MAX_PIPS);
    let small = rng.gen_range(0..big);
    Tile::new(big, small).unwrap_or_else(|error| {
        unreachable!("{:?} should be ordered since small < big: {:?}", (big, small), error)
    })
}

/// A random double from the standard set.
pub fn random_double<R: Rng + ?Sized>(rng: &mut R) -> Tile {
    let pips = rng.gen_range(0..=DEFAULT_MAX_PIPS);
    Tile::double(pips).unwrap_or_else(|error| {
        unreachable!("{} should be inside the pips limit: {:?}", pips, error)
    })
}

/// A random, small, non-zero number of random [tiles](Tile) from the standard set. The same
/// [tile](Tile) may appear more than once.
pub fn random_hand_tiles<R: Rng + ?Sized>(rng: &mut R) -> HandTiles {
    let hand_len = rng.gen_range(1..=HAND_CAPACITY);
    (0..hand_len).map(|_| rng.gen::<Tile>()).collect()
}

/// It inserts a random, small number of at least `2` empty [hands](Hand) into hands.
///
/// # Returns
///
/// The number of additional hands.
pub fn random_players<R: Rng + ?Sized>(rng: &mut R, hands: &mut Hands) -> usize {
    let players = rng.gen_range(2..=PLAYER_CAPACITY.max(2));
    let start = hands.len();
    hands.extend((start..start + players).map(Hand::new));

    players
}

/// Assigns random [tiles](Tile) to every [hand](Hand).
///
/// # Returns
///
/// The total of each [hand](Hand) after assignment.
pub fn random_hands<R: Rng + ?Sized>(rng: &mut R, hands: &mut Hands) -> Vec<usize> {
    hands
        .iter_mut()
        .map(|hand| {
            hand.assign(random_hand_tiles(rng));
            hand.total()
        })
        .collect()
}

/// If `players` is not `0`, sets the current player to a random number between `0` inclusive
/// and `players` exclusive. Otherwise, does nothing.
///
/// # Returns
///
/// The index of the player whose turn it is.
pub fn random_current_player<R: Rng + ?Sized>(
    rng: &mut R,
    current_player: &mut usize,
    players: usize,
) -> usize {
    if players > 0 {
        *current_player = rng.gen_range(0..players);
    }

    *current_player
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_non_double_never_double() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            assert!(!random_non_double(&mut rng).is_double());
        }
    }

    #[test]
    fn random_double_always_double() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            assert!(random_double(&mut rng).is_double());
        }
    }

    #[test]
    fn random_players_empty() {
        let mut hands = Hands::new();

        let players = random_players(&mut rand::thread_rng(), &mut hands);

        assert_eq!(players, hands.len());
        for (index, hand) in hands.iter().enumerate() {
            assert_eq!(index, hand.id());
            assert!(hand.is_empty());
        }
    }

    #[test]
    fn random_hands_totals() {
        let mut rng = rand::thread_rng();
        let mut hands = Hands::new();
        random_players(&mut rng, &mut hands);

        let totals = random_hands(&mut rng, &mut hands);

        for (total, hand) in totals.into_iter().zip(&hands) {
            assert!(!hand.is_empty());
            assert_eq!(total, hand.total());
        }
    }

    #[test]
    fn random_current_player_some_players() {
        let mut current_player = 0;

        let random_current_player = random_current_player(
            &mut rand::thread_rng(),
            &mut current_player,
            PLAYER_CAPACITY,
        );

        assert!((0..PLAYER_CAPACITY).contains(&random_current_player));
        assert_eq!(random_current_player, current_player);
    }
}
