use super::RoundStatus;
use crate::{GameConfig, Hand, HandTiles, Hands, Layout, Pack, RoundEngine, Tile};
use rand::rngs::StdRng;
use rand::SeedableRng;

impl RoundEngine {
    /// Generates a [RoundEngine] waiting to deal, with `players_len` empty hands, an empty
    /// [layout](Layout), an empty [pack](Pack), and otherwise default [config](GameConfig).
    pub fn empty_engine(players_len: usize) -> RoundEngine {
        RoundEngine {
            config: GameConfig {
                players_len,
                seed: Some(0),
                ..GameConfig::default()
            },
            hands: (0..players_len).map(Hand::new).collect(),
            layout: Layout::new(),
            pack: Pack::from_tiles([]),
            current_player: 0,
            passes: 0,
            draws: 0,
            play_fresh: false,
            rounds: 0,
            status: RoundStatus::Dealing,
            next_opener: None,
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// A mutable reference to `self.config`.
    pub fn mut_config(&mut self) -> &mut GameConfig {
        &mut self.config
    }

    /// A mutable reference to `self.hands`.
    pub fn mut_hands(&mut self) -> &mut Hands {
        &mut self.hands
    }

    /// A mutable reference to `self.layout`.
    pub fn mut_layout(&mut self) -> &mut Layout {
        &mut self.layout
    }

    /// A mutable reference to `self.passes`.
    pub fn mut_passes(&mut self) -> &mut usize {
        &mut self.passes
    }

    /// Assigns `tiles` to the hands in order.
    pub fn set_hands<const N: usize>(&mut self, tiles: [HandTiles; N]) {
        for (hand, tiles) in self.hands.iter_mut().zip(tiles) {
            hand.assign(tiles);
        }
    }

    /// Puts the [RoundEngine] in the middle of a round with `tiles` dealt, an empty
    /// [layout](Layout), and `current_player` to move. The [pack](Pack) is left as it is.
    pub fn start_test_round<const N: usize>(&mut self, tiles: [HandTiles; N], current_player: usize) {
        self.set_hands(tiles);
        self.layout = Layout::new();
        self.current_player = current_player;
        self.passes = 0;
        self.draws = 0;
        self.play_fresh = false;
        self.rounds += 1;
        self.status = RoundStatus::InProgress;
    }

    /// Replaces the [pack](Pack) with exactly `tiles`.
    pub fn set_pack(&mut self, tiles: impl IntoIterator<Item = Tile>) {
        self.pack = Pack::from_tiles(tiles);
    }
}
