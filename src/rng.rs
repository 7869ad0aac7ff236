//! Randomness: caller-supplied draws for the resolver, a seeded generator
//! for everything else.
//!
//! The resolver never generates randomness. Chance-bearing actions carry an
//! [`RngSeq`] of floats in `[0, 1)`, consumed in order through an
//! [`RngStream`] cursor; nested effect evaluation (mimicry) keeps pulling
//! from the same cursor, so identical `(state, action)` pairs always resolve
//! identically.
//!
//! [`GameRng`] is the seeded ChaCha8 generator used by the deck factory and
//! the AI proposer, with forking and O(1) serializable state.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::state::{CoinFlip, GameState, PlayerId};

/// Caller-supplied random draws attached to an action.
pub type RngSeq = SmallVec<[f64; 8]>;

/// Outcome of a coin flip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoinSide {
    Heads,
    Tails,
}

impl CoinSide {
    #[must_use]
    pub fn is_heads(self) -> bool {
        self == CoinSide::Heads
    }
}

/// Cursor over a caller-supplied draw sequence.
///
/// Exhausted streams yield 0.0 (tails) so a replayed action with a short
/// sequence still resolves deterministically.
#[derive(Debug)]
pub struct RngStream<'a> {
    values: &'a [f64],
    cursor: usize,
}

impl<'a> RngStream<'a> {
    #[must_use]
    pub fn new(values: &'a [f64]) -> Self {
        Self { values, cursor: 0 }
    }

    /// Consume the next draw.
    pub fn draw(&mut self) -> f64 {
        let value = self.values.get(self.cursor).copied().unwrap_or(0.0);
        self.cursor += 1;
        value
    }

    #[must_use]
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

/// Resolve a named coin flip against the next draw.
///
/// Heads at draws >= 0.5. When `flipper` has a guaranteed flip pending, the
/// result is forced heads and the flag is cleared; the draw is still
/// consumed so mixed replays stay aligned. Every flip is logged and stored
/// as the state's active coin-flip event.
pub fn flip(
    state: &mut GameState,
    reason: &str,
    stream: &mut RngStream<'_>,
    flipper: Option<PlayerId>,
) -> CoinSide {
    let value = stream.draw();
    let mut result = if value >= 0.5 {
        CoinSide::Heads
    } else {
        CoinSide::Tails
    };

    if let Some(id) = flipper {
        let player = state.player_mut(id);
        if player.guaranteed_next_flip {
            player.guaranteed_next_flip = false;
            result = CoinSide::Heads;
            let name = player.name.clone();
            state.record(format!("{} calls on a guaranteed HEADS for {}", name, reason));
        }
    }

    state.record(format!(
        "Coin flip ({}): {}",
        reason,
        match result {
            CoinSide::Heads => "HEADS",
            CoinSide::Tails => "TAILS",
        }
    ));
    state.active_flip = Some(CoinFlip {
        result,
        reason: reason.to_string(),
    });
    result
}

/// Deterministic seeded RNG with forking.
///
/// ChaCha8 keeps generation fast while the word-position state makes
/// checkpointing O(1) no matter how many values were drawn.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Fork an independent branch with its own deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Uniform draw in `[0, 1)`.
    pub fn roll(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// A fresh action draw sequence of `count` values.
    pub fn seq(&mut self, count: usize) -> RngSeq {
        (0..count).map(|_| self.roll()).collect()
    }

    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Capture the current state for checkpointing.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

/// Serializable RNG checkpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
    pub fork_counter: u64,
}
