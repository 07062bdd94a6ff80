//! Weighted lottery: pick a movie with probability proportional to
//! `1 + votes`, then animate a decelerating highlight before announcing it.
//!
//! Critical Lottery Invariants:
//!
//! 1. The winner is chosen once, when the draw starts
//! 2. Highlight steps never change the winner
//! 3. An empty movie list never starts a draw
//! 4. Only one draw runs at a time (enforced by LotteryService)

pub mod draw;
pub mod random;
pub mod selection;

pub use draw::{Draw, DrawStep, LotteryPhase, LotteryTiming};
pub use random::{pick_uniform_index, RandomSource, SequenceRandom, StdRandom};
pub use selection::{pick_weighted_index, select_winner, total_weight, weight_of};
