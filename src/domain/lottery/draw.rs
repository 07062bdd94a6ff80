//! The draw state machine: `Idle -> Spinning -> Settling -> Idle`.
//!
//! A `Draw` never sleeps. Each call to `step` does the work of one timer
//! tick and tells the driver how long to wait before the next one, so the
//! whole animation can be replayed deterministically in tests.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::random::{pick_uniform_index, RandomSource};
use super::selection::select_winner;
use crate::domain::movie::Movie;

/// Animation constants of the draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LotteryTiming {
    /// Delay after the first highlight step
    pub base_delay_ms: u64,
    /// Each step's delay is `floor(previous * deceleration)`
    pub deceleration: f64,
    /// Spinning stops once the accumulated delay reaches this
    pub spin_duration_ms: u64,
    /// Pause on the winner before it is announced
    pub settle_delay_ms: u64,
}

impl Default for LotteryTiming {
    fn default() -> Self {
        Self {
            base_delay_ms: 50,
            deceleration: 1.1,
            spin_duration_ms: 4000,
            settle_delay_ms: 800,
        }
    }
}

impl LotteryTiming {
    pub fn next_delay_ms(&self, current_ms: u64) -> u64 {
        (current_ms as f64 * self.deceleration).floor() as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LotteryPhase {
    Idle,
    Spinning,
    Settling,
}

impl std::fmt::Display for LotteryPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LotteryPhase::Idle => write!(f, "idle"),
            LotteryPhase::Spinning => write!(f, "spinning"),
            LotteryPhase::Settling => write!(f, "settling"),
        }
    }
}

/// What the driver has to do after a step
#[derive(Debug, Clone, PartialEq)]
pub enum DrawStep {
    /// A random movie is highlighted; wait `delay` and step again
    Spin { highlighted: Uuid, delay: Duration },
    /// The highlight landed on the winner; wait `delay` and step once more
    Land { highlighted: Uuid, delay: Duration },
    /// The draw is over and the winner can be announced
    Finished { winner: Movie },
}

/// One draw over a snapshot of the movie list
#[derive(Debug, Clone)]
pub struct Draw {
    candidates: Vec<Movie>,
    winner: Movie,
    timing: LotteryTiming,
    phase: LotteryPhase,
    delay_ms: u64,
    elapsed_ms: u64,
    highlighted: Option<Uuid>,
    spin_steps: usize,
}

impl Draw {
    /// Fix the winner and enter `Spinning`.
    /// Returns `None` when there is nothing to draw from.
    pub fn start(
        candidates: Vec<Movie>,
        timing: LotteryTiming,
        random: &mut dyn RandomSource,
    ) -> Option<Self> {
        let winner = select_winner(&candidates, random.next_unit())?.clone();

        Some(Self {
            candidates,
            winner,
            timing,
            phase: LotteryPhase::Spinning,
            delay_ms: timing.base_delay_ms,
            elapsed_ms: 0,
            highlighted: None,
            spin_steps: 0,
        })
    }

    pub fn winner(&self) -> &Movie {
        &self.winner
    }

    pub fn phase(&self) -> LotteryPhase {
        self.phase
    }

    pub fn highlighted(&self) -> Option<Uuid> {
        self.highlighted
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn spin_steps(&self) -> usize {
        self.spin_steps
    }

    pub fn is_finished(&self) -> bool {
        self.phase == LotteryPhase::Idle
    }

    /// Advance by one timer tick
    pub fn step(&mut self, random: &mut dyn RandomSource) -> DrawStep {
        match self.phase {
            LotteryPhase::Spinning => self.spin(random),
            LotteryPhase::Settling | LotteryPhase::Idle => {
                self.phase = LotteryPhase::Idle;
                self.highlighted = None;
                DrawStep::Finished {
                    winner: self.winner.clone(),
                }
            }
        }
    }

    fn spin(&mut self, random: &mut dyn RandomSource) -> DrawStep {
        // candidates is non-empty: start() refused an empty list
        let idx = pick_uniform_index(self.candidates.len(), random.next_unit()).unwrap_or(0);
        let highlighted = self.candidates[idx].id;
        self.highlighted = Some(highlighted);
        self.spin_steps += 1;

        self.elapsed_ms += self.delay_ms;
        self.delay_ms = self.timing.next_delay_ms(self.delay_ms);

        if self.elapsed_ms < self.timing.spin_duration_ms {
            return DrawStep::Spin {
                highlighted,
                delay: Duration::from_millis(self.delay_ms),
            };
        }

        self.phase = LotteryPhase::Settling;
        self.highlighted = Some(self.winner.id);
        DrawStep::Land {
            highlighted: self.winner.id,
            delay: Duration::from_millis(self.timing.settle_delay_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lottery::random::{SequenceRandom, StdRandom};
    use crate::domain::movie::MovieMetadata;

    fn movie(title: &str, votes: usize) -> Movie {
        let mut movie = Movie::from_metadata(MovieMetadata {
            title: title.to_string(),
            year: "2024".to_string(),
            genre: "Drama".to_string(),
            description: String::new(),
            director: "Unknown".to_string(),
            platform: "Netflix TW".to_string(),
            poster_url: None,
            emoji: "🎬".to_string(),
            added_by: "host".to_string(),
        });
        movie.votes = (0..votes).map(|i| format!("voter{}", i)).collect();
        movie
    }

    fn run_to_end(draw: &mut Draw, random: &mut dyn RandomSource) -> (Vec<DrawStep>, Movie) {
        let mut steps = Vec::new();
        loop {
            let step = draw.step(random);
            if let DrawStep::Finished { winner } = &step {
                let winner = winner.clone();
                steps.push(step);
                return (steps, winner);
            }
            steps.push(step);
        }
    }

    #[test]
    fn test_empty_list_does_not_start() {
        let mut random = SequenceRandom::constant(0.0);
        assert!(Draw::start(Vec::new(), LotteryTiming::default(), &mut random).is_none());
    }

    #[test]
    fn test_winner_is_fixed_at_start() {
        let movies = vec![movie("A", 0), movie("B", 2)];
        // First sample picks the winner (0.5 -> ticket 2 -> B), the rest drive highlights
        let mut random = SequenceRandom::new(vec![0.5, 0.0, 0.1, 0.2, 0.3]);
        let mut draw = Draw::start(movies, LotteryTiming::default(), &mut random).unwrap();
        assert_eq!(draw.winner().title, "B");

        let (_, announced) = run_to_end(&mut draw, &mut random);
        assert_eq!(announced.title, "B");
    }

    #[test]
    fn test_announced_winner_survives_random_highlights() {
        let movies: Vec<Movie> = (0..6).map(|i| movie(&format!("M{}", i), i)).collect();
        let mut random = StdRandom::seeded(99);
        for _ in 0..50 {
            let mut draw =
                Draw::start(movies.clone(), LotteryTiming::default(), &mut random).unwrap();
            let expected = draw.winner().id;
            let (_, announced) = run_to_end(&mut draw, &mut random);
            assert_eq!(announced.id, expected);
        }
    }

    #[test]
    fn test_default_timing_step_sequence() {
        let movies = vec![movie("A", 0), movie("B", 1)];
        let mut random = SequenceRandom::constant(0.0);
        let mut draw = Draw::start(movies, LotteryTiming::default(), &mut random).unwrap();
        let (steps, _) = run_to_end(&mut draw, &mut random);

        let spin_delays: Vec<u64> = steps
            .iter()
            .filter_map(|s| match s {
                DrawStep::Spin { delay, .. } => Some(delay.as_millis() as u64),
                _ => None,
            })
            .collect();

        // Delays grow by floor(x * 1.1) starting from 50
        assert_eq!(&spin_delays[..4], &[55, 60, 66, 72]);
        for pair in spin_delays.windows(2) {
            assert!(pair[1] >= pair[0]);
        }

        // Replay the arithmetic to find where spinning must stop
        let timing = LotteryTiming::default();
        let (mut delay, mut elapsed, mut expected_spins) = (timing.base_delay_ms, 0, 0);
        while elapsed < timing.spin_duration_ms {
            elapsed += delay;
            delay = timing.next_delay_ms(delay);
            expected_spins += 1;
        }
        // All spin steps but the last return Spin; the last returns Land
        assert_eq!(spin_delays.len(), expected_spins - 1);
        assert_eq!(draw.spin_steps(), expected_spins);
        assert!(draw.elapsed_ms() >= timing.spin_duration_ms);

        let tail = &steps[steps.len() - 2..];
        assert!(matches!(
            tail[0],
            DrawStep::Land { delay, .. } if delay == Duration::from_millis(800)
        ));
        assert!(matches!(tail[1], DrawStep::Finished { .. }));
    }

    #[test]
    fn test_land_highlights_winner_then_clears() {
        let movies = vec![movie("A", 0), movie("B", 0), movie("C", 0)];
        let mut random = SequenceRandom::new(vec![0.9, 0.0]);
        let mut draw = Draw::start(movies, LotteryTiming::default(), &mut random).unwrap();
        let winner_id = draw.winner().id;

        loop {
            match draw.step(&mut random) {
                DrawStep::Land { highlighted, .. } => {
                    assert_eq!(highlighted, winner_id);
                    assert_eq!(draw.phase(), LotteryPhase::Settling);
                    assert_eq!(draw.highlighted(), Some(winner_id));
                }
                DrawStep::Finished { .. } => break,
                DrawStep::Spin { .. } => assert_eq!(draw.phase(), LotteryPhase::Spinning),
            }
        }
        assert!(draw.is_finished());
        assert_eq!(draw.highlighted(), None);
    }
}
