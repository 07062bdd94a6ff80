// src/services/lottery_service.rs
//
// Drives the "decide for us" draw.
//
// ARCHITECTURE:
// - The winner is fixed when the draw starts (weighted by votes)
// - The Draw state machine decides every step; this service only sleeps
//   on the Ticker between steps and mirrors progress into LotteryState
// - One draw at a time. A draw whose caller goes away mid-spin leaves
//   the wheel idle and announces nothing
//
// CRITICAL RULES:
// - No lock is held across an .await

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use log::{debug, info, warn};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{Draw, DrawStep, LotteryPhase, LotteryTiming, Movie, RandomSource};
use crate::error::AppResult;
use crate::events::{DrawHighlightMoved, DrawStarted, EventBus, ResultClosed, WinnerAnnounced};
use crate::infrastructure::Ticker;
use crate::services::MovieService;

/// Observable lottery state. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LotteryState {
    pub phase: LotteryPhase,
    pub highlighted_id: Option<Uuid>,
    /// Last committed winner; kept after the result is closed
    pub winner: Option<Movie>,
    pub result_visible: bool,
}

impl Default for LotteryState {
    fn default() -> Self {
        Self {
            phase: LotteryPhase::Idle,
            highlighted_id: None,
            winner: None,
            result_visible: false,
        }
    }
}

impl LotteryState {
    pub fn spinning(&self) -> bool {
        self.phase != LotteryPhase::Idle
    }
}

/// How a `start_draw` call ended
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOutcome {
    /// The board was empty; nothing happened
    NoCandidates,
    /// Another draw is still running; nothing happened
    AlreadyRunning,
    Announced(Movie),
}

/// Puts the wheel back to idle when a draw is dropped before it finishes.
/// Once the winner is committed the state is already idle and this does nothing.
struct SpinGuard<'a> {
    state: &'a Mutex<LotteryState>,
}

impl Drop for SpinGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        if state.spinning() {
            warn!("Draw abandoned during {}, wheel reset", state.phase);
            state.phase = LotteryPhase::Idle;
            state.highlighted_id = None;
        }
    }
}

pub struct LotteryService {
    movie_service: Arc<MovieService>,
    ticker: Arc<dyn Ticker>,
    random: Mutex<Box<dyn RandomSource>>,
    event_bus: Arc<EventBus>,
    timing: LotteryTiming,
    state: Mutex<LotteryState>,
}

impl LotteryService {
    pub fn new(
        movie_service: Arc<MovieService>,
        ticker: Arc<dyn Ticker>,
        random: Box<dyn RandomSource>,
        event_bus: Arc<EventBus>,
        timing: LotteryTiming,
    ) -> Self {
        Self {
            movie_service,
            ticker,
            random: Mutex::new(random),
            event_bus,
            timing,
            state: Mutex::new(LotteryState::default()),
        }
    }

    fn current(&self) -> MutexGuard<'_, LotteryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn rng(&self) -> MutexGuard<'_, Box<dyn RandomSource>> {
        self.random.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run a full draw over the current board and announce the winner.
    ///
    /// Resolves once the winner is announced. Returns without touching any
    /// state when the board is empty or a draw is already running.
    pub async fn start_draw(&self) -> AppResult<DrawOutcome> {
        let candidates = self.movie_service.list_movies();
        let titles: HashMap<Uuid, String> = candidates
            .iter()
            .map(|m| (m.id, m.title.clone()))
            .collect();
        let candidate_count = candidates.len();

        let mut draw = {
            let mut state = self.current();
            if state.spinning() {
                debug!("Draw requested while another is running");
                return Ok(DrawOutcome::AlreadyRunning);
            }

            let started = Draw::start(candidates, self.timing, &mut **self.rng());
            let Some(draw) = started else {
                debug!("Draw requested on an empty board");
                return Ok(DrawOutcome::NoCandidates);
            };

            *state = LotteryState {
                phase: draw.phase(),
                ..LotteryState::default()
            };
            draw
        };
        let _guard = SpinGuard { state: &self.state };

        info!("Draw started over {} movies", candidate_count);
        self.event_bus.emit(DrawStarted::new(candidate_count));

        loop {
            let step = draw.step(&mut **self.rng());

            let (highlighted, delay) = match step {
                DrawStep::Spin { highlighted, delay } | DrawStep::Land { highlighted, delay } => {
                    (highlighted, delay)
                }
                DrawStep::Finished { winner } => {
                    {
                        let mut state = self.current();
                        state.phase = LotteryPhase::Idle;
                        state.highlighted_id = None;
                        state.winner = Some(winner.clone());
                        state.result_visible = true;
                    }

                    info!(
                        "Winner is \"{}\" after {} spins",
                        winner.title,
                        draw.spin_steps()
                    );
                    self.event_bus.emit(WinnerAnnounced::new(
                        winner.id,
                        winner.title.clone(),
                        winner.platform.clone(),
                        draw.spin_steps(),
                    ));
                    return Ok(DrawOutcome::Announced(winner));
                }
            };

            let phase = draw.phase();
            {
                let mut state = self.current();
                state.phase = phase;
                state.highlighted_id = Some(highlighted);
            }

            debug!("{} on {} for {:?}", phase, highlighted, delay);
            self.event_bus.emit(DrawHighlightMoved::new(
                highlighted,
                titles.get(&highlighted).cloned().unwrap_or_default(),
                phase,
                delay.as_millis() as u64,
            ));

            self.ticker.sleep(delay).await;
        }
    }

    /// Hide the result. The winner stays readable.
    pub fn close_result(&self) -> LotteryState {
        let snapshot = {
            let mut state = self.current();
            state.result_visible = false;
            state.clone()
        };

        self.event_bus
            .emit(ResultClosed::new(snapshot.winner.as_ref().map(|m| m.id)));
        snapshot
    }

    pub fn state(&self) -> LotteryState {
        self.current().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MovieMetadata, SequenceRandom, StdRandom};
    use crate::infrastructure::RecordingTicker;
    use crate::integrations::MockMetadataProvider;
    use crate::repositories::MockMovieRepository;
    use crate::services::LookupService;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn movie(title: &str, voters: &[&str]) -> Movie {
        let mut movie = Movie::from_metadata(MovieMetadata {
            title: title.to_string(),
            year: "Unknown".to_string(),
            genre: "Unknown".to_string(),
            description: String::new(),
            director: "Unknown".to_string(),
            platform: "Netflix, Disney+".to_string(),
            poster_url: None,
            emoji: "🎬".to_string(),
            added_by: "Ken".to_string(),
        });
        movie.votes = voters.iter().map(|v| v.to_string()).collect();
        movie
    }

    fn board(movies: Vec<Movie>) -> Arc<MovieService> {
        let mut repo = MockMovieRepository::new();
        repo.expect_load().return_once(move || Ok(movies));
        repo.expect_save().returning(|_| Ok(()));

        let lookup = Arc::new(LookupService::new(Arc::new(MockMetadataProvider::new())));
        Arc::new(MovieService::new(Arc::new(repo), lookup, Arc::new(EventBus::new())))
    }

    fn lottery(
        movies: Vec<Movie>,
        random: Box<dyn RandomSource>,
    ) -> (LotteryService, Arc<RecordingTicker>, Arc<EventBus>) {
        let ticker = Arc::new(RecordingTicker::new());
        let bus = Arc::new(EventBus::new());
        let service = LotteryService::new(
            board(movies),
            ticker.clone(),
            random,
            bus.clone(),
            LotteryTiming::default(),
        );
        (service, ticker, bus)
    }

    #[tokio::test]
    async fn test_empty_board_is_a_no_op() {
        let (service, ticker, bus) = lottery(Vec::new(), Box::new(StdRandom::seeded(1)));

        assert_eq!(service.start_draw().await.unwrap(), DrawOutcome::NoCandidates);
        assert_eq!(service.state(), LotteryState::default());
        assert!(ticker.delays().is_empty());
        assert!(bus.get_event_log().is_empty());
    }

    #[tokio::test]
    async fn test_precomputed_winner_is_announced() {
        let a = movie("A", &[]);
        let b = movie("B", &["Ken", "Mia"]);
        // The first sample picks the winner: 0.0 lands in A's bucket
        let random = SequenceRandom::new(vec![0.0, 0.9]);
        let (service, _, _) = lottery(vec![a.clone(), b], Box::new(random));

        let outcome = service.start_draw().await.unwrap();
        assert_eq!(outcome, DrawOutcome::Announced(a.clone()));

        let state = service.state();
        assert_eq!(state.phase, LotteryPhase::Idle);
        assert_eq!(state.highlighted_id, None);
        assert_eq!(state.winner, Some(a));
        assert!(state.result_visible);
    }

    #[tokio::test]
    async fn test_ticker_sees_decelerating_delays() {
        let (service, ticker, _) = lottery(
            vec![movie("A", &[]), movie("B", &["Ken"])],
            Box::new(StdRandom::seeded(7)),
        );

        service.start_draw().await.unwrap();

        let delays: Vec<u64> = ticker.delays().iter().map(|d| d.as_millis() as u64).collect();
        let (settle, spins) = delays.split_last().unwrap();
        assert_eq!(*settle, 800);
        assert_eq!(&spins[..4], &[55, 60, 66, 72]);

        // Spinning ran until 4000ms had accumulated, and no longer
        let elapsed: u64 = 50 + spins.iter().sum::<u64>();
        let last = *spins.last().unwrap();
        assert!(elapsed >= 4000);
        assert!(elapsed - last < 4000);
    }

    #[tokio::test]
    async fn test_second_draw_is_rejected_while_spinning() {
        let (service, _, _) = lottery(
            vec![movie("A", &[]), movie("B", &[])],
            Box::new(StdRandom::seeded(3)),
        );

        let (first, second) = tokio::join!(service.start_draw(), service.start_draw());
        assert!(matches!(first.unwrap(), DrawOutcome::Announced(_)));
        assert_eq!(second.unwrap(), DrawOutcome::AlreadyRunning);
        assert!(!service.state().spinning());
    }

    #[tokio::test]
    async fn test_events_follow_the_animation() {
        let winner = movie("Heat", &["Ken"]);
        let (service, _, bus) = lottery(vec![winner.clone()], Box::new(StdRandom::seeded(11)));

        let highlights = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&highlights);
        bus.subscribe::<DrawHighlightMoved, _>(move |event| {
            assert_eq!(event.title, "Heat");
            counter.fetch_add(1, Ordering::SeqCst);
        });

        service.start_draw().await.unwrap();

        let log = bus.get_event_log();
        assert_eq!(log.first().unwrap().event_type, "DrawStarted");
        assert_eq!(log.last().unwrap().event_type, "WinnerAnnounced");
        assert_eq!(highlights.load(Ordering::SeqCst), log.len() - 2);
    }

    #[tokio::test]
    async fn test_close_result_keeps_winner() {
        let winner = movie("Heat", &[]);
        let (service, _, bus) = lottery(vec![winner.clone()], Box::new(StdRandom::seeded(5)));

        service.start_draw().await.unwrap();
        let state = service.close_result();

        assert!(!state.result_visible);
        assert_eq!(state.winner, Some(winner));
        assert_eq!(bus.get_event_log().last().unwrap().event_type, "ResultClosed");
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_draw_frees_the_wheel() {
        let movies = vec![movie("A", &[]), movie("B", &["Ken"])];
        let service = LotteryService::new(
            board(movies),
            Arc::new(crate::infrastructure::TokioTicker),
            Box::new(StdRandom::seeded(13)),
            Arc::new(EventBus::new()),
            LotteryTiming::default(),
        );

        let cut_short =
            tokio::time::timeout(Duration::from_millis(100), service.start_draw()).await;
        assert!(cut_short.is_err());

        let state = service.state();
        assert_eq!(state.phase, LotteryPhase::Idle);
        assert_eq!(state.highlighted_id, None);
        assert_eq!(state.winner, None);

        let outcome = service.start_draw().await.unwrap();
        assert!(matches!(outcome, DrawOutcome::Announced(_)));
        assert!(service.state().result_visible);
    }

    #[tokio::test(start_paused = true)]
    async fn test_real_ticker_takes_about_five_seconds() {
        let movies = vec![movie("A", &[]), movie("B", &[])];
        let service = LotteryService::new(
            board(movies),
            Arc::new(crate::infrastructure::TokioTicker),
            Box::new(StdRandom::seeded(9)),
            Arc::new(EventBus::new()),
            LotteryTiming::default(),
        );

        let started = tokio::time::Instant::now();
        service.start_draw().await.unwrap();
        let took = started.elapsed();

        assert!(took >= Duration::from_millis(4000));
        assert!(took < Duration::from_millis(6000));
    }
}
