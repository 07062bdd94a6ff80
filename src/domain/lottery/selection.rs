//! Weighted winner selection.
//!
//! Every movie owns `1 + votes` tickets in a conceptual pool, so a movie
//! nobody voted for can still win. The pool is never built: a single sample
//! `u` picks ticket `floor(u * total)` and a prefix-sum walk finds its owner.

use crate::domain::movie::Movie;

pub fn weight_of(movie: &Movie) -> u64 {
    1 + movie.vote_count() as u64
}

pub fn total_weight(movies: &[Movie]) -> u64 {
    movies.iter().map(weight_of).sum()
}

/// Index of the entry owning ticket `floor(sample * Σweights)`.
/// `None` if the pool is empty or the ticket falls outside it.
pub fn pick_weighted_index(weights: &[u64], sample: f64) -> Option<usize> {
    let total: u64 = weights.iter().sum();
    if total == 0 || !(0.0..1.0).contains(&sample) {
        return None;
    }

    let ticket = (sample * total as f64).floor() as u64;
    let mut upper = 0u64;
    for (idx, weight) in weights.iter().enumerate() {
        upper += weight;
        if ticket < upper {
            return Some(idx);
        }
    }
    None
}

/// Pick the winner for one draw. Any failure of the index computation
/// falls back to the first movie; only an empty list yields `None`.
pub fn select_winner(movies: &[Movie], sample: f64) -> Option<&Movie> {
    let first = movies.first()?;
    let weights: Vec<u64> = movies.iter().map(weight_of).collect();

    Some(
        pick_weighted_index(&weights, sample)
            .map(|idx| &movies[idx])
            .unwrap_or(first),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::lottery::random::{RandomSource, StdRandom};
    use crate::domain::movie::MovieMetadata;

    fn movie(title: &str, voters: &[&str]) -> Movie {
        let mut movie = Movie::from_metadata(MovieMetadata {
            title: title.to_string(),
            year: "Unknown".to_string(),
            genre: "Unknown".to_string(),
            description: String::new(),
            director: "Unknown".to_string(),
            platform: "未知".to_string(),
            poster_url: None,
            emoji: "🎬".to_string(),
            added_by: "host".to_string(),
        });
        movie.votes = voters.iter().map(|v| v.to_string()).collect();
        movie
    }

    #[test]
    fn test_weights_include_base_ticket() {
        let movies = vec![movie("A", &[]), movie("B", &["x", "y"])];
        assert_eq!(weight_of(&movies[0]), 1);
        assert_eq!(weight_of(&movies[1]), 3);
        assert_eq!(total_weight(&movies), 4);
    }

    #[test]
    fn test_fixed_samples_pick_pool_positions() {
        // Pool is [A, B, B, B]
        let movies = vec![movie("A", &[]), movie("B", &["x", "y"])];

        assert_eq!(select_winner(&movies, 0.0).unwrap().title, "A");
        assert_eq!(select_winner(&movies, 0.24).unwrap().title, "A");
        assert_eq!(select_winner(&movies, 0.25).unwrap().title, "B");
        assert_eq!(select_winner(&movies, 0.5).unwrap().title, "B");
        assert_eq!(select_winner(&movies, 0.99).unwrap().title, "B");
    }

    #[test]
    fn test_out_of_range_sample_falls_back_to_first() {
        let movies = vec![movie("A", &[]), movie("B", &["x"])];
        assert_eq!(select_winner(&movies, 1.0).unwrap().title, "A");
        assert_eq!(select_winner(&movies, -0.1).unwrap().title, "A");
        assert_eq!(select_winner(&movies, f64::NAN).unwrap().title, "A");
    }

    #[test]
    fn test_empty_list_has_no_winner() {
        assert!(select_winner(&[], 0.3).is_none());
        assert_eq!(pick_weighted_index(&[], 0.3), None);
    }

    #[test]
    fn test_empirical_frequency_matches_weights() {
        let movies = vec![
            movie("A", &[]),
            movie("B", &["x", "y"]),
            movie("C", &["x"]),
            movie("D", &["x", "y", "z", "w"]),
        ];
        let total = total_weight(&movies) as f64;
        let trials = 100_000;
        let mut counts = vec![0usize; movies.len()];
        let mut rng = StdRandom::seeded(2025);

        for _ in 0..trials {
            let winner = select_winner(&movies, rng.next_unit()).unwrap();
            let idx = movies.iter().position(|m| m.id == winner.id).unwrap();
            counts[idx] += 1;
        }

        for (movie, count) in movies.iter().zip(&counts) {
            let expected = weight_of(movie) as f64 / total;
            let observed = *count as f64 / trials as f64;
            assert!(
                (expected - observed).abs() < 0.01,
                "{}: expected {:.3}, observed {:.3}",
                movie.title,
                expected,
                observed
            );
        }
    }
}
