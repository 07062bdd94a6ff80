// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs are simple, serializable structs
// - Conversion FROM domain entities only (never TO)
// - "Mine" flags are computed for the viewing session

use serde::{Deserialize, Serialize};

use crate::domain::{DatePoll, DateVoteOutcome, Movie, Session, VOTER_PREVIEW_LIMIT};
use crate::services::{DrawOutcome, LotteryState};

// ============================================================================
// SESSION DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionDto {
    pub nickname: String,
}

impl From<&Session> for SessionDto {
    fn from(session: &Session) -> Self {
        Self {
            nickname: session.nickname().to_string(),
        }
    }
}

// ============================================================================
// MOVIE DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDto {
    pub id: String,
    pub title: String,
    pub year: String,
    pub genre: String,
    pub description: String,
    pub director: String,
    pub platforms: Vec<String>,
    pub poster_url: Option<String>,
    pub emoji: String,
    pub added_by: String,
    pub vote_count: usize,
    /// First voters, in vote order
    pub voter_preview: Vec<String>,
    /// Voters not listed in the preview
    pub hidden_voters: usize,
    pub voted_by_me: bool,
    pub created_at: String,
}

impl MovieDto {
    pub fn for_viewer(movie: &Movie, viewer: Option<&Session>) -> Self {
        let (preview, hidden_voters) = movie.voter_preview();

        Self {
            id: movie.id.to_string(),
            title: movie.title.clone(),
            year: movie.year.clone(),
            genre: movie.genre.clone(),
            description: movie.description.clone(),
            director: movie.director.clone(),
            platforms: movie.platforms(),
            poster_url: movie.poster_url.clone(),
            emoji: movie.emoji.clone(),
            added_by: movie.added_by.clone(),
            vote_count: movie.vote_count(),
            voter_preview: preview.to_vec(),
            hidden_voters,
            voted_by_me: viewer.is_some_and(|s| movie.has_voted(s.nickname())),
            created_at: movie.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// DATE POLL DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatePollDto {
    pub id: String,
    pub date: String,
    pub votes: Vec<String>,
    pub vote_count: usize,
    pub voted_by_me: bool,
    /// Top of the ranking with at least one vote
    pub is_leading: bool,
}

impl DatePollDto {
    /// Convert an already ranked list
    pub fn ranked(polls: &[DatePoll], viewer: Option<&Session>) -> Vec<Self> {
        polls
            .iter()
            .enumerate()
            .map(|(idx, poll)| Self {
                id: poll.id.to_string(),
                date: poll.date.to_string(),
                votes: poll.votes.clone(),
                vote_count: poll.vote_count(),
                voted_by_me: viewer.is_some_and(|s| poll.has_voted(s.nickname())),
                is_leading: idx == 0 && poll.vote_count() > 0,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateVoteDto {
    pub poll_id: String,
    /// created | added | removed | pruned
    pub outcome: String,
    pub voting: bool,
}

impl From<DateVoteOutcome> for DateVoteDto {
    fn from(outcome: DateVoteOutcome) -> Self {
        Self {
            poll_id: outcome.poll_id().to_string(),
            outcome: outcome.as_str().to_string(),
            voting: outcome.is_voting(),
        }
    }
}

// ============================================================================
// LOTTERY DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotteryStateDto {
    /// idle | spinning | settling
    pub phase: String,
    pub spinning: bool,
    pub highlighted_id: Option<String>,
    pub winner: Option<MovieDto>,
    pub result_visible: bool,
}

impl LotteryStateDto {
    pub fn for_viewer(state: &LotteryState, viewer: Option<&Session>) -> Self {
        Self {
            phase: state.phase.to_string(),
            spinning: state.spinning(),
            highlighted_id: state.highlighted_id.map(|id| id.to_string()),
            winner: state.winner.as_ref().map(|m| MovieDto::for_viewer(m, viewer)),
            result_visible: state.result_visible,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawResultDto {
    /// announced | no_candidates | already_running
    pub outcome: String,
    pub winner: Option<MovieDto>,
}

impl DrawResultDto {
    pub fn for_viewer(outcome: DrawOutcome, viewer: Option<&Session>) -> Self {
        match outcome {
            DrawOutcome::Announced(winner) => Self {
                outcome: "announced".to_string(),
                winner: Some(MovieDto::for_viewer(&winner, viewer)),
            },
            DrawOutcome::NoCandidates => Self {
                outcome: "no_candidates".to_string(),
                winner: None,
            },
            DrawOutcome::AlreadyRunning => Self {
                outcome: "already_running".to_string(),
                winner: None,
            },
        }
    }
}
