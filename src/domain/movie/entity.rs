use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::vote::{self, VoteToggle};

/// How many voter names the board shows before collapsing into "+N"
pub const VOTER_PREVIEW_LIMIT: usize = 5;

/// Descriptive data for a movie, as returned by the metadata lookup.
/// This is a Movie without identity, votes or creation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieMetadata {
    pub title: String,
    pub year: String,
    pub genre: String,
    pub description: String,
    pub director: String,

    /// Free text list of streaming platforms, separated by `,` or `、`
    pub platform: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,

    pub emoji: String,

    /// Nickname of the participant who suggested the movie
    pub added_by: String,
}

/// A movie suggestion on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Internal immutable identifier
    pub id: Uuid,

    pub title: String,
    pub year: String,
    pub genre: String,
    pub description: String,
    pub director: String,
    pub platform: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,

    pub emoji: String,
    pub added_by: String,

    /// Voter nicknames in vote order, never duplicated
    pub votes: Vec<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Movie {
    /// Create a movie from a lookup result.
    /// The suggester's own vote is recorded immediately.
    pub fn from_metadata(metadata: MovieMetadata) -> Self {
        let votes = vec![metadata.added_by.clone()];
        Self {
            id: Uuid::new_v4(),
            title: metadata.title,
            year: metadata.year,
            genre: metadata.genre,
            description: metadata.description,
            director: metadata.director,
            platform: metadata.platform,
            poster_url: metadata.poster_url,
            emoji: metadata.emoji,
            added_by: metadata.added_by,
            votes,
            created_at: Utc::now(),
        }
    }

    pub fn vote_count(&self) -> usize {
        self.votes.len()
    }

    pub fn has_voted(&self, nickname: &str) -> bool {
        vote::has_voted(&self.votes, nickname)
    }

    /// Toggle `nickname`'s vote. A movie left with zero votes stays on the board.
    pub fn toggle_vote(&mut self, nickname: &str) -> VoteToggle {
        vote::toggle_vote(&mut self.votes, nickname)
    }

    /// Platform names, split on `,` and `、`
    pub fn platforms(&self) -> Vec<String> {
        self.platform
            .split([',', '、'])
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// The first few voters plus how many were left out
    pub fn voter_preview(&self) -> (&[String], usize) {
        let shown = self.votes.len().min(VOTER_PREVIEW_LIMIT);
        (&self.votes[..shown], self.votes.len() - shown)
    }
}

impl std::fmt::Display for Movie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.emoji, self.title, self.year)
    }
}
