// src/integrations/mod.rs
//
// External Integrations Module
//
// ARCHITECTURE:
// - Providers talk to the outside world and return plain DTOs
// - Services decide what to do with failures
// - Nothing here touches the board state

pub mod gemini;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::MovieMetadata;
use crate::error::LookupError;

pub use gemini::client::GeminiClient;

pub const UNKNOWN_FIELD: &str = "Unknown";
pub const UNKNOWN_PLATFORM: &str = "未知";
pub const PARTIAL_DESCRIPTION: &str = "AI 暫時無法取得完整資訊";
pub const DEFAULT_EMOJI: &str = "🎬";

/// Movie facts as reported by a metadata provider.
///
/// Every field is optional and loosely typed: models answer `"year": 2010`
/// as often as `"year": "2010"`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetails {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub year: Option<Value>,
    #[serde(default)]
    pub genre: Option<Value>,
    #[serde(default)]
    pub description: Option<Value>,
    #[serde(default)]
    pub director: Option<Value>,
    #[serde(default)]
    pub platform: Option<Value>,
    #[serde(default)]
    pub poster_url: Option<Value>,
    #[serde(default)]
    pub emoji: Option<Value>,
}

impl MovieDetails {
    /// Fill the gaps field by field and attach the requester
    pub fn into_metadata(self, requested_name: &str, requester: &str) -> MovieMetadata {
        let or = |field: Option<Value>, default: &str| {
            text_of(field).unwrap_or_else(|| default.to_string())
        };

        MovieMetadata {
            title: or(self.title, requested_name),
            year: or(self.year, UNKNOWN_FIELD),
            genre: or(self.genre, UNKNOWN_FIELD),
            description: or(self.description, PARTIAL_DESCRIPTION),
            director: or(self.director, UNKNOWN_FIELD),
            platform: or(self.platform, UNKNOWN_PLATFORM),
            poster_url: text_of(self.poster_url),
            emoji: or(self.emoji, DEFAULT_EMOJI),
            added_by: requester.to_string(),
        }
    }
}

/// Non-empty text for a JSON scalar
fn text_of(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Source of movie metadata
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    async fn fetch_details(&self, movie_name: &str) -> Result<MovieDetails, LookupError>;
}
