// src/services/lookup_service.rs
//
// Movie metadata lookup with a guaranteed answer.
//
// try_lookup keeps the provider's error; lookup_movie swallows it and hands
// back the fallback record so adding a movie never fails on the network.

use std::sync::Arc;

use log::{error, info, warn};

use crate::domain::MovieMetadata;
use crate::error::LookupError;
use crate::integrations::{MetadataProvider, DEFAULT_EMOJI, UNKNOWN_FIELD, UNKNOWN_PLATFORM};

pub const FALLBACK_DESCRIPTION: &str = "AI 暫時無法取得資訊，但這部片一定很讚！";

/// Record used when the lookup fails
pub fn fallback_metadata(movie_name: &str, requester: &str) -> MovieMetadata {
    MovieMetadata {
        title: movie_name.to_string(),
        year: UNKNOWN_FIELD.to_string(),
        genre: UNKNOWN_FIELD.to_string(),
        description: FALLBACK_DESCRIPTION.to_string(),
        director: UNKNOWN_FIELD.to_string(),
        platform: UNKNOWN_PLATFORM.to_string(),
        poster_url: None,
        emoji: DEFAULT_EMOJI.to_string(),
        added_by: requester.to_string(),
    }
}

pub struct LookupService {
    provider: Arc<dyn MetadataProvider>,
}

impl LookupService {
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self { provider }
    }

    pub async fn try_lookup(
        &self,
        movie_name: &str,
        requester: &str,
    ) -> Result<MovieMetadata, LookupError> {
        let details = self.provider.fetch_details(movie_name).await?;
        Ok(details.into_metadata(movie_name, requester))
    }

    /// Never fails: any lookup error yields `fallback_metadata`
    pub async fn lookup_movie(&self, movie_name: &str, requester: &str) -> MovieMetadata {
        match self.try_lookup(movie_name, requester).await {
            Ok(metadata) => {
                info!("Lookup for \"{}\" found \"{}\"", movie_name, metadata.title);
                metadata
            }
            Err(LookupError::MissingApiKey) => {
                error!("Lookup API key is missing, using fallback for \"{}\"", movie_name);
                fallback_metadata(movie_name, requester)
            }
            Err(e) => {
                warn!("Lookup for \"{}\" failed: {}, using fallback", movie_name, e);
                fallback_metadata(movie_name, requester)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::integrations::{MockMetadataProvider, MovieDetails};
    use serde_json::json;

    fn service(provider: MockMetadataProvider) -> LookupService {
        LookupService::new(Arc::new(provider))
    }

    #[tokio::test]
    async fn test_successful_lookup() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_fetch_details()
            .withf(|name| name.to_string() == "Inception")
            .times(1)
            .returning(|_| {
                Ok(serde_json::from_value::<MovieDetails>(json!({
                    "title": "全面啟動",
                    "year": "2010",
                    "director": "Christopher Nolan",
                    "platform": "Netflix TW、Catchplay+",
                    "posterUrl": "https://example.test/inception.jpg",
                    "emoji": "🌀"
                }))
                .unwrap())
            });

        let metadata = service(provider).lookup_movie("Inception", "Ken").await;
        assert_eq!(metadata.title, "全面啟動");
        assert_eq!(metadata.genre, "Unknown");
        assert_eq!(metadata.poster_url.as_deref(), Some("https://example.test/inception.jpg"));
        assert_eq!(metadata.added_by, "Ken");
    }

    #[tokio::test]
    async fn test_failure_yields_fallback() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_fetch_details()
            .returning(|_| Err(LookupError::Status(500)));

        let metadata = service(provider).lookup_movie("Inception", "Ken").await;
        assert_eq!(metadata, fallback_metadata("Inception", "Ken"));
        assert_eq!(metadata.description, "AI 暫時無法取得資訊，但這部片一定很讚！");
        assert_eq!(metadata.platform, "未知");
        assert_eq!(metadata.emoji, "🎬");
        assert!(metadata.poster_url.is_none());
    }

    #[tokio::test]
    async fn test_missing_key_yields_fallback() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_fetch_details()
            .returning(|_| Err(LookupError::MissingApiKey));

        let service = service(provider);
        assert!(matches!(
            service.try_lookup("Heat", "Mia").await,
            Err(LookupError::MissingApiKey)
        ));
        assert_eq!(
            service.lookup_movie("Heat", "Mia").await,
            fallback_metadata("Heat", "Mia")
        );
    }
}
