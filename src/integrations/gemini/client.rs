// src/integrations/gemini/client.rs
//
// Gemini API Integration
//
// ARCHITECTURE:
// - REST client for models/{model}:generateContent
// - Google Search grounding is on, so the answer comes back as free text
//   that should contain one JSON object
// - Maps the answer to MovieDetails (NO domain mutation)
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Every failure is a LookupError; the caller picks the fallback

use std::sync::OnceLock;

use async_trait::async_trait;
use log::debug;
use regex::Regex;
use reqwest::{header, Client};
use serde::Deserialize;
use serde_json::json;

use crate::config::LookupConfig;
use crate::error::LookupError;
use crate::integrations::{MetadataProvider, MovieDetails};

const SYSTEM_INSTRUCTION: &str = "You are a Taiwanese movie expert. You provide accurate \
metadata for movies, especially their availability on streaming platforms in Taiwan \
(Netflix TW, Disney+, Catchplay+, friDay, Hami Video, etc). You always try to find a \
visual poster for the movie.";

/// generateContent response wrapper
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

/// Gemini API Client
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: Option<String>,
    http_client: Client,
}

impl GeminiClient {
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let http_client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            base_url: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
            http_client,
        })
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    // ========================================================================
    // INTERNAL: Request / response shaping
    // ========================================================================

    fn request_body(movie_name: &str) -> serde_json::Value {
        json!({
            "systemInstruction": {
                "parts": [{ "text": SYSTEM_INSTRUCTION }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": build_prompt(movie_name) }]
            }],
            "tools": [{ "google_search": {} }]
        })
    }

    /// Text of the first candidate, parts concatenated
    fn response_text(response: GenerateContentResponse) -> Option<String> {
        let content = response.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        (!text.trim().is_empty()).then_some(text)
    }
}

#[async_trait]
impl MetadataProvider for GeminiClient {
    async fn fetch_details(&self, movie_name: &str) -> Result<MovieDetails, LookupError> {
        let api_key = self.api_key.as_deref().ok_or(LookupError::MissingApiKey)?;

        debug!("Looking up \"{}\" with {}", movie_name, self.model);

        let response = self
            .http_client
            .post(self.generate_url())
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-goog-api-key", api_key)
            .json(&Self::request_body(movie_name))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LookupError::InvalidJson(e.to_string()))?;

        let text = Self::response_text(body).ok_or(LookupError::EmptyResponse)?;
        parse_details(&text)
    }
}

fn build_prompt(movie_name: &str) -> String {
    format!(
        "Find details for the movie \"{movie_name}\". Target audience: Taiwan.\n\
         1. Find the official Traditional Chinese title used in Taiwan.\n\
         2. Identify specifically which streaming platforms in Taiwan currently have this movie.\n\
         3. Find a valid URL for the movie poster.\n\
         \n\
         Return the result strictly as a raw JSON object (do not wrap in markdown code blocks) \
         with the following keys:\n\
         - title (string)\n\
         - year (string)\n\
         - genre (string)\n\
         - description (string, max 2 sentences in Traditional Chinese)\n\
         - director (string)\n\
         - platform (string, comma separated list of Taiwan platforms like Netflix TW, Disney+, Catchplay+)\n\
         - posterUrl (string, valid URL or empty)\n\
         - emoji (string)\n"
    )
}

/// Remove a markdown code fence around the model's answer
pub fn strip_code_fences(text: &str) -> &str {
    static OPENING: OnceLock<Regex> = OnceLock::new();
    static CLOSING: OnceLock<Regex> = OnceLock::new();

    let opening = OPENING.get_or_init(|| Regex::new(r"^```(?:json)?\s*").expect("opening fence pattern"));
    let closing = CLOSING.get_or_init(|| Regex::new(r"\s*```$").expect("closing fence pattern"));

    let text = text.trim();
    let text = opening.find(text).map_or(text, |m| &text[m.end()..]);
    let text = closing.find(text).map_or(text, |m| &text[..m.start()]);
    text.trim()
}

/// Parse the model's free text answer
pub fn parse_details(text: &str) -> Result<MovieDetails, LookupError> {
    let cleaned = strip_code_fences(text);
    if cleaned.is_empty() {
        return Err(LookupError::EmptyResponse);
    }

    serde_json::from_str(cleaned).map_err(|e| LookupError::InvalidJson(e.to_string()))
}
