//! Gemini HTTP client for text generation.
//!
//! This module provides a small blocking client for the Gemini
//! `generateContent` endpoint.

use crate::errors::{AppResult, GenerationError};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Request body for content generation.
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

/// Response from content generation.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

/// Client for interacting with the Gemini API.
pub struct GeminiClient {
    base_url: String,
    api_key: String,
    client: Client,
}

impl GeminiClient {
    /// Creates a new Gemini client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the API (e.g., "https://generativelanguage.googleapis.com")
    /// * `api_key` - Gemini API key
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: Client::new(),
        }
    }

    /// Generates text for a single-turn prompt.
    ///
    /// Text from every part of the first candidate is concatenated.
    ///
    /// # Arguments
    ///
    /// * `model` - Name of the model (e.g., "gemini-1.5-pro-latest")
    /// * `prompt` - Full prompt text
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The API is not reachable
    /// - The API returns an error response
    /// - The response contains no text
    pub fn generate(&self, model: &str, prompt: &str) -> AppResult<String> {
        debug!("Sending generation request with model: {}", model);

        let url = format!("{}/v1beta/models/{}:generateContent", self.base_url, model);
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&request)
            .send()
            .map_err(GenerationError::Transport)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(GenerationError::Rejected { status, body }.into());
        }

        let parsed: GenerateContentResponse = response.json().map_err(|e| {
            GenerationError::InvalidResponse(format!("Failed to parse generation response: {}", e))
        })?;

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or(GenerationError::EmptyResponse)?;
        if let Some(reason) = &candidate.finish_reason {
            debug!("Generation finished with reason: {}", reason);
        }

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse.into());
        }

        debug!("Received {} characters of generated text", text.chars().count());
        Ok(text)
    }
}
