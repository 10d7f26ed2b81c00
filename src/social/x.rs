//! X (Twitter) v2 client for creating posts.

use super::oauth::authorization_header;
use crate::config::XCredentials;
use crate::errors::{AppResult, PublishError};
use chrono::Utc;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

/// Identifier the X API assigned to a created post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostId(pub String);

impl std::fmt::Display for PostId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Serialize)]
struct CreatePostRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatePostResponse {
    data: Option<CreatedPost>,
}

#[derive(Debug, Deserialize)]
struct CreatedPost {
    id: String,
}

/// Client for the X API, authenticated as a user with OAuth 1.0a.
pub struct XClient {
    base_url: String,
    credentials: XCredentials,
    client: Client,
}

impl XClient {
    /// Creates a new X client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the API (e.g., "https://api.twitter.com")
    /// * `credentials` - OAuth 1.0a consumer and access credentials
    pub fn new(base_url: impl Into<String>, credentials: XCredentials) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            client: Client::new(),
        }
    }

    /// Publishes a post and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The request cannot be signed
    /// - The API is not reachable
    /// - The API rejects the post
    /// - The response carries no post id
    pub fn create_post(&self, text: &str) -> AppResult<PostId> {
        let url = format!("{}/2/tweets", self.base_url);
        let nonce = Uuid::new_v4().simple().to_string();
        let authorization =
            authorization_header(&self.credentials, "POST", &url, &nonce, Utc::now().timestamp())?;

        debug!("Creating post ({} characters)", text.chars().count());

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .json(&CreatePostRequest { text })
            .send()
            .map_err(PublishError::Transport)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(PublishError::Rejected { status, body }.into());
        }

        let parsed: CreatePostResponse = response.json().map_err(|e| {
            PublishError::InvalidResponse(format!("Failed to parse create post response: {}", e))
        })?;

        let post = parsed.data.ok_or_else(|| {
            PublishError::InvalidResponse("Response did not contain post data".to_string())
        })?;

        debug!("Post created with id {}", post.id);
        Ok(PostId(post.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use mockito::Matcher;
    use serde_json::json;

    fn credentials() -> XCredentials {
        XCredentials {
            api_key: "ck".to_string(),
            api_secret: "cs".to_string(),
            access_token: "at".to_string(),
            access_secret: "as".to_string(),
        }
    }

    #[test]
    fn test_create_post_returns_id() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/2/tweets")
            .match_header(
                "authorization",
                Matcher::Regex(r#"^OAuth .*oauth_signature=""#.to_string()),
            )
            .match_body(Matcher::Json(json!({"text": "大吉\n#AI占い"})))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(r#"{"data": {"id": "1790000000000000000", "text": "大吉\n#AI占い"}}"#)
            .create();

        let client = XClient::new(server.url(), credentials());
        let id = client.create_post("大吉\n#AI占い").unwrap();

        assert_eq!(id, PostId("1790000000000000000".to_string()));
        assert_eq!(id.to_string(), "1790000000000000000");
        mock.assert();
    }

    #[test]
    fn test_create_post_rejection_carries_status_and_body() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/2/tweets")
            .with_status(403)
            .with_body(
                r#"{"detail": "You are not allowed to create a Tweet with duplicate content."}"#,
            )
            .create();

        let client = XClient::new(server.url(), credentials());
        match client.create_post("text").unwrap_err() {
            AppError::Publish(PublishError::Rejected { status, body }) => {
                assert_eq!(status, 403);
                assert!(body.contains("duplicate content"));
            }
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_create_post_without_data_is_invalid_response() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("POST", "/2/tweets")
            .with_status(200)
            .with_body(r#"{"errors": [{"message": "something"}]}"#)
            .create();

        let client = XClient::new(server.url(), credentials());
        let err = client.create_post("text").unwrap_err();
        assert!(matches!(
            err,
            AppError::Publish(PublishError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_unreachable_server_is_transport_error() {
        // Port 9 (discard) is not expected to accept HTTP connections.
        let client = XClient::new("http://127.0.0.1:9", credentials());
        let err = client.create_post("text").unwrap_err();
        assert!(matches!(err, AppError::Publish(PublishError::Transport(_))));
    }
}
