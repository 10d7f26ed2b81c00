//! Post formatting and publishing.

use super::generate::FortuneMessage;
use crate::constants::POST_MAX_CHARS;
use crate::errors::AppResult;
use crate::history::{HistoryLock, HistoryStore};
use crate::social::{PostId, XClient};
use tracing::{info, warn};

/// Layout of a published post: the fortune, a newline, then the hashtag block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostTemplate {
    hashtags: String,
}

impl PostTemplate {
    /// Creates a template around a hashtag block.
    pub fn new(hashtags: impl Into<String>) -> Self {
        Self {
            hashtags: hashtags.into(),
        }
    }

    /// The fixed text appended after the fortune, newline included.
    pub fn suffix(&self) -> String {
        format!("\n{}", self.hashtags)
    }

    /// Characters left for the fortune once the suffix is accounted for.
    ///
    /// # Examples
    ///
    /// ```
    /// use uranai_bot::ops::publish::PostTemplate;
    ///
    /// let template = PostTemplate::new("#AI占い #今日の運勢 #未来の羅針盤");
    /// assert_eq!(template.budget(), 119);
    /// ```
    pub fn budget(&self) -> usize {
        POST_MAX_CHARS.saturating_sub(self.suffix().chars().count())
    }

    /// The full post text for a fortune.
    pub fn compose(&self, fortune: &str) -> String {
        format!("{}{}", fortune, self.suffix())
    }
}

/// Publishes a fortune and records its theme.
///
/// The caller holds the history lock for the whole call. History is written
/// only after the post is confirmed, so a failed post never marks its theme as
/// used.
///
/// # Errors
///
/// - `AppError::Publish` if the posting service fails; history is untouched
/// - `AppError::Storage` if the theme cannot be recorded after a successful post
pub fn publish_fortune(
    client: &XClient,
    store: &HistoryStore,
    lock: &HistoryLock,
    template: &PostTemplate,
    message: &FortuneMessage,
) -> AppResult<PostId> {
    let text = template.compose(&message.text);
    let post_id = client.create_post(&text)?;
    info!("Published post {} for theme {}", post_id, message.theme);

    if let Err(e) = store.append_locked(lock, message.theme.as_str()) {
        warn!(
            "Post {} was published but its theme could not be recorded",
            post_id
        );
        return Err(e);
    }

    Ok(post_id)
}
