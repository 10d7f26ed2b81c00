//! Fortune text generation and length bounding.

use crate::ai::prompts::fortune_prompt;
use crate::ai::GeminiClient;
use crate::calendar::FortuneDate;
use crate::errors::{AppResult, GenerationError};
use crate::themes::Theme;
use tracing::{debug, info};

/// Generated fortune text bound to the theme that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FortuneMessage {
    /// Theme the text was generated for
    pub theme: Theme,
    /// Generated text, already bounded to the budget
    pub text: String,
}

/// Inputs that stay fixed for every generation in a run.
#[derive(Debug, Clone)]
pub struct GenerationSettings<'a> {
    /// Model name
    pub model: &'a str,
    /// Persona and style instructions
    pub persona: &'a str,
    /// Maximum characters of generated text
    pub budget: usize,
}

/// Shortens `text` to at most `budget` characters without cutting a word.
///
/// Text that already fits is returned unchanged. Otherwise the text is cut at
/// `budget` characters and then backed up to the last whitespace in the kept
/// part, dropping the partial word. When the cut already lands on whitespace,
/// or the kept part has no whitespace at all, the hard cut stands. Trailing
/// whitespace at the cut is removed, so a head whose only whitespace is
/// leading trims to an empty string.
///
/// Lengths are counted in `char`s. The result never exceeds `budget`, so
/// applying the transform again is a no-op.
///
/// # Examples
///
/// ```
/// use uranai_bot::ops::generate::trim_to_budget;
///
/// assert_eq!(trim_to_budget("good luck today", 12), "good luck");
/// assert_eq!(trim_to_budget("short", 12), "short");
/// assert_eq!(trim_to_budget("unbreakable", 5), "unbre");
/// ```
pub fn trim_to_budget(text: &str, budget: usize) -> String {
    let Some((cut, next)) = text.char_indices().nth(budget) else {
        return text.to_string();
    };

    let head = &text[..cut];
    let kept = if next.is_whitespace() {
        head
    } else {
        match head.char_indices().rev().find(|(_, c)| c.is_whitespace()) {
            Some((boundary, _)) => &head[..boundary],
            None => head,
        }
    };

    kept.trim_end().to_string()
}

/// Generates the fortune for `theme` on `date`.
///
/// The service response is stripped of surrounding whitespace and bounded with
/// [`trim_to_budget`].
///
/// # Errors
///
/// Returns `AppError::Generation` if the service fails or returns no usable text.
pub fn generate_fortune(
    client: &GeminiClient,
    settings: &GenerationSettings<'_>,
    theme: &Theme,
    date: &FortuneDate,
) -> AppResult<FortuneMessage> {
    info!("Generating fortune for {} ({})", date.label(), theme);

    let prompt = fortune_prompt(
        settings.persona,
        &date.label(),
        &date.weekday_name(),
        theme.as_str(),
        settings.budget,
    );
    let raw = client.generate(settings.model, &prompt)?;

    let stripped = raw.trim();
    if stripped.is_empty() {
        return Err(GenerationError::EmptyResponse.into());
    }

    let text = trim_to_budget(stripped, settings.budget);
    debug!(
        "Generated {} characters, kept {} (budget {})",
        stripped.chars().count(),
        text.chars().count(),
        settings.budget
    );

    Ok(FortuneMessage {
        theme: theme.clone(),
        text,
    })
}
