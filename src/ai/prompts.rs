//! Prompt construction for fortune generation.

/// Default persona and style instructions.
///
/// Overridable with `URANAI_PERSONA`.
pub const DEFAULT_PERSONA: &str = r#"あなたは親しみやすい占い師です。
読んだ人が前向きな気持ちで一日を始められるよう、やさしく具体的な言葉で運勢を伝えてください。
絵文字は1つまで、ハッシュタグは付けないでください。"#;

/// Builds the generation prompt for one fortune.
///
/// # Arguments
///
/// * `persona` - Persona and style instructions
/// * `date_label` - Rendered local date (e.g., "2024年03月15日")
/// * `weekday` - Weekday name (e.g., "Friday")
/// * `theme` - Theme text
/// * `max_chars` - Character budget the text must fit in
pub fn fortune_prompt(
    persona: &str,
    date_label: &str,
    weekday: &str,
    theme: &str,
    max_chars: usize,
) -> String {
    format!(
        r#"{persona}

{date_label} の {weekday} の占いツイートです。
テーマ: {theme}
{max_chars}文字以内のTwitter投稿として適切な形式で文章を作成してください。"#
    )
}
