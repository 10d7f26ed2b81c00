//! Fortune themes and the selector that picks one per run.
//!
//! The default strategy avoids any theme used in the last few posts. The weekday
//! strategy maps each day of the week to a fixed topic instead.

use crate::errors::{AppError, AppResult};
use crate::history::HistoryRecord;
use chrono::Weekday;
use rand::Rng;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// The built-in theme catalog.
pub const BUILTIN_THEMES: [&str; 13] = [
    "週のスタート時に運気を上げる方法",
    "ナイトルーティンと開運の関係",
    "夢占いの歴史と直感力の関係",
    "拡散されやすい運勢診断の統計的根拠",
    "選択式占いと心理学の関連性",
    "週末のリフレッシュが運勢に与える影響",
    "週間占いの根拠と歴史",
    "タロットカードが示す今日のヒント",
    "星座と季節の移ろい",
    "ラッキーカラーと心理効果",
    "数秘術で読み解く今日の数字",
    "朝の習慣と運気の関係",
    "人間関係を良くする言葉の力",
];

/// A topical angle for one generated fortune.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Theme(String);

impl Theme {
    /// Creates a theme from its text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The theme text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Theme {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// A non-empty list of themes.
#[derive(Debug, Clone)]
pub struct ThemeCatalog {
    themes: Vec<Theme>,
}

impl ThemeCatalog {
    /// Builds a catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `themes` is empty.
    pub fn new(themes: Vec<Theme>) -> AppResult<Self> {
        if themes.is_empty() {
            return Err(AppError::Config(
                "Theme catalog must contain at least one theme".to_string(),
            ));
        }
        Ok(Self { themes })
    }

    /// The 13 built-in themes.
    pub fn builtin() -> Self {
        Self {
            themes: BUILTIN_THEMES.iter().map(|&t| Theme::new(t)).collect(),
        }
    }

    /// All themes in catalog order.
    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    /// Number of themes.
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Picks a theme that is not among the last `window` posts.
    ///
    /// When every theme appears in the window the whole catalog is used instead,
    /// so a theme is always returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    /// use uranai_bot::history::HistoryRecord;
    /// use uranai_bot::themes::{Theme, ThemeCatalog};
    ///
    /// let catalog = ThemeCatalog::new(vec![Theme::from("a"), Theme::from("b")]).unwrap();
    /// let history = HistoryRecord::new(vec!["a".to_string()]);
    /// let mut rng = StdRng::seed_from_u64(7);
    ///
    /// assert_eq!(catalog.select(&history, 5, &mut rng).as_str(), "b");
    /// ```
    pub fn select<R: Rng + ?Sized>(
        &self,
        history: &HistoryRecord,
        window: usize,
        rng: &mut R,
    ) -> &Theme {
        let recent = history.recent(window);
        let candidates: Vec<&Theme> = self
            .themes
            .iter()
            .filter(|theme| !recent.iter().any(|used| used == theme.as_str()))
            .collect();

        if candidates.is_empty() {
            debug!(
                "Every theme used within the last {} posts, using full catalog",
                window
            );
            &self.themes[rng.gen_range(0..self.themes.len())]
        } else {
            candidates[rng.gen_range(0..candidates.len())]
        }
    }
}

/// Fixed topic for each day of the week.
pub fn weekday_theme(weekday: Weekday) -> Theme {
    let text = match weekday {
        Weekday::Mon => "週のスタート時に運気を上げる方法",
        Weekday::Tue => "ナイトルーティンと開運の関係",
        Weekday::Wed => "夢占いの歴史と直感力の関係",
        Weekday::Thu => "拡散されやすい運勢診断の統計的根拠",
        Weekday::Fri => "選択式占いと心理学の関連性",
        Weekday::Sat => "週末のリフレッシュが運勢に与える影響",
        Weekday::Sun => "週間占いの根拠と歴史",
    };
    Theme::new(text)
}

/// How a run chooses its theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeStrategy {
    /// Random theme avoiding recent history.
    #[default]
    Rotate,
    /// Fixed topic per weekday.
    Weekday,
}

impl FromStr for ThemeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rotate" => Ok(ThemeStrategy::Rotate),
            "weekday" => Ok(ThemeStrategy::Weekday),
            other => Err(format!(
                "unknown strategy '{}', expected 'rotate' or 'weekday'",
                other
            )),
        }
    }
}

impl fmt::Display for ThemeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeStrategy::Rotate => f.write_str("rotate"),
            ThemeStrategy::Weekday => f.write_str("weekday"),
        }
    }
}
