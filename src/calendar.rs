//! The local posting date.

use crate::constants::{
    DATE_FORMAT_COMPACT, DATE_FORMAT_ISO, PROMPT_DATE_FORMAT, PROMPT_WEEKDAY_FORMAT,
};
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone, Weekday};
use std::str::FromStr;

/// The calendar date a fortune is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FortuneDate(NaiveDate);

impl FortuneDate {
    /// Wraps a calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// The date of `now` as seen at `offset`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{FixedOffset, TimeZone, Utc};
    /// use uranai_bot::calendar::FortuneDate;
    ///
    /// // 20:00 UTC is already the next day in Tokyo.
    /// let now = Utc.with_ymd_and_hms(2024, 3, 14, 20, 0, 0).unwrap();
    /// let jst = FixedOffset::east_opt(9 * 3600).unwrap();
    /// assert_eq!(FortuneDate::at_offset(now, jst).label(), "2024年03月15日");
    /// ```
    pub fn at_offset<Tz: TimeZone>(now: DateTime<Tz>, offset: FixedOffset) -> Self {
        Self(now.with_timezone(&offset).date_naive())
    }

    /// Parses `YYYY-MM-DD` or `YYYYMMDD`.
    pub fn parse(input: &str) -> AppResult<Self> {
        NaiveDate::from_str(input)
            .or_else(|_| NaiveDate::parse_from_str(input, DATE_FORMAT_COMPACT))
            .map(Self)
            .map_err(|e| {
                AppError::Config(format!(
                    "Invalid date format '{}': {} (expected {} or {})",
                    input, e, DATE_FORMAT_ISO, DATE_FORMAT_COMPACT
                ))
            })
    }

    /// The underlying date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Day of the week.
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Date rendered for prompts, e.g. `2024年03月15日`.
    pub fn label(&self) -> String {
        self.0.format(PROMPT_DATE_FORMAT).to_string()
    }

    /// English weekday name, e.g. `Friday`.
    pub fn weekday_name(&self) -> String {
        self.0.format(PROMPT_WEEKDAY_FORMAT).to_string()
    }
}
