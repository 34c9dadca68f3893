//! Date bounds for the statistics and tobs routes.
//!
//! Dates are `YYYY-MM-DD` strings and are compared lexically, never parsed, so
//! a caller-supplied bound that is not a date still gets a deterministic answer.
//! The only parse happens when stepping back a year from the latest stored date.

use time::{macros::format_description, Date, Duration};

/// Length of the trailing tobs window in days. Plain day offset, not calendar-year aware.
pub const TOBS_WINDOW_DAYS: i64 = 365;

/// Inclusive date bounds, unbounded above when `end` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub start: String,
    pub end: Option<String>,
}

impl DateRange {
    pub fn starting(start: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: None,
        }
    }

    pub fn between(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: Some(end.into()),
        }
    }

    /// `[most_recent - 365 days, most_recent]`
    pub fn trailing_year(most_recent: &str) -> Result<Self, time::Error> {
        let format = format_description!("[year]-[month]-[day]");
        let end = Date::parse(most_recent, format)?;
        let start = end.saturating_sub(Duration::days(TOBS_WINDOW_DAYS));
        Ok(Self::between(start.format(format)?, most_recent))
    }
}

/// Earliest and most recent measurement dates in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateSpan {
    pub earliest: String,
    pub most_recent: String,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Date {0} is not found. Please try again.")]
    DateNotFound(String),
    #[error("Date {0} is not found. Please check the START date and try again.")]
    StartNotFound(String),
    #[error("Date {0} is not found. Please check the END date and try again.")]
    EndNotFound(String),
    #[error("Dates {start} and {end} are not found. Please try again.")]
    BothNotFound { start: String, end: String },
}

impl DateSpan {
    pub fn new(earliest: impl Into<String>, most_recent: impl Into<String>) -> Self {
        Self {
            earliest: earliest.into(),
            most_recent: most_recent.into(),
        }
    }

    /// A lone start date must fall inside the stored span.
    pub fn check_start(&self, start: &str) -> Result<(), RangeError> {
        if self.earliest.as_str() <= start && start <= self.most_recent.as_str() {
            Ok(())
        } else {
            Err(RangeError::DateNotFound(start.to_owned()))
        }
    }

    /// Start may not precede the span, end may not pass it. `start <= end` is
    /// not enforced: an inverted range passes and aggregates to nulls.
    pub fn check_range(&self, start: &str, end: &str) -> Result<(), RangeError> {
        let start_ok = start >= self.earliest.as_str();
        let end_ok = end <= self.most_recent.as_str();

        match (start_ok, end_ok) {
            (true, true) => Ok(()),
            (false, true) => Err(RangeError::StartNotFound(start.to_owned())),
            (true, false) => Err(RangeError::EndNotFound(end.to_owned())),
            (false, false) => Err(RangeError::BothNotFound {
                start: start.to_owned(),
                end: end.to_owned(),
            }),
        }
    }
}
