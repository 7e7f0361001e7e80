//! Core domain types shared across the storegraph workspace

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an app is distributed free or paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppType {
    Free,
    Paid,
}

impl AppType {
    /// Parse the dataset's `Type` column. Anything other than the two
    /// known values (including the dataset's stray "0" rows) is None.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Free" => Some(Self::Free),
            "Paid" => Some(Self::Paid),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Paid => "Paid",
        }
    }
}

impl fmt::Display for AppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar month a record falls in, truncated to the first day of the month
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Period {
    pub year: i32,
    /// 1-based month number
    pub month: u32,
}

impl Period {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Truncate a date to its year-month period
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The first calendar day of this period
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl std::str::FromStr for Period {
    type Err = crate::StoregraphError;

    /// Parse the `YYYY-MM` form produced by [`fmt::Display`]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| crate::StoregraphError::new(format!("invalid period '{}'", s)))?;
        let year: i32 = year
            .parse()
            .map_err(|_| crate::StoregraphError::new(format!("invalid period year '{}'", s)))?;
        let month: u32 = month
            .parse()
            .map_err(|_| crate::StoregraphError::new(format!("invalid period month '{}'", s)))?;
        if !(1..=12).contains(&month) {
            return Err(crate::StoregraphError::new(format!(
                "invalid period month '{}'",
                s
            )));
        }
        Ok(Self { year, month })
    }
}

/// One cleaned row of app store data.
///
/// Every derived field (name_length, revenue, period) is recomputed from
/// the cleaned primitives, never read from the raw source. Unparseable
/// cells are carried as None and excluded from filters and aggregation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppRecord {
    pub name: String,
    /// Character count of the app name
    pub name_length: usize,
    pub category: String,
    /// Nominal domain 0..=5; out-of-range values are None
    pub rating: Option<f64>,
    pub reviews: Option<u64>,
    pub installs: Option<u64>,
    /// Size in megabytes; "Varies with device" and friends are None
    pub size_mb: Option<f64>,
    pub price: Option<f64>,
    /// installs x price; an absent price counts as 0.0, an absent install
    /// count leaves revenue undefined
    pub revenue: Option<f64>,
    pub app_type: Option<AppType>,
    pub content_rating: String,
    pub android_version: Option<f64>,
    pub last_updated: Option<NaiveDate>,
    /// Year-month truncation of last_updated
    pub period: Option<Period>,
    pub sentiment_subjectivity: f64,
}
