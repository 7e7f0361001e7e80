//! Field normalization: raw dataset cells to typed values
//!
//! Every transform here is pure and total: unparseable input degrades to
//! None and never raises. Downstream stages treat None as "excluded from
//! aggregation, fails every filter comparison".

use crate::dataset::RawRecord;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use storegraph_common::{utils, AppRecord, AppType, Period};
use tracing::{debug, instrument};

/// First decimal-or-integer token of a free-text version string
static VERSION_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+|\d+").expect("Invalid version token regex"));

/// Parse an install count like "10,000+" into an integer
pub fn normalize_installs(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '+' && *c != ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Parse a price like "$4.99" or "0"; currency prefix is stripped
pub fn normalize_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p >= 0.0)
}

/// Parse a size into megabytes: "19M" -> 19.0, "512k" -> 0.5.
/// Sentinels like "Varies with device" have no numeric size.
pub fn normalize_size_mb(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if let Some(prefix) = trimmed.strip_suffix('M') {
        prefix.parse::<f64>().ok().filter(|s| s.is_finite())
    } else if let Some(prefix) = trimmed.strip_suffix('k') {
        prefix
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite())
            .map(|kb| kb / 1024.0)
    } else {
        None
    }
}

/// Parse a rating, keeping only the nominal 0..=5 domain
pub fn normalize_rating(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|r| r.is_finite() && (0.0..=5.0).contains(r))
}

/// Parse a review count
pub fn normalize_reviews(raw: &str) -> Option<u64> {
    raw.trim().parse().ok()
}

/// Extract the numeric Android version from strings like "4.0.3 and up"
pub fn normalize_android_version(raw: &str) -> Option<f64> {
    VERSION_TOKEN_REGEX
        .find(raw)
        .and_then(|token| token.as_str().parse::<f64>().ok())
}

/// Parse the last-updated date with the dataset's format
pub fn normalize_date(raw: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), format).ok()
}

/// Converts raw rows into cleaned records using the dataset conventions
#[derive(Debug, Clone)]
pub struct Normalizer {
    date_format: String,
    sentiment_default: f64,
}

impl Normalizer {
    pub fn new(date_format: impl Into<String>, sentiment_default: f64) -> Self {
        Self {
            date_format: date_format.into(),
            sentiment_default,
        }
    }

    pub fn from_config(config: &storegraph_config::DatasetConfig) -> Self {
        Self::new(config.date_format.clone(), config.sentiment_default)
    }

    /// Clean a single raw row. Derived fields (name length, revenue,
    /// period) are computed here from the cleaned primitives.
    pub fn normalize(&self, raw: &RawRecord) -> AppRecord {
        let installs = normalize_installs(&raw.installs);
        let price = normalize_price(&raw.price);
        // an absent price counts as 0.0, an absent install count leaves
        // revenue undefined
        let revenue = installs.map(|i| i as f64 * price.unwrap_or(0.0));
        let last_updated = normalize_date(&raw.last_updated, &self.date_format);

        AppRecord {
            name_length: utils::char_len(&raw.app),
            name: raw.app.clone(),
            category: raw.category.trim().to_string(),
            rating: normalize_rating(&raw.rating),
            reviews: normalize_reviews(&raw.reviews),
            installs,
            size_mb: normalize_size_mb(&raw.size),
            price,
            revenue,
            app_type: AppType::parse(&raw.app_type),
            content_rating: raw.content_rating.trim().to_string(),
            android_version: normalize_android_version(&raw.android_ver),
            last_updated,
            period: last_updated.map(Period::from_date),
            sentiment_subjectivity: raw
                .sentiment_subjectivity
                .as_deref()
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|s| s.is_finite())
                .unwrap_or(self.sentiment_default),
        }
    }

    /// Clean a full dataset
    #[instrument(skip(self, raw_records))]
    pub fn normalize_all(&self, raw_records: &[RawRecord]) -> Vec<AppRecord> {
        let records: Vec<AppRecord> = raw_records.iter().map(|r| self.normalize(r)).collect();
        debug!(records = records.len(), "Normalized dataset rows");
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn raw_row() -> RawRecord {
        RawRecord {
            app: "Photo Editor".to_string(),
            category: "ART_AND_DESIGN".to_string(),
            rating: "4.1".to_string(),
            reviews: "159".to_string(),
            size: "19M".to_string(),
            installs: "10,000+".to_string(),
            app_type: "Free".to_string(),
            price: "0".to_string(),
            content_rating: "Everyone".to_string(),
            last_updated: "January 7, 2018".to_string(),
            android_ver: "4.0.3 and up".to_string(),
            sentiment_subjectivity: None,
        }
    }

    #[test]
    fn test_normalize_installs() {
        assert_eq!(normalize_installs("10,000+"), Some(10_000));
        assert_eq!(normalize_installs("1,000,000+"), Some(1_000_000));
        assert_eq!(normalize_installs("0"), Some(0));
        assert_eq!(normalize_installs("Free"), None);
        assert_eq!(normalize_installs(""), None);
    }

    #[test]
    fn test_normalize_price() {
        assert_eq!(normalize_price("$4.99"), Some(4.99));
        assert_eq!(normalize_price("0"), Some(0.0));
        assert_eq!(normalize_price("Everyone"), None);
        assert_eq!(normalize_price("-1.0"), None);
    }

    #[test]
    fn test_normalize_size_mb() {
        assert_eq!(normalize_size_mb("19M"), Some(19.0));
        assert_eq!(normalize_size_mb("8.7M"), Some(8.7));
        assert_eq!(normalize_size_mb("512k"), Some(0.5));
        assert_eq!(normalize_size_mb("Varies with device"), None);
        assert_eq!(normalize_size_mb("19"), None);
    }

    #[test]
    fn test_normalize_rating_domain() {
        assert_eq!(normalize_rating("4.5"), Some(4.5));
        assert_eq!(normalize_rating("0"), Some(0.0));
        assert_eq!(normalize_rating("5"), Some(5.0));
        // the dataset's famous 19.0 outlier is outside the nominal domain
        assert_eq!(normalize_rating("19"), None);
        assert_eq!(normalize_rating("NaN"), None);
        assert_eq!(normalize_rating("great"), None);
    }

    #[test]
    fn test_normalize_android_version() {
        assert_eq!(normalize_android_version("4.0.3 and up"), Some(4.0));
        assert_eq!(normalize_android_version("Varies with device"), None);
        assert_eq!(normalize_android_version("5 and up"), Some(5.0));
    }

    #[test]
    fn test_normalize_date_and_period() {
        let date = normalize_date("January 7, 2018", "%B %d, %Y").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2018, 1, 7).unwrap());
        assert_eq!(Period::from_date(date), Period::new(2018, 1));
        assert_eq!(normalize_date("someday", "%B %d, %Y"), None);
    }

    #[test]
    fn test_normalize_record() {
        let normalizer = Normalizer::new("%B %d, %Y", 0.6);
        let record = normalizer.normalize(&raw_row());

        assert_eq!(record.installs, Some(10_000));
        assert_eq!(record.size_mb, Some(19.0));
        assert_eq!(record.price, Some(0.0));
        assert_eq!(record.revenue, Some(0.0));
        assert_eq!(record.app_type, Some(AppType::Free));
        assert_eq!(record.period, Some(Period::new(2018, 1)));
        assert_eq!(record.name_length, 12);
        assert_eq!(record.sentiment_subjectivity, 0.6);
    }

    #[test]
    fn test_revenue_requires_installs() {
        let normalizer = Normalizer::new("%B %d, %Y", 0.6);
        let mut raw = raw_row();
        raw.installs = "Varies".to_string();
        raw.price = "$2.99".to_string();
        let record = normalizer.normalize(&raw);
        assert_eq!(record.revenue, None);

        // paid app with parsed installs
        raw.installs = "1,000+".to_string();
        let record = normalizer.normalize(&raw);
        assert_eq!(record.revenue, Some(2990.0));
    }

    #[test]
    fn test_sentiment_default_applies() {
        let normalizer = Normalizer::new("%B %d, %Y", 0.6);
        let mut raw = raw_row();
        raw.sentiment_subjectivity = Some("0.25".to_string());
        assert_eq!(normalizer.normalize(&raw).sentiment_subjectivity, 0.25);

        raw.sentiment_subjectivity = Some("nan".to_string());
        assert_eq!(normalizer.normalize(&raw).sentiment_subjectivity, 0.6);
    }

    proptest! {
        #[test]
        fn prop_installs_with_commas_and_plus(n in 0u64..10_000_000_000) {
            // format with thousands separators and a trailing plus
            let digits = n.to_string();
            let mut grouped = String::new();
            for (i, c) in digits.chars().rev().enumerate() {
                if i > 0 && i % 3 == 0 {
                    grouped.push(',');
                }
                grouped.push(c);
            }
            let encoded: String = grouped.chars().rev().collect::<String>() + "+";
            prop_assert_eq!(normalize_installs(&encoded), Some(n));
        }

        #[test]
        fn prop_size_suffixes(mb in 0.0f64..2000.0) {
            let m = format!("{mb}M");
            let k = format!("{mb}k");
            prop_assert_eq!(normalize_size_mb(&m), Some(mb));
            prop_assert_eq!(normalize_size_mb(&k), Some(mb / 1024.0));
        }

        #[test]
        fn prop_normalizer_never_panics(cell in ".*") {
            normalize_installs(&cell);
            normalize_price(&cell);
            normalize_size_mb(&cell);
            normalize_rating(&cell);
            normalize_reviews(&cell);
            normalize_android_version(&cell);
            normalize_date(&cell, "%B %d, %Y");
        }
    }
}
