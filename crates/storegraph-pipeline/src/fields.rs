//! Typed views of cleaned record fields
//!
//! Filters, metrics, and record tables only ever see cleaned values
//! through these accessors; a None view means the cell was unparseable
//! and is excluded from comparisons and aggregation.

use storegraph_common::AppRecord;
use storegraph_config::Field;

/// Numeric view of a field, if it has one
pub fn numeric(field: Field, record: &AppRecord) -> Option<f64> {
    match field {
        Field::Rating => record.rating,
        Field::Reviews => record.reviews.map(|v| v as f64),
        Field::Installs => record.installs.map(|v| v as f64),
        Field::SizeMb => record.size_mb,
        Field::Price => record.price,
        Field::Revenue => record.revenue,
        Field::AndroidVersion => record.android_version,
        Field::NameLength => Some(record.name_length as f64),
        Field::SentimentSubjectivity => Some(record.sentiment_subjectivity),
        Field::UpdatedMonth => record.period.map(|p| f64::from(p.month)),
        Field::Name | Field::Category | Field::ContentRating | Field::AppType => None,
    }
}

/// Textual view of a field, if it has one
pub fn text(field: Field, record: &AppRecord) -> Option<&str> {
    match field {
        Field::Name => Some(&record.name),
        Field::Category => Some(&record.category),
        Field::ContentRating => Some(&record.content_rating),
        Field::AppType => record.app_type.map(|t| t.as_str()),
        _ => None,
    }
}

/// Whether the field carries text rather than numbers
pub fn is_textual(field: Field) -> bool {
    matches!(
        field,
        Field::Name | Field::Category | Field::ContentRating | Field::AppType
    )
}

/// Output column header for a field
pub fn column_name(field: Field) -> &'static str {
    match field {
        Field::Name => "App",
        Field::Category => "Category",
        Field::ContentRating => "Content_Rating",
        Field::AppType => "Type",
        Field::Rating => "Rating",
        Field::Reviews => "Reviews",
        Field::Installs => "Installs",
        Field::SizeMb => "Size_MB",
        Field::Price => "Price",
        Field::Revenue => "Revenue",
        Field::AndroidVersion => "Android_Version",
        Field::NameLength => "App_Length",
        Field::SentimentSubjectivity => "Sentiment_Subjectivity",
        Field::UpdatedMonth => "Month",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storegraph_common::{AppType, Period};

    fn record() -> AppRecord {
        AppRecord {
            name: "Maps".to_string(),
            name_length: 4,
            category: "TRAVEL_AND_LOCAL".to_string(),
            rating: Some(4.3),
            reviews: Some(1200),
            installs: None,
            app_type: Some(AppType::Free),
            period: Some(Period::new(2018, 3)),
            ..AppRecord::default()
        }
    }

    #[test]
    fn test_numeric_views() {
        let r = record();
        assert_eq!(numeric(Field::Rating, &r), Some(4.3));
        assert_eq!(numeric(Field::Reviews, &r), Some(1200.0));
        assert_eq!(numeric(Field::Installs, &r), None);
        assert_eq!(numeric(Field::NameLength, &r), Some(4.0));
        assert_eq!(numeric(Field::UpdatedMonth, &r), Some(3.0));
        // textual fields have no numeric view
        assert_eq!(numeric(Field::Category, &r), None);
    }

    #[test]
    fn test_text_views() {
        let r = record();
        assert_eq!(text(Field::Name, &r), Some("Maps"));
        assert_eq!(text(Field::AppType, &r), Some("Free"));
        assert_eq!(text(Field::Rating, &r), None);
    }
}
