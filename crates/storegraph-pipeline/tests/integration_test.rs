//! End-to-end pipeline tests: dataset file -> cleaned records -> scenario tables

use std::io::Write;
use storegraph_config::{defaults, DatasetConfig};
use storegraph_pipeline::{load_dataset, run_scenario, CellValue};

const HEADER: &str = "App,Category,Rating,Reviews,Size,Installs,Type,Price,Content Rating,Genres,Last Updated,Current Ver,Android Ver";

const ROWS: [&str; 4] = [
    // high-rated January free app in an A-category
    "Photo Editor,ART_AND_DESIGN,4.5,2000,25M,\"100,000+\",Free,0,Everyone,Art & Design,\"January 15, 2018\",1.0,4.1 and up",
    // February travel app
    "Travel Mate,TRAVEL_AND_LOCAL,4.4,1500,30M,\"50,000+\",Free,0,Everyone,Travel & Local,\"February 10, 2018\",1.0,4.4 and up",
    // paid January productivity app; revenue = 10,000 x 4.99
    "Pro Editor,PRODUCTIVITY,4.6,5000,40M,\"10,000+\",Paid,$4.99,Everyone,Productivity,\"January 20, 2018\",2.0,5.0 and up",
    // degraded row: unparseable rating, size, and android version
    "Weather NOW,WEATHER,NaN,12,Varies with device,500+,Free,0,Everyone,Weather,\"March 1, 2018\",1.0,Varies with device",
];

fn dataset_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{HEADER}").unwrap();
    for row in ROWS {
        writeln!(file, "{row}").unwrap();
    }
    file
}

fn dataset_config(file: &tempfile::NamedTempFile) -> DatasetConfig {
    DatasetConfig {
        path: file.path().to_string_lossy().into_owned(),
        date_format: "%B %d, %Y".to_string(),
        sentiment_default: 0.6,
    }
}

#[test]
fn test_dataset_cleaning() {
    let file = dataset_file();
    let records = load_dataset(&dataset_config(&file)).unwrap();
    assert_eq!(records.len(), 4);

    let photo = &records[0];
    assert_eq!(photo.installs, Some(100_000));
    assert_eq!(photo.size_mb, Some(25.0));
    assert_eq!(photo.revenue, Some(0.0));
    assert_eq!(photo.sentiment_subjectivity, 0.6);

    let pro = &records[2];
    assert_eq!(pro.revenue, Some(49_900.0));
    assert_eq!(pro.android_version, Some(5.0));

    let weather = &records[3];
    assert_eq!(weather.rating, None);
    assert_eq!(weather.size_mb, None);
    assert_eq!(weather.android_version, None);
    assert_eq!(weather.installs, Some(500));
}

#[test]
fn test_top_categories_scenario() {
    let file = dataset_file();
    let records = load_dataset(&dataset_config(&file)).unwrap();

    let table = run_scenario(&defaults::top_categories(), &records).unwrap();
    assert_eq!(
        table.column_names(),
        vec!["Category", "Avg_Rating", "Total_Reviews", "Total_Installs"]
    );

    // Only the two high-rated January apps qualify; ordered by installs
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[0][0], CellValue::Text("ART_AND_DESIGN".to_string()));
    assert_eq!(table.rows[0][1], CellValue::Number(4.5));
    assert_eq!(table.rows[0][3], CellValue::Number(100_000.0));
    assert_eq!(table.rows[1][0], CellValue::Text("PRODUCTIVITY".to_string()));
}

#[test]
fn test_free_vs_paid_scenario() {
    let file = dataset_file();
    let records = load_dataset(&dataset_config(&file)).unwrap();

    let table = run_scenario(&defaults::free_vs_paid(), &records).unwrap();
    assert_eq!(
        table.column_names(),
        vec!["Category", "Type", "Avg_Installs", "Avg_Revenue"]
    );

    // The three well-formed apps each survive: both free apps pass the
    // disjunction unconditionally, the paid app clears the revenue floor
    assert_eq!(table.rows.len(), 3);
    let paid_row = table
        .rows
        .iter()
        .find(|row| row[1] == CellValue::Text("Paid".to_string()))
        .expect("paid group present");
    assert_eq!(paid_row[0], CellValue::Text("PRODUCTIVITY".to_string()));
    assert_eq!(paid_row[3], CellValue::Number(49_900.0));
}

#[test]
fn test_cumulative_installs_scenario_keeps_unmapped_labels() {
    let file = dataset_file();
    let records = load_dataset(&dataset_config(&file)).unwrap();

    let table = run_scenario(&defaults::cumulative_installs(), &records).unwrap();
    assert_eq!(
        table.column_names(),
        vec!["Period", "Category", "Monthly_Installs", "MoM_Growth", "Highlight"]
    );

    // Only T/P categories qualify; each has a single period, so growth
    // is undefined everywhere
    assert_eq!(table.rows.len(), 2);
    for row in &table.rows {
        assert_eq!(row[3], CellValue::Null);
        assert_eq!(row[4], CellValue::Flag(false));
    }

    // dataset categories are not in the translation table and pass through
    assert!(table
        .rows
        .iter()
        .any(|row| row[1] == CellValue::Text("TRAVEL_AND_LOCAL".to_string())));
}

#[test]
fn test_category_map_scenario_excludes_prefixes() {
    let file = dataset_file();
    let records = load_dataset(&dataset_config(&file)).unwrap();

    let table = run_scenario(&defaults::category_map(), &records).unwrap();
    assert_eq!(
        table.column_names(),
        vec!["Country", "Category", "Total_Installs", "Highlight"]
    );

    // A-prefixed category is excluded; every kept row carries the
    // constant country column, and nothing clears the million threshold
    for row in &table.rows {
        assert_eq!(row[0], CellValue::Text("India".to_string()));
        assert_ne!(row[1], CellValue::Text("ART_AND_DESIGN".to_string()));
        assert_eq!(row[3], CellValue::Flag(false));
    }
}

#[test]
fn test_monthly_growth_scenario_yields_no_data_here() {
    let file = dataset_file();
    let records = load_dataset(&dataset_config(&file)).unwrap();

    // No E/C/B category without an "s" in its app name exists in this
    // dataset; the empty table is the no-data signal, not an error
    let table = run_scenario(&defaults::monthly_growth(), &records).unwrap();
    assert!(table.is_empty());
}

#[test]
fn test_size_vs_rating_record_listing() {
    let file = dataset_file();
    let records = load_dataset(&dataset_config(&file)).unwrap();

    // None of the synthetic categories are in the configured allow-list
    let table = run_scenario(&defaults::size_vs_rating(), &records).unwrap();
    assert_eq!(
        table.column_names(),
        vec!["App", "Category", "Size_MB", "Rating", "Installs", "Highlight"]
    );
    assert!(table.is_empty());
}
