//! Render table: the contract handed to external renderers
//!
//! An ordered sequence of rows with named categorical and numeric
//! fields, plus an optional highlight column. This is everything a
//! renderer is allowed to know about a scenario result.

use serde::{Deserialize, Serialize};

/// Kind of a rendered column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Categorical,
    Numeric,
    /// Boolean highlight/flag column
    Flag,
}

/// One named output column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderColumn {
    pub name: String,
    pub kind: ColumnKind,
}

impl RenderColumn {
    pub fn categorical(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Categorical,
        }
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Numeric,
        }
    }

    pub fn flag(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Flag,
        }
    }
}

/// One output cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Flag(bool),
    /// Degraded/undefined value; renders as an empty cell
    Null,
}

impl CellValue {
    /// Numeric cell from an optional value
    pub fn from_option(value: Option<f64>) -> Self {
        match value {
            Some(v) => Self::Number(v),
            None => Self::Null,
        }
    }

    /// Plain-text rendering used by delimited sinks
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Flag(flag) => flag.to_string(),
            Self::Null => String::new(),
        }
    }
}

/// Finished tabular result of a scenario run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderTable {
    /// Scenario name the table belongs to
    pub title: String,
    pub columns: Vec<RenderColumn>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RenderTable {
    pub fn new(title: impl Into<String>, columns: Vec<RenderColumn>) -> Self {
        Self {
            title: title.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// An empty table is the "no data" signal, not an error
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_display() {
        assert_eq!(CellValue::Text("GAME".to_string()).display(), "GAME");
        assert_eq!(CellValue::Number(4.5).display(), "4.5");
        assert_eq!(CellValue::Flag(true).display(), "true");
        assert_eq!(CellValue::Null.display(), "");
    }

    #[test]
    fn test_table_emptiness() {
        let mut table = RenderTable::new(
            "test",
            vec![
                RenderColumn::categorical("Category"),
                RenderColumn::numeric("Total_Installs"),
            ],
        );
        assert!(table.is_empty());

        table.push_row(vec![
            CellValue::Text("GAME".to_string()),
            CellValue::Number(100.0),
        ]);
        assert!(!table.is_empty());
        assert_eq!(table.column_names(), vec!["Category", "Total_Installs"]);
    }

    #[test]
    fn test_cells_serialize_as_plain_json_values() {
        let cells = vec![
            CellValue::Text("GAME".to_string()),
            CellValue::Number(1.5),
            CellValue::Flag(false),
            CellValue::Null,
        ];
        let json = serde_json::to_string(&cells).unwrap();
        assert_eq!(json, r#"["GAME",1.5,false,null]"#);
    }
}
