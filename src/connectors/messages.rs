// src/connectors/messages.rs
use serde::{Deserialize, Serialize};

/// `ValueRange` resource of the Sheets v4 API.
/// The service omits `values` entirely when the range is empty.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub major_dimension: Option<String>,

    #[serde(default)]
    pub values: Vec<Vec<serde_json::Value>>,
}

impl ValueRange {
    /// One row of integers, the body of an append request.
    pub fn single_row(values: &[i64]) -> Self {
        Self {
            range: None,
            major_dimension: Some("ROWS".to_string()),
            values: vec![values.iter().map(|v| serde_json::Value::from(*v)).collect()],
        }
    }

    /// Cells rendered as text, the way the sheet displays them.
    pub fn into_strings(self) -> Vec<Vec<String>> {
        self.values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect()
    }
}

fn cell_to_string(cell: serde_json::Value) -> String {
    match cell {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Response of `values:append`. Only the fields logged are kept.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendValuesResponse {
    #[serde(default)]
    pub updates: Option<UpdateValuesResponse>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateValuesResponse {
    #[serde(default)]
    pub updated_range: Option<String>,

    #[serde(default)]
    pub updated_rows: Option<u32>,
}

/// Drive v3 `files.list` response, used to resolve a spreadsheet by name.
#[derive(Debug, Deserialize)]
pub struct DriveFileList {
    #[serde(default)]
    pub files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
pub struct DriveFile {
    pub id: String,
    pub name: String,
}
