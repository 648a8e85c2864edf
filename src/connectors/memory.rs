// src/connectors/memory.rs
use crate::connectors::traits::SheetStore;
use crate::error::StoreError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-process stand-in for the spreadsheet service.
#[derive(Debug, Default)]
pub struct MemorySheetStore {
    sheets: Mutex<HashMap<String, Vec<Vec<String>>>>,
    appends: Mutex<Vec<(String, Vec<i64>)>>,
}

impl MemorySheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a worksheet with the given rows.
    pub fn with_sheet(self, name: &str, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();
        self.sheets
            .lock()
            .unwrap()
            .insert(name.to_string(), rows);
        self
    }

    pub fn rows(&self, sheet: &str) -> Vec<Vec<String>> {
        self.sheets
            .lock()
            .unwrap()
            .get(sheet)
            .cloned()
            .unwrap_or_default()
    }

    /// Every append so far, in call order.
    pub fn appends(&self) -> Vec<(String, Vec<i64>)> {
        self.appends.lock().unwrap().clone()
    }

    fn with_rows<T>(
        &self,
        sheet: &str,
        f: impl FnOnce(&mut Vec<Vec<String>>) -> T,
    ) -> Result<T, StoreError> {
        let mut sheets = self.sheets.lock().unwrap();
        let rows = sheets
            .get_mut(sheet)
            .ok_or_else(|| StoreError::UnknownWorksheet(sheet.to_string()))?;
        Ok(f(rows))
    }
}

#[async_trait]
impl SheetStore for MemorySheetStore {
    async fn append_row(&self, sheet: &str, values: &[i64]) -> Result<(), StoreError> {
        self.with_rows(sheet, |rows| {
            rows.push(values.iter().map(|v| v.to_string()).collect())
        })?;
        self.appends
            .lock()
            .unwrap()
            .push((sheet.to_string(), values.to_vec()));
        Ok(())
    }

    async fn get_all_values(&self, sheet: &str) -> Result<Vec<Vec<String>>, StoreError> {
        self.with_rows(sheet, |rows| rows.clone())
    }

    async fn row_values(&self, sheet: &str, row: usize) -> Result<Vec<String>, StoreError> {
        self.with_rows(sheet, |rows| {
            row.checked_sub(1)
                .and_then(|i| rows.get(i))
                .cloned()
                .unwrap_or_default()
        })
    }

    async fn col_values(&self, sheet: &str, column: usize) -> Result<Vec<String>, StoreError> {
        self.with_rows(sheet, |rows| {
            let Some(index) = column.checked_sub(1) else {
                return Vec::new();
            };
            let mut values: Vec<String> = rows
                .iter()
                .map(|row| row.get(index).cloned().unwrap_or_default())
                .collect();
            // The service trims trailing blanks from a column.
            while values.last().is_some_and(|v| v.is_empty()) {
                values.pop();
            }
            values
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reads_follow_one_based_indexing() {
        let store = MemorySheetStore::new().with_sheet(
            "sales",
            &[&["cheese", "ham"], &["1", "2"], &["3", "4"]],
        );

        assert_eq!(store.row_values("sales", 1).await.unwrap(), vec!["cheese", "ham"]);
        assert_eq!(store.col_values("sales", 2).await.unwrap(), vec!["ham", "2", "4"]);
        assert!(store.row_values("sales", 0).await.unwrap().is_empty());
        assert!(store.row_values("sales", 9).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn appends_are_not_deduplicated() {
        let store = MemorySheetStore::new().with_sheet("sales", &[]);

        store.append_row("sales", &[1, 2]).await.unwrap();
        store.append_row("sales", &[1, 2]).await.unwrap();

        assert_eq!(store.get_all_values("sales").await.unwrap().len(), 2);
        assert_eq!(store.rows("sales"), vec![vec!["1", "2"], vec!["1", "2"]]);
        assert_eq!(store.appends().len(), 2);
    }

    #[tokio::test]
    async fn unknown_sheet_is_an_error() {
        let store = MemorySheetStore::new();
        let err = store.append_row("nope", &[1]).await.unwrap_err();
        assert!(matches!(err, StoreError::UnknownWorksheet(ref s) if s == "nope"));
    }
}
