use crate::error::StoreError;
use async_trait::async_trait;

/// Row-oriented access to the worksheets of one spreadsheet document.
///
/// Rows and columns are 1-based, matching the spreadsheet's own numbering.
/// Cell values come back as the service formats them.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Appends `values` below the last filled row of `sheet`.
    async fn append_row(&self, sheet: &str, values: &[i64]) -> Result<(), StoreError>;

    /// Every row of `sheet`, heading row included.
    async fn get_all_values(&self, sheet: &str) -> Result<Vec<Vec<String>>, StoreError>;

    async fn row_values(&self, sheet: &str, row: usize) -> Result<Vec<String>, StoreError>;

    async fn col_values(&self, sheet: &str, column: usize) -> Result<Vec<String>, StoreError>;
}
