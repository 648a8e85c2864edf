// src/utils/a1.rs
//! A1-notation helpers for addressing worksheet ranges.

/// Converts a 1-based column index to its letter form (1 -> A, 27 -> AA).
pub fn column_letter(index: usize) -> String {
    let mut result = String::new();
    let mut n = index.max(1);
    while n > 0 {
        let rem = (n - 1) % 26;
        result.insert(0, (b'A' + rem as u8) as char);
        n = (n - 1) / 26;
    }
    result
}

/// Quotes a sheet title for use in a range, doubling embedded quotes.
pub fn quote_sheet(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// The whole sheet.
pub fn sheet_range(title: &str) -> String {
    quote_sheet(title)
}

/// A single 1-based row, e.g. `'stock'!1:1`.
pub fn row_range(title: &str, row: usize) -> String {
    format!("{}!{}:{}", quote_sheet(title), row, row)
}

/// A single 1-based column, e.g. `'sales'!B:B`.
pub fn column_range(title: &str, column: usize) -> String {
    let letter = column_letter(column);
    format!("{}!{}:{}", quote_sheet(title), letter, letter)
}
