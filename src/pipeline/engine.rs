// src/pipeline/engine.rs
use crate::config::AppConfig;
use crate::connectors::traits::SheetStore;
use crate::pipeline::input::collect_sales_data;
use crate::pipeline::surplus::calculate_surplus;
use crate::error::DataError;
use crate::strategies::traits::{SalesHistory, StockStrategy};
use crate::types::{
    parse_cell, ForecastEntry, SalesEntry, SheetRow, StockRecommendation, StockRow, SurplusEntry,
    ITEM_COUNT,
};
use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

/// Rows above this index hold item headings, not figures.
const HEADER_ROWS: usize = 1;

/// What one market cycle wrote to the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleReport {
    pub sales: SalesEntry,
    pub surplus: SurplusEntry,
    pub forecast: ForecastEntry,
    pub recommendation: StockRecommendation,
}

/// Runs one market cycle: input, sales, surplus, forecast, report.
pub struct DataAutomation<S, F> {
    config: AppConfig,
    store: S,
    strategy: F,
}

impl<S, F> DataAutomation<S, F>
where
    S: SheetStore,
    F: StockStrategy,
{
    pub fn new(config: AppConfig, store: S, strategy: F) -> Self {
        Self {
            config,
            store,
            strategy,
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn run<R, W>(&self, reader: &mut R, writer: &mut W) -> Result<CycleReport>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Cycle starting with strategy: {}", self.strategy.name());
        let sheets = &self.config.worksheets;

        let sales = collect_sales_data(reader, writer).await?;
        self.update_worksheet(&sales, &sheets.sales, writer).await?;

        let surplus = self.calculate_surplus_data(&sales, writer).await?;
        self.update_worksheet(&surplus, &sheets.surplus, writer).await?;

        let history = self.get_last_entries_sales().await?;
        let forecast = self.calculate_stock_data(&history, writer).await?;
        self.update_worksheet(&forecast, &sheets.stock, writer).await?;

        let recommendation = self.get_stock_values(&forecast).await?;
        writer
            .write_all(recommendation.to_string().as_bytes())
            .await?;
        writer.flush().await?;

        info!("Cycle complete. Forecast: {:?}", forecast.0);
        Ok(CycleReport {
            sales,
            surplus,
            forecast,
            recommendation,
        })
    }

    /// Appends one row to `sheet`. Repeated calls append duplicate rows.
    pub async fn update_worksheet<W>(
        &self,
        row: &impl SheetRow,
        sheet: &str,
        writer: &mut W,
    ) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        writer
            .write_all(format!("Updating {} worksheet...\n\n", sheet).as_bytes())
            .await?;
        writer.flush().await?;

        self.store
            .append_row(sheet, row.values())
            .await
            .with_context(|| format!("failed to update {} worksheet", sheet))?;

        writer
            .write_all(format!("{} worksheet updated successfully.\n\n", sheet).as_bytes())
            .await?;
        Ok(())
    }

    /// Compares the new sales with the latest stock row.
    pub async fn calculate_surplus_data<W>(
        &self,
        sales: &SalesEntry,
        writer: &mut W,
    ) -> Result<SurplusEntry>
    where
        W: AsyncWrite + Unpin,
    {
        writer.write_all(b"Calculating surplus data...\n\n").await?;
        let sheet = &self.config.worksheets.stock;

        let rows = self
            .store
            .get_all_values(sheet)
            .await
            .with_context(|| format!("failed to read {} worksheet", sheet))?;

        let last = rows
            .iter()
            .skip(HEADER_ROWS)
            .last()
            .ok_or_else(|| DataError::EmptySheet(sheet.clone()))?;
        let stock = StockRow::from_cells(sheet, last)?;

        let surplus = calculate_surplus(&stock, sales)?;
        info!("Stock {:?} - sales {:?} = surplus {:?}", stock.0, sales.0, surplus.0);
        Ok(surplus)
    }

    /// The most recent sales figures of every item column.
    pub async fn get_last_entries_sales(&self) -> Result<SalesHistory> {
        let sheet = &self.config.worksheets.sales;
        let window = self.strategy.window();
        let mut history = SalesHistory::default();

        for (index, column) in history.columns.iter_mut().enumerate() {
            let cells = self
                .store
                .col_values(sheet, index + 1)
                .await
                .with_context(|| format!("failed to read column {} of {}", index + 1, sheet))?;

            let data = cells.get(HEADER_ROWS..).unwrap_or_default();
            let start = data.len().saturating_sub(window);
            *column = data[start..]
                .iter()
                .map(|cell| parse_cell(sheet, cell))
                .collect::<Result<Vec<i64>, DataError>>()?;
        }

        Ok(history)
    }

    pub async fn calculate_stock_data<W>(
        &self,
        history: &SalesHistory,
        writer: &mut W,
    ) -> Result<ForecastEntry>
    where
        W: AsyncWrite + Unpin,
    {
        writer.write_all(b"Calculating stock data...\n\n").await?;
        let forecast = self.strategy.recommend(history)?;
        info!("Forecast from {:?}: {:?}", history.columns, forecast.0);
        Ok(forecast)
    }

    /// Pairs the forecast with the item headings of the stock sheet.
    pub async fn get_stock_values(&self, forecast: &ForecastEntry) -> Result<StockRecommendation> {
        let sheet = &self.config.worksheets.stock;
        let headings = self
            .store
            .row_values(sheet, 1)
            .await
            .with_context(|| format!("failed to read headings of {}", sheet))?;

        if headings.len() != ITEM_COUNT {
            warn!(
                "{} worksheet has {} headings, expected {}",
                sheet,
                headings.len(),
                ITEM_COUNT
            );
        }
        Ok(StockRecommendation::new(&headings, forecast))
    }
}
