// src/connectors/sheets.rs
use crate::config::SpreadsheetConfig;
use crate::connectors::messages::{AppendValuesResponse, DriveFileList, ValueRange};
use crate::connectors::traits::SheetStore;
use crate::error::StoreError;
use crate::utils::a1;
use async_trait::async_trait;
use reqwest::{Client, Response};
use tracing::{debug, info};
use url::{ParseError, Url};

const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

/// Thin client over the Google Sheets v4 values API.
///
/// Authentication is a bearer token handed in through configuration.
pub struct GoogleSheetsClient {
    access_token: String,
    http_client: Client,
    sheets_base_url: Url,
    spreadsheet_id: String,
}

impl GoogleSheetsClient {
    /// Builds a client for an already known spreadsheet id.
    pub fn new(
        access_token: String,
        sheets_base_url: &str,
        spreadsheet_id: String,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            access_token,
            http_client: Client::new(),
            sheets_base_url: Url::parse(sheets_base_url)?,
            spreadsheet_id,
        })
    }

    /// Opens the configured spreadsheet, looking its id up by name through
    /// Drive when no id is configured.
    pub async fn connect(config: &SpreadsheetConfig) -> Result<Self, StoreError> {
        let id = match &config.id {
            Some(id) if !id.trim().is_empty() => id.trim().to_string(),
            _ => {
                let http_client = Client::new();
                resolve_spreadsheet_id(
                    &http_client,
                    &config.drive_base_url,
                    &config.access_token,
                    &config.name,
                )
                .await?
            }
        };

        info!("Using spreadsheet '{}' ({})", config.name, id);
        Self::new(config.access_token.clone(), &config.sheets_base_url, id)
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// `{base}/v4/spreadsheets/{id}/values/{range}{suffix}?{query}`
    fn values_url(
        &self,
        range: &str,
        suffix: &str,
        query: &[(&str, &str)],
    ) -> Result<Url, StoreError> {
        let mut url = self.sheets_base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl(ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(["v4", "spreadsheets", self.spreadsheet_id.as_str(), "values"])
            .push(&format!("{}{}", range, suffix));

        if !query.is_empty() {
            url.set_query(Some(&serde_urlencoded::to_string(query)?));
        }
        Ok(url)
    }

    async fn get_values(
        &self,
        sheet: &str,
        range: &str,
        major_dimension: &str,
    ) -> Result<ValueRange, StoreError> {
        let url = self.values_url(range, "", &[("majorDimension", major_dimension)])?;
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        let response = check_status(response)
            .await
            .map_err(|e| unknown_worksheet(e, sheet))?;
        Ok(response.json::<ValueRange>().await?)
    }
}

#[async_trait]
impl SheetStore for GoogleSheetsClient {
    async fn append_row(&self, sheet: &str, values: &[i64]) -> Result<(), StoreError> {
        let url = self.values_url(
            &a1::sheet_range(sheet),
            ":append",
            &[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ],
        )?;
        debug!("POST {}", url);

        let response = self
            .http_client
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&ValueRange::single_row(values))
            .send()
            .await?;

        let resp: AppendValuesResponse = check_status(response)
            .await
            .map_err(|e| unknown_worksheet(e, sheet))?
            .json()
            .await?;
        info!(
            "Appended {:?} to '{}' (range: {:?}, rows: {:?})",
            values,
            sheet,
            resp.updates.as_ref().and_then(|u| u.updated_range.as_deref()),
            resp.updates.as_ref().and_then(|u| u.updated_rows),
        );
        Ok(())
    }

    async fn get_all_values(&self, sheet: &str) -> Result<Vec<Vec<String>>, StoreError> {
        let range = self.get_values(sheet, &a1::sheet_range(sheet), "ROWS").await?;
        Ok(range.into_strings())
    }

    async fn row_values(&self, sheet: &str, row: usize) -> Result<Vec<String>, StoreError> {
        let range = self.get_values(sheet, &a1::row_range(sheet, row), "ROWS").await?;
        Ok(range.into_strings().into_iter().next().unwrap_or_default())
    }

    async fn col_values(&self, sheet: &str, column: usize) -> Result<Vec<String>, StoreError> {
        let range = self
            .get_values(sheet, &a1::column_range(sheet, column), "COLUMNS")
            .await?;
        Ok(range.into_strings().into_iter().next().unwrap_or_default())
    }
}

/// Finds the id of the spreadsheet called `name` through Drive v3.
async fn resolve_spreadsheet_id(
    http_client: &Client,
    drive_base_url: &str,
    access_token: &str,
    name: &str,
) -> Result<String, StoreError> {
    let url = drive_files_url(drive_base_url, name)?;
    debug!("GET {}", url);

    let response = http_client
        .get(url)
        .bearer_auth(access_token)
        .send()
        .await?;

    let listing: DriveFileList = check_status(response).await?.json().await?;
    listing
        .files
        .into_iter()
        .find(|f| f.name == name)
        .map(|f| f.id)
        .ok_or_else(|| StoreError::SpreadsheetNotFound(name.to_string()))
}

fn drive_files_url(drive_base_url: &str, name: &str) -> Result<Url, StoreError> {
    let mut url = Url::parse(drive_base_url)?;
    url.path_segments_mut()
        .map_err(|_| StoreError::InvalidUrl(ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend(["drive", "v3", "files"]);

    let query = format!(
        "name = '{}' and mimeType = '{}' and trashed = false",
        name.replace('\\', "\\\\").replace('\'', "\\'"),
        SPREADSHEET_MIME
    );
    let params = [
        ("q", query.as_str()),
        ("fields", "files(id,name)"),
        ("pageSize", "10"),
    ];
    url.set_query(Some(&serde_urlencoded::to_string(params)?));
    Ok(url)
}

async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status { status, url, body })
}

/// The service answers a range on a missing sheet with a 400
/// "Unable to parse range" rather than a 404.
fn unknown_worksheet(err: StoreError, sheet: &str) -> StoreError {
    match err {
        StoreError::Status { status, ref body, .. }
            if status == reqwest::StatusCode::BAD_REQUEST
                && body.contains("Unable to parse range") =>
        {
            StoreError::UnknownWorksheet(sheet.to_string())
        }
        other => other,
    }
}
