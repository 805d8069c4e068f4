//! Minimal Drive/Sheets REST client.
//!
//! Only what the intake path needs: resolve a spreadsheet, find its first
//! worksheet, and append one row.

use contato_core::{StoreError, StoreResult};
use reqwest::{Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::json;

use crate::auth::TokenProvider;
use crate::reference::SheetReference;

const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

/// Base URLs of the Google APIs used by [`SheetsClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleEndpoints {
    /// Sheets v4 base, e.g. `https://sheets.googleapis.com/v4`.
    pub sheets_base: String,
    /// Drive v3 base, e.g. `https://www.googleapis.com/drive/v3`.
    pub drive_base: String,
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            sheets_base: "https://sheets.googleapis.com/v4".to_string(),
            drive_base: "https://www.googleapis.com/drive/v3".to_string(),
        }
    }
}

impl GoogleEndpoints {
    /// Points both APIs at one base URL (useful against a mock server).
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            sheets_base: base.to_string(),
            drive_base: format!("{base}/drive/v3"),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
    #[serde(default)]
    index: i64,
}

/// Authenticated client for the spreadsheet calls.
#[derive(Debug)]
pub struct SheetsClient {
    http: reqwest::Client,
    endpoints: GoogleEndpoints,
    auth: TokenProvider,
}

impl SheetsClient {
    /// Creates a client sharing `http` with its token provider.
    pub fn new(http: reqwest::Client, endpoints: GoogleEndpoints, auth: TokenProvider) -> Self {
        Self {
            http,
            endpoints,
            auth,
        }
    }

    /// Resolves a reference to a spreadsheet key.
    ///
    /// Names go through the Drive files listing; keys are returned as-is
    /// and checked later by [`first_sheet_title`](Self::first_sheet_title).
    pub async fn resolve(&self, reference: &SheetReference) -> StoreResult<String> {
        match reference {
            SheetReference::Key(key) => Ok(key.clone()),
            SheetReference::Name(name) => self.find_by_name(name).await,
        }
    }

    async fn find_by_name(&self, name: &str) -> StoreResult<String> {
        let token = self.auth.access_token().await?;
        let query = format!(
            "name = '{}' and mimeType = '{SPREADSHEET_MIME}' and trashed = false",
            escape_query_literal(name)
        );
        let url = format!("{}/files", self.endpoints.drive_base.trim_end_matches('/'));

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id,name)"),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ])
            .send()
            .await
            .map_err(|e| StoreError::backend_with_source("spreadsheet lookup failed", e))?;

        let list: DriveFileList = parse_json(check_status(response, name).await?).await?;
        let id = list
            .files
            .into_iter()
            .next()
            .map(|f| f.id)
            .ok_or_else(|| StoreError::not_found(name))?;

        tracing::debug!(name, id = %id, "Resolved spreadsheet by name");
        Ok(id)
    }

    /// Title of the first worksheet (lowest index) of spreadsheet `key`.
    pub async fn first_sheet_title(&self, key: &str) -> StoreResult<String> {
        let token = self.auth.access_token().await?;
        let url = format!(
            "{}/spreadsheets/{key}",
            self.endpoints.sheets_base.trim_end_matches('/')
        );

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(&[("fields", "sheets.properties(sheetId,title,index)")])
            .send()
            .await
            .map_err(|e| StoreError::backend_with_source("spreadsheet metadata request failed", e))?;

        let metadata: SpreadsheetMetadata = parse_json(check_status(response, key).await?).await?;
        metadata
            .sheets
            .into_iter()
            .min_by_key(|s| s.properties.index)
            .map(|s| s.properties.title)
            .ok_or_else(|| StoreError::backend(format!("spreadsheet '{key}' has no worksheets")))
    }

    /// Appends one row after the last row with data in worksheet `title`.
    ///
    /// Values are written raw (no formula or number parsing).
    pub async fn append_row(&self, key: &str, title: &str, row: &[String]) -> StoreResult<()> {
        let token = self.auth.access_token().await?;
        let url = self.append_url(key, title)?;

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .query(&[("valueInputOption", "RAW")])
            .json(&json!({ "values": [row] }))
            .send()
            .await
            .map_err(|e| StoreError::backend_with_source("append request failed", e))?;

        check_status(response, key).await?;
        Ok(())
    }

    fn append_url(&self, key: &str, title: &str) -> StoreResult<Url> {
        let mut url = Url::parse(&self.endpoints.sheets_base)
            .map_err(|e| StoreError::backend_with_source("invalid Sheets base URL", e))?;
        let action = format!("{}:append", a1_range(title));
        url.path_segments_mut()
            .map_err(|()| StoreError::backend("Sheets base URL cannot have a path"))?
            .pop_if_empty()
            .extend(["spreadsheets", key, "values", action.as_str()]);
        Ok(url)
    }
}

/// `'<title>'!A1`, with single quotes in the title doubled.
fn a1_range(title: &str) -> String {
    format!("'{}'!A1", title.replace('\'', "''"))
}

/// Escapes a string for use inside a single-quoted Drive query literal.
fn escape_query_literal(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\'', "\\'")
}

async fn check_status(response: Response, reference: &str) -> StoreResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::NOT_FOUND {
        return Err(StoreError::not_found(reference));
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::backend(format!(
        "Google API returned HTTP {status}: {body}"
    )))
}

async fn parse_json<T: serde::de::DeserializeOwned>(response: Response) -> StoreResult<T> {
    response
        .json()
        .await
        .map_err(|e| StoreError::backend_with_source("unexpected Google API response", e))
}
