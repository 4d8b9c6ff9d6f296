// src/store/sheets.rs
//
// Google Sheets v4 `values` API. The bearer token comes from configuration;
// how it was minted (service account, gcloud, …) is not our concern.
// Values are written RAW so timestamps come back exactly as sent.

use reqwest::{blocking::Client, Url};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{check_update_index, Row, RowStore, StoreError};
use crate::config::consts::SHEETS_API_BASE;

pub struct SheetsStore {
    client: Client,
    base: Url,
    spreadsheet_id: String,
    sheet: String,
    token: String,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Sheets may hand back numbers/bools for typed cells; flatten to text.
fn cell_to_string(v: Value) -> String {
    match v {
        Value::String(s) => s,
        Value::Null => s!(),
        other => other.to_string(),
    }
}

impl SheetsStore {
    pub fn new(spreadsheet_id: &str, sheet: &str, token: Option<&str>) -> Result<Self, StoreError> {
        Self::with_base(SHEETS_API_BASE, spreadsheet_id, sheet, token)
    }

    /// Same as `new` against another API root (a local stub, a proxy).
    pub fn with_base(
        base: &str,
        spreadsheet_id: &str,
        sheet: &str,
        token: Option<&str>,
    ) -> Result<Self, StoreError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| StoreError::MissingCredentials(s!("SPOTLOG_SHEETS_TOKEN is not set")))?;
        if spreadsheet_id.trim().is_empty() {
            return Err(StoreError::InvalidAddress(s!("spreadsheet id is empty")));
        }
        let base = Url::parse(base).map_err(|e| StoreError::InvalidAddress(e.to_string()))?;

        Ok(Self {
            client: Client::new(),
            base,
            spreadsheet_id: spreadsheet_id.trim().to_string(),
            sheet: sheet.to_string(),
            token: token.to_string(),
        })
    }

    /// `'Sheet name'`, quotes doubled, so any name is a valid A1 prefix.
    fn quoted_sheet(&self) -> String {
        join!("'", &self.sheet.replace('\'', "''"), "'")
    }

    /// `{base}/{id}/values/{last}`; `last` is percent-encoded as one segment.
    fn values_url(&self, last: &str) -> Result<Url, StoreError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidAddress(self.base.to_string()))?
            .pop_if_empty()
            .push(&self.spreadsheet_id)
            .push("values")
            .push(last);
        Ok(url)
    }

    fn check(resp: reqwest::blocking::Response) -> Result<reqwest::blocking::Response, StoreError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().unwrap_or_default();
        Err(StoreError::Api { status: status.as_u16(), body })
    }
}

impl RowStore for SheetsStore {
    fn append(&mut self, row: &[String]) -> Result<(), StoreError> {
        let range = join!(&self.quoted_sheet(), "!A1:append");
        let mut url = self.values_url(&range)?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "RAW")
            .append_pair("insertDataOption", "INSERT_ROWS");

        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&json!({ "values": [row] }))
            .send()?;
        Self::check(resp)?;
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<Row>, StoreError> {
        let url = self.values_url(&self.quoted_sheet())?;
        let resp = self.client.get(url).bearer_auth(&self.token).send()?;
        let text = Self::check(resp)?.text()?;
        let range: ValueRange = serde_json::from_str(&text)?;
        Ok(range
            .values
            .into_iter()
            .map(|r| r.into_iter().map(cell_to_string).collect())
            .collect())
    }

    fn update(&mut self, row_index: usize, row: &[String]) -> Result<(), StoreError> {
        let len = self.read_all()?.len();
        check_update_index(row_index, len)?;

        // A1 rows are 1-based.
        let range = format!("{}!A{}", self.quoted_sheet(), row_index + 1);
        let mut url = self.values_url(&range)?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let resp = self
            .client
            .put(url)
            .bearer_auth(&self.token)
            .json(&json!({ "values": [row] }))
            .send()?;
        Self::check(resp)?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("sheets:{}/{}", self.spreadsheet_id, self.sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_is_a_credentials_error() {
        let err = SheetsStore::new("abc", "Sheet1", None).err().unwrap();
        assert!(matches!(err, StoreError::MissingCredentials(_)));
    }

    #[test]
    fn url_encodes_sheet_name_and_keeps_custom_method() {
        let store = SheetsStore::new("abc", "車位 log", Some("t")).unwrap();
        let url = store.values_url(&join!(&store.quoted_sheet(), "!A1:append")).unwrap();
        let s = url.as_str();
        assert!(s.starts_with("https://sheets.googleapis.com/v4/spreadsheets/abc/values/"));
        assert!(s.ends_with("!A1:append"));
        assert!(!s.contains(' '));
    }

    #[test]
    fn typed_cells_flatten_to_text() {
        let vr: ValueRange = serde_json::from_str(r#"{"values":[["a",1,true,null]]}"#).unwrap();
        let row: Row = vr.values.into_iter().next().unwrap().into_iter().map(cell_to_string).collect();
        assert_eq!(row, row!["a", "1", "true", ""]);
    }
}
