use std::sync::LazyLock;

use log::{debug, info};
use regex::Regex;
use serde::Deserialize;

use crate::{
    UrlInvalidError,
    colour::Colour,
    requests::RequestClient,
    sheets_auth::{SHEETS_READONLY_SCOPE, ServiceAccountKey},
    text_manipulators::{a1_reference, sheet_range},
};

const SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const TITLES_FIELDS: &str = "sheets.properties.title";
const CELLS_FIELDS: &str = "sheets(data(startRow,startColumn,rowData(values(formattedValue,userEnteredFormat.backgroundColor))))";

static SPREADSHEET_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/spreadsheets/d/([a-zA-Z0-9-_]+)").unwrap());

/// Pulls the document id out of a Google Sheets URL.
pub fn extract_spreadsheet_id(url: &str) -> Result<String, UrlInvalidError> {
    SPREADSHEET_ID_REGEX
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| UrlInvalidError {
            url: url.to_string(),
        })
}

/// One cell of a worksheet range.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetCell {
    /// A1 reference, e.g. `D4`.
    pub reference: String,
    pub text: String,
    /// `None` when the cell has no background of its own.
    pub background: Option<Colour>,
}

pub struct SheetsClient<'a> {
    request_client: &'a RequestClient,
    spreadsheet_id: String,
    access_token: String,
}

impl<'a> SheetsClient<'a> {
    pub fn new(request_client: &'a RequestClient, spreadsheet_id: String, access_token: String) -> Self {
        Self {
            request_client,
            spreadsheet_id,
            access_token,
        }
    }

    /// Authenticates with the service account key and opens the document at
    /// `spreadsheet_url`.
    pub async fn connect(
        request_client: &'a RequestClient,
        spreadsheet_url: &str,
        key: &ServiceAccountKey,
    ) -> anyhow::Result<Self> {
        let spreadsheet_id = extract_spreadsheet_id(spreadsheet_url)?;
        let access_token = key
            .fetch_access_token(request_client, SHEETS_READONLY_SCOPE)
            .await?;
        info!("Authenticated as {}", key.client_email);
        Ok(Self::new(request_client, spreadsheet_id, access_token))
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    async fn get_spreadsheet(&self, query: &[(&str, &str)]) -> anyhow::Result<SpreadsheetResponse> {
        let request = self
            .request_client
            .client()
            .get(format!("{}/{}", SHEETS_API_URL, self.spreadsheet_id))
            .bearer_auth(&self.access_token)
            .query(query);
        self.request_client.fetch_json(request).await
    }

    /// Titles of every worksheet, in workbook order.
    pub async fn worksheet_titles(&self) -> anyhow::Result<Vec<String>> {
        let response = self.get_spreadsheet(&[("fields", TITLES_FIELDS)]).await?;
        Ok(titles_from_response(response))
    }

    /// Text and background colour of every cell in `range` (A1 notation) of
    /// worksheet `sheet_name`.
    pub async fn read_range(&self, sheet_name: &str, range: &str) -> anyhow::Result<Vec<SheetCell>> {
        let ranges = sheet_range(sheet_name, range);
        debug!("Reading {ranges}");
        let response = self
            .get_spreadsheet(&[("ranges", ranges.as_str()), ("fields", CELLS_FIELDS)])
            .await?;
        Ok(cells_from_response(response))
    }
}

#[derive(Debug, Deserialize)]
struct SpreadsheetResponse {
    #[serde(default)]
    sheets: Vec<SheetResponse>,
}

#[derive(Debug, Deserialize)]
struct SheetResponse {
    properties: Option<SheetProperties>,
    #[serde(default)]
    data: Vec<GridData>,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

// The API omits zero-valued fields, hence all the defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GridData {
    #[serde(default)]
    start_row: u32,
    #[serde(default)]
    start_column: u32,
    #[serde(default)]
    row_data: Vec<RowData>,
}

#[derive(Debug, Deserialize)]
struct RowData {
    #[serde(default)]
    values: Vec<CellData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CellData {
    formatted_value: Option<String>,
    user_entered_format: Option<CellFormat>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CellFormat {
    background_color: Option<Colour>,
}

fn titles_from_response(response: SpreadsheetResponse) -> Vec<String> {
    response
        .sheets
        .into_iter()
        .filter_map(|sheet| sheet.properties)
        .map(|properties| properties.title)
        .collect()
}

fn cells_from_response(response: SpreadsheetResponse) -> Vec<SheetCell> {
    let mut cells = Vec::new();
    for grid in response.sheets.into_iter().flat_map(|sheet| sheet.data) {
        for (row_offset, row) in grid.row_data.into_iter().enumerate() {
            for (column_offset, cell) in row.values.into_iter().enumerate() {
                cells.push(SheetCell {
                    reference: a1_reference(
                        grid.start_row + row_offset as u32,
                        grid.start_column + column_offset as u32,
                    ),
                    text: cell.formatted_value.unwrap_or_default(),
                    background: cell
                        .user_entered_format
                        .and_then(|format| format.background_color),
                });
            }
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference_table::{SCREEN_1_YELLOW, SCREEN_3_MAGENTA, UNASSIGNED_GREY};
    use pretty_assertions::assert_eq;

    #[test]
    fn spreadsheet_id_from_url() {
        assert_eq!(
            extract_spreadsheet_id(
                "https://docs.google.com/spreadsheets/d/1AbC-d_E2fGh/edit#gid=0"
            ),
            Ok("1AbC-d_E2fGh".to_string())
        );
        assert_eq!(
            extract_spreadsheet_id("https://docs.google.com/document/d/1AbC/edit"),
            Err(UrlInvalidError {
                url: "https://docs.google.com/document/d/1AbC/edit".to_string()
            })
        );
    }

    #[test]
    fn worksheet_titles_in_order() {
        let response: SpreadsheetResponse = serde_json::from_str(
            r#"{"sheets": [
                {"properties": {"title": "January"}},
                {"properties": {"title": "February"}},
                {"properties": {"title": "Contacts"}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            titles_from_response(response),
            vec!["January", "February", "Contacts"]
        );
    }

    #[test]
    fn cells_carry_references_text_and_colour() {
        // Range D4:E6; the API leaves out zero channels and unformatted cells.
        let response: SpreadsheetResponse = serde_json::from_str(
            r#"{"sheets": [{"data": [{
                "startRow": 3,
                "startColumn": 3,
                "rowData": [
                    {"values": [
                        {"formattedValue": "18:00 Alex",
                         "userEnteredFormat": {"backgroundColor": {"red": 1, "green": 0.8509804, "blue": 0.4}}},
                        {"userEnteredFormat": {"backgroundColor": {"red": 1, "blue": 1}}}
                    ]},
                    {},
                    {"values": [
                        {"formattedValue": "TBC"},
                        {"formattedValue": "",
                         "userEnteredFormat": {"backgroundColor": {"red": 0.8, "green": 0.8, "blue": 0.8}}}
                    ]}
                ]
            }]}]}"#,
        )
        .unwrap();

        assert_eq!(
            cells_from_response(response),
            vec![
                SheetCell {
                    reference: "D4".to_string(),
                    text: "18:00 Alex".to_string(),
                    background: Some(SCREEN_1_YELLOW),
                },
                SheetCell {
                    reference: "E4".to_string(),
                    text: String::new(),
                    background: Some(SCREEN_3_MAGENTA),
                },
                SheetCell {
                    reference: "D6".to_string(),
                    text: "TBC".to_string(),
                    background: None,
                },
                SheetCell {
                    reference: "E6".to_string(),
                    text: String::new(),
                    background: Some(UNASSIGNED_GREY),
                },
            ]
        );
    }

    #[test]
    fn range_starting_at_a1_omits_offsets() {
        let response: SpreadsheetResponse = serde_json::from_str(
            r#"{"sheets": [{"data": [{"rowData": [{"values": [{"formattedValue": "Screen 1"}]}]}]}]}"#,
        )
        .unwrap();
        let cells = cells_from_response(response);
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].reference, "A1");
    }
}
