use chrono::{Datelike, Month, NaiveDate};
use log::{info, warn};

use crate::{
    classifier::{ClassifyError, ColourClassifier},
    colour::ShiftCategory,
    sheets_client::{SheetCell, SheetsClient},
};

/// Enough to cover a month of shifts on the usher timetable.
pub const DEFAULT_RANGE: &str = "A1:Z60";

/// A timetable cell with its background colour decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedCell {
    pub reference: String,
    pub text: String,
    /// `None` for cells without a background colour.
    pub category: Option<Result<ShiftCategory, ClassifyError>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedSheet {
    pub title: String,
    pub cells: Vec<ClassifiedCell>,
}

/// English names of `today`'s month and the month after, which is how the
/// timetable's worksheets are titled.
pub fn candidate_sheet_names(today: NaiveDate) -> [String; 2] {
    let this_month = Month::try_from(today.month() as u8).unwrap_or(Month::January);
    [
        this_month.name().to_string(),
        this_month.succ().name().to_string(),
    ]
}

/// Titles from `titles` that appear in `names`, keeping workbook order. Each
/// title is picked at most once however often `names` repeats it.
pub fn select_sheets<'t>(titles: &'t [String], names: &[String]) -> Vec<&'t String> {
    let mut selected: Vec<&String> = Vec::new();
    for title in titles {
        if names.contains(title) && !selected.contains(&title) {
            selected.push(title);
        }
    }
    selected
}

pub fn classify_cells(cells: Vec<SheetCell>, classifier: &ColourClassifier) -> Vec<ClassifiedCell> {
    cells
        .into_iter()
        .map(|cell| {
            let category = cell.background.map(|colour| classifier.classify(colour));
            if let Some(Err(e)) = &category {
                warn!("Cell {}: {e}", cell.reference);
            }
            ClassifiedCell {
                reference: cell.reference,
                text: cell.text,
                category,
            }
        })
        .collect()
}

pub struct TimetableReader<'a> {
    sheets_client: SheetsClient<'a>,
    classifier: ColourClassifier,
}

impl<'a> TimetableReader<'a> {
    pub fn new(sheets_client: SheetsClient<'a>, classifier: ColourClassifier) -> Self {
        Self {
            sheets_client,
            classifier,
        }
    }

    pub async fn read_sheet(&self, title: &str, range: &str) -> anyhow::Result<ClassifiedSheet> {
        info!("Parsing sheet: {title} to find shifts");
        let cells = self.sheets_client.read_range(title, range).await?;
        Ok(ClassifiedSheet {
            title: title.to_string(),
            cells: classify_cells(cells, &self.classifier),
        })
    }

    /// Reads every worksheet whose title is in `sheet_names`, in workbook
    /// order.
    pub async fn read_sheets(
        &self,
        sheet_names: &[String],
        range: &str,
    ) -> anyhow::Result<Vec<ClassifiedSheet>> {
        let titles = self.sheets_client.worksheet_titles().await?;
        let selected = select_sheets(&titles, sheet_names);
        if selected.is_empty() {
            warn!("No worksheet named any of {sheet_names:?}; found {titles:?}");
        }
        let mut sheets = Vec::new();
        for title in selected {
            sheets.push(self.read_sheet(title, range).await?);
        }
        Ok(sheets)
    }

    /// Reads the worksheets for the current and the next month.
    pub async fn read_month_sheets(
        &self,
        today: NaiveDate,
        range: &str,
    ) -> anyhow::Result<Vec<ClassifiedSheet>> {
        self.read_sheets(&candidate_sheet_names(today), range).await
    }
}
