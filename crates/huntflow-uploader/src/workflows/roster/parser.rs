use std::io::Read;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use super::record::{RosterColumn, RosterRecord};
use super::RosterImportError;

static EMPTY_CELL: RawCell = RawCell::Empty;

/// Spreadsheet cell reduced to what the roster cares about.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RawCell {
    Empty,
    Text(String),
    Number(f64),
}

impl RawCell {
    fn text(&self) -> Option<String> {
        match self {
            RawCell::Empty => None,
            RawCell::Text(value) => {
                let trimmed = value.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            RawCell::Number(value) => Some(value.to_string()),
        }
    }

    fn is_blank(&self) -> bool {
        self.text().is_none()
    }
}

pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Vec<RosterRecord>, RosterImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, row) in csv_reader.records().enumerate() {
        let row = row?;
        let cells: Vec<RawCell> = row
            .iter()
            .map(|value| RawCell::Text(value.to_string()))
            .collect();
        // Header occupies spreadsheet row 1.
        if let Some(record) = record_from_cells(index + 2, &cells)? {
            records.push(record);
        }
    }

    Ok(records)
}

pub(crate) fn parse_workbook(path: &Path) -> Result<Vec<RosterRecord>, RosterImportError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(RosterImportError::NoWorksheet)?;
    let range = workbook.worksheet_range(&sheet)?;
    let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
    let mut records = Vec::new();

    for (offset, row) in range.rows().enumerate().skip(1) {
        let cells: Vec<RawCell> = row.iter().map(cell_from_data).collect();
        if let Some(record) = record_from_cells(first_row + offset + 1, &cells)? {
            records.push(record);
        }
    }

    Ok(records)
}

pub(crate) fn cell_from_data(cell: &Data) -> RawCell {
    match cell {
        Data::Empty => RawCell::Empty,
        Data::String(value) => RawCell::Text(value.clone()),
        Data::Float(value) => RawCell::Number(*value),
        Data::Int(value) => RawCell::Number(*value as f64),
        Data::Bool(value) => RawCell::Text(value.to_string()),
        Data::DateTime(value) => RawCell::Text(value.to_string()),
        Data::DateTimeIso(value) | Data::DurationIso(value) => RawCell::Text(value.clone()),
        Data::Error(err) => RawCell::Text(format!("#ERR({:?})", err)),
    }
}

/// Build a record from one row; `Ok(None)` for rows with no content at all.
pub(crate) fn record_from_cells(
    row: usize,
    cells: &[RawCell],
) -> Result<Option<RosterRecord>, RosterImportError> {
    let cell = |column: RosterColumn| cells.get(column.index()).unwrap_or(&EMPTY_CELL);

    if RosterColumn::ORDER.iter().all(|column| cell(*column).is_blank()) {
        return Ok(None);
    }

    let required = |column: RosterColumn| {
        cell(column)
            .text()
            .ok_or(RosterImportError::MissingField { row, column })
    };

    Ok(Some(RosterRecord {
        position: required(RosterColumn::Position)?,
        full_name: required(RosterColumn::FullName)?,
        salary: parse_salary(row, cell(RosterColumn::Salary))?,
        comment: cell(RosterColumn::Comment).text(),
        status_label: required(RosterColumn::StatusLabel)?,
    }))
}

fn parse_salary(row: usize, cell: &RawCell) -> Result<Option<f64>, RosterImportError> {
    let text = match cell {
        RawCell::Number(value) => return Ok(Some(*value)),
        RawCell::Empty => return Ok(None),
        RawCell::Text(text) => text,
    };

    // "150 000 руб." and "1 500,50" both occur in hand-maintained rosters.
    let numeric: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if !numeric.chars().any(|c| c.is_ascii_digit()) {
        return Ok(None);
    }

    numeric
        .trim_matches('.')
        .parse::<f64>()
        .map(Some)
        .map_err(|_| RosterImportError::InvalidSalary {
            row,
            value: text.trim().to_string(),
        })
}
