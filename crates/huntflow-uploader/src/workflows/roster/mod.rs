mod parser;
mod record;

use std::io::Read;
use std::path::Path;

pub use record::{RosterColumn, RosterRecord};

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Spreadsheet(calamine::Error),
    NoWorksheet,
    MissingField { row: usize, column: RosterColumn },
    InvalidSalary { row: usize, value: String },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::Spreadsheet(err) => {
                write!(f, "unable to read roster spreadsheet: {}", err)
            }
            RosterImportError::NoWorksheet => write!(f, "roster spreadsheet has no worksheets"),
            RosterImportError::MissingField { row, column } => {
                write!(f, "roster row {} is missing the {} column", row, column)
            }
            RosterImportError::InvalidSalary { row, value } => {
                write!(f, "roster row {} has a malformed salary '{}'", row, value)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::Spreadsheet(err) => Some(err),
            RosterImportError::NoWorksheet
            | RosterImportError::MissingField { .. }
            | RosterImportError::InvalidSalary { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<calamine::Error> for RosterImportError {
    fn from(err: calamine::Error) -> Self {
        Self::Spreadsheet(err)
    }
}

/// Reads the candidate roster. Columns are positional: position, full name, salary,
/// comment, status; the first row is a header.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RosterRecord>, RosterImportError> {
        let path = path.as_ref();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

        if is_csv {
            let file = std::fs::File::open(path)?;
            Self::from_reader(file)
        } else {
            if !path.exists() {
                return Err(RosterImportError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("{} does not exist", path.display()),
                )));
            }
            parser::parse_workbook(path)
        }
    }

    /// CSV rosters only; workbooks need a seekable file and go through [`Self::from_path`].
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<RosterRecord>, RosterImportError> {
        parser::parse_csv(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn csv_roster_skips_header_and_blank_rows() {
        let csv = "Должность,ФИО,Ожидания по ЗП,Комментарий,Статус\n\
Backend Engineer,Иван Петров ,150000,strong candidate,Отказ\n\
,,,,\n\
Frontend Developer,Анна Смирнова,\"120 000 руб.\",,Выставлен оффер\n";

        let records = RosterImporter::from_reader(Cursor::new(csv)).expect("roster parses");
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].full_name, "Иван Петров");
        assert_eq!(records[0].status_label, "Отказ");
        assert_eq!(records[1].salary, Some(120000.0));
        assert_eq!(records[1].comment, None);
    }

    #[test]
    fn short_rows_report_the_missing_column() {
        let csv = "position,name,salary,comment,status\nQA Engineer,Олег Орлов\n";
        let error = RosterImporter::from_reader(Cursor::new(csv)).expect_err("row is incomplete");
        match error {
            RosterImportError::MissingField { row, column } => {
                assert_eq!(row, 2);
                assert_eq!(column, RosterColumn::StatusLabel);
            }
            other => panic!("expected missing field, got {other:?}"),
        }
    }

    #[test]
    fn from_path_propagates_io_errors() {
        for path in ["./does-not-exist.csv", "./does-not-exist.xlsx"] {
            match RosterImporter::from_path(path) {
                Err(RosterImportError::Io(_)) => {}
                other => panic!("expected io error for {path}, got {other:?}"),
            }
        }
    }
}
