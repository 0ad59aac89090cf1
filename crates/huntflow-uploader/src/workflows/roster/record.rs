use std::fmt;

use serde::{Deserialize, Serialize};

/// One spreadsheet row describing a candidate to import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterRecord {
    pub position: String,
    pub full_name: String,
    pub salary: Option<f64>,
    pub comment: Option<String>,
    pub status_label: String,
}

impl RosterRecord {
    /// Salary rendered the way the applicant schema expects it (`"150000"`, `"1500.5"`).
    pub fn money(&self) -> Option<String> {
        self.salary.map(|salary| salary.to_string())
    }
}

/// Roster columns, in spreadsheet order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterColumn {
    Position,
    FullName,
    Salary,
    Comment,
    StatusLabel,
}

impl RosterColumn {
    pub const ORDER: [RosterColumn; 5] = [
        RosterColumn::Position,
        RosterColumn::FullName,
        RosterColumn::Salary,
        RosterColumn::Comment,
        RosterColumn::StatusLabel,
    ];

    pub fn index(self) -> usize {
        match self {
            RosterColumn::Position => 0,
            RosterColumn::FullName => 1,
            RosterColumn::Salary => 2,
            RosterColumn::Comment => 3,
            RosterColumn::StatusLabel => 4,
        }
    }
}

impl fmt::Display for RosterColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RosterColumn::Position => "position",
            RosterColumn::FullName => "full name",
            RosterColumn::Salary => "salary",
            RosterColumn::Comment => "comment",
            RosterColumn::StatusLabel => "status",
        };
        f.write_str(label)
    }
}
