//! CSV roster ingestion.
//!
//! Header names are the upper-case employee field names (`ID`, `NOMS`,
//! `SEXE`, ...). Every accepted record has passed [`validate_employee`].

mod normalizer;
mod parser;

use crate::analytics::domain::Employee;
use crate::analytics::validation::{validate_employee, ValidationError};
use chrono::NaiveDate;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub use parser::parse_date;

#[derive(Debug, Error)]
pub enum RosterImportError {
    #[error("failed to read roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid roster CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("roster record {row}: {source}")]
    InvalidRecord {
        row: usize,
        #[source]
        source: RecordError,
    },
}

/// Why a single CSV record was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("missing required column {0}")]
    MissingField(&'static str),
    #[error("{field} has an unreadable value '{value}'")]
    InvalidField { field: &'static str, value: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub struct RosterImporter;

impl RosterImporter {
    /// `today` anchors AGE/ANCIENNETE when they have to be derived from dates.
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        today: NaiveDate,
    ) -> Result<Vec<Employee>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, today)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        today: NaiveDate,
    ) -> Result<Vec<Employee>, RosterImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);
        let mut employees = Vec::new();

        for (index, record) in csv_reader.deserialize::<parser::RosterRow>().enumerate() {
            let row = index + 1;
            let employee = record?
                .into_employee(today)
                .and_then(|employee| {
                    validate_employee(&employee)?;
                    Ok(employee)
                })
                .map_err(|source| RosterImportError::InvalidRecord { row, source })?;
            employees.push(employee);
        }

        info!(records = employees.len(), "roster imported");
        Ok(employees)
    }
}
