// src/error.rs

use std::fmt;

use thiserror::Error;

use crate::schema::Language;

/// Every failure the extraction pipeline can record.
///
/// Only `UnsupportedIndex` and `Encode` stop work outright; the rest are collected
/// into an [`ErrorReport`] while the pipeline carries on with whatever it has.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("table index {index} not supported")]
    UnsupportedIndex { index: u32 },

    #[error("fetching table {index} ({language}) from {url}: {message}")]
    Fetch {
        index: u32,
        language: Language,
        url: String,
        message: String,
    },

    #[error("table {index} ({language}): page has no data table")]
    MissingTable { index: u32, language: Language },

    #[error("column {label} not supported")]
    ColumnNotSupported { label: String },

    #[error("column {label} key format error: {key}")]
    ColumnKeyFormat { label: String, key: String },

    #[error("column {label} label format error")]
    LabelFormat { label: String },

    #[error("column {label} value format error: {value}")]
    ValueFormat { label: String, value: String },

    #[error("table row length not match: {cells} != {labels}")]
    RowLengthMismatch { cells: usize, labels: usize },

    #[error(
        "table {index}: table count mismatch between {language} ({count}) and {previous} ({previous_count})"
    )]
    TableCountMismatch {
        index: u32,
        language: Language,
        count: usize,
        previous: Language,
        previous_count: usize,
    },

    #[error("encoding tables: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Append-only collection of non-fatal errors gathered across a run.
#[derive(Debug, Default)]
pub struct ErrorReport {
    errors: Vec<ExtractError>,
}

impl ErrorReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, err: ExtractError) {
        self.errors.push(err);
    }

    pub fn append(&mut self, other: ErrorReport) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExtractError> {
        self.errors.iter()
    }

    pub fn into_inner(self) -> Vec<ExtractError> {
        self.errors
    }
}

impl Extend<ExtractError> for ErrorReport {
    fn extend<T: IntoIterator<Item = ExtractError>>(&mut self, iter: T) {
        self.errors.extend(iter);
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorReport {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_joins_messages_with_newlines() {
        let mut report = ErrorReport::new();
        assert!(report.is_empty());
        report.push(ExtractError::UnsupportedIndex { index: 13 });
        report.push(ExtractError::ColumnNotSupported {
            label: "Foo".into(),
        });

        assert_eq!(report.len(), 2);
        assert_eq!(
            report.to_string(),
            "table index 13 not supported\ncolumn Foo not supported"
        );
        assert_eq!(report.into_inner().len(), 2);
    }

    #[test]
    fn test_append_and_extend_keep_order() {
        let mut report = ErrorReport::new();
        report.extend([ExtractError::UnsupportedIndex { index: 0 }]);
        let mut later = ErrorReport::new();
        later.push(ExtractError::UnsupportedIndex { index: 14 });
        report.append(later);
        let indices: Vec<u32> = report
            .iter()
            .filter_map(|e| match e {
                ExtractError::UnsupportedIndex { index } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(indices, [0, 14]);
    }
}
