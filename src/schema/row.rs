// src/schema/row.rs

use tracing::trace;

use super::catalog::{find_column, CatalogColumn};
use super::label::split_composite_label;
use super::parsers::ParsedValue;
use super::types::{BilingualText, Column, Language, Row};
use crate::error::ExtractError;

/// Separates the two halves of a composite data cell (U+3000 ideographic space).
pub const VALUE_SEPARATOR: char = '\u{3000}';

/// Resolve `labels` against the catalog and, when `cells` is given, parse them into a
/// typed [`Row`].
///
/// Composite catalog entries expand into their two sub-columns. Without `cells` only the
/// column list is derived and the row is `None`.
pub fn parse_columns_and_row<L: AsRef<str>, C: AsRef<str>>(
    language: Language,
    labels: &[L],
    cells: Option<&[C]>,
) -> Result<(Vec<Column>, Option<Row>), ExtractError> {
    if let Some(cells) = cells {
        if cells.len() != labels.len() {
            return Err(ExtractError::RowLengthMismatch {
                cells: cells.len(),
                labels: labels.len(),
            });
        }
    }

    let mut columns = Vec::with_capacity(labels.len() + 2);
    let mut row = cells.map(|_| Row::default());

    for (i, raw_label) in labels.iter().enumerate() {
        let label = raw_label.as_ref().trim();
        let cell = cells.map(|c| c[i].as_ref().trim());

        let entry = find_column(label).ok_or_else(|| ExtractError::ColumnNotSupported {
            label: label.to_string(),
        })?;
        trace!(label, key = entry.key, "matched column");

        if entry.is_composite() {
            parse_composite(language, label, entry, cell, &mut columns, row.as_mut())?;
        } else {
            if let (Some(row), Some(cell)) = (row.as_mut(), cell) {
                let value = entry.parsers[0].parse(language, cell);
                store(row, label, entry.key, value)?;
            }
            columns.push(entry.to_column());
        }
    }

    Ok((columns, row))
}

fn parse_composite(
    language: Language,
    label: &str,
    entry: &CatalogColumn,
    cell: Option<&str>,
    columns: &mut Vec<Column>,
    row: Option<&mut Row>,
) -> Result<(), ExtractError> {
    let keys = entry.sub_keys();
    if keys.len() != 2 || entry.parsers.len() != 2 {
        return Err(ExtractError::ColumnKeyFormat {
            label: label.to_string(),
            key: entry.key.to_string(),
        });
    }

    let (lead, tail) =
        split_composite_label(language, label).ok_or_else(|| ExtractError::LabelFormat {
            label: label.to_string(),
        })?;

    if let (Some(row), Some(cell)) = (row, cell) {
        let values = split_value(cell).ok_or_else(|| ExtractError::ValueFormat {
            label: label.to_string(),
            value: cell.to_string(),
        })?;
        for ((key, parser), value) in keys.iter().zip(entry.parsers).zip(values) {
            store(row, label, key, parser.parse(language, value))?;
        }
    }

    for ((key, parser), sub_label) in keys.iter().zip(entry.parsers).zip([lead, tail]) {
        columns.push(Column {
            key: key.to_string(),
            label: BilingualText::new(language, sub_label),
            parsers: vec![*parser],
        });
    }
    Ok(())
}

/// `"1101　台泥"` → `["1101", "台泥"]`; both halves must be non-empty.
fn split_value(cell: &str) -> Option<[&str; 2]> {
    let (code, name) = cell.split_once(VALUE_SEPARATOR)?;
    let (code, name) = (code.trim(), name.trim());
    if code.is_empty() || name.is_empty() {
        None
    } else {
        Some([code, name])
    }
}

fn store(
    row: &mut Row,
    label: &str,
    key: &str,
    value: ParsedValue,
) -> Result<(), ExtractError> {
    row.set(key, value).map_err(|_| ExtractError::ColumnKeyFormat {
        label: label.to_string(),
        key: key.to_string(),
    })
}
