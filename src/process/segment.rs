// src/process/segment.rs

use tracing::{debug, warn};

use crate::error::ExtractError;
use crate::schema::{parse_columns_and_row, BilingualText, Language, Table};

/// Sub-tables cut from one page, plus the rows that failed to parse.
#[derive(Debug, Default)]
pub struct Segmented {
    pub tables: Vec<Table>,
    pub errors: Vec<ExtractError>,
}

/// Split a page's rows into sub-tables.
///
/// Row 0 is the header. A single-cell row closes the open sub-table; any wider row is
/// data for the open sub-table (opening one if needed). A page with no data rows still
/// yields one empty table carrying the header's columns.
pub fn segment_rows<S: AsRef<str>>(language: Language, rows: &[Vec<S>]) -> Segmented {
    let mut out = Segmented::default();
    let Some((header, body)) = rows.split_first() else {
        warn!(%language, "page table has no header row");
        return with_header_only(language, &[] as &[S], out);
    };

    // No boundary row observed on the site carries a subtitle, so this stays unset.
    let pending_subtitle: Option<BilingualText> = None;
    let mut open: Option<Table> = None;

    for (pos, row) in body.iter().enumerate() {
        if row.len() == 1 {
            if let Some(table) = open.take() {
                debug!(rows = table.rows.len(), "closing sub-table");
                out.tables.push(table);
            }
            continue;
        }

        let table = open.get_or_insert_with(|| Table {
            subtitle: pending_subtitle.clone(),
            ..Default::default()
        });

        match parse_columns_and_row(language, header.as_slice(), Some(row.as_slice())) {
            Ok((columns, parsed)) => {
                if table.columns.is_empty() {
                    table.columns = columns;
                }
                table.rows.extend(parsed);
            }
            Err(err) => {
                warn!(%language, row = pos + 1, error = %err, "skipping row");
                out.errors.push(err);
            }
        }
    }

    if let Some(table) = open.take() {
        out.tables.push(table);
    }

    if out.tables.is_empty() {
        return with_header_only(language, header.as_slice(), out);
    }
    out
}

fn with_header_only<S: AsRef<str>>(
    language: Language,
    header: &[S],
    mut out: Segmented,
) -> Segmented {
    match parse_columns_and_row::<S, S>(language, header, None) {
        Ok((columns, _)) => out.tables.push(Table {
            columns,
            ..Default::default()
        }),
        Err(err) => {
            warn!(%language, error = %err, "header-only table");
            out.errors.push(err);
        }
    }
    out
}
