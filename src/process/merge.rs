// src/process/merge.rs

use tracing::{debug, warn};

use super::PageExtraction;
use crate::error::ExtractError;
use crate::schema::{BilingualText, CivilDate, Column, Row, Table};

/// Overlay where a source value only lands on fields the target has not set yet.
pub trait FillEmpty {
    fn fill_empty(&mut self, src: &Self);
}

/// Leaf values: once present they are never replaced.
macro_rules! fill_empty_leaf {
    ($($ty:ty),*) => {
        $(impl FillEmpty for $ty {
            fn fill_empty(&mut self, _src: &Self) {}
        })*
    };
}

fill_empty_leaf!(String, f64, CivilDate);

impl<T: FillEmpty + Clone> FillEmpty for Option<T> {
    fn fill_empty(&mut self, src: &Self) {
        if let Some(s) = src {
            match self {
                Some(t) => t.fill_empty(s),
                None => *self = Some(s.clone()),
            }
        }
    }
}

/// Positional: shared positions merge element-wise, surplus source elements are appended.
impl<T: FillEmpty + Clone> FillEmpty for Vec<T> {
    fn fill_empty(&mut self, src: &Self) {
        for (t, s) in self.iter_mut().zip(src) {
            t.fill_empty(s);
        }
        if src.len() > self.len() {
            self.extend_from_slice(&src[self.len()..]);
        }
    }
}

impl FillEmpty for BilingualText {
    fn fill_empty(&mut self, src: &Self) {
        self.english.fill_empty(&src.english);
        self.chinese.fill_empty(&src.chinese);
    }
}

impl FillEmpty for Column {
    fn fill_empty(&mut self, src: &Self) {
        if self.key.is_empty() {
            self.key = src.key.clone();
        }
        self.label.fill_empty(&src.label);
        if self.parsers.is_empty() {
            self.parsers = src.parsers.clone();
        }
    }
}

impl FillEmpty for Row {
    fn fill_empty(&mut self, src: &Self) {
        self.security_code.fill_empty(&src.security_code);
        self.security_name.fill_empty(&src.security_name);
        self.index_code.fill_empty(&src.index_code);
        self.index_name.fill_empty(&src.index_name);
        self.isin_code.fill_empty(&src.isin_code);
        self.issued_date.fill_empty(&src.issued_date);
        self.listed_date.fill_empty(&src.listed_date);
        self.maturity_date.fill_empty(&src.maturity_date);
        self.registration_date.fill_empty(&src.registration_date);
        self.announcement_date.fill_empty(&src.announcement_date);
        self.interest_rate.fill_empty(&src.interest_rate);
        self.market.fill_empty(&src.market);
        self.industrial_group.fill_empty(&src.industrial_group);
        self.cfi_code.fill_empty(&src.cfi_code);
        self.remark.fill_empty(&src.remark);
    }
}

impl FillEmpty for Table {
    fn fill_empty(&mut self, src: &Self) {
        if self.index == 0 {
            self.index = src.index;
        }
        self.title.fill_empty(&src.title);
        self.subtitle.fill_empty(&src.subtitle);
        self.updated_date.fill_empty(&src.updated_date);
        self.columns.fill_empty(&src.columns);
        self.rows.fill_empty(&src.rows);
    }
}

/// Merge the per-language extractions of one table index into bilingual tables.
///
/// Tables pair up by position. A count mismatch is reported but the merge still runs
/// over every position any language produced.
pub fn merge_languages(index: u32, pages: &[PageExtraction]) -> (Vec<Table>, Vec<ExtractError>) {
    let mut errors = Vec::new();
    for pair in pages.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);
        if previous.tables.len() != current.tables.len() {
            warn!(
                index,
                previous = %previous.language,
                previous_count = previous.tables.len(),
                current = %current.language,
                current_count = current.tables.len(),
                "table count mismatch"
            );
            errors.push(ExtractError::TableCountMismatch {
                index,
                language: current.language,
                count: current.tables.len(),
                previous: previous.language,
                previous_count: previous.tables.len(),
            });
        }
    }

    let per_language: Vec<Vec<Table>> = pages
        .iter()
        .map(|page| {
            page.tables
                .iter()
                .map(|table| {
                    let mut table = table.clone();
                    table.fill_empty(&page.template);
                    table
                })
                .collect()
        })
        .collect();

    let count = per_language.iter().map(Vec::len).max().unwrap_or(0);
    let merged: Vec<Table> = (0..count)
        .map(|i| {
            let mut acc = Table::default();
            for tables in &per_language {
                if let Some(table) = tables.get(i) {
                    acc.fill_empty(table);
                }
            }
            acc
        })
        .collect();

    debug!(index, tables = merged.len(), "merged languages");
    (merged, errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Language, LANGUAGES};

    fn page(language: Language, template: Table, tables: Vec<Table>) -> PageExtraction {
        PageExtraction {
            language,
            template,
            tables,
            errors: Vec::new(),
        }
    }

    fn code_label(language: Language) -> &'static str {
        match language {
            Language::English => "Security Code",
            Language::Chinese => "有價證券代號",
        }
    }

    fn listed(language: Language, code: &str, name: &str) -> Table {
        Table {
            columns: vec![
                Column {
                    key: "securityCode".into(),
                    label: BilingualText::new(language, code_label(language)),
                    parsers: Vec::new(),
                },
                Column {
                    key: "isinCode".into(),
                    label: BilingualText::both("ISIN Code", "國際證券辨識號碼(ISIN Code)"),
                    parsers: Vec::new(),
                },
            ],
            rows: vec![Row {
                security_code: Some(code.into()),
                security_name: Some(BilingualText::new(language, name)),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn template(language: Language, title: &str) -> Table {
        Table {
            title: BilingualText::new(language, title),
            updated_date: Some(CivilDate::new(2024, 1, 5)),
            ..Table::template(2)
        }
    }

    #[test]
    fn test_merge_fills_both_sides() {
        let pages = vec![
            page(
                Language::English,
                template(Language::English, "Listed"),
                vec![listed(Language::English, "1101", "Taiwan Cement")],
            ),
            page(
                Language::Chinese,
                template(Language::Chinese, "上市"),
                vec![listed(Language::Chinese, "1101", "台泥")],
            ),
        ];
        let (tables, errors) = merge_languages(2, &pages);

        assert!(errors.is_empty());
        assert_eq!(tables.len(), 1);
        let t = &tables[0];
        assert_eq!(t.index, 2);
        assert_eq!(t.title, BilingualText::both("Listed", "上市"));
        assert_eq!(t.updated_date, Some(CivilDate::new(2024, 1, 5)));
        assert_eq!(
            t.columns[0].label,
            BilingualText::both("Security Code", "有價證券代號")
        );
        assert_eq!(
            t.rows[0].security_name,
            Some(BilingualText::both("Taiwan Cement", "台泥"))
        );
        assert_eq!(t.rows[0].security_code.as_deref(), Some("1101"));
    }

    #[test]
    fn test_extracted_value_beats_template() {
        let mut table = listed(Language::English, "1101", "A");
        table.title = BilingualText::new(Language::English, "Sub-table title");
        let pages = vec![page(
            Language::English,
            template(Language::English, "Page title"),
            vec![table],
        )];
        let (tables, _) = merge_languages(2, &pages);
        assert_eq!(tables[0].title.english.as_deref(), Some("Sub-table title"));
    }

    #[test]
    fn test_count_mismatch_is_best_effort() {
        let pages = vec![
            page(
                Language::English,
                Table::template(4),
                vec![
                    listed(Language::English, "1", "A"),
                    listed(Language::English, "2", "B"),
                ],
            ),
            page(
                Language::Chinese,
                Table::template(4),
                vec![listed(Language::Chinese, "1", "甲")],
            ),
        ];
        let (tables, errors) = merge_languages(4, &pages);

        assert_eq!(errors.len(), 1);
        assert!(matches!(
            errors[0],
            ExtractError::TableCountMismatch {
                index: 4,
                count: 1,
                previous_count: 2,
                ..
            }
        ));
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[1].index, 4);
        assert_eq!(
            tables[1].rows[0].security_name,
            Some(BilingualText::new(Language::English, "B"))
        );
    }

    #[test]
    fn test_remerge_is_idempotent() {
        let pages: Vec<PageExtraction> = LANGUAGES
            .iter()
            .map(|&l| page(l, template(l, "T"), vec![listed(l, "1101", "N")]))
            .collect();
        let (tables, _) = merge_languages(2, &pages);
        let merged = tables[0].clone();

        let mut again = merged.clone();
        again.fill_empty(&merged);
        assert_eq!(again, merged);
    }

    #[test]
    fn test_template_is_not_aliased() {
        let tpl = template(Language::English, "T");
        let pages = vec![page(
            Language::English,
            tpl.clone(),
            vec![Table::default(), Table::default()],
        )];
        let (mut tables, _) = merge_languages(2, &pages);
        tables[0].title.english = Some("changed".into());
        assert_eq!(tables[1].title.english.as_deref(), Some("T"));
        assert_eq!(pages[0].template, tpl);
    }
}
