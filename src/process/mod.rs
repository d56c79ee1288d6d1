// src/process/mod.rs
pub mod merge;
pub mod page;
pub mod segment;

use tracing::{info, instrument, warn};

use crate::error::ExtractError;
use crate::schema::{parsers::parse_date, BilingualText, Language, Table};

pub use merge::{merge_languages, FillEmpty};
pub use page::{parse_page, RawPage};
pub use segment::{segment_rows, Segmented};

/// Everything one (index, language) page produced. Built once per fetch and handed back
/// to the orchestrator; nothing else holds on to it.
#[derive(Debug)]
pub struct PageExtraction {
    pub language: Language,
    /// Page-level fields (index, title, update date) overlaid onto every table.
    pub template: Table,
    pub tables: Vec<Table>,
    pub errors: Vec<ExtractError>,
}

impl PageExtraction {
    /// A page that produced nothing, e.g. because its fetch failed.
    pub fn failed(index: u32, language: Language, err: ExtractError) -> Self {
        Self {
            language,
            template: Table::template(index),
            tables: Vec::new(),
            errors: vec![err],
        }
    }
}

/// Turn one decoded HTML page into its template and sub-tables.
#[instrument(level = "debug", skip(html), fields(len = html.len()))]
pub fn extract_page(index: u32, language: Language, html: &str) -> PageExtraction {
    let raw = parse_page(html);

    let mut template = Table::template(index);
    if let Some(title) = raw.title {
        template.title = BilingualText::new(language, title);
    }
    if let Some(updated) = raw.updated {
        template.updated_date = parse_date(&updated);
        if template.updated_date.is_none() {
            warn!(index, %language, updated = %updated, "unrecognised update date");
        }
    }

    let Some(rows) = raw.rows else {
        warn!(index, %language, "no data table on page");
        return PageExtraction {
            language,
            template,
            tables: Vec::new(),
            errors: vec![ExtractError::MissingTable { index, language }],
        };
    };

    let Segmented { tables, errors } = segment_rows(language, &rows);
    info!(
        index,
        %language,
        rows = rows.len(),
        tables = tables.len(),
        errors = errors.len(),
        "extracted page"
    );
    PageExtraction {
        language,
        template,
        tables,
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CivilDate;

    const CHINESE_PAGE: &str = r#"<html><body>
<h2><strong><font class="h1">本國上市證券國際證券辨識號碼一覽表</font></strong></h2>
<h2><strong><font class="h1"><center>最近更新日期:2024/01/05</center></font></strong></h2>
<table class="h4">
<tr><td>有價證券代號及名稱 </td><td>國際證券辨識號碼(ISIN Code)</td><td>上市日</td><td>市場別</td><td>產業別</td><td>CFICode</td><td>備註</td></tr>
<tr><td colspan="7"><b> 股票 </b></td></tr>
<tr><td>1101　台泥</td><td>TW0001101004</td><td>1962/02/09</td><td>上市</td><td>水泥工業</td><td>ESVUFR</td><td></td></tr>
<tr><td>1102　亞泥</td><td>TW0001102002</td><td>1962/06/08</td><td>上市</td><td>水泥工業</td><td>ESVUFR</td><td></td></tr>
</table></body></html>"#;

    #[test]
    fn test_extract_chinese_page() {
        let page = extract_page(2, Language::Chinese, CHINESE_PAGE);

        assert!(page.errors.is_empty(), "{:?}", page.errors);
        assert_eq!(page.template.index, 2);
        assert_eq!(
            page.template.title,
            BilingualText::new(Language::Chinese, "本國上市證券國際證券辨識號碼一覽表")
        );
        assert_eq!(page.template.updated_date, Some(CivilDate::new(2024, 1, 5)));
        assert_eq!(page.tables.len(), 1);

        let table = &page.tables[0];
        assert_eq!(table.columns.len(), 8);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].security_code.as_deref(), Some("1102"));
        assert_eq!(table.rows[1].cfi_code.as_deref(), Some("ESVUFR"));
        assert_eq!(
            table.rows[0].remark,
            Some(BilingualText::new(Language::Chinese, ""))
        );
    }

    #[test]
    fn test_page_without_table() {
        let page = extract_page(5, Language::English, "<html><body>maintenance</body></html>");
        assert!(page.tables.is_empty());
        assert!(matches!(
            page.errors[..],
            [ExtractError::MissingTable { index: 5, .. }]
        ));
    }
}
