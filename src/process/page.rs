// src/process/page.rs

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::{debug, trace};

static HEADING: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2 > strong > font.h1").expect("heading selector should parse"));
static CENTER: Lazy<Selector> =
    Lazy::new(|| Selector::parse("center").expect("center selector should parse"));
static DATE_LINE: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("h2 > strong > font.h1 > center").expect("date selector should parse")
});
static TABLE_BODY: Lazy<Selector> =
    Lazy::new(|| Selector::parse("table.h4 > tbody").expect("table selector should parse"));
static TABLE_ROW: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tr").expect("row selector should parse"));

/// The pieces of one published page the extractor cares about, still as text.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RawPage {
    pub title: Option<String>,
    /// Text after the colon of the "last updated" line.
    pub updated: Option<String>,
    /// Every `tr` of the data table, header first. `None` if the page has no data table.
    pub rows: Option<Vec<Vec<String>>>,
}

pub fn parse_page(html: &str) -> RawPage {
    let doc = Html::parse_document(html);

    let title = doc
        .select(&HEADING)
        .find(|el| el.select(&CENTER).next().is_none())
        .map(|el| el.text().collect::<String>().trim().to_string());

    let updated = doc
        .select(&DATE_LINE)
        .next()
        .and_then(|el| after_colon(&el.text().collect::<String>()));

    let rows = doc.select(&TABLE_BODY).next().map(|body| {
        body.select(&TABLE_ROW)
            .map(|tr| {
                tr.children()
                    .filter_map(ElementRef::wrap)
                    .filter(|el| el.value().name() == "td")
                    .map(cell_text)
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
    });

    debug!(
        title = ?title,
        updated = ?updated,
        rows = rows.as_ref().map(Vec::len),
        "parsed page"
    );
    RawPage {
        title,
        updated,
        rows,
    }
}

/// A cell's text is its first child: a text node, or the text of a wrapping element
/// such as `<b>`. Empty cells give an empty string.
fn cell_text(td: ElementRef<'_>) -> String {
    let Some(first) = td.first_child() else {
        return String::new();
    };
    match first.value() {
        Node::Text(t) => {
            let text: &str = t;
            text.to_string()
        }
        Node::Element(_) => ElementRef::wrap(first)
            .map(|el| el.text().collect())
            .unwrap_or_default(),
        other => {
            trace!(node = ?other, "ignoring non-text cell content");
            String::new()
        }
    }
}

fn after_colon(line: &str) -> Option<String> {
    line.split_once([':', '：'])
        .map(|(_, rest)| rest.trim().to_string())
        .filter(|s| !s.is_empty())
}
