pub mod catalog;
pub mod label;
pub mod parsers;
pub mod row;
pub mod types;

pub use catalog::{find_column, CatalogColumn, SUPPORTED_COLUMNS};
pub use parsers::{ParsedValue, ValueParser};
pub use row::parse_columns_and_row;
pub use types::{BilingualText, CivilDate, Column, Language, Row, Table, LANGUAGES};
