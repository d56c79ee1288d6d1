// src/schema/parsers.rs

use once_cell::sync::Lazy;
use regex::Regex;

use super::types::{BilingualText, CivilDate, Language};

/// `year-month-day` after `/` has been normalised to `-`. Years are up to four digits
/// so that Minguo years such as `114` pass unchanged.
static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,4})-(\d{2})-(\d{2})$").expect("date regex should compile"));

/// How a raw cell is turned into a typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueParser {
    Text,
    Number,
    Date,
    Bilingual,
}

/// Output of a [`ValueParser`].
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedValue {
    Text(String),
    Number(f64),
    Date(Option<CivilDate>),
    Bilingual(BilingualText),
}

impl ValueParser {
    pub fn parse(&self, language: Language, raw: &str) -> ParsedValue {
        match self {
            ValueParser::Text => ParsedValue::Text(parse_text(raw)),
            ValueParser::Number => ParsedValue::Number(parse_number(raw)),
            ValueParser::Date => ParsedValue::Date(parse_date(raw)),
            ValueParser::Bilingual => ParsedValue::Bilingual(parse_bilingual(language, raw)),
        }
    }
}

pub fn parse_text(raw: &str) -> String {
    raw.trim().to_string()
}

/// Anything that is not a float reads as `0.0`.
pub fn parse_number(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

/// Shape-checked only; no calendar validation.
pub fn parse_date(raw: &str) -> Option<CivilDate> {
    let normalized = raw.trim().replace('/', "-");
    let caps = DATE_SHAPE.captures(&normalized)?;
    Some(CivilDate::new(
        caps[1].parse().ok()?,
        caps[2].parse().ok()?,
        caps[3].parse().ok()?,
    ))
}

pub fn parse_bilingual(language: Language, raw: &str) -> BilingualText {
    BilingualText::new(language, raw.trim())
}
