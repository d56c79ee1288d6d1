// src/schema/types.rs

use std::{fmt, str::FromStr};

use anyhow::anyhow;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::parsers::{ParsedValue, ValueParser};

/// Languages the source site publishes each table in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Chinese,
}

/// Fetch and merge order.
pub const LANGUAGES: [Language; 2] = [Language::English, Language::Chinese];

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Chinese => "chinese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(Language::English),
            "chinese" | "zh" => Ok(Language::Chinese),
            other => Err(anyhow!("unknown language {:?}", other)),
        }
    }
}

/// A value with independent English and Chinese renderings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualText {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chinese: Option<String>,
}

impl BilingualText {
    /// Text tagged to one language; the other side stays empty.
    pub fn new(language: Language, text: impl Into<String>) -> Self {
        let text = Some(text.into());
        match language {
            Language::English => Self {
                english: text,
                chinese: None,
            },
            Language::Chinese => Self {
                english: None,
                chinese: text,
            },
        }
    }

    pub fn both(english: impl Into<String>, chinese: impl Into<String>) -> Self {
        Self {
            english: Some(english.into()),
            chinese: Some(chinese.into()),
        }
    }

    pub fn get(&self, language: Language) -> Option<&str> {
        match language {
            Language::English => self.english.as_deref(),
            Language::Chinese => self.chinese.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.english.is_none() && self.chinese.is_none()
    }
}

/// A calendar-agnostic `year-month-day` triple.
///
/// The site mixes Gregorian and Minguo years, so components are kept exactly as
/// published and the year is written without padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CivilDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CivilDate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(3, '-');
        let mut next = |what: &str| {
            parts
                .next()
                .ok_or_else(|| anyhow!("date {:?} missing {}", s, what))
        };
        let year: i32 = next("year")?.parse()?;
        let month: u32 = next("month")?.parse()?;
        let day: u32 = next("day")?.parse()?;
        Ok(Self { year, month, day })
    }
}

impl Serialize for CivilDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CivilDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One output column: a catalog entry, or one half of an expanded composite entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub key: String,
    pub label: BilingualText,
    #[serde(skip)]
    pub parsers: Vec<ValueParser>,
}

/// One data row. A field is present only if the table carried a matching column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_name: Option<BilingualText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_name: Option<BilingualText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isin_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_date: Option<CivilDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listed_date: Option<CivilDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maturity_date: Option<CivilDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_date: Option<CivilDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement_date: Option<CivilDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<BilingualText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industrial_group: Option<BilingualText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cfi_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<BilingualText>,
}

impl Row {
    /// Store a parsed value under its catalog key.
    ///
    /// Returns the value back if the key names no field or the value has the wrong
    /// shape for it; both mean the catalog itself is inconsistent.
    pub(crate) fn set(&mut self, key: &str, value: ParsedValue) -> Result<(), ParsedValue> {
        use ParsedValue::*;
        match (key, value) {
            ("securityCode", Text(v)) => self.security_code = Some(v),
            ("securityName", Bilingual(v)) => self.security_name = Some(v),
            ("indexCode", Text(v)) => self.index_code = Some(v),
            ("indexName", Bilingual(v)) => self.index_name = Some(v),
            ("isinCode", Text(v)) => self.isin_code = Some(v),
            ("issuedDate", Date(v)) => self.issued_date = v,
            ("listedDate", Date(v)) => self.listed_date = v,
            ("maturityDate", Date(v)) => self.maturity_date = v,
            ("registrationDate", Date(v)) => self.registration_date = v,
            ("announcementDate", Date(v)) => self.announcement_date = v,
            ("interestRate", Number(v)) => self.interest_rate = Some(v),
            ("market", Bilingual(v)) => self.market = Some(v),
            ("industrialGroup", Bilingual(v)) => self.industrial_group = Some(v),
            ("cfiCode", Text(v)) => self.cfi_code = Some(v),
            ("remark", Bilingual(v)) => self.remark = Some(v),
            (_, other) => return Err(other),
        }
        Ok(())
    }
}

/// One logical table as published for one index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub index: u32,
    #[serde(default)]
    pub title: BilingualText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<BilingualText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<CivilDate>,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

impl Table {
    /// Page-level template for `index`: only the index is known up front.
    pub fn template(index: u32) -> Self {
        Self {
            index,
            ..Default::default()
        }
    }
}
