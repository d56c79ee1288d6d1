// src/schema/catalog.rs

use super::parsers::ValueParser::{self, Bilingual, Date, Number, Text};
use super::types::{BilingualText, Column};

/// Separator between the two sub-keys of a composite catalog key.
pub const KEY_SEPARATOR: char = ',';

/// A recognised header, as declared in [`SUPPORTED_COLUMNS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogColumn {
    pub key: &'static str,
    pub english: &'static str,
    pub chinese: &'static str,
    pub parsers: &'static [ValueParser],
}

const fn col(
    key: &'static str,
    english: &'static str,
    chinese: &'static str,
    parsers: &'static [ValueParser],
) -> CatalogColumn {
    CatalogColumn {
        key,
        english,
        chinese,
        parsers,
    }
}

/// Every header the extractor understands. Lookups take the first match, so several
/// labels shared between entries (`Date Issued`, `備註`) resolve by position here.
#[rustfmt::skip]
pub static SUPPORTED_COLUMNS: &[CatalogColumn] = &[
    col("securityCode,securityName", "Security Code & Security Name", "有價證券代號及名稱", &[Text, Bilingual]),
    col("isinCode", "ISIN Code", "國際證券辨識號碼(ISIN Code)", &[Text]),
    col("issuedDate", "Date Issued", "公開發行日", &[Date]),
    col("industrialGroup", "Industrial Group", "產業別", &[Bilingual]),
    col("cfiCode", "CFICode", "CFICode", &[Text]),
    col("remark", "Remarks", "備註", &[Bilingual]),
    col("listedDate", "Date Listed", "上市日", &[Date]),
    col("market", "Market", "市場別", &[Bilingual]),
    col("issuedDate", "Date Issued", "發行日", &[Date]),
    col("maturityDate", "Muturity", "到期日", &[Date]),
    col("interestRate", "Interest", "利率值", &[Number]),
    col("registrationDate", "Date of Registering", "登錄日", &[Date]),
    col("announcementDate", "Date Issued", "掛牌日", &[Date]),
    col("securityName", "Security Name", "有價證券名稱", &[Bilingual]),
    col("indexCode,indexName", "Index Code & Index Name", "指數代號及名稱", &[Text, Bilingual]),
    col("announcementDate", "Date Announcement", "發布日", &[Date]),
    col("remark", "Remark", "備註", &[Bilingual]),
];

impl CatalogColumn {
    pub fn is_composite(&self) -> bool {
        self.key.contains(KEY_SEPARATOR)
    }

    pub fn sub_keys(&self) -> Vec<&'static str> {
        self.key.split(KEY_SEPARATOR).collect()
    }

    pub fn label(&self) -> BilingualText {
        BilingualText::both(self.english, self.chinese)
    }

    /// The entry as an output column, labels in both languages.
    pub fn to_column(&self) -> Column {
        Column {
            key: self.key.to_string(),
            label: self.label(),
            parsers: self.parsers.to_vec(),
        }
    }
}

/// First catalog entry whose English or Chinese label equals `label` (already trimmed).
pub fn find_column(label: &str) -> Option<&'static CatalogColumn> {
    SUPPORTED_COLUMNS
        .iter()
        .find(|c| c.english == label || c.chinese == label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins() {
        // "Date Issued" is shared by three entries
        let c = find_column("Date Issued").unwrap();
        assert_eq!(c.key, "issuedDate");
        assert_eq!(c.chinese, "公開發行日");

        assert_eq!(find_column("掛牌日").unwrap().key, "announcementDate");
        assert_eq!(find_column("備註").unwrap().english, "Remarks");
        assert_eq!(find_column("Remark").unwrap().key, "remark");
        assert!(find_column("Nope").is_none());
    }

    #[test]
    fn test_parsers_match_sub_keys() {
        for c in SUPPORTED_COLUMNS {
            if c.is_composite() {
                assert_eq!(c.sub_keys().len(), 2, "{}", c.key);
            }
            assert_eq!(c.sub_keys().len(), c.parsers.len(), "{}", c.key);
        }
    }
}
