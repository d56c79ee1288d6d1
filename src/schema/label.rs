// src/schema/label.rs

use super::types::Language;

/// Splits a composite header label into its two sub-labels.
pub type LabelSplitter = fn(&str) -> Option<(String, String)>;

/// One splitting strategy per page language.
pub fn splitter_for(language: Language) -> LabelSplitter {
    match language {
        Language::English => split_on_ampersand,
        Language::Chinese => split_on_conjunction,
    }
}

/// Split a composite label the way `language` writes it; `None` if the label has any
/// other shape.
pub fn split_composite_label(language: Language, label: &str) -> Option<(String, String)> {
    splitter_for(language)(label)
}

/// `"Security Code & Security Name"` → `("Security Code", "Security Name")`.
fn split_on_ampersand(label: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = label.split('&').collect();
    match parts.as_slice() {
        [lead, tail] => non_empty(lead.trim(), tail.trim()),
        _ => None,
    }
}

/// `"有價證券代號及名稱"` → `("有價證券代號", "有價證券名稱")`.
///
/// The noun before `及` is shared: the trailing fragment replaces the same number of
/// characters at the end of the leading fragment, so the lead must be strictly longer.
fn split_on_conjunction(label: &str) -> Option<(String, String)> {
    let parts: Vec<&str> = label.split('及').collect();
    let [lead, tail] = parts.as_slice() else {
        return None;
    };
    let (lead, tail) = (lead.trim(), tail.trim());
    let lead_len = lead.chars().count();
    let tail_len = tail.chars().count();
    if lead_len <= tail_len {
        return None;
    }
    let shared: String = lead.chars().take(lead_len - tail_len).collect();
    non_empty(lead, &format!("{}{}", shared, tail))
}

fn non_empty(lead: &str, tail: &str) -> Option<(String, String)> {
    if lead.is_empty() || tail.is_empty() {
        None
    } else {
        Some((lead.to_string(), tail.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::catalog::SUPPORTED_COLUMNS;
    use crate::schema::LANGUAGES;

    #[test]
    fn test_english_split() {
        assert_eq!(
            split_composite_label(Language::English, "Index Code & Index Name"),
            Some(("Index Code".into(), "Index Name".into()))
        );
        assert_eq!(split_composite_label(Language::English, "A & B & C"), None);
        assert_eq!(split_composite_label(Language::English, "Security Code"), None);
        assert_eq!(split_composite_label(Language::English, " & Name"), None);
    }

    #[test]
    fn test_each_language_has_its_own_splitter() {
        assert!(splitter_for(Language::English)("代號及名稱代號").is_none());
        assert!(splitter_for(Language::Chinese)("Index Code & Index Name").is_none());
        assert!(splitter_for(Language::English)("Index Code & Index Name").is_some());
    }

    #[test]
    fn test_chinese_split() {
        assert_eq!(
            split_composite_label(Language::Chinese, "有價證券代號及名稱"),
            Some(("有價證券代號".into(), "有價證券名稱".into()))
        );
        assert_eq!(
            split_composite_label(Language::Chinese, "指數代號及名稱"),
            Some(("指數代號".into(), "指數名稱".into()))
        );
        // lead no longer than tail
        assert_eq!(split_composite_label(Language::Chinese, "代號及名稱"), None);
        assert_eq!(split_composite_label(Language::Chinese, "代號"), None);
        assert_eq!(split_composite_label(Language::Chinese, "甲及乙及丙"), None);
    }

    #[test]
    fn test_every_composite_label_splits_in_both_languages() {
        for c in SUPPORTED_COLUMNS.iter().filter(|c| c.is_composite()) {
            for language in LANGUAGES {
                let label = c.label();
                let (lead, tail) =
                    split_composite_label(language, label.get(language).unwrap())
                        .unwrap_or_else(|| panic!("{} did not split in {}", c.key, language));
                assert!(!lead.is_empty() && !tail.is_empty());
                assert_eq!(c.sub_keys().len(), 2);
            }
        }
    }
}
