//! Shared domain constants: localization languages and their file suffixes.

/// A localization language carried by the text-table files.
///
/// The chunk corpus ships one text-table file per language for every logical
/// table, distinguished by a filename suffix (see [`LANGUAGE_SUFFIXES`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Language {
    Japanese,
    English,
    French,
    Spanish,
    German,
    Italian,
    Korean,
    ChineseSimplified,
    ChineseTraditional,
    Russian,
    Polish,
    Portuguese,
}

/// Filename-suffix to language table, preserved exactly from the game's
/// file layout. A text-table file for logical name `item` in English is
/// `item_eng` plus the table extension.
pub const LANGUAGE_SUFFIXES: [(&str, Language); 12] = [
    ("jpn", Language::Japanese),
    ("eng", Language::English),
    ("fre", Language::French),
    ("spa", Language::Spanish),
    ("ger", Language::German),
    ("ita", Language::Italian),
    ("kor", Language::Korean),
    ("chS", Language::ChineseSimplified),
    ("chT", Language::ChineseTraditional),
    ("rus", Language::Russian),
    ("pol", Language::Polish),
    ("por", Language::Portuguese),
];

impl Language {
    /// BCP 47-ish short code used when exporting decoded strings.
    pub fn code(self) -> &'static str {
        match self {
            Language::Japanese => "ja",
            Language::English => "en",
            Language::French => "fr",
            Language::Spanish => "es",
            Language::German => "de",
            Language::Italian => "it",
            Language::Korean => "ko",
            Language::ChineseSimplified => "zh-Hans",
            Language::ChineseTraditional => "zh-Hant",
            Language::Russian => "ru",
            Language::Polish => "pl",
            Language::Portuguese => "pt",
        }
    }

    /// Looks up the language from a file stem such as `quest_eng`.
    pub fn from_file_stem(stem: &str) -> Option<Language> {
        let (_, suffix) = stem.rsplit_once('_')?;
        LANGUAGE_SUFFIXES
            .iter()
            .find(|(s, _)| *s == suffix)
            .map(|(_, lang)| *lang)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_table_is_total_and_unique() {
        assert_eq!(LANGUAGE_SUFFIXES.len(), 12);
        for (i, (suffix, _)) in LANGUAGE_SUFFIXES.iter().enumerate() {
            for (other, _) in &LANGUAGE_SUFFIXES[i + 1..] {
                assert_ne!(suffix, other);
            }
        }
    }

    #[test]
    fn language_from_file_stem() {
        assert_eq!(Language::from_file_stem("quest_eng"), Some(Language::English));
        assert_eq!(
            Language::from_file_stem("w_sword_chS"),
            Some(Language::ChineseSimplified)
        );
        assert_eq!(Language::from_file_stem("quest"), None);
        assert_eq!(Language::from_file_stem("quest_xyz"), None);
    }
}
