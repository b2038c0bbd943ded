//! Text normalization and multi-language table merge.
//!
//! Raw text-table strings carry in-game layout artifacts: line breaks
//! inserted for the on-screen text box, icon placeholder tokens, and style
//! markup. Normalization rewrites them into plain strings suitable for the
//! downstream content pipeline.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use super::gmd::Gmd;
use crate::chunk::types::models::Language;

/// A word hyphen-broken across an on-screen line break. Joining only applies
/// between lowercase letters, and only to English text; other languages use
/// hyphens orthographically at line starts.
static HYPHEN_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])-\r?\n([a-z])").expect("hyphen-break pattern"));

static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n").expect("line-break pattern"));

static STYL_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<STYL [A-Z0-9_]+>").expect("style-open pattern"));

static STYL_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</STYL>").expect("style-close pattern"));

/// Color spans keep their inner text.
static COLOR_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<COL [A-Z0-9_]+>(.*?)</COL>").expect("color-span pattern"));

/// Icon placeholder tokens and the glyphs the game renders for them.
const ICON_GLYPHS: [(&str, &str); 3] = [
    ("<ICON ALPHA>", " α"),
    ("<ICON BETA>", " β"),
    ("<ICON GAMMA>", " γ"),
];

/// Normalizes one decoded string for `lang`.
pub fn normalize(raw: &str, lang: Language) -> String {
    let mut text = raw.to_owned();
    if lang == Language::English {
        text = HYPHEN_BREAK.replace_all(&text, "$1$2").into_owned();
    }
    text = LINE_BREAK.replace_all(&text, " ").into_owned();
    for (token, glyph) in ICON_GLYPHS {
        text = text.replace(token, glyph);
    }
    text = COLOR_SPAN.replace_all(&text, "$1").into_owned();
    text = STYL_OPEN.replace_all(&text, "").into_owned();
    text = STYL_CLOSE.replace_all(&text, "").into_owned();
    text.trim().to_owned()
}

/// Merged per-language lookup maps for one logical table.
///
/// Built from N single-language files sharing a basename. A language missing
/// from the merge is simply absent from the inner maps; reporting that is the
/// downstream validation step's concern, not the parser's.
#[derive(Debug, Default)]
pub struct TextTable {
    by_index: BTreeMap<u32, BTreeMap<Language, String>>,
    by_key: BTreeMap<String, BTreeMap<Language, String>>,
}

impl TextTable {
    /// Merges parsed per-language tables, normalizing every string.
    pub fn merge(parts: Vec<(Language, Gmd)>) -> TextTable {
        let mut table = TextTable::default();
        for (lang, gmd) in parts {
            debug!(
                "merging table '{}' ({:?}): {} entries",
                gmd.header.name,
                lang,
                gmd.entries.len()
            );
            for entry in gmd.entries {
                let text = normalize(&entry.text, lang);
                if let Some(key) = entry.key {
                    table
                        .by_key
                        .entry(key)
                        .or_default()
                        .insert(lang, text.clone());
                }
                table.by_index.entry(entry.index).or_default().insert(lang, text);
            }
        }
        table
    }

    /// All translations of the string at `index`.
    pub fn by_index(&self, index: u32) -> Option<&BTreeMap<Language, String>> {
        self.by_index.get(&index)
    }

    /// All translations of the string keyed `key`.
    pub fn by_key(&self, key: &str) -> Option<&BTreeMap<Language, String>> {
        self.by_key.get(key)
    }

    pub fn get(&self, index: u32, lang: Language) -> Option<&str> {
        self.by_index(index)?.get(&lang).map(String::as_str)
    }

    pub fn get_by_key(&self, key: &str, lang: Language) -> Option<&str> {
        self.by_key(key)?.get(&lang).map(String::as_str)
    }

    /// Number of distinct string indices.
    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }

    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.by_index.keys().copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.by_key.keys().map(String::as_str)
    }
}
