// Noise filter — characters that never become tokens.
//
// The classical poetry corpora carry CJK punctuation, bracket and quote
// glyphs, and a scattering of OCR debris from other scripts (kana, Cyrillic,
// fullwidth Latin, private-use code points). Everything in NOISE_CHARS is
// dropped before tokens are joined. Matching is by exact code point; no case
// folding or width normalization happens here.

use std::collections::HashSet;
use std::sync::OnceLock;

/// Characters excluded from tokenization. Duplicates are harmless.
pub const NOISE_CHARS: &[char] = &[
    // CJK and ASCII punctuation
    '。', '，', '、', '*', '.', '/', '<', '>', '_', '§', '‘', '’', '“', '”', '…',
    '《', '》', '【', '】', '！', '（', '）', '：', '；', '？', '＿',
    // Stray symbols and box drawing
    '□', '⑵', '⒛', '┭', '┾', '╆',
    // Latin with diacritics, Greek, Cyrillic
    'ò', 'ā', 'ō', 'α', 'β', 'ε', 'б', 'и', 'н', 'с', 'х', 'ь',
    // Kana
    'ぇ', 'が', 'け', 'そ', 'ち', 'ぢ', 'づ', 'ど', 'は', 'や', 'ょ', 'シ', 'ソ', 'ピ', 'ホ', 'ン',
    'ヵ',
    // Bopomofo
    'ㄇ', 'ㄉ', 'ㄋ', 'ㄏ', 'ㄓ', 'ㄛ',
    // Fullwidth digits and Latin
    '０', '１', '２', '８', 'ａ', 'ｈ', 'ｓ', 'ｖ', 'ｗ',
    // Private use and unencodable glyph placeholders
    '\u{e3ff}', '\u{e4bf}', '𡼭', '𢍰',
    // Repeats as collected from the corpus; the set absorbs them
    'ε', '□', 'ㄋ', 'α', 'н', 'ａ', 'ｈ', 'ｖ', 'ｗ', 'ａ', 'ｈ', 'ｖ', 'α', 'н',
];

/// Exact-match character set used to strip noise from documents.
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    chars: HashSet<char>,
}

impl NoiseFilter {
    /// Build a filter from an arbitrary character list.
    pub fn from_chars<I: IntoIterator<Item = char>>(chars: I) -> Self {
        Self {
            chars: chars.into_iter().collect(),
        }
    }

    /// The default noise set extended with caller-supplied characters.
    pub fn with_extra<I: IntoIterator<Item = char>>(extra: I) -> Self {
        let mut filter = Self::default();
        filter.chars.extend(extra);
        filter
    }

    /// The shared, read-only default filter. Built on first use.
    pub fn shared() -> &'static NoiseFilter {
        static DEFAULT: OnceLock<NoiseFilter> = OnceLock::new();
        DEFAULT.get_or_init(|| NoiseFilter::from_chars(NOISE_CHARS.iter().copied()))
    }

    pub fn is_noise(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// Number of distinct characters in the set.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl Default for NoiseFilter {
    fn default() -> Self {
        Self::shared().clone()
    }
}

/// Turn a document's paragraphs into one space-joined token string.
///
/// Every surviving character is its own token: classical Chinese has no word
/// delimiters, so the character is the unit.
pub fn segment<S: AsRef<str>>(paragraphs: &[S], filter: &NoiseFilter) -> String {
    let tokens: Vec<String> = paragraphs
        .iter()
        .flat_map(|p| p.as_ref().chars())
        .filter(|c| !filter.is_noise(*c))
        .map(String::from)
        .collect();
    tokens.join(" ")
}
