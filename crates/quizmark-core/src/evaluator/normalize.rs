//! Text normalization and script classification.

use unicode_normalization::UnicodeNormalization;

/// Characters removed before punctuation-insensitive comparison.
///
/// ASCII `.` is deliberately absent so decimals survive.
const PUNCTUATION: &[char] = &[
    '、', '。', '，', '．', ',', '!', '！', '?', '？', ';', '；', ':', '：', '\'', '"', '‘', '’',
    '“', '”', '（', '）', '(', ')', '[', ']', '【', '】', '『', '』', '「', '」', '-',
];

/// NFKC, trim, lowercase, and collapse whitespace runs to a single space.
///
/// NFKC folds fullwidth ASCII to halfwidth and halfwidth katakana to
/// fullwidth, so both sides land in one canonical width.
pub fn normalize_text(text: &str) -> String {
    let folded: String = text.nfkc().collect::<String>().to_lowercase();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop the fixed punctuation set and every whitespace character.
pub fn strip_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && !PUNCTUATION.contains(c))
        .collect()
}

/// Shift katakana (U+30A1..=U+30F6) down to the matching hiragana.
pub fn katakana_to_hiragana(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{30A1}'..='\u{30F6}' => char::from_u32(c as u32 - 0x60).unwrap_or(c),
            _ => c,
        })
        .collect()
}

pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// Hiragana or katakana block, including the prolonged sound mark.
pub fn is_kana(c: char) -> bool {
    ('\u{3040}'..='\u{30FF}').contains(&c)
}

pub fn has_kanji(text: &str) -> bool {
    text.chars().any(is_kanji)
}

pub fn kanji_count(text: &str) -> usize {
    text.chars().filter(|c| is_kanji(*c)).count()
}

/// Non-empty, and nothing but kana and whitespace.
pub fn is_only_kana(text: &str) -> bool {
    !text.trim().is_empty() && text.chars().all(|c| is_kana(c) || c.is_whitespace())
}
