//! Script-reading equivalence between kanji, hiragana and katakana.
//!
//! There is no reading dictionary here. Kanji against kana is judged by a
//! length ratio only, which accepts some wrong readings and rejects some
//! right ones at the margins.

use super::normalize::{
    has_kanji, is_only_kana, kanji_count, katakana_to_hiragana, strip_punctuation,
};
use super::MatchRule;

/// Minimum kana per kanji; the product is floored.
pub const MIN_KANA_PER_KANJI: f64 = 1.5;
/// Maximum kana per kanji.
pub const MAX_KANA_PER_KANJI: usize = 5;

/// Both arguments must already be normalized.
pub fn reading_match(reference: &str, answer: &str) -> Option<MatchRule> {
    let reference_hira = katakana_to_hiragana(reference);
    let answer_hira = katakana_to_hiragana(answer);

    if reference_hira == answer_hira {
        return Some(MatchRule::KanaScript);
    }

    let clean_reference = strip_punctuation(&reference_hira);
    let clean_answer = strip_punctuation(&answer_hira);

    if !clean_answer.is_empty() && clean_reference == clean_answer {
        return Some(MatchRule::KanaScriptLoose);
    }

    if has_kanji(reference) && is_only_kana(answer) && plausible_reading(reference, &clean_answer)
    {
        return Some(MatchRule::KanjiReading);
    }

    if is_only_kana(reference) && has_kanji(answer) && plausible_reading(answer, &clean_reference)
    {
        return Some(MatchRule::KanjiReading);
    }

    None
}

fn plausible_reading(kanji_side: &str, kana: &str) -> bool {
    let kanji = kanji_count(kanji_side);
    let kana = kana.chars().count();
    let min = (kanji as f64 * MIN_KANA_PER_KANJI).floor() as usize;
    kana >= min && kana <= kanji * MAX_KANA_PER_KANJI
}
