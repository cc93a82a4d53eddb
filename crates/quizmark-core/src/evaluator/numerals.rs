//! Numeral-form folding for 0 through 10, and numeric token extraction.

use once_cell::sync::Lazy;
use regex::Regex;

use super::normalize::{is_kana, is_kanji};

/// Generic counter that follows a bare numeral (`1つ`, `一つ`).
const COUNTER: char = 'つ';

/// Particle allowed right after a kana numeral word (`ひとつの`).
const PARTICLE: char = 'の';

static NUMBER_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"-?[0-9]+\.?[0-9]*").expect("number token pattern is valid")
});

struct Numeral {
    form: Vec<char>,
    digit: &'static str,
    /// Kanji forms match inside words but not next to another kanji numeral;
    /// kana words only between word boundaries.
    anywhere: bool,
}

impl Numeral {
    fn takes_counter(&self) -> bool {
        self.anywhere && self.digit.len() == 1 && self.digit != "0"
    }
}

const KANJI_FORMS: &[(&str, &str)] = &[
    ("〇", "0"),
    ("零", "0"),
    ("一", "1"),
    ("二", "2"),
    ("三", "3"),
    ("四", "4"),
    ("五", "5"),
    ("六", "6"),
    ("七", "7"),
    ("八", "8"),
    ("九", "9"),
    ("十", "10"),
];

const KANA_FORMS: &[(&str, &str)] = &[
    ("ゼロ", "0"),
    ("ぜろ", "0"),
    ("れい", "0"),
    ("いち", "1"),
    ("ひとつ", "1"),
    ("に", "2"),
    ("ふたつ", "2"),
    ("さん", "3"),
    ("みっつ", "3"),
    ("よん", "4"),
    ("し", "4"),
    ("よっつ", "4"),
    ("ご", "5"),
    ("いつつ", "5"),
    ("ろく", "6"),
    ("むっつ", "6"),
    ("なな", "7"),
    ("しち", "7"),
    ("ななつ", "7"),
    ("はち", "8"),
    ("やっつ", "8"),
    ("きゅう", "9"),
    ("く", "9"),
    ("ここのつ", "9"),
    ("じゅう", "10"),
    ("とお", "10"),
];

/// All forms, longest first so `ななつ` wins over `なな` and `しち` over `し`.
static NUMERALS: Lazy<Vec<Numeral>> = Lazy::new(|| {
    let kanji = KANJI_FORMS.iter().map(|(form, digit)| (form, digit, true));
    let kana = KANA_FORMS.iter().map(|(form, digit)| (form, digit, false));
    let mut numerals: Vec<Numeral> = kanji
        .chain(kana)
        .map(|(form, digit, anywhere)| Numeral {
            form: form.chars().collect(),
            digit,
            anywhere,
        })
        .collect();
    numerals.sort_by(|a, b| b.form.len().cmp(&a.form.len()));
    numerals
});

fn is_japanese_letter(c: char) -> bool {
    is_kana(c) || is_kanji(c) || c == '〇'
}

fn at_word_boundary(chars: &[char], start: usize, end: usize) -> bool {
    let before = start.checked_sub(1).map(|p| chars[p]);
    let after = chars.get(end).copied();
    let clear_before = before.is_none_or(|c| !is_japanese_letter(c));
    let clear_after = after.is_none_or(|c| c == PARTICLE || !is_japanese_letter(c));
    clear_before && clear_after
}

fn is_kanji_numeral(c: char) -> bool {
    KANJI_FORMS
        .iter()
        .any(|(form, _)| form.chars().next() == Some(c))
}

/// A kanji numeral with no kanji numeral on either side; compounds such as
/// `十一` or `二十` are left verbatim.
fn isolated_kanji(chars: &[char], start: usize, end: usize) -> bool {
    let before = start.checked_sub(1).map(|p| chars[p]);
    let after = chars.get(end).copied();
    before.is_none_or(|c| !is_kanji_numeral(c)) && after.is_none_or(|c| !is_kanji_numeral(c))
}

fn match_numeral(chars: &[char], at: usize) -> Option<&'static Numeral> {
    NUMERALS.iter().find(|numeral| {
        let end = at + numeral.form.len();
        if chars.get(at..end) != Some(numeral.form.as_slice()) {
            return false;
        }
        if numeral.anywhere {
            isolated_kanji(chars, at, end)
        } else {
            at_word_boundary(chars, at, end)
        }
    })
}

/// Rewrite numerals 0–10 in kanji, kana, and digit-plus-counter form to a
/// canonical digit token.
///
/// Both sides of a comparison go through the same rewrite, so the output only
/// needs to be canonical, not readable.
pub fn normalize_numerals(text: &str) -> String {
    let chars: Vec<char> = text
        .chars()
        .map(|c| match c {
            '０'..='９' => char::from_u32(c as u32 - 0xFEE0).unwrap_or(c),
            _ => c,
        })
        .collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_digit() {
                out.push(chars[i]);
                i += 1;
            }
            if i - start == 1 && c != '0' && chars.get(i) == Some(&COUNTER) {
                i += 1;
            }
            continue;
        }

        if let Some(numeral) = match_numeral(&chars, i) {
            out.push_str(numeral.digit);
            i += numeral.form.len();
            if numeral.takes_counter() && chars.get(i) == Some(&COUNTER) {
                i += 1;
            }
            continue;
        }

        out.push(c);
        i += 1;
    }

    out
}

/// Integer and decimal tokens, in order of appearance.
pub fn extract_numbers(text: &str) -> Vec<&str> {
    NUMBER_TOKEN.find_iter(text).map(|m| m.as_str()).collect()
}
