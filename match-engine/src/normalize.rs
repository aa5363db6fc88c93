//! Name normalization for comparison and search-term generation

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\w\s]").expect("static pattern");
}

/// Honorific prefixes stripped during normalization (dot already
/// removed by the punctuation pass).
const HONORIFICS: [&str; 6] = ["mr", "mrs", "ms", "dr", "prof", "hon"];

/// Canonicize a raw name for comparison: lowercase, strip punctuation,
/// collapse whitespace and drop leading honorifics.
///
/// Never fails; empty input normalizes to an empty string. Callers
/// reject empty queries upstream.
pub fn normalize(name: &str) -> String {
    let lowered = name.to_lowercase();
    let cleaned = NON_WORD.replace_all(&lowered, "");
    let mut tokens: Vec<&str> = cleaned.split_whitespace().collect();

    // A name that is nothing but an honorific is left alone.
    while tokens.len() > 1 {
        match tokens.first() {
            Some(first) if HONORIFICS.contains(first) => {
                tokens.remove(0);
            }
            _ => break,
        }
    }

    tokens.join(" ")
}

/// Whether the text contains characters from the Arabic block.
pub fn contains_arabic(text: &str) -> bool {
    text.chars().any(|c| ('\u{0600}'..='\u{06FF}').contains(&c))
}

/// Transliterate Arabic-script characters to a Latin approximation
/// using a fixed substitution table; other characters pass through.
pub fn transliterate_arabic(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match latinize(c) {
            Some(mapped) => out.push_str(mapped),
            None => out.push(c),
        }
    }
    out
}

fn latinize(c: char) -> Option<&'static str> {
    let mapped = match c {
        'ا' | 'أ' | 'آ' | 'ى' | 'ع' => "a",
        'إ' | 'ئ' => "e",
        'ب' => "b",
        'ت' | 'ط' => "t",
        'ث' | 'ذ' => "th",
        'ج' => "j",
        'ح' | 'ه' | 'ة' => "h",
        'خ' => "kh",
        'د' | 'ض' => "d",
        'ر' => "r",
        'ز' | 'ظ' => "z",
        'س' | 'ص' => "s",
        'ش' => "sh",
        'غ' => "gh",
        'ف' => "f",
        'ق' => "q",
        'ك' => "k",
        'ل' => "l",
        'م' => "m",
        'ن' => "n",
        'و' => "w",
        'ي' => "y",
        'ؤ' => "o",
        'ء' => "'",
        _ => return None,
    };
    Some(mapped)
}

/// Normalized search variants of a name: the normalized form itself
/// plus, when Arabic script is present, its normalized
/// transliteration. Both are fed downstream as separate search terms.
pub fn variants(name: &str) -> Vec<String> {
    let mut out = Vec::with_capacity(2);
    let base = normalize(name);
    if !base.is_empty() {
        out.push(base);
    }
    if contains_arabic(name) {
        let translit = normalize(&transliterate_arabic(name));
        if !translit.is_empty() && !out.contains(&translit) {
            out.push(translit);
        }
    }
    out
}
