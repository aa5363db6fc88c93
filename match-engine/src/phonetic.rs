//! Phonetic encodings used to match spelling variants of a name
//!
//! Codes are computed per whitespace token and joined, so multi-word
//! names compare word-by-word rather than as one consonant skeleton.

use rphonetic::{Encoder, Metaphone, Soundex};
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::warn;

fn encode_tokens<E: Encoder>(encoder: &E, input: &str) -> String {
    input
        .split_whitespace()
        .map(|token| {
            // rphonetic can panic on unusual codepoints; a failed
            // token encodes as empty rather than poisoning the request.
            match catch_unwind(AssertUnwindSafe(|| encoder.encode(token))) {
                Ok(code) => code,
                Err(_) => {
                    warn!(token, "phonetic encoder panicked, skipping token");
                    String::new()
                }
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Soundex code of a (possibly multi-word) name.
pub fn soundex(name: &str) -> String {
    encode_tokens(&Soundex::default(), name)
}

/// Metaphone code of a (possibly multi-word) name.
pub fn metaphone(name: &str) -> String {
    encode_tokens(&Metaphone::default(), name)
}

/// Agreement of two names across both phonetic encodings.
///
/// Each encoding contributes a 0/1 sub-score (equal, non-empty codes);
/// the result is their average: 0.0, 0.5 or 1.0.
pub fn phonetic_agreement(a: &str, b: &str) -> f64 {
    let mut agreed = 0u8;

    let (sa, sb) = (soundex(a), soundex(b));
    if !sa.is_empty() && sa == sb {
        agreed += 1;
    }

    let (ma, mb) = (metaphone(a), metaphone(b));
    if !ma.is_empty() && ma == mb {
        agreed += 1;
    }

    f64::from(agreed) / 2.0
}
