//! Name Matching Engine for NameScreen
//!
//! Pure string-similarity primitives for sanctions/PEP screening:
//! normalization, fuzzy scoring and phonetic encoding. No I/O, no
//! shared state; every function here is deterministic per input.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod normalize;
pub mod phonetic;
pub mod similarity;

pub use normalize::{contains_arabic, normalize, transliterate_arabic, variants};
pub use phonetic::{metaphone, phonetic_agreement, soundex};
pub use similarity::{fuzzy_score, CONTAINMENT_SCORE, REORDER_SCORE};
