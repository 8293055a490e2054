//! Token filtering ahead of spellchecking.
//!
//! Punctuation and likely proper nouns carry no signal about which lexicon a sentence
//! belongs to, so they are removed before error rates are computed.

use lazy_static::lazy_static;
use regex::Regex;

use crate::lang::{CAPITALIZED_NOUN_LANGS, LanguageCode};

lazy_static! {
    // Leading or trailing runs of Unicode punctuation
    static ref PUNCT_EDGES: Regex = Regex::new(r"^\p{P}+|\p{P}+$").unwrap();
}

/// Split a sentence on whitespace.
pub fn split_tokens(sentence: &str) -> Vec<&str> {
    sentence.split_whitespace().collect()
}

/// Keep the tokens worth spellchecking, lowercased.
///
/// A token survives if, after trimming edge punctuation, it has an alphabetic
/// character and (outside capitalized-noun languages) it is either the first token
/// of the sentence or does not start with an uppercase letter.
pub fn filter_tokens<S: AsRef<str>>(raw_tokens: &[S], context_lang: &LanguageCode) -> Vec<String> {
    let keep_capitalized = CAPITALIZED_NOUN_LANGS.contains(&context_lang.base());

    raw_tokens
        .iter()
        .enumerate()
        .filter_map(|(position, raw)| {
            let token = PUNCT_EDGES.replace_all(raw.as_ref().trim(), "");
            let token = token.trim();
            if !token.chars().any(char::is_alphabetic) {
                return None;
            }
            if !keep_capitalized && position > 0 && starts_with_capital(token) {
                return None;
            }
            Some(token.to_lowercase())
        })
        .collect()
}

/// First character changes under lowercasing. Covers titlecase digraphs (`ǅ`, `ǈ`, `ǋ`),
/// which are not uppercase.
fn starts_with_capital(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| !c.to_lowercase().eq([c]))
}
