//! Dictionary error rates for the candidates of a similarity group.

use std::collections::HashMap;

use tracing::debug;

use crate::dictionary::Spellchecker;
use crate::lang::LanguageCode;
use crate::similar::SimilarityGroup;
use crate::tokenize::{filter_tokens, split_tokens};

/// Maximum error rate a candidate may have and still be considered.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Loaded dictionaries, one per language code.
pub type Dictionaries = HashMap<LanguageCode, Box<dyn Spellchecker>>;

/// Error rates of the admitted candidates, in group order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scores {
    entries: Vec<(LanguageCode, f64)>,
}

impl Scores {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, code: &LanguageCode) -> Option<f64> {
        self.entries
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, rate)| *rate)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LanguageCode, f64)> {
        self.entries.iter().map(|(c, rate)| (c, *rate))
    }

    /// Lowest error rate and every candidate reaching it, in group order.
    pub fn best(&self) -> Option<(f64, Vec<&LanguageCode>)> {
        let min = self
            .entries
            .iter()
            .map(|(_, rate)| *rate)
            .reduce(f64::min)?;
        let tied = self
            .entries
            .iter()
            .filter(|(_, rate)| *rate == min)
            .map(|(c, _)| c)
            .collect();
        Some((min, tied))
    }
}

/// Share of `tokens` the dictionary rejects.
///
/// A lookup failure counts as a rejection. With no token, or no accepted token,
/// the rate is 1.
pub fn error_rate<S: AsRef<str>>(tokens: &[S], dict: &dyn Spellchecker) -> f64 {
    if tokens.is_empty() {
        return 1.0;
    }
    let correct = tokens
        .iter()
        .filter(|t| match dict.check(t.as_ref()) {
            Ok(found) => found,
            Err(e) => {
                debug!("Lookup failed, counting as misspelled: {e}");
                false
            }
        })
        .count();
    if correct > 0 {
        1.0 - correct as f64 / tokens.len() as f64
    } else {
        1.0
    }
}

/// Error rate of every group member with a dictionary, before admission.
pub fn error_rates(
    group: &SimilarityGroup,
    sentence: &str,
    context_lang: &LanguageCode,
    dictionaries: &Dictionaries,
) -> Vec<(LanguageCode, f64)> {
    let tokens = filter_tokens(&split_tokens(sentence), context_lang);
    debug!(?tokens, "Spellchecking against {}", group.key());

    group
        .members()
        .iter()
        .filter_map(|code| {
            let dict = dictionaries.get(code)?;
            let rate = error_rate(&tokens, dict.as_ref());
            debug!(language = %code, error_rate = rate, "Scored candidate");
            Some((code.clone(), rate))
        })
        .collect()
}

/// Score `sentence` against `group`, keeping candidates with `error_rate <= threshold`.
pub fn score(
    group: &SimilarityGroup,
    sentence: &str,
    context_lang: &LanguageCode,
    dictionaries: &Dictionaries,
    threshold: f64,
) -> Scores {
    let entries = error_rates(group, sentence, context_lang, dictionaries)
        .into_iter()
        .filter(|(_, rate)| *rate <= threshold)
        .collect();
    Scores { entries }
}
