//! Script detection for language families written in more than one script.
//!
//! Each script variant owns an alphabet. Deleting a variant's alphabet from a sentence
//! leaves only what that script cannot explain; the variant leaving the fewest
//! characters is the script the sentence is written in.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::lang::{HBS, LanguageCode, Script};

// Gaj's Latin alphabet plus Montenegrin letters, the single-codepoint digraphs
// (dž, lj, nj) and ligatures that survive OCR and PDF extraction.
const HBS_LATIN: &str = "aAbBcCčČćĆdDđĐeEfFgGhHiIjJkKlLmMnNoOpPrRsSšŠśŚtTuUvVzZžŽźŹ\
                         ǄǅǆǇǈǉǊǋǌﬁﬂﬆĳœ";

// Serbian and Montenegrin Cyrillic. U+0301 covers З́ and С́, which have no
// precomposed form.
const HBS_CYRILLIC: &str = "АаБбВвГгДдЂђЕеЖжЗзИиЈјКкЛлЉљМмНнЊњОоПпРрСсТтЋћУуФфХхЦцЧчЏџШшЩщ\
                            \u{301}ҵҥӕ";

/// An alphabet-deletion function for one script variant.
#[derive(Debug, Clone)]
pub struct ScriptTable {
    script: Script,
    alphabet: HashSet<char>,
}

impl ScriptTable {
    pub fn new(script: Script, alphabet: &str) -> Self {
        Self {
            script,
            alphabet: alphabet.chars().collect(),
        }
    }

    pub fn script(&self) -> Script {
        self.script
    }

    /// Number of characters left after deleting this script's alphabet.
    pub fn residual(&self, sentence: &str) -> usize {
        sentence
            .chars()
            .filter(|c| !self.alphabet.contains(c))
            .count()
    }
}

/// Script tables keyed by family code. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct ScriptTables {
    families: HashMap<String, Vec<ScriptTable>>,
}

impl ScriptTables {
    /// Tables for every script-ambiguous family this crate knows about.
    pub fn builtin() -> Self {
        let mut tables = Self::default();
        tables.register(
            HBS,
            vec![
                ScriptTable::new(Script::Latin, HBS_LATIN),
                ScriptTable::new(Script::Cyrillic, HBS_CYRILLIC),
            ],
        );
        tables
    }

    /// Register the variants of `family`. Enumeration order breaks ties.
    pub fn register(&mut self, family: &str, variants: Vec<ScriptTable>) {
        self.families.insert(family.to_string(), variants);
    }

    pub fn contains(&self, family: &LanguageCode) -> bool {
        self.families.contains_key(family.base())
    }

    /// Variants registered for `family`, in enumeration order.
    pub fn variants(&self, family: &LanguageCode) -> Option<&[ScriptTable]> {
        self.families.get(family.base()).map(Vec::as_slice)
    }

    /// Residual character count per variant, in enumeration order.
    pub fn residuals(&self, sentence: &str, family: &LanguageCode) -> Result<Vec<(Script, usize)>> {
        let variants = self
            .variants(family)
            .ok_or_else(|| Error::UnsupportedScript(family.base().to_string()))?;
        Ok(variants
            .iter()
            .map(|t| (t.script(), t.residual(sentence)))
            .collect())
    }

    /// Qualify `family` with the script `sentence` is written in.
    ///
    /// Fails with [`Error::UnsupportedScript`] when no table is registered for the family.
    pub fn detect_script(&self, sentence: &str, family: &LanguageCode) -> Result<LanguageCode> {
        let mut best: Option<(Script, usize)> = None;
        for (script, count) in self.residuals(sentence, family)? {
            if best.is_none_or(|(_, best_count)| count < best_count) {
                best = Some((script, count));
            }
        }
        match best {
            Some((script, _)) => Ok(LanguageCode::with_script(family.base(), script)),
            None => Err(Error::UnsupportedScript(family.base().to_string())),
        }
    }
}
