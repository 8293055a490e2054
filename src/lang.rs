//! Language codes with an optional script qualifier.
//!
//! A code is written `lang` or `lang_script` (`es`, `hbs_lat`, `hbs_cyr`). Two codes
//! sharing a base are the same family; the qualifier only narrows the writing system.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Serbo-Croatian macro-family code.
pub const HBS: &str = "hbs";

/// Codes an identification model may answer for a Serbo-Croatian variant.
pub const HBS_MEMBERS: [&str; 6] = ["hbs", "sh", "bs", "sr", "hr", "me"];

/// Languages whose common nouns are capitalized, so capitalization says nothing
/// about proper nouns.
pub const CAPITALIZED_NOUN_LANGS: [&str; 2] = ["de", "deu"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Script {
    Latin,
    Cyrillic,
}

impl Script {
    pub const ALL: [Script; 2] = [Script::Latin, Script::Cyrillic];

    pub fn suffix(self) -> &'static str {
        match self {
            Script::Latin => "lat",
            Script::Cyrillic => "cyr",
        }
    }

    pub fn from_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.suffix() == suffix)
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageCode {
    base: String,
    script: Option<Script>,
}

impl LanguageCode {
    /// Build a code without validation. Used for labels coming from a model,
    /// which are passed through verbatim when they are not understood.
    pub fn bare(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            script: None,
        }
    }

    pub fn with_script(base: impl Into<String>, script: Script) -> Self {
        Self {
            base: base.into(),
            script: Some(script),
        }
    }

    /// Parse `lang` or `lang_script`, rejecting unknown script qualifiers.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let (base, script) = match s.split_once('_') {
            Some((base, suffix)) => {
                let script = Script::from_suffix(suffix)
                    .ok_or_else(|| Error::InvalidLanguageCode(s.to_string()))?;
                (base, Some(script))
            }
            None => (s, None),
        };
        if base.is_empty() || !base.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(Error::InvalidLanguageCode(s.to_string()));
        }
        Ok(Self {
            base: base.to_string(),
            script,
        })
    }

    /// Interpret a model label, keeping it verbatim if it does not parse.
    pub fn from_label(label: &str) -> Self {
        Self::parse(label).unwrap_or_else(|_| Self::bare(label.trim()))
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn script(&self) -> Option<Script> {
        self.script
    }

    pub fn is_qualified(&self) -> bool {
        self.script.is_some()
    }

    /// The unqualified family code (`hbs_cyr` → `hbs`).
    pub fn family(&self) -> LanguageCode {
        family_of(self)
    }

    pub fn same_family(&self, other: &LanguageCode) -> bool {
        self.base == other.base
    }

    pub fn is_hbs_member(&self) -> bool {
        HBS_MEMBERS.contains(&self.base.as_str())
    }
}

/// Strip any script qualifier.
pub fn family_of(code: &LanguageCode) -> LanguageCode {
    LanguageCode::bare(code.base.clone())
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.script {
            Some(script) => write!(f, "{}_{}", self.base, script),
            None => f.write_str(&self.base),
        }
    }
}

impl FromStr for LanguageCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl PartialEq<str> for LanguageCode {
    fn eq(&self, other: &str) -> bool {
        match self.script {
            None => self.base == other,
            Some(script) => other
                .split_once('_')
                .is_some_and(|(b, s)| b == self.base && s == script.suffix()),
        }
    }
}

impl PartialEq<&str> for LanguageCode {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// Fixed corrections applied to a raw model answer before refinement.
///
/// - `no` (macro Norwegian) becomes `nb` so Bokmål/Nynorsk refinement can run,
///   unless the target itself is `no`.
/// - `nb` becomes `no` when the target asks for `no` explicitly.
/// - `sh` (generic Serbo-Croatian) becomes `sr`.
pub fn remap_prediction(prediction: LanguageCode, target: &LanguageCode) -> LanguageCode {
    match prediction.base() {
        "no" if target.base() != "no" => LanguageCode::bare("nb"),
        "nb" if target.base() == "no" => LanguageCode::bare("no"),
        "sh" => LanguageCode::bare("sr"),
        _ => prediction,
    }
}
