//! Dictionary lookup for spellcheck scoring.
//!
//! A dictionary is either a Hunspell `.aff`/`.dic` pair (parsed with zspell) or a
//! plain word list for lexicons whose Hunspell rules zspell cannot parse. Both are
//! read-only once loaded and shared across every similarity group.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{Error, LookupError, Result};

/// Answers "is this token a word of the language?".
pub trait Spellchecker: Send + Sync {
    fn check(&self, word: &str) -> std::result::Result<bool, LookupError>;
}

/// Loads the dictionary stored under `dictionary` for `language`.
pub trait DictionaryLoader {
    fn load(&self, language: &str, dictionary: &str) -> Result<Box<dyn Spellchecker>>;
}

/// Tokens carrying replacement characters (lossy input decoding) or control
/// characters cannot be looked up meaningfully.
fn validate(word: &str) -> std::result::Result<(), LookupError> {
    if word.chars().any(|c| c == char::REPLACEMENT_CHARACTER || c.is_control()) {
        return Err(LookupError::MalformedToken(word.to_string()));
    }
    Ok(())
}

/// Hunspell dictionary backed by zspell.
pub struct Hunspell {
    dict: zspell::Dictionary,
}

impl Hunspell {
    pub fn from_strs(language: &str, aff: &str, dic: &str) -> Result<Self> {
        let dict = zspell::builder()
            .config_str(aff)
            .dict_str(dic)
            .build()
            .map_err(|e| Error::DictionaryBuild {
                language: language.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self { dict })
    }

    pub fn from_files(language: &str, aff_path: &Path, dic_path: &Path) -> Result<Self> {
        let aff = read_utf8(language, aff_path)?;
        let dic = read_utf8(language, dic_path)?;
        Self::from_strs(language, &aff, &dic)
    }
}

impl Spellchecker for Hunspell {
    fn check(&self, word: &str) -> std::result::Result<bool, LookupError> {
        validate(word)?;
        if self.dict.check_word(word) {
            return Ok(true);
        }
        let lower = word.to_lowercase();
        Ok(lower != word && self.dict.check_word(&lower))
    }
}

/// Plain word list, one word per line.
#[derive(Debug, Default, Clone)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    pub fn parse(content: &str) -> Self {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .collect()
    }

    pub fn from_file(language: &str, path: &Path) -> Result<Self> {
        Ok(Self::parse(&read_utf8(language, path)?))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for WordList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Spellchecker for WordList {
    fn check(&self, word: &str) -> std::result::Result<bool, LookupError> {
        validate(word)?;
        if self.words.contains(word) {
            return Ok(true);
        }
        let lower = word.to_lowercase();
        Ok(lower != word && self.words.contains(&lower))
    }
}

fn read_utf8(language: &str, path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| Error::DictionaryBuild {
        language: language.to_string(),
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;
    String::from_utf8(bytes).map_err(|_| Error::DictionaryBuild {
        language: language.to_string(),
        reason: format!("{} is not UTF-8", path.display()),
    })
}

/// Searches an ordered list of directories; the first directory holding the
/// dictionary wins.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    search_paths: Vec<PathBuf>,
}

impl DirectoryLoader {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

impl DictionaryLoader for DirectoryLoader {
    fn load(&self, language: &str, dictionary: &str) -> Result<Box<dyn Spellchecker>> {
        for dir in &self.search_paths {
            let aff_path = dir.join(format!("{}.aff", dictionary));
            let dic_path = dir.join(format!("{}.dic", dictionary));
            if aff_path.is_file() && dic_path.is_file() {
                let dict = Hunspell::from_files(language, &aff_path, &dic_path)?;
                info!(language, path = %dic_path.display(), "Loaded hunspell dictionary");
                return Ok(Box::new(dict));
            }

            let list_path = dir.join(format!("{}.txt", dictionary));
            if list_path.is_file() {
                let words = WordList::from_file(language, &list_path)?;
                info!(language, path = %list_path.display(), words = words.len(), "Loaded word list");
                return Ok(Box::new(words));
            }
            debug!(language, dir = %dir.display(), "Dictionary '{}' not found", dictionary);
        }

        Err(Error::MissingDictionary {
            language: language.to_string(),
            dictionary: dictionary.to_string(),
            searched: self.search_paths.clone(),
        })
    }
}
