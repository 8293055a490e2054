//! Configuration: similarity groups, dictionary codes and the admission threshold.

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::lang::LanguageCode;
use crate::score::DEFAULT_THRESHOLD;

pub const CONFIG_ENV: &str = "LIDSPELL_CONFIG";
pub const CONFIG_FILE: &str = "lidspell.toml";

const DEFAULT_CONFIG: &str = include_str!("../config/default.toml");

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// `target[_script]` → confusable languages, in scoring order
    pub similar: BTreeMap<String, Vec<String>>,
    pub dictionaries: DictionaryConfig,
    /// Directory of the file this config was read from
    #[serde(skip)]
    pub source_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Extra directory searched first; relative to the config file
    pub dictpath: Option<PathBuf>,
    /// Language code → dictionary file stem
    pub codes: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            similar: BTreeMap::new(),
            dictionaries: DictionaryConfig::default(),
            source_dir: None,
        }
    }
}

impl Config {
    /// The configuration shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(DEFAULT_CONFIG, Path::new("<builtin>"))
    }

    /// Resolve and load the configuration.
    ///
    /// 1. `explicit` path (a file, or a directory containing `lidspell.toml`)
    /// 2. `$LIDSPELL_CONFIG`, if it points to a usable file or directory
    /// 3. the built-in configuration
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            let file = resolve_config_file(path).ok_or_else(|| {
                Error::InvalidConfig(format!("{} is not a config file or directory", path.display()))
            })?;
            return Self::from_file(&file);
        }

        if let Some(value) = env::var_os(CONFIG_ENV) {
            let path = PathBuf::from(value);
            match resolve_config_file(&path) {
                Some(file) => return Self::from_file(&file),
                None => warn!(
                    path = %path.display(),
                    "${} is not a valid config path, using default", CONFIG_ENV
                ),
            }
        }

        debug!("Using built-in configuration");
        Self::builtin()
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigIo {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut config = Self::from_toml_str(&content, path)?;
        config.source_dir = path.parent().map(Path::to_path_buf);
        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(|e| Error::ConfigParse {
            path: origin.to_path_buf(),
            detail: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(Error::InvalidConfig(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            )));
        }
        for (key, members) in &self.similar {
            LanguageCode::parse(key)?;
            for member in members {
                LanguageCode::parse(member)?;
            }
        }
        for code in self.dictionaries.codes.keys() {
            LanguageCode::parse(code)?;
        }
        Ok(())
    }

    /// Dictionary stem for `code`, falling back to its family's entry.
    pub fn dictionary_code(&self, code: &LanguageCode) -> Option<&str> {
        let codes = &self.dictionaries.codes;
        codes
            .get(&code.to_string())
            .or_else(|| codes.get(code.base()))
            .map(String::as_str)
    }

    /// Directories searched for dictionaries, in priority order.
    pub fn search_paths(&self) -> Vec<PathBuf> {
        let home = env::var_os("HOME").map(PathBuf::from);
        let venv = env::var_os("VIRTUAL_ENV").map(PathBuf::from);
        self.search_paths_with(home.as_deref(), venv.as_deref())
    }

    pub fn search_paths_with(&self, home: Option<&Path>, venv: Option<&Path>) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(dictpath) = &self.dictionaries.dictpath {
            match (&self.source_dir, dictpath.is_absolute()) {
                (Some(dir), false) => paths.push(dir.join(dictpath)),
                _ => paths.push(dictpath.clone()),
            }
        }
        if let Some(home) = home {
            paths.push(home.join(".local/share/lidspell"));
            paths.push(home.join(".local/share/hunspell"));
        }
        if let Some(venv) = venv {
            paths.push(venv.join("share/hunspell"));
        }
        let system = PathBuf::from("/usr/share/hunspell");
        if !paths.contains(&system) {
            paths.push(system);
        }
        paths
    }
}

fn resolve_config_file(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        return Some(path.to_path_buf());
    }
    let candidate = path.join(CONFIG_FILE);
    candidate.is_file().then_some(candidate)
}
