//! Spellcheck-based refinement of language identification.
//!
//! An identification model is good at telling languages apart in general but often
//! confuses closely related ones (Spanish, Galician and Catalan; Bokmål, Nynorsk and
//! Danish; the Serbo-Croatian variants). [`Engine`] takes the model's answer and, when it
//! lands among the languages confusable with the configured target, re-decides by
//! spellchecking the sentence against each candidate's dictionary.
//!
//! ```no_run
//! use lidspell::{Config, DirectoryLoader, Engine, Mode, Options, Whatlang};
//!
//! let config = Config::load(None)?;
//! let loader = DirectoryLoader::new(config.search_paths());
//! let options = Options::new("gl".parse()?, Mode::Conservative);
//! let engine = Engine::new(options, &config, Box::new(Whatlang), &loader)?;
//! println!("{}", engine.classify("Como te chamas?"));
//! # Ok::<(), lidspell::Error>(())
//! ```

pub mod config;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod identify;
pub mod lang;
pub mod score;
pub mod script;
pub mod similar;
pub mod tokenize;

#[cfg(feature = "python")]
mod python;

pub use config::Config;
pub use dictionary::{DictionaryLoader, DirectoryLoader, Hunspell, Spellchecker, WordList};
pub use engine::{Engine, Label, Mode, Options, UNKNOWN};
pub use error::{Error, LookupError, Result};
pub use identify::{LanguageIdentifier, Prediction, Whatlang};
pub use lang::{LanguageCode, Script};
