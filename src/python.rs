use std::path::PathBuf;

use pyo3::exceptions::{PyFileNotFoundError, PyIOError, PyValueError};
use pyo3::prelude::*;

use crate::config::Config;
use crate::dictionary::DirectoryLoader;
use crate::engine::{Engine, Mode, Options};
use crate::error::Error;
use crate::identify::Whatlang;
use crate::lang::LanguageCode;

fn to_py_err(e: Error) -> PyErr {
    match e {
        Error::ConfigIo { .. } | Error::DictionaryBuild { .. } => PyIOError::new_err(e.to_string()),
        Error::MissingDictionary { .. } => PyFileNotFoundError::new_err(e.to_string()),
        _ => PyValueError::new_err(e.to_string()),
    }
}

/// Language identifier refined with spellchecking for one target language
#[pyclass]
struct LidSpell {
    engine: Engine,
}

#[pymethods]
impl LidSpell {
    #[new]
    #[pyo3(signature = (lang, mode = "cons", config_path = None, hbs = false, script = false))]
    fn new(
        lang: &str,
        mode: &str,
        config_path: Option<PathBuf>,
        hbs: bool,
        script: bool,
    ) -> PyResult<Self> {
        let target = LanguageCode::parse(lang).map_err(to_py_err)?;
        let mode: Mode = mode.parse().map_err(to_py_err)?;
        let config = Config::load(config_path.as_deref()).map_err(to_py_err)?;
        let loader = DirectoryLoader::new(config.search_paths());

        let mut options = Options::new(target, mode);
        options.collapse_hbs = hbs;
        options.script_output = script;

        let engine = Engine::new(options, &config, Box::new(Whatlang), &loader).map_err(to_py_err)?;
        Ok(Self { engine })
    }

    /// Label of one sentence: a language code or "unknown"
    fn getlang(&self, sentence: &str) -> String {
        self.engine.classify(sentence).to_string()
    }

    /// Labels of many sentences, classified in parallel without holding the GIL
    fn getlang_batch(&self, py: Python<'_>, sentences: Vec<String>) -> Vec<String> {
        py.detach(|| {
            self.engine
                .classify_batch(&sentences)
                .into_iter()
                .map(|label| label.to_string())
                .collect()
        })
    }
}

#[pymodule]
fn lidspell(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<LidSpell>()?;
    Ok(())
}
