//! Refinement of identification-model answers for a target language.
//!
//! The model's top-1 answer is normalized, qualified with a script where the family is
//! written in several, and, when it falls among the languages the target is confused
//! with, re-decided by comparing dictionary error rates across the confusable group.

use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use tracing::{debug, error, info, warn};
use unicode_normalization::UnicodeNormalization;

use crate::config::Config;
use crate::dictionary::DictionaryLoader;
use crate::error::{Error, Result};
use crate::identify::LanguageIdentifier;
use crate::lang::{HBS, LanguageCode, remap_prediction};
use crate::score::{Dictionaries, Scores, score};
use crate::script::ScriptTables;
use crate::similar::{SimilarityGroup, SimilarityIndex};

/// Sentinel printed when the engine declines to label a sentence.
pub const UNKNOWN: &str = "unknown";

/// Tie-break policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Always answer with some language (more positives)
    Aggressive,
    /// Answer `unknown` on unresolved ties (fewer positives)
    #[default]
    Conservative,
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "aggr" | "aggressive" => Ok(Mode::Aggressive),
            "cons" | "conservative" => Ok(Mode::Conservative),
            other => Err(Error::InvalidConfig(format!(
                "unknown mode '{other}', use 'aggr' or 'cons'"
            ))),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Aggressive => f.write_str("aggr"),
            Mode::Conservative => f.write_str("cons"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Options {
    pub target: LanguageCode,
    pub mode: Mode,
    /// Label every Serbo-Croatian variant as `hbs`
    pub collapse_hbs: bool,
    /// Keep script qualifiers (`hbs_lat`, `hbs_cyr`) in the output
    pub script_output: bool,
}

impl Options {
    pub fn new(target: LanguageCode, mode: Mode) -> Self {
        Self {
            target,
            mode,
            collapse_hbs: false,
            script_output: false,
        }
    }
}

/// Outcome of classifying one sentence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Label {
    Language(LanguageCode),
    /// Deliberate refusal to guess, not an error
    Unknown,
}

impl Label {
    pub fn language(&self) -> Option<&LanguageCode> {
        match self {
            Label::Language(code) => Some(code),
            Label::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Label::Unknown)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Language(code) => code.fmt(f),
            Label::Unknown => f.write_str(UNKNOWN),
        }
    }
}

/// Immutable after construction; `classify` may be called from any number of threads.
pub struct Engine {
    options: Options,
    threshold: f64,
    model: Box<dyn LanguageIdentifier>,
    scripts: ScriptTables,
    index: SimilarityIndex,
    groups: Vec<SimilarityGroup>,
    dictionaries: Dictionaries,
}

impl Engine {
    /// Build the engine, loading one dictionary per distinct confusable language.
    ///
    /// Fails if any required dictionary is unmapped or cannot be loaded; nothing is
    /// kept from a failed construction.
    pub fn new(
        options: Options,
        config: &Config,
        model: Box<dyn LanguageIdentifier>,
        loader: &dyn DictionaryLoader,
    ) -> Result<Self> {
        let target = &options.target;
        if options.script_output && !target.is_hbs_member() {
            warn!("Script detection is only supported with Serbo-Croatian");
        }

        let scripts = ScriptTables::builtin();
        let index = SimilarityIndex::build(&config.similar, &scripts)?;
        let groups: Vec<SimilarityGroup> = index.groups_for(target).into_iter().cloned().collect();
        debug!("Similar groups for '{}': {:?}", target, groups);

        let mut dictionaries = Dictionaries::new();
        for code in groups.iter().flat_map(|g| g.members()) {
            if dictionaries.contains_key(code) {
                continue;
            }
            let stem = config
                .dictionary_code(code)
                .ok_or_else(|| Error::UnmappedLanguage(code.to_string()))?;
            debug!("Loading dictionary for {}", code);
            let dict = loader.load(&code.to_string(), stem)?;
            dictionaries.insert(code.clone(), dict);
        }

        info!(
            language = %target,
            mode = %options.mode,
            groups = groups.len(),
            dictionaries = dictionaries.len(),
            "Engine ready"
        );

        Ok(Self {
            threshold: config.threshold,
            options,
            model,
            scripts,
            index,
            groups,
            dictionaries,
        })
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn groups(&self) -> &[SimilarityGroup] {
        &self.groups
    }

    /// Languages with a loaded dictionary.
    pub fn dictionary_languages(&self) -> impl Iterator<Item = &LanguageCode> {
        self.dictionaries.keys()
    }

    /// Label one sentence.
    pub fn classify(&self, sentence: &str) -> Label {
        let sentence: String = sentence.replace(['\n', '\r'], " ").trim().nfc().collect();
        let target = &self.options.target;

        let Some(raw) = self.model.predict(&sentence.to_lowercase()) else {
            debug!("Model returned no prediction");
            return Label::Unknown;
        };
        debug!(prediction = %raw.code, confidence = raw.confidence, "Model prediction");
        let mut prediction = remap_prediction(LanguageCode::from_label(&raw.code), target);

        if (self.options.collapse_hbs || target.base() == HBS) && prediction.is_hbs_member() {
            return self.finish(&sentence, Label::Language(LanguageCode::bare(HBS)));
        }

        if self.scripts.contains(&prediction) {
            match self.scripts.detect_script(&sentence, &prediction) {
                Ok(qualified) => {
                    debug!("Detected script {}", qualified);
                    prediction = qualified;
                }
                Err(e) => error!("{e}"),
            }
        }

        let refined = match self.select_group(&prediction) {
            Some(group) => self.refine(&sentence, group, prediction),
            None => Label::Language(prediction),
        };
        self.finish(&sentence, refined)
    }

    /// Label many sentences in parallel, preserving order.
    pub fn classify_batch<S: AsRef<str> + Sync>(&self, sentences: &[S]) -> Vec<Label> {
        sentences
            .par_iter()
            .map(|s| self.classify(s.as_ref()))
            .collect()
    }

    /// The group to spellcheck against, if `prediction` is confusable with the target.
    ///
    /// Only the exact (script-qualified) code counts: a Latin prediction never enters a
    /// group that holds the family's Cyrillic variant alone.
    fn select_group(&self, prediction: &LanguageCode) -> Option<&SimilarityGroup> {
        if !self.dictionaries.contains_key(prediction) {
            return None;
        }
        self.groups.iter().find(|g| g.contains(prediction))
    }

    fn refine(&self, sentence: &str, group: &SimilarityGroup, prediction: LanguageCode) -> Label {
        let target = &self.options.target;
        let scores = score(group, sentence, target, &self.dictionaries, self.threshold);
        debug!("Spellchecked: {:?}", scores);

        let Some((_, tied)) = scores.best() else {
            return match self.options.mode {
                Mode::Aggressive => Label::Language(prediction),
                Mode::Conservative => Label::Unknown,
            };
        };

        let tied = self.collapse_variants(&tied);
        if let [only] = tied.as_slice() {
            return Label::Language(only.clone());
        }

        let target_family = target.family();
        let find = |code: &LanguageCode| {
            tied.iter()
                .find(|c| *c == code || c.family() == code.family())
                .cloned()
        };
        match self.options.mode {
            Mode::Aggressive => find(&target_family)
                .or_else(|| find(&prediction))
                .or_else(|| tied.first().cloned())
                .map_or(Label::Unknown, Label::Language),
            Mode::Conservative => match find(&target_family) {
                Some(code) if self.family_rate(&scores, &target_family) == Some(0.0) => {
                    Label::Language(code)
                }
                _ => Label::Unknown,
            },
        }
    }

    /// Tied candidates with script variants of one family merged into the family code.
    /// A lone variant keeps its qualifier.
    fn collapse_variants(&self, tied: &[&LanguageCode]) -> Vec<LanguageCode> {
        let mut merged: Vec<LanguageCode> = Vec::with_capacity(tied.len());
        for code in tied {
            let family = self.index.collapse(code);
            let variants = tied
                .iter()
                .filter(|c| self.index.collapse(c) == family)
                .count();
            let entry = if variants > 1 { family } else { (*code).clone() };
            if !merged.contains(&entry) {
                merged.push(entry);
            }
        }
        merged
    }

    /// Lowest admitted error rate among the members of `family`.
    fn family_rate(&self, scores: &Scores, family: &LanguageCode) -> Option<f64> {
        scores
            .iter()
            .filter(|(code, _)| self.index.collapse(code) == *family || *code == family)
            .map(|(_, rate)| rate)
            .reduce(f64::min)
    }

    /// Apply the requested script output form.
    fn finish(&self, sentence: &str, label: Label) -> Label {
        let Label::Language(code) = label else {
            return label;
        };
        if !self.options.script_output {
            return Label::Language(code.family());
        }
        if !code.is_qualified() && self.scripts.contains(&code) {
            if let Ok(qualified) = self.scripts.detect_script(sentence, &code) {
                debug!("Detected script {}", qualified);
                return Label::Language(qualified);
            }
        }
        Label::Language(code)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::Path;

    use super::*;
    use crate::dictionary::{Spellchecker, WordList};
    use crate::identify::Prediction;
    use crate::score::error_rates;

    /// In-memory dictionaries keyed by dictionary stem; records every load.
    struct MapLoader {
        lists: HashMap<&'static str, &'static [&'static str]>,
        loads: RefCell<Vec<String>>,
    }

    impl MapLoader {
        fn new(lists: &[(&'static str, &'static [&'static str])]) -> Self {
            Self {
                lists: lists.iter().copied().collect(),
                loads: RefCell::new(Vec::new()),
            }
        }
    }

    impl DictionaryLoader for MapLoader {
        fn load(&self, language: &str, dictionary: &str) -> Result<Box<dyn Spellchecker>> {
            self.loads.borrow_mut().push(language.to_string());
            let words = self.lists.get(dictionary).ok_or_else(|| Error::MissingDictionary {
                language: language.to_string(),
                dictionary: dictionary.to_string(),
                searched: Vec::new(),
            })?;
            Ok(Box::new(words.iter().copied().collect::<WordList>()))
        }
    }

    const CONFIG: &str = r#"
[similar]
es = ["es", "gl", "ca"]
nb = ["nn", "da", "nb"]
sl = ["sl", "hbs"]
hbs_lat = ["hbs_lat", "sl"]
hbs_cyr = ["hbs_cyr", "mk"]

[dictionaries.codes]
es = "es_ES"
gl = "gl_ES"
ca = "ca_ES"
nb = "nb_NO"
nn = "nn_NO"
da = "da_DK"
sl = "sl_SI"
mk = "mk_MK"
hbs_lat = "sr_Latn_RS"
hbs_cyr = "sr_RS"
"#;

    // "que" and "mar" are shared by es, gl and ca; "rúa" and "nosa" by gl and ca only
    const LEXICONS: &[(&str, &[&str])] = &[
        ("es_ES", &["cómo", "como", "te", "llamas", "disculpe", "adiós", "hola", "que", "mar"]),
        ("gl_ES", &["como", "te", "chamas", "desculpe", "adeus", "que", "mar", "rúa", "nosa"]),
        ("ca_ES", &["com", "et", "dius", "adéu", "que", "mar", "rúa", "nosa"]),
        ("nb_NO", &["jeg", "ikke", "hva"]),
        ("nn_NO", &["eg", "ikkje", "kva"]),
        ("da_DK", &["jeg", "ikke", "hvad"]),
        ("sl_SI", &["dober", "dan", "kako", "ste"]),
        ("mk_MK", &["добар", "ден"]),
        ("bg_BG", &["добър", "ден"]),
        ("sr_Latn_RS", &["dobar", "dan", "kako", "ste"]),
        ("sr_RS", &["добар", "дан", "како", "сте", "dobar", "dan"]),
    ];

    fn loader() -> MapLoader {
        MapLoader::new(LEXICONS)
    }

    fn config() -> Config {
        Config::from_toml_str(CONFIG, Path::new("test.toml")).unwrap()
    }

    /// Model answering a fixed code for every sentence.
    fn fixed(code: &'static str) -> Box<dyn LanguageIdentifier> {
        Box::new(move |_: &str| Some(Prediction::new(code, 0.5)))
    }

    fn options(target: &str, mode: Mode) -> Options {
        Options::new(target.parse().unwrap(), mode)
    }

    fn engine_with(options: Options, model: Box<dyn LanguageIdentifier>) -> Engine {
        Engine::new(options, &config(), model, &loader()).unwrap()
    }

    fn engine(target: &str, mode: Mode, model: &'static str) -> Engine {
        engine_with(options(target, mode), fixed(model))
    }

    fn label(code: &str) -> Label {
        Label::Language(code.parse().unwrap())
    }

    #[test]
    fn test_english_without_groups() {
        let e = engine("en", Mode::Conservative, "en");
        assert!(e.groups().is_empty());
        assert_eq!(e.classify("Hello, world"), label("en"));
    }

    #[test]
    fn test_spanish_sentence_scores_spanish() {
        for mode in [Mode::Conservative, Mode::Aggressive] {
            let e = engine("es", mode, "es");
            assert_eq!(e.classify("¿Cómo te llamas? disculpe adiós"), label("es"));
        }
    }

    #[test]
    fn test_lowest_error_rate_wins_deterministically() {
        let sentence = "Como te chamas? desculpe adeus";
        let e = engine("es", Mode::Conservative, "es");
        let first = e.classify(sentence);
        assert_eq!(first, e.classify(sentence));

        let rates = error_rates(&e.groups()[0], sentence, &LanguageCode::bare("es"), &e.dictionaries);
        let (best, _) = rates.iter().min_by(|a, b| a.1.total_cmp(&b.1)).unwrap();
        assert_eq!(first, Label::Language(best.clone()));
        assert_eq!(first, label("gl"));
    }

    #[test]
    fn test_non_confusable_prediction_passes_through() {
        let e = engine("es", Mode::Conservative, "pt");
        assert_eq!(e.classify("Como te chamas? desculpe adeus"), label("pt"));
    }

    #[test]
    fn test_hbs_target_keeps_detected_script() {
        let mut opts = options("hbs", Mode::Conservative);
        opts.script_output = true;
        let e = engine_with(opts, fixed("sr"));

        let result = e.classify("Добар дан, како сте?");
        assert_eq!(result, label("hbs_cyr"));
        assert!(result.to_string().ends_with("_cyr"));
        assert_eq!(e.classify("Dobar dan, kako ste?"), label("hbs_lat"));
    }

    #[test]
    fn test_hbs_target_without_script_output() {
        let e = engine("hbs", Mode::Conservative, "hr");
        assert_eq!(e.classify("Добар дан, како сте?"), label("hbs"));
        // "sh" is remapped to "sr", still a family member
        let e = engine("hbs", Mode::Conservative, "sh");
        assert_eq!(e.classify("Dobar dan"), label("hbs"));
    }

    #[test]
    fn test_conservative_non_target_tie_is_unknown() {
        // gl 0.0, ca 0.0, es 1.0
        let e = engine("es", Mode::Conservative, "gl");
        assert_eq!(e.classify("rúa nosa"), Label::Unknown);
    }

    #[test]
    fn test_aggressive_tie_prefers_prediction_then_group_order() {
        assert_eq!(engine("es", Mode::Aggressive, "gl").classify("rúa nosa"), label("gl"));
        assert_eq!(engine("es", Mode::Aggressive, "ca").classify("rúa nosa"), label("ca"));
        // Neither target nor prediction tied: first in group order
        assert_eq!(engine("es", Mode::Aggressive, "es").classify("rúa nosa"), label("gl"));
    }

    #[test]
    fn test_tie_including_target() {
        // Three-way tie at 0.0
        assert_eq!(engine("es", Mode::Conservative, "gl").classify("que mar"), label("es"));
        assert_eq!(engine("es", Mode::Aggressive, "gl").classify("que mar"), label("es"));

        // Three-way tie at 1/3: conservative needs a perfect target score
        assert_eq!(engine("es", Mode::Conservative, "gl").classify("que mar zzz"), Label::Unknown);
        assert_eq!(engine("es", Mode::Aggressive, "gl").classify("que mar zzz"), label("es"));
    }

    #[test]
    fn test_nothing_admitted() {
        assert_eq!(engine("es", Mode::Aggressive, "gl").classify("zzz yyy"), label("gl"));
        assert_eq!(engine("es", Mode::Conservative, "gl").classify("zzz yyy"), Label::Unknown);
        // Only numbers, punctuation and proper nouns: no tokens, nothing admitted
        let e = engine("es", Mode::Conservative, "es");
        assert_eq!(e.classify("123 !!! Madrid Lisboa"), Label::Unknown);
    }

    #[test]
    fn test_script_variant_tie_counts_as_one_family() {
        // sl group expands hbs into hbs_lat and hbs_cyr; both know "dobar dan"
        let e = engine("sl", Mode::Conservative, "sl");
        assert_eq!(e.groups()[0].members().len(), 3);
        assert_eq!(e.classify("dobar dan"), label("hbs"));

        let mut opts = options("sl", Mode::Conservative);
        opts.script_output = true;
        let e = engine_with(opts, fixed("sl"));
        assert_eq!(e.classify("dobar dan"), label("hbs_lat"));
    }

    #[test]
    fn test_family_prediction_is_script_detected_then_refined() {
        // Model answers the bare family; Latin script selects hbs_lat
        let mut opts = options("sl", Mode::Conservative);
        opts.script_output = true;
        let e = engine_with(opts, fixed("hbs"));
        assert_eq!(e.classify("dobar dan kako"), label("hbs_lat"));

        let e = engine("sl", Mode::Conservative, "hbs");
        assert_eq!(e.classify("dobar dan kako"), label("hbs"));
    }

    fn mk_engine(mode: Mode) -> Engine {
        let config = Config::from_toml_str(
            r#"
[similar]
mk = ["mk", "bg", "hbs_cyr"]
[dictionaries.codes]
mk = "mk_MK"
bg = "bg_BG"
hbs_cyr = "sr_RS"
"#,
            Path::new("t.toml"),
        )
        .unwrap();
        Engine::new(options("mk", mode), &config, fixed("hbs"), &loader()).unwrap()
    }

    #[test]
    fn test_script_outside_group_passes_through() {
        // Only the Cyrillic variant is confusable with mk
        for mode in [Mode::Conservative, Mode::Aggressive] {
            let e = mk_engine(mode);
            assert_eq!(e.classify("dobar dan"), label("hbs"));
            assert_eq!(e.classify("Dobar dan, kako ste?"), label("hbs"));
        }
    }

    #[test]
    fn test_script_inside_group_is_refined() {
        // mk knows "добар" only (0.5), sr_RS knows both words (0.0)
        let e = mk_engine(Mode::Conservative);
        assert_eq!(e.classify("добар дан"), label("hbs"));
        let mut opts = options("mk", Mode::Conservative);
        opts.script_output = true;
        let config = Config::from_toml_str(
            "[similar]\nmk = [\"mk\", \"hbs_cyr\"]\n[dictionaries.codes]\nmk = \"mk_MK\"\nhbs_cyr = \"sr_RS\"\n",
            Path::new("t.toml"),
        )
        .unwrap();
        let e = Engine::new(opts, &config, fixed("hbs"), &loader()).unwrap();
        assert_eq!(e.classify("добар дан"), label("hbs_cyr"));
        assert_eq!(e.classify("dobar dan"), label("hbs_lat"));
    }

    #[test]
    fn test_collapse_hbs_flag() {
        let mut opts = options("sl", Mode::Conservative);
        opts.collapse_hbs = true;
        let e = engine_with(opts, fixed("hr"));
        assert_eq!(e.classify("Dobar dan"), label("hbs"));

        assert_eq!(engine("sl", Mode::Conservative, "hr").classify("Dobar dan"), label("hr"));
    }

    #[test]
    fn test_norwegian_remap_triggers_refinement() {
        let e = engine("nb", Mode::Conservative, "no");
        assert_eq!(e.classify("jeg ikke hva"), label("nb"));
        assert_eq!(e.classify("eg ikkje kva"), label("nn"));
        // Target without a group: remapped code is passed through
        assert_eq!(engine("da", Mode::Conservative, "no").classify("jeg ikke"), label("nb"));
    }

    #[test]
    fn test_target_without_groups_passes_prediction_through() {
        for code in ["es", "gl", "pt", "nb", "ru", "zh"] {
            for mode in [Mode::Conservative, Mode::Aggressive] {
                let e = engine("en", mode, code);
                assert_eq!(e.classify("que mar rúa nosa"), label(code));
            }
        }
    }

    #[test]
    fn test_conservative_answers_agree_with_aggressive() {
        let sentences = [
            "¿Cómo te llamas? disculpe adiós",
            "Como te chamas? desculpe adeus",
            "rúa nosa",
            "que mar",
            "que mar zzz",
            "zzz yyy",
            "com et dius adéu",
            "",
        ];
        for model in ["es", "gl", "ca", "pt"] {
            let cons = engine("es", Mode::Conservative, model);
            let aggr = engine("es", Mode::Aggressive, model);
            for sentence in sentences {
                if let Label::Language(code) = cons.classify(sentence) {
                    assert_eq!(aggr.classify(sentence), Label::Language(code), "{sentence:?}");
                }
            }
        }
    }

    #[test]
    fn test_classify_is_idempotent() {
        let e = engine("sl", Mode::Aggressive, "hbs");
        for sentence in ["dobar dan", "Добар дан", "dober dan", "zzz", ""] {
            assert_eq!(e.classify(sentence), e.classify(sentence));
        }
        let batch = ["dobar dan", "dober dan kako ste"];
        assert_eq!(e.classify_batch(&batch), e.classify_batch(&batch));
    }

    #[test]
    fn test_no_prediction_is_unknown() {
        let model: Box<dyn LanguageIdentifier> = Box::new(|_: &str| None);
        let e = engine_with(options("es", Mode::Aggressive), model);
        assert_eq!(e.classify("   "), Label::Unknown);
        assert_eq!(Label::Unknown.to_string(), UNKNOWN);
    }

    #[test]
    fn test_model_sees_normalized_lowercase_sentence() {
        let model: Box<dyn LanguageIdentifier> = Box::new(|text: &str| {
            assert_eq!(text, "¿cómo te llamas? disculpe");
            Some(Prediction::new("es", 0.9))
        });
        let e = engine_with(options("es", Mode::Conservative), model);
        // Decomposed "o" + U+0301 is composed before lookup
        assert_eq!(e.classify("  ¿Co\u{301}mo te\nllamas?\rdisculpe "), label("es"));
    }

    #[test]
    fn test_classify_batch_preserves_order() {
        let e = engine("es", Mode::Conservative, "gl");
        let sentences = vec!["que mar", "rúa nosa", "Como te chamas? desculpe adeus"];
        let labels = e.classify_batch(&sentences);
        assert_eq!(labels, vec![label("es"), Label::Unknown, label("gl")]);
    }

    #[test]
    fn test_dictionaries_loaded_once() {
        let config = Config::from_toml_str(
            r#"
[similar]
hbs_lat = ["hbs_lat", "sl", "mk"]
hbs_cyr = ["hbs_cyr", "mk"]
[dictionaries.codes]
sl = "sl_SI"
mk = "mk_MK"
hbs_lat = "sr_Latn_RS"
hbs_cyr = "sr_RS"
"#,
            Path::new("t.toml"),
        )
        .unwrap();
        let loader = loader();
        let e = Engine::new(options("hbs", Mode::Conservative), &config, fixed("sl"), &loader).unwrap();

        let loads = loader.loads.borrow();
        assert_eq!(loads.len(), 4);
        assert_eq!(loads.iter().filter(|l| *l == "mk").count(), 1);
        assert_eq!(e.dictionary_languages().count(), 4);
    }

    #[test]
    fn test_missing_dictionary_fails_construction() {
        let loader = MapLoader::new(&[("es_ES", &["hola"]), ("gl_ES", &["ola"])]);
        let result = Engine::new(options("es", Mode::Conservative), &config(), fixed("es"), &loader);
        match result {
            Err(Error::MissingDictionary { language, .. }) => assert_eq!(language, "ca"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("construction should fail"),
        }
    }

    #[test]
    fn test_unmapped_language_fails_construction() {
        let config = Config::from_toml_str(
            "[similar]\nes = [\"es\", \"pt\"]\n[dictionaries.codes]\nes = \"es_ES\"\n",
            Path::new("t.toml"),
        )
        .unwrap();
        let result = Engine::new(options("es", Mode::Conservative), &config, fixed("es"), &loader());
        assert!(matches!(result, Err(Error::UnmappedLanguage(ref code)) if code == "pt"));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("aggr".parse::<Mode>().unwrap(), Mode::Aggressive);
        assert_eq!("conservative".parse::<Mode>().unwrap(), Mode::Conservative);
        assert!("both".parse::<Mode>().is_err());
        assert_eq!(Mode::default(), Mode::Conservative);
    }
}
