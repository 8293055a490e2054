//! Language identification models consumed by the engine.

/// Top-1 answer of an identification model.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub code: String,
    /// Reported by the model, never used for decisions
    pub confidence: f64,
}

impl Prediction {
    pub fn new(code: impl Into<String>, confidence: f64) -> Self {
        Self {
            code: code.into(),
            confidence,
        }
    }
}

/// Language identification model. Must be safe to query from several threads.
pub trait LanguageIdentifier: Send + Sync {
    /// Best guess for `text`, or `None` when the text carries no usable signal.
    fn predict(&self, text: &str) -> Option<Prediction>;
}

impl<F> LanguageIdentifier for F
where
    F: Fn(&str) -> Option<Prediction> + Send + Sync,
{
    fn predict(&self, text: &str) -> Option<Prediction> {
        self(text)
    }
}

/// Trigram-based identification from the `whatlang` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct Whatlang;

impl LanguageIdentifier for Whatlang {
    fn predict(&self, text: &str) -> Option<Prediction> {
        let info = whatlang::detect(text)?;
        Some(Prediction::new(
            iso639_1(info.lang().code()),
            info.confidence(),
        ))
    }
}

/// Two-letter code for a whatlang ISO 639-3 code, or the 639-3 code itself when
/// the language has none.
fn iso639_1(code: &'static str) -> &'static str {
    match code {
        "afr" => "af",
        "aka" => "ak",
        "amh" => "am",
        "ara" => "ar",
        "aze" => "az",
        "bel" => "be",
        "ben" => "bn",
        "bul" => "bg",
        "cat" => "ca",
        "ces" => "cs",
        "cmn" => "zh",
        "dan" => "da",
        "deu" => "de",
        "ell" => "el",
        "eng" => "en",
        "epo" => "eo",
        "est" => "et",
        "fin" => "fi",
        "fra" => "fr",
        "guj" => "gu",
        "heb" => "he",
        "hin" => "hi",
        "hrv" => "hr",
        "hun" => "hu",
        "hye" => "hy",
        "ind" => "id",
        "ita" => "it",
        "jav" => "jv",
        "jpn" => "ja",
        "kan" => "kn",
        "kat" => "ka",
        "khm" => "km",
        "kor" => "ko",
        "lat" => "la",
        "lav" => "lv",
        "lit" => "lt",
        "mal" => "ml",
        "mar" => "mr",
        "mkd" => "mk",
        "mya" => "my",
        "nep" => "ne",
        "nld" => "nl",
        "nob" => "nb",
        "ori" => "or",
        "pan" => "pa",
        "pes" => "fa",
        "pol" => "pl",
        "por" => "pt",
        "ron" => "ro",
        "rus" => "ru",
        "sin" => "si",
        "slk" => "sk",
        "slv" => "sl",
        "sna" => "sn",
        "spa" => "es",
        "srp" => "sr",
        "swe" => "sv",
        "tam" => "ta",
        "tel" => "te",
        "tgl" => "tl",
        "tha" => "th",
        "tuk" => "tk",
        "tur" => "tr",
        "ukr" => "uk",
        "urd" => "ur",
        "uzb" => "uz",
        "vie" => "vi",
        "yid" => "yi",
        "zul" => "zu",
        other => other,
    }
}
