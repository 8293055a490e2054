//! Line-oriented command line: reads sentences, writes `sentence<TAB>label`.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lidspell::{Config, DirectoryLoader, Engine, LanguageCode, Mode, Options, Whatlang};

#[derive(Debug, Parser)]
#[command(name = "lidspell", version, about = "Refine language identification with spellchecking")]
#[command(group(ArgGroup::new("mode").required(true).args(["aggr", "cons"])))]
struct Cli {
    /// Target language code (e.g. gl, nb, hbs)
    lang: String,

    /// Input file, one sentence per line [default: stdin]
    input: Option<PathBuf>,

    /// Output file [default: stdout]
    output: Option<PathBuf>,

    /// Always answer with a language on ties
    #[arg(long)]
    aggr: bool,

    /// Answer "unknown" on unresolved ties
    #[arg(long)]
    cons: bool,

    /// Tag every Serbo-Croatian variant as hbs
    #[arg(long)]
    hbs: bool,

    /// Keep the script qualifier (hbs_lat, hbs_cyr) in labels
    #[arg(long)]
    script: bool,

    /// Config file, or a directory containing lidspell.toml
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Only log errors
    #[arg(short = 'q', long, conflicts_with = "debug")]
    quiet: bool,

    /// Log every classification decision
    #[arg(long)]
    debug: bool,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    logfile: Option<PathBuf>,

    /// Lines classified in parallel per chunk
    #[arg(long, default_value = "1024")]
    batch_size: NonZeroUsize,
}

fn init_tracing(cli: &Cli) -> Result<()> {
    //   --quiet → "error"
    //   --debug → "debug"
    //   default → RUST_LOG if set, otherwise "info"
    let filter = if cli.quiet {
        EnvFilter::new("error")
    } else if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    };

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);
    match &cli.logfile {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    Ok(match path {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    })
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    })
}

fn write_chunk<W: Write>(engine: &Engine, lines: &[String], out: &mut W) -> Result<()> {
    let labels = engine.classify_batch(lines);
    for (line, label) in lines.iter().zip(labels) {
        writeln!(out, "{}\t{}", line.trim(), label)?;
    }
    Ok(())
}

/// Label every line of `input`, `batch_size` lines at a time. Returns the line count.
///
/// Invalid UTF-8 is replaced with U+FFFD rather than aborting the run.
fn label_lines<R: BufRead, W: Write>(
    engine: &Engine,
    mut input: R,
    output: &mut W,
    batch_size: NonZeroUsize,
) -> Result<usize> {
    let mut lines: Vec<String> = Vec::with_capacity(batch_size.get());
    let mut buf = Vec::new();
    let mut total = 0usize;
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        lines.push(String::from_utf8_lossy(&buf).into_owned());
        if lines.len() == batch_size.get() {
            write_chunk(engine, &lines, output)?;
            total += lines.len();
            lines.clear();
        }
    }
    if !lines.is_empty() {
        write_chunk(engine, &lines, output)?;
        total += lines.len();
    }
    output.flush()?;
    Ok(total)
}

fn run(cli: Cli) -> Result<()> {
    let target = LanguageCode::parse(&cli.lang).context("Invalid target language")?;
    let mode = if cli.aggr { Mode::Aggressive } else { Mode::Conservative };

    let config = Config::load(cli.config.as_deref())?;
    let loader = DirectoryLoader::new(config.search_paths());

    let mut options = Options::new(target, mode);
    options.collapse_hbs = cli.hbs;
    options.script_output = cli.script;
    let engine = Engine::new(options, &config, Box::new(Whatlang), &loader)?;

    let input = open_input(cli.input.as_deref())?;
    let mut output = open_output(cli.output.as_deref())?;

    let start = Instant::now();
    let total = label_lines(&engine, input, &mut output, cli.batch_size)?;

    info!(lines = total, "Elapsed: {:.3}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;
    run(cli)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use lidspell::{DictionaryLoader, Prediction, Spellchecker, WordList};

    use super::*;

    struct Lexicons;

    impl DictionaryLoader for Lexicons {
        fn load(&self, _language: &str, dictionary: &str) -> lidspell::Result<Box<dyn Spellchecker>> {
            let words: &[&str] = match dictionary {
                "gl_ES" => &["como", "te", "chamas", "rúa", "nosa"],
                "pt_PT" => &["como", "te", "chamas", "rua", "nossa"],
                _ => &[],
            };
            Ok(Box::new(words.iter().copied().collect::<WordList>()))
        }
    }

    /// Galician engine over a model that answers "pt" for anything with letters.
    fn engine() -> Engine {
        let config = Config::from_toml_str(
            "[similar]\ngl = [\"gl\", \"pt\"]\n[dictionaries.codes]\ngl = \"gl_ES\"\npt = \"pt_PT\"\n",
            Path::new("t.toml"),
        )
        .unwrap();
        let model = |text: &str| {
            text.chars()
                .any(char::is_alphabetic)
                .then(|| Prediction::new("pt", 0.5))
        };
        let options = Options::new("gl".parse().unwrap(), Mode::Conservative);
        Engine::new(options, &config, Box::new(model), &Lexicons).unwrap()
    }

    fn run_lines(input: &[u8], batch_size: usize) -> (usize, String) {
        let mut out = Vec::new();
        let total = label_lines(
            &engine(),
            input,
            &mut out,
            NonZeroUsize::new(batch_size).unwrap(),
        )
        .unwrap();
        (total, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_writes_trimmed_sentence_and_label() {
        let (total, out) = run_lines(b"  rua nossa \r\nr\xC3\xBAa nosa\n", 1024);
        assert_eq!(total, 2);
        assert_eq!(out, "rua nossa\tpt\nrúa nosa\tgl\n");
    }

    #[test]
    fn test_order_kept_across_chunks() {
        let input = "rúa nosa\nrua nossa\n123\nrúa nosa\nrua nossa";
        let (total, out) = run_lines(input.as_bytes(), 2);
        assert_eq!(total, 5);
        let labels: Vec<&str> = out
            .lines()
            .map(|l| l.split('\t').nth(1).unwrap())
            .collect();
        assert_eq!(labels, vec!["gl", "pt", "unknown", "gl", "pt"]);
        assert!(out.lines().next().unwrap().starts_with("rúa nosa\t"));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let (total, out) = run_lines(b"r\xfaa nosa\nr\xC3\xBAa nosa\n", 1);
        assert_eq!(total, 2);
        let mut lines = out.lines();
        assert!(lines.next().unwrap().starts_with("r\u{FFFD}a nosa\t"));
        assert_eq!(lines.next(), Some("rúa nosa\tgl"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(run_lines(b"", 4), (0, String::new()));
    }

    #[test]
    fn test_exactly_one_mode_required() {
        assert!(Cli::try_parse_from(["lidspell", "gl"]).is_err());
        assert!(Cli::try_parse_from(["lidspell", "gl", "--aggr", "--cons"]).is_err());

        let cli = Cli::try_parse_from(["lidspell", "gl", "--cons", "in.txt"]).unwrap();
        assert!(cli.cons && !cli.aggr);
        assert_eq!(cli.input.as_deref(), Some(Path::new("in.txt")));
        assert_eq!(cli.batch_size.get(), 1024);
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        assert!(Cli::try_parse_from(["lidspell", "gl", "--aggr", "--batch-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["lidspell", "gl", "-q", "--debug", "--aggr"]).is_err());
    }
}
