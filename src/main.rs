//! Command line entry point: translate one tag, or migrate a legacy dictionary.

use std::ffi::OsString;
use std::io::Write as _;
use std::path::{
    Path,
    PathBuf,
};
use std::process::ExitCode;

use tag_translate::Translator;
use tag_translate::config::{
    ConfigError,
    ConfigManager,
};
use tag_translate::context::Language;
use tag_translate::dictionary::{
    DEFINITION_SUFFIX,
    migrate_legacy,
};
use tag_translate::error::{
    DictionaryError,
    TranslateError,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage:
  tag-translate [--config FILE] [--lang CODE] [--dictionary NAME] [--no-placeholder] TAG [KEY[=VALUE] ...]
  tag-translate --migrate STEM

A KEY without a value is replaced by its own translation.
--migrate converts STEM.php into STEM.definition.json.
";

#[derive(Error, Debug)]
enum CliError {
    #[error("{0} (see --help)")]
    Args(#[from] pico_args::Error),

    #[error("Argument is not valid UTF-8: {0:?}")]
    NonUtf8(OsString),

    #[error("Missing TAG (see --help)")]
    MissingTag,

    #[error("--migrate takes no other arguments, got {0:?} (see --help)")]
    UnexpectedArgs(Vec<String>),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Translate(#[from] TranslateError),

    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Options for translating a single tag.
#[derive(Debug)]
struct TranslateArgs {
    config: Option<PathBuf>,
    lang: Option<String>,
    dictionary: Option<String>,
    fallback_placeholder: bool,
    tag: String,
    /// `KEY` or `KEY=VALUE`, in command line order
    replacements: Vec<(String, Option<String>)>,
}

/// What the command line asks for.
#[derive(Debug)]
enum Command {
    Help,
    Translate(TranslateArgs),
    /// Convert the legacy dictionary at this stem.
    Migrate(PathBuf),
}

fn parse_replacement(arg: &str) -> (String, Option<String>) {
    match arg.split_once('=') {
        Some((key, value)) => (key.to_string(), Some(value.to_string())),
        None => (arg.to_string(), None),
    }
}

fn run_translate(args: TranslateArgs) -> Result<String, CliError> {
    let mut manager = ConfigManager::new();
    match &args.config {
        Some(path) => manager.load_file(path)?,
        None => manager.load_settings(std::env::current_dir().ok())?,
    }

    let mut settings = manager.into_settings();
    if args.dictionary.is_some() {
        settings.default_dictionary = args.dictionary;
    }

    let mut language = Language::from_settings(&settings.language);
    if let Some(code) = &args.lang
        && !language.set_language(code)
    {
        tracing::warn!("Language [{code}] is not available, using the default");
    }

    let mut translator = Translator::from_settings(settings, language);
    let replacements: Vec<(&str, Option<&str>)> =
        args.replacements.iter().map(|(key, value)| (key.as_str(), value.as_deref())).collect();

    Ok(translator.t(args.tag.as_str(), &replacements, args.fallback_placeholder)?)
}

fn run_migrate(stem: &Path) -> Result<String, CliError> {
    let definition = migrate_legacy(stem)?;
    let mut target = stem.as_os_str().to_owned();
    target.push(DEFINITION_SUFFIX);
    std::fs::write(&target, &definition)?;
    tracing::info!("Wrote [{}]", Path::new(&target).display());
    Ok(format!("{}", Path::new(&target).display()))
}

fn parse_args(mut args: pico_args::Arguments) -> Result<Command, CliError> {
    if args.contains(["-h", "--help"]) {
        return Ok(Command::Help);
    }

    // `--migrate` はフリー引数より先に判定する (タグ名 "migrate" と衝突させない)
    let migrate: Option<PathBuf> = args.opt_value_from_str("--migrate")?;
    let config = args.opt_value_from_str("--config")?;
    let lang = args.opt_value_from_str("--lang")?;
    let dictionary = args.opt_value_from_str("--dictionary")?;
    let fallback_placeholder = !args.contains("--no-placeholder");

    let free = args
        .finish()
        .into_iter()
        .map(|arg| arg.into_string().map_err(CliError::NonUtf8))
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(stem) = migrate {
        if !free.is_empty() {
            return Err(CliError::UnexpectedArgs(free));
        }
        return Ok(Command::Migrate(stem));
    }

    let Some((tag, rest)) = free.split_first() else {
        return Err(CliError::MissingTag);
    };
    Ok(Command::Translate(TranslateArgs {
        config,
        lang,
        dictionary,
        fallback_placeholder,
        tag: tag.clone(),
        replacements: rest.iter().map(|arg| parse_replacement(arg)).collect(),
    }))
}

fn run() -> Result<(), CliError> {
    let output = match parse_args(pico_args::Arguments::from_env())? {
        Command::Help => {
            write!(std::io::stdout(), "{USAGE}")?;
            return Ok(());
        }
        Command::Translate(args) => run_translate(args)?,
        Command::Migrate(stem) => run_migrate(&stem)?,
    };

    writeln!(std::io::stdout(), "{output}")?;
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
