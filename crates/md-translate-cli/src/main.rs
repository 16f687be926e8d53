mod translator;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::LevelFilter;
use md_translate_config::Settings;
use md_translate_engine::{
    BatchReport, DocumentOutcome, PipelineOptions, find_markdown_files, run_batch,
};
use std::path::PathBuf;
use std::process::ExitCode;

use translator::CommandTranslator;

#[derive(Parser, Debug)]
#[command(
    name = "md-translate",
    version,
    about = "Translate markdown files while keeping their structure"
)]
struct Cli {
    /// Markdown files or directories to translate
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Source language code
    #[arg(short = 'F', long)]
    from_lang: Option<String>,

    /// Target language code
    #[arg(short = 'T', long)]
    to_lang: Option<String>,

    /// Number of files translated in parallel
    #[arg(short = 'P', long)]
    processes: Option<usize>,

    /// Translate everything again instead of reusing the previous run's cache
    #[arg(short = 'I', long)]
    ignore_cache: bool,

    /// Write `<name>_translated.md` next to each file instead of rewriting it
    #[arg(short = 'N', long)]
    new_file: bool,

    /// Translate files even if a translated copy already exists
    #[arg(short = 'O', long)]
    overwrite: bool,

    /// Keep the cache file after a successful run
    #[arg(short = 'S', long)]
    save_temp_on_complete: bool,

    /// Translator program (overrides `[translator] command`)
    #[arg(long)]
    translator: Option<String>,

    /// Argument for the translator program; repeatable, `{from}`/`{to}` are substituted
    #[arg(long = "translator-arg", allow_hyphen_values = true)]
    translator_args: Vec<String>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// -v for progress, -vv for every translated run
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

/// Command-line flags win over the config file.
fn apply_overrides(mut settings: Settings, cli: &Cli) -> Settings {
    if let Some(from) = &cli.from_lang {
        settings.from_lang = from.clone();
    }
    if let Some(to) = &cli.to_lang {
        settings.to_lang = to.clone();
    }
    if let Some(processes) = cli.processes {
        settings.processes = processes;
    }
    settings.ignore_cache |= cli.ignore_cache;
    settings.new_file |= cli.new_file;
    settings.overwrite |= cli.overwrite;
    settings.save_temp_on_complete |= cli.save_temp_on_complete;
    if let Some(command) = &cli.translator {
        settings.translator.command = Some(command.clone());
        settings.translator.args = cli.translator_args.clone();
    } else if !cli.translator_args.is_empty() {
        settings.translator.args = cli.translator_args.clone();
    }
    settings
}

fn pipeline_options(settings: &Settings) -> PipelineOptions {
    PipelineOptions {
        from_language: settings.from_lang.clone(),
        to_language: settings.to_lang.clone(),
        ignore_cache: settings.ignore_cache,
        new_file: settings.new_file,
        overwrite: settings.overwrite,
        save_temp_on_complete: settings.save_temp_on_complete,
    }
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let config_path = cli.config.clone().unwrap_or_else(Settings::config_path);
    log::info!("Config path: {}", config_path.display());
    let settings = Settings::load_from_path(&config_path)
        .with_context(|| format!("Failed to load config file {}", config_path.display()))?
        .unwrap_or_default();
    let settings = apply_overrides(settings, cli);
    settings.validate()?;
    Ok(settings)
}

fn run(cli: &Cli) -> Result<BatchReport> {
    let settings = load_settings(cli)?;
    let command = settings.translator.command.clone().with_context(|| {
        format!(
            "No translator configured: pass --translator or set [translator] command in {}",
            Settings::config_path().display()
        )
    })?;

    let files: Vec<PathBuf> = find_markdown_files(&cli.paths)?
        .into_iter()
        .map(PathBuf::from)
        .collect();

    let options = pipeline_options(&settings);
    let args = settings.translator.args.clone();
    let report = run_batch(&files, &options, settings.processes, || {
        CommandTranslator::new(command.as_str(), args.clone())
    })?;
    Ok(report)
}

fn print_report(report: &BatchReport) {
    for (path, result) in &report.results {
        match result {
            Ok(DocumentOutcome::Translated { output, .. }) => {
                println!("Processed file: {}", output.display())
            }
            Ok(DocumentOutcome::Skipped) => {
                println!("Skipped file: {} (already translated)", path.display())
            }
            Err(e) => eprintln!("Failed: {e}"),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(log_level(cli.verbose))
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(report) => {
            print_report(&report);
            if report.has_failures() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
