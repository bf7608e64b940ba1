mod choice;
mod render;
mod signal;
mod terminal;

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use chispa_anki::AnkiConnectClient;
use chispa_config::Config;
use chispa_core::{
    AbandonReason, AddError, BatchError, CardMaker, Enricher, Orchestrator, ProgressMode,
};
use chispa_dictionary::OpenAiDictionary;
use chispa_media::{ElevenLabsNarrator, OpenAiImageGenerator};
use chispa_types::Language;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use self::signal::Interrupts;
use self::terminal::TerminalInteraction;

#[derive(Parser)]
#[command(
    name = "chispa",
    about = "Automated Anki card creator for language learning",
    version,
    after_help = "Examples:\n  \
        chispa add banco                     Add Spanish word\n  \
        chispa add banco -c \"sitting\"        Add with context hint\n  \
        chispa add serendipity --lang en     Add English word\n  \
        chispa batch words.txt               Process Spanish words\n  \
        chispa batch words.txt --lang en     Process English words"
)]
struct Cli {
    /// JSON config file; environment variables fill in missing API keys
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a single word
    Add {
        /// The word to add, optionally `word | hint`
        word: String,
        /// Context to help pick the right meaning (e.g. 'sentence about sitting in a park')
        #[arg(short, long)]
        context: Option<String>,
        /// Language: 'es' for Spanish, 'en' for English
        #[arg(short, long, default_value = "es")]
        lang: Language,
    },
    /// Process words from a file, one per line
    Batch {
        /// Path to the word list; created words are removed from it
        file: PathBuf,
        /// Language: 'es' for Spanish, 'en' for English
        #[arg(short, long, default_value = "es")]
        lang: Language,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{:#}", e);
            println!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so prompts on stdout stay readable
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env(),
    };

    let problems = config.validate();
    if !problems.is_empty() {
        println!("Configuration errors:");
        for problem in &problems {
            println!("  - {problem}");
        }
        println!("\nPlease set up your .env file. See .env.example for reference.");
        return Ok(ExitCode::FAILURE);
    }

    let store = Arc::new(
        AnkiConnectClient::new(config.anki.clone(), config.network.anki_timeout())
            .context("failed to set up AnkiConnect client")?,
    );
    if !anki_ready(&store, cli.command.language()).await {
        return Ok(ExitCode::FAILURE);
    }

    let orchestrator = build_orchestrator(&config, store)?;

    let interrupts = Interrupts::default();
    let _listener = interrupts.listen();
    let mut terminal = TerminalInteraction::new(interrupts);

    let code = match cli.command {
        Command::Add {
            word,
            context,
            lang,
        } => add(&orchestrator, &word, context.as_deref(), lang, &mut terminal).await,
        Command::Batch { file, lang } => batch(&orchestrator, &file, lang, &mut terminal).await,
    };
    Ok(code)
}

impl Command {
    fn language(&self) -> Language {
        match self {
            Command::Add { lang, .. } | Command::Batch { lang, .. } => *lang,
        }
    }
}

/// Deck and note type must exist before any word is looked up. An
/// unreachable Anki is left to the command, which reports it itself.
async fn anki_ready(store: &AnkiConnectClient, language: Language) -> bool {
    match store.setup_problems(language).await {
        Ok(problems) if problems.is_empty() => true,
        Ok(problems) => {
            println!("Anki setup errors:");
            for problem in &problems {
                println!("  - {problem}");
            }
            false
        }
        Err(e) => {
            tracing::debug!("Skipping Anki setup check: {}", e);
            true
        }
    }
}

fn build_orchestrator(
    config: &Config,
    store: Arc<AnkiConnectClient>,
) -> anyhow::Result<Orchestrator> {
    let media_dir = config.media.resolve_dir()?;
    tracing::info!("Media folder: {}", media_dir.display());

    let network = &config.network;
    let dictionary = OpenAiDictionary::new(&config.openai, network.lookup_timeout())
        .context("failed to set up dictionary client")?;
    let images = OpenAiImageGenerator::new(&config.openai, media_dir.clone(), network.image_timeout())
        .context("failed to set up image client")?;
    let narrator = ElevenLabsNarrator::new(&config.elevenlabs, media_dir, network.audio_timeout())
        .context("failed to set up audio client")?;

    let progress = if atty::is(atty::Stream::Stderr) {
        ProgressMode::Terminal
    } else {
        ProgressMode::Silent
    };

    let enricher = Enricher::new(Arc::new(images), Arc::new(narrator), progress);
    let maker = CardMaker::new(enricher, store, config.anki.clone());

    Ok(Orchestrator::new(Arc::new(dictionary), maker))
}

async fn add(
    orchestrator: &Orchestrator,
    word: &str,
    context: Option<&str>,
    language: Language,
    terminal: &mut TerminalInteraction,
) -> ExitCode {
    match orchestrator.add_word(word, context, language, terminal).await {
        Ok(outcome) => {
            println!(
                "\nSuccess! Card for '{}' added to deck '{}'",
                outcome.word, outcome.deck
            );
            ExitCode::SUCCESS
        }
        Err(AddError::Abandoned(AbandonReason::Interrupted)) => {
            println!("Cancelled");
            ExitCode::FAILURE
        }
        // lookup and store failures were already reported as they happened
        Err(AddError::Abandoned(_) | AddError::Store(_)) => ExitCode::FAILURE,
        Err(e @ (AddError::StoreUnavailable | AddError::EmptyWord)) => {
            println!("\nError: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn batch(
    orchestrator: &Orchestrator,
    file: &Path,
    language: Language,
    terminal: &mut TerminalInteraction,
) -> ExitCode {
    match orchestrator.run_batch(file, language, terminal).await {
        Ok(summary) => {
            println!("{}", render::summary(&summary));
            if let Some(removed) = terminal.removed() {
                println!("\nUpdated {}: {} word(s) removed", file.display(), removed);
            }
            if summary.is_complete() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(BatchError::Interrupted { created }) => {
            println!("  Cancelled batch");
            if !created.is_empty() {
                println!(
                    "Cards already created (still listed in {}): {}",
                    file.display(),
                    created.join(", ")
                );
            }
            ExitCode::FAILURE
        }
        Err(BatchError::Checkpoint {
            path,
            source,
            summary,
        }) => {
            println!("{}", render::summary(&summary));
            println!("\nError: failed to update {}: {}", path.display(), source);
            ExitCode::FAILURE
        }
        Err(e) => {
            println!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
