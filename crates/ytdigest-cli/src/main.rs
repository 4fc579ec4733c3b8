use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::fs;

use ytdigest_core::{
    Analysis, ChatModel, HistoryStore, PipelineOptions, PipelineServices, Provider, WebSpeech,
    WebTranslator, YouTubeCaptions, format_digest_readable, regenerate_documents, run,
};

/// CLI wrapper for Provider enum (needed for clap ValueEnum)
#[derive(Clone, Default, ValueEnum)]
enum CliProvider {
    Grok,
    Openai,
    #[default]
    Gemini,
}

impl From<CliProvider> for Provider {
    fn from(cli: CliProvider) -> Self {
        match cli {
            CliProvider::Grok => Provider::Grok,
            CliProvider::Openai => Provider::Openai,
            CliProvider::Gemini => Provider::Gemini,
        }
    }
}

#[derive(Parser)]
#[command(name = "ytdigest")]
#[command(
    about = "Fetch YouTube transcripts and generate digests with summaries, speakers, insights and sentiment"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a video and print its digest
    Analyze {
        /// Video URL or reference
        url: String,

        /// AI provider for summaries, diarization and insights
        #[arg(short, long, default_value = "gemini")]
        provider: CliProvider,

        /// Target language for the translated summary
        #[arg(short, long, default_value = "hi")]
        translate_lang: String,

        /// Skip audio preview synthesis
        #[arg(long)]
        no_audio: bool,

        /// Write rendered documents and audio into this directory
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Inspect past runs
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
}

#[derive(Subcommand)]
enum HistoryAction {
    /// List stored runs, most recent first
    List,
    /// Print a stored run's digest (documents are regenerated)
    Show { video_id: String },
    /// Remove one stored run
    Delete { video_id: String },
    /// Remove all stored runs
    Clear,
}

fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

async fn write_artifacts(analysis: &Analysis, out_dir: &PathBuf) -> Result<()> {
    fs::create_dir_all(out_dir).await?;
    let files: [(&str, &Option<Vec<u8>>); 7] = [
        ("transcript.md", &analysis.artifacts.transcript_doc),
        ("summary.md", &analysis.artifacts.summary_doc),
        ("summary_bilingual.md", &analysis.artifacts.bilingual_summary_doc),
        ("speakers.md", &analysis.artifacts.speaker_doc),
        ("insights.md", &analysis.artifacts.insights_doc),
        ("transcript_preview.mp3", &analysis.artifacts.transcript_audio),
        ("summary.mp3", &analysis.artifacts.summary_audio),
    ];
    for (name, bytes) in files {
        if let Some(bytes) = bytes {
            fs::write(out_dir.join(name), bytes).await?;
        }
    }
    Ok(())
}

fn print_warnings(analysis: &Analysis) {
    for warning in &analysis.warnings {
        eprintln!(
            "{} {}: {}",
            style("Warning:").yellow().bold(),
            warning.stage,
            warning.message
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze {
            url,
            provider,
            translate_lang,
            no_audio,
            out,
        } => {
            let provider: Provider = provider.into();

            // Validate API key early
            if let Err(e) = provider.validate_api_key() {
                eprintln!("{} {}", style("Error:").red().bold(), e);
                std::process::exit(1);
            }

            println!(
                "\n{}  {}\n",
                style("ytdigest").cyan().bold(),
                style("Transcript Analyzer").dim()
            );

            let transcripts = YouTubeCaptions;
            let model = ChatModel::new(provider);
            let translator = WebTranslator::default();
            let speech = WebSpeech::default();
            let services = PipelineServices {
                transcripts: &transcripts,
                model: &model,
                translator: &translator,
                speech: &speech,
            };
            let options = PipelineOptions {
                translate_lang,
                skip_audio: no_audio,
                ..Default::default()
            };
            let mut history = HistoryStore::open_default();

            let spinner = create_spinner(&format!("Analyzing with {}...", provider.name()));
            let analysis = run(&url, &services, &options, &mut history).await?;
            spinner.finish_with_message(format!(
                "{} Analyzed: {} speaker(s), {} warning(s)",
                style("✓").green().bold(),
                analysis.speakers.speakers.len(),
                analysis.warnings.len()
            ));

            print_warnings(&analysis);

            if let Some(out_dir) = out {
                write_artifacts(&analysis, &out_dir).await?;
                println!(
                    "\n{} {}",
                    style("Saved:").dim(),
                    style(out_dir.display()).cyan()
                );
            }

            println!("{}", style("─".repeat(60)).dim());
            println!("{}", format_digest_readable(&analysis));
        }

        Command::History { action } => {
            let mut history = HistoryStore::open_default();
            match action {
                HistoryAction::List => {
                    println!(
                        "{} {}",
                        style("Store:").dim(),
                        style(history.path().display()).cyan()
                    );
                    if history.is_empty() {
                        println!("{}", style("No stored runs.").dim());
                        return Ok(());
                    }
                    for entry in history.list() {
                        println!(
                            "{}  {}  {}",
                            style(&entry.video_id).cyan(),
                            style(&entry.timestamp).dim(),
                            entry.video_title
                        );
                    }
                }
                HistoryAction::Show { video_id } => {
                    let Some(entry) = history.load(&video_id) else {
                        eprintln!(
                            "{} no stored run for {}",
                            style("Error:").red().bold(),
                            video_id
                        );
                        std::process::exit(1);
                    };
                    let mut analysis = entry.clone().into_analysis();
                    // Rendered artifacts are not persisted; rebuild documents
                    // from the durable fields.
                    regenerate_documents(&mut analysis);
                    println!("{}", format_digest_readable(&analysis));
                }
                HistoryAction::Delete { video_id } => {
                    history.delete(&video_id)?;
                    println!("{} deleted {}", style("✓").green().bold(), video_id);
                }
                HistoryAction::Clear => {
                    history.clear()?;
                    println!("{} history cleared", style("✓").green().bold());
                }
            }
        }
    }

    Ok(())
}
