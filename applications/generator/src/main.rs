//! Cadence Generator - produce and poll audio generation jobs
use cadence_core::SongId;
use cadence_generation::{GenerationClient, Poller, Producer, TaskState};
use cadence_generator::config::GeneratorConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cadence-generator")]
#[command(about = "Generate instrumental audio for catalog songs", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a generation job for a song
    Produce {
        /// Catalog song ID
        #[arg(short, long)]
        song_id: String,
        /// Style sent to the generator (the song's genre)
        #[arg(short, long, default_value = "Pop")]
        genre: String,
        /// Track title (derived from the genre when omitted)
        #[arg(short, long)]
        title: Option<String>,
    },
    /// Poll pending jobs until interrupted
    Consume {
        /// Run a single pass and exit
        #[arg(long)]
        once: bool,
    },
    /// List recorded jobs
    Tasks,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cadence_generator=info,cadence_generation=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = GeneratorConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Produce {
            song_id,
            genre,
            title,
        } => {
            produce(&config, &song_id, &genre, title.as_deref()).await?;
        }
        Commands::Consume { once } => {
            consume(&config, once).await?;
        }
        Commands::Tasks => {
            list_tasks(&config).await?;
        }
    }

    Ok(())
}

async fn produce(
    config: &GeneratorConfig,
    song_id: &str,
    genre: &str,
    title: Option<&str>,
) -> anyhow::Result<()> {
    config.validate()?;

    let client = GenerationClient::new(config.client_config())?;
    let producer = Producer::new(client, config.task_file());

    let task = producer
        .generate(&SongId::new(song_id), genre, title)
        .await?;

    println!("Submitted task {} for song {}", task.id, task.song_id);
    Ok(())
}

async fn consume(config: &GeneratorConfig, once: bool) -> anyhow::Result<()> {
    config.validate()?;

    let client = GenerationClient::new(config.client_config())?;
    let poller = Poller::new(client, config.task_file())
        .with_poll_interval(config.poll_interval())
        .with_check_delay(config.check_delay());

    tracing::info!(path = %config.tasks.path.display(), "Starting task poller");

    if once {
        let summary = poller.poll_once().await?;
        println!(
            "Checked {} task(s): {} finished, {} still pending",
            summary.checked, summary.resolved, summary.still_pending
        );
        return Ok(());
    }

    poller
        .run(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for shutdown signal");
            }
        })
        .await?;

    Ok(())
}

async fn list_tasks(config: &GeneratorConfig) -> anyhow::Result<()> {
    let tasks = config.task_file().load().await?;

    println!("Tasks:");
    for task in tasks {
        match task.state {
            TaskState::Pending => println!("  {} - {} (pending)", task.id, task.song_id),
            TaskState::Success { data } => println!(
                "  {} - {} ({:.0}s) {}",
                task.id, task.song_id, data.duration, data.url
            ),
        }
    }

    Ok(())
}
