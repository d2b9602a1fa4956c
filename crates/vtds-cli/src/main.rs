use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vtds_builder::builder::UPLOADS_DIR_NAME;
use vtds_builder::DatasetBuilder;
use vtds_core::AppConfig;
use vtds_twitter::TwitterCollector;
use vtds_youtube::{YoutubeClient, YoutubeCollector};

#[derive(Debug, Parser)]
#[command(name = "vtds-cli")]
#[command(about = "VTuber annotation dataset builder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Merge the vpost directory scraper's output into the checkpoint.
    LoadVpost {
        /// Summary listing file (one entry per vtuber).
        #[arg(long)]
        data: PathBuf,
        /// Per-person detail pages file.
        #[arg(long)]
        detail: PathBuf,
        /// Replace records already in the checkpoint instead of keeping them.
        #[arg(long)]
        overwrite: bool,
    },
    /// Merge the YouTube search scraper's channel file into the checkpoint.
    LoadYoutube {
        path: PathBuf,
        #[arg(long)]
        overwrite: bool,
    },
    /// Run the collect/filter/sample pipeline and write the dataset.
    Build {
        /// Override the configured dataset size cap.
        #[arg(long)]
        max: Option<usize>,
        /// Write compact JSON instead of pretty-printed.
        #[arg(long)]
        compact: bool,
        /// Emit target videos as watch URLs instead of full video objects.
        #[arg(long)]
        shaped: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = vtds_core::config::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(?config, "configuration loaded");

    let cli = Cli::parse();
    match cli.command {
        Commands::LoadVpost {
            data,
            detail,
            overwrite,
        } => {
            let mut builder = make_builder(&config, None, config.pretty_output, false)?;
            builder.load_merged()?;
            builder
                .load_vpost_data(&data, &detail, overwrite)
                .with_context(|| format!("loading vpost files {} and {}", data.display(), detail.display()))?;
        }
        Commands::LoadYoutube { path, overwrite } => {
            let mut builder = make_builder(&config, None, config.pretty_output, false)?;
            builder.load_merged()?;
            builder
                .load_youtube_data(&path, overwrite)
                .with_context(|| format!("loading youtube search file {}", path.display()))?;
        }
        Commands::Build { max, compact, shaped } => {
            if config.youtube_api_key.is_none() {
                anyhow::bail!("VTDS_YOUTUBE_API_KEY must be set to run a build");
            }
            let pretty = config.pretty_output && !compact;
            let mut builder = make_builder(&config, max, pretty, shaped)?;
            builder.load_merged()?;
            builder.load_upload_counts()?;
            builder.build().await.context("dataset build failed")?;
        }
    }

    Ok(())
}

fn make_builder(
    config: &AppConfig,
    max: Option<usize>,
    pretty: bool,
    shaped: bool,
) -> anyhow::Result<DatasetBuilder> {
    // Load-only commands never issue a request, so an absent key is fine
    // there; build refuses to start without one before reaching this point.
    let api_key = config.youtube_api_key.clone().unwrap_or_default();
    let client = YoutubeClient::new(&api_key, config.request_timeout_secs, &config.user_agent)?;
    let youtube = YoutubeCollector::new(
        client,
        config.save_dir.join(UPLOADS_DIR_NAME),
        pretty,
    );
    let twitter = TwitterCollector::new(None);
    Ok(DatasetBuilder::new(
        &config.save_dir,
        youtube,
        twitter,
        max.unwrap_or(config.dataset_max),
        config.checkpoint_interval,
        pretty,
        shaped,
    ))
}
