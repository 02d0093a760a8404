use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use histoscope::assets::AssetLoader;
use histoscope::models::AppConfig;
use histoscope::server;

#[derive(Parser)]
#[command(name = "histoscope")]
#[command(about = "Histogram equalization report server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Render the report page once to an HTML file
    Render {
        /// Output HTML file path
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Extract embedded config and page template for customization
    Init {
        /// Overwrite existing files
        #[arg(long, short)]
        force: bool,

        /// List embedded assets without extracting
        #[arg(long)]
        list: bool,
    },
}

/// Paths and overrides taken from the environment
struct EnvSettings {
    config_file: Option<PathBuf>,
    template_file: Option<PathBuf>,
    fonts_dir: Option<PathBuf>,
    image_path: Option<PathBuf>,
    bind_addr: Option<String>,
}

impl EnvSettings {
    fn read() -> Self {
        Self {
            config_file: std::env::var("CONFIG_FILE").ok().map(PathBuf::from),
            template_file: std::env::var("TEMPLATE_FILE").ok().map(PathBuf::from),
            fonts_dir: std::env::var("FONTS_DIR").ok().map(PathBuf::from),
            image_path: std::env::var("IMAGE_PATH").ok().map(PathBuf::from),
            bind_addr: std::env::var("BIND_ADDR").ok(),
        }
    }

    fn asset_loader(&self) -> AssetLoader {
        AssetLoader::new(self.config_file.clone(), self.template_file.clone())
    }

    /// Load config once and apply env overrides
    fn load_config(&self, loader: &AssetLoader) -> AppConfig {
        AppConfig::load_from_assets(loader)
            .with_overrides(self.image_path.clone(), self.bind_addr.clone())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render { output }) => run_render_command(&output),
        Some(Commands::Init { force, list }) => run_init_command(force, list),
        Some(Commands::Serve) | None => run_server().await,
    }
}

/// Render the page directly to a file (no server needed)
fn run_render_command(output: &PathBuf) -> anyhow::Result<()> {
    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "histoscope=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let env = EnvSettings::read();
    let asset_loader = Arc::new(env.asset_loader());
    let config = env.load_config(&asset_loader);
    let state =
        server::create_app_state_with_config(asset_loader, config, env.fonts_dir.as_deref())?;

    let html = state
        .report_service
        .render_page_blocking()
        .map_err(|e| anyhow::anyhow!("Render error: {e}"))?;

    std::fs::write(output, &html)?;
    println!("Rendered {} ({} bytes)", output.display(), html.len());

    Ok(())
}

/// Extract embedded assets to filesystem
fn run_init_command(force: bool, list: bool) -> anyhow::Result<()> {
    if list {
        println!("Embedded assets:\n");
        for f in AssetLoader::list_embedded() {
            println!("  {f}");
        }
        return Ok(());
    }

    let loader = EnvSettings::read().asset_loader();
    let report = loader.init(force)?;

    if !report.written.is_empty() {
        println!("Extracted {} files:", report.written.len());
        for f in &report.written {
            println!("  + {f}");
        }
    }
    if !report.skipped.is_empty() {
        println!(
            "\nSkipped {} existing files (use --force to overwrite):",
            report.skipped.len()
        );
        for f in &report.skipped {
            println!("  - {f}");
        }
    }

    Ok(())
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "histoscope=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let env = EnvSettings::read();
    let asset_loader = Arc::new(env.asset_loader());

    tracing::info!(
        config = ?env.config_file.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
        template = ?env.template_file.as_ref().map(|p| p.display().to_string()).unwrap_or_else(|| "embedded".to_string()),
        "Asset sources configured"
    );

    let config = env.load_config(&asset_loader);
    let state =
        server::create_app_state_with_config(asset_loader, config, env.fonts_dir.as_deref())?;
    let config = state.config.clone();
    let bind_addr = &config.bind_addr;
    let app = server::build_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind {bind_addr}: {e}"))?;
    tracing::info!(
        addr = %bind_addr,
        image = %config.image_path.display(),
        "Histoscope server listening"
    );
    println!("Server is running on http://{bind_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
