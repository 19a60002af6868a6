use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use drug_classifier::{create_router, AppState, ServerConfig};
use log::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 5000)]
    port: u16,

    /// Directory containing model_drug_tree.json and encoders.json
    #[arg(short, long)]
    artifacts_dir: Option<PathBuf>,

    /// Directory containing index.html and about.html
    #[arg(long, default_value = "templates")]
    templates_dir: PathBuf,

    /// Directory served under /static
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        let defaults = ServerConfig::default();
        ServerConfig {
            host: self.host,
            port: self.port,
            artifacts_dir: self.artifacts_dir.unwrap_or(defaults.artifacts_dir),
            templates_dir: self.templates_dir,
            static_dir: self.static_dir,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    drug_classifier::init_logger();
    let config = Args::parse().into_config();

    info!("=== Starting Drug Classification Server ===");

    let start_time = Instant::now();
    let artifacts = config.artifact_manager().load_state()?;
    info!(
        "Artifacts {} (took {:.2?})",
        if artifacts.is_ready() { "loaded" } else { "unavailable" },
        start_time.elapsed()
    );

    let app = create_router(
        AppState::new(artifacts, config.templates_dir.clone()),
        &config.static_dir,
    );

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
