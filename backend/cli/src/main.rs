mod app;
mod status_cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info};

use docextract_config::AppConfig;
use docextract_gateway::GatewayState;

#[derive(Parser)]
#[command(name = "docextract")]
#[command(about = "Docextract: structured data from receipt images")]
#[command(version)]
struct Cli {
    /// Env file to load instead of `./.env`
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to bind the HTTP server to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Check whether a local server is running
    Status {
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Extract one receipt and print it as JSON
    Extract {
        /// URL of a JPEG receipt image
        image_url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    docextract_config::load_env_file(cli.env_file.as_deref())?;
    let config = docextract_config::from_env()?;
    docextract_logging::init_logger(&app::logger_options(&config));
    let config = docextract_config::ensure_valid(config)?;

    match cli.command {
        Commands::Serve { port } => {
            let config = AppConfig {
                port: port.unwrap_or(config.port),
                ..config
            };
            run_server(config).await?;
        }
        Commands::Status { port } => {
            let port = port.unwrap_or(config.port);
            match status_cmd::check(&format!("http://localhost:{port}")).await {
                Ok(body) => println!("{body}"),
                Err(e) => {
                    println!("Docextract is not running on port {port}: {e:#}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Extract { image_url } => {
            let provider = app::build_provider(&config)?;
            let service = app::build_service(&config, provider);
            match service.extract_receipt_data(&image_url).await {
                Ok(receipt) => println!("{}", serde_json::to_string_pretty(&receipt)?),
                Err(e) => {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

async fn run_server(config: AppConfig) -> Result<()> {
    info!(
        config = %docextract_config::redact(&config),
        "Starting Docextract"
    );

    let provider = app::build_provider(&config).inspect_err(|e| {
        error!(error = %e, "Cannot start without a model client");
    })?;
    let service = app::build_service(&config, provider);

    docextract_gateway::start_server(&config.listen_address(), GatewayState::new(service)).await
}
