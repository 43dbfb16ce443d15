use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sitepilot_extract::ContentExtractor;
use sitepilot_http::{create_router, AppState};
use sitepilot_llm::{LlmClient, SuggestionGenerator};
use sitepilot_service::{SessionService, SiteAnalyzer, WizardController};
use sitepilot_storage::{SessionStore, Storage};

#[derive(Parser)]
#[command(name = "sitepilot")]
#[command(about = "Resumable website-optimization wizard backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        #[arg(short, long, default_value = "4700")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Extract a website and print the analysis
    Analyze {
        url: String,
    },
    /// Print the latest session for a domain
    Latest {
        domain: String,
    },
    /// Print all sessions for a domain, newest first
    History {
        domain: String,
    },
    /// Drive the wizard for a URL from the command line
    Wizard {
        url: String,
        #[arg(short, long)]
        agent: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// Compose and persist the optimization result
        #[arg(long)]
        finalize: bool,
    },
}

fn get_db_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sitepilot")
        .join("sitepilot.db")
}

fn get_api_key() -> Result<String> {
    std::env::var("SITEPILOT_API_KEY")
        .map_err(|_| anyhow::anyhow!("SITEPILOT_API_KEY environment variable must be set"))
}

fn get_base_url() -> String {
    std::env::var("SITEPILOT_API_URL").unwrap_or_else(|_| "https://api.openai.com".to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let db_path = get_db_path();

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let storage = Arc::new(Storage::new(&db_path)?);
    let session_store: Arc<dyn SessionStore> = Arc::clone(&storage) as Arc<dyn SessionStore>;
    let sessions = Arc::new(SessionService::new(session_store));

    match cli.command {
        Commands::Serve { port, host } => {
            let llm = Arc::new(LlmClient::new(get_api_key()?, get_base_url())?);
            let state = Arc::new(AppState {
                sessions,
                generator: Arc::new(SuggestionGenerator::new(Arc::clone(&llm))),
                analyzer: Arc::new(SiteAnalyzer::new(ContentExtractor::new()?, llm)),
            });
            let router = create_router(state);
            let addr = format!("{}:{}", host, port);
            tracing::info!("Starting HTTP server on {}", addr);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, router).await?;
        }
        Commands::Analyze { url } => {
            let llm = Arc::new(LlmClient::new(get_api_key()?, get_base_url())?);
            let analyzer = SiteAnalyzer::new(ContentExtractor::new()?, llm);
            let analysis = analyzer.analyze(&url).await?;
            println!("{}", serde_json::to_string_pretty(&analysis)?);
        }
        Commands::Latest { domain } => {
            match storage.get_latest(&domain)? {
                Some(snapshot) => println!("{}", serde_json::to_string_pretty(&snapshot)?),
                None => println!("No session found for domain: {}", domain),
            }
        }
        Commands::History { domain } => {
            let history = storage.get_history(&domain)?;
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
        Commands::Wizard { url, agent, description, finalize } => {
            let mut wizard = WizardController::new(sessions);
            wizard.set_url(&url).await?;
            if let Some(agent_id) = agent {
                wizard.choose_agent(&agent_id)?;
            }
            if let Some(text) = description {
                wizard.set_description(&text);
            }
            if finalize {
                let report = wizard.finalize().await?;
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", serde_json::to_string_pretty(wizard.state())?);
            }
            // Drains the fire-and-forget writes before the process exits.
            wizard.close().await;
        }
    }

    Ok(())
}
