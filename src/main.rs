use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// smartmeal - Recipe recommendations from free-text goals
#[derive(Parser)]
#[command(name = "smartmeal")]
#[command(about = "Recipe recommendations from free-text goals", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run a single recommendation and print it as JSON
    Recommend {
        /// What you feel like eating
        text: String,

        /// Number of similar recipes
        #[arg(long, default_value_t = 5)]
        top_n: usize,

        /// Baseline constraints as a JSON object
        #[arg(long)]
        baseline: Option<String>,
    },
    /// Print the details of a recipe matched by title
    Detail {
        /// Title or partial title
        query: String,
    },
    /// Load the dataset and build the similarity index
    WarmUp,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = smartmeal::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    // Initialize observability (tracing + logging)
    smartmeal::observability::init_observability(
        "smartmeal",
        env!("CARGO_PKG_VERSION"),
        &config.observability,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::serve(config, host, port).await,
        Commands::Recommend {
            text,
            top_n,
            baseline,
        } => cli::recommend(config, text, top_n, baseline).await,
        Commands::Detail { query } => cli::detail(config, query).await,
        Commands::WarmUp => cli::warm_up(config).await,
    }
}
