use clap::{Parser, Subcommand};
use faq_loader::{LoaderError, Result};
use faq_loader::commands::{
    CatalogSelection, list_catalogs, load_catalogs, rebuild_index, search_faqs, show_config,
    show_status,
};
use faq_loader::config::Config;

#[derive(Parser)]
#[command(name = "faq-loader")]
#[command(about = "Load FAQ catalogs into the knowledge base and refresh its search index")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append a built-in catalog to the knowledge base and rebuild the search index
    Load {
        /// Catalog to load
        #[arg(value_enum)]
        catalog: CatalogSelection,
    },
    /// Rebuild the search index from the FAQ table
    RebuildIndex,
    /// Show FAQ totals by category and source
    Status {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Full-text search over the indexed FAQs
    Search {
        /// Words that must all appear in a matching FAQ
        query: String,
        /// Maximum number of results
        #[arg(long, default_value_t = 10)]
        limit: i64,
    },
    /// List the built-in catalogs
    Catalogs,
    /// Write the configuration file, or print it with --show
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

fn load_config() -> Result<Config> {
    Config::load_default().map_err(|e| LoaderError::Config(format!("{e:#}")))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Load { catalog } => {
            let config = load_config()?;
            load_catalogs(&config, catalog).await?;
        }
        Commands::RebuildIndex => {
            let config = load_config()?;
            rebuild_index(&config).await?;
        }
        Commands::Status { json } => {
            let config = load_config()?;
            show_status(&config, json).await?;
        }
        Commands::Search { query, limit } => {
            let config = load_config()?;
            search_faqs(&config, &query, limit).await?;
        }
        Commands::Catalogs => {
            list_catalogs()?;
        }
        Commands::Config { show } => {
            let config = load_config()?;
            show_config(&config, show)?;
        }
    }

    Ok(())
}
