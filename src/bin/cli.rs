//! CLI binary for wikiseek.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wikiseek::report::{Report, render_report};
use wikiseek::session::run_session;
use wikiseek::{AppConfig, Controller, TerminalRenderer};
use wikiseek_api::WikipediaClient;

/// wikiseek: search Wikipedia from the terminal.
#[derive(Parser)]
#[command(name = "wikiseek", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Option<Command>,
}

/// Available commands.
#[derive(Subcommand)]
enum Command {
    /// Search and print the filtered results.
    Search {
        /// Search terms.
        #[arg(required = true)]
        query: Vec<String>,
        /// Print results as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the preview and references of an article.
    Article {
        /// Wikipedia page id.
        page_id: u64,
        /// Print the article as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Interactive session (default).
    Interactive,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so result output can be piped.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("wikiseek=info,wikiseek_api=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    let client = WikipediaClient::new(&config.api)?;
    tracing::debug!(endpoint = %client.endpoint(), "client ready");
    let mut controller = Controller::new(client, config.api, config.view.stale_policy);
    let renderer = TerminalRenderer::new(controller.config().site_root.as_str());

    let (report, json) = match cli.command.unwrap_or(Command::Interactive) {
        Command::Search { query, json } => {
            let query = query.join(" ");
            if query.trim().is_empty() {
                anyhow::bail!("empty search query");
            }
            controller.set_query(query);
            let phase = controller.submit_search().await;
            tracing::debug!(?phase, "search settled");
            (Report::Results, json)
        }
        Command::Article { page_id, json } => {
            let phase = controller.open_result(page_id).await;
            tracing::debug!(?phase, page_id, "article settled");
            (Report::Article { page_id }, json)
        }
        Command::Interactive => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            run_session(&mut controller, &renderer, stdin, tokio::io::stdout()).await?;
            return Ok(());
        }
    };

    print!("{}", render_report(controller.state(), &renderer, report, json)?);
    Ok(())
}
