//! # Civic Watch CLI (`cw`)
//!
//! Terminal client for the Civic Watch backend. Each command maps onto one
//! backend view: the meetings timeline, meeting/ordinance/document detail,
//! full-text search, the ingest-job list, and the administrative ingest
//! trigger.
//!
//! ## Configuration
//!
//! The backend address comes from two environment variables, read per run:
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `CW_API_URL_SERVER` | Base address preferred for server-side execution |
//! | `CW_PUBLIC_API_URL` | Public base address |
//!
//! `--api-url` overrides both for a single invocation.
//!
//! ## Examples
//!
//! ```bash
//! # Upcoming and recent meetings
//! cw meetings --from 2025-01-01 --keyword budget
//!
//! # One meeting with agenda, documents, and votes
//! cw meeting 4211
//!
//! # Search ordinances and documents for a phrase
//! cw search "shelter capacity" --types ordinances,documents
//!
//! # Trigger a full backfill and watch the job list
//! cw ingest --mode backfill
//! cw jobs
//! ```

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde_json::Value;

use civic_watch::admin::{self, IngestRequest};
use civic_watch::client::{ApiClient, RuntimeContext};
use civic_watch::config::ApiConfig;
use civic_watch::meetings::{self, MeetingFilter};
use civic_watch::ordinances;
use civic_watch::search::{self, SearchFilter};
use civic_watch::{documents, jobs};

/// Civic Watch — terminal client for the civic-records backend.
#[derive(Parser)]
#[command(
    name = "cw",
    about = "Civic Watch — terminal client for the civic-records backend",
    version
)]
struct Cli {
    /// Backend base address, overriding CW_API_URL_SERVER and
    /// CW_PUBLIC_API_URL for this invocation.
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// List meetings, newest first.
    Meetings {
        /// Only meetings on or after this date (YYYY-MM-DD).
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Only meetings on or before this date (YYYY-MM-DD).
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Full-text keyword filter over title and body.
        #[arg(long)]
        keyword: Option<String>,
    },

    /// Show one meeting with its agenda items, documents, and votes.
    Meeting {
        /// Meeting id.
        id: i64,
    },

    /// Search meetings, agenda items, ordinances, documents, and news.
    Search {
        /// The search query string.
        query: String,

        /// Comma-separated record types to search
        /// (default: meetings,agenda_items,ordinances,documents,news).
        #[arg(long)]
        types: Option<String>,

        /// Only records dated on or after this date (YYYY-MM-DD).
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Only records dated on or before this date (YYYY-MM-DD).
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// List ordinances.
    Ordinances,

    /// Show one ordinance with its versions and votes.
    Ordinance {
        /// Matter id.
        id: i64,
    },

    /// Show one document, including its extracted text.
    Document {
        /// Document id.
        id: String,
    },

    /// List recent ingest jobs.
    Jobs,

    /// Trigger a backend ingest run.
    ///
    /// Runs synchronously on the backend and prints the job summary.
    Ingest {
        /// Ingest mode: `incremental` or `backfill`.
        #[arg(long, default_value = "incremental")]
        mode: String,

        /// Ingest source identifier.
        #[arg(long, default_value = admin::DEFAULT_SOURCE)]
        source: String,

        /// Only ingest records on or after this date (YYYY-MM-DD).
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Only ingest records on or before this date (YYYY-MM-DD).
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Check backend liveness.
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = ApiConfig::from_env();
    if let Some(url) = cli.api_url {
        config.api_url_server = Some(url);
    }
    let client = ApiClient::new(config, RuntimeContext::Server);

    match cli.command {
        Commands::Meetings { from, to, keyword } => {
            let filter = MeetingFilter { from, to, keyword };
            meetings::run_meetings(&client, &filter).await?;
        }
        Commands::Meeting { id } => {
            meetings::run_meeting(&client, id).await?;
        }
        Commands::Search {
            query,
            types,
            from,
            to,
        } => {
            let filter = SearchFilter { types, from, to };
            search::run_search(&client, &query, &filter).await?;
        }
        Commands::Ordinances => {
            ordinances::run_ordinances(&client).await?;
        }
        Commands::Ordinance { id } => {
            ordinances::run_ordinance(&client, id).await?;
        }
        Commands::Document { id } => {
            documents::run_document(&client, &id).await?;
        }
        Commands::Jobs => {
            jobs::run_jobs(&client).await?;
        }
        Commands::Ingest {
            mode,
            source,
            from,
            to,
        } => {
            let request = IngestRequest {
                mode,
                source,
                from,
                to,
            };
            admin::run_ingest(&client, &request).await?;
        }
        Commands::Health => {
            let data = client.get_json("/health").await?;
            let status = data
                .get("status")
                .and_then(Value::as_str)
                .unwrap_or("unknown");
            println!("backend status: {}", status);
        }
    }

    Ok(())
}
