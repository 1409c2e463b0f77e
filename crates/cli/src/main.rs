use api_shared::ListingRes;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use iclboard_core::{BoardConfig, ListingService};

#[derive(Parser)]
#[command(name = "iclboard")]
#[command(about = "ICL status board CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile the feed against the local store and print the board payload
    Listing {
        /// Day to reconcile (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Print the raw scheduling feed
    Feed {
        /// Day to fetch (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Print the relevant procedure identifiers from the local store
    Relevant,
    /// Print the feed request URL without sending it
    Query {
        /// Day to query (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use 'iclboard --help' for commands");
        return Ok(());
    };

    let cfg = BoardConfig::from_lookup(|key| std::env::var(key).ok())?;
    let service = ListingService::new(&cfg)?;

    match command {
        Commands::Listing { date } => {
            let reconciliation = service.listing_for(day_or_today(date)).await?;
            let res = ListingRes::success(reconciliation);
            println!("{}", serde_json::to_string_pretty(&res)?);
        }
        Commands::Feed { date } => {
            let records = service.feed().fetch_day(day_or_today(date)).await?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commands::Relevant => {
            let mut ids: Vec<_> = service
                .store()
                .load_relevant_row_ids()
                .await?
                .into_iter()
                .collect();
            ids.sort();
            if ids.is_empty() {
                println!("No relevant procedures found.");
            } else {
                for id in ids {
                    println!("{id}");
                }
            }
        }
        Commands::Query { date } => {
            println!("{}", service.feed().request_url(day_or_today(date)));
        }
    }

    Ok(())
}

fn day_or_today(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}
