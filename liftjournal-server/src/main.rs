use anyhow::{Result, anyhow};
use clap::Parser;
use dotenvy::dotenv;
use std::net::IpAddr;

use liftjournal::logging::{init_logger, parse_level};
use liftjournal::{Config, Journal};

#[derive(Parser, Debug)]
#[command(version, about = "LiftJournal - Workout Tracker HTTP server", long_about = None)]
struct Args {
    /// SQLite database file (defaults to $DATABASE_URL, then liftjournal.db)
    #[arg(long)]
    database_url: Option<String>,
    #[arg(long, env = "LIFTJOURNAL_HOST", default_value = "127.0.0.1")]
    host: IpAddr,
    #[arg(short, long, env = "LIFTJOURNAL_PORT", default_value_t = 5000)]
    port: u16,
    /// off, error, warn, info, debug or trace (defaults to $LIFTJOURNAL_LOG, then info)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();

    let mut config = Config::from_env();
    if let Some(url) = args.database_url {
        config = config.with_database_url(url);
    }
    let level = match args.log_level.as_deref() {
        Some(level) => parse_level(level).ok_or_else(|| anyhow!("unknown log level '{}'", level))?,
        None => config.log_level.unwrap_or(log::LevelFilter::Info),
    };
    init_logger(level);

    let journal = Journal::open(&config)?;
    liftjournal_server::run(
        liftjournal_server::Config {
            host: args.host,
            port: args.port,
        },
        journal,
    )
    .await
}
