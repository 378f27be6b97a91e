//! Operator commands for the swap pool engine: provision pools and raise
//! suspension flags against a JSON state file.

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

use swap_domain::enums::SuspendScope;
use swap_domain::value_objects::CurrencyCode;
use swap_engine::registry::PoolRegistry;

mod store;

#[derive(Parser)]
#[command(name = "swap-cli")]
#[command(about = "Swap pool operator commands", long_about = None)]
struct Cli {
    /// Pool state file.
    #[arg(long, env = "SWAP_POOL_STATE", default_value = "pools.json")]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision a new pool for a currency pair
    StartNewPool {
        /// First currency symbol (e.g. BTC)
        currency_a: String,
        /// Second currency symbol (e.g. USDT)
        currency_b: String,
        /// Display rank; defaults to one past the current maximum
        #[arg(short, long)]
        rank: Option<i32>,
    },
    /// Block swaps in a pool until further notice
    SuspendSwap {
        /// Pool id
        pool_id: Uuid,
    },
    /// Block liquidity providing in a pool until further notice
    SuspendProviding {
        /// Pool id
        pool_id: Uuid,
    },
    /// List pools ordered by rank
    ListPools,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let registry = Arc::new(PoolRegistry::from_pools(store::load_pools(&cli.state)?));

    match &cli.command {
        Commands::StartNewPool {
            currency_a,
            currency_b,
            rank,
        } => {
            let rank = match rank {
                Some(rank) => *rank,
                None => registry.next_rank().await,
            };
            let shared = registry
                .create(
                    CurrencyCode::new(currency_a),
                    CurrencyCode::new(currency_b),
                    rank,
                )
                .await?;
            let pool = shared.read().await;
            println!(
                "pool {}-{} created ({}, rank {})",
                pool.currency_a, pool.currency_b, pool.id, pool.rank
            );
        }
        Commands::SuspendSwap { pool_id } => {
            let pair = suspend(&registry, *pool_id, SuspendScope::Swap).await?;
            println!("swapping in pool {pair} is suspended now");
        }
        Commands::SuspendProviding { pool_id } => {
            let pair = suspend(&registry, *pool_id, SuspendScope::Providing).await?;
            println!("providing in pool {pair} is suspended now");
        }
        Commands::ListPools => {
            println!(
                "{:<38} | {:<12} | {:>14} | {:>14} | {:>5} | {}",
                "ID", "PAIR", "AMOUNT A", "AMOUNT B", "RANK", "FLAGS"
            );
            for shared in registry.list().await {
                let pool = shared.read().await;
                let mut flags = String::new();
                if pool.suspend_swap {
                    flags.push_str("no-swap ");
                }
                if pool.suspend_providing {
                    flags.push_str("no-providing");
                }
                println!(
                    "{:<38} | {:<12} | {:>14} | {:>14} | {:>5} | {}",
                    pool.id,
                    format!("{}-{}", pool.currency_a, pool.currency_b),
                    pool.amount_a,
                    pool.amount_b,
                    pool.rank,
                    flags.trim_end()
                );
            }
        }
    }

    store::save_pools(&cli.state, &registry.snapshot().await)?;
    Ok(())
}

async fn suspend(
    registry: &Arc<PoolRegistry>,
    pool_id: Uuid,
    scope: SuspendScope,
) -> Result<String> {
    let Some(shared) = registry.find(pool_id).await else {
        bail!("pool with id {pool_id} does not exist");
    };
    registry.suspend(pool_id, scope).await?;
    let pool = shared.read().await;
    Ok(format!("{}-{}", pool.currency_a, pool.currency_b))
}
