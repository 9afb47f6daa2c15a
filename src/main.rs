use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tokio::sync::mpsc;
use trondeck::{
    config::DashboardConfig,
    domain::{DashboardError, Freeze, Unfreeze},
    service::{
        Dashboard, DashboardUpdate, LoadOutcome, RefreshReport, boot, check_sync, latest_blocks,
        network_overview, output, spawn_block_poller, spawn_sync_poller,
    },
};

#[derive(Parser, Debug)]
#[command(name = "trondeck", version, about = "Wallet, explorer and staking client for a TRON full node", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Full node HTTP endpoint (overrides TRONDECK_FULL_NODE)
    #[arg(long, global = true, value_name = "URL")]
    node: Option<String>,

    /// Encrypted wallet file (overrides TRONDECK_STORE)
    #[arg(long, global = true, value_name = "FILE")]
    store: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new wallet from a fresh recovery phrase (refused while one is stored)
    Generate,
    /// Restore a wallet from its recovery phrase (refused while one is stored)
    Import {
        #[arg(required = true, num_args = 1.., value_name = "WORD")]
        phrase: Vec<String>,
    },
    /// Balance, resources and frozen positions of the stored wallet
    Show,
    /// Delete the stored wallet
    Clear {
        /// Confirm that the only copy of the key is erased
        #[arg(long)]
        yes: bool,
    },
    /// Freeze TRX for ENERGY or BANDWIDTH
    Stake {
        #[arg(value_name = "TRX")]
        amount: f64,
        #[arg(value_name = "RESOURCE")]
        resource: String,
        /// Delegate already staked TRX to this account instead of freezing more
        #[arg(long, default_value = "")]
        receiver: String,
    },
    /// Release Stake 2.0 frozen TRX of one resource type
    Unstake {
        #[arg(value_name = "TRX")]
        amount: f64,
        #[arg(value_name = "RESOURCE")]
        resource: String,
    },
    /// Look up a block number, transaction hash or address
    Search { query: String },
    /// Node synchronization state
    Status,
    /// The most recent blocks
    Blocks {
        #[arg(short, long, value_name = "COUNT")]
        count: Option<usize>,
    },
    /// Peer counts and chain parameters
    Network,
    /// Poll sync state and latest blocks until interrupted
    Watch,
}

fn print_report(report: &RefreshReport) {
    if report.skipped {
        println!("refresh skipped, another one is running");
    }
    for (part, error) in &report.failures {
        eprintln!("{part:?} not refreshed: {}", error.summary());
    }
}

async fn load_wallet(dashboard: &Dashboard) -> Result<(), DashboardError> {
    match dashboard.session.load_from_store().await? {
        LoadOutcome::Empty => {}
        LoadOutcome::Loaded(report) => print_report(&report),
        LoadOutcome::Discarded(error) => eprintln!("{}", error.summary()),
    }
    Ok(())
}

async fn run(command: Commands, dashboard: Dashboard) -> Result<(), DashboardError> {
    let session = dashboard.session.clone();

    match command {
        Commands::Generate => {
            let phrase = dashboard.keys.generate_phrase()?;
            let report = session.import_from_phrase(&phrase).await?;
            println!("recovery phrase (write it down, it is the only backup):");
            println!("  {phrase}");
            print_report(&report);
            print!("{}", output::render_snapshot(&session.snapshot().await));
        }
        Commands::Import { phrase } => {
            let report = session.import_from_phrase(&phrase.join(" ")).await?;
            print_report(&report);
            print!("{}", output::render_snapshot(&session.snapshot().await));
        }
        Commands::Show => {
            load_wallet(&dashboard).await?;
            print!("{}", output::render_snapshot(&session.snapshot().await));
        }
        Commands::Clear { yes } => {
            session.clear(yes).await?;
            println!("wallet deleted");
        }
        Commands::Stake {
            amount,
            resource,
            receiver,
        } => {
            load_wallet(&dashboard).await?;
            let outcome = session
                .stake(Freeze {
                    amount_trx: amount,
                    resource,
                    receiver,
                })
                .await?;
            println!("{}", output::render_phase(&outcome.phase));
            print!("{}", output::render_snapshot(&session.snapshot().await));
        }
        Commands::Unstake { amount, resource } => {
            load_wallet(&dashboard).await?;
            let outcome = session
                .unstake(Unfreeze {
                    amount_trx: amount,
                    resource,
                })
                .await?;
            println!("{}", output::render_phase(&outcome.phase));
            print!("{}", output::render_snapshot(&session.snapshot().await));
        }
        Commands::Search { query } => {
            let result = dashboard.router.search(&query).await?;
            print!("{}", output::render_search(&result));
        }
        Commands::Status => {
            let report = check_sync(dashboard.ledger.as_ref(), chrono::Utc::now()).await;
            println!("{}", output::render_sync(&report));
        }
        Commands::Blocks { count } => {
            let count = count.unwrap_or(dashboard.config.latest_block_count);
            for block in latest_blocks(dashboard.ledger.as_ref(), count).await? {
                print!("{}", output::render_block(&block));
            }
        }
        Commands::Network => {
            let overview = network_overview(dashboard.ledger.as_ref()).await?;
            print!("{}", output::render_network(&overview));
        }
        Commands::Watch => {
            let (tx, mut rx) = mpsc::channel(16);
            let sync = spawn_sync_poller(
                dashboard.ledger.clone(),
                dashboard.config.sync_interval,
                tx.clone(),
            );
            let blocks = spawn_block_poller(
                dashboard.ledger.clone(),
                dashboard.config.block_interval,
                dashboard.config.latest_block_count,
                tx,
            );

            loop {
                tokio::select! {
                    update = rx.recv() => match update {
                        Some(DashboardUpdate::Sync(report)) => {
                            println!("sync: {}", output::render_sync(&report));
                        }
                        Some(DashboardUpdate::Blocks(latest)) => {
                            for block in &latest {
                                print!("{}", output::render_block(block));
                            }
                        }
                        None => break,
                    },
                    _ = tokio::signal::ctrl_c() => break,
                }
            }

            sync.cancel();
            blocks.cancel();
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();

    let mut config = DashboardConfig::from_env();
    if let Some(node) = args.node {
        config.full_node = node;
    }
    if let Some(store) = args.store {
        config.store_path = store;
    }

    let result = match boot(config) {
        Ok(dashboard) => run(args.command, dashboard).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.summary());
            ExitCode::FAILURE
        }
    }
}
