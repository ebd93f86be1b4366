use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use energyua::config::Config;
use energyua::coordinator::{Poller, ScheduleClient, StatusSnapshot};
use energyua::crawler::PageFetcher;
use energyua::models::{regional_now, Catalog};

#[derive(Parser)]
#[command(
    name = "energyua",
    version,
    about = "Power outage schedules from energy-ua.info",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); defaults to the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// TOML configuration file; environment variables are used otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

/// Region and group selection, overriding the configuration
#[derive(Args)]
struct Selection {
    /// Region host, e.g. kyiv.energy-ua.info
    #[arg(short, long)]
    region: Option<String>,

    /// Group identifier, e.g. 1-1
    #[arg(short, long)]
    group: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available regions
    Regions,

    /// List outage groups of a region
    Groups {
        /// Region host
        #[arg(short, long)]
        region: Option<String>,
    },

    /// Print the outage periods for today and tomorrow
    Schedule {
        #[command(flatten)]
        selection: Selection,

        /// Print JSON instead of text
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Print the current power state and the next transitions
    Status {
        #[command(flatten)]
        selection: Selection,

        /// Print JSON instead of text
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Refresh periodically and print the status after each update
    Watch {
        #[command(flatten)]
        selection: Selection,

        /// Seconds between refreshes; defaults to the configured interval
        #[arg(short, long)]
        interval: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;

    let format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| config.logging.format.clone());
    setup_tracing(&format, &config.logging.level, cli.verbose)?;

    tracing::debug!(root = %config.client.publisher_root, "energyua starting");

    match cli.command {
        Commands::Regions => list_regions(&config).await,
        Commands::Groups { region } => list_groups(&config, region).await,
        Commands::Schedule { selection, json } => show_schedule(&config, selection, json).await,
        Commands::Status { selection, json } => show_status(&config, selection, json).await,
        Commands::Watch {
            selection,
            interval,
        } => watch(&config, selection, interval).await,
    }
}

fn load_config(path: Option<&std::path::Path>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => Config::from_env(),
    }
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("energyua=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("energyua={level},warn"))
            .context("Invalid log level")?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

/// Client with the configured selection, overridden by command-line flags
fn build_client(config: &Config, selection: Selection) -> Result<ScheduleClient<PageFetcher>> {
    let mut client =
        ScheduleClient::from_config(config).context("Failed to create schedule client")?;

    if let Some(region) = selection.region {
        client.select_region(region);
    }
    if let Some(group) = selection.group {
        client.select_group(group);
    }

    if client.state().group().is_none() {
        anyhow::bail!("Both a region and a group are required (--region, --group)");
    }

    Ok(client)
}

/// Fill the catalogs so labels can be shown; failures only cost the labels
async fn load_labels(client: &mut ScheduleClient<PageFetcher>) {
    if let Err(e) = client.discover_regions().await {
        tracing::warn!("Region labels unavailable: {}", e);
    }
    if let Err(e) = client.discover_groups().await {
        tracing::warn!("Group labels unavailable: {}", e);
    }
}

fn print_catalog(catalog: &Catalog) {
    for entry in catalog {
        println!("{}\t{}", entry.identifier, entry.label);
    }
}

async fn list_regions(config: &Config) -> Result<()> {
    let mut client =
        ScheduleClient::from_config(config).context("Failed to create schedule client")?;
    client
        .discover_regions()
        .await
        .context("Failed to discover regions")?;

    print_catalog(&client.regions());
    Ok(())
}

async fn list_groups(config: &Config, region: Option<String>) -> Result<()> {
    let mut client =
        ScheduleClient::from_config(config).context("Failed to create schedule client")?;
    if let Some(region) = region {
        client.select_region(region);
    }
    if client.state().region().is_none() {
        anyhow::bail!("A region is required (--region)");
    }

    client
        .discover_groups()
        .await
        .context("Failed to discover groups")?;

    print_catalog(&client.groups());
    Ok(())
}

async fn show_schedule(config: &Config, selection: Selection, json: bool) -> Result<()> {
    let mut client = build_client(config, selection)?;
    if json {
        load_labels(&mut client).await;
    }
    client
        .refresh_schedule()
        .await
        .context("Failed to refresh schedule")?;

    if json {
        let snapshot = client.snapshot_within(&regional_now(), config.lookahead());
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    if client.periods().is_empty() {
        println!("No outages scheduled");
    }
    for period in client.periods() {
        println!("{period}");
    }
    Ok(())
}

async fn show_status(config: &Config, selection: Selection, json: bool) -> Result<()> {
    let mut client = build_client(config, selection)?;
    load_labels(&mut client).await;
    client
        .refresh_schedule()
        .await
        .context("Failed to refresh schedule")?;

    let snapshot = client.snapshot_within(&regional_now(), config.lookahead());
    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_status(&snapshot);
    }
    Ok(())
}

fn print_status(snapshot: &StatusSnapshot) {
    let format_time = |at: Option<chrono::DateTime<chrono_tz::Tz>>| {
        at.map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string())
    };

    println!(
        "{} {}: {}",
        snapshot.region_label, snapshot.group_label, snapshot.state
    );
    println!("  next outage:  {}", format_time(snapshot.next_outage));
    println!("  next restore: {}", format_time(snapshot.next_restore));
}

async fn watch(config: &Config, selection: Selection, interval: Option<u64>) -> Result<()> {
    let mut client = build_client(config, selection)?;
    load_labels(&mut client).await;

    let interval = interval
        .map(Duration::from_secs)
        .unwrap_or_else(|| config.poll_interval());
    if interval.is_zero() {
        anyhow::bail!("--interval must be greater than 0");
    }

    tracing::info!(
        label = %client.display_label(),
        interval_secs = interval.as_secs(),
        "Watching schedule, press Ctrl-C to stop"
    );

    let lookahead = config.lookahead();
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    let mut poller = Poller::new(client).with_interval(interval);
    poller
        .run_until(shutdown, |client, _ok| {
            print_status(&client.snapshot_within(&regional_now(), lookahead));
        })
        .await;

    Ok(())
}
