use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use yamaha_api::YamahaClient;
use yamaha_bridge::{ClientConfig, CommandKind, Item, Provenance, Value, YamahaBridge, CONF_CMD};

pub mod items;

use items::{ItemTree, LoadedItems};

/// Yamaha receiver bridge
///
/// Loads an item tree, binds its items to receivers and either prints the
/// resulting values or pushes one change through the bridge.
#[derive(Parser, Debug)]
#[command(name = "yamaha-bridge-cli")]
#[command(about = "Drive Yamaha receivers through the item bridge")]
#[command(version)]
pub struct Args {
    /// JSON item tree (zones with yamaha_host, items with yamaha_cmd)
    #[arg(short, long)]
    pub items: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(short, long, default_value = "4")]
    pub timeout_secs: u64,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Register all items, pull receiver state and print every item
    Status,

    /// Set one item as an external writer would, then print every item
    Set {
        zone: String,
        item: String,
        /// JSON literal (`true`, `-400`) or plain text (`HDMI1`)
        value: String,
    },

    /// Print the decoded basic status of a receiver
    Query { host: String },
}

impl Args {
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(anyhow::anyhow!("Timeout must be positive"));
        }

        match self.log_level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            _ => {
                return Err(anyhow::anyhow!(
                    "Invalid log level '{}'. Valid levels: error, warn, info, debug, trace",
                    self.log_level
                ));
            }
        }

        if matches!(self.command, Commands::Status | Commands::Set { .. }) && self.items.is_none() {
            return Err(anyhow::anyhow!("--items is required for this command"));
        }

        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            ..ClientConfig::default()
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.to_lowercase())),
        )
        .init();
}

/// Parse a command-line value: JSON scalars first, bare text otherwise
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::Text(raw.to_string()))
}

fn load_bridge(args: &Args) -> Result<(YamahaBridge, LoadedItems)> {
    let path = args
        .items
        .as_ref()
        .context("--items is required for this command")?;
    let loaded = ItemTree::load(path)?.build();

    let mut bridge = YamahaBridge::with_config(args.client_config());
    for item in &loaded.items {
        let item: Arc<dyn Item> = item.clone();
        bridge
            .register(&item)
            .with_context(|| format!("Failed to register item {}", item.name()))?;
    }
    info!("Registered {} items", bridge.routing_table().len());

    bridge.start();
    Ok((bridge, loaded))
}

fn print_items(loaded: &LoadedItems) {
    for item in &loaded.items {
        let is_state = item
            .config(CONF_CMD)
            .and_then(|cmd| cmd.parse::<CommandKind>().ok())
            == Some(CommandKind::State);

        let shown = match item.value() {
            None => "-".to_string(),
            Some(Value::Text(text)) if is_state => format!("<{} bytes of status>", text.len()),
            Some(value) => value.to_string(),
        };
        println!("{:<32} {}", item.name(), shown);
    }
}

fn run(args: Args) -> Result<()> {
    match &args.command {
        Commands::Status => {
            let (bridge, loaded) = load_bridge(&args)?;
            print_items(&loaded);
            bridge.stop();
        }
        Commands::Set { zone, item, value } => {
            let (bridge, loaded) = load_bridge(&args)?;
            let target = loaded
                .find(zone, item)
                .with_context(|| format!("No item {} in zone {}", item, zone))?;

            target.set_value(parse_value(value), Provenance::External);
            bridge
                .apply_update(&**target)
                .with_context(|| format!("Failed to apply {}", target.name()))?;

            print_items(&loaded);
            bridge.stop();
        }
        Commands::Query { host } => {
            let client = YamahaClient::with_transport(yamaha_api::YncClient::with_config(
                args.client_config(),
            ));
            let status = client
                .basic_status(host)
                .with_context(|| format!("Failed to query {}", host))?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    args.validate().context("Invalid arguments")?;
    init_tracing(&args.log_level);

    if let Err(e) = run(args) {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
