//! Affirm widget development CLI
//!
//! Publishes widget state into a file-backed app-group container and reads
//! it back the way the home-screen renderer would. Useful for checking key
//! layouts and renderer behavior without a device.
//!
//! Usage:
//!   affirm-widget --platform ios publish-list items.json
//!   affirm-widget --platform ios show

use affirm_cli::{dump, format_dump, load_config, load_items, open_sync, widget_status};
use affirm_types::{CurrentAffirmation, Platform, RefreshMode, ThemeMode, WidgetSettings};
use affirm_widget::PublishReport;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "affirm-widget")]
#[command(about = "Drive and inspect the Affirm widget shared store")]
struct Cli {
    /// Directory standing in for the OS shared container
    #[arg(short, long, default_value = "widget-container")]
    store_dir: PathBuf,

    /// Target platform (overrides the config file)
    #[arg(short, long)]
    platform: Option<Platform>,

    /// Path to a JSON widget sync config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct SettingsArgs {
    #[arg(long, default_value = "system")]
    theme: ThemeMode,

    /// Let the renderer rotate through the list
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    rotation: bool,

    #[arg(long, default_value_t = WidgetSettings::DEFAULT_FONT_MULTIPLIER)]
    font: f64,

    #[arg(long, default_value = "daily")]
    refresh: RefreshMode,
}

impl From<&SettingsArgs> for WidgetSettings {
    fn from(args: &SettingsArgs) -> Self {
        Self {
            theme: args.theme,
            rotation_enabled: args.rotation,
            font_multiplier: args.font,
            refresh_mode: args.refresh,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Publish the displayed affirmation (or clear it)
    PublishItem {
        #[arg(long, required_unless_present = "clear")]
        text: Option<String>,

        /// Item id; a random one is generated when omitted
        #[arg(long)]
        id: Option<String>,

        /// Clear the current item instead
        #[arg(long, conflicts_with_all = ["text", "id"])]
        clear: bool,
    },
    /// Publish the widget settings
    PublishSettings(SettingsArgs),
    /// Publish the affirmation list from a JSON file
    PublishList { file: PathBuf },
    /// Publish current item, settings and list in one batch
    PublishAll {
        /// JSON list file; the stored list is kept when omitted
        #[arg(long)]
        items: Option<PathBuf>,

        /// Id of the list item to show; the first item when omitted
        #[arg(long)]
        current: Option<String>,

        #[command(flatten)]
        settings: SettingsArgs,
    },
    /// Reset every widget field
    Clear,
    /// Print what the renderer would read, as JSON
    Show,
    /// Print every raw key in the container
    Dump,
}

fn print_report(report: &PublishReport) {
    let timing = report
        .elapsed
        .map(|elapsed| format!(" in {elapsed:?}"))
        .unwrap_or_default();
    println!(
        "{}: {} field(s) written{}{}",
        report.operation,
        report.written,
        timing,
        if report.notified { "" } else { " (renderer not notified)" }
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let config = load_config(args.config.as_deref(), args.platform)?;
    let (store, sync) = open_sync(&args.store_dir, config)?;
    info!("Using container {:?}", store.group_dir());

    match args.command {
        Command::PublishItem { text, id, clear } => {
            let current = match (clear, text) {
                (false, Some(text)) => {
                    let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
                    Some(CurrentAffirmation::new(id, text))
                }
                _ => None,
            };
            let report = sync
                .try_publish_current_item(current.as_ref())
                .await
                .context("Publishing current item failed")?;
            print_report(&report);
        }
        Command::PublishSettings(settings) => {
            let report = sync
                .try_publish_settings(&WidgetSettings::from(&settings))
                .await
                .context("Publishing settings failed")?;
            print_report(&report);
        }
        Command::PublishList { file } => {
            let items = load_items(&file)?;
            let report = sync
                .try_publish_list(&items)
                .await
                .context("Publishing list failed")?;
            print_report(&report);
        }
        Command::PublishAll {
            items,
            current,
            settings,
        } => {
            let items = items.as_deref().map(load_items).transpose()?;
            let pool = match &items {
                Some(items) => items.clone(),
                None => sync.read_list().await,
            };
            let current = match current {
                Some(id) => Some(
                    pool.iter()
                        .find(|item| item.id == id)
                        .map(CurrentAffirmation::from)
                        .with_context(|| format!("No affirmation with id {id}"))?,
                ),
                None => pool.first().map(CurrentAffirmation::from),
            };
            let report = sync
                .try_publish_all(
                    current.as_ref(),
                    &WidgetSettings::from(&settings),
                    items.as_deref(),
                )
                .await
                .context("Publishing widget state failed")?;
            print_report(&report);
        }
        Command::Clear => {
            let report = sync.try_clear_all().await.context("Clearing widget failed")?;
            print_report(&report);
        }
        Command::Show => {
            let status = widget_status(&store, &sync).await?;
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        Command::Dump => {
            let entries = dump(&*store, sync.schema()).await?;
            println!("{}", format_dump(&entries));
        }
    }

    Ok(())
}
