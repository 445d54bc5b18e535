//! axis CLI: inspect and initialize the dashboard state directory.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};

use axis_api::hub::Hub;
use axis_api::paths::AxisPaths;
use axis_api::store::Slot;

#[derive(Parser)]
#[command(name = "axis", version, about = "Personal dashboard state tool")]
struct Cli {
    /// Data directory (overrides AXIS_DATA_DIR / /data / ./data resolution).
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the data directory and write first-run defaults.
    Init,

    /// Print the resolved data directory and slot files.
    Paths,

    /// Summarize every slot.
    Info,

    /// Print one normalized document as JSON (by slot identifier, e.g.
    /// today_state or journal).
    Show { slot: String },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let paths = match cli.data_dir {
        Some(dir) => AxisPaths::at(dir),
        None => AxisPaths::resolve(),
    };

    match cli.command {
        Commands::Init => {
            let hub = Hub::open(paths)?;
            println!("initialized {}", hub.paths().data_dir.display());
        }
        Commands::Paths => {
            println!("{}", paths.data_dir.display());
            for slot in Slot::ALL {
                println!("  {slot} -> {}", paths.slot_file(slot).display());
            }
        }
        Commands::Info => {
            let hub = Hub::open(paths)?;
            let today = hub.today();
            let week = hub.week();
            let projects = hub.projects();
            println!("date:            {}", today.date);
            println!("week:            {} ({})", week.week_id, week.mode);
            println!(
                "projects:        {} ({} active)",
                projects.projects.len(),
                projects.active_count()
            );
            println!("resources:       {} sections", hub.resources().sections.len());
            println!("commitments:     {}", hub.reality().commitments.len());
            println!("journal entries: {}", hub.journal_len());
        }
        Commands::Show { slot } => {
            let Some(slot) = Slot::parse(&slot) else {
                miette::bail!(
                    "unknown slot \"{slot}\"; expected one of: today_state, week_state, \
                     projects, resources, reality, journal"
                );
            };
            let hub = Hub::open(paths)?;
            let doc = match slot {
                Slot::Today => serde_json::to_value(hub.today()),
                Slot::Week => serde_json::to_value(hub.week()),
                Slot::Projects => serde_json::to_value(hub.projects()),
                Slot::Resources => serde_json::to_value(hub.resources()),
                Slot::Reality => serde_json::to_value(hub.reality()),
                Slot::Journal => serde_json::to_value(hub.journal()),
            }
            .into_diagnostic()?;
            println!("{}", serde_json::to_string_pretty(&doc).into_diagnostic()?);
        }
    }

    Ok(())
}
