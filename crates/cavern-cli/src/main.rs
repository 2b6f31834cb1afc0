//! CLI frontend for Cavern, a choice-driven cave adventure.

mod commands;
mod terminal;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cavern",
    about = "Cavern — a choice-driven adventure in search of the lost ark",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the story in the terminal
    Play {
        /// Story file to play instead of the built-in story
        #[arg(short, long)]
        story: Option<PathBuf>,

        /// Directory holding the inventory record
        #[arg(long, default_value = ".cavern")]
        save_dir: PathBuf,

        /// Name of the inventory record
        #[arg(short, long, default_value = "inventory")]
        profile: String,

        /// Skip the typing effect and pacing pauses
        #[arg(short, long)]
        fast: bool,

        /// Wipe the inventory before starting
        #[arg(short, long)]
        restart: bool,
    },

    /// Validate a story file
    Check {
        /// Story file (default: the built-in story)
        #[arg(short, long)]
        story: Option<PathBuf>,
    },

    /// List scenes with their gates and transitions
    Scenes {
        /// Story file (default: the built-in story)
        #[arg(short, long)]
        story: Option<PathBuf>,
    },

    /// Export the built-in story
    Export {
        /// Output format: json, markdown
        #[arg(default_value = "json")]
        format: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run the story headlessly, following a list of choice indices
    Walk {
        /// Zero-based choice indices, in order
        choices: Vec<usize>,

        /// Story file (default: the built-in story)
        #[arg(short, long)]
        story: Option<PathBuf>,

        /// Start with this item in the inventory (repeatable)
        #[arg(short, long = "item")]
        items: Vec<String>,

        /// Answer "no" to every confirmation
        #[arg(long)]
        decline_all: bool,

        /// Print the transcript as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect or wipe the saved inventory
    Inventory {
        #[command(subcommand)]
        action: InventoryAction,

        /// Directory holding the inventory record
        #[arg(long, default_value = ".cavern", global = true)]
        save_dir: PathBuf,

        /// Name of the inventory record
        #[arg(short, long, default_value = "inventory", global = true)]
        profile: String,
    },
}

#[derive(Subcommand)]
enum InventoryAction {
    /// Print the saved items
    Show,
    /// Delete the saved inventory
    Clear,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            story,
            save_dir,
            profile,
            fast,
            restart,
        } => commands::play::run(story.as_deref(), &save_dir, &profile, fast, restart),
        Commands::Check { story } => commands::check::run(story.as_deref()),
        Commands::Scenes { story } => commands::scenes::run(story.as_deref()),
        Commands::Export { format, output } => commands::export::run(&format, output.as_deref()),
        Commands::Walk {
            choices,
            story,
            items,
            decline_all,
            json,
        } => commands::walk::run(story.as_deref(), &choices, &items, decline_all, json),
        Commands::Inventory {
            action,
            save_dir,
            profile,
        } => match action {
            InventoryAction::Show => commands::inventory::show(&save_dir, &profile),
            InventoryAction::Clear => commands::inventory::clear(&save_dir, &profile),
        },
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
