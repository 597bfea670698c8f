//! MemeMe CLI: compose memes and replay capture sessions from the shell.
//!
//! Usage:
//!   mememe compose <IMAGE>        Caption one image and write a PNG
//!   mememe session <SCRIPT>       Run a scripted series of capture flows
//!   mememe config                 Show the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod collaborators;
mod commands;

#[derive(Parser)]
#[command(
    name = "mememe",
    about = "Caption photos with top and bottom text",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Caption a single image
    Compose {
        /// Source photo (PNG or JPEG)
        image: PathBuf,

        /// Top caption
        #[arg(long, default_value = "TOP")]
        top: String,

        /// Bottom caption
        #[arg(long, default_value = "BOTTOM")]
        bottom: String,

        /// Output PNG path
        #[arg(short, long, default_value = "meme.png")]
        output: PathBuf,

        /// Canvas width (defaults to the configured editor width)
        #[arg(long)]
        width: Option<u32>,

        /// Canvas height (defaults to the configured editor height)
        #[arg(long)]
        height: Option<u32>,
    },

    /// Replay a JSON session script against one meme store
    Session {
        /// Path to the session script
        script: PathBuf,

        /// Directory completed shares are written to (defaults to the
        /// configured export directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Surface width used to lay out the sent-memes grid
        #[arg(long, default_value = "375")]
        grid_width: f64,
    },

    /// Show the effective configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        write: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = mememe_common::config::AppConfig::load();

    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    mememe_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Compose {
            image,
            top,
            bottom,
            output,
            width,
            height,
        } => commands::compose::run(&config, image, top, bottom, output, width, height),
        Commands::Session {
            script,
            output,
            grid_width,
        } => commands::session::run(&config, script, output, grid_width).await,
        Commands::Config { write } => commands::config::run(&config, write),
    }
}
