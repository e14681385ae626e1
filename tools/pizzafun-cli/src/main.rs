//! PizzaFun CLI: render, simulate and check the landing page.
//!
//! Usage:
//!   pizzafun render [OPTIONS]      Render the page to HTML
//!   pizzafun simulate [OPTIONS]    Headless deterministic run
//!   pizzafun preview [OPTIONS]     Real-time run on the system clock
//!   pizzafun check                 Validate page content
//!   pizzafun info                  Show a content summary
//!   pizzafun init-config           Write the default config file

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "pizzafun",
    about = "Animated landing page for the PizzaFun trading protocol",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (defaults to the standard location)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Page content JSON (defaults to the built-in PizzaFun page)
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the page to a static HTML (or frame JSON) file
    Render {
        /// Output file; a .json extension writes the captured frame
        #[arg(short, long, default_value = "dist/index.html")]
        output: PathBuf,

        /// Capture the page this many seconds after mount (default: once idle)
        #[arg(long)]
        at: Option<f64>,

        /// Viewport width
        #[arg(long)]
        width: Option<f64>,

        /// Viewport height
        #[arg(long)]
        height: Option<f64>,

        /// Seed for particles and glitches
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run the page headless on a manual clock
    Simulate {
        /// Seconds to simulate (default: until idle)
        #[arg(long)]
        secs: Option<f64>,

        /// Frames per second
        #[arg(long)]
        fps: Option<u32>,

        /// Pointer recording (JSON lines); default parks the pointer at the center
        #[arg(long)]
        events: Option<PathBuf>,

        /// Seed for particles and glitches
        #[arg(long)]
        seed: Option<u64>,

        /// Glitch probability per counter frame
        #[arg(long)]
        glitch: Option<f64>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the page in real time
    Preview {
        /// Stop after this many seconds even if still animating
        #[arg(long, default_value = "10.0")]
        secs: f64,

        /// Frames per second
        #[arg(long)]
        fps: Option<u32>,
    },

    /// Validate page content
    Check,

    /// Show a content summary
    Info,

    /// Write the default configuration file
    InitConfig {
        /// Destination (defaults to the standard config location)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let ctx = commands::Context::new(cli.config, cli.content);

    // Initialize logging from the config's logging section; `--verbose`
    // raises the workspace crates to debug on top of it.
    pizzafun_common::logging::init_logging(&ctx.logging(), cli.verbose);

    match cli.command {
        Commands::Render {
            output,
            at,
            width,
            height,
            seed,
        } => commands::render::run(&ctx, output, at, width, height, seed),
        Commands::Simulate {
            secs,
            fps,
            events,
            seed,
            glitch,
            json,
        } => commands::simulate::run(&ctx, secs, fps, events, seed, glitch, json),
        Commands::Preview { secs, fps } => commands::preview::run(&ctx, secs, fps).await,
        Commands::Check => commands::check::run(&ctx),
        Commands::Info => commands::info::run(&ctx),
        Commands::InitConfig { output, force } => commands::init::run(output, force),
    }
}
