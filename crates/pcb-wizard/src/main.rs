use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;

mod generate;
mod options;
mod wizard;

/// Settings file read and written when no other path is given
pub const DEFAULT_SETTINGS: &str = "settings.yml";

/// Program written when no other path is given
pub const DEFAULT_OUTPUT: &str = "board.py";

#[derive(Parser)]
#[command(name = "pcb-wizard")]
#[command(about = "Generate SKiDL code for microcontroller boards", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true, hide = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a board from saved settings without prompting
    #[command(alias = "g")]
    Generate(generate::GenerateArgs),

    /// Walk through the board options interactively
    #[command(alias = "w")]
    Wizard(wizard::WizardArgs),

    /// List the labels accepted by each option
    Options(options::OptionsArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Default level depends on --debug, RUST_LOG still wins
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("warn")
    };
    env_logger::Builder::from_env(env).init();

    match cli.command {
        Commands::Generate(args) => generate::execute(args),
        Commands::Wizard(args) => wizard::execute(args),
        Commands::Options(args) => options::execute(args),
    }
}
