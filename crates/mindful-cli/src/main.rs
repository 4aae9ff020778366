use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "mindful", version, about = "Mindful site widgets CLI")]
struct Cli {
    /// Config file (defaults to ~/.config/mindful/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show which widgets a site page mounts
    Page(commands::page::PageArgs),
    /// Talk to the chatbot demo or the coach
    Chat(commands::chat::ChatArgs),
    /// Submit mood check-ins
    Mood(commands::mood::MoodArgs),
    /// Run the meditation timer
    Timer(commands::timer::TimerArgs),
    /// Submit the contact form
    Contact(commands::contact::ContactArgs),
    /// Configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match commands::load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    commands::init_tracing(&config.logging.filter);

    let result = match cli.command {
        Commands::Page(args) => commands::page::run(args, &config),
        Commands::Chat(args) => commands::chat::run(args, &config),
        Commands::Mood(args) => commands::mood::run(args, &config),
        Commands::Timer(args) => commands::timer::run(args, &config),
        Commands::Contact(args) => commands::contact::run(args, &config),
        Commands::Config { action } => {
            commands::config::run(action, &config, cli.config.as_deref())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
