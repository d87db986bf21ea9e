use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tminus", version, about = "Countdowns to the dates that matter")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Countdown management
    Event {
        #[command(subcommand)]
        action: commands::event::EventAction,
    },
    /// Live countdown for one event
    Watch {
        /// Event ID
        id: String,
    },
    /// Calendar export
    Export {
        #[command(subcommand)]
        action: commands::export::ExportAction,
    },
    /// Category management
    Category {
        #[command(subcommand)]
        action: commands::category::CategoryAction,
    },
    /// Read event details from an image
    Scan {
        /// Image file (png, jpeg, gif, webp)
        #[arg(required_unless_present = "event")]
        image: Option<std::path::PathBuf>,
        /// Use the background image stored on this event instead
        #[arg(long, conflicts_with = "image")]
        event: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List selectable timezones
    Timezones {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("TMINUS_LOG")
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Event { action } => commands::event::run(action).await,
        Commands::Watch { id } => commands::watch::run(&id).await,
        Commands::Export { action } => commands::export::run(action),
        Commands::Category { action } => commands::category::run(action),
        Commands::Scan { image, event, json } => {
            let source = match (image, event) {
                (Some(path), _) => commands::scan::Source::File(path),
                (None, Some(id)) => commands::scan::Source::Event(id),
                (None, None) => unreachable!("clap requires an image or --event"),
            };
            commands::scan::run(source, json).await
        }
        Commands::Timezones { json } => commands::timezones::run(json),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
