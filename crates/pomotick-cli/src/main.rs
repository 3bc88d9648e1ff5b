use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

mod commands;
mod notifiers;
mod render;

#[derive(Parser)]
#[command(name = "pomotick", version, about = "Pomodoro timer for the terminal")]
#[command(after_help = "Set POMOTICK_LOG (e.g. POMOTICK_LOG=debug) to see engine logs on stderr.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the timer interactively
    Run(commands::run::RunArgs),
    /// List session types and their fixed durations
    Sessions,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("POMOTICK_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Sessions => commands::sessions::run(),
        Commands::Config { action } => commands::config::run(action).map_err(Into::into),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "pomotick", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
