use clap::Parser;
use color_eyre::Result;
use atomik::{Config, Profile, StateStore, cli::{Cli, Commands}};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    // Logging is opt-in via RUST_LOG; the TUI stays silent otherwise
    env_logger::init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // Load configuration with the determined profile
    let config = Config::load_with_profile(profile)?;

    // Open the state store (one JSON blob holding the whole AppState)
    let store = StateStore::open(config.get_state_path())?;

    // Dispatch to appropriate command handler
    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = atomik::tui::App::new(config, store);
            atomik::tui::run_event_loop(app)?;
        }
        Commands::AddTask { name, urgency, tomorrow } => {
            atomik::cli::handle_add_task(name, urgency, tomorrow, &store)?;
        }
        Commands::AddHabit { name, points } => {
            atomik::cli::handle_add_habit(name, points, &store)?;
        }
        Commands::Plan { tasks } => {
            atomik::cli::handle_plan(tasks, &store, &config.scoring)?;
        }
        Commands::Stats => {
            atomik::cli::handle_stats(&store)?;
        }
    }

    Ok(())
}
