use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use connect_four::config::AppConfig;
use connect_four::game::Game;
use connect_four::logging;
use connect_four::ui::App;

/// Play two-player Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect-four", about = "Two-player Connect Four in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override the drop animation length in milliseconds
    #[arg(long)]
    drop_delay_ms: Option<u64>,

    /// Override the log file location
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    let config_found = cli.config.exists();
    let mut config = AppConfig::read_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Overrides go in before validation so they can replace bad file values
    config.apply_overrides(cli.drop_delay_ms, cli.log_file);
    config.validate().context("validating configuration")?;

    logging::init(&config.logging).context("initializing logging")?;
    if !config_found {
        warn!(path = %cli.config.display(), "config file not found, using defaults");
    }
    info!(drop_delay_ms = config.game.drop_delay_ms, "starting");

    let mut app = App::new(Game::from_config(&config.game), config.ui);
    run(&mut app).context("running terminal UI")
}

fn run(app: &mut App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
