use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::debug;

use march::config_file::{Config, ConfigError, config_home};
use march::confirm::TerminalPrompter;
use march::executor::ShellExecutor;
use march::theme::Palette;
use march::{LaunchOptions, init_config, launch};

// Only long options exist so `-uo` style bundles and `-h` reach the selector parser.
#[derive(Parser, Debug)]
#[command(
    name = "march",
    about = "Run named shell commands from a config file",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// `-<shorts>` bundle, `<name>[,<name>...]` list, or `help`
    #[arg(allow_hyphen_values = true, value_name = "ARGS")]
    selectors: Option<String>,

    /// Anything after the first argument is ignored
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    ignored: Vec<String>,

    /// Path to config file (defaults to $XDG_CONFIG_HOME/march/config.yml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file path (records are also written to stderr)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Run the selected commands without asking for confirmation
    #[arg(long)]
    yes: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .as_ref()
        .map(std::fs::File::create)
        .transpose()?;
    march::logger::init(log_file)?;
    march::interrupt::install()?;
    if !cli.ignored.is_empty() {
        debug!("Ignoring extra arguments: {:?}", cli.ignored);
    }

    let config_path = resolve_config_path(cli.config)?;
    let config = Config::from_file(&config_path)?;

    let options = LaunchOptions {
        assume_yes: cli.yes,
        palette: Palette::new(std::io::stdout().is_terminal()),
    };
    let outcome = launch(
        cli.selectors.as_deref(),
        &config,
        &config_path,
        options,
        &mut TerminalPrompter,
        &mut ShellExecutor,
        &mut std::io::stdout().lock(),
    )?;
    debug!("Finished: {outcome:?}");

    Ok(ExitCode::SUCCESS)
}

/// Use an explicit `--config` as is, otherwise run first-time setup in the config home.
fn resolve_config_path(explicit: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ConfigError::ConfigNotFound(path));
        }
        return Ok(path);
    }
    let home = config_home(std::env::var_os("XDG_CONFIG_HOME"), dirs::home_dir())?;
    init_config::ensure_config(&home)
}
