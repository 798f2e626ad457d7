//! rtags CLI - query a running rdm from the terminal.
//!
//! Usage:
//!   rtags follow <file:row:col>          # Jump target of the symbol
//!   rtags references <file:row:col>      # All references, grouped by file
//!   rtags virtuals <file:row:col>        # Overrides of a virtual method
//!   rtags load-compile-commands          # Load compile_commands.json

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use rtags::{
    find_references, find_virtual_overrides, follow_location, init_logging,
    load_compile_commands, parse_location, Config, CursorLocation, Host, Location, LogConfig,
    NavigationAction, Navigator, RcClient, ReferenceListing,
};

const DEFAULT_CONFIG_FILE: &str = ".rtags.toml";

#[derive(Parser)]
#[command(name = "rtags")]
#[command(about = "rtags - C/C++ navigation through a running rdm", long_about = None)]
struct Cli {
    /// Configuration file (default: ./.rtags.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project root folder; repeat for several (default: current directory)
    #[arg(short, long = "folder")]
    folders: Vec<PathBuf>,

    /// File the request originates from, passed to rc as --current-file
    #[arg(long)]
    current_file: Option<PathBuf>,

    /// Log filter, overriding the configured level (e.g. "debug")
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Jump to the definition of the symbol at a location
    Follow {
        /// Cursor location as file:row:col (1-based)
        #[arg(value_parser = parse_cli_location)]
        location: Location,
    },

    /// List all references to the symbol at a location
    References {
        /// Cursor location as file:row:col (1-based)
        #[arg(value_parser = parse_cli_location)]
        location: Location,

        /// Skip the per-occurrence symbol-info lookups
        #[arg(long)]
        no_highlight: bool,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// List overrides of the virtual method at a location
    Virtuals {
        /// Cursor location as file:row:col (1-based)
        #[arg(value_parser = parse_cli_location)]
        location: Location,

        /// Print the listing as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load the project's compile_commands.json into rdm
    LoadCompileCommands,
}

/// Terminal stand-in for an editor: messages go to stdout/stderr.
struct TerminalHost {
    folders: Vec<PathBuf>,
    json: bool,
}

impl Host for TerminalHost {
    fn status_message(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn error_message(&self, message: &str) {
        eprintln!("\n{}\n", message);
    }

    fn project_folders(&self) -> Vec<PathBuf> {
        self.folders.clone()
    }

    fn show_references(&self, listing: &ReferenceListing) {
        if self.json {
            match serde_json::to_string_pretty(listing) {
                Ok(json) => println!("{}", json),
                Err(e) => eprintln!("Error: {}", e),
            }
        } else {
            print!("{}", listing.text);
        }
    }

    fn navigate(&self, action: &NavigationAction) {
        match action {
            NavigationAction::SameView { row, col } => println!("same file, {}:{}", row, col),
            NavigationAction::OpenFile { .. } => {
                if let Some(position) = action.encoded_position() {
                    println!("{}", position);
                }
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    // Default level until the config file has been read.
    let log = init_logging(&LogConfig::default())?;

    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_FILE))?,
    };
    if let Some(level) = cli.log_level {
        config.log.level = level;
    }
    log.reload(&config.log)?;

    let folders = if cli.folders.is_empty() {
        vec![std::env::current_dir()?]
    } else {
        cli.folders
    };

    let mut client = RcClient::from_config(&config);
    if let Some(file) = &cli.current_file {
        client = client.with_current_file(absolute(file)?);
    }

    let json = matches!(
        cli.command,
        Commands::References { json: true, .. } | Commands::Virtuals { json: true, .. }
    );
    let host = TerminalHost { folders, json };

    let done = match cli.command {
        Commands::Follow { location } => {
            let cursor = CursorLocation::from(location.with_file(absolute(location.file())?));
            let mut navigator = Navigator::new(host.folders.clone());
            follow_location(&client, &mut navigator, &host, Some(&cursor)).is_some()
        }

        Commands::References {
            location,
            no_highlight,
            ..
        } => {
            let location = location.with_file(absolute(location.file())?);
            let highlight = config.highlight_references && !no_highlight;
            find_references(&client, &host, Some(&location), highlight).is_some()
        }

        Commands::Virtuals { location, .. } => {
            let location = location.with_file(absolute(location.file())?);
            find_virtual_overrides(&client, &host, Some(&location)).is_some()
        }

        Commands::LoadCompileCommands => load_compile_commands(&client, &host).is_some(),
    };

    Ok(done)
}

fn parse_cli_location(arg: &str) -> std::result::Result<Location, String> {
    match parse_location(&format!("{}:", arg)) {
        Ok(Some(location)) => Ok(location),
        Ok(None) => Err("location must not be empty".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// Relative paths are taken from the working directory. Symlinks are kept,
/// since rdm resolves them itself and the navigator maps them back.
fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
