//! cartlist CLI
//!
//! Command-line interface for cartlist - shopping lists in the terminal.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::warn;

use cartlist_core::{Config, ListStore};

mod commands;
mod logging;
mod output;
mod prompt;
mod tui;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "cartlist")]
#[command(about = "cartlist - Shopping lists that save themselves")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use this config file instead of the default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI interface
    Tui,
    /// Show all lists
    #[command(alias = "ls")]
    Lists,
    /// Show the items of a list (all lists if none given)
    Show {
        /// List name
        #[arg(short, long)]
        list: Option<String>,
    },
    /// Add an item (starts a new list if no list is given)
    Add {
        /// Item text
        text: String,
        /// List name
        #[arg(short, long)]
        list: Option<String>,
    },
    /// Replace the text of an item
    Edit {
        /// Item number, from 1
        number: usize,
        /// New item text
        text: String,
        /// List name
        #[arg(short, long)]
        list: String,
    },
    /// Mark an item bought or not bought
    Toggle {
        /// Item number, from 1
        number: usize,
        /// List name
        #[arg(short, long)]
        list: String,
    },
    /// Delete an item
    #[command(alias = "rm")]
    Remove {
        /// Item number, from 1
        number: usize,
        /// List name
        #[arg(short, long)]
        list: String,
    },
    /// Create an empty list
    New,
    /// Rename a list
    Rename {
        /// New list name
        new_name: String,
        /// List to rename
        #[arg(short, long)]
        list: String,
    },
    /// Delete a list and its items
    DeleteList {
        /// List name
        #[arg(short, long)]
        list: String,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Share a list (whatsapp, messenger or sms)
    Share {
        /// Share target
        target: String,
        /// List name
        #[arg(short, long)]
        list: String,
        /// Print the message instead of opening the app
        #[arg(long)]
        print: bool,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, share_label, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let config_path = cli.config.as_ref();

    // Commands that don't need the store
    if let Some(Commands::Config { command }) = &cli.command {
        return handle_config_command(command.clone(), config_path, &output);
    }

    let config = Config::load_with_cli_override(config_path)?;

    // Handle TUI (default when no command given)
    let command = cli.command.unwrap_or(Commands::Tui);
    if matches!(command, Commands::Tui) {
        return tui::run(&config).await;
    }

    logging::init_stderr();
    let (mut store, saves) = ListStore::open(&config).await;

    let result = run_command(command, &mut store, &config, &output);

    // Wait for the last snapshot to reach disk
    if !saves.shutdown().await {
        warn!("Save queue was already stopped");
    }
    if saves.failed() > 0 && !output.is_quiet() {
        eprintln!("⚠ Changes could not be saved to {}", config.data_dir.display());
    }

    result
}

fn run_command(
    command: Commands,
    store: &mut ListStore,
    config: &Config,
    output: &Output,
) -> Result<()> {
    match command {
        Commands::Tui | Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Lists => commands::list::lists(store, output),
        Commands::Show { list } => commands::list::show(store, list, output),
        Commands::Add { text, list } => commands::item::add(store, text, list, output),
        Commands::Edit { number, text, list } => {
            commands::item::edit(store, list, number, text, output)
        }
        Commands::Toggle { number, list } => commands::item::toggle(store, list, number, output),
        Commands::Remove { number, list } => commands::item::remove(store, list, number, output),
        Commands::New => commands::list::new(store, output),
        Commands::Rename { new_name, list } => {
            commands::list::rename(store, list, new_name, output)
        }
        Commands::DeleteList { list, yes } => commands::list::delete(store, list, yes, output),
        Commands::Share {
            target,
            list,
            print,
        } => commands::share::share(
            store,
            list,
            target,
            print,
            &config.share_label,
            output,
            |url| open::that(url),
        ),
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_item_commands() {
        let cli = Cli::parse_from(["cartlist", "toggle", "2", "--list", "List 1"]);
        match cli.command {
            Some(Commands::Toggle { number, list }) => {
                assert_eq!(number, 2);
                assert_eq!(list, "List 1");
            }
            _ => panic!("expected toggle"),
        }

        let cli = Cli::parse_from(["cartlist", "--json", "rm", "1", "-l", "Weekend"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::Remove { number: 1, .. })));
    }

    #[test]
    fn test_no_command_means_tui() {
        let cli = Cli::parse_from(["cartlist"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_share_and_config() {
        let cli = Cli::parse_from([
            "cartlist", "share", "sms", "--list", "List 1", "--print", "--config", "/tmp/c.toml",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
        assert!(matches!(
            cli.command,
            Some(Commands::Share { print: true, .. })
        ));

        let cli = Cli::parse_from(["cartlist", "config", "set", "share_label", "Kauppa"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                command: Some(ConfigCommands::Set { .. })
            })
        ));
    }
}
