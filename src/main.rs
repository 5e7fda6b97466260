use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use livraria::cli::{
    handle_backup_command, handle_book_command, handle_export_command, handle_import_command,
    handle_log_command, BackupCommands, BookCommands, MenuSession,
};
use livraria::config::{paths::LivrariaPaths, paths::DEFAULT_BASE_DIR, settings::Settings};
use livraria::storage::Storage;

#[derive(Parser)]
#[command(
    name = "livraria",
    version,
    about = "Terminal-based book catalog manager",
    long_about = "Livraria keeps a small book catalog in a local SQLite database, \
                  with rolling backups and CSV export/import. Run without a \
                  subcommand for the interactive menu."
)]
struct Cli {
    /// Directory holding the database, backups and exports
    #[arg(long, global = true, default_value = DEFAULT_BASE_DIR)]
    base_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Book management commands
    #[command(subcommand)]
    Book(BookCommands),

    /// Backup management commands
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Export the whole catalog to CSV
    Export {
        /// Output file (bare names go to the exports directory)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Import books from a CSV file
    Import {
        /// CSV file (bare names are looked up in the exports directory)
        file: String,
    },

    /// Show recent activity
    Log {
        /// Number of entries to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config,

    /// Launch the interactive menu
    Menu,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = LivrariaPaths::with_base_dir(cli.base_dir);
    let settings = Settings::load_or_create(&paths)?;
    if !paths.settings_file().exists() {
        settings.save(&paths)?;
    }

    // Initialize storage (creates directories and schema)
    let storage = Storage::new(paths.clone())?;

    let outcome = run_command(cli.command, &paths, &settings, &storage);

    // Committed changes stand even when their audit entry is missing
    for failure in storage.take_audit_failures() {
        eprintln!("Warning: audit log not updated: {}", failure);
    }

    outcome
}

fn run_command(
    command: Option<Commands>,
    paths: &LivrariaPaths,
    settings: &Settings,
    storage: &Storage,
) -> Result<()> {
    match command {
        Some(Commands::Book(cmd)) => {
            handle_book_command(storage, settings, cmd)?;
        }
        Some(Commands::Backup(cmd)) => {
            handle_backup_command(storage, settings, cmd)?;
        }
        Some(Commands::Export { output }) => {
            handle_export_command(storage, settings, output)?;
        }
        Some(Commands::Import { file }) => {
            handle_import_command(storage, file)?;
        }
        Some(Commands::Log { limit }) => {
            handle_log_command(storage, limit)?;
        }
        Some(Commands::Config) => {
            println!("Livraria Configuration");
            println!("======================");
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Database:         {}", paths.database_file().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!("Export directory: {}", paths.exports_dir().display());
            println!("Audit log:        {}", paths.audit_log().display());
            println!();
            println!("Settings:");
            println!("  Backups kept:    {}", settings.backup_retention.keep);
            println!("  Currency symbol: {}", settings.currency_symbol);
            println!("  Export file:     {}", settings.export_filename);
        }
        Some(Commands::Menu) | None => run_menu(storage, settings)?,
    }

    Ok(())
}

fn run_menu(storage: &Storage, settings: &Settings) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    MenuSession::new(storage, settings, stdin.lock(), stdout.lock()).run()?;
    Ok(())
}
