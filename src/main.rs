use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use playlist_store::validation::inspect_save_file;
use playlist_store::{PlaylistStore, StoreConfig};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "playlist-store")]
#[command(about = "Manage a playlist save file", long_about = None)]
struct Args {
    /// Path to the playlist save file
    #[arg(short = 'f', long, default_value = "~/.local/share/playlist-store/playlist.bin")]
    file: String,

    /// Maximum number of entries (0 or less = unbounded)
    #[arg(short = 'm', long, default_value = "-1", allow_negative_numbers = true)]
    max_size: i64,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every entry
    List,

    /// Add files (or directories of files) at the top of the playlist
    Add {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Remove every entry with this url
    Remove { url: String },

    /// Remove all entries
    Clear,

    /// Activate an entry as if it was double-clicked
    Play { row: usize },

    /// Clear the playlist and delete its save file
    Delete,

    /// Inspect the save file without loading it
    Check,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Expand ~ in paths
    let save_file = PathBuf::from(shellexpand::tilde(&args.file).as_ref());

    match args.command {
        Command::Check => {
            let summary = inspect_save_file(&save_file)?;
            if summary.is_clean() {
                log::info!("✅ Save file is clean");
            } else {
                log::warn!("Save file has problems");
            }
        }
        Command::List => {
            let store = open_store(&save_file, args.max_size)?;
            for (row, entry) in store.iter().enumerate() {
                println!("{:>4}  {}  ({})", row, entry.title, entry.url);
            }
            log::info!("{} entries", store.len());
        }
        Command::Add { paths } => {
            let mut store = open_store(&save_file, args.max_size)?;
            let added = store.add_files(&paths);
            log::info!("Added {} of {} selected paths", added, paths.len());
            save_store(&store, &save_file)?;
        }
        Command::Remove { url } => {
            let mut store = open_store(&save_file, args.max_size)?;
            let removed = store.remove_by_url(&url);
            log::info!("Removed {} entries", removed);
            save_store(&store, &save_file)?;
        }
        Command::Clear => {
            let mut store = open_store(&save_file, args.max_size)?;
            store.clear();
            save_store(&store, &save_file)?;
        }
        Command::Play { row } => {
            // Activation saves on its own
            let mut store = open_store(&save_file, args.max_size)?;
            match store.activate(row) {
                Some(url) => println!("{}", url),
                None => anyhow::bail!("No entry at row {} (playlist has {})", row, store.len()),
            }
        }
        Command::Delete => {
            let mut store = open_store(&save_file, args.max_size)?;
            store.clear_and_delete();
        }
    }

    Ok(())
}

/// Load the store from its save file; saving is left to the caller
fn open_store(save_file: &Path, max_size: i64) -> Result<PlaylistStore> {
    let config = StoreConfig::new()
        .with_save_file(save_file)
        .with_max_size(max_size)
        .with_save_on_drop(false);

    let mut store = PlaylistStore::with_config(config);
    store
        .try_load()
        .with_context(|| format!("Failed to load playlist from {:?}", save_file))?;
    Ok(store)
}

fn save_store(store: &PlaylistStore, save_file: &Path) -> Result<()> {
    store
        .try_save()
        .with_context(|| format!("Failed to save playlist to {:?}", save_file))?;
    log::info!("Saved {} entries to {:?}", store.len(), save_file);
    Ok(())
}
