//! Terminal front end for Jotter.
//!
//! # Responsibility
//! - Resolve configuration from flags, environment and defaults.
//! - Compose logging, storage and the note session, then hand control to the
//!   interactive shell.

mod render;
mod shell;

use clap::Parser;
use jotter_core::{
    init_logging_from_config, ConfigOverrides, CoreConfig, MemoryKeyValueStore, NotePersistence,
    Session, SqliteKeyValueStore,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "jotter", version, about = "Keep short text notes from the terminal")]
struct Cli {
    /// SQLite file holding the notes.
    #[arg(long, env = "JOTTER_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Absolute directory for rolling log files.
    #[arg(long, env = "JOTTER_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// One of trace|debug|info|warn|error.
    #[arg(long, env = "JOTTER_LOG_LEVEL")]
    log_level: Option<String>,

    /// Keep notes in memory only; nothing is written to disk.
    #[arg(long)]
    in_memory: bool,

    /// Print core health info and exit.
    #[arg(long)]
    ping: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.ping {
        println!("jotter_core ping={}", jotter_core::ping());
        println!("jotter_core version={}", jotter_core::core_version());
        return ExitCode::SUCCESS;
    }

    let config = match CoreConfig::resolve(ConfigOverrides {
        db_path: cli.db_path,
        log_dir: cli.log_dir,
        log_level: cli.log_level,
    }) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("jotter: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging_from_config(&config) {
        eprintln!("jotter: logging disabled: {err}");
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let result = if cli.in_memory {
        run_shell(MemoryKeyValueStore::new(), stdin.lock(), stdout.lock())
    } else {
        if let Err(err) = config.prepare_storage_dir() {
            eprintln!("jotter: {err}");
            return ExitCode::FAILURE;
        }
        match SqliteKeyValueStore::open(&config.db_path) {
            Ok(store) => run_shell(store, stdin.lock(), stdout.lock()),
            Err(err) => {
                eprintln!("jotter: cannot open `{}`: {err}", config.db_path.display());
                return ExitCode::FAILURE;
            }
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("jotter: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_shell<S: jotter_core::KeyValueStore>(
    store: S,
    input: impl BufRead,
    output: impl Write,
) -> io::Result<()> {
    let mut session = Session::open(NotePersistence::new(store));
    shell::run(&mut session, input, output)
}
