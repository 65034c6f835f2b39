//! Interactive note-taking shell.
//!
//! # Responsibility
//! - Resolve startup configuration and bring up logging.
//! - Run the menu loop over stdin/stdout against the JSON note store.
//! - Turn fatal store failures into a non-zero exit.

mod config;
mod shell;

use config::AppConfig;
use log::error;
use notekeep_core::{flush_logging, init_logging, JsonNoteRepository, NoteService};
use shell::{Shell, ShellResult};
use std::io;

fn main() {
    let result = run();
    if let Err(err) = &result {
        error!("event=session_end module=cli status=error error={err}");
    }
    // `exit` skips destructors; buffered records must hit disk first.
    flush_logging();

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> ShellResult<()> {
    let config = AppConfig::resolve();
    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        // Sessions still work without a log sink.
        eprintln!("warning: logging disabled: {err}");
    }

    let service = NoteService::new(JsonNoteRepository::new(config.store));
    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(service, stdin.lock(), stdout.lock()).run()
}
