//! dirdigest CLI Binary
//!
//! Prints a Merkle digest tree for a directory.

use clap::Parser;
use dirdigest::cli::{banner, map_error, Cli, RunContext};
use dirdigest::logging::init_logging;
use std::io::Write;
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Logging settings come from the merged configuration
    let context = match RunContext::new(&cli) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    };

    if let Err(e) = init_logging(Some(&context.config().logging)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("{}", banner());

    match context.execute() {
        Ok(output) => {
            let mut stdout = std::io::stdout().lock();
            if let Err(e) = stdout.write_all(output.as_bytes()).and_then(|_| stdout.flush()) {
                if e.kind() != std::io::ErrorKind::BrokenPipe {
                    eprintln!("error: writing output: {}", e);
                    process::exit(1);
                }
            }
        }
        Err(e) => {
            error!(error = %e, "Digest failed");
            eprintln!("{}", map_error(&e));
            process::exit(1);
        }
    }
}
