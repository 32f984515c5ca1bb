use std::io;

use clap::Parser;
use pwvault::cli::{commands, output, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let result = match cli.command {
        Commands::List { show } => commands::list::execute(&cli, show),
        Commands::Add {
            ref username,
            ref password,
            generate,
            ref note,
        } => commands::add::execute(&cli, username, password.as_deref(), generate, note),
        Commands::Remove {
            ref username,
            ref password,
            ref note,
            force,
        } => commands::remove::execute(&cli, username, password, note, force),
        Commands::SaveAs { ref target } => commands::save_as::execute(&cli, target),
        Commands::Generate {
            length,
            ref words,
            count,
        } => commands::generate::execute(length, words.as_deref(), count),
        Commands::Algorithms => commands::algorithms::execute(),
        Commands::Completions { ref shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        if e.is_decrypt_failure() {
            output::tip("Check the passphrase; the vault file was not modified.");
        }
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the `-v` count.
fn setup_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(io::stderr)
        .init();
}
