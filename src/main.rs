//! # slackpack CLI
//!
//! Command-line interface for slackpack library.

use std::io::{self, Write};
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use log::LevelFilter;

use slackpack::SlackpackError;
use slackpack::cli::Args;
use slackpack::export::run_export;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logger(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn run(args: &Args) -> Result<(), SlackpackError> {
    let start = Instant::now();
    let options = args.export_options();

    let summary = if args.quiet {
        run_export(&options, &mut io::sink())?
    } else {
        let mut stdout = io::stdout().lock();
        let summary = run_export(&options, &mut stdout)?;
        stdout.flush()?;
        summary
    };

    log::debug!(
        "wrote {}: {} files, {} messages, {} replies folded, {} unresolved ({:.2}s)",
        options.output.display(),
        summary.files,
        summary.messages,
        summary.replies_folded,
        summary.unresolved_replies,
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
