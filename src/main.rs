/*!
 * Command-line interface for unificar
 */

use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use unificar::aggregator::Aggregator;
use unificar::config::{Args, Config};
use unificar::report::{ReportFormat, Reporter};
use unificar::utils::count_files;

fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "unificar", &mut io::stdout());
        return Ok(());
    }

    // RUST_LOG wins over the verbosity flag
    let default_filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    let config = Config::from_args(&args);
    config.validate()?;

    let progress = if args.quiet {
        ProgressBar::hidden()
    } else {
        let progress = ProgressBar::new(count_files(&config.target_dir, &config.exclusions));
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%) ⏱️  Elapsed: {elapsed_precise}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        progress.enable_steady_tick(Duration::from_millis(100));
        progress.set_prefix("📊 Reading");
        progress
    };

    let aggregator = Aggregator::new(config, Arc::new(progress.clone()));
    let result = aggregator.run();
    progress.finish_and_clear();
    let report = result?;

    if !args.quiet {
        Reporter::new(ReportFormat::ConsoleTable).print_report(&report);
    }

    Ok(())
}
