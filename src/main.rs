//! Kvbench Charts binary.

use clap::Parser;
use kvbench_charts::Config;
use kvbench_charts::config::DEFAULT_CONFIG;
use kvbench_charts::render::BitmapRenderer;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kvbench-charts")]
#[command(about = "Render comparison charts from key-value store benchmark results")]
struct Args {
    /// Path to configuration file
    config: Option<PathBuf>,

    /// Directory holding the benchmark result files (overrides config)
    #[arg(long)]
    input_dir: Option<PathBuf>,

    /// Directory charts are written to (overrides config)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Print default configuration and exit
    #[arg(long)]
    print_config: bool,
}

fn main() {
    let args = Args::parse();

    if args.print_config {
        print!("{}", DEFAULT_CONFIG);
        return;
    }

    let mut config = match &args.config {
        Some(path) => match Config::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    if let Some(dir) = args.input_dir {
        config.input.dir = dir;
    }
    if let Some(dir) = args.output_dir {
        config.output.dir = dir;
    }

    // Initialize logging
    kvbench_charts::logging::init(&config.logging);

    let renderer = BitmapRenderer::new(config.output.dpi);
    let stdout = std::io::stdout();
    match kvbench_charts::run_all(&config, &renderer, &mut stdout.lock()) {
        Ok(summary) => {
            tracing::debug!(
                written = summary.written.len(),
                failed = summary.failed.len(),
                "run complete"
            );
        }
        Err(e) => {
            // stdout went away (closed pipe); nothing left to report to
            tracing::error!(error = %e, "failed to write status");
        }
    }
}
