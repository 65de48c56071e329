//! Chartgen CLI - inflate Helm charts into Kubernetes manifests

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod error;
mod exit_codes;
mod logging;

#[derive(Parser)]
#[command(name = "chartgen")]
#[command(version)]
#[command(about = "Inflate Helm charts into Kubernetes manifests", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and render a chart, writing the manifests as YAML
    Generate {
        /// Generator config file (`-` for stdin)
        config: PathBuf,

        /// Write manifests to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Kill any helm invocation running longer than this many seconds
        #[arg(long, env = "CHARTGEN_TIMEOUT")]
        timeout: Option<u64>,

        /// Print a list of rendered resources instead of YAML
        #[arg(long)]
        summary: bool,
    },

    /// Check that a helm binary is a supported version
    CheckVersion {
        /// Helm binary name or path
        #[arg(long, default_value = "helm")]
        helm_bin: String,
    },
}

fn main() {
    logging::setup_error_reports();

    let cli = Cli::parse();
    logging::setup_logging(cli.debug);

    let result = match cli.command {
        Commands::Generate {
            config,
            output,
            timeout,
            summary,
        } => commands::generate::run(&config, output.as_deref(), timeout, summary),

        Commands::CheckVersion { helm_bin } => commands::check_version::run(&helm_bin),
    };

    if let Err(err) = result {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
