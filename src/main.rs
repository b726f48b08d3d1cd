use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use release_gate::config;
use release_gate::gate::{run_release, ReleaseOptions};
use release_gate::tools::{CargoCli, GhCli, GitCli};
use release_gate::ui;
use release_gate::ReleaseError;

#[derive(clap::Parser)]
#[command(
    name = "release-gate",
    version,
    about = "Build and publish a GitHub release when a merge lands on the release branch"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(
        short = 'C',
        long,
        help = "Run git, gh and cargo from this directory instead of the current one"
    )]
    directory: Option<PathBuf>,

    #[arg(long, help = "Run every check without building or publishing")]
    dry_run: bool,

    #[arg(short, long, help = "Log every external command")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let workdir = args.directory.unwrap_or_else(|| PathBuf::from("."));
    if !workdir.is_dir() {
        ui::display_failure(&ReleaseError::WorkingDirectory(workdir));
        std::process::exit(1);
    }

    let config = match config::load_config(args.config.as_deref(), &workdir) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_failure(&e);
            std::process::exit(1);
        }
    };

    let git = GitCli::new(config.tools.git.clone(), workdir.clone());
    let gh = GhCli::new(config.tools.gh.clone(), workdir.clone());
    let cargo = CargoCli::new(config.tools.cargo.clone(), workdir);
    let options = ReleaseOptions {
        dry_run: args.dry_run,
    };

    match run_release(&config, &git, &gh, &cargo, &options) {
        Ok(outcome) => {
            ui::display_outcome(&outcome);
            Ok(())
        }
        Err(e) => {
            ui::display_failure(&e);
            std::process::exit(1);
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
