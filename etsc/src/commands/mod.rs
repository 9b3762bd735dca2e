use std::path::PathBuf;

use clap::Parser;
use etsc_config::DEFAULT_USER_CONFIG_NAME;
use eyre::{Context, Result};
use tracing::Level;

use crate::{
    ops::{self, BuildOptions},
    reports::{BuildReport, Report, TerminalOutput},
};

/// Extension trait for exiting on configuration errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for etsc_config::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "etsc")]
#[command(version)]
#[command(about = "Build a TypeScript project with esbuild, honoring tsconfig.json")]
pub(crate) struct Cli {
    /// Path to the user config, relative to the working directory
    #[arg(short, long, default_value = DEFAULT_USER_CONFIG_NAME)]
    pub config: PathBuf,

    /// Remove the output directory before building
    #[arg(long)]
    pub clean: bool,

    /// Path to the esbuild executable (defaults to node_modules/.bin/esbuild)
    #[arg(long, env = "ETSC_ESBUILD")]
    pub esbuild: Option<PathBuf>,

    /// Print debug output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        init_logging(self.verbose);

        let cwd = std::env::current_dir().wrap_err("Failed to read the working directory")?;
        let config = ops::prepare(
            &cwd,
            BuildOptions {
                user_config: &self.config,
                clean: self.clean,
                esbuild: self.esbuild.as_deref(),
            },
        )
        .unwrap_or_exit();

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .wrap_err("Failed to start the async runtime")?;
        let timed = runtime.block_on(ops::build(&config));

        match timed.value.into_result() {
            Ok(summary) => {
                let report = BuildReport::new(&config, summary, timed.elapsed);
                report.render(&mut TerminalOutput::new());
                Ok(())
            }
            Err(failed) => {
                eprintln!("{:?}", miette::Report::new(failed));
                std::process::exit(1);
            }
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
