mod app;
mod config;
mod motion;
mod picker;
mod roster;
mod session;
mod surface;
mod theme;
mod ticks;
mod util;
mod views;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use env_logger::Env;

use crate::config::Config;

/// Random roll-call widget: picks a name from a spreadsheet and shows it in a
/// small always-on-top overlay that tucks itself away when left alone.
#[derive(Parser, Debug)]
#[command(name = "roll-call", version = env!("ROLL_CALL_VERSION"))]
struct Args {
    /// Spreadsheet (xlsx, xls, ods) or text file with one name per row.
    /// Defaults to `names_path` from the config file.
    path: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init_from_env(Env::default().default_filter_or("info"));
    let args = Args::parse();

    if let Err(e) = start(args) {
        log::error!("{e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn start(args: Args) -> anyhow::Result<()> {
    let config = Config::load();
    let path = args.path.unwrap_or_else(|| config.names_path.clone());

    // Nothing is shown unless the roster loads.
    let names = roster::load(&path, &config.selector())
        .with_context(|| format!("cannot start without a name list ({})", path.display()))?;

    app::run(names, config).map_err(|e| anyhow::anyhow!("layer shell error: {e:?}"))
}
