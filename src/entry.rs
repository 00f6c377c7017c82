use std::ffi::OsString;

use clap::{CommandFactory, FromArgMatches};

use crate::args::BenchArgs;
use crate::config::{RunSettings, load_config};
use crate::error::AppResult;

/// Entry point of the `acdc-bench` binary.
///
/// # Errors
///
/// Returns an error when arguments, config or the run itself fail.
pub fn run() -> AppResult<()> {
    let Some(args) = parse_args()? else {
        return Ok(());
    };

    crate::logger::init_logging(args.verbose, args.no_color);

    let config = load_config(args.config.as_deref())?;
    let settings = RunSettings::resolve(&args, config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let elapsed = runtime.block_on(crate::app::run_benchmark(&settings))?;
    println!("{}", elapsed);
    Ok(())
}

fn parse_args() -> AppResult<Option<BenchArgs>> {
    let mut cmd = BenchArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = BenchArgs::from_arg_matches(&matches)?;

    Ok(Some(args))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--")
}
