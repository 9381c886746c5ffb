// src/main.rs
use anyhow::Result;
use clap::Parser;
use fieldnotes::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
    fieldnotes::run(args)
}
