//! Tidemark CLI - ordered, versioned migration runner

use clap::Parser;
use env_logger::{Builder, Env};
use tm_core::Direction;

mod cli;
mod commands;

use cli::{Cli, Commands, GlobalArgs};
use commands::common::ExitCode;
use commands::{generate, init, ls, migrate, state};

fn init_logging(global: &GlobalArgs) {
    let default_level = if global.verbose { "debug" } else { "warn" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));
    if global.timestamps {
        builder.format_timestamp_micros();
    } else {
        builder.format_timestamp(None);
    }
    builder.init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli.global);

    let result = match &cli.command {
        Commands::Init => init::execute(&cli.global).await,
        Commands::Generate(args) => generate::execute(args, &cli.global).await,
        Commands::Up(args) => migrate::execute(Direction::Up, args, &cli.global).await,
        Commands::Down(args) => migrate::execute(Direction::Down, args, &cli.global).await,
        Commands::State => state::execute(&cli.global).await,
        Commands::Ls(args) => ls::execute(args, &cli.global).await,
    };

    if let Err(err) = result {
        if let Some(ExitCode(code)) = err.downcast_ref::<ExitCode>() {
            std::process::exit(*code);
        }
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
