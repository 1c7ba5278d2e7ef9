use clap::Parser;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "ormdto")]
#[command(about = "Rewrite a TypeORM entity class into a class-validator DTO class")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Path to the TypeORM entity file
    input: PathBuf,

    /// Write the DTO to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Dialect configuration file (TOML, or YAML for .yaml/.yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    commands::convert::run(cli.input, cli.output, cli.config)
}
