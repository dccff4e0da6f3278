use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use convgen_types::ScalarType;
use std::path::PathBuf;

mod commands;
mod config;
mod error;
mod io;

use commands::check::handle_check;
use commands::explain::handle_explain;
use commands::generate::handle_generate;
use commands::list::handle_list;

#[derive(Parser, Debug)]
#[command(name = "convgen")]
#[command(about = "Generates the scalar and vector type conversion library", long_about = None)]
struct Args {
    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Generate the conversion library
    Generate {
        /// Configuration file (defaults to ./convgen.toml if present)
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Output file (defaults to [output].path, then stdout)
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,
    },

    /// List the signature of every generated conversion
    List {
        /// Configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Only show signatures containing this text
        #[arg(short, long, value_name = "TEXT")]
        filter: Option<String>,
    },

    /// Show how one conversion is lowered
    Explain {
        /// Function name, e.g. convert_uchar3_sat
        #[arg(value_name = "NAME")]
        name: String,
        /// Argument scalar type, e.g. int
        #[arg(long, value_name = "TYPE")]
        from: ScalarType,
        /// Configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Validate the configuration and optionally an existing library
    Check {
        /// Previously generated library to verify
        #[arg(value_name = "FILE")]
        artifact: Option<PathBuf>,
        /// Configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}

fn main() -> miette::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .format_timestamp(None)
        .init();

    match args.command {
        Command::Generate { config, output } => handle_generate(config, output)?,
        Command::List { config, filter } => handle_list(config, filter)?,
        Command::Explain { name, from, config } => handle_explain(config, name, from)?,
        Command::Check { artifact, config } => handle_check(config, artifact)?,
    }
    Ok(())
}
