#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::needless_pass_by_value)]

mod commands;
mod config;
mod error;
mod logging;

use clap::Parser;
use miette::Result;
use std::path::PathBuf;
use tracing::debug;

use commands::render::RenderArgs;

#[derive(Parser, Debug)]
#[command(name = "unparse")]
#[command(author, version, about = "Render Shift-JSON ASTs as ECMAScript source", long_about = None)]
struct Cli {
    /// Increase logging verbosity (-v INFO, -vv DEBUG, -vvv TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit JSON formatted output (logs and command output)
    #[arg(long, global = true)]
    json: bool,

    /// Override the working directory
    #[arg(long, global = true, value_name = "PATH")]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print version information
    Version,

    /// Render a Shift-JSON AST as source text
    Render {
        /// AST file to read (`-` for stdin)
        input: PathBuf,

        /// Write output here instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// JSON render config; flags below override it
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Break lines and indent blocks
        #[arg(long)]
        pretty: bool,

        /// Escape output for inlining in an HTML script element
        #[arg(long)]
        web_safe: bool,

        /// Never render large integers in hexadecimal
        #[arg(long)]
        no_hex: bool,
    },

    /// Show how numbers are formatted as literals
    Number {
        /// Values to format
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cwd = cli
        .cwd
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."));

    logging::init(cli.verbose, cli.json);
    debug!(cwd = %cwd.display(), command = ?cli.command, "starting");

    match cli.command {
        None | Some(Commands::Version) => commands::version::run(cli.json),
        Some(Commands::Render {
            input,
            output,
            config,
            pretty,
            web_safe,
            no_hex,
        }) => commands::render::run(
            &cwd,
            &RenderArgs {
                input,
                output,
                config,
                pretty,
                web_safe,
                no_hex,
            },
        ),
        Some(Commands::Number { values }) => commands::number::run(&values, cli.json),
    }
}
