/*!
Main binary for json2sheet.
*/

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::generate;
use std::io::stdout;
use std::{
    fs::File,
    io::{self, IsTerminal, Read},
    path::PathBuf,
};

use json2sheet::commands;
use json2sheet::sheet::{self, JsonGridSink};

/// Flatten a stream of concatenated JSON values into a grid of rows.
#[derive(Parser)]
#[command(name = "j2s", version, about, long_about = None, disable_help_subcommand = true)]
struct Args {
    /// Optional subcommands
    #[command(subcommand)]
    command: Option<Commands>,
    #[arg(value_name = "FILE")]
    /// Optional path to a file of concatenated JSON values. If omitted,
    /// reads from STDIN
    input: Option<PathBuf>,
    /// Treat each top-level value as an array of cells instead of an object
    #[arg(long, action = ArgAction::SetTrue)]
    arrays: bool,
    /// Pretty-print the emitted grid
    #[arg(long, action = ArgAction::SetTrue)]
    pretty: bool,
    #[command(flatten)]
    verbosity: clap_verbosity_flag::Verbosity,
}

/// Available subcommands for `j2s`
#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    /// Generate additional documentation and/or completions
    Generate(GenerateCommand),
}

/// Generate shell completions and man pages
#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate shell completions for the given shell to stdout.
    Shell { shell: clap_complete::Shell },
    /// Generate man pages for j2s to the output directory if specified,
    /// else the current directory.
    Man {
        /// The output directory to write the man pages.
        #[clap(short, long)]
        output_dir: Option<PathBuf>,
    },
}

/// Entry point for main binary.
///
/// Reads concatenated JSON values from a file or STDIN, projects them into
/// rows (object mode by default, array mode with `--arrays`), and writes
/// the resulting grid to STDOUT as JSON.
fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    match args.command {
        Some(Commands::Generate(cmd)) => match cmd {
            GenerateCommand::Shell { shell } => {
                let mut cmd = Args::command();
                generate(shell, &mut cmd, "j2s", &mut stdout().lock());
            }
            GenerateCommand::Man { output_dir } => {
                commands::generate::generate_man_pages(
                    &Args::command(),
                    output_dir,
                )?;
            }
        },
        None => {
            let input: Box<dyn Read> = if let Some(path) = args.input {
                Box::new(File::open(&path).with_context(|| {
                    format!("Failed to open file {:?}", path)
                })?)
            } else {
                if io::stdin().is_terminal() {
                    // No piped input and no file specified
                    let mut cmd = Args::command();
                    return Ok(cmd.print_help()?);
                }
                Box::new(io::stdin().lock())
            };

            let mut sink = JsonGridSink::new(stdout().lock(), args.pretty);
            if args.arrays {
                log::debug!("projecting input in array mode");
                sheet::write_arrays_to(&mut sink, input)
                    .context("Failed to convert json arrays")?;
            } else {
                log::debug!("projecting input in object mode");
                sheet::write_objects_to(&mut sink, input)
                    .context("Failed to convert json objects")?;
            }
        }
    }

    Ok(())
}
