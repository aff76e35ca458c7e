use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use veripipe::commands::common::{OutputOptions, Project};
use veripipe::commands::{inspect, render, run, self_check, status, topology};
use veripipe::logging::init_logging;

#[derive(Parser)]
#[command(name = "veripipe")]
#[command(about = "Run isolated verification tools and score system health", long_about = None)]
#[command(version)]
struct Cli {
    /// Project root the tools run in
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Config file (default: <root>/veripipe.toml, or $VERIPIPE_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Copy)]
struct OutputArgs {
    /// Print JSON instead of the rendered report
    #[arg(long)]
    json: bool,

    /// Plain ASCII output without colours (also honoured: NO_COLOR)
    #[arg(long)]
    no_color: bool,

    /// Keep colours but use ASCII instead of box-drawing and check-mark glyphs
    #[arg(long)]
    ascii: bool,
}

impl From<OutputArgs> for OutputOptions {
    fn from(args: OutputArgs) -> Self {
        OutputOptions {
            json: args.json,
            no_color: args.no_color,
            ascii: args.ascii,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the verification pipeline (exit 0 iff ready)
    Run {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Render a saved pipeline report (file path, or stdin)
    Render {
        /// Report JSON file; `-` or omitted reads stdin
        input: Option<PathBuf>,

        /// Plain ASCII output without colours (also honoured: NO_COLOR)
        #[arg(long)]
        no_color: bool,

        /// Keep colours but use ASCII instead of box-drawing and check-mark glyphs
        #[arg(long)]
        ascii: bool,
    },

    /// Show engine status from the latest snapshot
    Status {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show metrics and structure of the latest snapshot
    Inspect {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Draw the execution map of the last pipeline run
    Topology {
        #[command(flatten)]
        output: OutputArgs,
    },

    /// Check that system memory is writable
    SelfCheck {
        #[command(flatten)]
        output: OutputArgs,
    },
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn dispatch(cli: Cli) -> Result<bool> {
    let load = || Project::load(&cli.root, cli.config.as_deref());

    match cli.command {
        Commands::Run { output } => run::execute(&load()?, output.into()),
        Commands::Render {
            input,
            no_color,
            ascii,
        } => {
            let output = OutputOptions {
                json: false,
                no_color,
                ascii,
            };
            render::execute(input.as_deref(), output).map(|_| true)
        }
        Commands::Status { output } => status::execute(&load()?, output.into()).map(|_| true),
        Commands::Inspect { output } => inspect::execute(&load()?, output.into()),
        Commands::Topology { output } => topology::execute(&load()?, output.into()),
        Commands::SelfCheck { output } => self_check::execute(&load()?, output.into()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match dispatch(cli) {
        Ok(success) => exit_code(success),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}
