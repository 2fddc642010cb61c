use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use minigit_core::HashAlgorithm;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;

mod commands;

use commands::{add, commit, init, log, status};

#[derive(Parser)]
#[command(name = "minigit")]
#[command(version, about = "A minimal local version-control tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Working directory that holds the repository (defaults to current directory)
    #[arg(short = 'C', long, global = true)]
    root: Option<PathBuf>,

    /// Digest used to detect modified files
    #[arg(long, global = true, default_value = "sha256", value_parser = parse_hash)]
    hash: HashAlgorithm,

    /// Print debug diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the repository layout in the working directory
    Init,

    /// Stage a file from the working directory
    #[command(name = "addFile")]
    AddFile {
        /// Name of the file, relative to the working directory
        filename: String,
    },

    /// Snapshot the staging area as a new commit
    Commit {
        /// Commit author
        author: String,

        /// Commit message (remaining arguments are joined with spaces)
        #[arg(
            required = true,
            num_args = 1..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        message: Vec<String>,
    },

    /// Show commit history, oldest first
    #[command(name = "viewCommitHistory")]
    ViewCommitHistory {
        /// Number of commits to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print the history as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show staged files that are new or modified
    Status,
}

fn parse_hash(s: &str) -> std::result::Result<HashAlgorithm, String> {
    HashAlgorithm::parse(s)
        .ok_or_else(|| format!("unknown hash '{}' (expected sha256 or blake3)", s))
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Command failed: {:?}", e);
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let root = commands::resolve_root(cli.root)?;

    match cli.command {
        Commands::Init => {
            init::run(&root)?;
        }
        Commands::AddFile { filename } => {
            add::run(&root, &filename)?;
        }
        Commands::Commit { author, message } => {
            commit::run(&root, cli.hash, &author, &message.join(" "))?;
        }
        Commands::ViewCommitHistory { limit, json } => {
            log::run(&root, limit, json)?;
        }
        Commands::Status => {
            status::run(&root, cli.hash)?;
        }
    }

    Ok(())
}
