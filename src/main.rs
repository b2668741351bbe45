use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use qrc_check::{Result, ValidatorConfig};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "qrc-check")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Validate a Qt resource collection (.qrc) manifest against the filesystem")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Directory the manifest paths are relative to (default: current directory)
    #[arg(short = 'C', long, global = true)]
    base_dir: Option<PathBuf>,

    /// Manifest to validate (default: toonz.qrc in the base directory)
    #[arg(short, long, global = true)]
    manifest: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    if let Some(Commands::Completions { shell }) = cli.command {
        generate(shell, &mut Cli::command(), "qrc-check", &mut io::stdout());
        return Ok(true);
    }

    let mut config = match cli.base_dir {
        Some(dir) => ValidatorConfig::new(dir),
        None => ValidatorConfig::from_current_dir()?,
    };
    if let Some(manifest) = cli.manifest {
        config = config.with_manifest(manifest);
    }

    qrc_check::cli::validate::run(config)
}
