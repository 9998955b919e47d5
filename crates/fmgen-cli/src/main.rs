//! fmgen CLI - Builder generator for Go structs
//!
//! Commands:
//! - `fmgen generate` - Write `fm_gen.go` builders for eligible structs
//! - `fmgen inspect` - Print the extracted struct models as JSON

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use fmgen_cli::config::settings_root;
use fmgen_cli::{GenerateOptions, Overrides, Settings, Target, generate};
use fmgen_core::{ExtractOptions, LogLevel};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fmgen")]
#[command(author, version, about = "Generates builder boilerplate for Go structs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate fm_gen.go builders
    Generate(SourceArgs),

    /// Print extracted struct models as JSON without writing anything
    Inspect(SourceArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// Starting directory to process (default: current directory)
    #[arg(short, long, alias = "dirname", conflicts_with = "file")]
    dir: Option<PathBuf>,

    /// Single Go file to process instead of a directory
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Comma-separated struct names to generate; others are skipped
    #[arg(short, long)]
    structs: Option<String>,

    /// Only process the starting directory
    #[arg(long)]
    no_recursive: bool,

    /// Log comment, struct and import dumps
    #[arg(short, long)]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    log_level: Option<String>,

    /// Path to fmgen.toml (default: <dir>/fmgen.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl SourceArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            structs: self.structs.clone(),
            no_recursive: self.no_recursive,
            verbose: self.verbose,
            log_level: self.log_level.clone(),
        }
    }

    /// Load settings, apply flags and start logging.
    fn into_options(self) -> Result<GenerateOptions> {
        let root = settings_root(self.dir.as_deref(), self.file.as_deref());
        let settings =
            Settings::load(self.config.as_deref(), &root)?.with_overrides(&self.overrides())?;

        let verbose = settings.generate.verbose;
        let mut level = settings.log_level();
        if verbose && level > LogLevel::Debug {
            level = LogLevel::Debug;
        }
        fmgen_logging::init_logging(level);

        let target = match self.file {
            Some(file) => Target::File(file),
            None => Target::Dir {
                root,
                recursive: settings.generate.recursive,
            },
        };

        Ok(GenerateOptions {
            target,
            allow_list: settings.allow_list(),
            extract: ExtractOptions { verbose },
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => {
            let options = args.into_options()?;
            let summary = generate::run(&options)?;

            for path in &summary.written {
                println!("✓ {}", path.display());
            }
            println!(
                "Generated builders for {} of {} structs in {} file(s)",
                summary.structs_generated,
                summary.structs_found,
                summary.written.len()
            );
        }
        Commands::Inspect(args) => {
            let options = args.into_options()?;
            println!("{}", generate::inspect(&options)?);
        }
    }

    Ok(())
}
