//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use embuild::settings::Settings;

use crate::commands;

/// embuild - Fetch project libraries and generate their CMake aggregation file
#[derive(Parser, Debug)]
#[command(name = "embuild")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Show output of git and of executed commands, and full error chains
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,

    /// Local checkout of the library catalog.
    ///
    /// Defaults to `~/.embuild/repository`.
    #[arg(long, global = true, value_name = "DIR", env = "EMBUILD_CATALOG_DIR")]
    catalog_dir: Option<PathBuf>,

    /// Git URL of the library catalog repository.
    #[arg(long, global = true, value_name = "URL", env = "EMBUILD_CATALOG_URL")]
    catalog_url: Option<String>,

    /// Use the local catalog checkout as-is instead of cloning or pulling it
    #[arg(long, global = true, env = "EMBUILD_NO_CATALOG_SYNC")]
    no_catalog_sync: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the libraries available in the catalog
    List(commands::list::ListArgs),

    /// Create a new project in a directory
    Create(commands::create::CreateArgs),

    /// Create an embuild.yaml in an existing directory
    Init(commands::init::InitArgs),

    /// Add libraries to the project and update
    Add(commands::add::AddArgs),

    /// Fetch all libraries and regenerate the libraries CMakeLists.txt
    Update(commands::update::UpdateArgs),

    /// Run a script declared in embuild.yaml
    Run(commands::run::RunArgs),

    /// Verify that required tools are installed
    Check(commands::check::CheckArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Whether verbose output was requested.
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        let level = if self.verbose {
            "debug"
        } else {
            self.log_level.as_str()
        };
        init_logging(level);

        let settings = Settings::new(
            self.verbose,
            self.catalog_url,
            self.catalog_dir,
            !self.no_catalog_sync,
        );

        match self.command {
            Commands::List(args) => commands::list::execute(args, &settings),
            Commands::Create(args) => commands::create::execute(args),
            Commands::Init(args) => commands::init::execute(args),
            Commands::Add(args) => commands::add::execute(args, &settings),
            Commands::Update(args) => commands::update::execute(args, &settings),
            Commands::Run(args) => commands::run::execute(args, &settings),
            Commands::Check(args) => commands::check::execute(args, &settings),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

/// Initializes `env_logger`; `RUST_LOG` takes precedence over `level`.
fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
