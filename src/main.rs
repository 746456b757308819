// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{error, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;

use notes::app_config::{self, Config};
use notes::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Convert notes from LaTeX to MDX
    Convert {
        /// Course directory to convert
        #[arg(value_name = "COURSE_PATH")]
        course_path: PathBuf,

        /// Watch the chapters and convert continuously
        #[arg(short, long)]
        continuous: bool,
    },

    /// Compile LaTeX notes to PDF chapters
    Compile {
        /// Course directory to compile
        #[arg(value_name = "COURSE_PATH")]
        course_path: PathBuf,
    },

    /// Generate shell completions for notes
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// notes - a CLI to manage LaTeX course notes
///
/// Convert notes to MDX to publish them on a website, and bulk compile
/// them to PDF.
#[derive(Parser, Debug)]
#[command(name = "notes")]
#[command(version)]
#[command(about = "A CLI to manage notes")]
#[command(long_about = "Convert LaTeX course notes to MDX for publishing, and compile them to PDF.

EXAMPLES:
    notes convert tex/algebra                  # Convert a course once
    notes convert -c tex/algebra               # Convert, then reconvert on every change
    notes compile tex/algebra                  # Compile course and chapter PDFs
    notes completions bash > notes.bash        # Generate bash completions

CONFIGURATION:
    Configuration is stored in notes.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(long, global = true, default_value = "notes.json")]
    config_path: String,

    /// LaTeX notes directory, overrides the configuration
    #[arg(long, global = true)]
    tex_dir: Option<String>,

    /// MDX notes directory, overrides the configuration
    #[arg(long, global = true)]
    mdx_dir: Option<String>,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI colour for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {:<5} {}\x1B[0m",
                Self::color_for_level(record.level()),
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() {
    // The level filter is tightened once the config is known
    if let Err(e) = CustomLogger::init(LevelFilter::Trace) {
        eprintln!("Failed to initialise logging: {}", e);
    }
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: CommandLineOptions) -> Result<()> {
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "notes", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(&cli)?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Convert { course_path, continuous } => {
            controller
                .convert(&course_path, continuous)
                .await
                .with_context(|| format!("Failed to convert {:?}", course_path))?;
        }
        Commands::Compile { course_path } => {
            controller
                .compile(&course_path)
                .await
                .with_context(|| format!("Failed to compile {:?}", course_path))?;
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

// Load or create the configuration, then apply command line overrides.
// Validation happens when the controller is built.
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(tex_dir) = &cli.tex_dir {
        config.tex_dir = tex_dir.clone();
    }

    if let Some(mdx_dir) = &cli.mdx_dir {
        config.mdx_dir = mdx_dir.clone();
    }

    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}
