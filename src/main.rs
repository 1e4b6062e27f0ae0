//! cmake-doc CLI - CMake documentation from `cmake --help-*`.
//!
//! # Usage
//!
//! ```bash
//! # Documentation for a command
//! cmake-doc command add_library
//!
//! # Module, property or variable, bare or ${}-wrapped
//! cmake-doc literal '${CMAKE_CXX_FLAGS}'
//!
//! # Hover at a position (1-based), or read from stdin with -
//! cmake-doc hover CMakeLists.txt 10 15
//! cat CMakeLists.txt | cmake-doc hover - 10 15 --format json
//!
//! # Known names of a kind
//! cmake-doc list modules
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use cmake_doc::{
    CMake, Config, DocResolver, HelpTopic, HoverInfo, HoverProvider, Notification, RenderFormat,
    Symbol,
};
use std::cell::Cell;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "cmake-doc")]
#[command(about = "CMake hover documentation provider")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the cmake executable
    #[arg(long, global = true, env = "CMAKE_DOC_CMAKE")]
    cmake: Option<PathBuf>,

    /// Config file (default: <config dir>/cmake-doc/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (default: from config, else markdown)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Documentation for a command name
    Command {
        /// Command name (e.g. add_library)
        name: String,
    },

    /// Documentation for a module, property or variable
    Literal {
        /// Name, optionally wrapped as ${NAME}
        text: String,
    },

    /// Documentation for the symbol at a position
    Hover {
        /// CMake file (or - for stdin)
        file: String,

        /// Line number (1-based)
        line: u32,

        /// Column number (1-based)
        column: u32,
    },

    /// Names cmake knows for a kind of literal
    List {
        #[arg(value_enum)]
        kind: ListKind,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, ValueEnum)]
enum OutputFormat {
    Markdown,
    Plain,
    Html,
    Json,
}

impl From<RenderFormat> for OutputFormat {
    fn from(format: RenderFormat) -> Self {
        match format {
            RenderFormat::Plain => OutputFormat::Plain,
            RenderFormat::Markdown => OutputFormat::Markdown,
            RenderFormat::Html => OutputFormat::Html,
        }
    }
}

impl OutputFormat {
    fn render_format(self) -> RenderFormat {
        match self {
            OutputFormat::Plain => RenderFormat::Plain,
            OutputFormat::Html => RenderFormat::Html,
            OutputFormat::Markdown | OutputFormat::Json => RenderFormat::Markdown,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ListKind {
    Modules,
    Properties,
    Variables,
}

impl ListKind {
    fn topic(self) -> HelpTopic {
        match self {
            ListKind::Modules => HelpTopic::Module,
            ListKind::Properties => HelpTopic::Property,
            ListKind::Variables => HelpTopic::Variable,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::discover()?,
    };

    let cmake = CMake::new(match cli.cmake {
        Some(path) => path,
        None => config.cmake_executable()?,
    });
    tracing::debug!("Using CMake at {}", cmake.executable().display());

    let format = cli
        .format
        .unwrap_or_else(|| OutputFormat::from(config.render.format));

    let failed = Cell::new(false);
    let notifier = |notification: &Notification| {
        eprintln!("Error: {}", notification);
        failed.set(true);
    };

    let resolver = DocResolver::with_notifier(cmake, notifier);
    let mut provider =
        HoverProvider::new(resolver).with_renderer(format.render_format().renderer());

    match cli.command {
        Commands::Command { name } => {
            print_hover(provider.generate_doc(&Symbol::command(name)), format)?;
        }
        Commands::Literal { text } => {
            print_hover(provider.generate_doc(&Symbol::literal(text)), format)?;
        }
        Commands::Hover { file, line, column } => {
            let source = if file == "-" {
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                buffer
            } else {
                fs::read_to_string(&file)?
            };
            tracing::debug!("Position: line {}, column {}", line, column);
            print_hover(provider.hover(&source, line, column), format)?;
        }
        Commands::List { kind } => {
            if let Some(list) = provider.resolver_mut().list(kind.topic()) {
                let names: Vec<&str> = list.iter().collect();
                if format == OutputFormat::Json {
                    println!("{}", serde_json::to_string_pretty(&names)?);
                } else {
                    for name in names {
                        println!("{}", name);
                    }
                }
            }
        }
    }

    Ok(if failed.get() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn print_hover(hover: Option<HoverInfo>, format: OutputFormat) -> Result<(), serde_json::Error> {
    match hover {
        Some(info) => {
            let output = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&info)?,
                _ => info.contents,
            };
            println!("{}", output);
        }
        None => tracing::info!("No documentation available"),
    }
    Ok(())
}
