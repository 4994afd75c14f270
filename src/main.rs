use bridgesite::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use colored::Colorize;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bridgesite")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Manufacturing partner site server", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the site server
    Serve {
        /// Config file (default: ./bridgesite.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show the Q/A entries of an interview document
    Parse {
        /// Markdown file to parse
        file: PathBuf,

        /// Output in JSON format
        #[arg(short, long)]
        json: bool,
    },

    /// Print the rendered HTML of an interview document
    Render {
        /// Markdown file to render
        file: PathBuf,
    },

    /// Write a default bridgesite.toml in the current directory
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("Failed to create tokio runtime");

    if let Err(e) = runtime.block_on(run_async(cli)) {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

async fn run_async(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve { config, port } => {
            bridgesite::cli::serve::run(config.as_deref(), port).await?;
        }

        Commands::Parse { file, json } => {
            bridgesite::cli::parse::run(&file, json)?;
        }

        Commands::Render { file } => {
            bridgesite::cli::render::run(&file)?;
        }

        Commands::Init { force } => {
            bridgesite::cli::init::run(force)?;
        }

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "bridgesite", &mut io::stdout());
        }
    }

    Ok(())
}
