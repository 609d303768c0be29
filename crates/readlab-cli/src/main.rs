//! readlab CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "readlab", version, about = "Reading-practice content and progress tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate quiz content
    Generate {
        /// Quiz language (e.g. "english", "tagalog")
        #[arg(long)]
        language: String,

        /// Quiz type: sentence or word
        #[arg(long, default_value = "sentence")]
        quiz_type: String,

        /// Number of items to generate
        #[arg(long, default_value = "5")]
        count: usize,

        /// Exact word length (word quizzes)
        #[arg(long)]
        length: Option<usize>,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Summarize learner progress from attempt records
    Summary {
        /// JSON file holding an array of attempt submissions
        #[arg(long)]
        attempts: PathBuf,

        /// Scope the summary to a single learner
        #[arg(long)]
        learner: Option<u64>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// List registered languages and their quiz types
    Languages {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config and sample content files
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("readlab_core=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            language,
            quiz_type,
            count,
            length,
            seed,
            config,
        } => commands::generate::execute(language, quiz_type, count, length, seed, config),
        Commands::Summary {
            attempts,
            learner,
            format,
        } => commands::summary::execute(attempts, learner, format),
        Commands::Languages { config } => commands::languages::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
