//! quizmatch CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "quizmatch",
    version,
    about = "Trivia answer equivalence checker"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Judge a single answer
    Check {
        /// The submitted answer
        #[arg(long)]
        answer: String,

        /// The known correct answer
        #[arg(long)]
        expected: String,

        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Grade every case in answer set files
    Grade {
        /// Path to .toml answer set or directory
        #[arg(long)]
        answer_set: PathBuf,

        /// Max concurrently graded cases (overrides config)
        #[arg(long)]
        parallelism: Option<usize>,

        /// Output directory (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Filter by tags (comma-separated)
        #[arg(long)]
        filter: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Compare decisions between two grade reports
    Compare {
        /// Baseline report JSON
        #[arg(long)]
        baseline: PathBuf,

        /// Current report JSON
        #[arg(long)]
        current: PathBuf,

        /// Exit code 1 if a labelled case moved away from its label
        #[arg(long)]
        fail_on_regression: bool,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Validate answer set TOML files
    Validate {
        /// Path to answer set file or directory
        #[arg(long)]
        answer_set: PathBuf,
    },

    /// Create starter config and example answer set
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("quizmatch=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check {
            answer,
            expected,
            json,
            config,
        } => commands::check::execute(answer, expected, json, config).await,
        Commands::Grade {
            answer_set,
            parallelism,
            output,
            filter,
            config,
        } => commands::grade::execute(answer_set, parallelism, output, filter, config).await,
        Commands::Compare {
            baseline,
            current,
            fail_on_regression,
            format,
        } => commands::compare::execute(baseline, current, fail_on_regression, format),
        Commands::Validate { answer_set } => commands::validate::execute(answer_set),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
