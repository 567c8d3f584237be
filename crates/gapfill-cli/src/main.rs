//! gapfill CLI — fill-in-the-blank grammar exercises in the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;
mod context;

use context::Context;

#[derive(Parser)]
#[command(name = "gapfill", version, about = "Fill-in-the-blank grammar exercises")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog directory or http(s):// base URL (overrides the config)
    #[arg(long, global = true)]
    catalog: Option<String>,

    /// UI language: uk, fr, en
    #[arg(long, global = true)]
    lang: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter config and sample catalog
    Init,

    /// List the sections of the catalog
    Sections,

    /// Check the catalog for content mistakes
    Validate,

    /// Check a file of answers against a section
    Check {
        /// Section id
        #[arg(long)]
        section: String,

        /// JSON object mapping question ids to answers
        #[arg(long)]
        answers: PathBuf,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the report to a file (.json or .html)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Exit code 1 if fewer answers are correct
        #[arg(long)]
        fail_under: Option<usize>,
    },

    /// Answer exercises interactively
    Play {
        /// Start location, e.g. "#/section/articles"
        #[arg(long)]
        route: Option<String>,
    },

    /// Print the base64 form of an answer for `answer_b64`
    Encode {
        /// Answer text
        text: String,
    },

    /// Show or set the UI language
    Lang {
        /// Language to save in the config file
        code: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("gapfill=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = Context::load(cli.config.as_deref(), cli.catalog, cli.lang.as_deref())?;

    match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::Sections => commands::sections::execute(&ctx).await,
        Commands::Validate => commands::validate::execute(&ctx).await,
        Commands::Check {
            section,
            answers,
            format,
            output,
            fail_under,
        } => commands::check::execute(&ctx, section, answers, format, output, fail_under).await,
        Commands::Play { route } => commands::play::execute(&ctx, route).await,
        Commands::Encode { text } => commands::encode::execute(&text),
        Commands::Lang { code } => commands::lang::execute(&ctx, code),
    }
}
