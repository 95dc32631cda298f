//! # abroad-rag-cli
//!
//! Command line front end for the study abroad advisor: list majors, list
//! the programs for a major, ask one question, or walk through all three
//! steps interactively.

mod app;
mod chat;

use anyhow::Result;
use app::AdvisorArgs;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    advisor: AdvisorArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every major found in the catalog
    Majors,
    /// List the programs available for a major
    Programs(ProgramsArgs),
    /// Ask one question about a program
    Ask(AskArgs),
    /// Choose a major and a program, then ask questions interactively
    Chat,
}

#[derive(Parser, Debug)]
struct ProgramsArgs {
    /// The major to look up, e.g. "Business"
    #[arg(long)]
    major: String,
}

#[derive(Parser, Debug)]
struct AskArgs {
    /// The program identifier, e.g. "Spain-IEP"
    #[arg(long)]
    program: String,
    /// The question to ask
    #[arg(long)]
    question: String,
    /// Print the program summary before the answer
    #[arg(long)]
    show_summary: bool,
    /// Print the answer as JSON
    #[arg(long)]
    json: bool,
}

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Log to a file so it does not interleave with the interactive output.
    let log_file = File::create("abroad-rag-cli.log")?;
    let subscriber = fmt::Subscriber::builder()
        .with_writer(log_file)
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let advisor = Arc::new(cli.advisor.build()?);
    info!(command = ?cli.command, "Advisor loaded.");

    let mut out = io::stdout().lock();
    match cli.command {
        Commands::Majors => app::list_majors(&advisor, &mut out)?,
        Commands::Programs(args) => app::list_programs(&advisor, &args.major, &mut out)?,
        Commands::Ask(args) => {
            let options = app::AskOptions {
                show_summary: args.show_summary,
                json: args.json,
            };
            app::ask(&advisor, &args.program, &args.question, options, &mut out).await?
        }
        Commands::Chat => {
            let stdin = io::stdin().lock();
            chat::run(advisor, stdin, &mut out).await?
        }
    }

    Ok(())
}
